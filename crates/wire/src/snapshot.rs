// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Kubernetes Deployment status snapshot as reported by the agent.
//!
//! The agent forwards a pruned view of the Deployment object. Every field is
//! optional: upstream sends whatever the cluster had, and classification
//! degrades to `Unknown` rather than failing on a missing field.

use serde::{Deserialize, Serialize};

/// Condition type emitted by the Deployment controller.
pub const CONDITION_TYPE_AVAILABLE: &str = "Available";
/// Condition type emitted while a rollout is in flight.
pub const CONDITION_TYPE_PROGRESSING: &str = "Progressing";

/// Pruned Deployment object: `spec.replicas` plus status conditions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeploymentSnapshot {
    pub spec: Option<SnapshotSpec>,
    pub status: Option<SnapshotStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotSpec {
    pub replicas: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SnapshotStatus {
    pub available_replicas: Option<i32>,
    pub unavailable_replicas: Option<i32>,
    pub conditions: Option<Vec<SnapshotCondition>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotCondition {
    #[serde(rename = "type")]
    pub condition_type: Option<String>,
    pub reason: Option<String>,
}

impl SnapshotCondition {
    /// True when both `type` and `reason` are present.
    pub fn is_complete(&self) -> bool {
        self.condition_type.is_some() && self.reason.is_some()
    }
}

impl DeploymentSnapshot {
    /// `spec.replicas`, if the agent sent it.
    pub fn replicas(&self) -> Option<i32> {
        self.spec.as_ref()?.replicas
    }

    /// Conditions with both `type` and `reason` present, in report order.
    pub fn complete_conditions(&self) -> Vec<&SnapshotCondition> {
        self.status
            .as_ref()
            .and_then(|s| s.conditions.as_ref())
            .map(|conditions| conditions.iter().filter(|c| c.is_complete()).collect())
            .unwrap_or_default()
    }

    /// The `reason` of the first complete condition of the given type.
    pub fn reason_for(&self, condition_type: &str) -> Option<&str> {
        self.complete_conditions()
            .into_iter()
            .find(|c| c.condition_type.as_deref() == Some(condition_type))
            .and_then(|c| c.reason.as_deref())
    }
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
