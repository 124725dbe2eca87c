// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Outbound reconciliation response: per-workspace updates for the agent.

use serde::{Deserialize, Serialize};
use tether_core::WorkspaceState;

/// Per-workspace answer: current states plus configuration to apply, if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceUpdate {
    pub name: String,
    pub namespace: String,
    pub desired_state: WorkspaceState,
    pub actual_state: WorkspaceState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployment_resource_version: Option<String>,
    /// Serialized resource list the agent must apply. `None` means the
    /// workspace is converged and nothing needs applying.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_to_apply: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReconcilePayload {
    pub workspace_updates: Vec<WorkspaceUpdate>,
}

/// Batch response. A non-`None` `message` means the batch failed and the
/// payload is empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReconcileResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub payload: ReconcilePayload,
}

impl ReconcileResponse {
    /// Successful batch with the given updates.
    pub fn ok(workspace_updates: Vec<WorkspaceUpdate>) -> Self {
        Self { message: None, payload: ReconcilePayload { workspace_updates } }
    }

    /// Failed batch; the payload is left empty.
    pub fn failed(message: impl Into<String>) -> Self {
        Self { message: Some(message.into()), payload: ReconcilePayload::default() }
    }
}

#[cfg(test)]
#[path = "response_tests.rs"]
mod tests;
