// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Inbound reconciliation request: per-workspace reports from an agent.

use serde::{Deserialize, Serialize};
use tether_core::{AgentId, WorkspaceState};

use crate::snapshot::DeploymentSnapshot;

/// Kind of sync the agent is performing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpdateType {
    /// Resync: the response must cover every workspace the agent should
    /// manage, reported or not.
    Full,
    /// Incremental: only the reported workspaces are answered.
    Partial,
}

/// Where the agent is in tearing a workspace down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminationProgress {
    Terminating,
    Terminated,
}

/// Error the agent hit while applying workspace configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorDetails {
    pub error_type: Option<String>,
    pub error_message: Option<String>,
}

/// One agent report about one workspace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentWorkspaceReport {
    pub name: String,
    pub namespace: String,
    /// Actual state the agent derived before this report
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_actual_state: Option<WorkspaceState>,
    /// Actual state the agent derived for this report (redundant; the
    /// server recomputes from the snapshot)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_actual_state: Option<WorkspaceState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployment_resource_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_k8s_deployment_info: Option<DeploymentSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub termination_progress: Option<TerminationProgress>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_details: Option<ErrorDetails>,
}

/// One reconciliation call from one agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcileRequest {
    pub agent_id: AgentId,
    pub update_type: UpdateType,
    #[serde(default)]
    pub workspace_agent_infos: Vec<AgentWorkspaceReport>,
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
