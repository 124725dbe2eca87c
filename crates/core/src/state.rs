// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workspace state enumeration shared by desired and actual state.
//!
//! The same closed set of values is used in both roles, but only a subset is
//! accepted as a desired state: the rest are observations that can only come
//! back from a cluster agent.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// State of a workspace, as desired by the user or as reported by the agent.
///
/// Serialized with PascalCase variant names to match the agent protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkspaceState {
    /// User asked for the workspace; nothing has been provisioned yet
    CreationRequested,
    /// Deployment exists and is rolling out towards available
    Starting,
    /// Deployment is available with one replica
    Running,
    /// Deployment is scaling down to zero replicas
    Stopping,
    /// Deployment is available with zero replicas
    Stopped,
    /// Deployment exceeded its progress deadline
    Failed,
    /// Agent reported an error applying configuration
    Error,
    /// Workspace resources are being removed
    Terminating,
    /// Workspace resources are gone; terminal state
    Terminated,
    /// User asked for a stop-then-start cycle
    RestartRequested,
    /// Deployment status could not be classified
    Unknown,
}

impl WorkspaceState {
    /// True only for the terminal [`Terminated`](Self::Terminated) state.
    pub fn is_terminated(&self) -> bool {
        matches!(self, WorkspaceState::Terminated)
    }

    /// True for the subset of states a user may request as desired state.
    pub fn is_valid_desired_state(&self) -> bool {
        matches!(
            self,
            WorkspaceState::Running
                | WorkspaceState::Stopped
                | WorkspaceState::Terminated
                | WorkspaceState::RestartRequested
        )
    }
}

crate::simple_display! {
    WorkspaceState {
        CreationRequested => "creation_requested",
        Starting => "starting",
        Running => "running",
        Stopping => "stopping",
        Stopped => "stopped",
        Failed => "failed",
        Error => "error",
        Terminating => "terminating",
        Terminated => "terminated",
        RestartRequested => "restart_requested",
        Unknown => "unknown",
    }
}

/// Errors from desired-state writes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StateError {
    /// The value is an observation-only state and cannot be requested.
    #[error("'{0}' is not a valid desired state")]
    InvalidDesiredState(WorkspaceState),
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
