// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The workspace entity and its state-transition helpers.
//!
//! A workspace is a remote development environment running as a Kubernetes
//! Deployment on a cluster managed by an agent. The record tracks both what
//! the user wants (`desired_state`) and what the agent last reported
//! (`actual_state`); the reconcile crate is the only writer after creation.

use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::id::{AgentId, UserId};
use crate::state::{StateError, WorkspaceState};

const MS_PER_HOUR: u64 = 3_600_000;

/// A remote development workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    /// Unique within its namespace
    pub name: String,
    /// Kubernetes namespace the workspace deploys into
    pub namespace: String,
    /// Cluster agent responsible for this workspace
    pub agent_id: AgentId,
    /// Owning user
    pub owner: UserId,
    pub desired_state: WorkspaceState,
    pub actual_state: WorkspaceState,
    /// Bumped on every desired-state change
    pub desired_state_updated_at_ms: u64,
    /// Set on every computed response, regardless of outcome.
    ///
    /// Invariant after any reconciliation pass touching the workspace:
    /// `responded_to_agent_at_ms >= desired_state_updated_at_ms`.
    pub responded_to_agent_at_ms: Option<u64>,
    /// Last Deployment resourceVersion observed from the agent
    pub deployment_resource_version: Option<String>,
    /// Hours after creation at which the workspace is force-terminated
    pub max_hours_before_termination: u32,
    pub created_at_ms: u64,
    /// Emit the full resource set instead of an incremental diff.
    /// True until the workspace has been provisioned once.
    pub force_include_all_resources: bool,
    /// Flattened devfile (JSON), input to config generation
    pub devfile: String,
    /// Optimistic-concurrency token owned by the store
    pub revision: u64,
}

/// Parameters for creating a workspace from a user request.
pub struct WorkspaceParams {
    pub name: String,
    pub namespace: String,
    pub agent_id: AgentId,
    pub owner: UserId,
    pub devfile: String,
    pub max_hours_before_termination: u32,
}

impl Workspace {
    /// Create a workspace from a user request.
    ///
    /// New workspaces want to run (`desired_state = Running`) but nothing is
    /// provisioned yet (`actual_state = CreationRequested`), so the first
    /// reconciliation must hand the agent the full resource set.
    pub fn new(params: WorkspaceParams, clock: &impl Clock) -> Self {
        let now = clock.epoch_ms();
        Self {
            name: params.name,
            namespace: params.namespace,
            agent_id: params.agent_id,
            owner: params.owner,
            desired_state: WorkspaceState::Running,
            actual_state: WorkspaceState::CreationRequested,
            desired_state_updated_at_ms: now,
            responded_to_agent_at_ms: None,
            deployment_resource_version: None,
            max_hours_before_termination: params.max_hours_before_termination,
            created_at_ms: now,
            force_include_all_resources: true,
            devfile: params.devfile,
            revision: 0,
        }
    }

    /// Set the desired state, stamping `desired_state_updated_at_ms` with
    /// `now_ms`.
    ///
    /// Rejects observation-only states. A write of the current value is a
    /// no-op and does not bump the timestamp. Callers that also record a
    /// response must reuse the same `now_ms` so the response timestamp
    /// never trails the desired-state update.
    pub fn set_desired_state(
        &mut self,
        state: WorkspaceState,
        now_ms: u64,
    ) -> Result<(), StateError> {
        if !state.is_valid_desired_state() {
            return Err(StateError::InvalidDesiredState(state));
        }
        if state == self.desired_state {
            return Ok(());
        }
        self.desired_state = state;
        self.desired_state_updated_at_ms = now_ms;
        Ok(())
    }

    /// True once the workspace has outlived `max_hours_before_termination`.
    pub fn past_termination_cutoff(&self, now_ms: u64) -> bool {
        now_ms >= self.created_at_ms + u64::from(self.max_hours_before_termination) * MS_PER_HOUR
    }

    /// Record that a response was computed for the agent.
    pub fn record_response(&mut self, now_ms: u64) {
        self.responded_to_agent_at_ms = Some(now_ms);
    }
}

crate::builder! {
    pub struct WorkspaceBuilder => Workspace {
        into {
            name: String = "ws-test",
            namespace: String = "ns-test",
            agent_id: AgentId = "agt-test",
            owner: UserId = "usr-test",
            devfile: String = crate::test_support::DEVFILE_JSON,
        }
        set {
            desired_state: WorkspaceState = WorkspaceState::Running,
            actual_state: WorkspaceState = WorkspaceState::CreationRequested,
            desired_state_updated_at_ms: u64 = 1_000_000,
            created_at_ms: u64 = 1_000_000,
            max_hours_before_termination: u32 = 24,
            force_include_all_resources: bool = true,
            revision: u64 = 0,
        }
        option {
            responded_to_agent_at_ms: u64 = None,
            deployment_resource_version: String = None,
        }
    }
}

#[cfg(test)]
#[path = "workspace_tests.rs"]
mod tests;
