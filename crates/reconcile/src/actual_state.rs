// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Actual-state classification from Deployment status conditions.
//!
//! Pure function, no I/O: the same inputs always classify to the same
//! [`WorkspaceState`], and malformed snapshots degrade to `Unknown` rather
//! than failing.

use tether_core::WorkspaceState;
use tether_wire::{
    DeploymentSnapshot, ErrorDetails, TerminationProgress, CONDITION_TYPE_AVAILABLE,
    CONDITION_TYPE_PROGRESSING,
};

// Condition reasons emitted by the Deployment controller.
const REASON_MINIMUM_REPLICAS_AVAILABLE: &str = "MinimumReplicasAvailable";
const REASON_NEW_REPLICA_SET_AVAILABLE: &str = "NewReplicaSetAvailable";
const REASON_NEW_REPLICA_SET_CREATED: &str = "NewReplicaSetCreated";
const REASON_FOUND_NEW_REPLICA_SET: &str = "FoundNewReplicaSet";
const REASON_REPLICA_SET_UPDATED: &str = "ReplicaSetUpdated";
const REASON_PROGRESS_DEADLINE_EXCEEDED: &str = "ProgressDeadlineExceeded";

/// Derive one actual-state value from a Deployment status snapshot and the
/// agent's termination/error signals.
///
/// Priority order, first match wins:
/// 1. An error signal classifies to `Error`, unless termination is already
///    in progress (a workspace being torn down outranks a stale error).
/// 2. `Terminated` / `Terminating` per the termination signal.
/// 3. Otherwise the snapshot's `Available`/`Progressing` condition reasons
///    decide, scaled by `spec.replicas`. Anything unrecognized, and any
///    snapshot missing replicas or complete conditions or with replicas
///    outside 0..=1, is `Unknown`.
///
/// Known limitation, kept for compatibility: a previously failed workspace
/// that was scaled down and is being scaled back up reports the rollout
/// reasons of a normal start, so it classifies as `Starting` rather than
/// `Failed` even though the deployment had been failing.
pub fn calculate_actual_state(
    snapshot: Option<&DeploymentSnapshot>,
    termination_progress: Option<TerminationProgress>,
    error_details: Option<&ErrorDetails>,
) -> WorkspaceState {
    if error_details.is_some() && termination_progress != Some(TerminationProgress::Terminating) {
        return WorkspaceState::Error;
    }
    match termination_progress {
        Some(TerminationProgress::Terminated) => return WorkspaceState::Terminated,
        Some(TerminationProgress::Terminating) => return WorkspaceState::Terminating,
        None => {}
    }

    let Some(snapshot) = snapshot else {
        return WorkspaceState::Unknown;
    };
    let Some(replicas) = snapshot.replicas() else {
        return WorkspaceState::Unknown;
    };
    if snapshot.complete_conditions().is_empty() || replicas < 0 || replicas > 1 {
        return WorkspaceState::Unknown;
    }

    let available = snapshot.reason_for(CONDITION_TYPE_AVAILABLE);
    let progressing = snapshot.reason_for(CONDITION_TYPE_PROGRESSING);

    match progressing {
        Some(REASON_NEW_REPLICA_SET_AVAILABLE)
            if available == Some(REASON_MINIMUM_REPLICAS_AVAILABLE) =>
        {
            if replicas == 1 {
                WorkspaceState::Running
            } else {
                WorkspaceState::Stopped
            }
        }
        Some(
            REASON_NEW_REPLICA_SET_CREATED
            | REASON_FOUND_NEW_REPLICA_SET
            | REASON_REPLICA_SET_UPDATED,
        ) => {
            if replicas == 1 {
                WorkspaceState::Starting
            } else {
                WorkspaceState::Stopping
            }
        }
        Some(REASON_PROGRESS_DEADLINE_EXCEEDED) => WorkspaceState::Failed,
        _ => WorkspaceState::Unknown,
    }
}

#[cfg(test)]
#[path = "actual_state_tests.rs"]
mod tests;
