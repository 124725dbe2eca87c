// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Agent-facing protocol DTOs for workspace reconciliation.
//!
//! One request per reconciliation call: the agent posts a batch of
//! per-workspace reports and gets back a batch of per-workspace updates,
//! each optionally carrying configuration to apply.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod report;
mod response;
mod snapshot;

pub use report::{
    AgentWorkspaceReport, ErrorDetails, ReconcileRequest, TerminationProgress, UpdateType,
};
pub use response::{ReconcilePayload, ReconcileResponse, WorkspaceUpdate};
pub use snapshot::{
    DeploymentSnapshot, SnapshotCondition, SnapshotSpec, SnapshotStatus, CONDITION_TYPE_AVAILABLE,
    CONDITION_TYPE_PROGRESSING,
};
