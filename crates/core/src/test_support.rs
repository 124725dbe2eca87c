// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

/// A minimal flattened devfile with a single container component.
pub const DEVFILE_JSON: &str = r#"{
  "components": [
    {
      "name": "tooling",
      "container": {
        "image": "example.dev/tooling:latest",
        "env": [{"name": "SHELL", "value": "/bin/bash"}],
        "endpoints": [{"name": "editor", "targetPort": 60001}]
      }
    }
  ]
}"#;

/// A flattened devfile whose only component has no container.
pub const DEVFILE_NO_CONTAINER_JSON: &str = r#"{
  "components": [
    {"name": "volume-only"}
  ]
}"#;

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for core state machine types.
pub mod strategies {
    use crate::state::WorkspaceState;
    use proptest::prelude::*;

    pub fn arb_workspace_state() -> impl Strategy<Value = WorkspaceState> {
        prop_oneof![
            Just(WorkspaceState::CreationRequested),
            Just(WorkspaceState::Starting),
            Just(WorkspaceState::Running),
            Just(WorkspaceState::Stopping),
            Just(WorkspaceState::Stopped),
            Just(WorkspaceState::Failed),
            Just(WorkspaceState::Error),
            Just(WorkspaceState::Terminating),
            Just(WorkspaceState::Terminated),
            Just(WorkspaceState::RestartRequested),
            Just(WorkspaceState::Unknown),
        ]
    }
}
