// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tether-core: domain types for remote workspace reconciliation.
//!
//! No I/O lives here. The [`Workspace`] entity, its state enumeration, and
//! the [`Clock`] abstraction are consumed by the storage and reconcile
//! crates.

pub mod macros;

pub mod clock;
pub mod id;
pub mod state;
pub mod workspace;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use clock::{Clock, FakeClock, SystemClock};
pub use id::{AgentId, UserId};
pub use state::{StateError, WorkspaceState};
#[cfg(any(test, feature = "test-support"))]
pub use workspace::WorkspaceBuilder;
pub use workspace::{Workspace, WorkspaceParams};
