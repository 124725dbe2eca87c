// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! tether-storage: persistence seam for workspace records.
//!
//! The reconciler only sees the [`WorkspaceStore`] trait, so production can
//! back it with a database client while tests use the in-memory store.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod memory;
mod store;

pub use memory::InMemoryWorkspaceStore;
pub use store::{StoreError, WorkspaceStore};
