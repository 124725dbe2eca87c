// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! tether-reconcile: the workspace reconciliation control loop.
//!
//! # Module layout
//!
//! - [`actual_state`] — pure classification of Deployment status snapshots
//! - [`config`] — desired Kubernetes configuration from the stored devfile
//! - [`reconciler`] — per-request orchestration over the storage seam
//! - [`settings`] — environment-variable accessors for config defaults
//!
//! One reconciliation call is one [`Reconciler::process`] invocation: the
//! batch of agent reports is processed in order, state transitions are
//! applied through the store, and the aggregated response is returned. No
//! error value escapes `process`; per-workspace failures are logged and
//! their entries omitted.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod actual_state;
pub mod config;
pub mod reconciler;
pub mod settings;

pub use actual_state::calculate_actual_state;
pub use config::{ConfigError, ConfigGenerator, DesiredConfigGenerator};
pub use reconciler::Reconciler;
pub use settings::ConfigSettings;
