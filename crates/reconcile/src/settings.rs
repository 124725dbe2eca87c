// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for config generation.

const DEFAULT_IMAGE: &str = "example.dev/workspace-tooling:latest";
const DEFAULT_WORKSPACE_PORT: i32 = 60001;

/// Container image used for devfile components that declare none.
pub fn default_image() -> String {
    std::env::var("TETHER_DEFAULT_IMAGE").unwrap_or_else(|_| DEFAULT_IMAGE.to_string())
}

/// Container port used for devfile endpoints that declare none.
pub fn workspace_port() -> i32 {
    std::env::var("TETHER_WORKSPACE_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_WORKSPACE_PORT)
}

/// Snapshot of the environment-derived settings.
///
/// Generators hold a snapshot instead of reading the environment per call,
/// so tests can pin values without process-global state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSettings {
    pub default_image: String,
    pub workspace_port: i32,
}

impl ConfigSettings {
    /// Read the current environment.
    pub fn from_env() -> Self {
        Self { default_image: default_image(), workspace_port: workspace_port() }
    }
}

impl Default for ConfigSettings {
    fn default() -> Self {
        Self {
            default_image: DEFAULT_IMAGE.to_string(),
            workspace_port: DEFAULT_WORKSPACE_PORT,
        }
    }
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
