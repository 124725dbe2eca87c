// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The workspace repository trait.

use async_trait::async_trait;
use tether_core::{AgentId, Workspace};
use thiserror::Error;

/// Errors from workspace persistence.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Insert hit an existing (agent, namespace, name) identity.
    #[error("workspace '{namespace}/{name}' already exists")]
    AlreadyExists { namespace: String, name: String },

    /// Save targeted a workspace that is no longer stored.
    #[error("workspace '{namespace}/{name}' not found")]
    NotFound { namespace: String, name: String },

    /// Save lost an optimistic-concurrency race.
    #[error("workspace '{namespace}/{name}' was modified concurrently (revision {expected} != {actual})")]
    Conflict {
        namespace: String,
        name: String,
        expected: u64,
        actual: u64,
    },

    /// Backend failure (connection loss, query error).
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Repository for workspace records.
///
/// Identity is (agent, namespace, name). `save` uses the record's `revision`
/// as an optimistic-concurrency token: a mismatch with the stored revision
/// fails with [`StoreError::Conflict`] instead of losing the other write.
#[async_trait]
pub trait WorkspaceStore: Send + Sync {
    /// Look up one workspace by identity.
    async fn find(
        &self,
        agent_id: &AgentId,
        namespace: &str,
        name: &str,
    ) -> Result<Option<Workspace>, StoreError>;

    /// All workspaces managed by the agent, sorted by (namespace, name).
    async fn list_for_agent(&self, agent_id: &AgentId) -> Result<Vec<Workspace>, StoreError>;

    /// Store a new workspace.
    async fn insert(&self, workspace: Workspace) -> Result<(), StoreError>;

    /// Persist an updated workspace, returning the new revision.
    async fn save(&self, workspace: &Workspace) -> Result<u64, StoreError>;
}
