// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory workspace store for tests and single-process deployments.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use tether_core::{AgentId, Workspace};

use crate::store::{StoreError, WorkspaceStore};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct WorkspaceKey {
    agent_id: AgentId,
    namespace: String,
    name: String,
}

impl WorkspaceKey {
    fn of(workspace: &Workspace) -> Self {
        Self {
            agent_id: workspace.agent_id.clone(),
            namespace: workspace.namespace.clone(),
            name: workspace.name.clone(),
        }
    }
}

/// Workspace store backed by a mutex-guarded map.
#[derive(Default)]
pub struct InMemoryWorkspaceStore {
    inner: Mutex<HashMap<WorkspaceKey, Workspace>>,
}

impl InMemoryWorkspaceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WorkspaceStore for InMemoryWorkspaceStore {
    async fn find(
        &self,
        agent_id: &AgentId,
        namespace: &str,
        name: &str,
    ) -> Result<Option<Workspace>, StoreError> {
        let key = WorkspaceKey {
            agent_id: agent_id.clone(),
            namespace: namespace.to_string(),
            name: name.to_string(),
        };
        Ok(self.inner.lock().get(&key).cloned())
    }

    async fn list_for_agent(&self, agent_id: &AgentId) -> Result<Vec<Workspace>, StoreError> {
        let mut workspaces: Vec<Workspace> = self
            .inner
            .lock()
            .values()
            .filter(|ws| &ws.agent_id == agent_id)
            .cloned()
            .collect();
        workspaces.sort_by(|a, b| (&a.namespace, &a.name).cmp(&(&b.namespace, &b.name)));
        Ok(workspaces)
    }

    async fn insert(&self, workspace: Workspace) -> Result<(), StoreError> {
        let key = WorkspaceKey::of(&workspace);
        let mut inner = self.inner.lock();
        if inner.contains_key(&key) {
            return Err(StoreError::AlreadyExists {
                namespace: workspace.namespace,
                name: workspace.name,
            });
        }
        inner.insert(key, workspace);
        Ok(())
    }

    async fn save(&self, workspace: &Workspace) -> Result<u64, StoreError> {
        let key = WorkspaceKey::of(workspace);
        let mut inner = self.inner.lock();
        let Some(stored) = inner.get_mut(&key) else {
            return Err(StoreError::NotFound {
                namespace: workspace.namespace.clone(),
                name: workspace.name.clone(),
            });
        };
        if stored.revision != workspace.revision {
            return Err(StoreError::Conflict {
                namespace: workspace.namespace.clone(),
                name: workspace.name.clone(),
                expected: workspace.revision,
                actual: stored.revision,
            });
        }
        *stored = workspace.clone();
        stored.revision += 1;
        Ok(stored.revision)
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
