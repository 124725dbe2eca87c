// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reconciliation orchestration: one request in, one batch response out.

use std::collections::HashSet;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use tether_core::{AgentId, Clock, StateError, Workspace, WorkspaceState};
use tether_storage::{StoreError, WorkspaceStore};
use tether_wire::{
    AgentWorkspaceReport, ReconcileRequest, ReconcileResponse, UpdateType, WorkspaceUpdate,
};

use crate::actual_state::calculate_actual_state;
use crate::config::{ConfigError, ConfigGenerator};

/// Per-workspace processing failure. Never escapes [`Reconciler::process`];
/// it only decides which response entries get dropped.
#[derive(Debug, Error)]
enum ReconcileError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    State(#[from] StateError),
}

/// Processes reconciliation requests from cluster agents.
///
/// Holds the storage seam, the config generator, and a clock; one instance
/// may serve calls for different agents concurrently since each call only
/// touches its own agent's workspaces.
pub struct Reconciler<C: Clock> {
    store: Arc<dyn WorkspaceStore>,
    config: Arc<dyn ConfigGenerator>,
    clock: C,
}

impl<C: Clock> Reconciler<C> {
    pub fn new(store: Arc<dyn WorkspaceStore>, config: Arc<dyn ConfigGenerator>, clock: C) -> Self {
        Self { store, config, clock }
    }

    /// Process one reconciliation request to completion.
    ///
    /// Reports are handled in presentation order. For a `Full` sync, every
    /// non-terminated workspace of the agent without a matching report is
    /// then processed against its persisted actual state, so a resyncing
    /// agent receives configuration for workspaces it did not mention.
    ///
    /// Per-workspace failures are logged and their entries omitted; only a
    /// failure to list the agent's workspaces fails the whole batch.
    pub async fn process(&self, request: ReconcileRequest) -> ReconcileResponse {
        let mut updates = Vec::new();
        let mut reported: HashSet<(String, String)> = HashSet::new();

        for report in &request.workspace_agent_infos {
            reported.insert((report.namespace.clone(), report.name.clone()));
            match self.process_report(&request.agent_id, report).await {
                Ok(Some(update)) => updates.push(update),
                Ok(None) => {} // orphaned: logged, no entry
                Err(err) => warn!(
                    name = %report.name,
                    namespace = %report.namespace,
                    error = %err,
                    "dropping workspace from response after processing failure"
                ),
            }
        }

        if request.update_type == UpdateType::Full {
            let workspaces = match self.store.list_for_agent(&request.agent_id).await {
                Ok(workspaces) => workspaces,
                Err(err) => {
                    return ReconcileResponse::failed(format!(
                        "failed to list workspaces for full sync: {err}"
                    ))
                }
            };
            for ws in workspaces {
                if ws.actual_state.is_terminated()
                    || reported.contains(&(ws.namespace.clone(), ws.name.clone()))
                {
                    continue;
                }
                // No report: the persisted actual state stands in for one.
                let actual = ws.actual_state;
                let (name, namespace) = (ws.name.clone(), ws.namespace.clone());
                match self.apply(ws, actual).await {
                    Ok(update) => updates.push(update),
                    Err(err) => warn!(
                        name = %name,
                        namespace = %namespace,
                        error = %err,
                        "dropping workspace from response after processing failure"
                    ),
                }
            }
        }

        ReconcileResponse::ok(updates)
    }

    async fn process_report(
        &self,
        agent_id: &AgentId,
        report: &AgentWorkspaceReport,
    ) -> Result<Option<WorkspaceUpdate>, ReconcileError> {
        let Some(mut ws) = self.store.find(agent_id, &report.namespace, &report.name).await? else {
            warn!(
                error_type = "orphaned_workspace",
                agent_id = %agent_id,
                name = %report.name,
                namespace = %report.namespace,
                "report for a workspace this agent does not manage"
            );
            return Ok(None);
        };

        let actual = calculate_actual_state(
            report.latest_k8s_deployment_info.as_ref(),
            report.termination_progress,
            report.error_details.as_ref(),
        );
        ws.deployment_resource_version = report.deployment_resource_version.clone();

        self.apply(ws, actual).await.map(Some)
    }

    /// Steps 2-11 of the per-workspace algorithm: cutoff, state transition,
    /// persistence, config emission, response entry.
    async fn apply(
        &self,
        mut ws: Workspace,
        actual: WorkspaceState,
    ) -> Result<WorkspaceUpdate, ReconcileError> {
        // One clock read per workspace: the desired-state stamps and the
        // response timestamp must agree even when the clock ticks mid-call.
        let now = self.clock.epoch_ms();

        // Lifecycle cutoff overrides whatever the report would produce.
        if ws.past_termination_cutoff(now) {
            ws.set_desired_state(WorkspaceState::Terminated, now)?;
        }

        if matches!(actual, WorkspaceState::Error | WorkspaceState::Unknown) {
            warn!(
                error_type = "abnormal_actual_state",
                name = %ws.name,
                namespace = %ws.namespace,
                actual_state = %actual,
                "agent reported abnormal workspace state"
            );
        }
        ws.actual_state = actual;

        // Restart approval: the stop half of the cycle finished.
        if ws.desired_state == WorkspaceState::RestartRequested
            && ws.actual_state == WorkspaceState::Stopped
        {
            ws.set_desired_state(WorkspaceState::Running, now)?;
        }

        // The report is reflected even when config generation fails below.
        ws.record_response(now);
        ws.revision = self.store.save(&ws).await?;

        let wants_config = (ws.desired_state != ws.actual_state || ws.force_include_all_resources)
            && ws.actual_state != WorkspaceState::Error;
        let config_to_apply = if wants_config { Some(self.config.generate(&ws)?) } else { None };

        if config_to_apply.is_some() && ws.force_include_all_resources {
            // The agent now holds the full set; later responses can be
            // incremental.
            ws.force_include_all_resources = false;
            ws.revision = self.store.save(&ws).await?;
        }

        debug!(
            name = %ws.name,
            namespace = %ws.namespace,
            desired_state = %ws.desired_state,
            actual_state = %ws.actual_state,
            has_config = config_to_apply.is_some(),
            "reconciled workspace"
        );

        Ok(WorkspaceUpdate {
            name: ws.name,
            namespace: ws.namespace,
            desired_state: ws.desired_state,
            actual_state: ws.actual_state,
            deployment_resource_version: ws.deployment_resource_version,
            config_to_apply,
        })
    }
}

#[cfg(test)]
#[path = "reconciler_tests.rs"]
mod tests;
