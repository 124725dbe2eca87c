// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared world and builders for the scenario specs.

use std::sync::Arc;

pub use std::time::Duration;
pub use tether_core::{Clock, FakeClock, Workspace, WorkspaceParams, WorkspaceState};
pub use tether_wire::{
    AgentWorkspaceReport, DeploymentSnapshot, ReconcileRequest, ReconcileResponse,
    SnapshotCondition, SnapshotSpec, SnapshotStatus, TerminationProgress, UpdateType,
};

use tether_reconcile::{ConfigSettings, DesiredConfigGenerator, Reconciler};
use tether_storage::{InMemoryWorkspaceStore, WorkspaceStore};

pub const AGENT: &str = "agt-spec";
pub const NAMESPACE: &str = "ns-spec";

pub const DEVFILE: &str = r#"{
  "components": [
    {
      "name": "tooling",
      "container": {
        "image": "example.dev/tooling:latest",
        "endpoints": [{"name": "editor", "targetPort": 60001}]
      }
    }
  ]
}"#;

/// One agent, one store, one reconciler.
pub struct World {
    pub store: Arc<InMemoryWorkspaceStore>,
    pub clock: FakeClock,
    pub reconciler: Reconciler<FakeClock>,
}

impl World {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryWorkspaceStore::new());
        let clock = FakeClock::new();
        let reconciler = Reconciler::new(
            store.clone(),
            Arc::new(DesiredConfigGenerator::new(ConfigSettings::default())),
            clock.clone(),
        );
        Self { store, clock, reconciler }
    }

    /// Create a workspace the way a user request would.
    pub async fn create(&self, name: &str) {
        self.create_with(name, DEVFILE, 24).await;
    }

    pub async fn create_with(&self, name: &str, devfile: &str, max_hours: u32) {
        let ws = Workspace::new(
            WorkspaceParams {
                name: name.to_string(),
                namespace: NAMESPACE.to_string(),
                agent_id: AGENT.into(),
                owner: "usr-spec".into(),
                devfile: devfile.to_string(),
                max_hours_before_termination: max_hours,
            },
            &self.clock,
        );
        self.store.insert(ws).await.unwrap();
    }

    /// Apply a user desired-state change outside the reconcile loop.
    pub async fn set_desired(&self, name: &str, state: WorkspaceState) {
        let mut ws =
            self.store.find(&AGENT.into(), NAMESPACE, name).await.unwrap().unwrap();
        ws.set_desired_state(state, self.clock.epoch_ms()).unwrap();
        self.store.save(&ws).await.unwrap();
    }

    pub async fn sync(
        &self,
        update_type: UpdateType,
        reports: Vec<AgentWorkspaceReport>,
    ) -> ReconcileResponse {
        self.reconciler
            .process(ReconcileRequest {
                agent_id: AGENT.into(),
                update_type,
                workspace_agent_infos: reports,
            })
            .await
    }

    pub async fn stored(&self, name: &str) -> Workspace {
        self.store.find(&AGENT.into(), NAMESPACE, name).await.unwrap().unwrap()
    }
}

fn snapshot(replicas: i32, conditions: &[(&str, &str)]) -> DeploymentSnapshot {
    DeploymentSnapshot {
        spec: Some(SnapshotSpec { replicas: Some(replicas) }),
        status: Some(SnapshotStatus {
            conditions: Some(
                conditions
                    .iter()
                    .map(|(condition_type, reason)| SnapshotCondition {
                        condition_type: Some(condition_type.to_string()),
                        reason: Some(reason.to_string()),
                    })
                    .collect(),
            ),
            ..Default::default()
        }),
    }
}

/// Deployment available at the given scale.
pub fn available_deployment(replicas: i32) -> DeploymentSnapshot {
    snapshot(
        replicas,
        &[("Available", "MinimumReplicasAvailable"), ("Progressing", "NewReplicaSetAvailable")],
    )
}

/// Deployment mid-rollout towards the given scale.
pub fn progressing_deployment(replicas: i32) -> DeploymentSnapshot {
    snapshot(replicas, &[("Progressing", "ReplicaSetUpdated")])
}

pub fn report(name: &str, deployment_info: Option<DeploymentSnapshot>) -> AgentWorkspaceReport {
    AgentWorkspaceReport {
        name: name.to_string(),
        namespace: NAMESPACE.to_string(),
        previous_actual_state: None,
        current_actual_state: None,
        deployment_resource_version: Some("1".to_string()),
        latest_k8s_deployment_info: deployment_info,
        termination_progress: None,
        error_details: None,
    }
}

pub fn termination_report(name: &str, progress: TerminationProgress) -> AgentWorkspaceReport {
    let mut report = report(name, None);
    report.termination_progress = Some(progress);
    report
}

/// Parse a config payload back into its resource list.
pub fn resources(update_config: Option<&str>) -> Vec<serde_json::Value> {
    serde_json::from_str(update_config.expect("expected config_to_apply")).unwrap()
}
