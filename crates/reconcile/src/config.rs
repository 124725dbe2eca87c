// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Desired Kubernetes configuration from a workspace's flattened devfile.
//!
//! The generator builds the Deployment (and Service, when the devfile
//! exposes endpoints) that realizes the workspace's desired state. The
//! output is a serialized resource list the orchestrator passes through to
//! the agent unmodified.

use std::collections::BTreeMap;

use k8s_openapi::api::apps::v1::{Deployment, DeploymentSpec};
use k8s_openapi::api::core::v1::{
    Container, ContainerPort, EnvVar, PodSpec, PodTemplateSpec, Service, ServicePort, ServiceSpec,
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{LabelSelector, ObjectMeta};
use serde::Deserialize;
use thiserror::Error;

use tether_core::{Workspace, WorkspaceState};

use crate::settings::ConfigSettings;

/// Label carrying the workspace name on every generated resource.
const LABEL_WORKSPACE: &str = "workspace.tether.dev/name";
/// Label carrying the managing agent on every generated resource.
const LABEL_AGENT: &str = "workspace.tether.dev/agent";

/// Errors from config generation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The stored devfile does not parse.
    #[error("invalid devfile: {0}")]
    InvalidDevfile(#[from] serde_json::Error),

    /// The devfile parses but declares no container components, so there is
    /// nothing to deploy.
    #[error("devfile has no container components")]
    NoContainerComponents,

    /// The built resources failed to serialize.
    #[error("failed to serialize config: {0}")]
    Serialize(serde_json::Error),
}

/// Produces the configuration payload handed back to the agent.
pub trait ConfigGenerator: Send + Sync {
    fn generate(&self, workspace: &Workspace) -> Result<String, ConfigError>;
}

// ── Flattened devfile (already processed upstream) ──────────────────────────

#[derive(Debug, Deserialize)]
struct Devfile {
    #[serde(default)]
    components: Vec<DevfileComponent>,
}

#[derive(Debug, Deserialize)]
struct DevfileComponent {
    name: String,
    container: Option<DevfileContainer>,
}

#[derive(Debug, Deserialize)]
struct DevfileContainer {
    image: Option<String>,
    #[serde(default)]
    env: Vec<DevfileEnv>,
    #[serde(default)]
    endpoints: Vec<DevfileEndpoint>,
}

#[derive(Debug, Deserialize)]
struct DevfileEnv {
    name: String,
    value: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DevfileEndpoint {
    name: String,
    target_port: Option<i32>,
}

// ── Generator ───────────────────────────────────────────────────────────────

/// Builds Deployment/Service objects from the workspace's devfile.
pub struct DesiredConfigGenerator {
    settings: ConfigSettings,
}

impl DesiredConfigGenerator {
    pub fn new(settings: ConfigSettings) -> Self {
        Self { settings }
    }

    fn identity_labels(workspace: &Workspace) -> BTreeMap<String, String> {
        BTreeMap::from([
            (LABEL_WORKSPACE.to_string(), workspace.name.clone()),
            (LABEL_AGENT.to_string(), workspace.agent_id.to_string()),
        ])
    }

    fn build_deployment(&self, workspace: &Workspace, devfile: &Devfile) -> Deployment {
        let labels = Self::identity_labels(workspace);
        let replicas = if workspace.desired_state == WorkspaceState::Running { 1 } else { 0 };

        let containers = devfile
            .components
            .iter()
            .filter_map(|component| {
                let container = component.container.as_ref()?;
                Some(self.build_container(&component.name, container))
            })
            .collect();

        Deployment {
            metadata: ObjectMeta {
                name: Some(workspace.name.clone()),
                namespace: Some(workspace.namespace.clone()),
                labels: Some(labels.clone()),
                ..Default::default()
            },
            spec: Some(DeploymentSpec {
                replicas: Some(replicas),
                selector: LabelSelector {
                    match_labels: Some(labels.clone()),
                    ..Default::default()
                },
                template: PodTemplateSpec {
                    metadata: Some(ObjectMeta { labels: Some(labels), ..Default::default() }),
                    spec: Some(PodSpec { containers, ..Default::default() }),
                },
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn build_container(&self, name: &str, container: &DevfileContainer) -> Container {
        let ports: Vec<ContainerPort> = container
            .endpoints
            .iter()
            .map(|endpoint| ContainerPort {
                name: Some(endpoint.name.clone()),
                container_port: endpoint.target_port.unwrap_or(self.settings.workspace_port),
                ..Default::default()
            })
            .collect();

        let env: Vec<EnvVar> = container
            .env
            .iter()
            .map(|entry| EnvVar {
                name: entry.name.clone(),
                value: Some(entry.value.clone()),
                ..Default::default()
            })
            .collect();

        Container {
            name: name.to_string(),
            image: Some(
                container.image.clone().unwrap_or_else(|| self.settings.default_image.clone()),
            ),
            ports: if ports.is_empty() { None } else { Some(ports) },
            env: if env.is_empty() { None } else { Some(env) },
            ..Default::default()
        }
    }

    fn build_service(workspace: &Workspace, devfile: &Devfile, port: i32) -> Option<Service> {
        let ports: Vec<ServicePort> = devfile
            .components
            .iter()
            .filter_map(|component| component.container.as_ref())
            .flat_map(|container| &container.endpoints)
            .map(|endpoint| ServicePort {
                name: Some(endpoint.name.clone()),
                port: endpoint.target_port.unwrap_or(port),
                ..Default::default()
            })
            .collect();

        if ports.is_empty() {
            return None;
        }

        Some(Service {
            metadata: ObjectMeta {
                name: Some(workspace.name.clone()),
                namespace: Some(workspace.namespace.clone()),
                labels: Some(Self::identity_labels(workspace)),
                ..Default::default()
            },
            spec: Some(ServiceSpec {
                selector: Some(Self::identity_labels(workspace)),
                ports: Some(ports),
                ..Default::default()
            }),
            ..Default::default()
        })
    }
}

impl ConfigGenerator for DesiredConfigGenerator {
    fn generate(&self, workspace: &Workspace) -> Result<String, ConfigError> {
        let devfile: Devfile = serde_json::from_str(&workspace.devfile)?;
        if !devfile.components.iter().any(|c| c.container.is_some()) {
            return Err(ConfigError::NoContainerComponents);
        }

        let deployment = self.build_deployment(workspace, &devfile);
        let mut resources =
            vec![serde_json::to_value(&deployment).map_err(ConfigError::Serialize)?];

        // Incremental configs carry only the desired-state-bearing resource;
        // the full set is reserved for unprovisioned workspaces.
        if workspace.force_include_all_resources {
            if let Some(service) =
                Self::build_service(workspace, &devfile, self.settings.workspace_port)
            {
                resources.push(serde_json::to_value(&service).map_err(ConfigError::Serialize)?);
            }
        }

        serde_json::to_string(&resources).map_err(ConfigError::Serialize)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
