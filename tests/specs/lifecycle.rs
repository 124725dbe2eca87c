// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Single-workspace lifecycle specs.

use crate::prelude::*;

#[tokio::test]
async fn cold_start_to_running() {
    let world = World::new();
    world.create("ws-dev").await;

    // First full sync provisions: full resource set, no resource version yet.
    let response = world.sync(UpdateType::Full, vec![]).await;
    let update = &response.payload.workspace_updates[0];
    assert_eq!(update.desired_state, WorkspaceState::Running);
    assert_eq!(update.actual_state, WorkspaceState::CreationRequested);
    assert_eq!(update.deployment_resource_version, None);
    let provisioned = resources(update.config_to_apply.as_deref());
    assert_eq!(provisioned.len(), 2);
    assert_eq!(provisioned[0]["kind"], "Deployment");
    assert_eq!(provisioned[0]["spec"]["replicas"], 1);
    assert_eq!(provisioned[1]["kind"], "Service");

    // Rollout in flight: transition still pending, config now incremental.
    world.clock.advance(Duration::from_secs(5));
    let response = world
        .sync(UpdateType::Partial, vec![report("ws-dev", Some(progressing_deployment(1)))])
        .await;
    let update = &response.payload.workspace_updates[0];
    assert_eq!(update.actual_state, WorkspaceState::Starting);
    assert_eq!(resources(update.config_to_apply.as_deref()).len(), 1);

    // Rollout done: converged, nothing to apply.
    world.clock.advance(Duration::from_secs(5));
    let response = world
        .sync(UpdateType::Partial, vec![report("ws-dev", Some(available_deployment(1)))])
        .await;
    let update = &response.payload.workspace_updates[0];
    assert_eq!(update.actual_state, WorkspaceState::Running);
    assert_eq!(update.config_to_apply, None);

    let ws = world.stored("ws-dev").await;
    assert_eq!(ws.actual_state, WorkspaceState::Running);
    assert!(!ws.force_include_all_resources);
    assert!(ws.responded_to_agent_at_ms.unwrap() >= ws.desired_state_updated_at_ms);
}

#[tokio::test]
async fn stop_then_restart_cycle() {
    let world = World::new();
    world.create("ws-dev").await;
    world.sync(UpdateType::Full, vec![]).await;
    world
        .sync(UpdateType::Partial, vec![report("ws-dev", Some(available_deployment(1)))])
        .await;

    // User stops the workspace; the next report triggers a scale-down.
    world.set_desired("ws-dev", WorkspaceState::Stopped).await;
    let response = world
        .sync(UpdateType::Partial, vec![report("ws-dev", Some(available_deployment(1)))])
        .await;
    let update = &response.payload.workspace_updates[0];
    assert_eq!(update.desired_state, WorkspaceState::Stopped);
    assert_eq!(resources(update.config_to_apply.as_deref())[0]["spec"]["replicas"], 0);

    // Scale-down progresses, then lands.
    let response = world
        .sync(UpdateType::Partial, vec![report("ws-dev", Some(progressing_deployment(0)))])
        .await;
    assert_eq!(response.payload.workspace_updates[0].actual_state, WorkspaceState::Stopping);

    let response = world
        .sync(UpdateType::Partial, vec![report("ws-dev", Some(available_deployment(0)))])
        .await;
    let update = &response.payload.workspace_updates[0];
    assert_eq!(update.actual_state, WorkspaceState::Stopped);
    assert_eq!(update.config_to_apply, None);

    // Restart: desired holds at RestartRequested until the agent confirms
    // Stopped, then promotes to Running and scales back up.
    world.set_desired("ws-dev", WorkspaceState::RestartRequested).await;
    let response = world
        .sync(UpdateType::Partial, vec![report("ws-dev", Some(available_deployment(0)))])
        .await;
    let update = &response.payload.workspace_updates[0];
    assert_eq!(update.desired_state, WorkspaceState::Running);
    assert_eq!(resources(update.config_to_apply.as_deref())[0]["spec"]["replicas"], 1);

    let response = world
        .sync(UpdateType::Partial, vec![report("ws-dev", Some(available_deployment(1)))])
        .await;
    let update = &response.payload.workspace_updates[0];
    assert_eq!(update.desired_state, WorkspaceState::Running);
    assert_eq!(update.actual_state, WorkspaceState::Running);
    assert_eq!(update.config_to_apply, None);
}

#[tokio::test]
async fn agent_termination_reports_reach_terminal_state() {
    let world = World::new();
    world.create("ws-dev").await;
    world.sync(UpdateType::Full, vec![]).await;

    world.set_desired("ws-dev", WorkspaceState::Terminated).await;
    let response = world
        .sync(
            UpdateType::Partial,
            vec![termination_report("ws-dev", TerminationProgress::Terminating)],
        )
        .await;
    assert_eq!(response.payload.workspace_updates[0].actual_state, WorkspaceState::Terminating);

    let response = world
        .sync(
            UpdateType::Partial,
            vec![termination_report("ws-dev", TerminationProgress::Terminated)],
        )
        .await;
    let update = &response.payload.workspace_updates[0];
    assert_eq!(update.actual_state, WorkspaceState::Terminated);
    assert_eq!(update.config_to_apply, None);

    // Terminated workspaces drop out of later full syncs.
    let response = world.sync(UpdateType::Full, vec![]).await;
    assert!(response.payload.workspace_updates.is_empty());
}

#[tokio::test]
async fn old_workspace_is_terminated_by_age() {
    let world = World::new();
    world.create_with("ws-old", DEVFILE, 1).await;
    world.sync(UpdateType::Full, vec![]).await;
    world
        .sync(UpdateType::Partial, vec![report("ws-old", Some(available_deployment(1)))])
        .await;

    world.clock.advance(Duration::from_secs(3 * 3600));
    let response = world.sync(UpdateType::Full, vec![]).await;
    let update = &response.payload.workspace_updates[0];
    assert_eq!(update.desired_state, WorkspaceState::Terminated);
    assert!(update.config_to_apply.is_some());

    let ws = world.stored("ws-old").await;
    assert_eq!(ws.desired_state, WorkspaceState::Terminated);
    assert!(ws.responded_to_agent_at_ms.unwrap() >= ws.desired_state_updated_at_ms);
}
