// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Full-sync specs: reconnecting agents and degraded batches.

use crate::prelude::*;

#[tokio::test]
async fn reconnecting_agent_receives_every_workspace() {
    let world = World::new();
    world.create("ws-a").await;
    world.create("ws-b").await;
    world.sync(UpdateType::Full, vec![]).await;

    // Agent restarts and resyncs, only remembering ws-a.
    let response = world
        .sync(UpdateType::Full, vec![report("ws-a", Some(available_deployment(1)))])
        .await;

    let names: Vec<&str> =
        response.payload.workspace_updates.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, vec!["ws-a", "ws-b"]);

    // ws-b keeps its stored resource version; nothing was reported for it.
    assert_eq!(response.payload.workspace_updates[1].deployment_resource_version, None);
}

#[tokio::test]
async fn orphan_report_does_not_disturb_the_batch() {
    let world = World::new();
    world.create("ws-known").await;

    let response = world
        .sync(
            UpdateType::Full,
            vec![
                report("ws-unknown", Some(available_deployment(1))),
                report("ws-known", None),
            ],
        )
        .await;

    assert_eq!(response.message, None);
    let names: Vec<&str> =
        response.payload.workspace_updates.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, vec!["ws-known"]);
}

#[tokio::test]
async fn broken_devfile_only_loses_its_own_workspace() {
    let world = World::new();
    world.create("ws-ok").await;
    world.create_with("ws-broken", "{ not a devfile", 24).await;

    let response = world.sync(UpdateType::Full, vec![]).await;

    let names: Vec<&str> =
        response.payload.workspace_updates.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, vec!["ws-ok"]);

    // The broken workspace was still touched: its response timestamp moved.
    assert!(world.stored("ws-broken").await.responded_to_agent_at_ms.is_some());
}

#[tokio::test]
async fn error_reports_refresh_state_but_withhold_config() {
    let world = World::new();
    world.create("ws-dev").await;
    world.sync(UpdateType::Full, vec![]).await;

    let mut failing = report("ws-dev", Some(available_deployment(1)));
    failing.error_details = Some(tether_wire::ErrorDetails {
        error_type: Some("Applier".to_string()),
        error_message: Some("configmap apply failed".to_string()),
    });

    let response = world.sync(UpdateType::Partial, vec![failing]).await;
    let update = &response.payload.workspace_updates[0];
    assert_eq!(update.actual_state, WorkspaceState::Error);
    assert_eq!(update.config_to_apply, None);
    assert_eq!(world.stored("ws-dev").await.actual_state, WorkspaceState::Error);
}
