// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::AGENT_NAME;
use crate::error::{CrdBootstrapError, Result};
use futures::{Stream, TryStreamExt};
use kube::{
    api::{Patch, PatchParams},
    Api, Client, CustomResource, ResourceExt,
};
use kube_runtime::{watcher, WatchStreamExt};
use serde::{Deserialize, Serialize};

/// Cluster-scoped wrapper around a namespace. Every REST verb of
/// `/apis/project.openshift.io/v1/projects` is reachable through [`projects`].
#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[kube(group = "project.openshift.io", version = "v1", kind = "Project")]
#[kube(status = "ProjectStatus")]
pub struct ProjectSpec {
    /// Opaque values that must be empty before the project is removed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finalizers: Option<Vec<String>>,
}

impl Project {
    pub fn is_active(&self) -> bool {
        self.phase() == Some("Active")
    }

    pub fn is_terminating(&self) -> bool {
        self.phase() == Some("Terminating")
    }

    fn phase(&self) -> Option<&str> {
        self.status.as_ref().and_then(|s| s.phase.as_deref())
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Vec<Condition>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    #[serde(rename = "type")]
    pub condition_type: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Typed client for projects
pub fn projects(client: &Client) -> Api<Project> {
    Api::all(client.clone())
}

/// Server-side apply a project, taking ownership of conflicting fields
pub async fn apply_project(api: &Api<Project>, project: &Project) -> Result<Project> {
    let pp = PatchParams::apply(AGENT_NAME).force();
    Ok(api
        .patch(&project.name_any(), &pp, &Patch::Apply(project))
        .await?)
}

/// Stream of projects as they are listed, added or modified
pub fn watch_projects(api: Api<Project>) -> impl Stream<Item = Result<Project>> {
    watcher(api, watcher::Config::default())
        .applied_objects()
        .map_err(CrdBootstrapError::from)
}
