// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities for mocking Kubernetes API responses.

use http::{Request, Response};
use kube::client::Body;
use kube::Client;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;

type Route = (String, String);

/// A mock HTTP service that returns predefined responses based on request paths.
///
/// Several responses registered for the same route are served in order; the last
/// one keeps being served once the others are used up.
#[derive(Clone)]
pub struct MockService {
    responses: Arc<Mutex<HashMap<Route, VecDeque<(u16, String)>>>>,
    requests: Arc<Mutex<Vec<Route>>>,
}

impl MockService {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a response for GET requests matching the exact path
    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.push("GET", path, status, body);
        self
    }

    /// Add a response for POST requests matching the exact path
    pub fn on_post(self, path: &str, status: u16, body: &str) -> Self {
        self.push("POST", path, status, body);
        self
    }

    /// Add a response for PATCH requests matching the exact path
    pub fn on_patch(self, path: &str, status: u16, body: &str) -> Self {
        self.push("PATCH", path, status, body);
        self
    }

    /// Build a kube Client from this mock service
    pub fn into_client(self) -> Client {
        Client::new(self, "https://kubernetes.default.svc")
    }

    /// Every request seen so far, as (method, path)
    pub fn requests(&self) -> Vec<(String, String)> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests seen for a method and exact path
    pub fn count(&self, method: &str, path: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|(m, p)| m == method && p == path)
            .count()
    }

    fn push(&self, method: &str, path: &str, status: u16, body: &str) {
        self.responses
            .lock()
            .unwrap()
            .entry((method.to_string(), path.to_string()))
            .or_default()
            .push_back((status, body.to_string()));
    }

    fn find_response(&self, method: &str, path: &str) -> Option<(u16, String)> {
        let mut responses = self.responses.lock().unwrap();

        // Try exact match first, then prefix match for paths like /apis/group/v1/things/foo
        let exact = (method.to_string(), path.to_string());
        let key = if responses.contains_key(&exact) {
            exact
        } else {
            responses
                .keys()
                .find(|(m, p)| m == method && path.starts_with(p.as_str()))
                .cloned()?
        };

        let queue = responses.get_mut(&key)?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

impl Default for MockService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service<Request<Body>> for MockService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let method = req.method().to_string();
        let path = req.uri().path().to_string();

        self.requests
            .lock()
            .unwrap()
            .push((method.clone(), path.clone()));
        let response = self.find_response(&method, &path);

        Box::pin(async move {
            let (status, body) = response.unwrap_or_else(|| (404, not_found_json("resource", &path)));
            Ok(Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(Body::from(body.into_bytes()))
                .unwrap())
        })
    }
}

/// Path of a v1 CRD, or of the collection when name is empty
pub fn v1_crd_path(name: &str) -> String {
    crd_path("v1", name)
}

/// Path of a v1beta1 CRD, or of the collection when name is empty
pub fn v1beta1_crd_path(name: &str) -> String {
    crd_path("v1beta1", name)
}

fn crd_path(version: &str, name: &str) -> String {
    let collection = format!("/apis/apiextensions.k8s.io/{}/customresourcedefinitions", version);
    if name.is_empty() {
        collection
    } else {
        format!("{}/{}", collection, name)
    }
}

fn established_conditions(established: Option<&str>) -> serde_json::Value {
    match established {
        Some(status) => serde_json::json!({
            "conditions": [
                { "type": "NamesAccepted", "status": "True" },
                { "type": "Established", "status": status }
            ]
        }),
        None => serde_json::json!({}),
    }
}

/// Create a mock v1 CRD JSON response
pub fn v1_crd_json(name: &str, established: Option<&str>) -> String {
    let (plural, group) = name.split_once('.').unwrap_or((name, "example.com"));
    serde_json::json!({
        "apiVersion": "apiextensions.k8s.io/v1",
        "kind": "CustomResourceDefinition",
        "metadata": { "name": name, "uid": "test-uid" },
        "spec": {
            "group": group,
            "names": { "kind": "Thing", "plural": plural },
            "scope": "Cluster",
            "versions": [{ "name": "v1", "served": true, "storage": true }]
        },
        "status": established_conditions(established)
    })
    .to_string()
}

/// Create a mock v1beta1 CRD JSON response
pub fn v1beta1_crd_json(name: &str, established: Option<&str>) -> String {
    let (plural, group) = name.split_once('.').unwrap_or((name, "example.com"));
    serde_json::json!({
        "apiVersion": "apiextensions.k8s.io/v1beta1",
        "kind": "CustomResourceDefinition",
        "metadata": { "name": name, "uid": "test-uid" },
        "spec": {
            "group": group,
            "names": { "kind": "Thing", "plural": plural },
            "scope": "Namespaced",
            "version": "v1"
        },
        "status": established_conditions(established)
    })
    .to_string()
}

/// Create a mock project JSON response
pub fn project_json(name: &str, phase: &str) -> String {
    serde_json::json!({
        "apiVersion": "project.openshift.io/v1",
        "kind": "Project",
        "metadata": { "name": name, "uid": "test-uid" },
        "spec": { "finalizers": ["kubernetes"] },
        "status": { "phase": phase }
    })
    .to_string()
}

/// Create a mock project list JSON response
pub fn project_list_json(names: &[&str]) -> String {
    let items: Vec<serde_json::Value> = names
        .iter()
        .map(|name| serde_json::from_str(&project_json(name, "Active")).unwrap())
        .collect();
    serde_json::json!({
        "apiVersion": "project.openshift.io/v1",
        "kind": "ProjectList",
        "metadata": { "resourceVersion": "1" },
        "items": items
    })
    .to_string()
}

/// Create a 404 not found response
pub fn not_found_json(resource: &str, name: &str) -> String {
    status_json(404, "NotFound", &format!("{} \"{}\" not found", resource, name))
}

/// Create a Failure status response with the given code
pub fn status_json(code: u16, reason: &str, message: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": message,
        "reason": reason,
        "code": code
    })
    .to_string()
}
