// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrdBootstrapError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Watch error: {0}")]
    WatchError(#[from] kube_runtime::watcher::Error),

    #[error("Failed to load kubeconfig: {0}")]
    KubeconfigError(String),

    #[error("Manifest {0} is not bundled")]
    ManifestNotFound(String),

    #[error("Invalid manifest: {0}")]
    ManifestError(String),

    /// The manifest declares an apiextensions version this crate cannot handle.
    #[error("Unsupported CRD schema version: {0}")]
    UnsupportedSchemaVersion(String),

    #[error("timed out waiting for the condition during {operation} ({name}) after {elapsed:?}")]
    Timeout {
        operation: &'static str,
        name: String,
        elapsed: Duration,
    },
}

pub type Result<T> = std::result::Result<T, CrdBootstrapError>;
