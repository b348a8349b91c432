// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Client creation from the admin kubeconfig

use crate::config::Config;
use crate::constants::AGENT_NAME;
use crate::error::{CrdBootstrapError, Result};
use http::header::{HeaderValue, USER_AGENT};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::Client;
use std::path::Path;
use tracing::{info, instrument};

/// Create a Kubernetes client from the kubeconfig below the configured data directory.
/// Requests are tagged with the `crd-agent` user agent.
#[instrument(skip(config), fields(data_dir = %config.data_dir.display()))]
pub async fn create_client(config: &Config) -> Result<Client> {
    create_client_from_path(&config.kubeconfig_path()).await
}

async fn create_client_from_path(path: &Path) -> Result<Client> {
    info!("Loading kubeconfig from {}", path.display());

    let kubeconfig = Kubeconfig::read_from(path).map_err(|e| {
        CrdBootstrapError::KubeconfigError(format!("Failed to read {}: {}", path.display(), e))
    })?;

    let mut client_config =
        kube::Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
            .await
            .map_err(|e| CrdBootstrapError::KubeconfigError(format!("Failed to create config: {}", e)))?;
    client_config
        .headers
        .push((USER_AGENT, HeaderValue::from_static(AGENT_NAME)));

    Client::try_from(client_config)
        .map_err(|e| CrdBootstrapError::KubeconfigError(format!("Failed to create client: {}", e)))
}
