// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crd_bootstrap::config::Config;
use crd_bootstrap::kubernetes::CrdApplier;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting CRD bootstrap");

    // Load configuration
    let config = Config::from_env()?;
    info!(
        "Configuration loaded: kubeconfig={}, poll_interval={:?}, ready_timeout={:?}",
        config.kubeconfig_path().display(),
        config.poll_interval,
        config.ready_timeout
    );

    let applier = CrdApplier::connect(&config)
        .await
        .context("Failed to connect to the API server")?;

    applier
        .apply_crds()
        .await
        .context("Failed to apply CRDs")?;

    applier
        .wait_for_crds_established()
        .await
        .context("CRDs did not become established")?;

    info!("All CRDs are established");
    Ok(())
}
