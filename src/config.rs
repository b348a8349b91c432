// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::{crd, DEFAULT_DATA_DIR, KUBECONFIG_PATH};
use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Bootstrap configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Root of the on-disk state; the admin kubeconfig lives below it
    pub data_dir: PathBuf,
    pub poll_interval: Duration,
    pub ready_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            poll_interval: Duration::from_secs(crd::POLL_INTERVAL_SECS),
            ready_timeout: Duration::from_secs(crd::READY_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let data_dir = env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR));

        let poll_interval = secs_from_env(
            "CRD_POLL_INTERVAL_SECS",
            crd::POLL_INTERVAL_SECS,
            crd::MIN_POLL_INTERVAL_SECS,
        )?;
        let ready_timeout = secs_from_env("CRD_READY_TIMEOUT_SECS", crd::READY_TIMEOUT_SECS, 0)?;

        Ok(Config {
            data_dir,
            poll_interval,
            ready_timeout,
        })
    }

    /// Path of the admin kubeconfig used to reach the API server
    pub fn kubeconfig_path(&self) -> PathBuf {
        self.data_dir.join(KUBECONFIG_PATH)
    }
}

fn secs_from_env(key: &str, default: u64, min: u64) -> Result<Duration> {
    parse_secs(key, env::var(key).ok(), default, min)
}

fn parse_secs(key: &str, value: Option<String>, default: u64, min: u64) -> Result<Duration> {
    let Some(value) = value else {
        return Ok(Duration::from_secs(default));
    };

    let secs: u64 = value
        .parse()
        .with_context(|| format!("{} must be a number of seconds, got {:?}", key, value))?;
    if secs < min {
        bail!("{} must be at least {} seconds, got {}", key, min, secs);
    }
    Ok(Duration::from_secs(secs))
}
