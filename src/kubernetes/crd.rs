// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Applying bundled CRDs and waiting for them to become Established

use crate::config::Config;
use crate::constants::{
    crd::{APPLY_OPERATION, WAIT_OPERATION},
    AGENT_NAME,
};
use crate::error::Result;
use crate::kubernetes::client::create_client;
use crate::kubernetes::poll::poll_until;
use crate::manifests::{load_documents, BundledManifests};
use crate::types::crd::{v1beta1_resource, CrdDocument};
use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use kube::{
    api::{DynamicObject, PostParams},
    Api, Client, Resource,
};
use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Debug;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, error, info, instrument, warn};

/// Result of a single get-then-create attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    AlreadyExists,
    Created,
}

/// Makes sure CRDs exist on the cluster and are served.
///
/// Applies go through an instance-owned lock, so two callers sharing an applier
/// never create objects concurrently. Waiting is not locked.
pub struct CrdApplier {
    client: Client,
    poll_interval: Duration,
    ready_timeout: Duration,
    apply_lock: Mutex<()>,
}

impl CrdApplier {
    pub fn new(client: Client, config: &Config) -> Self {
        Self {
            client,
            poll_interval: config.poll_interval,
            ready_timeout: config.ready_timeout,
            apply_lock: Mutex::new(()),
        }
    }

    /// Build an applier talking to the cluster described by the admin kubeconfig
    pub async fn connect(config: &Config) -> Result<Self> {
        let client = create_client(config).await?;
        Ok(Self::new(client, config))
    }

    /// Apply every bundled CRD
    pub async fn apply_crds(&self) -> Result<()> {
        let documents = load_documents(&BundledManifests)?;
        self.ensure_applied(&documents).await
    }

    /// Wait until every bundled CRD reports Established
    pub async fn wait_for_crds_established(&self) -> Result<()> {
        let documents = load_documents(&BundledManifests)?;
        self.await_ready(&documents).await
    }

    /// Create each document that does not exist yet, one after another.
    /// Failed attempts are retried every poll interval until the timeout runs out.
    #[instrument(skip_all, fields(count = documents.len()))]
    pub async fn ensure_applied(&self, documents: &[CrdDocument]) -> Result<()> {
        let _guard = self.apply_lock.lock().await;

        for document in documents {
            let name = document.name();
            let name = name.as_str();
            info!("Applying CRD {} ({})", name, document.api_version());

            poll_until(
                self.poll_interval,
                self.ready_timeout,
                APPLY_OPERATION,
                name,
                move |state| async move {
                    match self.apply_once(document).await {
                        Ok(ApplyOutcome::Created) => {
                            info!("Created CRD {} on attempt {}", name, state.attempt);
                            true
                        }
                        Ok(ApplyOutcome::AlreadyExists) => {
                            info!("CRD {} already exists", name);
                            true
                        }
                        Err(e) => {
                            warn!(
                                "Failed to apply CRD {} (attempt {}): {}",
                                name, state.attempt, e
                            );
                            false
                        }
                    }
                },
            )
            .await?;
        }

        Ok(())
    }

    /// Poll each document until the API server reports it Established.
    /// Fetch errors only delay; the timeout is the sole failure.
    #[instrument(skip_all, fields(count = documents.len()))]
    pub async fn await_ready(&self, documents: &[CrdDocument]) -> Result<()> {
        for document in documents {
            let name = document.name();
            let name = name.as_str();
            info!("Waiting for CRD {} condition.type: established", name);

            poll_until(
                self.poll_interval,
                self.ready_timeout,
                WAIT_OPERATION,
                name,
                move |state| async move {
                    match self.fetch(document).await {
                        Ok(remote) if remote.is_established() => {
                            info!("CRD {} is established", name);
                            true
                        }
                        Ok(remote) => {
                            debug!(
                                "CRD {} not established yet (status {:?}, attempt {})",
                                name,
                                remote.established(),
                                state.attempt
                            );
                            false
                        }
                        Err(e) => {
                            error!(
                                "Polling CRD {} for condition \"Established\"=\"True\": {}",
                                name, e
                            );
                            false
                        }
                    }
                },
            )
            .await?;
        }

        Ok(())
    }

    async fn apply_once(&self, document: &CrdDocument) -> Result<ApplyOutcome> {
        let name = document.name();
        match document {
            CrdDocument::V1(crd) => {
                let api: Api<CustomResourceDefinition> = Api::all(self.client.clone());
                create_if_missing(&api, &name, crd).await
            }
            CrdDocument::V1Beta1(crd) => {
                let api: Api<DynamicObject> =
                    Api::all_with(self.client.clone(), &v1beta1_resource());
                create_if_missing(&api, &name, crd).await
            }
        }
    }

    /// Fetch the live object, wrapped in the variant of the local document
    async fn fetch(&self, document: &CrdDocument) -> Result<CrdDocument> {
        let name = document.name();
        let remote = match document {
            CrdDocument::V1(_) => {
                let api: Api<CustomResourceDefinition> = Api::all(self.client.clone());
                CrdDocument::V1(api.get(&name).await?)
            }
            CrdDocument::V1Beta1(_) => {
                let api: Api<DynamicObject> =
                    Api::all_with(self.client.clone(), &v1beta1_resource());
                CrdDocument::V1Beta1(api.get(&name).await?)
            }
        };
        Ok(remote)
    }
}

async fn create_if_missing<K>(api: &Api<K>, name: &str, object: &K) -> Result<ApplyOutcome>
where
    K: Resource + Clone + DeserializeOwned + Serialize + Debug,
{
    match api.get(name).await {
        Ok(_) => {
            debug!("CRD {} already exists", name);
            Ok(ApplyOutcome::AlreadyExists)
        }
        Err(kube::Error::Api(err)) if err.code == 404 => {
            let pp = PostParams {
                field_manager: Some(AGENT_NAME.to_string()),
                ..Default::default()
            };
            match api.create(&pp, object).await {
                Ok(_) => Ok(ApplyOutcome::Created),
                // Someone else won the race between our get and create
                Err(kube::Error::Api(err)) if err.code == 409 => Ok(ApplyOutcome::AlreadyExists),
                Err(e) => Err(e.into()),
            }
        }
        Err(e) => Err(e.into()),
    }
}
