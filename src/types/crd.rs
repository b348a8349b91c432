// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::{apiextensions, crd::ESTABLISHED};
use crate::error::{CrdBootstrapError, Result};
use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use kube::core::{ApiResource, DynamicObject, GroupVersionKind, TypeMeta};
use kube::ResourceExt;
use serde::Deserialize;

/// A CustomResourceDefinition manifest, decoded once into the schema version it declares.
#[derive(Clone, Debug)]
pub enum CrdDocument {
    V1(CustomResourceDefinition),
    /// No typed v1beta1 CRD exists in k8s-openapi anymore, so these travel as dynamic objects.
    V1Beta1(DynamicObject),
}

/// Observed value of a status condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionStatus {
    True,
    False,
    Unknown,
}

impl From<&str> for ConditionStatus {
    fn from(status: &str) -> Self {
        match status {
            "True" => ConditionStatus::True,
            "False" => ConditionStatus::False,
            _ => ConditionStatus::Unknown,
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
struct DynamicCondition {
    #[serde(rename = "type")]
    condition_type: String,
    status: String,
}

impl CrdDocument {
    /// Decode a YAML manifest. The version is checked before the body is parsed so that
    /// an unknown apiVersion surfaces as such rather than as a parse failure.
    pub fn from_yaml(bytes: &[u8]) -> Result<Self> {
        let types: TypeMeta = serde_yaml::from_slice(bytes)
            .map_err(|e| CrdBootstrapError::ManifestError(format!("Failed to read type information: {}", e)))?;

        if types.kind != apiextensions::KIND {
            return Err(CrdBootstrapError::ManifestError(format!(
                "Expected kind {}, found {}",
                apiextensions::KIND,
                types.kind
            )));
        }

        let document = match types.api_version.as_str() {
            apiextensions::V1 => {
                let crd: CustomResourceDefinition = serde_yaml::from_slice(bytes)
                    .map_err(|e| CrdBootstrapError::ManifestError(format!("Failed to decode v1 CRD: {}", e)))?;
                CrdDocument::V1(crd)
            }
            apiextensions::V1BETA1 => {
                let crd: DynamicObject = serde_yaml::from_slice(bytes)
                    .map_err(|e| CrdBootstrapError::ManifestError(format!("Failed to decode v1beta1 CRD: {}", e)))?;
                CrdDocument::V1Beta1(crd)
            }
            other => return Err(CrdBootstrapError::UnsupportedSchemaVersion(other.to_string())),
        };

        if document.metadata_name().is_none() {
            return Err(CrdBootstrapError::ManifestError(format!(
                "{} manifest has no metadata.name",
                document.api_version()
            )));
        }

        Ok(document)
    }

    /// Declared name, e.g. `securitycontextconstraints.security.openshift.io`
    pub fn name(&self) -> String {
        match self {
            CrdDocument::V1(crd) => crd.name_any(),
            CrdDocument::V1Beta1(crd) => crd.name_any(),
        }
    }

    fn metadata_name(&self) -> Option<&String> {
        match self {
            CrdDocument::V1(crd) => crd.metadata.name.as_ref(),
            CrdDocument::V1Beta1(crd) => crd.metadata.name.as_ref(),
        }
    }

    pub fn api_version(&self) -> &'static str {
        match self {
            CrdDocument::V1(_) => apiextensions::V1,
            CrdDocument::V1Beta1(_) => apiextensions::V1BETA1,
        }
    }

    /// Status of the Established condition, Unknown when the object carries none
    pub fn established(&self) -> ConditionStatus {
        match self {
            CrdDocument::V1(crd) => crd
                .status
                .as_ref()
                .and_then(|s| s.conditions.as_ref())
                .and_then(|conditions| conditions.iter().find(|c| c.type_ == ESTABLISHED))
                .map_or(ConditionStatus::Unknown, |c| c.status.as_str().into()),
            CrdDocument::V1Beta1(crd) => crd
                .data
                .get("status")
                .and_then(|s| s.get("conditions"))
                .and_then(|c| serde_json::from_value::<Vec<DynamicCondition>>(c.clone()).ok())
                .and_then(|conditions| {
                    conditions
                        .into_iter()
                        .find(|c| c.condition_type == ESTABLISHED)
                })
                .map_or(ConditionStatus::Unknown, |c| c.status.as_str().into()),
        }
    }

    pub fn is_established(&self) -> bool {
        self.established() == ConditionStatus::True
    }
}

/// API resource used to address v1beta1 CRDs through a dynamic Api
pub fn v1beta1_resource() -> ApiResource {
    let gvk = GroupVersionKind::gvk(apiextensions::GROUP, "v1beta1", apiextensions::KIND);
    ApiResource::from_gvk_with_plural(&gvk, apiextensions::PLURAL)
}
