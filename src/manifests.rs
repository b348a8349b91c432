// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! CRD manifests compiled into the binary.

use crate::error::{CrdBootstrapError, Result};
use crate::types::crd::CrdDocument;
use std::borrow::Cow;
use tracing::debug;

pub const SCC_CRD: &str = "assets/crd/0000_03_security-openshift_01_scc.crd.yaml";
pub const ROLE_BINDING_RESTRICTION_CRD: &str =
    "assets/crd/0000_03_authorization-openshift_01_rolebindingrestriction.crd.yaml";

/// A read-only store of manifests addressed by logical name
pub trait ManifestSource {
    /// Names to apply, in order
    fn names(&self) -> &[&'static str];

    fn load(&self, name: &str) -> Result<Cow<'static, [u8]>>;
}

/// The CRDs every cluster is bootstrapped with
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledManifests;

const BUNDLED: &[(&str, &[u8])] = &[
    (
        SCC_CRD,
        include_bytes!("../assets/crd/0000_03_security-openshift_01_scc.crd.yaml"),
    ),
    (
        ROLE_BINDING_RESTRICTION_CRD,
        include_bytes!(
            "../assets/crd/0000_03_authorization-openshift_01_rolebindingrestriction.crd.yaml"
        ),
    ),
];

const BUNDLED_NAMES: &[&str] = &[SCC_CRD, ROLE_BINDING_RESTRICTION_CRD];

impl ManifestSource for BundledManifests {
    fn names(&self) -> &[&'static str] {
        BUNDLED_NAMES
    }

    fn load(&self, name: &str) -> Result<Cow<'static, [u8]>> {
        BUNDLED
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, bytes)| Cow::Borrowed(*bytes))
            .ok_or_else(|| CrdBootstrapError::ManifestNotFound(name.to_string()))
    }
}

/// Load and decode every manifest of a source, keeping its order
pub fn load_documents(source: &impl ManifestSource) -> Result<Vec<CrdDocument>> {
    source
        .names()
        .iter()
        .map(|name| {
            let bytes = source.load(name)?;
            let document = CrdDocument::from_yaml(&bytes)?;
            debug!("Loaded {} as {} {}", name, document.api_version(), document.name());
            Ok(document)
        })
        .collect()
}
