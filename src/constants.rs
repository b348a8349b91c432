// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// User agent and field manager used for every request we send
pub const AGENT_NAME: &str = "crd-agent";

/// Kubeconfig location, relative to the data directory
pub const KUBECONFIG_PATH: &str = "resources/kubeadmin/kubeconfig";

/// Data directory used when DATA_DIR is not set
pub const DEFAULT_DATA_DIR: &str = "/var/lib/crd-bootstrap";

/// CRD polling configuration
pub mod crd {
    /// Interval between two apply or readiness attempts
    pub const POLL_INTERVAL_SECS: u64 = 5;
    /// Shortest interval accepted; zero would turn polling into a busy loop
    pub const MIN_POLL_INTERVAL_SECS: u64 = 1;
    /// Overall budget for applying or waiting on a single CRD
    pub const READY_TIMEOUT_SECS: u64 = 600;

    /// Condition reported by the API server once a CRD is served
    pub const ESTABLISHED: &str = "Established";

    /// Operation names surfaced in timeout errors
    pub const APPLY_OPERATION: &str = "syncCustomResourceDefinitions";
    pub const WAIT_OPERATION: &str = "waiting for default CRD";
}

/// apiextensions group versions we know how to decode
pub mod apiextensions {
    pub const GROUP: &str = "apiextensions.k8s.io";
    pub const V1: &str = "apiextensions.k8s.io/v1";
    pub const V1BETA1: &str = "apiextensions.k8s.io/v1beta1";
    pub const KIND: &str = "CustomResourceDefinition";
    pub const PLURAL: &str = "customresourcedefinitions";
}
