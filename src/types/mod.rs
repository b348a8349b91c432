// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Resource types: CRD manifests and the Project custom resource.

pub mod crd;
pub mod project;

pub use crd::{ConditionStatus, CrdDocument};
pub use project::{Project, ProjectSpec, ProjectStatus};
