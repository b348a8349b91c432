// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes utilities for client creation, polling and CRD bootstrapping.

pub mod client;
pub mod crd;
pub mod poll;

pub use client::create_client;
pub use crd::{ApplyOutcome, CrdApplier};
pub use poll::{poll_until, PollState};
