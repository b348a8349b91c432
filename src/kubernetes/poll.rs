// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Fixed-interval polling with an overall deadline

use crate::constants::crd::MIN_POLL_INTERVAL_SECS;
use crate::error::{CrdBootstrapError, Result};
use std::future::Future;
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::debug;

/// Progress of a single wait. Lives as long as one call to [`poll_until`].
#[derive(Debug, Clone, Copy)]
pub struct PollState {
    pub attempt: u32,
    started: Instant,
}

impl PollState {
    fn new() -> Self {
        PollState {
            attempt: 0,
            started: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

/// Run `check` right away and then once per `interval` until it returns true.
///
/// `check` reports failures by returning false; only running out of `timeout`
/// turns into an error, which names `operation` and `name`. Intervals shorter than
/// one second are raised to one second.
pub async fn poll_until<F, Fut>(
    interval: Duration,
    timeout: Duration,
    operation: &'static str,
    name: &str,
    mut check: F,
) -> Result<()>
where
    F: FnMut(PollState) -> Fut,
    Fut: Future<Output = bool>,
{
    let interval = interval.max(Duration::from_secs(MIN_POLL_INTERVAL_SECS));
    let mut state = PollState::new();

    loop {
        state.attempt += 1;
        if check(state).await {
            return Ok(());
        }

        let elapsed = state.elapsed();
        if elapsed >= timeout {
            return Err(CrdBootstrapError::Timeout {
                operation,
                name: name.to_string(),
                elapsed,
            });
        }

        debug!(
            "{} for {} not done after attempt {}, retrying in {:?}",
            operation, name, state.attempt, interval
        );
        sleep(interval).await;
    }
}
