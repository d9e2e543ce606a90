// SPDX-License-Identifier: MPL-2.0
//! The submission queue and the adaptive dispatch pacing policy.
//!
//! Requests wait here in strict FIFO order until the dispatch loop
//! materializes them. The wait between two materializations grows with
//! the backlog left behind after a pop, so bursts are spaced out
//! progressively, up to a configurable ceiling.

use std::collections::VecDeque;
use std::time::Duration;

use tokio::sync::oneshot;

use super::notification::{Payload, ToastId};
use crate::config::EngineConfig;

/// A submitted request that has not been materialized yet.
///
/// Carries the continuation that resolves the caller's submit future once
/// the toast becomes visible. Dropped (consuming the continuation) if the
/// engine is cleared or shut down first.
#[derive(Debug)]
pub(crate) struct PendingRequest {
    pub id: ToastId,
    pub payload: Payload,
    /// Effective lifetime, with the config default already applied.
    pub duration: Duration,
    pub ready_tx: oneshot::Sender<ToastId>,
}

/// FIFO buffer of not-yet-displayed requests.
#[derive(Debug, Default)]
pub(crate) struct SubmissionQueue {
    pending: VecDeque<PendingRequest>,
}

impl SubmissionQueue {
    pub fn push(&mut self, request: PendingRequest) {
        self.pending.push_back(request);
    }

    pub fn pop(&mut self) -> Option<PendingRequest> {
        self.pending.pop_front()
    }

    /// Backlog depth: requests still waiting to materialize.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drops every pending request, and with them their continuations.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

/// Computes the wait before the next materialization.
///
/// `backlog` is the queue length measured after the current request was
/// popped. The wait is `base_interval + backlog * backlog_scaling`,
/// clamped to `max_interval`, so spacing is non-decreasing in backlog
/// depth but bounded.
#[must_use]
pub fn dispatch_delay(config: &EngineConfig, backlog: usize) -> Duration {
    let scaled = config
        .backlog_scaling_ms
        .saturating_mul(backlog as u64);
    let ms = config
        .base_interval_ms
        .saturating_add(scaled)
        .min(config.max_interval_ms);
    Duration::from_millis(ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> EngineConfig {
        EngineConfig {
            base_interval_ms: 300,
            backlog_scaling_ms: 300,
            max_interval_ms: 1500,
            ..EngineConfig::default()
        }
    }

    #[test]
    fn empty_backlog_uses_base_interval() {
        assert_eq!(dispatch_delay(&config(), 0), Duration::from_millis(300));
    }

    #[test]
    fn delay_grows_with_backlog() {
        let config = config();
        assert_eq!(dispatch_delay(&config, 1), Duration::from_millis(600));
        assert_eq!(dispatch_delay(&config, 2), Duration::from_millis(900));
    }

    #[test]
    fn delay_is_monotone_in_backlog() {
        let config = config();
        let mut previous = Duration::ZERO;
        for backlog in 0..64 {
            let delay = dispatch_delay(&config, backlog);
            assert!(delay >= previous, "delay must be non-decreasing");
            previous = delay;
        }
    }

    #[test]
    fn delay_is_clamped_at_max_interval() {
        let config = config();
        assert_eq!(dispatch_delay(&config, 100), Duration::from_millis(1500));
    }

    #[test]
    fn queue_is_fifo() {
        let mut queue = SubmissionQueue::default();
        let mut ids = Vec::new();
        for i in 0..3 {
            let (ready_tx, _ready_rx) = oneshot::channel();
            let id = ToastId::new();
            ids.push(id);
            queue.push(PendingRequest {
                id,
                payload: Payload::new(format!("t{i}")),
                duration: Duration::from_secs(2),
                ready_tx,
            });
        }

        assert_eq!(queue.len(), 3);
        for expected in ids {
            assert_eq!(queue.pop().map(|r| r.id), Some(expected));
        }
        assert!(queue.is_empty());
    }

    #[test]
    fn clear_drops_continuations() {
        let mut queue = SubmissionQueue::default();
        let (ready_tx, mut ready_rx) = oneshot::channel();
        queue.push(PendingRequest {
            id: ToastId::new(),
            payload: Payload::new("queued"),
            duration: Duration::from_secs(2),
            ready_tx,
        });

        queue.clear();
        assert!(queue.is_empty());
        assert!(ready_rx.try_recv().is_err(), "continuation should be gone");
    }
}
