// SPDX-License-Identifier: MPL-2.0
//! Lifecycle event reporting for the engine.
//!
//! The engine has no failure path of its own (logical races degrade to
//! no-ops), so observability is event-based: every submission,
//! materialization, pause, resume, and dismissal can be reported through a
//! [`DiagnosticsHandle`]. The handle is non-blocking and drops events when
//! the consumer falls behind, so a slow or absent observer can never stall
//! the engine.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::mpsc;

use crate::engine::ToastId;

/// Default capacity of the diagnostics channel.
const DEFAULT_CAPACITY: usize = 256;

/// Why a toast left the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DismissReason {
    /// The countdown ran out.
    Expired,
    /// An explicit `dismiss` call (close button, click-away).
    Manual,
    /// The action button was pressed; the action handler ran first.
    Action,
    /// The engine was cleared wholesale.
    Cleared,
}

/// What happened inside the engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EngineEventKind {
    /// A request entered the submission queue.
    Submitted {
        id: ToastId,
        /// Queue length after the request was added.
        backlog: usize,
    },
    /// A queued request became visible.
    Materialized { id: ToastId },
    /// A visible toast was removed.
    Dismissed { id: ToastId, reason: DismissReason },
    /// A toast's countdown was frozen.
    TimerPaused { id: ToastId },
    /// A frozen countdown was rescheduled.
    TimerResumed {
        id: ToastId,
        /// Remaining lifetime at the moment of resumption.
        remaining_ms: u64,
    },
}

/// A timestamped engine event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineEvent {
    /// Wall-clock time the event was recorded.
    pub at: DateTime<Utc>,
    #[serde(flatten)]
    pub kind: EngineEventKind,
}

impl EngineEvent {
    pub(crate) fn new(kind: EngineEventKind) -> Self {
        Self {
            at: Utc::now(),
            kind,
        }
    }
}

/// Handle for receiving lifecycle events from the engine.
///
/// Cheap to clone. Events are delivered over a bounded channel; when the
/// channel is full the event is dropped rather than blocking the engine.
#[derive(Debug, Clone)]
pub struct DiagnosticsHandle {
    event_tx: mpsc::Sender<EngineEvent>,
}

impl DiagnosticsHandle {
    /// Creates a handle and the receiving end of its event stream with the
    /// default capacity.
    #[must_use]
    pub fn channel() -> (Self, mpsc::Receiver<EngineEvent>) {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a handle with an explicit channel capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> (Self, mpsc::Receiver<EngineEvent>) {
        let (event_tx, event_rx) = mpsc::channel(capacity);
        (Self { event_tx }, event_rx)
    }

    /// Records an event. Non-blocking; drops the event if the channel is full.
    pub(crate) fn record(&self, kind: EngineEventKind) {
        let _ = self.event_tx.try_send(EngineEvent::new(kind));
    }
}
