// SPDX-License-Identifier: MPL-2.0
//! Per-toast countdown timers with pause/resume.
//!
//! Each visible toast owns one countdown, modeled as an explicit
//! `{remaining, resumed_at}` state machine plus a cancellable sleep task.
//! Pausing aborts the sleep and folds the elapsed portion into
//! `remaining`; resuming schedules a fresh sleep for exactly what is
//! left, so a toast paused at 500 ms of a 2000 ms lifetime dismisses
//! 1500 ms after resume, not 2000.
//!
//! Expiry is delivered as a [`Command::TimerElapsed`] on the engine's
//! command channel. A sleep task that fires concurrently with a pause or
//! dismissal cannot be un-sent, so every schedule bumps a per-toast
//! generation counter and the engine discards expiries whose generation
//! is stale.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Instant};

use super::actor::Command;
use super::notification::ToastId;

/// Outcome of a resume request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ResumeOutcome {
    /// A new countdown was scheduled for the remaining time.
    Rescheduled,
    /// The lifetime was already spent; the caller should dismiss now.
    Expired,
    /// Unknown identifier, or the countdown was already running.
    Ignored,
}

/// Countdown bookkeeping for one toast.
#[derive(Debug)]
struct Countdown {
    /// Lifetime left to serve, not counting the currently running stretch.
    remaining: Duration,
    /// When the current stretch started; `None` while paused.
    resumed_at: Option<Instant>,
    /// Bumped on every schedule and pause; stale expiries are discarded.
    generation: u64,
    task: Option<JoinHandle<()>>,
}

/// Owns every active countdown and the sleep tasks backing them.
#[derive(Debug)]
pub(crate) struct TimerController {
    command_tx: mpsc::WeakUnboundedSender<Command>,
    entries: HashMap<ToastId, Countdown>,
}

impl TimerController {
    pub fn new(command_tx: mpsc::WeakUnboundedSender<Command>) -> Self {
        Self {
            command_tx,
            entries: HashMap::new(),
        }
    }

    /// Starts a countdown of `duration` for `id`.
    ///
    /// Any previous countdown for the same identifier is replaced; in
    /// practice identifiers are unique per visible lifetime so this only
    /// happens in tests.
    pub fn start(&mut self, id: ToastId, duration: Duration) {
        self.cancel(id);
        self.entries.insert(
            id,
            Countdown {
                remaining: duration,
                resumed_at: None,
                generation: 0,
                task: None,
            },
        );
        self.schedule(id);
    }

    /// Freezes the countdown for `id`, keeping the remaining time.
    ///
    /// Returns whether a running countdown was actually frozen; unknown
    /// identifiers and already-paused countdowns are no-ops.
    pub fn pause(&mut self, id: ToastId) -> bool {
        let Some(entry) = self.entries.get_mut(&id) else {
            return false;
        };
        let Some(started) = entry.resumed_at.take() else {
            return false; // already paused
        };
        if let Some(task) = entry.task.take() {
            task.abort();
        }
        // Invalidate a sleep that may have fired before the abort landed.
        entry.generation += 1;
        entry.remaining = entry.remaining.saturating_sub(started.elapsed());
        true
    }

    /// Reschedules a paused countdown for its remaining time.
    pub fn resume(&mut self, id: ToastId) -> ResumeOutcome {
        match self.entries.get(&id) {
            None => ResumeOutcome::Ignored,
            Some(entry) if entry.resumed_at.is_some() => ResumeOutcome::Ignored,
            Some(entry) if entry.remaining.is_zero() => ResumeOutcome::Expired,
            Some(_) => {
                self.schedule(id);
                ResumeOutcome::Rescheduled
            }
        }
    }

    /// Drops all bookkeeping for `id` and aborts its sleep task.
    ///
    /// Idempotent; unknown identifiers are ignored.
    pub fn cancel(&mut self, id: ToastId) {
        if let Some(mut entry) = self.entries.remove(&id) {
            if let Some(task) = entry.task.take() {
                task.abort();
            }
        }
    }

    /// Returns whether an expiry notification is still authoritative.
    ///
    /// False once the toast was cancelled, or paused/rescheduled after the
    /// sleep that produced the notification was armed.
    pub fn expiry_is_current(&self, id: ToastId, generation: u64) -> bool {
        self.entries
            .get(&id)
            .is_some_and(|entry| entry.resumed_at.is_some() && entry.generation == generation)
    }

    /// Remaining lifetime for `id`, if a countdown exists.
    ///
    /// For a running countdown this subtracts the currently elapsing
    /// stretch.
    pub fn remaining(&self, id: ToastId) -> Option<Duration> {
        let entry = self.entries.get(&id)?;
        Some(match entry.resumed_at {
            Some(started) => entry.remaining.saturating_sub(started.elapsed()),
            None => entry.remaining,
        })
    }

    /// Number of live countdowns. Empty at idle.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    fn schedule(&mut self, id: ToastId) {
        let Some(entry) = self.entries.get_mut(&id) else {
            return;
        };
        entry.generation += 1;
        entry.resumed_at = Some(Instant::now());
        let generation = entry.generation;
        let remaining = entry.remaining;
        let Some(command_tx) = self.command_tx.upgrade() else {
            return; // engine is shutting down
        };
        entry.task = Some(tokio::spawn(async move {
            sleep(remaining).await;
            let _ = command_tx.send(Command::TimerElapsed { id, generation });
        }));
    }
}

impl Drop for TimerController {
    fn drop(&mut self) {
        for entry in self.entries.values_mut() {
            if let Some(task) = entry.task.take() {
                task.abort();
            }
        }
    }
}
