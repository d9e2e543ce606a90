// SPDX-License-Identifier: MPL-2.0
//! The engine task: one event loop owning all mutable state.
//!
//! Every piece of shared state (submission queue, active ordering, timer
//! table) lives inside [`EngineActor`], which processes commands from a
//! single channel one at a time. Timer expiries and dispatch ticks come
//! back through the same channel, so all mutation is serialized without
//! locks; suspension only ever happens between commands, never in the
//! middle of one.

use tokio::sync::{mpsc, watch};
use tokio::time::sleep;

use super::layout::StackLayout;
use super::notification::{ActiveToast, DisplayedToast, ToastId};
use super::queue::{dispatch_delay, PendingRequest, SubmissionQueue};
use super::registry::ActiveRegistry;
use super::timer::{ResumeOutcome, TimerController};
use crate::config::EngineConfig;
use crate::diagnostics::{DiagnosticsHandle, DismissReason, EngineEventKind};

/// Everything the engine task can be asked to do.
///
/// External variants arrive from [`ToastEngine`](super::ToastEngine)
/// handles; `DispatchDue` and `TimerElapsed` are internal ticks the
/// engine sends itself from sleep tasks.
#[derive(Debug)]
pub(crate) enum Command {
    Submit(PendingRequest),
    Pause(ToastId),
    Resume(ToastId),
    Dismiss(ToastId),
    Action(ToastId),
    Clear,
    /// The inter-arrival wait of the dispatch loop elapsed.
    DispatchDue,
    /// A toast's countdown ran out. Ignored when `generation` is stale.
    TimerElapsed { id: ToastId, generation: u64 },
}

pub(crate) struct EngineActor {
    config: EngineConfig,
    layout: StackLayout,
    queue: SubmissionQueue,
    registry: ActiveRegistry,
    timers: TimerController,
    /// True while a drain is in flight; guards against concurrent drains.
    draining: bool,
    command_tx: mpsc::WeakUnboundedSender<Command>,
    view_tx: watch::Sender<Vec<DisplayedToast>>,
    diagnostics: Option<DiagnosticsHandle>,
}

impl EngineActor {
    pub fn new(
        config: EngineConfig,
        command_tx: mpsc::WeakUnboundedSender<Command>,
        view_tx: watch::Sender<Vec<DisplayedToast>>,
        diagnostics: Option<DiagnosticsHandle>,
    ) -> Self {
        let config = config.normalized();
        Self {
            layout: StackLayout::from_config(&config),
            queue: SubmissionQueue::default(),
            registry: ActiveRegistry::new(),
            timers: TimerController::new(command_tx.clone()),
            draining: false,
            command_tx,
            view_tx,
            diagnostics,
            config,
        }
    }

    /// Runs until every handle is dropped and no sleep task is pending.
    pub async fn run(mut self, mut command_rx: mpsc::UnboundedReceiver<Command>) {
        while let Some(command) = command_rx.recv().await {
            self.handle(command);
        }
    }

    fn handle(&mut self, command: Command) {
        match command {
            Command::Submit(request) => self.submit(request),
            Command::Pause(id) => self.pause(id),
            Command::Resume(id) => self.resume(id),
            Command::Dismiss(id) => self.dismiss(id, DismissReason::Manual),
            Command::Action(id) => self.action(id),
            Command::Clear => self.clear(),
            Command::DispatchDue => self.dispatch_next(),
            Command::TimerElapsed { id, generation } => {
                if self.timers.expiry_is_current(id, generation) {
                    self.dismiss(id, DismissReason::Expired);
                }
            }
        }
    }

    fn submit(&mut self, request: PendingRequest) {
        let id = request.id;
        self.queue.push(request);
        self.record(EngineEventKind::Submitted {
            id,
            backlog: self.queue.len(),
        });
        if !self.draining {
            self.draining = true;
            // Defer the first pop one command-loop turn so that a burst of
            // submissions already sitting in the channel lands in the queue
            // first and gets the adaptive spacing it should.
            if let Some(command_tx) = self.command_tx.upgrade() {
                let _ = command_tx.send(Command::DispatchDue);
            } else {
                self.draining = false;
            }
        }
    }

    /// Materializes the queue head, then arms the next dispatch tick.
    ///
    /// The wait is derived from the backlog left after the pop, so bursts
    /// spread out progressively (bounded by the configured ceiling). When
    /// the queue runs dry the drain goes idle and the next submission
    /// re-arms it.
    fn dispatch_next(&mut self) {
        let Some(request) = self.queue.pop() else {
            self.draining = false;
            return;
        };
        self.materialize(request);

        if self.queue.is_empty() {
            self.draining = false;
            return;
        }
        let delay = dispatch_delay(&self.config, self.queue.len());
        let Some(command_tx) = self.command_tx.upgrade() else {
            self.draining = false;
            return;
        };
        tokio::spawn(async move {
            sleep(delay).await;
            let _ = command_tx.send(Command::DispatchDue);
        });
    }

    fn materialize(&mut self, request: PendingRequest) {
        let PendingRequest {
            id,
            payload,
            duration,
            ready_tx,
        } = request;

        self.registry.insert(ActiveToast::new(id, payload));
        self.timers.start(id, duration);
        self.publish();
        // Resolve the caller's continuation; the receiver may be gone.
        let _ = ready_tx.send(id);
        self.record(EngineEventKind::Materialized { id });
    }

    fn pause(&mut self, id: ToastId) {
        if self.timers.pause(id) {
            self.record(EngineEventKind::TimerPaused { id });
        }
    }

    fn resume(&mut self, id: ToastId) {
        match self.timers.resume(id) {
            ResumeOutcome::Rescheduled => {
                let remaining_ms = self
                    .timers
                    .remaining(id)
                    .map_or(0, |d| d.as_millis() as u64);
                self.record(EngineEventKind::TimerResumed { id, remaining_ms });
            }
            ResumeOutcome::Expired => self.dismiss(id, DismissReason::Expired),
            ResumeOutcome::Ignored => {}
        }
    }

    fn action(&mut self, id: ToastId) {
        let Some(handler) = self
            .registry
            .get(id)
            .and_then(|toast| toast.payload().action.as_ref())
            .map(|action| action.handler.clone())
        else {
            // No action button, or already dismissed: treat as plain dismiss.
            self.dismiss(id, DismissReason::Manual);
            return;
        };
        handler();
        self.dismiss(id, DismissReason::Action);
    }

    /// Removes a toast and all its bookkeeping. Exactly one dismissal
    /// takes effect; later calls find nothing and do nothing.
    fn dismiss(&mut self, id: ToastId, reason: DismissReason) {
        self.timers.cancel(id);
        if self.registry.remove(id).is_some() {
            self.publish();
            self.record(EngineEventKind::Dismissed { id, reason });
        }
    }

    fn clear(&mut self) {
        self.queue.clear();
        for toast in self.registry.drain() {
            let id = toast.id();
            self.timers.cancel(id);
            self.record(EngineEventKind::Dismissed {
                id,
                reason: DismissReason::Cleared,
            });
        }
        debug_assert_eq!(self.timers.len(), 0, "timer table must be empty at idle");
        self.publish();
    }

    /// Re-derives every stack position and replaces the published view.
    ///
    /// Called synchronously with each membership change so observers never
    /// see a stale stack.
    fn publish(&mut self) {
        let stack = self.layout.stacked(self.registry.toasts());
        let _ = self.view_tx.send(stack);
    }

    fn record(&self, kind: EngineEventKind) {
        if let Some(diagnostics) = &self.diagnostics {
            diagnostics.record(kind);
        }
    }
}
