// SPDX-License-Identifier: MPL-2.0
//! Public handle to a running engine.
//!
//! [`ToastEngine::spawn`] starts the engine task and returns a cheaply
//! clonable handle. Submissions return a [`PendingToast`] future that
//! resolves once the toast is visible; control operations (`pause`,
//! `resume`, `dismiss`, `action`) are fire-and-forget and degrade to
//! no-ops inside the engine for unknown or already dismissed toasts.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::{mpsc, oneshot, watch};

use super::actor::{Command, EngineActor};
use super::notification::{DisplayedToast, Payload, ToastId};
use super::queue::PendingRequest;
use crate::config::EngineConfig;
use crate::diagnostics::DiagnosticsHandle;
use crate::error::{Error, Result};

/// Resolves with the toast's identifier once it becomes visible.
///
/// The identifier is assigned at submission and also available
/// immediately through [`PendingToast::id`]; awaiting tells you *when*
/// the toast materialized. Fails with [`Error::Cancelled`] if the engine
/// dropped the request before display (shutdown or [`ToastEngine::clear`]).
#[derive(Debug)]
pub struct PendingToast {
    id: ToastId,
    ready_rx: oneshot::Receiver<ToastId>,
}

impl PendingToast {
    /// The identifier this submission was assigned.
    #[must_use]
    pub fn id(&self) -> ToastId {
        self.id
    }
}

impl Future for PendingToast {
    type Output = Result<ToastId>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.ready_rx)
            .poll(cx)
            .map(|ready| ready.map_err(|_| Error::Cancelled))
    }
}

/// Handle to a running toast engine.
///
/// Cloning is cheap; all clones talk to the same engine task. The engine
/// winds down once every handle is dropped and its pending sleep tasks
/// have finished.
#[derive(Debug, Clone)]
pub struct ToastEngine {
    command_tx: mpsc::UnboundedSender<Command>,
    view_rx: watch::Receiver<Vec<DisplayedToast>>,
    config: EngineConfig,
}

impl ToastEngine {
    /// Spawns an engine task on the ambient tokio runtime.
    #[must_use]
    pub fn spawn(config: EngineConfig) -> Self {
        Self::spawn_inner(config, None)
    }

    /// Spawns an engine that reports lifecycle events to `diagnostics`.
    #[must_use]
    pub fn spawn_with_diagnostics(config: EngineConfig, diagnostics: DiagnosticsHandle) -> Self {
        Self::spawn_inner(config, Some(diagnostics))
    }

    fn spawn_inner(config: EngineConfig, diagnostics: Option<DiagnosticsHandle>) -> Self {
        let config = config.normalized();
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (view_tx, view_rx) = watch::channel(Vec::new());
        let actor = EngineActor::new(config.clone(), command_tx.downgrade(), view_tx, diagnostics);
        tokio::spawn(actor.run(command_rx));
        Self {
            command_tx,
            view_rx,
            config,
        }
    }

    /// Enqueues a toast for display.
    ///
    /// Never rejects on its own account: the request is accepted
    /// immediately and the returned future resolves once the toast is
    /// visible. Errors only if the engine task has stopped.
    pub fn submit(&self, payload: Payload) -> Result<PendingToast> {
        let id = ToastId::new();
        let duration = payload.duration.unwrap_or(self.config.default_duration());
        let (ready_tx, ready_rx) = oneshot::channel();
        self.send(Command::Submit(PendingRequest {
            id,
            payload,
            duration,
            ready_tx,
        }))?;
        Ok(PendingToast { id, ready_rx })
    }

    /// Freezes the countdown of a visible toast (pointer-enter).
    pub fn pause(&self, id: ToastId) -> Result<()> {
        self.send(Command::Pause(id))
    }

    /// Reschedules a paused countdown for its remaining time
    /// (pointer-leave). A countdown with nothing left dismisses
    /// immediately.
    pub fn resume(&self, id: ToastId) -> Result<()> {
        self.send(Command::Resume(id))
    }

    /// Dismisses a toast. Safe to call any number of times, from any
    /// trigger; only the first has an effect.
    pub fn dismiss(&self, id: ToastId) -> Result<()> {
        self.send(Command::Dismiss(id))
    }

    /// Runs the toast's action handler (if any), then dismisses it.
    pub fn action(&self, id: ToastId) -> Result<()> {
        self.send(Command::Action(id))
    }

    /// Drops the whole backlog and dismisses everything visible.
    pub fn clear(&self) -> Result<()> {
        self.send(Command::Clear)
    }

    /// Returns a receiver for the rendering contract.
    ///
    /// The watch value is the full visible stack, oldest first, with
    /// final vertical offsets; it is replaced atomically with every
    /// membership change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<DisplayedToast>> {
        self.view_rx.clone()
    }

    /// Snapshot of the currently visible stack.
    #[must_use]
    pub fn active(&self) -> Vec<DisplayedToast> {
        self.view_rx.borrow().clone()
    }

    /// The (normalized) configuration this engine runs with.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn send(&self, command: Command) -> Result<()> {
        self.command_tx
            .send(command)
            .map_err(|_| Error::EngineStopped)
    }
}
