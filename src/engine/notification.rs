// SPDX-License-Identifier: MPL-2.0
//! Core toast data structures.
//!
//! This module defines the identifier, payload, and active-toast types
//! shared by the rest of the engine. Identifiers are assigned once at
//! submission time and carried unchanged through materialization.

use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Unique identifier for a toast.
///
/// Assigned when a request is submitted and stable for the toast's whole
/// lifetime, queued or visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ToastId(u64);

impl ToastId {
    /// Creates a new unique toast ID.
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for ToastId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "toast-{}", self.0)
    }
}

/// Kind determines the visual treatment chosen by the display layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    /// Operation completed successfully.
    #[default]
    Success,
    /// Something went wrong.
    Error,
    /// Something needs attention but didn't block the operation.
    Warning,
}

/// Callback invoked when the user presses a toast's action button.
///
/// Runs inside the engine task, so it should be short; anything heavier
/// belongs in a task the handler spawns itself.
pub type ActionHandler = Arc<dyn Fn() + Send + Sync + 'static>;

/// An optional action button attached to a toast.
#[derive(Clone)]
pub struct ToastAction {
    /// Button label rendered by the display layer.
    pub label: String,
    /// Invoked before the toast is dismissed.
    pub handler: ActionHandler,
}

impl fmt::Debug for ToastAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToastAction")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// What a toast displays, plus its requested lifetime.
///
/// Built with a fluent API:
///
/// ```
/// use toastline::engine::{Kind, Payload};
/// use std::time::Duration;
///
/// let payload = Payload::new("Export finished")
///     .subtitle("3 files written")
///     .kind(Kind::Success)
///     .duration(Duration::from_secs(4));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Payload {
    /// Primary message line.
    pub title: String,
    /// Optional secondary line.
    pub subtitle: Option<String>,
    /// Severity kind (default [`Kind::Success`]).
    pub kind: Kind,
    /// Optional action button.
    pub action: Option<ToastAction>,
    /// Requested lifetime; the engine's configured default applies when
    /// absent.
    pub duration: Option<Duration>,
}

impl Payload {
    /// Creates a payload with the given title and defaults for the rest.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Sets the secondary line.
    #[must_use]
    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    /// Sets the severity kind.
    #[must_use]
    pub fn kind(mut self, kind: Kind) -> Self {
        self.kind = kind;
        self
    }

    /// Attaches an action button. Pressing it runs `handler` and then
    /// dismisses the toast.
    #[must_use]
    pub fn action(mut self, label: impl Into<String>, handler: ActionHandler) -> Self {
        self.action = Some(ToastAction {
            label: label.into(),
            handler,
        });
        self
    }

    /// Overrides the engine's default lifetime for this toast.
    #[must_use]
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }
}

/// A toast that is currently visible.
#[derive(Debug, Clone)]
pub struct ActiveToast {
    id: ToastId,
    payload: Payload,
    created_at: Instant,
}

impl ActiveToast {
    pub(crate) fn new(id: ToastId, payload: Payload) -> Self {
        Self {
            id,
            payload,
            created_at: Instant::now(),
        }
    }

    /// Returns the toast's identifier.
    #[must_use]
    pub fn id(&self) -> ToastId {
        self.id
    }

    /// Returns the display payload.
    #[must_use]
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Returns when this toast became visible.
    #[must_use]
    pub fn created_at(&self) -> Instant {
        self.created_at
    }
}

/// One entry of the rendering contract: what to draw, and where.
#[derive(Debug, Clone)]
pub struct DisplayedToast {
    /// Identifier to route user gestures back into the engine.
    pub id: ToastId,
    /// What to render.
    pub payload: Payload,
    /// Vertical offset of the card within the stack.
    pub vertical_offset: f32,
}
