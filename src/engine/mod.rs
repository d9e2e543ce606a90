// SPDX-License-Identifier: MPL-2.0
//! Toast scheduling and lifecycle engine.
//!
//! The engine accepts asynchronous submissions, serializes their
//! on-screen appearance with adaptive spacing, tracks each toast's
//! remaining lifetime (with pause/resume on hover), derives stacked
//! positions, and removes toasts exactly once.
//!
//! # Components
//!
//! - `notification` - identifiers, payloads, and the rendering contract
//! - `queue` - FIFO submission buffer and the adaptive pacing policy
//! - `registry` - the active ordering of visible toasts
//! - `timer` - per-toast countdowns with pause/resume
//! - `layout` - pure stack position math
//! - `handle` - the public [`ToastEngine`] handle and submit future
//!
//! # Usage
//!
//! ```no_run
//! use toastline::config::EngineConfig;
//! use toastline::engine::{Kind, Payload, ToastEngine};
//!
//! # async fn example() -> toastline::error::Result<()> {
//! let engine = ToastEngine::spawn(EngineConfig::default());
//!
//! // Submit; the future resolves once the toast is visible.
//! let id = engine.submit(Payload::new("Saved").kind(Kind::Success))?.await?;
//!
//! // The display layer renders `engine.subscribe()` and forwards
//! // gestures back in:
//! engine.pause(id)?;   // pointer-enter
//! engine.resume(id)?;  // pointer-leave
//! engine.dismiss(id)?; // click
//! # Ok(())
//! # }
//! ```
//!
//! # Concurrency
//!
//! All state is owned by one engine task; handles, timers, and dispatch
//! ticks communicate with it over a single command channel, so mutation
//! is serialized without locks.

mod actor;
mod handle;
mod layout;
mod notification;
mod queue;
mod registry;
mod timer;

pub use handle::{PendingToast, ToastEngine};
pub use layout::StackLayout;
pub use notification::{
    ActionHandler, ActiveToast, DisplayedToast, Kind, Payload, ToastAction, ToastId,
};
pub use queue::dispatch_delay;
pub use registry::ActiveRegistry;
