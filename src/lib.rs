// SPDX-License-Identifier: MPL-2.0
//! `toastline` is a toast notification scheduling and lifecycle engine.
//!
//! It owns the part of a toast system that is actual engineering: a FIFO
//! submission queue drained by a single dispatcher with adaptive
//! spacing, per-toast countdowns that pause and resume without losing
//! remaining time, stacked position derivation, and idempotent
//! dismissal. Rendering is left entirely to the host: the engine
//! publishes a `Vec<DisplayedToast>` through a watch channel and the
//! display layer forwards user gestures back in.
//!
//! See [`engine`] for the API, [`config`] for tuning parameters, and
//! [`diagnostics`] for lifecycle event reporting.

#![doc(html_root_url = "https://docs.rs/toastline/0.1.0")]

pub mod config;
pub mod diagnostics;
pub mod engine;
pub mod error;
