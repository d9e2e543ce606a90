// SPDX-License-Identifier: MPL-2.0
//! The active ordering: currently visible toasts, in appearance order.
//!
//! The registry is the source of truth for stacking. Insertion appends at
//! the tail; removal is by identifier and idempotent, which is what makes
//! double-dismissal (timeout racing a click) safe.

use super::notification::{ActiveToast, ToastId};

/// Append-ordered collection of visible toasts.
#[derive(Debug, Default)]
pub struct ActiveRegistry {
    order: Vec<ActiveToast>,
}

impl ActiveRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a toast at the tail of the ordering.
    ///
    /// The ordering never contains duplicate identifiers; identifiers are
    /// globally unique and a toast is inserted exactly once, at
    /// materialization.
    pub fn insert(&mut self, toast: ActiveToast) {
        debug_assert!(
            self.index_of(toast.id()).is_none(),
            "duplicate toast id in active ordering"
        );
        self.order.push(toast);
    }

    /// Removes a toast by identifier.
    ///
    /// Returns the removed toast, or `None` if the identifier is not
    /// present (already dismissed, or never materialized).
    pub fn remove(&mut self, id: ToastId) -> Option<ActiveToast> {
        let index = self.index_of(id)?;
        Some(self.order.remove(index))
    }

    /// Returns the toast's index in the ordering, if visible.
    #[must_use]
    pub fn index_of(&self, id: ToastId) -> Option<usize> {
        self.order.iter().position(|t| t.id() == id)
    }

    /// Returns the toast for `id`, if visible.
    #[must_use]
    pub fn get(&self, id: ToastId) -> Option<&ActiveToast> {
        self.order.iter().find(|t| t.id() == id)
    }

    /// Returns the full ordering, oldest first.
    #[must_use]
    pub fn toasts(&self) -> &[ActiveToast] {
        &self.order
    }

    /// Returns the number of visible toasts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns whether nothing is visible.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Removes and returns every toast, preserving order.
    pub fn drain(&mut self) -> Vec<ActiveToast> {
        std::mem::take(&mut self.order)
    }
}
