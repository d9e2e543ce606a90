// SPDX-License-Identifier: MPL-2.0
//! Stack position math.
//!
//! A toast's vertical offset is a pure function of its index in the
//! active ordering: `base + index * (height + spacing)`. The engine
//! re-derives every offset on each membership change, so the stack never
//! has gaps or overlaps.

use super::notification::{ActiveToast, DisplayedToast};
use crate::config::EngineConfig;

/// Geometry used to place stacked toasts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackLayout {
    /// Offset of the first toast.
    pub base_offset: f32,
    /// Height of a single card.
    pub toast_height: f32,
    /// Gap between cards.
    pub toast_spacing: f32,
}

impl StackLayout {
    /// Builds the layout from an engine configuration.
    #[must_use]
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            base_offset: config.base_offset,
            toast_height: config.toast_height,
            toast_spacing: config.toast_spacing,
        }
    }

    /// Returns the vertical offset for the toast at `index` in the active
    /// ordering.
    #[must_use]
    pub fn offset_for(&self, index: usize) -> f32 {
        self.base_offset + index as f32 * (self.toast_height + self.toast_spacing)
    }

    /// Projects the active ordering into the rendering contract, one
    /// [`DisplayedToast`] per active toast, in stack order.
    #[must_use]
    pub fn stacked(&self, toasts: &[ActiveToast]) -> Vec<DisplayedToast> {
        toasts
            .iter()
            .enumerate()
            .map(|(index, toast)| DisplayedToast {
                id: toast.id(),
                payload: toast.payload().clone(),
                vertical_offset: self.offset_for(index),
            })
            .collect()
    }
}

impl Default for StackLayout {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}
