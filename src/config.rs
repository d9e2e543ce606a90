// SPDX-License-Identifier: MPL-2.0
//! Engine tuning parameters, including loading and saving them as a
//! `toastline.toml` file.
//!
//! All timing and layout constants of the engine live here so that host
//! applications can ship their own pacing and stacking geometry without
//! recompiling. Every field has a default matching the engine's built-in
//! behavior, and values read from disk are clamped to sane minimums.
//!
//! # Examples
//!
//! ```no_run
//! use toastline::config::{self, EngineConfig};
//!
//! // Load existing configuration, falling back to defaults
//! let mut config = config::load().unwrap_or_default();
//!
//! // Slow down the dispatch pacing
//! config.base_interval_ms = 500;
//!
//! config::save(&config).expect("Failed to save config");
//! ```

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "toastline.toml";
const APP_NAME: &str = "Toastline";

/// Base wait between two consecutive materializations, in milliseconds.
pub const DEFAULT_BASE_INTERVAL_MS: u64 = 300;
/// Extra wait added per queued request still waiting, in milliseconds.
pub const DEFAULT_BACKLOG_SCALING_MS: u64 = 300;
/// Ceiling on the adaptive dispatch wait, in milliseconds.
pub const DEFAULT_MAX_INTERVAL_MS: u64 = 1500;
/// Lifetime of a toast when the payload does not specify one.
pub const DEFAULT_DURATION_MS: u64 = 2000;
/// Vertical offset of the first toast from the top of the screen.
pub const DEFAULT_BASE_OFFSET: f32 = 20.0;
/// Nominal height of a single toast card.
pub const DEFAULT_TOAST_HEIGHT: f32 = 80.0;
/// Vertical gap between two stacked toasts.
pub const DEFAULT_TOAST_SPACING: f32 = 16.0;

/// Tuning parameters for a [`ToastEngine`](crate::engine::ToastEngine).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Base inter-arrival wait between materializations (ms).
    #[serde(default = "default_base_interval")]
    pub base_interval_ms: u64,

    /// Additional wait per request left in the backlog (ms).
    #[serde(default = "default_backlog_scaling")]
    pub backlog_scaling_ms: u64,

    /// Upper bound on the adaptive wait (ms). A deep backlog cannot push
    /// spacing beyond this.
    #[serde(default = "default_max_interval")]
    pub max_interval_ms: u64,

    /// Toast lifetime when the payload does not carry its own (ms).
    #[serde(default = "default_duration")]
    pub default_duration_ms: u64,

    /// Vertical offset of the first stacked toast.
    #[serde(default = "default_base_offset")]
    pub base_offset: f32,

    /// Height of a toast card, used for stack offsets.
    #[serde(default = "default_toast_height")]
    pub toast_height: f32,

    /// Gap between stacked toasts.
    #[serde(default = "default_toast_spacing")]
    pub toast_spacing: f32,
}

fn default_base_interval() -> u64 {
    DEFAULT_BASE_INTERVAL_MS
}

fn default_backlog_scaling() -> u64 {
    DEFAULT_BACKLOG_SCALING_MS
}

fn default_max_interval() -> u64 {
    DEFAULT_MAX_INTERVAL_MS
}

fn default_duration() -> u64 {
    DEFAULT_DURATION_MS
}

fn default_base_offset() -> f32 {
    DEFAULT_BASE_OFFSET
}

fn default_toast_height() -> f32 {
    DEFAULT_TOAST_HEIGHT
}

fn default_toast_spacing() -> f32 {
    DEFAULT_TOAST_SPACING
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_interval_ms: default_base_interval(),
            backlog_scaling_ms: default_backlog_scaling(),
            max_interval_ms: default_max_interval(),
            default_duration_ms: default_duration(),
            base_offset: default_base_offset(),
            toast_height: default_toast_height(),
            toast_spacing: default_toast_spacing(),
        }
    }
}

impl EngineConfig {
    /// Returns the default lifetime as a [`Duration`].
    #[must_use]
    pub fn default_duration(&self) -> Duration {
        Duration::from_millis(self.default_duration_ms)
    }

    /// Clamps nonsensical values to usable minimums.
    ///
    /// A zero default duration would dismiss toasts before anyone could
    /// read them, and a max interval below the base interval would invert
    /// the adaptive policy. Layout sizes may legitimately be zero (the
    /// host may stack flush), but negative values are clamped away.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if self.default_duration_ms == 0 {
            self.default_duration_ms = default_duration();
        }
        if self.max_interval_ms < self.base_interval_ms {
            self.max_interval_ms = self.base_interval_ms;
        }
        self.base_offset = self.base_offset.max(0.0);
        self.toast_height = self.toast_height.max(0.0);
        self.toast_spacing = self.toast_spacing.max(0.0);
        self
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<EngineConfig> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(EngineConfig::default())
}

pub fn save(config: &EngineConfig) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<EngineConfig> {
    let content = fs::read_to_string(path)?;
    let config: EngineConfig = toml::from_str(&content).unwrap_or_default();
    Ok(config.normalized())
}

pub fn save_to_path(config: &EngineConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
