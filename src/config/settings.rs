//! Surface mode and editor options
//!
//! The two-surface duality is the heart of the engine: one logical note
//! document shown either as raw source syntax in a plain editable-text
//! element, or as rendered syntax in a rich-rendering editable element.
//! `SurfaceMode` names the two states; `EditorOptions` carries the
//! caller-tunable knobs for transitions between them.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;

// ─────────────────────────────────────────────────────────────────────────────
// Surface Mode
// ─────────────────────────────────────────────────────────────────────────────

/// The editing mode of the dual-surface editor.
///
/// - `Raw`: plain editable-text surface holding source syntax
/// - `Rendered`: rich-rendering editable surface holding rendered syntax
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceMode {
    /// Raw source editing (fence delimiters and variable markers visible)
    Raw,
    /// Rendered editing (code spans and generated inputs)
    #[default]
    Rendered,
}

impl SurfaceMode {
    /// Toggle between Raw and Rendered modes.
    pub fn toggle(&self) -> Self {
        match self {
            SurfaceMode::Raw => SurfaceMode::Rendered,
            SurfaceMode::Rendered => SurfaceMode::Raw,
        }
    }

    /// Get a display label for the mode.
    pub fn label(&self) -> &'static str {
        match self {
            SurfaceMode::Raw => "Raw",
            SurfaceMode::Rendered => "Rendered",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Editor Options
// ─────────────────────────────────────────────────────────────────────────────

/// Default delay before the "parsing taking longer than expected"
/// indicator is raised during a transition.
fn default_pending_delay_ms() -> u64 {
    500
}

/// Default delay between committing a transition and handing focus to the
/// new surface, giving the host element time to mount.
fn default_focus_delay_ms() -> u64 {
    40
}

/// Tunable options for a [`DualSurfaceEditor`](crate::DualSurfaceEditor).
///
/// All fields have sensible defaults and each deserializes independently,
/// so a host can supply a partial JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorOptions {
    /// Surface mode a fresh editor starts in
    #[serde(default)]
    pub default_mode: SurfaceMode,
    /// Milliseconds before the pending-parse indicator is raised
    #[serde(default = "default_pending_delay_ms")]
    pub pending_delay_ms: u64,
    /// Milliseconds to wait before focusing a freshly mounted surface
    #[serde(default = "default_focus_delay_ms")]
    pub focus_delay_ms: u64,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            default_mode: SurfaceMode::default(),
            pending_delay_ms: default_pending_delay_ms(),
            focus_delay_ms: default_focus_delay_ms(),
        }
    }
}

impl EditorOptions {
    /// Parse options from a JSON string supplied by the host.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The pending-indicator delay as a [`Duration`].
    pub fn pending_delay(&self) -> Duration {
        Duration::from_millis(self.pending_delay_ms)
    }

    /// The focus hand-off delay as a [`Duration`].
    pub fn focus_delay(&self) -> Duration {
        Duration::from_millis(self.focus_delay_ms)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
