//! Dual-surface editor
//!
//! The controller that owns the document, both editable surfaces, and the
//! asynchronous transitions between them, plus small host-facing helpers
//! for row counting and text statistics.

mod controller;
mod line_numbers;
mod stats;

pub use controller::{Document, DualSurfaceEditor, MarkerParser, SurfaceParser, TransitionOutcome};
pub use line_numbers::count_lines;
pub use stats::TextStats;
