//! Inkline - Dual-Surface Editable-Text Engine
//!
//! One logical note document, two live representations. A note mixes plain
//! text, fenced code spans (` ``` `), and named variable placeholders
//! (`$[[name]]`). The raw surface edits the compact source syntax directly;
//! the rendered surface edits the expanded form (`<code>` wrapping and
//! generated inline inputs). This crate owns the logic that keeps the two in
//! sync:
//!
//! - [`markers`]: pure transforms between source syntax and rendered syntax
//! - [`cursor`]: caret/selection position model across both surface kinds
//! - [`editor`]: the mode-switching controller with atomic async transitions
//!
//! The HTML sanitizer and the rendered-tree builder are external
//! collaborators supplied by the host through [`editor::SurfaceParser`];
//! this crate never sanitizes or renders HTML itself.

pub mod config;
pub mod cursor;
pub mod editor;
pub mod error;
pub mod markers;
pub mod string_utils;
pub mod surface;

pub use config::{EditorOptions, SurfaceMode};
pub use cursor::{CursorModel, CursorPosition, PlainCursor, RichCursor};
pub use editor::{Document, DualSurfaceEditor, MarkerParser, SurfaceParser, TransitionOutcome};
pub use error::{Error, Result};
pub use surface::{PlainSurface, RichSurface};
