//! Dual-surface editor controller
//!
//! `DualSurfaceEditor` owns one logical document and the two editable
//! surfaces it can appear on: a plain editable-text element holding source
//! syntax, and a rich-rendering element holding rendered syntax. At any
//! instant the document is valid in exactly one of the two syntaxes; the
//! `Document` tagged union makes an inconsistent in-between state
//! unrepresentable.
//!
//! Transitions between the surfaces run a caller-supplied [`SurfaceParser`]
//! asynchronously and commit atomically: either the parse succeeds and the
//! document, mode, and surface content all advance together, or it fails
//! and everything stays exactly as it was.

use crate::config::{EditorOptions, SurfaceMode};
use crate::cursor::{CursorModel, CursorPosition, PlainCursor, RichCursor};
use crate::error::Result;
use crate::markers;
use crate::surface::{PlainSurface, RichSurface};
use log::debug;
use std::pin::pin;
use tokio::time::{sleep, timeout};

use super::count_lines;
use super::stats::TextStats;

// ─────────────────────────────────────────────────────────────────────────────
// Document
// ─────────────────────────────────────────────────────────────────────────────

/// The logical document, tagged by which syntax it currently holds.
///
/// A transition replaces the whole variant in one assignment, so there is
/// never a moment where the mode says one thing and the text another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Document {
    /// Source syntax, shown on the plain surface
    Raw(String),
    /// Rendered syntax, shown on the rich surface
    Rendered(String),
}

impl Document {
    /// The document text in whichever syntax it currently holds.
    pub fn text(&self) -> &str {
        match self {
            Document::Raw(text) | Document::Rendered(text) => text,
        }
    }

    /// The surface mode this variant corresponds to.
    pub fn mode(&self) -> SurfaceMode {
        match self {
            Document::Raw(_) => SurfaceMode::Raw,
            Document::Rendered(_) => SurfaceMode::Rendered,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// SurfaceParser
// ─────────────────────────────────────────────────────────────────────────────

/// Caller-supplied syntax conversion used by transitions.
///
/// Both directions receive the outgoing surface alongside the text so a
/// parser can consult live element state (generated input values, for
/// instance). A returned error abandons the transition; the editor treats
/// it as fully recoverable.
#[allow(async_fn_in_trait)]
pub trait SurfaceParser {
    /// Convert rendered syntax back to source syntax (rendered → raw).
    async fn parse_raw(&self, rendered: &str, surface: &RichSurface) -> Result<String>;

    /// Convert source syntax to rendered syntax (raw → rendered).
    async fn parse_rendered(&self, raw: &str, surface: &PlainSurface) -> Result<String>;
}

/// The built-in marker-based parser: fences to code spans, variable
/// markers to generated inputs, and back.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkerParser;

impl SurfaceParser for MarkerParser {
    async fn parse_raw(&self, rendered: &str, _surface: &RichSurface) -> Result<String> {
        Ok(markers::rendered_to_source(rendered))
    }

    async fn parse_rendered(&self, raw: &str, _surface: &PlainSurface) -> Result<String> {
        Ok(markers::source_to_rendered(raw))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Transition Outcome
// ─────────────────────────────────────────────────────────────────────────────

/// What a transition call actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// The document switched syntax and the new surface took over
    Committed,
    /// Already in the requested mode, or another transition is in flight
    NoOp,
    /// The parser failed; mode and content are untouched
    Aborted,
}

// ─────────────────────────────────────────────────────────────────────────────
// DualSurfaceEditor
// ─────────────────────────────────────────────────────────────────────────────

type ContentCallback = Box<dyn FnMut(&str)>;
type ModeCallback = Box<dyn FnMut(SurfaceMode)>;
type PendingCallback = Box<dyn FnMut(bool)>;

/// The dual-surface editor state machine.
///
/// Owns the [`Document`], both surfaces, and the transition machinery.
/// Hosts route native events into [`handle_raw_edit`](Self::handle_raw_edit)
/// and the surface accessors, and observe changes through the optional
/// `on_content` / `on_mode` / `on_pending` callbacks.
pub struct DualSurfaceEditor<P> {
    parser: P,
    options: EditorOptions,
    document: Document,
    plain_surface: PlainSurface,
    rich_surface: RichSurface,
    /// Row count for host sizing; established on the first raw activation,
    /// recomputed on every raw edit thereafter
    rows: Option<usize>,
    /// Guards against overlapping transitions
    in_flight: bool,
    on_content: Option<ContentCallback>,
    on_mode: Option<ModeCallback>,
    on_pending: Option<PendingCallback>,
}

impl<P: SurfaceParser> DualSurfaceEditor<P> {
    /// Create an empty editor starting in the options' default mode.
    pub fn new(parser: P, options: EditorOptions) -> Self {
        let document = match options.default_mode {
            SurfaceMode::Raw => Document::Raw(String::new()),
            SurfaceMode::Rendered => Document::Rendered(String::new()),
        };
        Self {
            parser,
            options,
            document,
            plain_surface: PlainSurface::new(),
            rich_surface: RichSurface::new(),
            rows: None,
            in_flight: false,
            on_content: None,
            on_mode: None,
            on_pending: None,
        }
    }

    /// Seed the document with text in the current mode's syntax.
    pub fn with_content(mut self, text: &str) -> Self {
        match &mut self.document {
            Document::Raw(raw) => {
                *raw = text.to_owned();
                self.plain_surface.set_value(text);
                self.rows = Some(count_lines(text));
            }
            Document::Rendered(rendered) => {
                *rendered = text.to_owned();
                self.rich_surface.set_rendered(text);
            }
        }
        self
    }

    /// Observe every document content change.
    pub fn on_content(mut self, callback: impl FnMut(&str) + 'static) -> Self {
        self.on_content = Some(Box::new(callback));
        self
    }

    /// Observe mode changes committed by transitions.
    pub fn on_mode(mut self, callback: impl FnMut(SurfaceMode) + 'static) -> Self {
        self.on_mode = Some(Box::new(callback));
        self
    }

    /// Observe the pending-parse indicator (`true` raised, `false`
    /// cleared). Advisory only; a raised indicator never cancels a parse.
    pub fn on_pending(mut self, callback: impl FnMut(bool) + 'static) -> Self {
        self.on_pending = Some(Box::new(callback));
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// The current surface mode.
    pub fn mode(&self) -> SurfaceMode {
        self.document.mode()
    }

    /// The document text in its current syntax.
    pub fn content(&self) -> &str {
        self.document.text()
    }

    /// The row count used to size the plain element, once established.
    pub fn row_count(&self) -> Option<usize> {
        self.rows
    }

    /// Statistics over the current document text.
    pub fn stats(&self) -> TextStats {
        TextStats::from_text(self.document.text())
    }

    /// The plain editable-text surface, for routing native events.
    pub fn plain_surface_mut(&mut self) -> &mut PlainSurface {
        &mut self.plain_surface
    }

    /// The rich-rendering surface, for routing native events.
    pub fn rich_surface_mut(&mut self) -> &mut RichSurface {
        &mut self.rich_surface
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Raw Editing
    // ─────────────────────────────────────────────────────────────────────────

    /// Apply an edit made on the plain surface.
    ///
    /// Updates the raw document, recomputes the row count so host sizing
    /// stays correct, and fires `on_content`. Ignored outside raw mode.
    pub fn handle_raw_edit(&mut self, value: &str) {
        if !matches!(self.document, Document::Raw(_)) {
            return;
        }
        self.document = Document::Raw(value.to_owned());
        self.plain_surface.set_value(value);
        self.rows = Some(count_lines(value));
        self.notify_content();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Transitions
    // ─────────────────────────────────────────────────────────────────────────

    /// Switch from rendered to raw editing.
    ///
    /// Runs `parse_raw` on the rich surface's current content. If the
    /// parse outlasts the pending delay the indicator is raised and the
    /// parse keeps running; the commit always waits for the real result.
    /// On success the document and mode advance atomically, the caret's
    /// line carries over to the plain surface, and focus is handed off
    /// after the mount delay. On failure nothing changes.
    pub async fn activate(&mut self) -> TransitionOutcome {
        if self.in_flight || matches!(self.document, Document::Raw(_)) {
            return TransitionOutcome::NoOp;
        }
        self.in_flight = true;
        let outcome = self.run_activate().await;
        self.in_flight = false;
        outcome
    }

    async fn run_activate(&mut self) -> TransitionOutcome {
        let rendered = self.rich_surface.rendered();
        let carried_line = RichCursor.get_cursor(&mut self.rich_surface).line;
        let pending_delay = self.options.pending_delay();

        let parsed = {
            let Self {
                parser,
                rich_surface,
                on_pending,
                ..
            } = self;
            run_with_pending_indicator(
                parser.parse_raw(&rendered, rich_surface),
                pending_delay,
                on_pending,
            )
            .await
        };

        let raw = match parsed {
            Ok(raw) => raw,
            Err(err) => {
                debug!("rendered -> raw parse failed, staying rendered: {}", err);
                return TransitionOutcome::Aborted;
            }
        };

        if self.rows.is_none() {
            self.rows = Some(count_lines(&raw));
        }

        self.plain_surface.set_value(&raw);
        self.document = Document::Raw(raw);
        self.rich_surface.blur();
        self.notify_content();
        self.notify_mode();

        // Let the host mount the plain element before it takes focus
        sleep(self.options.focus_delay()).await;
        self.plain_surface.focus();
        if carried_line >= 0 {
            PlainCursor.set_cursor(
                &mut self.plain_surface,
                CursorPosition::collapsed(0, carried_line),
            );
        }

        TransitionOutcome::Committed
    }

    /// Switch from raw to rendered editing; the mirror of
    /// [`activate`](Self::activate), via `parse_rendered`.
    pub async fn deactivate(&mut self) -> TransitionOutcome {
        if self.in_flight || matches!(self.document, Document::Rendered(_)) {
            return TransitionOutcome::NoOp;
        }
        self.in_flight = true;
        let outcome = self.run_deactivate().await;
        self.in_flight = false;
        outcome
    }

    async fn run_deactivate(&mut self) -> TransitionOutcome {
        let raw = self.plain_surface.value().to_owned();
        let carried_line = PlainCursor.get_cursor(&mut self.plain_surface).line;
        let pending_delay = self.options.pending_delay();

        let parsed = {
            let Self {
                parser,
                plain_surface,
                on_pending,
                ..
            } = self;
            run_with_pending_indicator(
                parser.parse_rendered(&raw, plain_surface),
                pending_delay,
                on_pending,
            )
            .await
        };

        let rendered = match parsed {
            Ok(rendered) => rendered,
            Err(err) => {
                debug!("raw -> rendered parse failed, staying raw: {}", err);
                return TransitionOutcome::Aborted;
            }
        };

        self.rich_surface.set_rendered(&rendered);
        self.document = Document::Rendered(rendered);
        self.plain_surface.blur();
        self.notify_content();
        self.notify_mode();

        sleep(self.options.focus_delay()).await;
        self.rich_surface.focus();
        if carried_line >= 0 {
            RichCursor.set_cursor(
                &mut self.rich_surface,
                CursorPosition::collapsed(0, carried_line),
            );
        }

        TransitionOutcome::Committed
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internal Helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn notify_content(&mut self) {
        let Self {
            document,
            on_content,
            ..
        } = self;
        if let Some(callback) = on_content {
            callback(document.text());
        }
    }

    fn notify_mode(&mut self) {
        let mode = self.document.mode();
        if let Some(callback) = self.on_mode.as_mut() {
            callback(mode);
        }
    }
}

/// Await a parse, raising the pending indicator if it outlasts `delay`.
///
/// The timer is advisory: on expiry the indicator goes up and the same
/// parse future keeps being awaited, then the indicator comes down again
/// whatever the result was.
async fn run_with_pending_indicator<F>(
    parse: F,
    delay: std::time::Duration,
    on_pending: &mut Option<PendingCallback>,
) -> Result<String>
where
    F: std::future::Future<Output = Result<String>>,
{
    let mut parse = pin!(parse);
    match timeout(delay, &mut parse).await {
        Ok(result) => result,
        Err(_) => {
            debug!("parse outlasted the pending delay, raising indicator");
            if let Some(callback) = on_pending.as_mut() {
                callback(true);
            }
            let result = parse.await;
            if let Some(callback) = on_pending.as_mut() {
                callback(false);
            }
            result
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
