//! Cursor and selection position model
//!
//! Converts between a linear character offset, a (line, column) pair, and
//! each surface kind's native selection representation. The model is a
//! strategy: one [`CursorModel`] trait, two implementations selected by
//! surface kind —
//!
//! - [`PlainCursor`]: the plain surface exposes linear offsets natively,
//!   so reads and moves are direct arithmetic
//! - [`RichCursor`]: the rich surface exposes no linear offset API, so
//!   line numbers and offsets are measured by iterative probing and moves
//!   happen one character step at a time

mod plain;
mod position;
mod rich;

pub use plain::PlainCursor;
pub use position::{char_index_to_line_col, line_col_to_char_index, CursorPosition};
pub use rich::RichCursor;

// ─────────────────────────────────────────────────────────────────────────────
// CursorModel Strategy
// ─────────────────────────────────────────────────────────────────────────────

/// Strategy for reading and applying caret/selection state on one surface
/// kind.
pub trait CursorModel {
    /// The surface type this strategy operates on.
    type Surface;

    /// Read the current caret/selection as a [`CursorPosition`].
    ///
    /// Takes `&mut` because the rich strategy temporarily moves the native
    /// selection while probing; the selection is restored exactly before
    /// returning, so the measurement is observationally transparent.
    /// Returns [`CursorPosition::unknown`] when the surface has no active
    /// selection context (not focused).
    fn get_cursor(&self, surface: &mut Self::Surface) -> CursorPosition;

    /// Move the caret/selection to the given position.
    ///
    /// A positive `offset` is the linear target, matching what
    /// [`get_cursor`](Self::get_cursor) reports, so a recorded position
    /// restores the caret exactly. Sentinels are honored: `offset == 0`
    /// keeps the caret's column and moves only by `line`; `line == -1`
    /// with `offset == 0` leaves the caret where it is. `selection`
    /// extends the caret by its magnitude, backward when negative. No-op
    /// on a detached surface.
    fn set_cursor(&self, surface: &mut Self::Surface, position: CursorPosition);
}
