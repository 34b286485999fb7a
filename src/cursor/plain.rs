//! Cursor strategy for the plain editable-text surface
//!
//! The plain surface exposes linear selection offsets natively, so no
//! probing is required: offsets map directly and the line number falls out
//! of counting newlines up to the selection start.

use super::position::{char_index_to_line_col, line_col_to_char_index, CursorPosition};
use super::CursorModel;
use crate::string_utils::char_index_to_byte_index;
use crate::surface::PlainSurface;

// ─────────────────────────────────────────────────────────────────────────────
// PlainCursor
// ─────────────────────────────────────────────────────────────────────────────

/// Direct linear-offset cursor strategy for [`PlainSurface`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainCursor;

impl CursorModel for PlainCursor {
    type Surface = PlainSurface;

    fn get_cursor(&self, surface: &mut PlainSurface) -> CursorPosition {
        if !surface.is_focused() {
            return CursorPosition::unknown();
        }

        let (anchor, focus) = surface.selection();
        // Line of the selection start, for multi-line selections
        let start = anchor.min(focus);
        let start_byte = char_index_to_byte_index(surface.value(), start);
        let line = surface.value()[..start_byte].matches('\n').count() + 1;

        CursorPosition {
            offset: anchor as isize,
            line: line as isize,
            selection: focus as isize - anchor as isize,
        }
    }

    fn set_cursor(&self, surface: &mut PlainSurface, position: CursorPosition) {
        if !surface.is_attached() {
            return;
        }

        let value = surface.value().to_owned();
        let (_, focus) = surface.selection();

        // A positive offset is the linear target; the line axis is only
        // consulted through the offset sentinel (move by line, same column)
        let anchor = if position.offset > 0 {
            position.offset as usize
        } else if position.line >= 0 {
            let (_, col) = char_index_to_line_col(&value, focus);
            line_col_to_char_index(&value, position.line as usize, col)
        } else {
            focus
        };

        let target_focus = (anchor as isize + position.selection).max(0) as usize;
        surface.select(anchor, target_focus);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
