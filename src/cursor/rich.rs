//! Cursor strategy for the rich-rendering editable surface
//!
//! The rich surface has no linear offset API, so every linear quantity is
//! measured by moving the native selection and counting:
//!
//! - the 1-based line number: collapse to the line boundary, then hop
//!   backward one line per iteration until motion stops at the surface
//!   start — the iteration count is the line number (O(line) per query)
//! - the linear offset: step backward one character at a time until the
//!   surface start (O(offset) per query)
//!
//! Every probe records the native selection first and restores it exactly
//! afterward, so callers never observe cursor movement as a side effect of
//! asking "what line is the caret on".

use super::position::{line_col_to_char_index, CursorPosition};
use super::CursorModel;
use crate::surface::{CaretRef, Direction, NativeRange, RichSurface};

// ─────────────────────────────────────────────────────────────────────────────
// RichCursor
// ─────────────────────────────────────────────────────────────────────────────

/// Iterative probing cursor strategy for [`RichSurface`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RichCursor;

impl CursorModel for RichCursor {
    type Surface = RichSurface;

    fn get_cursor(&self, surface: &mut RichSurface) -> CursorPosition {
        if !surface.is_focused() {
            return CursorPosition::unknown();
        }

        let range = surface.selection();
        let anchor_offset = measure_offset(surface, range.anchor());
        let focus_offset = if range.is_collapsed() {
            anchor_offset
        } else {
            measure_offset(surface, range.focus())
        };
        let line = measure_line(surface, range.start());

        CursorPosition {
            offset: anchor_offset as isize,
            line: line as isize,
            selection: focus_offset as isize - anchor_offset as isize,
        }
    }

    fn set_cursor(&self, surface: &mut RichSurface, position: CursorPosition) {
        if !surface.is_attached() {
            return;
        }

        // A positive offset is the linear target; the line axis is only
        // consulted through the offset sentinel (move by line, same column)
        let focus = surface.selection().focus();
        let target = if position.offset > 0 {
            position.offset as usize
        } else if position.line >= 0 {
            let text = surface.rendered();
            line_col_to_char_index(&text, position.line as usize, focus.offset())
        } else {
            measure_offset(surface, focus)
        };

        // Discard any active selection with a single fixed-direction move
        if !surface.is_collapsed() {
            surface.step(Direction::Backward, false);
        }

        // Step one character at a time toward the target offset
        let caret = surface.selection().focus();
        let current = measure_offset(surface, caret);
        let (direction, distance) = if target >= current {
            (Direction::Forward, target - current)
        } else {
            (Direction::Backward, current - target)
        };
        for _ in 0..distance {
            if !surface.step(direction, false) {
                break;
            }
        }

        // Extend character by character for a requested selection length
        let direction = if position.selection >= 0 {
            Direction::Forward
        } else {
            Direction::Backward
        };
        for _ in 0..position.selection_magnitude() {
            if !surface.step(direction, true) {
                break;
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Probing Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Measure the 1-based line number of a caret by hopping backward one line
/// per iteration. Restores the original selection before returning.
fn measure_line(surface: &mut RichSurface, at: CaretRef) -> usize {
    let saved = surface.selection();
    surface.restore_selection(NativeRange::collapsed(at));
    surface.move_to_line_start();

    let mut line = 1;
    while surface.move_up_line() {
        line += 1;
    }

    surface.restore_selection(saved);
    line
}

/// Measure the linear character offset of a caret by stepping backward to
/// the surface start. Restores the original selection before returning.
fn measure_offset(surface: &mut RichSurface, at: CaretRef) -> usize {
    let saved = surface.selection();
    surface.restore_selection(NativeRange::collapsed(at));

    let mut offset = 0;
    while surface.step(Direction::Backward, false) {
        offset += 1;
    }

    surface.restore_selection(saved);
    offset
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn focused(content: &str) -> RichSurface {
        let mut surface = RichSurface::from_rendered(content);
        surface.focus();
        surface
    }

    #[test]
    fn test_get_unfocused_returns_unknown() {
        let mut surface = RichSurface::from_rendered("text");
        let pos = RichCursor.get_cursor(&mut surface);
        assert!(pos.is_unknown());
    }

    #[test]
    fn test_get_reports_line_and_offset() {
        let mut surface = focused("one\ntwo\nthree");
        RichCursor.set_cursor(&mut surface, CursorPosition::collapsed(10, -1));
        let pos = RichCursor.get_cursor(&mut surface);
        assert_eq!(pos.line, 3);
        assert_eq!(pos.offset, 10); // "one\ntwo\n" is 8 chars, plus col 2
        assert_eq!(pos.selection, 0);
    }

    #[test]
    fn test_cursor_transparency() {
        let mut surface = focused("alpha\nbeta\ngamma");
        RichCursor.set_cursor(&mut surface, CursorPosition::collapsed(12, -1));
        let before = surface.selection();

        let pos = RichCursor.get_cursor(&mut surface);
        assert_eq!(pos.line, 3);
        assert_eq!(pos.selection, 0);

        // The probe must not move the caret or create a selection
        assert_eq!(surface.selection(), before);
        assert!(surface.is_collapsed());
    }

    #[test]
    fn test_get_set_round_trip() {
        let mut surface = focused("one\ntwo\nthree");
        RichCursor.set_cursor(&mut surface, CursorPosition::new(5, -1, -3));
        let before = surface.selection();

        let pos = RichCursor.get_cursor(&mut surface);
        assert_eq!(pos.offset, 5);
        assert_eq!(pos.selection, -3);

        RichCursor.set_cursor(&mut surface, pos);
        assert_eq!(surface.selection(), before);
        assert_eq!(RichCursor.get_cursor(&mut surface), pos);
    }

    #[test]
    fn test_line_sentinel_keeps_line() {
        let mut surface = focused("one\ntwo\nthree");
        RichCursor.set_cursor(&mut surface, CursorPosition::collapsed(5, -1));
        assert_eq!(RichCursor.get_cursor(&mut surface).line, 2);
        // Another same-line move with the line sentinel stays on line 2
        RichCursor.set_cursor(&mut surface, CursorPosition::collapsed(6, -1));
        let pos = RichCursor.get_cursor(&mut surface);
        assert_eq!(pos.line, 2);
        assert_eq!(pos.offset, 6);
    }

    #[test]
    fn test_offset_sentinel_keeps_column() {
        let mut surface = focused("one\ntwo\nthree");
        RichCursor.set_cursor(&mut surface, CursorPosition::collapsed(2, -1));
        RichCursor.set_cursor(&mut surface, CursorPosition::collapsed(0, 3));
        let pos = RichCursor.get_cursor(&mut surface);
        assert_eq!(pos.line, 3);
        assert_eq!(pos.offset, 10); // col 2 preserved into "three"
    }

    #[test]
    fn test_both_sentinels_leave_caret_in_place() {
        let mut surface = focused("one\ntwo\nthree");
        RichCursor.set_cursor(&mut surface, CursorPosition::collapsed(7, -1));
        let before = surface.selection();
        RichCursor.set_cursor(&mut surface, CursorPosition::collapsed(0, -1));
        assert_eq!(surface.selection(), before);
    }

    #[test]
    fn test_set_with_forward_selection() {
        let mut surface = focused("hello world");
        RichCursor.set_cursor(&mut surface, CursorPosition::new(6, -1, 5));
        let pos = RichCursor.get_cursor(&mut surface);
        assert_eq!(pos.offset, 6);
        assert_eq!(pos.selection, 5);
    }

    #[test]
    fn test_set_with_backward_selection() {
        let mut surface = focused("hello world");
        RichCursor.set_cursor(&mut surface, CursorPosition::new(6, -1, -3));
        let pos = RichCursor.get_cursor(&mut surface);
        assert_eq!(pos.offset, 6);
        assert_eq!(pos.selection, -3);
    }

    #[test]
    fn test_set_collapses_existing_selection_first() {
        let mut surface = focused("one\ntwo\nthree");
        RichCursor.set_cursor(&mut surface, CursorPosition::new(1, -1, 4));
        assert!(!surface.is_collapsed());

        RichCursor.set_cursor(&mut surface, CursorPosition::collapsed(9, -1));
        let pos = RichCursor.get_cursor(&mut surface);
        assert_eq!(pos.selection, 0);
        assert_eq!(pos.line, 3);
    }

    #[test]
    fn test_selection_across_line_boundary() {
        let mut surface = focused("ab\ncd");
        RichCursor.set_cursor(&mut surface, CursorPosition::new(1, -1, 3));
        let pos = RichCursor.get_cursor(&mut surface);
        assert_eq!(pos.offset, 1);
        assert_eq!(pos.selection, 3); // 'b', the line break, 'c'
    }

    #[test]
    fn test_set_detached_is_noop() {
        let mut surface = focused("one\ntwo");
        let before = surface.selection();
        surface.detach();
        RichCursor.set_cursor(&mut surface, CursorPosition::collapsed(5, -1));
        assert_eq!(surface.selection(), before);
    }

    #[test]
    fn test_get_multiline_selection_reports_start_line() {
        let mut surface = focused("one\ntwo\nthree");
        // Anchor at line 2 col 1, extend backward across the line break
        RichCursor.set_cursor(&mut surface, CursorPosition::new(5, -1, -3));
        let pos = RichCursor.get_cursor(&mut surface);
        assert_eq!(pos.offset, 5);
        assert_eq!(pos.selection, -3);
        assert_eq!(pos.line, 1); // line of the selection start
    }
}
