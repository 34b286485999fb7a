//! Cursor position value object and line/column conversions
//!
//! A [`CursorPosition`] describes caret and selection state independently
//! of which surface produced it. It is ephemeral: recomputed on demand
//! from the live surface, consumed to restore a caret, never persisted.

// ─────────────────────────────────────────────────────────────────────────────
// CursorPosition
// ─────────────────────────────────────────────────────────────────────────────

/// Caret/selection state: offset + line + signed selection length.
///
/// - `offset` is 0-based and never negative in a well-formed value; in a
///   move request, `0` means "do not move the offset"
/// - `line` is 1-based (the line containing the offset, or the selection
///   start for multi-line selections); in a move request, `-1` means
///   "do not move the line"
/// - `selection` is signed: negative when the selection extends backward
///   from the offset, zero when nothing is selected. The magnitude is
///   always `selection.unsigned_abs()`, never encoded in the sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorPosition {
    /// Linear character offset of the selection anchor
    pub offset: isize,
    /// 1-based line number
    pub line: isize,
    /// Signed selection length (focus minus anchor)
    pub selection: isize,
}

impl CursorPosition {
    /// Sentinel meaning "unknown" (queries) or "do not move" (line axis).
    pub const UNSET: isize = -1;

    /// A position with an explicit selection length.
    pub fn new(offset: isize, line: isize, selection: isize) -> Self {
        Self {
            offset,
            line,
            selection,
        }
    }

    /// A collapsed caret (no selection).
    pub fn collapsed(offset: isize, line: isize) -> Self {
        Self::new(offset, line, 0)
    }

    /// The sentinel value returned when a surface has no active selection
    /// context. Callers must check [`is_unknown`](Self::is_unknown) and
    /// skip restoration rather than move to a nonsensical position.
    pub fn unknown() -> Self {
        Self {
            offset: Self::UNSET,
            line: Self::UNSET,
            selection: 0,
        }
    }

    /// Whether this value is the "no active selection context" sentinel.
    pub fn is_unknown(&self) -> bool {
        self.offset < 0
    }

    /// Whether any content is selected.
    pub fn has_selection(&self) -> bool {
        self.selection != 0
    }

    /// The number of selected characters regardless of direction.
    pub fn selection_magnitude(&self) -> usize {
        self.selection.unsigned_abs()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Line/Column Conversions
// ─────────────────────────────────────────────────────────────────────────────

/// Convert a character index to a (line, column) position.
///
/// The line is 1-based, the column 0-based. Indices past the end of the
/// text resolve to the final position.
pub fn char_index_to_line_col(text: &str, char_index: usize) -> (usize, usize) {
    let mut line = 1;
    let mut col = 0;

    for (i, ch) in text.chars().enumerate() {
        if i >= char_index {
            break;
        }
        if ch == '\n' {
            line += 1;
            col = 0;
        } else {
            col += 1;
        }
    }

    (line, col)
}

/// Convert a (line, column) position to a character index.
///
/// The line is 1-based, the column 0-based. Out-of-bounds positions clamp
/// to the closest valid index: a column past the end of its line stops at
/// the line's end, a line past the text stops at the text's end.
pub fn line_col_to_char_index(text: &str, line: usize, col: usize) -> usize {
    let line = line.max(1);
    let mut current_line = 1;
    let mut current_col = 0;
    let mut index = 0;

    for ch in text.chars() {
        if current_line == line {
            if current_col == col {
                return index;
            }
            if ch == '\n' {
                // Column is past the end of the target line
                return index;
            }
        }
        if ch == '\n' {
            current_line += 1;
            current_col = 0;
        } else if current_line == line {
            current_col += 1;
        }
        index += 1;
    }

    index
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ─────────────────────────────────────────────────────────────────────────
    // CursorPosition Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_unknown_sentinel() {
        let pos = CursorPosition::unknown();
        assert!(pos.is_unknown());
        assert_eq!(pos.line, CursorPosition::UNSET);
        assert!(!pos.has_selection());
    }

    #[test]
    fn test_collapsed_is_not_unknown() {
        let pos = CursorPosition::collapsed(0, 1);
        assert!(!pos.is_unknown());
        assert!(!pos.has_selection());
    }

    #[test]
    fn test_backward_selection_magnitude() {
        let pos = CursorPosition::new(10, 2, -4);
        assert!(pos.has_selection());
        assert_eq!(pos.selection_magnitude(), 4);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Conversion Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_char_index_to_line_col_empty() {
        assert_eq!(char_index_to_line_col("", 0), (1, 0));
    }

    #[test]
    fn test_char_index_to_line_col_single_line() {
        let text = "Hello, World!";
        assert_eq!(char_index_to_line_col(text, 0), (1, 0));
        assert_eq!(char_index_to_line_col(text, 5), (1, 5));
        assert_eq!(char_index_to_line_col(text, 13), (1, 13));
    }

    #[test]
    fn test_char_index_to_line_col_multiline() {
        let text = "Hello\nWorld\n!";
        assert_eq!(char_index_to_line_col(text, 0), (1, 0)); // 'H'
        assert_eq!(char_index_to_line_col(text, 5), (1, 5)); // '\n'
        assert_eq!(char_index_to_line_col(text, 6), (2, 0)); // 'W'
        assert_eq!(char_index_to_line_col(text, 12), (3, 0)); // '!'
    }

    #[test]
    fn test_line_col_to_char_index_basic() {
        let text = "Hello\nWorld\n!";
        assert_eq!(line_col_to_char_index(text, 1, 0), 0);
        assert_eq!(line_col_to_char_index(text, 2, 0), 6);
        assert_eq!(line_col_to_char_index(text, 3, 0), 12);
    }

    #[test]
    fn test_line_col_to_char_index_clamps() {
        let text = "Hi\nBye";
        // Column beyond line length stops at the line end
        assert_eq!(line_col_to_char_index(text, 1, 10), 2);
        // Line beyond text stops at the text end
        assert_eq!(line_col_to_char_index(text, 5, 0), 6);
        // Line 0 is treated as line 1
        assert_eq!(line_col_to_char_index(text, 0, 1), 1);
    }

    #[test]
    fn test_roundtrip_conversion() {
        let text = "Line 1\nLine 2\nLine 3";

        for char_idx in [0, 3, 6, 7, 10, 13, 14, 17, 20] {
            let (line, col) = char_index_to_line_col(text, char_idx);
            let back = line_col_to_char_index(text, line, col);
            assert_eq!(back, char_idx, "Roundtrip failed for index {}", char_idx);
        }
    }
}
