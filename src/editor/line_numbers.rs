//! Row counting for raw-mode sizing
//!
//! Hosts size the plain editable element by its row count, so the count
//! has to track the document text exactly: newline-delimited, with an
//! empty document still occupying one row.

// ─────────────────────────────────────────────────────────────────────────────
// Helper Functions
// ─────────────────────────────────────────────────────────────────────────────

/// Count the rows the given text occupies.
///
/// Empty text counts as a single empty row; otherwise one row per
/// newline-delimited segment, including a trailing empty one.
pub fn count_lines(text: &str) -> usize {
    if text.is_empty() {
        1
    } else {
        text.chars().filter(|&c| c == '\n').count() + 1
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
