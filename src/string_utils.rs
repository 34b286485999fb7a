//! UTF-8 Safe String Utilities
//!
//! Marker scanning and cursor math work with byte positions that can come
//! from arbitrary arithmetic (token offsets, probe counters). Rust strings
//! are UTF-8 encoded, so slicing at a position inside a multi-byte character
//! panics. These helpers adjust positions to valid character boundaries
//! before slicing, and convert between character counts (what the position
//! model steps in) and byte offsets (what `&str` indexing wants).

// ─────────────────────────────────────────────────────────────────────────────
// Character Boundary Functions
// ─────────────────────────────────────────────────────────────────────────────

/// Returns the largest index that is less than or equal to `index`
/// and is on a UTF-8 character boundary.
///
/// If `index` is greater than the string length, returns the string length.
#[inline]
pub fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    if index == 0 {
        return 0;
    }

    // Walk backwards to find the start of the character
    let bytes = s.as_bytes();
    let mut i = index;
    while i > 0 && !is_utf8_char_start(bytes[i]) {
        i -= 1;
    }
    i
}

/// Returns the smallest index that is greater than or equal to `index`
/// and is on a UTF-8 character boundary.
///
/// If `index` is greater than or equal to the string length, returns the
/// string length.
#[inline]
pub fn ceil_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    if index == 0 {
        return 0;
    }

    // Walk forwards to find the start of the next character
    let bytes = s.as_bytes();
    let mut i = index;
    while i < bytes.len() && !is_utf8_char_start(bytes[i]) {
        i += 1;
    }
    i
}

/// Check if a byte is the start of a UTF-8 character.
///
/// A byte is a char start if it is NOT a continuation byte (10xxxxxx).
#[inline]
fn is_utf8_char_start(byte: u8) -> bool {
    (byte & 0b1100_0000) != 0b1000_0000
}

// ─────────────────────────────────────────────────────────────────────────────
// Safe Slicing
// ─────────────────────────────────────────────────────────────────────────────

/// Safely slice a string from `start` to `end`, adjusting indices to
/// valid UTF-8 character boundaries.
///
/// - `start` is adjusted down to the nearest character boundary (floor)
/// - `end` is adjusted up to the nearest character boundary (ceil)
///
/// If `start >= end` after adjustment, returns an empty string.
#[inline]
pub fn safe_slice(s: &str, start: usize, end: usize) -> &str {
    let start = floor_char_boundary(s, start);
    let end = ceil_char_boundary(s, end);

    if start >= end {
        return "";
    }

    &s[start..end]
}

// ─────────────────────────────────────────────────────────────────────────────
// Index Conversion Utilities
// ─────────────────────────────────────────────────────────────────────────────

/// Convert a character index to a byte index.
///
/// The position model counts in characters (one caret step = one character);
/// slicing needs bytes. Returns the string length if `char_index` is beyond
/// the string.
pub fn char_index_to_byte_index(s: &str, char_index: usize) -> usize {
    s.char_indices()
        .nth(char_index)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
