//! Plain editable-text surface
//!
//! Models the host's plain-text editing element: a flat string value plus
//! a native linear selection given as anchor/focus character offsets. The
//! anchor is where the selection started; the focus is where it currently
//! ends, so focus < anchor for a backward selection.

// ─────────────────────────────────────────────────────────────────────────────
// PlainSurface
// ─────────────────────────────────────────────────────────────────────────────

/// A plain editable-text surface holding source syntax.
#[derive(Debug, Clone, Default)]
pub struct PlainSurface {
    /// Current text value (source syntax)
    value: String,
    /// Selection anchor as a character offset
    anchor: usize,
    /// Selection focus as a character offset
    focus: usize,
    /// Whether the element is still in the live tree
    detached: bool,
    /// Whether the element currently has focus
    focused: bool,
}

impl PlainSurface {
    /// Create an empty, attached, unfocused surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a surface holding the given value, caret at the start.
    pub fn with_value(value: &str) -> Self {
        Self {
            value: value.to_owned(),
            ..Self::default()
        }
    }

    /// The current text value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The value length in characters.
    pub fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    /// Replace the value. No-op if the surface is detached. The selection
    /// is clamped so it never points past the new value.
    pub fn set_value(&mut self, value: &str) {
        if self.detached {
            return;
        }
        self.value = value.to_owned();
        let len = self.char_len();
        self.anchor = self.anchor.min(len);
        self.focus = self.focus.min(len);
    }

    /// The native linear selection as (anchor, focus) character offsets.
    pub fn selection(&self) -> (usize, usize) {
        (self.anchor, self.focus)
    }

    /// Set the native selection. Offsets are clamped to the value length.
    /// No-op if the surface is detached.
    pub fn select(&mut self, anchor: usize, focus: usize) {
        if self.detached {
            return;
        }
        let len = self.char_len();
        self.anchor = anchor.min(len);
        self.focus = focus.min(len);
    }

    /// Whether the surface is still in the live tree.
    pub fn is_attached(&self) -> bool {
        !self.detached
    }

    /// Remove the surface from the live tree. Further writes are no-ops.
    pub fn detach(&mut self) {
        self.detached = true;
        self.focused = false;
    }

    /// Whether the surface currently has focus.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Give the surface focus. No-op if detached.
    pub fn focus(&mut self) {
        if !self.detached {
            self.focused = true;
        }
    }

    /// Take focus away from the surface.
    pub fn blur(&mut self) {
        self.focused = false;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_surface_is_attached_and_unfocused() {
        let surface = PlainSurface::new();
        assert!(surface.is_attached());
        assert!(!surface.is_focused());
        assert_eq!(surface.selection(), (0, 0));
    }

    #[test]
    fn test_select_clamps_to_length() {
        let mut surface = PlainSurface::with_value("hello");
        surface.select(3, 100);
        assert_eq!(surface.selection(), (3, 5));
    }

    #[test]
    fn test_selection_survives_shorter_value() {
        let mut surface = PlainSurface::with_value("long value here");
        surface.select(10, 12);
        surface.set_value("abc");
        assert_eq!(surface.selection(), (3, 3));
    }

    #[test]
    fn test_backward_selection() {
        let mut surface = PlainSurface::with_value("hello");
        surface.select(4, 1);
        assert_eq!(surface.selection(), (4, 1));
    }

    #[test]
    fn test_char_len_multibyte() {
        let surface = PlainSurface::with_value("på 🎉");
        assert_eq!(surface.char_len(), 4);
    }

    #[test]
    fn test_detached_writes_are_noops() {
        let mut surface = PlainSurface::with_value("before");
        surface.focus();
        surface.detach();
        assert!(!surface.is_focused());

        surface.set_value("after");
        surface.select(1, 2);
        surface.focus();
        assert_eq!(surface.value(), "before");
        assert_eq!(surface.selection(), (0, 0));
        assert!(!surface.is_focused());
    }
}
