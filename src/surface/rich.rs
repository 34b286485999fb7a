//! Rich-rendering editable surface
//!
//! Models the host's rich editing element. Content is held as a list of
//! rendered line boxes; the native selection is an anchor/focus pair of
//! carets, each a line-box reference plus a character offset within it.
//!
//! The crucial contract: there is **no linear offset API**. A caller can
//! read the carets (opaque node references, comparable in document order,
//! plus node-relative offsets), save and restore a selection snapshot, and
//! move the selection one character or one line at a time. Anything
//! "linear" — the caret's line number, its absolute document offset — has
//! to be measured by iterative probing, which is exactly what
//! [`RichCursor`](crate::cursor::RichCursor) does.

// ─────────────────────────────────────────────────────────────────────────────
// Caret References
// ─────────────────────────────────────────────────────────────────────────────

/// Opaque reference to a rendered line box.
///
/// Comparable in document order, but carries no usable line index: the
/// only way to learn *which* line a node is, is to walk there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

/// One endpoint of the native selection: a line box plus a character
/// offset within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CaretRef {
    node: NodeId,
    offset: usize,
}

impl CaretRef {
    /// The line box this caret sits in.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Character offset within the line box (node-relative, not linear).
    pub fn offset(&self) -> usize {
        self.offset
    }
}

/// A saved native selection: anchor (where the selection started) and
/// focus (where it currently ends). Snapshot-restorable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeRange {
    anchor: CaretRef,
    focus: CaretRef,
}

impl NativeRange {
    /// A collapsed range with both endpoints at the given caret.
    pub fn collapsed(caret: CaretRef) -> Self {
        Self {
            anchor: caret,
            focus: caret,
        }
    }

    /// The selection anchor.
    pub fn anchor(&self) -> CaretRef {
        self.anchor
    }

    /// The selection focus.
    pub fn focus(&self) -> CaretRef {
        self.focus
    }

    /// Whether anchor and focus coincide (no content selected).
    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    /// The earlier of the two endpoints in document order.
    pub fn start(&self) -> CaretRef {
        self.anchor.min(self.focus)
    }
}

/// Direction of a single selection step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

// ─────────────────────────────────────────────────────────────────────────────
// RichSurface
// ─────────────────────────────────────────────────────────────────────────────

/// A rich-rendering editable surface holding rendered syntax.
#[derive(Debug, Clone)]
pub struct RichSurface {
    /// Rendered line boxes, always at least one (possibly empty)
    lines: Vec<String>,
    anchor: CaretRef,
    focus: CaretRef,
    detached: bool,
    focused: bool,
}

impl Default for RichSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl RichSurface {
    /// Create an empty, attached, unfocused surface.
    pub fn new() -> Self {
        let start = CaretRef {
            node: NodeId(0),
            offset: 0,
        };
        Self {
            lines: vec![String::new()],
            anchor: start,
            focus: start,
            detached: false,
            focused: false,
        }
    }

    /// Create a surface holding the given rendered content.
    pub fn from_rendered(content: &str) -> Self {
        let mut surface = Self::new();
        surface.set_rendered(content);
        surface
    }

    /// Replace the rendered content, resetting the selection to the start.
    /// No-op if the surface is detached.
    pub fn set_rendered(&mut self, content: &str) {
        if self.detached {
            return;
        }
        self.lines = content.split('\n').map(str::to_owned).collect();
        let start = CaretRef {
            node: NodeId(0),
            offset: 0,
        };
        self.anchor = start;
        self.focus = start;
    }

    /// The full rendered content, line boxes joined by newlines.
    pub fn rendered(&self) -> String {
        self.lines.join("\n")
    }

    /// The current native selection.
    pub fn selection(&self) -> NativeRange {
        NativeRange {
            anchor: self.anchor,
            focus: self.focus,
        }
    }

    /// Whether the current selection is collapsed.
    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    /// Restore a previously saved selection: re-apply the recorded anchor,
    /// then re-extend to the recorded focus. Endpoints are clamped to the
    /// current content. No-op if the surface is detached.
    pub fn restore_selection(&mut self, range: NativeRange) {
        if self.detached {
            return;
        }
        self.anchor = self.clamp_caret(range.anchor);
        self.focus = self.clamp_caret(range.focus);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Selection Motion Primitives
    // ─────────────────────────────────────────────────────────────────────────

    /// Collapse the selection to the start of the focus line box.
    pub fn move_to_line_start(&mut self) {
        if self.detached {
            return;
        }
        self.focus.offset = 0;
        self.anchor = self.focus;
    }

    /// Move the collapsed caret to the start of the previous line box.
    ///
    /// Returns `false` when the caret is already in the first line box,
    /// i.e. motion has reached the very start of the surface.
    pub fn move_up_line(&mut self) -> bool {
        if self.detached || self.focus.node.0 == 0 {
            return false;
        }
        self.focus = CaretRef {
            node: NodeId(self.focus.node.0 - 1),
            offset: 0,
        };
        self.anchor = self.focus;
        true
    }

    /// Step the selection by one character.
    ///
    /// With `extend == false` and an active selection, the first step only
    /// collapses the selection to its directional edge (the native "move
    /// discards the selection" behavior). Otherwise the focus moves one
    /// character, crossing line-box boundaries as a single step; with
    /// `extend == false` the anchor follows.
    ///
    /// Returns `false` when the focus is already at the surface edge in
    /// the given direction.
    pub fn step(&mut self, direction: Direction, extend: bool) -> bool {
        if self.detached {
            return false;
        }

        if !extend && self.anchor != self.focus {
            let collapsed = match direction {
                Direction::Backward => self.anchor.min(self.focus),
                Direction::Forward => self.anchor.max(self.focus),
            };
            self.anchor = collapsed;
            self.focus = collapsed;
            return true;
        }

        let moved = match direction {
            Direction::Backward => {
                if self.focus.offset > 0 {
                    self.focus.offset -= 1;
                    true
                } else if self.focus.node.0 > 0 {
                    let node = NodeId(self.focus.node.0 - 1);
                    self.focus = CaretRef {
                        node,
                        offset: self.line_char_len(node),
                    };
                    true
                } else {
                    false
                }
            }
            Direction::Forward => {
                if self.focus.offset < self.line_char_len(self.focus.node) {
                    self.focus.offset += 1;
                    true
                } else if self.focus.node.0 + 1 < self.lines.len() {
                    self.focus = CaretRef {
                        node: NodeId(self.focus.node.0 + 1),
                        offset: 0,
                    };
                    true
                } else {
                    false
                }
            }
        };

        if moved && !extend {
            self.anchor = self.focus;
        }
        moved
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    /// Whether the surface is still in the live tree.
    pub fn is_attached(&self) -> bool {
        !self.detached
    }

    /// Remove the surface from the live tree. Further writes are no-ops.
    pub fn detach(&mut self) {
        self.detached = true;
        self.focused = false;
    }

    /// Whether the surface currently has an active selection context.
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

    // ─────────────────────────────────────────────────────────────────────────
    // Internal Helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn line_char_len(&self, node: NodeId) -> usize {
        self.lines
            .get(node.0)
            .map(|line| line.chars().count())
            .unwrap_or(0)
    }

    fn clamp_caret(&self, caret: CaretRef) -> CaretRef {
        let node = NodeId(caret.node.0.min(self.lines.len() - 1));
        CaretRef {
            node,
            offset: caret.offset.min(self.line_char_len(node)),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
