//! Marker parsing for the note source syntax
//!
//! A note mixes plain text with two marker kinds:
//!
//! - fenced code spans, delimited by the repeating 3-character token
//!   ` ``` `, rendered as an inline `<code>` span
//! - variable placeholders, written `$[[name]]`, rendered as a generated
//!   inline input element labeled with the variable name
//!
//! Both directions are pure, total string transforms: malformed markers
//! never produce an error, they degrade to literal text. The rendered
//! output is *not* sanitized here; sanitization is a separate downstream
//! pipeline stage owned by the host.
//!
//! # Example
//! ```
//! use inkline::markers::{source_to_rendered, rendered_to_source};
//!
//! let source = "run ```ls -la``` as $[[user]]";
//! let rendered = source_to_rendered(source);
//! assert!(rendered.contains("<code>ls -la</code>"));
//! assert_eq!(rendered_to_source(&rendered), source);
//! ```

use crate::string_utils::safe_slice;

// ─────────────────────────────────────────────────────────────────────────────
// Marker Tokens
// ─────────────────────────────────────────────────────────────────────────────

/// The repeating fence delimiter marking the start/end of a code span.
pub const FENCE: &str = "```";
/// Start token of a variable placeholder.
pub const VARIABLE_OPEN: &str = "$[[";
/// End token of a variable placeholder.
pub const VARIABLE_CLOSE: &str = "]]";

const CODE_OPEN: &str = "<code>";
const CODE_CLOSE: &str = "</code>";
const INPUT_OPEN: &str = "<input class=\"note-variable\" value=\"";
const INPUT_CLOSE: &str = "\">";
const INPUT_TAG: &str = "<input";
const INPUT_CLASS: &str = "class=\"note-variable\"";
const VALUE_ATTR: &str = "value=\"";

/// A source this short cannot hold a complete fenced span (two delimiters
/// plus content), so the fence stage passes it through unchanged. This also
/// avoids pathological wrapping around a lone stray fence token.
const MIN_FENCED_LEN: usize = 6;

// ─────────────────────────────────────────────────────────────────────────────
// Marker Spans
// ─────────────────────────────────────────────────────────────────────────────

/// The kind of a scanned marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    /// Fenced code span
    Code,
    /// Variable placeholder
    Variable,
}

/// A transient parse result describing one marker occurrence.
///
/// Produced while scanning, consumed immediately to build the output
/// string; not retained afterward. Offsets are byte positions into the
/// scanned text, spanning the whole marker including its tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerSpan {
    /// Which marker kind this span describes
    pub kind: MarkerKind,
    /// Byte offset of the first character of the marker
    pub start_in_source: usize,
    /// Byte offset one past the last character of the marker
    pub end_in_source: usize,
    /// The text carried by the marker (code body or variable name)
    pub payload: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Source Syntax → Rendered Syntax
// ─────────────────────────────────────────────────────────────────────────────

/// Expand source syntax into rendered syntax.
///
/// Fenced spans become `<code>` spans; variable markers become generated
/// input elements. Total function: any input produces some output, and
/// text without well-formed markers passes through unchanged.
pub fn source_to_rendered(source: &str) -> String {
    expand_variables(&expand_fences(source))
}

/// Wrap fenced segments in code-span tags.
///
/// The source is split on the fence delimiter; because the delimiter is a
/// single repeating token, segment index parity decides whether a segment
/// is inside a fence (odd index = inside). An odd delimiter count means
/// the trailing fence is unterminated: the final segment stays literal and
/// its leading delimiter is re-emitted verbatim, so no text is lost.
fn expand_fences(source: &str) -> String {
    if source.len() <= MIN_FENCED_LEN {
        return source.to_owned();
    }

    let parts: Vec<&str> = source.split(FENCE).collect();
    // parts.len() == delimiter count + 1; fewer than 2 delimiters means
    // there is no complete fenced span to expand.
    if parts.len() < 3 {
        return source.to_owned();
    }
    let unterminated_tail = parts.len() % 2 == 0;

    let mut out = String::with_capacity(source.len() + parts.len() * CODE_OPEN.len());
    for (index, part) in parts.iter().enumerate() {
        let last = index == parts.len() - 1;
        if last && unterminated_tail {
            // Stray trailing fence: keep the delimiter and text literal
            out.push_str(FENCE);
            out.push_str(part);
        } else if index % 2 == 1 {
            out.push_str(CODE_OPEN);
            out.push_str(part);
            out.push_str(CODE_CLOSE);
        } else {
            out.push_str(part);
        }
    }
    out
}

/// Scan for variable placeholders in a single pass.
///
/// Finds every `$[[name]]` occurrence; the text strictly between the
/// tokens is the payload. An unterminated start token ends the scan and
/// the remaining text is treated as literal.
pub fn scan_variable_spans(text: &str) -> Vec<MarkerSpan> {
    let mut spans = Vec::new();
    let mut cursor = 0;

    while let Some(found) = text[cursor..].find(VARIABLE_OPEN) {
        let start = cursor + found;
        let label_start = start + VARIABLE_OPEN.len();
        match text[label_start..].find(VARIABLE_CLOSE) {
            Some(label_len) => {
                let end = label_start + label_len + VARIABLE_CLOSE.len();
                spans.push(MarkerSpan {
                    kind: MarkerKind::Variable,
                    start_in_source: start,
                    end_in_source: end,
                    payload: safe_slice(text, label_start, label_start + label_len).to_owned(),
                });
                cursor = end;
            }
            None => break, // unterminated start token: literal text
        }
    }
    spans
}

/// Replace each variable marker with a generated input element.
fn expand_variables(text: &str) -> String {
    let spans = scan_variable_spans(text);
    if spans.is_empty() {
        return text.to_owned();
    }

    let mut out = String::with_capacity(text.len() + spans.len() * INPUT_OPEN.len());
    let mut cursor = 0;
    for span in &spans {
        out.push_str(&text[cursor..span.start_in_source]);
        out.push_str(INPUT_OPEN);
        out.push_str(&span.payload);
        out.push_str(INPUT_CLOSE);
        cursor = span.end_in_source;
    }
    out.push_str(&text[cursor..]);
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// Rendered Syntax → Source Syntax
// ─────────────────────────────────────────────────────────────────────────────

/// Collapse rendered syntax back into source syntax.
///
/// Left inverse of [`source_to_rendered`] for well-formed input:
/// `rendered_to_source(source_to_rendered(s)) == s` whenever `s` contains
/// only well-formed, non-nested fences and variable markers.
pub fn rendered_to_source(rendered: &str) -> String {
    collapse_fences(&collapse_variables(rendered))
}

/// Replace every code-span open/close tag with the fence delimiter.
fn collapse_fences(rendered: &str) -> String {
    rendered.replace(CODE_OPEN, FENCE).replace(CODE_CLOSE, FENCE)
}

/// Replace each generated input element with `$[[` + current value + `]]`.
///
/// The element's `value` attribute carries whatever the user last typed
/// into the inline input, so the collapse picks up edited variable names.
/// Only elements carrying the generated `note-variable` class are ours;
/// any other input element stays literal, as does a malformed element
/// with no closing `>`.
fn collapse_variables(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;

    while let Some(found) = text[cursor..].find(INPUT_TAG) {
        let start = cursor + found;
        let Some(tag_len) = text[start..].find('>') else {
            break; // malformed element: keep the tail literal
        };
        let end = start + tag_len + 1;
        let element = &text[start..end];

        out.push_str(&text[cursor..start]);
        match attribute_value(element) {
            Some(name) if element.contains(INPUT_CLASS) => {
                out.push_str(VARIABLE_OPEN);
                out.push_str(name);
                out.push_str(VARIABLE_CLOSE);
            }
            _ => out.push_str(element),
        }
        cursor = end;
    }
    out.push_str(&text[cursor..]);
    out
}

/// Extract the `value="..."` attribute from an input element, if present.
fn attribute_value(element: &str) -> Option<&str> {
    let attr = element.find(VALUE_ATTR)?;
    let value_start = attr + VALUE_ATTR.len();
    let value_len = element[value_start..].find('"')?;
    Some(&element[value_start..value_start + value_len])
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ─────────────────────────────────────────────────────────────────────────
    // Fence Expansion Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_fence_parity() {
        let rendered = source_to_rendered("a```CODE```b");
        assert_eq!(rendered, "a<code>CODE</code>b");
    }

    #[test]
    fn test_fence_multiple_spans() {
        let rendered = source_to_rendered("x```one```y```two```z");
        assert_eq!(rendered, "x<code>one</code>y<code>two</code>z");
    }

    #[test]
    fn test_fence_short_input_unchanged() {
        assert_eq!(source_to_rendered("hi"), "hi");
        assert_eq!(source_to_rendered(""), "");
        assert_eq!(source_to_rendered("``````"), "``````"); // 6 chars exactly
    }

    #[test]
    fn test_fence_single_delimiter_unchanged() {
        assert_eq!(source_to_rendered("a```b"), "a```b");
        assert_eq!(source_to_rendered("text with ``` alone"), "text with ``` alone");
    }

    #[test]
    fn test_fence_unterminated_tail_stays_literal() {
        let rendered = source_to_rendered("a```one```b```tail");
        assert_eq!(rendered, "a<code>one</code>b```tail");
    }

    #[test]
    fn test_fence_empty_span() {
        let rendered = source_to_rendered("before``````after");
        assert_eq!(rendered, "before<code></code>after");
    }

    #[test]
    fn test_fence_at_edges() {
        assert_eq!(source_to_rendered("```code```"), "<code>code</code>");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Variable Expansion Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_variable_substitution() {
        let rendered = source_to_rendered("x = $[[count]];");
        assert_eq!(rendered, "x = <input class=\"note-variable\" value=\"count\">;");
    }

    #[test]
    fn test_variable_multiple() {
        let rendered = source_to_rendered("$[[a]] and $[[b]]");
        assert_eq!(
            rendered,
            "<input class=\"note-variable\" value=\"a\"> and \
             <input class=\"note-variable\" value=\"b\">"
        );
    }

    #[test]
    fn test_variable_unterminated_is_literal() {
        assert_eq!(source_to_rendered("broken $[[name here"), "broken $[[name here");
    }

    #[test]
    fn test_variable_empty_name() {
        let rendered = source_to_rendered("mark: $[[]] end");
        assert_eq!(rendered, "mark: <input class=\"note-variable\" value=\"\"> end");
    }

    #[test]
    fn test_scan_variable_spans_offsets() {
        let spans = scan_variable_spans("ab $[[x]] cd");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].kind, MarkerKind::Variable);
        assert_eq!(spans[0].start_in_source, 3);
        assert_eq!(spans[0].end_in_source, 9);
        assert_eq!(spans[0].payload, "x");
    }

    #[test]
    fn test_scan_stops_at_unterminated_open() {
        let spans = scan_variable_spans("$[[ok]] then $[[broken");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].payload, "ok");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Collapse Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_collapse_code_tags() {
        assert_eq!(rendered_to_source("a<code>CODE</code>b"), "a```CODE```b");
    }

    #[test]
    fn test_collapse_input_uses_current_value() {
        // The user renamed the variable through the inline input
        let rendered = "x = <input class=\"note-variable\" value=\"renamed\">;";
        assert_eq!(rendered_to_source(rendered), "x = $[[renamed]];");
    }

    #[test]
    fn test_collapse_foreign_input_stays_literal() {
        let rendered = "a <input type=\"checkbox\"> b";
        assert_eq!(rendered_to_source(rendered), rendered);
    }

    #[test]
    fn test_collapse_foreign_input_with_value_stays_literal() {
        // A sanitizer-allowed input that has a value but not our class
        let rendered = "pick <input type=\"radio\" value=\"on\"> one";
        assert_eq!(rendered_to_source(rendered), rendered);
    }

    #[test]
    fn test_collapse_malformed_input_stays_literal() {
        let rendered = "a <input class=\"note-variable\" value=\"x\"";
        assert_eq!(rendered_to_source(rendered), rendered);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Round-Trip Law
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_round_trip_well_formed() {
        let sources = [
            "plain text only",
            "a```CODE```b",
            "x = $[[count]];",
            "run ```ls -la``` as $[[user]] on $[[host]]",
            "```first``` middle ```second```",
            "unicode 世界 ```på``` 🎉 $[[navn]]",
            "",
        ];

        for source in sources {
            let rendered = source_to_rendered(source);
            assert_eq!(
                rendered_to_source(&rendered),
                source,
                "Round trip failed for: {}",
                source
            );
        }
    }

    #[test]
    fn test_round_trip_variable_inside_fence() {
        let source = "a```let x = $[[n]];```b";
        assert_eq!(rendered_to_source(&source_to_rendered(source)), source);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Malformed Input Never Panics
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_malformed_inputs_are_total() {
        let inputs = [
            "```unclosed fence body",
            "$[[unclosed variable",
            "]]stray close",
            "$[[a]]$[[",
            "``` ``` ```",
            "<code>no close",
            "</code>only close",
            "<input with no end",
        ];

        for input in inputs {
            // Both directions must succeed on anything
            let _ = source_to_rendered(input);
            let _ = rendered_to_source(input);
        }
    }
}
