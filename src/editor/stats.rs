//! Text statistics for the current document
//!
//! Single-pass counting of words, characters, rows, and paragraphs over
//! whichever syntax the document currently holds. Hosts use this for a
//! status line; nothing in the engine depends on it.

use super::count_lines;

// ─────────────────────────────────────────────────────────────────────────────
// TextStats
// ─────────────────────────────────────────────────────────────────────────────

/// Text statistics for a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextStats {
    /// Words: maximal runs of non-whitespace characters
    pub words: usize,
    /// Characters including whitespace
    pub characters: usize,
    /// Characters excluding whitespace
    pub characters_no_spaces: usize,
    /// Rows, counting empty ones
    pub lines: usize,
    /// Non-empty text blocks separated by blank lines
    pub paragraphs: usize,
}

impl TextStats {
    /// Calculate all statistics from the given text in one pass.
    pub fn from_text(text: &str) -> Self {
        let mut stats = Self {
            lines: count_lines(text),
            ..Self::default()
        };
        if text.is_empty() {
            return stats;
        }

        let mut in_word = false;
        let mut in_paragraph = false;
        let mut blank_run = 0;

        for ch in text.chars() {
            stats.characters += 1;

            if ch.is_whitespace() {
                in_word = false;
                if ch == '\n' {
                    blank_run += 1;
                    // A blank line ends the current paragraph
                    if blank_run >= 2 {
                        in_paragraph = false;
                    }
                }
            } else {
                stats.characters_no_spaces += 1;
                blank_run = 0;
                if !in_word {
                    in_word = true;
                    stats.words += 1;
                }
                if !in_paragraph {
                    in_paragraph = true;
                    stats.paragraphs += 1;
                }
            }
        }

        stats
    }

    /// A compact one-line summary, e.g. `"150 words | 892 chars | 25 lines"`.
    pub fn summary(&self) -> String {
        format!(
            "{} words | {} chars | {} lines",
            self.words, self.characters, self.lines
        )
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_empty_text() {
        let stats = TextStats::from_text("");
        assert_eq!(stats.words, 0);
        assert_eq!(stats.characters, 0);
        assert_eq!(stats.lines, 1);
        assert_eq!(stats.paragraphs, 0);
    }

    #[test]
    fn test_stats_simple_sentence() {
        let stats = TextStats::from_text("Hello, World!");
        assert_eq!(stats.words, 2);
        assert_eq!(stats.characters, 13);
        assert_eq!(stats.characters_no_spaces, 12);
        assert_eq!(stats.lines, 1);
        assert_eq!(stats.paragraphs, 1);
    }

    #[test]
    fn test_stats_multiple_lines_one_paragraph() {
        let stats = TextStats::from_text("Line one\nLine two\nLine three");
        assert_eq!(stats.words, 6);
        assert_eq!(stats.lines, 3);
        assert_eq!(stats.paragraphs, 1);
    }

    #[test]
    fn test_stats_blank_line_splits_paragraphs() {
        let stats = TextStats::from_text("First paragraph.\n\nSecond paragraph.");
        assert_eq!(stats.words, 4);
        assert_eq!(stats.paragraphs, 2);
    }

    #[test]
    fn test_stats_only_whitespace() {
        let stats = TextStats::from_text("   \n\n   ");
        assert_eq!(stats.words, 0);
        assert_eq!(stats.characters, 8);
        assert_eq!(stats.characters_no_spaces, 0);
        assert_eq!(stats.paragraphs, 0);
    }

    #[test]
    fn test_stats_unicode_words() {
        let stats = TextStats::from_text("Привет мир! 你好世界");
        assert_eq!(stats.words, 3);
        assert_eq!(stats.characters, 16);
        assert_eq!(stats.characters_no_spaces, 14);
    }

    #[test]
    fn test_stats_mixed_whitespace() {
        let stats = TextStats::from_text("word1  word2\t\tword3");
        assert_eq!(stats.words, 3);
    }

    #[test]
    fn test_stats_source_syntax_document() {
        let source = "Heading\n\nSome prose with a $[[variable]].\n\n```\nlet x = 1;\n```";
        let stats = TextStats::from_text(source);
        assert_eq!(stats.paragraphs, 3);
        assert_eq!(stats.lines, 7);
    }

    #[test]
    fn test_stats_summary() {
        let stats = TextStats {
            words: 150,
            characters: 892,
            characters_no_spaces: 743,
            lines: 25,
            paragraphs: 5,
        };
        assert_eq!(stats.summary(), "150 words | 892 chars | 25 lines");
    }
}
