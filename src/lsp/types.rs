//! LSP type definitions and utilities for sassfmt
//!
//! This module contains LSP-specific types and the UTF-16 position
//! arithmetic the formatting handlers need.

use serde::{Deserialize, Serialize};
use tower_lsp::lsp_types::*;

/// Configuration for the sassfmt LSP server
///
/// Passed by the editor as `initialization_options` and under the `sassfmt`
/// section of `workspace/didChangeConfiguration`; camelCase on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SassfmtLspConfig {
    /// Path to a sassfmt configuration file; discovered when unset
    pub config_path: Option<String>,
    /// Show a popup on conversion failures in addition to the log entry
    pub show_error_messages: bool,
}

impl Default for SassfmtLspConfig {
    fn default() -> Self {
        Self {
            config_path: None,
            show_error_messages: true,
        }
    }
}

/// Range spanning the whole document, for full-document formatting edits.
pub fn full_document_range(text: &str) -> Range {
    let mut line = 0u32;
    let mut last_line_start = 0usize;
    for (i, b) in text.bytes().enumerate() {
        if b == b'\n' {
            line += 1;
            last_line_start = i + 1;
        }
    }
    let character = text[last_line_start..].chars().map(|c| c.len_utf16() as u32).sum();
    Range {
        start: Position::new(0, 0),
        end: Position::new(line, character),
    }
}

/// Byte offset of an LSP position.
///
/// LSP positions count lines and UTF-16 code units; Rust strings are UTF-8,
/// so the column needs converting before the text can be sliced. Positions
/// past the end of a line or of the document clamp, per the protocol.
pub fn offset_at(text: &str, position: Position) -> usize {
    let mut line_start = 0usize;

    if position.line > 0 {
        let mut line = 0u32;
        let mut found = false;
        for (i, b) in text.bytes().enumerate() {
            if b == b'\n' {
                line += 1;
                if line == position.line {
                    line_start = i + 1;
                    found = true;
                    break;
                }
            }
        }
        if !found {
            return text.len();
        }
    }

    let mut units = 0u32;
    for (i, ch) in text[line_start..].char_indices() {
        if ch == '\n' || units >= position.character {
            return line_start + i;
        }
        units += ch.len_utf16() as u32;
    }
    text.len()
}

/// Byte span of an LSP range, normalized so start never exceeds end.
pub fn byte_span(text: &str, range: Range) -> (usize, usize) {
    let a = offset_at(text, range.start);
    let b = offset_at(text, range.end);
    (a.min(b), a.max(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_at_ascii() {
        let text = "abc\ndef\n";
        assert_eq!(offset_at(text, Position::new(0, 0)), 0);
        assert_eq!(offset_at(text, Position::new(0, 2)), 2);
        assert_eq!(offset_at(text, Position::new(1, 0)), 4);
        assert_eq!(offset_at(text, Position::new(1, 3)), 7);
    }

    #[test]
    fn test_offset_at_clamps_past_line_end() {
        let text = "ab\ncd\n";
        // Column beyond the line stops at the newline.
        assert_eq!(offset_at(text, Position::new(0, 99)), 2);
        // Line beyond the document stops at its end.
        assert_eq!(offset_at(text, Position::new(9, 0)), text.len());
    }

    #[test]
    fn test_offset_at_counts_utf16_units() {
        // '🎨' is two UTF-16 units but four UTF-8 bytes.
        let text = "a🎨b\nc";
        assert_eq!(offset_at(text, Position::new(0, 1)), 1);
        assert_eq!(offset_at(text, Position::new(0, 3)), 5);
        assert_eq!(offset_at(text, Position::new(0, 4)), 6);
        assert_eq!(offset_at(text, Position::new(1, 0)), 7);
        assert_eq!(offset_at(text, Position::new(1, 1)), 8);
    }

    #[test]
    fn test_offset_at_last_line_without_newline() {
        let text = "ab\ncd";
        assert_eq!(offset_at(text, Position::new(1, 2)), 5);
        assert_eq!(offset_at(text, Position::new(1, 9)), 5);
    }

    #[test]
    fn test_full_document_range() {
        let range = full_document_range("a {\n  color: red;\n}\n");
        assert_eq!(range.start, Position::new(0, 0));
        // Trailing newline puts the end on a fresh empty line.
        assert_eq!(range.end, Position::new(3, 0));

        let range = full_document_range("a { }");
        assert_eq!(range.end, Position::new(0, 5));

        let range = full_document_range("");
        assert_eq!(range.end, Position::new(0, 0));
    }

    #[test]
    fn test_byte_span_selects_requested_slice() {
        let text = "a { }\nb { }\nc { }\n";
        let range = Range {
            start: Position::new(1, 0),
            end: Position::new(2, 0),
        };
        let (start, end) = byte_span(text, range);
        assert_eq!(&text[start..end], "b { }\n");
    }

    #[test]
    fn test_byte_span_normalizes_inverted_ranges() {
        let text = "abc\ndef\n";
        let range = Range {
            start: Position::new(1, 2),
            end: Position::new(0, 1),
        };
        let (start, end) = byte_span(text, range);
        assert!(start <= end);
        assert_eq!(&text[start..end], "bc\nde");
    }

    #[test]
    fn test_lsp_config_parses_camel_case() {
        let config: SassfmtLspConfig =
            serde_json::from_value(serde_json::json!({ "configPath": "/tmp/x.toml", "showErrorMessages": false }))
                .unwrap();
        assert_eq!(config.config_path.as_deref(), Some("/tmp/x.toml"));
        assert!(!config.show_error_messages);
    }

    #[test]
    fn test_lsp_config_defaults_missing_fields() {
        let config: SassfmtLspConfig = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(config.config_path, None);
        assert!(config.show_error_messages);
    }
}
