//! Outline builder
//!
//! Dialogue sections never nest, so the outline is a flat list: each block
//! runs from its marker to the line before the next marker, and the last one
//! runs to the end of the document.

use crate::document::Document;
use crate::models::{OutlineEntry, Section, SymbolKind, SECTION_DETAIL};
use crate::scanner::scan_document;

/// Build the outline for a document
pub fn build_outline(text: &str) -> Vec<OutlineEntry> {
    let document = Document::new(text);
    let sections = scan_document(&document);
    outline_sections(&document, &sections)
}

/// Build outline entries for sections already scanned from `document`
pub fn outline_sections(document: &Document, sections: &[Section]) -> Vec<OutlineEntry> {
    sections
        .iter()
        .enumerate()
        .map(|(index, section)| {
            let end_line = match sections.get(index + 1) {
                Some(next) => section.line.max(next.line.saturating_sub(1)),
                None => section.line.max(document.last_line()),
            };

            OutlineEntry {
                name: section.name.clone(),
                detail: SECTION_DETAIL.to_string(),
                kind: SymbolKind::Namespace,
                start_line: section.line,
                start_column: section.column,
                end_line,
                end_column: document.line_len(end_line),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn spans(entries: &[OutlineEntry]) -> Vec<(&str, usize, usize, usize, usize)> {
        entries
            .iter()
            .map(|e| {
                (
                    e.name.as_str(),
                    e.start_line,
                    e.start_column,
                    e.end_line,
                    e.end_column,
                )
            })
            .collect()
    }

    #[test]
    fn test_outline_spans() {
        let text = "~ Start\nHello => Start\n~ End\nNathan: Bye.";
        let entries = build_outline(text);
        assert_eq!(
            spans(&entries),
            vec![("Start", 0, 0, 1, 14), ("End", 2, 0, 3, 12)]
        );
        assert!(entries.iter().all(|e| e.detail == SECTION_DETAIL));
        assert!(entries.iter().all(|e| e.kind == SymbolKind::Namespace));
    }

    #[test]
    fn test_adjacent_markers_never_invert() {
        let entries = build_outline("~ a\n~ b\n~ c");
        assert_eq!(
            spans(&entries),
            vec![("a", 0, 0, 0, 3), ("b", 1, 0, 1, 3), ("c", 2, 0, 2, 3)]
        );
    }

    #[test]
    fn test_span_invariant() {
        let text = "intro\n  ~ one\nx\ny\n~ two\n~ three\n\n\nz\n";
        let entries = build_outline(text);

        for pair in entries.windows(2) {
            let expected = pair[0].start_line.max(pair[1].start_line - 1);
            assert_eq!(pair[0].end_line, expected);
        }
        assert!(entries.iter().all(|e| e.end_line >= e.start_line));
    }

    #[test]
    fn test_last_entry_reaches_document_end() {
        let entries = build_outline("~ only\nline\n");
        assert_eq!(spans(&entries), vec![("only", 0, 0, 2, 0)]);
    }

    #[test]
    fn test_indented_marker_start_column() {
        let entries = build_outline("    ~ deep");
        assert_eq!(spans(&entries), vec![("deep", 0, 4, 0, 10)]);
    }

    #[test]
    fn test_empty_outline() {
        assert!(build_outline("").is_empty());
        assert!(build_outline("just text\n=> somewhere").is_empty());
    }
}
