//! Reference locator
//!
//! Resolves the token under a cursor on a `=>` line to the section it jumps
//! to. Only lines containing `=>` are eligible.

use crate::document::{byte_to_char, char_to_byte, Document};
use crate::models::{Position, Section};
use crate::resolver::{resolve_match, Resolution};
use crate::scanner::scan_document;
use once_cell::sync::Lazy;
use regex::Regex;

/// Glyph sequence that marks a jump line
pub const REFERENCE_ARROW: &str = "=>";

/// Tokens may contain word characters, `.` and `-`
static REFERENCE_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\w.-]+").expect("reference word pattern is valid"));

/// A token on a single line, in character offsets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordRange {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

/// A resolved reference with the token that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference<'a> {
    pub token: WordRange,
    pub resolution: Resolution<'a>,
}

/// Find the jump target for the token under `position`
pub fn locate_reference(text: &str, position: Position) -> Option<Position> {
    let document = Document::new(text);
    let token = reference_token_at(&document, position)?;
    let sections = scan_document(&document);
    resolve_match(&token.text, &sections).map(|r| r.section.position())
}

/// Like [`locate_reference`], over sections the caller already scanned
pub fn locate_in_sections<'a>(
    document: &Document,
    sections: &'a [Section],
    position: Position,
) -> Option<Reference<'a>> {
    let token = reference_token_at(document, position)?;
    let resolution = resolve_match(&token.text, sections)?;
    Some(Reference { token, resolution })
}

/// Extract the token under `position` when its line is a reference line
pub fn reference_token_at(document: &Document, position: Position) -> Option<WordRange> {
    let line = document.line(position.line)?;
    if !line.contains(REFERENCE_ARROW) {
        return None;
    }
    word_range_at(&line, position.character)
}

/// Token touching `character`, counting a cursor right after the token as touching
pub fn word_range_at(line: &str, character: usize) -> Option<WordRange> {
    let cursor = char_to_byte(line, character);

    REFERENCE_WORD
        .find_iter(line)
        .take_while(|m| m.start() <= cursor)
        .find(|m| cursor <= m.end())
        .map(|m| WordRange {
            text: m.as_str().to_string(),
            start: byte_to_char(line, m.start()),
            end: byte_to_char(line, m.end()),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SCRIPT: &str = "~ Start\nHello => Start\n~ End";

    #[test]
    fn test_jump_to_start() {
        assert_eq!(
            locate_reference(SCRIPT, Position::new(1, 10)),
            Some(Position::new(0, 0))
        );
    }

    #[test]
    fn test_cursor_at_token_edges() {
        assert_eq!(
            locate_reference(SCRIPT, Position::new(1, 9)),
            Some(Position::new(0, 0))
        );
        assert_eq!(
            locate_reference(SCRIPT, Position::new(1, 14)),
            Some(Position::new(0, 0))
        );
    }

    #[test]
    fn test_line_without_arrow_is_rejected() {
        let text = "~ Start\nStart\n~ End";
        for character in 0..6 {
            assert_eq!(locate_reference(text, Position::new(1, character)), None);
        }
        assert_eq!(locate_reference(text, Position::new(0, 3)), None);
    }

    #[test]
    fn test_cursor_off_token() {
        assert_eq!(locate_reference(SCRIPT, Position::new(1, 7)), None);
        assert_eq!(locate_reference("~ a\n=>   \n", Position::new(1, 4)), None);
    }

    #[test]
    fn test_line_out_of_range() {
        assert_eq!(locate_reference(SCRIPT, Position::new(9, 0)), None);
    }

    #[test]
    fn test_dotted_and_hyphenated_tokens() {
        assert_eq!(
            word_range_at("=> shop.after-hours now", 7),
            Some(WordRange {
                text: "shop.after-hours".to_string(),
                start: 3,
                end: 19,
            })
        );

        let text = "~ shop.after-hours\n\n=> shop.after-hours";
        assert_eq!(
            locate_reference(text, Position::new(2, 12)),
            Some(Position::new(0, 0))
        );
    }

    #[test]
    fn test_prefix_reference() {
        let text = "  ~ Introduction\n- Go back => intro";
        assert_eq!(
            locate_reference(text, Position::new(1, 14)),
            Some(Position::new(0, 2))
        );
    }

    #[test]
    fn test_reference_to_section_after_byte_order_mark() {
        let text = "\u{FEFF}~ Start\n=> Start\n";
        assert_eq!(
            locate_reference(text, Position::new(1, 4)),
            Some(Position::new(0, 1))
        );
    }

    #[test]
    fn test_unresolved_reference() {
        assert_eq!(locate_reference("~ a\n=> nowhere", Position::new(1, 4)), None);
    }

    #[test]
    fn test_locate_in_sections_reports_token() {
        let document = Document::new("~ Foo\n~ Foo Bar\n=> foo_bar");
        let sections = scan_document(&document);
        let reference = locate_in_sections(&document, &sections, Position::new(2, 5)).unwrap();

        assert_eq!(reference.token.text, "foo_bar");
        assert_eq!(reference.resolution.section.name, "Foo Bar");
        assert_eq!(reference.resolution.section.line, 1);
    }

    #[test]
    fn test_non_ascii_token_offsets() {
        assert_eq!(
            word_range_at("ä => café", 8),
            Some(WordRange {
                text: "café".to_string(),
                start: 5,
                end: 9,
            })
        );
    }
}
