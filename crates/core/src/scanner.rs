//! Section scanner
//!
//! Turns dialogue text into the ordered list of `~` section markers it
//! contains. A line is a marker line when the `~` is its first non-whitespace
//! character and at least one more character follows it.

use crate::document::{byte_to_char, Document};
use crate::models::Section;
use once_cell::sync::Lazy;
use regex::Regex;

/// Glyph that opens a section
pub const SECTION_MARKER: char = '~';

// U+FEFF (byte-order mark) is treated as whitespace around the marker
static SECTION_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\s\x{FEFF}]*~[\s\x{FEFF}]*(.+)$").expect("section pattern is valid")
});

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Scan document text into its sections, in line order
pub fn scan(text: &str) -> Vec<Section> {
    scan_document(&Document::new(text))
}

/// Scan an already split document
pub fn scan_document(document: &Document) -> Vec<Section> {
    let sections: Vec<Section> = document
        .lines()
        .enumerate()
        .filter_map(|(line, text)| parse_section_line(&text, line))
        .collect();

    tracing::trace!(
        lines = document.line_count(),
        sections = sections.len(),
        "scanned dialogue document"
    );

    sections
}

/// Parse a single line, returning a section when it carries a marker
pub fn parse_section_line(text: &str, line: usize) -> Option<Section> {
    let marker = text.find(SECTION_MARKER)?;
    let captures = SECTION_LINE.captures(text)?;
    let name = captures.get(1).map_or("", |m| m.as_str());

    Some(Section::new(name, line, byte_to_char(text, marker)))
}

/// Lookup key for a section name: whitespace runs become `_`, then trim and lowercase
pub fn normalize_name(name: &str) -> String {
    WHITESPACE_RUN
        .replace_all(name, "_")
        .trim()
        .to_lowercase()
}
