//! Data models for dialogue script navigation
//!
//! This module defines the core data structures used throughout the dialogue tool,
//! including scanned sections, outline entries, cursor positions and the
//! aggregate results produced when scanning a project.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::scanner::normalize_name;

/// Name given to a section whose marker has no trailing text
pub const UNTITLED_SECTION: &str = "(untitled section)";

/// Label hosts show next to every outline entry
pub const SECTION_DETAIL: &str = "Dialogue block";

/// A zero-based line/character pair
///
/// `character` counts Unicode scalar values from the start of the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    /// Zero-based line index
    pub line: usize,

    /// Zero-based character offset within the line
    pub character: usize,
}

impl Position {
    pub fn new(line: usize, character: usize) -> Self {
        Self { line, character }
    }
}

/// Inclusive start/end span in a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Zero-width range at a single position
    pub fn point(at: Position) -> Self {
        Self { start: at, end: at }
    }

    /// Check whether the range covers no text
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// One named block in a dialogue document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    /// Trimmed text after the `~` marker
    pub name: String,

    /// Lookup key derived from `name`
    normalized_name: String,

    /// Zero-based line of the marker
    pub line: usize,

    /// Character offset of the marker on its line
    pub column: usize,
}

impl Section {
    /// Create a section, substituting the untitled placeholder for a blank name
    pub fn new(name: &str, line: usize, column: usize) -> Self {
        let trimmed = name.trim();
        let name = if trimmed.is_empty() {
            UNTITLED_SECTION.to_string()
        } else {
            trimmed.to_string()
        };

        Self {
            normalized_name: normalize_name(&name),
            name,
            line,
            column,
        }
    }

    pub fn normalized_name(&self) -> &str {
        &self.normalized_name
    }

    /// Position of the marker glyph
    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    pub fn is_untitled(&self) -> bool {
        self.name == UNTITLED_SECTION
    }
}

/// Symbol category reported to outline consumers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    /// Every dialogue section is a named container of lines
    Namespace,
}

impl SymbolKind {
    pub fn label(&self) -> &'static str {
        match self {
            SymbolKind::Namespace => "namespace",
        }
    }
}

/// A section together with the lines it spans
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineEntry {
    /// Display label
    pub name: String,

    /// Host-facing description of the entry kind
    pub detail: String,

    pub kind: SymbolKind,

    pub start_line: usize,
    pub start_column: usize,

    /// Last line that belongs to this section
    pub end_line: usize,

    /// Character length of `end_line`
    pub end_column: usize,
}

impl OutlineEntry {
    /// Full span from marker to the end of the block
    pub fn range(&self) -> Range {
        Range::new(
            Position::new(self.start_line, self.start_column),
            Position::new(self.end_line, self.end_column),
        )
    }

    /// Zero-width range on the marker, used when the entry is selected
    pub fn selection_range(&self) -> Range {
        Range::point(Position::new(self.start_line, self.start_column))
    }

    /// Number of lines covered by the block
    pub fn line_count(&self) -> usize {
        self.end_line.saturating_sub(self.start_line) + 1
    }

    pub fn is_untitled(&self) -> bool {
        self.name == UNTITLED_SECTION
    }
}

/// How a reference was matched to its section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// Normalized names are equal
    Exact,
    /// Lowercased section name starts with the lowercased target
    Prefix,
}

impl MatchKind {
    pub fn label(&self) -> &'static str {
        match self {
            MatchKind::Exact => "exact",
            MatchKind::Prefix => "prefix",
        }
    }
}

/// Result of resolving a name against a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    /// Document that was searched
    pub path: PathBuf,

    /// Text that was resolved
    pub token: String,

    /// Matched section name
    pub section: String,

    pub match_kind: MatchKind,

    /// Jump target (the section marker)
    pub target: Position,
}

/// Complete outline for a dialogue file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileOutline {
    /// Path relative to the scan root
    pub path: PathBuf,

    /// Absolute path to the file
    pub absolute_path: PathBuf,

    /// Total number of lines in the file
    pub total_lines: usize,

    /// Outline entries in document order
    pub entries: Vec<OutlineEntry>,
}

impl FileOutline {
    pub fn total_sections(&self) -> usize {
        self.entries.len()
    }

    pub fn untitled_sections(&self) -> usize {
        self.entries.iter().filter(|e| e.is_untitled()).count()
    }
}

/// Flat output structure for a project scan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutlineMap {
    /// Project root directory
    pub root: PathBuf,

    /// All dialogue files
    pub files: Vec<FileOutline>,

    /// Summary statistics
    pub stats: ScanStats,

    /// Scan metadata
    pub metadata: ScanMetadata,
}

impl OutlineMap {
    /// Wrap a single file outline so it can go through the same formatters
    pub fn single(outline: FileOutline) -> Self {
        let stats = ScanStats::from_files(std::slice::from_ref(&outline));
        let root = outline
            .absolute_path
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_default();

        Self {
            root,
            files: vec![outline],
            stats,
            metadata: ScanMetadata::new(Duration::ZERO, 1),
        }
    }
}

/// Summary statistics for a scan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStats {
    /// Total files scanned
    pub total_files: usize,

    /// Total lines across all files
    pub total_lines: usize,

    /// Total sections found
    pub total_sections: usize,

    /// Sections that fell back to the untitled placeholder
    pub untitled_sections: usize,

    /// Files without any section marker
    pub files_without_sections: usize,
}

impl ScanStats {
    pub fn from_files(files: &[FileOutline]) -> Self {
        Self {
            total_files: files.len(),
            total_lines: files.iter().map(|f| f.total_lines).sum(),
            total_sections: files.iter().map(|f| f.total_sections()).sum(),
            untitled_sections: files.iter().map(|f| f.untitled_sections()).sum(),
            files_without_sections: files.iter().filter(|f| f.entries.is_empty()).count(),
        }
    }
}

/// Metadata about the scan operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanMetadata {
    /// Duration of scan in milliseconds
    pub scan_duration_ms: u64,

    /// Files processed per second
    pub files_per_second: f64,

    /// ISO timestamp of scan
    pub timestamp: String,

    /// Tool version
    pub tool_version: String,
}

impl ScanMetadata {
    pub fn new(duration: Duration, file_count: usize) -> Self {
        let seconds = duration.as_secs_f64();
        Self {
            scan_duration_ms: duration.as_millis() as u64,
            files_per_second: if seconds > 0.0 {
                file_count as f64 / seconds
            } else {
                file_count as f64
            },
            timestamp: chrono::Utc::now().to_rfc3339(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_normalizes_on_construction() {
        let section = Section::new("  Some   Thing ", 3, 2);
        assert_eq!(section.name, "Some   Thing");
        assert_eq!(section.normalized_name(), "some_thing");
        assert_eq!(section.position(), Position::new(3, 2));
    }

    #[test]
    fn test_blank_section_name_uses_placeholder() {
        let section = Section::new("   ", 0, 0);
        assert_eq!(section.name, UNTITLED_SECTION);
        assert!(section.is_untitled());
        assert_eq!(section.normalized_name(), "(untitled_section)");
    }

    #[test]
    fn test_selection_range_is_zero_width() {
        let entry = OutlineEntry {
            name: "Start".to_string(),
            detail: SECTION_DETAIL.to_string(),
            kind: SymbolKind::Namespace,
            start_line: 4,
            start_column: 2,
            end_line: 9,
            end_column: 12,
        };

        assert!(entry.selection_range().is_empty());
        assert_eq!(entry.selection_range().start, Position::new(4, 2));
        assert_eq!(entry.range().end, Position::new(9, 12));
        assert_eq!(entry.line_count(), 6);
    }

    #[test]
    fn test_symbol_kind_label() {
        assert_eq!(SymbolKind::Namespace.label(), "namespace");
        assert_eq!(
            serde_json::to_string(&SymbolKind::Namespace).unwrap(),
            "\"namespace\""
        );
    }

    #[test]
    fn test_line_count_of_inverted_entry() {
        let entry = OutlineEntry {
            name: "odd".to_string(),
            detail: SECTION_DETAIL.to_string(),
            kind: SymbolKind::Namespace,
            start_line: 7,
            start_column: 0,
            end_line: 3,
            end_column: 0,
        };
        assert_eq!(entry.line_count(), 1);
    }

    #[test]
    fn test_stats_from_files() {
        let files = vec![
            FileOutline {
                path: PathBuf::from("a.dialogue"),
                absolute_path: PathBuf::from("/p/a.dialogue"),
                total_lines: 10,
                entries: vec![
                    OutlineEntry {
                        name: "Start".to_string(),
                        detail: SECTION_DETAIL.to_string(),
                        kind: SymbolKind::Namespace,
                        start_line: 0,
                        start_column: 0,
                        end_line: 4,
                        end_column: 0,
                    },
                    OutlineEntry {
                        name: UNTITLED_SECTION.to_string(),
                        detail: SECTION_DETAIL.to_string(),
                        kind: SymbolKind::Namespace,
                        start_line: 5,
                        start_column: 0,
                        end_line: 9,
                        end_column: 0,
                    },
                ],
            },
            FileOutline {
                path: PathBuf::from("b.dialogue"),
                absolute_path: PathBuf::from("/p/b.dialogue"),
                total_lines: 3,
                entries: vec![],
            },
        ];

        let stats = ScanStats::from_files(&files);
        assert_eq!(stats.total_files, 2);
        assert_eq!(stats.total_lines, 13);
        assert_eq!(stats.total_sections, 2);
        assert_eq!(stats.untitled_sections, 1);
        assert_eq!(stats.files_without_sections, 1);
    }
}
