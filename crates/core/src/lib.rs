//! mta_dialogue_core - Core library for dialogue script navigation
//!
//! This crate turns Godot Dialogue Manager scripts into a section index:
//! an outline of the `~` blocks in a document and go-to-definition for the
//! section names used after `=>`.
//!
//! # Features
//!
//! - **Section Scanning**: Every line whose first non-whitespace character is
//!   `~` opens a named section.
//! - **Flat Outlines**: Each section spans to the line before the next one, or
//!   to the end of the document.
//! - **Reference Resolution**: `=> name` resolves by exact normalized name
//!   first, then by case-insensitive prefix.
//! - **Project Scans**: Outline every `.dialogue` file under a directory.
//! - **Multiple Output Formats**: JSON, YAML, ANSI-colored terminal output and
//!   plain summaries.
//!
//! The scanning, outline and resolution functions are pure: they take text and
//! positions and never touch the filesystem.
//!
//! # Example
//!
//! ```rust
//! use mta_dialogue_core::{build_outline, locate_reference, Position};
//!
//! let script = "~ Start\nHello => Start\n~ End";
//!
//! let outline = build_outline(script);
//! assert_eq!(outline.len(), 2);
//! assert_eq!(outline[0].end_line, 1);
//!
//! let target = locate_reference(script, Position::new(1, 10));
//! assert_eq!(target, Some(Position::new(0, 0)));
//! ```

pub mod config;
pub mod document;
pub mod engine;
pub mod models;
pub mod outline;
pub mod output;
pub mod reference;
pub mod resolver;
pub mod scanner;

// Re-exports for convenience
pub use config::{ConfigError, ScanConfig, CONFIG_FILE_NAME};
pub use document::Document;
pub use engine::{find_definition, find_section, outline_file, DialogueScanner, ScanError};
pub use models::{
    Definition, FileOutline, MatchKind, OutlineEntry, OutlineMap, Position, Range, ScanMetadata,
    ScanStats, Section, SymbolKind, SECTION_DETAIL, UNTITLED_SECTION,
};
pub use outline::{build_outline, outline_sections};
pub use output::{format_definition, format_output, FormatError, OutputFormat};
pub use reference::{locate_reference, word_range_at, WordRange};
pub use resolver::{resolve, resolve_match, Resolution};
pub use scanner::{normalize_name, scan};
