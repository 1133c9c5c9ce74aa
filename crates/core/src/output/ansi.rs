//! ANSI colored output formatter
//!
//! This module provides colorful terminal output for outlines and definitions.

use crate::models::{Definition, FileOutline, MatchKind, OutlineEntry, OutlineMap};

// ANSI escape codes
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

const BRIGHT_CYAN: &str = "\x1b[96m";
const BRIGHT_YELLOW: &str = "\x1b[93m";
const BRIGHT_GREEN: &str = "\x1b[92m";
const BRIGHT_WHITE: &str = "\x1b[97m";
const YELLOW: &str = "\x1b[33m";

const BG_BLUE: &str = "\x1b[44m";

/// Format outline data as ANSI colored text
pub fn format_ansi(data: &OutlineMap) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "\n{}{}  Dialogue Scan Results  {}{}\n\n",
        BOLD, BG_BLUE, RESET, RESET
    ));

    output.push_str(&format!(
        "{}Root:{} {}\n\n",
        BOLD,
        RESET,
        data.root.display()
    ));

    output.push_str(&format!(
        "{}Files:{} {}  {}Lines:{} {}  {}Sections:{} {}\n\n",
        BOLD,
        RESET,
        data.stats.total_files,
        BOLD,
        RESET,
        data.stats.total_lines,
        BOLD,
        RESET,
        data.stats.total_sections
    ));

    for file in &data.files {
        output.push_str(&format_file_ansi(file));
    }

    output.push_str(&format!(
        "\n{}Scan completed in {}ms ({:.2} files/sec){}\n",
        DIM, data.metadata.scan_duration_ms, data.metadata.files_per_second, RESET
    ));

    output
}

/// Format a single file's outline
fn format_file_ansi(file: &FileOutline) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{}{}{}{} {}({} lines){}\n",
        BOLD,
        BRIGHT_WHITE,
        file.path.display(),
        RESET,
        DIM,
        file.total_lines,
        RESET
    ));

    if file.entries.is_empty() {
        output.push_str(&format!("   {}no sections{}\n", DIM, RESET));
    }

    for entry in &file.entries {
        output.push_str(&format_entry_ansi(entry));
    }

    output.push('\n');
    output
}

fn format_entry_ansi(entry: &OutlineEntry) -> String {
    let color = if entry.is_untitled() { DIM } else { BRIGHT_CYAN };

    format!(
        "   {}~{} {}{}{}{} {}:{}-{}{}\n",
        YELLOW,
        RESET,
        BOLD,
        color,
        entry.name,
        RESET,
        DIM,
        entry.start_line,
        entry.end_line,
        RESET
    )
}

/// Format a resolved definition as ANSI
pub fn format_definition_ansi(definition: &Definition) -> String {
    let kind_color = match definition.match_kind {
        MatchKind::Exact => BRIGHT_GREEN,
        MatchKind::Prefix => BRIGHT_YELLOW,
    };

    format!(
        "{}{}{} {}=>{} {}{}{}{} {}{}:{}:{}{} {}[{}]{}",
        BOLD,
        definition.token,
        RESET,
        DIM,
        RESET,
        BOLD,
        BRIGHT_CYAN,
        definition.section,
        RESET,
        DIM,
        definition.path.display(),
        definition.target.line,
        definition.target.character,
        RESET,
        kind_color,
        definition.match_kind.label(),
        RESET
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Position;
    use crate::output::fixtures;
    use std::path::PathBuf;

    #[test]
    fn test_format_ansi_basic() {
        let output = format_ansi(&fixtures::outline_map());
        assert!(output.contains("Dialogue Scan Results"));
        assert!(output.contains("main.dialogue"));
        assert!(output.contains("Shop Talk"));
        assert!(output.contains("5-9"));
    }

    #[test]
    fn test_file_without_sections() {
        let file = FileOutline {
            path: PathBuf::from("empty.dialogue"),
            absolute_path: PathBuf::from("/game/empty.dialogue"),
            total_lines: 1,
            entries: vec![],
        };
        assert!(format_file_ansi(&file).contains("no sections"));
    }

    #[test]
    fn test_format_definition_ansi() {
        let definition = Definition {
            path: PathBuf::from("intro.dialogue"),
            token: "intro".to_string(),
            section: "Introduction".to_string(),
            match_kind: MatchKind::Prefix,
            target: Position::new(0, 2),
        };

        let output = format_definition_ansi(&definition);
        assert!(output.contains("Introduction"));
        assert!(output.contains("intro.dialogue:0:2"));
        assert!(output.contains(&format!("{}[prefix]", BRIGHT_YELLOW)));
    }
}
