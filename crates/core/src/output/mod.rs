//! Output formatting module
//!
//! This module provides formatters for JSON, YAML, ANSI and plain summary
//! output of outlines and resolved definitions.

pub mod ansi;
mod json;
mod yaml;

pub use ansi::{format_ansi, format_definition_ansi};
pub use json::format_json;
pub use yaml::format_yaml;

use crate::models::{Definition, OutlineMap};
use thiserror::Error;

/// Output format errors
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML serialization error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Available output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// JSON format
    #[default]
    Json,
    /// YAML format
    Yaml,
    /// ANSI colored text
    Ansi,
    /// Plain text summary
    Summary,
}

/// Format outline data in the specified format
pub fn format_output(data: &OutlineMap, format: OutputFormat) -> Result<String, FormatError> {
    match format {
        OutputFormat::Json => format_json(data),
        OutputFormat::Yaml => format_yaml(data),
        OutputFormat::Ansi => Ok(format_ansi(data)),
        OutputFormat::Summary => Ok(format_summary(data)),
    }
}

/// Format a resolved definition in the specified format
pub fn format_definition(
    definition: &Definition,
    format: OutputFormat,
) -> Result<String, FormatError> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(definition).map_err(FormatError::from),
        OutputFormat::Yaml => serde_yaml::to_string(definition).map_err(FormatError::from),
        OutputFormat::Ansi => Ok(format_definition_ansi(definition)),
        OutputFormat::Summary => Ok(format!(
            "{}:{}:{} {} ({} match for '{}')",
            definition.path.display(),
            definition.target.line,
            definition.target.character,
            definition.section,
            definition.match_kind.label(),
            definition.token
        )),
    }
}

/// Format as plain text summary
fn format_summary(data: &OutlineMap) -> String {
    let mut output = String::new();

    output.push_str("Dialogue Scan Results\n");
    output.push_str("=====================\n\n");
    output.push_str(&format!("Root: {}\n", data.root.display()));
    output.push_str(&format!("Total Files: {}\n", data.stats.total_files));
    output.push_str(&format!("Total Lines: {}\n", data.stats.total_lines));
    output.push_str(&format!("Total Sections: {}\n", data.stats.total_sections));

    if data.stats.untitled_sections > 0 {
        output.push_str(&format!(
            "Untitled Sections: {}\n",
            data.stats.untitled_sections
        ));
    }
    if data.stats.files_without_sections > 0 {
        output.push_str(&format!(
            "Files without sections: {}\n",
            data.stats.files_without_sections
        ));
    }

    for file in &data.files {
        output.push_str(&format!("\n{}\n", file.path.display()));
        for entry in &file.entries {
            output.push_str(&format!(
                "  {} ({}:{})\n",
                entry.name, entry.start_line, entry.end_line
            ));
        }
    }

    output.push_str(&format!(
        "\nScan Duration: {}ms\n",
        data.metadata.scan_duration_ms
    ));
    output.push_str(&format!(
        "Processing Speed: {:.2} files/sec\n",
        data.metadata.files_per_second
    ));

    output
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MatchKind, Position};
    use std::path::PathBuf;

    #[test]
    fn test_format_summary() {
        let output = format_output(&fixtures::outline_map(), OutputFormat::Summary).unwrap();
        assert!(output.contains("Total Sections: 2"));
        assert!(output.contains("  Shop Talk (5:9)"));
        assert!(!output.contains("Untitled"));
    }

    #[test]
    fn test_format_definition_summary() {
        let definition = Definition {
            path: PathBuf::from("main.dialogue"),
            token: "shop_talk".to_string(),
            section: "Shop Talk".to_string(),
            match_kind: MatchKind::Exact,
            target: Position::new(5, 0),
        };

        let output = format_definition(&definition, OutputFormat::Summary).unwrap();
        assert_eq!(
            output,
            "main.dialogue:5:0 Shop Talk (exact match for 'shop_talk')"
        );

        let json = format_definition(&definition, OutputFormat::Json).unwrap();
        assert!(json.contains("\"match_kind\": \"exact\""));
    }
}
