//! JSON output formatter

use crate::models::OutlineMap;
use crate::output::FormatError;

/// Format outline data as pretty-printed JSON
pub fn format_json(data: &OutlineMap) -> Result<String, FormatError> {
    serde_json::to_string_pretty(data).map_err(FormatError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::fixtures;

    #[test]
    fn test_format_json() {
        let json = format_json(&fixtures::outline_map()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["stats"]["total_sections"], 2);
        assert_eq!(value["files"][0]["entries"][1]["name"], "Shop Talk");
        assert_eq!(value["files"][0]["entries"][1]["detail"], "Dialogue block");
        assert_eq!(value["files"][0]["entries"][1]["kind"], "namespace");
    }
}
