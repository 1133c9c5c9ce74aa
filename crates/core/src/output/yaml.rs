//! YAML output formatter

use crate::models::OutlineMap;
use crate::output::FormatError;

/// Format outline data as YAML
pub fn format_yaml(data: &OutlineMap) -> Result<String, FormatError> {
    serde_yaml::to_string(data).map_err(FormatError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::fixtures;

    #[test]
    fn test_format_yaml() {
        let yaml = format_yaml(&fixtures::outline_map()).unwrap();
        assert!(yaml.contains("root:"));
        assert!(yaml.contains("entries:"));
        assert!(yaml.contains("Shop Talk"));
    }
}
