//! Configuration structures for export and input selection.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AmcxError, Result};

/// Main configuration for amcx.
///
/// Only the export and input selection are configurable; the field rules
/// are fixed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AmcxConfig {
    /// Spreadsheet export configuration.
    pub export: ExportConfig,

    /// Input selection configuration.
    pub input: InputConfig,
}

/// Spreadsheet export configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Output file name prefix.
    pub file_prefix: String,

    /// Worksheet name.
    pub sheet_name: String,

    /// chrono format string for the file name timestamp.
    pub timestamp_format: String,

    /// Upper bound for auto-sized column widths (characters).
    pub max_column_width: f64,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            file_prefix: "amc_output".to_string(),
            sheet_name: "Sheet1".to_string(),
            timestamp_format: "%Y%m%d_%H%M".to_string(),
            max_column_width: 60.0,
        }
    }
}

/// Input selection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// File extensions accepted when expanding glob patterns.
    pub extensions: Vec<String>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["docx".to_string(), "pdf".to_string(), "txt".to_string()],
        }
    }
}

impl InputConfig {
    /// Check whether a path has an accepted extension.
    pub fn accepts(&self, path: &Path) -> bool {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(&ext))
    }
}

impl AmcxConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| AmcxError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| AmcxError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: AmcxConfig =
            serde_json::from_str(r#"{"export": {"file_prefix": "contracts"}}"#).unwrap();

        assert_eq!(config.export.file_prefix, "contracts");
        assert_eq!(config.export.sheet_name, "Sheet1");
        assert_eq!(config.input.extensions, vec!["docx", "pdf", "txt"]);
    }

    #[test]
    fn test_rule_settings_are_not_configurable() {
        let config: AmcxConfig = serde_json::from_str(
            r#"{"extraction": {"service_frequency": 2}, "input": {"extensions": ["docx"]}}"#,
        )
        .unwrap();
        let json = serde_json::to_value(&config).unwrap();

        assert!(json.get("extraction").is_none());
        assert_eq!(config.input.extensions, vec!["docx"]);
    }

    #[test]
    fn test_invalid_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = AmcxConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, AmcxError::Config(_)), "{:?}", err);

        let err = AmcxConfig::from_file(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, AmcxError::Io(_)), "{:?}", err);

        AmcxConfig::default().save(&path).unwrap();
        assert_eq!(AmcxConfig::from_file(&path).unwrap().export.sheet_name, "Sheet1");
    }

    #[test]
    fn test_input_accepts() {
        let input = InputConfig::default();
        assert!(input.accepts(Path::new("CC1_a.DOCX")));
        assert!(!input.accepts(Path::new("a.doc")));
        assert!(!input.accepts(Path::new("README")));
    }
}
