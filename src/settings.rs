use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::dump_loader::DEFAULT_FILE_NAME;
use crate::inventory::DuplicatePolicy;

const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

fn default_conf_dir() -> PathBuf {
    PathBuf::from("Conf")
}

fn default_file_name() -> String {
    DEFAULT_FILE_NAME.to_string()
}

fn default_parallel() -> bool {
    true
}

/// Run settings, loadable from YAML and overridable from the command line
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Settings {
    /// Directory holding one configuration dump per device
    #[serde(default = "default_conf_dir")]
    pub conf_dir: PathBuf,
    /// Per-device file name in the subdirectory layout
    #[serde(default = "default_file_name")]
    pub file_name: String,
    #[serde(default)]
    pub duplicate_hostnames: DuplicatePolicy,
    /// Extract devices on the rayon thread pool
    #[serde(default = "default_parallel")]
    pub parallel: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
    #[serde(default)]
    pub output: OutputSettings,
}

/// Where reports are written; stdout always gets the text summary
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct OutputSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dot: Option<PathBuf>,
    /// Copy of the stdout summary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<PathBuf>,
}

impl OutputSettings {
    /// Configured output paths with their format names
    pub fn paths(&self) -> Vec<(&'static str, &PathBuf)> {
        [("json", &self.json), ("dot", &self.dot), ("text", &self.text)]
            .into_iter()
            .filter_map(|(name, path)| path.as_ref().map(|p| (name, p)))
            .collect()
    }
}

impl Settings {
    /// Validate the settings
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.conf_dir.as_os_str().is_empty() {
            return Err(ValidationError::InvalidInput(
                "conf_dir cannot be empty".to_string(),
            ));
        }

        if self.file_name.is_empty() {
            return Err(ValidationError::InvalidInput(
                "file_name cannot be empty".to_string(),
            ));
        }
        if self.file_name.contains('/') || self.file_name.contains('\\') {
            return Err(ValidationError::InvalidInput(format!(
                "file_name must be a bare file name, got '{}'",
                self.file_name
            )));
        }

        if let Some(level) = &self.log_level {
            if !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
                return Err(ValidationError::InvalidGeneral(format!(
                    "log_level must be one of {:?}, got '{}'",
                    LOG_LEVELS, level
                )));
            }
        }

        let outputs = self.output.paths();
        for (i, (name, path)) in outputs.iter().enumerate() {
            if let Some((other, _)) = outputs[i + 1..].iter().find(|(_, p)| p == path) {
                return Err(ValidationError::InvalidOutput(format!(
                    "{} and {} outputs both point to {}",
                    name,
                    other,
                    path.display()
                )));
            }
        }

        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            conf_dir: default_conf_dir(),
            file_name: default_file_name(),
            duplicate_hostnames: DuplicatePolicy::default(),
            parallel: default_parallel(),
            log_level: None,
            output: OutputSettings::default(),
        }
    }
}

/// Settings validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid input settings: {0}")]
    InvalidInput(String),
    #[error("Invalid general settings: {0}")]
    InvalidGeneral(String),
    #[error("Invalid output settings: {0}")]
    InvalidOutput(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_parsing() {
        let yaml = r#"
conf_dir: "lab/Conf"
file_name: "running-config.txt"
duplicate_hostnames: keep_first
parallel: false
log_level: debug
output:
  json: "out/topology.json"
  dot: "out/topology.dot"
  text: "out/summary.txt"
"#;

        let settings: Settings = serde_yaml::from_str(yaml).unwrap();
        assert!(settings.validate().is_ok());

        assert_eq!(settings.conf_dir, PathBuf::from("lab/Conf"));
        assert_eq!(settings.file_name, "running-config.txt");
        assert_eq!(settings.duplicate_hostnames, DuplicatePolicy::KeepFirst);
        assert!(!settings.parallel);
        assert_eq!(settings.output.dot, Some(PathBuf::from("out/topology.dot")));
        assert_eq!(settings.output.text, Some(PathBuf::from("out/summary.txt")));
    }

    #[test]
    fn test_empty_settings_use_defaults() {
        let settings: Settings = serde_yaml::from_str("{}").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.conf_dir, PathBuf::from("Conf"));
        assert_eq!(settings.file_name, "config.dump");
        assert_eq!(settings.duplicate_hostnames, DuplicatePolicy::Reject);
        assert!(settings.parallel);
    }

    #[test]
    fn test_validation_errors() {
        let mut settings = Settings::default();
        settings.file_name = "sub/config.dump".to_string();
        assert!(matches!(settings.validate(), Err(ValidationError::InvalidInput(_))));

        let mut settings = Settings::default();
        settings.log_level = Some("loud".to_string());
        assert!(matches!(settings.validate(), Err(ValidationError::InvalidGeneral(_))));

        let mut settings = Settings::default();
        settings.output.json = Some(PathBuf::from("same"));
        settings.output.dot = Some(PathBuf::from("same"));
        assert!(matches!(settings.validate(), Err(ValidationError::InvalidOutput(_))));

        let mut settings = Settings::default();
        settings.output.dot = Some(PathBuf::from("topology.dot"));
        settings.output.text = Some(PathBuf::from("topology.dot"));
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("dot and text outputs"));

        let mut settings = Settings::default();
        settings.conf_dir = PathBuf::new();
        assert!(settings.validate().is_err());
    }
}
