use crate::inventory::DuplicatePolicy;
use crate::settings::Settings;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::info;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Load and validate run settings from a YAML file
pub fn load_settings(settings_path: &Path) -> Result<Settings> {
    info!("Loading settings from: {:?}", settings_path);

    let file = File::open(settings_path)
        .wrap_err_with(|| format!("Failed to open settings file '{}'", settings_path.display()))?;

    let settings: Settings = serde_yaml::from_reader(file)
        .wrap_err_with(|| format!("Failed to parse settings file '{}'", settings_path.display()))?;

    settings.validate()?;

    Ok(settings)
}

/// CLI arguments that take precedence over YAML settings
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub conf_dir: Option<PathBuf>,
    pub file_name: Option<String>,
    pub json: Option<PathBuf>,
    pub dot: Option<PathBuf>,
    pub text: Option<PathBuf>,
    pub keep_first: bool,
    pub sequential: bool,
    pub log_level: Option<String>,
}

/// Apply CLI overrides to loaded settings
pub fn apply_overrides(settings: &mut Settings, overrides: &CliOverrides) -> Result<()> {
    if let Some(conf_dir) = &overrides.conf_dir {
        settings.conf_dir = conf_dir.clone();
    }
    if let Some(file_name) = &overrides.file_name {
        settings.file_name = file_name.clone();
    }
    if let Some(json) = &overrides.json {
        settings.output.json = Some(json.clone());
    }
    if let Some(dot) = &overrides.dot {
        settings.output.dot = Some(dot.clone());
    }
    if let Some(text) = &overrides.text {
        settings.output.text = Some(text.clone());
    }
    if overrides.keep_first {
        settings.duplicate_hostnames = DuplicatePolicy::KeepFirst;
    }
    if overrides.sequential {
        settings.parallel = false;
    }
    if let Some(level) = &overrides.log_level {
        settings.log_level = Some(level.clone());
    }

    // Re-validate after applying overrides
    settings.validate()?;

    Ok(())
}

/// Resolve settings from an optional YAML file plus CLI overrides
pub fn resolve_settings(settings_path: Option<&Path>, overrides: &CliOverrides) -> Result<Settings> {
    let mut settings = match settings_path {
        Some(path) => load_settings(path)?,
        None => Settings::default(),
    };

    apply_overrides(&mut settings, overrides)?;
    Ok(settings)
}
