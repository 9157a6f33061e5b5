//! Loading of configuration dumps from disk.
//!
//! Two layouts are recognised under the configuration directory:
//!
//! - `Conf/<device>/config.dump`: one subdirectory per device, fallback
//!   hostname is the subdirectory name
//! - `Conf/<device>.cfg`: one file per device, fallback hostname is the file
//!   name up to its first `.`
//!
//! Sources are returned sorted by path so repeated runs see the same order.
//! Flat `.json` and `.dot` files are report outputs and are skipped.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use rayon::prelude::*;

use crate::extract::{extract, DeviceRecord};

/// Default per-device file name in the subdirectory layout
pub const DEFAULT_FILE_NAME: &str = "config.dump";

/// Extensions of report files this tool writes; never read back as devices
const REPORT_EXTENSIONS: [&str; 2] = ["json", "dot"];

/// Errors that can occur while loading configuration sources
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Configuration directory not found: {path}")]
    MissingDirectory { path: String },

    #[error("Configuration source unavailable: {path}: {source}")]
    MissingSource {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// One device's raw configuration text and where it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSource {
    pub path: PathBuf,
    /// Hostname used when the text has no `hostname` directive
    pub fallback_hostname: String,
    pub text: String,
}

/// Read one configuration file
pub fn read_source(path: &Path, fallback_hostname: &str) -> Result<ConfigSource, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::MissingSource {
        path: path.display().to_string(),
        source,
    })?;

    Ok(ConfigSource {
        path: path.to_path_buf(),
        fallback_hostname: fallback_hostname.to_string(),
        text,
    })
}

/// Fallback hostname for a flat file: `R1.config.dump` becomes `R1`
fn hostname_from_file_name(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    let stem = name.split('.').next()?;
    if stem.is_empty() {
        None
    } else {
        Some(stem.to_string())
    }
}

fn is_report_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| REPORT_EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known)))
}

/// Enumerate and read every configuration source under `conf_dir`.
///
/// Unreadable sources and subdirectories without `file_name` are logged and
/// skipped; only a missing `conf_dir` is an error.
pub fn discover_sources(conf_dir: &Path, file_name: &str) -> Result<Vec<ConfigSource>, LoadError> {
    info!("Loading configurations from {}", conf_dir.display());

    let entries = fs::read_dir(conf_dir).map_err(|_| LoadError::MissingDirectory {
        path: conf_dir.display().to_string(),
    })?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .collect();
    paths.sort();

    let mut sources = Vec::new();

    for path in paths {
        debug!("Processing item: {}", path.display());

        let candidate = if path.is_dir() {
            let config_path = path.join(file_name);
            let device_name = path.file_name().and_then(|n| n.to_str()).map(str::to_string);
            match device_name {
                Some(name) if config_path.is_file() => Some((config_path, name)),
                _ => {
                    warn!("Skipping {}, {} not found", path.display(), file_name);
                    None
                }
            }
        } else if path.is_file() {
            if is_report_file(&path) {
                debug!("Skipping report file {}", path.display());
                continue;
            }
            hostname_from_file_name(&path).map(|name| (path.clone(), name))
        } else {
            None
        };

        let Some((config_path, fallback)) = candidate else {
            continue;
        };

        match read_source(&config_path, &fallback) {
            Ok(source) => sources.push(source),
            Err(e) => warn!("{}", e),
        }
    }

    info!("Found {} configuration sources", sources.len());
    Ok(sources)
}

/// Extract one source, recording its path as the record's origin
pub fn extract_source(source: &ConfigSource) -> DeviceRecord {
    let mut record = extract(&source.text, &source.fallback_hostname);
    record.origin = source.path.display().to_string();
    record
}

/// Extract every source, preserving input order
pub fn extract_all(sources: &[ConfigSource], parallel: bool) -> Vec<DeviceRecord> {
    let records: Vec<DeviceRecord> = if parallel {
        sources.par_iter().map(extract_source).collect()
    } else {
        sources.iter().map(extract_source).collect()
    };

    for record in &records {
        info!("Added device: {} ({})", record.hostname, record.origin);
        if record.interfaces.is_empty() {
            warn!("{} has no interfaces; is {} a configuration dump?", record.hostname, record.origin);
        }
    }

    records
}
