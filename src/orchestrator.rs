//! Topology orchestrator.
//!
//! This module coordinates the overall inference run, managing the flow from
//! configuration discovery through extraction, inventory assembly, inference
//! and report output.

use std::path::Path;

use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::info;

use crate::dump_loader::{discover_sources, extract_all};
use crate::inventory::DeviceInventory;
use crate::report::{build_report, write_dot, write_json_report, write_text_report};
use crate::settings::Settings;
use crate::topology::{infer, TopologyGraph};

/// The results of one inference run
#[derive(Debug, Clone)]
pub struct TopologyRun {
    pub inventory: DeviceInventory,
    pub graph: TopologyGraph,
}

/// Load every configuration under the configured directory and infer the topology
pub fn build_topology(settings: &Settings) -> Result<TopologyRun> {
    let sources = discover_sources(&settings.conf_dir, &settings.file_name)
        .wrap_err("Failed to discover configuration sources")?;

    if sources.is_empty() {
        log::warn!("No configuration sources found in {}", settings.conf_dir.display());
    }

    let records = extract_all(&sources, settings.parallel);

    let inventory = DeviceInventory::from_records(records, settings.duplicate_hostnames)
        .wrap_err("Failed to assemble device inventory")?;

    info!("Discovering links based on shared subnets...");
    let graph = infer(&inventory);
    info!("Topology build complete");

    Ok(TopologyRun { inventory, graph })
}

/// Write the JSON, DOT and text outputs requested in the settings
pub fn write_outputs(run: &TopologyRun, settings: &Settings) -> Result<()> {
    if let Some(json_path) = &settings.output.json {
        ensure_parent_dir(json_path)?;
        let report = build_report(&run.inventory, &run.graph);
        write_json_report(&report, json_path)?;
    }

    if let Some(dot_path) = &settings.output.dot {
        ensure_parent_dir(dot_path)?;
        write_dot(&run.graph, dot_path)?;
    }

    if let Some(text_path) = &settings.output.text {
        ensure_parent_dir(text_path)?;
        write_text_report(&run.inventory, &run.graph, text_path)?;
    }

    Ok(())
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)
                .wrap_err_with(|| format!("Failed to create output directory '{}'", parent.display()))?;
        }
    }
    Ok(())
}
