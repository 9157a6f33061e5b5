use clap::Parser;
use color_eyre::Result;
use env_logger::Env;
use log::info;
use std::path::PathBuf;

use config_topology::config_loader::{resolve_settings, CliOverrides};
use config_topology::orchestrator::{build_topology, write_outputs};
use config_topology::report::text_summary;

/// Infer network topology from router configuration dumps
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory with one configuration dump per device
    #[arg(short = 'd', long)]
    conf_dir: Option<PathBuf>,

    /// Per-device file name inside each device directory
    #[arg(short = 'f', long)]
    file_name: Option<String>,

    /// Optional YAML settings file
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Write the JSON report to this path
    #[arg(long)]
    json: Option<PathBuf>,

    /// Write a GraphViz DOT document to this path
    #[arg(long)]
    dot: Option<PathBuf>,

    /// Also write the text summary to this path
    #[arg(long)]
    text: Option<PathBuf>,

    /// Keep the first device when two configs share a hostname instead of failing
    #[arg(long)]
    keep_first: bool,

    /// Extract devices one at a time
    #[arg(long)]
    sequential: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            conf_dir: self.conf_dir.clone(),
            file_name: self.file_name.clone(),
            json: self.json.clone(),
            dot: self.dot.clone(),
            text: self.text.clone(),
            keep_first: self.keep_first,
            sequential: self.sequential,
            log_level: self.log_level.clone(),
        }
    }
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    let args = Args::parse();

    let settings = resolve_settings(args.settings.as_deref(), &args.overrides())?;

    // Initialize logging with default filter level of "info"
    let level = settings.log_level.clone().unwrap_or_else(|| "info".to_string());
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    info!("Starting config-topology");
    info!("Configuration directory: {:?}", settings.conf_dir);

    let run = build_topology(&settings)?;
    write_outputs(&run, &settings)?;

    print!("{}", text_summary(&run.inventory, &run.graph));

    info!("Done");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let args = Args::parse_from(&["config-topology", "--conf-dir", "Conf"]);

        assert_eq!(args.conf_dir, Some(PathBuf::from("Conf")));
        assert_eq!(args.settings, None);
        assert!(!args.keep_first);
    }

    #[test]
    fn test_override_args() {
        let args = Args::parse_from(&[
            "config-topology",
            "-d", "lab",
            "-f", "running.txt",
            "--json", "out.json",
            "--dot", "out.dot",
            "--text", "out.txt",
            "--keep-first",
            "--sequential",
            "--log-level", "debug",
        ]);

        let overrides = args.overrides();
        assert_eq!(overrides.file_name.as_deref(), Some("running.txt"));
        assert_eq!(overrides.json, Some(PathBuf::from("out.json")));
        assert_eq!(overrides.dot, Some(PathBuf::from("out.dot")));
        assert_eq!(overrides.text, Some(PathBuf::from("out.txt")));
        assert!(overrides.keep_first);
        assert!(overrides.sequential);
        assert_eq!(overrides.log_level.as_deref(), Some("debug"));
    }
}
