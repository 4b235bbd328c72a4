//! intersect - multi-omics sample intersection CLI
//!
//! With no arguments, intersects the TCGA-BRCA expression, methylation and
//! miRNA tables under the current directory and writes the results to
//! `results/`.

use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use omics_intersect::error::Result;
use omics_intersect::pipeline::{Pipeline, RunConfig};
use serde::Serialize;
use std::fmt::Display;
use std::path::{Path, PathBuf};

/// Output format for summaries and profiles
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ReportFormat {
    /// Human-readable text
    Text,
    /// Pretty-printed JSON
    Json,
    /// YAML
    Yaml,
}

/// Multi-omics sample intersection
#[derive(Parser)]
#[command(name = "intersect")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Intersect samples and write the ID list and subsetted tables
    Run {
        /// Path to run configuration YAML (default: built-in TCGA-BRCA layout)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Summary format
        #[arg(short, long, value_enum, default_value = "text")]
        report: ReportFormat,
    },

    /// Report how samples overlap across datasets without writing anything
    Profile {
        /// Path to run configuration YAML (default: built-in TCGA-BRCA layout)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: ReportFormat,
    },

    /// Write the built-in configuration as an editable YAML file
    Example {
        /// Output path for the example YAML
        #[arg(short, long, default_value = "intersect.yaml")]
        output: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();

    let result = match cli.command {
        None => cmd_run(None, ReportFormat::Text),
        Some(Commands::Run { config, report }) => cmd_run(config.as_deref(), report),
        Some(Commands::Profile { config, format }) => cmd_profile(config.as_deref(), format),
        Some(Commands::Example { output }) => cmd_example(&output),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<RunConfig> {
    match path {
        Some(path) => {
            log::info!("Loading run configuration from {}", path.display());
            RunConfig::from_file(path)
        }
        None => Ok(RunConfig::tcga_brca()),
    }
}

fn print_report<T: Serialize + Display>(report: &T, format: ReportFormat) -> Result<()> {
    match format {
        ReportFormat::Text => print!("{}", report),
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        ReportFormat::Yaml => print!("{}", serde_yaml::to_string(report)?),
    }
    Ok(())
}

/// Run the intersection
fn cmd_run(config_path: Option<&Path>, report: ReportFormat) -> Result<()> {
    let config = load_config(config_path)?;
    config.validate()?;

    log::info!("Running '{}' over {} datasets", config.name, config.datasets.len());
    let summary = Pipeline::from_config(&config).run()?;

    print_report(&summary, report)
}

/// Profile sample overlap
fn cmd_profile(config_path: Option<&Path>, format: ReportFormat) -> Result<()> {
    let config = load_config(config_path)?;
    config.validate()?;

    let profile = Pipeline::from_config(&config).profile()?;
    print_report(&profile, format)
}

/// Write the built-in configuration
fn cmd_example(output_path: &Path) -> Result<()> {
    let yaml = RunConfig::tcga_brca().to_yaml()?;

    std::fs::write(output_path, &yaml)?;
    eprintln!("Wrote example configuration to {:?}", output_path);
    eprintln!();
    eprintln!("Contents:");
    println!("{}", yaml);

    Ok(())
}
