//! touchtrace CLI: classify touch detections into GUI actions.
//!
//! Usage:
//!   touchtrace classify <FILES>...   Classify detection files into action lists
//!   touchtrace inspect <FILE>        Show per-stage diagnostics for one recording
//!   touchtrace config                Print the effective configuration

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use touchtrace_common::config::AppConfig;

mod commands;

#[derive(Parser)]
#[command(
    name = "touchtrace",
    about = "Reconstruct clicks, long clicks, and swipes from touch detections",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify detection files and write `<stem>.actions.json` for each
    Classify {
        /// Detection files in the detector's JSON format
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Named device profile from the config file
        #[arg(short, long)]
        profile: Option<String>,

        /// Override the minimum touch confidence
        #[arg(long)]
        min_confidence: Option<f64>,

        /// Directory for action files, named `<recording dir>.<stem>.actions.json`
        /// (defaults to `<stem>.actions.json` next to each input)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Show per-stage diagnostics and a timed action table
    Inspect {
        /// Detection file in the detector's JSON format
        path: PathBuf,

        /// Named device profile from the config file
        #[arg(short, long)]
        profile: Option<String>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration
    Config {
        /// Write the effective configuration to the config file
        #[arg(long)]
        save: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let app_config = AppConfig::load();

    let mut logging = app_config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    touchtrace_common::logging::init_logging(&logging);

    match cli.command {
        Commands::Classify {
            files,
            profile,
            min_confidence,
            output_dir,
        } => commands::classify::run(&app_config, files, profile, min_confidence, output_dir).await,
        Commands::Inspect {
            path,
            profile,
            json,
        } => commands::inspect::run(&app_config, path, profile, json),
        Commands::Config { save } => commands::config::run(&app_config, save),
    }
}
