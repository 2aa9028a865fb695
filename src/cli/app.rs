//! Main CLI application structure

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{release_cmd, stamp};
use crate::storage::{Config, ProjectConfig, PROJECT_CONFIG_FILE};

#[derive(Parser)]
#[command(name = "release-delta")]
#[command(author, version, about = "Find chart releases that changed between deployment manifests")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the global config, then text)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a project config file
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Default environment to record
        #[arg(long, short)]
        env: Option<String>,
    },

    /// Show releases in FROM that changed relative to TO
    Delta(release_cmd::DeltaArgs),

    /// Show the releases a manifest produces
    Show(release_cmd::ShowArgs),

    /// Append a suffix to a chart's version
    Stamp {
        /// Chart directory containing the metadata file
        chart_dir: PathBuf,

        /// Suffix to append, e.g. a commit hash
        suffix: String,
    },
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load()?;
    let format = cli.format.unwrap_or_else(|| config.global.default_format.into());
    let output = Output::new(format, cli.verbose);

    output.verbose("release-delta starting");
    if let Some(root) = &config.project_root {
        output.verbose(&format!("Using project config at: {}", root.display()));
    }

    match cli.command {
        Commands::Init { path, env } => init(&output, path, env)?,
        Commands::Delta(args) => release_cmd::delta(&output, &config, &args)?,
        Commands::Show(args) => release_cmd::show(&output, &config, &args)?,
        Commands::Stamp { chart_dir, suffix } => stamp::run(&output, &config, &chart_dir, &suffix)?,
    }

    output.verbose("Command completed successfully");
    Ok(())
}

/// Sets up env_logger: warn by default, debug with --verbose, RUST_LOG wins
fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };

    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .try_init();
}

/// Writes `release-delta.toml` unless one already exists
fn init(output: &Output, path: PathBuf, env: Option<String>) -> Result<()> {
    let config_path = path.join(PROJECT_CONFIG_FILE);
    output.verbose_ctx("init", &format!("Initializing config at: {}", config_path.display()));

    if config_path.exists() {
        output.success(&format!("Config already exists at {}", config_path.display()));
        return Ok(());
    }

    std::fs::create_dir_all(&path)
        .with_context(|| format!("Failed to create directory: {}", path.display()))?;

    let config = Config {
        project: ProjectConfig {
            environment: env,
            ..ProjectConfig::default()
        },
        project_root: Some(path),
        ..Config::default()
    };
    config.save_project()?;

    output.success(&format!("Wrote {}", config_path.display()));
    Ok(())
}
