//! Command-line interface.
//!
//! ```text
//! techtree [OPTIONS] <COMMAND>
//!
//! Commands:
//!   generate  Scan sources and write the localisation files
//!   tree      Print the tree of one technology
//!   cycles    Report circular prerequisite chains
//!   stats     Print technology statistics
//!
//! Options:
//!   -v, --verbose        Debug logging
//!   -q, --quiet          Errors only, no progress indicators
//!   -c, --config <PATH>  Configuration file (default: techtree.toml)
//!       --no-progress    Disable progress indicators
//! ```
//!
//! Every command loads the configuration first. Logging goes to stderr;
//! command output goes to stdout.

mod cycles;
mod generate;
mod stats;
mod tree;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::config::GeneratorConfig;

pub use stats::StatsFormat;
pub use tree::LanguageArg;

/// Settings shared by every command, derived from the global flags.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log level used when `RUST_LOG` is not set.
    pub log_level: String,
    pub no_progress: bool,
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            ..Self::default()
        }
    }

    /// Install the global `tracing` subscriber. `RUST_LOG` wins when set.
    pub fn init_logging(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.log_level));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }

    pub fn show_progress(&self) -> bool {
        !self.no_progress
    }

    /// Load the generator configuration from `--config` or the default locations.
    pub async fn load_generator_config(&self) -> Result<GeneratorConfig> {
        GeneratorConfig::load_with_optional(self.config_path.clone()).await
    }
}

/// Stellaris technology tree generator.
#[derive(Parser)]
#[command(
    name = "techtree",
    about = "Generate technology tree localisation for Stellaris",
    version,
    long_about = "Scans the technology scripts of the base game and installed mods, links \
                  prerequisites into a graph, and writes localisation files that show every \
                  technology's follow-up tree in game."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log errors and hide progress indicators
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Path to the configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Disable progress indicators
    #[arg(long, global = true)]
    no_progress: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan sources and write the localisation files
    Generate(generate::GenerateCommand),

    /// Print the tree of one technology
    Tree(tree::TreeCommand),

    /// Report circular prerequisite chains
    Cycles(cycles::CyclesCommand),

    /// Print technology statistics
    Stats(stats::StatsCommand),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        config.init_logging();
        self.execute_with_config(config).await
    }

    /// Translate global flags into a [`CliConfig`].
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "info"
        };

        CliConfig {
            log_level: log_level.to_string(),
            no_progress: self.no_progress || self.quiet,
            config_path: self.config.clone(),
        }
    }

    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        match self.command {
            Commands::Generate(cmd) => cmd.execute(&config).await,
            Commands::Tree(cmd) => cmd.execute(&config).await,
            Commands::Cycles(cmd) => cmd.execute(&config).await,
            Commands::Stats(cmd) => cmd.execute(&config).await,
        }
    }
}
