//! Command-line interface for autosave-render.
//!
//! The CLI is the seam between a render host and the library: a bridge script
//! inside the host writes a scene snapshot, calls `start` before rendering and
//! `finish` afterwards, and applies the paths the commands print.
//!
//! # Commands
//!
//! - `expand` - expand a template against a scene snapshot
//! - `check` - report unknown variables in a template
//! - `variables` - list the variable vocabulary
//! - `probe` - next free serial in a directory
//! - `serial` - show, set or reset the persisted counters
//! - `start` / `finish` - drive one render cycle
//! - `render-time` - render time totals and estimates
//! - `config` - manage the preferences file
//!
//! # Global Options
//!
//! - `--verbose` / `-v` - debug logging
//! - `--quiet` / `-q` - no logging
//! - `--config <FILE>` - preferences file; the global state is kept beside it
//!
//! `RUST_LOG` takes precedence over both logging flags.

mod common;
mod config;
mod expand;
mod probe;
mod render;
mod render_time;
mod serial;


use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

pub use common::GlobalPaths;

/// Settings derived from the global flags.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Filter directive for the log subscriber; `None` disables logging
    pub log_level: Option<String>,
    /// Explicit preferences file
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the global tracing subscriber, writing to stderr.
    ///
    /// `RUST_LOG` wins over the flags. Calling this twice is harmless.
    pub fn init_logging(&self) {
        let filter = match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => match &self.log_level {
                Some(level) => EnvFilter::new(level),
                None => return,
            },
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Output-path variables and serial numbering for render hosts.
#[derive(Parser)]
#[command(
    name = "autosave-render",
    about = "Expand output path variables and number renders",
    version,
    long_about = "autosave-render expands {variables} in render output paths, keeps serial \
                  counters across renders, and works out where each finished render is autosaved."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all logging
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Preferences file (default: ~/.autosave-render/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Expand a template
    Expand(expand::ExpandCommand),

    /// Check a template for unknown variables
    Check(expand::CheckCommand),

    /// List available variables
    Variables(expand::VariablesCommand),

    /// Print the next free serial in a directory
    Probe(probe::ProbeCommand),

    /// Manage serial counters
    Serial(serial::SerialCommand),

    /// Expand output paths before a render
    Start(render::StartCommand),

    /// Finish a render and plan its autosave
    Finish(render::FinishCommand),

    /// Render time totals and estimates
    #[command(name = "render-time")]
    RenderTime(render_time::RenderTimeCommand),

    /// Manage preferences
    Config(config::ConfigCommand),
}

impl Cli {
    /// Run the parsed command.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        config.init_logging();
        self.execute_with_config(config).await
    }

    /// Map the global flags to a [`CliConfig`].
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            None
        } else {
            Some("warn".to_string())
        };

        CliConfig {
            log_level,
            config_path: self.config.clone(),
        }
    }

    /// Run with an explicit configuration; logging must already be set up.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        let paths = GlobalPaths::resolve(config.config_path.as_deref())?;

        match self.command {
            Commands::Expand(cmd) => cmd.execute().await,
            Commands::Check(cmd) => cmd.execute().await,
            Commands::Variables(cmd) => cmd.execute().await,
            Commands::Probe(cmd) => cmd.execute().await,
            Commands::Serial(cmd) => cmd.execute(&paths).await,
            Commands::Start(cmd) => cmd.execute(&paths).await,
            Commands::Finish(cmd) => cmd.execute(&paths).await,
            Commands::RenderTime(cmd) => cmd.execute(&paths).await,
            Commands::Config(cmd) => cmd.execute(&paths).await,
        }
    }
}
