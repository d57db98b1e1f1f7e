//! Manage the user-wide preferences file.
//!
//! ```bash
//! autosave-render config init
//! autosave-render config show
//! autosave-render config path
//! ```

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;

use super::common::GlobalPaths;
use crate::config::Preferences;

#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    command: Option<ConfigSubcommands>,
}

#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Write a preferences file with the defaults
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Show the effective preferences (the default)
    Show,

    /// Print where the preferences and global state live
    Path,
}

impl ConfigCommand {
    pub async fn execute(self, paths: &GlobalPaths) -> Result<()> {
        match self.command {
            Some(ConfigSubcommands::Init {
                force,
            }) => init(paths, force).await,
            Some(ConfigSubcommands::Show) | None => show(paths).await,
            Some(ConfigSubcommands::Path) => {
                println!("{}", paths.config.display());
                println!("{}", paths.state.display());
                Ok(())
            }
        }
    }
}

async fn init(paths: &GlobalPaths, force: bool) -> Result<()> {
    if paths.config.exists() && !force {
        println!("❌ Preferences already exist at: {}", paths.config.display());
        println!("   Use --force to overwrite");
        return Ok(());
    }

    let preferences = Preferences::init_example();
    preferences.save_to(&paths.config).await?;

    println!("✅ Created preferences at: {}", paths.config.display());
    println!("\n{}", toml::to_string_pretty(&preferences)?);
    Ok(())
}

async fn show(paths: &GlobalPaths) -> Result<()> {
    let preferences = paths.preferences().await?;

    println!("{}", "Preferences".bold());
    println!("Location: {}", paths.config.display());
    if !paths.config.exists() {
        println!("{}", "(file not found, showing defaults)".dimmed());
    }
    println!("\n{}", toml::to_string_pretty(&preferences)?);
    Ok(())
}
