//! Inspect and edit the persisted serial counters.
//!
//! ```bash
//! autosave-render serial show --scene scene.toml
//! autosave-render serial set 120 --scene scene.toml --scope project
//! autosave-render serial reset --scope global
//! ```
//!
//! The output and project counters live next to the project file and need
//! `--scene`; the global counter lives beside the preferences.

use anyhow::{Result, bail};
use clap::{Args, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use super::common::{GlobalPaths, load_scene, project_state_path};
use crate::serial::{
    GlobalState, ProjectState, SerialAllocator, SerialScope, StateLock, format_serial,
};

#[derive(Args)]
pub struct SerialCommand {
    #[command(subcommand)]
    command: SerialSubcommands,
}

#[derive(Subcommand)]
enum SerialSubcommands {
    /// Show counter values
    Show {
        /// Scene snapshot identifying the project
        #[arg(long)]
        scene: Option<PathBuf>,

        /// Only show this counter
        #[arg(long)]
        scope: Option<SerialScope>,
    },

    /// Set a counter to a value
    Set {
        value: u64,

        #[arg(long)]
        scene: Option<PathBuf>,

        #[arg(long, default_value = "project")]
        scope: SerialScope,
    },

    /// Reset a counter to zero
    Reset {
        #[arg(long)]
        scene: Option<PathBuf>,

        #[arg(long, default_value = "project")]
        scope: SerialScope,
    },
}

impl SerialCommand {
    pub async fn execute(self, paths: &GlobalPaths) -> Result<()> {
        match self.command {
            SerialSubcommands::Show {
                scene,
                scope,
            } => show(paths, scene, scope).await,
            SerialSubcommands::Set {
                value,
                scene,
                scope,
            } => set(paths, scene, scope, value).await,
            SerialSubcommands::Reset {
                scene,
                scope,
            } => set(paths, scene, scope, 0).await,
        }
    }
}

async fn show(paths: &GlobalPaths, scene: Option<PathBuf>, scope: Option<SerialScope>) -> Result<()> {
    let wanted = |candidate: SerialScope| scope.is_none_or(|s| s == candidate);

    match (scene.as_deref(), scope) {
        (Some(scene), scope) if scope != Some(SerialScope::Global) => {
            let state = ProjectState::load(&project_state_path(&load_scene(Some(scene))?)?)?;
            let allocator = SerialAllocator::new(state);
            for candidate in [SerialScope::Output, SerialScope::Project] {
                if wanted(candidate) {
                    print_counter(candidate, allocator.read(candidate));
                }
            }
        }
        (None, Some(scope @ (SerialScope::Output | SerialScope::Project))) => {
            bail!("--scene is required for the {scope} counter");
        }
        _ => {}
    }

    if wanted(SerialScope::Global) {
        let allocator = SerialAllocator::new(GlobalState::load(&paths.state)?);
        print_counter(SerialScope::Global, allocator.read(SerialScope::Global));
    }
    Ok(())
}

async fn set(
    paths: &GlobalPaths,
    scene: Option<PathBuf>,
    scope: SerialScope,
    value: u64,
) -> Result<()> {
    if scope == SerialScope::Global {
        let _lock = StateLock::acquire(&paths.state).await?;
        let mut allocator = SerialAllocator::new(GlobalState::load(&paths.state)?);
        allocator.set(scope, value);
        allocator.store().save(&paths.state)?;
    } else {
        let Some(scene) = scene.as_deref() else {
            bail!("--scene is required for the {scope} counter");
        };
        let state_path = project_state_path(&load_scene(Some(scene))?)?;
        let _lock = StateLock::acquire(&state_path).await?;
        let mut allocator = SerialAllocator::new(ProjectState::load(&state_path)?);
        allocator.set(scope, value);
        allocator.store().save(&state_path)?;
    }

    println!("✅ Set {} serial to {}", scope, format_serial(value).bold());
    Ok(())
}

fn print_counter(scope: SerialScope, value: u64) {
    println!("{:<8} {}", scope.to_string(), format_serial(value).green());
}
