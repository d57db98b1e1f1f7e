//! Render time totals and estimates.
//!
//! ```bash
//! autosave-render render-time show --scene scene.toml
//! autosave-render render-time add 95.5 --scene scene.toml
//! autosave-render render-time estimate --elapsed 120 --start 1 --current 10 --end 250
//! ```

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use super::common::{GlobalPaths, load_scene, parse_render_time, project_location};
use crate::render::{RenderTimeLog, estimate_remaining, seconds_to_readable};
use crate::serial::{ProjectState, StateLock};

#[derive(Args)]
pub struct RenderTimeCommand {
    #[command(subcommand)]
    command: RenderTimeSubcommands,
}

#[derive(Subcommand)]
enum RenderTimeSubcommands {
    /// Show the project's total and the external log
    Show {
        #[arg(long)]
        scene: PathBuf,
    },

    /// Add time to the external render time log
    Add {
        /// Seconds or H:MM:SS.cc
        time: String,

        #[arg(long)]
        scene: PathBuf,
    },

    /// Estimate the time left in an animation render
    Estimate {
        /// Seconds since the animation started
        #[arg(long)]
        elapsed: f64,

        #[arg(long)]
        start: i64,

        /// Frame that just finished
        #[arg(long)]
        current: i64,

        #[arg(long)]
        end: i64,
    },
}

impl RenderTimeCommand {
    pub async fn execute(self, paths: &GlobalPaths) -> Result<()> {
        match self.command {
            RenderTimeSubcommands::Show {
                scene,
            } => show(paths, scene).await,
            RenderTimeSubcommands::Add {
                time,
                scene,
            } => add(paths, scene, &time).await,
            RenderTimeSubcommands::Estimate {
                elapsed,
                start,
                current,
                end,
            } => {
                match estimate_remaining(elapsed, start, current, end) {
                    Some(remaining) => println!("{}", seconds_to_readable(remaining)),
                    None => println!("No frames left to estimate"),
                }
                Ok(())
            }
        }
    }
}

async fn log_for(paths: &GlobalPaths, scene: PathBuf) -> Result<(RenderTimeLog, PathBuf, String)> {
    let preferences = paths.preferences().await?;
    let scene = load_scene(Some(&scene))?;
    let (dir, name) = project_location(&scene)?;
    let log = RenderTimeLog::for_project(&dir, &preferences.external_log_name, &name);
    Ok((log, ProjectState::path_for(&dir, &name), name))
}

async fn show(paths: &GlobalPaths, scene: PathBuf) -> Result<()> {
    let (log, state_path, name) = log_for(paths, scene).await?;
    let state = ProjectState::load(&state_path)?;

    println!("{}", format!("Render time for {name}").bold());
    println!("Project total: {}", seconds_to_readable(state.total_render_time));
    if log.path().exists() {
        println!("Log total:     {} ({})", seconds_to_readable(log.read_total()?), log.path().display());
    } else {
        println!("Log total:     {}", "no log yet".dimmed());
    }
    Ok(())
}

async fn add(paths: &GlobalPaths, scene: PathBuf, time: &str) -> Result<()> {
    let seconds = parse_render_time(time)?;
    let (log, _, _) = log_for(paths, scene).await?;

    let _lock = StateLock::acquire(log.path()).await?;
    let total = log.add(seconds)?;
    println!("✅ {} now at {}", log.path().display(), seconds_to_readable(total).green());
    Ok(())
}
