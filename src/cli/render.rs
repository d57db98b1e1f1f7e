//! Drive a render cycle from the host.
//!
//! The host calls `start` right before rendering and renders into the paths
//! it prints, then calls `finish` with the elapsed time and saves the render
//! result to the autosave path it prints. Both accept `--json` for bridge
//! scripts.
//!
//! ```bash
//! autosave-render start --scene scene.toml --json
//! autosave-render finish --scene scene.toml --render-time 93.4 --json
//! ```

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use tracing::debug;

use super::common::{GlobalPaths, load_scene, parse_render_time, project_settings, project_state_path};
use crate::config::{AutosaveSettings, ProjectSettings};
use crate::cycle::{CycleReport, RenderCycle, SkipReason};
use crate::render::seconds_to_readable;
use crate::scene::OutputTargets;
use crate::serial::{GlobalState, ProjectState, SerialAllocator, StateLock};

/// Expand output paths for a render that is about to start.
#[derive(Args)]
pub struct StartCommand {
    /// Scene snapshot describing the render
    #[arg(long)]
    scene: PathBuf,

    /// Print the expanded targets as JSON
    #[arg(long)]
    json: bool,
}

impl StartCommand {
    pub async fn execute(self, paths: &GlobalPaths) -> Result<()> {
        let preferences = paths.preferences().await?;
        let scene = load_scene(Some(&self.scene))?;
        let state_path = project_state_path(&scene)?;

        let _lock = StateLock::acquire(&state_path).await?;
        let mut allocator = SerialAllocator::new(ProjectState::load(&state_path)?);
        let cycle = RenderCycle::start(&scene, &preferences, &mut allocator);
        allocator.store().save(&state_path)?;

        print_targets(cycle.resolved(), self.json)
    }
}

/// Account a finished (or cancelled) render and plan its autosave.
#[derive(Args)]
pub struct FinishCommand {
    /// Scene snapshot with the original, unexpanded output paths
    #[arg(long)]
    scene: PathBuf,

    /// Elapsed render time, in seconds or H:MM:SS.cc
    #[arg(long)]
    render_time: String,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

impl FinishCommand {
    pub async fn execute(self, paths: &GlobalPaths) -> Result<()> {
        let preferences = paths.preferences().await?;
        let scene = load_scene(Some(&self.scene))?;
        let elapsed = parse_render_time(&self.render_time)?;
        let cycle = RenderCycle::resume(scene.outputs.clone());

        let report = if scene.is_saved() {
            let settings = AutosaveSettings::resolve(&preferences, &project_settings(&scene).await?);
            let state_path = project_state_path(&scene)?;

            // Lock order: project, then global
            let _project_lock = StateLock::acquire(&state_path).await?;
            let _global_lock = StateLock::acquire(&paths.state).await?;
            let mut project = ProjectState::load(&state_path)?;
            let mut global = GlobalState::load(&paths.state)?;

            let report =
                cycle.finish_after(elapsed, &scene, &preferences, &settings, &mut project, &mut global)?;

            project.save(&state_path)?;
            global.save(&paths.state)?;
            report
        } else {
            debug!("Unsaved project; nothing will be persisted");
            let settings = AutosaveSettings::resolve(&preferences, &ProjectSettings::default());
            cycle.finish_after(
                elapsed,
                &scene,
                &preferences,
                &settings,
                &mut ProjectState::default(),
                &mut GlobalState::default(),
            )?
        };

        print_report(&report, self.json)
    }
}

fn print_targets(targets: &OutputTargets, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(targets)?);
        return Ok(());
    }
    println!("{} {}", "Render output:".bold(), targets.render_output);
    for node in &targets.file_output_nodes {
        println!("{} {}", format!("{}:", node.name).bold(), node.base_path);
        for slot in &node.slots {
            println!("  {slot}");
        }
    }
    Ok(())
}

fn print_report(report: &CycleReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!(
        "Render time: {} (total {})",
        seconds_to_readable(report.render_time),
        seconds_to_readable(report.total_render_time)
    );
    match (&report.autosave, report.skipped) {
        (Some(plan), _) => {
            println!("✅ Autosave to: {}", plan.path.display().to_string().green());
            println!("   Format: {}", plan.format);
        }
        (None, Some(SkipReason::Disabled)) => println!("Autosave disabled for this project"),
        (None, Some(SkipReason::ProjectNotSaved)) => {
            println!("⚠️  Project not saved; no autosave");
        }
        (None, Some(SkipReason::NotAnImageFormat)) => {
            println!("⚠️  Scene output is not an image format; no autosave");
        }
        (None, None) => {}
    }
    if let Some(total) = report.log_total {
        println!("Render time log: {}", seconds_to_readable(total));
    }
    if !report.restored.render_output.is_empty() {
        println!("Restore render output to: {}", report.restored.render_output);
    }
    Ok(())
}
