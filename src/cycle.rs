//! One render, from the moment it starts to the autosaved image.
//!
//! The host drives the cycle in a fixed order:
//!
//! 1. [`RenderCycle::start`] expands the render output path and the compositor
//!    file output nodes, numbering them with the output serial. The host
//!    renders into the expanded paths.
//! 2. [`RenderCycle::finish`] (or [`RenderCycle::finish_after`] when the host
//!    measured the time itself) accounts the render time, works out where the
//!    autosaved image goes, advances the file serials that were used, updates
//!    the render time log, and hands back the original paths so the host can
//!    restore them.
//!
//! A cancelled render finishes exactly like a completed one.

use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::config::{AutosaveSettings, Preferences};
use crate::constants::IMAGE_EXTENSIONS;
use crate::core::AutosaveError;
use crate::render::{ImageFormat, RenderTimeLog, round_hundredths};
use crate::scene::{OutputTargets, SceneSnapshot};
use crate::serial::{
    ProjectState, RoutedStore, SerialAllocator, SerialScope, SerialStore, SerialUsage,
};
use crate::utils::{ensure_dir, expand_env, resolve_location};
use crate::variables::{ResolveOptions, VariableResolver};

/// Where and how the finished render should be saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AutosavePlan {
    /// Target directory; created before the plan is returned
    pub directory: PathBuf,
    /// File name without extension
    pub file_name: String,
    /// `directory/file_name` plus the format's extension
    pub path: PathBuf,
    pub format: ImageFormat,
}

/// Why no image is saved this cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Autosave is off for this project and not forced globally
    Disabled,
    /// The project has never been saved, so there is no place to put images
    ProjectNotSaved,
    /// "Same as scene" was chosen and the scene renders to a movie format
    NotAnImageFormat,
}

/// Outcome of [`RenderCycle::finish`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CycleReport {
    /// Seconds spent on this render, rounded to hundredths
    pub render_time: f64,
    /// Lifetime render time of the project, including this render
    pub total_render_time: f64,
    /// Output paths to put back on the scene
    pub restored: OutputTargets,
    pub autosave: Option<AutosavePlan>,
    pub skipped: Option<SkipReason>,
    /// New total in the external render time log, when enabled
    pub log_total: Option<f64>,
}

/// State carried from the start of a render to its end.
#[derive(Debug, Clone)]
pub struct RenderCycle {
    started: Instant,
    original: OutputTargets,
    resolved: OutputTargets,
}

impl RenderCycle {
    /// Expand the scene's output paths for this render.
    ///
    /// Every path that contains `{serial}` receives the current output serial;
    /// the counter then advances once, however many paths used it. Paths whose
    /// filtering is turned off in `preferences` are passed through untouched.
    pub fn start<S: SerialStore>(
        scene: &SceneSnapshot,
        preferences: &Preferences,
        allocator: &mut SerialAllocator<S>,
    ) -> Self {
        let resolver = VariableResolver::at(scene, Local::now());
        let mut usage = SerialUsage::new();
        let mut resolved = scene.outputs.clone();

        let reader: &SerialAllocator<S> = allocator;
        let mut expand = |path: &mut String| {
            let mut options = ResolveOptions::new();
            if let Some(serial) = usage.claim(path, SerialScope::Output, reader) {
                options = options.with_serial(serial);
            }
            *path = resolver.resolve(path, options);
        };

        if preferences.filter_output_file_path {
            expand(&mut resolved.render_output);
        }
        if preferences.filter_output_file_nodes {
            for node in &mut resolved.file_output_nodes {
                expand(&mut node.base_path);
                for slot in &mut node.slots {
                    expand(slot);
                }
            }
        }

        allocator.commit(&usage);
        debug!("Render output expanded to '{}'", resolved.render_output);

        Self {
            started: Instant::now(),
            original: scene.outputs.clone(),
            resolved,
        }
    }

    /// Pick up a cycle started elsewhere, e.g. by another process.
    ///
    /// `original` are the paths as the user configured them, before expansion.
    #[must_use]
    pub fn resume(original: OutputTargets) -> Self {
        Self {
            started: Instant::now(),
            resolved: original.clone(),
            original,
        }
    }

    /// Paths the host should render into.
    #[must_use]
    pub fn resolved(&self) -> &OutputTargets {
        &self.resolved
    }

    /// Paths as configured before expansion.
    #[must_use]
    pub fn original(&self) -> &OutputTargets {
        &self.original
    }

    /// Finish using the time elapsed since [`RenderCycle::start`].
    pub fn finish(
        self,
        scene: &SceneSnapshot,
        preferences: &Preferences,
        settings: &AutosaveSettings,
        project: &mut ProjectState,
        global: &mut dyn SerialStore,
    ) -> Result<CycleReport> {
        let elapsed = self.started.elapsed().as_secs_f64();
        self.finish_after(elapsed, scene, preferences, settings, project, global)
    }

    /// Finish a render that took `elapsed` seconds.
    ///
    /// Project counters and the total render time are updated in `project`;
    /// the global counter in `global`. Persisting both is up to the caller.
    pub fn finish_after(
        self,
        elapsed: f64,
        scene: &SceneSnapshot,
        preferences: &Preferences,
        settings: &AutosaveSettings,
        project: &mut ProjectState,
        global: &mut dyn SerialStore,
    ) -> Result<CycleReport> {
        let render_time = round_hundredths(elapsed.max(0.0));
        let total_render_time = project.add_render_time(render_time);
        info!("Render finished in {}s", render_time);

        let (autosave, skipped) = if !settings.enabled {
            (None, Some(SkipReason::Disabled))
        } else if !scene.is_saved() {
            warn!("Project has not been saved; skipping autosave");
            (None, Some(SkipReason::ProjectNotSaved))
        } else {
            let mut allocator = SerialAllocator::new(RoutedStore {
                project,
                global,
            });
            match plan_autosave(scene, settings, render_time, &mut allocator)? {
                Some(plan) => (Some(plan), None),
                None => (None, Some(SkipReason::NotAnImageFormat)),
            }
        };

        let log_total = if preferences.external_render_time {
            update_render_time_log(scene, preferences, render_time)?
        } else {
            None
        };

        Ok(CycleReport {
            render_time,
            total_render_time,
            restored: self.original,
            autosave,
            skipped,
            log_total,
        })
    }
}

/// Work out the autosave target and advance the serials it used.
///
/// Returns `Ok(None)` when the chosen format cannot hold a still image.
pub fn plan_autosave<S: SerialStore>(
    scene: &SceneSnapshot,
    settings: &AutosaveSettings,
    render_time: f64,
    allocator: &mut SerialAllocator<S>,
) -> Result<Option<AutosavePlan>> {
    let Some(format) = settings.format.resolve(scene.image_format) else {
        warn!("{} is not an image format; image not saved", scene.image_format);
        return Ok(None);
    };
    let Some(extension) = format.extension() else {
        return Ok(None);
    };

    let project_dir = scene.project_dir().ok_or(AutosaveError::ProjectNotSaved)?;
    let project_name = scene.project_name();
    let resolver = VariableResolver::at(scene, Local::now());
    let mut usage = SerialUsage::new();

    // One character or less means "a folder named after the project"
    let directory = if settings.location.chars().count() <= 1 {
        project_dir.join(&project_name)
    } else {
        let location = expand_env(&settings.location);
        let mut options = ResolveOptions::new().with_render_time(render_time);
        if let Some(serial) = usage.claim(&location, settings.location_scope, allocator) {
            options = options.with_serial(serial);
        }
        resolve_location(&resolver.resolve(&location, options), project_dir)
    };
    ensure_dir(&directory)?;

    let template = settings.name_mode.template(
        &settings.name_custom,
        &directory,
        &project_name,
        IMAGE_EXTENSIONS,
        render_time,
    )?;
    let mut options = ResolveOptions::new().with_render_time(render_time);
    if let Some(serial) = usage.claim(&template, settings.name_scope, allocator) {
        options = options.with_serial(serial);
    }
    let file_name = resolver.resolve(&template, options);

    allocator.commit(&usage);

    let path = directory.join(format!("{file_name}{extension}"));
    info!("Autosaving render to {}", path.display());
    Ok(Some(AutosavePlan {
        directory,
        file_name,
        path,
        format,
    }))
}

fn update_render_time_log(
    scene: &SceneSnapshot,
    preferences: &Preferences,
    render_time: f64,
) -> Result<Option<f64>> {
    let Some(project_dir) = scene.project_dir() else {
        debug!("No project directory; render time log not updated");
        return Ok(None);
    };
    let log =
        RenderTimeLog::for_project(project_dir, &preferences.external_log_name, &scene.project_name());
    let total = log
        .add(render_time)
        .with_context(|| format!("Failed to update render time log {}", log.path().display()))?;
    Ok(Some(total))
}
