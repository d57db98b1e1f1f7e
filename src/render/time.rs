//! Render time formatting, remaining-time estimates and the external log.
//!
//! Readable times use `H:MM:SS.cc` with unbounded hours; a project that has
//! rendered for three days reads `72:00:00.00`, never rolling into days.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::constants::{LOG_TITLE, PROJECT_TOKEN};
use crate::core::AutosaveError;
use crate::utils::format_decimal;
use crate::utils::fs::atomic_write;

/// Round to two decimals, the precision render times are tracked at.
#[must_use]
pub fn round_hundredths(seconds: f64) -> f64 {
    (seconds * 100.0).round() / 100.0
}

fn split_centiseconds(seconds: f64) -> (u64, u64, u64, u64) {
    // Negative or NaN input collapses to zero
    let total = (seconds.max(0.0) * 100.0).round() as u64;
    let centis = total % 100;
    let whole = total / 100;
    (whole / 3600, (whole / 60) % 60, whole % 60, centis)
}

/// Format seconds as `H:MM:SS.cc`.
#[must_use]
pub fn seconds_to_readable(seconds: f64) -> String {
    let (hours, minutes, secs, centis) = split_centiseconds(seconds);
    format!("{hours}:{minutes:02}:{secs:02}.{centis:02}")
}

/// Parse `H:MM:SS.cc` (seconds may carry any number of decimals).
pub fn readable_to_seconds(readable: &str) -> Result<f64, AutosaveError> {
    let invalid = || AutosaveError::InvalidRenderTime {
        value: readable.to_string(),
    };

    let mut parts = readable.trim().split(':');
    let (Some(hours), Some(minutes), Some(seconds), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid());
    };

    let hours: u64 = hours.trim().parse().map_err(|_| invalid())?;
    let minutes: u64 = minutes.trim().parse().map_err(|_| invalid())?;
    let seconds: f64 = seconds.trim().parse().map_err(|_| invalid())?;
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(invalid());
    }

    let whole = hours
        .checked_mul(3600)
        .and_then(|h| minutes.checked_mul(60).and_then(|m| h.checked_add(m)))
        .ok_or_else(invalid)?;
    Ok(whole as f64 + seconds)
}

/// Value of `{duration}`: seconds at two decimals with a trailing `s`, e.g. `12.5s`.
#[must_use]
pub fn format_duration(seconds: f64) -> String {
    format!("{}s", format_decimal(round_hundredths(seconds)))
}

/// Value of `{rtime}`: `H-MM-SS`, safe for file names.
#[must_use]
pub fn format_rtime(seconds: f64) -> String {
    let (hours, minutes, secs, _) = split_centiseconds(seconds.floor());
    format!("{hours}-{minutes:02}-{secs:02}")
}

/// Estimate the time left in an animation render.
///
/// Averages the elapsed time over the frames completed since `start_frame`
/// (inclusive of `current_frame`) and multiplies by the frames still to go.
/// Returns `None` on the last frame or when the frame range is inconsistent.
#[must_use]
pub fn estimate_remaining(
    elapsed: f64,
    start_frame: i64,
    current_frame: i64,
    end_frame: i64,
) -> Option<f64> {
    if current_frame >= end_frame || current_frame < start_frame {
        return None;
    }
    let completed = (current_frame - start_frame + 1) as f64;
    let remaining = (end_frame - current_frame) as f64;
    Some(elapsed / completed * remaining)
}

/// External log file holding the total time spent rendering.
///
/// The file contains a single line, `Total Render Time: H:MM:SS.cc`. Including
/// `{project}` in the log name tracks time per project; leaving it out tracks
/// time per directory.
#[derive(Debug, Clone)]
pub struct RenderTimeLog {
    path: PathBuf,
}

impl RenderTimeLog {
    /// Log located in `project_dir`, named by `name_template`.
    #[must_use]
    pub fn for_project(project_dir: &Path, name_template: &str, project_name: &str) -> Self {
        let name = name_template.replace(PROJECT_TOKEN, project_name);
        Self {
            path: project_dir.join(name),
        }
    }

    #[must_use]
    pub fn at(path: PathBuf) -> Self {
        Self {
            path,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Accumulated seconds; zero when the log does not exist yet.
    pub fn read_total(&self) -> Result<f64> {
        if !self.path.exists() {
            return Ok(0.0);
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read render time log {}", self.path.display()))?;
        let readable = content.trim().strip_prefix(LOG_TITLE.trim_end()).unwrap_or(content.trim());
        Ok(readable_to_seconds(readable)?)
    }

    /// Add `seconds` to the log and return the new total.
    pub fn add(&self, seconds: f64) -> Result<f64> {
        let total = round_hundredths(self.read_total()? + seconds.max(0.0));
        let line = format!("{LOG_TITLE}{}", seconds_to_readable(total));
        atomic_write(&self.path, line.as_bytes())
            .with_context(|| format!("Failed to write render time log {}", self.path.display()))?;
        debug!("Render time log {} now at {}", self.path.display(), line);
        Ok(total)
    }
}
