//! Cross-platform utilities
//!
//! - [`fs`] - directory creation, atomic writes, TOML state files
//! - [`platform`] - host name, platform string and path resolution

pub mod fs;
pub mod platform;

pub use fs::{atomic_write, ensure_dir, write_toml_file};
pub use platform::{
    expand_env, get_home_dir, host_name, platform_name, resolve_location, resolve_path,
};

/// Format a float the way file names have always shown it: at least one
/// decimal (`3.0`), otherwise the shortest exact representation (`0.0123`).
#[must_use]
pub fn format_decimal(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}
