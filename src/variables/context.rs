//! Resolution context: the values available to one substitution call.

use chrono::{DateTime, Local};

use crate::scene::SceneSnapshot;
use crate::utils::{host_name, platform_name};

/// Values that are never read from ambient state and must be passed in.
///
/// The render time only exists once a render has finished, and the serial
/// depends on which counter the caller is numbering with.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ResolveOptions {
    /// Elapsed render time in seconds
    pub render_time: Option<f64>,
    /// Serial number to embed
    pub serial: Option<u64>,
}

impl ResolveOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the elapsed render time. Negative or non-finite values count as absent.
    #[must_use]
    pub fn with_render_time(mut self, seconds: f64) -> Self {
        self.render_time = (seconds.is_finite() && seconds >= 0.0).then_some(seconds);
        self
    }

    #[must_use]
    pub fn with_serial(mut self, serial: u64) -> Self {
        self.serial = Some(serial);
        self
    }

    /// Build from the host's `-1 means unavailable` convention.
    #[must_use]
    pub fn from_sentinels(render_time: f64, serial: i64) -> Self {
        let options = Self::new().with_render_time(render_time);
        match u64::try_from(serial) {
            Ok(serial) => options.with_serial(serial),
            Err(_) => options,
        }
    }
}

/// Snapshot of every value a template may reference, built once per call.
///
/// The timestamp is captured when the context is built so `{date}`, `{time}`
/// and their components always agree within one expansion.
#[derive(Debug, Clone)]
pub struct ResolutionContext<'a> {
    pub scene: &'a SceneSnapshot,
    pub now: DateTime<Local>,
    pub host: String,
    pub platform: String,
    pub render_time: Option<f64>,
    pub serial: Option<u64>,
}

impl<'a> ResolutionContext<'a> {
    /// Build a context at the current wall-clock time.
    #[must_use]
    pub fn new(scene: &'a SceneSnapshot, options: ResolveOptions) -> Self {
        Self::at(scene, options, Local::now())
    }

    /// Build a context at a fixed instant.
    #[must_use]
    pub fn at(scene: &'a SceneSnapshot, options: ResolveOptions, now: DateTime<Local>) -> Self {
        let host = scene.host.clone().unwrap_or_else(host_name);
        Self {
            scene,
            now,
            host,
            platform: platform_name(),
            render_time: options.render_time,
            serial: options.serial,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinels_map_to_absent() {
        let options = ResolveOptions::from_sentinels(-1.0, -1);
        assert_eq!(options.render_time, None);
        assert_eq!(options.serial, None);

        let options = ResolveOptions::from_sentinels(0.0, 0);
        assert_eq!(options.render_time, Some(0.0));
        assert_eq!(options.serial, Some(0));
    }

    #[test]
    fn test_nan_render_time_is_absent() {
        assert_eq!(ResolveOptions::new().with_render_time(f64::NAN).render_time, None);
    }

    #[test]
    fn test_host_override() {
        let scene = SceneSnapshot {
            host: Some("farm-07".to_string()),
            ..SceneSnapshot::default()
        };
        let ctx = ResolutionContext::new(&scene, ResolveOptions::new());
        assert_eq!(ctx.host, "farm-07");
    }
}
