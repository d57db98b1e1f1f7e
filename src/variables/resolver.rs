use chrono::{DateTime, Local};
use tracing::debug;

use super::{ResolutionContext, ResolveOptions, replace_variables};
use crate::scene::SceneSnapshot;

/// Expands templates against one scene snapshot.
///
/// A fresh [`ResolutionContext`] is built for every call. Pin the clock with
/// [`VariableResolver::at`] when several paths must share one timestamp.
#[derive(Debug, Clone)]
pub struct VariableResolver<'a> {
    scene: &'a SceneSnapshot,
    pinned_now: Option<DateTime<Local>>,
}

impl<'a> VariableResolver<'a> {
    #[must_use]
    pub fn new(scene: &'a SceneSnapshot) -> Self {
        Self {
            scene,
            pinned_now: None,
        }
    }

    /// Resolver whose date and time variables always read `now`.
    #[must_use]
    pub fn at(scene: &'a SceneSnapshot, now: DateTime<Local>) -> Self {
        Self {
            scene,
            pinned_now: Some(now),
        }
    }

    #[must_use]
    pub fn scene(&self) -> &'a SceneSnapshot {
        self.scene
    }

    /// Build the context for one expansion.
    #[must_use]
    pub fn context(&self, options: ResolveOptions) -> ResolutionContext<'a> {
        match self.pinned_now {
            Some(now) => ResolutionContext::at(self.scene, options, now),
            None => ResolutionContext::new(self.scene, options),
        }
    }

    /// Expand `template`. Never fails; see [`replace_variables`].
    #[must_use]
    pub fn resolve(&self, template: &str, options: ResolveOptions) -> String {
        let resolved = replace_variables(template, &self.context(options));
        if resolved != template {
            debug!("Resolved '{}' -> '{}'", template, resolved);
        }
        resolved
    }
}
