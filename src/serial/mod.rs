//! Persisted serial counters
//!
//! A serial counter is a non-negative integer embedded in file names through
//! `{serial}`. Each [`SerialScope`] owns an independent counter:
//!
//! - [`SerialScope::Output`] numbers the render output and compositor file
//!   output paths rewritten when a render starts
//! - [`SerialScope::Project`] numbers autosaved images of one project
//! - [`SerialScope::Global`] numbers autosaved images when the global file
//!   name or location override is active
//!
//! Counters only move forward through [`SerialAllocator::commit`] or
//! [`SerialAllocator::consume_if_used`], and only when `{serial}` was actually
//! consumed by a path during the cycle. However many paths used a scope, the
//! scope advances by exactly one.
//!
//! The directory-scan serial used by the "project name + serial" naming mode
//! is unrelated to these counters; see [`crate::probe`].

mod state;
mod store;

pub use state::{GlobalState, ProjectState, StateLock};
pub use store::{MemorySerialStore, RoutedStore, SerialStore};

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use tracing::{info, warn};

use crate::constants::{SERIAL_TOKEN, SERIAL_WIDTH};
use crate::core::AutosaveError;

/// Format a serial as a zero-padded decimal of at least four digits.
///
/// Values above 9999 widen instead of wrapping: `7 -> "0007"`, `12345 -> "12345"`.
#[must_use]
pub fn format_serial(serial: u64) -> String {
    format!("{serial:0width$}", width = SERIAL_WIDTH)
}

/// Which counter a path is numbered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SerialScope {
    Output,
    Project,
    Global,
}

impl SerialScope {
    /// Key under which the store persists this counter.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            SerialScope::Output => "output_file_serial",
            SerialScope::Project => "file_serial",
            SerialScope::Global => "file_serial_global",
        }
    }

    /// Scope used for autosaved images, depending on the global override.
    #[must_use]
    pub const fn for_autosave(global_override: bool) -> Self {
        if global_override {
            SerialScope::Global
        } else {
            SerialScope::Project
        }
    }
}

impl fmt::Display for SerialScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SerialScope::Output => write!(f, "output"),
            SerialScope::Project => write!(f, "project"),
            SerialScope::Global => write!(f, "global"),
        }
    }
}

impl FromStr for SerialScope {
    type Err = AutosaveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "output" => Ok(SerialScope::Output),
            "project" => Ok(SerialScope::Project),
            "global" => Ok(SerialScope::Global),
            _ => Err(AutosaveError::Other {
                message: format!("Unknown serial scope '{s}' (expected output, project or global)"),
            }),
        }
    }
}

/// Scopes whose serial was consumed during one render cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SerialUsage {
    used: BTreeSet<SerialScope>,
}

impl SerialUsage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `scope` was consumed.
    pub fn mark(&mut self, scope: SerialScope) {
        self.used.insert(scope);
    }

    /// If `template` contains `{serial}`, mark `scope` as used and return the
    /// current value to substitute; otherwise leave usage untouched.
    pub fn claim<S: SerialStore>(
        &mut self,
        template: &str,
        scope: SerialScope,
        allocator: &SerialAllocator<S>,
    ) -> Option<u64> {
        if !template.contains(SERIAL_TOKEN) {
            return None;
        }
        self.mark(scope);
        Some(allocator.read(scope))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }

    pub fn scopes(&self) -> impl Iterator<Item = SerialScope> + '_ {
        self.used.iter().copied()
    }
}

/// Reads and advances serial counters kept in a [`SerialStore`].
#[derive(Debug)]
pub struct SerialAllocator<S> {
    store: S,
}

impl<S: SerialStore> SerialAllocator<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
        }
    }

    /// Current value; uninitialised counters read as zero.
    pub fn read(&self, scope: SerialScope) -> u64 {
        self.store.get(scope.key()).unwrap_or(0)
    }

    /// Overwrite a counter, e.g. after a manual edit.
    pub fn set(&mut self, scope: SerialScope, value: u64) {
        self.store.set(scope.key(), value);
    }

    /// Advance `scope` by one if `used`; returns whether it advanced.
    ///
    /// Counters saturate at `u64::MAX` rather than wrapping.
    pub fn consume_if_used(&mut self, scope: SerialScope, used: bool) -> bool {
        if !used {
            return false;
        }
        let current = self.read(scope);
        let Some(next) = current.checked_add(1) else {
            warn!("The {} serial is at its maximum ({}) and will not advance", scope, current);
            return false;
        };
        self.store.set(scope.key(), next);
        info!("Advanced {} serial to {}", scope, format_serial(next));
        true
    }

    /// Advance every scope recorded in `usage` exactly once.
    pub fn commit(&mut self, usage: &SerialUsage) {
        for scope in usage.scopes() {
            self.consume_if_used(scope, true);
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}
