use std::collections::BTreeMap;

use super::SerialScope;

/// Key-value storage for serial counters.
///
/// Implementations hold the values in memory; persistence (loading before a
/// cycle, saving after it) is up to the owner. Reads of a missing key return
/// `None` and the allocator treats that as zero.
pub trait SerialStore {
    fn get(&self, key: &str) -> Option<u64>;
    fn set(&mut self, key: &str, value: u64);
}

/// In-memory store, used by tests and by hosts that persist counters themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySerialStore {
    values: BTreeMap<String, u64>,
}

impl MemorySerialStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SerialStore for MemorySerialStore {
    fn get(&self, key: &str) -> Option<u64> {
        self.values.get(key).copied()
    }

    fn set(&mut self, key: &str, value: u64) {
        self.values.insert(key.to_string(), value);
    }
}

/// Routes the global counter to one store and every other counter to another.
///
/// Per-project counters live beside the project file while the global one is
/// shared by all projects; a render cycle sees both through a single store.
pub struct RoutedStore<'a> {
    pub project: &'a mut dyn SerialStore,
    pub global: &'a mut dyn SerialStore,
}

impl RoutedStore<'_> {
    fn is_global(key: &str) -> bool {
        key == SerialScope::Global.key()
    }
}

impl SerialStore for RoutedStore<'_> {
    fn get(&self, key: &str) -> Option<u64> {
        if Self::is_global(key) { self.global.get(key) } else { self.project.get(key) }
    }

    fn set(&mut self, key: &str, value: u64) {
        if Self::is_global(key) {
            self.global.set(key, value);
        } else {
            self.project.set(key, value);
        }
    }
}

impl<S: SerialStore + ?Sized> SerialStore for &mut S {
    fn get(&self, key: &str) -> Option<u64> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: u64) {
        (**self).set(key, value);
    }
}
