//! In-Memory Style Target Adapter
//!
//! Records the document root's CSS variables and classes. Used headless and
//! by tests that assert on what a profile left behind.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, RwLock};

use crate::ports::StyleTarget;

#[derive(Debug, Default)]
struct RootElement {
    properties: BTreeMap<String, String>,
    classes: BTreeSet<String>,
}

/// In-memory document root
#[derive(Debug, Clone, Default)]
pub struct InMemoryStyleTarget {
    root: Arc<RwLock<RootElement>>,
}

impl InMemoryStyleTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of a CSS variable
    pub fn property(&self, name: &str) -> Option<String> {
        self.read(|root| root.properties.get(name).cloned())
    }

    /// All CSS variables currently set
    pub fn properties(&self) -> BTreeMap<String, String> {
        self.read(|root| root.properties.clone())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.read(|root| root.classes.contains(class))
    }

    pub fn classes(&self) -> BTreeSet<String> {
        self.read(|root| root.classes.clone())
    }

    fn read<T>(&self, f: impl FnOnce(&RootElement) -> T) -> T {
        let guard = self.root.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&guard)
    }

    fn write(&self, f: impl FnOnce(&mut RootElement)) {
        let mut guard = self.root.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut guard)
    }
}

impl StyleTarget for InMemoryStyleTarget {
    fn set_property(&self, name: &str, value: &str) {
        self.write(|root| {
            root.properties.insert(name.to_string(), value.to_string());
        });
    }

    fn remove_property(&self, name: &str) {
        self.write(|root| {
            root.properties.remove(name);
        });
    }

    fn add_class(&self, class: &str) {
        self.write(|root| {
            root.classes.insert(class.to_string());
        });
    }

    fn remove_class(&self, class: &str) {
        self.write(|root| {
            root.classes.remove(class);
        });
    }
}
