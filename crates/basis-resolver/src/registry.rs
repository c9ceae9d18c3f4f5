//! Dispatch table mapping a coord's procurer tag (`Coord::tag`) to the
//! `Extension` implementation that owns it.

use std::collections::BTreeMap;
use std::sync::Arc;

use basis_core::Extension;

/// Registered extensions, keyed by procurer tag. A `BTreeMap` keeps
/// iteration (e.g. for diagnostics) deterministic across runs.
#[derive(Clone, Default)]
pub struct ExtensionRegistry(BTreeMap<String, Arc<dyn Extension>>);

impl ExtensionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, tag: impl Into<String>, extension: Arc<dyn Extension>) {
        self.0.insert(tag.into(), extension);
    }

    pub fn get(&self, tag: &str) -> Option<Arc<dyn Extension>> {
        self.0.get(tag).cloned()
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}
