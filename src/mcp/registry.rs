use crate::capability::{Definition, PromptDefinition, ResourceDefinition, ToolDefinition};
use indexmap::IndexMap;

/// Ordered, key-addressed store of definitions.
///
/// Re-registering a key replaces the stored definition but keeps the
/// position it was first registered at, so listings stay stable.
#[derive(Debug, Clone)]
pub struct Registry<D> {
    entries: IndexMap<String, D>,
}

pub type ToolRegistry = Registry<ToolDefinition>;
pub type ResourceRegistry = Registry<ResourceDefinition>;
pub type PromptRegistry = Registry<PromptDefinition>;

impl<D> Default for Registry<D> {
    fn default() -> Self { Self { entries: IndexMap::new() } }
}

impl<D: Definition> Registry<D> {
    pub fn new() -> Self { Self::default() }

    /// Inserts or overwrites. Returns the definition previously stored at the key.
    pub fn register(&mut self, definition: D) -> Option<D> {
        let key = definition.key().to_string();
        if self.entries.contains_key(&key) {
            tracing::debug!(key = %key, "definition replaced");
        }
        self.entries.insert(key, definition)
    }

    pub fn get(&self, key: &str) -> Option<&D> { self.entries.get(key) }
    pub fn list(&self) -> Vec<&D> { self.entries.values().collect() }
    pub fn keys(&self) -> Vec<String> { self.entries.keys().cloned().collect() }
    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
    pub fn iter(&self) -> impl Iterator<Item = &D> { self.entries.values() }
}

impl<D: Definition> Extend<D> for Registry<D> {
    fn extend<I: IntoIterator<Item = D>>(&mut self, iter: I) {
        for d in iter {
            self.register(d);
        }
    }
}
