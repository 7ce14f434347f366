use std::{collections::HashMap, sync::Arc};

use arc_swap::ArcSwap;

/// Last rendered status text per group.
///
/// Each refresh publishes a whole new map; readers never see a half-updated
/// batch and never block the updater.
#[derive(Debug, Default)]
pub struct StatusStore {
    groups: ArcSwap<HashMap<String, String>>,
}

impl StatusStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached text for `group`, as served to whoever asks for it.
    pub fn lookup(&self, group: &str) -> Option<String> {
        self.groups.load().get(group).cloned()
    }

    pub fn snapshot(&self) -> Arc<HashMap<String, String>> {
        self.groups.load_full()
    }

    pub fn replace(&self, groups: HashMap<String, String>) {
        self.groups.store(Arc::new(groups));
    }

    pub fn is_empty(&self) -> bool {
        self.groups.load().is_empty()
    }
}
