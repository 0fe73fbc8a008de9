use serde::{Deserialize, Serialize};

use crate::types::identifiers::ContentId;

const MAX_RECENT_ITEMS: usize = 10;

/// Most-recent-first list of viewed content ids, deduplicated and capped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecentlyViewed {
    ids: Vec<ContentId>,
}

impl RecentlyViewed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a view, moving an already-present id back to the front.
    pub fn record_view(&mut self, id: ContentId) {
        self.ids.retain(|existing| *existing != id);
        self.ids.insert(0, id);
        self.ids.truncate(MAX_RECENT_ITEMS);
    }

    pub fn ids(&self) -> &[ContentId] {
        &self.ids
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}
