use std::collections::BTreeMap;

/// Demo store for the per-record "content out of date" flag.
pub trait FlagRepository {
    /// Unflagged records default to up-to-date.
    fn is_out_of_date(&self, content_id: &str) -> bool;
    fn set_out_of_date(&mut self, content_id: &str, out_of_date: bool);
}

#[derive(Debug, Default)]
pub struct MemoryFlagStore {
    flags: BTreeMap<String, bool>,
}

impl MemoryFlagStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FlagRepository for MemoryFlagStore {
    fn is_out_of_date(&self, content_id: &str) -> bool {
        self.flags.get(content_id).copied().unwrap_or(false)
    }

    fn set_out_of_date(&mut self, content_id: &str, out_of_date: bool) {
        self.flags.insert(content_id.to_string(), out_of_date);
    }
}
