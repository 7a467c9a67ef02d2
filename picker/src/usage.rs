//! Usage-frequency ranking
//!
//! Each selection prepends a timestamp (ms since epoch) to a history stored
//! under the emoji's unqualified neutral form, so every skin-tone variant of
//! an emoji shares one history. Histories are most-recent-first by
//! construction and are never re-sorted.

use crate::catalog::{Catalog, EmojiId};
use crate::interface::KeyValueStore;
use crate::normalize::unqualified_neutral;
use crate::persistence::{read_json, write_json};
use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;

/// Maximum number of entries in the frequently used list.
pub const MAX_FREQUENTLY_USED: usize = 30;

const USAGE_KEY_PREFIX: &str = "usage:";

/// Persistence key for the history shared by all variants of `emoji_value`
pub fn usage_key(emoji_value: &str) -> String {
    format!("{}{}", USAGE_KEY_PREFIX, unqualified_neutral(emoji_value))
}

pub struct UsageTracker {
    store: Arc<dyn KeyValueStore>,
}

impl UsageTracker {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    fn history_for_key(&self, key: &str) -> Vec<i64> {
        read_json(self.store.as_ref(), key).unwrap_or_default()
    }

    /// Selection timestamps for `emoji_value`, most recent first
    pub fn history(&self, emoji_value: &str) -> Vec<i64> {
        self.history_for_key(&usage_key(emoji_value))
    }

    pub fn usage_count(&self, emoji_value: &str) -> usize {
        self.history(emoji_value).len()
    }

    /// Record a selection now
    pub fn record(&self, emoji_value: &str) {
        self.record_at(emoji_value, Utc::now().timestamp_millis());
    }

    /// Record a selection at `timestamp_ms`
    pub fn record_at(&self, emoji_value: &str, timestamp_ms: i64) {
        let key = usage_key(emoji_value);
        let mut history = self.history_for_key(&key);
        history.insert(0, timestamp_ms);
        write_json(self.store.as_ref(), &key, &history);
    }

    /// Listed emoji with a history, one per usage key, in catalog order.
    /// Yields (id, key, history).
    fn used(&self, catalog: &Catalog) -> Vec<(EmojiId, String, Vec<i64>)> {
        let mut seen = HashSet::new();
        catalog
            .listed()
            .iter()
            .enumerate()
            .filter_map(|(id, emoji)| {
                let key = usage_key(&emoji.value);
                if !seen.insert(key.clone()) {
                    return None;
                }
                let history = self.history_for_key(&key);
                (!history.is_empty()).then_some((id, key, history))
            })
            .collect()
    }

    /// Most used emoji: count descending, then latest use descending.
    /// Remaining ties keep catalog order. At most [`MAX_FREQUENTLY_USED`].
    pub fn frequently_used(&self, catalog: &Catalog) -> Vec<EmojiId> {
        let mut ranked: Vec<(EmojiId, usize, i64)> = self
            .used(catalog)
            .into_iter()
            .map(|(id, _, history)| (id, history.len(), history[0]))
            .collect();

        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| b.2.cmp(&a.2)));
        ranked.truncate(MAX_FREQUENTLY_USED);
        ranked.into_iter().map(|(id, _, _)| id).collect()
    }

    /// Delete every non-empty history. Returns how many were removed.
    pub fn reset(&self, catalog: &Catalog) -> usize {
        let used = self.used(catalog);
        for (_, key, _) in &used {
            self.store.remove(key.clone());
        }
        used.len()
    }
}
