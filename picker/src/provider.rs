//! EmojiProvider - Main API for Swift interop
//!
//! Owns the catalog and everything derived from it (search index, variation
//! groups). Those are built once in the constructor and never change, so
//! reads take no locks. Usage history and skin-tone preferences live in the
//! injected [`KeyValueStore`].

use crate::catalog::{Catalog, EmojiId};
use crate::database::SqliteKeyValueStore;
use crate::index::SearchIndex;
use crate::interface::{
    Category, CategoryEntry, CategoryName, Emoji, EmojiPickerError, EmojiProviderApi, KeyValueStore, SkinTone,
};
use crate::normalize::neutral;
use crate::preferences::{SkinTonePreferences, SkinToneSlot};
use crate::usage::UsageTracker;
use crate::variation::VariationGroups;
use std::collections::HashMap;
use std::sync::{Arc, Once};

static RAYON_INIT: Once = Once::new();

/// Initialize the global Rayon pool used for the index build, leaving one
/// core for the host's UI thread.
fn init_rayon() {
    RAYON_INIT.call_once(|| {
        let num_threads = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4);
        let rayon_threads = num_threads.saturating_sub(1).max(1);

        // Fails if the host already built a global pool; theirs is fine too.
        let _ = rayon::ThreadPoolBuilder::new()
            .num_threads(rayon_threads)
            .thread_name(|i| format!("picker-rayon-{}", i))
            .build_global();
    });
}

/// Thread-safe emoji provider
#[derive(uniffi::Object)]
pub struct EmojiProvider {
    catalog: Catalog,
    index: SearchIndex,
    variations: VariationGroups,
    usage: UsageTracker,
    preferences: SkinTonePreferences,
}

// Internal implementation (not exported via FFI)
impl EmojiProvider {
    /// Build every derived structure for `catalog` over `store`
    pub fn from_catalog(catalog: Catalog, store: Arc<dyn KeyValueStore>) -> Self {
        init_rayon();
        let index = SearchIndex::build(&catalog);
        let variations = VariationGroups::build(&catalog);

        Self {
            catalog,
            index,
            variations,
            usage: UsageTracker::new(store.clone()),
            preferences: SkinTonePreferences::new(store),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Record a selection with an explicit timestamp (ms since epoch)
    pub fn record_at(&self, emoji: &Emoji, timestamp_ms: i64) {
        self.usage.record_at(&emoji.value, timestamp_ms);
    }

    /// Number of recorded selections shared by `emoji_value` and its variants
    pub fn usage_count(&self, emoji_value: &str) -> usize {
        self.usage.usage_count(emoji_value)
    }

    fn emojis(&self, ids: impl IntoIterator<Item = EmojiId>) -> Vec<Emoji> {
        ids.into_iter().map(|id| self.catalog.emoji(id).clone()).collect()
    }

    fn frequently_used_category(&self) -> Option<Category> {
        let emojis = self.frequently_used();
        if emojis.is_empty() {
            return None;
        }
        Some(Category {
            name: CategoryName::FrequentlyUsed,
            emojis: emojis
                .into_iter()
                .map(|emoji| CategoryEntry {
                    key: emoji.value.clone(),
                    emoji,
                })
                .collect(),
            variations: HashMap::new(),
        })
    }
}

// FFI-exported constructors (must be in standalone impl block)
#[uniffi::export]
impl EmojiProvider {
    /// Load the catalog file and keep usage and preferences in a SQLite
    /// database at `db_path`
    #[uniffi::constructor]
    pub fn new(
        catalog_path: String,
        db_path: String,
        include_skin_tone_variants: bool,
    ) -> Result<Self, EmojiPickerError> {
        let catalog = Catalog::open(&catalog_path, include_skin_tone_variants)?;
        let store = SqliteKeyValueStore::open(&db_path)?;
        Ok(Self::from_catalog(catalog, Arc::new(store)))
    }

    /// Parse `catalog_json` and persist through a host-supplied store
    #[uniffi::constructor]
    pub fn with_store(
        catalog_json: String,
        store: Arc<dyn KeyValueStore>,
        include_skin_tone_variants: bool,
    ) -> Result<Self, EmojiPickerError> {
        let catalog = Catalog::from_json(&catalog_json, include_skin_tone_variants)?;
        Ok(Self::from_catalog(catalog, store))
    }
}

#[uniffi::export]
impl EmojiProviderApi for EmojiProvider {
    // ─────────────────────────────────────────────────────────────────────────────
    // Read Operations
    // ─────────────────────────────────────────────────────────────────────────────

    fn categories(&self) -> Vec<Category> {
        self.frequently_used_category()
            .into_iter()
            .chain(
                self.catalog
                    .categories()
                    .iter()
                    .map(|category| self.catalog.to_category(category)),
            )
            .collect()
    }

    fn find(&self, query: String) -> Vec<Emoji> {
        self.emojis(self.index.find(&query))
    }

    fn variation(&self, emoji_value: String, skin_tone1: SkinTone, skin_tone2: SkinTone) -> Option<Emoji> {
        self.variations
            .resolve(&emoji_value, skin_tone1, skin_tone2)
            .map(|id| self.catalog.emoji(id).clone())
    }

    /// Resolved variant for the stored tones, else the neutral glyph
    fn preferred_variant(&self, emoji: Emoji) -> Emoji {
        let skin_tone1 = self.skin_tone1();
        let skin_tone2 = self.skin_tone2();

        if let Some(id) = self.variations.resolve_preferred(&emoji.value, skin_tone1, skin_tone2) {
            return self.catalog.emoji(id).clone();
        }
        // Mixed-tone hand pairs have no neutral entry of their own; use their group's
        match self
            .catalog
            .lookup(&neutral(&emoji.value))
            .or_else(|| self.variations.neutral(&emoji.value))
        {
            Some(id) => self.catalog.emoji(id).clone(),
            None => emoji,
        }
    }

    fn frequently_used(&self) -> Vec<Emoji> {
        self.emojis(self.usage.frequently_used(&self.catalog))
    }

    fn skin_tone1(&self) -> SkinTone {
        self.preferences.get(SkinToneSlot::First)
    }

    fn skin_tone2(&self) -> SkinTone {
        self.preferences.get(SkinToneSlot::Second)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Write Operations
    // ─────────────────────────────────────────────────────────────────────────────

    fn record(&self, emoji: Emoji) {
        self.usage.record(&emoji.value);
    }

    fn reset_frequently_used(&self) {
        let removed = self.usage.reset(&self.catalog);
        tracing::debug!(removed, "reset frequently used");
    }

    fn set_skin_tone1(&self, skin_tone: SkinTone) {
        self.preferences.set(SkinToneSlot::First, skin_tone);
    }

    fn set_skin_tone2(&self, skin_tone: SkinTone) {
        self.preferences.set(SkinToneSlot::Second, skin_tone);
    }
}
