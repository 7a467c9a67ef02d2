//! Emoji Picker FFI Interface Definition
//!
//! This file defines the public interface exposed to Swift via UniFFI.
//! It acts as the source of truth for shared types.

use serde::Deserialize;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use thiserror::Error;

// ═══════════════════════════════════════════════════════════════════════════════
// ENUMS
// ═══════════════════════════════════════════════════════════════════════════════

/// Skin tone preference. Every case except `Neutral` maps to one Fitzpatrick
/// modifier scalar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, uniffi::Enum)]
pub enum SkinTone {
    #[default]
    Neutral,
    Light,
    MediumLight,
    Medium,
    MediumDark,
    Dark,
}

impl SkinTone {
    pub const ALL: [SkinTone; 6] = [
        SkinTone::Neutral,
        SkinTone::Light,
        SkinTone::MediumLight,
        SkinTone::Medium,
        SkinTone::MediumDark,
        SkinTone::Dark,
    ];

    /// The modifier scalar, or `None` for neutral.
    pub fn modifier(self) -> Option<char> {
        match self {
            SkinTone::Neutral => None,
            SkinTone::Light => Some('\u{1F3FB}'),
            SkinTone::MediumLight => Some('\u{1F3FC}'),
            SkinTone::Medium => Some('\u{1F3FD}'),
            SkinTone::MediumDark => Some('\u{1F3FE}'),
            SkinTone::Dark => Some('\u{1F3FF}'),
        }
    }

    pub fn unicode_scalar_value(self) -> Option<u32> {
        self.modifier().map(u32::from)
    }

    /// Inverse of [`SkinTone::unicode_scalar_value`]. Only the five modifier
    /// scalars are recognized.
    pub fn from_unicode_scalar_value(value: u32) -> Option<SkinTone> {
        Self::ALL
            .into_iter()
            .find(|tone| tone.unicode_scalar_value() == Some(value))
    }

    /// Glyph shown in the tone selector. Neutral uses the yellow square.
    pub fn swatch(self) -> &'static str {
        match self {
            SkinTone::Neutral => "🟨",
            SkinTone::Light => "🏻",
            SkinTone::MediumLight => "🏼",
            SkinTone::Medium => "🏽",
            SkinTone::MediumDark => "🏾",
            SkinTone::Dark => "🏿",
        }
    }
}

/// Catalog category names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, uniffi::Enum)]
#[serde(rename_all = "kebab-case")]
pub enum CategoryName {
    FrequentlyUsed,
    People,
    Nature,
    Food,
    Activity,
    Travel,
    Objects,
    Symbols,
    Flags,
}

impl CategoryName {
    /// Display order of the category tabs
    pub fn ordered_cases() -> [CategoryName; 9] {
        [
            CategoryName::FrequentlyUsed,
            CategoryName::People,
            CategoryName::Nature,
            CategoryName::Food,
            CategoryName::Activity,
            CategoryName::Travel,
            CategoryName::Objects,
            CategoryName::Symbols,
            CategoryName::Flags,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CategoryName::FrequentlyUsed => "frequently-used",
            CategoryName::People => "people",
            CategoryName::Nature => "nature",
            CategoryName::Food => "food",
            CategoryName::Activity => "activity",
            CategoryName::Travel => "travel",
            CategoryName::Objects => "objects",
            CategoryName::Symbols => "symbols",
            CategoryName::Flags => "flags",
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// RECORDS (Structs)
// ═══════════════════════════════════════════════════════════════════════════════

/// A single emoji. Equality and hashing only look at `value`.
#[derive(Debug, Clone, uniffi::Record)]
pub struct Emoji {
    pub value: String,
    /// Locale code → ordered keywords
    pub localized_keywords: HashMap<String, Vec<String>>,
}

impl Emoji {
    pub fn new(value: impl Into<String>, localized_keywords: HashMap<String, Vec<String>>) -> Self {
        Self {
            value: value.into(),
            localized_keywords,
        }
    }

    /// Keywords for one locale, empty if the locale is unknown
    pub fn keywords(&self, locale: &str) -> &[String] {
        self.localized_keywords
            .get(locale)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

impl PartialEq for Emoji {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Emoji {}

impl Hash for Emoji {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

/// One keyed slot in a category
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct CategoryEntry {
    pub key: String,
    pub emoji: Emoji,
}

/// A category with its entries in catalog order
#[derive(Debug, Clone, uniffi::Record)]
pub struct Category {
    pub name: CategoryName,
    pub emojis: Vec<CategoryEntry>,
    /// Unqualified neutral emoji → every concrete skin-tone variant
    pub variations: HashMap<String, Vec<Emoji>>,
}

/// Error type for emoji picker operations
#[derive(Debug, Error, uniffi::Error)]
pub enum EmojiPickerError {
    #[error("Catalog error: {0}")]
    CatalogError(String),
    #[error("Database error: {0}")]
    DatabaseError(String),
}

// ═══════════════════════════════════════════════════════════════════════════════
// PERSISTENCE INTERFACE
// ═══════════════════════════════════════════════════════════════════════════════

/// String key/value store backing usage history and skin-tone preferences.
///
/// Implemented in Rust by `MemoryKeyValueStore` and `SqliteKeyValueStore`;
/// the host app may implement it over its own defaults store. Methods are
/// infallible: a store that cannot read returns `None`, and one that cannot
/// write drops the value.
#[uniffi::export(with_foreign)]
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: String) -> Option<String>;

    fn set(&self, key: String, value: String);

    fn remove(&self, key: String);
}

// ═══════════════════════════════════════════════════════════════════════════════
// SERVICE INTERFACE
// ═══════════════════════════════════════════════════════════════════════════════

/// The primary interface for the picker UI.
/// This matches the functionality exposed by the `EmojiProvider` object.
#[uniffi::export(with_foreign)]
pub trait EmojiProviderApi: Send + Sync {
    // ─────────────────────────────────────────────────────────────────────────────
    // Read Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Categories in catalog order, led by "frequently used" when there is any history
    fn categories(&self) -> Vec<Category>;

    /// Emoji matching a glyph or keyword. Empty query returns nothing.
    fn find(&self, query: String) -> Vec<Emoji>;

    /// Concrete variant of `emoji_value` for the requested tones, if the catalog has one
    fn variation(&self, emoji_value: String, skin_tone1: SkinTone, skin_tone2: SkinTone) -> Option<Emoji>;

    /// The glyph to display for `emoji` under the stored skin-tone preferences
    fn preferred_variant(&self, emoji: Emoji) -> Emoji;

    /// Most used emoji, at most 30
    fn frequently_used(&self) -> Vec<Emoji>;

    fn skin_tone1(&self) -> SkinTone;

    fn skin_tone2(&self) -> SkinTone;

    // ─────────────────────────────────────────────────────────────────────────────
    // Write Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Record a selection of `emoji` now
    fn record(&self, emoji: Emoji);

    /// Forget every recorded selection
    fn reset_frequently_used(&self);

    /// Persist the first skin-tone slot. Neutral clears the stored value.
    fn set_skin_tone1(&self, skin_tone: SkinTone);

    /// Persist the second skin-tone slot. Neutral clears the stored value.
    fn set_skin_tone2(&self, skin_tone: SkinTone);
}

impl From<crate::database::DatabaseError> for EmojiPickerError {
    fn from(e: crate::database::DatabaseError) -> Self {
        EmojiPickerError::DatabaseError(e.to_string())
    }
}

impl From<crate::catalog::CatalogError> for EmojiPickerError {
    fn from(e: crate::catalog::CatalogError) -> Self {
        EmojiPickerError::CatalogError(e.to_string())
    }
}
