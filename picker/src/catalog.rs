//! Emoji catalog loading
//!
//! The catalog arrives as JSON: ordered categories, each with keyed emoji and
//! an optional map of variation groups. Every distinct emoji value is stored
//! once in an arena and referred to by [`EmojiId`]; the search index and the
//! variation groups only hold ids.
//!
//! Arena layout: ids `0..listed` are the emoji shown in categories, in
//! catalog order. Anything after that is only reachable as a variant.

use crate::interface::{Category, CategoryEntry, CategoryName, Emoji};
use crate::normalize::{is_skin_tone_modifier, neutral, unqualified_neutral};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use thiserror::Error;

/// Handle into the catalog's emoji arena
pub type EmojiId = usize;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Deserialize)]
struct RawCatalog {
    categories: Vec<RawCategory>,
}

#[derive(Deserialize)]
struct RawCategory {
    name: CategoryName,
    #[serde(default)]
    emojis: Vec<RawEmoji>,
    // BTreeMap so groups that collapse to the same key merge in a fixed order
    #[serde(default)]
    variations: BTreeMap<String, Vec<String>>,
}

#[derive(Deserialize)]
struct RawEmoji {
    key: String,
    value: String,
    #[serde(default)]
    keywords: HashMap<String, Vec<String>>,
}

/// Skin-tone variants of one emoji
#[derive(Debug, Clone)]
pub struct CatalogVariations {
    /// Unqualified neutral form of the group
    pub key: String,
    /// The group's own neutral entry, when the catalog has one
    pub neutral: Option<EmojiId>,
    pub variants: Vec<EmojiId>,
}

/// A category as stored in the catalog: ids instead of emoji
#[derive(Debug, Clone)]
pub struct CatalogCategory {
    pub name: CategoryName,
    pub entries: Vec<(String, EmojiId)>,
    pub variations: Vec<CatalogVariations>,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    emojis: Vec<Emoji>,
    listed: usize,
    by_value: HashMap<String, EmojiId>,
    categories: Vec<CatalogCategory>,
}

impl Catalog {
    /// Load a catalog file.
    pub fn open<P: AsRef<Path>>(path: P, include_skin_tone_variants: bool) -> CatalogResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json, include_skin_tone_variants)
    }

    /// Parse a catalog. With `include_skin_tone_variants` off, entries that
    /// carry a skin-tone modifier are kept for variant lookup but not listed.
    pub fn from_json(json: &str, include_skin_tone_variants: bool) -> CatalogResult<Self> {
        let raw: RawCatalog = serde_json::from_str(json)?;
        Ok(Self::build(raw, include_skin_tone_variants))
    }

    fn build(raw: RawCatalog, include_skin_tone_variants: bool) -> Self {
        let mut catalog = Self {
            emojis: Vec::new(),
            listed: 0,
            by_value: HashMap::new(),
            categories: Vec::with_capacity(raw.categories.len()),
        };

        // Listed entries first so they occupy the front of the arena
        let mut unlisted = Vec::new();
        for raw_category in &raw.categories {
            let mut entries = Vec::with_capacity(raw_category.emojis.len());
            for raw_emoji in &raw_category.emojis {
                if !include_skin_tone_variants && raw_emoji.value.chars().any(is_skin_tone_modifier) {
                    unlisted.push(raw_emoji);
                    continue;
                }
                let id = catalog.intern(&raw_emoji.value, || raw_emoji.keywords.clone());
                entries.push((raw_emoji.key.clone(), id));
            }
            catalog.categories.push(CatalogCategory {
                name: raw_category.name,
                entries,
                variations: Vec::new(),
            });
        }
        catalog.listed = catalog.emojis.len();

        for raw_emoji in unlisted {
            catalog.intern(&raw_emoji.value, || raw_emoji.keywords.clone());
        }

        for (category, raw_category) in catalog.categories.iter_mut().zip(&raw.categories) {
            for (group_key, variants) in &raw_category.variations {
                let ids: Vec<EmojiId> = variants
                    .iter()
                    .map(|variant| {
                        if let Some(&id) = catalog.by_value.get(variant) {
                            return id;
                        }
                        // Variant with no entry of its own: borrow the keywords of its neutral form
                        let keywords = catalog
                            .by_value
                            .get(group_key)
                            .or_else(|| catalog.by_value.get(&neutral(variant)))
                            .map(|&id| catalog.emojis[id].localized_keywords.clone())
                            .unwrap_or_default();
                        let id = catalog.emojis.len();
                        catalog.emojis.push(Emoji::new(variant.clone(), keywords));
                        catalog.by_value.insert(variant.clone(), id);
                        id
                    })
                    .collect();
                let key = unqualified_neutral(group_key);
                let neutral_id = catalog.by_value.get(group_key).copied();
                // Raw keys differing only in qualification share one group
                match category.variations.iter_mut().find(|group| group.key == key) {
                    Some(group) => {
                        group.neutral = group.neutral.or(neutral_id);
                        group.variants.extend(ids);
                    }
                    None => category.variations.push(CatalogVariations {
                        key,
                        neutral: neutral_id,
                        variants: ids,
                    }),
                }
            }
        }

        catalog
    }

    fn intern(&mut self, value: &str, keywords: impl FnOnce() -> HashMap<String, Vec<String>>) -> EmojiId {
        if let Some(&id) = self.by_value.get(value) {
            return id;
        }
        let id = self.emojis.len();
        self.emojis.push(Emoji::new(value, keywords()));
        self.by_value.insert(value.to_string(), id);
        id
    }

    pub fn emoji(&self, id: EmojiId) -> &Emoji {
        &self.emojis[id]
    }

    /// Emoji listed in categories, in catalog order. Index == id.
    pub fn listed(&self) -> &[Emoji] {
        &self.emojis[..self.listed]
    }

    /// Id of the emoji with exactly this value, listed or not
    pub fn lookup(&self, value: &str) -> Option<EmojiId> {
        self.by_value.get(value).copied()
    }

    pub fn categories(&self) -> &[CatalogCategory] {
        &self.categories
    }

    /// Total number of distinct emoji, including variant-only ones
    pub fn len(&self) -> usize {
        self.emojis.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emojis.is_empty()
    }

    /// Materialize a category for the FFI boundary
    pub fn to_category(&self, category: &CatalogCategory) -> Category {
        Category {
            name: category.name,
            emojis: category
                .entries
                .iter()
                .map(|(key, id)| CategoryEntry {
                    key: key.clone(),
                    emoji: self.emojis[*id].clone(),
                })
                .collect(),
            variations: category
                .variations
                .iter()
                .map(|group| {
                    let variants = group.variants.iter().map(|&id| self.emojis[id].clone()).collect();
                    (group.key.clone(), variants)
                })
                .collect(),
        }
    }
}
