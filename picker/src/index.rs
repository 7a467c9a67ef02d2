//! Emoji search index
//!
//! Two kinds of keys point at catalog ids:
//! - glyph keys: the emoji value itself and its skin-tone neutral form,
//!   matched exactly;
//! - keyword keys: every keyword in every locale, folded for case and
//!   diacritics and matched as a substring via [`SuffixTrie`].
//!
//! The index is assembled in [`SearchIndex::build`] and never mutated after.

use crate::catalog::{Catalog, EmojiId};
use crate::normalize::{fold_key, neutral};
use crate::trie::SuffixTrie;
use rayon::prelude::*;
use std::collections::{BTreeSet, HashMap};

pub struct SearchIndex {
    glyphs: HashMap<String, Vec<EmojiId>>,
    keywords: SuffixTrie,
}

impl SearchIndex {
    /// Index every listed emoji in `catalog`.
    pub fn build(catalog: &Catalog) -> Self {
        #[cfg(feature = "perf-log")]
        let t0 = std::time::Instant::now();

        // Folding is the expensive part and is independent per emoji.
        // Indexed collect keeps catalog order for the sequential insert below.
        let folded: Vec<Vec<String>> = catalog
            .listed()
            .par_iter()
            .map(|emoji| {
                let mut keys: Vec<String> = emoji
                    .localized_keywords
                    .values()
                    .flatten()
                    .map(String::as_str)
                    .map(fold_key)
                    .filter(|key| !key.trim().is_empty())
                    .collect();
                keys.sort_unstable();
                keys.dedup();
                keys
            })
            .collect();

        #[cfg(feature = "perf-log")]
        let t1 = std::time::Instant::now();

        let mut index = Self {
            glyphs: HashMap::with_capacity(catalog.listed().len()),
            keywords: SuffixTrie::new(),
        };

        for (id, emoji) in catalog.listed().iter().enumerate() {
            index.insert_glyph(emoji.value.clone(), id);
            let neutral_value = neutral(&emoji.value);
            if neutral_value != emoji.value {
                index.insert_glyph(neutral_value, id);
            }
        }

        for (id, keys) in folded.iter().enumerate() {
            for key in keys {
                index.keywords.insert(key, id);
            }
        }

        #[cfg(feature = "perf-log")]
        {
            let t2 = std::time::Instant::now();
            eprintln!(
                "[perf] index_fold={:.1}ms index_insert={:.1}ms emojis={} glyph_keys={} trie_nodes={}",
                (t1 - t0).as_secs_f64() * 1000.0,
                (t2 - t1).as_secs_f64() * 1000.0,
                catalog.listed().len(),
                index.glyphs.len(),
                index.keywords.node_count(),
            );
        }

        index
    }

    fn insert_glyph(&mut self, key: String, id: EmojiId) {
        let ids = self.glyphs.entry(key).or_default();
        if !ids.contains(&id) {
            ids.push(id);
        }
    }

    /// Ids matching `query`, in catalog order. Blank queries match nothing.
    pub fn find(&self, query: &str) -> Vec<EmojiId> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Vec::new();
        }

        // Glyphs match exact scalars; only keywords are case folded
        let glyph = neutral(trimmed);
        if glyph.is_empty() {
            return Vec::new();
        }

        let mut hits = BTreeSet::new();
        if let Some(ids) = self.glyphs.get(&glyph) {
            hits.extend(ids.iter().copied());
        }
        self.keywords.collect(&fold_key(&glyph), &mut hits);

        hits.into_iter().collect()
    }

    pub fn glyph_key_count(&self) -> usize {
        self.glyphs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "categories": [
            {
                "name": "people",
                "emojis": [
                    {"key": "thumbsup", "value": "👍", "keywords": {"en": ["thumbs up", "like"], "fr": ["pouce levé"]}},
                    {"key": "thumbsup-dark", "value": "👍🏿", "keywords": {"en": ["thumbs up"]}}
                ]
            },
            {
                "name": "food",
                "emojis": [
                    {"key": "coffee", "value": "☕", "keywords": {"en": ["coffee", "Café"]}},
                    {"key": "pinata", "value": "🪅", "keywords": {"es": ["piñata"]}}
                ]
            },
            {
                "name": "symbols",
                "emojis": [
                    {"key": "circled-m", "value": "Ⓜ\ufe0f", "keywords": {"en": ["circled m"]}}
                ]
            }
        ]
    }"#;

    fn values(catalog: &Catalog, ids: Vec<EmojiId>) -> Vec<String> {
        ids.into_iter().map(|id| catalog.emoji(id).value.clone()).collect()
    }

    #[test]
    fn test_find_by_glyph_ignores_skin_tone() {
        let catalog = Catalog::from_json(SAMPLE, true).unwrap();
        let index = SearchIndex::build(&catalog);

        assert_eq!(values(&catalog, index.find("👍🏿")), vec!["👍", "👍🏿"]);
        assert_eq!(values(&catalog, index.find("👍🏽")), vec!["👍", "👍🏿"]);
        assert_eq!(values(&catalog, index.find("☕")), vec!["☕"]);
    }

    #[test]
    fn test_find_by_keyword_substring() {
        let catalog = Catalog::from_json(SAMPLE, true).unwrap();
        let index = SearchIndex::build(&catalog);

        assert_eq!(values(&catalog, index.find("humbs")), vec!["👍", "👍🏿"]);
        assert_eq!(values(&catalog, index.find("ike")), vec!["👍"]);
        assert_eq!(values(&catalog, index.find("offe")), vec!["☕"]);
    }

    #[test]
    fn test_find_folds_case_and_diacritics() {
        let catalog = Catalog::from_json(SAMPLE, true).unwrap();
        let index = SearchIndex::build(&catalog);

        for query in ["cafe", "CAFE", "café", "Café", "CAFÉ"] {
            assert_eq!(values(&catalog, index.find(query)), vec!["☕"], "query {query:?}");
        }
        assert_eq!(values(&catalog, index.find("PINATA")), vec!["🪅"]);
        assert_eq!(values(&catalog, index.find("pouce leve")), vec!["👍"]);
    }

    #[test]
    fn test_find_by_glyph_with_case_mapping() {
        let catalog = Catalog::from_json(SAMPLE, true).unwrap();
        let index = SearchIndex::build(&catalog);

        // Ⓜ lowercases to ⓜ; the glyph itself must still match
        assert_eq!(values(&catalog, index.find("Ⓜ\u{FE0F}")), vec!["Ⓜ\u{FE0F}"]);
        assert!(index.find("ⓜ\u{FE0F}").is_empty());
        assert_eq!(values(&catalog, index.find("CIRCLED M")), vec!["Ⓜ\u{FE0F}"]);
    }

    #[test]
    fn test_blank_query_returns_nothing() {
        let catalog = Catalog::from_json(SAMPLE, true).unwrap();
        let index = SearchIndex::build(&catalog);

        assert!(index.find("").is_empty());
        assert!(index.find("   ").is_empty());
        assert!(index.find("🏿").is_empty());
    }

    #[test]
    fn test_miss_returns_nothing() {
        let catalog = Catalog::from_json(SAMPLE, true).unwrap();
        let index = SearchIndex::build(&catalog);
        assert!(index.find("zebra").is_empty());
    }

    #[test]
    fn test_unlisted_variants_are_not_indexed() {
        let catalog = Catalog::from_json(SAMPLE, false).unwrap();
        let index = SearchIndex::build(&catalog);

        // Toned glyph still finds the neutral entry
        assert_eq!(values(&catalog, index.find("👍🏿")), vec!["👍"]);
        assert_eq!(values(&catalog, index.find("thumbs")), vec!["👍"]);
    }

    #[test]
    fn test_results_are_deterministic() {
        let catalog = Catalog::from_json(SAMPLE, true).unwrap();
        let first = SearchIndex::build(&catalog).find("u");
        let second = SearchIndex::build(&catalog).find("u");
        assert_eq!(first, second);
        assert!(first.windows(2).all(|w| w[0] < w[1]));
    }
}
