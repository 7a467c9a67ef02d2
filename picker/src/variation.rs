//! Skin-tone variant resolution
//!
//! Variation groups are keyed by the unqualified neutral form, so any
//! encoding of an emoji (toned, fully qualified, unqualified) finds the same
//! group. Within a group, variants are ordered by descending modifier count
//! once at build time, which makes the most specific variant win.

use crate::catalog::{Catalog, EmojiId};
use crate::interface::SkinTone;
use crate::normalize::{skin_tone_modifiers, unqualified_neutral};
use std::collections::HashMap;

#[derive(Debug, Clone)]
struct Variant {
    id: EmojiId,
    /// Modifier scalars in order of occurrence
    modifiers: Vec<char>,
}

impl Variant {
    /// The first modifier answers to tone 1, the second to tone 2.
    /// Unmodified variants never match a toned request.
    fn matches(&self, skin_tone1: SkinTone, skin_tone2: SkinTone) -> bool {
        match self.modifiers.as_slice() {
            [only] => skin_tone1.modifier() == Some(*only),
            [first, second] => {
                skin_tone1.modifier() == Some(*first) && skin_tone2.modifier() == Some(*second)
            }
            _ => false,
        }
    }
}

#[derive(Debug, Default)]
struct Group {
    neutral: Option<EmojiId>,
    variants: Vec<Variant>,
}

pub struct VariationGroups {
    groups: HashMap<String, Group>,
    /// Unqualified neutral form of a variant → its group key, for variants
    /// whose neutral form is a different sequence (mixed-tone hand pairs belong to 🤝)
    aliases: HashMap<String, String>,
}

impl VariationGroups {
    pub fn build(catalog: &Catalog) -> Self {
        let mut groups: HashMap<String, Group> = HashMap::new();

        for category in catalog.categories() {
            for variations in &category.variations {
                let group = groups.entry(variations.key.clone()).or_default();
                group.neutral = group.neutral.or(variations.neutral);
                for &id in &variations.variants {
                    if group.variants.iter().any(|v| v.id == id) {
                        continue;
                    }
                    group.variants.push(Variant {
                        id,
                        modifiers: skin_tone_modifiers(&catalog.emoji(id).value),
                    });
                }
            }
        }

        // Sorted so a sequence claimed by two groups always maps to the same one
        let mut keys: Vec<&String> = groups.keys().collect();
        keys.sort();
        let mut aliases = HashMap::new();
        for key in keys {
            for variant in &groups[key].variants {
                let alias = unqualified_neutral(&catalog.emoji(variant.id).value);
                if !groups.contains_key(&alias) {
                    aliases.entry(alias).or_insert_with(|| key.clone());
                }
            }
        }

        // Stable: equally specific variants keep catalog order
        for group in groups.values_mut() {
            group.variants.sort_by(|a, b| b.modifiers.len().cmp(&a.modifiers.len()));
        }

        Self { groups, aliases }
    }

    fn group(&self, emoji_value: &str) -> Option<&Group> {
        let key = unqualified_neutral(emoji_value);
        match self.groups.get(&key) {
            Some(group) => Some(group),
            None => self.groups.get(self.aliases.get(&key)?),
        }
    }

    /// First variant of `emoji_value`'s group matching the requested tones.
    pub fn resolve(&self, emoji_value: &str, skin_tone1: SkinTone, skin_tone2: SkinTone) -> Option<EmojiId> {
        self.group(emoji_value)?
            .variants
            .iter()
            .find(|variant| variant.matches(skin_tone1, skin_tone2))
            .map(|variant| variant.id)
    }

    /// The neutral entry of `emoji_value`'s group
    pub fn neutral(&self, emoji_value: &str) -> Option<EmojiId> {
        self.group(emoji_value)?.neutral
    }

    /// Resolution as the picker applies it for display.
    ///
    /// Both tones neutral skips resolution. A miss with a neutral second tone
    /// retries with the first tone in both slots. There is no retry for a
    /// neutral first tone with a toned second one.
    pub fn resolve_preferred(&self, emoji_value: &str, skin_tone1: SkinTone, skin_tone2: SkinTone) -> Option<EmojiId> {
        if skin_tone1 == SkinTone::Neutral && skin_tone2 == SkinTone::Neutral {
            return None;
        }
        self.resolve(emoji_value, skin_tone1, skin_tone2).or_else(|| {
            if skin_tone2 == SkinTone::Neutral {
                self.resolve(emoji_value, skin_tone1, skin_tone1)
            } else {
                None
            }
        })
    }

    pub fn contains(&self, emoji_value: &str) -> bool {
        self.group(emoji_value).is_some()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use SkinTone::*;

    // 🤝 has single-tone variants plus mixed-tone 🫱🫲 pairs.
    // People holding hands only has two-modifier variants.
    const SAMPLE: &str = r#"{
        "categories": [
            {
                "name": "people",
                "emojis": [
                    {"key": "handshake", "value": "🤝", "keywords": {"en": ["handshake"]}},
                    {"key": "holding-hands", "value": "🧑\u200d🤝\u200d🧑", "keywords": {"en": ["holding hands"]}},
                    {"key": "heart", "value": "❤\ufe0f", "keywords": {"en": ["heart"]}}
                ],
                "variations": {
                    "🤝": [
                        "🤝",
                        "🤝🏻", "🤝🏼", "🤝🏽", "🤝🏾", "🤝🏿",
                        "🫱🏻\u200d🫲🏼", "🫱🏻\u200d🫲🏿", "🫱🏿\u200d🫲🏻", "🫱🏿\u200d🫲🏼"
                    ],
                    "🧑\u200d🤝\u200d🧑": [
                        "🧑🏻\u200d🤝\u200d🧑🏻", "🧑🏻\u200d🤝\u200d🧑🏿",
                        "🧑🏿\u200d🤝\u200d🧑🏻", "🧑🏿\u200d🤝\u200d🧑🏿"
                    ]
                }
            }
        ]
    }"#;

    fn resolve(groups: &VariationGroups, catalog: &Catalog, value: &str, t1: SkinTone, t2: SkinTone) -> Option<String> {
        groups
            .resolve(value, t1, t2)
            .map(|id| catalog.emoji(id).value.clone())
    }

    fn setup() -> (Catalog, VariationGroups) {
        let catalog = Catalog::from_json(SAMPLE, true).unwrap();
        let groups = VariationGroups::build(&catalog);
        (catalog, groups)
    }

    #[test]
    fn test_two_modifier_variant_matches_positionally() {
        let (catalog, groups) = setup();
        assert_eq!(
            resolve(&groups, &catalog, "🤝", Light, Dark).as_deref(),
            Some("🫱🏻\u{200D}🫲🏿")
        );
        assert_eq!(
            resolve(&groups, &catalog, "🤝", Dark, Light).as_deref(),
            Some("🫱🏿\u{200D}🫲🏻")
        );
    }

    #[test]
    fn test_same_tone_falls_to_single_modifier_variant() {
        let (catalog, groups) = setup();
        assert_eq!(resolve(&groups, &catalog, "🤝", Light, Light).as_deref(), Some("🤝🏻"));
        assert_eq!(resolve(&groups, &catalog, "🤝", Dark, Neutral).as_deref(), Some("🤝🏿"));
    }

    #[test]
    fn test_lookup_by_any_variant_reaches_group() {
        let (catalog, groups) = setup();
        assert_eq!(
            resolve(&groups, &catalog, "🤝🏽", Medium, Neutral).as_deref(),
            Some("🤝🏽")
        );
        assert_eq!(
            resolve(&groups, &catalog, "🧑🏿\u{200D}🤝\u{200D}🧑🏻", Light, Dark).as_deref(),
            Some("🧑🏻\u{200D}🤝\u{200D}🧑🏿")
        );
        assert!(groups.contains("🧑🤝🧑"));
    }

    #[test]
    fn test_neutral_request_never_matches() {
        let (catalog, groups) = setup();
        assert_eq!(resolve(&groups, &catalog, "🤝", Neutral, Neutral), None);
        assert_eq!(resolve(&groups, &catalog, "🤝", Neutral, Dark), None);
    }

    #[test]
    fn test_missing_group_is_none() {
        let (catalog, groups) = setup();
        assert_eq!(resolve(&groups, &catalog, "❤\u{FE0F}", Dark, Dark), None);
        assert_eq!(resolve(&groups, &catalog, "🦄", Dark, Dark), None);
    }

    #[test]
    fn test_preferred_falls_back_to_first_tone_in_both_slots() {
        let (catalog, groups) = setup();
        let value = "🧑\u{200D}🤝\u{200D}🧑";

        assert_eq!(groups.resolve(value, Dark, Neutral), None);
        let id = groups.resolve_preferred(value, Dark, Neutral).unwrap();
        assert_eq!(catalog.emoji(id).value, "🧑🏿\u{200D}🤝\u{200D}🧑🏿");
    }

    #[test]
    fn test_preferred_has_no_converse_fallback() {
        let (_catalog, groups) = setup();
        let value = "🧑\u{200D}🤝\u{200D}🧑";
        assert_eq!(groups.resolve_preferred(value, Neutral, Dark), None);
        assert_eq!(groups.resolve_preferred(value, Neutral, Neutral), None);
    }

    #[test]
    fn test_mixed_sequence_variant_reaches_its_group() {
        let (catalog, groups) = setup();
        let mixed = "🫱🏻\u{200D}🫲🏿";

        assert!(groups.contains(mixed));
        assert_eq!(resolve(&groups, &catalog, mixed, Dark, Light).as_deref(), Some("🫱🏿\u{200D}🫲🏻"));
        assert_eq!(resolve(&groups, &catalog, mixed, Medium, Neutral).as_deref(), Some("🤝🏽"));
        assert_eq!(groups.neutral(mixed).map(|id| catalog.emoji(id).value.as_str()), Some("🤝"));
    }

    #[test]
    fn test_neutral_of_group() {
        let (catalog, groups) = setup();
        let value = "🧑🏿\u{200D}🤝\u{200D}🧑🏻";
        assert_eq!(
            groups.neutral(value).map(|id| catalog.emoji(id).value.as_str()),
            Some("🧑\u{200D}🤝\u{200D}🧑")
        );
        assert_eq!(groups.neutral("❤\u{FE0F}"), None);
    }

    #[test]
    fn test_group_order_prefers_most_specific() {
        let (catalog, groups) = setup();
        let group = &groups.groups[&unqualified_neutral("🤝")].variants;
        let counts: Vec<usize> = group.iter().map(|v| v.modifiers.len()).collect();
        assert!(counts.windows(2).all(|w| w[0] >= w[1]));
        // Stable within a modifier count
        assert_eq!(catalog.emoji(group[0].id).value, "🫱🏻\u{200D}🫲🏼");
        assert_eq!(groups.len(), 2);
    }
}
