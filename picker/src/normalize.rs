//! Scalar normalization for emoji strings and search keys
//!
//! `neutral` and `unqualified_neutral` are used both when the index and
//! variation groups are built and when a query or lookup arrives, so the two
//! sides always agree on what a key looks like.

use std::ops::RangeInclusive;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Fitzpatrick skin-tone modifiers, light (U+1F3FB) through dark (U+1F3FF).
pub const SKIN_TONE_MODIFIERS: RangeInclusive<char> = '\u{1F3FB}'..='\u{1F3FF}';

/// Scalars that only affect presentation or joining, not which emoji is meant.
const QUALIFYING_SCALARS: [char; 3] = [
    '\u{FE0E}', // VS15, text presentation
    '\u{FE0F}', // VS16, emoji presentation
    '\u{200D}', // zero-width joiner
];

#[inline]
pub fn is_skin_tone_modifier(c: char) -> bool {
    SKIN_TONE_MODIFIERS.contains(&c)
}

/// Remove every skin-tone modifier, keeping the remaining scalars in order.
pub fn neutral(value: &str) -> String {
    value.chars().filter(|c| !is_skin_tone_modifier(*c)).collect()
}

/// Remove skin-tone modifiers plus variation selectors and joiners.
///
/// Two encodings of the same emoji (fully qualified vs. unqualified, or a
/// toned ZWJ sequence vs. its neutral base) collapse to one key.
pub fn unqualified_neutral(value: &str) -> String {
    value
        .chars()
        .filter(|c| !is_skin_tone_modifier(*c) && !QUALIFYING_SCALARS.contains(c))
        .collect()
}

/// Skin-tone modifiers in the order they occur.
pub fn skin_tone_modifiers(value: &str) -> Vec<char> {
    value.chars().filter(|c| is_skin_tone_modifier(*c)).collect()
}

/// Case- and diacritic-insensitive form of a keyword or query.
///
/// Lowercase (locale independent), canonical decomposition, then drop
/// combining marks: "Café" and "CAFE" both fold to "cafe".
pub fn fold_key(value: &str) -> String {
    value
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}
