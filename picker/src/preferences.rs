//! Persisted skin-tone preferences
//!
//! Each slot stores the modifier's Unicode scalar value as a JSON number.
//! Neutral is stored as absence, so clearing a slot removes its key.

use crate::interface::{KeyValueStore, SkinTone};
use crate::persistence::{read_json, write_json};
use std::sync::Arc;

pub const SKIN_TONE_1_KEY: &str = "skin_tone_1";
pub const SKIN_TONE_2_KEY: &str = "skin_tone_2";

/// The two skin-tone positions of a multi-person emoji
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkinToneSlot {
    First,
    Second,
}

impl SkinToneSlot {
    pub fn key(self) -> &'static str {
        match self {
            SkinToneSlot::First => SKIN_TONE_1_KEY,
            SkinToneSlot::Second => SKIN_TONE_2_KEY,
        }
    }
}

pub struct SkinTonePreferences {
    store: Arc<dyn KeyValueStore>,
}

impl SkinTonePreferences {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Stored tone for `slot`; neutral when absent or unrecognized
    pub fn get(&self, slot: SkinToneSlot) -> SkinTone {
        let Some(value) = read_json::<u32>(self.store.as_ref(), slot.key()) else {
            return SkinTone::Neutral;
        };
        SkinTone::from_unicode_scalar_value(value).unwrap_or_else(|| {
            tracing::warn!(key = slot.key(), value, "unrecognized skin tone, using neutral");
            SkinTone::Neutral
        })
    }

    pub fn set(&self, slot: SkinToneSlot, skin_tone: SkinTone) {
        match skin_tone.unicode_scalar_value() {
            Some(value) => write_json(self.store.as_ref(), slot.key(), &value),
            None => self.store.remove(slot.key().to_string()),
        }
    }
}
