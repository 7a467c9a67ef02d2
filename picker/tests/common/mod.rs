//! Shared fixtures for the integration tests

#![allow(dead_code)]

use picker::{Emoji, EmojiProvider, MemoryKeyValueStore};
use std::collections::HashMap;
use std::sync::Arc;

pub const CATALOG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/catalog.json");

pub fn catalog_json() -> String {
    std::fs::read_to_string(CATALOG_PATH).unwrap()
}

/// Provider over the fixture catalog with an in-memory store
pub fn memory_provider(include_skin_tone_variants: bool) -> (EmojiProvider, Arc<MemoryKeyValueStore>) {
    let store = Arc::new(MemoryKeyValueStore::new());
    let provider = EmojiProvider::with_store(catalog_json(), store.clone(), include_skin_tone_variants).unwrap();
    (provider, store)
}

pub fn emoji(value: &str) -> Emoji {
    Emoji::new(value, HashMap::new())
}

pub fn values(emojis: &[Emoji]) -> Vec<String> {
    emojis.iter().map(|e| e.value.clone()).collect()
}
