use criterion::{criterion_group, criterion_main, Criterion};
use picker::{EmojiProvider, EmojiProviderApi, MemoryKeyValueStore};
use serde_json::json;
use std::sync::Arc;

const CATALOG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/catalog.json");

/// Fixture catalog plus a few thousand synthetic entries, so the trie is
/// closer to the size of the real catalog
fn catalog_json() -> String {
    let fixture = std::fs::read_to_string(CATALOG_PATH).expect("Failed to read fixture catalog");
    let mut catalog: serde_json::Value = serde_json::from_str(&fixture).expect("Invalid fixture catalog");

    let words = ["face", "hand", "person", "animal", "food", "travel", "symbol", "flag", "heart", "star"];
    let emojis: Vec<_> = (0..3000u32)
        .filter_map(|i| char::from_u32(0x20000 + i))
        .enumerate()
        .map(|(i, c)| {
            json!({
                "key": format!("synthetic-{}", i),
                "value": c.to_string(),
                "keywords": {
                    "en": [format!("{} {}", words[i % words.len()], i), words[(i / 7) % words.len()]],
                    "fr": [format!("élément {}", i)]
                }
            })
        })
        .collect();

    if let Some(categories) = catalog["categories"].as_array_mut() {
        categories.push(json!({ "name": "objects", "emojis": emojis }));
    }
    catalog.to_string()
}

fn setup_provider() -> EmojiProvider {
    let store = Arc::new(MemoryKeyValueStore::new());
    EmojiProvider::with_store(catalog_json(), store, true).expect("Failed to build provider")
}

fn bench_find(c: &mut Criterion) {
    let provider = setup_provider();

    let queries = vec![
        ("single_char", "a"),
        ("short_2char", "ha"),
        ("word", "heart"),
        ("multi_word", "hand 12"),
        ("diacritic", "element 42"),
        ("glyph", "👍"),
        ("toned_glyph", "🧑🏽\u{200D}💻"),
        ("miss", "xylophone"),
    ];

    let mut group = c.benchmark_group("find");
    group.sample_size(20);

    for (name, query) in queries {
        group.bench_function(name, |b| b.iter(|| provider.find(query.to_string())));
    }
    group.finish();
}

fn bench_build(c: &mut Criterion) {
    let json = catalog_json();

    let mut group = c.benchmark_group("build");
    group.sample_size(10);
    group.bench_function("provider", |b| {
        b.iter(|| {
            let store = Arc::new(MemoryKeyValueStore::new());
            EmojiProvider::with_store(json.clone(), store, true).unwrap()
        })
    });
    group.finish();
}

criterion_group!(benches, bench_find, bench_build);
criterion_main!(benches);
