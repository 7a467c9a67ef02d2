//! Emoji Picker Core - Rust business logic for the emoji picker
//!
//! Loads the emoji catalog, answers glyph and keyword searches through a
//! case- and diacritic-folded substring index, resolves skin-tone variants,
//! and ranks frequently used emoji from persisted usage history.
//!
//! Types are exported via UniFFI proc-macros (#[derive(uniffi::Record/Enum)]).

pub mod catalog;
pub mod database;
mod index;
pub mod interface;
pub mod normalize;
pub mod persistence;
pub mod preferences;
mod provider;
mod trie;
pub mod usage;
pub mod variation;

pub use catalog::Catalog;
pub use database::SqliteKeyValueStore;
pub use interface::*;
pub use persistence::MemoryKeyValueStore;
pub use provider::EmojiProvider;

uniffi::setup_scaffolding!("picker");
