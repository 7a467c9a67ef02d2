//! Query an emoji catalog from the command line
//!
//! Uses the same `EmojiProvider` as the app, backed by a SQLite store, so
//! usage history and skin-tone preferences written here are what the picker
//! would see.
//!
//! Run with: cargo run --bin emoji-query -- --catalog emoji.json find heart

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use picker::{Emoji, EmojiProvider, EmojiProviderApi, SkinTone};
use std::collections::HashMap;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the catalog JSON
    #[arg(short, long)]
    catalog: String,

    /// Path to the SQLite database holding usage and preferences
    #[arg(short, long, default_value = "picker.sqlite")]
    db_path: String,

    /// List skin-tone variants in categories and search results
    #[arg(long)]
    include_skin_tone_variants: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search by glyph or keyword
    Find { query: String },
    /// Resolve the variant of an emoji for two skin tones
    Variation {
        emoji: String,
        #[arg(value_enum, default_value_t = Tone::Neutral)]
        tone1: Tone,
        #[arg(value_enum, default_value_t = Tone::Neutral)]
        tone2: Tone,
    },
    /// Record a selection
    Record {
        emoji: String,
        /// Number of selections to record
        #[arg(short = 'n', long, default_value_t = 1)]
        times: usize,
    },
    /// Print the frequently used list
    Top,
    /// Forget all usage history
    Reset,
    /// Show or change the stored skin tones
    Tone {
        #[arg(long, value_enum)]
        first: Option<Tone>,
        #[arg(long, value_enum)]
        second: Option<Tone>,
    },
    /// Print category sizes
    Categories,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Tone {
    Neutral,
    Light,
    MediumLight,
    Medium,
    MediumDark,
    Dark,
}

impl From<Tone> for SkinTone {
    fn from(tone: Tone) -> Self {
        match tone {
            Tone::Neutral => SkinTone::Neutral,
            Tone::Light => SkinTone::Light,
            Tone::MediumLight => SkinTone::MediumLight,
            Tone::Medium => SkinTone::Medium,
            Tone::MediumDark => SkinTone::MediumDark,
            Tone::Dark => SkinTone::Dark,
        }
    }
}

/// Persistence anomalies are logged at `warn`; `RUST_LOG` overrides the level
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn print_emojis(emojis: &[Emoji]) {
    for emoji in emojis {
        let keywords = emoji.keywords("en").join(", ");
        println!("{}\t{}", emoji.value, keywords);
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing();

    let provider = EmojiProvider::new(
        args.catalog.clone(),
        args.db_path.clone(),
        args.include_skin_tone_variants,
    )
    .with_context(|| format!("Failed to open catalog {} with database {}", args.catalog, args.db_path))?;

    match args.command {
        Command::Find { query } => {
            let found = provider.find(query);
            print_emojis(&found);
            eprintln!("{} result(s)", found.len());
        }
        Command::Variation { emoji, tone1, tone2 } => {
            match provider.variation(emoji.clone(), tone1.into(), tone2.into()) {
                Some(variant) => println!("{}", variant.value),
                None => println!("no variant of {} for {:?}/{:?}", emoji, tone1, tone2),
            }
        }
        Command::Record { emoji, times } => {
            let emoji = Emoji::new(emoji, HashMap::new());
            for _ in 0..times {
                provider.record(emoji.clone());
            }
            println!("{} used {} time(s)", emoji.value, provider.usage_count(&emoji.value));
        }
        Command::Top => {
            for (rank, emoji) in provider.frequently_used().iter().enumerate() {
                println!(
                    "{:>2}. {}\t{}",
                    rank + 1,
                    provider.preferred_variant(emoji.clone()).value,
                    provider.usage_count(&emoji.value)
                );
            }
        }
        Command::Reset => {
            provider.reset_frequently_used();
            println!("Usage history cleared");
        }
        Command::Tone { first, second } => {
            if let Some(tone) = first {
                provider.set_skin_tone1(tone.into());
            }
            if let Some(tone) = second {
                provider.set_skin_tone2(tone.into());
            }
            let (tone1, tone2) = (provider.skin_tone1(), provider.skin_tone2());
            println!("skin tone 1: {:?} {}", tone1, tone1.swatch());
            println!("skin tone 2: {:?} {}", tone2, tone2.swatch());
        }
        Command::Categories => {
            for category in provider.categories() {
                println!(
                    "{:<16} {:>5} emoji {:>5} variation groups",
                    category.name.as_str(),
                    category.emojis.len(),
                    category.variations.len()
                );
            }
        }
    }

    Ok(())
}
