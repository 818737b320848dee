//! Basic usage example for locsearch-rs
//!
//! Drives a typeahead session against the bundled sample dataset: type,
//! move through the suggestions, commit one.

use locsearch_rs::prelude::*;
use std::path::PathBuf;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    println!("=== locsearch-rs Basic Session Example ===\n");

    let path: PathBuf = [
        env!("CARGO_MANIFEST_DIR"),
        "crates",
        "locsearch-core",
        "data",
        "us_cities.sample.json",
    ]
    .iter()
    .collect();
    let lookup = DatasetLookup::load_from_path(&path)?;
    println!("Loaded {} locations from {}\n", lookup.len(), path.display());

    let (handle, mut changes) = SessionDriver::spawn(lookup, SearchConfig::default(), None)?;
    let mut snapshots = handle.subscribe();

    // Keystrokes faster than the debounce window: only "Port" is looked up.
    for text in ["Po", "Por", "Port"] {
        handle.input(text)?;
        tokio::time::sleep(Duration::from_millis(40)).await;
    }

    let snap = snapshots.wait_for(|s| s.is_open).await?.clone();
    println!("Suggestions for {:?}:", snap.text);
    for (i, s) in snap.suggestions.items().iter().enumerate() {
        println!("  [{i}] {}  ({})", s.label(), s.region_name);
    }

    handle.key(Key::ArrowDown)?;
    handle.key(Key::ArrowDown)?;
    handle.key(Key::Enter)?;

    if let Some(Some(selected)) = changes.recv().await {
        println!("\nCommitted: {} ({})", selected.display_label, selected.region_name);
    }
    println!("Input now reads: {:?}", handle.snapshot().text);

    handle.shutdown()?;
    Ok(())
}
