//! Error handling example for locsearch-rs
//!
//! Shows how the pieces report problems: invalid configuration, missing
//! datasets, an unreachable lookup service, and a closed session.

use locsearch_rs::prelude::*;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    println!("=== locsearch-rs Error Handling Example ===\n");

    // Example 1: Rejected configuration
    println!("--- Example 1: Invalid configuration ---");
    match SearchConfig::default().with_limit(0).validate() {
        Ok(()) => println!("  unexpectedly valid"),
        Err(e) => println!("  ✗ {e}"),
    }
    println!();

    // Example 2: Missing dataset
    println!("--- Example 2: Loading a dataset that does not exist ---");
    match DatasetLookup::load_from_path("does/not/exist.json") {
        Ok(_) => println!("  unexpectedly loaded"),
        Err(e) => println!("  ✗ {e}"),
    }
    println!();

    // Example 3: Unreachable service. A direct lookup surfaces the error;
    // a session just closes its list.
    println!("--- Example 3: Lookup service unreachable ---");
    let client = ClientConfig::new("http://127.0.0.1:9").with_timeout(Duration::from_millis(500));
    let http = HttpLookup::new(client)?;
    match http.lookup("Sacr", 8).await {
        Ok(hits) => println!("  {} hits", hits.len()),
        Err(e) => println!("  ✗ {e} (kind: {:?})", e.kind()),
    }

    let (handle, _changes) = SessionDriver::spawn(http, SearchConfig::default(), None)?;
    let mut snapshots = handle.subscribe();
    handle.input("Sacr")?;
    snapshots.wait_for(|s| s.is_loading).await?;
    let snap = snapshots.wait_for(|s| !s.is_loading).await?.clone();
    println!("  session after failure: open={}, suggestions={}", snap.is_open, snap.suggestions.len());
    println!();

    // Example 4: Using a session after shutdown
    println!("--- Example 4: Closed session ---");
    handle.shutdown()?;
    tokio::time::sleep(Duration::from_millis(10)).await;
    match handle.input("Sacra") {
        Ok(()) => println!("  accepted"),
        Err(e) => println!("  ✗ {e}"),
    }

    Ok(())
}
