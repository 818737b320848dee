//! locsearch — Command-line interface for locsearch-core
//!
//! Talks to the location lookup service (or a local dataset) either with a
//! single lookup or through a full typeahead session driven from stdin.
//!
//! Usage examples
//! --------------
//!
//! - One lookup against the service
//!   $ locsearch lookup sacr
//!   $ locsearch --api-url https://api.example.org lookup port
//!
//! - One lookup against a local dataset
//!   $ locsearch --dataset crates/locsearch-core/data/us_cities.sample.json lookup san
//!
//! - Interactive session (type text, then :down, :enter, ...)
//!   $ locsearch -d cities.json.gz interactive
//!   $ printf 'Sacr\n:wait 300\n:down\n:enter\n' | locsearch -d cities.json interactive
mod args;
mod render;
mod script;

use crate::args::{CliArgs, Commands};
use crate::script::Event;
use anyhow::Context;
use clap::Parser;
use locsearch_core::prelude::*;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    setup_tracing(args.verbose);

    let lookup = build_lookup(&args)?;
    let config = SearchConfig::default()
        .with_limit(args.limit)
        .with_debounce(Duration::from_millis(args.debounce_ms));
    config.validate()?;

    match args.command {
        Commands::Lookup { query } => {
            let hits = lookup
                .lookup(&query, config.limit)
                .await
                .with_context(|| format!("lookup for {query:?} failed"))?;
            if hits.is_empty() {
                println!("No locations found matching: {query}");
            } else {
                for hit in &hits {
                    println!("{}", render::row(hit));
                }
            }
        }

        Commands::Interactive => interactive(lookup, config).await?,
    }

    Ok(())
}

fn build_lookup(args: &CliArgs) -> anyhow::Result<Box<dyn Lookup>> {
    if let Some(path) = &args.dataset {
        let db = DatasetLookup::load_from_path(path)
            .with_context(|| format!("loading dataset {}", path.display()))?;
        tracing::info!(entries = db.len(), path = %path.display(), "using local dataset");
        return Ok(Box::new(db));
    }

    #[cfg(feature = "http")]
    {
        let client = ClientConfig::new(&args.api_url)
            .with_timeout(Duration::from_secs(args.timeout_secs));
        let http = HttpLookup::new(client)?;
        tracing::info!(url = http.url(), "using lookup service");
        Ok(Box::new(http))
    }

    #[cfg(not(feature = "http"))]
    {
        anyhow::bail!("built without the 'http' feature; pass --dataset <PATH>")
    }
}

async fn interactive(lookup: Box<dyn Lookup>, config: SearchConfig) -> anyhow::Result<()> {
    let (handle, mut changes) = SessionDriver::spawn(lookup, config, None)?;

    let mut snapshots = handle.subscribe();
    let renderer = tokio::spawn(async move {
        while snapshots.changed().await.is_ok() {
            let snap = snapshots.borrow_and_update().clone();
            println!("{}", render::render(&snap));
        }
    });
    let notifier = tokio::spawn(async move {
        while let Some(change) = changes.recv().await {
            match change {
                Some(selected) => println!("= selected {}", selected.display_label),
                None => println!("= selection cleared"),
            }
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let event = match script::parse_line(&line) {
            Ok(event) => event,
            Err(e) => {
                eprintln!("{e}");
                continue;
            }
        };
        match event {
            Event::Text(text) => handle.input(text)?,
            Event::Key(key) => handle.key(key)?,
            Event::Pointer(pointer) => handle.pointer(pointer)?,
            Event::Focus => handle.focus()?,
            Event::Clear => handle.set_value(None)?,
            Event::Wait(d) => tokio::time::sleep(d).await,
            Event::Quit => break,
        }
    }

    handle.shutdown()?;
    drop(handle);
    renderer.await?;
    notifier.await?;
    Ok(())
}

fn setup_tracing(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("locsearch_core=debug,locsearch=debug,info"),
        _ => EnvFilter::new("locsearch_core=trace,locsearch=trace,debug"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
