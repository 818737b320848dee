use clap::{ArgAction, Parser, Subcommand};
use locsearch_core::config::DEFAULT_API_URL;
use std::path::PathBuf;

/// CLI arguments for locsearch
#[derive(Debug, Parser)]
#[command(
    name = "locsearch",
    version,
    about = "CLI for querying the location lookup endpoint and driving a typeahead session"
)]
pub struct CliArgs {
    /// Base URL of the lookup service
    #[arg(long = "api-url", env = "LOCSEARCH_API_URL", default_value = DEFAULT_API_URL, global = true)]
    pub api_url: String,

    /// Answer from a local JSON (or .json.gz) dataset instead of the service
    #[arg(short = 'd', long = "dataset", global = true)]
    pub dataset: Option<PathBuf>,

    /// Maximum number of suggestions per lookup
    #[arg(long = "limit", default_value_t = 8, global = true)]
    pub limit: usize,

    /// Quiet period before a lookup is issued, in milliseconds
    #[arg(long = "debounce-ms", default_value_t = 150, global = true)]
    pub debounce_ms: u64,

    /// Request timeout for the lookup service, in seconds
    #[arg(long = "timeout-secs", default_value_t = 10, global = true)]
    pub timeout_secs: u64,

    /// More logging (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run a single lookup and print the suggestions
    Lookup {
        /// Prefix to look up (e.g. "Sacr")
        query: String,
    },

    /// Run a typeahead session fed from stdin, one event per line
    ///
    /// Plain lines replace the input text. Commands: :down :up :enter :esc
    /// :hover N :click N :outside :focus :clear :wait MS :quit
    Interactive,
}
