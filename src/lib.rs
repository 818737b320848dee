//! locsearch-rs
//! ============
//!
//! Workspace crate re-exporting [`locsearch_core`], so the runnable demos
//! under `demos/` can be started with `cargo run --example <name>` from the
//! repository root.
pub use locsearch_core::*;
