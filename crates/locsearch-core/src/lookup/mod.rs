// crates/locsearch-core/src/lookup/mod.rs

//! # Lookup Backends
//!
//! The query-by-prefix endpoint a session talks to. The session only sees
//! the [`Lookup`] trait; which transport sits behind it is the host's choice.

use crate::error::LookupError;
use crate::model::Suggestion;
use async_trait::async_trait;
use std::sync::Arc;

#[cfg(feature = "json")]
mod dataset;
#[cfg(feature = "http")]
mod http;

#[cfg(feature = "json")]
pub use dataset::DatasetLookup;
#[cfg(feature = "http")]
pub use http::HttpLookup;

/// A prefix lookup returning at most `limit` suggestions in relevance order.
///
/// Implementations do not need to honour cancellation: a superseded call may
/// run to completion and its result is discarded by the session.
#[async_trait]
pub trait Lookup: Send + Sync + 'static {
    async fn lookup(&self, q: &str, limit: usize) -> Result<Vec<Suggestion>, LookupError>;
}

#[async_trait]
impl<L: Lookup + ?Sized> Lookup for Arc<L> {
    async fn lookup(&self, q: &str, limit: usize) -> Result<Vec<Suggestion>, LookupError> {
        (**self).lookup(q, limit).await
    }
}

#[async_trait]
impl<L: Lookup + ?Sized> Lookup for Box<L> {
    async fn lookup(&self, q: &str, limit: usize) -> Result<Vec<Suggestion>, LookupError> {
        (**self).lookup(q, limit).await
    }
}
