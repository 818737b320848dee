// crates/locsearch-core/src/lifecycle.rs

//! # Request Lifecycle
//!
//! Owns the single lookup that is allowed to change session state. Every
//! issue bumps the generation; a completion is applied only while its
//! generation is still the latest. Cancelling the superseded task is an
//! optimisation on top of that check, never a replacement for it.

use crate::error::{FailureKind, LookupError};
use crate::model::{Generation, Query, Suggestion, SuggestionList};
use tokio_util::sync::CancellationToken;

/// A lookup the driver should run now.
#[derive(Debug, Clone)]
pub struct Issued {
    pub generation: Generation,
    pub query: Query,
    pub limit: usize,
    /// Cancelled when this lookup is superseded (if aborting is enabled).
    pub cancel: CancellationToken,
}

/// Terminal result of the latest lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success(SuggestionList),
    Empty,
    Error(FailureKind),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    Current(Outcome),
    /// Superseded or session destroyed; must not touch state.
    Stale,
}

#[derive(Debug)]
struct InFlight {
    generation: Generation,
    cancel: CancellationToken,
}

#[derive(Debug)]
pub struct RequestLifecycle {
    latest: Generation,
    in_flight: Option<InFlight>,
    limit: usize,
    abort_superseded: bool,
}

impl RequestLifecycle {
    pub fn new(limit: usize, abort_superseded: bool) -> Self {
        RequestLifecycle {
            latest: Generation::ZERO,
            in_flight: None,
            limit,
            abort_superseded,
        }
    }

    /// Starts a lookup for `query` under a new generation, superseding any
    /// outstanding one. Returns `None` once the lifecycle is poisoned.
    pub fn issue(&mut self, query: Query) -> Option<Issued> {
        if self.is_poisoned() {
            return None;
        }
        self.release_in_flight();
        self.latest = self.latest.next();

        let cancel = CancellationToken::new();
        self.in_flight = Some(InFlight {
            generation: self.latest,
            cancel: cancel.clone(),
        });
        tracing::debug!(generation = %self.latest, query = %query, "issuing lookup");

        Some(Issued {
            generation: self.latest,
            query,
            limit: self.limit,
            cancel,
        })
    }

    /// Invalidates the outstanding lookup without issuing a new one.
    pub fn supersede(&mut self) -> Option<Generation> {
        if self.is_poisoned() {
            return None;
        }
        let superseded = self.release_in_flight();
        if superseded.is_some() {
            self.latest = self.latest.next();
        }
        superseded
    }

    /// Resolves a completion. Only the latest generation gets through.
    pub fn complete(
        &mut self,
        generation: Generation,
        result: Result<Vec<Suggestion>, LookupError>,
    ) -> Applied {
        if generation != self.latest || self.is_poisoned() {
            tracing::trace!(%generation, latest = %self.latest, "dropping stale completion");
            return Applied::Stale;
        }
        if self.in_flight.as_ref().map(|f| f.generation) == Some(generation) {
            self.in_flight = None;
        }

        let outcome = match result {
            Ok(items) if items.is_empty() => Outcome::Empty,
            Ok(items) => Outcome::Success(SuggestionList::new(generation, items)),
            Err(e) => {
                tracing::warn!(%generation, error = %e, "location lookup failed");
                Outcome::Error(e.kind())
            }
        };
        Applied::Current(outcome)
    }

    /// Permanently disables the lifecycle. Any later completion is stale.
    pub fn poison(&mut self) {
        self.release_in_flight();
        self.latest = Generation::POISONED;
    }

    pub fn is_poisoned(&self) -> bool {
        self.latest == Generation::POISONED
    }

    pub fn latest(&self) -> Generation {
        self.latest
    }

    pub fn in_flight(&self) -> Option<Generation> {
        self.in_flight.as_ref().map(|f| f.generation)
    }

    fn release_in_flight(&mut self) -> Option<Generation> {
        let prior = self.in_flight.take()?;
        if self.abort_superseded {
            prior.cancel.cancel();
        }
        Some(prior.generation)
    }
}
