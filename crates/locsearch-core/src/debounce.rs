// crates/locsearch-core/src/debounce.rs

//! # Query Debouncer
//!
//! Collapses keystroke-driven query changes into at most one pending timer.
//! The debouncer only decides; arming the real clock is the driver's job.
//! Each armed timer gets a fresh [`TimerId`] and [`Debouncer::fire`] only
//! accepts the id that is currently pending, so a replaced timer can never
//! fire even if its wake-up was already queued.

use crate::model::Query;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

/// What to do with the latest input text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Below the minimum length: no lookup, clear the list now.
    TooShort { cancelled: Option<TimerId> },
    /// Start a timer of `delay`; `replaced` must no longer fire.
    Armed {
        timer: TimerId,
        delay: Duration,
        replaced: Option<TimerId>,
    },
}

#[derive(Debug)]
struct Pending {
    id: TimerId,
    query: Query,
}

#[derive(Debug)]
pub struct Debouncer {
    min_chars: usize,
    delay: Duration,
    next_id: u64,
    pending: Option<Pending>,
}

impl Debouncer {
    pub fn new(min_chars: usize, delay: Duration) -> Self {
        Debouncer {
            min_chars,
            delay,
            next_id: 0,
            pending: None,
        }
    }

    /// Considers `query` for a lookup. Callable on every keystroke.
    pub fn schedule(&mut self, query: Query) -> Decision {
        let previous = self.pending.take().map(|p| p.id);

        if query.char_len() < self.min_chars {
            return Decision::TooShort {
                cancelled: previous,
            };
        }

        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.pending = Some(Pending { id, query });
        Decision::Armed {
            timer: id,
            delay: self.delay,
            replaced: previous,
        }
    }

    /// The timer `id` elapsed. Returns the query to issue, or `None` when
    /// `id` is not the pending timer.
    pub fn fire(&mut self, id: TimerId) -> Option<Query> {
        match &self.pending {
            Some(p) if p.id == id => self.pending.take().map(|p| p.query),
            _ => None,
        }
    }

    /// Drops the pending timer, if any, and returns its id.
    pub fn cancel(&mut self) -> Option<TimerId> {
        self.pending.take().map(|p| p.id)
    }

    pub fn pending(&self) -> Option<TimerId> {
        self.pending.as_ref().map(|p| p.id)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}
