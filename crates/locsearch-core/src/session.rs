// crates/locsearch-core/src/session.rs

//! # Search Session
//!
//! The record behind one search surface. It wires the debouncer, the
//! request lifecycle and the selection together and speaks the host
//! contract: the host owns the committed value and pushes it in through
//! [`SearchSession::set_value`]; the session reports user commits and
//! invalidations as [`Command::Notify`].
//!
//! Every method is a synchronous transition. Side effects the session can
//! not perform itself (clocks, network, callbacks) are returned as
//! [`Command`]s, in the order they must be carried out.

use crate::config::SearchConfig;
use crate::debounce::{Debouncer, Decision, TimerId};
use crate::error::LookupError;
use crate::lifecycle::{Applied, Issued, Outcome, RequestLifecycle};
use crate::model::{Generation, Query, SelectedLocation, Suggestion, SuggestionList};
use crate::selection::{ListState, Selection};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pointer {
    /// Hovering the row at this index.
    Hover(usize),
    /// Clicking the row at this index.
    Select(usize),
    /// Pressing anywhere outside the component.
    Outside,
}

#[derive(Debug, Clone)]
pub enum Command {
    /// Start the debounce clock; replaces any clock already running.
    ArmTimer { timer: TimerId, delay: Duration },
    /// Stop the debounce clock.
    CancelTimer,
    /// Run this lookup and report back with [`SearchSession::completed`].
    Fetch(Issued),
    /// Tell the host its value changed.
    Notify(Option<SelectedLocation>),
}

#[derive(Debug)]
pub struct SearchSession {
    text: String,
    committed: Option<SelectedLocation>,
    debouncer: Debouncer,
    lifecycle: RequestLifecycle,
    selection: Selection,
    loading: bool,
    destroyed: bool,
}

impl SearchSession {
    /// Mounts a session showing the host's current `value`.
    pub fn new(config: &SearchConfig, value: Option<SelectedLocation>) -> Self {
        SearchSession {
            text: value
                .as_ref()
                .map(|v| v.display_label.clone())
                .unwrap_or_default(),
            committed: value,
            debouncer: Debouncer::new(config.min_query_chars, config.debounce),
            lifecycle: RequestLifecycle::new(config.limit, config.abort_superseded),
            selection: Selection::new(),
            loading: false,
            destroyed: false,
        }
    }

    /// The user edited the text field.
    pub fn input(&mut self, text: impl Into<String>) -> Vec<Command> {
        if self.destroyed {
            return Vec::new();
        }
        let mut out = Vec::new();
        self.text = text.into();

        if self
            .committed
            .as_ref()
            .is_some_and(|c| c.display_label != self.text)
        {
            self.committed = None;
            out.push(Command::Notify(None));
        }
        self.selection.undismiss();
        // Whatever was in flight answers an older text now.
        self.lifecycle.supersede();

        match self.debouncer.schedule(Query::new(&self.text)) {
            Decision::TooShort { cancelled } => {
                if cancelled.is_some() {
                    out.push(Command::CancelTimer);
                }
                self.selection.clear();
                self.loading = false;
            }
            Decision::Armed { timer, delay, .. } => {
                tracing::debug!(text = %self.text, ?delay, "search armed");
                self.loading = true;
                out.push(Command::ArmTimer { timer, delay });
            }
        }
        out
    }

    /// The debounce clock for `timer` elapsed.
    pub fn timer_fired(&mut self, timer: TimerId) -> Vec<Command> {
        if self.destroyed {
            return Vec::new();
        }
        let Some(query) = self.debouncer.fire(timer) else {
            tracing::trace!(?timer, "ignoring replaced timer");
            return Vec::new();
        };
        self.lifecycle
            .issue(query)
            .map(Command::Fetch)
            .into_iter()
            .collect()
    }

    /// A lookup finished. Stale completions leave the session untouched.
    pub fn completed(
        &mut self,
        generation: Generation,
        result: Result<Vec<Suggestion>, LookupError>,
    ) -> Applied {
        let applied = self.lifecycle.complete(generation, result);
        if let Applied::Current(outcome) = &applied {
            self.loading = false;
            match outcome {
                Outcome::Success(list) => {
                    tracing::debug!(%generation, count = list.len(), "suggestions applied");
                    self.selection.replace(list.clone());
                }
                Outcome::Empty | Outcome::Error(_) => self.selection.clear(),
            }
        }
        applied
    }

    pub fn key(&mut self, key: Key) -> Vec<Command> {
        if self.destroyed {
            return Vec::new();
        }
        match key {
            Key::ArrowDown => self.selection.move_down(),
            Key::ArrowUp => self.selection.move_up(),
            Key::Escape => self.selection.dismiss(),
            Key::Enter => {
                if let Some(selected) = self.selection.commit_highlighted() {
                    return self.commit(selected);
                }
            }
        }
        Vec::new()
    }

    pub fn pointer(&mut self, pointer: Pointer) -> Vec<Command> {
        if self.destroyed {
            return Vec::new();
        }
        match pointer {
            Pointer::Hover(index) => self.selection.hover(index),
            Pointer::Outside => self.selection.dismiss(),
            Pointer::Select(index) => {
                if let Some(selected) = self.selection.commit_at(index) {
                    return self.commit(selected);
                }
            }
        }
        Vec::new()
    }

    /// The input gained focus; held suggestions become visible again.
    pub fn focus(&mut self) {
        if !self.destroyed {
            self.selection.undismiss();
        }
    }

    /// The host pushed its value in. Never echoes a notification back.
    pub fn set_value(&mut self, value: Option<SelectedLocation>) -> Vec<Command> {
        if self.destroyed {
            return Vec::new();
        }
        let mut out = Vec::new();
        match value {
            Some(v) => {
                if self.committed.as_ref() == Some(&v) && self.text == v.display_label {
                    return out;
                }
                self.text = v.display_label.clone();
                self.committed = Some(v);
            }
            // A null we caused ourselves (by editing) is already reflected.
            None if self.committed.is_none() => return out,
            None => {
                self.committed = None;
                self.text.clear();
            }
        }
        self.halt(&mut out);
        self.selection.clear();
        out
    }

    /// Unmounts the session. Afterwards every event is ignored and every
    /// completion is stale.
    pub fn destroy(&mut self) -> Vec<Command> {
        if self.destroyed {
            return Vec::new();
        }
        let mut out = Vec::new();
        self.halt(&mut out);
        self.lifecycle.poison();
        self.destroyed = true;
        out
    }

    fn commit(&mut self, selected: SelectedLocation) -> Vec<Command> {
        let mut out = Vec::new();
        self.halt(&mut out);
        self.text = selected.display_label.clone();
        self.committed = Some(selected.clone());
        tracing::debug!(label = %selected.display_label, "location committed");
        out.push(Command::Notify(Some(selected)));
        out
    }

    /// Stops the pending timer and the in-flight lookup.
    fn halt(&mut self, out: &mut Vec<Command>) {
        if self.debouncer.cancel().is_some() {
            out.push(Command::CancelTimer);
        }
        self.lifecycle.supersede();
        self.loading = false;
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn selected(&self) -> Option<&SelectedLocation> {
        self.committed.as_ref()
    }

    pub fn suggestions(&self) -> &SuggestionList {
        self.selection.suggestions()
    }

    /// Highlighted row; `None` is the "-1" of the dropdown.
    pub fn highlighted(&self) -> Option<usize> {
        self.selection.highlighted()
    }

    pub fn is_open(&self) -> bool {
        self.selection.is_open()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn list_state(&self) -> ListState {
        self.selection.state(self.loading)
    }

    pub fn latest_generation(&self) -> Generation {
        self.lifecycle.latest()
    }

    pub fn in_flight(&self) -> Option<Generation> {
        self.lifecycle.in_flight()
    }

    pub fn pending_timer(&self) -> Option<TimerId> {
        self.debouncer.pending()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}
