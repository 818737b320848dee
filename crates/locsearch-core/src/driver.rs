// crates/locsearch-core/src/driver.rs

//! # Session Driver
//!
//! Runs a [`SearchSession`] on one tokio task. Inputs from the UI, debounce
//! wake-ups and lookup completions are handled strictly one at a time, so the
//! session itself needs no locking.
//!
//! - The debounce clock is a single [`Sleep`] owned by the loop. Re-arming
//!   drops the previous one; a wake-up that still slips through is rejected by
//!   the session's timer id check.
//! - Each lookup runs on its own task and reports back over a channel. A
//!   superseded task is cancelled when the config allows it; either way its
//!   completion goes through the generation check.
//! - Once the loop exits the session is destroyed and the completion channel
//!   closes, so late completions go nowhere.

use crate::config::SearchConfig;
use crate::debounce::TimerId;
use crate::error::{Error, LookupError, Result};
use crate::lifecycle::Issued;
use crate::lookup::Lookup;
use crate::model::{Generation, SelectedLocation, Suggestion, SuggestionList};
use crate::selection::ListState;
use crate::session::{Command, Key, Pointer, SearchSession};
use std::pin::Pin;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::time::Sleep;

/// Everything a renderer needs, published after every handled event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub text: String,
    pub suggestions: SuggestionList,
    pub is_open: bool,
    pub highlighted: Option<usize>,
    pub is_loading: bool,
    pub selected: Option<SelectedLocation>,
    pub list: ListState,
}

impl SessionSnapshot {
    fn of(session: &SearchSession) -> Self {
        SessionSnapshot {
            text: session.text().to_string(),
            suggestions: session.suggestions().clone(),
            is_open: session.is_open(),
            highlighted: session.highlighted(),
            is_loading: session.is_loading(),
            selected: session.selected().cloned(),
            list: session.list_state(),
        }
    }
}

#[derive(Debug)]
enum Input {
    Text(String),
    Key(Key),
    Pointer(Pointer),
    Focus,
    SetValue(Option<SelectedLocation>),
    Shutdown,
}

#[derive(Debug)]
struct Completion {
    generation: Generation,
    result: std::result::Result<Vec<Suggestion>, LookupError>,
}

struct ArmedTimer {
    timer: TimerId,
    sleep: Pin<Box<Sleep>>,
}

/// Receives the host notifications: `Some` on commit, `None` when an edit
/// invalidated the committed value.
pub type Changes = mpsc::UnboundedReceiver<Option<SelectedLocation>>;

/// Cloneable sender side of a running session.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    tx: mpsc::UnboundedSender<Input>,
    snapshot: watch::Receiver<SessionSnapshot>,
}

impl SessionHandle {
    /// The text field now reads `text`.
    pub fn input(&self, text: impl Into<String>) -> Result<()> {
        self.send(Input::Text(text.into()))
    }

    pub fn key(&self, key: Key) -> Result<()> {
        self.send(Input::Key(key))
    }

    pub fn pointer(&self, pointer: Pointer) -> Result<()> {
        self.send(Input::Pointer(pointer))
    }

    pub fn focus(&self) -> Result<()> {
        self.send(Input::Focus)
    }

    /// The host changed its value.
    pub fn set_value(&self, value: Option<SelectedLocation>) -> Result<()> {
        self.send(Input::SetValue(value))
    }

    /// Destroys the session. Also happens when the last handle is dropped.
    pub fn shutdown(&self) -> Result<()> {
        self.send(Input::Shutdown)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshot.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshot.clone()
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    fn send(&self, input: Input) -> Result<()> {
        self.tx.send(input).map_err(|_| Error::SessionClosed)
    }
}

pub struct SessionDriver<L> {
    session: SearchSession,
    lookup: Arc<L>,
    inputs: mpsc::UnboundedReceiver<Input>,
    completions_tx: mpsc::UnboundedSender<Completion>,
    completions: mpsc::UnboundedReceiver<Completion>,
    timer: Option<ArmedTimer>,
    changes: mpsc::UnboundedSender<Option<SelectedLocation>>,
    snapshot: watch::Sender<SessionSnapshot>,
}

impl<L: Lookup> SessionDriver<L> {
    /// Builds a driver without starting it; see [`SessionDriver::run`].
    pub fn new(
        lookup: L,
        config: SearchConfig,
        value: Option<SelectedLocation>,
    ) -> Result<(Self, SessionHandle, Changes)> {
        config.validate()?;
        let session = SearchSession::new(&config, value);

        let (tx, inputs) = mpsc::unbounded_channel();
        let (completions_tx, completions) = mpsc::unbounded_channel();
        let (changes_tx, changes) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(SessionSnapshot::of(&session));

        let driver = SessionDriver {
            session,
            lookup: Arc::new(lookup),
            inputs,
            completions_tx,
            completions,
            timer: None,
            changes: changes_tx,
            snapshot: snapshot_tx,
        };
        let handle = SessionHandle {
            tx,
            snapshot: snapshot_rx,
        };
        Ok((driver, handle, changes))
    }

    /// Builds a driver and runs it on the current tokio runtime.
    pub fn spawn(
        lookup: L,
        config: SearchConfig,
        value: Option<SelectedLocation>,
    ) -> Result<(SessionHandle, Changes)> {
        let runtime =
            tokio::runtime::Handle::try_current().map_err(|e| Error::Runtime(e.to_string()))?;
        let (driver, handle, changes) = Self::new(lookup, config, value)?;
        runtime.spawn(driver.run());
        Ok((handle, changes))
    }

    /// Handles events until shutdown, then destroys the session.
    pub async fn run(mut self) {
        loop {
            let armed = self.timer.is_some();
            tokio::select! {
                input = self.inputs.recv() => match input {
                    Some(Input::Shutdown) | None => break,
                    Some(input) => {
                        let commands = self.dispatch(input);
                        self.execute(commands);
                    }
                },
                Some(done) = self.completions.recv() => {
                    self.session.completed(done.generation, done.result);
                }
                timer = elapsed(&mut self.timer), if armed => {
                    self.timer = None;
                    let commands = self.session.timer_fired(timer);
                    self.execute(commands);
                }
            }
            self.publish();
        }

        let commands = self.session.destroy();
        self.execute(commands);
        self.publish();
        tracing::debug!("search session destroyed");
    }

    fn dispatch(&mut self, input: Input) -> Vec<Command> {
        match input {
            Input::Text(text) => self.session.input(text),
            Input::Key(key) => self.session.key(key),
            Input::Pointer(pointer) => self.session.pointer(pointer),
            Input::Focus => {
                self.session.focus();
                Vec::new()
            }
            Input::SetValue(value) => self.session.set_value(value),
            Input::Shutdown => Vec::new(),
        }
    }

    fn execute(&mut self, commands: Vec<Command>) {
        for command in commands {
            match command {
                Command::ArmTimer { timer, delay } => {
                    self.timer = Some(ArmedTimer {
                        timer,
                        sleep: Box::pin(tokio::time::sleep(delay)),
                    });
                }
                Command::CancelTimer => self.timer = None,
                Command::Fetch(issued) => self.fetch(issued),
                Command::Notify(value) => {
                    // The host may have stopped listening; the session goes on.
                    let _ = self.changes.send(value);
                }
            }
        }
    }

    fn fetch(&self, issued: Issued) {
        let lookup = Arc::clone(&self.lookup);
        let tx = self.completions_tx.clone();
        let Issued {
            generation,
            query,
            limit,
            cancel,
        } = issued;

        tokio::spawn(async move {
            let result = tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::trace!(%generation, "lookup cancelled");
                    return;
                }
                result = lookup.lookup(query.as_str(), limit) => result,
            };
            // Closed once the session is gone.
            let _ = tx.send(Completion { generation, result });
        });
    }

    fn publish(&self) {
        let next = SessionSnapshot::of(&self.session);
        self.snapshot.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
    }
}

async fn elapsed(timer: &mut Option<ArmedTimer>) -> TimerId {
    match timer {
        Some(armed) => {
            armed.sleep.as_mut().await;
            armed.timer
        }
        None => std::future::pending().await,
    }
}
