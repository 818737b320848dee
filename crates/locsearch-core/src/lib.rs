// crates/locsearch-core/src/lib.rs

//! # locsearch-core
//!
//! An incremental location search client: the user types, suggestions arrive
//! from a remote lookup endpoint, and a keyboard-navigable list commits a
//! structured [`SelectedLocation`] back to the host.
//!
//! The crate is split into three pure state machines and one async driver:
//!
//! - [`debounce::Debouncer`] collapses keystrokes into at most one armed timer.
//! - [`lifecycle::RequestLifecycle`] tags every issued lookup with a
//!   generation and drops completions that are no longer the latest.
//! - [`selection::Selection`] owns the visible list, the highlight and the
//!   open/closed state.
//! - [`driver::SessionDriver`] runs a [`session::SearchSession`] on a single
//!   tokio task, one event at a time.
//!
//! ```no_run
//! use locsearch_core::prelude::*;
//!
//! # async fn demo() -> locsearch_core::Result<()> {
//! let lookup = HttpLookup::new(ClientConfig::default())?;
//! let (handle, mut changes) = SessionDriver::spawn(lookup, SearchConfig::default(), None)?;
//!
//! handle.input("Sacr")?;
//! handle.key(Key::ArrowDown)?;
//! handle.key(Key::Enter)?;
//!
//! if let Some(Some(selected)) = changes.recv().await {
//!     println!("selected {}", selected.display_label);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod debounce;
pub mod driver;
pub mod error;
pub mod lifecycle;
pub mod lookup;
pub mod model;
pub mod selection;
pub mod session;

// Re-exports
pub use crate::config::{ClientConfig, SearchConfig};
pub use crate::error::{Error, FailureKind, LookupError, Result};
pub use crate::model::{Generation, Query, SelectedLocation, Suggestion, SuggestionList};

pub mod prelude {
    pub use crate::config::{ClientConfig, SearchConfig};
    pub use crate::driver::{SessionDriver, SessionHandle, SessionSnapshot};
    pub use crate::error::{Error, FailureKind, LookupError, Result};
    #[cfg(feature = "json")]
    pub use crate::lookup::DatasetLookup;
    #[cfg(feature = "http")]
    pub use crate::lookup::HttpLookup;
    pub use crate::lookup::Lookup;
    pub use crate::model::{SelectedLocation, Suggestion, SuggestionList};
    pub use crate::selection::ListState;
    pub use crate::session::{Key, Pointer, SearchSession};
}
