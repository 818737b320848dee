// crates/locsearch-core/src/error.rs
use thiserror::Error;

/// Failure of one lookup call.
///
/// The session treats every variant the same way (results dropped, list
/// closed, loading stopped); the distinction exists for logging and for
/// direct callers of a [`crate::lookup::Lookup`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LookupError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("lookup endpoint returned status {0}")]
    Status(u16),

    #[error("malformed lookup response: {0}")]
    Decode(String),
}

/// Coarse classification of a [`LookupError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Network unreachable, timed out, or an unreadable body.
    Transport,
    /// The endpoint answered with a non-success status.
    Status,
}

impl LookupError {
    pub fn kind(&self) -> FailureKind {
        match self {
            LookupError::Transport(_) | LookupError::Decode(_) => FailureKind::Transport,
            LookupError::Status(_) => FailureKind::Status,
        }
    }
}

#[cfg(feature = "http")]
impl From<reqwest::Error> for LookupError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            LookupError::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            LookupError::Status(status.as_u16())
        } else {
            LookupError::Transport(e.to_string())
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "json")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Search session is closed")]
    SessionClosed,

    #[error("No async runtime: {0}")]
    Runtime(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_failures_count_as_transport() {
        assert_eq!(LookupError::Decode("eof".into()).kind(), FailureKind::Transport);
        assert_eq!(LookupError::Transport("refused".into()).kind(), FailureKind::Transport);
        assert_eq!(LookupError::Status(503).kind(), FailureKind::Status);
    }

    #[test]
    fn messages_name_the_cause() {
        assert_eq!(
            LookupError::Status(502).to_string(),
            "lookup endpoint returned status 502"
        );
        assert_eq!(
            Error::InvalidConfig("limit must be at least 1".into()).to_string(),
            "Invalid configuration: limit must be at least 1"
        );
    }
}
