//! Common error types for YTN

use thiserror::Error;

/// Common result type for YTN operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across YTN crates
///
/// The first four variants are the user-facing failure kinds of a single
/// annotation action. Every one of them is terminal for that action: nothing
/// is retried and no local state is rolled back, because local state only
/// changes after the API confirms success.
#[derive(Error, Debug)]
pub enum Error {
    /// Request rejected by the server or server unreachable
    #[error("Network error: {0}")]
    Network(String),

    /// Missing author/text, malformed URL, or other rejected user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Player has no current playback time to stamp an annotation with
    #[error("Player is not ready")]
    PlayerNotReady,

    /// Referenced annotation or project does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Requested status value or transition is not allowed
    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON decoding error (wraps serde_json::Error)
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl Error {
    /// Short machine-readable kind, used in events and CLI output
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Network(_) => "network_failure",
            Error::InvalidInput(_) => "invalid_input",
            Error::PlayerNotReady => "player_not_ready",
            Error::NotFound(_) => "not_found",
            Error::InvalidStatus(_) => "invalid_status",
            Error::Config(_) => "config",
            Error::Io(_) => "io",
            Error::Parse(_) => "parse",
        }
    }
}
