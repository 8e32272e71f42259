//! Error types for cdmp-player
//!
//! Store actions never fail; these errors come from talking to the API
//! server and from parsing user commands.

use thiserror::Error;

/// Main error type for the player client
#[derive(Error, Debug)]
pub enum Error {
    /// Transport-level HTTP failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Server returned {status}: {message}")]
    Status { status: u16, message: String },

    /// Index document did not have the expected shape
    #[error("Index error: {0}")]
    Index(#[from] cdmp_common::Error),

    /// Unparseable command line
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    /// File id not present in the loaded index
    #[error("Unknown file id: {0}")]
    UnknownFile(String),
}

/// Convenience Result type using cdmp-player Error
pub type Result<T> = std::result::Result<T, Error>;
