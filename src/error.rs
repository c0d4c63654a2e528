// src/error.rs
// =============================================================================
// Error types for the crawler core.
//
// Almost none of these reach the user as errors: the crawler folds them
// into the report as status lines and keeps going. They exist so every
// failure has a name while it travels from where it happened to where it
// gets reported.
//
// Rust concepts:
// - thiserror: derive Display and Error for an enum
// - #[from]: automatic conversion so the ? operator works
// =============================================================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckError {
    /// A wanted tag whose reference attribute could not be pulled out
    #[error("{0}")]
    MalformedReference(String),

    /// The root is neither a valid URL nor an openable file
    #[error("Can't open file {0}")]
    UnresolvableRoot(String),

    /// Network-level failure while talking to a server
    #[error("connection failed: {0}")]
    ConnectionFailure(String),

    /// The container page itself could not be read
    #[error("reading {root} failed: {reason}")]
    ReadFailure { root: String, reason: String },

    /// The HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, CheckError>;
