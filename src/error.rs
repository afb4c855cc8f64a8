//! Error types for the richpost library.

use std::io;
use thiserror::Error;

/// Result type alias for richpost operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing, rendering, or talking to a content source.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON could not be read or written.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A document tree is not well-formed.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A node kind has no rendering rule and the render was asked to reject it.
    #[error("Unsupported node kind: {0}")]
    UnsupportedKind(String),

    /// A post draft failed validation.
    #[error("{0}")]
    InvalidDraft(String),

    /// A post with the same slug already exists.
    #[error("A post with slug '{0}' already exists")]
    DuplicateSlug(String),

    /// Source configuration is missing or malformed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The content API answered with an error status.
    #[error("HTTP error: {status} - {body}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body (may contain error details).
        body: String,
    },

    /// The HTTP request itself failed (connection, timeout, TLS).
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Transport(#[from] ureq::Error),

    /// The GraphQL response carried errors.
    #[error("GraphQL error: {0}")]
    GraphQl(String),

    /// A response was missing data the caller depends on.
    #[error("Invalid data: {0}")]
    InvalidData(String),
}
