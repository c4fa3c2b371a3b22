//! # Domain Errors
//!
//! Failure taxonomy of the fan-out engine. None of these are fatal: callers log
//! them and carry on.

use thiserror::Error;

/// Feed source unavailable or returned something unreadable.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("unexpected status {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Decode(String),
}

/// Recipient directory (persistent store) unavailable or corrupt.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("directory io: {0}")]
    Io(#[from] std::io::Error),

    #[error("directory decode: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("directory backend: {0}")]
    Backend(String),
}

/// Why a binding's destination can't be posted to right now.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("destination {0} not found")]
    NotFound(String),

    #[error("destination {0} is not a message room")]
    WrongKind(String),

    #[error("destination {0} is not postable")]
    NotPostable(String),
}

/// A single post to a resolved destination failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("delivery failed: {0}")]
pub struct DeliveryError(pub String);
