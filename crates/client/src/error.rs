//! Client-side error types
//!
//! Configuration loading reports through `common::Error`; this enum covers
//! the cache persistence collaborator.

use thiserror::Error;

/// Errors from client-side persistence.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("cache parse error: {0}")]
    Parse(String),
}

/// Result alias using client Error
pub type Result<T> = std::result::Result<T, Error>;
