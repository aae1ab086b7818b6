//! Program-level errors.
//!
//! A field that fails its rule is not an error: it is reported through
//! [`crate::form::ValidationResult`]. The variants here cover malformed
//! input handed to the library or the CLI.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown field `{0}` (expected name|email|topic|message)")]
    UnknownField(String),

    #[error("unknown locale `{0}` (expected es|en)")]
    UnknownLocale(String),

    #[cfg(feature = "serde")]
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a JSON object of field -> string")]
    NotAnObject,

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
