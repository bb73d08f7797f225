//! Error classification for the public surface of the crate.
//!
//! Internally everything is plumbed with `anyhow`. At the boundary an `anyhow::Error` is paired
//! with an `ErrorType` so that callers (the CLI, tests, an embedding UI) can decide how to report
//! it without string matching.

use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display, Formatter};

/// The kinds of failure a dashboard operation can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Empty title, non-positive amount, missing date, empty habit or icon name and the like.
    InvalidInput,
    /// A habit name collides (case-insensitively) with an existing habit.
    DuplicateName,
    /// An account id, habit, note or event index that does not exist.
    NotFound,
    /// The key-value store could not be read or written. Always fatal.
    Storage,
    /// The data directory or its configuration file is missing or invalid.
    Config,
    /// Anything else.
    Internal,
}

serde_plain::derive_display_from_serialize!(ErrorType);

/// A classified error.
pub struct Error {
    error_type: ErrorType,
    inner: anyhow::Error,
}

impl Error {
    pub fn new(error_type: ErrorType, inner: impl Into<anyhow::Error>) -> Self {
        Self {
            error_type,
            inner: inner.into(),
        }
    }

    pub(crate) fn invalid_input(message: impl Display) -> Self {
        Self::new(ErrorType::InvalidInput, anyhow::anyhow!("{message}"))
    }

    pub(crate) fn duplicate_name(message: impl Display) -> Self {
        Self::new(ErrorType::DuplicateName, anyhow::anyhow!("{message}"))
    }

    pub(crate) fn not_found(message: impl Display) -> Self {
        Self::new(ErrorType::NotFound, anyhow::anyhow!("{message}"))
    }

    pub fn error_type(&self) -> ErrorType {
        self.error_type
    }

    pub fn inner(&self) -> &anyhow::Error {
        &self.inner
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {:?}", self.error_type, self.inner)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // `{:#}` prints the whole context chain on one line.
        write!(f, "{:#}", self.inner)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.inner.source()
    }
}

impl From<anyhow::Error> for Error {
    fn from(value: anyhow::Error) -> Self {
        Error::new(ErrorType::Internal, value)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Classifies an `anyhow` result for the public surface.
pub trait IntoResult<T> {
    fn pub_result(self, error_type: ErrorType) -> Result<T>;
}

impl<T> IntoResult<T> for anyhow::Result<T> {
    fn pub_result(self, error_type: ErrorType) -> Result<T> {
        self.map_err(|e| Error::new(error_type, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_pub_result_keeps_context() {
        let r: anyhow::Result<()> = Err(anyhow::anyhow!("disk full")).context("Unable to save");
        let e = r.pub_result(ErrorType::Storage).unwrap_err();
        assert_eq!(e.error_type(), ErrorType::Storage);
        assert_eq!(e.to_string(), "Unable to save: disk full");
    }

    #[test]
    fn test_plain_anyhow_is_internal() {
        let e: Error = anyhow::anyhow!("boom").into();
        assert_eq!(e.error_type(), ErrorType::Internal);
    }

    #[test]
    fn test_error_type_display() {
        assert_eq!(ErrorType::DuplicateName.to_string(), "duplicate_name");
    }
}
