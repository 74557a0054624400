//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;
use trivia_core::model::QuestionError;

/// User-visible failure classes. Every operation either succeeds or yields
/// exactly one of these; the numeric code and message are the only details
/// exposed to clients.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Fault {
    /// Something was requested and nothing was there.
    #[error("resource not found")]
    NotFound,

    /// Required fields missing or structurally invalid.
    #[error("bad request")]
    MalformedRequest,

    /// The store operation itself failed despite a well-formed request.
    #[error("unprocessable")]
    Unprocessable,
}

impl Fault {
    #[must_use]
    pub fn code(&self) -> u16 {
        match self {
            Fault::NotFound => 404,
            Fault::MalformedRequest => 400,
            Fault::Unprocessable => 422,
        }
    }
}

// Store failures are classified at the boundary: a missing record is
// NotFound, everything else is Unprocessable.
impl From<StorageError> for Fault {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound => Fault::NotFound,
            _ => Fault::Unprocessable,
        }
    }
}

// Validation failures are detected before the store is touched.
impl From<QuestionError> for Fault {
    fn from(_: QuestionError) -> Self {
        Fault::MalformedRequest
    }
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
