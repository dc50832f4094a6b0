//! Error types for the domain core and its ports.
//!
//! Each port has its own small error enum; the service maps them into
//! `TodoError`, the only error type callers of the service see. `NotFound`
//! deliberately carries no entity detail: an absent row and a foreign-owned
//! row produce the same signal, so existence never leaks across owners.

use thiserror::Error;

/// Errors from the todo repository port.
#[derive(Debug, Error)]
pub enum RepoError {
    /// Row absent, or owned by someone else — indistinguishable by design.
    #[error("row not found")]
    NotFound,

    /// Referential integrity failure surfaced by the store (for example a
    /// parent or category deleted between the precondition check and the
    /// write — an accepted race).
    #[error("conflict: {0}")]
    Conflict(String),

    #[error("repository backend error: {0}")]
    Backend(String),
}

/// Errors from the category directory port.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("category not found")]
    NotFound,

    #[error("directory backend error: {0}")]
    Backend(String),
}

/// Errors from the object store port.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("object not found")]
    NotFound,

    #[error("object store backend error: {0}")]
    Backend(String),
}

/// Caller-visible errors of the todo service.
#[derive(Debug, Error)]
pub enum TodoError {
    /// Entity absent or not owned by the caller.
    #[error("not found")]
    NotFound,

    /// Self-parent, multi-level nesting, or parent missing on (re)parenting.
    #[error("invalid hierarchy: {0}")]
    InvalidHierarchy(String),

    /// Category missing or owned by someone else.
    #[error("invalid reference: {0}")]
    InvalidReference(String),

    /// Object-storage write failed; the attachment row was never created.
    #[error("upload failed")]
    UploadFailure(#[source] StoreError),

    /// The uploaded file could not be read at the transport boundary.
    #[error("failed to read upload")]
    ReadFailure(#[from] std::io::Error),

    /// Object-storage error outside the upload path (presign and the like).
    #[error("object storage error")]
    Storage(#[source] StoreError),

    /// Repository transport error, propagated with context.
    #[error("repository error")]
    Repository(#[source] RepoError),
}

impl From<RepoError> for TodoError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => TodoError::NotFound,
            other => TodoError::Repository(other),
        }
    }
}
