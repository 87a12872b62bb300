//! Error types shared by core-seed store implementations.

use thiserror::Error;
use uuid::Uuid;

/// Errors returned by store traits.
///
/// Backend failures keep the original error as their source so callers see
/// exactly what the database or file system reported.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The underlying storage backend failed (connectivity, constraint violation, I/O).
    #[error("storage backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A record with the same key already exists.
    #[error("conflict: {0}")]
    Conflict(String),

    /// A referenced record does not exist.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Record kind, e.g. `"role"`.
        kind: &'static str,
        /// Id that was looked up.
        id: Uuid,
    },
}

impl StoreError {
    pub fn backend(e: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Box::new(e))
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    #[must_use]
    pub fn not_found(kind: &'static str, id: Uuid) -> Self {
        Self::NotFound { kind, id }
    }
}
