use thiserror::Error;

/// Errors surfaced by the catalog store. Each operation fails as a whole:
/// there is no retry and no partially applied state behind any variant.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The database file could not be opened or its schema could not be
    /// created. Fatal to the calling operation; at startup this bubbles all
    /// the way out of `main`.
    #[error("catalog storage unavailable: {message}")]
    Unavailable { message: String },

    /// A mutating statement failed to commit. The catalog is left exactly as
    /// it was before the call.
    #[error("catalog write failed: {message}")]
    WriteFailed { message: String },

    /// A read-only statement failed. Distinct from `Unavailable` because the
    /// store was opened successfully at this point.
    #[error("catalog query failed: {message}")]
    QueryFailed { message: String },

    /// A required text field was blank after trimming. The form rejects this
    /// before calling the store, but the store enforces it for every caller.
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },
}

impl StoreError {
    pub(crate) fn unavailable(err: impl std::fmt::Display) -> Self {
        StoreError::Unavailable {
            message: err.to_string(),
        }
    }

    pub(crate) fn write_failed(err: impl std::fmt::Display) -> Self {
        StoreError::WriteFailed {
            message: err.to_string(),
        }
    }

    pub(crate) fn query_failed(err: impl std::fmt::Display) -> Self {
        StoreError::QueryFailed {
            message: err.to_string(),
        }
    }
}

/// Convenience alias for store operation results.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
