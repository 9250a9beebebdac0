//! Application error type.

use domain::{CartError, CatalogError, DomainError, ErrorKind, OrderError};
use storage::StorageError;
use thiserror::Error;

/// Errors surfaced by [`Session`](crate::Session) operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// A domain rule rejected the operation; nothing was changed.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The persistence backend failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Another holder of the shared session panicked mid-operation.
    #[error("Session lock poisoned")]
    SessionPoisoned,
}

impl AppError {
    /// Domain failure kind, or `None` for infrastructure failures.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            AppError::Domain(e) => Some(e.kind()),
            AppError::Storage(_) | AppError::SessionPoisoned => None,
        }
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        AppError::Domain(err.into())
    }
}

impl From<CartError> for AppError {
    fn from(err: CartError) -> Self {
        AppError::Domain(err.into())
    }
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        AppError::Domain(err.into())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
