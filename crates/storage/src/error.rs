use thiserror::Error;

/// Errors that can occur when reading or writing persisted values.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing file system reported an error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be serialized for writing.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A lock guarding in-memory state was poisoned by a panicking writer.
    #[error("Storage lock poisoned")]
    LockPoisoned,
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;
