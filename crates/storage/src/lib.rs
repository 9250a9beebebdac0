//! Persistence adapter for the storefront.
//!
//! Values are stored as JSON documents under `"{prefix}:{name}"` keys in a
//! [`KeyValueStore`] backend. The [`Storage`] facade tolerates missing and
//! malformed documents by handing back the caller's fallback.

pub mod error;
pub mod file;
pub mod memory;
pub mod storage;
pub mod store;

pub use error::{Result, StorageError};
pub use file::FileStore;
pub use memory::InMemoryStore;
pub use storage::{DEFAULT_PREFIX, Storage, keys};
pub use store::KeyValueStore;
