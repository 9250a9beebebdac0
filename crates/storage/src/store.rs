use crate::Result;

/// Raw key/value backend holding serialized JSON documents.
///
/// Implementations must be thread-safe (Send + Sync). Every call completes
/// synchronously; a successful `set` is visible to the next `get`.
pub trait KeyValueStore: Send + Sync {
    /// Returns the raw document stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous document.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes the document stored under `key`. Missing keys are not an error.
    fn remove(&self, key: &str) -> Result<()>;

    /// Lists every key currently stored.
    fn keys(&self) -> Result<Vec<String>>;
}
