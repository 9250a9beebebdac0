//! Identifier generation.

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

/// Source of unique string identifiers for new entities.
pub trait IdGenerator: Send + Sync {
    /// Produces a fresh identifier.
    fn next_id(&self) -> String;
}

/// Generates random v4 UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl UuidGenerator {
    /// Creates a new UUID generator.
    pub fn new() -> Self {
        Self
    }
}

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Generates `"{prefix}-0001"`, `"{prefix}-0002"`, ... in order.
#[derive(Debug)]
pub struct SequentialGenerator {
    prefix: String,
    next: AtomicU64,
}

impl SequentialGenerator {
    /// Creates a sequential generator starting at 1.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }
}

impl IdGenerator for SequentialGenerator {
    fn next_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}-{:04}", self.prefix, n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_generator_creates_unique_ids() {
        let generator = UuidGenerator::new();
        assert_ne!(generator.next_id(), generator.next_id());
    }

    #[test]
    fn sequential_generator_counts_up() {
        let generator = SequentialGenerator::new("id");
        assert_eq!(generator.next_id(), "id-0001");
        assert_eq!(generator.next_id(), "id-0002");
    }
}
