//! Shared test utilities for domain testing
//!
//! This crate provides reusable test infrastructure:
//! - `StubStore`: an HTTP stand-in for the graph/vector store that records
//!   requests and replays canned responses
//! - `TestDataBuilder`: Deterministic test data generation
//! - `assertions`: Custom assertion helpers
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::{StubStore, TestDataBuilder};
//!
//! #[tokio::test]
//! async fn my_store_test() {
//!     let store = StubStore::start().await;
//!     store.respond_json("getUsers", serde_json::json!({ "users": [] }));
//!
//!     let builder = TestDataBuilder::from_test_name("my_store_test");
//!     let email = builder.email("alice");
//! }
//! ```

mod stub_store;

pub use stub_store::{RecordedRequest, StubStore};

use uuid::Uuid;

/// Builder for test data with deterministic randomization
///
/// This ensures tests are reproducible by using seeded random data.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    /// Create a new builder with a seed (for deterministic tests)
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (generates seed from test name hash)
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_create_user");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Deterministic id in the store's UUID format
    pub fn id(&self, label: &str) -> String {
        let mut bytes = [0u8; 16];
        bytes[..8].copy_from_slice(&self.seed.to_le_bytes());
        for (slot, b) in bytes[8..].iter_mut().zip(label.bytes().cycle()) {
            *slot = b;
        }
        Uuid::from_bytes(bytes).to_string()
    }

    /// Display name unique to this test, e.g. `Alice-1234`
    pub fn user_name(&self, base: &str) -> String {
        format!("{}-{}", base, self.seed % 10_000)
    }

    /// Email unique to this test, e.g. `alice.1234@example.com`
    pub fn email(&self, local: &str) -> String {
        format!("{}.{}@example.com", local.to_lowercase(), self.seed % 10_000)
    }

    /// Age in 18..=80
    pub fn age(&self) -> u32 {
        18 + (self.seed % 63) as u32
    }

    /// Embedding vector `[start, start + 0.1, ...]`
    pub fn vector(&self, start: f64, dimensions: usize) -> Vec<f64> {
        (0..dimensions)
            .map(|i| ((start + 0.1 * i as f64) * 10.0).round() / 10.0)
            .collect()
    }
}

/// Test assertion helpers
pub mod assertions {
    use serde_json::Value;

    /// Assert that a JSON array holds exactly the given `name` fields, in order
    pub fn assert_names(list: &Value, expected: &[&str], context: &str) {
        let names: Vec<&str> = list
            .as_array()
            .unwrap_or_else(|| panic!("{}: expected an array, got {}", context, list))
            .iter()
            .map(|item| item["name"].as_str().unwrap_or_default())
            .collect();
        assert_eq!(names, expected, "{}", context);
    }

    /// Assert that an optional value is Some
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_builder_deterministic() {
        let builder1 = TestDataBuilder::new(42);
        let builder2 = TestDataBuilder::new(42);

        assert_eq!(builder1.id("user"), builder2.id("user"));
        assert_eq!(builder1.email("alice"), builder2.email("alice"));
        assert_eq!(builder1.age(), builder2.age());
    }

    #[test]
    fn test_data_builder_different_names() {
        let builder1 = TestDataBuilder::from_test_name("test1");
        let builder2 = TestDataBuilder::from_test_name("test2");

        assert_ne!(builder1.id("user"), builder2.id("user"));
    }

    #[test]
    fn test_vector_steps() {
        let builder = TestDataBuilder::new(1);
        assert_eq!(builder.vector(0.1, 5), vec![0.1, 0.2, 0.3, 0.4, 0.5]);
        assert!((18..=80).contains(&builder.age()));
    }

    #[test]
    fn test_assert_names() {
        let list = serde_json::json!([{ "name": "Bob" }, { "name": "Carol" }]);
        assertions::assert_names(&list, &["Bob", "Carol"], "followers");
    }
}
