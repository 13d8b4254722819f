//! Shared test utilities for the domain crates
//!
//! - `TestMongo`: MongoDB container with automatic cleanup (feature: "mongo")
//! - `TestDataBuilder`: deterministic test data (always available)
//! - `assertions`: assertion helpers (always available)
//!
//! ```rust,no_run
//! use test_utils::{TestDataBuilder, TestMongo};
//!
//! #[tokio::test]
//! async fn my_mongo_test() {
//!     let mongo = TestMongo::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_test");
//!
//!     let seller_id = builder.object_id(1);
//!     let email = builder.email("seller");
//! }
//! ```

use mongodb::bson::oid::ObjectId;

#[cfg(feature = "mongo")]
mod mongo;

#[cfg(feature = "mongo")]
pub use mongo::TestMongo;

/// Builder for test data with deterministic values
///
/// Tests that derive their data from the test name get the same ids,
/// emails and phone numbers on every run, and different ones from
/// other tests sharing a database.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (seed is the hash of the name)
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_create_seller");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Object id as 24 hex characters, distinct per `n`
    pub fn object_id(&self, n: u32) -> String {
        let mut bytes = [0u8; 12];
        bytes[..8].copy_from_slice(&self.seed.to_be_bytes());
        bytes[8..].copy_from_slice(&n.to_be_bytes());
        ObjectId::from_bytes(bytes).to_hex()
    }

    /// Unique name for testing
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("my_test");
    /// let name = builder.name("seller", "main");
    /// assert!(name.starts_with("test-seller-"));
    /// ```
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }

    /// Email address that passes the account email rule
    pub fn email(&self, local: &str) -> String {
        format!("{}{}@mail.com", local, self.seed % 1_000_000)
    }

    /// Ten-digit phone number that passes the phone rule
    pub fn phone(&self) -> String {
        format!("+380{:09}", self.seed % 1_000_000_000)
    }
}

/// Test assertion helpers
pub mod assertions {
    /// Assert that a string is a 24-character hex object id
    pub fn assert_object_id(value: &str, context: &str) {
        assert!(
            mongodb::bson::oid::ObjectId::parse_str(value).is_ok(),
            "{}: expected an object id, got {:?}",
            context,
            value
        );
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

        assert_eq!(builder1.object_id(1), builder2.object_id(1));
        assert_eq!(builder1.name("seller", "test"), builder2.name("seller", "test"));
        assert_eq!(builder1.email("jane"), builder2.email("jane"));
    }

    #[test]
    fn test_object_ids_are_valid_and_distinct() {
        let builder = TestDataBuilder::from_test_name("my_test");

        assertions::assert_object_id(&builder.object_id(1), "first");
        assert_ne!(builder.object_id(1), builder.object_id(2));
    }

    #[test]
    fn test_data_builder_different_names() {
        let builder1 = TestDataBuilder::from_test_name("test1");
        let builder2 = TestDataBuilder::from_test_name("test2");

        assert_ne!(builder1.object_id(1), builder2.object_id(1));
    }

    #[test]
    fn test_phone_shape() {
        let phone = TestDataBuilder::new(7).phone();
        assert_eq!(phone, "+380000000007");
    }
}
