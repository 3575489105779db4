//! Shared harness for data service backends
//!
//! Provides `TestRecord`, a record with string, integer, float, boolean and
//! UUID fields, plus helpers to build test data.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//! use storage_harness::*;
//! ```

#![allow(dead_code)]

#[macro_use]
mod data_service_tests;

use uuid::Uuid;

gestor::impl_record!(
    /// Record covering every JSON scalar the backends search on
    TestRecord,
    "test_record",
    "test-records",
    {
        name: String,
        email: String,
        age: i64,
        score: f64,
        active: bool,
        owner_id: Uuid,
        note: Option<String>,
    }
);

/// Build a record with a fresh id and timestamps
pub fn create_test_record(name: &str, email: &str, age: i64, score: f64, active: bool) -> TestRecord {
    TestRecord::new(
        name.to_string(),
        email.to_string(),
        age,
        score,
        active,
        Uuid::new_v4(),
        None,
    )
}

/// `count` distinct records
pub fn sample_batch(count: usize) -> Vec<TestRecord> {
    (0..count)
        .map(|i| {
            create_test_record(
                &format!("record-{i}"),
                &format!("record{i}@test.com"),
                20 + i as i64,
                i as f64 * 1.5,
                i % 2 == 0,
            )
        })
        .collect()
}
