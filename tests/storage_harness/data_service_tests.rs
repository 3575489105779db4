//! Macro-generated conformance suite for `DataService<TestRecord>`
//!
//! The `data_service_tests!` macro checks any backend against the contract
//! the handlers rely on: CRUD, insertion-ordered listing, search on
//! camelCase fields and soft-deleted records staying visible.
//!
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//!
//! use storage_harness::*;
//! use gestor::storage::InMemoryDataService;
//!
//! data_service_tests!(InMemoryDataService::<TestRecord>::new());
//! ```

/// Generate the suite; `$factory` is re-evaluated for each test
#[macro_export]
macro_rules! data_service_tests {
    ($factory:expr) => {
        mod data_service_contract_tests {
            use super::*;
            use gestor::core::{DataService, Entity};
            use serde_json::json;
            use uuid::Uuid;

            // ==================================================================
            // CRUD
            // ==================================================================

            #[tokio::test]
            async fn test_create_and_get() {
                let service = $factory;
                let record = create_test_record("Alice", "alice@test.com", 30, 4.5, true);
                let id = record.id;

                let created = service.create(record.clone()).await.unwrap();
                assert_eq!(created.id(), id);

                let fetched = service.get(&id).await.unwrap().expect("record exists");
                assert_eq!(fetched.name, "Alice");
                assert_eq!(fetched.email, "alice@test.com");
                assert_eq!(fetched.age, 30);
                assert!((fetched.score - 4.5).abs() < f64::EPSILON);
                assert!(fetched.active);
                assert_eq!(fetched.owner_id, record.owner_id);
                assert!(fetched.note.is_none());
            }

            #[tokio::test]
            async fn test_get_nonexistent() {
                let service = $factory;
                assert!(service.get(&Uuid::new_v4()).await.unwrap().is_none());
            }

            #[tokio::test]
            async fn test_create_duplicate_id_fails() {
                let service = $factory;
                let record = create_test_record("Dup", "dup@test.com", 1, 1.0, true);
                service.create(record.clone()).await.unwrap();
                assert!(service.create(record).await.is_err());
            }

            #[tokio::test]
            async fn test_list_keeps_creation_order() {
                let service = $factory;
                let batch = sample_batch(5);
                let expected: Vec<Uuid> = batch.iter().map(|r| r.id).collect();
                for record in batch {
                    service.create(record).await.unwrap();
                }

                let listed: Vec<Uuid> = service
                    .list()
                    .await
                    .unwrap()
                    .iter()
                    .map(|r| r.id())
                    .collect();
                assert_eq!(listed, expected);
            }

            #[tokio::test]
            async fn test_update_existing() {
                let service = $factory;
                let mut record = create_test_record("Bob", "bob@test.com", 25, 3.0, true);
                let id = record.id;
                service.create(record.clone()).await.unwrap();

                record.name = "Bob Updated".to_string();
                record.note = Some("nota".to_string());
                record.touch();
                service.update(&id, record).await.unwrap();

                let fetched = service.get(&id).await.unwrap().unwrap();
                assert_eq!(fetched.name, "Bob Updated");
                assert_eq!(fetched.note.as_deref(), Some("nota"));
            }

            #[tokio::test]
            async fn test_update_nonexistent_fails() {
                let service = $factory;
                let record = create_test_record("Ghost", "ghost@test.com", 0, 0.0, false);
                let id = record.id;
                assert!(service.update(&id, record).await.is_err());
            }

            #[tokio::test]
            async fn test_soft_deleted_records_are_still_returned() {
                let service = $factory;
                let mut record = create_test_record("Gone", "gone@test.com", 40, 2.0, true);
                let id = record.id;
                service.create(record.clone()).await.unwrap();

                record.soft_delete();
                service.update(&id, record).await.unwrap();

                let fetched = service.get(&id).await.unwrap().unwrap();
                assert!(fetched.is_deleted());
                assert_eq!(service.list().await.unwrap().len(), 1);
            }

            #[tokio::test]
            async fn test_delete_existing() {
                let service = $factory;
                let record = create_test_record("ToDelete", "delete@test.com", 40, 2.0, true);
                let id = record.id;
                service.create(record).await.unwrap();

                service.delete(&id).await.unwrap();
                assert!(service.get(&id).await.unwrap().is_none());
            }

            // ==================================================================
            // Search
            // ==================================================================

            #[tokio::test]
            async fn test_search_string_field() {
                let service = $factory;
                for record in sample_batch(3) {
                    service.create(record).await.unwrap();
                }

                let found = service
                    .search("email", &json!("record1@test.com"))
                    .await
                    .unwrap();
                assert_eq!(found.len(), 1);
                assert_eq!(found[0].name, "record-1");
            }

            #[tokio::test]
            async fn test_search_integer_and_boolean_fields() {
                let service = $factory;
                for record in sample_batch(4) {
                    service.create(record).await.unwrap();
                }

                let by_age = service.search("age", &json!(22)).await.unwrap();
                assert_eq!(by_age.len(), 1);
                assert_eq!(by_age[0].name, "record-2");

                let active = service.search("active", &json!(true)).await.unwrap();
                assert_eq!(active.len(), 2);
            }

            #[tokio::test]
            async fn test_search_uuid_uses_camel_case_name() {
                let service = $factory;
                let record = create_test_record("Owned", "owned@test.com", 1, 1.0, true);
                let owner = record.owner_id;
                service.create(record).await.unwrap();
                service
                    .create(create_test_record("Other", "other@test.com", 2, 2.0, true))
                    .await
                    .unwrap();

                let found = service
                    .search("ownerId", &json!(owner.to_string()))
                    .await
                    .unwrap();
                assert_eq!(found.len(), 1);
                assert_eq!(found[0].name, "Owned");
            }

            #[tokio::test]
            async fn test_search_no_results() {
                let service = $factory;
                for record in sample_batch(2) {
                    service.create(record).await.unwrap();
                }
                let found = service
                    .search("email", &json!("nobody@test.com"))
                    .await
                    .unwrap();
                assert!(found.is_empty());

                let unknown = service.search("missingField", &json!("x")).await.unwrap();
                assert!(unknown.is_empty());
            }

            // ==================================================================
            // Concurrency
            // ==================================================================

            #[tokio::test]
            async fn test_concurrent_creates() {
                let service = std::sync::Arc::new($factory);
                let mut handles = Vec::new();
                for record in sample_batch(10) {
                    let service = service.clone();
                    handles.push(tokio::spawn(async move {
                        service.create(record).await.unwrap();
                    }));
                }
                for handle in handles {
                    handle.await.unwrap();
                }
                assert_eq!(service.list().await.unwrap().len(), 10);
            }
        }
    };
}
