//! In-memory implementation of DataService for testing and development

use crate::core::{DataService, Entity};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// In-memory data service implementation
///
/// Uses RwLock for thread-safe access. `IndexMap` keeps records in
/// insertion order so listings are stable.
#[derive(Clone)]
pub struct InMemoryDataService<T> {
    records: Arc<RwLock<IndexMap<Uuid, T>>>,
}

impl<T> InMemoryDataService<T> {
    /// Create a new in-memory data service
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(IndexMap::new())),
        }
    }
}

impl<T> Default for InMemoryDataService<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Entity> DataService<T> for InMemoryDataService<T> {
    async fn create(&self, entity: T) -> Result<T> {
        let mut records = self
            .records
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let id = entity.id();
        if records.contains_key(&id) {
            return Err(anyhow!("{} {} already exists", T::resource_name_singular(), id));
        }
        records.insert(id, entity.clone());

        Ok(entity)
    }

    async fn get(&self, id: &Uuid) -> Result<Option<T>> {
        let records = self
            .records
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(records.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<T>> {
        let records = self
            .records
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(records.values().cloned().collect())
    }

    async fn update(&self, id: &Uuid, entity: T) -> Result<T> {
        let mut records = self
            .records
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let slot = records
            .get_mut(id)
            .ok_or_else(|| anyhow!("{} {} not found", T::resource_name_singular(), id))?;
        *slot = entity.clone();

        Ok(entity)
    }

    async fn delete(&self, id: &Uuid) -> Result<()> {
        let mut records = self
            .records
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        records.shift_remove(id);
        Ok(())
    }

    async fn search(&self, field: &str, value: &serde_json::Value) -> Result<Vec<T>> {
        let records = self
            .records
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        let mut found = Vec::new();
        for record in records.values() {
            let json = serde_json::to_value(record)?;
            if json.get(field) == Some(value) {
                found.push(record.clone());
            }
        }
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    crate::impl_record!(Note, "note", "notes", { title: String, pinned: bool });

    #[tokio::test]
    async fn test_create_and_get() {
        let service = InMemoryDataService::<Note>::new();
        let note = Note::new("first".to_string(), false);
        let id = note.id;

        service.create(note).await.unwrap();
        let fetched = service.get(&id).await.unwrap().unwrap();
        assert_eq!(fetched.title, "first");
    }

    #[tokio::test]
    async fn test_duplicate_id_is_rejected() {
        let service = InMemoryDataService::<Note>::new();
        let note = Note::new("first".to_string(), false);
        service.create(note.clone()).await.unwrap();
        assert!(service.create(note).await.is_err());
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order() {
        let service = InMemoryDataService::<Note>::new();
        for title in ["a", "b", "c"] {
            service.create(Note::new(title.to_string(), false)).await.unwrap();
        }
        let titles: Vec<_> = service
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|n| n.title)
            .collect();
        assert_eq!(titles, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_update_missing_fails() {
        let service = InMemoryDataService::<Note>::new();
        let note = Note::new("ghost".to_string(), false);
        let id = note.id;
        assert!(service.update(&id, note).await.is_err());
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let service = InMemoryDataService::<Note>::new();
        let mut note = service
            .create(Note::new("draft".to_string(), false))
            .await
            .unwrap();
        note.pinned = true;
        service.update(&note.id, note.clone()).await.unwrap();
        assert!(service.get(&note.id).await.unwrap().unwrap().pinned);

        service.delete(&note.id).await.unwrap();
        assert!(service.get(&note.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_search_by_camel_case_field() {
        let service = InMemoryDataService::<Note>::new();
        service.create(Note::new("a".to_string(), true)).await.unwrap();
        service.create(Note::new("b".to_string(), false)).await.unwrap();

        let pinned = service.search("pinned", &json!(true)).await.unwrap();
        assert_eq!(pinned.len(), 1);
        assert_eq!(pinned[0].title, "a");
    }
}
