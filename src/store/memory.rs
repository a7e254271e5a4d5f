//! In-process record store backend
//!
//! Used by the test suite and selectable from config for local development.
//! Record ids are ULIDs, so listing in id order matches insertion order
//! closely enough for a development backend (ordering is unspecified by the
//! store contract either way).

#![cfg(any(test, feature = "mock-store"))]

use async_trait::async_trait;
use dashmap::DashMap;
use ulid::Ulid;

use super::{FieldEq, Fields, RawRecord, RecordStore, StoreError};

#[derive(Default)]
pub struct MemoryStore {
    tables: DashMap<String, DashMap<String, Fields>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn table(&self, name: &str) -> dashmap::mapref::one::Ref<'_, String, DashMap<String, Fields>> {
        self.tables.entry(name.to_string()).or_default().downgrade()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn find(&self, table: &str, id: &str) -> Result<RawRecord, StoreError> {
        let table = self.table(table);
        let fields = table.get(id).ok_or(StoreError::NotFound)?;
        Ok(RawRecord {
            id: id.to_string(),
            fields: fields.clone(),
        })
    }

    async fn list(
        &self,
        table: &str,
        filter: Option<&FieldEq>,
    ) -> Result<Vec<RawRecord>, StoreError> {
        let table = self.table(table);
        let mut records: Vec<RawRecord> = table
            .iter()
            .filter(|entry| match filter {
                Some(eq) => entry
                    .value()
                    .get(eq.field)
                    .and_then(|v| v.as_str())
                    .is_some_and(|v| v == eq.value),
                None => true,
            })
            .map(|entry| RawRecord {
                id: entry.key().clone(),
                fields: entry.value().clone(),
            })
            .collect();
        records.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(records)
    }

    async fn create(&self, table: &str, fields: Fields) -> Result<RawRecord, StoreError> {
        let id = Ulid::new().to_string();
        self.table(table).insert(id.clone(), fields.clone());
        Ok(RawRecord { id, fields })
    }

    async fn update(
        &self,
        table: &str,
        id: &str,
        fields: Fields,
    ) -> Result<RawRecord, StoreError> {
        let table = self.table(table);
        let mut existing = table.get_mut(id).ok_or(StoreError::NotFound)?;
        for (key, value) in fields {
            existing.insert(key, value);
        }
        Ok(RawRecord {
            id: id.to_string(),
            fields: existing.clone(),
        })
    }

    async fn destroy(&self, table: &str, id: &str) -> Result<(), StoreError> {
        self.table(table)
            .remove(id)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: serde_json::Value) -> Fields {
        match value {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[tokio::test]
    async fn create_then_find_round_trips() {
        let store = MemoryStore::new();
        let created = store
            .create("Products", fields(json!({"name": "Widget", "price": 9.99})))
            .await
            .unwrap();

        let found = store.find("Products", &created.id).await.unwrap();
        assert_eq!(found.fields["name"], json!("Widget"));
    }

    #[tokio::test]
    async fn update_merges_fields() {
        let store = MemoryStore::new();
        let created = store
            .create("Products", fields(json!({"name": "Widget", "price": 9.99})))
            .await
            .unwrap();

        let updated = store
            .update("Products", &created.id, fields(json!({"price": 12.5})))
            .await
            .unwrap();

        assert_eq!(updated.fields["name"], json!("Widget"));
        assert_eq!(updated.fields["price"], json!(12.5));
    }

    #[tokio::test]
    async fn list_applies_field_equality_filter() {
        let store = MemoryStore::new();
        store
            .create("Orders", fields(json!({"buyerId": "b1"})))
            .await
            .unwrap();
        store
            .create("Orders", fields(json!({"buyerId": "b2"})))
            .await
            .unwrap();

        let matching = store
            .list("Orders", Some(&FieldEq::new("buyerId", "b1")))
            .await
            .unwrap();
        assert_eq!(matching.len(), 1);

        let all = store.list("Orders", None).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn destroy_is_not_repeatable() {
        let store = MemoryStore::new();
        let created = store.create("Products", Fields::new()).await.unwrap();

        store.destroy("Products", &created.id).await.unwrap();
        assert!(matches!(
            store.destroy("Products", &created.id).await,
            Err(StoreError::NotFound)
        ));
        assert!(matches!(
            store.find("Products", &created.id).await,
            Err(StoreError::NotFound)
        ));
    }
}
