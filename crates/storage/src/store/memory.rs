use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{Filters, Page, RecordStore, Row, Table, filters_match, require_filters};
use crate::context::Caller;
use crate::error::{Result, StorageError};

/// In-process store. Holds no row-level policies; every caller sees every row.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<HashMap<&'static str, Vec<Row>>>,
    mutations: AtomicU64,
    fail_after: Mutex<Option<u64>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful insert/update/delete calls so far.
    pub fn mutation_count(&self) -> u64 {
        self.mutations.load(Ordering::SeqCst)
    }

    /// Lets `writes` more mutations succeed, then fails every following one
    /// with a database error.
    pub async fn fail_writes_after(&self, writes: u64) {
        *self.fail_after.lock().await = Some(writes);
    }

    pub async fn rows(&self, table: &Table) -> Vec<Row> {
        self.tables
            .lock()
            .await
            .get(table.name)
            .cloned()
            .unwrap_or_default()
    }

    async fn begin_write(&self) -> Result<()> {
        let mut fail_after = self.fail_after.lock().await;
        if let Some(remaining) = fail_after.as_mut() {
            if *remaining == 0 {
                return Err(StorageError::Database(
                    "injected write failure".to_string(),
                ));
            }
            *remaining -= 1;
        }
        Ok(())
    }

    fn committed(&self) {
        self.mutations.fetch_add(1, Ordering::SeqCst);
    }
}

fn now_string() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn created_at(row: &Row) -> &str {
    row.get("created_at").and_then(Value::as_str).unwrap_or("")
}

#[async_trait]
impl RecordStore for MemoryStore {
    fn backend_tag(&self) -> &'static str {
        "memory"
    }

    async fn select(
        &self,
        _caller: &Caller,
        table: &Table,
        filters: &Filters,
        page: Option<Page>,
    ) -> Result<Vec<Row>> {
        table.check_columns(filters.keys())?;
        let tables = self.tables.lock().await;
        let mut rows: Vec<Row> = tables
            .get(table.name)
            .map(|rows| {
                rows.iter()
                    .rev()
                    .filter(|row| filters_match(row, filters))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        rows.sort_by(|a, b| created_at(b).cmp(created_at(a)));

        Ok(match page {
            Some(page) => rows
                .into_iter()
                .skip(page.offset as usize)
                .take(page.limit as usize)
                .collect(),
            None => rows,
        })
    }

    async fn count(&self, _caller: &Caller, table: &Table, filters: &Filters) -> Result<i64> {
        table.check_columns(filters.keys())?;
        let tables = self.tables.lock().await;
        let count = tables
            .get(table.name)
            .map(|rows| rows.iter().filter(|row| filters_match(row, filters)).count())
            .unwrap_or(0);
        Ok(count as i64)
    }

    async fn insert(&self, _caller: &Caller, table: &Table, mut row: Row) -> Result<Row> {
        table.check_columns(row.keys())?;
        self.begin_write().await?;

        let now = now_string();
        row.entry("id")
            .or_insert_with(|| Value::String(Uuid::new_v4().to_string()));
        row.entry("created_at")
            .or_insert_with(|| Value::String(now.clone()));
        row.insert("updated_at".to_string(), Value::String(now));

        let mut tables = self.tables.lock().await;
        let rows = tables.entry(table.name).or_default();
        if rows.iter().any(|existing| existing.get("id") == row.get("id")) {
            return Err(StorageError::validation("Record already exists"));
        }
        rows.push(row.clone());
        self.committed();
        Ok(row)
    }

    async fn update(
        &self,
        _caller: &Caller,
        table: &Table,
        filters: &Filters,
        patch: Row,
    ) -> Result<Vec<Row>> {
        require_filters(table, filters)?;
        table.check_columns(filters.keys().chain(patch.keys()))?;
        self.begin_write().await?;

        let now = now_string();
        let mut tables = self.tables.lock().await;
        let mut updated = Vec::new();
        if let Some(rows) = tables.get_mut(table.name) {
            for row in rows.iter_mut().filter(|row| filters_match(row, filters)) {
                for (column, value) in &patch {
                    row.insert(column.clone(), value.clone());
                }
                row.insert("updated_at".to_string(), Value::String(now.clone()));
                updated.push(row.clone());
            }
        }
        self.committed();
        Ok(updated)
    }

    async fn delete(&self, _caller: &Caller, table: &Table, filters: &Filters) -> Result<u64> {
        require_filters(table, filters)?;
        table.check_columns(filters.keys())?;
        self.begin_write().await?;

        let mut tables = self.tables.lock().await;
        let removed = match tables.get_mut(table.name) {
            Some(rows) => {
                let before = rows.len();
                rows.retain(|row| !filters_match(row, filters));
                (before - rows.len()) as u64
            }
            None => 0,
        };
        self.committed();
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const NOTES: Table = Table {
        name: "notes",
        columns: &["id", "owner", "body", "created_at", "updated_at"],
    };

    fn row(value: Value) -> Row {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    fn owner_filter(owner: &str) -> Filters {
        Filters::from([("owner".to_string(), json!(owner))])
    }

    #[tokio::test]
    async fn test_insert_assigns_identity_and_timestamps() {
        let store = MemoryStore::new();
        let caller = Caller::new(Uuid::new_v4());
        let stored = store
            .insert(&caller, &NOTES, row(json!({ "owner": "a", "body": "hi" })))
            .await
            .unwrap();

        assert!(stored["id"].as_str().is_some());
        assert!(stored["created_at"].as_str().is_some());
        assert_eq!(stored["created_at"], stored["updated_at"]);
        assert_eq!(store.mutation_count(), 1);
    }

    #[tokio::test]
    async fn test_select_filters_and_pages_newest_first() {
        let store = MemoryStore::new();
        let caller = Caller::new(Uuid::new_v4());
        for body in ["one", "two", "three"] {
            store
                .insert(&caller, &NOTES, row(json!({ "owner": "a", "body": body })))
                .await
                .unwrap();
        }
        store
            .insert(&caller, &NOTES, row(json!({ "owner": "b", "body": "other" })))
            .await
            .unwrap();

        let page = store
            .select(
                &caller,
                &NOTES,
                &owner_filter("a"),
                Some(Page { limit: 2, offset: 0 }),
            )
            .await
            .unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0]["body"], json!("three"));
        assert_eq!(store.count(&caller, &NOTES, &owner_filter("a")).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_unknown_columns_are_rejected() {
        let store = MemoryStore::new();
        let caller = Caller::new(Uuid::new_v4());
        let err = store
            .insert(&caller, &NOTES, row(json!({ "owner": "a", "colour": "red" })))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Validation(_)));
        assert_eq!(store.mutation_count(), 0);
    }

    #[tokio::test]
    async fn test_unfiltered_writes_are_rejected() {
        let store = MemoryStore::new();
        let caller = Caller::new(Uuid::new_v4());
        let err = store
            .delete(&caller, &NOTES, &Filters::new())
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Validation(_)));
    }

    #[tokio::test]
    async fn test_injected_failure_after_budget() {
        let store = MemoryStore::new();
        let caller = Caller::new(Uuid::new_v4());
        store.fail_writes_after(1).await;
        store
            .insert(&caller, &NOTES, row(json!({ "owner": "a" })))
            .await
            .unwrap();
        let err = store
            .insert(&caller, &NOTES, row(json!({ "owner": "a" })))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Database(_)));
        assert_eq!(store.rows(&NOTES).await.len(), 1);
    }
}
