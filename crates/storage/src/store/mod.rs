//! Table-scoped access to the relational store.
//!
//! Rows cross this seam as flat JSON objects keyed by snake_case column
//! names. Filters are equality predicates only.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::context::Caller;
use crate::error::{Result, StorageError};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

pub type Row = Map<String, Value>;

/// Equality predicates keyed by column name.
pub type Filters = BTreeMap<String, Value>;

/// Static description of a table: its name and the columns the service may
/// read, write, and filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Table {
    pub name: &'static str,
    pub columns: &'static [&'static str],
}

impl Table {
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.contains(&column)
    }

    /// Rejects any key that is not a declared column of this table.
    pub fn check_columns<'k>(&self, keys: impl IntoIterator<Item = &'k String>) -> Result<()> {
        for key in keys {
            if !self.has_column(key) {
                return Err(StorageError::validation(format!(
                    "unknown field '{}' for {}",
                    key, self.name
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: u32,
    pub offset: u32,
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    fn backend_tag(&self) -> &'static str;

    /// Rows matching all filters, newest first.
    async fn select(
        &self,
        caller: &Caller,
        table: &Table,
        filters: &Filters,
        page: Option<Page>,
    ) -> Result<Vec<Row>>;

    async fn count(&self, caller: &Caller, table: &Table, filters: &Filters) -> Result<i64>;

    /// Inserts one row and returns it as stored, with `id`, `created_at`, and
    /// `updated_at` filled in when the row did not carry them.
    async fn insert(&self, caller: &Caller, table: &Table, row: Row) -> Result<Row>;

    /// Applies `patch` to every row matching `filters` and bumps `updated_at`.
    /// Empty filters are rejected.
    async fn update(
        &self,
        caller: &Caller,
        table: &Table,
        filters: &Filters,
        patch: Row,
    ) -> Result<Vec<Row>>;

    /// Deletes every row matching `filters`. Empty filters are rejected.
    async fn delete(&self, caller: &Caller, table: &Table, filters: &Filters) -> Result<u64>;
}

pub(crate) fn require_filters(table: &Table, filters: &Filters) -> Result<()> {
    if filters.is_empty() {
        return Err(StorageError::validation(format!(
            "refusing unfiltered write on {}",
            table.name
        )));
    }
    Ok(())
}

pub(crate) fn filters_match(row: &Row, filters: &Filters) -> bool {
    filters
        .iter()
        .all(|(column, expected)| row.get(column).unwrap_or(&Value::Null) == expected)
}
