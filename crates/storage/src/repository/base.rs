use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::casing;
use crate::context::Caller;
use crate::dto::common::PaginationParams;
use crate::error::{Result, StorageError};
use crate::store::{Filters, Page, RecordStore, Row, Table};

/// A model that maps onto one table.
pub trait Record: Serialize + DeserializeOwned + Send + Sync {
    const TABLE: Table;
    /// Column naming the owning user, for tables scoped per user.
    const OWNER_COLUMN: Option<&'static str> = None;
    /// Keys a new row must carry with a non-null value.
    const REQUIRED: &'static [&'static str] = &[];

    fn id(&self) -> Uuid;
}

/// Assigned by the store; never taken from a payload on update.
const SERVER_COLUMNS: &[&str] = &["id", "created_at", "updated_at"];

/// Serializes a camelCase payload into a snake_case row. Null fields are
/// treated as not supplied.
pub fn to_row<P: Serialize + ?Sized>(payload: &P) -> Result<Row> {
    match serde_json::to_value(payload)? {
        Value::Object(map) => Ok(casing::keys_to_snake(map)
            .into_iter()
            .filter(|(_, value)| !value.is_null())
            .collect()),
        other => Err(StorageError::Unexpected(format!(
            "payload must be an object, got {}",
            other
        ))),
    }
}

pub fn from_row<R: Record>(row: Row) -> Result<R> {
    Ok(serde_json::from_value(Value::Object(casing::keys_to_camel(
        row,
    )))?)
}

/// Equality filters from a camelCase filter struct; unset fields are skipped.
pub fn filters_from<F: Serialize + ?Sized>(filter: &F) -> Result<Filters> {
    Ok(to_row(filter)?.into_iter().collect())
}

pub(crate) fn filter(column: &str, value: impl Serialize) -> Result<Filters> {
    Ok(Filters::from([(
        column.to_string(),
        serde_json::to_value(value)?,
    )]))
}

/// Generic create/read/update/delete/list over one table.
pub struct Repository<'a, R> {
    store: &'a dyn RecordStore,
    caller: &'a Caller,
    _record: PhantomData<fn() -> R>,
}

impl<'a, R: Record> Repository<'a, R> {
    pub fn new(store: &'a dyn RecordStore, caller: &'a Caller) -> Self {
        Self {
            store,
            caller,
            _record: PhantomData,
        }
    }

    pub fn caller(&self) -> &'a Caller {
        self.caller
    }

    pub fn store(&self) -> &'a dyn RecordStore {
        self.store
    }

    pub async fn create<P: Serialize + Sync + ?Sized>(&self, payload: &P) -> Result<R> {
        self.create_row(to_row(payload)?).await
    }

    pub async fn create_row(&self, row: Row) -> Result<R> {
        for column in R::REQUIRED {
            if row.get(*column).is_none_or(Value::is_null) {
                return Err(StorageError::validation(format!(
                    "missing required field '{}'",
                    casing::to_camel_case(column)
                )));
            }
        }
        R::TABLE.check_columns(row.keys())?;

        let stored = self.store.insert(self.caller, &R::TABLE, row).await?;
        from_row(stored)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<R> {
        self.find_one(filter("id", id)?)
            .await?
            .ok_or(StorageError::NotFound)
    }

    pub async fn find_one(&self, filters: Filters) -> Result<Option<R>> {
        let rows = self
            .store
            .select(self.caller, &R::TABLE, &filters, Some(Page { limit: 1, offset: 0 }))
            .await?;
        rows.into_iter().next().map(from_row).transpose()
    }

    pub async fn find_all(&self, filters: Filters) -> Result<Vec<R>> {
        let rows = self
            .store
            .select(self.caller, &R::TABLE, &filters, None)
            .await?;
        rows.into_iter().map(from_row).collect()
    }

    /// One page of records matching `filters`, plus the total match count.
    ///
    /// On owner-scoped tables `owner` is mandatory and is merged in last, so
    /// a filter naming the owner column cannot widen the result.
    pub async fn list(
        &self,
        owner: Option<Uuid>,
        mut filters: Filters,
        pagination: &PaginationParams,
    ) -> Result<(Vec<R>, i64)> {
        pagination.validate().map_err(StorageError::Validation)?;

        match (R::OWNER_COLUMN, owner) {
            (Some(column), Some(owner)) => {
                filters.insert(column.to_string(), json!(owner));
            }
            (Some(_), None) => {
                return Err(StorageError::validation(format!(
                    "an owner is required to list {}",
                    R::TABLE.name
                )));
            }
            (None, Some(_)) => {
                return Err(StorageError::validation(format!(
                    "{} is not scoped by owner",
                    R::TABLE.name
                )));
            }
            (None, None) => {}
        }

        let page = Page {
            limit: pagination.limit(),
            offset: pagination.offset(),
        };
        let total = self.store.count(self.caller, &R::TABLE, &filters).await?;
        let rows = self
            .store
            .select(self.caller, &R::TABLE, &filters, Some(page))
            .await?;
        let records = rows.into_iter().map(from_row).collect::<Result<Vec<R>>>()?;

        Ok((records, total))
    }

    /// Applies only the supplied fields. Identity, owner, and timestamps are
    /// stripped whatever the payload says.
    pub async fn update<P: Serialize + Sync + ?Sized>(&self, id: Uuid, patch: &P) -> Result<R> {
        self.update_where(filter("id", id)?, to_row(patch)?)
            .await?
            .into_iter()
            .next()
            .ok_or(StorageError::NotFound)
    }

    pub async fn update_where(&self, filters: Filters, mut patch: Row) -> Result<Vec<R>> {
        for column in SERVER_COLUMNS.iter().chain(R::OWNER_COLUMN.iter()) {
            patch.remove(*column);
        }

        let rows = self
            .store
            .update(self.caller, &R::TABLE, &filters, patch)
            .await?;
        rows.into_iter().map(from_row).collect()
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        if self.delete_where(filter("id", id)?).await? == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }

    pub async fn delete_where(&self, filters: Filters) -> Result<u64> {
        self.store.delete(self.caller, &R::TABLE, &filters).await
    }
}
