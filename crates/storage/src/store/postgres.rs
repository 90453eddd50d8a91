use async_trait::async_trait;
use serde_json::{Value, json};
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};

use super::{Filters, Page, RecordStore, Row, Table, require_filters};
use crate::context::Caller;
use crate::error::Result;

/// Postgres-backed store.
///
/// Each call runs in its own transaction that first publishes the caller as
/// `request.jwt.claims`, which is what the row-level policies in the
/// migrations read. Rows travel as `jsonb`; column names are checked against
/// the table declaration before they reach SQL and every value is bound.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn scoped(&self, caller: &Caller) -> Result<Transaction<'static, Postgres>> {
        let mut tx = self.pool.begin().await?;
        let claims = json!({
            "sub": caller.user_id,
            "email": caller.email,
            "role": "authenticated",
        });
        sqlx::query("SELECT set_config('request.jwt.claims', $1, true)")
            .bind(claims.to_string())
            .execute(&mut *tx)
            .await?;
        Ok(tx)
    }
}

fn push_filters(query: &mut QueryBuilder<'_, Postgres>, filters: &Filters) {
    query.push(" WHERE TRUE");
    for (column, value) in filters {
        query.push(" AND to_jsonb(t) -> ");
        query.push_bind(column.clone());
        query.push(" = ");
        query.push_bind(Json(value.clone()));
    }
}

fn quoted_columns(row: &Row) -> Vec<String> {
    row.keys().map(|column| format!("\"{}\"", column)).collect()
}

#[async_trait]
impl RecordStore for PgStore {
    fn backend_tag(&self) -> &'static str {
        "postgres"
    }

    async fn select(
        &self,
        caller: &Caller,
        table: &Table,
        filters: &Filters,
        page: Option<Page>,
    ) -> Result<Vec<Row>> {
        table.check_columns(filters.keys())?;

        let mut query = QueryBuilder::<Postgres>::new("SELECT to_jsonb(t) FROM ");
        query.push(table.name);
        query.push(" AS t");
        push_filters(&mut query, filters);
        query.push(" ORDER BY t.created_at DESC, t.id");
        if let Some(page) = page {
            query.push(" LIMIT ");
            query.push_bind(i64::from(page.limit));
            query.push(" OFFSET ");
            query.push_bind(i64::from(page.offset));
        }

        let mut tx = self.scoped(caller).await?;
        let rows: Vec<Json<Row>> = query.build_query_scalar().fetch_all(&mut *tx).await?;
        tx.commit().await?;

        Ok(rows.into_iter().map(|Json(row)| row).collect())
    }

    async fn count(&self, caller: &Caller, table: &Table, filters: &Filters) -> Result<i64> {
        table.check_columns(filters.keys())?;

        let mut query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM ");
        query.push(table.name);
        query.push(" AS t");
        push_filters(&mut query, filters);

        let mut tx = self.scoped(caller).await?;
        let count: i64 = query.build_query_scalar().fetch_one(&mut *tx).await?;
        tx.commit().await?;

        Ok(count)
    }

    async fn insert(&self, caller: &Caller, table: &Table, row: Row) -> Result<Row> {
        table.check_columns(row.keys())?;
        let columns = quoted_columns(&row).join(", ");

        let mut query = QueryBuilder::<Postgres>::new("INSERT INTO ");
        query.push(table.name);
        query.push(" AS t (");
        query.push(&columns);
        query.push(") SELECT ");
        query.push(&columns);
        query.push(" FROM jsonb_populate_record(NULL::");
        query.push(table.name);
        query.push(", ");
        query.push_bind(Json(Value::Object(row)));
        query.push(") RETURNING to_jsonb(t)");

        let mut tx = self.scoped(caller).await?;
        let Json(stored): Json<Row> = query.build_query_scalar().fetch_one(&mut *tx).await?;
        tx.commit().await?;

        Ok(stored)
    }

    async fn update(
        &self,
        caller: &Caller,
        table: &Table,
        filters: &Filters,
        patch: Row,
    ) -> Result<Vec<Row>> {
        require_filters(table, filters)?;
        table.check_columns(filters.keys().chain(patch.keys()))?;

        let mut query = QueryBuilder::<Postgres>::new("UPDATE ");
        query.push(table.name);
        query.push(" AS t SET ");
        for column in quoted_columns(&patch) {
            query.push(format!("{column} = r.{column}, "));
        }
        query.push("updated_at = now() FROM jsonb_populate_record(NULL::");
        query.push(table.name);
        query.push(", ");
        query.push_bind(Json(Value::Object(patch)));
        query.push(") AS r");
        push_filters(&mut query, filters);
        query.push(" RETURNING to_jsonb(t)");

        let mut tx = self.scoped(caller).await?;
        let rows: Vec<Json<Row>> = query.build_query_scalar().fetch_all(&mut *tx).await?;
        tx.commit().await?;

        Ok(rows.into_iter().map(|Json(row)| row).collect())
    }

    async fn delete(&self, caller: &Caller, table: &Table, filters: &Filters) -> Result<u64> {
        require_filters(table, filters)?;
        table.check_columns(filters.keys())?;

        let mut query = QueryBuilder::<Postgres>::new("DELETE FROM ");
        query.push(table.name);
        query.push(" AS t");
        push_filters(&mut query, filters);

        let mut tx = self.scoped(caller).await?;
        let result = query.build().execute(&mut *tx).await?;
        tx.commit().await?;

        Ok(result.rows_affected())
    }
}
