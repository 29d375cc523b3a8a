//! The connection seam between statements and a database driver.

use async_trait::async_trait;
use omega_sql_core::{Row, SqlValue};
use sqlx::sqlite::{SqliteArguments, SqlitePool, SqliteRow};
use sqlx::{Column as _, Row as _, Sqlite, TypeInfo as _, ValueRef as _};
use tracing::debug;

use crate::error::Result;

/// Outcome of a statement that does not return rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExecOutcome {
    /// Rows inserted, updated or deleted.
    pub rows_affected: u64,
    /// Row id of the last inserted row. `None` for statements other than
    /// INSERT and for inserts that added nothing.
    pub last_insert_id: Option<i64>,
}

/// Something that can run SQL with bound parameters.
///
/// Builders render statements; a `Connection` runs them. Errors come back
/// from the driver unchanged.
#[async_trait]
pub trait Connection: Send + Sync {
    /// Runs a query and returns every row.
    async fn fetch_all(&self, sql: &str, params: Vec<SqlValue>) -> Result<Vec<Row>>;

    /// Runs a statement that does not return rows.
    async fn execute(&self, sql: &str, params: Vec<SqlValue>) -> Result<ExecOutcome>;
}

/// A [`Connection`] backed by a SQLite pool.
#[derive(Debug, Clone)]
pub struct SqliteConnection {
    pool: SqlitePool,
}

impl SqliteConnection {
    /// Wraps an existing pool.
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Returns the underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl Connection for SqliteConnection {
    async fn fetch_all(&self, sql: &str, params: Vec<SqlValue>) -> Result<Vec<Row>> {
        debug!(sql = %sql, params = params.len(), "Fetching rows");

        let mut query = sqlx::query(sql);
        for value in params {
            query = bind_param(query, value);
        }
        let rows = query.fetch_all(&self.pool).await?;
        rows.iter().map(decode_row).collect()
    }

    async fn execute(&self, sql: &str, params: Vec<SqlValue>) -> Result<ExecOutcome> {
        debug!(sql = %sql, params = params.len(), "Executing statement");

        let mut query = sqlx::query(sql);
        for value in params {
            query = bind_param(query, value);
        }
        let result = query.execute(&self.pool).await?;
        let rows_affected = result.rows_affected();
        // SQLite keeps the previous rowid around for non-insert statements.
        let last_insert_id =
            (is_insert(sql) && rows_affected > 0).then(|| result.last_insert_rowid());
        Ok(ExecOutcome {
            rows_affected,
            last_insert_id,
        })
    }
}

fn is_insert(sql: &str) -> bool {
    sql.trim_start()
        .get(..6)
        .is_some_and(|head| head.eq_ignore_ascii_case("insert"))
}

/// Binds a SqlValue parameter to a query.
fn bind_param<'q>(
    query: sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>>,
    value: SqlValue,
) -> sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>> {
    match value {
        SqlValue::Null => query.bind(Option::<i64>::None),
        SqlValue::Bool(b) => query.bind(b),
        SqlValue::Int(i) => query.bind(i),
        SqlValue::Float(f) => query.bind(f),
        SqlValue::Text(s) => query.bind(s),
        SqlValue::Blob(b) => query.bind(b),
    }
}

/// Decodes a row by the storage class of each value, keeping column order.
fn decode_row(row: &SqliteRow) -> Result<Row> {
    let mut decoded = Row::with_capacity(row.len());
    for column in row.columns() {
        let index = column.ordinal();
        let raw = row.try_get_raw(index)?;
        let value = if raw.is_null() {
            SqlValue::Null
        } else {
            match raw.type_info().name() {
                "INTEGER" | "BOOLEAN" => SqlValue::Int(row.try_get_unchecked::<i64, _>(index)?),
                "REAL" | "NUMERIC" => SqlValue::Float(row.try_get_unchecked::<f64, _>(index)?),
                "BLOB" => SqlValue::Blob(row.try_get_unchecked::<Vec<u8>, _>(index)?),
                _ => SqlValue::Text(row.try_get_unchecked::<String, _>(index)?),
            }
        };
        decoded.insert(String::from(column.name()), value);
    }
    Ok(decoded)
}
