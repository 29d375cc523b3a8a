//! Running built statements against a [`Connection`].
//!
//! Execution always goes through the parameterized rendering, so values are
//! bound by the driver rather than spliced into the SQL text.

use async_trait::async_trait;
use omega_sql_core::{Row, SqlValue, Statement, TableStatement};
use tracing::{debug, info};

use crate::connection::Connection;
use crate::error::{DbError, Result};

/// Terminal operations for a [`TableStatement`].
///
/// UPDATE and DELETE are not guarded: without predicates they touch every
/// row of the table.
#[async_trait]
pub trait Execute {
    /// Runs the SELECT and returns all rows.
    async fn get<C: Connection + ?Sized>(&self, conn: &C) -> Result<Vec<Row>>;

    /// Runs the SELECT with `LIMIT 1` and returns the first row.
    async fn first<C: Connection + ?Sized>(&self, conn: &C) -> Result<Option<Row>>;

    /// Counts the rows the SELECT would return.
    async fn count<C: Connection + ?Sized>(&self, conn: &C) -> Result<i64>;

    /// Inserts one row and returns the last insert id.
    async fn insert<C: Connection + ?Sized>(&self, conn: &C, row: &Row) -> Result<i64>;

    /// Inserts several rows sharing the first row's columns and returns the
    /// number of rows inserted.
    async fn insert_many<C: Connection + ?Sized>(&self, conn: &C, rows: &[Row]) -> Result<u64>;

    /// Updates the matching rows and returns how many were affected.
    async fn update<C: Connection + ?Sized>(&self, conn: &C, values: &Row) -> Result<u64>;

    /// Deletes the matching rows and returns how many were affected.
    async fn delete<C: Connection + ?Sized>(&self, conn: &C) -> Result<u64>;
}

#[async_trait]
impl Execute for TableStatement {
    async fn get<C: Connection + ?Sized>(&self, conn: &C) -> Result<Vec<Row>> {
        let (sql, params) = self.build_select();
        conn.fetch_all(&sql, params).await
    }

    async fn first<C: Connection + ?Sized>(&self, conn: &C) -> Result<Option<Row>> {
        let (sql, params) = self.clone().limit(1).build_select();
        let rows = conn.fetch_all(&sql, params).await?;
        Ok(rows.into_iter().next())
    }

    async fn count<C: Connection + ?Sized>(&self, conn: &C) -> Result<i64> {
        let (sql, params) = self.build_select();
        let sql = format!("SELECT COUNT(*) AS aggregate FROM ({sql}) AS counted");
        let rows = conn.fetch_all(&sql, params).await?;
        let count = rows
            .first()
            .and_then(|row| row.get("aggregate"))
            .and_then(SqlValue::as_int)
            .unwrap_or(0);
        debug!(count, "Counted rows");
        Ok(count)
    }

    async fn insert<C: Connection + ?Sized>(&self, conn: &C, row: &Row) -> Result<i64> {
        let (sql, params) = self.build_insert(std::slice::from_ref(row));
        let outcome = conn.execute(&sql, params).await?;
        Ok(outcome.last_insert_id.unwrap_or_default())
    }

    async fn insert_many<C: Connection + ?Sized>(&self, conn: &C, rows: &[Row]) -> Result<u64> {
        if rows.is_empty() {
            return Err(DbError::EmptyInsert);
        }
        let (sql, params) = self.build_insert(rows);
        Ok(conn.execute(&sql, params).await?.rows_affected)
    }

    async fn update<C: Connection + ?Sized>(&self, conn: &C, values: &Row) -> Result<u64> {
        let (sql, params) = self.build_update(values);
        Ok(conn.execute(&sql, params).await?.rows_affected)
    }

    async fn delete<C: Connection + ?Sized>(&self, conn: &C) -> Result<u64> {
        let (sql, params) = self.build_delete();
        Ok(conn.execute(&sql, params).await?.rows_affected)
    }
}

/// Runs schema statements.
#[async_trait]
pub trait ExecuteStatement {
    /// Executes the statement and returns the affected row count.
    async fn execute<C: Connection + ?Sized>(&self, conn: &C) -> Result<u64>;
}

#[async_trait]
impl<S: Statement + Sync> ExecuteStatement for S {
    async fn execute<C: Connection + ?Sized>(&self, conn: &C) -> Result<u64> {
        let sql = self.render();
        info!(sql = %sql, "Executing schema statement");
        let outcome = Connection::execute(conn, &sql, Vec::new()).await?;
        Ok(outcome.rows_affected)
    }
}
