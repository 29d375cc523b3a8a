//! # omega-db
//!
//! Runs statements built with `omega-sql-core` against a database.
//!
//! This crate provides:
//! - [`Connection`], the seam between builders and a driver
//! - [`SqliteConnection`], a sqlx-backed implementation
//! - [`Execute`] and [`ExecuteStatement`], the async terminals for table
//!   statements and schema statements
//! - [`DbConfig`] for opening a pool from settings or the environment
//!
//! ## Example
//!
//! ```rust,ignore
//! use omega_db::{DbConfig, Execute, ExecuteStatement};
//! use omega_sql_core::{CreateTable, Query, row};
//!
//! async fn example() -> omega_db::Result<()> {
//!     let conn = DbConfig::from_env()?.connect().await?;
//!
//!     let mut create = CreateTable::new("main", "people");
//!     create.column("id").int().not_null();
//!     create.column("name").varchar(80);
//!     create.primary_key(&["id"]);
//!     create.execute(&conn).await?;
//!
//!     Query::table("people")
//!         .insert(&conn, &row! { "id" => 1, "name" => "Ada" })
//!         .await?;
//!
//!     let rows = Query::table("people")
//!         .where_clause("name", "LIKE", "A%")
//!         .get(&conn)
//!         .await?;
//!     assert_eq!(rows.len(), 1);
//!     Ok(())
//! }
//! ```

mod config;
mod connection;
mod error;
mod execute;

pub use config::{DEFAULT_DATABASE_URL, DEFAULT_MAX_CONNECTIONS, DbConfig};
pub use connection::{Connection, ExecOutcome, SqliteConnection};
pub use error::{DbError, Result};
pub use execute::{Execute, ExecuteStatement};
