//! # omega-sql-core
//!
//! A fluent SQL statement builder.
//!
//! This crate provides:
//! - [`Query`] and [`TableStatement`] for SELECT, INSERT, UPDATE and DELETE
//!   with joins, derived tables, grouping, ordering and pagination
//! - [`schema`] builders for CREATE/DROP TABLE and CREATE/DROP DATABASE
//!
//! The builders never validate SQL; whatever the calls describe is what gets
//! rendered. Executing statements is left to a connection layer such as
//! `omega-db`.
//!
//! ## Inline and parameterized rendering
//!
//! ```rust
//! use omega_sql_core::Query;
//!
//! let stmt = Query::table("users").where_clause("name", "=", "O'Brien");
//!
//! assert_eq!(stmt.to_sql(), "SELECT * FROM users WHERE name = 'O''Brien'");
//!
//! let (sql, params) = stmt.build_select();
//! assert_eq!(sql, "SELECT * FROM users WHERE name = ?");
//! assert_eq!(params.len(), 1);
//! ```

pub mod builder;
pub mod schema;

pub use builder::{
    DerivedTable, Direction, JoinClause, JoinKind, Query, Row, SqlValue, TableStatement, ToSqlValue,
};
pub use schema::{ColumnDefinition, CreateDatabase, CreateTable, DropDatabase, DropTable, Statement};
