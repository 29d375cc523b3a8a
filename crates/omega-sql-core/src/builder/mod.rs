//! Fluent statement builder.
//!
//! Statements start from [`Query::table`] or [`Query::from`] and are rendered
//! by whichever terminal method is called last.
//!
//! # Example
//!
//! ```rust
//! use omega_sql_core::builder::{JoinClause, Query};
//!
//! let (sql, params) = Query::table("users")
//!     .select(&["users.name", "orders.total"])
//!     .join(JoinClause::inner("orders", "id", Some("user_id")))
//!     .where_clause("orders.total", ">", 100)
//!     .build_select();
//!
//! assert_eq!(
//!     sql,
//!     "SELECT users.name, orders.total FROM users \
//!      INNER JOIN orders ON users.id = orders.user_id WHERE orders.total > ?"
//! );
//! assert_eq!(params.len(), 1);
//! ```

mod derived;
mod join;
mod predicate;
mod table;
pub mod value;
mod writer;

pub use derived::{DerivedTable, TableRef};
pub use join::{JoinClause, JoinKind};
pub use predicate::{Condition, Connector, Predicate};
pub use table::{Direction, Query, TableStatement};
pub use value::{Row, SqlValue, ToSqlValue};
