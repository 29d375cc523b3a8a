//! Schema DDL builders.
//!
//! # Example
//!
//! ```rust
//! use omega_sql_core::schema::CreateTable;
//!
//! let mut create = CreateTable::new("shop", "products");
//! create.column("id").int().unsigned().not_null().auto_increment();
//! create.column("name").varchar(255).not_null();
//! create.column("size").enumeration(&["small", "large"]).default("small");
//! create.primary_key(&["id"]).engine("InnoDB");
//!
//! assert_eq!(
//!     create.to_sql(),
//!     "CREATE TABLE shop.products ( id int UNSIGNED NOT NULL AUTO_INCREMENT, \
//!      name varchar(255) NOT NULL, size ENUM ('small', 'large') DEFAULT 'small', \
//!      PRIMARY KEY (id) ) ENGINE=InnoDB"
//! );
//! ```

mod column;
mod create;
mod database;
mod drop;

pub use column::{ColumnDefinition, ColumnType, DefaultValue, Nullability};
pub use create::CreateTable;
pub use database::{CreateDatabase, DropDatabase};
pub use drop::DropTable;

/// A DDL statement that renders to a single SQL string.
pub trait Statement {
    /// Renders the statement.
    fn render(&self) -> String;
}

/// The `IF [NOT] EXISTS` slot shared by the `if_exists` and
/// `if_not_exists` toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExistenceCheck {
    #[default]
    Unset,
    Exists,
    NotExists,
}

impl ExistenceCheck {
    /// `if_exists(true)` is `IF EXISTS`, `if_exists(false)` is `IF NOT EXISTS`.
    #[must_use]
    pub const fn from_if_exists(flag: bool) -> Self {
        if flag { Self::Exists } else { Self::NotExists }
    }

    /// `if_not_exists(true)` is `IF NOT EXISTS`, `if_not_exists(false)` is `IF EXISTS`.
    #[must_use]
    pub const fn from_if_not_exists(flag: bool) -> Self {
        Self::from_if_exists(!flag)
    }

    /// Returns the clause with a leading space, or an empty string.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Unset => "",
            Self::Exists => " IF EXISTS",
            Self::NotExists => " IF NOT EXISTS",
        }
    }
}
