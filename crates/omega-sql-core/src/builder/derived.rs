//! Table references: plain names and derived tables (subqueries).

use super::table::TableStatement;
use super::writer::SqlWriter;

/// The table a statement reads from or a join points at.
#[derive(Debug, Clone, PartialEq)]
pub enum TableRef {
    /// A table referenced by name.
    Name(String),
    /// A subquery with an alias.
    Derived(Box<DerivedTable>),
}

impl TableRef {
    /// Name used to qualify columns: the table name or the derived alias.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Name(name) => name,
            Self::Derived(derived) => derived.alias(),
        }
    }

    pub(crate) fn write(&self, w: &mut SqlWriter) {
        match self {
            Self::Name(name) => w.push(name),
            Self::Derived(derived) => derived.write(w),
        }
    }
}

impl From<&str> for TableRef {
    fn from(name: &str) -> Self {
        Self::Name(String::from(name))
    }
}

impl From<String> for TableRef {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<DerivedTable> for TableRef {
    fn from(derived: DerivedTable) -> Self {
        Self::Derived(Box::new(derived))
    }
}

/// A SELECT used in place of a table, rendered as `(<select>) AS <alias>`.
///
/// The alias defaults to `<inner table>_derived`.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedTable {
    statement: TableStatement,
    alias: String,
}

impl DerivedTable {
    /// Wraps `statement` with a generated alias.
    #[must_use]
    pub fn new(statement: TableStatement) -> Self {
        let alias = format!("{}_derived", statement.target().name());
        Self { statement, alias }
    }

    /// Replaces the generated alias.
    #[must_use]
    pub fn alias_as(mut self, alias: impl Into<String>) -> Self {
        self.alias = alias.into();
        self
    }

    /// The alias the outer statement refers to.
    #[must_use]
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// The inner statement.
    #[must_use]
    pub const fn statement(&self) -> &TableStatement {
        &self.statement
    }

    /// Renders with values inlined.
    #[must_use]
    pub fn to_sql(&self) -> String {
        let mut w = SqlWriter::inline();
        self.write(&mut w);
        w.into_sql()
    }

    pub(crate) fn write(&self, w: &mut SqlWriter) {
        w.push("(");
        self.statement.write_select(w);
        w.push(") AS ");
        w.push(&self.alias);
    }
}
