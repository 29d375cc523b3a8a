//! JOIN clauses.
//!
//! A join compares one or more column pairs between a main table and a
//! reference target. Pairs are always ANDed, in the order they were added.

use super::derived::TableRef;
use super::writer::SqlWriter;

/// The kind of join.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    /// `INNER JOIN`.
    Inner,
    /// `LEFT JOIN`.
    Left,
    /// `RIGHT JOIN`.
    Right,
    /// `FULL OUTER JOIN`.
    Full,
    /// `CROSS JOIN`, rendered without an `ON` clause.
    Cross,
}

impl JoinKind {
    /// Returns the join keyword.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Inner => "INNER JOIN",
            Self::Left => "LEFT JOIN",
            Self::Right => "RIGHT JOIN",
            Self::Full => "FULL OUTER JOIN",
            Self::Cross => "CROSS JOIN",
        }
    }
}

/// One JOIN clause.
///
/// # Example
///
/// ```rust
/// use omega_sql_core::builder::JoinClause;
///
/// let join = JoinClause::left("orders", "id", Some("user_id"))
///     .table("users")
///     .compare("tenant_id", None);
///
/// assert_eq!(
///     join.to_sql(),
///     "LEFT JOIN orders ON users.id = orders.user_id AND users.tenant_id = orders.tenant_id"
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct JoinClause {
    kind: JoinKind,
    main_table: Option<String>,
    target: TableRef,
    comparisons: Vec<(String, String)>,
}

impl JoinClause {
    /// Builds a join of `kind` against `target` with one comparison.
    ///
    /// `ref_column` defaults to `main_column`.
    #[must_use]
    pub fn reference(
        kind: JoinKind,
        target: impl Into<TableRef>,
        main_column: &str,
        ref_column: Option<&str>,
    ) -> Self {
        Self {
            kind,
            main_table: None,
            target: target.into(),
            comparisons: Vec::new(),
        }
        .compare(main_column, ref_column)
    }

    /// Builds an `INNER JOIN`.
    #[must_use]
    pub fn inner(target: impl Into<TableRef>, main_column: &str, ref_column: Option<&str>) -> Self {
        Self::reference(JoinKind::Inner, target, main_column, ref_column)
    }

    /// Builds a `LEFT JOIN`.
    #[must_use]
    pub fn left(target: impl Into<TableRef>, main_column: &str, ref_column: Option<&str>) -> Self {
        Self::reference(JoinKind::Left, target, main_column, ref_column)
    }

    /// Builds a `RIGHT JOIN`.
    #[must_use]
    pub fn right(target: impl Into<TableRef>, main_column: &str, ref_column: Option<&str>) -> Self {
        Self::reference(JoinKind::Right, target, main_column, ref_column)
    }

    /// Builds a `FULL OUTER JOIN`.
    #[must_use]
    pub fn full(target: impl Into<TableRef>, main_column: &str, ref_column: Option<&str>) -> Self {
        Self::reference(JoinKind::Full, target, main_column, ref_column)
    }

    /// Builds a `CROSS JOIN`.
    #[must_use]
    pub fn cross(target: impl Into<TableRef>) -> Self {
        Self {
            kind: JoinKind::Cross,
            main_table: None,
            target: target.into(),
            comparisons: Vec::new(),
        }
    }

    /// Sets the main table the comparisons are qualified with.
    #[must_use]
    pub fn table(mut self, name: impl Into<String>) -> Self {
        self.main_table = Some(name.into());
        self
    }

    /// Points the join at a plain table name.
    #[must_use]
    pub fn table_ref(mut self, name: impl Into<String>) -> Self {
        self.target = TableRef::Name(name.into());
        self
    }

    /// Sets both the main table and the reference table.
    #[must_use]
    pub fn table_relation(self, main: impl Into<String>, reference: impl Into<String>) -> Self {
        self.table(main).table_ref(reference)
    }

    /// Appends another comparison, ANDed after the existing ones.
    #[must_use]
    pub fn compare(mut self, main_column: &str, ref_column: Option<&str>) -> Self {
        let ref_column = ref_column.unwrap_or(main_column);
        self.comparisons
            .push((String::from(main_column), String::from(ref_column)));
        self
    }

    #[must_use]
    pub const fn kind(&self) -> JoinKind {
        self.kind
    }

    #[must_use]
    pub fn main_table(&self) -> Option<&str> {
        self.main_table.as_deref()
    }

    #[must_use]
    pub const fn target(&self) -> &TableRef {
        &self.target
    }

    #[must_use]
    pub fn comparisons(&self) -> &[(String, String)] {
        &self.comparisons
    }

    /// Fills in the main table when none was set explicitly.
    pub(crate) fn or_main_table(mut self, main: &str) -> Self {
        if self.main_table.is_none() {
            self.main_table = Some(String::from(main));
        }
        self
    }

    /// Renders with values inlined.
    #[must_use]
    pub fn to_sql(&self) -> String {
        let mut w = SqlWriter::inline();
        self.write(&mut w);
        w.into_sql()
    }

    pub(crate) fn write(&self, w: &mut SqlWriter) {
        w.push(self.kind.keyword());
        w.push(" ");
        self.target.write(w);

        if self.kind == JoinKind::Cross || self.comparisons.is_empty() {
            return;
        }

        let reference = self.target.name();
        w.push(" ON ");
        for (i, (main_column, ref_column)) in self.comparisons.iter().enumerate() {
            if i > 0 {
                w.push(" AND ");
            }
            if let Some(main) = &self.main_table {
                w.push(main);
                w.push(".");
            }
            w.push(main_column);
            w.push(" = ");
            w.push(reference);
            w.push(".");
            w.push(ref_column);
        }
    }
}
