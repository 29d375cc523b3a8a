//! The table statement builder.
//!
//! A [`TableStatement`] accumulates the pieces of one statement against one
//! table. Which statement it becomes (SELECT, INSERT, UPDATE or DELETE) is
//! decided by the method that renders it. Predicates are append-only and
//! render in declaration order.
//!
//! Every statement kind has two renderings: `*_sql` inlines values as
//! literals, `build_*` emits `?` placeholders and returns the values to bind.

use super::derived::{DerivedTable, TableRef};
use super::join::JoinClause;
use super::predicate::{Condition, Connector, Predicate, write_where};
use super::value::{Row, SqlValue, ToSqlValue};
use super::writer::SqlWriter;

/// Sort direction for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Entry point for table statements.
///
/// ```rust
/// use omega_sql_core::builder::{Direction, Query};
///
/// let sql = Query::table("users")
///     .select(&["id", "name"])
///     .where_clause("active", "=", true)
///     .or_where("role", "=", "admin")
///     .order_by("name", Direction::Asc)
///     .limit(10)
///     .to_sql();
///
/// assert_eq!(
///     sql,
///     "SELECT id, name FROM users WHERE active = TRUE OR role = 'admin' ORDER BY name ASC LIMIT 10"
/// );
/// ```
pub struct Query;

impl Query {
    /// Starts a statement against a named table.
    #[must_use]
    pub fn table(name: impl Into<String>) -> TableStatement {
        TableStatement::new(TableRef::Name(name.into()))
    }

    /// Starts a statement reading from a derived table.
    #[must_use]
    pub fn from(derived: DerivedTable) -> TableStatement {
        TableStatement::new(TableRef::from(derived))
    }
}

/// Accumulator for one statement against one table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableStatement {
    target: TableRef,
    columns: Vec<String>,
    joins: Vec<JoinClause>,
    predicates: Vec<Predicate>,
    group_by: Vec<String>,
    order_by: Vec<(String, Direction)>,
    limit: Option<u64>,
    offset: Option<u64>,
}

impl TableStatement {
    /// Creates an empty statement against `target`.
    #[must_use]
    pub fn new(target: TableRef) -> Self {
        Self {
            target,
            columns: vec![String::from("*")],
            joins: vec![],
            predicates: vec![],
            group_by: vec![],
            order_by: vec![],
            limit: None,
            offset: None,
        }
    }

    /// Sets the selected columns. An empty list selects `*`.
    #[must_use]
    pub fn select(mut self, columns: &[&str]) -> Self {
        self.columns = if columns.is_empty() {
            vec![String::from("*")]
        } else {
            columns.iter().map(|c| String::from(*c)).collect()
        };
        self
    }

    /// Appends `column operator value`, ANDed with what came before.
    #[must_use]
    pub fn where_clause<T: ToSqlValue>(self, column: &str, operator: &str, value: T) -> Self {
        self.where_with(column, operator, value, Connector::And)
    }

    /// Appends `column operator value`, ORed with what came before.
    #[must_use]
    pub fn or_where<T: ToSqlValue>(self, column: &str, operator: &str, value: T) -> Self {
        self.where_with(column, operator, value, Connector::Or)
    }

    /// Appends `column operator value` with an explicit connector.
    #[must_use]
    pub fn where_with<T: ToSqlValue>(
        self,
        column: &str,
        operator: &str,
        value: T,
        connector: Connector,
    ) -> Self {
        self.push_predicate(
            connector,
            Condition::Compare {
                column: String::from(column),
                operator: String::from(operator),
                value: value.to_sql_value(),
            },
        )
    }

    /// Appends `column IS NULL`.
    #[must_use]
    pub fn where_null(self, column: &str) -> Self {
        self.push_predicate(Connector::And, null_check(column, false))
    }

    /// Appends `column IS NOT NULL`.
    #[must_use]
    pub fn where_not_null(self, column: &str) -> Self {
        self.push_predicate(Connector::And, null_check(column, true))
    }

    /// Appends `OR column IS NULL`.
    #[must_use]
    pub fn or_where_null(self, column: &str) -> Self {
        self.push_predicate(Connector::Or, null_check(column, false))
    }

    /// Appends `OR column IS NOT NULL`.
    #[must_use]
    pub fn or_where_not_null(self, column: &str) -> Self {
        self.push_predicate(Connector::Or, null_check(column, true))
    }

    /// Appends `column IN (values)`.
    #[must_use]
    pub fn where_in<T: ToSqlValue>(self, column: &str, values: Vec<T>) -> Self {
        self.push_predicate(Connector::And, in_list(column, values))
    }

    /// Appends `OR column IN (values)`.
    #[must_use]
    pub fn or_where_in<T: ToSqlValue>(self, column: &str, values: Vec<T>) -> Self {
        self.push_predicate(Connector::Or, in_list(column, values))
    }

    fn push_predicate(mut self, connector: Connector, condition: Condition) -> Self {
        self.predicates.push(Predicate {
            connector,
            condition,
        });
        self
    }

    /// Appends a join.
    ///
    /// A join without an explicit main table is qualified with this
    /// statement's table name (or derived alias).
    #[must_use]
    pub fn join(mut self, clause: JoinClause) -> Self {
        let clause = clause.or_main_table(self.target.name());
        self.joins.push(clause);
        self
    }

    /// Appends GROUP BY columns.
    #[must_use]
    pub fn group_by(mut self, columns: &[&str]) -> Self {
        self.group_by.extend(columns.iter().map(|c| String::from(*c)));
        self
    }

    /// Appends an ORDER BY column.
    #[must_use]
    pub fn order_by(mut self, column: &str, direction: Direction) -> Self {
        self.order_by.push((String::from(column), direction));
        self
    }

    #[must_use]
    pub const fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    /// Sets OFFSET. Only rendered together with a limit.
    #[must_use]
    pub const fn offset(mut self, n: u64) -> Self {
        self.offset = Some(n);
        self
    }

    #[must_use]
    pub const fn target(&self) -> &TableRef {
        &self.target
    }

    #[must_use]
    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    #[must_use]
    pub fn joins(&self) -> &[JoinClause] {
        &self.joins
    }

    // SELECT

    /// Renders the SELECT with values inlined.
    #[must_use]
    pub fn to_sql(&self) -> String {
        let mut w = SqlWriter::inline();
        self.write_select(&mut w);
        w.into_sql()
    }

    /// Renders the SELECT with placeholders.
    #[must_use]
    pub fn build_select(&self) -> (String, Vec<SqlValue>) {
        let mut w = SqlWriter::parameterized();
        self.write_select(&mut w);
        w.finish()
    }

    pub(crate) fn write_select(&self, w: &mut SqlWriter) {
        w.push("SELECT ");
        w.push(&self.columns.join(", "));
        w.push(" FROM ");
        self.target.write(w);

        for join in &self.joins {
            w.push(" ");
            join.write(w);
        }

        write_where(w, &self.predicates);

        if !self.group_by.is_empty() {
            w.push(" GROUP BY ");
            w.push(&self.group_by.join(", "));
        }

        if !self.order_by.is_empty() {
            let order: Vec<String> = self
                .order_by
                .iter()
                .map(|(column, dir)| format!("{column} {}", dir.as_sql()))
                .collect();
            w.push(" ORDER BY ");
            w.push(&order.join(", "));
        }

        if let Some(limit) = self.limit {
            w.push(&format!(" LIMIT {limit}"));
            if let Some(offset) = self.offset {
                w.push(&format!(" OFFSET {offset}"));
            }
        }
    }

    // INSERT

    /// Renders a single-row INSERT with values inlined.
    #[must_use]
    pub fn insert_sql(&self, row: &Row) -> String {
        self.insert_many_sql(std::slice::from_ref(row))
    }

    /// Renders a multi-row INSERT with values inlined.
    ///
    /// The first row's keys name the columns. Later rows contribute their
    /// values in their own key order, unchecked.
    #[must_use]
    pub fn insert_many_sql(&self, rows: &[Row]) -> String {
        let mut w = SqlWriter::inline();
        self.write_insert(&mut w, rows);
        w.into_sql()
    }

    /// Renders a multi-row INSERT with placeholders.
    #[must_use]
    pub fn build_insert(&self, rows: &[Row]) -> (String, Vec<SqlValue>) {
        let mut w = SqlWriter::parameterized();
        self.write_insert(&mut w, rows);
        w.finish()
    }

    fn write_insert(&self, w: &mut SqlWriter, rows: &[Row]) {
        w.push("INSERT INTO ");
        self.target.write(w);

        let columns: Vec<&str> = rows
            .first()
            .map(|row| row.keys().map(String::as_str).collect())
            .unwrap_or_default();
        w.push(" (");
        w.push(&columns.join(", "));
        w.push(") VALUES ");

        for (i, row) in rows.iter().enumerate() {
            if i > 0 {
                w.push(", ");
            }
            w.push("(");
            w.push_values(row.values());
            w.push(")");
        }
    }

    // UPDATE

    /// Renders an UPDATE with values inlined.
    ///
    /// Without predicates every row of the table is updated.
    #[must_use]
    pub fn update_sql(&self, values: &Row) -> String {
        let mut w = SqlWriter::inline();
        self.write_update(&mut w, values);
        w.into_sql()
    }

    /// Renders an UPDATE with placeholders.
    #[must_use]
    pub fn build_update(&self, values: &Row) -> (String, Vec<SqlValue>) {
        let mut w = SqlWriter::parameterized();
        self.write_update(&mut w, values);
        w.finish()
    }

    fn write_update(&self, w: &mut SqlWriter, values: &Row) {
        w.push("UPDATE ");
        self.target.write(w);
        w.push(" SET ");
        for (i, (column, value)) in values.iter().enumerate() {
            if i > 0 {
                w.push(", ");
            }
            w.push(column);
            w.push(" = ");
            w.push_value(value);
        }
        write_where(w, &self.predicates);
    }

    // DELETE

    /// Renders a DELETE with values inlined.
    ///
    /// Without predicates every row of the table is deleted.
    #[must_use]
    pub fn delete_sql(&self) -> String {
        let mut w = SqlWriter::inline();
        self.write_delete(&mut w);
        w.into_sql()
    }

    /// Renders a DELETE with placeholders.
    #[must_use]
    pub fn build_delete(&self) -> (String, Vec<SqlValue>) {
        let mut w = SqlWriter::parameterized();
        self.write_delete(&mut w);
        w.finish()
    }

    fn write_delete(&self, w: &mut SqlWriter) {
        w.push("DELETE FROM ");
        self.target.write(w);
        write_where(w, &self.predicates);
    }
}

fn null_check(column: &str, negated: bool) -> Condition {
    Condition::Null {
        column: String::from(column),
        negated,
    }
}

fn in_list<T: ToSqlValue>(column: &str, values: Vec<T>) -> Condition {
    Condition::In {
        column: String::from(column),
        values: values.into_iter().map(ToSqlValue::to_sql_value).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row;

    #[test]
    fn test_select_defaults_to_star() {
        assert_eq!(Query::table("users").to_sql(), "SELECT * FROM users");
        assert_eq!(
            Query::table("users").select(&[]).to_sql(),
            "SELECT * FROM users"
        );
    }

    #[test]
    fn test_first_connector_is_dropped() {
        let sql = Query::table("users")
            .or_where("id", "=", 1)
            .where_clause("name", "LIKE", "a%")
            .to_sql();
        assert_eq!(sql, "SELECT * FROM users WHERE id = 1 AND name LIKE 'a%'");
    }

    #[test]
    fn test_predicates_keep_declaration_order() {
        let sql = Query::table("t")
            .where_clause("a", "=", 1)
            .or_where("b", "=", 2)
            .where_clause("c", "=", 3)
            .to_sql();
        assert_eq!(sql, "SELECT * FROM t WHERE a = 1 OR b = 2 AND c = 3");
    }

    #[test]
    fn test_null_and_in_predicates() {
        let sql = Query::table("t")
            .where_null("deleted_at")
            .where_in("status", vec!["new", "open"])
            .or_where_null("owner")
            .where_not_null("id")
            .or_where_in("id", vec![1, 2])
            .or_where_not_null("archived_at")
            .to_sql();
        assert_eq!(
            sql,
            "SELECT * FROM t WHERE deleted_at IS NULL AND status IN ('new', 'open') \
             OR owner IS NULL AND id IS NOT NULL OR id IN (1, 2) OR archived_at IS NOT NULL"
        );
    }

    #[test]
    fn test_value_quoting() {
        let sql = Query::table("t")
            .where_clause("s", "=", "it's")
            .where_clause("n", ">", 2.5)
            .where_clause("b", "=", false)
            .where_clause("x", "IS", SqlValue::Null)
            .to_sql();
        assert_eq!(
            sql,
            "SELECT * FROM t WHERE s = 'it''s' AND n > 2.5 AND b = FALSE AND x IS NULL"
        );
    }

    #[test]
    fn test_full_select_clause_order() {
        let sql = Query::table("users")
            .select(&["users.id", "COUNT(orders.id) AS n"])
            .join(JoinClause::left("orders", "id", Some("user_id")))
            .where_clause("users.active", "=", 1)
            .group_by(&["users.id"])
            .order_by("n", Direction::Desc)
            .order_by("users.id", Direction::Asc)
            .limit(5)
            .offset(10)
            .to_sql();
        assert_eq!(
            sql,
            "SELECT users.id, COUNT(orders.id) AS n FROM users \
             LEFT JOIN orders ON users.id = orders.user_id \
             WHERE users.active = 1 GROUP BY users.id \
             ORDER BY n DESC, users.id ASC LIMIT 5 OFFSET 10"
        );
    }

    #[test]
    fn test_offset_without_limit_is_omitted() {
        assert_eq!(
            Query::table("t").offset(3).to_sql(),
            "SELECT * FROM t"
        );
    }

    #[test]
    fn test_select_from_derived_table() {
        let inner = DerivedTable::new(Query::table("orders").where_clause("total", ">", 10));
        let sql = Query::from(inner)
            .select(&["COUNT(*)"])
            .to_sql();
        assert_eq!(
            sql,
            "SELECT COUNT(*) FROM (SELECT * FROM orders WHERE total > 10) AS orders_derived"
        );
    }

    #[test]
    fn test_build_select_collects_params_in_render_order() {
        let inner = DerivedTable::new(Query::table("orders").where_clause("total", ">", 10))
            .alias_as("o");
        let (sql, params) = Query::table("users")
            .join(JoinClause::inner(inner, "id", Some("user_id")))
            .where_clause("name", "=", "bob")
            .build_select();
        assert_eq!(
            sql,
            "SELECT * FROM users INNER JOIN (SELECT * FROM orders WHERE total > ?) AS o \
             ON users.id = o.user_id WHERE name = ?"
        );
        assert_eq!(
            params,
            vec![SqlValue::Int(10), SqlValue::Text(String::from("bob"))]
        );
    }

    #[test]
    fn test_insert() {
        let stmt = Query::table("users");
        assert_eq!(
            stmt.insert_sql(&row! { "name" => "Alice", "age" => 30 }),
            "INSERT INTO users (name, age) VALUES ('Alice', 30)"
        );
    }

    #[test]
    fn test_insert_many_uses_first_row_columns() {
        let rows = vec![
            row! { "name" => "Alice", "age" => 30 },
            row! { "name" => "Bob", "age" => 41 },
        ];
        let stmt = Query::table("users");
        assert_eq!(
            stmt.insert_many_sql(&rows),
            "INSERT INTO users (name, age) VALUES ('Alice', 30), ('Bob', 41)"
        );

        let (sql, params) = stmt.build_insert(&rows);
        assert_eq!(sql, "INSERT INTO users (name, age) VALUES (?, ?), (?, ?)");
        assert_eq!(params.len(), 4);
    }

    #[test]
    fn test_insert_many_mismatched_rows_pass_through() {
        let rows = vec![
            row! { "name" => "Alice", "age" => 30 },
            row! { "age" => 41 },
        ];
        assert_eq!(
            Query::table("users").insert_many_sql(&rows),
            "INSERT INTO users (name, age) VALUES ('Alice', 30), (41)"
        );
    }

    #[test]
    fn test_update_with_and_without_where() {
        let values = row! { "active" => false, "note" => "gone" };
        assert_eq!(
            Query::table("users")
                .where_clause("id", "=", 7)
                .update_sql(&values),
            "UPDATE users SET active = FALSE, note = 'gone' WHERE id = 7"
        );
        assert_eq!(
            Query::table("users").update_sql(&values),
            "UPDATE users SET active = FALSE, note = 'gone'"
        );

        let (sql, params) = Query::table("users")
            .where_clause("id", "=", 7)
            .build_update(&values);
        assert_eq!(sql, "UPDATE users SET active = ?, note = ? WHERE id = ?");
        assert_eq!(params.last(), Some(&SqlValue::Int(7)));
    }

    #[test]
    fn test_delete_with_and_without_where() {
        assert_eq!(Query::table("users").delete_sql(), "DELETE FROM users");
        assert_eq!(
            Query::table("users")
                .where_clause("id", "<", 3)
                .or_where("banned", "=", true)
                .delete_sql(),
            "DELETE FROM users WHERE id < 3 OR banned = TRUE"
        );
        let (sql, params) = Query::table("users").where_in("id", vec![1, 2]).build_delete();
        assert_eq!(sql, "DELETE FROM users WHERE id IN (?, ?)");
        assert_eq!(params, vec![SqlValue::Int(1), SqlValue::Int(2)]);
    }
}
