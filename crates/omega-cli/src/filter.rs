//! Parsing `--where` arguments and printing rows.

use std::sync::LazyLock;

use anyhow::bail;
use omega_sql_core::builder::Connector;
use omega_sql_core::{Row, SqlValue, TableStatement};
use regex::Regex;
use serde_json::{Map, Number, Value};

/// Symbolic operators may touch the column; word operators need whitespace
/// on both sides so they never eat into a column name.
static FILTER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*([A-Za-z_][\w.]*)(?:\s*(<>|!=|<=|>=|=|<|>)|\s+(NOT\s+LIKE|LIKE|IS\s+NOT|IS)\s)\s*(.*?)\s*$",
    )
    .expect("filter pattern compiles")
});

/// One `column operator value` filter from the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub column: String,
    pub operator: String,
    pub value: SqlValue,
}

impl Filter {
    /// Parses `"age >= 21"`, `"name LIKE 'A%'"` or `"deleted_at IS NULL"`.
    pub fn parse(input: &str) -> anyhow::Result<Self> {
        let Some(captures) = FILTER_PATTERN.captures(input) else {
            bail!("cannot parse filter {input:?}, expected \"column operator value\"");
        };

        let value = &captures[4];
        if value.is_empty() {
            bail!("filter {input:?} has no value");
        }

        let Some(operator) = captures.get(2).or_else(|| captures.get(3)) else {
            bail!("filter {input:?} has no operator");
        };
        // Collapse inner whitespace so "NOT   LIKE" renders as "NOT LIKE".
        let operator = operator
            .as_str()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_uppercase();

        Ok(Self {
            column: String::from(&captures[1]),
            operator,
            value: parse_value(value),
        })
    }

    /// Appends this filter to `statement`.
    pub fn apply(self, statement: TableStatement, connector: Connector) -> TableStatement {
        statement.where_with(&self.column, &self.operator, self.value, connector)
    }
}

/// Infers a value: integer, float, `NULL`, boolean, otherwise text.
/// Single quotes around text are stripped.
pub fn parse_value(raw: &str) -> SqlValue {
    if raw.eq_ignore_ascii_case("null") {
        return SqlValue::Null;
    }
    if raw.eq_ignore_ascii_case("true") {
        return SqlValue::Bool(true);
    }
    if raw.eq_ignore_ascii_case("false") {
        return SqlValue::Bool(false);
    }
    if let Ok(i) = raw.parse::<i64>() {
        return SqlValue::Int(i);
    }
    if let Some(f) = raw.parse::<f64>().ok().filter(|f| f.is_finite()) {
        return SqlValue::Float(f);
    }

    let text = raw
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .unwrap_or(raw);
    SqlValue::Text(String::from(text))
}

/// Converts a fetched row to a JSON object.
pub fn row_to_json(row: &Row) -> Value {
    let object: Map<String, Value> = row
        .iter()
        .map(|(column, value)| (column.clone(), value_to_json(value)))
        .collect();
    Value::Object(object)
}

fn value_to_json(value: &SqlValue) -> Value {
    match value {
        SqlValue::Null => Value::Null,
        SqlValue::Bool(b) => Value::Bool(*b),
        SqlValue::Int(i) => Value::from(*i),
        SqlValue::Float(f) => Number::from_f64(*f).map_or(Value::Null, Value::Number),
        SqlValue::Text(s) => Value::String(s.clone()),
        SqlValue::Blob(bytes) => Value::Array(bytes.iter().map(|b| Value::from(*b)).collect()),
    }
}
