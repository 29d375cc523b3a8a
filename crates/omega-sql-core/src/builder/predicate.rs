//! WHERE predicates.

use super::value::SqlValue;
use super::writer::SqlWriter;

/// Boolean operator joining a predicate to the one before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Connector {
    /// `AND`.
    #[default]
    And,
    /// `OR`.
    Or,
}

impl Connector {
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

/// The test a predicate applies to a column.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// `<column> <operator> <value>`.
    Compare {
        column: String,
        operator: String,
        value: SqlValue,
    },
    /// `<column> IS [NOT] NULL`.
    Null { column: String, negated: bool },
    /// `<column> IN (<values>)`.
    In {
        column: String,
        values: Vec<SqlValue>,
    },
}

/// One entry of a WHERE clause.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    /// Ignored for the first predicate.
    pub connector: Connector,
    pub condition: Condition,
}

impl Predicate {
    pub(crate) fn write(&self, w: &mut SqlWriter) {
        match &self.condition {
            Condition::Compare {
                column,
                operator,
                value,
            } => {
                w.push(column);
                w.push(" ");
                w.push(operator);
                w.push(" ");
                w.push_value(value);
            }
            Condition::Null { column, negated } => {
                w.push(column);
                w.push(if *negated { " IS NOT NULL" } else { " IS NULL" });
            }
            Condition::In { column, values } => {
                w.push(column);
                w.push(" IN (");
                w.push_values(values);
                w.push(")");
            }
        }
    }
}

/// Writes ` WHERE p1 <conn> p2 ...`, or nothing for an empty list.
pub(crate) fn write_where(w: &mut SqlWriter, predicates: &[Predicate]) {
    for (i, predicate) in predicates.iter().enumerate() {
        if i == 0 {
            w.push(" WHERE ");
        } else {
            w.push(" ");
            w.push(predicate.connector.as_sql());
            w.push(" ");
        }
        predicate.write(w);
    }
}
