//! Shared SQL text accumulator.

use super::value::SqlValue;

/// Accumulates SQL text and, in parameterized mode, the bound values.
///
/// In inline mode values are written as literals and no parameters are
/// collected.
#[derive(Debug, Default)]
pub(crate) struct SqlWriter {
    sql: String,
    params: Vec<SqlValue>,
    inline: bool,
}

impl SqlWriter {
    pub(crate) fn inline() -> Self {
        Self {
            inline: true,
            ..Self::default()
        }
    }

    pub(crate) fn parameterized() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, fragment: &str) {
        self.sql.push_str(fragment);
    }

    pub(crate) fn push_value(&mut self, value: &SqlValue) {
        if self.inline {
            self.sql.push_str(&value.to_sql_inline());
        } else {
            self.sql.push('?');
            self.params.push(value.clone());
        }
    }

    /// Writes `values` comma-separated.
    pub(crate) fn push_values<'a>(&mut self, values: impl IntoIterator<Item = &'a SqlValue>) {
        for (i, value) in values.into_iter().enumerate() {
            if i > 0 {
                self.sql.push_str(", ");
            }
            self.push_value(value);
        }
    }

    pub(crate) fn into_sql(self) -> String {
        self.sql
    }

    pub(crate) fn finish(self) -> (String, Vec<SqlValue>) {
        (self.sql, self.params)
    }
}
