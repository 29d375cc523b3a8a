//! Values bound into statements and rows read back from a connection.

use indexmap::IndexMap;

/// A single value carried by a predicate, an insert row or an update.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// NULL value.
    Null,
    /// Boolean value, rendered bare as `TRUE`/`FALSE`.
    Bool(bool),
    /// Integer value, rendered bare.
    Int(i64),
    /// Float value, rendered bare.
    Float(f64),
    /// Text value, rendered single-quoted.
    Text(String),
    /// Binary value, rendered as a hex literal.
    Blob(Vec<u8>),
}

impl SqlValue {
    /// Renders the value as an inline SQL literal.
    ///
    /// Text has embedded single quotes doubled. Prefer the parameterized
    /// `build_*` methods on [`TableStatement`](super::TableStatement) when
    /// the value comes from user input.
    #[must_use]
    pub fn to_sql_inline(&self) -> String {
        match self {
            Self::Null => String::from("NULL"),
            Self::Bool(true) => String::from("TRUE"),
            Self::Bool(false) => String::from("FALSE"),
            Self::Int(n) => n.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Text(s) => format!("'{}'", s.replace('\'', "''")),
            Self::Blob(bytes) => {
                let hex: String = bytes.iter().map(|b| format!("{b:02X}")).collect();
                format!("X'{hex}'")
            }
        }
    }

    /// Returns true for `NULL`.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the integer payload, if any.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the text payload, if any.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// One row: column name to value, in column order.
///
/// Used both for insert/update input and for result sets.
pub type Row = IndexMap<String, SqlValue>;

/// Conversion into [`SqlValue`].
pub trait ToSqlValue {
    /// Converts the value.
    fn to_sql_value(self) -> SqlValue;
}

impl ToSqlValue for SqlValue {
    fn to_sql_value(self) -> SqlValue {
        self
    }
}

impl ToSqlValue for bool {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Bool(self)
    }
}

macro_rules! int_to_sql_value {
    ($($ty:ty),*) => {
        $(
            impl ToSqlValue for $ty {
                fn to_sql_value(self) -> SqlValue {
                    SqlValue::Int(i64::from(self))
                }
            }
        )*
    };
}

int_to_sql_value!(i8, i16, i32, i64, u8, u16, u32);

impl ToSqlValue for f32 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Float(f64::from(self))
    }
}

impl ToSqlValue for f64 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Float(self)
    }
}

impl ToSqlValue for String {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Text(self)
    }
}

impl ToSqlValue for &str {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Text(String::from(self))
    }
}

impl ToSqlValue for &String {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Text(self.clone())
    }
}

impl ToSqlValue for Vec<u8> {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Blob(self)
    }
}

impl<T: ToSqlValue> ToSqlValue for Option<T> {
    fn to_sql_value(self) -> SqlValue {
        self.map_or(SqlValue::Null, ToSqlValue::to_sql_value)
    }
}

/// Builds a [`Row`] from `column => value` pairs.
///
/// ```rust
/// use omega_sql_core::row;
/// use omega_sql_core::builder::SqlValue;
///
/// let row = row! { "name" => "Alice", "age" => 30 };
/// assert_eq!(row["age"], SqlValue::Int(30));
/// assert_eq!(row.keys().map(String::as_str).collect::<Vec<_>>(), ["name", "age"]);
/// ```
#[macro_export]
macro_rules! row {
    ($($column:expr => $value:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut row = $crate::builder::Row::new();
        $(
            row.insert(
                ::std::string::String::from($column),
                $crate::builder::ToSqlValue::to_sql_value($value),
            );
        )*
        row
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_literals() {
        assert_eq!(SqlValue::Null.to_sql_inline(), "NULL");
        assert_eq!(SqlValue::Bool(true).to_sql_inline(), "TRUE");
        assert_eq!(SqlValue::Int(-7).to_sql_inline(), "-7");
        assert_eq!(SqlValue::Float(2.5).to_sql_inline(), "2.5");
        assert_eq!(SqlValue::Blob(vec![0xCA, 0xFE]).to_sql_inline(), "X'CAFE'");
    }

    #[test]
    fn test_inline_text_doubles_quotes() {
        assert_eq!("O'Brien".to_sql_value().to_sql_inline(), "'O''Brien'");
    }

    #[test]
    fn test_conversions() {
        assert_eq!(7_u8.to_sql_value(), SqlValue::Int(7));
        assert_eq!(None::<i32>.to_sql_value(), SqlValue::Null);
        assert_eq!(Some("x").to_sql_value(), SqlValue::Text(String::from("x")));
    }

    #[test]
    fn test_row_macro_keeps_order() {
        let row = row! { "b" => 1, "a" => "two", "c" => None::<i64> };
        let keys: Vec<&str> = row.keys().map(String::as_str).collect();
        assert_eq!(keys, ["b", "a", "c"]);
        assert!(row["c"].is_null());
    }
}
