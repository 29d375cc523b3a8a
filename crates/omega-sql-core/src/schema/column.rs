//! Column definitions for CREATE TABLE.
//!
//! A column renders as
//! `<name> <type>[ UNSIGNED][ NOT NULL| NULL][ DEFAULT <value>][ AUTO_INCREMENT]`,
//! always in that order, unless a raw fragment replaces it entirely.

/// Supported column types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnType {
    TinyInt,
    SmallInt,
    MediumInt,
    Int,
    BigInt,
    Decimal { precision: u16, scale: u16 },
    Float,
    Double,
    Char(u32),
    Varchar(u32),
    Text,
    MediumText,
    LongText,
    Date,
    DateTime,
    Timestamp,
    Time,
    Year,
    Blob,
    Boolean,
    Json,
    Enum(Vec<String>),
    Set(Vec<String>),
}

impl ColumnType {
    /// Returns the type token.
    #[must_use]
    pub fn to_sql(&self) -> String {
        match self {
            Self::TinyInt => String::from("tinyint"),
            Self::SmallInt => String::from("smallint"),
            Self::MediumInt => String::from("mediumint"),
            Self::Int => String::from("int"),
            Self::BigInt => String::from("bigint"),
            Self::Decimal { precision, scale } => format!("decimal({precision},{scale})"),
            Self::Float => String::from("float"),
            Self::Double => String::from("double"),
            Self::Char(len) => format!("char({len})"),
            Self::Varchar(len) => format!("varchar({len})"),
            Self::Text => String::from("text"),
            Self::MediumText => String::from("mediumtext"),
            Self::LongText => String::from("longtext"),
            Self::Date => String::from("date"),
            Self::DateTime => String::from("datetime"),
            Self::Timestamp => String::from("timestamp"),
            Self::Time => String::from("time"),
            Self::Year => String::from("year"),
            Self::Blob => String::from("blob"),
            Self::Boolean => String::from("boolean"),
            Self::Json => String::from("json"),
            Self::Enum(values) => format!("ENUM ({})", quote_list(values)),
            Self::Set(values) => format!("SET ({})", quote_list(values)),
        }
    }
}

fn quote_list(values: &[String]) -> String {
    values
        .iter()
        .map(|v| format!("'{v}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Explicit nullability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nullability {
    NotNull,
    Null,
}

/// Default value for a column.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    /// Rendered single-quoted. Embedded quotes are not escaped.
    String(String),
    /// Rendered verbatim, e.g. `CURRENT_TIMESTAMP`.
    Expression(String),
}

impl DefaultValue {
    #[must_use]
    pub fn to_sql(&self) -> String {
        match self {
            Self::Null => String::from("NULL"),
            Self::Boolean(true) => String::from("TRUE"),
            Self::Boolean(false) => String::from("FALSE"),
            Self::Integer(n) => n.to_string(),
            Self::Float(f) => f.to_string(),
            Self::String(s) => format!("'{s}'"),
            Self::Expression(expr) => expr.clone(),
        }
    }
}

impl From<bool> for DefaultValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i32> for DefaultValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<i64> for DefaultValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<u32> for DefaultValue {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for DefaultValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for DefaultValue {
    fn from(value: &str) -> Self {
        Self::String(String::from(value))
    }
}

impl From<String> for DefaultValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

/// One column of a CREATE TABLE statement.
///
/// Setters take `&mut self` so a definition can be configured in place
/// after [`CreateTable::column`](super::CreateTable::column) hands it out.
/// Type setters overwrite each other; call exactly one.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDefinition {
    name: String,
    column_type: Option<ColumnType>,
    unsigned: bool,
    nullability: Option<Nullability>,
    default: Option<DefaultValue>,
    auto_increment: bool,
    raw: Option<String>,
}

macro_rules! type_setters {
    ($($(#[$doc:meta])* $method:ident => $variant:ident),* $(,)?) => {
        $(
            $(#[$doc])*
            pub fn $method(&mut self) -> &mut Self {
                self.column_type(ColumnType::$variant)
            }
        )*
    };
}

impl ColumnDefinition {
    /// Creates an untyped column named `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column_type: None,
            unsigned: false,
            nullability: None,
            default: None,
            auto_increment: false,
            raw: None,
        }
    }

    /// Creates a column with its type already set.
    #[must_use]
    pub fn typed(name: impl Into<String>, column_type: ColumnType) -> Self {
        let mut column = Self::new(name);
        column.column_type = Some(column_type);
        column
    }

    /// Replaces the whole definition with `fragment` at render time.
    pub fn raw(&mut self, fragment: impl Into<String>) -> &mut Self {
        self.raw = Some(fragment.into());
        self
    }

    /// Renames the column.
    pub fn name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = name.into();
        self
    }

    /// Sets the type.
    pub fn column_type(&mut self, column_type: ColumnType) -> &mut Self {
        self.column_type = Some(column_type);
        self
    }

    type_setters! {
        tinyint => TinyInt,
        smallint => SmallInt,
        mediumint => MediumInt,
        int => Int,
        bigint => BigInt,
        float => Float,
        double => Double,
        text => Text,
        mediumtext => MediumText,
        longtext => LongText,
        date => Date,
        datetime => DateTime,
        timestamp => Timestamp,
        time => Time,
        year => Year,
        blob => Blob,
        boolean => Boolean,
        json => Json,
    }

    pub fn decimal(&mut self, precision: u16, scale: u16) -> &mut Self {
        self.column_type(ColumnType::Decimal { precision, scale })
    }

    pub fn char(&mut self, length: u32) -> &mut Self {
        self.column_type(ColumnType::Char(length))
    }

    pub fn varchar(&mut self, length: u32) -> &mut Self {
        self.column_type(ColumnType::Varchar(length))
    }

    /// `ENUM ('a', 'b', ...)`.
    pub fn enumeration<S: AsRef<str>>(&mut self, values: &[S]) -> &mut Self {
        self.column_type(ColumnType::Enum(owned(values)))
    }

    /// `SET ('a', 'b', ...)`.
    pub fn set<S: AsRef<str>>(&mut self, values: &[S]) -> &mut Self {
        self.column_type(ColumnType::Set(owned(values)))
    }

    /// Appends `UNSIGNED`. Not checked against the type.
    pub fn unsigned(&mut self) -> &mut Self {
        self.unsigned = true;
        self
    }

    pub fn not_null(&mut self) -> &mut Self {
        self.nullability = Some(Nullability::NotNull);
        self
    }

    pub fn null(&mut self) -> &mut Self {
        self.nullability = Some(Nullability::Null);
        self
    }

    /// Sets a literal default. Strings are single-quoted.
    pub fn default(&mut self, value: impl Into<DefaultValue>) -> &mut Self {
        self.default = Some(value.into());
        self
    }

    pub fn default_null(&mut self) -> &mut Self {
        self.default = Some(DefaultValue::Null);
        self
    }

    /// Sets a default rendered verbatim.
    pub fn default_expr(&mut self, expr: impl Into<String>) -> &mut Self {
        self.default = Some(DefaultValue::Expression(expr.into()));
        self
    }

    pub fn auto_increment(&mut self) -> &mut Self {
        self.auto_increment = true;
        self
    }

    #[must_use]
    pub fn column_name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn is_raw(&self) -> bool {
        self.raw.is_some()
    }

    /// Renders the column fragment.
    #[must_use]
    pub fn to_sql(&self) -> String {
        if let Some(raw) = &self.raw {
            return raw.clone();
        }

        let mut parts = Vec::new();
        if !self.name.is_empty() {
            parts.push(self.name.clone());
        }
        if let Some(column_type) = &self.column_type {
            parts.push(column_type.to_sql());
        }
        if self.unsigned {
            parts.push(String::from("UNSIGNED"));
        }
        match self.nullability {
            Some(Nullability::NotNull) => parts.push(String::from("NOT NULL")),
            Some(Nullability::Null) => parts.push(String::from("NULL")),
            None => {}
        }
        if let Some(default) = &self.default {
            parts.push(format!("DEFAULT {}", default.to_sql()));
        }
        if self.auto_increment {
            parts.push(String::from("AUTO_INCREMENT"));
        }
        parts.join(" ")
    }
}

fn owned<S: AsRef<str>>(values: &[S]) -> Vec<String> {
    values.iter().map(|v| String::from(v.as_ref())).collect()
}
