//! CREATE TABLE.

use super::Statement;
use super::column::ColumnDefinition;

/// CREATE TABLE builder.
///
/// Columns render first in declaration order, then the accumulated
/// `PRIMARY KEY`, then the accumulated `UNIQUE`, all inside one pair of
/// parentheses.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTable {
    database: String,
    table: String,
    columns: Vec<ColumnDefinition>,
    primary_key: Vec<String>,
    unique: Vec<String>,
    engine: Option<String>,
    character_set: Option<String>,
}

impl CreateTable {
    #[must_use]
    pub fn new(database: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            table: table.into(),
            columns: Vec::new(),
            primary_key: Vec::new(),
            unique: Vec::new(),
            engine: None,
            character_set: None,
        }
    }

    /// Appends an unnamed column meant for [`ColumnDefinition::raw`].
    ///
    /// Structured setters still work; the fragment then has no name until
    /// [`ColumnDefinition::name`] sets one.
    pub fn add_column(&mut self) -> &mut ColumnDefinition {
        self.push_column(ColumnDefinition::new(""))
    }

    /// Appends a column named `name`.
    pub fn column(&mut self, name: impl Into<String>) -> &mut ColumnDefinition {
        self.push_column(ColumnDefinition::new(name))
    }

    fn push_column(&mut self, column: ColumnDefinition) -> &mut ColumnDefinition {
        let index = self.columns.len();
        self.columns.push(column);
        &mut self.columns[index]
    }

    /// Appends prepared definitions, keeping their order.
    pub fn columns(&mut self, definitions: impl IntoIterator<Item = ColumnDefinition>) -> &mut Self {
        self.columns.extend(definitions);
        self
    }

    /// Adds columns to the primary key. Repeated calls accumulate.
    pub fn primary_key(&mut self, names: &[&str]) -> &mut Self {
        self.primary_key.extend(names.iter().map(|n| String::from(*n)));
        self
    }

    /// Adds columns to the unique constraint. Repeated calls accumulate.
    pub fn unique(&mut self, names: &[&str]) -> &mut Self {
        self.unique.extend(names.iter().map(|n| String::from(*n)));
        self
    }

    /// Sets the storage engine.
    pub fn engine(&mut self, engine: impl Into<String>) -> &mut Self {
        self.engine = Some(engine.into());
        self
    }

    /// Sets the character set.
    pub fn character(&mut self, charset: impl Into<String>) -> &mut Self {
        self.character_set = Some(charset.into());
        self
    }

    #[must_use]
    pub fn column_definitions(&self) -> &[ColumnDefinition] {
        &self.columns
    }

    #[must_use]
    pub fn to_sql(&self) -> String {
        let mut parts: Vec<String> = self.columns.iter().map(ColumnDefinition::to_sql).collect();
        if !self.primary_key.is_empty() {
            parts.push(format!("PRIMARY KEY ({})", self.primary_key.join(", ")));
        }
        if !self.unique.is_empty() {
            parts.push(format!("UNIQUE ({})", self.unique.join(", ")));
        }

        let mut sql = format!(
            "CREATE TABLE {}.{} ( {} )",
            self.database,
            self.table,
            parts.join(", ")
        );
        if let Some(engine) = &self.engine {
            sql.push_str(&format!(" ENGINE={engine}"));
        }
        if let Some(charset) = &self.character_set {
            sql.push_str(&format!(" CHARACTER SET {charset}"));
        }
        sql
    }
}

impl Statement for CreateTable {
    fn render(&self) -> String {
        self.to_sql()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_column_without_name() {
        let mut create = CreateTable::new("db", "t");
        create.add_column().raw("id INTEGER PRIMARY KEY");
        create.add_column().int();
        create.add_column().name("total").bigint();
        assert_eq!(
            create.to_sql(),
            "CREATE TABLE db.t ( id INTEGER PRIMARY KEY, int, total bigint )"
        );
    }

    #[test]
    fn test_primary_key_accumulates() {
        let mut create = CreateTable::new("db", "t");
        create.column("a").int();
        create.column("b").int();
        create.primary_key(&["a"]).primary_key(&["b"]);
        assert_eq!(
            create.to_sql(),
            "CREATE TABLE db.t ( a int, b int, PRIMARY KEY (a, b) )"
        );
    }

    #[test]
    fn test_unique_after_primary_key() {
        let mut create = CreateTable::new("db", "t");
        create.column("id").int();
        create.column("email").varchar(100);
        create.unique(&["email"]).primary_key(&["id"]);
        assert_eq!(
            create.to_sql(),
            "CREATE TABLE db.t ( id int, email varchar(100), PRIMARY KEY (id), UNIQUE (email) )"
        );
    }

    #[test]
    fn test_engine_and_charset_overwrite() {
        let mut create = CreateTable::new("db", "t");
        create.column("id").int();
        create
            .character("latin1")
            .engine("MyISAM")
            .engine("INNODB")
            .character("utf8mb4");
        assert_eq!(
            create.to_sql(),
            "CREATE TABLE db.t ( id int ) ENGINE=INNODB CHARACTER SET utf8mb4"
        );
    }

    #[test]
    fn test_bulk_columns_keep_order() {
        let mut id = ColumnDefinition::new("id");
        id.bigint().unsigned();
        let mut title = ColumnDefinition::new("title");
        title.varchar(80).not_null();

        let mut create = CreateTable::new("db", "posts");
        create.column("first").int();
        create.columns(vec![id, title]);
        assert_eq!(
            create.to_sql(),
            "CREATE TABLE db.posts ( first int, id bigint UNSIGNED, title varchar(80) NOT NULL )"
        );
        assert_eq!(create.column_definitions().len(), 3);
    }
}
