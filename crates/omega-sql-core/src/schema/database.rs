//! CREATE DATABASE and DROP DATABASE.

use super::{ExistenceCheck, Statement};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateDatabase {
    name: String,
    existence: ExistenceCheck,
    character_set: Option<String>,
}

impl CreateDatabase {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            existence: ExistenceCheck::Unset,
            character_set: None,
        }
    }

    pub fn if_not_exists(&mut self, flag: bool) -> &mut Self {
        self.existence = ExistenceCheck::from_if_not_exists(flag);
        self
    }

    pub fn character(&mut self, charset: impl Into<String>) -> &mut Self {
        self.character_set = Some(charset.into());
        self
    }

    #[must_use]
    pub fn to_sql(&self) -> String {
        let mut sql = format!("CREATE DATABASE{} {}", self.existence.as_sql(), self.name);
        if let Some(charset) = &self.character_set {
            sql.push_str(&format!(" CHARACTER SET {charset}"));
        }
        sql.push(';');
        sql
    }
}

impl Statement for CreateDatabase {
    fn render(&self) -> String {
        self.to_sql()
    }
}

/// DROP DATABASE builder, with the same shared existence slot as
/// [`DropTable`](super::DropTable).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropDatabase {
    name: String,
    existence: ExistenceCheck,
}

impl DropDatabase {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            existence: ExistenceCheck::Unset,
        }
    }

    pub fn if_exists(&mut self, flag: bool) -> &mut Self {
        self.existence = ExistenceCheck::from_if_exists(flag);
        self
    }

    pub fn if_not_exists(&mut self, flag: bool) -> &mut Self {
        self.existence = ExistenceCheck::from_if_not_exists(flag);
        self
    }

    #[must_use]
    pub fn to_sql(&self) -> String {
        format!("DROP DATABASE{} {};", self.existence.as_sql(), self.name)
    }
}

impl Statement for DropDatabase {
    fn render(&self) -> String {
        self.to_sql()
    }
}
