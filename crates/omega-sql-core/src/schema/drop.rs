//! DROP TABLE.

use super::{ExistenceCheck, Statement};

/// DROP TABLE builder.
///
/// `if_exists` and `if_not_exists` write the same slot; the last call wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropTable {
    database: String,
    table: String,
    existence: ExistenceCheck,
}

impl DropTable {
    #[must_use]
    pub fn new(database: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            table: table.into(),
            existence: ExistenceCheck::Unset,
        }
    }

    /// `true` renders `IF EXISTS`, `false` renders `IF NOT EXISTS`.
    pub fn if_exists(&mut self, flag: bool) -> &mut Self {
        self.existence = ExistenceCheck::from_if_exists(flag);
        self
    }

    /// `true` renders `IF NOT EXISTS`, `false` renders `IF EXISTS`.
    pub fn if_not_exists(&mut self, flag: bool) -> &mut Self {
        self.existence = ExistenceCheck::from_if_not_exists(flag);
        self
    }

    #[must_use]
    pub const fn existence(&self) -> ExistenceCheck {
        self.existence
    }

    #[must_use]
    pub fn to_sql(&self) -> String {
        format!(
            "DROP TABLE{} {}.{};",
            self.existence.as_sql(),
            self.database,
            self.table
        )
    }
}

impl Statement for DropTable {
    fn render(&self) -> String {
        self.to_sql()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_drop() {
        assert_eq!(DropTable::new("db", "t").to_sql(), "DROP TABLE db.t;");
    }

    #[test]
    fn test_toggles_share_one_slot() {
        let mut drop = DropTable::new("db", "t");
        drop.if_exists(true).if_not_exists(true);
        assert_eq!(drop.to_sql(), "DROP TABLE IF NOT EXISTS db.t;");

        drop.if_not_exists(false);
        assert_eq!(drop.to_sql(), "DROP TABLE IF EXISTS db.t;");
        assert_eq!(drop.existence(), ExistenceCheck::Exists);
    }
}
