//! Shared fixtures for the MySQL integration tests.

#![allow(dead_code)]

use oxide_dbal_core::prelude::*;
use oxide_dbal_mysql::MySqlPlatform;

/// Table options rendered for a table without explicit options.
pub const INNODB_OPTIONS: &str =
    "DEFAULT CHARACTER SET utf8 COLLATE utf8_unicode_ci ENGINE = InnoDB";

/// Table options rendered for a MyISAM table.
pub const MYISAM_OPTIONS: &str =
    "DEFAULT CHARACTER SET utf8 COLLATE utf8_unicode_ci ENGINE = MyISAM";

pub fn platform() -> MySqlPlatform {
    MySqlPlatform::new()
}

pub fn create(table: &Table) -> Vec<String> {
    platform()
        .create_table_sql(table, CreateFlags::ALL)
        .expect("table should compile")
}

pub fn alter(diff: &TableDiff) -> Vec<String> {
    platform()
        .alter_table_sql(diff)
        .expect("diff should compile")
}

/// A nullable column with `NOT NULL` removed.
pub fn nullable(name: &str, column_type: ColumnType) -> Column {
    let mut column = Column::new(name, column_type);
    column.set_not_null(false);
    column
}

/// `foreign_table (id INT, fk_id INT)` keyed on `id` with a foreign key on
/// `fk_id` to itself, stored with `engine`.
pub fn self_referencing_table(engine: &str) -> Table {
    let mut table = Table::new("foreign_table");
    table.add_column("id", ColumnType::Integer).unwrap();
    table.add_column("fk_id", ColumnType::Integer).unwrap();
    table
        .add_foreign_key(
            "foreign_table",
            &["fk_id"],
            &["id"],
            ForeignKeyOptions::default(),
            None,
        )
        .unwrap();
    table.set_primary_key(&["id"]).unwrap();
    table.options_mut().engine = Some(engine.to_string());
    table
}

pub fn foreign_key(
    local: &[&str],
    foreign_table: &str,
    foreign: &[&str],
    name: &str,
) -> ForeignKeyConstraint {
    ForeignKeyConstraint::new(
        local,
        foreign_table,
        foreign,
        Some(name),
        ForeignKeyOptions::default(),
    )
    .unwrap()
}
