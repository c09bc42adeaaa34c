//! ALTER TABLE compilation.
//!
//! A reconciled [`TableDiff`] is compiled in three phases:
//!
//! 1. **pre**: statements that must run before the table is altered:
//!    removing `AUTO_INCREMENT` from columns leaving the primary key,
//!    index swaps over identical columns, foreign key and index drops;
//! 2. **main**: a single `ALTER TABLE` carrying the column changes and a
//!    newly added primary key;
//! 3. **post**: foreign keys and indexes created against the (possibly
//!    renamed) table, including re-creation of everything dropped in the
//!    pre phase for renamed indexes.
//!
//! The main clauses are collected first: a primary key they consume is no
//! longer visible to the pre phase.

use std::collections::HashSet;

use tracing::{debug, warn};

use oxide_dbal_core::platform::Platform;
use oxide_dbal_core::schema::{Column, ForeignKeyConstraint, Index};
use oxide_dbal_core::{Identifier, Result, TableDiff};

use crate::platform::MySqlPlatform;
use crate::types::supports_default;

/// Compiles `diff` into ordered statements.
pub fn alter_table_sql(platform: &MySqlPlatform, diff: &TableDiff) -> Result<Vec<String>> {
    let mut diff = diff.clone().reconcile();
    let table = diff.name.quoted_name(platform);

    let clauses = main_clauses(platform, &mut diff)?;
    let (pre, rebuilt_foreign_keys) = pre_statements(platform, &mut diff, &table)?;
    let post = post_statements(platform, &diff, &rebuilt_foreign_keys)?;

    let mut statements = pre;
    if !clauses.is_empty() {
        statements.push(format!("ALTER TABLE {table} {}", clauses.join(", ")));
    }
    statements.extend(post);

    let mut seen = HashSet::new();
    statements.retain(|statement| seen.insert(statement.clone()));

    debug!(table = %diff.name, statements = statements.len(), "compiled ALTER TABLE");
    Ok(statements)
}

// ================================================================
// Main statement
// ================================================================

fn main_clauses(platform: &MySqlPlatform, diff: &mut TableDiff) -> Result<Vec<String>> {
    let mut clauses = Vec::new();

    if let Some(new_name) = &diff.new_name {
        clauses.push(format!("RENAME TO {}", new_name.quoted_name(platform)));
    }
    for column in &diff.added_columns {
        clauses.push(format!("ADD {}", platform.column_declaration(column)?));
    }
    for column in &diff.removed_columns {
        clauses.push(format!("DROP {}", column.quoted_name(platform)));
    }
    for change in &diff.changed_columns {
        if change.only_default_changed() && !supports_default(change.column.column_type()) {
            debug!(
                column = %change.column.name(),
                column_type = %change.column.column_type(),
                "default change not propagated"
            );
            continue;
        }
        clauses.push(format!(
            "CHANGE {} {}",
            change.old_name.quoted_name(platform),
            platform.column_declaration(&change.column)?
        ));
    }
    for (old_name, column) in &diff.renamed_columns {
        clauses.push(format!(
            "CHANGE {} {}",
            old_name.quoted_name(platform),
            platform.column_declaration(column)?
        ));
    }

    if let Some(position) = diff.added_indexes.iter().position(Index::is_primary) {
        let primary = diff.added_indexes.remove(position);
        clauses.push(format!(
            "ADD PRIMARY KEY ({})",
            platform.index_field_list(&primary)
        ));
    } else if let Some(position) = diff
        .changed_indexes
        .iter()
        .position(|index| index.is_primary() && includes_added_autoincrement(diff, index))
    {
        let primary = diff.changed_indexes.remove(position);
        clauses.push(String::from("DROP PRIMARY KEY"));
        clauses.push(format!(
            "ADD PRIMARY KEY ({})",
            platform.index_field_list(&primary)
        ));
    }
    Ok(clauses)
}

/// Whether `index` covers a column added by the diff as `AUTO_INCREMENT`.
fn includes_added_autoincrement(diff: &TableDiff, index: &Index) -> bool {
    index.columns().iter().any(|name| {
        diff.added_columns
            .iter()
            .any(|column| column.autoincrement() && column.identifier().matches(name))
    })
}

// ================================================================
// Pre phase
// ================================================================

fn modify_without_autoincrement(
    platform: &MySqlPlatform,
    table: &str,
    column: &Column,
) -> Result<String> {
    let mut column = column.clone();
    column.set_autoincrement(false);
    Ok(format!(
        "ALTER TABLE {table} MODIFY {}",
        platform.column_declaration(&column)?
    ))
}

/// `AUTO_INCREMENT` has to be removed from the from-table columns of a
/// primary key before that key can be dropped.
fn primary_key_modifications(
    platform: &MySqlPlatform,
    diff: &TableDiff,
    index: &Index,
    table: &str,
) -> Result<Vec<String>> {
    let Some(from_table) = diff.from_table.as_ref().filter(|_| index.is_primary()) else {
        return Ok(Vec::new());
    };
    let mut statements = Vec::new();
    for name in index.columns() {
        if let Ok(column) = from_table.column(&name) {
            if column.autoincrement() {
                statements.push(modify_without_autoincrement(platform, table, column)?);
            }
        }
    }
    Ok(statements)
}

/// Autoincrement columns leaving a changed primary key.
fn dropped_autoincrement_modifications(
    platform: &MySqlPlatform,
    diff: &TableDiff,
    table: &str,
) -> Result<Vec<String>> {
    let Some(from_table) = &diff.from_table else {
        return Ok(Vec::new());
    };
    let mut statements = Vec::new();
    for index in diff
        .changed_indexes
        .iter()
        .filter(|index| index.is_primary())
    {
        let new_columns: Vec<String> = index
            .columns()
            .iter()
            .map(|name| name.to_lowercase())
            .collect();
        for name in from_table.primary_key_columns() {
            let column = from_table.column(&name)?;
            if column.autoincrement() && !new_columns.contains(&name.to_lowercase()) {
                statements.push(modify_without_autoincrement(platform, table, column)?);
            }
        }
    }
    Ok(statements)
}

/// `ALTER TABLE t DROP INDEX a, ADD ... b (...)` for an index replaced by
/// another over the same columns.
fn index_swap(platform: &MySqlPlatform, table: &str, removed: &Index, added: &Index) -> String {
    let drop = if removed.is_primary() {
        String::from("PRIMARY KEY")
    } else {
        format!("INDEX {}", removed.quoted_name(platform))
    };
    let add = if added.is_primary() {
        String::from("PRIMARY KEY")
    } else {
        format!(
            "{}INDEX {}",
            platform.create_index_flags(added),
            added.quoted_name(platform)
        )
    };
    format!(
        "ALTER TABLE {table} DROP {drop}, ADD {add} ({})",
        platform.index_field_list(added)
    )
}

fn drop_foreign_key(
    platform: &MySqlPlatform,
    foreign_key: &ForeignKeyConstraint,
    table: &Identifier,
) -> Option<String> {
    let Some(name) = foreign_key.identifier() else {
        debug!(table = %table, "anonymous foreign key cannot be dropped");
        return None;
    };
    Some(platform.drop_foreign_key_sql(name, table))
}

fn drop_index(platform: &MySqlPlatform, index: &Index, table: &Identifier) -> String {
    if index.is_primary() {
        platform.drop_primary_key_sql(table)
    } else {
        platform.drop_index_sql(index.identifier(), table)
    }
}

fn pre_statements(
    platform: &MySqlPlatform,
    diff: &mut TableDiff,
    table: &str,
) -> Result<(Vec<String>, Vec<ForeignKeyConstraint>)> {
    let mut statements = Vec::new();

    for index in &diff.changed_indexes {
        statements.extend(primary_key_modifications(platform, diff, index, table)?);
    }

    let removed = std::mem::take(&mut diff.removed_indexes);
    for removed_index in removed {
        statements.extend(primary_key_modifications(
            platform,
            diff,
            &removed_index,
            table,
        )?);
        let replacement = diff
            .added_indexes
            .iter()
            .position(|added| added.columns() == removed_index.columns());
        if let Some(position) = replacement {
            let added = diff.added_indexes.remove(position);
            statements.push(index_swap(platform, table, &removed_index, &added));
        } else {
            diff.removed_indexes.push(removed_index);
        }
    }

    let foreign_keys_enabled = platform.supports_foreign_keys_for(diff.from_table.as_ref());
    if !foreign_keys_enabled {
        let suppressed = diff.added_foreign_keys.len()
            + diff.changed_foreign_keys.len()
            + diff.removed_foreign_keys.len();
        if suppressed > 0 {
            warn!(
                table = %diff.name,
                engine = %platform.engine_of(diff.from_table.as_ref()),
                suppressed,
                "engine does not support foreign keys, changes not propagated"
            );
        }
        diff.added_foreign_keys.clear();
        diff.changed_foreign_keys.clear();
        diff.removed_foreign_keys.clear();
    }

    statements.extend(dropped_autoincrement_modifications(platform, diff, table)?);

    for foreign_key in diff
        .removed_foreign_keys
        .iter()
        .chain(&diff.changed_foreign_keys)
    {
        statements.extend(drop_foreign_key(platform, foreign_key, &diff.name));
    }
    for index in diff.removed_indexes.iter().chain(&diff.changed_indexes) {
        statements.push(drop_index(platform, index, &diff.name));
    }

    let rebuilt: Vec<ForeignKeyConstraint> = if foreign_keys_enabled {
        diff.foreign_keys_requiring_renamed_indexes()
            .into_iter()
            .cloned()
            .collect()
    } else {
        Vec::new()
    };
    for foreign_key in &rebuilt {
        statements.extend(drop_foreign_key(platform, foreign_key, &diff.name));
    }

    debug!(table = %diff.name, statements = statements.len(), "pre-alter statements");
    Ok((statements, rebuilt))
}

// ================================================================
// Post phase
// ================================================================

fn post_statements(
    platform: &MySqlPlatform,
    diff: &TableDiff,
    rebuilt_foreign_keys: &[ForeignKeyConstraint],
) -> Result<Vec<String>> {
    let table = diff.new_name_or_name();
    let mut statements = Vec::new();

    for foreign_key in diff
        .added_foreign_keys
        .iter()
        .chain(&diff.changed_foreign_keys)
    {
        statements.push(platform.create_foreign_key_sql(foreign_key, table));
    }
    for index in diff.added_indexes.iter().chain(&diff.changed_indexes) {
        statements.push(platform.create_index_sql(index, table)?);
    }
    for (old_name, index) in &diff.renamed_indexes {
        statements.push(platform.drop_index_sql(old_name, table));
        statements.push(platform.create_index_sql(index, table)?);
    }
    for foreign_key in rebuilt_foreign_keys {
        statements.push(platform.create_foreign_key_sql(foreign_key, table));
    }
    Ok(statements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxide_dbal_core::types::ColumnType;
    use oxide_dbal_core::{ChangedProperty, ColumnDiff, Table};

    #[test]
    fn test_empty_diff_compiles_to_nothing() {
        let platform = MySqlPlatform::new();
        assert!(alter_table_sql(&platform, &TableDiff::new("t"))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_index_swap_statement() {
        let platform = MySqlPlatform::new();
        let index = Index::new("idx", &["col"], false, false);
        let unique = Index::new("uniq", &["col"], true, false);
        assert_eq!(
            index_swap(&platform, "test", &index, &unique),
            "ALTER TABLE test DROP INDEX idx, ADD UNIQUE INDEX uniq (col)"
        );
        let primary = Index::new("primary", &["col"], true, true);
        assert_eq!(
            index_swap(&platform, "test", &primary, &index),
            "ALTER TABLE test DROP PRIMARY KEY, ADD INDEX idx (col)"
        );
    }

    #[test]
    fn test_primary_key_modifications_require_from_table() {
        let platform = MySqlPlatform::new();
        let primary = Index::new("primary", &["id"], true, true);
        let diff = TableDiff::new("t");
        assert!(primary_key_modifications(&platform, &diff, &primary, "t")
            .unwrap()
            .is_empty());

        let mut table = Table::new("t");
        table
            .add_column("id", ColumnType::Integer)
            .unwrap()
            .set_autoincrement(true);
        table.set_primary_key(&["id"]).unwrap();
        let diff = TableDiff::for_table(&table);
        assert_eq!(
            primary_key_modifications(&platform, &diff, &primary, "t").unwrap(),
            vec!["ALTER TABLE t MODIFY id INT NOT NULL"]
        );
        let plain = Index::new("idx", &["id"], false, false);
        assert!(primary_key_modifications(&platform, &diff, &plain, "t")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_json_default_change_is_suppressed() {
        let platform = MySqlPlatform::new();
        let mut diff = TableDiff::new("docs");
        let mut column = Column::new("payload", ColumnType::Json);
        column.set_not_null(false);
        diff.changed_columns.push(ColumnDiff::new(
            "payload",
            column,
            vec![ChangedProperty::Default],
        ));
        assert!(alter_table_sql(&platform, &diff).unwrap().is_empty());
    }

    #[test]
    fn test_renamed_index_supersedes_added_index() {
        let platform = MySqlPlatform::new();
        let mut diff = TableDiff::new("t");
        let index = Index::new("idx_a", &["a"], false, false);
        diff.added_indexes.push(index.clone());
        diff.renamed_indexes
            .push((Identifier::new("idx_old"), index));
        let statements = alter_table_sql(&platform, &diff).unwrap();
        assert_eq!(
            statements,
            vec!["DROP INDEX idx_old ON t", "CREATE INDEX idx_a ON t (a)"]
        );
    }
}
