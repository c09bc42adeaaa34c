//! Schema comparator.
//!
//! Compares an "old" and a "new" [`Table`] and produces the [`TableDiff`]
//! needed to turn one into the other. Comparing a table with itself (or
//! a structural clone) yields an empty diff.

use tracing::debug;

use crate::identifier::Identifier;
use crate::schema::{Column, ForeignKeyConstraint, Index, Table};
use crate::table_diff::{ChangedProperty, ColumnDiff, TableDiff};
use crate::types::ColumnType;

/// Length assumed for string and binary columns declared without one.
const DEFAULT_LENGTH: u32 = 255;

/// Precision assumed for decimal columns declared without one.
const DEFAULT_PRECISION: u32 = 10;

/// Computes differences between tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct Comparator;

impl Comparator {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Returns the changes needed to turn `from` into `to`.
    #[must_use]
    pub fn diff_table(&self, from: &Table, to: &Table) -> TableDiff {
        let mut diff = TableDiff::for_table(from);

        self.diff_columns(from, to, &mut diff);
        Self::detect_column_renamings(&mut diff);

        self.diff_indexes(from, to, &mut diff);
        Self::detect_index_renamings(&mut diff);

        self.diff_foreign_keys(from, to, &mut diff);

        debug!(
            table = %diff.name,
            added_columns = diff.added_columns.len(),
            changed_columns = diff.changed_columns.len(),
            removed_columns = diff.removed_columns.len(),
            added_indexes = diff.added_indexes.len(),
            changed_indexes = diff.changed_indexes.len(),
            removed_indexes = diff.removed_indexes.len(),
            renamed_indexes = diff.renamed_indexes.len(),
            "compared table"
        );
        diff
    }

    /// Lists the attributes that differ between two versions of a column.
    ///
    /// Names are not compared. Length and fixed-width are only relevant
    /// to string and binary columns, precision and scale only to
    /// decimals. Charset and collation count only when both sides set them.
    #[must_use]
    pub fn diff_column(&self, old: &Column, new: &Column) -> Vec<ChangedProperty> {
        let mut changed = Vec::new();
        if old.column_type() != new.column_type() {
            changed.push(ChangedProperty::Type);
        }
        if old.not_null() != new.not_null() {
            changed.push(ChangedProperty::NotNull);
        }
        if old.unsigned() != new.unsigned() {
            changed.push(ChangedProperty::Unsigned);
        }
        if old.autoincrement() != new.autoincrement() {
            changed.push(ChangedProperty::Autoincrement);
        }
        let old_default = old.default().map(|d| d.literal_text());
        let new_default = new.default().map(|d| d.literal_text());
        if old_default != new_default {
            changed.push(ChangedProperty::Default);
        }

        if old.column_type().has_length() {
            let length =
                |column: &Column| column.length().filter(|l| *l > 0).unwrap_or(DEFAULT_LENGTH);
            if length(old) != length(new) {
                changed.push(ChangedProperty::Length);
            }
            if old.fixed() != new.fixed() {
                changed.push(ChangedProperty::Fixed);
            }
        } else if old.column_type() == ColumnType::Decimal {
            let precision = |column: &Column| {
                column
                    .precision()
                    .filter(|p| *p > 0)
                    .unwrap_or(DEFAULT_PRECISION)
            };
            if precision(old) != precision(new) {
                changed.push(ChangedProperty::Precision);
            }
            if old.scale().unwrap_or(0) != new.scale().unwrap_or(0) {
                changed.push(ChangedProperty::Scale);
            }
        }

        if old.comment() != new.comment() {
            changed.push(ChangedProperty::Comment);
        }

        let old_options = old.platform_options();
        let new_options = new.platform_options();
        if let (Some(a), Some(b)) = (&old_options.charset, &new_options.charset) {
            if a != b {
                changed.push(ChangedProperty::Charset);
            }
        }
        if let (Some(a), Some(b)) = (&old_options.collation, &new_options.collation) {
            if a != b {
                changed.push(ChangedProperty::Collation);
            }
        }
        if old_options.version != new_options.version {
            changed.push(ChangedProperty::Version);
        }
        changed
    }

    /// Whether two indexes differ, i.e. do not fulfil each other.
    #[must_use]
    pub fn diff_index(&self, a: &Index, b: &Index) -> bool {
        !a.is_equivalent_to(b)
    }

    /// Whether two foreign keys reference different things.
    #[must_use]
    pub fn diff_foreign_key(&self, a: &ForeignKeyConstraint, b: &ForeignKeyConstraint) -> bool {
        !a.same_definition(b)
    }

    // ================================================================
    // Columns
    // ================================================================

    fn diff_columns(&self, from: &Table, to: &Table, diff: &mut TableDiff) {
        for column in to.columns() {
            if !from.has_column(&column.name()) {
                diff.added_columns.push(column.clone());
            }
        }
        for column in from.columns() {
            let Ok(new_column) = to.column(&column.name()) else {
                diff.removed_columns.push(column.clone());
                continue;
            };
            let changed = self.diff_column(column, new_column);
            if changed.is_empty() {
                continue;
            }
            debug!(column = %column.name(), ?changed, "column changed");
            diff.changed_columns.push(ColumnDiff {
                old_name: Identifier::new(&column.name()),
                column: new_column.clone(),
                changed_properties: changed,
                from_column: Some(column.clone()),
            });
        }
    }

    /// Turns an added/removed column pair into a rename when the added
    /// column matches exactly one removed column.
    fn detect_column_renamings(diff: &mut TableDiff) {
        let comparator = Self::new();
        let mut renames = Vec::new();
        for added in &diff.added_columns {
            let candidates: Vec<&Column> = diff
                .removed_columns
                .iter()
                .filter(|removed| comparator.diff_column(added, removed).is_empty())
                .collect();
            if let [removed] = candidates.as_slice() {
                renames.push((Identifier::new(&removed.name()), added.clone()));
            }
        }
        for (old_name, column) in renames {
            if diff
                .renamed_columns
                .iter()
                .any(|(existing, _)| existing.normalized() == old_name.normalized())
            {
                continue;
            }
            debug!(from = %old_name, to = %column.name(), "column renamed");
            diff.added_columns
                .retain(|c| c.identifier().normalized() != column.identifier().normalized());
            diff.removed_columns
                .retain(|c| c.identifier().normalized() != old_name.normalized());
            diff.renamed_columns.push((old_name, column));
        }
    }

    // ================================================================
    // Indexes
    // ================================================================

    fn diff_indexes(&self, from: &Table, to: &Table, diff: &mut TableDiff) {
        for index in to.indexes() {
            let exists = if index.is_primary() {
                from.has_primary_key()
            } else {
                from.has_index(&index.name())
            };
            if !exists {
                diff.added_indexes.push(index.clone());
            }
        }
        for index in from.indexes() {
            let counterpart = if index.is_primary() {
                to.primary_key()
            } else {
                to.index(&index.name()).ok()
            };
            match counterpart {
                None => diff.removed_indexes.push(index.clone()),
                Some(new_index) if self.diff_index(index, new_index) => {
                    diff.changed_indexes.push(new_index.clone());
                }
                Some(_) => {}
            }
        }
    }

    /// Turns an added/removed index pair into a rename when the added index
    /// is equivalent to exactly one removed index.
    fn detect_index_renamings(diff: &mut TableDiff) {
        let comparator = Self::new();
        let mut renames = Vec::new();
        for added in &diff.added_indexes {
            let candidates: Vec<&Index> = diff
                .removed_indexes
                .iter()
                .filter(|removed| !comparator.diff_index(added, removed))
                .collect();
            if let [removed] = candidates.as_slice() {
                renames.push((Identifier::new(&removed.name()), added.clone()));
            }
        }
        for (old_name, index) in renames {
            if diff
                .renamed_indexes
                .iter()
                .any(|(existing, _)| existing.normalized() == old_name.normalized())
            {
                continue;
            }
            debug!(from = %old_name, to = %index.name(), "index renamed");
            diff.added_indexes
                .retain(|i| i.identifier().normalized() != index.identifier().normalized());
            diff.removed_indexes
                .retain(|i| i.identifier().normalized() != old_name.normalized());
            diff.renamed_indexes.push((old_name, index));
        }
    }

    // ================================================================
    // Foreign keys
    // ================================================================

    fn diff_foreign_keys(&self, from: &Table, to: &Table, diff: &mut TableDiff) {
        let mut remaining_from: Vec<&ForeignKeyConstraint> = Vec::new();
        let mut remaining_to: Vec<&ForeignKeyConstraint> = to.foreign_keys().iter().collect();

        // Definition-equal pairs are settled before any name-based pairing.
        for old in from.foreign_keys() {
            match remaining_to
                .iter()
                .position(|new| !self.diff_foreign_key(old, new))
            {
                Some(position) => {
                    remaining_to.remove(position);
                }
                None => remaining_from.push(old),
            }
        }

        for old in remaining_from {
            if let Some(position) = remaining_to
                .iter()
                .position(|new| new.is_named(&old.name()))
            {
                diff.changed_foreign_keys
                    .push(remaining_to.remove(position).clone());
                continue;
            }
            diff.removed_foreign_keys.push(old.clone());
        }
        diff.added_foreign_keys
            .extend(remaining_to.into_iter().cloned());
    }
}

/// Shorthand for [`Comparator::diff_table`].
#[must_use]
pub fn diff_table(from: &Table, to: &Table) -> TableDiff {
    Comparator::new().diff_table(from, to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ForeignKeyOptions;
    use crate::types::DefaultValue;

    fn string_column(name: &str) -> Column {
        Column::new(name, ColumnType::String)
    }

    #[test]
    fn test_identical_tables() {
        let mut table = Table::new("foo");
        table.add_column("id", ColumnType::Integer).unwrap();
        table.set_primary_key(&["id"]).unwrap();
        assert!(diff_table(&table, &table.clone()).is_empty());
    }

    #[test]
    fn test_string_length_defaults_to_255() {
        let comparator = Comparator::new();
        let mut a = string_column("name");
        let mut b = string_column("name");
        b.set_length(Some(255));
        assert!(comparator.diff_column(&a, &b).is_empty());
        a.set_length(Some(0));
        assert!(comparator.diff_column(&a, &b).is_empty());
        b.set_length(Some(100));
        assert_eq!(
            comparator.diff_column(&a, &b),
            vec![ChangedProperty::Length]
        );
    }

    #[test]
    fn test_default_compared_as_text() {
        let comparator = Comparator::new();
        let mut a = Column::new("n", ColumnType::Integer);
        let mut b = a.clone();
        a.set_default(Some(DefaultValue::Integer(1)));
        b.set_default(Some(DefaultValue::from("1")));
        assert!(comparator.diff_column(&a, &b).is_empty());
        b.set_default(None);
        assert_eq!(
            comparator.diff_column(&a, &b),
            vec![ChangedProperty::Default]
        );
    }

    #[test]
    fn test_decimal_precision_and_scale() {
        let comparator = Comparator::new();
        let a = Column::new("price", ColumnType::Decimal);
        let mut b = a.clone();
        b.set_precision(Some(10)).set_scale(Some(0));
        assert!(comparator.diff_column(&a, &b).is_empty());
        b.set_precision(Some(12)).set_scale(Some(2));
        assert_eq!(
            comparator.diff_column(&a, &b),
            vec![ChangedProperty::Precision, ChangedProperty::Scale]
        );
    }

    #[test]
    fn test_empty_comment_equals_missing_comment() {
        let comparator = Comparator::new();
        let a = Column::new("c", ColumnType::Integer);
        let mut b = a.clone();
        b.set_comment(Some(""));
        assert!(comparator.diff_column(&a, &b).is_empty());
    }

    #[test]
    fn test_collation_compared_only_when_both_set() {
        let comparator = Comparator::new();
        let a = string_column("c");
        let mut b = a.clone();
        b.set_collation(Some("utf8_bin"));
        assert!(comparator.diff_column(&a, &b).is_empty());
        let mut a = a;
        a.set_collation(Some("utf8_general_ci"));
        assert_eq!(
            comparator.diff_column(&a, &b),
            vec![ChangedProperty::Collation]
        );
    }

    #[test]
    fn test_column_rename_detected() {
        let mut from = Table::new("t");
        from.add_column("old_name", ColumnType::Integer).unwrap();
        let mut to = Table::new("t");
        to.add_column("new_name", ColumnType::Integer).unwrap();

        let diff = diff_table(&from, &to);
        assert!(diff.added_columns.is_empty());
        assert!(diff.removed_columns.is_empty());
        assert_eq!(diff.renamed_columns.len(), 1);
        assert_eq!(diff.renamed_columns[0].0, Identifier::new("old_name"));
    }

    #[test]
    fn test_ambiguous_column_rename_stays_add_drop() {
        let mut from = Table::new("t");
        from.add_column("a", ColumnType::Integer).unwrap();
        from.add_column("b", ColumnType::Integer).unwrap();
        let mut to = Table::new("t");
        to.add_column("c", ColumnType::Integer).unwrap();

        let diff = diff_table(&from, &to);
        assert_eq!(diff.added_columns.len(), 1);
        assert_eq!(diff.removed_columns.len(), 2);
        assert!(diff.renamed_columns.is_empty());
    }

    #[test]
    fn test_index_rename_detected() {
        let mut from = Table::new("t");
        from.add_column("id", ColumnType::Integer).unwrap();
        from.add_index(&["id"], Some("idx_foo")).unwrap();
        let mut to = from.clone();
        to.rename_index("idx_foo", Some("idx_bar")).unwrap();

        let diff = diff_table(&from, &to);
        assert!(diff.added_indexes.is_empty());
        assert!(diff.removed_indexes.is_empty());
        assert_eq!(diff.renamed_indexes.len(), 1);
        assert_eq!(diff.renamed_indexes[0].1.name(), "idx_bar");
    }

    #[test]
    fn test_primary_key_change_is_index_change() {
        let mut from = Table::new("t");
        from.add_column("id", ColumnType::Integer).unwrap();
        from.add_column("foo", ColumnType::Integer).unwrap();
        from.set_primary_key(&["id"]).unwrap();
        let mut to = from.clone();
        to.drop_primary_key();
        to.set_primary_key(&["foo"]).unwrap();

        let diff = diff_table(&from, &to);
        assert_eq!(diff.changed_indexes.len(), 1);
        assert!(diff.changed_indexes[0].is_primary());
        assert!(diff.added_indexes.is_empty());
        assert!(diff.removed_indexes.is_empty());
    }

    #[test]
    fn test_foreign_key_changes() {
        let mut from = Table::new("t");
        from.add_column("a", ColumnType::Integer).unwrap();
        from.add_column("b", ColumnType::Integer).unwrap();
        from.add_foreign_key(
            "x",
            &["a"],
            &["id"],
            ForeignKeyOptions::default(),
            Some("fk_a"),
        )
        .unwrap();
        from.add_foreign_key(
            "x",
            &["b"],
            &["id"],
            ForeignKeyOptions::default(),
            Some("fk_b"),
        )
        .unwrap();

        let mut to = Table::new("t");
        to.add_column("a", ColumnType::Integer).unwrap();
        to.add_column("b", ColumnType::Integer).unwrap();
        to.add_foreign_key(
            "y",
            &["a"],
            &["id"],
            ForeignKeyOptions::default(),
            Some("fk_a"),
        )
        .unwrap();
        to.add_foreign_key(
            "x",
            &["b"],
            &["id"],
            ForeignKeyOptions::default(),
            Some("fk_b_renamed"),
        )
        .unwrap();

        let diff = diff_table(&from, &to);
        assert_eq!(diff.changed_foreign_keys.len(), 1);
        assert_eq!(diff.changed_foreign_keys[0].foreign_table_name(), "y");
        assert!(diff.added_foreign_keys.is_empty());
        assert!(diff.removed_foreign_keys.is_empty());
    }

    #[test]
    fn test_definition_match_wins_over_name_match() {
        let mut from = Table::new("t");
        from.add_column("a", ColumnType::Integer).unwrap();
        from.add_column("b", ColumnType::Integer).unwrap();
        from.add_foreign_key(
            "x",
            &["a"],
            &["id"],
            ForeignKeyOptions::default(),
            Some("fk_a"),
        )
        .unwrap();
        from.add_foreign_key(
            "x",
            &["b"],
            &["id"],
            ForeignKeyOptions::default(),
            Some("fk_b"),
        )
        .unwrap();

        let mut to = Table::new("t");
        to.add_column("a", ColumnType::Integer).unwrap();
        to.add_column("b", ColumnType::Integer).unwrap();
        to.add_foreign_key(
            "x",
            &["b"],
            &["id"],
            ForeignKeyOptions::default(),
            Some("fk_a"),
        )
        .unwrap();

        let diff = diff_table(&from, &to);
        assert!(diff.changed_foreign_keys.is_empty());
        assert!(diff.added_foreign_keys.is_empty());
        assert_eq!(diff.removed_foreign_keys.len(), 1);
        assert_eq!(diff.removed_foreign_keys[0].name(), "fk_a");
    }
}
