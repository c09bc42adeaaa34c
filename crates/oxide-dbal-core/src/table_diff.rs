//! Description of the changes between two versions of a table.
//!
//! A [`TableDiff`] is produced by the [`Comparator`](crate::Comparator) or
//! assembled by hand, then handed to a platform's `alter_table_sql`.
//! Before compiling, platforms call [`TableDiff::reconcile`] to obtain a
//! canonical diff in which every physical object is touched by at most one
//! entry.

use std::collections::HashSet;

use tracing::debug;

use crate::identifier::Identifier;
use crate::schema::{Column, ForeignKeyConstraint, Index, Table};

/// A column attribute that differs between two versions of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChangedProperty {
    Type,
    NotNull,
    Unsigned,
    Autoincrement,
    Default,
    Length,
    Fixed,
    Precision,
    Scale,
    Comment,
    Charset,
    Collation,
    Version,
}

/// A column that exists on both sides with different attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDiff {
    /// Name of the column before the change.
    pub old_name: Identifier,
    /// The column after the change.
    pub column: Column,
    /// What changed.
    pub changed_properties: Vec<ChangedProperty>,
    /// The column before the change, when known.
    pub from_column: Option<Column>,
}

impl ColumnDiff {
    #[must_use]
    pub fn new(old_name: &str, column: Column, changed_properties: Vec<ChangedProperty>) -> Self {
        Self {
            old_name: Identifier::new(old_name),
            column,
            changed_properties,
            from_column: None,
        }
    }

    #[must_use]
    pub fn has_changed(&self, property: ChangedProperty) -> bool {
        self.changed_properties.contains(&property)
    }

    /// The default value is the only difference.
    #[must_use]
    pub fn only_default_changed(&self) -> bool {
        self.changed_properties == [ChangedProperty::Default]
    }
}

/// Differences between two versions of one table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableDiff {
    /// Name of the table being altered.
    pub name: Identifier,
    /// New table name, when the table is renamed.
    pub new_name: Option<Identifier>,
    /// The table before the change, used for engine and column lookups.
    pub from_table: Option<Table>,
    pub added_columns: Vec<Column>,
    pub changed_columns: Vec<ColumnDiff>,
    pub removed_columns: Vec<Column>,
    /// Old column name and the column under its new name.
    pub renamed_columns: Vec<(Identifier, Column)>,
    pub added_indexes: Vec<Index>,
    pub changed_indexes: Vec<Index>,
    pub removed_indexes: Vec<Index>,
    /// Old index name and the index under its new name.
    pub renamed_indexes: Vec<(Identifier, Index)>,
    pub added_foreign_keys: Vec<ForeignKeyConstraint>,
    pub changed_foreign_keys: Vec<ForeignKeyConstraint>,
    pub removed_foreign_keys: Vec<ForeignKeyConstraint>,
}

impl TableDiff {
    /// An empty diff for the table called `name`.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: Identifier::new(name),
            new_name: None,
            from_table: None,
            added_columns: Vec::new(),
            changed_columns: Vec::new(),
            removed_columns: Vec::new(),
            renamed_columns: Vec::new(),
            added_indexes: Vec::new(),
            changed_indexes: Vec::new(),
            removed_indexes: Vec::new(),
            renamed_indexes: Vec::new(),
            added_foreign_keys: Vec::new(),
            changed_foreign_keys: Vec::new(),
            removed_foreign_keys: Vec::new(),
        }
    }

    /// An empty diff altering `table`, which is kept as the from-table.
    #[must_use]
    pub fn for_table(table: &Table) -> Self {
        Self {
            name: table.identifier().clone(),
            from_table: Some(table.clone()),
            ..Self::new("")
        }
    }

    /// Renames the table.
    #[must_use]
    pub fn rename_to(mut self, new_name: &str) -> Self {
        self.new_name = Some(Identifier::new(new_name));
        self
    }

    /// Name the table carries after the change.
    #[must_use]
    pub fn new_name_or_name(&self) -> &Identifier {
        self.new_name.as_ref().unwrap_or(&self.name)
    }

    /// Whether nothing changes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.new_name.is_none()
            && self.added_columns.is_empty()
            && self.changed_columns.is_empty()
            && self.removed_columns.is_empty()
            && self.renamed_columns.is_empty()
            && self.added_indexes.is_empty()
            && self.changed_indexes.is_empty()
            && self.removed_indexes.is_empty()
            && self.renamed_indexes.is_empty()
            && self.added_foreign_keys.is_empty()
            && self.changed_foreign_keys.is_empty()
            && self.removed_foreign_keys.is_empty()
    }

    /// Produces the canonical form of the diff.
    ///
    /// - a renamed column or index is not also added, removed or changed;
    /// - a changed index is not also added or removed;
    /// - a changed foreign key is not also added or removed;
    /// - no list mentions the same name twice (the first entry wins).
    ///
    /// Objects are identified by case-insensitive name.
    #[must_use]
    pub fn reconcile(mut self) -> Self {
        let renamed_old: HashSet<String> = self
            .renamed_columns
            .iter()
            .map(|(old, _)| old.normalized())
            .collect();
        let renamed_new: HashSet<String> = self
            .renamed_columns
            .iter()
            .map(|(_, column)| column.identifier().normalized())
            .collect();
        self.removed_columns
            .retain(|column| !renamed_old.contains(&column.identifier().normalized()));
        self.added_columns
            .retain(|column| !renamed_new.contains(&column.identifier().normalized()));
        self.changed_columns
            .retain(|change| !renamed_old.contains(&change.old_name.normalized()));
        dedup_by_name(&mut self.added_columns, |c| {
            Some(c.identifier().normalized())
        });
        dedup_by_name(&mut self.removed_columns, |c| {
            Some(c.identifier().normalized())
        });
        dedup_by_name(&mut self.changed_columns, |c| Some(c.old_name.normalized()));
        dedup_by_name(&mut self.renamed_columns, |(old, _)| Some(old.normalized()));

        dedup_by_name(&mut self.renamed_indexes, |(old, _)| Some(old.normalized()));
        let renamed_old: HashSet<String> = self
            .renamed_indexes
            .iter()
            .map(|(old, _)| old.normalized())
            .collect();
        let renamed_new: HashSet<String> = self
            .renamed_indexes
            .iter()
            .map(|(_, index)| index.identifier().normalized())
            .collect();
        let before = self.changed_indexes.len();
        self.changed_indexes.retain(|index| {
            let key = index.identifier().normalized();
            !renamed_old.contains(&key) && !renamed_new.contains(&key)
        });
        if before != self.changed_indexes.len() {
            debug!(table = %self.name, "changed indexes folded into renames");
        }
        self.removed_indexes
            .retain(|index| !renamed_old.contains(&index.identifier().normalized()));
        self.added_indexes
            .retain(|index| !renamed_new.contains(&index.identifier().normalized()));
        dedup_by_name(&mut self.changed_indexes, |i| {
            Some(i.identifier().normalized())
        });
        let changed: HashSet<String> = self
            .changed_indexes
            .iter()
            .map(|index| index.identifier().normalized())
            .collect();
        self.added_indexes
            .retain(|index| !changed.contains(&index.identifier().normalized()));
        self.removed_indexes
            .retain(|index| !changed.contains(&index.identifier().normalized()));
        dedup_by_name(&mut self.added_indexes, |i| {
            Some(i.identifier().normalized())
        });
        dedup_by_name(&mut self.removed_indexes, |i| {
            Some(i.identifier().normalized())
        });

        let fk_key = |fk: &ForeignKeyConstraint| fk.identifier().map(Identifier::normalized);
        dedup_by_name(&mut self.changed_foreign_keys, fk_key);
        let changed: HashSet<String> = self
            .changed_foreign_keys
            .iter()
            .filter_map(fk_key)
            .collect();
        self.added_foreign_keys
            .retain(|fk| fk_key(fk).is_none_or(|key| !changed.contains(&key)));
        self.removed_foreign_keys
            .retain(|fk| fk_key(fk).is_none_or(|key| !changed.contains(&key)));
        dedup_by_name(&mut self.added_foreign_keys, fk_key);
        dedup_by_name(&mut self.removed_foreign_keys, fk_key);
        self
    }

    /// Foreign keys of the from-table that use the columns of a renamed
    /// index and are not otherwise touched by this diff.
    ///
    /// Such constraints must be dropped before the old index goes away and
    /// re-created afterwards.
    #[must_use]
    pub fn foreign_keys_requiring_renamed_indexes(&self) -> Vec<&ForeignKeyConstraint> {
        let Some(from_table) = &self.from_table else {
            return Vec::new();
        };
        if self.renamed_indexes.is_empty() {
            return Vec::new();
        }
        let touched = |fk: &ForeignKeyConstraint| {
            self.removed_foreign_keys
                .iter()
                .chain(&self.changed_foreign_keys)
                .chain(&self.added_foreign_keys)
                .any(|other| other.is_named(&fk.name()))
        };
        from_table
            .foreign_keys()
            .iter()
            .filter(|&fk| !touched(fk))
            .filter(|fk| {
                self.renamed_indexes
                    .iter()
                    .any(|(_, index)| fk.intersects_index_columns(index))
            })
            .collect()
    }
}

fn dedup_by_name<T>(items: &mut Vec<T>, key: impl Fn(&T) -> Option<String>) {
    let mut seen = HashSet::new();
    items.retain(|item| key(item).is_none_or(|name| seen.insert(name)));
}
