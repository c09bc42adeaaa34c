//! Foreign key constraints.

use serde::{Deserialize, Serialize};

use crate::error::{DbalError, Result};
use crate::identifier::Identifier;
use crate::platform::Platform;

use super::index::Index;

/// Referential action for `ON DELETE` / `ON UPDATE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForeignKeyAction {
    /// No action.
    NoAction,
    /// Restrict deletion/update.
    Restrict,
    /// Cascade the operation.
    Cascade,
    /// Set to NULL.
    SetNull,
    /// Set to default value.
    SetDefault,
}

impl ForeignKeyAction {
    /// Returns the SQL representation of the action.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::NoAction => "NO ACTION",
            Self::Restrict => "RESTRICT",
            Self::Cascade => "CASCADE",
            Self::SetNull => "SET NULL",
            Self::SetDefault => "SET DEFAULT",
        }
    }

    /// `NO ACTION` and `RESTRICT` behave like an absent action.
    const fn is_effective(self) -> bool {
        !matches!(self, Self::NoAction | Self::Restrict)
    }
}

/// `MATCH` clause of a foreign key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForeignKeyMatch {
    /// MATCH FULL.
    Full,
    /// MATCH PARTIAL.
    Partial,
    /// MATCH SIMPLE.
    Simple,
}

impl ForeignKeyMatch {
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Full => "FULL",
            Self::Partial => "PARTIAL",
            Self::Simple => "SIMPLE",
        }
    }
}

/// Options of a foreign key constraint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForeignKeyOptions {
    /// ON DELETE action.
    pub on_delete: Option<ForeignKeyAction>,
    /// ON UPDATE action.
    pub on_update: Option<ForeignKeyAction>,
    /// MATCH clause.
    pub match_kind: Option<ForeignKeyMatch>,
}

impl ForeignKeyOptions {
    #[must_use]
    pub const fn on_delete(mut self, action: ForeignKeyAction) -> Self {
        self.on_delete = Some(action);
        self
    }

    #[must_use]
    pub const fn on_update(mut self, action: ForeignKeyAction) -> Self {
        self.on_update = Some(action);
        self
    }
}

/// A foreign key from local columns to columns of another table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeyConstraint {
    name: Option<Identifier>,
    local_columns: Vec<Identifier>,
    foreign_table: Identifier,
    foreign_columns: Vec<Identifier>,
    options: ForeignKeyOptions,
}

impl ForeignKeyConstraint {
    /// Creates a constraint; the column lists must be non-empty and of
    /// equal length.
    pub fn new<S: AsRef<str>>(
        local_columns: &[S],
        foreign_table: &str,
        foreign_columns: &[S],
        name: Option<&str>,
        options: ForeignKeyOptions,
    ) -> Result<Self> {
        if local_columns.is_empty() {
            return Err(DbalError::IncompleteDefinition(String::from("foreign key")));
        }
        if local_columns.len() != foreign_columns.len() {
            return Err(DbalError::ForeignKeyColumnMismatch {
                local: local_columns.len(),
                foreign: foreign_columns.len(),
            });
        }
        Ok(Self {
            name: name.filter(|n| !n.is_empty()).map(Identifier::new),
            local_columns: local_columns
                .iter()
                .map(|c| Identifier::new(c.as_ref()))
                .collect(),
            foreign_table: Identifier::new(foreign_table),
            foreign_columns: foreign_columns
                .iter()
                .map(|c| Identifier::new(c.as_ref()))
                .collect(),
            options,
        })
    }

    /// Unquoted constraint name, empty for anonymous constraints.
    #[must_use]
    pub fn name(&self) -> String {
        self.name.as_ref().map(Identifier::name).unwrap_or_default()
    }

    #[must_use]
    pub const fn identifier(&self) -> Option<&Identifier> {
        self.name.as_ref()
    }

    /// Whether the constraint is named `name` (case-insensitive).
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        self.name.as_ref().is_some_and(|own| own.matches(name))
    }

    #[must_use]
    pub fn quoted_name<P: Platform + ?Sized>(&self, platform: &P) -> Option<String> {
        self.name.as_ref().map(|name| name.quoted_name(platform))
    }

    pub(crate) fn set_name(&mut self, name: &str) {
        self.name = Some(Identifier::new(name));
    }

    #[must_use]
    pub fn local_columns(&self) -> Vec<String> {
        self.local_columns.iter().map(Identifier::name).collect()
    }

    #[must_use]
    pub fn quoted_local_columns<P: Platform + ?Sized>(&self, platform: &P) -> Vec<String> {
        self.local_columns
            .iter()
            .map(|c| c.quoted_name(platform))
            .collect()
    }

    #[must_use]
    pub fn foreign_table_name(&self) -> String {
        self.foreign_table.name()
    }

    /// Lowercase referenced table name without namespace.
    #[must_use]
    pub fn unqualified_foreign_table_name(&self) -> String {
        self.foreign_table.short_name().to_lowercase()
    }

    #[must_use]
    pub fn quoted_foreign_table_name<P: Platform + ?Sized>(&self, platform: &P) -> String {
        self.foreign_table.quoted_name(platform)
    }

    #[must_use]
    pub fn foreign_columns(&self) -> Vec<String> {
        self.foreign_columns.iter().map(Identifier::name).collect()
    }

    #[must_use]
    pub fn quoted_foreign_columns<P: Platform + ?Sized>(&self, platform: &P) -> Vec<String> {
        self.foreign_columns
            .iter()
            .map(|c| c.quoted_name(platform))
            .collect()
    }

    #[must_use]
    pub const fn options(&self) -> &ForeignKeyOptions {
        &self.options
    }

    /// ON UPDATE action that changes behaviour, if any.
    #[must_use]
    pub fn effective_on_update(&self) -> Option<ForeignKeyAction> {
        self.options.on_update.filter(|a| a.is_effective())
    }

    /// ON DELETE action that changes behaviour, if any.
    #[must_use]
    pub fn effective_on_delete(&self) -> Option<ForeignKeyAction> {
        self.options.on_delete.filter(|a| a.is_effective())
    }

    /// Whether any column of `index` is one of the local columns.
    #[must_use]
    pub fn intersects_index_columns(&self, index: &Index) -> bool {
        index.columns().iter().any(|index_column| {
            self.local_columns
                .iter()
                .any(|local| local.matches(index_column))
        })
    }

    /// Whether both constraints describe the same reference, ignoring names.
    #[must_use]
    pub fn same_definition(&self, other: &Self) -> bool {
        let lower = |columns: Vec<String>| -> Vec<String> {
            columns.into_iter().map(|c| c.to_lowercase()).collect()
        };
        lower(self.local_columns()) == lower(other.local_columns())
            && lower(self.foreign_columns()) == lower(other.foreign_columns())
            && self.unqualified_foreign_table_name() == other.unqualified_foreign_table_name()
            && self.effective_on_update() == other.effective_on_update()
            && self.effective_on_delete() == other.effective_on_delete()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fk(local: &[&str], table: &str, foreign: &[&str]) -> ForeignKeyConstraint {
        ForeignKeyConstraint::new(
            local,
            table,
            foreign,
            Some("fk"),
            ForeignKeyOptions::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_column_count_mismatch() {
        let err = ForeignKeyConstraint::new(
            &["a", "b"],
            "other",
            &["id"],
            None,
            ForeignKeyOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            DbalError::ForeignKeyColumnMismatch {
                local: 2,
                foreign: 1
            }
        ));
    }

    #[test]
    fn test_empty_name_is_anonymous() {
        let constraint = ForeignKeyConstraint::new(
            &["a"],
            "other",
            &["id"],
            Some(""),
            ForeignKeyOptions::default(),
        )
        .unwrap();
        assert_eq!(constraint.identifier(), None);
        assert_eq!(constraint.name(), "");
    }

    #[test]
    fn test_same_definition_ignores_schema_and_restrict() {
        let a = fk(&["bar_id"], "public.bar", &["id"]);
        let b = ForeignKeyConstraint::new(
            &["BAR_ID"],
            "bar",
            &["id"],
            Some("other"),
            ForeignKeyOptions::default().on_delete(ForeignKeyAction::Restrict),
        )
        .unwrap();
        assert!(a.same_definition(&b));

        let c = ForeignKeyConstraint::new(
            &["bar_id"],
            "bar",
            &["id"],
            None,
            ForeignKeyOptions::default().on_delete(ForeignKeyAction::Cascade),
        )
        .unwrap();
        assert!(!a.same_definition(&c));
    }

    #[test]
    fn test_intersects_index_columns() {
        let constraint = fk(&["foo"], "foreign_table", &["id"]);
        assert!(constraint.intersects_index_columns(&Index::new(
            "idx",
            &["bar", "FOO"],
            false,
            false
        )));
        assert!(!constraint.intersects_index_columns(&Index::new("idx", &["bar"], false, false)));
    }
}
