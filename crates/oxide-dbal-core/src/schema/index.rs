//! Indexes, including the primary key.

use serde::{Deserialize, Serialize};

use crate::identifier::Identifier;
use crate::platform::Platform;

/// Index kind modifiers beyond uniqueness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexFlag {
    /// Full text search index.
    Fulltext,
    /// Spatial index.
    Spatial,
}

/// An index over one or more columns of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Index {
    name: Identifier,
    columns: Vec<Identifier>,
    unique: bool,
    primary: bool,
    flags: Vec<IndexFlag>,
}

impl Index {
    /// Creates an index. A primary index is always unique.
    #[must_use]
    pub fn new<S: AsRef<str>>(name: &str, columns: &[S], unique: bool, primary: bool) -> Self {
        Self {
            name: Identifier::new(name),
            columns: columns
                .iter()
                .map(|c| Identifier::new(c.as_ref()))
                .collect(),
            unique: unique || primary,
            primary,
            flags: Vec::new(),
        }
    }

    /// Unquoted index name.
    #[must_use]
    pub fn name(&self) -> String {
        self.name.name()
    }

    #[must_use]
    pub const fn identifier(&self) -> &Identifier {
        &self.name
    }

    #[must_use]
    pub fn quoted_name<P: Platform + ?Sized>(&self, platform: &P) -> String {
        self.name.quoted_name(platform)
    }

    /// Unquoted column names in index order.
    #[must_use]
    pub fn columns(&self) -> Vec<String> {
        self.columns.iter().map(Identifier::name).collect()
    }

    /// Column names rendered for `platform`, in index order.
    #[must_use]
    pub fn quoted_columns<P: Platform + ?Sized>(&self, platform: &P) -> Vec<String> {
        self.columns
            .iter()
            .map(|column| column.quoted_name(platform))
            .collect()
    }

    #[must_use]
    pub const fn is_unique(&self) -> bool {
        self.unique
    }

    #[must_use]
    pub const fn is_primary(&self) -> bool {
        self.primary
    }

    /// A plain, non-unique index.
    #[must_use]
    pub const fn is_simple(&self) -> bool {
        !self.unique && !self.primary
    }

    #[must_use]
    pub fn flags(&self) -> &[IndexFlag] {
        &self.flags
    }

    #[must_use]
    pub fn has_flag(&self, flag: IndexFlag) -> bool {
        self.flags.contains(&flag)
    }

    pub fn add_flag(&mut self, flag: IndexFlag) -> &mut Self {
        if !self.has_flag(flag) {
            self.flags.push(flag);
            self.flags.sort();
        }
        self
    }

    pub fn remove_flag(&mut self, flag: IndexFlag) -> &mut Self {
        self.flags.retain(|f| *f != flag);
        self
    }

    /// Returns a copy of the index under another name.
    #[must_use]
    pub fn renamed(&self, name: &str) -> Self {
        Self {
            name: Identifier::new(name),
            ..self.clone()
        }
    }

    /// Whether the leading columns of this index are exactly `names`
    /// (case-insensitive, same order).
    #[must_use]
    pub fn spans_columns<S: AsRef<str>>(&self, names: &[S]) -> bool {
        self.columns.iter().enumerate().all(|(i, column)| {
            names
                .get(i)
                .is_some_and(|name| column.matches(name.as_ref()))
        })
    }

    /// Whether `other` provides everything this index provides.
    ///
    /// A plain index is fulfilled by any index over the same columns;
    /// unique and primary indexes need an index with the same uniqueness
    /// and primary status.
    #[must_use]
    pub fn is_fulfilled_by(&self, other: &Self) -> bool {
        if other.columns.len() != self.columns.len() || !self.spans_columns(&other.columns()) {
            return false;
        }
        if self.flags != other.flags {
            return false;
        }
        if self.is_simple() {
            return true;
        }
        other.primary == self.primary && other.unique == self.unique
    }

    /// Whether both indexes fulfil each other.
    #[must_use]
    pub fn is_equivalent_to(&self, other: &Self) -> bool {
        self.is_fulfilled_by(other) && other.is_fulfilled_by(self)
    }
}
