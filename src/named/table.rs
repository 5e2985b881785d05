//! The name table: a bijective mapping from dimension names to positions.
//!
//! A [`NameTable`] is the trustworthy index of a named object: every
//! `(DimKind, index)` slot of the paired positional object has exactly one
//! name, no name appears twice, and per-kind indices form a dense range.
//! Tables are immutable values; every transformation produces a new table.

use crate::error::{NamedPolyError, Result};
use crate::polyhedral::relation::IntegerRelation;
use crate::polyhedral::space::{DimKind, Space};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// An insertion-ordered mapping from dimension name to `(kind, index)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameTable {
    entries: IndexMap<String, (DimKind, usize)>,
}

impl NameTable {
    /// Read the names off a positional object.
    ///
    /// Iterates kinds in the canonical order (param, in, out) and indices
    /// ascending, so the table's insertion order is the object's per-kind
    /// index order. Fails on the first unnamed or duplicate dimension and
    /// never returns a partially populated table. The object's own name tags
    /// are left untouched.
    pub fn strip(obj: &IntegerRelation) -> Result<NameTable> {
        let mut entries = IndexMap::new();
        for &kind in &DimKind::ALL {
            for index in 0..obj.dim(kind) {
                let name = obj
                    .dim_name(kind, index)
                    .ok_or(NamedPolyError::UnnamedDimension { kind, index })?;
                if entries.contains_key(name) {
                    return Err(NamedPolyError::DuplicateName(name.to_string()));
                }
                entries.insert(name.to_string(), (kind, index));
            }
        }
        Ok(NameTable { entries })
    }

    /// Build a table from explicit entries, validating the invariants:
    /// unique names, one name per slot, dense per-kind indices.
    pub fn from_entries(
        entries: impl IntoIterator<Item = (String, (DimKind, usize))>,
    ) -> Result<NameTable> {
        let mut table = NameTable::default();
        for (name, (kind, index)) in entries {
            if table.entries.contains_key(&name) {
                return Err(NamedPolyError::DuplicateName(name));
            }
            if table.name_at(kind, index).is_some() {
                return Err(NamedPolyError::IncompatibleSpace(format!(
                    "two names assigned to {} dimension {}",
                    kind, index
                )));
            }
            table.entries.insert(name, (kind, index));
        }
        for &kind in &DimKind::ALL {
            let count = table.dim_count(kind);
            for index in 0..count {
                if table.name_at(kind, index).is_none() {
                    return Err(NamedPolyError::IncompatibleSpace(format!(
                        "{} indices are not dense: index {} is unnamed",
                        kind, index
                    )));
                }
            }
        }
        Ok(table)
    }

    pub(crate) fn insert_unchecked(&mut self, name: String, kind: DimKind, index: usize) {
        self.entries.insert(name, (kind, index));
    }

    /// Write every entry's name onto the matching slot of `obj`.
    ///
    /// Used for rendering and by the space aligner only; internal reasoning
    /// goes through the table itself. The table's totality invariant
    /// guarantees every dimension of a matching object receives a name.
    pub fn restore(&self, obj: &IntegerRelation) -> IntegerRelation {
        let mut restored = obj.clone();
        for (name, &(kind, index)) in &self.entries {
            restored = restored.with_dim_name(kind, index, name.clone());
        }
        restored
    }

    /// Look up the slot of a name.
    pub fn get(&self, name: &str) -> Result<(DimKind, usize)> {
        self.entries
            .get(name)
            .copied()
            .ok_or_else(|| NamedPolyError::NameNotFound(name.to_string()))
    }

    /// Check whether a name is present.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// The name assigned to `(kind, index)`, if any.
    pub fn name_at(&self, kind: DimKind, index: usize) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, &slot)| slot == (kind, index))
            .map(|(name, _)| name.as_str())
    }

    /// Number of dimensions of the given kind.
    pub fn dim_count(&self, kind: DimKind) -> usize {
        self.entries.values().filter(|&&(k, _)| k == kind).count()
    }

    /// All names, in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// All entries, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, DimKind, usize)> {
        self.entries
            .iter()
            .map(|(name, &(kind, index))| (name.as_str(), kind, index))
    }

    /// Total number of named dimensions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The space this table describes, with all name tags set.
    ///
    /// Well-defined because the table is total and dense per kind.
    pub fn to_space(&self) -> Space {
        let mut space = Space::relation(
            self.dim_count(DimKind::In),
            self.dim_count(DimKind::Out),
            self.dim_count(DimKind::Param),
        );
        for (name, &(kind, index)) in &self.entries {
            space = space.with_dim_name(kind, index, name.clone());
        }
        space
    }
}
