//! Named sets.

use crate::error::Result;
use crate::named::object::{NamedObject, ObjectKind};
use crate::named::table::NameTable;
use crate::polyhedral::parser::parse_set;
use crate::polyhedral::relation::{BinaryOp, IntegerRelation};
use crate::polyhedral::space::DimKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A set whose dimensions are referred to by name.
///
/// Uses the kinds {param, out}. Equality is strict (see [`NamedObject`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedSet(NamedObject);

impl NamedSet {
    /// Parse from the textual constraint language, e.g.
    /// `[n] -> { [i, j] : 0 <= i, j < n }`.
    pub fn parse(source: &str) -> Result<NamedSet> {
        NamedSet::new(parse_set(source)?)
    }

    /// Wrap an already-built positional set, reading its dimension names.
    pub fn new(obj: IntegerRelation) -> Result<NamedSet> {
        Ok(NamedSet(NamedObject::new(obj, ObjectKind::Set)?))
    }

    /// The shared named-object record.
    pub fn as_object(&self) -> &NamedObject {
        &self.0
    }

    /// Unwrap into the shared named-object record.
    pub fn into_object(self) -> NamedObject {
        self.0
    }

    /// The underlying positional object.
    pub fn positional(&self) -> &IntegerRelation {
        self.0.positional()
    }

    /// The name table.
    pub fn table(&self) -> &NameTable {
        self.0.table()
    }

    /// Number of dimensions of the given kind.
    pub fn dim(&self, kind: DimKind) -> usize {
        self.0.dim(kind)
    }

    /// All dimension names, in table order.
    pub fn dim_names(&self) -> Vec<&str> {
        self.0.dim_names()
    }

    /// Look up the slot of a dimension name.
    pub fn get(&self, name: &str) -> Result<(DimKind, usize)> {
        self.0.get(name)
    }

    /// Point membership: `params` and `point` in this set's dimension order.
    pub fn contains(&self, params: &[i64], point: &[i64]) -> bool {
        self.0.contains(params, &[], point)
    }

    /// Reshape into the space described by `target`.
    pub fn align_to(&self, target: &NameTable) -> Result<NamedSet> {
        Ok(NamedSet(self.0.align_to(target)?))
    }

    /// Align this set and `other` into one unified space.
    pub fn align_with(&self, other: &NamedSet) -> Result<(NamedSet, NamedSet)> {
        let (a, b) = self.0.align_with(&other.0)?;
        Ok((NamedSet(a), NamedSet(b)))
    }

    /// Align with `other` and apply a positional binary operator.
    pub fn apply(&self, other: &NamedSet, op: BinaryOp) -> Result<NamedSet> {
        Ok(NamedSet(self.0.apply(&other.0, op)?))
    }

    /// Intersection over the unified space of both sets.
    pub fn intersect(&self, other: &NamedSet) -> Result<NamedSet> {
        self.apply(other, BinaryOp::Intersect)
    }

    /// Union over the unified space of both sets.
    pub fn union(&self, other: &NamedSet) -> Result<NamedSet> {
        self.apply(other, BinaryOp::Union)
    }
}

impl From<NamedSet> for NamedObject {
    fn from(set: NamedSet) -> NamedObject {
        set.0
    }
}

impl fmt::Display for NamedSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
