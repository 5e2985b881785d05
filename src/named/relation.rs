//! Named relations.

use crate::error::Result;
use crate::named::object::{NamedObject, ObjectKind};
use crate::named::table::NameTable;
use crate::polyhedral::parser::parse_relation;
use crate::polyhedral::relation::{BinaryOp, IntegerRelation};
use crate::polyhedral::space::DimKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A relation whose dimensions are referred to by name.
///
/// Input dimensions are the relation's domain coordinates and output
/// dimensions its range. Equality is strict (see [`NamedObject`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRelation(NamedObject);

impl NamedRelation {
    /// Parse from the textual constraint language, e.g.
    /// `[n] -> { [i] -> [j] : 0 <= i, j < n }`.
    pub fn parse(source: &str) -> Result<NamedRelation> {
        NamedRelation::new(parse_relation(source)?)
    }

    /// Wrap an already-built positional relation, reading its dimension names.
    pub fn new(obj: IntegerRelation) -> Result<NamedRelation> {
        Ok(NamedRelation(NamedObject::new(obj, ObjectKind::Relation)?))
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

    /// Point membership: does the relation hold between `ins` and `outs`?
    pub fn contains(&self, params: &[i64], ins: &[i64], outs: &[i64]) -> bool {
        self.0.contains(params, ins, outs)
    }

    /// Reshape into the space described by `target`.
    pub fn align_to(&self, target: &NameTable) -> Result<NamedRelation> {
        Ok(NamedRelation(self.0.align_to(target)?))
    }

    /// Align this relation and `other` into one unified space.
    pub fn align_with(&self, other: &NamedRelation) -> Result<(NamedRelation, NamedRelation)> {
        let (a, b) = self.0.align_with(&other.0)?;
        Ok((NamedRelation(a), NamedRelation(b)))
    }

    /// Align with `other` and apply a positional binary operator.
    pub fn apply(&self, other: &NamedRelation, op: BinaryOp) -> Result<NamedRelation> {
        Ok(NamedRelation(self.0.apply(&other.0, op)?))
    }

    /// Intersection over the unified space of both relations.
    pub fn intersect(&self, other: &NamedRelation) -> Result<NamedRelation> {
        self.apply(other, BinaryOp::Intersect)
    }

    /// Union over the unified space of both relations.
    pub fn union(&self, other: &NamedRelation) -> Result<NamedRelation> {
        self.apply(other, BinaryOp::Union)
    }
}

impl From<NamedRelation> for NamedObject {
    fn from(rel: NamedRelation) -> NamedObject {
        rel.0
    }
}

impl fmt::Display for NamedRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
