//! The shared record behind named sets and named relations.
//!
//! A [`NamedObject`] pairs a positional [`IntegerRelation`] with the
//! [`NameTable`] that indexes its dimensions, plus a closed tag telling sets
//! and relations apart. All alignment and operator machinery is implemented
//! once against this record; [`crate::named::NamedSet`] and
//! [`crate::named::NamedRelation`] are thin specializations over it.

use crate::error::{NamedPolyError, Result};
use crate::named::align;
use crate::named::table::NameTable;
use crate::polyhedral::relation::{BinaryOp, IntegerRelation};
use crate::polyhedral::space::DimKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a named object is a set or a relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectKind {
    /// Uses kinds {param, out} only.
    Set,
    /// Uses kinds {param, in, out}.
    Relation,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectKind::Set => write!(f, "set"),
            ObjectKind::Relation => write!(f, "relation"),
        }
    }
}

/// A positional object paired with its name table.
///
/// Equality is strict: two named objects are equal only when their name
/// tables map the same names to the same `(kind, index)` slots *and* their
/// positional objects are structurally equal. Objects over the same names in
/// different orders are not equal; align them first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedObject {
    obj: IntegerRelation,
    table: NameTable,
    kind: ObjectKind,
}

impl NamedObject {
    /// Wrap a positional object, reading its dimension names into a table.
    ///
    /// Fails with `SpaceMismatch` if the object's space contradicts `kind`,
    /// with `UnnamedDimension`/`DuplicateName` if the names are not a valid
    /// table.
    pub fn new(obj: IntegerRelation, kind: ObjectKind) -> Result<Self> {
        let space_ok = match kind {
            ObjectKind::Set => obj.is_set(),
            ObjectKind::Relation => obj.is_relation(),
        };
        if !space_ok {
            return Err(NamedPolyError::SpaceMismatch(format!(
                "cannot build a named {} from a positional object with space {}",
                kind,
                obj.space()
            )));
        }
        let table = NameTable::strip(&obj)?;
        Ok(Self { obj, table, kind })
    }

    /// Assemble from parts that are already known to be consistent
    /// (alignment results).
    pub(crate) fn from_parts(obj: IntegerRelation, table: NameTable, kind: ObjectKind) -> Self {
        Self { obj, table, kind }
    }

    /// The underlying positional object.
    pub fn positional(&self) -> &IntegerRelation {
        &self.obj
    }

    /// The name table.
    pub fn table(&self) -> &NameTable {
        &self.table
    }

    /// The set/relation tag.
    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    /// Number of dimensions of the given kind.
    pub fn dim(&self, kind: DimKind) -> usize {
        self.obj.dim(kind)
    }

    /// All dimension names, in table order.
    pub fn dim_names(&self) -> Vec<&str> {
        self.table.names().collect()
    }

    /// Look up the slot of a dimension name.
    pub fn get(&self, name: &str) -> Result<(DimKind, usize)> {
        self.table.get(name)
    }

    /// Reshape into the space described by `target`.
    ///
    /// See [`align::align`]; the target must cover every name this object
    /// possesses.
    pub fn align_to(&self, target: &NameTable) -> Result<NamedObject> {
        align::align(self, target)
    }

    /// Align this object and `other` into one unified space.
    pub fn align_with(&self, other: &NamedObject) -> Result<(NamedObject, NamedObject)> {
        align::align_two(self, other)
    }

    /// Align with `other` and apply a positional binary operator.
    pub fn apply(&self, other: &NamedObject, op: BinaryOp) -> Result<NamedObject> {
        align::apply(self, other, op)
    }

    /// Intersection over the unified space.
    pub fn intersect(&self, other: &NamedObject) -> Result<NamedObject> {
        self.apply(other, BinaryOp::Intersect)
    }

    /// Union over the unified space.
    pub fn union(&self, other: &NamedObject) -> Result<NamedObject> {
        self.apply(other, BinaryOp::Union)
    }

    /// Point membership on the underlying positional object.
    pub fn contains(&self, params: &[i64], ins: &[i64], outs: &[i64]) -> bool {
        self.obj.contains(params, ins, outs)
    }
}

impl fmt::Display for NamedObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Rendering is the one place names are written back onto the object.
        write!(f, "{}", self.table.restore(&self.obj))
    }
}
