//! Positional integer sets and relations.
//!
//! An [`IntegerRelation`] is a space plus a disjunction of constraint
//! "pieces"; each piece is a conjunction of affine constraints. A set is
//! simply a relation with no input dimensions, and an object with a single
//! piece is a basic (convex) one.
//!
//! Dimensions are identified purely by `(DimKind, index)`; name tags on the
//! space are inert payload except during [`IntegerRelation::align_to`].

use crate::error::{NamedPolyError, Result};
use crate::polyhedral::constraint::ConstraintSystem;
use crate::polyhedral::space::{DimKind, Space};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A positional integer set or relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegerRelation {
    space: Space,
    pieces: Vec<ConstraintSystem>,
}

/// The binary operators of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    /// Set intersection
    Intersect,
    /// Set union
    Union,
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinaryOp::Intersect => write!(f, "intersect"),
            BinaryOp::Union => write!(f, "union"),
        }
    }
}

impl IntegerRelation {
    /// The unconstrained object over the given space.
    pub fn universe(space: Space) -> Self {
        Self {
            space,
            pieces: vec![ConstraintSystem::new()],
        }
    }

    /// Build from explicit pieces, validating coefficient widths.
    pub fn from_pieces(space: Space, pieces: Vec<ConstraintSystem>) -> Result<Self> {
        for piece in &pieces {
            if !piece.fits(&space) {
                return Err(NamedPolyError::SpaceMismatch(format!(
                    "constraint coefficients do not fit space {}",
                    space
                )));
            }
        }
        Ok(Self { space, pieces })
    }

    /// The space of this object.
    pub fn space(&self) -> &Space {
        &self.space
    }

    /// The disjunctive pieces of this object.
    pub fn pieces(&self) -> &[ConstraintSystem] {
        &self.pieces
    }

    /// Number of dimensions of the given kind.
    pub fn dim(&self, kind: DimKind) -> usize {
        self.space.dim(kind)
    }

    /// Check if this is a set (no input dimensions).
    pub fn is_set(&self) -> bool {
        self.space.is_set()
    }

    /// Check if this is a relation (has input dimensions).
    pub fn is_relation(&self) -> bool {
        self.space.is_relation()
    }

    /// Get the name tag of a dimension, if any.
    pub fn dim_name(&self, kind: DimKind, idx: usize) -> Option<&str> {
        self.space.dim_name(kind, idx)
    }

    /// Return a copy of this object with one name tag replaced.
    pub fn with_dim_name(mut self, kind: DimKind, idx: usize, name: impl Into<String>) -> Self {
        self.space = self.space.with_dim_name(kind, idx, name);
        self
    }

    /// Point membership: does `(params, ins, outs)` satisfy some piece?
    pub fn contains(&self, params: &[i64], ins: &[i64], outs: &[i64]) -> bool {
        self.pieces
            .iter()
            .any(|p| p.is_satisfied(params, ins, outs))
    }

    /// Reshape this object into a superset space described by `template`.
    ///
    /// Dimensions are matched to `template` by name tag within their kind and
    /// permuted to the matching position; template dimensions this object
    /// lacks become fresh, unconstrained dimensions. Dimensions of this
    /// object that `template` lacks are appended after the template's own
    /// when `obj_bigger_ok`, otherwise the reshape fails. Never truncates.
    pub fn align_to(&self, template: &Space, obj_bigger_ok: bool) -> Result<Self> {
        let mapping = self.space.mapping_onto(template, obj_bigger_ok)?;
        let pieces = self.pieces.iter().map(|p| p.remap(&mapping)).collect();
        Ok(Self {
            space: mapping.target,
            pieces,
        })
    }

    /// Apply a positional binary operator.
    ///
    /// Both objects must already occupy spaces with identical per-kind
    /// dimension counts; name tags are not consulted.
    pub fn apply_op(&self, op: BinaryOp, other: &Self) -> Result<Self> {
        if !self.space.counts_match(&other.space) {
            return Err(NamedPolyError::SpaceMismatch(format!(
                "{} of {} and {}",
                op, self.space, other.space
            )));
        }
        let pieces = match op {
            BinaryOp::Intersect => {
                let mut pieces = Vec::with_capacity(self.pieces.len() * other.pieces.len());
                for a in &self.pieces {
                    for b in &other.pieces {
                        pieces.push(a.conjoin(b));
                    }
                }
                pieces
            }
            BinaryOp::Union => {
                let mut pieces = self.pieces.clone();
                pieces.extend(other.pieces.iter().cloned());
                pieces
            }
        };
        Ok(Self {
            space: self.space.clone(),
            pieces,
        })
    }

    /// Intersection with another object of the same shape.
    pub fn intersect(&self, other: &Self) -> Result<Self> {
        self.apply_op(BinaryOp::Intersect, other)
    }

    /// Union with another object of the same shape.
    pub fn union(&self, other: &Self) -> Result<Self> {
        self.apply_op(BinaryOp::Union, other)
    }

    fn fmt_tuple(&self, f: &mut fmt::Formatter<'_>, kind: DimKind) -> fmt::Result {
        write!(f, "[")?;
        for idx in 0..self.dim(kind) {
            if idx > 0 {
                write!(f, ", ")?;
            }
            match self.dim_name(kind, idx) {
                Some(name) => write!(f, "{}", name)?,
                None => write!(f, "{}{}", kind, idx)?,
            }
        }
        write!(f, "]")
    }
}

impl fmt::Display for IntegerRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.dim(DimKind::Param) > 0 {
            self.fmt_tuple(f, DimKind::Param)?;
            write!(f, " -> ")?;
        }
        write!(f, "{{ ")?;
        if self.is_relation() {
            self.fmt_tuple(f, DimKind::In)?;
            write!(f, " -> ")?;
        }
        self.fmt_tuple(f, DimKind::Out)?;

        let constrained: Vec<&ConstraintSystem> =
            self.pieces.iter().filter(|p| !p.is_empty()).collect();
        if self.pieces.is_empty() {
            write!(f, " : false")?;
        } else if !constrained.is_empty() {
            write!(f, " : ")?;
            let parenthesize = self.pieces.len() > 1;
            for (i, piece) in self.pieces.iter().enumerate() {
                if i > 0 {
                    write!(f, " or ")?;
                }
                if parenthesize {
                    write!(f, "(")?;
                }
                for (j, c) in piece.constraints.iter().enumerate() {
                    if j > 0 {
                        write!(f, " and ")?;
                    }
                    write!(f, "{}", c.to_string_with_space(&self.space))?;
                }
                if piece.is_empty() {
                    write!(f, "true")?;
                }
                if parenthesize {
                    write!(f, ")")?;
                }
            }
        }
        write!(f, " }}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polyhedral::constraint::Constraint;
    use crate::polyhedral::expr::AffineExpr;

    /// `{ [d0, ..] : 0 <= d < bound }` over unnamed dims, used as a fixture.
    fn rectangular(bounds: &[i64]) -> IntegerRelation {
        let space = Space::set(bounds.len(), 0);
        let mut sys = ConstraintSystem::new();
        for (d, &bound) in bounds.iter().enumerate() {
            let v = AffineExpr::var(DimKind::Out, d, &space);
            sys.add(Constraint::le(AffineExpr::zero(&space), v.clone()));
            sys.add(Constraint::lt(v, AffineExpr::constant(bound, &space)));
        }
        IntegerRelation::from_pieces(space, vec![sys]).unwrap()
    }

    #[test]
    fn test_universe_contains_everything() {
        let u = IntegerRelation::universe(Space::set(2, 0));
        assert!(u.contains(&[], &[], &[1_000, -1_000]));
    }

    #[test]
    fn test_rectangular_membership() {
        let set = rectangular(&[10, 20]);
        assert!(set.contains(&[], &[], &[0, 0]));
        assert!(set.contains(&[], &[], &[9, 19]));
        assert!(!set.contains(&[], &[], &[10, 0]));
    }

    #[test]
    fn test_intersect_same_space() {
        let a = rectangular(&[10, 10]);
        let b = rectangular(&[5, 5]);
        let c = a.intersect(&b).unwrap();
        assert!(c.contains(&[], &[], &[2, 2]));
        assert!(!c.contains(&[], &[], &[7, 2]));
    }

    #[test]
    fn test_union_is_disjunctive() {
        let a = rectangular(&[3, 3]);
        let b = rectangular(&[1, 8]);
        let u = a.union(&b).unwrap();
        assert_eq!(u.pieces().len(), 2);
        assert!(u.contains(&[], &[], &[2, 2]));
        assert!(u.contains(&[], &[], &[0, 7]));
        assert!(!u.contains(&[], &[], &[2, 7]));
    }

    #[test]
    fn test_op_rejects_count_mismatch() {
        let a = rectangular(&[3]);
        let b = rectangular(&[3, 3]);
        assert!(matches!(
            a.intersect(&b),
            Err(NamedPolyError::SpaceMismatch(_))
        ));
    }

    #[test]
    fn test_align_to_pads_and_permutes() {
        // a = { [j] : 0 <= j < 4 } aligned into [i, j]
        let a = rectangular(&[4]).with_dim_name(DimKind::Out, 0, "j");
        let template = Space::set(2, 0)
            .with_dim_name(DimKind::Out, 0, "i")
            .with_dim_name(DimKind::Out, 1, "j");
        let aligned = a.align_to(&template, false).unwrap();
        assert_eq!(aligned.dim(DimKind::Out), 2);
        // i is unconstrained, j keeps its bounds at its new index
        assert!(aligned.contains(&[], &[], &[99, 3]));
        assert!(!aligned.contains(&[], &[], &[0, 4]));
    }

    #[test]
    fn test_display_roundtrips_names() {
        let set = rectangular(&[2]).with_dim_name(DimKind::Out, 0, "i");
        let text = set.to_string();
        assert!(text.contains("[i]"), "got: {}", text);
        assert!(text.contains("i >= 0"), "got: {}", text);
    }
}
