//! Linear constraints over a space.
//!
//! A constraint is a linear inequality or equality:
//! - Inequality: expr >= 0
//! - Equality: expr = 0

use crate::polyhedral::expr::AffineExpr;
use crate::polyhedral::space::{DimMapping, Space};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single affine constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraint {
    /// The affine expression (constraint is: expr >= 0 or expr = 0)
    pub expr: AffineExpr,
    /// Kind of constraint
    pub kind: ConstraintKind,
}

/// Kind of constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintKind {
    /// Greater than or equal: expr >= 0
    Inequality,
    /// Equal: expr = 0
    Equality,
}

impl Constraint {
    /// Create an inequality constraint: expr >= 0
    pub fn ge_zero(expr: AffineExpr) -> Self {
        Self {
            expr,
            kind: ConstraintKind::Inequality,
        }
    }

    /// Create an equality constraint: expr = 0
    pub fn eq_zero(expr: AffineExpr) -> Self {
        Self {
            expr,
            kind: ConstraintKind::Equality,
        }
    }

    /// Create a constraint: lhs >= rhs
    pub fn ge(lhs: AffineExpr, rhs: AffineExpr) -> Self {
        Self::ge_zero(lhs - rhs)
    }

    /// Create a constraint: lhs <= rhs
    pub fn le(lhs: AffineExpr, rhs: AffineExpr) -> Self {
        Self::ge_zero(rhs - lhs)
    }

    /// Create a strict constraint: lhs < rhs (integers: lhs <= rhs - 1)
    pub fn lt(lhs: AffineExpr, rhs: AffineExpr) -> Self {
        let mut expr = rhs - lhs;
        expr.constant -= 1;
        Self::ge_zero(expr)
    }

    /// Create a constraint: lhs = rhs
    pub fn eq(lhs: AffineExpr, rhs: AffineExpr) -> Self {
        Self::eq_zero(lhs - rhs)
    }

    /// Check if this is an equality constraint.
    pub fn is_equality(&self) -> bool {
        matches!(self.kind, ConstraintKind::Equality)
    }

    /// Check if this constraint is satisfied at the given point.
    pub fn is_satisfied(&self, params: &[i64], ins: &[i64], outs: &[i64]) -> bool {
        let value = self.expr.evaluate(params, ins, outs);
        match self.kind {
            ConstraintKind::Inequality => value >= 0,
            ConstraintKind::Equality => value == 0,
        }
    }

    /// Rewrite this constraint into the layout of a [`DimMapping`] target.
    pub fn remap(&self, mapping: &DimMapping) -> Constraint {
        Constraint {
            expr: self.expr.remap(mapping),
            kind: self.kind,
        }
    }

    /// Render with dimension names taken from the given space.
    pub fn to_string_with_space(&self, space: &Space) -> String {
        let expr_str = self.expr.to_string_with_space(space);
        match self.kind {
            ConstraintKind::Inequality => format!("{} >= 0", expr_str),
            ConstraintKind::Equality => format!("{} = 0", expr_str),
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ConstraintKind::Inequality => write!(f, "{} >= 0", self.expr),
            ConstraintKind::Equality => write!(f, "{} = 0", self.expr),
        }
    }
}

/// A conjunction of constraints (one "piece" of a disjunctive object).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintSystem {
    /// All constraints in the system
    pub constraints: Vec<Constraint>,
}

impl ConstraintSystem {
    /// Create an empty system (the universe).
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a constraint.
    pub fn add(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    /// Add multiple constraints.
    pub fn add_all(&mut self, constraints: impl IntoIterator<Item = Constraint>) {
        self.constraints.extend(constraints);
    }

    /// Check if every constraint holds at the given point.
    pub fn is_satisfied(&self, params: &[i64], ins: &[i64], outs: &[i64]) -> bool {
        self.constraints
            .iter()
            .all(|c| c.is_satisfied(params, ins, outs))
    }

    /// Check whether every constraint's coefficient widths match a space.
    pub fn fits(&self, space: &Space) -> bool {
        self.constraints.iter().all(|c| c.expr.fits(space))
    }

    /// Rewrite every constraint into the layout of a [`DimMapping`] target.
    pub fn remap(&self, mapping: &DimMapping) -> ConstraintSystem {
        ConstraintSystem {
            constraints: self.constraints.iter().map(|c| c.remap(mapping)).collect(),
        }
    }

    /// Conjunction of this system with another.
    pub fn conjoin(&self, other: &ConstraintSystem) -> ConstraintSystem {
        let mut joined = self.clone();
        joined.add_all(other.constraints.iter().cloned());
        joined
    }

    /// Check if the system has no constraints.
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Number of constraints.
    pub fn len(&self) -> usize {
        self.constraints.len()
    }
}
