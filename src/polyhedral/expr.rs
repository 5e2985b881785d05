//! Affine expressions over the dimensions of a space.
//!
//! An affine expression is a linear combination of dimensions plus a
//! constant: `aff = c + sum(p_i * param_i) + sum(a_i * in_i) + sum(b_i * out_i)`

use crate::polyhedral::space::{DimKind, DimMapping, Space};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Neg, Sub};

/// An affine expression with one coefficient block per dimension kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffineExpr {
    /// Constant term
    pub constant: i64,
    /// Coefficients for parameter dimensions
    pub param_coeffs: Vec<i64>,
    /// Coefficients for input dimensions
    pub in_coeffs: Vec<i64>,
    /// Coefficients for output dimensions
    pub out_coeffs: Vec<i64>,
}

impl AffineExpr {
    /// Create a zero expression sized for the given space.
    pub fn zero(space: &Space) -> Self {
        Self {
            constant: 0,
            param_coeffs: vec![0; space.dim(DimKind::Param)],
            in_coeffs: vec![0; space.dim(DimKind::In)],
            out_coeffs: vec![0; space.dim(DimKind::Out)],
        }
    }

    /// Create a constant expression sized for the given space.
    pub fn constant(value: i64, space: &Space) -> Self {
        let mut expr = Self::zero(space);
        expr.constant = value;
        expr
    }

    /// Create an expression for a single dimension.
    pub fn var(kind: DimKind, idx: usize, space: &Space) -> Self {
        let mut expr = Self::zero(space);
        expr.set_coeff(kind, idx, 1);
        expr
    }

    fn coeffs(&self, kind: DimKind) -> &[i64] {
        match kind {
            DimKind::Param => &self.param_coeffs,
            DimKind::In => &self.in_coeffs,
            DimKind::Out => &self.out_coeffs,
        }
    }

    fn coeffs_mut(&mut self, kind: DimKind) -> &mut Vec<i64> {
        match kind {
            DimKind::Param => &mut self.param_coeffs,
            DimKind::In => &mut self.in_coeffs,
            DimKind::Out => &mut self.out_coeffs,
        }
    }

    /// Get the coefficient of a dimension.
    pub fn coeff(&self, kind: DimKind, idx: usize) -> i64 {
        self.coeffs(kind).get(idx).copied().unwrap_or(0)
    }

    /// Set the coefficient of a dimension.
    pub fn set_coeff(&mut self, kind: DimKind, idx: usize, value: i64) {
        let coeffs = self.coeffs_mut(kind);
        assert!(idx < coeffs.len(), "dimension index out of range");
        coeffs[idx] = value;
    }

    /// Number of dimensions of the given kind this expression spans.
    pub fn dim(&self, kind: DimKind) -> usize {
        self.coeffs(kind).len()
    }

    /// Check whether the coefficient widths match a space.
    pub fn fits(&self, space: &Space) -> bool {
        DimKind::ALL.iter().all(|&k| self.dim(k) == space.dim(k))
    }

    /// Check if this is a constant expression (all coefficients zero).
    pub fn is_constant(&self) -> bool {
        DimKind::ALL
            .iter()
            .all(|&k| self.coeffs(k).iter().all(|&c| c == 0))
    }

    /// Get the constant value if this is a constant expression.
    pub fn as_constant(&self) -> Option<i64> {
        if self.is_constant() {
            Some(self.constant)
        } else {
            None
        }
    }

    /// Multiply all coefficients and the constant by a factor.
    pub fn scale(mut self, factor: i64) -> Self {
        self.constant *= factor;
        for &kind in &DimKind::ALL {
            for c in self.coeffs_mut(kind) {
                *c *= factor;
            }
        }
        self
    }

    /// Evaluate the expression at a concrete point.
    pub fn evaluate(&self, params: &[i64], ins: &[i64], outs: &[i64]) -> i64 {
        let dot = |coeffs: &[i64], values: &[i64]| -> i64 {
            coeffs
                .iter()
                .zip(values)
                .map(|(&c, &v)| c * v)
                .sum::<i64>()
        };
        self.constant
            + dot(&self.param_coeffs, params)
            + dot(&self.in_coeffs, ins)
            + dot(&self.out_coeffs, outs)
    }

    /// Rewrite this expression into the layout of a [`DimMapping`] target.
    ///
    /// Coefficients move to their mapped index; fresh target dimensions get a
    /// zero coefficient.
    pub fn remap(&self, mapping: &DimMapping) -> AffineExpr {
        let mut remapped = AffineExpr::zero(&mapping.target);
        remapped.constant = self.constant;
        for &kind in &DimKind::ALL {
            for (idx, &c) in self.coeffs(kind).iter().enumerate() {
                if c != 0 {
                    remapped.set_coeff(kind, mapping.map(kind, idx), c);
                }
            }
        }
        remapped
    }

    /// Render with dimension names taken from the given space.
    pub fn to_string_with_space(&self, space: &Space) -> String {
        let mut parts: Vec<String> = Vec::new();
        for &kind in &DimKind::ALL {
            for (idx, &c) in self.coeffs(kind).iter().enumerate() {
                if c == 0 {
                    continue;
                }
                let name = space
                    .dim_name(kind, idx)
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("{}{}", kind, idx));
                match c {
                    1 => parts.push(name),
                    -1 => parts.push(format!("-{}", name)),
                    _ => parts.push(format!("{}{}", c, name)),
                }
            }
        }
        if self.constant != 0 || parts.is_empty() {
            parts.push(self.constant.to_string());
        }
        let mut out = String::new();
        for (i, part) in parts.iter().enumerate() {
            if i > 0 && !part.starts_with('-') {
                out.push_str(" + ");
            } else if i > 0 {
                out.push(' ');
            }
            out.push_str(part);
        }
        out
    }
}

impl Add for AffineExpr {
    type Output = AffineExpr;

    fn add(mut self, rhs: AffineExpr) -> AffineExpr {
        self.constant += rhs.constant;
        for &kind in &DimKind::ALL {
            let coeffs = self.coeffs_mut(kind);
            for (c, r) in coeffs.iter_mut().zip(rhs.coeffs(kind)) {
                *c += r;
            }
        }
        self
    }
}

impl Sub for AffineExpr {
    type Output = AffineExpr;

    fn sub(self, rhs: AffineExpr) -> AffineExpr {
        self + (-rhs)
    }
}

impl Neg for AffineExpr {
    type Output = AffineExpr;

    fn neg(self) -> AffineExpr {
        self.scale(-1)
    }
}

impl fmt::Display for AffineExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Without a space at hand, fall back to positional names (out0, p1, ...).
        let space = Space::relation(
            self.dim(DimKind::In),
            self.dim(DimKind::Out),
            self.dim(DimKind::Param),
        );
        write!(f, "{}", self.to_string_with_space(&space))
    }
}
