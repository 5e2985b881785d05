//! The positional constraint engine.
//!
//! Everything in this module identifies dimensions purely by
//! `(DimKind, index)`:
//! - Spaces and dimension kinds
//! - Affine expressions and constraints
//! - Integer sets and relations with their positional algebra
//! - The textual constraint-language parser
//!
//! The naming layer in [`crate::named`] sits on top of this module and only
//! touches it through spaces, name tags, [`IntegerRelation::align_to`] and
//! [`IntegerRelation::apply_op`].

pub mod constraint;
pub mod expr;
pub mod parser;
pub mod relation;
pub mod space;

pub use constraint::{Constraint, ConstraintKind, ConstraintSystem};
pub use expr::AffineExpr;
pub use parser::{parse_relation, parse_set};
pub use relation::{BinaryOp, IntegerRelation};
pub use space::{DimKind, Space};
