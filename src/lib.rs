//! # namedpoly - Named dimensions for polyhedral sets and relations
//!
//! The positional engine in [`polyhedral`] identifies every dimension of a
//! set or relation by a `(kind, index)` pair. The [`named`] layer on top
//! pairs each object with a bijective name table, so dimensions can be
//! referred to by stable names ("i", "j", "n") and binary operations between
//! differently-shaped objects "just work":
//!
//! - dimensions with the same name are matched up,
//! - the remaining dimensions are concatenated in a deterministic,
//!   template-first order,
//! - both sides are reshaped into the unified space before the positional
//!   operator runs.
//!
//! ## Example
//!
//! ```
//! use namedpoly::NamedSet;
//!
//! let a = NamedSet::parse("[n] -> { [i] : 0 <= i < n }")?;
//! let b = NamedSet::parse("[n] -> { [j] : 0 <= j < n }")?;
//!
//! // Disjoint names: the intersection lives in the unified space [i, j].
//! let meet = a.intersect(&b)?;
//! assert_eq!(meet.dim_names(), vec!["n", "i", "j"]);
//! assert!(meet.contains(&[10], &[3, 7]));
//! # Ok::<(), namedpoly::NamedPolyError>(())
//! ```
//!
//! All values are immutable: every transformation returns a new object, and
//! named objects and their tables can be shared freely across threads.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod named;
pub mod polyhedral;

pub use error::{NamedPolyError, ParseError, Result};
pub use named::{align, align_two, apply, resolve};
pub use named::{NameTable, NamedObject, NamedRelation, NamedSet, ObjectKind};
pub use polyhedral::{BinaryOp, DimKind, IntegerRelation, Space};

/// Crate version, injected at build time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
