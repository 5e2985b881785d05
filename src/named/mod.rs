//! The naming layer: name tables, alignment, and named objects.
//!
//! This module lets dimensions be referred to by stable names regardless of
//! the positional layout the engine chooses, and makes binary operations
//! between differently-shaped objects work by matching dimensions with the
//! same name and concatenating the rest in a deterministic order.

pub mod align;
pub mod object;
pub mod relation;
pub mod set;
pub mod table;

pub use align::{align, align_two, apply, resolve};
pub use object::{NamedObject, ObjectKind};
pub use relation::NamedRelation;
pub use set::NamedSet;
pub use table::NameTable;
