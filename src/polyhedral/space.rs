//! Spaces describe the dimension layout of sets and relations.
//!
//! A space records, per dimension kind, how many dimensions an object has
//! and an optional name tag for each one:
//! - Parameter dimensions (symbolic constants)
//! - Input dimensions (the domain of a relation; sets have none)
//! - Output dimensions (the range of a relation, or a set's coordinates)

use crate::error::{NamedPolyError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of a dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DimKind {
    /// Parameter (symbolic constant) dimension
    Param,
    /// Input (domain) dimension, relations only
    In,
    /// Output (range/coordinate) dimension
    Out,
}

impl DimKind {
    /// All kinds, in the canonical iteration order.
    pub const ALL: [DimKind; 3] = [DimKind::Param, DimKind::In, DimKind::Out];
}

impl fmt::Display for DimKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DimKind::Param => write!(f, "param"),
            DimKind::In => write!(f, "in"),
            DimKind::Out => write!(f, "out"),
        }
    }
}

/// The dimension layout of a positional object.
///
/// Name tags are carried per slot and may be absent; the engine itself never
/// reasons about them except in [`Space::mapping_onto`], where they drive the
/// dimension matching for alignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Space {
    n_param: usize,
    n_in: usize,
    n_out: usize,
    param_names: Vec<Option<String>>,
    in_names: Vec<Option<String>>,
    out_names: Vec<Option<String>>,
}

impl Space {
    /// Create a set space (no input dimensions).
    pub fn set(n_out: usize, n_param: usize) -> Self {
        Self::relation(0, n_out, n_param)
    }

    /// Create a relation space.
    pub fn relation(n_in: usize, n_out: usize, n_param: usize) -> Self {
        Self {
            n_param,
            n_in,
            n_out,
            param_names: vec![None; n_param],
            in_names: vec![None; n_in],
            out_names: vec![None; n_out],
        }
    }

    /// Number of dimensions of the given kind.
    pub fn dim(&self, kind: DimKind) -> usize {
        match kind {
            DimKind::Param => self.n_param,
            DimKind::In => self.n_in,
            DimKind::Out => self.n_out,
        }
    }

    /// Total number of dimensions across all kinds.
    pub fn total_dim(&self) -> usize {
        self.n_param + self.n_in + self.n_out
    }

    /// Check if this is a set space (no input dimensions).
    pub fn is_set(&self) -> bool {
        self.n_in == 0
    }

    /// Check if this is a relation space (has input dimensions).
    pub fn is_relation(&self) -> bool {
        self.n_in > 0
    }

    fn names(&self, kind: DimKind) -> &[Option<String>] {
        match kind {
            DimKind::Param => &self.param_names,
            DimKind::In => &self.in_names,
            DimKind::Out => &self.out_names,
        }
    }

    fn names_mut(&mut self, kind: DimKind) -> &mut Vec<Option<String>> {
        match kind {
            DimKind::Param => &mut self.param_names,
            DimKind::In => &mut self.in_names,
            DimKind::Out => &mut self.out_names,
        }
    }

    /// Get the name tag of a dimension, if any.
    pub fn dim_name(&self, kind: DimKind, idx: usize) -> Option<&str> {
        self.names(kind).get(idx)?.as_deref()
    }

    /// Return a copy of this space with one name tag replaced.
    pub fn with_dim_name(mut self, kind: DimKind, idx: usize, name: impl Into<String>) -> Self {
        let slots = self.names_mut(kind);
        assert!(idx < slots.len(), "dimension index out of range");
        slots[idx] = Some(name.into());
        self
    }

    /// Find a dimension of the given kind by its name tag.
    pub fn find_dim(&self, kind: DimKind, name: &str) -> Option<usize> {
        self.names(kind)
            .iter()
            .position(|n| n.as_deref() == Some(name))
    }

    /// Check that per-kind counts agree with another space.
    pub fn counts_match(&self, other: &Space) -> bool {
        DimKind::ALL.iter().all(|&k| self.dim(k) == other.dim(k))
    }

    /// Compute the dimension mapping that aligns this space onto `template`.
    ///
    /// Dimensions are matched by name tag within their kind. Dimensions of
    /// `template` that this space lacks become fresh slots; dimensions of this
    /// space absent from `template` are appended after the template's own (in
    /// this space's order) when `obj_bigger_ok`, and are an error otherwise.
    /// No dimension of this space is ever dropped.
    pub fn mapping_onto(&self, template: &Space, obj_bigger_ok: bool) -> Result<DimMapping> {
        let mut target = template.clone();
        let mut maps = DimMapping::empty();

        for &kind in &DimKind::ALL {
            let mut next_free = template.dim(kind);
            let mut map = Vec::with_capacity(self.dim(kind));
            for idx in 0..self.dim(kind) {
                let name = self
                    .dim_name(kind, idx)
                    .ok_or(NamedPolyError::UnnamedDimension { kind, index: idx })?;
                match template.find_dim(kind, name) {
                    Some(pos) => map.push(pos),
                    None if obj_bigger_ok => {
                        target.names_mut(kind).push(Some(name.to_string()));
                        match kind {
                            DimKind::Param => target.n_param += 1,
                            DimKind::In => target.n_in += 1,
                            DimKind::Out => target.n_out += 1,
                        }
                        map.push(next_free);
                        next_free += 1;
                    }
                    None => {
                        return Err(NamedPolyError::IncompatibleSpace(format!(
                            "{} dimension \"{}\" has no slot in the target space",
                            kind, name
                        )));
                    }
                }
            }
            *maps.map_mut(kind) = map;
        }

        maps.target = target;
        Ok(maps)
    }
}

/// A per-kind permutation/padding plan produced by [`Space::mapping_onto`].
#[derive(Debug, Clone)]
pub struct DimMapping {
    /// The space the object will occupy after remapping.
    pub target: Space,
    param_map: Vec<usize>,
    in_map: Vec<usize>,
    out_map: Vec<usize>,
}

impl DimMapping {
    fn empty() -> Self {
        Self {
            target: Space::relation(0, 0, 0),
            param_map: Vec::new(),
            in_map: Vec::new(),
            out_map: Vec::new(),
        }
    }

    /// New index of the dimension `(kind, old_idx)`.
    pub fn map(&self, kind: DimKind, old_idx: usize) -> usize {
        match kind {
            DimKind::Param => self.param_map[old_idx],
            DimKind::In => self.in_map[old_idx],
            DimKind::Out => self.out_map[old_idx],
        }
    }

    fn map_mut(&mut self, kind: DimKind) -> &mut Vec<usize> {
        match kind {
            DimKind::Param => &mut self.param_map,
            DimKind::In => &mut self.in_map,
            DimKind::Out => &mut self.out_map,
        }
    }
}

impl fmt::Display for Space {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_relation() {
            write!(f, "[{}] -> [{}]", self.n_in, self.n_out)?;
        } else {
            write!(f, "[{}]", self.n_out)?;
        }
        if self.n_param > 0 {
            write!(f, " : {} params", self.n_param)?;
        }
        Ok(())
    }
}
