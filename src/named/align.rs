//! Ordering resolution and space alignment for named objects.
//!
//! Binary operations between two differently-shaped named objects work by
//! first computing one unified name table ([`resolve`]), reshaping both
//! sides into the space it describes ([`align`], [`align_two`]), and only
//! then delegating to the positional operator ([`apply`]).

use crate::error::{NamedPolyError, Result};
use crate::named::object::NamedObject;
use crate::named::table::NameTable;
use crate::polyhedral::relation::BinaryOp;
use crate::polyhedral::space::DimKind;
use log::{debug, error};

fn kind_slot(kind: DimKind) -> usize {
    match kind {
        DimKind::Param => 0,
        DimKind::In => 1,
        DimKind::Out => 2,
    }
}

/// Compute a unified name table covering `obj` and `template`.
///
/// Template entries keep their `(kind, index)` assignments verbatim. Names
/// of `obj` that the template lacks are appended per kind, starting at the
/// template's count for that kind, in `obj`'s own per-kind index order
/// (never re-sorted). Repeating the resolution with the same template is
/// therefore idempotent.
pub fn resolve(obj: &NameTable, template: &NameTable) -> NameTable {
    let mut merged = template.clone();
    let mut next = [
        template.dim_count(DimKind::Param),
        template.dim_count(DimKind::In),
        template.dim_count(DimKind::Out),
    ];
    for &kind in &DimKind::ALL {
        for idx in 0..obj.dim_count(kind) {
            let name = match obj.name_at(kind, idx) {
                Some(name) => name,
                None => continue, // tables are dense; unreachable in practice
            };
            if merged.contains(name) {
                continue;
            }
            let slot = &mut next[kind_slot(kind)];
            merged.insert_unchecked(name.to_string(), kind, *slot);
            *slot += 1;
        }
    }
    merged
}

/// Reshape `obj` into the space described by `target`.
///
/// Every name of `obj` must already have a slot of the same kind in
/// `target`; otherwise the alignment fails with `IncompatibleSpace`. The
/// positional object is padded/permuted by the engine (it is allowed to be
/// the larger side only where its native count already exceeds the
/// target's), the target's names are written back onto it, and the result
/// carries `target` as its table. Dimensions are never dropped.
pub fn align(obj: &NamedObject, target: &NameTable) -> Result<NamedObject> {
    for (name, kind, _) in obj.table().iter() {
        match target.get(name) {
            Ok((target_kind, _)) if target_kind == kind => {}
            _ => {
                return Err(NamedPolyError::IncompatibleSpace(format!(
                    "alignment target has no {} dimension named \"{}\"",
                    kind, name
                )));
            }
        }
    }

    let obj_bigger_ok = DimKind::ALL
        .iter()
        .any(|&kind| obj.dim(kind) > target.dim_count(kind));
    debug!(
        "align: {} named dims into target of {} (obj_bigger_ok: {})",
        obj.table().len(),
        target.len(),
        obj_bigger_ok
    );

    let reshaped = obj.positional().align_to(&target.to_space(), obj_bigger_ok)?;
    let restored = target.restore(&reshaped);
    Ok(NamedObject::from_parts(restored, target.clone(), obj.kind()))
}

/// Align two named objects into one identical unified space.
///
/// One ordering is resolved with `a` as the template and applied to both
/// sides, so the results share a single table rather than two merely
/// compatible ones. Both returned objects carry that table.
pub fn align_two(a: &NamedObject, b: &NamedObject) -> Result<(NamedObject, NamedObject)> {
    if a.kind() != b.kind() {
        return Err(NamedPolyError::SpaceMismatch(format!(
            "cannot align a named {} with a named {}",
            a.kind(),
            b.kind()
        )));
    }
    let ordering = resolve(b.table(), a.table());
    let b_aligned = align(b, &ordering).map_err(report_internal)?;
    let a_aligned = align(a, &ordering).map_err(report_internal)?;
    Ok((a_aligned, b_aligned))
}

/// An `IncompatibleSpace` out of the resolved ordering means the resolver
/// failed to produce a superset, which is a defect, not a user error.
fn report_internal(err: NamedPolyError) -> NamedPolyError {
    if matches!(err, NamedPolyError::IncompatibleSpace(_)) {
        error!("alignment invariant violated: {}", err);
    }
    err
}

/// Align `a` and `b`, apply the positional operator, and wrap the result
/// with the unified table.
pub fn apply(a: &NamedObject, b: &NamedObject, op: BinaryOp) -> Result<NamedObject> {
    let (a_aligned, b_aligned) = align_two(a, b)?;
    let raw = a_aligned
        .positional()
        .apply_op(op, b_aligned.positional())
        .map_err(report_internal)?;
    Ok(NamedObject::from_parts(
        raw,
        a_aligned.table().clone(),
        a_aligned.kind(),
    ))
}
