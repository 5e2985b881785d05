//! Alignment and operator tests over named sets and relations, exercised
//! across several dimension counts.

use namedpoly::{align_two, resolve, DimKind, NamedRelation, NamedSet};
use test_log::test;

const NDIMS: [usize; 4] = [1, 2, 4, 8];

fn dims(prefix: &str, ndims: usize) -> String {
    (0..ndims)
        .map(|d| format!("{}{}", prefix, d))
        .collect::<Vec<_>>()
        .join(", ")
}

#[test]
fn align_two_produces_one_table() {
    for ndims in NDIMS {
        let a = NamedSet::parse(&format!(
            "[n] -> {{ [{0}] : 0 <= {0} < n }}",
            dims("a", ndims)
        ))
        .unwrap();
        let b = NamedSet::parse(&format!(
            "[n] -> {{ [{0}] : 0 <= {0} < n }}",
            dims("b", ndims)
        ))
        .unwrap();

        let (a, b) = a.align_with(&b).unwrap();
        assert_eq!(a.table(), b.table());
        assert_eq!(a.dim(DimKind::Out), 2 * ndims);
    }
}

#[test]
fn align_into_resolved_ordering_grows_space() {
    for ndims in NDIMS {
        let a = NamedSet::parse(&format!(
            "[n] -> {{ [{0}] : 0 <= {0} < n }}",
            dims("a", ndims)
        ))
        .unwrap();
        let b = NamedSet::parse(&format!(
            "[n] -> {{ [{0}] : 0 <= {0} < n }}",
            dims("b", ndims)
        ))
        .unwrap();

        let ordering = resolve(b.table(), a.table());
        let b = b.align_to(&ordering).unwrap();
        assert_eq!(b.dim(DimKind::Out), 2 * ndims);
    }
}

#[test]
fn set_intersection_over_disjoint_names() {
    for ndims in NDIMS {
        let a_dims = dims("i", ndims);
        let b_dims = dims("j", ndims);
        let a =
            NamedSet::parse(&format!("[n] -> {{ [{0}] : 0 <= {0} < n }}", a_dims)).unwrap();
        let b =
            NamedSet::parse(&format!("[n] -> {{ [{0}] : 0 <= {0} < n }}", b_dims)).unwrap();

        // The cross product of constraints over the unified space.
        let expected = NamedSet::parse(&format!(
            "[n] -> {{ [{0}, {1}] : 0 <= {0} < n and 0 <= {1} < n }}",
            a_dims, b_dims
        ))
        .unwrap();

        let meet = a.intersect(&b).unwrap();
        assert_eq!(meet, expected);

        // Spot-check membership with n = 5.
        let inside = vec![4; 2 * ndims];
        assert!(meet.contains(&[5], &inside));
        let mut outside = inside.clone();
        outside[0] = 5;
        assert!(!meet.contains(&[5], &outside));
        let mut outside = inside;
        outside[2 * ndims - 1] = 5;
        assert!(!meet.contains(&[5], &outside));
    }
}

#[test]
fn relation_intersection_over_disjoint_names() {
    for ndims in NDIMS {
        let a_in = dims("i", ndims);
        let a_out = dims("j", ndims);
        let b_in = dims("a", ndims);
        let b_out = dims("b", ndims);

        let a = NamedRelation::parse(&format!(
            "[n] -> {{ [{0}] -> [{1}] : 0 <= {0}, {1} < n }}",
            a_in, a_out
        ))
        .unwrap();
        let b = NamedRelation::parse(&format!(
            "[n] -> {{ [{0}] -> [{1}] : 0 <= {0}, {1} < n }}",
            b_in, b_out
        ))
        .unwrap();

        let expected = NamedRelation::parse(&format!(
            "[n] -> {{ [{0}, {1}] -> [{2}, {3}] : 0 <= {0}, {2} < n and 0 <= {1}, {3} < n }}",
            a_in, b_in, a_out, b_out
        ))
        .unwrap();

        let meet = a.intersect(&b).unwrap();
        assert_eq!(meet, expected);
    }
}

#[test]
fn set_union_over_disjoint_names() {
    for ndims in NDIMS {
        let a_dims = dims("i", ndims);
        let b_dims = dims("j", ndims);
        let a =
            NamedSet::parse(&format!("[n] -> {{ [{0}] : 0 <= {0} < n }}", a_dims)).unwrap();
        let b =
            NamedSet::parse(&format!("[n] -> {{ [{0}] : 0 <= {0} < n }}", b_dims)).unwrap();

        let expected = NamedSet::parse(&format!(
            "[n] -> {{ [{0}, {1}] : (0 <= {0} < n) or (0 <= {1} < n) }}",
            a_dims, b_dims
        ))
        .unwrap();

        let join = a.union(&b).unwrap();
        assert_eq!(join, expected);

        // A point satisfying only one side's constraints is still inside.
        let mut point = vec![-1; 2 * ndims];
        for d in 0..ndims {
            point[d] = 0;
        }
        assert!(join.contains(&[5], &point));
        assert!(!join.contains(&[5], &vec![-1; 2 * ndims]));
    }
}

#[test]
fn relation_union_over_disjoint_names() {
    for ndims in NDIMS {
        let a_in = dims("a_in", ndims);
        let a_out = dims("a_out", ndims);
        let b_in = dims("b_in", ndims);
        let b_out = dims("b_out", ndims);

        let a = NamedRelation::parse(&format!(
            "[n] -> {{ [{0}] -> [{1}] : 0 <= {0}, {1} < n }}",
            a_in, a_out
        ))
        .unwrap();
        let b = NamedRelation::parse(&format!(
            "[n] -> {{ [{0}] -> [{1}] : 0 <= {0}, {1} < n }}",
            b_in, b_out
        ))
        .unwrap();

        let expected = NamedRelation::parse(&format!(
            "[n] -> {{ [{0}, {1}] -> [{2}, {3}] : (0 <= {0}, {2} < n) or (0 <= {1}, {3} < n) }}",
            a_in, b_in, a_out, b_out
        ))
        .unwrap();

        let join = a.union(&b).unwrap();
        assert_eq!(join, expected);
    }
}

#[test]
fn shared_name_intersection_adds_no_dimensions() {
    let a = NamedSet::parse("[n] -> { [i] : 0 <= i < n }").unwrap();
    let b = NamedSet::parse("[n] -> { [i] : 0 <= i < 2*n }").unwrap();

    let expected = NamedSet::parse("[n] -> { [i] : 0 <= i < n and 0 <= i < 2*n }").unwrap();

    let meet = a.intersect(&b).unwrap();
    assert_eq!(meet.dim(DimKind::Out), 1);
    assert_eq!(meet.dim(DimKind::Param), 1);
    assert_eq!(meet, expected);
    assert!(meet.contains(&[5], &[4]));
    assert!(!meet.contains(&[5], &[5]));
}

#[test]
fn union_ordering_is_symmetric_in_counts() {
    // Disjoint name sets of sizes 2 and 3: either alignment direction yields
    // the same set of names and the same per-kind counts, even though the
    // order of introduction differs per the template-first rule.
    let a = NamedSet::parse("[n] -> { [x0, x1] : 0 <= x0, x1 < n }").unwrap();
    let b = NamedSet::parse("[n] -> { [y0, y1, y2] : 0 <= y0, y1, y2 < n }").unwrap();

    let (ab_a, ab_b) = align_two(a.as_object(), b.as_object()).unwrap();
    let (ba_b, ba_a) = align_two(b.as_object(), a.as_object()).unwrap();

    assert_eq!(ab_a.table(), ab_b.table());
    assert_eq!(ba_a.table(), ba_b.table());
    for &kind in &DimKind::ALL {
        assert_eq!(ab_a.dim(kind), ba_a.dim(kind));
    }
    assert_eq!(ab_a.dim(DimKind::Out), 5);

    let mut ab_names: Vec<&str> = ab_a.dim_names();
    let mut ba_names: Vec<&str> = ba_a.dim_names();
    ab_names.sort_unstable();
    ba_names.sort_unstable();
    assert_eq!(ab_names, ba_names);
}

#[test]
fn template_names_keep_their_slots() {
    let a = NamedSet::parse("[n] -> { [i, j] : 0 <= i, j < n }").unwrap();
    let b = NamedSet::parse("[n] -> { [j, k] : 0 <= j, k < n }").unwrap();
    let ordering = resolve(b.table(), a.table());

    for (name, kind, idx) in a.table().iter() {
        assert_eq!(ordering.get(name).unwrap(), (kind, idx));
    }
    // Only b's novel name gets a freshly appended index.
    assert_eq!(ordering.get("k").unwrap(), (DimKind::Out, 2));
    assert_eq!(ordering.len(), 4);
}

#[test]
fn intersection_matches_both_directions_after_alignment() {
    let a = NamedSet::parse("[n] -> { [i] : 0 <= i < n }").unwrap();
    let b = NamedSet::parse("[n] -> { [j] : 0 <= j < n }").unwrap();

    let ab = a.intersect(&b).unwrap();
    let ba = b.intersect(&a).unwrap();

    // Different layouts, same points: align ba into ab's table and compare
    // membership over a small grid.
    let ba = ba.align_to(ab.table()).unwrap();
    assert_eq!(ba.table(), ab.table());
    for i in -1..6 {
        for j in -1..6 {
            assert_eq!(ab.contains(&[5], &[i, j]), ba.contains(&[5], &[i, j]));
        }
    }
}
