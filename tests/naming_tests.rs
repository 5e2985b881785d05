//! Construction and naming tests: building named objects from text or from
//! already-built positional objects, round-tripping names, and the failure
//! modes of name stripping.

use namedpoly::polyhedral::{parse_relation, parse_set};
use namedpoly::{DimKind, IntegerRelation, NameTable, NamedPolyError, NamedRelation, NamedSet, Space};
use test_log::test;

#[test]
fn set_from_str() {
    let set = NamedSet::parse("[n] -> { [i] : 0 <= i < n }").unwrap();
    assert_eq!(set.dim_names(), vec!["n", "i"]);
    assert_eq!(set.get("n").unwrap(), (DimKind::Param, 0));
    assert_eq!(set.get("i").unwrap(), (DimKind::Out, 0));
}

#[test]
fn named_set_from_positional_set() {
    let positional = parse_set("[n] -> { [i, j] : 0 <= i, j < n }").unwrap();
    let named = NamedSet::new(positional).unwrap();
    assert_eq!(named.dim(DimKind::Out), 2);
    assert_eq!(named.dim_names(), vec!["n", "i", "j"]);
}

#[test]
fn relation_from_str() {
    let rel = NamedRelation::parse("[n] -> { [i0, j0] -> [i1, j1] : 0 <= i0, j0, i1, j1 < n }")
        .unwrap();
    assert_eq!(rel.dim(DimKind::In), 2);
    assert_eq!(rel.dim(DimKind::Out), 2);
    assert_eq!(rel.dim_names(), vec!["n", "i0", "j0", "i1", "j1"]);
}

#[test]
fn named_relation_from_positional_relation() {
    let positional =
        parse_relation("[n] -> { [i0, j0] -> [i1, j1] : 0 <= i0, j0, i1, j1 < n }").unwrap();
    let named = NamedRelation::new(positional).unwrap();
    assert_eq!(named.get("j1").unwrap(), (DimKind::Out, 1));
    assert!(named.contains(&[5], &[0, 1], &[2, 3]));
}

#[test]
fn display_renders_names() {
    let set = NamedSet::parse("[n] -> { [i] : 0 <= i < n }").unwrap();
    let text = set.to_string();
    assert!(text.contains("[n]"), "got: {}", text);
    assert!(text.contains("[i]"), "got: {}", text);

    let rel = NamedRelation::parse("[n] -> { [i] -> [j] : 0 <= i, j < n }").unwrap();
    let text = rel.to_string();
    assert!(text.contains("[i] -> [j]"), "got: {}", text);
}

#[test]
fn round_trip_naming() -> anyhow::Result<()> {
    // restore(strip(obj)) reproduces the original name assignment.
    let obj = parse_set("[n, m] -> { [i, j, k] : 0 <= i, j, k < n + m }")?;
    let table = NameTable::strip(&obj)?;
    let restored = table.restore(&obj);
    for &kind in &DimKind::ALL {
        for idx in 0..obj.dim(kind) {
            assert_eq!(restored.dim_name(kind, idx), obj.dim_name(kind, idx));
        }
    }
    Ok(())
}

#[test]
fn strip_fails_on_unnamed_dimension() {
    let obj = IntegerRelation::universe(Space::set(2, 0)).with_dim_name(DimKind::Out, 0, "i");
    assert_eq!(
        NameTable::strip(&obj).unwrap_err(),
        NamedPolyError::UnnamedDimension {
            kind: DimKind::Out,
            index: 1
        }
    );
    // And the wrapper surfaces the same failure.
    let obj = IntegerRelation::universe(Space::set(2, 0)).with_dim_name(DimKind::Out, 0, "i");
    assert!(NamedSet::new(obj).is_err());
}

#[test]
fn strip_fails_on_duplicate_name() {
    // The same name on two different (kind, index) slots.
    let obj = IntegerRelation::universe(Space::relation(1, 1, 0))
        .with_dim_name(DimKind::In, 0, "i")
        .with_dim_name(DimKind::Out, 0, "i");
    assert_eq!(
        NameTable::strip(&obj).unwrap_err(),
        NamedPolyError::DuplicateName("i".to_string())
    );
}

#[test]
fn strict_equality_requires_identical_tables() {
    let a = NamedSet::parse("[n] -> { [i, j] : 0 <= i, j < n }").unwrap();
    let b = NamedSet::parse("[n] -> { [i, j] : 0 <= i, j < n }").unwrap();
    let swapped = NamedSet::parse("[n] -> { [j, i] : 0 <= i, j < n }").unwrap();
    assert_eq!(a, b);
    assert_ne!(a, swapped);

    // An explicit alignment makes them comparable.
    let aligned = swapped.align_to(a.table()).unwrap();
    assert_eq!(aligned.table(), a.table());
    assert_eq!(aligned, a);
}

#[test]
fn version_is_injected() {
    assert!(!namedpoly::VERSION.is_empty());
}
