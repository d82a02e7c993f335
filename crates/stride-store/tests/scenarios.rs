//! End-to-end scenarios over both array variants.

use stride_core::{ElementKind, StrideError, TypeTag, Value};
use stride_store::{Direction, FixedArray, PackedArray, StoreConfig, VarArray};
use stride_test_utils::fixtures::{counting, every_kind, mixed_values, people};
use stride_test_utils::{assert_fixed_matches, assert_var_matches};

// ── Helpers ─────────────────────────────────────────────────────

fn ints(values: &[i64]) -> Vec<Value> {
    values.iter().copied().map(Value::Int).collect()
}

// ── Variable-stride ─────────────────────────────────────────────

#[test]
fn insert_into_mixed_array() {
    let mut array = VarArray::new();
    for value in [
        Value::from(1),
        Value::from("a string"),
        Value::from(4),
        Value::from("day"),
        [1, 2, 3].into_iter().collect(),
        Value::from("bc"),
    ] {
        array.add(value).unwrap();
    }
    array.insert(2, Value::from("bill")).unwrap();

    assert_var_matches(&array, &mixed_values());
    assert_eq!(array.type_tag(5).unwrap(), TypeTag::Composite);
}

#[test]
fn every_kind_round_trips() {
    let array = VarArray::from_values(every_kind()).unwrap();
    assert_var_matches(&array, &every_kind());
    assert_eq!(array.type_tag(4).unwrap(), TypeTag::EmptyString);
    assert_eq!(array.encoded_len(4).unwrap(), 1);
    assert_eq!(array.type_tag(2).unwrap(), TypeTag::Composite);
}

#[test]
fn insert_then_delete_restores_bytes() {
    let mut array = VarArray::from_values(mixed_values()).unwrap();
    let before = array.as_bytes().to_vec();
    for index in 0..=array.len() {
        array.insert(index, Value::from("wedge")).unwrap();
        assert_eq!(array.delete(index).unwrap(), Value::from("wedge"));
        assert_eq!(array.as_bytes(), before.as_slice());
    }
    assert_var_matches(&array, &mixed_values());
}

#[test]
fn count_tracks_successful_mutations() {
    let mut array = VarArray::new();
    let mut expected = 0usize;
    for value in every_kind() {
        array.add(value).unwrap();
        expected += 1;
        assert_eq!(array.len(), expected);
    }
    array.insert(3, Value::from(9)).unwrap();
    expected += 1;
    array.delete(0).unwrap();
    expected -= 1;
    assert!(array.delete(expected).is_err());
    assert!(array.insert(expected + 1, Value::from(9)).is_err());
    assert_eq!(array.len(), expected);
}

#[test]
fn delete_out_of_range_is_byte_identical() {
    let mut array = VarArray::from_values(mixed_values()).unwrap();
    let before = array.clone();
    let err = array.delete(7).unwrap_err();
    assert_eq!(err, StrideError::IndexOutOfBounds { index: 7, len: 7 });
    assert_eq!(array.as_bytes(), before.as_bytes());
    assert_eq!(array, before);
}

#[test]
fn null_is_rejected_without_side_effects() {
    let mut array = VarArray::from_values(mixed_values()).unwrap();
    let err = array.add(Value::Null).unwrap_err();
    assert!(matches!(err, StrideError::InvalidValue { .. }));
    assert_eq!(array.len(), 7);
    assert_var_matches(&array, &mixed_values());
}

#[test]
fn sort_records_by_age_both_ways() {
    let mut array = VarArray::from_values(people()).unwrap();
    array.sort_by_key(Direction::Ascending, "age").unwrap();
    let ages: Vec<_> = array
        .iter()
        .filter_map(|(_, v)| v.field("age").and_then(Value::as_i64))
        .collect();
    assert_eq!(ages, vec![19, 27, 33, 41]);

    array.sort_by_key(Direction::Descending, "age").unwrap();
    let names: Vec<_> = array
        .iter()
        .filter_map(|(_, v)| v.field("name").and_then(|n| n.as_str().map(str::to_owned)))
        .collect();
    assert_eq!(names, vec!["ann", "cy", "dee", "bob"]);
}

#[test]
fn sorted_descending_is_reversed_ascending() {
    let values = ints(&[5, -3, 12, 0, 7, 7, -20]);
    let mut asc = VarArray::from_values(values.clone()).unwrap();
    asc.sort(Direction::Ascending).unwrap();
    let mut desc = VarArray::from_values(values).unwrap();
    desc.sort(Direction::Descending).unwrap();
    desc.reverse().unwrap();
    assert_eq!(asc.to_vec().unwrap(), desc.to_vec().unwrap());
    asc.check_invariants().unwrap();
}

#[test]
fn wide_index_config_behaves_identically() {
    let config = StoreConfig::new()
        .with_index_kind(ElementKind::Int64)
        .with_initial_capacity(0);
    let mut wide = VarArray::with_config(config).unwrap();
    let mut narrow = VarArray::new();
    for array in [&mut wide, &mut narrow] {
        array.add_all(mixed_values()).unwrap();
        array.set(1, Value::from(3.5)).unwrap();
        array.delete(0).unwrap();
    }
    assert_eq!(wide.to_vec().unwrap(), narrow.to_vec().unwrap());
    assert_eq!(wide.as_bytes(), narrow.as_bytes());
}

#[test]
fn rolling_mean_over_mixed_values() {
    let array = VarArray::from_values(mixed_values()).unwrap();
    let means = array
        .rolling(2, Some(1), |window, _| {
            let nums: Vec<f64> = window.iter().filter_map(Value::as_f64).collect();
            (!nums.is_empty()).then(|| Value::Double(nums.iter().sum::<f64>() / nums.len() as f64))
        })
        .unwrap();
    assert_eq!(
        means.to_vec().unwrap(),
        vec![Value::Double(1.0), Value::Double(1.0), Value::Double(4.0), Value::Double(4.0)]
    );
}

// ── Fixed-stride ────────────────────────────────────────────────

#[test]
fn normalise_evenly_spaced_ints() {
    let array = FixedArray::from_values(ElementKind::Int32, ints(&[0, 5, 10, 15, 20])).unwrap();
    let scaled = array.normalise().unwrap();
    assert_fixed_matches(
        &scaled,
        &[0.0, 0.25, 0.5, 0.75, 1.0].map(Value::Double),
    );
}

#[test]
fn every_numeric_kind_stores_its_range() {
    let cases = [
        (ElementKind::Int8, Value::Int(-128), Value::Int(128)),
        (ElementKind::UInt8, Value::Int(255), Value::Int(-1)),
        (ElementKind::Int32, Value::Int(i32::MIN.into()), Value::Int(1 << 31)),
        (ElementKind::Int64, Value::Int(i64::MAX), Value::from("x")),
        (ElementKind::Float32, Value::Double(0.5), Value::Double(f64::MAX)),
        (ElementKind::Float64, Value::Double(-1e300), Value::Bool(true)),
    ];
    for (kind, fits, rejected) in cases {
        let mut array = FixedArray::new(kind);
        array.add(fits.clone()).unwrap();
        assert!(array.add(rejected).is_err(), "{kind} accepted an out-of-range value");
        assert_fixed_matches(&array, &[fits]);
    }
}

#[test]
fn fixed_count_is_bytes_over_width() {
    let mut array = FixedArray::from_values(ElementKind::Float64, counting(10)).unwrap();
    assert_eq!(array.as_bytes().len(), 80);
    array.insert(10, Value::Double(1.5)).unwrap();
    array.delete(0).unwrap();
    array.delete(3).unwrap();
    assert_eq!(array.len(), 9);
    assert_eq!(array.as_bytes().len(), 72);
}

#[test]
fn sample_of_fixed_array_is_a_subsequence() {
    let array = FixedArray::from_values(ElementKind::Int64, counting(100)).unwrap();
    let picked = array.sample(12, 2024).unwrap();
    assert_eq!(picked.len(), 12);
    let mut rest = array.iter().map(|(_, v)| v);
    for (_, v) in &picked {
        assert!(rest.any(|candidate| candidate == v), "{v} out of order");
    }
}

#[test]
fn slices_copy_rather_than_alias() {
    let array = FixedArray::from_values(ElementKind::Int32, counting(6)).unwrap();
    let mut middle = array.slice(2, Some(3)).unwrap();
    middle.set(0, Value::Int(99)).unwrap();
    assert_fixed_matches(&middle, &ints(&[99, 3, 4]));
    assert_fixed_matches(&array, &counting(6));
}
