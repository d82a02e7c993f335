//! Random operation sequences checked against a `Vec<Value>` model.
//!
//! After every step the array must decode to exactly the model's
//! contents, and a variable-stride array must pass its bookkeeping check.

use proptest::prelude::*;
use stride_core::{ElementKind, Value};
use stride_store::{FixedArray, PackedArray};
use stride_test_utils::assert_fixed_matches;
use stride_test_utils::model::{apply_to_array, apply_to_model, run_var};
use stride_test_utils::strategies::{arb_int32_value, arb_ops, arb_storable_value};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn var_array_matches_model(ops in arb_ops(arb_storable_value(), 40)) {
        let array = run_var(&ops);
        prop_assert!(array.check_invariants().is_ok());
    }

    #[test]
    fn fixed_array_matches_model(ops in arb_ops(arb_int32_value(), 40)) {
        let mut array = FixedArray::new(ElementKind::Int32);
        let mut model: Vec<Value> = Vec::new();
        for op in &ops {
            let expected = apply_to_model(&mut model, op);
            let accepted = apply_to_array(&mut array, op);
            prop_assert_eq!(accepted, expected, "{:?}", op);
            assert_fixed_matches(&array, &model);
        }
    }

    #[test]
    fn clear_then_refill(values in proptest::collection::vec(arb_storable_value(), 0..12)) {
        let mut array = stride_store::VarArray::from_values(values.clone()).unwrap();
        array.clear();
        prop_assert_eq!(array.value_bytes(), 0);
        array.add_all(values.clone()).unwrap();
        prop_assert_eq!(array.to_vec().unwrap(), values);
    }
}
