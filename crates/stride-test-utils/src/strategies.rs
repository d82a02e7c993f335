//! Proptest strategies.

use proptest::prelude::*;
use stride_core::Value;

use crate::model::Op;

fn arb_leaf() -> impl Strategy<Value = Value> + Clone {
    prop_oneof![
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(|v| Value::Int(v.into())),
        any::<i64>().prop_map(Value::Int),
        (-1.0e9f64..1.0e9).prop_map(Value::Double),
        ".{0,10}".prop_map(Value::Str),
    ]
}

/// Any value a [`VarArray`](stride_store::VarArray) accepts: never a
/// top-level `Null`, though lists and maps may contain one.
pub fn arb_storable_value() -> impl Strategy<Value = Value> + Clone {
    let nested = prop_oneof![Just(Value::Null), arb_leaf()].prop_recursive(2, 12, 4, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..4).prop_map(Value::List),
            proptest::collection::vec(("[a-z]{1,4}", inner), 0..4)
                .prop_map(|pairs| Value::Map(pairs.into_iter().collect())),
        ]
    })
    .boxed();
    prop_oneof![
        4 => arb_leaf(),
        1 => proptest::collection::vec(nested.clone(), 0..4).prop_map(Value::List),
        1 => proptest::collection::vec(("[a-z]{1,4}", nested), 1..4)
            .prop_map(|pairs| Value::Map(pairs.into_iter().collect())),
    ]
}

/// Values representable by an `Int32` fixed array.
pub fn arb_int32_value() -> impl Strategy<Value = Value> + Clone {
    any::<i32>().prop_map(|v| Value::Int(v.into()))
}

/// One operation drawing values from `values`. Indices run a little past
/// typical lengths so out-of-bounds paths are exercised too.
pub fn arb_op<S>(values: S) -> impl Strategy<Value = Op>
where
    S: Strategy<Value = Value> + Clone,
{
    let index = 0usize..12;
    prop_oneof![
        4 => values.clone().prop_map(Op::Add),
        3 => (index.clone(), values.clone()).prop_map(|(i, v)| Op::Insert(i, v)),
        3 => (index.clone(), values).prop_map(|(i, v)| Op::Set(i, v)),
        3 => index.clone().prop_map(Op::Delete),
        1 => Just(Op::AddNull),
        1 => Just(Op::Pop),
        1 => Just(Op::Shift),
        1 => (index.clone(), index).prop_map(|(a, b)| Op::Swap(a, b)),
        1 => Just(Op::Reverse),
        1 => Just(Op::Clear),
    ]
}

/// A sequence of up to `max_ops` operations.
pub fn arb_ops<S>(values: S, max_ops: usize) -> impl Strategy<Value = Vec<Op>>
where
    S: Strategy<Value = Value> + Clone,
{
    proptest::collection::vec(arb_op(values), 0..max_ops)
}
