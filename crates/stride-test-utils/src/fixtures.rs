//! Canned value sets.

use indexmap::IndexMap;
use stride_core::Value;

/// A mixed run of ints, strings and a list, in insertion order.
pub fn mixed_values() -> Vec<Value> {
    vec![
        Value::from(1),
        Value::from("a string"),
        Value::from("bill"),
        Value::from(4),
        Value::from("day"),
        [1, 2, 3].into_iter().collect(),
        Value::from("bc"),
    ]
}

/// One value of every storable kind, including the edge cases the codec
/// special-cases (empty string, ints outside 32 bits, nested nulls).
pub fn every_kind() -> Vec<Value> {
    let mut nested = IndexMap::new();
    nested.insert("missing".to_string(), Value::Null);
    nested.insert("tags".to_string(), ["x", "y"].into_iter().collect());
    vec![
        Value::Bool(true),
        Value::Int(-7),
        Value::Int(i64::from(i32::MAX) + 1),
        Value::Double(-0.125),
        Value::from(""),
        Value::from("plain"),
        Value::from("naïve ünïcode"),
        Value::List(vec![Value::Null, Value::Int(2)]),
        Value::Map(nested),
    ]
}

/// A structured record with `name` and `age` fields.
pub fn record(name: &str, age: i64) -> Value {
    let mut map = IndexMap::new();
    map.insert("name".to_string(), Value::from(name));
    map.insert("age".to_string(), Value::Int(age));
    Value::Map(map)
}

/// Four records with distinct ages.
pub fn people() -> Vec<Value> {
    vec![
        record("ann", 41),
        record("bob", 19),
        record("cy", 33),
        record("dee", 27),
    ]
}

/// `n` ints counting up from zero.
pub fn counting(n: i64) -> Vec<Value> {
    (0..n).map(Value::Int).collect()
}
