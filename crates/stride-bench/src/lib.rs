//! Benchmark workloads for the Stride packed array engine.
//!
//! Deterministic value generators shared by the criterion benches:
//!
//! - [`int_workload`]: `n` 32-bit ints, the fixed-stride fast path
//! - [`mixed_workload`]: a seeded blend of ints, doubles, strings and
//!   lists, the variable-stride common case
//! - [`record_workload`]: structured records for keyed sort and aggregates

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use indexmap::IndexMap;
use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use stride_core::{ElementKind, StrideError, Value};
use stride_store::{FixedArray, VarArray};

/// `n` ints in a seeded pseudo-random order.
pub fn int_workload(n: usize, seed: u64) -> Vec<Value> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|_| Value::Int(i64::from(rng.next_u32() as i32)))
        .collect()
}

/// `n` values cycling through every variable-stride encoding.
///
/// String lengths vary from 0 to 23 bytes so shifts move uneven amounts
/// of data.
pub fn mixed_workload(n: usize, seed: u64) -> Vec<Value> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|i| {
            let r = rng.next_u64();
            match r % 5 {
                0 => Value::Int(i64::from((r >> 8) as i32)),
                1 => Value::Double((r >> 11) as f64 / (1u64 << 53) as f64),
                2 => Value::Str("x".repeat((r >> 8) as usize % 24)),
                3 => [i as i64, (r >> 32) as i64].into_iter().collect(),
                _ => Value::Str(format!("item-{i}")),
            }
        })
        .collect()
}

/// `n` records with a `name` and a seeded `score` below 1000.
pub fn record_workload(n: usize, seed: u64) -> Vec<Value> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|i| {
            let mut map = IndexMap::new();
            map.insert("name".to_string(), Value::Str(format!("r{i}")));
            map.insert("score".to_string(), Value::Int(i64::from(rng.next_u32() % 1000)));
            Value::Map(map)
        })
        .collect()
}

/// An `Int32` fixed array filled from [`int_workload`].
pub fn int_array(n: usize, seed: u64) -> Result<FixedArray, StrideError> {
    FixedArray::from_values(ElementKind::Int32, int_workload(n, seed))
}

/// A variable-stride array filled from [`mixed_workload`].
pub fn mixed_array(n: usize, seed: u64) -> Result<VarArray, StrideError> {
    VarArray::from_values(mixed_workload(n, seed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use stride_store::PackedArray;

    #[test]
    fn workloads_are_deterministic() {
        assert_eq!(int_workload(50, 7), int_workload(50, 7));
        assert_eq!(mixed_workload(50, 7), mixed_workload(50, 7));
        assert_ne!(mixed_workload(50, 7), mixed_workload(50, 8));
    }

    #[test]
    fn arrays_hold_the_whole_workload() {
        assert_eq!(int_array(100, 1).unwrap().len(), 100);
        let mixed = mixed_array(100, 1).unwrap();
        assert_eq!(mixed.len(), 100);
        mixed.check_invariants().unwrap();
        assert_eq!(mixed.to_vec().unwrap(), mixed_workload(100, 1));
    }

    #[test]
    fn records_carry_scores() {
        let records = record_workload(10, 3);
        assert!(records
            .iter()
            .all(|r| r.field("score").and_then(Value::as_i64).is_some_and(|s| s < 1000)));
    }
}
