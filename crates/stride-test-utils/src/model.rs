//! Reference model for packed array behaviour.
//!
//! A plain `Vec<Value>` with the same accept/reject rules as the packed
//! arrays. Applying an [`Op`] to both and comparing the results checks
//! the byte-shifting code against obviously-correct vector operations.

use stride_core::Value;
use stride_store::{PackedArray, VarArray};

/// One mutating array operation.
#[derive(Clone, Debug)]
pub enum Op {
    Add(Value),
    AddNull,
    Insert(usize, Value),
    Set(usize, Value),
    Delete(usize),
    Pop,
    Shift,
    Swap(usize, usize),
    Reverse,
    Clear,
}

/// Apply `op` to the model, returning whether it should succeed.
///
/// Values are assumed encodable by the array under test, apart from
/// [`Op::AddNull`].
pub fn apply_to_model(model: &mut Vec<Value>, op: &Op) -> bool {
    let len = model.len();
    match op {
        Op::Add(v) => {
            model.push(v.clone());
            true
        }
        Op::AddNull => false,
        Op::Insert(i, v) => {
            if *i > len {
                return false;
            }
            model.insert(*i, v.clone());
            true
        }
        Op::Set(i, v) => {
            match model.get_mut(*i) {
                Some(slot) => *slot = v.clone(),
                None => model.push(v.clone()),
            }
            true
        }
        Op::Delete(i) => {
            if *i >= len {
                return false;
            }
            model.remove(*i);
            true
        }
        Op::Pop => {
            model.pop();
            true
        }
        Op::Shift => {
            if len > 0 {
                model.remove(0);
            }
            true
        }
        Op::Swap(a, b) => {
            if *a >= len || *b >= len {
                return false;
            }
            model.swap(*a, *b);
            true
        }
        Op::Reverse => {
            model.reverse();
            true
        }
        Op::Clear => {
            model.clear();
            true
        }
    }
}

/// Apply `op` to a packed array, returning whether it succeeded.
pub fn apply_to_array<A: PackedArray>(array: &mut A, op: &Op) -> bool {
    match op {
        Op::Add(v) => array.add(v.clone()).is_ok(),
        Op::AddNull => array.add(Value::Null).is_ok(),
        Op::Insert(i, v) => array.insert(*i, v.clone()).is_ok(),
        Op::Set(i, v) => array.set(*i, v.clone()).is_ok(),
        Op::Delete(i) => array.delete(*i).is_ok(),
        Op::Pop => {
            array.pop();
            true
        }
        Op::Shift => {
            array.shift();
            true
        }
        Op::Swap(a, b) => array.swap(*a, *b).is_ok(),
        Op::Reverse => array.reverse().is_ok(),
        Op::Clear => {
            array.clear();
            true
        }
    }
}

/// Run `ops` against a fresh [`VarArray`] and the model, asserting after
/// every step that the two agree and the array's bookkeeping is sound.
///
/// # Panics
///
/// On the first divergence.
pub fn run_var(ops: &[Op]) -> VarArray {
    let mut array = VarArray::new();
    let mut model = Vec::new();
    for (step, op) in ops.iter().enumerate() {
        let expected = apply_to_model(&mut model, op);
        let accepted = apply_to_array(&mut array, op);
        assert_eq!(accepted, expected, "step {step}: {op:?} acceptance");
        crate::assert_var_matches(&array, &model);
    }
    array
}
