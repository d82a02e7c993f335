//! Variable-stride encode/decode.
//!
//! Maps a [`Value`] to `(bytes, TypeTag)` and back. Scalars use compact
//! fixed encodings; anything structured goes through the composite
//! serializer. All integers are little-endian. Composite strings and
//! collections are length-prefixed with a `u32`.
//!
//! ```text
//! Int (i32 range)  → [i32 LE; 4]               TypeTag::Int
//! Double           → [f64 LE; 8]               TypeTag::Double
//! ""               → [0x00]                    TypeTag::EmptyString
//! Str              → UTF-8 bytes               TypeTag::String
//! Bool/List/Map/   → composite node tree       TypeTag::Composite
//!   wide Int
//! Null             → rejected
//! ```

use std::fmt;

use crate::error::StrideError;
use crate::value::Value;

/// Type tag recorded alongside every variable-stride element.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeTag {
    /// 4-byte signed integer.
    Int = 1,
    /// 8-byte IEEE-754 double.
    Double = 2,
    /// Serialized aggregate.
    Composite = 3,
    /// Empty string, stored as a single placeholder byte.
    EmptyString = 4,
    /// Raw UTF-8 string bytes.
    String = 5,
}

impl TypeTag {
    /// The byte stored in the type side array.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Parse a stored tag byte.
    ///
    /// # Errors
    ///
    /// Returns [`StrideError::Corrupt`] for an unknown tag.
    pub fn from_u8(tag: u8) -> Result<Self, StrideError> {
        match tag {
            1 => Ok(Self::Int),
            2 => Ok(Self::Double),
            3 => Ok(Self::Composite),
            4 => Ok(Self::EmptyString),
            5 => Ok(Self::String),
            other => Err(StrideError::corrupt(format!("unknown type tag {other}"))),
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Int => "int",
            Self::Double => "double",
            Self::Composite => "composite",
            Self::EmptyString => "empty-string",
            Self::String => "string",
        };
        f.write_str(name)
    }
}

/// Placeholder byte stored for an empty string.
pub const EMPTY_STRING_PLACEHOLDER: u8 = 0x00;

/// An encoded element ready to be written to a value buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Encoded {
    /// Payload bytes. Never empty.
    pub bytes: Vec<u8>,
    /// How to decode `bytes`.
    pub tag: TypeTag,
}

impl Encoded {
    /// Encoded length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always `false`: every encoding produces at least one byte.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Encode a value for variable-stride storage.
///
/// # Errors
///
/// Returns [`StrideError::InvalidValue`] for [`Value::Null`].
pub fn encode(value: &Value) -> Result<Encoded, StrideError> {
    let encoded = match value {
        Value::Null => return Err(StrideError::invalid("null cannot be stored")),
        Value::Int(v) => match i32::try_from(*v) {
            Ok(narrow) => Encoded {
                bytes: narrow.to_le_bytes().to_vec(),
                tag: TypeTag::Int,
            },
            Err(_) => composite(value),
        },
        Value::Double(v) => Encoded {
            bytes: v.to_le_bytes().to_vec(),
            tag: TypeTag::Double,
        },
        Value::Str(s) if s.is_empty() => Encoded {
            bytes: vec![EMPTY_STRING_PLACEHOLDER],
            tag: TypeTag::EmptyString,
        },
        Value::Str(s) => Encoded {
            bytes: s.as_bytes().to_vec(),
            tag: TypeTag::String,
        },
        Value::Bool(_) | Value::List(_) | Value::Map(_) => composite(value),
    };
    Ok(encoded)
}

fn composite(value: &Value) -> Encoded {
    let mut bytes = Vec::new();
    write_node(&mut bytes, value);
    Encoded {
        bytes,
        tag: TypeTag::Composite,
    }
}

/// Decode bytes previously produced by [`encode`].
///
/// # Errors
///
/// Returns [`StrideError::Corrupt`] if the bytes do not form a valid
/// payload for `tag`.
pub fn decode(bytes: &[u8], tag: TypeTag) -> Result<Value, StrideError> {
    match tag {
        TypeTag::Int => {
            let arr: [u8; 4] = bytes
                .try_into()
                .map_err(|_| StrideError::corrupt(format!("int payload of {} bytes", bytes.len())))?;
            Ok(Value::Int(i32::from_le_bytes(arr) as i64))
        }
        TypeTag::Double => {
            let arr: [u8; 8] = bytes.try_into().map_err(|_| {
                StrideError::corrupt(format!("double payload of {} bytes", bytes.len()))
            })?;
            Ok(Value::Double(f64::from_le_bytes(arr)))
        }
        TypeTag::EmptyString => {
            if bytes != [EMPTY_STRING_PLACEHOLDER] {
                return Err(StrideError::corrupt("malformed empty-string placeholder"));
            }
            Ok(Value::Str(String::new()))
        }
        TypeTag::String => std::str::from_utf8(bytes)
            .map(|s| Value::Str(s.to_owned()))
            .map_err(|e| StrideError::corrupt(format!("invalid UTF-8 string: {e}"))),
        TypeTag::Composite => {
            let mut cursor = bytes;
            let value = read_node(&mut cursor)?;
            if !cursor.is_empty() {
                return Err(StrideError::corrupt(format!(
                    "{} trailing bytes after composite value",
                    cursor.len()
                )));
            }
            Ok(value)
        }
    }
}

// ── Composite node tags ─────────────────────────────────────────

const NODE_NULL: u8 = 0;
const NODE_BOOL: u8 = 1;
const NODE_INT: u8 = 2;
const NODE_DOUBLE: u8 = 3;
const NODE_STR: u8 = 4;
const NODE_LIST: u8 = 5;
const NODE_MAP: u8 = 6;

// ── Composite writers ───────────────────────────────────────────

fn write_u32_le(out: &mut Vec<u8>, v: u32) {
    out.extend_from_slice(&v.to_le_bytes());
}

fn write_length_prefixed_str(out: &mut Vec<u8>, s: &str) {
    write_u32_le(out, s.len() as u32);
    out.extend_from_slice(s.as_bytes());
}

fn write_node(out: &mut Vec<u8>, value: &Value) {
    match value {
        Value::Null => out.push(NODE_NULL),
        Value::Bool(b) => {
            out.push(NODE_BOOL);
            out.push(u8::from(*b));
        }
        Value::Int(v) => {
            out.push(NODE_INT);
            out.extend_from_slice(&v.to_le_bytes());
        }
        Value::Double(v) => {
            out.push(NODE_DOUBLE);
            out.extend_from_slice(&v.to_le_bytes());
        }
        Value::Str(s) => {
            out.push(NODE_STR);
            write_length_prefixed_str(out, s);
        }
        Value::List(items) => {
            out.push(NODE_LIST);
            write_u32_le(out, items.len() as u32);
            for item in items {
                write_node(out, item);
            }
        }
        Value::Map(map) => {
            out.push(NODE_MAP);
            write_u32_le(out, map.len() as u32);
            for (key, item) in map {
                write_length_prefixed_str(out, key);
                write_node(out, item);
            }
        }
    }
}

// ── Composite readers ───────────────────────────────────────────

fn take<'a>(cursor: &mut &'a [u8], n: usize) -> Result<&'a [u8], StrideError> {
    if cursor.len() < n {
        return Err(StrideError::corrupt(format!(
            "composite truncated: needed {n} bytes, {} left",
            cursor.len()
        )));
    }
    let (head, rest) = cursor.split_at(n);
    *cursor = rest;
    Ok(head)
}

fn read_u8(cursor: &mut &[u8]) -> Result<u8, StrideError> {
    Ok(take(cursor, 1)?[0])
}

fn read_u32_le(cursor: &mut &[u8]) -> Result<u32, StrideError> {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(take(cursor, 4)?);
    Ok(u32::from_le_bytes(buf))
}

fn read_u64_le(cursor: &mut &[u8]) -> Result<u64, StrideError> {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(take(cursor, 8)?);
    Ok(u64::from_le_bytes(buf))
}

fn read_length_prefixed_str(cursor: &mut &[u8]) -> Result<String, StrideError> {
    let len = read_u32_le(cursor)? as usize;
    let raw = take(cursor, len)?;
    String::from_utf8(raw.to_vec())
        .map_err(|e| StrideError::corrupt(format!("invalid UTF-8 string: {e}")))
}

fn read_node(cursor: &mut &[u8]) -> Result<Value, StrideError> {
    let value = match read_u8(cursor)? {
        NODE_NULL => Value::Null,
        NODE_BOOL => Value::Bool(read_u8(cursor)? != 0),
        NODE_INT => Value::Int(read_u64_le(cursor)? as i64),
        NODE_DOUBLE => Value::Double(f64::from_bits(read_u64_le(cursor)?)),
        NODE_STR => Value::Str(read_length_prefixed_str(cursor)?),
        NODE_LIST => {
            let count = read_u32_le(cursor)? as usize;
            // Each node is at least one byte; cap the reservation by what is left.
            let mut items = Vec::with_capacity(count.min(cursor.len()));
            for _ in 0..count {
                items.push(read_node(cursor)?);
            }
            Value::List(items)
        }
        NODE_MAP => {
            let count = read_u32_le(cursor)? as usize;
            let mut map = indexmap::IndexMap::with_capacity(count.min(cursor.len()));
            for _ in 0..count {
                let key = read_length_prefixed_str(cursor)?;
                let item = read_node(cursor)?;
                map.insert(key, item);
            }
            Value::Map(map)
        }
        other => {
            return Err(StrideError::corrupt(format!(
                "unknown composite node tag {other}"
            )))
        }
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn roundtrip(value: Value) -> Encoded {
        let encoded = encode(&value).unwrap();
        assert_eq!(decode(&encoded.bytes, encoded.tag).unwrap(), value);
        encoded
    }

    #[test]
    fn small_int_is_four_bytes() {
        let e = roundtrip(Value::Int(-7));
        assert_eq!(e.tag, TypeTag::Int);
        assert_eq!(e.len(), 4);
    }

    #[test]
    fn wide_int_falls_back_to_composite() {
        let e = roundtrip(Value::Int(i64::MAX));
        assert_eq!(e.tag, TypeTag::Composite);
    }

    #[test]
    fn double_is_eight_bytes() {
        let e = roundtrip(Value::Double(2.75));
        assert_eq!(e.tag, TypeTag::Double);
        assert_eq!(e.len(), 8);
    }

    #[test]
    fn empty_string_uses_placeholder() {
        let e = roundtrip(Value::from(""));
        assert_eq!(e.tag, TypeTag::EmptyString);
        assert_eq!(e.bytes, vec![EMPTY_STRING_PLACEHOLDER]);
    }

    #[test]
    fn strings_are_raw_bytes() {
        let e = roundtrip(Value::from("day"));
        assert_eq!(e.tag, TypeTag::String);
        assert_eq!(e.bytes, b"day".to_vec());
    }

    #[test]
    fn composites_roundtrip_in_order() {
        let mut map = IndexMap::new();
        map.insert("z".to_string(), Value::from(1));
        map.insert("a".to_string(), [1, 2, 3].into_iter().collect());
        map.insert("n".to_string(), Value::Null);
        map.insert("flag".to_string(), Value::Bool(true));
        let e = roundtrip(Value::Map(map));
        assert_eq!(e.tag, TypeTag::Composite);

        let Value::Map(back) = decode(&e.bytes, e.tag).unwrap() else {
            panic!("expected a map");
        };
        let keys: Vec<_> = back.keys().cloned().collect();
        assert_eq!(keys, vec!["z", "a", "n", "flag"]);
    }

    #[test]
    fn null_is_rejected() {
        assert!(matches!(
            encode(&Value::Null),
            Err(StrideError::InvalidValue { .. })
        ));
    }

    #[test]
    fn truncated_composite_is_corrupt() {
        let e = encode(&Value::from(vec![Value::from("abc")])).unwrap();
        let cut = &e.bytes[..e.bytes.len() - 1];
        assert!(matches!(
            decode(cut, TypeTag::Composite),
            Err(StrideError::Corrupt { .. })
        ));
    }

    #[test]
    fn trailing_bytes_are_corrupt() {
        let mut e = encode(&Value::Bool(false)).unwrap();
        e.bytes.push(0);
        assert!(decode(&e.bytes, TypeTag::Composite).is_err());
    }

    #[test]
    fn tag_bytes_roundtrip() {
        for tag in [
            TypeTag::Int,
            TypeTag::Double,
            TypeTag::Composite,
            TypeTag::EmptyString,
            TypeTag::String,
        ] {
            assert_eq!(TypeTag::from_u8(tag.as_u8()).unwrap(), tag);
        }
        assert!(TypeTag::from_u8(0).is_err());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn arb_leaf() -> impl Strategy<Value = Value> {
            prop_oneof![
                any::<bool>().prop_map(Value::Bool),
                any::<i64>().prop_map(Value::Int),
                (-1.0e12f64..1.0e12).prop_map(Value::Double),
                ".{0,12}".prop_map(Value::Str),
            ]
        }

        fn arb_value() -> impl Strategy<Value = Value> {
            arb_leaf().prop_recursive(3, 24, 4, |inner| {
                prop_oneof![
                    proptest::collection::vec(inner.clone(), 0..4).prop_map(Value::List),
                    proptest::collection::vec(("[a-z]{1,4}", inner), 0..4)
                        .prop_map(|pairs| Value::Map(pairs.into_iter().collect())),
                ]
            })
        }

        proptest! {
            #[test]
            fn decode_inverts_encode(value in arb_value()) {
                let encoded = encode(&value).unwrap();
                prop_assert!(!encoded.is_empty());
                prop_assert_eq!(decode(&encoded.bytes, encoded.tag).unwrap(), value);
            }
        }
    }
}
