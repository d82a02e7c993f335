//! The fixed-width element catalogue.
//!
//! A fixed-stride array stores every element with the same
//! [`ElementKind`]. The kind decides both the stride (bytes per element)
//! and the conversion between a [`Value`] and those bytes. All numeric
//! encodings are little-endian.

use std::fmt;

use smallvec::SmallVec;

use crate::error::StrideError;
use crate::value::Value;

/// Encoded bytes of one fixed-width element. Numeric kinds stay inline.
pub type ElementBytes = SmallVec<[u8; 8]>;

/// Encoding rule and byte width for fixed-stride elements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Signed 8-bit integer.
    Int8,
    /// Unsigned 8-bit integer (a raw byte).
    UInt8,
    /// Signed 32-bit integer.
    Int32,
    /// Signed 64-bit integer.
    Int64,
    /// IEEE-754 single precision float.
    Float32,
    /// IEEE-754 double precision float.
    Float64,
    /// Opaque record of an explicit byte width, holding a NUL-padded string.
    /// Strings ending in NUL are rejected since the padding is trimmed.
    Raw {
        /// Bytes per element. Always at least 1.
        width: u32,
    },
}

impl ElementKind {
    /// Build a [`ElementKind::Raw`] kind for records of `width` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`StrideError::InvalidConfig`] for a zero width or one that
    /// does not fit in a `u32`.
    pub fn raw(width: usize) -> Result<Self, StrideError> {
        match u32::try_from(width) {
            Ok(w) if w > 0 => Ok(Self::Raw { width: w }),
            _ => Err(StrideError::InvalidConfig {
                reason: format!("raw element width must be in 1..=u32::MAX, got {width}"),
            }),
        }
    }

    /// Bytes per element.
    pub fn width(&self) -> usize {
        match self {
            Self::Int8 | Self::UInt8 => 1,
            Self::Int32 | Self::Float32 => 4,
            Self::Int64 | Self::Float64 => 8,
            Self::Raw { width } => *width as usize,
        }
    }

    /// Whether the kind stores integers.
    pub fn is_integer(&self) -> bool {
        matches!(self, Self::Int8 | Self::UInt8 | Self::Int32 | Self::Int64)
    }

    /// Inclusive integer range representable by an integer kind.
    pub fn int_range(&self) -> Option<(i64, i64)> {
        match self {
            Self::Int8 => Some((i8::MIN as i64, i8::MAX as i64)),
            Self::UInt8 => Some((0, u8::MAX as i64)),
            Self::Int32 => Some((i32::MIN as i64, i32::MAX as i64)),
            Self::Int64 => Some((i64::MIN, i64::MAX)),
            _ => None,
        }
    }

    /// Encode `value` to exactly [`width`](Self::width) bytes.
    ///
    /// # Errors
    ///
    /// Returns [`StrideError::InvalidValue`] when the value's kind does not
    /// match, or the value is outside the representable range.
    pub fn encode(&self, value: &Value) -> Result<ElementBytes, StrideError> {
        match (self, value) {
            (Self::Float64, Value::Int(_) | Value::Double(_)) => {
                let v = value.as_f64().unwrap_or_default();
                Ok(SmallVec::from_slice(&v.to_le_bytes()))
            }
            (Self::Float32, Value::Int(_) | Value::Double(_)) => {
                let v = value.as_f64().unwrap_or_default();
                if v.is_finite() && v.abs() > f32::MAX as f64 {
                    return Err(self.reject(value, "out of range"));
                }
                Ok(SmallVec::from_slice(&(v as f32).to_le_bytes()))
            }
            (Self::Raw { width }, Value::Str(s)) => {
                let width = *width as usize;
                if s.len() > width {
                    return Err(self.reject(value, "longer than the record width"));
                }
                // Padding is trimmed on decode, so a trailing NUL would be lost.
                if s.ends_with('\0') {
                    return Err(self.reject(value, "ends with a NUL byte"));
                }
                let mut bytes = ElementBytes::from_slice(s.as_bytes());
                bytes.resize(width, 0);
                Ok(bytes)
            }
            (kind, Value::Int(v)) if kind.is_integer() => self.encode_int(*v),
            _ => Err(self.reject(value, "kind mismatch")),
        }
    }

    /// Encode a raw integer for an integer kind.
    ///
    /// # Errors
    ///
    /// Returns [`StrideError::InvalidValue`] for non-integer kinds or
    /// out-of-range integers.
    pub fn encode_int(&self, v: i64) -> Result<ElementBytes, StrideError> {
        let in_range = self
            .int_range()
            .is_some_and(|(lo, hi)| (lo..=hi).contains(&v));
        if !in_range {
            return Err(self.reject(&Value::Int(v), "out of range"));
        }
        let bytes = match self {
            Self::Int8 => SmallVec::from_slice(&(v as i8).to_le_bytes()),
            Self::UInt8 => SmallVec::from_slice(&(v as u8).to_le_bytes()),
            Self::Int32 => SmallVec::from_slice(&(v as i32).to_le_bytes()),
            _ => SmallVec::from_slice(&v.to_le_bytes()),
        };
        Ok(bytes)
    }

    /// Decode one element.
    ///
    /// # Errors
    ///
    /// Returns [`StrideError::Corrupt`] if `bytes` is not exactly one
    /// element wide, or a raw record is not valid UTF-8.
    pub fn decode(&self, bytes: &[u8]) -> Result<Value, StrideError> {
        if bytes.len() != self.width() {
            return Err(StrideError::corrupt(format!(
                "{self} element needs {} bytes, got {}",
                self.width(),
                bytes.len()
            )));
        }
        let value = match self {
            Self::Float32 => Value::Double(f32::from_le_bytes(fixed(bytes)) as f64),
            Self::Float64 => Value::Double(f64::from_le_bytes(fixed(bytes))),
            Self::Raw { .. } => {
                let end = bytes.iter().rposition(|&b| b != 0).map_or(0, |p| p + 1);
                let s = std::str::from_utf8(&bytes[..end])
                    .map_err(|e| StrideError::corrupt(format!("raw record is not UTF-8: {e}")))?;
                Value::Str(s.to_owned())
            }
            _ => Value::Int(self.decode_int(bytes)?),
        };
        Ok(value)
    }

    /// Decode one element of an integer kind to a raw integer.
    ///
    /// # Errors
    ///
    /// Returns [`StrideError::Corrupt`] for non-integer kinds or a width mismatch.
    pub fn decode_int(&self, bytes: &[u8]) -> Result<i64, StrideError> {
        if bytes.len() != self.width() {
            return Err(StrideError::corrupt(format!(
                "{self} element needs {} bytes, got {}",
                self.width(),
                bytes.len()
            )));
        }
        match self {
            Self::Int8 => Ok(i8::from_le_bytes(fixed(bytes)) as i64),
            Self::UInt8 => Ok(bytes[0] as i64),
            Self::Int32 => Ok(i32::from_le_bytes(fixed(bytes)) as i64),
            Self::Int64 => Ok(i64::from_le_bytes(fixed(bytes))),
            _ => Err(StrideError::corrupt(format!("{self} is not an integer kind"))),
        }
    }

    fn reject(&self, value: &Value, why: &str) -> StrideError {
        StrideError::invalid(format!("cannot encode {} {value} as {self}: {why}", value.kind_name()))
    }
}

/// Copy an exactly-sized slice into an array. Callers check the length first.
fn fixed<const N: usize>(bytes: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes[..N]);
    out
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int8 => write!(f, "int8"),
            Self::UInt8 => write!(f, "uint8"),
            Self::Int32 => write!(f, "int32"),
            Self::Int64 => write!(f, "int64"),
            Self::Float32 => write!(f, "float32"),
            Self::Float64 => write!(f, "float64"),
            Self::Raw { width } => write!(f, "raw[{width}]"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogue_widths() {
        assert_eq!(ElementKind::Int8.width(), 1);
        assert_eq!(ElementKind::UInt8.width(), 1);
        assert_eq!(ElementKind::Int32.width(), 4);
        assert_eq!(ElementKind::Int64.width(), 8);
        assert_eq!(ElementKind::Float32.width(), 4);
        assert_eq!(ElementKind::Float64.width(), 8);
        assert_eq!(ElementKind::raw(12).unwrap().width(), 12);
    }

    #[test]
    fn zero_raw_width_rejected() {
        assert!(matches!(
            ElementKind::raw(0),
            Err(StrideError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn int32_roundtrip_and_range() {
        let kind = ElementKind::Int32;
        let bytes = kind.encode(&Value::Int(-42)).unwrap();
        assert_eq!(bytes.len(), 4);
        assert_eq!(kind.decode(&bytes).unwrap(), Value::Int(-42));

        let too_big = Value::Int(i32::MAX as i64 + 1);
        assert!(matches!(
            kind.encode(&too_big),
            Err(StrideError::InvalidValue { .. })
        ));
    }

    #[test]
    fn uint8_rejects_negative() {
        assert!(ElementKind::UInt8.encode(&Value::Int(-1)).is_err());
        let bytes = ElementKind::UInt8.encode(&Value::Int(255)).unwrap();
        assert_eq!(bytes.as_slice(), &[255]);
    }

    #[test]
    fn float_kinds_accept_ints() {
        let bytes = ElementKind::Float64.encode(&Value::Int(3)).unwrap();
        assert_eq!(ElementKind::Float64.decode(&bytes).unwrap(), Value::Double(3.0));
        let bytes = ElementKind::Float32.encode(&Value::Double(0.5)).unwrap();
        assert_eq!(ElementKind::Float32.decode(&bytes).unwrap(), Value::Double(0.5));
    }

    #[test]
    fn integer_kinds_reject_doubles_and_strings() {
        assert!(ElementKind::Int64.encode(&Value::Double(1.0)).is_err());
        assert!(ElementKind::Int32.encode(&Value::from("1")).is_err());
        assert!(ElementKind::Float64.encode(&Value::Null).is_err());
    }

    #[test]
    fn raw_records_pad_and_trim() {
        let kind = ElementKind::raw(6).unwrap();
        let bytes = kind.encode(&Value::from("abc")).unwrap();
        assert_eq!(bytes.as_slice(), b"abc\0\0\0");
        assert_eq!(kind.decode(&bytes).unwrap(), Value::from("abc"));
        assert!(kind.encode(&Value::from("abcdefg")).is_err());
    }

    #[test]
    fn raw_records_refuse_trailing_nul() {
        let kind = ElementKind::raw(4).unwrap();
        assert!(matches!(
            kind.encode(&Value::from("ab\0")),
            Err(StrideError::InvalidValue { .. })
        ));
        let inner = Value::from("a\0b");
        let bytes = kind.encode(&inner).unwrap();
        assert_eq!(kind.decode(&bytes).unwrap(), inner);
    }

    #[test]
    fn decode_rejects_wrong_width() {
        assert!(matches!(
            ElementKind::Int32.decode(&[0, 0]),
            Err(StrideError::Corrupt { .. })
        ));
    }
}
