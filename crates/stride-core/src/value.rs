//! The dynamic value model stored by packed arrays.

use std::cmp::Ordering;
use std::fmt;

use indexmap::IndexMap;

/// A single element as seen by callers of a packed array.
///
/// Arrays never hold `Value`s directly: every element is encoded to bytes
/// on the way in and decoded on the way out. `Null` exists so callers can
/// express "no value"; it is rejected by every storing operation.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Absence of a value. Never storable.
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// An IEEE-754 double.
    Double(f64),
    /// A UTF-8 string (possibly empty).
    Str(String),
    /// An ordered list of values.
    List(Vec<Value>),
    /// An insertion-ordered string-keyed map.
    Map(IndexMap<String, Value>),
}

impl Value {
    /// Returns `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` for `Int` and `Double`, the only kinds aggregates consume.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Int(_) | Self::Double(_))
    }

    /// Numeric view of the value, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::Double(v) => Some(*v),
            _ => None,
        }
    }

    /// Integer view of the value, if it is an `Int`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// String view of the value, if it is a `Str`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Look up a sub-field of a structured value.
    ///
    /// Maps are addressed by key; lists by the key parsed as a position.
    /// Scalars have no sub-fields.
    pub fn field(&self, key: &str) -> Option<&Value> {
        match self {
            Self::Map(map) => map.get(key),
            Self::List(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        }
    }

    /// Short lowercase name of the value's kind, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Double(_) => "double",
            Self::Str(_) => "string",
            Self::List(_) => "list",
            Self::Map(_) => "map",
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Bool(_) => 1,
            Self::Int(_) | Self::Double(_) => 2,
            Self::Str(_) => 3,
            Self::List(_) => 4,
            Self::Map(_) => 5,
        }
    }

    /// Total order used by sorting.
    ///
    /// Numerics compare by numeric value, with `Int` ordered before an
    /// equal `Double`. Other kinds order by kind first
    /// (`Null < Bool < numeric < Str < List < Map`), then by content.
    pub fn total_cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a.cmp(b),
            (Self::Double(a), Self::Double(b)) => a.total_cmp(b),
            (Self::Int(a), Self::Double(b)) => (*a as f64).total_cmp(b).then(Ordering::Less),
            (Self::Double(a), Self::Int(b)) => a.total_cmp(&(*b as f64)).then(Ordering::Greater),
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Str(a), Self::Str(b)) => a.cmp(b),
            (Self::List(a), Self::List(b)) => {
                for (x, y) in a.iter().zip(b.iter()) {
                    let ord = x.total_cmp(y);
                    if ord != Ordering::Equal {
                        return ord;
                    }
                }
                a.len().cmp(&b.len())
            }
            (Self::Map(a), Self::Map(b)) => {
                for ((ka, va), (kb, vb)) in a.iter().zip(b.iter()) {
                    let ord = ka.cmp(kb).then_with(|| va.total_cmp(vb));
                    if ord != Ordering::Equal {
                        return ord;
                    }
                }
                a.len().cmp(&b.len())
            }
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Double(v) => write!(f, "{v}"),
            Self::Str(s) => write!(f, "{s:?}"),
            Self::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Self::Map(map) => {
                write!(f, "{{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k:?}: {v}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u8> for Value {
    fn from(v: u8) -> Self {
        Self::Int(v as i64)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Double(v as f64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Self::List(v)
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(v: IndexMap<String, Value>) -> Self {
        Self::Map(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<Value>> FromIterator<T> for Value {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::List(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_view_covers_int_and_double_only() {
        assert_eq!(Value::from(4).as_f64(), Some(4.0));
        assert_eq!(Value::from(2.5).as_f64(), Some(2.5));
        assert_eq!(Value::from("4").as_f64(), None);
        assert!(!Value::Bool(true).is_numeric());
    }

    #[test]
    fn field_addresses_maps_and_lists() {
        let mut map = IndexMap::new();
        map.insert("age".to_string(), Value::from(31));
        let record = Value::Map(map);
        assert_eq!(record.field("age"), Some(&Value::Int(31)));
        assert_eq!(record.field("name"), None);

        let list: Value = [10, 20, 30].into_iter().collect();
        assert_eq!(list.field("1"), Some(&Value::Int(20)));
        assert_eq!(list.field("x"), None);
        assert_eq!(Value::from(5).field("0"), None);
    }

    #[test]
    fn int_sorts_before_equal_double() {
        assert_eq!(Value::Int(1).total_cmp(&Value::Double(1.0)), Ordering::Less);
        assert_eq!(
            Value::Double(1.0).total_cmp(&Value::Int(1)),
            Ordering::Greater
        );
        assert_eq!(Value::Int(2).total_cmp(&Value::Double(1.5)), Ordering::Greater);
    }

    #[test]
    fn kinds_order_by_rank() {
        let ordered = [
            Value::Null,
            Value::Bool(true),
            Value::Int(99),
            Value::from("a"),
            Value::List(vec![]),
            Value::Map(IndexMap::new()),
        ];
        for pair in ordered.windows(2) {
            assert_eq!(pair[0].total_cmp(&pair[1]), Ordering::Less);
        }
    }

    #[test]
    fn lists_compare_lexicographically() {
        let a: Value = [1, 2].into_iter().collect();
        let b: Value = [1, 2, 0].into_iter().collect();
        let c: Value = [1, 3].into_iter().collect();
        assert_eq!(a.total_cmp(&b), Ordering::Less);
        assert_eq!(b.total_cmp(&c), Ordering::Less);
    }

    #[test]
    fn option_none_becomes_null() {
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::from("x"));
    }

    #[test]
    fn display_renders_nested_values() {
        let v: Value = vec![Value::from(1), Value::from("a")].into();
        assert_eq!(v.to_string(), "[1, \"a\"]");
    }
}
