//! Field values as they appear in secondary indexes
//!
//! Ordering is deterministic: Null < Bool < Int < Float < String < Composite.

use std::fmt;

use serde_json::Value;

/// Index key representing one field value of a record.
///
/// Equality is per variant: `Int(1)` and `Float(1.0)` are different values,
/// and so are `String("123")` and `Int(123)`. Keys built from JSON never hold
/// an integral float, see [`IndexKey::from_json`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IndexKey {
    /// Missing or null value
    Null,
    /// Boolean value (false < true)
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Float value (stored as bits for total ordering)
    Float(u64),
    /// String value
    String(String),
    /// Array or object, stored as its compact JSON text
    Composite(String),
}

impl IndexKey {
    /// Create a key from a boolean
    pub fn from_bool(v: bool) -> Self {
        IndexKey::Bool(v)
    }

    /// Create a key from an integer
    pub fn from_int(v: i64) -> Self {
        IndexKey::Int(v)
    }

    /// Create a key from a float
    ///
    /// Uses bit representation for total ordering.
    pub fn from_float(v: f64) -> Self {
        let bits = v.to_bits();
        // Negative: flip all bits. Positive: flip sign bit.
        let ordered = if (bits >> 63) == 1 {
            !bits
        } else {
            bits ^ (1 << 63)
        };
        IndexKey::Float(ordered)
    }

    /// Create a key from a string
    pub fn from_string(v: impl Into<String>) -> Self {
        IndexKey::String(v.into())
    }

    /// Create a key from a JSON value.
    ///
    /// JSON has a single number type, so numbers are keyed by value rather
    /// than by spelling: `30`, `30.0` and `3e1` all become `Int(30)`, and
    /// `-0.0` becomes `Int(0)`. Only numbers with a fractional part or
    /// outside the `i64` range become `Float`. Arrays and objects become
    /// `Composite` so that every record still gets exactly one posting per
    /// indexed field.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => IndexKey::Null,
            Value::Bool(b) => IndexKey::from_bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => IndexKey::from_int(i),
                None => IndexKey::from_json_float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => IndexKey::from_string(s.as_str()),
            Value::Array(_) | Value::Object(_) => IndexKey::Composite(value.to_string()),
        }
    }

    fn from_json_float(v: f64) -> Self {
        // 2^63 itself does not fit in i64
        const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;
        if v.is_finite() && v.fract() == 0.0 && (-I64_BOUND..I64_BOUND).contains(&v) {
            IndexKey::from_int(v as i64)
        } else {
            IndexKey::from_float(v)
        }
    }

    /// Recover the float stored in a `Float` key.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            IndexKey::Float(ordered) => {
                let bits = if (ordered >> 63) == 1 {
                    ordered ^ (1 << 63)
                } else {
                    !ordered
                };
                Some(f64::from_bits(bits))
            }
            _ => None,
        }
    }

}

impl fmt::Display for IndexKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexKey::Null => write!(f, "null"),
            IndexKey::Bool(b) => write!(f, "{}", b),
            IndexKey::Int(i) => write!(f, "{}", i),
            IndexKey::Float(_) => write!(f, "{}", self.as_f64().unwrap_or(f64::NAN)),
            IndexKey::String(s) => write!(f, "{:?}", s),
            IndexKey::Composite(s) => write!(f, "{}", s),
        }
    }
}

impl From<bool> for IndexKey {
    fn from(v: bool) -> Self {
        IndexKey::from_bool(v)
    }
}

impl From<i64> for IndexKey {
    fn from(v: i64) -> Self {
        IndexKey::from_int(v)
    }
}

impl From<i32> for IndexKey {
    fn from(v: i32) -> Self {
        IndexKey::from_int(i64::from(v))
    }
}

impl From<u32> for IndexKey {
    fn from(v: u32) -> Self {
        IndexKey::from_int(i64::from(v))
    }
}

impl From<f64> for IndexKey {
    fn from(v: f64) -> Self {
        IndexKey::from_float(v)
    }
}

impl From<&str> for IndexKey {
    fn from(v: &str) -> Self {
        IndexKey::from_string(v)
    }
}

impl From<String> for IndexKey {
    fn from(v: String) -> Self {
        IndexKey::String(v)
    }
}

impl<T: Into<IndexKey>> From<Option<T>> for IndexKey {
    fn from(v: Option<T>) -> Self {
        v.map_or(IndexKey::Null, Into::into)
    }
}

impl From<&Value> for IndexKey {
    fn from(v: &Value) -> Self {
        IndexKey::from_json(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_key_ordering() {
        let keys = vec![
            IndexKey::Null,
            IndexKey::from_bool(false),
            IndexKey::from_bool(true),
            IndexKey::from_int(-100),
            IndexKey::from_int(0),
            IndexKey::from_int(100),
            IndexKey::from_float(-1.5),
            IndexKey::from_float(2.5),
            IndexKey::from_string("aaa"),
            IndexKey::from_string("zzz"),
        ];

        for i in 1..keys.len() {
            assert!(keys[i - 1] < keys[i], "Keys should be ordered");
        }
    }

    #[test]
    fn test_float_round_trips_through_ordered_bits() {
        for v in [-3.25, -0.5, 0.0, 1.0, 1e300] {
            assert_eq!(IndexKey::from_float(v).as_f64(), Some(v));
        }
    }

    #[test]
    fn test_from_json() {
        assert_eq!(IndexKey::from_json(&json!(null)), IndexKey::Null);
        assert_eq!(IndexKey::from_json(&json!(true)), IndexKey::Bool(true));
        assert_eq!(IndexKey::from_json(&json!(42)), IndexKey::Int(42));
        assert_eq!(
            IndexKey::from_json(&json!("hello")),
            IndexKey::String("hello".to_string())
        );
        assert_eq!(IndexKey::from_json(&json!(0.5)), IndexKey::from_float(0.5));
        assert_eq!(
            IndexKey::from_json(&json!([1, 2, 3])),
            IndexKey::Composite("[1,2,3]".to_string())
        );
    }

    #[test]
    fn test_from_json_normalises_numbers() {
        assert_eq!(IndexKey::from_json(&json!(30.0)), IndexKey::Int(30));
        assert_eq!(IndexKey::from_json(&json!(-0.0)), IndexKey::Int(0));
        assert_eq!(IndexKey::from_json(&json!(-0.0)), IndexKey::from_json(&json!(0.0)));
        assert_eq!(IndexKey::from_json(&json!(-7.0)), IndexKey::Int(-7));
        assert_eq!(IndexKey::from_json(&json!(2.5)), IndexKey::from_float(2.5));
        // Past i64::MAX stays a float
        assert_eq!(IndexKey::from_json(&json!(u64::MAX)), IndexKey::from_float(u64::MAX as f64));
    }

    #[test]
    fn test_string_and_number_are_distinct() {
        assert_ne!(IndexKey::from("123"), IndexKey::from(123));
        assert_ne!(IndexKey::from(1), IndexKey::from(1.0));
    }

    #[test]
    fn test_option_maps_none_to_null() {
        let missing: Option<&str> = None;
        assert_eq!(IndexKey::from(missing), IndexKey::Null);
        assert_eq!(IndexKey::from(Some(7)), IndexKey::Int(7));
    }
}
