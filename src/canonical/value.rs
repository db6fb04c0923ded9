//! Canonical Value Module
//!
//! Closed variant over the shapes structured tool input can take.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::Result;

// == Canonical Value ==
/// Structured tool input.
///
/// Mapping iteration order carries no meaning; the encoder sorts keys
/// before emitting them.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CanonicalValue {
    /// JSON-style null
    #[default]
    Null,
    /// Boolean
    Bool(bool),
    /// Signed integer
    Int(i64),
    /// Unsigned integer above `i64::MAX`
    UInt(u64),
    /// Floating-point number; must be finite to encode
    Float(f64),
    /// UTF-8 string
    String(String),
    /// Ordered sequence
    List(Vec<CanonicalValue>),
    /// String-keyed mapping
    Map(HashMap<String, CanonicalValue>),
}

impl CanonicalValue {
    /// Builds an empty mapping.
    pub fn map() -> Self {
        CanonicalValue::Map(HashMap::new())
    }

    /// Adds a field to a mapping.
    ///
    /// Called on any other variant, the existing value is discarded and
    /// replaced by a mapping holding only this field. Start chains from
    /// [`CanonicalValue::map`] or collect pairs with `FromIterator`.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<CanonicalValue>) -> Self {
        if !matches!(self, CanonicalValue::Map(_)) {
            self = CanonicalValue::map();
        }
        if let CanonicalValue::Map(fields) = &mut self {
            fields.insert(key.into(), value.into());
        }
        self
    }

    // == Serde Bridge ==
    /// Converts any serializable value through `serde_json`.
    ///
    /// Fails with `CacheError::Encoding` for shapes that have no structured
    /// data form, such as maps with non-string keys.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        let json = serde_json::to_value(value)?;
        Ok(CanonicalValue::from(json))
    }

    /// Renders back into a `serde_json::Value`.
    ///
    /// Returns `None` when a float is not finite, since JSON cannot hold it.
    pub fn to_json(&self) -> Option<serde_json::Value> {
        use serde_json::Value;

        Some(match self {
            CanonicalValue::Null => Value::Null,
            CanonicalValue::Bool(b) => Value::Bool(*b),
            CanonicalValue::Int(i) => Value::from(*i),
            CanonicalValue::UInt(u) => Value::from(*u),
            CanonicalValue::Float(f) => Value::Number(serde_json::Number::from_f64(*f)?),
            CanonicalValue::String(s) => Value::String(s.clone()),
            CanonicalValue::List(items) => Value::Array(
                items
                    .iter()
                    .map(CanonicalValue::to_json)
                    .collect::<Option<Vec<_>>>()?,
            ),
            CanonicalValue::Map(fields) => {
                let mut out = serde_json::Map::new();
                for (k, v) in fields {
                    out.insert(k.clone(), v.to_json()?);
                }
                Value::Object(out)
            }
        })
    }

    // == Accessors ==
    pub fn is_null(&self) -> bool {
        matches!(self, CanonicalValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CanonicalValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CanonicalValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CanonicalValue::Int(i) => Some(*i),
            CanonicalValue::UInt(u) => i64::try_from(*u).ok(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CanonicalValue::Int(i) => Some(*i as f64),
            CanonicalValue::UInt(u) => Some(*u as f64),
            CanonicalValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Looks up a field of a mapping.
    pub fn get(&self, key: &str) -> Option<&CanonicalValue> {
        match self {
            CanonicalValue::Map(fields) => fields.get(key),
            _ => None,
        }
    }

    /// Looks up an element of a sequence.
    pub fn index(&self, i: usize) -> Option<&CanonicalValue> {
        match self {
            CanonicalValue::List(items) => items.get(i),
            _ => None,
        }
    }
}

// == Conversions ==
impl From<serde_json::Value> for CanonicalValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => CanonicalValue::Null,
            Value::Bool(b) => CanonicalValue::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    CanonicalValue::Int(i)
                } else if let Some(u) = n.as_u64() {
                    CanonicalValue::UInt(u)
                } else {
                    // serde_json numbers are always one of the three
                    CanonicalValue::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => CanonicalValue::String(s),
            Value::Array(items) => {
                CanonicalValue::List(items.into_iter().map(CanonicalValue::from).collect())
            }
            Value::Object(fields) => CanonicalValue::Map(
                fields
                    .into_iter()
                    .map(|(k, v)| (k, CanonicalValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&serde_json::Value> for CanonicalValue {
    fn from(value: &serde_json::Value) -> Self {
        CanonicalValue::from(value.clone())
    }
}

impl From<bool> for CanonicalValue {
    fn from(b: bool) -> Self {
        CanonicalValue::Bool(b)
    }
}

macro_rules! from_integer {
    ($($t:ty),*) => {
        $(impl From<$t> for CanonicalValue {
            fn from(n: $t) -> Self {
                CanonicalValue::Int(i64::from(n))
            }
        })*
    };
}

from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for CanonicalValue {
    fn from(n: u64) -> Self {
        i64::try_from(n).map_or(CanonicalValue::UInt(n), CanonicalValue::Int)
    }
}

impl From<usize> for CanonicalValue {
    fn from(n: usize) -> Self {
        CanonicalValue::from(n as u64)
    }
}

impl From<f64> for CanonicalValue {
    fn from(f: f64) -> Self {
        CanonicalValue::Float(f)
    }
}

impl From<f32> for CanonicalValue {
    fn from(f: f32) -> Self {
        CanonicalValue::Float(f64::from(f))
    }
}

impl From<&str> for CanonicalValue {
    fn from(s: &str) -> Self {
        CanonicalValue::String(s.to_string())
    }
}

impl From<String> for CanonicalValue {
    fn from(s: String) -> Self {
        CanonicalValue::String(s)
    }
}

impl<T: Into<CanonicalValue>> From<Vec<T>> for CanonicalValue {
    fn from(items: Vec<T>) -> Self {
        CanonicalValue::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<CanonicalValue>> From<HashMap<String, T>> for CanonicalValue {
    fn from(fields: HashMap<String, T>) -> Self {
        CanonicalValue::Map(fields.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl<T: Into<CanonicalValue>> From<Option<T>> for CanonicalValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(CanonicalValue::Null, Into::into)
    }
}

impl<K: Into<String>, V: Into<CanonicalValue>> FromIterator<(K, V)> for CanonicalValue {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        CanonicalValue::Map(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CacheError;
    use serde_json::json;
    use std::collections::BTreeMap;

    #[test]
    fn test_from_json_numbers() {
        assert_eq!(CanonicalValue::from(json!(7)), CanonicalValue::Int(7));
        assert_eq!(CanonicalValue::from(json!(-7)), CanonicalValue::Int(-7));
        assert_eq!(
            CanonicalValue::from(json!(u64::MAX)),
            CanonicalValue::UInt(u64::MAX)
        );
        assert_eq!(CanonicalValue::from(json!(1.5)), CanonicalValue::Float(1.5));
    }

    #[test]
    fn test_from_json_nested() {
        let value = CanonicalValue::from(json!({"path": "/tmp", "flags": [true, null]}));

        assert_eq!(value.get("path").and_then(CanonicalValue::as_str), Some("/tmp"));
        let flags = value.get("flags").unwrap();
        assert_eq!(flags.index(0).and_then(CanonicalValue::as_bool), Some(true));
        assert!(flags.index(1).unwrap().is_null());
        assert!(flags.index(2).is_none());
    }

    #[test]
    fn test_with_builder() {
        let value = CanonicalValue::map().with("a", 1).with("b", "two");

        assert_eq!(value.get("a").and_then(CanonicalValue::as_i64), Some(1));
        assert_eq!(value.get("b").and_then(CanonicalValue::as_str), Some("two"));
    }

    #[test]
    fn test_with_on_scalar_becomes_map() {
        let value = CanonicalValue::Int(3).with("x", true);
        assert_eq!(value.get("x").and_then(CanonicalValue::as_bool), Some(true));

        // The scalar is dropped, not kept under some field
        assert_eq!(value, CanonicalValue::map().with("x", true));
        assert!(value.as_i64().is_none());
    }

    #[test]
    fn test_from_serialize_struct() {
        #[derive(Serialize)]
        struct ReadFile {
            path: String,
            limit: u32,
        }

        let value = CanonicalValue::from_serialize(&ReadFile {
            path: "/etc/hosts".to_string(),
            limit: 10,
        })
        .unwrap();

        assert_eq!(value.get("path").and_then(CanonicalValue::as_str), Some("/etc/hosts"));
        assert_eq!(value.get("limit").and_then(CanonicalValue::as_i64), Some(10));
    }

    #[test]
    fn test_from_serialize_rejects_non_string_keys() {
        let mut map = BTreeMap::new();
        map.insert(vec![1u8], "x");

        let result = CanonicalValue::from_serialize(&map);
        assert!(matches!(result, Err(CacheError::Encoding(_))));
    }

    #[test]
    fn test_to_json_round_trip() {
        let source = json!({"a": [1, 2.5, "s"], "b": {"c": null}});
        let value = CanonicalValue::from(&source);
        assert_eq!(value.to_json(), Some(source));
    }

    #[test]
    fn test_to_json_non_finite() {
        assert_eq!(CanonicalValue::Float(f64::NAN).to_json(), None);
    }

    #[test]
    fn test_as_f64_widens_integers() {
        assert_eq!(CanonicalValue::Int(2).as_f64(), Some(2.0));
        assert_eq!(CanonicalValue::UInt(3).as_f64(), Some(3.0));
        assert_eq!(CanonicalValue::String("x".into()).as_f64(), None);
    }

    #[test]
    fn test_from_option_and_iter() {
        assert!(CanonicalValue::from(None::<i32>).is_null());
        let value: CanonicalValue = vec![("k", 1)].into_iter().collect();
        assert_eq!(value.get("k").and_then(CanonicalValue::as_i64), Some(1));
    }
}
