//! Generic values for data that has no typed home

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Insertion-ordered map of field name to generic value
pub type ValueMap = IndexMap<String, Value>;

/// A schema-less value mirroring the JSON data model
///
/// Leftover source data degrades to this form: scalars stay scalars,
/// collections become [`Value::List`] and records become [`Value::Map`].
/// Dates, times, UUIDs and enum constants are carried as strings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Null/absent value
    #[default]
    Null,

    /// Boolean value
    Bool(bool),

    /// Integer value
    Integer(i64),

    /// Decimal value
    Decimal(f64),

    /// String value (also dates, UUIDs and enum constants)
    String(String),

    /// Ordered sequence
    List(Vec<Value>),

    /// Nested record or string-keyed map
    Map(ValueMap),
}

impl Value {
    /// Convert a scalar value to string
    pub fn as_string(&self) -> Option<String> {
        match self {
            Value::String(s) => Some(s.clone()),
            Value::Integer(i) => Some(i.to_string()),
            Value::Decimal(d) => Some(d.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null | Value::List(_) | Value::Map(_) => None,
        }
    }

    /// Borrow the string payload
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow the map payload
    pub fn as_map(&self) -> Option<&ValueMap> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Borrow the list payload
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Look up a key when this value is a map
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map().and_then(|map| map.get(key))
    }

    /// Check if value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if value is a scalar (neither list nor map)
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Value::List(_) | Value::Map(_))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Decimal(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<ValueMap> for Value {
    fn from(map: ValueMap) -> Self {
        Value::Map(map)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_address() -> Value {
        let mut address = ValueMap::new();
        address.insert("street".to_string(), Value::from("111 Merge Lane"));
        address.insert("city".to_string(), Value::from("MergeCity"));
        address.insert("zip".to_string(), Value::Null);
        Value::Map(address)
    }

    #[test]
    fn test_as_string_scalars() {
        assert_eq!(Value::from("abc").as_string(), Some("abc".to_string()));
        assert_eq!(Value::Integer(42).as_string(), Some("42".to_string()));
        assert_eq!(Value::Bool(true).as_string(), Some("true".to_string()));
        assert_eq!(Value::Null.as_string(), None);
        assert_eq!(Value::List(vec![]).as_string(), None);
    }

    #[test]
    fn test_map_accessors() {
        let address = sample_address();

        assert_eq!(address.get("city"), Some(&Value::from("MergeCity")));
        assert!(address.get("zip").unwrap().is_null());
        assert!(address.get("missing").is_none());
        assert!(Value::from("x").get("city").is_none());
        assert!(!address.is_scalar());
    }

    #[test]
    fn test_serializes_as_plain_json() {
        let mut root = ValueMap::new();
        root.insert("id".to_string(), Value::from("EMP-1"));
        root.insert("active".to_string(), Value::Bool(true));
        root.insert("addresses".to_string(), Value::List(vec![sample_address()]));

        let json = serde_json::to_value(Value::Map(root)).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "id": "EMP-1",
                "active": true,
                "addresses": [
                    { "street": "111 Merge Lane", "city": "MergeCity", "zip": null }
                ]
            })
        );
    }

    #[test]
    fn test_map_preserves_insertion_order() {
        let mut map = ValueMap::new();
        map.insert("zeta".to_string(), Value::Integer(1));
        map.insert("alpha".to_string(), Value::Integer(2));

        let text = serde_json::to_string(&Value::Map(map)).unwrap();
        assert_eq!(text, r#"{"zeta":1,"alpha":2}"#);
    }

    #[test]
    fn test_from_option() {
        assert_eq!(Value::from(None::<String>), Value::Null);
        assert_eq!(Value::from(Some(7_i64)), Value::Integer(7));
    }
}
