//! Dynamically-typed input values.
//!
//! `serde_json::Value` cannot say "this member is present but undefined", and
//! it cannot tell a bigint apart from a number. Schemas need both distinctions,
//! so this module carries its own value type and converts from `serde_json`.

use indexmap::IndexMap;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// The members of an object value, in insertion order.
pub type Map = IndexMap<String, Value>;

/// A dynamically-typed value, as produced by decoding JSON-like data.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The absence of a value. Object members holding `Undefined` count as
    /// absent for optional members.
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    /// An integer kept apart from ordinary numbers. Never produced from JSON.
    BigInt(i64),
    String(String),
    Array(Vec<Value>),
    Object(Map),
}

impl Value {
    /// The runtime tag of this value.
    ///
    /// Primitive schemas match by comparing their name against this tag.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::BigInt(_) => "bigint",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Value::Object(fields) => Some(fields),
            _ => None,
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => n.as_f64().map_or(Value::Null, Value::Number),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(fields) => Value::Object(
                fields
                    .into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Map> for Value {
    fn from(fields: Map) -> Self {
        Value::Object(fields)
    }
}

/// Writes a number the way JSON text does: integral values without a
/// fraction, non-finite values as `null`.
pub(crate) fn serialize_number<S>(n: f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    // Bounds are -2^63, 2^63 and 2^64, all exact as f64.
    if !n.is_finite() {
        serializer.serialize_unit()
    } else if n.fract() != 0.0 {
        serializer.serialize_f64(n)
    } else if n >= i64::MIN as f64 && n < i64::MAX as f64 {
        serializer.serialize_i64(n as i64)
    } else if n > 0.0 && n < u64::MAX as f64 {
        serializer.serialize_u64(n as u64)
    } else {
        serializer.serialize_f64(n)
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Undefined | Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => serialize_number(*n, serializer),
            Value::BigInt(n) => serializer.serialize_i64(*n),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) => items.serialize(serializer),
            Value::Object(fields) => {
                let len = fields.values().filter(|v| !v.is_undefined()).count();
                let mut map = serializer.serialize_map(Some(len))?;
                for (key, value) in fields {
                    // JSON text has no undefined; the member is dropped.
                    if !value.is_undefined() {
                        map.serialize_entry(key, value)?;
                    }
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        serde_json::Value::deserialize(deserializer).map(Value::from)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_undefined() {
            return f.write_str("undefined");
        }

        match serde_json::to_string(self) {
            Ok(s) => f.write_str(&s),
            Err(_) => Err(fmt::Error),
        }
    }
}
