//! A serialization/deserialization-friendly representation of schemas.
//!
//! This is the format schemas take inside explanations (`isNot`), and the
//! format schemas may be loaded from. It does not enforce the rules about how
//! schemas are formed; convert into a [`Schema`](../schema/enum.Schema.html)
//! with `Schema::from_serde` for that.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A schema as it appears on the wire.
///
/// Primitives are bare strings (`"string"`). Every other schema is an object
/// holding a single keyword.
#[derive(Debug, PartialEq, Deserialize, Serialize, Clone)]
#[serde(untagged)]
pub enum SerdeSchema {
    Primitive(String),
    Keyword(SerdeKeywords),
}

/// The keyword form of a [`SerdeSchema`](enum.SerdeSchema.html).
///
/// Object member names ending in `?` mark optional members. Literals are
/// JSON strings, numbers or booleans, and bigints are spelled `{"bigint": 10}`.
#[derive(Debug, PartialEq, Deserialize, Serialize, Default, Clone)]
pub struct SerdeKeywords {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub literal: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(rename = "match")]
    pub mtch: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub object: Option<IndexMap<String, SerdeSchema>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(rename = "oneOf")]
    pub one_of: Option<Vec<SerdeSchema>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(rename = "allOf")]
    pub all_of: Option<Vec<SerdeSchema>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(rename = "arrayOf")]
    pub array_of: Option<Box<SerdeSchema>>,

    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}
