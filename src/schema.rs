//! Schema representations.
//!
//! This module provides both an abstract ([`Schema`](enum.Schema.html)) and a
//! serializable/deserializable ([`SerdeSchema`](../serde/enum.SerdeSchema.html))
//! representation of schemas.

use crate::errors::ShapeError;
use crate::serde::{SerdeKeywords, SerdeSchema};
use crate::value::{serialize_number, Value};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An immutable description of the shape a value is expected to take.
///
/// Schemas hold no behavior of their own. Validation, coercion and
/// explanation are performed by the functions in
/// [`validator`](../validator/index.html), which match on every variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    /// Matches any value whose runtime tag is the primitive's name.
    Primitive(Primitive),

    /// Matches a single exact scalar value.
    ///
    /// The keyword only decides how the schema is spelled on the wire
    /// (`{"literal": ..}` or `{"match": ..}`); both behave identically.
    Literal { value: Scalar, keyword: Keyword },

    /// Matches object values whose members satisfy their respective schemas.
    ///
    /// Members are kept in declaration order, which is the order explanations
    /// report them in. Members of the value not mentioned here are ignored.
    Object(IndexMap<String, Member>),

    /// Matches values satisfying at least one of the alternatives.
    OneOf(Vec<Schema>),

    /// Matches values satisfying every one of the members.
    AllOf(Vec<Schema>),

    /// Matches arrays whose every element satisfies the inner schema.
    ArrayOf(Box<Schema>),
}

impl Schema {
    pub fn is_primitive(&self) -> bool {
        matches!(self, Schema::Primitive(_))
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Schema::Literal { .. })
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Schema::Object(_))
    }

    pub fn is_one_of(&self) -> bool {
        matches!(self, Schema::OneOf(_))
    }

    pub fn is_all_of(&self) -> bool {
        matches!(self, Schema::AllOf(_))
    }

    pub fn is_array_of(&self) -> bool {
        matches!(self, Schema::ArrayOf(_))
    }

    /// Construct a schema from its wire form.
    ///
    /// This is where malformed schemas are caught. Once a `Schema` exists,
    /// every traversal over it is total.
    pub fn from_serde(serde_schema: SerdeSchema) -> Result<Schema, ShapeError> {
        let result = Self::build(serde_schema);
        if let Err(ref err) = result {
            tracing::debug!(error = %err, "rejected schema");
        }

        result
    }

    fn build(serde_schema: SerdeSchema) -> Result<Schema, ShapeError> {
        match serde_schema {
            SerdeSchema::Primitive(name) => Primitive::from_name(&name).map(Schema::Primitive),
            SerdeSchema::Keyword(keywords) => Self::from_keywords(keywords),
        }
    }

    fn from_keywords(keywords: SerdeKeywords) -> Result<Schema, ShapeError> {
        if let Some(keyword) = keywords.extra.keys().next() {
            return Err(ShapeError::UnknownKeyword {
                keyword: keyword.clone(),
            });
        }

        let SerdeKeywords {
            literal,
            mtch,
            object,
            one_of,
            all_of,
            array_of,
            ..
        } = keywords;

        let present = [
            literal.is_some(),
            mtch.is_some(),
            object.is_some(),
            one_of.is_some(),
            all_of.is_some(),
            array_of.is_some(),
        ]
        .iter()
        .filter(|present| **present)
        .count();

        if present != 1 {
            return Err(ShapeError::InvalidForm);
        }

        if let Some(value) = literal {
            return Ok(Schema::Literal {
                value: Scalar::try_from(value)?,
                keyword: Keyword::Literal,
            });
        }

        if let Some(value) = mtch {
            return Ok(Schema::Literal {
                value: Scalar::try_from(value)?,
                keyword: Keyword::Match,
            });
        }

        if let Some(shape) = object {
            let mut members = IndexMap::with_capacity(shape.len());
            for (name, sub_schema) in shape {
                let (key, required) = match name.strip_suffix('?') {
                    Some(key) => (key.to_owned(), false),
                    None => (name, true),
                };

                if members.contains_key(&key) {
                    return Err(ShapeError::AmbiguousMember { member: key });
                }

                let schema = Self::build(sub_schema)?;
                members.insert(key, Member { schema, required });
            }

            return Ok(Schema::Object(members));
        }

        if let Some(alternatives) = one_of {
            return Ok(Schema::OneOf(Self::from_serde_all(alternatives)?));
        }

        if let Some(members) = all_of {
            return Ok(Schema::AllOf(Self::from_serde_all(members)?));
        }

        match array_of {
            Some(inner) => Ok(Schema::ArrayOf(Box::new(Self::build(*inner)?))),
            None => Err(ShapeError::InvalidForm),
        }
    }

    fn from_serde_all(schemas: Vec<SerdeSchema>) -> Result<Vec<Schema>, ShapeError> {
        schemas.into_iter().map(Self::build).collect()
    }

    /// Convert this schema into its wire form.
    ///
    /// Fails for schemas the wire form cannot spell: a required member whose
    /// key ends in `?` would read back as optional, and a non-finite number
    /// literal has no JSON representation.
    pub fn to_serde(&self) -> Result<SerdeSchema, ShapeError> {
        let keywords = match self {
            Schema::Primitive(primitive) => {
                return Ok(SerdeSchema::Primitive(primitive.name().to_owned()))
            }
            Schema::Literal { value, keyword } => {
                let value = Some(value.to_json()?);
                match keyword {
                    Keyword::Literal => SerdeKeywords {
                        literal: value,
                        ..SerdeKeywords::default()
                    },
                    Keyword::Match => SerdeKeywords {
                        mtch: value,
                        ..SerdeKeywords::default()
                    },
                }
            }
            Schema::Object(members) => {
                let mut shape = IndexMap::with_capacity(members.len());
                for (key, member) in members {
                    let name = if !member.required {
                        format!("{}?", key)
                    } else if key.ends_with('?') {
                        return Err(ShapeError::AmbiguousMember {
                            member: key.clone(),
                        });
                    } else {
                        key.clone()
                    };

                    shape.insert(name, member.schema.to_serde()?);
                }

                SerdeKeywords {
                    object: Some(shape),
                    ..SerdeKeywords::default()
                }
            }
            Schema::OneOf(alternatives) => SerdeKeywords {
                one_of: Some(Self::to_serde_all(alternatives)?),
                ..SerdeKeywords::default()
            },
            Schema::AllOf(members) => SerdeKeywords {
                all_of: Some(Self::to_serde_all(members)?),
                ..SerdeKeywords::default()
            },
            Schema::ArrayOf(inner) => SerdeKeywords {
                array_of: Some(Box::new(inner.to_serde()?)),
                ..SerdeKeywords::default()
            },
        };

        Ok(SerdeSchema::Keyword(keywords))
    }

    fn to_serde_all(schemas: &[Schema]) -> Result<Vec<SerdeSchema>, ShapeError> {
        schemas.iter().map(Schema::to_serde).collect()
    }
}

impl Serialize for Schema {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_serde()
            .map_err(<S::Error as serde::ser::Error>::custom)?
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Schema {
    fn deserialize<D>(deserializer: D) -> Result<Schema, D::Error>
    where
        D: Deserializer<'de>,
    {
        let serde_schema = SerdeSchema::deserialize(deserializer)?;
        Schema::from_serde(serde_schema).map_err(serde::de::Error::custom)
    }
}

/// The runtime tags a primitive schema may check for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    String,
    Boolean,
    Number,
    Null,
}

impl Primitive {
    /// The name of the primitive, as it appears on the wire.
    pub fn name(self) -> &'static str {
        match self {
            Primitive::String => "string",
            Primitive::Boolean => "boolean",
            Primitive::Number => "number",
            Primitive::Null => "null",
        }
    }

    fn from_name(name: &str) -> Result<Primitive, ShapeError> {
        match name {
            "string" => Ok(Primitive::String),
            "boolean" => Ok(Primitive::Boolean),
            "number" => Ok(Primitive::Number),
            "null" => Ok(Primitive::Null),
            _ => Err(ShapeError::UnknownPrimitive {
                name: name.to_owned(),
            }),
        }
    }

    /// Does the value carry this primitive's runtime tag?
    ///
    /// No conversion is attempted: `"12"` is not a number.
    pub fn accepts(self, value: &Value) -> bool {
        match self {
            Primitive::String => matches!(value, Value::String(_)),
            Primitive::Boolean => matches!(value, Value::Bool(_)),
            Primitive::Number => matches!(value, Value::Number(_)),
            Primitive::Null => matches!(value, Value::Null),
        }
    }
}

/// The spelling of a literal schema on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Literal,
    Match,
}

/// A single exact value a literal schema matches.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    String(String),
    Number(f64),
    Bool(bool),
    BigInt(i64),
}

impl Scalar {
    /// Strict equality against a value.
    ///
    /// Kinds never compare equal across each other (`1` is not `BigInt(1)`),
    /// and `NaN` matches nothing.
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (Scalar::String(expected), Value::String(actual)) => expected == actual,
            (Scalar::Number(expected), Value::Number(actual)) => expected == actual,
            (Scalar::Bool(expected), Value::Bool(actual)) => expected == actual,
            (Scalar::BigInt(expected), Value::BigInt(actual)) => expected == actual,
            _ => false,
        }
    }

    fn to_json(&self) -> Result<serde_json::Value, ShapeError> {
        match self {
            Scalar::String(s) => Ok(serde_json::Value::String(s.clone())),
            Scalar::Number(n) if n.is_finite() => {
                serde_json::to_value(Number(*n)).map_err(|_| ShapeError::InvalidLiteral)
            }
            Scalar::Number(_) => Err(ShapeError::InvalidLiteral),
            Scalar::Bool(b) => Ok(serde_json::Value::Bool(*b)),
            Scalar::BigInt(n) => {
                let mut tagged = serde_json::Map::with_capacity(1);
                tagged.insert(BIGINT.to_owned(), serde_json::Value::from(*n));
                Ok(serde_json::Value::Object(tagged))
            }
        }
    }
}

// JSON numbers read back as `Scalar::Number`, so bigint literals are spelled
// `{"bigint": 10}`.
const BIGINT: &str = "bigint";

// Routes a plain number through the JSON text rules for numbers.
struct Number(f64);

impl Serialize for Number {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serialize_number(self.0, serializer)
    }
}

impl TryFrom<serde_json::Value> for Scalar {
    type Error = ShapeError;

    fn try_from(value: serde_json::Value) -> Result<Scalar, ShapeError> {
        match value {
            serde_json::Value::String(s) => Ok(Scalar::String(s)),
            serde_json::Value::Bool(b) => Ok(Scalar::Bool(b)),
            serde_json::Value::Number(n) => n
                .as_f64()
                .map(Scalar::Number)
                .ok_or(ShapeError::InvalidLiteral),
            serde_json::Value::Object(tagged) if tagged.len() == 1 => tagged
                .get(BIGINT)
                .and_then(serde_json::Value::as_i64)
                .map(Scalar::BigInt)
                .ok_or(ShapeError::InvalidLiteral),
            _ => Err(ShapeError::InvalidLiteral),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::String(s.to_owned())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::String(s)
    }
}

impl From<f64> for Scalar {
    fn from(n: f64) -> Self {
        Scalar::Number(n)
    }
}

impl From<i32> for Scalar {
    fn from(n: i32) -> Self {
        Scalar::Number(f64::from(n))
    }
}

/// Wide integers are bigints: `Scalar::from(10i64)` matches
/// `Value::BigInt(10)`, never the number `10`.
impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Scalar::BigInt(n)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

/// A member of an object schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub schema: Schema,

    /// Optional members accept an absent key, or a key holding `Undefined`,
    /// without consulting `schema`.
    pub required: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn parse(json: serde_json::Value) -> Result<Schema, ShapeError> {
        let serde_schema: SerdeSchema = serde_json::from_value(json).expect("failed to parse json");
        Schema::from_serde(serde_schema)
    }

    #[test]
    fn parses_every_form() {
        let schema = parse(json!({
            "object": {
                "name": "string",
                "nick?": { "oneOf": ["string", "null"] },
                "kind": { "literal": "user" },
                "age": { "allOf": ["number", { "match": 3 }] },
                "flags": { "arrayOf": "boolean" },
            }
        }))
        .expect("valid schema");

        let mut members = IndexMap::new();
        let required = |schema| Member {
            schema,
            required: true,
        };
        members.insert("name".to_owned(), required(Schema::Primitive(Primitive::String)));
        members.insert(
            "nick".to_owned(),
            Member {
                schema: Schema::OneOf(vec![
                    Schema::Primitive(Primitive::String),
                    Schema::Primitive(Primitive::Null),
                ]),
                required: false,
            },
        );
        members.insert(
            "kind".to_owned(),
            required(Schema::Literal {
                value: Scalar::from("user"),
                keyword: Keyword::Literal,
            }),
        );
        members.insert(
            "age".to_owned(),
            required(Schema::AllOf(vec![
                Schema::Primitive(Primitive::Number),
                Schema::Literal {
                    value: Scalar::Number(3.0),
                    keyword: Keyword::Match,
                },
            ])),
        );
        members.insert(
            "flags".to_owned(),
            required(Schema::ArrayOf(Box::new(Schema::Primitive(Primitive::Boolean)))),
        );

        assert_eq!(schema, Schema::Object(members));
    }

    #[test]
    fn wire_form_is_stable() {
        let wire = json!({
            "object": {
                "x?": "string",
                "y": { "arrayOf": { "match": 2 } },
                "z": { "oneOf": [{ "literal": "a" }, { "literal": true }] },
            }
        });

        let schema = parse(wire.clone()).expect("valid schema");
        assert_eq!(serde_json::to_value(&schema).expect("serialize"), wire);
    }

    #[test]
    fn rejects_malformed_schemas() {
        assert_eq!(
            parse(json!("text")),
            Err(ShapeError::UnknownPrimitive {
                name: "text".to_owned()
            })
        );
        assert_eq!(parse(json!({})), Err(ShapeError::InvalidForm));
        assert_eq!(
            parse(json!({ "literal": "a", "arrayOf": "string" })),
            Err(ShapeError::InvalidForm)
        );
        assert_eq!(
            parse(json!({ "arrayOf": "string", "minItems": 1 })),
            Err(ShapeError::UnknownKeyword {
                keyword: "minItems".to_owned()
            })
        );
        assert_eq!(
            parse(json!({ "literal": [1, 2] })),
            Err(ShapeError::InvalidLiteral)
        );
        assert_eq!(
            parse(json!({ "object": { "a": "string", "a?": "number" } })),
            Err(ShapeError::AmbiguousMember {
                member: "a".to_owned()
            })
        );
        assert_eq!(
            parse(json!({ "oneOf": ["string", "bigint"] })),
            Err(ShapeError::UnknownPrimitive {
                name: "bigint".to_owned()
            })
        );
    }

    #[test]
    fn deserialize_reports_schema_errors() {
        let err = serde_json::from_value::<Schema>(json!({ "arrayOf": "text" }))
            .expect_err("unknown primitive");
        assert_eq!(err.to_string(), "unknown primitive: text");
    }

    #[test]
    fn bigint_literals_survive_the_wire() {
        let schema = Schema::Literal {
            value: Scalar::BigInt(10),
            keyword: Keyword::Match,
        };

        let wire = serde_json::to_value(&schema).expect("serialize");
        assert_eq!(wire, json!({ "match": { "bigint": 10 } }));

        let back: Schema = serde_json::from_value(wire).expect("deserialize");
        assert_eq!(back, schema);
        assert!(matches!(
            back,
            Schema::Literal { ref value, .. } if value.matches(&Value::BigInt(10))
        ));

        assert_eq!(
            parse(json!({ "literal": 10 })),
            Ok(Schema::Literal {
                value: Scalar::Number(10.0),
                keyword: Keyword::Literal,
            })
        );
        assert_eq!(
            parse(json!({ "literal": { "bigint": 1.5 } })),
            Err(ShapeError::InvalidLiteral)
        );
        assert_eq!(
            parse(json!({ "literal": { "bigint": 1, "extra": 2 } })),
            Err(ShapeError::InvalidLiteral)
        );
    }

    #[test]
    fn unspellable_schemas_fail_to_serialize() {
        let mut members = IndexMap::new();
        members.insert(
            "a?".to_owned(),
            Member {
                schema: Schema::Primitive(Primitive::Number),
                required: true,
            },
        );
        let schema = Schema::Object(members);

        assert_eq!(
            schema.to_serde(),
            Err(ShapeError::AmbiguousMember {
                member: "a?".to_owned()
            })
        );
        assert!(serde_json::to_value(&schema).is_err());

        let infinite = Schema::Literal {
            value: Scalar::Number(f64::INFINITY),
            keyword: Keyword::Literal,
        };
        assert_eq!(infinite.to_serde(), Err(ShapeError::InvalidLiteral));
    }

    #[test]
    fn optional_keys_ending_in_question_mark_round_trip() {
        let mut members = IndexMap::new();
        members.insert(
            "a?".to_owned(),
            Member {
                schema: Schema::Primitive(Primitive::Number),
                required: false,
            },
        );
        let schema = Schema::Object(members);

        let wire = serde_json::to_value(&schema).expect("serialize");
        assert_eq!(wire, json!({ "object": { "a??": "number" } }));
        assert_eq!(parse(wire), Ok(schema));
    }

    #[test]
    fn primitive_accepts_by_tag_only() {
        assert!(Primitive::Boolean.accepts(&Value::from(false)));
        assert!(!Primitive::Boolean.accepts(&Value::from(json!([true]))));
        assert!(!Primitive::String.accepts(&Value::from(json!({}))));
        assert!(Primitive::String.accepts(&Value::from("12")));
        assert!(!Primitive::Number.accepts(&Value::from("12")));
        assert!(!Primitive::Number.accepts(&Value::BigInt(12)));
        assert!(Primitive::Null.accepts(&Value::Null));
        assert!(!Primitive::Null.accepts(&Value::Undefined));
    }

    #[test]
    fn scalar_matches_strictly() {
        assert!(Scalar::from(1).matches(&Value::from(1.0)));
        assert!(!Scalar::from(1).matches(&Value::BigInt(1)));
        assert!(!Scalar::from("1").matches(&Value::from(1)));
        assert!(!Scalar::Number(f64::NAN).matches(&Value::Number(f64::NAN)));
        assert!(Scalar::BigInt(9).matches(&Value::BigInt(9)));
        assert_eq!(Scalar::from(9i64), Scalar::BigInt(9));
        assert_eq!(Scalar::from(9), Scalar::Number(9.0));
    }

    #[test]
    fn predicates() {
        let schema = Schema::ArrayOf(Box::new(Schema::Primitive(Primitive::Null)));
        assert!(schema.is_array_of());
        assert!(!schema.is_object());
        assert!(!schema.is_primitive());
        assert!(Schema::OneOf(vec![]).is_one_of());
        assert!(Schema::AllOf(vec![]).is_all_of());
    }
}
