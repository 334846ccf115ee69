//! Diagnostics describing why a value does not match a schema.
//!
//! An [`Explanation`](struct.Explanation.html) is a tree mirroring the schema:
//! every node names the value and the schema that rejected it, and `since`
//! lists the reasons found underneath. The serialized form of this tree is the
//! wire format consumers depend on:
//!
//! ```text
//! { value, isNot, since? }
//! { atKey, value, isNot, since? }
//! { missingKey }
//! ```
//!
//! For reports that do not need the tree, [`Explanation::failures`] flattens it
//! into a list of [`Failure`](struct.Failure.html)s addressed by JSON Pointer.

use crate::schema::Schema;
use crate::value::Value;
use json_pointer::JsonPointer;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::borrow::Cow;
use std::fmt;

/// Why a value failed a schema.
///
/// Explanations borrow from both the schema and the value they describe; no
/// part of the input is copied.
#[derive(Debug, Clone, PartialEq)]
pub struct Explanation<'a> {
    value: &'a Value,
    is_not: &'a Schema,
    since: Option<Vec<Cause<'a>>>,
}

impl<'a> Explanation<'a> {
    /// An explanation with no further reasons: the value itself is the wrong
    /// kind of thing.
    pub(crate) fn new(value: &'a Value, is_not: &'a Schema) -> Self {
        Explanation {
            value,
            is_not,
            since: None,
        }
    }

    pub(crate) fn with_causes(value: &'a Value, is_not: &'a Schema, since: Vec<Cause<'a>>) -> Self {
        Explanation {
            value,
            is_not,
            since: Some(since),
        }
    }

    /// The value which was rejected.
    pub fn value(&self) -> &'a Value {
        self.value
    }

    /// The schema which rejected the value.
    pub fn is_not(&self) -> &'a Schema {
        self.is_not
    }

    /// The reasons the value was rejected, if the schema looked inside it.
    pub fn since(&self) -> Option<&[Cause<'a>]> {
        self.since.as_deref()
    }

    /// Flatten this explanation into every individual failure, in the order
    /// they were found.
    pub fn failures(&self) -> Vec<Failure<'a>> {
        let mut failures = Vec::new();
        self.collect(&mut Vec::new(), &mut failures);
        failures
    }

    fn collect(&self, path: &mut Vec<Cow<'a, str>>, out: &mut Vec<Failure<'a>>) {
        let since = match self.since {
            Some(ref since) => since,
            None => {
                out.push(Failure {
                    instance_path: JsonPointer::new(path.clone()),
                    kind: FailureKind::of(self.is_not),
                    value: Some(self.value),
                    schema: self.is_not,
                });
                return;
            }
        };

        // Combinators report themselves, then what went wrong in each member.
        if self.is_not.is_one_of() || self.is_not.is_all_of() {
            out.push(Failure {
                instance_path: JsonPointer::new(path.clone()),
                kind: FailureKind::of(self.is_not),
                value: Some(self.value),
                schema: self.is_not,
            });
        }

        for cause in since {
            match cause {
                Cause::AtKey { key, explanation } => {
                    path.push(key.token());
                    explanation.collect(path, out);
                    path.pop();
                }
                Cause::MissingKey { key } => {
                    path.push(Cow::Borrowed(*key));
                    out.push(Failure {
                        instance_path: JsonPointer::new(path.clone()),
                        kind: FailureKind::MissingRequiredKey,
                        value: None,
                        schema: self.is_not,
                    });
                    path.pop();
                }
                Cause::Same(explanation) => explanation.collect(path, out),
            }
        }
    }

    fn serialize_fields<M>(&self, map: &mut M) -> Result<(), M::Error>
    where
        M: SerializeMap,
    {
        // JSON text drops undefined members; so does the wire format.
        if !self.value.is_undefined() {
            map.serialize_entry("value", self.value)?;
        }
        map.serialize_entry("isNot", self.is_not)?;
        if let Some(ref since) = self.since {
            map.serialize_entry("since", since)?;
        }
        Ok(())
    }
}

impl Serialize for Explanation<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        self.serialize_fields(&mut map)?;
        map.end()
    }
}

impl fmt::Display for Explanation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, failure) in self.failures().iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", failure)?;
        }
        Ok(())
    }
}

/// A single reason nested within an [`Explanation`](struct.Explanation.html).
#[derive(Debug, Clone, PartialEq)]
pub enum Cause<'a> {
    /// The value at a member or index was rejected.
    AtKey {
        key: Key<'a>,
        explanation: Explanation<'a>,
    },

    /// A required member was absent.
    MissingKey { key: &'a str },

    /// The same value was rejected by a member of a `oneOf` or `allOf`.
    Same(Explanation<'a>),
}

impl Serialize for Cause<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Cause::AtKey { key, explanation } => {
                let mut map = serializer.serialize_map(None)?;
                map.serialize_entry("atKey", key)?;
                explanation.serialize_fields(&mut map)?;
                map.end()
            }
            Cause::MissingKey { key } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("missingKey", key)?;
                map.end()
            }
            Cause::Same(explanation) => explanation.serialize(serializer),
        }
    }
}

/// One step into a value: an object member or an array index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key<'a> {
    Name(&'a str),
    Index(usize),
}

impl<'a> Key<'a> {
    fn token(self) -> Cow<'a, str> {
        match self {
            Key::Name(name) => Cow::Borrowed(name),
            Key::Index(i) => Cow::Owned(i.to_string()),
        }
    }
}

impl Serialize for Key<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Key::Name(name) => serializer.serialize_str(name),
            Key::Index(i) => serializer.serialize_u64(*i as u64),
        }
    }
}

/// The kinds of failure a value can exhibit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The value did not carry a primitive's tag, or did not equal a literal.
    TypeMismatch,
    NotAnObject,
    NotAnArray,
    MissingRequiredKey,
    /// None of the alternatives of a `oneOf` matched.
    NoAlternativeMatched,
    /// At least one member of an `allOf` did not match.
    IntersectionMemberFailed,
}

impl FailureKind {
    fn of(schema: &Schema) -> FailureKind {
        match schema {
            Schema::Primitive(_) | Schema::Literal { .. } => FailureKind::TypeMismatch,
            Schema::Object(_) => FailureKind::NotAnObject,
            Schema::ArrayOf(_) => FailureKind::NotAnArray,
            Schema::OneOf(_) => FailureKind::NoAlternativeMatched,
            Schema::AllOf(_) => FailureKind::IntersectionMemberFailed,
        }
    }
}

/// A single problem with a value, addressed by a path into it.
///
/// `Failure` borrows path tokens from the input where it can. Array indices
/// must be turned into strings, so tokens are `Cow`.
#[derive(Clone, Debug, PartialEq)]
pub struct Failure<'a> {
    instance_path: JsonPointer<Cow<'a, str>, Vec<Cow<'a, str>>>,
    kind: FailureKind,
    value: Option<&'a Value>,
    schema: &'a Schema,
}

impl<'a> Failure<'a> {
    /// A pointer into the part of the input which was rejected.
    pub fn instance_path(&self) -> &JsonPointer<Cow<'a, str>, Vec<Cow<'a, str>>> {
        &self.instance_path
    }

    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    /// The rejected value. `None` when the failure is a missing key.
    pub fn value(&self) -> Option<&'a Value> {
        self.value
    }

    /// The schema which rejected the value. For a missing key, this is the
    /// object schema requiring it.
    pub fn schema(&self) -> &'a Schema {
        self.schema
    }
}

impl fmt::Display for Failure<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let path = self.instance_path.to_string();
        if path.is_empty() {
            f.write_str("(root): ")?;
        } else {
            write!(f, "{}: ", path)?;
        }

        let found = self.value.map_or("nothing", Value::type_name);
        match self.kind {
            FailureKind::TypeMismatch => {
                let expected = serde_json::to_string(self.schema).map_err(|_| fmt::Error)?;
                match self.value {
                    Some(value) => write!(f, "expected {}, found {}", expected, value),
                    None => write!(f, "expected {}", expected),
                }
            }
            FailureKind::NotAnObject => write!(f, "expected an object, found {}", found),
            FailureKind::NotAnArray => write!(f, "expected an array, found {}", found),
            FailureKind::MissingRequiredKey => f.write_str("missing required key"),
            FailureKind::NoAlternativeMatched => f.write_str("no alternative matched"),
            FailureKind::IntersectionMemberFailed => {
                f.write_str("not every member of the intersection matched")
            }
        }
    }
}
