//! Typed handles around schemas, and the combinators that build them.
//!
//! ```
//! use shapecheck::types::{array_of, number, object, one_of, optional, required, string, literal};
//!
//! let point = object(vec![
//!     ("x", required(number())),
//!     ("y", required(number())),
//!     ("label", optional(string())),
//! ]);
//!
//! let mode = one_of(vec![literal("fast"), literal("slow")]);
//! let path = array_of(point);
//! # let _ = (mode, path);
//! ```

use crate::schema::{Keyword, Member, Primitive, Scalar, Schema};
use crate::value::{Map, Value};
use indexmap::IndexMap;
use std::fmt;
use std::marker::PhantomData;

/// A schema, tagged with the Rust shape of the values it accepts.
///
/// The tag is a marker only. At runtime a `Type<R>` is exactly its
/// [`Schema`](../schema/enum.Schema.html), and it is never mutated after
/// construction.
pub struct Type<R> {
    schema: Schema,
    marker: PhantomData<fn() -> R>,
}

impl<R> Type<R> {
    fn new(schema: Schema) -> Self {
        Type {
            schema,
            marker: PhantomData,
        }
    }

    /// Get the schema this type wraps.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Same as [`schema`](#method.schema), but moves ownership.
    pub fn into_schema(self) -> Schema {
        self.schema
    }
}

impl<R> Clone for Type<R> {
    fn clone(&self) -> Self {
        Type::new(self.schema.clone())
    }
}

impl<R> fmt::Debug for Type<R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Type").field(&self.schema).finish()
    }
}

impl<R> PartialEq for Type<R> {
    fn eq(&self, other: &Self) -> bool {
        self.schema == other.schema
    }
}

impl<R> AsRef<Schema> for Type<R> {
    fn as_ref(&self) -> &Schema {
        &self.schema
    }
}

impl<R> From<Type<R>> for Schema {
    fn from(ty: Type<R>) -> Schema {
        ty.schema
    }
}

/// A schema loaded at runtime carries no static shape.
impl From<Schema> for Type<Value> {
    fn from(schema: Schema) -> Type<Value> {
        Type::new(schema)
    }
}

impl<R> From<Type<R>> for Member {
    fn from(ty: Type<R>) -> Member {
        required(ty)
    }
}

pub fn string() -> Type<String> {
    Type::new(Schema::Primitive(Primitive::String))
}

pub fn number() -> Type<f64> {
    Type::new(Schema::Primitive(Primitive::Number))
}

pub fn boolean() -> Type<bool> {
    Type::new(Schema::Primitive(Primitive::Boolean))
}

/// Accepts only `Value::Null`. `Undefined` is not null.
pub fn null_() -> Type<()> {
    Type::new(Schema::Primitive(Primitive::Null))
}

/// Accepts only the given scalar, by strict equality.
pub fn literal<V: Into<Scalar>>(value: V) -> Type<Scalar> {
    Type::new(Schema::Literal {
        value: value.into(),
        keyword: Keyword::Literal,
    })
}

/// Same as [`literal`](fn.literal.html), but spelled `{"match": ..}` on the
/// wire.
pub fn match_<V: Into<Scalar>>(value: V) -> Type<Scalar> {
    Type::new(Schema::Literal {
        value: value.into(),
        keyword: Keyword::Match,
    })
}

/// A member which must be present, and not `Undefined`.
pub fn required<R>(ty: Type<R>) -> Member {
    Member {
        schema: ty.schema,
        required: true,
    }
}

/// A member which may be absent, or `Undefined`.
pub fn optional<R>(ty: Type<R>) -> Member {
    Member {
        schema: ty.schema,
        required: false,
    }
}

/// Accepts objects whose members satisfy their respective types.
///
/// Members are checked, and reported, in the order given here. A key ending
/// in `?` is read as on the wire: the `?` is dropped and the member becomes
/// optional. Declaring the same key twice replaces the earlier member in its
/// original position.
pub fn object<I, K, M>(members: I) -> Type<Map>
where
    I: IntoIterator<Item = (K, M)>,
    K: Into<String>,
    M: Into<Member>,
{
    let members: IndexMap<String, Member> = members
        .into_iter()
        .map(|(key, member)| {
            let mut key: String = key.into();
            let mut member: Member = member.into();
            if key.ends_with('?') {
                key.pop();
                member.required = false;
            }
            (key, member)
        })
        .collect();

    Type::new(Schema::Object(members))
}

/// Accepts values matching at least one of the alternatives.
pub fn one_of<I>(alternatives: I) -> Type<Value>
where
    I: IntoIterator,
    I::Item: Into<Schema>,
{
    Type::new(Schema::OneOf(alternatives.into_iter().map(Into::into).collect()))
}

/// Accepts values matching every one of the members. Mostly used to merge
/// several object types into one.
pub fn all_of<I>(members: I) -> Type<Value>
where
    I: IntoIterator,
    I::Item: Into<Schema>,
{
    Type::new(Schema::AllOf(members.into_iter().map(Into::into).collect()))
}

/// Accepts arrays whose every element matches `ty`.
pub fn array_of<R>(ty: Type<R>) -> Type<Vec<R>> {
    Type::new(Schema::ArrayOf(Box::new(ty.schema)))
}
