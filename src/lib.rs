//! `shapecheck` checks dynamically-typed values, such as decoded JSON, against
//! declarative descriptions of their expected shape.
//!
//! A schema answers three questions about a value: is it valid, what is the
//! value once narrowed to the schema (the value itself, untouched), and if it
//! is invalid, exactly why, down to the offending key.
//!
//! # Validating data
//!
//! ```
//! use serde_json::json;
//! use shapecheck::types::{array_of, number, object, optional, required, string};
//! use shapecheck::{coerce_to, explain, is_valid, Value};
//!
//! let person = object(vec![
//!     ("name", required(string())),
//!     ("age", required(number())),
//!     ("phones", optional(array_of(string()))),
//! ]);
//!
//! let input_ok = Value::from(json!({
//!     "name": "John Doe",
//!     "age": 43,
//!     "phones": ["+44 1234567", "+44 2345678"]
//! }));
//!
//! assert!(is_valid(&person, &input_ok));
//!
//! // Coercion narrows, it never converts: the very same value comes back.
//! assert!(std::ptr::eq(coerce_to(&person, &input_ok).unwrap(), &input_ok));
//!
//! let input_bad = Value::from(json!({
//!     "age": "43",
//!     "phones": ["+44 1234567", 442345678]
//! }));
//!
//! // Every problem is reported at once, in declaration order.
//! let explanation = explain(&person, &input_bad).unwrap();
//! assert_eq!(
//!     serde_json::to_value(&explanation).unwrap(),
//!     json!({
//!         "value": { "age": "43", "phones": ["+44 1234567", 442345678] },
//!         "isNot": {
//!             "object": {
//!                 "name": "string",
//!                 "age": "number",
//!                 "phones?": { "arrayOf": "string" }
//!             }
//!         },
//!         "since": [
//!             { "missingKey": "name" },
//!             { "atKey": "age", "value": "43", "isNot": "number" },
//!             {
//!                 "atKey": "phones",
//!                 "value": ["+44 1234567", 442345678],
//!                 "isNot": { "arrayOf": "string" },
//!                 "since": [{ "atKey": 1, "value": 442345678, "isNot": "string" }]
//!             }
//!         ]
//!     })
//! );
//!
//! // The same explanation, flattened into JSON Pointer paths.
//! let paths: Vec<String> = explanation
//!     .failures()
//!     .iter()
//!     .map(|failure| failure.instance_path().to_string())
//!     .collect();
//! assert_eq!(paths, vec!["/name", "/age", "/phones/1"]);
//! ```
//!
//! # Loading schemas
//!
//! Schemas also have a data form, the same one explanations use for `isNot`.
//! [`SerdeSchema`](serde/enum.SerdeSchema.html) parses it, and
//! [`Schema::from_serde`](schema/enum.Schema.html#method.from_serde) checks
//! that it is well-formed. A malformed schema is an error; a value not
//! matching a schema never is.
//!
//! ```
//! use serde_json::json;
//! use shapecheck::{Schema, SerdeSchema, Validator, Value};
//!
//! let serde_schema: SerdeSchema = serde_json::from_value(json!({
//!     "oneOf": [{ "literal": "a" }, { "literal": "b" }]
//! })).unwrap();
//! let schema = Schema::from_serde(serde_schema).unwrap();
//!
//! let validator = Validator::new();
//! assert!(validator.is_valid(&schema, &Value::from("b")).unwrap());
//! assert!(!validator.is_valid(&schema, &Value::from(true)).unwrap());
//! ```

mod vm;

pub mod errors;
pub mod explanation;
pub mod schema;
pub mod serde;
pub mod types;
pub mod validator;
pub mod value;

pub use crate::errors::ShapeError;
pub use crate::explanation::{Cause, Explanation, Failure, FailureKind, Key};
pub use crate::schema::{Keyword, Member, Primitive, Scalar, Schema};
pub use crate::serde::{SerdeKeywords, SerdeSchema};
pub use crate::types::Type;
pub use crate::validator::{coerce_to, explain, is_valid, Config, Validator};
pub use crate::value::{Map, Value};
