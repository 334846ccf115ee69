//! An error type for malformed schemas and aborted traversals.
//!
//! None of these describe bad input data. A value that does not match a schema
//! is reported through [`Explanation`](../explanation/struct.Explanation.html),
//! never through `ShapeError`.

use failure::Fail;

/// An enum of possible errors that can emerge from this crate.
#[derive(Debug, Fail, PartialEq, Clone, Eq, Hash)]
pub enum ShapeError {
    /// A schema-like object did not take on a valid form.
    ///
    /// Keyword schemas must carry exactly one of `literal`, `match`, `object`,
    /// `oneOf`, `allOf` or `arrayOf`. Zero keywords, or several at once, make
    /// for an invalid form.
    #[fail(display = "invalid schema form")]
    InvalidForm,

    /// A bare schema string did not name one of the primitives.
    #[fail(display = "unknown primitive: {}", name)]
    UnknownPrimitive { name: String },

    /// A keyword schema carried a keyword this crate does not recognize.
    #[fail(display = "unknown schema keyword: {}", keyword)]
    UnknownKeyword { keyword: String },

    /// A `literal` or `match` schema held something other than a string,
    /// a finite number, a boolean or a `{"bigint": n}` integer.
    #[fail(display = "literal schemas may only hold strings, numbers or booleans")]
    InvalidLiteral,

    /// An object schema declared the same member twice, once as required
    /// (`key`) and once as optional (`key?`), or declared a required member
    /// whose key ends in `?`.
    #[fail(display = "ambiguous member: {}", member)]
    AmbiguousMember { member: String },

    /// The maximum schema depth was exceeded during evaluation.
    ///
    /// This only happens with a validator configured with
    /// [`Config::max_depth`](../validator/struct.Config.html#method.max_depth).
    #[fail(display = "maximum schema depth exceeded during validation")]
    MaxDepthExceeded,
}
