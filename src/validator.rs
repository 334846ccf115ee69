//! Check values against schemas.
//!
//! This module contains the three questions a schema can answer about a value:
//!
//! * [`is_valid`](fn.is_valid.html): does the value match?
//! * [`coerce_to`](fn.coerce_to.html): the value itself, if it matches.
//! * [`explain`](fn.explain.html): if it does not match, why not?
//!
//! All three run the same traversal, so they always agree: `explain` returns
//! `None` exactly when `is_valid` returns `true`.
//!
//! The free functions never fail. [`Validator`](struct.Validator.html) runs the
//! same checks under a [`Config`](struct.Config.html), and fails when a
//! configured limit is exceeded.

use crate::explanation::Explanation;
use crate::schema::Schema;
use crate::types::Type;
use crate::value::Value;
use crate::vm::{evaluate, infallible, MaxDepth, Mode, Unbounded};
use failure::Error;

/// Is `value` valid against `ty`?
///
/// Stops at the first failure it finds.
pub fn is_valid<R>(ty: &Type<R>, value: &Value) -> bool {
    infallible(evaluate(Mode::FailFast, Unbounded, ty.schema(), value)).is_none()
}

/// Returns `value` itself if it is valid against `ty`, and `None` otherwise.
///
/// Despite the name, no conversion ever takes place: the returned reference is
/// the one passed in.
pub fn coerce_to<'v, R>(ty: &Type<R>, value: &'v Value) -> Option<&'v Value> {
    if is_valid(ty, value) {
        Some(value)
    } else {
        None
    }
}

/// Explains why `value` is not valid against `ty`, or returns `None` if it is.
///
/// Unlike [`is_valid`](fn.is_valid.html), every member, element and
/// alternative is visited, so the explanation holds every reason at once.
pub fn explain<'a, R>(ty: &'a Type<R>, value: &'a Value) -> Option<Explanation<'a>> {
    infallible(evaluate(Mode::Exhaustive, Unbounded, ty.schema(), value))
}

/// Checks values against schemas under a configuration.
#[derive(Debug, Default, Eq, PartialEq, Clone, Hash)]
pub struct Validator {
    config: Config,
}

impl Validator {
    /// Constructs a new validator using the default configuration.
    pub fn new() -> Self {
        Self::new_with_config(Config::default())
    }

    /// Constructs a new validator using a configuration.
    pub fn new_with_config(config: Config) -> Self {
        Self { config }
    }

    /// Same as [`is_valid`](fn.is_valid.html), for any schema.
    ///
    /// Returns an error if the maximum depth is exceeded (see
    /// [`Config::max_depth`](struct.Config.html#method.max_depth)).
    pub fn is_valid(&self, schema: &Schema, value: &Value) -> Result<bool, Error> {
        let valid = self.run(Mode::FailFast, schema, value)?.is_none();
        tracing::trace!(valid, "validated value");
        Ok(valid)
    }

    /// Same as [`coerce_to`](fn.coerce_to.html), for any schema.
    pub fn coerce_to<'v>(
        &self,
        schema: &Schema,
        value: &'v Value,
    ) -> Result<Option<&'v Value>, Error> {
        Ok(if self.is_valid(schema, value)? {
            Some(value)
        } else {
            None
        })
    }

    /// Same as [`explain`](fn.explain.html), for any schema.
    ///
    /// The explanation borrows from both the schema and the value; this crate
    /// avoids copying data out of your inputs.
    pub fn explain<'a>(
        &self,
        schema: &'a Schema,
        value: &'a Value,
    ) -> Result<Option<Explanation<'a>>, Error> {
        let explanation = self.run(Mode::Exhaustive, schema, value)?;
        tracing::trace!(valid = explanation.is_none(), "explained value");
        Ok(explanation)
    }

    fn run<'a>(
        &self,
        mode: Mode,
        schema: &'a Schema,
        value: &'a Value,
    ) -> Result<Option<Explanation<'a>>, Error> {
        match self.config.max_depth {
            Some(max_depth) => evaluate(mode, MaxDepth(max_depth), schema, value),
            None => Ok(infallible(evaluate(mode, Unbounded, schema, value))),
        }
    }
}

/// Configuration for how validation should proceed.
#[derive(Debug, Default, Eq, PartialEq, Clone, Hash)]
pub struct Config {
    max_depth: Option<usize>,
}

impl Config {
    /// Create a new, default `Config`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum schema nesting depth before aborting evaluation. By
    /// default there is no limit.
    ///
    /// When evaluation is aborted because of this maximum depth, validation
    /// *fails*. No explanation is returned.
    ///
    /// Only the schemas actually visited count: an `arrayOf` schema is not
    /// looked into when the value is not an array.
    pub fn max_depth(&mut self, max_depth: usize) -> &mut Self {
        self.max_depth = Some(max_depth);
        self
    }
}
