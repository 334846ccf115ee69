use crate::errors::ShapeError;
use crate::explanation::{Cause, Explanation, Key};
use crate::schema::Schema;
use crate::value::Value;
use failure::Error;
use std::convert::Infallible;

/// How much of a failure to collect.
///
/// Both modes reach the same verdict: fail-fast only stops collecting once a
/// cause has been recorded, so a node fails in one mode exactly when it fails
/// in the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    FailFast,
    Exhaustive,
}

/// A bound on how deeply schemas may nest.
pub trait Limit {
    type Error;

    fn check(&self, depth: usize) -> Result<(), Self::Error>;
}

/// No bound. Schemas built from owned trees cannot be cyclic, so traversal
/// always terminates.
pub struct Unbounded;

impl Limit for Unbounded {
    type Error = Infallible;

    fn check(&self, _depth: usize) -> Result<(), Infallible> {
        Ok(())
    }
}

pub struct MaxDepth(pub usize);

impl Limit for MaxDepth {
    type Error = Error;

    fn check(&self, depth: usize) -> Result<(), Error> {
        if depth >= self.0 {
            tracing::debug!(max_depth = self.0, "schema nesting exceeded the configured depth");
            return Err(ShapeError::MaxDepthExceeded.into());
        }
        Ok(())
    }
}

pub fn evaluate<'a, L: Limit>(
    mode: Mode,
    limit: L,
    schema: &'a Schema,
    value: &'a Value,
) -> Result<Option<Explanation<'a>>, L::Error> {
    let mut vm = Vm {
        mode,
        limit,
        depth: 0,
    };

    vm.eval(schema, value)
}

/// Unwraps the result of an unbounded evaluation.
pub fn infallible<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(t) => t,
        Err(never) => match never {},
    }
}

struct Vm<L> {
    mode: Mode,
    limit: L,
    depth: usize,
}

impl<L: Limit> Vm<L> {
    fn eval<'a>(
        &mut self,
        schema: &'a Schema,
        value: &'a Value,
    ) -> Result<Option<Explanation<'a>>, L::Error> {
        self.limit.check(self.depth)?;

        self.depth += 1;
        let result = self.eval_schema(schema, value);
        self.depth -= 1;

        result
    }

    fn eval_schema<'a>(
        &mut self,
        schema: &'a Schema,
        value: &'a Value,
    ) -> Result<Option<Explanation<'a>>, L::Error> {
        match schema {
            Schema::Primitive(primitive) => {
                if primitive.accepts(value) {
                    Ok(None)
                } else {
                    Ok(Some(Explanation::new(value, schema)))
                }
            }
            Schema::Literal { value: expected, .. } => {
                if expected.matches(value) {
                    Ok(None)
                } else {
                    Ok(Some(Explanation::new(value, schema)))
                }
            }
            Schema::Object(members) => {
                let fields = match value {
                    Value::Object(fields) => fields,
                    _ => return Ok(Some(Explanation::new(value, schema))),
                };

                let mut since = Vec::new();
                for (key, member) in members {
                    match fields.get(key.as_str()) {
                        None | Some(Value::Undefined) => {
                            if member.required {
                                since.push(Cause::MissingKey { key: key.as_str() });
                            }
                        }
                        Some(field) => {
                            if let Some(explanation) = self.eval(&member.schema, field)? {
                                since.push(Cause::AtKey {
                                    key: Key::Name(key.as_str()),
                                    explanation,
                                });
                            }
                        }
                    }

                    if self.done(&since) {
                        break;
                    }
                }

                Ok(Self::conclude(value, schema, since))
            }
            Schema::OneOf(alternatives) => {
                let mut since = Vec::with_capacity(alternatives.len());
                for alternative in alternatives {
                    match self.eval(alternative, value)? {
                        None => return Ok(None),
                        Some(explanation) => since.push(Cause::Same(explanation)),
                    }
                }

                // Every alternative failed, including when there are none.
                Ok(Some(Explanation::with_causes(value, schema, since)))
            }
            Schema::AllOf(members) => {
                let mut since = Vec::new();
                for member in members {
                    if let Some(explanation) = self.eval(member, value)? {
                        since.push(Cause::Same(explanation));
                    }

                    if self.done(&since) {
                        break;
                    }
                }

                Ok(Self::conclude(value, schema, since))
            }
            Schema::ArrayOf(inner) => {
                let elements = match value {
                    Value::Array(elements) => elements,
                    _ => return Ok(Some(Explanation::new(value, schema))),
                };

                let mut since = Vec::new();
                for (i, element) in elements.iter().enumerate() {
                    if let Some(explanation) = self.eval(inner, element)? {
                        since.push(Cause::AtKey {
                            key: Key::Index(i),
                            explanation,
                        });
                    }

                    if self.done(&since) {
                        break;
                    }
                }

                Ok(Self::conclude(value, schema, since))
            }
        }
    }

    fn done(&self, since: &[Cause]) -> bool {
        self.mode == Mode::FailFast && !since.is_empty()
    }

    fn conclude<'a>(
        value: &'a Value,
        schema: &'a Schema,
        since: Vec<Cause<'a>>,
    ) -> Option<Explanation<'a>> {
        if since.is_empty() {
            None
        } else {
            Some(Explanation::with_causes(value, schema, since))
        }
    }
}
