//! The trial loop and the greedy shrink search.

use std::fmt;

use itertools::Itertools;
use tracing::debug;

use super::arbitrary::arbitrary;
use super::shrink::shrink;
use crate::environment::Environment;
use crate::error::Error;
use crate::models::{Shape, Value};

/// Trials run when the environment carries no `goal` property
pub const DEFAULT_GOAL: i64 = 100;

/// Number of trials `for_all` runs in `env`
pub fn goal(env: &Environment) -> i64 {
    env.int_property("goal").unwrap_or(DEFAULT_GOAL)
}

/// A falsified property.
#[derive(Debug, Clone, PartialEq)]
pub struct FailureReport {
    /// Shrunk reproducing inputs
    pub inputs: Vec<Value>,
    /// Inputs of the failing trial, before shrinking
    pub original: Vec<Value>,
    /// 1-based trial count at which the property first failed
    pub tries: usize,
}

impl fmt::Display for FailureReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Failed after {} tries: [{}] (shrunk from [{}])",
            self.tries,
            self.inputs.iter().join(", "),
            self.original.iter().join(", ")
        )
    }
}

/// One generated value per shape, all at `size`
pub fn generate(env: &Environment, shapes: &[Shape], size: i64) -> Result<Vec<Value>, Error> {
    shapes.iter().map(|shape| arbitrary(env, shape, size)).collect()
}

/// Check `property` against up to `goal` generated input tuples.
///
/// Trial `i` (0-based) generates at size `i`. The first falsifying tuple is
/// shrunk with [`find_smallest`]; `Ok(None)` means no counterexample was found.
pub fn for_all<P>(env: &Environment, property: P, shapes: &[Shape]) -> Result<Option<FailureReport>, Error>
where
    P: Fn(&Environment, &[Value]) -> Result<bool, Error>,
{
    let goal = goal(env);
    for i in 0..goal.max(0) {
        let inputs = generate(env, shapes, i)?;
        if property(env, &inputs)? {
            continue;
        }
        debug!(
            target: "lambdata::quickcheck::for_all",
            trial = i + 1,
            inputs = %inputs.iter().join(", "),
            "property falsified"
        );
        let smallest = find_smallest(env, &property, &inputs)?;
        return Ok(Some(FailureReport {
            inputs: smallest,
            original: inputs,
            tries: (i + 1) as usize,
        }));
    }
    Ok(None)
}

/// Greedy per-position shrink of a falsifying tuple.
///
/// Candidates come from the original inputs. Position by position, each
/// candidate is substituted into the smallest tuple found so far and kept
/// when the property still fails. A finished position is never revisited,
/// so the result is not globally minimal.
pub fn find_smallest<P>(env: &Environment, property: &P, inputs: &[Value]) -> Result<Vec<Value>, Error>
where
    P: Fn(&Environment, &[Value]) -> Result<bool, Error>,
{
    let mut smallest = inputs.to_vec();
    for (position, original) in inputs.iter().enumerate() {
        for candidate in shrink(env, original)? {
            let mut attempt = smallest.clone();
            attempt[position] = candidate;
            if !property(env, &attempt)? {
                debug!(
                    target: "lambdata::quickcheck::find_smallest",
                    position,
                    accepted = %attempt[position],
                    "shrink candidate still fails"
                );
                smallest = attempt;
            }
        }
    }
    Ok(smallest)
}

impl Environment {
    /// [`for_all`] with this environment's generators and goal
    pub fn for_all<P>(&self, property: P, shapes: &[Shape]) -> Result<Option<FailureReport>, Error>
    where
        P: Fn(&Environment, &[Value]) -> Result<bool, Error>,
    {
        for_all(self, property, shapes)
    }
}
