//! Fallbacks for any record or variant.
//!
//! These accept every tagged instance, so they are registered after the data
//! types' own implementations and only serve types without one.

use crate::environment::Environment;
use crate::error::Error;
use crate::models::predicates::{is_record, is_variant};
use crate::models::{arg, Value};

use super::primitives::equal;

fn fields_equal(env: &Environment, a: &[Value], b: &[Value]) -> Result<bool, Error> {
    if a.len() != b.len() {
        return Ok(false);
    }
    for (x, y) in a.iter().zip(b) {
        if !equal(env, x, y)? {
            return Ok(false);
        }
    }
    Ok(true)
}

pub(crate) fn register(env: &Environment) -> Result<Environment, Error> {
    env.register_method("equal", is_record, |env, args| {
        let same = match (&args[0], arg(args, 1, "equal")?) {
            (Value::Record(a), Value::Record(b)) if a.product() == b.product() => {
                fields_equal(env, a.values(), b.values())?
            }
            _ => false,
        };
        Ok(Value::Bool(same))
    })?
    .register_method("equal", is_variant, |env, args| {
        let same = match (&args[0], arg(args, 1, "equal")?) {
            (Value::Variant(a), Value::Variant(b)) if a.sum() == b.sum() && a.tag() == b.tag() => {
                fields_equal(env, a.values(), b.values())?
            }
            _ => false,
        };
        Ok(Value::Bool(same))
    })?
    .register_method("to_array", is_record, |_, args| match &args[0] {
        Value::Record(r) => Ok(Value::Array(r.values().to_vec())),
        other => Ok(Value::Array(vec![other.clone()])),
    })
}
