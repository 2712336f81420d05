//! Error-accumulating validation: `Validation e a = Success a | Failure e`.
//!
//! Unlike `Either`, applying a failed function to a failed value keeps both
//! errors, concatenated through the environment.

use std::sync::OnceLock;

use super::variant_arg;
use crate::environment::Environment;
use crate::error::Error;
use crate::models::predicates::shape_names;
use crate::models::{arg, func_arg, type_error, Function, MethodResult, Value};
use crate::tagged::{define_sum, Cases, SumType, Variant};

const SUCCESS: usize = 0;
const FAILURE: usize = 1;

static VALIDATION: OnceLock<SumType> = OnceLock::new();

pub fn validation_type() -> &'static SumType {
    VALIDATION.get_or_init(|| {
        define_sum("Validation", &[("Success", &["value"]), ("Failure", &["errors"])])
    })
}

pub fn success(value: Value) -> Value {
    validation_type().instance(SUCCESS, vec![value])
}

pub fn failure(errors: Value) -> Value {
    validation_type().instance(FAILURE, vec![errors])
}

fn validation_arg<'a>(args: &'a [Value], index: usize, op: &str) -> Result<&'a Variant, Error> {
    variant_arg(args, index, op, validation_type(), "Validation")
}

pub fn fold(env: &Environment, v: &Variant, on_success: &Function, on_failure: &Function) -> MethodResult {
    v.cata(
        Cases::new()
            .on("Success", |xs| on_success.call1(env, xs[0].clone()))
            .on("Failure", |xs| on_failure.call1(env, xs[0].clone())),
    )?
}

pub fn map(env: &Environment, v: &Variant, f: &Function) -> MethodResult {
    match v.tag() {
        SUCCESS => Ok(success(f.call1(env, v.values()[0].clone())?)),
        _ => Ok(Value::Variant(v.clone())),
    }
}

/// Apply a validated function to a validated value, accumulating failures.
pub fn ap(env: &Environment, v_f: &Variant, other: &Variant) -> MethodResult {
    let (f, x) = (&v_f.values()[0], &other.values()[0]);
    match (v_f.tag(), other.tag()) {
        (SUCCESS, SUCCESS) => match f {
            Value::Func(f) => Ok(success(f.call1(env, x.clone())?)),
            got => Err(type_error("ap", "Function inside Success", got)),
        },
        (SUCCESS, _) => Ok(Value::Variant(other.clone())),
        (_, SUCCESS) => Ok(Value::Variant(v_f.clone())),
        _ => Ok(failure(env.call2("concat", f.clone(), x.clone())?)),
    }
}

pub(crate) fn register(env: &Environment) -> Result<Environment, Error> {
    let validation = || validation_type().predicate();

    env.register_method("fold", validation(), |env, args| {
        fold(
            env,
            validation_arg(args, 0, "fold")?,
            func_arg(args, 1, "fold")?,
            func_arg(args, 2, "fold")?,
        )
    })?
    .register_method("map", validation(), |env, args| {
        map(env, validation_arg(args, 0, "map")?, func_arg(args, 1, "map")?)
    })?
    .register_method("ap", validation(), |env, args| {
        ap(env, validation_arg(args, 0, "ap")?, validation_arg(args, 1, "ap")?)
    })?
    .register_method("pure", shape_names(validation_type().clone()), |_, args| {
        Ok(success(arg(args, 1, "pure")?.clone()))
    })
}
