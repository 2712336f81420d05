//! Disjoint union `Either a b = Left a | Right b`, right-biased.

use std::sync::OnceLock;

use super::option::{none, some};
use super::variant_arg;
use crate::environment::Environment;
use crate::error::Error;
use crate::models::predicates::{shape_is_of, shape_names};
use crate::models::{arg, func_arg, int_arg, shape_arg, type_error, Function, MethodResult, Shape, Value};
use crate::tagged::{define_sum, Cases, SumType, Variant};

const LEFT: usize = 0;
const RIGHT: usize = 1;

static EITHER: OnceLock<SumType> = OnceLock::new();

pub fn either_type() -> &'static SumType {
    EITHER.get_or_init(|| define_sum("Either", &[("Left", &["l"]), ("Right", &["r"])]))
}

pub fn left(l: Value) -> Value {
    either_type().instance(LEFT, vec![l])
}

pub fn right(r: Value) -> Value {
    either_type().instance(RIGHT, vec![r])
}

pub fn is_either(value: &Value) -> bool {
    either_type().is_instance(value)
}

fn either_arg<'a>(args: &'a [Value], index: usize, op: &str) -> Result<&'a Variant, Error> {
    variant_arg(args, index, op, either_type(), "Either")
}

fn inner(e: &Variant) -> &Value {
    &e.values()[0]
}

fn is_right(e: &Variant) -> bool {
    e.tag() == RIGHT
}

pub fn fold(env: &Environment, e: &Variant, on_left: &Function, on_right: &Function) -> MethodResult {
    e.cata(
        Cases::new()
            .on("Left", |xs| on_left.call1(env, xs[0].clone()))
            .on("Right", |xs| on_right.call1(env, xs[0].clone())),
    )?
}

pub fn swap(e: &Variant) -> Value {
    if is_right(e) {
        left(inner(e).clone())
    } else {
        right(inner(e).clone())
    }
}

/// `Right(x)` to `Some(x)`, `Left` to `None`
pub fn to_option(e: &Variant) -> Value {
    if is_right(e) {
        some(inner(e).clone())
    } else {
        none()
    }
}

pub fn to_array(e: &Variant) -> Value {
    if is_right(e) {
        Value::Array(vec![inner(e).clone()])
    } else {
        Value::Array(Vec::new())
    }
}

pub fn map(env: &Environment, e: &Variant, f: &Function) -> MethodResult {
    if is_right(e) {
        Ok(right(f.call1(env, inner(e).clone())?))
    } else {
        Ok(Value::Variant(e.clone()))
    }
}

/// `f` must return an Either
pub fn flat_map(env: &Environment, e: &Variant, f: &Function) -> MethodResult {
    if !is_right(e) {
        return Ok(Value::Variant(e.clone()));
    }
    let next = f.call1(env, inner(e).clone())?;
    if is_either(&next) {
        Ok(next)
    } else {
        Err(type_error("flat_map", "Either result", &next))
    }
}

/// `Right(f)` applied to `other`; the first `Left` met is kept
pub fn ap(env: &Environment, e_f: &Variant, other: &Variant) -> MethodResult {
    if !is_right(e_f) {
        return Ok(Value::Variant(e_f.clone()));
    }
    let f = match inner(e_f) {
        Value::Func(f) => f,
        got => return Err(type_error("ap", "Function inside Right", got)),
    };
    map(env, other, f)
}

/// Two rights concatenate their contents. Otherwise the first left wins,
/// and a left receiver yields to a right argument.
pub fn concat(env: &Environment, a: &Variant, b: &Variant) -> MethodResult {
    match (is_right(a), is_right(b)) {
        (true, true) => Ok(right(env.call2("concat", inner(a).clone(), inner(b).clone())?)),
        (true, false) => Ok(Value::Variant(b.clone())),
        (false, true) => Ok(Value::Variant(b.clone())),
        (false, false) => Ok(Value::Variant(a.clone())),
    }
}

pub(crate) fn register(env: &Environment) -> Result<Environment, Error> {
    let either = || either_type().predicate();
    let ty = either_type().clone();

    env.register_method("fold", either(), |env, args| {
        fold(
            env,
            either_arg(args, 0, "fold")?,
            func_arg(args, 1, "fold")?,
            func_arg(args, 2, "fold")?,
        )
    })?
    .register_method("swap", either(), |_, args| Ok(swap(either_arg(args, 0, "swap")?)))?
    .register_method("to_option", either(), |_, args| {
        Ok(to_option(either_arg(args, 0, "to_option")?))
    })?
    .register_method("to_array", either(), |_, args| {
        Ok(to_array(either_arg(args, 0, "to_array")?))
    })?
    .register_method("map", either(), |env, args| {
        map(env, either_arg(args, 0, "map")?, func_arg(args, 1, "map")?)
    })?
    .register_method("flat_map", either(), |env, args| {
        flat_map(env, either_arg(args, 0, "flat_map")?, func_arg(args, 1, "flat_map")?)
    })?
    .register_method("ap", either(), |env, args| {
        ap(env, either_arg(args, 0, "ap")?, either_arg(args, 1, "ap")?)
    })?
    .register_method("concat", either(), |env, args| {
        concat(env, either_arg(args, 0, "concat")?, either_arg(args, 1, "concat")?)
    })?
    .register_method("arbitrary", shape_is_of(ty.clone()), |env, args| {
        let inner = match shape_arg(args, 0, "arbitrary")? {
            Shape::Of(_, inner) => inner.as_ref().clone(),
            _ => Shape::AnyVal,
        };
        let size = int_arg(args, 1, "arbitrary")?;
        if env.random_bool() {
            let l = env.call2("arbitrary", Value::Shape(Shape::Str), Value::Int(size - 1))?;
            Ok(left(l))
        } else {
            let r = env.call2("arbitrary", Value::Shape(inner), Value::Int(size - 1))?;
            Ok(right(r))
        }
    })?
    .register_method("pure", shape_names(ty), |_, args| {
        Ok(right(arg(args, 1, "pure")?.clone()))
    })
}
