//! Operations on primitives, arrays and objects.

use std::collections::BTreeMap;

use crate::environment::Environment;
use crate::error::Error;
use crate::models::predicates::{
    is_array, is_bool, is_char, is_function, is_null, is_number, is_object, is_shape, is_str,
    shape_is, shape_where,
};
use crate::models::{arg, array_arg, func_arg, type_error, Function, MethodResult, Shape, Value};

/// Elementwise equality through the environment's `equal`
pub fn equal(env: &Environment, a: &Value, b: &Value) -> Result<bool, Error> {
    env.call_bool("equal", &[a.clone(), b.clone()])
}

fn all_equal<'a>(
    env: &Environment,
    pairs: impl Iterator<Item = (&'a Value, &'a Value)>,
) -> Result<bool, Error> {
    for (x, y) in pairs {
        if !equal(env, x, y)? {
            return Ok(false);
        }
    }
    Ok(true)
}

fn add(a: &Value, b: &Value) -> MethodResult {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => Ok(Value::Int(x.wrapping_add(*y))),
        (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
            let x = a.as_float().unwrap_or_default();
            let y = b.as_float().unwrap_or_default();
            Ok(Value::Float(x + y))
        }
        (_, other) => Err(type_error("concat", "Number", other)),
    }
}

/// Left fold `f(acc, x)` over an array
pub fn fold_array(env: &Environment, items: &[Value], init: Value, f: &Function) -> MethodResult {
    items
        .iter()
        .try_fold(init, |acc, x| f.apply(env, &[acc, x.clone()]))
}

/// Structural equality for every primitive kind, arrays and objects
pub(crate) fn register_equal(env: &Environment) -> Result<Environment, Error> {
    let strict = |_: &Environment, args: &[Value]| -> MethodResult {
        Ok(Value::Bool(args[0] == *arg(args, 1, "equal")?))
    };

    env.register_method("equal", is_null, strict)?
        .register_method("equal", is_bool, strict)?
        .register_method("equal", is_number, strict)?
        .register_method("equal", is_char, strict)?
        .register_method("equal", is_str, strict)?
        .register_method("equal", is_function, strict)?
        .register_method("equal", is_shape, strict)?
        .register_method("equal", is_array, |env, args| {
            let a = array_arg(args, 0, "equal")?;
            let b = match arg(args, 1, "equal")? {
                Value::Array(b) => b,
                _ => return Ok(Value::Bool(false)),
            };
            if a.len() != b.len() {
                return Ok(Value::Bool(false));
            }
            all_equal(env, a.iter().zip(b)).map(Value::Bool)
        })?
        .register_method("equal", is_object, |env, args| {
            let (a, b) = match (&args[0], arg(args, 1, "equal")?) {
                (Value::Object(a), Value::Object(b)) => (a, b),
                _ => return Ok(Value::Bool(false)),
            };
            if !a.keys().eq(b.keys()) {
                return Ok(Value::Bool(false));
            }
            all_equal(env, a.values().zip(b.values())).map(Value::Bool)
        })
}

/// Array as a foldable monad and monoid
pub(crate) fn register_array(env: &Environment) -> Result<Environment, Error> {
    env.register_method("fold", is_array, |env, args| {
        let init = arg(args, 1, "fold")?.clone();
        fold_array(env, array_arg(args, 0, "fold")?, init, func_arg(args, 2, "fold")?)
    })?
    .register_method("flat_map", is_array, |env, args| {
        let f = func_arg(args, 1, "flat_map")?;
        let mut out = Vec::new();
        for x in array_arg(args, 0, "flat_map")? {
            match f.call1(env, x.clone())? {
                Value::Array(items) => out.extend(items),
                other => return Err(type_error("flat_map", "Array result", &other)),
            }
        }
        Ok(Value::Array(out))
    })?
    .register_method("map", is_array, |env, args| {
        let f = func_arg(args, 1, "map")?;
        array_arg(args, 0, "map")?
            .iter()
            .map(|x| f.call1(env, x.clone()))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array)
    })?
    .register_method("ap", is_array, |env, args| {
        let fs = array_arg(args, 0, "ap")?;
        let xs = array_arg(args, 1, "ap")?;
        let mut out = Vec::with_capacity(fs.len() * xs.len());
        for f in fs {
            let f = func_arg(std::slice::from_ref(f), 0, "ap")?;
            for x in xs {
                out.push(f.call1(env, x.clone())?);
            }
        }
        Ok(Value::Array(out))
    })?
    .register_method("concat", is_array, |_, args| {
        let mut out = array_arg(args, 0, "concat")?.to_vec();
        out.extend_from_slice(array_arg(args, 1, "concat")?);
        Ok(Value::Array(out))
    })?
    .register_method("pure", shape_is(Shape::Array), |_, args| {
        Ok(Value::Array(vec![arg(args, 1, "pure")?.clone()]))
    })?
    .register_method("pure", shape_where(|s| matches!(s, Shape::ArrayOf(_))), |_, args| {
        Ok(Value::Array(vec![arg(args, 1, "pure")?.clone()]))
    })
}

/// Numbers and strings as semigroups, objects as a right-biased merge, and
/// primitives as trivial functors
pub(crate) fn register_semigroups(env: &Environment) -> Result<Environment, Error> {
    env.register_method("concat", is_number, |_, args| add(&args[0], arg(args, 1, "concat")?))?
        .register_method("concat", is_str, |_, args| {
            let a = args[0].as_str().unwrap_or_default();
            match arg(args, 1, "concat")? {
                Value::Str(b) => Ok(Value::str(format!("{}{}", a, b))),
                other => Err(type_error("concat", "String", other)),
            }
        })?
        .register_method("concat", is_object, |_, args| {
            let mut out = args[0].as_object().cloned().unwrap_or_default();
            match arg(args, 1, "concat")? {
                Value::Object(b) => out.extend(b.iter().map(|(k, v)| (k.clone(), v.clone()))),
                other => return Err(type_error("concat", "Object", other)),
            }
            Ok(Value::Object(out))
        })?
        .register_method(
            "map",
            |v: &Value| is_bool(v) || is_number(v) || is_str(v),
            |env, args| func_arg(args, 1, "map")?.call1(env, args[0].clone()),
        )
}

/// Identity elements per shape
pub(crate) fn register_empty(env: &Environment) -> Result<Environment, Error> {
    env.register_method("empty", shape_is(Shape::Number), |_, _| Ok(Value::Int(0)))?
        .register_method("empty", shape_is(Shape::Float), |_, _| Ok(Value::Float(0.0)))?
        .register_method("empty", shape_is(Shape::Str), |_, _| Ok(Value::str("")))?
        .register_method(
            "empty",
            shape_where(|s| matches!(s, Shape::Array | Shape::ArrayOf(_))),
            |_, _| Ok(Value::Array(Vec::new())),
        )?
        .register_method(
            "empty",
            shape_where(|s| matches!(s, Shape::Object | Shape::ObjectLike(_))),
            |_, _| Ok(Value::Object(BTreeMap::new())),
        )
}

/// `to_array` and `zip` over arrays
pub(crate) fn register_sequences(env: &Environment) -> Result<Environment, Error> {
    env.register_method("to_array", is_array, |_, args| Ok(args[0].clone()))?
        .register_method("to_array", is_str, |_, args| {
            let s = args[0].as_str().unwrap_or_default();
            Ok(Value::Array(s.chars().map(Value::Char).collect()))
        })?
        .register_method("zip", is_array, |_, args| {
            let a = array_arg(args, 0, "zip")?;
            let b = array_arg(args, 1, "zip")?;
            Ok(Value::Array(
                a.iter()
                    .zip(b)
                    .map(|(x, y)| Value::Array(vec![x.clone(), y.clone()]))
                    .collect(),
            ))
        })
}
