//! Generators for the primitive and structural shapes.
//!
//! Every generator is a dispatched `arbitrary(shape, size)` implementation,
//! so composite shapes recurse through the environment and any data type can
//! plug in its own constructor shapes.

use std::collections::BTreeMap;

use crate::environment::Environment;
use crate::error::Error;
use crate::models::predicates::{shape_is, shape_where};
use crate::models::{int_arg, shape_arg, type_error, MethodResult, Shape, Value};

use super::runner::goal;

/// Generate one value for `shape` through dispatch
pub fn arbitrary(env: &Environment, shape: &Shape, size: i64) -> MethodResult {
    env.call2("arbitrary", Value::Shape(shape.clone()), Value::Int(size))
}

/// Magnitude bound for numbers at `size`: `2^(size * 60 / goal)`
pub fn magnitude(size: i64, goal: i64) -> f64 {
    let goal = goal.max(1) as f64;
    2f64.powf(size as f64 * 60.0 / goal)
}

fn array_of(env: &Environment, element: &Shape, size: i64) -> Result<Vec<Value>, Error> {
    let len = env.random_range(0, size);
    (0..len).map(|_| arbitrary(env, element, size - 1)).collect()
}

fn size_arg(args: &[Value]) -> Result<i64, Error> {
    int_arg(args, 1, "arbitrary")
}

pub(crate) fn register(env: &Environment) -> Result<Environment, Error> {
    env.register_method("arbitrary", shape_is(Shape::Bool), |env, _| {
        Ok(Value::Bool(env.random_bool()))
    })?
    .register_method("arbitrary", shape_is(Shape::Number), |env, args| {
        let bound = magnitude(size_arg(args)?, goal(env));
        let v = bound.min((i64::MAX / 2) as f64) as i64;
        if v < 1 {
            return Ok(Value::Int(0));
        }
        Ok(Value::Int(env.random_range(1 - v, v)))
    })?
    .register_method("arbitrary", shape_is(Shape::Float), |env, args| {
        let bound = magnitude(size_arg(args)?, goal(env));
        Ok(Value::Float(env.random_float(-bound, bound)))
    })?
    .register_method("arbitrary", shape_is(Shape::Char), |env, _| {
        let code = env.random_range(32, 127) as u8;
        Ok(Value::Char(code as char))
    })?
    .register_method("arbitrary", shape_is(Shape::Str), |env, args| {
        let chars = array_of(env, &Shape::Char, size_arg(args)? - 1)?;
        let text: String = chars
            .iter()
            .filter_map(|c| match c {
                Value::Char(c) => Some(*c),
                _ => None,
            })
            .collect();
        Ok(Value::Str(text))
    })?
    .register_method("arbitrary", shape_is(Shape::AnyVal), |env, args| {
        let size = size_arg(args)?;
        let shape = env
            .one_of(&[Shape::Bool, Shape::Number, Shape::Str])
            .cloned()
            .unwrap_or(Shape::Bool);
        arbitrary(env, &shape, size - 1)
    })?
    .register_method("arbitrary", shape_is(Shape::Array), |env, args| {
        Ok(Value::Array(array_of(env, &Shape::AnyVal, size_arg(args)?)?))
    })?
    .register_method(
        "arbitrary",
        shape_where(|s| matches!(s, Shape::ArrayOf(_))),
        |env, args| match shape_arg(args, 0, "arbitrary")? {
            Shape::ArrayOf(element) => Ok(Value::Array(array_of(env, element, size_arg(args)?)?)),
            other => Err(type_error("arbitrary", "arrayOf shape", &Value::Shape(other.clone()))),
        },
    )?
    .register_method(
        "arbitrary",
        shape_where(|s| matches!(s, Shape::ObjectLike(_))),
        |env, args| match shape_arg(args, 0, "arbitrary")? {
            Shape::ObjectLike(fields) => {
                let size = size_arg(args)?;
                let object = fields
                    .iter()
                    .map(|(key, shape)| Ok((key.clone(), arbitrary(env, shape, size - 1)?)))
                    .collect::<Result<BTreeMap<_, _>, Error>>()?;
                Ok(Value::Object(object))
            }
            other => Err(type_error("arbitrary", "objectLike shape", &Value::Shape(other.clone()))),
        },
    )?
    .register_method("arbitrary", shape_is(Shape::Object), |env, args| {
        let size = size_arg(args)?;
        let values = Shape::array_of(Shape::AnyVal);
        let mut object = BTreeMap::new();
        for _ in 0..env.random_range(0, size) {
            let key = match arbitrary(env, &Shape::Str, size - 1)? {
                Value::Str(key) => key,
                other => return Err(type_error("arbitrary", "String key", &other)),
            };
            object.insert(key, arbitrary(env, &values, size - 1)?);
        }
        Ok(Value::Object(object))
    })?
    .register_method("arbitrary", shape_is(Shape::Function), |_, _| {
        Ok(Value::func("arbitrary", |_, _| Ok(Value::Null)))
    })
}
