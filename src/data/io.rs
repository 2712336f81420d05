//! Deferred effects: `IO(effect)` runs nothing until `perform`.

use std::sync::OnceLock;

use super::record_arg;
use crate::environment::Environment;
use crate::error::Error;
use crate::models::predicates::shape_names;
use crate::models::{arg, func_arg, type_error, Function, MethodResult, Value};
use crate::tagged::{define_product, ProductType, Record};

static IO: OnceLock<ProductType> = OnceLock::new();

pub fn io_type() -> &'static ProductType {
    IO.get_or_init(|| define_product("IO", &["effect"]))
}

pub fn io(effect: Function) -> Value {
    io_type().instance(vec![Value::Func(effect)])
}

pub fn pure(x: Value) -> Value {
    io(Function::constant(x))
}

fn io_arg<'a>(args: &'a [Value], index: usize, op: &str) -> Result<&'a Record, Error> {
    record_arg(args, index, op, io_type(), "IO")
}

/// Run the effect
pub fn perform(env: &Environment, action: &Record) -> MethodResult {
    match &action.values()[0] {
        Value::Func(effect) => effect.apply(env, &[]),
        other => Err(type_error("perform", "Function", other)),
    }
}

pub fn flat_map(action: &Record, f: &Function) -> Value {
    let action = action.clone();
    let f = f.clone();
    io(Function::new("IO.flat_map", move |env, _| {
        let x = perform(env, &action)?;
        match f.call1(env, x)? {
            Value::Record(next) if next.product() == io_type() => perform(env, &next),
            other => Err(type_error("flat_map", "IO result", &other)),
        }
    }))
}

pub fn map(action: &Record, f: &Function) -> Value {
    let action = action.clone();
    let f = f.clone();
    io(Function::new("IO.map", move |env, _| {
        let x = perform(env, &action)?;
        f.call1(env, x)
    }))
}

pub(crate) fn register(env: &Environment) -> Result<Environment, Error> {
    let action = || io_type().predicate();

    env.register_method("perform", action(), |env, args| perform(env, io_arg(args, 0, "perform")?))?
        .register_method("flat_map", action(), |_, args| {
            Ok(flat_map(io_arg(args, 0, "flat_map")?, func_arg(args, 1, "flat_map")?))
        })?
        .register_method("map", action(), |_, args| {
            Ok(map(io_arg(args, 0, "map")?, func_arg(args, 1, "map")?))
        })?
        .register_method("pure", shape_names(io_type().clone()), |_, args| {
            Ok(pure(arg(args, 1, "pure")?.clone()))
        })
}
