//! Deferred single values: `Promise(fork)` where `fork(resolve)` eventually
//! calls `resolve(value)`.
//!
//! Nothing is scheduled; the caller drives a promise by forking it.

use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;

use super::record_arg;
use crate::environment::Environment;
use crate::error::Error;
use crate::models::predicates::shape_names;
use crate::models::{arg, func_arg, type_error, Function, MethodResult, Value};
use crate::tagged::{define_product, ProductType, Record};

static PROMISE: OnceLock<ProductType> = OnceLock::new();

pub fn promise_type() -> &'static ProductType {
    PROMISE.get_or_init(|| define_product("Promise", &["fork"]))
}

pub fn promise(fork: Function) -> Value {
    promise_type().instance(vec![Value::Func(fork)])
}

fn promise_arg<'a>(args: &'a [Value], index: usize, op: &str) -> Result<&'a Record, Error> {
    record_arg(args, index, op, promise_type(), "Promise")
}

fn resolver(args: &[Value], op: &str) -> Result<Function, Error> {
    func_arg(args, 0, op).cloned()
}

/// Resolves immediately with `x`
pub fn of(x: Value) -> Value {
    promise(Function::new("Promise.of", move |env, args| {
        resolver(args, "fork")?.call1(env, x.clone())
    }))
}

/// Start the computation, handing results to `resolve`
pub fn fork(env: &Environment, p: &Record, resolve: &Function) -> MethodResult {
    match &p.values()[0] {
        Value::Func(body) => body.call1(env, Value::Func(resolve.clone())),
        other => Err(type_error("fork", "Function", other)),
    }
}

pub fn map(p: &Record, f: &Function) -> Value {
    let p = p.clone();
    let f = f.clone();
    promise(Function::new("Promise.map", move |env, args| {
        let resolve = resolver(args, "fork")?;
        let f = f.clone();
        let mapped = Function::new("mapped", move |env, xs| {
            let x = xs.first().cloned().unwrap_or(Value::Null);
            resolve.call1(env, f.call1(env, x)?)
        });
        fork(env, &p, &mapped)
    }))
}

/// `f` must return another promise, which is forked with the same resolver
pub fn flat_map(p: &Record, f: &Function) -> Value {
    let p = p.clone();
    let f = f.clone();
    promise(Function::new("Promise.flat_map", move |env, args| {
        let resolve = resolver(args, "fork")?;
        let f = f.clone();
        let chained = Function::new("chained", move |env, xs| {
            let x = xs.first().cloned().unwrap_or(Value::Null);
            match f.call1(env, x)? {
                Value::Record(next) if next.product() == promise_type() => fork(env, &next, &resolve),
                other => Err(type_error("flat_map", "Promise result", &other)),
            }
        });
        fork(env, &p, &chained)
    }))
}

/// Fork `p` and return the last value it resolved with, if it resolved
/// synchronously.
pub fn settle(env: &Environment, p: &Record) -> Result<Option<Value>, Error> {
    let slot = Arc::new(Mutex::new(None));
    let sink = slot.clone();
    let resolve = Function::new("settle", move |_, xs| {
        *sink.lock() = xs.first().cloned();
        Ok(Value::Null)
    });
    fork(env, p, &resolve)?;
    let settled = slot.lock().take();
    Ok(settled)
}

pub(crate) fn register(env: &Environment) -> Result<Environment, Error> {
    let p = || promise_type().predicate();

    env.register_method("fork", p(), |env, args| {
        fork(env, promise_arg(args, 0, "fork")?, func_arg(args, 1, "fork")?)
    })?
    .register_method("map", p(), |_, args| {
        Ok(map(promise_arg(args, 0, "map")?, func_arg(args, 1, "map")?))
    })?
    .register_method("flat_map", p(), |_, args| {
        Ok(flat_map(promise_arg(args, 0, "flat_map")?, func_arg(args, 1, "flat_map")?))
    })?
    .register_method("pure", shape_names(promise_type().clone()), |_, args| {
        Ok(of(arg(args, 1, "pure")?.clone()))
    })
}
