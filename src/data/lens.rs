//! Functional references.
//!
//! A `Store(setter, getter)` pairs the focused value with a function that
//! rebuilds the whole target from a replacement. A `Lens(run)` turns any
//! target into its store, so `get`, `set` and `modify` never mutate.

use std::sync::OnceLock;

use super::record_arg;
use crate::environment::Environment;
use crate::error::Error;
use crate::models::{arg, func_arg, type_error, Function, MethodResult, Value};
use crate::tagged::{define_product, ProductType, Record};

static STORE: OnceLock<ProductType> = OnceLock::new();
static LENS: OnceLock<ProductType> = OnceLock::new();

pub fn store_type() -> &'static ProductType {
    STORE.get_or_init(|| define_product("Store", &["setter", "getter"]))
}

pub fn lens_type() -> &'static ProductType {
    LENS.get_or_init(|| define_product("Lens", &["run"]))
}

pub fn store(setter: Function, getter: Value) -> Value {
    store_type().instance(vec![Value::Func(setter), getter])
}

pub fn lens(run: Function) -> Value {
    lens_type().instance(vec![Value::Func(run)])
}

fn store_arg<'a>(args: &'a [Value], index: usize, op: &str) -> Result<&'a Record, Error> {
    record_arg(args, index, op, store_type(), "Store")
}

fn lens_arg<'a>(args: &'a [Value], index: usize, op: &str) -> Result<&'a Record, Error> {
    record_arg(args, index, op, lens_type(), "Lens")
}

fn setter(s: &Record) -> Result<&Function, Error> {
    s.values()[0]
        .as_func()
        .ok_or_else(|| type_error("store", "Function setter", &s.values()[0]))
}

/// The focused value
pub fn extract(s: &Record) -> Value {
    s.values()[1].clone()
}

/// `store(f . setter, getter)`
pub fn map_store(s: &Record, f: &Function) -> Result<Value, Error> {
    Ok(store(f.compose(setter(s)?), extract(s)))
}

/// Focus `l` on `target`
pub fn run(env: &Environment, l: &Record, target: Value) -> Result<Record, Error> {
    let body = l.values()[0]
        .as_func()
        .ok_or_else(|| type_error("lens", "Function", &l.values()[0]))?;
    match body.call1(env, target)? {
        Value::Record(s) if s.product() == store_type() => Ok(s),
        other => Err(type_error("lens", "Store result", &other)),
    }
}

pub fn get(env: &Environment, l: &Record, target: Value) -> MethodResult {
    Ok(extract(&run(env, l, target)?))
}

pub fn set(env: &Environment, l: &Record, target: Value, value: Value) -> MethodResult {
    let s = run(env, l, target)?;
    setter(&s)?.call1(env, value)
}

pub fn modify(env: &Environment, l: &Record, target: Value, f: &Function) -> MethodResult {
    let s = run(env, l, target)?;
    let updated = f.call1(env, extract(&s))?;
    setter(&s)?.call1(env, updated)
}

/// Focus through `outer`, then through `inner` on the outer focus
pub fn compose(outer: &Record, inner: &Record) -> Value {
    let outer = outer.clone();
    let inner = inner.clone();
    lens(Function::new("Lens.compose", move |env, args| {
        let target = args.first().cloned().unwrap_or(Value::Null);
        let outer_store = run(env, &outer, target)?;
        let inner_store = run(env, &inner, extract(&outer_store))?;
        let rebuild_outer = setter(&outer_store)?.clone();
        let rebuild_inner = setter(&inner_store)?.clone();
        Ok(store(rebuild_outer.compose(&rebuild_inner), extract(&inner_store)))
    }))
}

/// Focus on `key` of an object; a missing key reads as `Null`
pub fn object_lens(key: &str) -> Value {
    let key = key.to_string();
    lens(Function::new("Lens.object", move |_, args| {
        let target = args.first().cloned().unwrap_or(Value::Null);
        let fields = match target {
            Value::Object(fields) => fields,
            other => return Err(type_error("object_lens", "Object", &other)),
        };
        let focus = fields.get(&key).cloned().unwrap_or(Value::Null);
        let key = key.clone();
        let setter = Function::new("set_key", move |_, xs| {
            let mut updated = fields.clone();
            updated.insert(key.clone(), xs.first().cloned().unwrap_or(Value::Null));
            Ok(Value::Object(updated))
        });
        Ok(store(setter, focus))
    }))
}

/// Focus on a named field of any record
pub fn record_lens(field: &str) -> Value {
    let field = field.to_string();
    lens(Function::new("Lens.record", move |_, args| {
        let record = match args.first() {
            Some(Value::Record(r)) => r.clone(),
            Some(other) => return Err(type_error("record_lens", "Record", other)),
            None => return Err(type_error("record_lens", "Record", &Value::Null)),
        };
        let focus = record
            .get(&field)
            .cloned()
            .ok_or_else(|| type_error("record_lens", "Record with the focused field", &Value::Record(record.clone())))?;
        let field = field.clone();
        let setter = Function::new("set_field", move |_, xs| {
            let value = xs.first().cloned().unwrap_or(Value::Null);
            Ok(Value::Record(record.with_field(&field, value)?))
        });
        Ok(store(setter, focus))
    }))
}

pub(crate) fn register(env: &Environment) -> Result<Environment, Error> {
    let st = || store_type().predicate();
    let ln = || lens_type().predicate();

    env.register_method("map", st(), |_, args| {
        map_store(store_arg(args, 0, "map")?, func_arg(args, 1, "map")?)
    })?
    .register_method("extract", st(), |_, args| Ok(extract(store_arg(args, 0, "extract")?)))?
    .register_method("get", ln(), |env, args| {
        get(env, lens_arg(args, 0, "get")?, arg(args, 1, "get")?.clone())
    })?
    .register_method("set", ln(), |env, args| {
        set(
            env,
            lens_arg(args, 0, "set")?,
            arg(args, 1, "set")?.clone(),
            arg(args, 2, "set")?.clone(),
        )
    })?
    .register_method("modify", ln(), |env, args| {
        modify(
            env,
            lens_arg(args, 0, "modify")?,
            arg(args, 1, "modify")?.clone(),
            func_arg(args, 2, "modify")?,
        )
    })?
    .register_method("compose", ln(), |_, args| {
        Ok(compose(lens_arg(args, 0, "compose")?, lens_arg(args, 1, "compose")?))
    })
}
