//! Push-based streams: `Stream(fork)` where `fork(next, done)` calls `next`
//! once per element and `done` once at the end.
//!
//! Like promises, streams are plain values. Forking drives them on the
//! calling thread.

use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;

use super::record_arg;
use crate::environment::Environment;
use crate::error::Error;
use crate::models::predicates::{shape_is_of, shape_names};
use crate::models::{arg, func_arg, int_arg, shape_arg, type_error, Function, MethodResult, Shape, Value};
use crate::tagged::{define_product, ProductType, Record};

static STREAM: OnceLock<ProductType> = OnceLock::new();

pub fn stream_type() -> &'static ProductType {
    STREAM.get_or_init(|| define_product("Stream", &["fork"]))
}

pub fn stream(fork: Function) -> Value {
    stream_type().instance(vec![Value::Func(fork)])
}

fn stream_arg<'a>(args: &'a [Value], index: usize, op: &str) -> Result<&'a Record, Error> {
    record_arg(args, index, op, stream_type(), "Stream")
}

fn as_stream<'a>(value: &'a Value, op: &str) -> Result<&'a Record, Error> {
    match value {
        Value::Record(r) if r.product() == stream_type() => Ok(r),
        other => Err(type_error(op, "Stream", other)),
    }
}

/// The `(next, done)` pair handed to a fork body
fn sinks(args: &[Value]) -> Result<(Function, Function), Error> {
    Ok((func_arg(args, 0, "fork")?.clone(), func_arg(args, 1, "fork")?.clone()))
}

fn first(xs: &[Value]) -> Value {
    xs.first().cloned().unwrap_or(Value::Null)
}

fn noop() -> Function {
    Function::constant(Value::Null)
}

/// Drive `s`, sending elements to `next` and completion to `done`
pub fn fork(env: &Environment, s: &Record, next: &Function, done: &Function) -> MethodResult {
    match &s.values()[0] {
        Value::Func(body) => body.apply(env, &[Value::Func(next.clone()), Value::Func(done.clone())]),
        other => Err(type_error("fork", "Function", other)),
    }
}

pub fn of(x: Value) -> Value {
    from_values(vec![x])
}

pub fn empty() -> Value {
    from_values(Vec::new())
}

pub fn from_values(values: Vec<Value>) -> Value {
    stream(Function::new("Stream.from_values", move |env, args| {
        let (next, done) = sinks(args)?;
        for x in &values {
            next.call1(env, x.clone())?;
        }
        done.apply(env, &[])
    }))
}

pub fn map(s: &Record, f: &Function) -> Value {
    let s = s.clone();
    let f = f.clone();
    stream(Function::new("Stream.map", move |env, args| {
        let (next, done) = sinks(args)?;
        let f = f.clone();
        let mapped = Function::new("mapped", move |env, xs| next.call1(env, f.call1(env, first(xs))?));
        fork(env, &s, &mapped, &done)
    }))
}

/// Each element's substream is forked in turn; inner completions are ignored
pub fn flat_map(s: &Record, f: &Function) -> Value {
    let s = s.clone();
    let f = f.clone();
    stream(Function::new("Stream.flat_map", move |env, args| {
        let (next, done) = sinks(args)?;
        let f = f.clone();
        let expand = Function::new("expand", move |env, xs| {
            let inner = f.call1(env, first(xs))?;
            fork(env, as_stream(&inner, "flat_map")?, &next, &noop())
        });
        fork(env, &s, &expand, &done)
    }))
}

/// All of `a`, then all of `b`
pub fn concat(a: &Record, b: &Record) -> Value {
    let a = a.clone();
    let b = b.clone();
    stream(Function::new("Stream.concat", move |env, args| {
        let (next, done) = sinks(args)?;
        let b = b.clone();
        let forward = next.clone();
        let then = Function::new("then", move |env, _| fork(env, &b, &forward, &done));
        fork(env, &a, &next, &then)
    }))
}

/// `p` must return a Bool
pub fn filter(s: &Record, p: &Function) -> Value {
    let s = s.clone();
    let p = p.clone();
    stream(Function::new("Stream.filter", move |env, args| {
        let (next, done) = sinks(args)?;
        let p = p.clone();
        let keep = Function::new("keep", move |env, xs| {
            let x = first(xs);
            match p.call1(env, x.clone())? {
                Value::Bool(true) => next.call1(env, x),
                Value::Bool(false) => Ok(Value::Null),
                other => Err(type_error("filter", "Bool predicate result", &other)),
            }
        });
        fork(env, &s, &keep, &done)
    }))
}

/// A one-element stream emitting the left fold `f(acc, x)` when `s` completes
pub fn fold(s: &Record, init: Value, f: &Function) -> Value {
    let s = s.clone();
    let f = f.clone();
    stream(Function::new("Stream.fold", move |env, args| {
        let (next, done) = sinks(args)?;
        let acc = Arc::new(Mutex::new(init.clone()));

        let f = f.clone();
        let step_acc = acc.clone();
        let step = Function::new("step", move |env, xs| {
            let current = step_acc.lock().clone();
            let updated = f.apply(env, &[current, first(xs)])?;
            *step_acc.lock() = updated;
            Ok(Value::Null)
        });
        let finish = Function::new("finish", move |env, _| {
            let total = acc.lock().clone();
            next.call1(env, total)?;
            done.apply(env, &[])
        });
        fork(env, &s, &step, &finish)
    }))
}

/// Only the first `n` elements; the counter is fresh for every fork
pub fn take(s: &Record, n: usize) -> Value {
    let s = s.clone();
    stream(Function::new("Stream.take", move |env, args| {
        let (next, done) = sinks(args)?;
        let seen = Mutex::new(0usize);
        let gate = Function::new("take", move |env, xs| {
            let mut count = seen.lock();
            if *count < n {
                *count += 1;
                drop(count);
                next.call1(env, first(xs))
            } else {
                Ok(Value::Null)
            }
        });
        fork(env, &s, &gate, &done)
    }))
}

/// All but the first `n` elements; the counter is fresh for every fork
pub fn skip(s: &Record, n: usize) -> Value {
    let s = s.clone();
    stream(Function::new("Stream.drop", move |env, args| {
        let (next, done) = sinks(args)?;
        let seen = Mutex::new(0usize);
        let gate = Function::new("drop", move |env, xs| {
            let mut count = seen.lock();
            if *count < n {
                *count += 1;
                Ok(Value::Null)
            } else {
                drop(count);
                next.call1(env, first(xs))
            }
        });
        fork(env, &s, &gate, &done)
    }))
}

/// Every element the stream emits, in order
pub fn collect(env: &Environment, s: &Record) -> Result<Vec<Value>, Error> {
    let buffer = Arc::new(Mutex::new(Vec::new()));
    let sink = buffer.clone();
    let push = Function::new("collect", move |_, xs| {
        sink.lock().push(first(xs));
        Ok(Value::Null)
    });
    fork(env, s, &push, &noop())?;
    let items = std::mem::take(&mut *buffer.lock());
    Ok(items)
}

/// Element-wise equality; streams of different lengths are unequal
pub fn equal(env: &Environment, a: &Record, b: &Record) -> Result<bool, Error> {
    let (xs, ys) = (collect(env, a)?, collect(env, b)?);
    if xs.len() != ys.len() {
        return Ok(false);
    }
    for (x, y) in xs.into_iter().zip(ys) {
        if !env.call_bool("equal", &[x, y])? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Pairs `[a, b]` up to the shorter stream's length
pub fn zip(a: &Record, b: &Record) -> Value {
    let a = a.clone();
    let b = b.clone();
    stream(Function::new("Stream.zip", move |env, args| {
        let (next, done) = sinks(args)?;
        let pairs = collect(env, &a)?
            .into_iter()
            .zip(collect(env, &b)?)
            .map(|(x, y)| Value::Array(vec![x, y]));
        for pair in pairs {
            next.call1(env, pair)?;
        }
        done.apply(env, &[])
    }))
}

fn count_arg(args: &[Value], op: &str) -> Result<usize, Error> {
    let value = arg(args, 1, op)?;
    match value.as_int() {
        Some(n) => Ok(n.max(0) as usize),
        None => Err(type_error(op, "Number (integer)", value)),
    }
}

pub(crate) fn register(env: &Environment) -> Result<Environment, Error> {
    let st = || stream_type().predicate();

    env.register_method("fork", st(), |env, args| {
        fork(
            env,
            stream_arg(args, 0, "fork")?,
            func_arg(args, 1, "fork")?,
            func_arg(args, 2, "fork")?,
        )
    })?
    .register_method("map", st(), |_, args| {
        Ok(map(stream_arg(args, 0, "map")?, func_arg(args, 1, "map")?))
    })?
    .register_method("flat_map", st(), |_, args| {
        Ok(flat_map(stream_arg(args, 0, "flat_map")?, func_arg(args, 1, "flat_map")?))
    })?
    .register_method("concat", st(), |_, args| {
        Ok(concat(stream_arg(args, 0, "concat")?, stream_arg(args, 1, "concat")?))
    })?
    .register_method("filter", st(), |_, args| {
        Ok(filter(stream_arg(args, 0, "filter")?, func_arg(args, 1, "filter")?))
    })?
    .register_method("fold", st(), |_, args| {
        let s = stream_arg(args, 0, "fold")?;
        Ok(fold(s, arg(args, 1, "fold")?.clone(), func_arg(args, 2, "fold")?))
    })?
    .register_method("take", st(), |_, args| {
        Ok(take(stream_arg(args, 0, "take")?, count_arg(args, "take")?))
    })?
    .register_method("drop", st(), |_, args| {
        Ok(skip(stream_arg(args, 0, "drop")?, count_arg(args, "drop")?))
    })?
    .register_method("to_array", st(), |env, args| {
        Ok(Value::Array(collect(env, stream_arg(args, 0, "to_array")?)?))
    })?
    .register_method("equal", st(), |env, args| {
        let a = stream_arg(args, 0, "equal")?;
        match arg(args, 1, "equal")? {
            Value::Record(b) if b.product() == stream_type() => equal(env, a, b).map(Value::Bool),
            _ => Ok(Value::Bool(false)),
        }
    })?
    .register_method("zip", st(), |_, args| {
        Ok(zip(stream_arg(args, 0, "zip")?, stream_arg(args, 1, "zip")?))
    })?
    .register_method("arbitrary", shape_is_of(stream_type().clone()), |env, args| {
        let elements = match shape_arg(args, 0, "arbitrary")? {
            Shape::Of(_, inner) => inner.as_ref().clone(),
            _ => Shape::AnyVal,
        };
        let size = int_arg(args, 1, "arbitrary")?;
        match env.call2("arbitrary", Value::Shape(Shape::array_of(elements)), Value::Int((size - 1).max(0)))? {
            Value::Array(items) => Ok(from_values(items)),
            other => Err(type_error("arbitrary", "Array", &other)),
        }
    })?
    .register_method("empty", shape_names(stream_type().clone()), |_, _| Ok(empty()))?
    .register_method("pure", shape_names(stream_type().clone()), |_, args| {
        Ok(of(arg(args, 1, "pure")?.clone()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(v: &Value) -> &Record {
        v.as_record().unwrap()
    }

    fn ints(xs: &[i64]) -> Vec<Value> {
        xs.iter().map(|&n| Value::Int(n)).collect()
    }

    fn numbers() -> Value {
        from_values(ints(&[1, 2, 3, 4, 5]))
    }

    #[test]
    fn test_map_filter_collect() {
        let env = Environment::new();
        let square = Function::new("square", |_, xs| {
            let n = xs[0].as_int().unwrap_or(0);
            Ok(Value::Int(n * n))
        });
        let odd = Function::new("odd", |_, xs| Ok(Value::Bool(xs[0].as_int().unwrap_or(0) % 2 == 1)));

        let squares = map(record(&numbers()), &square);
        let odd_squares = filter(record(&squares), &odd);
        assert_eq!(collect(&env, record(&odd_squares)).unwrap(), ints(&[1, 9, 25]));
    }

    #[test]
    fn test_concat_and_flat_map_preserve_order() {
        let env = Environment::new();
        let joined = concat(record(&from_values(ints(&[1, 2]))), record(&of(Value::Int(3))));
        assert_eq!(collect(&env, record(&joined)).unwrap(), ints(&[1, 2, 3]));

        let twice = Function::new("twice", |_, xs| Ok(from_values(vec![xs[0].clone(), xs[0].clone()])));
        let doubled = flat_map(record(&joined), &twice);
        assert_eq!(collect(&env, record(&doubled)).unwrap(), ints(&[1, 1, 2, 2, 3, 3]));
        assert!(collect(&env, record(&empty())).unwrap().is_empty());
    }

    #[test]
    fn test_fold_emits_total_at_completion() {
        let env = Environment::new();
        let sum = Function::new("sum", |_, xs| {
            Ok(Value::Int(xs[0].as_int().unwrap_or(0) + xs[1].as_int().unwrap_or(0)))
        });
        let total = fold(record(&numbers()), Value::Int(0), &sum);
        assert_eq!(collect(&env, record(&total)).unwrap(), ints(&[15]));
    }

    #[test]
    fn test_take_and_drop_restart_per_fork() {
        let env = Environment::new();
        let first_two = take(record(&numbers()), 2);
        let rest = skip(record(&numbers()), 3);

        assert_eq!(collect(&env, record(&first_two)).unwrap(), ints(&[1, 2]));
        assert_eq!(collect(&env, record(&first_two)).unwrap(), ints(&[1, 2]));
        assert_eq!(collect(&env, record(&rest)).unwrap(), ints(&[4, 5]));
        assert_eq!(collect(&env, record(&rest)).unwrap(), ints(&[4, 5]));
    }

    #[test]
    fn test_equal_compares_elements() {
        let env = Environment::standard().unwrap();
        let same = env.call2("equal", from_values(ints(&[1, 2])), from_values(ints(&[1, 2])));
        assert_eq!(same.unwrap(), Value::Bool(true));

        let shorter = env.call2("equal", from_values(ints(&[1, 2])), from_values(ints(&[1])));
        assert_eq!(shorter.unwrap(), Value::Bool(false));

        let different = env.call2("equal", numbers(), from_values(ints(&[1, 2, 3, 4, 6])));
        assert_eq!(different.unwrap(), Value::Bool(false));

        let mapped = map(record(&numbers()), &Function::new("id", |_, xs| Ok(xs[0].clone())));
        assert!(equal(&env, record(&mapped), record(&numbers())).unwrap());
        assert_eq!(env.call2("equal", numbers(), Value::Array(ints(&[1]))).unwrap(), Value::Bool(false));
    }

    #[test]
    fn test_zip_stops_at_shorter() {
        let env = Environment::standard().unwrap();
        let letters = from_values(vec![Value::str("a"), Value::str("b")]);
        let zipped = env.call2("zip", numbers(), letters).unwrap();
        assert_eq!(
            collect(&env, record(&zipped)).unwrap(),
            vec![
                Value::Array(vec![Value::Int(1), Value::str("a")]),
                Value::Array(vec![Value::Int(2), Value::str("b")]),
            ]
        );
    }
}
