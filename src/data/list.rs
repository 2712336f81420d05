//! Cons lists.
//!
//! `List a = Cons a (List a) | Nil`. Every traversal below is a trampoline
//! chain driven by `run`, so a list of a million elements can be built,
//! walked, compared and dropped without growing the stack.

use std::sync::OnceLock;

use super::tuple::tuple2;
use crate::environment::Environment;
use crate::error::Error;
use crate::models::predicates::{shape_is_constructor, shape_is_of, shape_names};
use crate::models::{arg, func_arg, int_arg, shape_arg, type_error, Function, MethodResult, Shape, Value};
use crate::quickcheck::shrink::slice_candidates;
use crate::tagged::{define_sum, SumType};
use crate::trampoline::{done, pending, run, Bounce};

const CONS: usize = 0;
const NIL: usize = 1;

static LIST: OnceLock<SumType> = OnceLock::new();

pub fn list_type() -> &'static SumType {
    LIST.get_or_init(|| define_sum("List", &[("Cons", &["head", "tail"]), ("Nil", &[])]))
}

pub fn cons(head: Value, tail: Value) -> Value {
    list_type().instance(CONS, vec![head, tail])
}

pub fn nil() -> Value {
    list_type().instance(NIL, Vec::new())
}

pub fn is_list(value: &Value) -> bool {
    list_type().is_instance(value)
}

/// Head and tail of a non-empty list
pub fn uncons(list: &Value) -> Option<(&Value, &Value)> {
    match list {
        Value::Variant(v) if v.tag() == CONS && v.sum() == list_type() => {
            let fields = v.values();
            Some((&fields[0], &fields[1]))
        }
        _ => None,
    }
}

pub fn from_vec(items: Vec<Value>) -> Value {
    items
        .into_iter()
        .rev()
        .fold(nil(), |tail, head| cons(head, tail))
}

/// Integers `start..end`
pub fn range(start: i64, end: i64) -> Value {
    fn build<'a>(next: i64, start: i64, acc: Value) -> Bounce<'a, Value> {
        let acc = cons(Value::Int(next), acc);
        if next == start {
            return done(acc);
        }
        pending(move || build(next - 1, start, acc))
    }

    if end <= start {
        return nil();
    }
    run(build(end - 1, start, nil()))
}

fn reverse_onto<'a>(list: Value, acc: Value) -> Bounce<'a, Value> {
    match uncons(&list) {
        None => done(acc),
        Some((head, tail)) => {
            let acc = cons(head.clone(), acc);
            let tail = tail.clone();
            pending(move || reverse_onto(tail, acc))
        }
    }
}

pub fn reverse(list: &Value) -> Value {
    run(reverse_onto(list.clone(), nil()))
}

pub fn size(list: &Value) -> usize {
    fn count<'a>(list: Value, n: usize) -> Bounce<'a, usize> {
        match uncons(&list) {
            None => done(n),
            Some((_, tail)) => {
                let tail = tail.clone();
                pending(move || count(tail, n + 1))
            }
        }
    }
    run(count(list.clone(), 0))
}

pub fn to_vec(list: &Value) -> Vec<Value> {
    fn collect<'a>(list: Value, mut acc: Vec<Value>) -> Bounce<'a, Vec<Value>> {
        match uncons(&list) {
            None => done(acc),
            Some((head, tail)) => {
                acc.push(head.clone());
                let tail = tail.clone();
                pending(move || collect(tail, acc))
            }
        }
    }
    run(collect(list.clone(), Vec::new()))
}

/// `front` followed by `back`
pub fn append_all(front: &Value, back: &Value) -> Value {
    run(reverse_onto(reverse(front), back.clone()))
}

pub fn append(list: &Value, item: Value) -> Value {
    append_all(list, &cons(item, nil()))
}

/// `items` placed in front of `list`, keeping their order
pub fn prepend_all(list: &Value, items: &Value) -> Value {
    append_all(items, list)
}

/// Left fold: `f(f(f(init, x1), x2), ...)`
pub fn fold(env: &Environment, list: &Value, init: Value, f: &Function) -> MethodResult {
    fn step<'a>(env: &'a Environment, f: &'a Function, list: Value, acc: Value) -> Bounce<'a, MethodResult> {
        match uncons(&list) {
            None => done(Ok(acc)),
            Some((head, tail)) => match f.apply(env, &[acc, head.clone()]) {
                Ok(acc) => {
                    let tail = tail.clone();
                    pending(move || step(env, f, tail, acc))
                }
                Err(e) => done(Err(e)),
            },
        }
    }
    run(step(env, f, list.clone(), init))
}

pub fn map(env: &Environment, list: &Value, f: &Function) -> MethodResult {
    fn step<'a>(env: &'a Environment, f: &'a Function, list: Value, acc: Value) -> Bounce<'a, MethodResult> {
        match uncons(&list) {
            None => done(Ok(acc)),
            Some((head, tail)) => match f.call1(env, head.clone()) {
                Ok(mapped) => {
                    let acc = cons(mapped, acc);
                    let tail = tail.clone();
                    pending(move || step(env, f, tail, acc))
                }
                Err(e) => done(Err(e)),
            },
        }
    }
    run(step(env, f, list.clone(), nil())).map(|reversed| reverse(&reversed))
}

/// `f` must return a list for every element
pub fn flat_map(env: &Environment, list: &Value, f: &Function) -> MethodResult {
    fn step<'a>(env: &'a Environment, f: &'a Function, list: Value, acc: Value) -> Bounce<'a, MethodResult> {
        match uncons(&list) {
            None => done(Ok(acc)),
            Some((head, tail)) => match f.call1(env, head.clone()) {
                Ok(inner) if is_list(&inner) => {
                    let acc = run(reverse_onto(inner, acc));
                    let tail = tail.clone();
                    pending(move || step(env, f, tail, acc))
                }
                Ok(other) => done(Err(type_error("flat_map", "List result", &other))),
                Err(e) => done(Err(e)),
            },
        }
    }
    run(step(env, f, list.clone(), nil())).map(|reversed| reverse(&reversed))
}

fn accepts(env: &Environment, p: &Function, item: &Value, op: &str) -> Result<bool, Error> {
    let verdict = p.call1(env, item.clone())?;
    verdict
        .as_bool()
        .ok_or_else(|| type_error(op, "Bool result", &verdict))
}

pub fn filter(env: &Environment, list: &Value, p: &Function) -> MethodResult {
    fn step<'a>(env: &'a Environment, p: &'a Function, list: Value, acc: Value) -> Bounce<'a, MethodResult> {
        match uncons(&list) {
            None => done(Ok(acc)),
            Some((head, tail)) => match accepts(env, p, head, "filter") {
                Ok(keep) => {
                    let acc = if keep { cons(head.clone(), acc) } else { acc };
                    let tail = tail.clone();
                    pending(move || step(env, p, tail, acc))
                }
                Err(e) => done(Err(e)),
            },
        }
    }
    run(step(env, p, list.clone(), nil())).map(|reversed| reverse(&reversed))
}

pub fn exists(env: &Environment, list: &Value, p: &Function) -> Result<bool, Error> {
    fn step<'a>(env: &'a Environment, p: &'a Function, list: Value) -> Bounce<'a, Result<bool, Error>> {
        match uncons(&list) {
            None => done(Ok(false)),
            Some((head, tail)) => match accepts(env, p, head, "exists") {
                Ok(true) => done(Ok(true)),
                Ok(false) => {
                    let tail = tail.clone();
                    pending(move || step(env, p, tail))
                }
                Err(e) => done(Err(e)),
            },
        }
    }
    run(step(env, p, list.clone()))
}

/// `Tuple2(accepted, rejected)`, both in original order
pub fn partition(env: &Environment, list: &Value, p: &Function) -> MethodResult {
    fn step<'a>(
        env: &'a Environment,
        p: &'a Function,
        list: Value,
        yes: Value,
        no: Value,
    ) -> Bounce<'a, Result<(Value, Value), Error>> {
        match uncons(&list) {
            None => done(Ok((yes, no))),
            Some((head, tail)) => match accepts(env, p, head, "partition") {
                Ok(true) => {
                    let yes = cons(head.clone(), yes);
                    let tail = tail.clone();
                    pending(move || step(env, p, tail, yes, no))
                }
                Ok(false) => {
                    let no = cons(head.clone(), no);
                    let tail = tail.clone();
                    pending(move || step(env, p, tail, yes, no))
                }
                Err(e) => done(Err(e)),
            },
        }
    }
    let (yes, no) = run(step(env, p, list.clone(), nil(), nil()))?;
    Ok(tuple2(reverse(&yes), reverse(&no)))
}

/// Element-wise `equal` through the environment; lengths must match
pub fn equal(env: &Environment, a: &Value, b: &Value) -> Result<bool, Error> {
    fn step<'a>(env: &'a Environment, a: Value, b: Value) -> Bounce<'a, Result<bool, Error>> {
        match (uncons(&a), uncons(&b)) {
            (None, None) => done(Ok(true)),
            (Some((x, xs)), Some((y, ys))) => {
                match env.call_bool("equal", &[x.clone(), y.clone()]) {
                    Ok(true) => {
                        let (xs, ys) = (xs.clone(), ys.clone());
                        pending(move || step(env, xs, ys))
                    }
                    other => done(other),
                }
            }
            _ => done(Ok(false)),
        }
    }
    run(step(env, a.clone(), b.clone()))
}

fn list_arg<'a>(args: &'a [Value], index: usize, op: &str) -> Result<&'a Value, Error> {
    let value = arg(args, index, op)?;
    if is_list(value) {
        Ok(value)
    } else {
        Err(type_error(op, "List", value))
    }
}

pub(crate) fn register(env: &Environment) -> Result<Environment, Error> {
    let list = || list_type().predicate();
    let ty = list_type().clone();

    env.register_method("concat", list(), |_, args| {
        Ok(append_all(list_arg(args, 0, "concat")?, list_arg(args, 1, "concat")?))
    })?
    .register_method("fold", list(), |env, args| {
        let init = arg(args, 1, "fold")?.clone();
        fold(env, &args[0], init, func_arg(args, 2, "fold")?)
    })?
    .register_method("map", list(), |env, args| {
        map(env, &args[0], func_arg(args, 1, "map")?)
    })?
    .register_method("flat_map", list(), |env, args| {
        flat_map(env, &args[0], func_arg(args, 1, "flat_map")?)
    })?
    .register_method("filter", list(), |env, args| {
        filter(env, &args[0], func_arg(args, 1, "filter")?)
    })?
    .register_method("exists", list(), |env, args| {
        exists(env, &args[0], func_arg(args, 1, "exists")?).map(Value::Bool)
    })?
    .register_method("partition", list(), |env, args| {
        partition(env, &args[0], func_arg(args, 1, "partition")?)
    })?
    .register_method("reverse", list(), |_, args| Ok(reverse(&args[0])))?
    .register_method("size", list(), |_, args| Ok(Value::Int(size(&args[0]) as i64)))?
    .register_method("equal", list(), |env, args| {
        let other = arg(args, 1, "equal")?;
        if !is_list(other) {
            return Ok(Value::Bool(false));
        }
        equal(env, &args[0], other).map(Value::Bool)
    })?
    .register_method("zip", list(), |_, args| {
        let right = to_vec(list_arg(args, 1, "zip")?);
        Ok(Value::Array(
            to_vec(&args[0])
                .into_iter()
                .zip(right)
                .map(|(a, b)| Value::Array(vec![a, b]))
                .collect(),
        ))
    })?
    .register_method("to_array", list(), |_, args| Ok(Value::Array(to_vec(&args[0]))))?
    .register_method("shrink", list(), |_, args| {
        let items = to_vec(&args[0]);
        Ok(Value::Array(
            slice_candidates(&items).into_iter().map(from_vec).collect(),
        ))
    })?
    .register_method("arbitrary", shape_is_of(ty.clone()), |env, args| {
        let elements = match shape_arg(args, 0, "arbitrary")? {
            Shape::Of(_, inner) => inner.as_ref().clone(),
            _ => Shape::AnyVal,
        };
        let size = int_arg(args, 1, "arbitrary")?;
        arbitrary_list(env, elements, size)
    })?
    .register_method("arbitrary", shape_is_constructor(ty.clone()), |env, args| {
        arbitrary_list(env, Shape::AnyVal, int_arg(args, 1, "arbitrary")?)
    })?
    .register_method("empty", shape_names(ty.clone()), |_, _| Ok(nil()))?
    .register_method("pure", shape_is_constructor(ty), |_, args| {
        Ok(cons(arg(args, 1, "pure")?.clone(), nil()))
    })
}

fn arbitrary_list(env: &Environment, elements: Shape, size: i64) -> MethodResult {
    let items = env.call2(
        "arbitrary",
        Value::Shape(Shape::array_of(elements)),
        Value::Int(size),
    )?;
    match items {
        Value::Array(items) => Ok(from_vec(items)),
        other => Err(type_error("arbitrary", "Array", &other)),
    }
}
