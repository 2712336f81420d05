//! The state monad: `State(run)` where `run(s)` yields `Tuple2(a, s')`.

use std::sync::OnceLock;

use super::record_arg;
use super::tuple::{tuple2, tuple2_type};
use crate::environment::Environment;
use crate::error::Error;
use crate::models::predicates::shape_names;
use crate::models::{arg, func_arg, type_error, Function, MethodResult, Value};
use crate::tagged::{define_product, ProductType, Record};

static STATE: OnceLock<ProductType> = OnceLock::new();

pub fn state_type() -> &'static ProductType {
    STATE.get_or_init(|| define_product("State", &["run"]))
}

/// Wrap a transition `s -> Tuple2(a, s')`
pub fn state(run: Function) -> Value {
    state_type().instance(vec![Value::Func(run)])
}

fn state_arg<'a>(args: &'a [Value], index: usize, op: &str) -> Result<&'a Record, Error> {
    record_arg(args, index, op, state_type(), "State")
}

fn transition(st: &Record) -> Result<&Function, Error> {
    st.values()[0]
        .as_func()
        .ok_or_else(|| type_error("run_state", "Function", &st.values()[0]))
}

/// Leaves the state alone and yields `a`
pub fn of(a: Value) -> Value {
    state(Function::new("State.of", move |_, args| {
        Ok(tuple2(a.clone(), args.first().cloned().unwrap_or(Value::Null)))
    }))
}

/// Yields the current state
pub fn get() -> Value {
    state(Function::new("State.get", |_, args| {
        let s = args.first().cloned().unwrap_or(Value::Null);
        Ok(tuple2(s.clone(), s))
    }))
}

/// Replaces the state, yielding `Null`
pub fn put(s: Value) -> Value {
    state(Function::new("State.put", move |_, _| Ok(tuple2(Value::Null, s.clone()))))
}

/// Replaces the state with `f(state)`, yielding `Null`
pub fn modify(f: Function) -> Value {
    state(Function::new("State.modify", move |env, args| {
        let s = args.first().cloned().unwrap_or(Value::Null);
        Ok(tuple2(Value::Null, f.call1(env, s)?))
    }))
}

/// Run `st` from `initial`, returning `(value, final state)`
pub fn run_state(env: &Environment, st: &Record, initial: Value) -> Result<(Value, Value), Error> {
    let out = transition(st)?.call1(env, initial)?;
    match &out {
        Value::Record(pair) if pair.product() == tuple2_type() => {
            Ok((pair.values()[0].clone(), pair.values()[1].clone()))
        }
        other => Err(type_error("run_state", "Tuple2 transition result", other)),
    }
}

pub fn eval_state(env: &Environment, st: &Record, initial: Value) -> MethodResult {
    run_state(env, st, initial).map(|(a, _)| a)
}

pub fn exec_state(env: &Environment, st: &Record, initial: Value) -> MethodResult {
    run_state(env, st, initial).map(|(_, s)| s)
}

/// Sequence `st` into `f(a)`, which must return another State
pub fn flat_map(st: &Record, f: &Function) -> Value {
    let st = st.clone();
    let f = f.clone();
    state(Function::new("State.flat_map", move |env, args| {
        let initial = args.first().cloned().unwrap_or(Value::Null);
        let (a, s) = run_state(env, &st, initial)?;
        let next = f.call1(env, a)?;
        let next = match &next {
            Value::Record(r) if r.product() == state_type() => r,
            other => return Err(type_error("flat_map", "State result", other)),
        };
        let (b, s) = run_state(env, next, s)?;
        Ok(tuple2(b, s))
    }))
}

pub fn map(st: &Record, f: &Function) -> Value {
    let st = st.clone();
    let f = f.clone();
    state(Function::new("State.map", move |env, args| {
        let initial = args.first().cloned().unwrap_or(Value::Null);
        let (a, s) = run_state(env, &st, initial)?;
        Ok(tuple2(f.call1(env, a)?, s))
    }))
}

/// Run the function-yielding state, then `other`, and apply
pub fn ap(st_f: &Record, other: &Record) -> Value {
    let st_f = st_f.clone();
    let other = other.clone();
    state(Function::new("State.ap", move |env, args| {
        let initial = args.first().cloned().unwrap_or(Value::Null);
        let (f, s) = run_state(env, &st_f, initial)?;
        let (a, s) = run_state(env, &other, s)?;
        match f {
            Value::Func(f) => Ok(tuple2(f.call1(env, a)?, s)),
            got => Err(type_error("ap", "Function yielded by State", &got)),
        }
    }))
}

pub(crate) fn register(env: &Environment) -> Result<Environment, Error> {
    let st = || state_type().predicate();

    env.register_method("flat_map", st(), |_, args| {
        Ok(flat_map(state_arg(args, 0, "flat_map")?, func_arg(args, 1, "flat_map")?))
    })?
    .register_method("map", st(), |_, args| {
        Ok(map(state_arg(args, 0, "map")?, func_arg(args, 1, "map")?))
    })?
    .register_method("ap", st(), |_, args| {
        Ok(ap(state_arg(args, 0, "ap")?, state_arg(args, 1, "ap")?))
    })?
    .register_method("run_state", st(), |env, args| {
        let (a, s) = run_state(env, state_arg(args, 0, "run_state")?, arg(args, 1, "run_state")?.clone())?;
        Ok(tuple2(a, s))
    })?
    .register_method("eval_state", st(), |env, args| {
        eval_state(env, state_arg(args, 0, "eval_state")?, arg(args, 1, "eval_state")?.clone())
    })?
    .register_method("exec_state", st(), |env, args| {
        exec_state(env, state_arg(args, 0, "exec_state")?, arg(args, 1, "exec_state")?.clone())
    })?
    .register_method("pure", shape_names(state_type().clone()), |_, args| {
        Ok(of(arg(args, 1, "pure")?.clone()))
    })
}
