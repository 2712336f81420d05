//! Integration tests for the built-in data types
//!
//! Every operation here goes through `Environment::call*` on the standard
//! environment, the way application code uses the data types.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use lambdata::data::either::{left, right};
use lambdata::data::lens::object_lens;
use lambdata::data::list::{from_vec, range, to_vec};
use lambdata::data::option::{none, some};
use lambdata::data::validation::{failure, success};
use lambdata::data::{io, promise, state, stream};
use lambdata::{Environment, Function, Value};

fn env() -> Environment {
    lambdata::standard().unwrap()
}

fn int(n: i64) -> Value {
    Value::Int(n)
}

fn ints(xs: &[i64]) -> Value {
    Value::Array(xs.iter().copied().map(Value::Int).collect())
}

fn inc() -> Value {
    Value::func("inc", |_, args| Ok(Value::Int(args[0].as_int().unwrap() + 1)))
}

#[test]
fn test_option_and_either_chain() {
    let env = env();
    assert_eq!(env.call2("map", some(int(1)), inc()).unwrap(), some(int(2)));
    assert_eq!(env.call2("map", none(), inc()).unwrap(), none());
    assert_eq!(env.call2("get_or_else", none(), int(7)).unwrap(), int(7));
    assert_eq!(
        env.call2("concat", some(Value::str("ab")), some(Value::str("cd"))).unwrap(),
        some(Value::str("abcd"))
    );

    assert_eq!(env.call2("map", right(int(1)), inc()).unwrap(), right(int(2)));
    assert_eq!(env.call2("map", left(Value::str("e")), inc()).unwrap(), left(Value::str("e")));
    assert_eq!(env.call1("swap", left(int(3))).unwrap(), right(int(3)));
}

#[test]
fn test_validation_accumulates_failures() {
    let env = env();
    let add = Function::new("add", |_, args| {
        Ok(Value::Int(args[0].as_int().unwrap() + args[1].as_int().unwrap()))
    });
    let lifted = |a: Value, b: Value| lambdata::lift_a2(&env, &add, a, b).unwrap();

    assert_eq!(lifted(success(int(1)), success(int(2))), success(int(3)));
    assert_eq!(
        lifted(failure(Value::Array(vec![Value::str("no a")])), success(int(2))),
        failure(Value::Array(vec![Value::str("no a")]))
    );
    assert_eq!(
        lifted(
            failure(Value::Array(vec![Value::str("no a")])),
            failure(Value::Array(vec![Value::str("no b")]))
        ),
        failure(Value::Array(vec![Value::str("no a"), Value::str("no b")]))
    );
}

#[test]
fn test_lists_are_stack_safe() {
    let env = env();
    let big = range(0, 200_000);
    let mapped = env.call2("map", big.clone(), inc()).unwrap();
    assert_eq!(env.call1("size", mapped.clone()).unwrap(), int(200_000));

    let sum = Value::func("sum", |_, args| {
        Ok(Value::Int(args[0].as_int().unwrap() + args[1].as_int().unwrap()))
    });
    let total = env.call("fold", &[mapped, int(0), sum]).unwrap();
    assert_eq!(total, int((1..=200_000).sum()));

    let twice = env.call1("reverse", env.call1("reverse", big.clone()).unwrap()).unwrap();
    assert!(env.call_bool("equal", &[twice, big]).unwrap());
}

#[test]
fn test_list_shrinks_to_suffixes() {
    let env = env();
    let list = from_vec(vec![int(1), int(2), int(3), int(4)]);
    let candidates = lambdata::quickcheck::shrink(&env, &list).unwrap();
    let candidates: Vec<Vec<Value>> = candidates.iter().map(to_vec).collect();
    assert_eq!(
        candidates,
        vec![vec![], vec![int(3), int(4)], vec![int(4)]]
    );
}

#[test]
fn test_stream_take_restarts_per_fork() {
    let env = env();
    let numbers = stream::from_values((1..=6).map(Value::Int).collect());
    let evens = env
        .call2(
            "filter",
            numbers,
            Value::func("even", |_, args| Ok(Value::Bool(args[0].as_int().unwrap() % 2 == 0))),
        )
        .unwrap();
    let first_two = env.call2("take", evens, int(2)).unwrap();

    assert_eq!(env.call1("to_array", first_two.clone()).unwrap(), ints(&[2, 4]));
    assert_eq!(env.call1("to_array", first_two).unwrap(), ints(&[2, 4]));
}

#[test]
fn test_effects_are_deferred() {
    let env = env();
    let runs = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&runs);
    let action = io::io(Function::new("tick", move |_, _| {
        Ok(Value::Int(counter.fetch_add(1, Ordering::SeqCst) as i64))
    }));
    let mapped = env.call2("map", action, inc()).unwrap();
    assert_eq!(runs.load(Ordering::SeqCst), 0);

    assert_eq!(env.call1("perform", mapped.clone()).unwrap(), int(1));
    assert_eq!(env.call1("perform", mapped).unwrap(), int(2));
    assert_eq!(runs.load(Ordering::SeqCst), 2);

    let p = env.call2("map", promise::of(int(41)), inc()).unwrap();
    let settled = promise::settle(&env, p.as_record().unwrap()).unwrap();
    assert_eq!(settled, Some(int(42)));
}

#[test]
fn test_state_counter() {
    let env = env();
    let bump = state::modify(Function::new("bump", |_, args| {
        Ok(Value::Int(args[0].as_int().unwrap() + 1))
    }));
    let read_after_bump = env
        .call2(
            "flat_map",
            bump,
            Value::func("read", |_, _| Ok(state::get())),
        )
        .unwrap();
    let pair = env.call2("run_state", read_after_bump, int(9)).unwrap();
    let pair = pair.as_record().unwrap();
    assert_eq!(pair.values(), &[int(10), int(10)]);
}

#[test]
fn test_object_lens_round_trip() {
    let env = env();
    let mut fields = BTreeMap::new();
    fields.insert("name".to_string(), Value::str("ada"));
    let person = Value::Object(fields);
    let name = object_lens("name");
    let age = object_lens("age");

    assert_eq!(env.call2("get", name.clone(), person.clone()).unwrap(), Value::str("ada"));
    assert_eq!(env.call2("get", age.clone(), person.clone()).unwrap(), Value::Null);

    let older = env.call("set", &[age.clone(), person.clone(), int(36)]).unwrap();
    assert_eq!(env.call2("get", age, older.clone()).unwrap(), int(36));
    assert_eq!(env.call2("get", name, older).unwrap(), Value::str("ada"));
}
