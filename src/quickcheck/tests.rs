//! Tests for generation, shrinking and the trial loop.
//!
//! This module covers:
//! - Generators: bounds per shape and size, constructor shapes
//! - for_all: passing properties, first failure, trial counting
//! - find_smallest: greedy per-position acceptance

use super::*;
use crate::data::list::{is_list, list_type};
use crate::data::option::option_type;
use crate::data::stream::{collect, stream_type};
use crate::data::tuple::tuple_type;
use crate::environment::Environment;
use crate::error::Error;
use crate::models::{Shape, Value};
use crate::quickcheck::arbitrary::magnitude;
use crate::quickcheck::shrink::int_candidates;

fn env(seed: u64) -> Environment {
    Environment::standard().unwrap().with_seed(seed)
}

fn number(v: &Value) -> i64 {
    v.as_int().expect("generated a number")
}

// ============================================================================
// UNIT TESTS - Generators
// ============================================================================

#[test]
fn test_numbers_stay_within_magnitude() {
    let env = env(1);
    for size in [0, 1, 10, 50, 99] {
        let bound = magnitude(size, DEFAULT_GOAL);
        for _ in 0..50 {
            let n = number(&arbitrary(&env, &Shape::Number, size).unwrap());
            assert!((n.abs() as f64) < bound.max(1.0), "{} out of bound at size {}", n, size);
        }
    }
    assert_eq!(arbitrary(&env, &Shape::Number, 0).unwrap(), Value::Int(0));
}

#[test]
fn test_arrays_and_strings_are_bounded_by_size() {
    let env = env(2);
    for _ in 0..100 {
        let items = arbitrary(&env, &Shape::array_of(Shape::Bool), 6).unwrap();
        let items = items.as_array().unwrap();
        assert!(items.len() < 6);
        assert!(items.iter().all(|v| matches!(v, Value::Bool(_))));

        let text = arbitrary(&env, &Shape::Str, 6).unwrap();
        let text = text.as_str().unwrap();
        assert!(text.chars().count() < 5);
        assert!(text.chars().all(|c| (' '..='~').contains(&c)));
    }
    assert_eq!(
        arbitrary(&env, &Shape::Array, 0).unwrap(),
        Value::Array(Vec::new())
    );
}

#[test]
fn test_object_like_generates_every_field() {
    let env = env(3);
    let shape = Shape::object_like([("id", Shape::Number), ("name", Shape::Str)]);
    let value = arbitrary(&env, &shape, 10).unwrap();
    let fields = value.as_object().unwrap();
    assert_eq!(fields.keys().collect::<Vec<_>>(), vec!["id", "name"]);
    assert!(matches!(fields["id"], Value::Int(_)));
    assert!(matches!(fields["name"], Value::Str(_)));
}

#[test]
fn test_constructor_shapes() {
    let env = env(4);
    let t3 = tuple_type(3).unwrap().clone();
    let triple = arbitrary(&env, &Shape::constructor(t3.clone()), 50).unwrap();
    let record = triple.as_record().unwrap();
    assert_eq!(record.product(), &t3);
    assert!(record.values().iter().all(|v| matches!(v, Value::Str(_))));

    let list = arbitrary(&env, &Shape::of(list_type().clone(), Shape::Number), 8).unwrap();
    assert!(is_list(&list));

    for _ in 0..20 {
        let opt = arbitrary(&env, &Shape::of(option_type().clone(), Shape::Bool), 5).unwrap();
        let variant = opt.as_variant().unwrap();
        if variant.is("Some") {
            assert!(matches!(variant.values()[0], Value::Bool(_)));
        }
    }

    let stream = arbitrary(&env, &Shape::of(stream_type().clone(), Shape::Number), 5).unwrap();
    let record = stream.as_record().unwrap();
    assert_eq!(record.product(), stream_type());
    let items = collect(&env, record).unwrap();
    assert!(items.len() < 4);
    assert!(items.iter().all(|v| matches!(v, Value::Int(_))));
}

#[test]
fn test_unknown_shape_is_a_dispatch_error() {
    let env = Environment::new();
    assert!(matches!(
        arbitrary(&env, &Shape::Number, 1),
        Err(Error::Dispatch { .. })
    ));
}

// ============================================================================
// UNIT TESTS - for_all
// ============================================================================

#[test]
fn test_true_property_finds_no_counterexample() {
    let env = env(5);
    let report = for_all(
        &env,
        |_, args| {
            let n = number(&args[0]);
            Ok(n.checked_add(n) == n.checked_mul(2))
        },
        &[Shape::Number],
    )
    .unwrap();
    assert_eq!(report, None);
}

#[test]
fn test_false_property_is_shrunk_greedily() {
    let env = env(6);
    let report = env
        .for_all(|_, args| Ok(number(&args[0]) < 10), &[Shape::Number])
        .unwrap()
        .expect("large numbers are generated well within 100 trials");

    let original = number(&report.original[0]);
    assert!(original >= 10);
    let expected = int_candidates(original)
        .into_iter()
        .filter(|c| *c >= 10)
        .last()
        .unwrap_or(original);
    assert_eq!(report.inputs, vec![Value::Int(expected)]);
    assert!(number(&report.inputs[0]) >= 10);
    assert!(report.tries >= 1 && report.tries as i64 <= DEFAULT_GOAL);
}

#[test]
fn test_tries_counts_from_one() {
    let env = env(7);
    let report = for_all(&env, |_, _| Ok(false), &[Shape::Bool]).unwrap().unwrap();
    assert_eq!(report.tries, 1);
    assert!(report.to_string().starts_with("Failed after 1 tries"));
}

#[test]
fn test_goal_property_limits_trials() {
    let env = env(8).register_property("goal", Value::Int(0)).unwrap();
    assert_eq!(for_all(&env, |_, _| Ok(false), &[Shape::Number]).unwrap(), None);

    let env = env.register_property("goal", Value::Int(3)).unwrap();
    let calls = std::cell::Cell::new(0);
    let outcome = for_all(
        &env,
        |_, _| {
            calls.set(calls.get() + 1);
            Ok(true)
        },
        &[Shape::Number],
    )
    .unwrap();
    assert_eq!(outcome, None);
    assert_eq!(calls.get(), 3);
}

#[test]
fn test_property_errors_propagate() {
    let env = env(9);
    let outcome = for_all(
        &env,
        |env, args| env.call_bool("missing", args),
        &[Shape::Number],
    );
    assert!(matches!(outcome, Err(Error::Dispatch { .. })));
}

#[test]
fn test_same_seed_same_report() {
    let check = |seed| {
        env(seed)
            .for_all(|_, args| Ok(number(&args[0]) < 1000), &[Shape::Number])
            .unwrap()
    };
    assert_eq!(check(42), check(42));
}

// ============================================================================
// UNIT TESTS - find_smallest
// ============================================================================

#[test]
fn test_find_smallest_is_per_position_and_greedy() {
    let env = env(10);
    // Fails whenever a + b >= 10
    let property = |_: &Environment, args: &[Value]| -> Result<bool, Error> {
        Ok(number(&args[0]) + number(&args[1]) < 10)
    };
    let smallest = find_smallest(&env, &property, &[Value::Int(40), Value::Int(8)]).unwrap();

    // Position 0 scans [0, 20, 10, 5, 2, 1] with b = 8: 20, 10, 5 and 2 still fail.
    // Position 1 then scans [0, 4, 2, 1] with a = 2: only 8 keeps failing.
    assert_eq!(smallest, vec![Value::Int(2), Value::Int(8)]);
}

#[test]
fn test_find_smallest_keeps_passing_inputs() {
    let env = env(11);
    let property = |_: &Environment, args: &[Value]| -> Result<bool, Error> {
        Ok(args[0].as_str().is_some_and(|s| !s.contains('x')))
    };
    let smallest = find_smallest(&env, &property, &[Value::str("abxd")]).unwrap();
    // The prefixes "", "ab" and "a" all lack the 'x'.
    assert_eq!(smallest, vec![Value::str("abxd")]);
}
