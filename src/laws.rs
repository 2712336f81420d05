//! Algebraic laws of the built-in instances, checked with `for_all`.

use std::fmt;

use tracing::info;

use crate::data::identity::identity_type;
use crate::data::list::list_type;
use crate::data::option::{none, option_type, some};
use crate::data::tuple::tuple2_type;
use crate::environment::Environment;
use crate::error::Error;
use crate::models::{Function, Shape, Value};
use crate::quickcheck::{for_all, FailureReport};
use crate::stdlib::equal;

/// A named property over generated inputs.
pub struct Law {
    pub name: &'static str,
    pub shapes: Vec<Shape>,
    pub check: fn(&Environment, &[Value]) -> Result<bool, Error>,
}

/// Outcome of checking one law.
#[derive(Debug, Clone, PartialEq)]
pub struct LawOutcome {
    pub name: &'static str,
    pub failure: Option<FailureReport>,
}

impl LawOutcome {
    pub fn passed(&self) -> bool {
        self.failure.is_none()
    }
}

impl fmt::Display for LawOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.failure {
            None => write!(f, "ok      {}", self.name),
            Some(report) => write!(f, "FAILED  {}: {}", self.name, report),
        }
    }
}

fn inc() -> Value {
    Value::func("inc", |_, args| match &args[0] {
        Value::Int(n) => Ok(Value::Int(n.wrapping_add(1))),
        other => Ok(other.clone()),
    })
}

fn double() -> Value {
    Value::func("double", |_, args| match &args[0] {
        Value::Int(n) => Ok(Value::Int(n.wrapping_mul(2))),
        other => Ok(other.clone()),
    })
}

/// Halves even numbers into `Some`, rejects odd ones
fn halve() -> Function {
    Function::new("halve", |_, args| match &args[0] {
        Value::Int(n) if n % 2 == 0 => Ok(some(Value::Int(n / 2))),
        _ => Ok(none()),
    })
}

fn associative(env: &Environment, args: &[Value]) -> Result<bool, Error> {
    let (a, b, c) = (args[0].clone(), args[1].clone(), args[2].clone());
    let left = env.call2("concat", env.call2("concat", a.clone(), b.clone())?, c.clone())?;
    let right = env.call2("concat", a, env.call2("concat", b, c)?)?;
    equal(env, &left, &right)
}

fn functor_identity(env: &Environment, args: &[Value]) -> Result<bool, Error> {
    let mapped = env.call2("map", args[0].clone(), Value::Func(Function::identity()))?;
    equal(env, &mapped, &args[0])
}

fn functor_composition(env: &Environment, args: &[Value]) -> Result<bool, Error> {
    let (f, g) = (inc(), double());
    let stepwise = env.call2("map", env.call2("map", args[0].clone(), f.clone())?, g.clone())?;
    let fused = env.call2("map", args[0].clone(), env.call2("map", f, g)?)?;
    equal(env, &stepwise, &fused)
}

/// The full law suite
pub fn standard_laws() -> Vec<Law> {
    let numbers = || Shape::array_of(Shape::Number);
    let option_of_numbers = || Shape::of(option_type().clone(), Shape::Number);
    let list_of_numbers = || Shape::of(list_type().clone(), Shape::Number);

    vec![
        Law {
            name: "equal is reflexive",
            shapes: vec![Shape::AnyVal],
            check: |env, args| equal(env, &args[0], &args[0]),
        },
        Law {
            name: "number concat is associative",
            shapes: vec![Shape::Number, Shape::Number, Shape::Number],
            check: associative,
        },
        Law {
            name: "string concat is associative",
            shapes: vec![Shape::Str, Shape::Str, Shape::Str],
            check: associative,
        },
        Law {
            name: "array concat is associative",
            shapes: vec![numbers(), numbers(), numbers()],
            check: associative,
        },
        Law {
            name: "string empty is an identity",
            shapes: vec![Shape::Str],
            check: |env, args| {
                let empty = env.call1("empty", Value::Shape(Shape::Str))?;
                let left = env.call2("concat", empty.clone(), args[0].clone())?;
                let right = env.call2("concat", args[0].clone(), empty)?;
                Ok(equal(env, &left, &args[0])? && equal(env, &right, &args[0])?)
            },
        },
        Law {
            name: "array map preserves identity",
            shapes: vec![numbers()],
            check: functor_identity,
        },
        Law {
            name: "array map composes",
            shapes: vec![numbers()],
            check: functor_composition,
        },
        Law {
            name: "option map preserves identity",
            shapes: vec![option_of_numbers()],
            check: functor_identity,
        },
        Law {
            name: "list map composes",
            shapes: vec![list_of_numbers()],
            check: functor_composition,
        },
        Law {
            name: "list reverse is an involution",
            shapes: vec![list_of_numbers()],
            check: |env, args| {
                let twice = env.call1("reverse", env.call1("reverse", args[0].clone())?)?;
                equal(env, &twice, &args[0])
            },
        },
        Law {
            name: "option flat_map has a left identity",
            shapes: vec![Shape::Number],
            check: |env, args| {
                let pure = env.call2(
                    "pure",
                    Value::Shape(Shape::constructor(option_type().clone())),
                    args[0].clone(),
                )?;
                let bound = env.call2("flat_map", pure, Value::Func(halve()))?;
                let direct = halve().call1(env, args[0].clone())?;
                equal(env, &bound, &direct)
            },
        },
        Law {
            name: "identity ap has an identity",
            shapes: vec![Shape::of(identity_type().clone(), Shape::Number)],
            check: |env, args| {
                let id_fn = env.call2(
                    "pure",
                    Value::Shape(Shape::constructor(identity_type().clone())),
                    Value::Func(Function::identity()),
                )?;
                let applied = env.call2("ap", id_fn, args[0].clone())?;
                equal(env, &applied, &args[0])
            },
        },
        Law {
            name: "tuple flip is an involution",
            shapes: vec![Shape::constructor(tuple2_type().clone())],
            check: |env, args| {
                let twice = env.call1("flip", env.call1("flip", args[0].clone())?)?;
                equal(env, &twice, &args[0])
            },
        },
    ]
}

/// Check every law with `env`'s generators and goal
pub fn check_all(env: &Environment, laws: &[Law]) -> Result<Vec<LawOutcome>, Error> {
    laws.iter()
        .map(|law| {
            let failure = for_all(env, law.check, &law.shapes)?;
            info!(
                target: "lambdata::laws::check_all",
                law = law.name,
                passed = failure.is_none(),
                "law checked"
            );
            Ok(LawOutcome {
                name: law.name,
                failure,
            })
        })
        .collect()
}
