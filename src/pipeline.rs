//! Fluent composition of dispatched operations.
//!
//! A [`Pipeline`] threads one value through `flat_map`, `map`, `ap` and
//! `concat` calls on an environment, stopping at the first error:
//!
//! ```
//! use lambdata::data::option::{some, none};
//! use lambdata::{Function, Pipeline, Value};
//!
//! let env = lambdata::standard().unwrap();
//! let half = Function::new("half", |_, args| {
//!     let n = args[0].as_int().unwrap_or(1);
//!     Ok(if n % 2 == 0 { some(Value::Int(n / 2)) } else { none() })
//! });
//!
//! let out = Pipeline::new(&env, some(Value::Int(8)))
//!     .flat_map(&half)
//!     .flat_map(&half)
//!     .finish()
//!     .unwrap();
//! assert_eq!(out, some(Value::Int(2)));
//! ```

use crate::environment::Environment;
use crate::models::{type_error, Function, MethodResult, Shape, Value};

/// A value in flight through dispatched operations.
pub struct Pipeline<'e> {
    env: &'e Environment,
    value: MethodResult,
}

impl<'e> Pipeline<'e> {
    pub fn new(env: &'e Environment, value: Value) -> Self {
        Pipeline { env, value: Ok(value) }
    }

    fn step<F>(self, f: F) -> Self
    where
        F: FnOnce(&Environment, Value) -> MethodResult,
    {
        let value = self.value.and_then(|v| f(self.env, v));
        Pipeline { env: self.env, value }
    }

    pub fn flat_map(self, f: &Function) -> Self {
        self.step(|env, v| env.call2("flat_map", v, Value::Func(f.clone())))
    }

    pub fn map(self, f: &Function) -> Self {
        self.step(|env, v| env.call2("map", v, Value::Func(f.clone())))
    }

    /// Apply the wrapped function(s) to `other`
    pub fn ap(self, other: Value) -> Self {
        self.step(|env, v| env.call2("ap", v, other))
    }

    pub fn concat(self, other: Value) -> Self {
        self.step(|env, v| env.call2("concat", v, other))
    }

    /// Bind with a native closure instead of a prepared function value
    pub fn then<F>(self, name: &str, f: F) -> Self
    where
        F: Fn(&Environment, &[Value]) -> MethodResult + Send + Sync + 'static,
    {
        let f = Function::new(name, f);
        self.flat_map(&f)
    }

    pub fn finish(self) -> MethodResult {
        self.value
    }
}

/// `x -> flat_map(f(x), g)` as a function value
pub fn kleisli(f: &Function, g: &Function) -> Function {
    crate::stdlib::kleisli(f, g)
}

/// Lift a binary function over two wrapped values: `ap(map(a, curry(f)), b)`
pub fn lift_a2(env: &Environment, f: &Function, a: Value, b: Value) -> MethodResult {
    let partials = env.call2("map", a, Value::Func(f.curry2()))?;
    env.call2("ap", partials, b)
}

/// Turn a slice of wrapped values into one wrapped array, in order.
///
/// `m` names the wrapper through its `pure` registration, e.g.
/// `Shape::constructor(option_type().clone())`. Any `None`-like element short
/// circuits through the wrapper's own `flat_map`.
pub fn sequence(env: &Environment, m: &Shape, items: &[Value]) -> MethodResult {
    let mut acc = env.call2("pure", Value::Shape(m.clone()), Value::Array(Vec::new()))?;
    for item in items.iter().rev() {
        let rest = acc;
        let m = m.clone();
        let prepend = Function::new("sequence", move |env, args| {
            let x = args.first().cloned().unwrap_or(Value::Null);
            let m = m.clone();
            let cons = Function::new("prepend", move |env, ys| {
                let mut out = vec![x.clone()];
                match ys.first() {
                    Some(Value::Array(tail)) => out.extend_from_slice(tail),
                    Some(other) => return Err(type_error("sequence", "Array", other)),
                    None => {}
                }
                env.call2("pure", Value::Shape(m.clone()), Value::Array(out))
            });
            env.call2("flat_map", rest.clone(), Value::Func(cons))
        });
        acc = env.call2("flat_map", item.clone(), Value::Func(prepend))?;
    }
    Ok(acc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::option::{none, option_type, some};
    use crate::error::Error;

    fn env() -> Environment {
        Environment::standard().unwrap()
    }

    fn add() -> Function {
        Function::new("add", |_, args| {
            Ok(Value::Int(args[0].as_int().unwrap_or(0) + args[1].as_int().unwrap_or(0)))
        })
    }

    fn ints(xs: &[i64]) -> Value {
        Value::Array(xs.iter().map(|&n| Value::Int(n)).collect())
    }

    #[test]
    fn test_pipeline_stops_at_first_error() {
        let env = env();
        let out = Pipeline::new(&env, ints(&[1, 2]))
            .then("explode", |_, _| Ok(Value::Bool(true)))
            .map(&Function::identity())
            .finish();
        assert!(matches!(out, Err(Error::Type { .. })));
    }

    #[test]
    fn test_pipeline_concat_and_ap() {
        let env = env();
        let fs = Value::Array(vec![Value::Func(add().curry2())]);
        let out = Pipeline::new(&env, ints(&[1]))
            .concat(ints(&[2]))
            .map(&add().curry2())
            .finish()
            .unwrap();
        let applied = Pipeline::new(&env, out).ap(ints(&[10])).finish().unwrap();
        assert_eq!(applied, ints(&[11, 12]));
        assert_eq!(Pipeline::new(&env, fs).ap(ints(&[])).finish().unwrap(), ints(&[]));
    }

    #[test]
    fn test_lift_a2_over_arrays_and_options() {
        let env = env();
        assert_eq!(
            lift_a2(&env, &add(), ints(&[1, 2]), ints(&[10, 20])).unwrap(),
            ints(&[11, 21, 12, 22])
        );
        assert_eq!(
            lift_a2(&env, &add(), some(Value::Int(1)), some(Value::Int(2))).unwrap(),
            some(Value::Int(3))
        );
        assert_eq!(lift_a2(&env, &add(), none(), some(Value::Int(2))).unwrap(), none());
    }

    #[test]
    fn test_sequence_options() {
        let env = env();
        let m = Shape::constructor(option_type().clone());
        let all = [some(Value::Int(1)), some(Value::Int(2)), some(Value::Int(3))];
        assert_eq!(sequence(&env, &m, &all).unwrap(), some(ints(&[1, 2, 3])));

        let gap = [some(Value::Int(1)), none(), some(Value::Int(3))];
        assert_eq!(sequence(&env, &m, &gap).unwrap(), none());
        assert_eq!(sequence(&env, &m, &[]).unwrap(), some(ints(&[])));
    }

    #[test]
    fn test_sequence_arrays_is_cartesian() {
        let env = env();
        let out = sequence(&env, &Shape::Array, &[ints(&[1, 2]), ints(&[3])]).unwrap();
        assert_eq!(out, Value::Array(vec![ints(&[1, 3]), ints(&[2, 3])]));
    }
}
