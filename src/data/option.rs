//! Optional values: `Option a = Some a | None`.

use std::sync::OnceLock;

use super::either::{left, right};
use super::variant_arg;
use crate::environment::Environment;
use crate::error::Error;
use crate::models::predicates::{shape_is_constructor, shape_is_of, shape_names};
use crate::models::{arg, func_arg, int_arg, shape_arg, type_error, Function, MethodResult, Shape, Value};
use crate::tagged::{define_sum, Cases, SumType, Variant};

const SOME: usize = 0;
const NONE: usize = 1;

static OPTION: OnceLock<SumType> = OnceLock::new();

pub fn option_type() -> &'static SumType {
    OPTION.get_or_init(|| define_sum("Option", &[("Some", &["x"]), ("None", &[])]))
}

pub fn some(x: Value) -> Value {
    option_type().instance(SOME, vec![x])
}

pub fn none() -> Value {
    option_type().instance(NONE, Vec::new())
}

pub fn is_option(value: &Value) -> bool {
    option_type().is_instance(value)
}

fn option_arg<'a>(args: &'a [Value], index: usize, op: &str) -> Result<&'a Variant, Error> {
    variant_arg(args, index, op, option_type(), "Option")
}

/// The wrapped value, if any
pub fn get(opt: &Variant) -> Option<&Value> {
    (opt.tag() == SOME).then(|| &opt.values()[0])
}

/// `on_some(x)` for `Some(x)`, `on_none()` for `None`
pub fn fold(env: &Environment, opt: &Variant, on_some: &Function, on_none: &Function) -> MethodResult {
    opt.cata(
        Cases::new()
            .on("Some", |xs| on_some.call1(env, xs[0].clone()))
            .on("None", |_| on_none.apply(env, &[])),
    )?
}

pub fn get_or_else(opt: &Variant, default: Value) -> Value {
    get(opt).cloned().unwrap_or(default)
}

pub fn map(env: &Environment, opt: &Variant, f: &Function) -> MethodResult {
    match get(opt) {
        Some(x) => Ok(some(f.call1(env, x.clone())?)),
        None => Ok(none()),
    }
}

/// `f` must return an option
pub fn flat_map(env: &Environment, opt: &Variant, f: &Function) -> MethodResult {
    match get(opt) {
        Some(x) => {
            let next = f.call1(env, x.clone())?;
            if is_option(&next) {
                Ok(next)
            } else {
                Err(type_error("flat_map", "Option result", &next))
            }
        }
        None => Ok(none()),
    }
}

/// `Some(f)` applied to `other`
pub fn ap(env: &Environment, opt_f: &Variant, other: &Variant) -> MethodResult {
    match (get(opt_f), get(other)) {
        (Some(Value::Func(f)), Some(x)) => Ok(some(f.call1(env, x.clone())?)),
        (Some(Value::Func(_)), None) | (None, _) => Ok(none()),
        (Some(other), _) => Err(type_error("ap", "Function inside Some", other)),
    }
}

/// Both present: `Some(concat(x, y))`; otherwise `None`
pub fn concat(env: &Environment, a: &Variant, b: &Variant) -> MethodResult {
    match (get(a), get(b)) {
        (Some(x), Some(y)) => Ok(some(env.call2("concat", x.clone(), y.clone())?)),
        _ => Ok(none()),
    }
}

/// `Some(x)` to `Left(x)`, `None` to `Right(other)`
pub fn to_left(opt: &Variant, other: Value) -> Value {
    match get(opt) {
        Some(x) => left(x.clone()),
        None => right(other),
    }
}

/// `Some(x)` to `Right(x)`, `None` to `Left(other)`
pub fn to_right(opt: &Variant, other: Value) -> Value {
    match get(opt) {
        Some(x) => right(x.clone()),
        None => left(other),
    }
}

pub(crate) fn register(env: &Environment) -> Result<Environment, Error> {
    let option = || option_type().predicate();
    let ty = option_type().clone();

    env.register_method("fold", option(), |env, args| {
        fold(
            env,
            option_arg(args, 0, "fold")?,
            func_arg(args, 1, "fold")?,
            func_arg(args, 2, "fold")?,
        )
    })?
    .register_method("map", option(), |env, args| {
        map(env, option_arg(args, 0, "map")?, func_arg(args, 1, "map")?)
    })?
    .register_method("flat_map", option(), |env, args| {
        flat_map(env, option_arg(args, 0, "flat_map")?, func_arg(args, 1, "flat_map")?)
    })?
    .register_method("ap", option(), |env, args| {
        ap(env, option_arg(args, 0, "ap")?, option_arg(args, 1, "ap")?)
    })?
    .register_method("concat", option(), |env, args| {
        concat(env, option_arg(args, 0, "concat")?, option_arg(args, 1, "concat")?)
    })?
    .register_method("get_or_else", option(), |_, args| {
        let default = arg(args, 1, "get_or_else")?.clone();
        Ok(get_or_else(option_arg(args, 0, "get_or_else")?, default))
    })?
    .register_method("to_array", option(), |_, args| {
        let opt = option_arg(args, 0, "to_array")?;
        Ok(Value::Array(get(opt).cloned().into_iter().collect()))
    })?
    .register_method("arbitrary", shape_is_of(ty.clone()), |env, args| {
        let inner = match shape_arg(args, 0, "arbitrary")? {
            Shape::Of(_, inner) => inner.as_ref().clone(),
            _ => Shape::AnyVal,
        };
        arbitrary_option(env, inner, int_arg(args, 1, "arbitrary")?)
    })?
    .register_method("arbitrary", shape_is_constructor(ty.clone()), |env, args| {
        arbitrary_option(env, Shape::AnyVal, int_arg(args, 1, "arbitrary")?)
    })?
    .register_method("empty", shape_names(ty.clone()), |_, _| Ok(none()))?
    .register_method("pure", shape_names(ty), |_, args| {
        Ok(some(arg(args, 1, "pure")?.clone()))
    })
}

fn arbitrary_option(env: &Environment, inner: Shape, size: i64) -> MethodResult {
    if env.random_bool() {
        return Ok(none());
    }
    let x = env.call2("arbitrary", Value::Shape(inner), Value::Int(size - 1))?;
    Ok(some(x))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inc() -> Function {
        Function::new("inc", |_, args| Ok(Value::Int(args[0].as_int().unwrap_or(0) + 1)))
    }

    fn variant(v: &Value) -> &Variant {
        v.as_variant().unwrap()
    }

    #[test]
    fn test_fold_uses_total_cases() {
        let env = Environment::new();
        let zero = Function::constant(Value::Int(0));

        assert_eq!(fold(&env, variant(&some(Value::Int(4))), &inc(), &zero).unwrap(), Value::Int(5));
        assert_eq!(fold(&env, variant(&none()), &inc(), &zero).unwrap(), Value::Int(0));
    }

    #[test]
    fn test_map_flat_map_ap() {
        let env = Environment::new();
        let x = some(Value::Int(1));

        assert_eq!(map(&env, variant(&x), &inc()).unwrap(), some(Value::Int(2)));
        assert_eq!(map(&env, variant(&none()), &inc()).unwrap(), none());

        let halve = Function::new("halve", |_, args| {
            let n = args[0].as_int().unwrap_or(0);
            Ok(if n % 2 == 0 { some(Value::Int(n / 2)) } else { none() })
        });
        assert_eq!(flat_map(&env, variant(&some(Value::Int(8))), &halve).unwrap(), some(Value::Int(4)));
        assert_eq!(flat_map(&env, variant(&x), &halve).unwrap(), none());
        assert!(flat_map(&env, variant(&x), &inc()).is_err());

        let wrapped = some(Value::Func(inc()));
        assert_eq!(ap(&env, variant(&wrapped), variant(&x)).unwrap(), some(Value::Int(2)));
        assert_eq!(ap(&env, variant(&wrapped), variant(&none())).unwrap(), none());
    }

    #[test]
    fn test_get_or_else_and_conversions() {
        assert_eq!(get_or_else(variant(&none()), Value::Int(3)), Value::Int(3));
        assert_eq!(get_or_else(variant(&some(Value::Int(1))), Value::Int(3)), Value::Int(1));
        assert_eq!(to_right(variant(&none()), Value::str("missing")), left(Value::str("missing")));
        assert_eq!(to_left(variant(&some(Value::Int(1))), Value::Null), left(Value::Int(1)));
    }
}
