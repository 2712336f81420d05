//! The identity wrapper `Id(value)`.

use std::sync::OnceLock;

use super::record_arg;
use crate::environment::Environment;
use crate::error::Error;
use crate::models::predicates::{shape_is_constructor, shape_is_of, shape_names};
use crate::models::{arg, func_arg, int_arg, shape_arg, type_error, Shape, Value};
use crate::tagged::{define_product, ProductType, Record};

static IDENTITY: OnceLock<ProductType> = OnceLock::new();

pub fn identity_type() -> &'static ProductType {
    IDENTITY.get_or_init(|| define_product("Id", &["value"]))
}

pub fn id(value: Value) -> Value {
    identity_type().instance(vec![value])
}

fn id_arg<'a>(args: &'a [Value], index: usize, op: &str) -> Result<&'a Record, Error> {
    record_arg(args, index, op, identity_type(), "Id")
}

fn inner(r: &Record) -> Value {
    r.values()[0].clone()
}

pub(crate) fn register(env: &Environment) -> Result<Environment, Error> {
    let identity = || identity_type().predicate();
    let ty = identity_type().clone();

    env.register_method("concat", identity(), |env, args| {
        let a = inner(id_arg(args, 0, "concat")?);
        let b = inner(id_arg(args, 1, "concat")?);
        Ok(id(env.call2("concat", a, b)?))
    })?
    .register_method("map", identity(), |env, args| {
        let x = inner(id_arg(args, 0, "map")?);
        Ok(id(func_arg(args, 1, "map")?.call1(env, x)?))
    })?
    .register_method("ap", identity(), |env, args| {
        let f = inner(id_arg(args, 0, "ap")?);
        let x = inner(id_arg(args, 1, "ap")?);
        match f {
            Value::Func(f) => Ok(id(f.call1(env, x)?)),
            got => Err(type_error("ap", "Function inside Id", &got)),
        }
    })?
    .register_method("flat_map", identity(), |env, args| {
        let x = inner(id_arg(args, 0, "flat_map")?);
        let next = func_arg(args, 1, "flat_map")?.call1(env, x)?;
        if identity_type().is_instance(&next) {
            Ok(next)
        } else {
            Err(type_error("flat_map", "Id result", &next))
        }
    })?
    .register_method("to_array", identity(), |_, args| {
        Ok(Value::Array(vec![inner(id_arg(args, 0, "to_array")?)]))
    })?
    .register_method("empty", shape_is_of(ty.clone()), |env, args| {
        let element = match shape_arg(args, 0, "empty")? {
            Shape::Of(_, element) => element.as_ref().clone(),
            _ => Shape::AnyVal,
        };
        Ok(id(env.call1("empty", Value::Shape(element))?))
    })?
    .register_method("arbitrary", shape_is_of(ty.clone()), |env, args| {
        let element = match shape_arg(args, 0, "arbitrary")? {
            Shape::Of(_, element) => element.as_ref().clone(),
            _ => Shape::AnyVal,
        };
        let size = int_arg(args, 1, "arbitrary")?;
        Ok(id(env.call2("arbitrary", Value::Shape(element), Value::Int(size))?))
    })?
    .register_method("arbitrary", shape_is_constructor(ty.clone()), |env, _| {
        Ok(id(env.call2("arbitrary", Value::Shape(Shape::AnyVal), Value::Int(1))?))
    })?
    .register_method("pure", shape_names(ty), |_, args| {
        Ok(id(arg(args, 1, "pure")?.clone()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::predicates::is_int;

    #[test]
    fn test_identity_map_and_flat_map() {
        let env = register(&Environment::new()).unwrap();
        let double = Value::func("double", |_, args| Ok(Value::Int(args[0].as_int().unwrap_or(0) * 2)));
        let wrap = Value::func("wrap", |_, args| Ok(id(args[0].clone())));

        assert_eq!(env.call2("map", id(Value::Int(4)), double.clone()).unwrap(), id(Value::Int(8)));
        assert_eq!(env.call2("flat_map", id(Value::Int(4)), wrap).unwrap(), id(Value::Int(4)));
        assert!(env.call2("flat_map", id(Value::Int(4)), double).is_err());
    }

    #[test]
    fn test_identity_concat_delegates() {
        let env = register(&Environment::new())
            .unwrap()
            .register_method("concat", is_int, |_, args| {
                Ok(Value::Int(args[0].as_int().unwrap_or(0) + args[1].as_int().unwrap_or(0)))
            })
            .unwrap();

        assert_eq!(
            env.call2("concat", id(Value::Int(1)), id(Value::Int(2))).unwrap(),
            id(Value::Int(3))
        );
    }
}
