//! Fixed-size tuples `Tuple2` through `Tuple5`.

use std::sync::OnceLock;

use super::record_arg;
use crate::environment::Environment;
use crate::error::Error;
use crate::models::predicates::shape_is_constructor;
use crate::models::{func_arg, Shape, Value};
use crate::tagged::{define_product, ProductType};

const FIELDS: [&str; 5] = ["_1", "_2", "_3", "_4", "_5"];

static TUPLES: OnceLock<Vec<ProductType>> = OnceLock::new();

fn tuples() -> &'static [ProductType] {
    TUPLES.get_or_init(|| {
        (2..=FIELDS.len())
            .map(|n| define_product(&format!("Tuple{}", n), &FIELDS[..n]))
            .collect()
    })
}

/// The tuple type of the given arity (2 to 5)
pub fn tuple_type(arity: usize) -> Option<&'static ProductType> {
    arity.checked_sub(2).and_then(|i| tuples().get(i))
}

pub fn tuple2_type() -> &'static ProductType {
    &tuples()[0]
}

pub fn tuple2(a: Value, b: Value) -> Value {
    tuple2_type().instance(vec![a, b])
}

/// A tuple of `values.len()` elements
pub fn tuple(values: Vec<Value>) -> Result<Value, Error> {
    match tuple_type(values.len()) {
        Some(ty) => Ok(ty.instance(values)),
        None => Err(Error::Arity {
            constructor: "Tuple".to_string(),
            expected: values.len().clamp(2, FIELDS.len()),
            got: values.len(),
        }),
    }
}

pub fn is_tuple(value: &Value) -> bool {
    matches!(value, Value::Record(r) if tuples().contains(r.product()))
}

/// `Tuple2(a, b)` to `Tuple2(b, a)`
pub fn flip(pair: &Value) -> Result<Value, Error> {
    let args = std::slice::from_ref(pair);
    let record = record_arg(args, 0, "flip", tuple2_type(), "Tuple2")?;
    let values = record.values();
    Ok(tuple2(values[1].clone(), values[0].clone()))
}

pub(crate) fn register(env: &Environment) -> Result<Environment, Error> {
    let mut env = env.register_method("flip", tuple2_type().predicate(), |_, args| flip(&args[0]))?;

    for ty in tuples() {
        let concat_ty = ty.clone();
        let arbitrary_ty = ty.clone();
        env = env
            .register_method("concat", ty.predicate(), move |env, args| {
                let a = record_arg(args, 0, "concat", &concat_ty, "Tuple")?;
                let b = record_arg(args, 1, "concat", &concat_ty, "Tuple")?;
                let values = a
                    .values()
                    .iter()
                    .zip(b.values())
                    .map(|(x, y)| env.call2("concat", x.clone(), y.clone()))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(concat_ty.instance(values))
            })?
            .register_method("map", ty.predicate(), |env, args| {
                let f = func_arg(args, 1, "map")?;
                let Value::Record(record) = &args[0] else {
                    return Err(crate::models::type_error("map", "Tuple", &args[0]));
                };
                let values = record
                    .values()
                    .iter()
                    .map(|v| f.call1(env, v.clone()))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(record.product().instance(values))
            })?
            .register_method("to_array", ty.predicate(), |_, args| match &args[0] {
                Value::Record(record) => Ok(Value::Array(record.values().to_vec())),
                other => Ok(Value::Array(vec![other.clone()])),
            })?
            .register_method("arbitrary", shape_is_constructor(ty.clone()), move |env, _| {
                // Strings sized by the arity, whatever the trial size.
                let arity = arbitrary_ty.arity();
                let values = (0..arity)
                    .map(|_| env.call2("arbitrary", Value::Shape(Shape::Str), Value::Int(arity as i64)))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(arbitrary_ty.instance(values))
            })?;
    }
    Ok(env)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tuple_arity_bounds() {
        assert!(tuple(vec![Value::Int(1)]).is_err());
        assert!(tuple(vec![Value::Null; 6]).is_err());
        let t3 = tuple(vec![Value::Int(1), Value::Int(2), Value::Int(3)]).unwrap();
        assert_eq!(t3.as_record().unwrap().product().name(), "Tuple3");
        assert!(is_tuple(&t3));
    }

    #[test]
    fn test_flip() {
        let pair = tuple2(Value::Int(1), Value::str("b"));
        let flipped = flip(&pair).unwrap();
        assert_eq!(flipped, tuple2(Value::str("b"), Value::Int(1)));
        assert!(flip(&Value::Null).is_err());
    }
}
