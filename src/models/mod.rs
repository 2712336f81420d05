pub mod function;
pub mod predicates;
pub mod shape;
pub mod value;

pub use function::{Function, NativeFn};
pub use shape::{Shape, TypeRef};
pub use value::Value;

use crate::error::Error;

/// Result of a dispatched implementation or function value
pub type MethodResult = Result<Value, Error>;

/// Fetch argument `index` of a call to `op`
pub fn arg<'a>(args: &'a [Value], index: usize, op: &str) -> Result<&'a Value, Error> {
    args.get(index).ok_or_else(|| Error::MissingArgument {
        op: op.to_string(),
        index,
    })
}

pub fn type_error(op: &str, expected: &'static str, got: &Value) -> Error {
    Error::Type {
        op: op.to_string(),
        expected,
        got: got.type_name(),
    }
}

/// Fetch argument `index` and require it to be a function
pub fn func_arg<'a>(args: &'a [Value], index: usize, op: &str) -> Result<&'a Function, Error> {
    let value = arg(args, index, op)?;
    value
        .as_func()
        .ok_or_else(|| type_error(op, "Function", value))
}

pub fn int_arg(args: &[Value], index: usize, op: &str) -> Result<i64, Error> {
    let value = arg(args, index, op)?;
    value
        .as_int()
        .ok_or_else(|| type_error(op, "Number (integer)", value))
}

pub fn array_arg<'a>(args: &'a [Value], index: usize, op: &str) -> Result<&'a [Value], Error> {
    let value = arg(args, index, op)?;
    value.as_array().ok_or_else(|| type_error(op, "Array", value))
}

pub fn shape_arg<'a>(args: &'a [Value], index: usize, op: &str) -> Result<&'a Shape, Error> {
    let value = arg(args, index, op)?;
    value.as_shape().ok_or_else(|| type_error(op, "Shape", value))
}
