//! Data types built on tagged constructors.
//!
//! Each submodule defines its type once (process-wide identity), plain Rust
//! constructors and algorithms, and a `register` function attaching its
//! dispatched operations to an environment. Registration order inside
//! `Environment::standard` matters: these specific registrations are added
//! before the structural fallbacks for records and variants.

pub mod either;
pub mod identity;
pub mod io;
pub mod lens;
pub mod list;
pub mod option;
pub mod promise;
pub mod state;
pub mod stream;
pub mod tuple;
pub mod validation;

use crate::environment::Environment;
use crate::error::Error;
use crate::models::{arg, type_error, Value};
use crate::tagged::{ProductType, Record, SumType, Variant};

/// Attach every data type's operations
pub(crate) fn register_all(env: &Environment) -> Result<Environment, Error> {
    let env = list::register(env)?;
    let env = option::register(&env)?;
    let env = either::register(&env)?;
    let env = validation::register(&env)?;
    let env = identity::register(&env)?;
    let env = tuple::register(&env)?;
    let env = state::register(&env)?;
    let env = io::register(&env)?;
    let env = promise::register(&env)?;
    let env = stream::register(&env)?;
    lens::register(&env)
}

/// Argument `index` as an instance of the sum `ty`
pub(crate) fn variant_arg<'a>(
    args: &'a [Value],
    index: usize,
    op: &str,
    ty: &SumType,
    expected: &'static str,
) -> Result<&'a Variant, Error> {
    let value = arg(args, index, op)?;
    match value {
        Value::Variant(v) if v.sum() == ty => Ok(v),
        other => Err(type_error(op, expected, other)),
    }
}

/// Argument `index` as an instance of the product `ty`
pub(crate) fn record_arg<'a>(
    args: &'a [Value],
    index: usize,
    op: &str,
    ty: &ProductType,
    expected: &'static str,
) -> Result<&'a Record, Error> {
    let value = arg(args, index, op)?;
    match value {
        Value::Record(r) if r.product() == ty => Ok(r),
        other => Err(type_error(op, expected, other)),
    }
}
