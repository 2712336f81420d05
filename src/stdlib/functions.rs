//! Functions as a functor, applicative and Kleisli category.

use crate::environment::Environment;
use crate::error::Error;
use crate::models::predicates::{is_function, shape_is};
use crate::models::{arg, func_arg, Function, Shape, Value};

/// `kleisli(f, g)` is `x -> flat_map(f(x), g)`
pub fn kleisli(f: &Function, g: &Function) -> Function {
    let f = f.clone();
    let g = g.clone();
    let name = format!("{} >=> {}", f.name(), g.name());
    Function::new(&name, move |env, args| {
        let x = args.first().cloned().unwrap_or(Value::Null);
        let m = f.call1(env, x)?;
        env.call2("flat_map", m, Value::Func(g.clone()))
    })
}

/// `ap(f, g)` is `x -> f(x)(g(x))`
fn ap(f: &Function, g: &Function) -> Function {
    let f = f.clone();
    let g = g.clone();
    Function::new("ap", move |env, args| {
        let x = args.first().cloned().unwrap_or(Value::Null);
        let partial = f.call1(env, x.clone())?;
        let arg = g.call1(env, x)?;
        func_arg(std::slice::from_ref(&partial), 0, "ap")?.call1(env, arg)
    })
}

pub(crate) fn register(env: &Environment) -> Result<Environment, Error> {
    env.register_method("map", is_function, |_, args| {
        let f = func_arg(args, 0, "map")?;
        let g = func_arg(args, 1, "map")?;
        Ok(Value::Func(g.compose(f)))
    })?
    .register_method("ap", is_function, |_, args| {
        Ok(Value::Func(ap(func_arg(args, 0, "ap")?, func_arg(args, 1, "ap")?)))
    })?
    .register_method("kleisli", is_function, |_, args| {
        Ok(Value::Func(kleisli(func_arg(args, 0, "kleisli")?, func_arg(args, 1, "kleisli")?)))
    })?
    .register_method("pure", shape_is(Shape::Function), |_, args| {
        Ok(Value::Func(Function::constant(arg(args, 1, "pure")?.clone())))
    })
}
