//! First-class function values.

use std::fmt;
use std::sync::Arc;

use super::{MethodResult, Value};
use crate::environment::Environment;

/// Native function body. The environment is passed explicitly so a body can
/// call sibling operations through dispatch.
pub type NativeFn = dyn Fn(&Environment, &[Value]) -> MethodResult + Send + Sync;

/// A named, cheaply cloneable function value.
#[derive(Clone)]
pub struct Function {
    name: Arc<str>,
    body: Arc<NativeFn>,
}

impl Function {
    pub fn new<F>(name: &str, f: F) -> Self
    where
        F: Fn(&Environment, &[Value]) -> MethodResult + Send + Sync + 'static,
    {
        Function {
            name: Arc::from(name),
            body: Arc::new(f),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invoke the function with an explicit environment
    #[inline]
    pub fn apply(&self, env: &Environment, args: &[Value]) -> MethodResult {
        (self.body)(env, args)
    }

    /// Invoke with a single argument
    #[inline]
    pub fn call1(&self, env: &Environment, arg: Value) -> MethodResult {
        (self.body)(env, &[arg])
    }

    /// Identity comparison (two clones of one function are equal)
    pub fn ptr_eq(&self, other: &Function) -> bool {
        Arc::ptr_eq(&self.body, &other.body)
    }

    pub fn identity() -> Self {
        Function::new("identity", |_, args| {
            Ok(args.first().cloned().unwrap_or(Value::Null))
        })
    }

    /// A function ignoring its arguments
    pub fn constant(value: Value) -> Self {
        Function::new("constant", move |_, _| Ok(value.clone()))
    }

    /// `f.compose(g)` is `x -> f(g(x))`
    pub fn compose(&self, g: &Function) -> Self {
        let f = self.clone();
        let g = g.clone();
        let name = format!("{}.{}", f.name(), g.name());
        Function::new(&name, move |env, args| {
            let inner = g.apply(env, args)?;
            f.call1(env, inner)
        })
    }

    /// Turn a binary function into one taking the first argument and
    /// returning a function awaiting the second.
    pub fn curry2(&self) -> Self {
        let f = self.clone();
        let name = format!("curried {}", f.name());
        Function::new(&name, move |_, args| {
            let a = args.first().cloned().unwrap_or(Value::Null);
            let f = f.clone();
            Ok(Value::func("partial", move |env, rest| {
                let b = rest.first().cloned().unwrap_or(Value::Null);
                f.apply(env, &[a.clone(), b])
            }))
        })
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<fn {}>", self.name)
    }
}
