//! Registering methods and properties.

use std::sync::Arc;

use tracing::trace;

use super::members::MemberSlot;
use super::Environment;
use crate::error::Error;
use crate::models::{MethodResult, Value};

/// Decides whether an implementation applies to a call's first argument.
pub trait Predicate: Send + Sync {
    fn accepts(&self, value: &Value) -> bool;
}

impl<F> Predicate for F
where
    F: Fn(&Value) -> bool + Send + Sync,
{
    #[inline]
    fn accepts(&self, value: &Value) -> bool {
        self(value)
    }
}

/// A dispatched implementation.
///
/// The active environment is passed explicitly so an implementation can call
/// sibling operations through it (e.g. a list `equal` calling `equal` on its
/// elements).
pub trait Method: Send + Sync {
    fn invoke(&self, env: &Environment, args: &[Value]) -> MethodResult;
}

impl<F> Method for F
where
    F: Fn(&Environment, &[Value]) -> MethodResult + Send + Sync,
{
    #[inline]
    fn invoke(&self, env: &Environment, args: &[Value]) -> MethodResult {
        self(env, args)
    }
}

/// One (predicate, implementation) entry of an operation
#[derive(Clone)]
pub struct Registration {
    pub(crate) predicate: Arc<dyn Predicate>,
    pub(crate) method: Arc<dyn Method>,
}

impl Registration {
    pub fn new<P, M>(predicate: P, method: M) -> Self
    where
        P: Predicate + 'static,
        M: Method + 'static,
    {
        Registration {
            predicate: Arc::new(predicate),
            method: Arc::new(method),
        }
    }

    #[inline]
    pub fn accepts(&self, value: &Value) -> bool {
        self.predicate.accepts(value)
    }
}

impl Environment {
    /// New environment with `(predicate, method)` appended to `name`'s list.
    ///
    /// Entries are tried in registration order, so an earlier registration
    /// whose predicate also accepts a value shadows later ones.
    pub fn register_method<P, M>(&self, name: &str, predicate: P, method: M) -> Result<Environment, Error>
    where
        P: Fn(&Value) -> bool + Send + Sync + 'static,
        M: Fn(&Environment, &[Value]) -> MethodResult + Send + Sync + 'static,
    {
        self.register(name, Registration::new(predicate, method))
    }

    /// Append a prepared registration to `name`'s list
    pub fn register(&self, name: &str, registration: Registration) -> Result<Environment, Error> {
        self.check_free(name, MemberSlot::Method)?;

        let mut methods = (*self.methods).clone();
        let list = methods.entry(name.to_string()).or_default();
        let mut entries = Vec::with_capacity(list.len() + 1);
        entries.extend(list.iter().cloned());
        entries.push(registration);
        *list = Arc::new(entries);

        trace!(
            target: "lambdata::environment::register_method",
            name,
            position = list.len() - 1,
            "method registered"
        );
        Ok(self.derive(methods, (*self.properties).clone()))
    }

    /// New environment with `properties[name] = value`; an existing property
    /// of that name is replaced.
    pub fn register_property(&self, name: &str, value: impl Into<Value>) -> Result<Environment, Error> {
        self.check_free(name, MemberSlot::Property)?;

        let mut properties = (*self.properties).clone();
        properties.insert(name.to_string(), value.into());

        trace!(target: "lambdata::environment::register_property", name, "property registered");
        Ok(self.derive((*self.methods).clone(), properties))
    }
}
