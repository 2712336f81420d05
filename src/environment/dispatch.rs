//! Predicate dispatch.

use tracing::trace;

use super::Environment;
use crate::error::Error;
use crate::models::{MethodResult, Value};

impl Environment {
    /// Invoke operation `name`, dispatching on `args[0]`.
    ///
    /// Registrations are scanned in order and the first whose predicate
    /// accepts the first argument runs. An unknown name, an empty argument
    /// list or no accepting predicate is an `Error::Dispatch`.
    pub fn call(&self, name: &str, args: &[Value]) -> MethodResult {
        let Some(first) = args.first() else {
            return Err(Error::Dispatch {
                method: name.to_string(),
                argument: "nothing".to_string(),
                candidates: 0,
            });
        };

        let entries = self.methods.get(name);
        let candidates = entries.map_or(0, |list| list.len());
        if let Some(list) = entries {
            for (index, entry) in list.iter().enumerate() {
                if entry.accepts(first) {
                    trace!(target: "lambdata::environment::dispatch", method = name, index, "dispatch matched");
                    return entry.method.invoke(self, args);
                }
            }
        }

        trace!(target: "lambdata::environment::dispatch", method = name, candidates, "no candidate accepted argument");
        Err(Error::Dispatch {
            method: name.to_string(),
            argument: first.type_name(),
            candidates,
        })
    }

    #[inline]
    pub fn call1(&self, name: &str, a: Value) -> MethodResult {
        self.call(name, &[a])
    }

    #[inline]
    pub fn call2(&self, name: &str, a: Value, b: Value) -> MethodResult {
        self.call(name, &[a, b])
    }

    /// Would `call(name, [value, ..])` find an implementation?
    pub fn responds_to(&self, name: &str, value: &Value) -> bool {
        self.methods
            .get(name)
            .is_some_and(|list| list.iter().any(|entry| entry.accepts(value)))
    }

    /// Number of registrations for `name`
    pub fn candidates(&self, name: &str) -> usize {
        self.methods.get(name).map_or(0, |list| list.len())
    }

    /// Call `name` and require a boolean result
    pub fn call_bool(&self, name: &str, args: &[Value]) -> Result<bool, Error> {
        let result = self.call(name, args)?;
        result.as_bool().ok_or_else(|| Error::Type {
            op: name.to_string(),
            expected: "Bool result",
            got: result.type_name(),
        })
    }
}
