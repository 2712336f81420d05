//! Merging environments.

use std::sync::Arc;

use tracing::trace;

use super::Environment;
use crate::error::Error;

/// How `combine` orders the two environments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombineMode {
    /// Receiver's registrations first; the argument's properties win
    Concat,
    /// Argument's registrations first; the receiver's properties win.
    /// `a.combine(b, Append)` is exactly `b.combine(a, Concat)`.
    Append,
}

impl Environment {
    pub fn combine(&self, other: &Environment, mode: CombineMode) -> Result<Environment, Error> {
        match mode {
            CombineMode::Concat => concat(self, other),
            CombineMode::Append => concat(other, self),
        }
    }

    #[inline]
    pub fn env_concat(&self, other: &Environment) -> Result<Environment, Error> {
        self.combine(other, CombineMode::Concat)
    }

    #[inline]
    pub fn env_append(&self, other: &Environment) -> Result<Environment, Error> {
        self.combine(other, CombineMode::Append)
    }
}

/// `first`'s entries then `second`'s for every name; `second`'s properties
/// override. The random source follows `first`.
fn concat(first: &Environment, second: &Environment) -> Result<Environment, Error> {
    let mut methods = (*first.methods).clone();
    for (name, entries) in second.methods.iter() {
        match methods.get_mut(name) {
            Some(existing) => {
                let mut merged = Vec::with_capacity(existing.len() + entries.len());
                merged.extend(existing.iter().cloned());
                merged.extend(entries.iter().cloned());
                *existing = Arc::new(merged);
            }
            None => {
                methods.insert(name.clone(), Arc::clone(entries));
            }
        }
    }

    let mut properties = (*first.properties).clone();
    properties.extend(
        second
            .properties
            .iter()
            .map(|(name, value)| (name.clone(), value.clone())),
    );

    let combined = first.derive(methods, properties);
    combined.check_disjoint()?;

    trace!(
        target: "lambdata::environment::combine",
        methods = combined.methods.len(),
        properties = combined.properties.len(),
        "environments combined"
    );
    Ok(combined)
}
