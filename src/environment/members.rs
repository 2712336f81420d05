//! Materialized members.
//!
//! Every method and property name is reachable as a member of the
//! environment. One name can only ever be bound once: a method may not share
//! a name with a property, and neither may take one of the environment's own
//! API names.

use super::Environment;
use crate::error::{Error, MemberKind};
use crate::models::{Function, Value};

/// Names owned by the environment API itself
pub const RESERVED_MEMBERS: [&str; 4] = ["method", "property", "env_concat", "env_append"];

/// Which table a new binding goes into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum MemberSlot {
    Method,
    Property,
}

/// A materialized member
#[derive(Debug, Clone)]
pub enum Member {
    /// Dispatches through the environment the member was taken from
    Method(Function),
    Property(Value),
}

impl Environment {
    /// Look up a property
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    /// Integer property, if present and an integer
    pub fn int_property(&self, name: &str) -> Option<i64> {
        self.property(name).and_then(Value::as_int)
    }

    pub fn has_method(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    /// Sorted operation names
    pub fn method_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.methods.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Sorted property names
    pub fn property_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.properties.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Materialize `name` as a member.
    ///
    /// A method member is a function bound to this environment: invoking it
    /// dispatches `name` here whatever environment the caller passes.
    pub fn member(&self, name: &str) -> Option<Member> {
        if self.methods.contains_key(name) {
            let env = self.clone();
            let op = name.to_string();
            return Some(Member::Method(Function::new(name, move |_, args| {
                env.call(&op, args)
            })));
        }
        self.property(name).cloned().map(Member::Property)
    }

    /// Fail if binding `name` into `slot` would collide with another member
    pub(super) fn check_free(&self, name: &str, slot: MemberSlot) -> Result<(), Error> {
        if RESERVED_MEMBERS.contains(&name) {
            return Err(Error::BindingCollision {
                name: name.to_string(),
                existing: MemberKind::Reserved,
            });
        }
        let existing = match slot {
            MemberSlot::Method if self.properties.contains_key(name) => Some(MemberKind::Property),
            MemberSlot::Property if self.methods.contains_key(name) => Some(MemberKind::Method),
            _ => None,
        };
        match existing {
            Some(existing) => Err(Error::BindingCollision {
                name: name.to_string(),
                existing,
            }),
            None => Ok(()),
        }
    }

    /// Fail if any name is bound both as a method and as a property
    pub(super) fn check_disjoint(&self) -> Result<(), Error> {
        let mut clashes: Vec<&String> = self
            .properties
            .keys()
            .filter(|name| self.methods.contains_key(*name))
            .collect();
        clashes.sort_unstable();
        match clashes.first() {
            Some(name) => Err(Error::BindingCollision {
                name: name.to_string(),
                existing: MemberKind::Method,
            }),
            None => Ok(()),
        }
    }
}
