//! Immutable dispatch environments.
//!
//! An `Environment` maps operation names to ordered lists of
//! (predicate, implementation) registrations and holds plain named
//! properties. Calling an operation scans its list front to back against the
//! first argument and invokes the first implementation whose predicate
//! accepts it.
//!
//! # Architecture
//!
//! - `registration` - `Predicate`/`Method` traits and `register_*`
//! - `dispatch` - `call` and friends
//! - `combine` - merging two environments (`env_concat`, `env_append`)
//! - `members` - materialized members and collision checks
//! - `random` - the random source used by `arbitrary`
//!
//! # Immutability
//!
//! Every registration or combination returns a new environment. Operation
//! lists are `Arc`-shared, so a child only copies the name table and the one
//! list it extends; the parent is never observed to change. The random
//! source is the one piece of interior-mutable state, shared by an
//! environment and everything derived from it until `with_seed` replaces it.

mod combine;
mod dispatch;
mod members;
mod random;
mod registration;

pub use combine::CombineMode;
pub use members::{Member, RESERVED_MEMBERS};
pub use registration::{Method, Predicate, Registration};

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use itertools::Itertools;

use crate::models::Value;
use random::RandomSource;

/// Registrations for one operation name, in precedence order
pub(crate) type MethodList = Arc<Vec<Registration>>;

#[derive(Clone)]
pub struct Environment {
    methods: Arc<HashMap<String, MethodList>>,
    properties: Arc<HashMap<String, Value>>,
    random: RandomSource,
}

impl Environment {
    /// An empty environment with an entropy-seeded random source
    pub fn new() -> Self {
        Environment {
            methods: Arc::new(HashMap::new()),
            properties: Arc::new(HashMap::new()),
            random: RandomSource::from_entropy(),
        }
    }

    fn derive(
        &self,
        methods: HashMap<String, MethodList>,
        properties: HashMap<String, Value>,
    ) -> Environment {
        Environment {
            methods: Arc::new(methods),
            properties: Arc::new(properties),
            random: self.random.clone(),
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let methods = self
            .methods
            .iter()
            .sorted_by(|a, b| a.0.cmp(b.0))
            .map(|(name, list)| format!("{}/{}", name, list.len()))
            .join(", ");
        let properties = self.properties.keys().sorted().join(", ");
        write!(
            f,
            "Environment {{ methods: [{}], properties: [{}] }}",
            methods, properties
        )
    }
}
