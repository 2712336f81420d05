//! The standard environment.
//!
//! Registration order is part of the behaviour: dispatch takes the first
//! accepting entry, so specific implementations come before the structural
//! fallbacks that accept any record or variant.

pub mod functions;
pub mod primitives;
pub mod structural;


use tracing::debug;

use crate::data;
use crate::environment::Environment;
use crate::error::Error;
use crate::quickcheck::{arbitrary, shrink, DEFAULT_GOAL};

pub use functions::kleisli;
pub use primitives::{equal, fold_array};

impl Environment {
    /// An environment with every built-in operation and data type.
    pub fn standard() -> Result<Environment, Error> {
        let env = functions::register(&Environment::new())?;
        let env = primitives::register_equal(&env)?;
        let env = primitives::register_array(&env)?;
        let env = primitives::register_semigroups(&env)?;
        let env = arbitrary::register(&env)?;
        let env = primitives::register_empty(&env)?;
        let env = shrink::register_primitives(&env)?;
        let env = primitives::register_sequences(&env)?;
        let env = data::register_all(&env)?;
        let env = structural::register(&env)?;
        let env = shrink::register_structural(&env)?;
        let env = env.register_property("goal", DEFAULT_GOAL)?;

        debug!(
            target: "lambdata::stdlib::standard",
            methods = env.method_names().len(),
            "standard environment ready"
        );
        Ok(env)
    }
}
