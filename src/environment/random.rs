//! The environment's random source.

use std::sync::Arc;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::Environment;

/// Seedable generator shared along an environment lineage
#[derive(Clone)]
pub(super) struct RandomSource(Arc<Mutex<StdRng>>);

impl RandomSource {
    pub(super) fn from_entropy() -> Self {
        RandomSource(Arc::new(Mutex::new(StdRng::from_entropy())))
    }

    pub(super) fn seeded(seed: u64) -> Self {
        RandomSource(Arc::new(Mutex::new(StdRng::seed_from_u64(seed))))
    }
}

impl Environment {
    /// Same registrations with a fresh generator seeded from `seed`
    pub fn with_seed(&self, seed: u64) -> Environment {
        Environment {
            methods: self.methods.clone(),
            properties: self.properties.clone(),
            random: RandomSource::seeded(seed),
        }
    }

    /// Uniform integer in `[low, high)`; `low` when the range is empty
    pub fn random_range(&self, low: i64, high: i64) -> i64 {
        if high <= low {
            return low;
        }
        self.random.0.lock().gen_range(low..high)
    }

    /// Uniform float in `[low, high)`; `low` when the range is empty
    pub fn random_float(&self, low: f64, high: f64) -> f64 {
        if high <= low {
            return low;
        }
        self.random.0.lock().gen_range(low..high)
    }

    pub fn random_bool(&self) -> bool {
        self.random.0.lock().gen_bool(0.5)
    }

    /// Uniformly chosen element, `None` for an empty slice
    pub fn one_of<'a, T>(&self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let index = self.random.0.lock().gen_range(0..items.len());
        items.get(index)
    }
}
