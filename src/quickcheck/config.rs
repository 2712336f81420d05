//! Check configuration (`lambdata.toml`).
//!
//! ```toml
//! [check]
//! goal = 200
//! seed = 42
//! ```
//!
//! Both keys are optional. `LAMBDATA_GOAL` and `LAMBDATA_SEED` override the
//! file when set.

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use super::runner::DEFAULT_GOAL;
use crate::environment::Environment;
use crate::error::Error;

pub const GOAL_VAR: &str = "LAMBDATA_GOAL";
pub const SEED_VAR: &str = "LAMBDATA_SEED";

/// Settings for property checks.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    /// Trials per property
    pub goal: i64,

    /// Seed for the environment's random source; entropy when absent
    pub seed: Option<u64>,
}

impl Default for CheckConfig {
    fn default() -> Self {
        CheckConfig {
            goal: DEFAULT_GOAL,
            seed: None,
        }
    }
}

/// The whole file; only the `[check]` table is read.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    check: CheckConfig,
}

impl CheckConfig {
    /// Parse the `[check]` table from TOML content.
    pub fn parse_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<ConfigFile>(content).map(|file| file.check)
    }

    /// Load a configuration file.
    pub fn load_from_path(path: &Path) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        Self::parse_toml(&content).map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Apply overrides from the process environment
    pub fn with_env_overrides(self) -> Result<Self, Error> {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from any variable lookup
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(GOAL_VAR) {
            self.goal = raw
                .trim()
                .parse()
                .map_err(|e| Error::Config(format!("{}={:?}: {}", GOAL_VAR, raw, e)))?;
        }
        if let Some(raw) = lookup(SEED_VAR) {
            let seed = raw
                .trim()
                .parse()
                .map_err(|e| Error::Config(format!("{}={:?}: {}", SEED_VAR, raw, e)))?;
            self.seed = Some(seed);
        }
        Ok(self)
    }

    /// Register `goal` on `env` and reseed it when a seed is configured
    pub fn apply(&self, env: &Environment) -> Result<Environment, Error> {
        debug!(
            target: "lambdata::quickcheck::config",
            goal = self.goal,
            seed = ?self.seed,
            "applying check configuration"
        );
        let env = env.register_property("goal", self.goal)?;
        Ok(match self.seed {
            Some(seed) => env.with_seed(seed),
            None => env,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_table() {
        let config = CheckConfig::parse_toml("[check]\ngoal = 200\nseed = 42\n").unwrap();
        assert_eq!(config, CheckConfig { goal: 200, seed: Some(42) });
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        assert_eq!(CheckConfig::parse_toml("").unwrap(), CheckConfig::default());
        let config = CheckConfig::parse_toml("[check]\nseed = 7\n").unwrap();
        assert_eq!(config.goal, DEFAULT_GOAL);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        assert!(CheckConfig::parse_toml("[check]\ngoal = \"many\"\n").is_err());
        assert!(matches!(
            CheckConfig::load_from_path(Path::new("/nonexistent/lambdata.toml")),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_overrides_win_over_file() {
        let config = CheckConfig { goal: 10, seed: None }
            .with_overrides(|name| match name {
                GOAL_VAR => Some("25".to_string()),
                SEED_VAR => Some(" 9 ".to_string()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config, CheckConfig { goal: 25, seed: Some(9) });

        let bad = CheckConfig::default().with_overrides(|name| {
            (name == SEED_VAR).then(|| "minus one".to_string())
        });
        assert!(matches!(bad, Err(Error::Config(_))));
    }

    #[test]
    fn test_apply_sets_goal_and_seed() {
        let config = CheckConfig { goal: 3, seed: Some(11) };
        let a = config.apply(&Environment::new()).unwrap();
        let b = config.apply(&Environment::new()).unwrap();

        assert_eq!(a.int_property("goal"), Some(3));
        assert_eq!(a.random_range(0, 1_000_000), b.random_range(0, 1_000_000));
    }
}
