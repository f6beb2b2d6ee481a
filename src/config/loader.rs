//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payroll
//! rules and seed data from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{PayrollRules, SeedData};

/// Loads and provides access to payroll configuration.
///
/// # Directory Structure
///
/// ```text
/// config/payroll/
/// ├── rules.yaml   # Overtime multipliers, category policies, milestone bonuses
/// └── seed.yaml    # Optional grade tables, employees and work records
/// ```
///
/// # Example
///
/// ```no_run
/// use salary_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/payroll").unwrap();
/// println!("Late-night multiplier: {}", loader.rules().overtime.late_night);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    rules: PayrollRules,
    seed: Option<SeedData>,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// `rules.yaml` is required; `seed.yaml` is loaded when present.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - `rules.yaml` is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML (`ConfigParseError`)
    /// - The rules fail validation (`InvalidConfig`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let rules = Self::load_yaml::<PayrollRules>(&path.join("rules.yaml"))?;
        rules.validate()?;

        let seed_path = path.join("seed.yaml");
        let seed = if seed_path.exists() {
            Some(Self::load_seed(&seed_path)?)
        } else {
            None
        };

        debug!(
            config_dir = %path.display(),
            has_seed = seed.is_some(),
            "Loaded payroll configuration"
        );

        Ok(Self { rules, seed })
    }

    /// Creates a loader around already-built rules, without seed data.
    pub fn from_rules(rules: PayrollRules) -> Self {
        Self { rules, seed: None }
    }

    /// Loads a standalone seed file.
    pub fn load_seed<P: AsRef<Path>>(path: P) -> EngineResult<SeedData> {
        Self::load_yaml::<SeedData>(path.as_ref())
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the payroll rules.
    pub fn rules(&self) -> &PayrollRules {
        &self.rules
    }

    /// Returns the seed data, if a seed file was present.
    pub fn seed(&self) -> Option<&SeedData> {
        self.seed.as_ref()
    }
}
