//! Configuration loading and management for the salary engine.
//!
//! This module loads the payroll rule set (overtime multipliers, capability
//! category policies, tenure milestones) and optional seed data from YAML.
//!
//! # Example
//!
//! ```no_run
//! use salary_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/payroll").unwrap();
//! println!("Milestones: {}", config.rules().milestones.len());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    CategoryRule, CategoryRules, MilestoneBonus, OvertimeMultipliers, PayrollRules, SeedData,
};
