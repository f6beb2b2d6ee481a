//! Monthly salary engine.
//!
//! This crate calculates an employee's monthly pay from their pay grades,
//! tenure, allowances, recorded overtime and fixed deductions, and projects
//! their annual base salary. Every result carries an audit trail of the
//! rules that produced it.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod clock;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
