//! Advisor Configuration Module
//!
//! Report formatting and logging options loaded from TOML. Recommendation
//! thresholds live in [`defaults`] and are not configurable.
//!
//! ## Loading Order
//!
//! 1. `--config <PATH>` on the command line
//! 2. `ADVISOR_CONFIG` environment variable (path to TOML file)
//! 3. `advisor_config.toml` in the current working directory
//! 4. Built-in defaults

mod advisor_config;
pub mod defaults;
pub mod validation;

pub use advisor_config::*;
