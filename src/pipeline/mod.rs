//! Advisor Pipeline Module
//!
//! ```text
//! STAGE 1: Input Validator        (raw mapping -> daily figures)
//! STAGE 2: Metrics Calculator     (daily figures -> metrics)
//! STAGE 3: Recommendation Generator (metrics -> recommendations)
//! REPORT:  Result assembly        (state -> profit status, alerts)
//! ```
//!
//! Once any stage records an error, the remaining stages pass the state
//! through unchanged.

mod state;
mod coordinator;

pub use state::*;
pub use coordinator::{assemble_report, run_advisor, PipelineCoordinator};
