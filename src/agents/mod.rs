//! Pipeline stages for the daily metrics advisor
//!
//! ## Stages (run in this fixed order)
//!
//! 1. **Input Validator**: presence, type and sign checks on the six raw fields
//! 2. **Metrics Calculator**: profit, day-over-day changes and CAC
//! 3. **Recommendation Generator**: fixed threshold rules over the metrics
//!
//! Every stage short-circuits once an earlier stage has recorded an error.

pub mod input_validator;
pub mod metrics_calculator;
pub mod recommendation_generator;

pub use input_validator::InputValidator;
pub use metrics_calculator::MetricsCalculator;
pub use recommendation_generator::RecommendationGenerator;

use crate::pipeline::{PipelineState, StageError, StageOutput};
use tracing::{error, warn};

/// Trait for a single pipeline stage
///
/// Implementors only compute their contribution in [`Stage::evaluate`];
/// [`Stage::run`] owns the short-circuit and error recording shared by all
/// stages.
pub trait Stage: Send + Sync {
    /// Stage name used in logs (e.g. "input_validator")
    fn name(&self) -> &'static str;

    /// Compute this stage's output from the current state without mutating it.
    fn evaluate(&self, state: &PipelineState) -> Result<StageOutput, StageError>;

    /// Run the stage, taking ownership of the state and handing it back.
    ///
    /// A state that already carries an error is returned untouched, with no
    /// trace message added.
    fn run(&self, mut state: PipelineState) -> PipelineState {
        if let Some(previous) = state.error.as_deref() {
            warn!(stage = self.name(), error = %previous, "Skipping {} due to previous error", self.name());
            return state;
        }

        match self.evaluate(&state) {
            Ok(output) => state.commit(output),
            Err(e) => {
                error!(stage = self.name(), error = %e, "Stage failed");
                state.record_failure(&e);
            }
        }
        state
    }
}

/// Create the fixed validator → calculator → generator sequence
pub fn default_stages() -> Vec<Box<dyn Stage>> {
    vec![
        Box::new(InputValidator),
        Box::new(MetricsCalculator),
        Box::new(RecommendationGenerator),
    ]
}
