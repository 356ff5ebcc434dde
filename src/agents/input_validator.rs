//! Input Validator - Stage 1
//!
//! Checks the raw mapping for the six required fields and turns it into
//! [`DailyFigures`]. Failure modes, in the order they are checked:
//!
//! - input is not a mapping
//! - one or more required keys are absent (all of them are reported)
//! - a value is not a number or is negative (first offender reported)

use super::Stage;
use crate::pipeline::{PipelineState, StageError, StageOutput, ValidationError};
use crate::types::{DailyFigures, InputField};
use serde_json::Value;
use tracing::debug;

/// Stage 1: validates raw input
#[derive(Debug, Clone, Copy, Default)]
pub struct InputValidator;

impl InputValidator {
    /// Validate an untyped input value.
    ///
    /// Booleans are rejected as non-numeric.
    pub fn validate(raw: &Value) -> Result<DailyFigures, ValidationError> {
        let map = raw.as_object().ok_or(ValidationError::NotAMapping)?;

        let missing: Vec<InputField> = InputField::ALL
            .into_iter()
            .filter(|f| !map.contains_key(f.as_str()))
            .collect();
        if !missing.is_empty() {
            return Err(ValidationError::MissingKeys(missing));
        }

        let mut figures = DailyFigures::new();
        for field in InputField::ALL {
            let value = map
                .get(field.as_str())
                .and_then(Value::as_f64)
                .filter(|v| v.is_finite() && *v >= 0.0)
                .ok_or(ValidationError::InvalidValue(field))?;
            figures.insert(field, value);
        }
        Ok(figures)
    }
}

impl Stage for InputValidator {
    fn name(&self) -> &'static str {
        "input_validator"
    }

    fn evaluate(&self, state: &PipelineState) -> Result<StageOutput, StageError> {
        let figures = Self::validate(&state.raw_input)?;
        debug!(fields = figures.len(), "Input data validated");
        Ok(StageOutput::Input(figures))
    }
}
