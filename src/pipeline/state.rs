//! Pipeline State and Stage Errors
//!
//! The single record threaded through the validator, calculator and
//! recommendation generator for one advisor invocation.

use crate::types::{DailyFigures, InputField, MetricKey, Metrics};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Trace messages appended by stages that complete successfully.
pub mod trace {
    pub const INPUT_RECEIVED: &str = "Input data received";
    pub const METRICS_CALCULATED: &str = "Metrics calculated";
    pub const RECOMMENDATIONS_GENERATED: &str = "Recommendations generated";
}

// ============================================================================
// Errors
// ============================================================================

/// Raw input rejected by the input validator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Input data must be a dictionary")]
    NotAMapping,

    #[error("Missing required input data: {}", format_key_list(.0))]
    MissingKeys(Vec<InputField>),

    #[error("Invalid value for {0}: must be a non-negative number")]
    InvalidValue(InputField),
}

/// Failure raised inside a pipeline stage
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StageError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Display is the quoted field name alone; the trace line adds the
    /// `Missing key` prefix.
    #[error("'{0}'")]
    MissingField(InputField),

    #[error("Metric {0} is not a finite number")]
    NonFiniteMetric(MetricKey),

    #[error("No metrics available for recommendations")]
    NoMetrics,
}

impl StageError {
    /// Trace line recorded in `messages` when this error stops the pipeline.
    ///
    /// Validation failures keep only the headline before the first `:`.
    pub fn trace_message(&self) -> String {
        match self {
            StageError::Validation(e) => {
                let text = e.to_string();
                let headline = text.split(':').next().unwrap_or_default();
                format!("Error: {headline}")
            }
            StageError::MissingField(_) => format!("Error: Missing key {self}"),
            StageError::NonFiniteMetric(_) | StageError::NoMetrics => format!("Error: {self}"),
        }
    }
}

/// Render keys as a bracketed, quoted list: `['a', 'b']`.
fn format_key_list(keys: &[InputField]) -> String {
    let quoted: Vec<String> = keys.iter().map(|k| format!("'{k}'")).collect();
    format!("[{}]", quoted.join(", "))
}

// ============================================================================
// Stage Output
// ============================================================================

/// What a successful stage contributes to the state.
///
/// Each variant replaces exactly one field, so a stage either commits its
/// whole result or nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum StageOutput {
    Input(DailyFigures),
    Metrics(Metrics),
    Recommendations(Vec<String>),
}

impl StageOutput {
    const fn trace_message(&self) -> &'static str {
        match self {
            StageOutput::Input(_) => trace::INPUT_RECEIVED,
            StageOutput::Metrics(_) => trace::METRICS_CALCULATED,
            StageOutput::Recommendations(_) => trace::RECOMMENDATIONS_GENERATED,
        }
    }
}

// ============================================================================
// Pipeline State
// ============================================================================

/// State for a single advisor invocation.
///
/// Created once per run, mutated by one stage at a time, then reduced to an
/// [`AdvisorReport`](crate::types::AdvisorReport).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineState {
    /// Untyped input exactly as supplied by the caller
    pub raw_input: serde_json::Value,

    /// Validated daily figures (empty until validation succeeds)
    pub input: DailyFigures,

    /// Derived metrics (empty or complete)
    pub metrics: Metrics,

    /// Rule-based recommendations, in rule order
    pub recommendations: Vec<String>,

    /// Append-only audit trail of pipeline progress
    pub messages: Vec<String>,

    /// First failure recorded; never cleared once set
    pub error: Option<String>,
}

impl PipelineState {
    pub fn new(raw_input: serde_json::Value) -> Self {
        Self {
            raw_input,
            ..Self::default()
        }
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// Apply a successful stage result and append its trace message.
    pub fn commit(&mut self, output: StageOutput) {
        self.messages.push(output.trace_message().to_string());
        match output {
            StageOutput::Input(figures) => self.input = figures,
            StageOutput::Metrics(metrics) => self.metrics = metrics,
            StageOutput::Recommendations(recs) => self.recommendations = recs,
        }
    }

    /// Record a stage failure. An existing error is kept.
    pub fn record_failure(&mut self, err: &StageError) {
        self.messages.push(err.trace_message());
        if self.error.is_none() {
            self.error = Some(err.to_string());
        }
    }
}
