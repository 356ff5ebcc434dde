//! Metrics Advisor: Daily Business Decision Support
//!
//! Validates two days of aggregate sales, cost and customer counts, derives
//! profit, day-over-day changes and customer acquisition cost, and emits
//! rule-based recommendations.
//!
//! ## Architecture
//!
//! - **Input Validator**: presence, type and sign checks on six raw fields
//! - **Metrics Calculator**: ratio metrics with zero-denominator degradation
//! - **Recommendation Generator**: fixed threshold rules
//! - **Coordinator**: threads one state through the stages and builds the report

pub mod config;
pub mod types;
pub mod agents;
pub mod pipeline;

// Re-export configuration
pub use config::AdvisorConfig;

// Re-export commonly used types
pub use types::{AdvisorReport, DailyFigures, InputField, MetricKey, Metrics, ProfitStatus};

// Re-export stages
pub use agents::{InputValidator, MetricsCalculator, RecommendationGenerator, Stage};

// Re-export pipeline
pub use pipeline::{
    assemble_report, run_advisor, PipelineCoordinator, PipelineState, StageError, ValidationError,
};
