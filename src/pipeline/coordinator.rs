//! Pipeline Coordinator - fixed three-stage sequence plus result assembly
//!
//! The coordinator owns the stage list, threads one [`PipelineState`] through
//! it, and reduces the terminal state to an [`AdvisorReport`]. Nothing is
//! carried between invocations.

use super::state::PipelineState;
use crate::agents::{self, Stage};
use crate::config::defaults::ALERT_MARKER;
use crate::types::{AdvisorReport, MetricKey, ProfitStatus};
use serde_json::Value;
use tracing::{error, info};

/// Runs the validator → calculator → generator sequence
pub struct PipelineCoordinator {
    stages: Vec<Box<dyn Stage>>,
}

impl Default for PipelineCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineCoordinator {
    /// Create a coordinator with the default stage sequence
    pub fn new() -> Self {
        Self {
            stages: agents::default_stages(),
        }
    }

    /// Thread a fresh state through every stage and return the terminal state.
    pub fn run(&self, raw_input: Value) -> PipelineState {
        self.stages
            .iter()
            .fold(PipelineState::new(raw_input), |state, stage| stage.run(state))
    }

    /// Run the pipeline and assemble the report.
    ///
    /// Never fails: any error surfaces as a report with
    /// `profit_status = Error`.
    pub fn advise(&self, raw_input: &Value) -> AdvisorReport {
        self.advise_traced(raw_input).0
    }

    /// Like [`advise`](Self::advise), also returning the run's trace messages.
    pub fn advise_traced(&self, raw_input: &Value) -> (AdvisorReport, Vec<String>) {
        info!("Running advisor pipeline");
        let mut state = self.run(raw_input.clone());
        let messages = std::mem::take(&mut state.messages);
        let report = assemble_report(state);

        match &report.error {
            Some(e) => error!(error = %e, "Advisor run failed"),
            None => info!(
                status = %report.profit_status,
                recommendations = report.recommendations.len(),
                alerts = report.alerts.len(),
                "Advisor run complete"
            ),
        }
        (report, messages)
    }
}

/// Reduce a terminal pipeline state to the caller-facing report.
///
/// Errors pass through whatever metrics and recommendations exist, with no
/// alerts. Otherwise alerts are the recommendations containing the alert
/// marker, in their original order.
pub fn assemble_report(state: PipelineState) -> AdvisorReport {
    if let Some(error) = state.error {
        return AdvisorReport {
            profit_status: ProfitStatus::Error,
            alerts: Vec::new(),
            recommendations: state.recommendations,
            metrics: state.metrics,
            error: Some(error),
        };
    }

    let profit_status = if state.metrics.value_or_zero(MetricKey::Profit) >= 0.0 {
        ProfitStatus::Profit
    } else {
        ProfitStatus::Loss
    };
    let alerts = state
        .recommendations
        .iter()
        .filter(|r| r.contains(ALERT_MARKER))
        .cloned()
        .collect();

    AdvisorReport {
        profit_status,
        alerts,
        recommendations: state.recommendations,
        metrics: state.metrics,
        error: None,
    }
}

/// Advise on one raw input mapping using the default pipeline.
pub fn run_advisor(raw_input: &Value) -> AdvisorReport {
    PipelineCoordinator::new().advise(raw_input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::recommendation_generator::advice;
    use crate::pipeline::trace;
    use crate::types::Metrics;
    use serde_json::json;

    fn valid_input() -> Value {
        json!({
            "today_sales": 1000,
            "today_cost": 800,
            "today_customers": 50,
            "yesterday_sales": 900,
            "yesterday_cost": 700,
            "yesterday_customers": 50
        })
    }

    #[test]
    fn test_full_run_trace_order() {
        let state = PipelineCoordinator::new().run(valid_input());
        assert!(state.error.is_none());
        assert_eq!(
            state.messages,
            vec![
                trace::INPUT_RECEIVED,
                trace::METRICS_CALCULATED,
                trace::RECOMMENDATIONS_GENERATED
            ]
        );
    }

    #[test]
    fn test_validation_failure_short_circuits_downstream() {
        let state = PipelineCoordinator::new().run(json!({ "today_sales": 1000 }));
        assert!(state.error.is_some());
        assert_eq!(state.messages, vec!["Error: Missing required input data"]);
        assert!(state.metrics.is_empty());
        assert!(state.recommendations.is_empty());
    }

    #[test]
    fn test_assemble_profit_and_alerts() {
        let mut state = PipelineState::new(Value::Null);
        state.metrics = [(MetricKey::Profit, -1.0)].into_iter().collect();
        state.recommendations = vec![
            advice::REDUCE_COSTS.to_string(),
            advice::REVIEW_SALES.to_string(),
            advice::REVIEW_MARKETING.to_string(),
        ];
        let report = assemble_report(state);
        assert_eq!(report.profit_status, ProfitStatus::Loss);
        assert_eq!(report.alerts, vec![advice::REVIEW_SALES, advice::REVIEW_MARKETING]);
        assert_eq!(report.recommendations.len(), 3);
        assert!(report.error.is_none());
    }

    #[test]
    fn test_assemble_zero_profit_is_profit() {
        let mut state = PipelineState::new(Value::Null);
        state.metrics = [(MetricKey::Profit, 0.0)].into_iter().collect();
        state.recommendations = vec![advice::MAINTAIN_COSTS.to_string()];
        let report = assemble_report(state);
        assert_eq!(report.profit_status, ProfitStatus::Profit);
        assert!(report.alerts.is_empty());
    }

    #[test]
    fn test_assemble_error_passes_existing_content_through() {
        let mut state = PipelineState::new(Value::Null);
        let metrics: Metrics = [(MetricKey::Profit, 5.0)].into_iter().collect();
        state.metrics = metrics.clone();
        state.recommendations = vec![advice::REVIEW_SALES.to_string()];
        state.error = Some("late failure".to_string());

        let report = assemble_report(state);
        assert_eq!(report.profit_status, ProfitStatus::Error);
        assert!(report.alerts.is_empty());
        assert_eq!(report.metrics, metrics);
        assert_eq!(report.recommendations, vec![advice::REVIEW_SALES]);
        assert_eq!(report.error.as_deref(), Some("late failure"));
    }

    #[test]
    fn test_non_mapping_input_reports_error() {
        for raw in [json!("not a dict"), json!(42), json!(null), json!([1, 2])] {
            let report = run_advisor(&raw);
            assert_eq!(report, AdvisorReport::failure("Input data must be a dictionary"));
        }
    }

    #[test]
    fn test_advise_traced_matches_advise() {
        let coordinator = PipelineCoordinator::new();
        let (report, messages) = coordinator.advise_traced(&valid_input());
        assert_eq!(report, coordinator.advise(&valid_input()));
        assert_eq!(
            messages,
            vec![
                trace::INPUT_RECEIVED,
                trace::METRICS_CALCULATED,
                trace::RECOMMENDATIONS_GENERATED
            ]
        );

        let (report, messages) = coordinator.advise_traced(&json!([1, 2]));
        assert_eq!(report.profit_status, ProfitStatus::Error);
        assert_eq!(messages, vec!["Error: Input data must be a dictionary"]);
    }
}
