//! Pipeline Regression Tests
//!
//! Exercises the public advisor entry point and the individual stages end to
//! end: reference figures, zero-denominator degradation, error short-circuit
//! and output stability across repeated runs.

use metrics_advisor::agents::recommendation_generator::advice;
use metrics_advisor::pipeline::trace;
use metrics_advisor::{
    run_advisor, AdvisorReport, InputValidator, MetricKey, Metrics, MetricsCalculator, PipelineCoordinator,
    PipelineState, ProfitStatus, RecommendationGenerator, Stage,
};
use serde_json::{json, Value};

const MISSING_KEYS_ERROR: &str = "Missing required input data: ['today_customers', 'yesterday_sales', 'yesterday_cost', 'yesterday_customers']";

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

fn assert_close(actual: Option<f64>, expected: f64) {
    let actual = actual.expect("metric should be present");
    assert!(
        (actual - expected).abs() < 1e-3,
        "expected {expected}, got {actual}"
    );
}

// ============================================================================
// Entry point
// ============================================================================

#[test]
fn valid_day_reports_profit() {
    let report = run_advisor(&valid_input());

    assert!(report.error.is_none());
    assert_eq!(report.profit_status, ProfitStatus::Profit);
    assert_eq!(report.metrics.get(MetricKey::Profit), Some(200.0));
    assert_close(report.metrics.get(MetricKey::SalesChange), 11.111);
    assert_close(report.metrics.get(MetricKey::CostChange), 14.286);
    assert_eq!(report.metrics.get(MetricKey::TodayCac), Some(16.0));
    assert_close(report.metrics.get(MetricKey::CacChange), 14.286);
    assert_eq!(
        report.recommendations,
        vec![advice::MAINTAIN_COSTS, advice::INCREASE_ADVERTISING]
    );
    assert!(report.alerts.is_empty());
}

#[test]
fn losing_day_raises_alerts() {
    let report = run_advisor(&json!({
        "today_sales": 500,
        "today_cost": 900,
        "today_customers": 10,
        "yesterday_sales": 1000,
        "yesterday_cost": 600,
        "yesterday_customers": 12
    }));

    assert_eq!(report.profit_status, ProfitStatus::Loss);
    assert_eq!(
        report.recommendations,
        vec![advice::REDUCE_COSTS, advice::REVIEW_SALES, advice::REVIEW_MARKETING]
    );
    assert_eq!(report.alerts, vec![advice::REVIEW_SALES, advice::REVIEW_MARKETING]);
}

#[test]
fn missing_keys_report_error() {
    let report = run_advisor(&json!({ "today_sales": 1000, "today_cost": 800 }));

    assert_eq!(report.profit_status, ProfitStatus::Error);
    assert_eq!(report.error.as_deref(), Some(MISSING_KEYS_ERROR));
    assert!(report.metrics.is_empty());
    assert!(report.recommendations.is_empty());
    assert!(report.alerts.is_empty());
}

#[test]
fn negative_value_reports_error() {
    let mut raw = valid_input();
    raw["today_cost"] = json!(-800);
    let report = run_advisor(&raw);

    assert_eq!(report.profit_status, ProfitStatus::Error);
    assert_eq!(
        report.error.as_deref(),
        Some("Invalid value for today_cost: must be a non-negative number")
    );
}

#[test]
fn non_mapping_input_reports_error() {
    let report = run_advisor(&json!("not a dict"));

    assert_eq!(report.profit_status, ProfitStatus::Error);
    assert_eq!(report.error.as_deref(), Some("Input data must be a dictionary"));
    assert!(report.metrics.is_empty());
    assert!(report.recommendations.is_empty());
}

#[test]
fn all_zero_day_degrades_without_failure() {
    let raw = json!({
        "today_sales": 0,
        "today_cost": 0,
        "today_customers": 0,
        "yesterday_sales": 0,
        "yesterday_cost": 0,
        "yesterday_customers": 0
    });
    let report = run_advisor(&raw);

    assert!(report.error.is_none());
    assert_eq!(report.profit_status, ProfitStatus::Profit);
    for key in MetricKey::ALL {
        assert_eq!(report.metrics.get(key), Some(0.0));
    }
    assert_eq!(report.recommendations, vec![advice::MAINTAIN_COSTS]);
}

#[test]
fn repeated_runs_serialize_identically() {
    let first = serde_json::to_string_pretty(&run_advisor(&valid_input())).unwrap();
    let second = serde_json::to_string_pretty(&run_advisor(&valid_input())).unwrap();
    assert_eq!(first, second);

    let coordinator = PipelineCoordinator::new();
    let a = serde_json::to_string(&coordinator.advise(&valid_input())).unwrap();
    let b = serde_json::to_string(&coordinator.advise(&valid_input())).unwrap();
    assert_eq!(a, b);
}

#[test]
fn report_json_shape() {
    let value = serde_json::to_value(run_advisor(&valid_input())).unwrap();
    let keys: Vec<&str> = value
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    for expected in ["profit_status", "alerts", "recommendations", "metrics", "error"] {
        assert!(keys.contains(&expected), "missing key {expected}");
    }
    assert_eq!(value["profit_status"], "Profit");
    assert_eq!(value["error"], Value::Null);
    assert_eq!(value["metrics"]["profit"].as_f64(), Some(200.0));
    assert_eq!(value["metrics"]["today_cac"].as_f64(), Some(16.0));
}

#[test]
fn overflowing_metric_becomes_error_report() {
    let report = run_advisor(&json!({
        "today_sales": 1e308,
        "today_cost": 0,
        "today_customers": 1,
        "yesterday_sales": 1e-10,
        "yesterday_cost": 1,
        "yesterday_customers": 1
    }));

    assert_eq!(report.profit_status, ProfitStatus::Error);
    assert_eq!(
        report.error.as_deref(),
        Some("Metric sales_change is not a finite number")
    );
    assert!(report.metrics.is_empty());
    assert!(report.recommendations.is_empty());

    let text = serde_json::to_string(&report).unwrap();
    let parsed: AdvisorReport = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, report);
}

// ============================================================================
// Stage-level behaviour
// ============================================================================

#[test]
fn stages_chain_by_value() {
    let state = PipelineState::new(valid_input());
    let state = InputValidator.run(state);
    let state = MetricsCalculator.run(state);
    let state = RecommendationGenerator.run(state);

    assert!(state.error.is_none());
    assert!(state.metrics.is_complete());
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
fn error_before_calculator_is_carried_unchanged() {
    let mut state = InputValidator.run(PipelineState::new(valid_input()));
    let seeded: Metrics = [(MetricKey::Profit, 42.0)].into_iter().collect();
    state.metrics = seeded.clone();
    state.error = Some("Previous error".to_string());

    let state = RecommendationGenerator.run(MetricsCalculator.run(state));
    assert_eq!(state.metrics, seeded);
    assert!(state.recommendations.is_empty());
    assert_eq!(state.error.as_deref(), Some("Previous error"));
    assert_eq!(state.messages, vec![trace::INPUT_RECEIVED]);
}

#[test]
fn generator_without_metrics_fails() {
    let mut state = PipelineState::new(valid_input());
    state.messages.push(trace::METRICS_CALCULATED.to_string());
    let state = RecommendationGenerator.run(state);

    assert_eq!(
        state.error.as_deref(),
        Some("No metrics available for recommendations")
    );
    assert!(state
        .messages
        .iter()
        .any(|m| m == "Error: No metrics available for recommendations"));
}

#[test]
fn each_missing_key_is_listed_in_declaration_order() {
    let full = valid_input();
    let keys: Vec<String> = full.as_object().unwrap().keys().cloned().collect();

    for dropped in &keys {
        let mut raw = full.clone();
        raw.as_object_mut().unwrap().remove(dropped);
        let report = run_advisor(&raw);
        assert_eq!(
            report.error,
            Some(format!("Missing required input data: ['{dropped}']"))
        );
    }
}
