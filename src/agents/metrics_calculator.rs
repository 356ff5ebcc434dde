//! Metrics Calculator - Stage 2
//!
//! Derives profit, day-over-day percentage changes and customer acquisition
//! cost (CAC) from validated daily figures.
//!
//! Every ratio whose denominator is zero evaluates to 0 instead of failing.
//! A metric that overflows to infinity fails the stage instead of being
//! stored.

use super::Stage;
use crate::pipeline::{PipelineState, StageError, StageOutput};
use crate::types::{DailyFigures, InputField, MetricKey, Metrics};
use tracing::debug;

/// Stage 2: derives business metrics
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsCalculator;

/// `numerator / denominator`, or 0 when the denominator is zero.
pub fn ratio_or_zero(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Percentage change from `previous` to `current`, or 0 when `previous` is zero.
pub fn percent_change(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        0.0
    } else {
        (current - previous) / previous * 100.0
    }
}

impl MetricsCalculator {
    /// Compute the complete metric set.
    ///
    /// Fails with [`StageError::MissingField`] if a field is absent even
    /// though validation should have guaranteed it, and with
    /// [`StageError::NonFiniteMetric`] if a derived value is NaN or infinite.
    pub fn calculate(figures: &DailyFigures) -> Result<Metrics, StageError> {
        let field = |f: InputField| figures.get(f).ok_or(StageError::MissingField(f));

        let today_sales = field(InputField::TodaySales)?;
        let today_cost = field(InputField::TodayCost)?;
        let today_customers = field(InputField::TodayCustomers)?;
        let yesterday_sales = field(InputField::YesterdaySales)?;
        let yesterday_cost = field(InputField::YesterdayCost)?;
        let yesterday_customers = field(InputField::YesterdayCustomers)?;

        let profit = today_sales - today_cost;
        let sales_change = percent_change(today_sales, yesterday_sales);
        let cost_change = percent_change(today_cost, yesterday_cost);
        let today_cac = ratio_or_zero(today_cost, today_customers);
        let yesterday_cac = ratio_or_zero(yesterday_cost, yesterday_customers);
        let cac_change = percent_change(today_cac, yesterday_cac);

        let metrics: Metrics = [
            (MetricKey::Profit, profit),
            (MetricKey::SalesChange, sales_change),
            (MetricKey::CostChange, cost_change),
            (MetricKey::TodayCac, today_cac),
            (MetricKey::CacChange, cac_change),
        ]
        .into_iter()
        .collect();

        match metrics.first_non_finite() {
            Some(key) => Err(StageError::NonFiniteMetric(key)),
            None => Ok(metrics),
        }
    }
}

impl Stage for MetricsCalculator {
    fn name(&self) -> &'static str {
        "metrics_calculator"
    }

    fn evaluate(&self, state: &PipelineState) -> Result<StageOutput, StageError> {
        let metrics = Self::calculate(&state.input)?;
        debug!(
            profit = metrics.value_or_zero(MetricKey::Profit),
            sales_change = metrics.value_or_zero(MetricKey::SalesChange),
            cac_change = metrics.value_or_zero(MetricKey::CacChange),
            "Metrics calculated"
        );
        Ok(StageOutput::Metrics(metrics))
    }
}
