//! Recommendation Generator - Stage 3
//!
//! Applies three fixed threshold rules, in order:
//!
//! 1. Profit sign: exactly one of "reduce costs" / "maintain cost structure"
//! 2. Sales change: growth above +10% or decline below -10% (or nothing)
//! 3. CAC change: increase above +20%

use super::Stage;
use crate::config::defaults::{
    CAC_INCREASE_THRESHOLD_PCT, SALES_DECLINE_THRESHOLD_PCT, SALES_GROWTH_THRESHOLD_PCT,
};
use crate::pipeline::{PipelineState, StageError, StageOutput};
use crate::types::{MetricKey, Metrics};
use tracing::debug;

/// Recommendation texts emitted by the rules
pub mod advice {
    pub const REDUCE_COSTS: &str = "Reduce costs as profit is negative.";
    pub const MAINTAIN_COSTS: &str = "Maintain or optimize current cost structure.";
    pub const INCREASE_ADVERTISING: &str =
        "Consider increasing advertising budget due to sales growth.";
    pub const REVIEW_SALES: &str = "Review sales strategies as sales have declined significantly.";
    pub const REVIEW_MARKETING: &str =
        "Review marketing campaigns as CAC has increased significantly.";
}

/// Stage 3: rule-based recommendations
#[derive(Debug, Clone, Copy, Default)]
pub struct RecommendationGenerator;

impl RecommendationGenerator {
    /// Build the recommendation list for a metric set. Missing keys read as 0.
    pub fn recommend(metrics: &Metrics) -> Result<Vec<String>, StageError> {
        if metrics.is_empty() {
            return Err(StageError::NoMetrics);
        }

        let mut recs = Vec::with_capacity(3);

        if metrics.value_or_zero(MetricKey::Profit) < 0.0 {
            recs.push(advice::REDUCE_COSTS);
        } else {
            recs.push(advice::MAINTAIN_COSTS);
        }

        let sales_change = metrics.value_or_zero(MetricKey::SalesChange);
        if sales_change > SALES_GROWTH_THRESHOLD_PCT {
            recs.push(advice::INCREASE_ADVERTISING);
        } else if sales_change < SALES_DECLINE_THRESHOLD_PCT {
            recs.push(advice::REVIEW_SALES);
        }

        if metrics.value_or_zero(MetricKey::CacChange) > CAC_INCREASE_THRESHOLD_PCT {
            recs.push(advice::REVIEW_MARKETING);
        }

        Ok(recs.into_iter().map(String::from).collect())
    }
}

impl Stage for RecommendationGenerator {
    fn name(&self) -> &'static str {
        "recommendation_generator"
    }

    fn evaluate(&self, state: &PipelineState) -> Result<StageOutput, StageError> {
        let recs = Self::recommend(&state.metrics)?;
        debug!(count = recs.len(), "Recommendations generated");
        Ok(StageOutput::Recommendations(recs))
    }
}
