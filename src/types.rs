//! Core data types for the daily metrics advisor
//!
//! Defines the six required input fields, the validated daily figures,
//! the derived metric map and the final advisor report.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Input Fields
// ============================================================================

/// The six required numeric fields of a daily input mapping.
///
/// Variant order is the declaration order used for every validation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputField {
    TodaySales,
    TodayCost,
    TodayCustomers,
    YesterdaySales,
    YesterdayCost,
    YesterdayCustomers,
}

impl InputField {
    /// All required fields in declaration order.
    pub const ALL: [Self; 6] = [
        Self::TodaySales,
        Self::TodayCost,
        Self::TodayCustomers,
        Self::YesterdaySales,
        Self::YesterdayCost,
        Self::YesterdayCustomers,
    ];

    /// Key name as it appears in the raw input mapping.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TodaySales => "today_sales",
            Self::TodayCost => "today_cost",
            Self::TodayCustomers => "today_customers",
            Self::YesterdaySales => "yesterday_sales",
            Self::YesterdayCost => "yesterday_cost",
            Self::YesterdayCustomers => "yesterday_customers",
        }
    }
}

impl std::fmt::Display for InputField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated, non-negative figures for two consecutive days.
///
/// Empty until the input validator succeeds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyFigures(BTreeMap<InputField, f64>);

impl DailyFigures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: InputField, value: f64) {
        self.0.insert(field, value);
    }

    pub fn get(&self, field: InputField) -> Option<f64> {
        self.0.get(&field).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl FromIterator<(InputField, f64)> for DailyFigures {
    fn from_iter<I: IntoIterator<Item = (InputField, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// ============================================================================
// Derived Metrics
// ============================================================================

/// Names of the derived business metrics.
///
/// Variant order is the order metrics appear in serialized reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKey {
    /// Today's sales minus today's cost
    Profit,
    /// Day-over-day sales change (%)
    SalesChange,
    /// Day-over-day cost change (%)
    CostChange,
    /// Today's customer acquisition cost
    TodayCac,
    /// Day-over-day CAC change (%)
    CacChange,
}

impl MetricKey {
    pub const ALL: [Self; 5] = [
        Self::Profit,
        Self::SalesChange,
        Self::CostChange,
        Self::TodayCac,
        Self::CacChange,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Profit => "profit",
            Self::SalesChange => "sales_change",
            Self::CostChange => "cost_change",
            Self::TodayCac => "today_cac",
            Self::CacChange => "cac_change",
        }
    }
}

impl std::fmt::Display for MetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived metric map.
///
/// The calculator only ever stores a complete set of [`MetricKey::ALL`];
/// partial maps are accepted so the recommendation rules can be exercised
/// on hand-built metrics, where a missing key reads as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metrics(BTreeMap<MetricKey, f64>);

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: MetricKey) -> Option<f64> {
        self.0.get(&key).copied()
    }

    /// Value used for threshold evaluation: missing keys count as zero.
    pub fn value_or_zero(&self, key: MetricKey) -> f64 {
        self.get(key).unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when every metric the calculator produces is present.
    pub fn is_complete(&self) -> bool {
        MetricKey::ALL.iter().all(|k| self.0.contains_key(k))
    }

    pub fn iter(&self) -> impl Iterator<Item = (MetricKey, f64)> + '_ {
        self.0.iter().map(|(k, v)| (*k, *v))
    }

    /// First metric whose value is NaN or infinite, in report order.
    pub fn first_non_finite(&self) -> Option<MetricKey> {
        self.iter().find(|(_, v)| !v.is_finite()).map(|(k, _)| k)
    }
}

impl FromIterator<(MetricKey, f64)> for Metrics {
    fn from_iter<I: IntoIterator<Item = (MetricKey, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// ============================================================================
// Advisor Report
// ============================================================================

/// Overall verdict of one advisor run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProfitStatus {
    Profit,
    Loss,
    Error,
}

impl std::fmt::Display for ProfitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProfitStatus::Profit => write!(f, "Profit"),
            ProfitStatus::Loss => write!(f, "Loss"),
            ProfitStatus::Error => write!(f, "Error"),
        }
    }
}

/// Result returned to callers of the advisor.
///
/// Failures are reported through `profit_status = Error` and `error`,
/// never as a Rust error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisorReport {
    pub profit_status: ProfitStatus,
    /// Recommendations flagged for review, in original order
    pub alerts: Vec<String>,
    pub recommendations: Vec<String>,
    pub metrics: Metrics,
    pub error: Option<String>,
}

impl AdvisorReport {
    /// Error-shaped report with no metrics or recommendations.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            profit_status: ProfitStatus::Error,
            alerts: Vec::new(),
            recommendations: Vec::new(),
            metrics: Metrics::new(),
            error: Some(error.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.profit_status == ProfitStatus::Error
    }
}
