//! System-wide default constants.
//!
//! Recommendation thresholds are fixed business rules and are deliberately
//! not exposed through the TOML config.

// ============================================================================
// Recommendation Rules
// ============================================================================

/// Sales growth (%) above which more advertising is suggested.
pub const SALES_GROWTH_THRESHOLD_PCT: f64 = 10.0;

/// Sales change (%) below which a sales strategy review is suggested.
pub const SALES_DECLINE_THRESHOLD_PCT: f64 = -10.0;

/// CAC increase (%) above which a marketing campaign review is suggested.
pub const CAC_INCREASE_THRESHOLD_PCT: f64 = 20.0;

/// Recommendations containing this marker are surfaced as alerts.
pub const ALERT_MARKER: &str = "Review";

// ============================================================================
// Config Discovery
// ============================================================================

/// Environment variable naming the advisor config file.
pub const CONFIG_ENV_VAR: &str = "ADVISOR_CONFIG";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "advisor_config.toml";

/// Log filter used when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_LOG_LEVEL: &str = "info";
