//! Advisor Configuration - report formatting and logging as TOML values
//!
//! Each struct implements `Default`, so an empty or absent config file
//! yields the built-in behaviour.

use super::defaults::{CONFIG_ENV_VAR, DEFAULT_LOG_LEVEL, LOCAL_CONFIG_FILE};
use super::validation::{validate_unknown_keys, ValidationWarning};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Log levels accepted in `logging.level`.
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for the advisor binary.
///
/// Load with `AdvisorConfig::load()` which searches:
/// 1. an explicit path (the `--config` flag)
/// 2. `$ADVISOR_CONFIG`
/// 3. `./advisor_config.toml`
/// 4. Built-in defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisorConfig {
    /// Report output options
    #[serde(default)]
    pub report: ReportConfig,

    /// Logging options
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the effective configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "{}", path.display()),
            ConfigSource::Defaults => write!(f, "built-in defaults"),
        }
    }
}

/// A loaded config plus the non-fatal warnings found while parsing it.
///
/// Warnings are returned rather than logged because the config is read
/// before the tracing subscriber exists.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: AdvisorConfig,
    pub source: ConfigSource,
    pub warnings: Vec<ValidationWarning>,
}

impl AdvisorConfig {
    /// Load configuration using the standard search order.
    ///
    /// A file that was named explicitly (flag or env var) must exist and
    /// parse; only the implicit local file is optional.
    pub fn load(explicit: Option<&Path>) -> Result<LoadedConfig, ConfigError> {
        let env_path = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
        match Self::locate(explicit, env_path, Path::new(LOCAL_CONFIG_FILE))? {
            Some(path) => Self::load_from_file(&path),
            None => Ok(LoadedConfig {
                config: Self::default(),
                source: ConfigSource::Defaults,
                warnings: Vec::new(),
            }),
        }
    }

    /// Pick the config file to read, if any.
    pub fn locate(
        explicit: Option<&Path>,
        env_path: Option<PathBuf>,
        local: &Path,
    ) -> Result<Option<PathBuf>, ConfigError> {
        if let Some(path) = explicit.map(Path::to_path_buf).or(env_path) {
            if !path.exists() {
                return Err(ConfigError::NotFound(path));
            }
            return Ok(Some(path));
        }
        if local.exists() {
            return Ok(Some(local.to_path_buf()));
        }
        Ok(None)
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<LoadedConfig, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let (config, warnings) =
            Self::from_toml_str(&contents).map_err(|e| e.with_path(path))?;
        Ok(LoadedConfig {
            config,
            source: ConfigSource::File(path.to_path_buf()),
            warnings,
        })
    }

    /// Parse and validate a TOML document.
    ///
    /// Unknown keys become warnings; invalid values are errors.
    pub fn from_toml_str(contents: &str) -> Result<(Self, Vec<ValidationWarning>), ConfigError> {
        let warnings = validate_unknown_keys(contents);
        let config: Self = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: PathBuf::new(),
            source,
        })?;
        config.validate()?;
        Ok((config, warnings))
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate values that serde cannot check on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        let level = self.logging.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            errors.push(format!(
                "logging.level = '{}' is not one of {}",
                self.logging.level,
                LOG_LEVELS.join(", ")
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Config I/O error ({}): {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config parse error ({}): {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Config validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
}

impl ConfigError {
    /// Attach the file path to a parse error raised from an in-memory string.
    fn with_path(self, path: &Path) -> Self {
        match self {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        }
    }
}

// ============================================================================
// Report Config
// ============================================================================

/// How the CLI renders the advisor report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Pretty-print JSON (`--compact` overrides)
    #[serde(default = "default_pretty")]
    pub pretty: bool,

    /// Log every pipeline trace message after the run (`--trace` forces on)
    #[serde(default)]
    pub log_trace: bool,
}

fn default_pretty() -> bool {
    true
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            pretty: default_pretty(),
            log_trace: false,
        }
    }
}

// ============================================================================
// Logging Config
// ============================================================================

/// Tracing subscriber settings. `RUST_LOG` takes precedence over `level`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit log lines as JSON
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
