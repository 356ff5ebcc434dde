//! Metrics Advisor - daily business decision support CLI
//!
//! Reads one input mapping, runs the advisor pipeline and prints the report
//! as JSON on stdout. Logs go to stderr.
//!
//! # Usage
//!
//! ```bash
//! # Run against the built-in sample day
//! cargo run --release
//!
//! # Advise on a JSON file
//! ./metrics-advisor --input today.json
//!
//! # Pipe input in, single-line output, show the pipeline trace
//! cat today.json | ./metrics-advisor --stdin --compact --trace
//! ```
//!
//! # Environment Variables
//!
//! - `ADVISOR_CONFIG`: Path to the advisor TOML config
//! - `RUST_LOG`: Logging level (overrides `logging.level`)

use anyhow::{Context, Result};
use clap::Parser;
use metrics_advisor::config::{AdvisorConfig, LoggingConfig};
use metrics_advisor::PipelineCoordinator;
use serde_json::{json, Value};
use std::io::Read;
use std::path::PathBuf;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "metrics-advisor")]
#[command(about = "Daily business metrics advisor - profit, CAC and recommendations")]
#[command(version)]
struct CliArgs {
    /// Path to a JSON file holding the input mapping
    #[arg(long, value_name = "PATH", conflicts_with = "stdin")]
    input: Option<PathBuf>,

    /// Read the input mapping as JSON from stdin
    #[arg(long)]
    stdin: bool,

    /// Path to the advisor TOML config
    #[arg(long, value_name = "PATH", env = "ADVISOR_CONFIG")]
    config: Option<PathBuf>,

    /// Print single-line JSON instead of pretty output
    #[arg(long)]
    compact: bool,

    /// Log every pipeline trace message after the run
    #[arg(long)]
    trace: bool,
}

/// Sample day used when no input is given.
fn sample_input() -> Value {
    json!({
        "today_sales": 1000,
        "today_cost": 800,
        "today_customers": 50,
        "yesterday_sales": 900,
        "yesterday_cost": 700,
        "yesterday_customers": 500
    })
}

fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.level.to_ascii_lowercase()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn read_input(args: &CliArgs) -> Result<Value> {
    if let Some(path) = &args.input {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file {}", path.display()))?;
        return serde_json::from_str(&contents)
            .with_context(|| format!("Input file {} is not valid JSON", path.display()));
    }

    if args.stdin {
        let mut contents = String::new();
        std::io::stdin()
            .read_to_string(&mut contents)
            .context("Failed to read input from stdin")?;
        return serde_json::from_str(&contents).context("Input on stdin is not valid JSON");
    }

    Ok(sample_input())
}

fn main() -> Result<()> {
    let args = CliArgs::parse();

    let loaded = AdvisorConfig::load(args.config.as_deref()).context("Failed to load advisor config")?;
    init_logging(&loaded.config.logging);

    info!(source = %loaded.source, "Advisor config loaded");
    for w in &loaded.warnings {
        warn!("{}", w);
    }

    let raw_input = read_input(&args)?;

    let (report, messages) = PipelineCoordinator::new().advise_traced(&raw_input);
    if args.trace || loaded.config.report.log_trace {
        for (step, message) in messages.iter().enumerate() {
            info!(step = step + 1, "{}", message);
        }
    }
    for (key, value) in report.metrics.iter() {
        debug!(metric = %key, value, "Metric");
    }

    let output = if args.compact || !loaded.config.report.pretty {
        serde_json::to_string(&report)
    } else {
        serde_json::to_string_pretty(&report)
    }
    .context("Failed to serialize advisor report")?;

    println!("{output}");
    Ok(())
}
