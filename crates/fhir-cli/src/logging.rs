//! Logging setup for `csv2fhir`.
//!
//! Every crate logs through `tracing`; this module installs the subscriber.
//!
//! # Log Levels
//!
//! - `error`: run-level failures
//! - `warn`: failed rows, validation findings, bundle capacity warnings
//! - `info`: run start and finish, progress every 100 written records
//! - `debug`: stage timings, loaded mapping and opened files
//! - `trace`: per-row detail
//!
//! CSV cells are clinical data. They only reach the log when `--log-data`
//! is set; otherwise [`redact_value`] substitutes [`REDACTED_VALUE`].

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, Layer, Registry,
    fmt::{self, MakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

static LOG_DATA_ENABLED: AtomicBool = AtomicBool::new(false);

/// Placeholder logged in place of row values.
pub const REDACTED_VALUE: &str = "[REDACTED]";

/// Crates whose events the default filter lets through at the chosen level.
const WORKSPACE_TARGETS: &[&str] = &[
    "csv2fhir",
    "fhir_cli",
    "fhir_ingest",
    "fhir_map",
    "fhir_model",
    "fhir_output",
    "fhir_validate",
];

pub fn log_data_enabled() -> bool {
    LOG_DATA_ENABLED.load(Ordering::Relaxed)
}

/// Returns `value` when row-level logging is enabled, otherwise a redacted token.
pub fn redact_value(value: &str) -> &str {
    if log_data_enabled() {
        value
    } else {
        REDACTED_VALUE
    }
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level_filter: LevelFilter,
    /// Let `RUST_LOG` override `level_filter` when set.
    pub use_env_filter: bool,
    pub with_timestamps: bool,
    pub with_target: bool,
    pub with_ansi: bool,
    pub format: LogFormat,
    /// Logs go to stderr when unset.
    pub log_file: Option<PathBuf>,
    /// Whether row values may be logged.
    pub log_data: bool,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    /// One JSON object per event.
    Json,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level_filter: LevelFilter::WARN,
            use_env_filter: true,
            with_timestamps: false,
            with_target: false,
            with_ansi: true,
            format: LogFormat::default(),
            log_file: None,
            log_data: false,
        }
    }
}

/// Install the global subscriber.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
///
/// # Panics
///
/// Panics if a global subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> io::Result<()> {
    if let Some(path) = &config.log_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        install(config, Mutex::new(file));
    } else {
        install(config, io::stderr);
    }
    Ok(())
}

fn install<W>(config: &LogConfig, writer: W)
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    LOG_DATA_ENABLED.store(config.log_data, Ordering::Release);
    let base = fmt::layer()
        .with_writer(writer)
        .with_ansi(config.with_ansi)
        .with_target(config.with_target);
    let timestamps = config.with_timestamps;
    let layer: Box<dyn Layer<Registry> + Send + Sync> = match (config.format, timestamps) {
        (LogFormat::Json, _) => base.with_ansi(false).json().boxed(),
        (LogFormat::Compact, true) => base.compact().boxed(),
        (LogFormat::Compact, false) => base.compact().without_time().boxed(),
        (LogFormat::Pretty, true) => base.boxed(),
        (LogFormat::Pretty, false) => base.without_time().boxed(),
    };
    tracing_subscriber::registry()
        .with(layer)
        .with(build_env_filter(config.level_filter, config.use_env_filter))
        .init();
}

fn build_env_filter(level: LevelFilter, use_env: bool) -> EnvFilter {
    if use_env && let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    EnvFilter::new(default_directives(level))
}

/// Third-party crates stay at `warn` or quieter; workspace crates follow `level`.
fn default_directives(level: LevelFilter) -> String {
    let global = LevelFilter::WARN.min(level).to_string().to_lowercase();
    let level = level.to_string().to_lowercase();
    let mut directives = vec![global];
    directives.extend(
        WORKSPACE_TARGETS
            .iter()
            .map(|target| format!("{target}={level}")),
    );
    directives.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_cover_workspace_crates() {
        let directives = default_directives(LevelFilter::DEBUG);
        assert!(directives.starts_with("warn,"));
        assert!(directives.contains("fhir_map=debug"));
        assert!(directives.contains("csv2fhir=debug"));
    }

    #[test]
    fn quiet_levels_apply_globally() {
        let directives = default_directives(LevelFilter::ERROR);
        assert!(directives.starts_with("error,"));
        let off = default_directives(LevelFilter::OFF);
        assert!(off.starts_with("off,"));
    }

    #[test]
    fn redacts_by_default() {
        assert_eq!(redact_value("John"), REDACTED_VALUE);
    }
}
