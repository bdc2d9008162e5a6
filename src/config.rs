//! Command-line configuration

use std::path::PathBuf;

use clap::Args;
use jiff::tz::TimeZone;
use pedidos::{
    clock::SystemClock,
    export::DirectorySink,
    history::JsonFileHistory,
};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    /// The configured time zone is not known.
    #[error("unknown time zone {name}: {source}")]
    TimeZone {
        /// Configured name.
        name: String,

        /// Lookup failure.
        source: jiff::Error,
    },
}

/// Log output format.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub(crate) struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, global = true, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Where the catalog, history and exports live.
#[derive(Debug, Args)]
pub(crate) struct StorageConfig {
    /// Catalog YAML file
    #[arg(long, global = true, env = "PEDIDOS_CATALOG", default_value = "fixtures/catalog.yml")]
    pub catalog: PathBuf,

    /// Order history JSON file
    #[arg(long, global = true, env = "PEDIDOS_HISTORY", default_value = "order_history.json")]
    pub history: PathBuf,

    /// Directory exports are written to
    #[arg(long, global = true, env = "PEDIDOS_OUT_DIR", default_value = ".")]
    pub out_dir: PathBuf,

    /// IANA time zone dates are shown in; the host zone when unset
    #[arg(long, global = true, env = "PEDIDOS_TIME_ZONE")]
    pub time_zone: Option<String>,
}

impl StorageConfig {
    /// Clock in the configured time zone.
    pub(crate) fn clock(&self) -> Result<SystemClock, ConfigError> {
        match &self.time_zone {
            None => Ok(SystemClock::system()),
            Some(name) => TimeZone::get(name)
                .map(SystemClock::new)
                .map_err(|source| ConfigError::TimeZone {
                    name: name.clone(),
                    source,
                }),
        }
    }

    /// History store at the configured path.
    pub(crate) fn history(&self) -> JsonFileHistory {
        JsonFileHistory::new(&self.history)
    }

    /// Sink writing into the configured directory.
    pub(crate) fn sink(&self) -> DirectorySink {
        DirectorySink::new(&self.out_dir)
    }
}
