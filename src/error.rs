/// Error types for the catfish odds logger.
///
/// Each stage of a run has its own error enum; `RunError` wraps them and
/// decides the process exit status. Nothing here is retried: a failed run
/// writes nothing and the next scheduled run starts fresh.

use std::path::PathBuf;
use thiserror::Error;

/// Missing or invalid environment configuration. Raised before any fetch.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    Missing(&'static str),

    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Failures talking to, or understanding, an upstream data provider.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{source_name} request failed: {error}")]
    Http {
        source_name: &'static str,
        #[source]
        error: reqwest::Error,
    },

    #[error("{source_name} returned HTTP {status}")]
    HttpStatus { source_name: &'static str, status: u16 },

    #[error("{source_name} response could not be parsed: {message}")]
    Parse { source_name: &'static str, message: String },

    #[error("{source_name} returned no usable data: {detail}")]
    NoData { source_name: &'static str, detail: String },

    #[error("{source_name} observation has no {field} value")]
    MissingValue { source_name: &'static str, field: &'static str },

    #[error("no geocode result for ZIP {0}")]
    NoGeocodeResult(String),

    #[error("no observation stations near {latitude},{longitude}")]
    NoStation { latitude: f64, longitude: f64 },
}

/// Failures reading or rewriting the odds log.
#[derive(Debug, Error)]
pub enum LogStoreError {
    #[error("log file {path}: {error}")]
    Io {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    #[error("log file {path} is not a valid odds log: {message}")]
    Corrupt { path: PathBuf, message: String },

    #[error("could not serialize log entries: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("entry at {entry} is older than the last logged entry at {last}")]
    OutOfOrder { entry: String, last: String },

    #[error("entry at {time} has a non-finite {field}")]
    NonFinite { time: String, field: &'static str },
}

/// Anything that ends a run early.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("data fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("log store error: {0}")]
    LogStore(#[from] LogStoreError),
}

impl RunError {
    /// Process exit status reported to the scheduler.
    pub fn exit_code(&self) -> i32 {
        match self {
            RunError::Config(_) => 2,
            RunError::Fetch(_) => 3,
            RunError::LogStore(_) => 4,
        }
    }
}
