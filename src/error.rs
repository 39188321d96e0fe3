//! Error types for pdv-scanner.
//!
//! The classifier itself never fails: a line always yields a best-effort
//! token or is discarded. Errors only come from configuration and from the
//! device adapters that feed the keyboard router.

use thiserror::Error;

/// Result type alias for pdv-scanner operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid classifier configuration.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Device stream failure.
    #[error("device error: {0}")]
    Device(#[from] DeviceError),

    /// Terminal or other I/O failure outside a device stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Weight bound is not a positive finite number.
    #[error("max weight must be a positive finite number of kg, got {0}")]
    InvalidMaxWeight(f64),

    /// No key would ever complete a line.
    #[error("at least one terminator key is required")]
    NoTerminator,

    /// A key is both a terminator and an edit key.
    #[error("key {key:?} cannot be both a terminator and an edit key")]
    OverlappingKeys { key: String },

    /// Malformed JSON document.
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Environment variable present but unparseable.
    #[error("invalid value {value:?} for {var}")]
    InvalidEnv { var: &'static str, value: String },
}

/// Device stream errors.
#[derive(Error, Debug)]
pub enum DeviceError {
    /// Underlying reader failed.
    #[error("{source_name} read failed: {source}")]
    Read {
        source_name: &'static str,
        #[source]
        source: std::io::Error,
    },
}

impl DeviceError {
    pub(crate) fn read(source_name: &'static str, source: std::io::Error) -> Self {
        Self::Read {
            source_name,
            source,
        }
    }
}
