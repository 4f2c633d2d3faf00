//! Error types for configuration parsing and validation.

use std::path::PathBuf;

use thiserror::Error;

use crate::native::ParseLogLevelError;

/// Error type for configuration operations.
///
/// Covers errors from parsing, validation, and file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("Failed to read config file '{}': {source}", path.display())]
    FileRead {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to write configuration file (for init command).
    #[error("Failed to write config file '{}': {source}", path.display())]
    FileWrite {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Endpoint is not a socket address.
    #[error("Invalid endpoint for {field} '{value}': {reason}")]
    InvalidEndpoint {
        /// Name of the field
        field: &'static str,
        /// The invalid value
        value: String,
        /// Reason for invalidity
        reason: String,
    },

    /// Transport port is out of range.
    #[error("Invalid bdt_port {0}: must be greater than 0")]
    InvalidPort(u16),

    /// Unknown log level.
    #[error("Invalid log level: {0}")]
    InvalidLogLevel(#[from] ParseLogLevelError),

    /// Unknown observer mode.
    #[error("Invalid observer '{value}': expected poll or off")]
    InvalidObserver {
        /// The invalid value provided
        value: String,
    },

    /// Invalid duration value (zero or too large).
    #[error("Invalid duration for {field}: {reason}")]
    InvalidDuration {
        /// Name of the field
        field: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// The base path starts with `~` but no home directory is known.
    #[error("Cannot expand '{}': home directory is unknown", path.display())]
    HomeDirUnavailable {
        /// The unexpanded path
        path: PathBuf,
    },
}

/// Well-known field names for validation errors.
///
/// Use these constants for compile-time safety when matching field names.
pub mod field {
    /// The control service endpoint field.
    pub const NON_ADDR: &str = "non_addr";
    /// The websocket endpoint field.
    pub const WS_ADDR: &str = "ws_addr";
    /// The polling interval field.
    pub const POLL_INTERVAL: &str = "poll_interval";
    /// The dry-run bind delay field.
    pub const BIND_DELAY: &str = "bind_delay";
}
