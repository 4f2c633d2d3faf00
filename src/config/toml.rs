//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Native stack configuration section
    #[serde(default)]
    pub stack: StackSection,

    /// Link monitoring configuration
    #[serde(default)]
    pub monitor: MonitorSection,

    /// Device control configuration
    #[serde(default)]
    pub control: ControlSection,
}

/// Native stack configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StackSection {
    /// Filesystem root for stack state
    pub base_path: Option<PathBuf>,

    /// Control service endpoint
    pub non_addr: Option<String>,

    /// Websocket event endpoint
    pub ws_addr: Option<String>,

    /// Transport port
    pub bdt_port: Option<u16>,

    /// Log level
    pub loglevel: Option<String>,
}

/// Link monitoring configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MonitorSection {
    /// Observer mode: "poll" or "off"
    pub observer: Option<String>,

    /// Polling interval in seconds
    pub poll_interval: Option<u64>,
}

/// Device control configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ControlSection {
    /// Run the bind sequence against the dry-run control module
    pub enabled: Option<bool>,

    /// Seconds the dry-run control module takes to bind
    pub bind_delay: Option<u64>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# stack-bridge configuration file

[stack]
# Filesystem root for stack state (default: ~/.stack-bridge)
# base_path = "~/.stack-bridge"

# Control service endpoint (default: 127.0.0.1:0)
# non_addr = "127.0.0.1:0"

# Websocket event endpoint (default: 127.0.0.1:0)
# ws_addr = "127.0.0.1:0"

# Transport port (default: 10001)
bdt_port = 10001

# Log level: off, error, warn, info, debug, trace (default: info)
loglevel = "info"

[monitor]
# How link changes are observed: "poll" or "off" (default: poll)
observer = "poll"

# Polling interval in seconds (default: 5)
poll_interval = 5

[control]
# Walk the device bind sequence against a dry-run control module (default: false)
enabled = false

# Seconds the dry-run control module takes to bind (default: 3)
# bind_delay = 3
"#
    .to_string()
}
