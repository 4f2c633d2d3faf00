//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::native::LogLevel;
use crate::stack::StackParams;

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// How the binary observes link changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ObserverMode {
    /// Poll the host's interfaces.
    #[default]
    Poll,
    /// No observation; the stack is never reset.
    Off,
}

impl fmt::Display for ObserverMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Poll => write!(f, "poll"),
            Self::Off => write!(f, "off"),
        }
    }
}

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Parameters handed to the stack on start
    pub stack: StackParams,

    /// How link changes are observed
    pub observer: ObserverMode,

    /// Polling interval for the poll observer
    pub poll_interval: Duration,

    /// Bind delay of the dry-run control module; `None` skips the bind sequence
    pub control: Option<Duration>,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config {{ base_path: {}, non_addr: {}, ws_addr: {}, bdt_port: {}, loglevel: {}, \
             observer: {}, poll_interval: {}s, control: {} }}",
            self.stack.base_path.display(),
            self.stack.non_addr,
            self.stack.ws_addr,
            self.stack.bdt_port,
            self.stack.loglevel,
            self.observer,
            self.poll_interval.as_secs(),
            self.control.map_or_else(
                || "off".to_string(),
                |delay| format!("bind in {}s", delay.as_secs())
            ),
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// Every value resolves as CLI explicit > TOML > built-in default.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - An endpoint is not an `ip:port` socket address
    /// - `bdt_port` is zero
    /// - The log level or observer mode is unknown
    /// - The poll interval or the bind delay is zero
    /// - The base path needs a home directory that cannot be determined
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let stack = toml.map(|t| &t.stack);

        let base_path = Self::resolve_base_path(cli, toml)?;

        let non_addr = resolve_endpoint(
            field::NON_ADDR,
            cli.non_addr
                .as_deref()
                .or_else(|| stack.and_then(|s| s.non_addr.as_deref()))
                .unwrap_or(defaults::NON_ADDR),
        )?;

        let ws_addr = resolve_endpoint(
            field::WS_ADDR,
            cli.ws_addr
                .as_deref()
                .or_else(|| stack.and_then(|s| s.ws_addr.as_deref()))
                .unwrap_or(defaults::WS_ADDR),
        )?;

        let bdt_port = cli
            .bdt_port
            .or_else(|| stack.and_then(|s| s.bdt_port))
            .unwrap_or(defaults::BDT_PORT);
        if bdt_port == 0 {
            return Err(ConfigError::InvalidPort(bdt_port));
        }

        let loglevel = cli
            .log_level
            .as_deref()
            .or_else(|| stack.and_then(|s| s.loglevel.as_deref()))
            .unwrap_or(defaults::LOG_LEVEL)
            .parse::<LogLevel>()?;

        let observer = Self::resolve_observer(cli, toml)?;
        let poll_interval = Self::resolve_poll_interval(cli, toml)?;
        let control = Self::resolve_control(cli, toml)?;

        Ok(Self {
            stack: StackParams {
                base_path,
                non_addr,
                ws_addr,
                bdt_port,
                loglevel,
            },
            observer,
            poll_interval,
            control,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn resolve_base_path(cli: &Cli, toml: Option<&TomlConfig>) -> Result<PathBuf, ConfigError> {
        let path = cli
            .base_path
            .clone()
            .or_else(|| toml.and_then(|t| t.stack.base_path.clone()))
            .unwrap_or_else(|| PathBuf::from(defaults::BASE_PATH));

        expand_home(&path, dirs::home_dir())
    }

    fn resolve_observer(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<ObserverMode, ConfigError> {
        if let Some(arg) = cli.observer {
            return Ok(arg.into());
        }

        toml.and_then(|t| t.monitor.observer.as_deref())
            .map_or(Ok(ObserverMode::default()), parse_observer)
    }

    fn resolve_poll_interval(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<Duration, ConfigError> {
        // Priority: CLI explicit > TOML > default
        let seconds = cli
            .poll_interval
            .or_else(|| toml.and_then(|t| t.monitor.poll_interval))
            .unwrap_or(defaults::POLL_INTERVAL_SECS);

        if seconds == 0 {
            return Err(ConfigError::InvalidDuration {
                field: field::POLL_INTERVAL,
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(Duration::from_secs(seconds))
    }

    fn resolve_control(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<Option<Duration>, ConfigError> {
        let section = toml.map(|t| &t.control);

        // Either source can turn the bind sequence on
        let enabled = cli.control || section.and_then(|s| s.enabled).unwrap_or(false);

        let seconds = cli
            .bind_delay
            .or_else(|| section.and_then(|s| s.bind_delay))
            .unwrap_or(defaults::BIND_DELAY_SECS);

        if seconds == 0 {
            return Err(ConfigError::InvalidDuration {
                field: field::BIND_DELAY,
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(enabled.then_some(Duration::from_secs(seconds)))
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

// Helper functions

fn resolve_endpoint(name: &'static str, value: &str) -> Result<String, ConfigError> {
    value
        .trim()
        .parse::<SocketAddr>()
        .map(|addr| addr.to_string())
        .map_err(|e| ConfigError::InvalidEndpoint {
            field: name,
            value: value.to_string(),
            reason: e.to_string(),
        })
}

fn parse_observer(s: &str) -> Result<ObserverMode, ConfigError> {
    match s.trim().to_lowercase().as_str() {
        "poll" | "polling" => Ok(ObserverMode::Poll),
        "off" | "none" | "disabled" => Ok(ObserverMode::Off),
        _ => Err(ConfigError::InvalidObserver {
            value: s.to_string(),
        }),
    }
}

/// Replaces a leading `~` component with `home`.
fn expand_home(path: &Path, home: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
    let Ok(rest) = path.strip_prefix("~") else {
        return Ok(path.to_path_buf());
    };

    home.map(|home| home.join(rest))
        .ok_or_else(|| ConfigError::HomeDirUnavailable {
            path: path.to_path_buf(),
        })
}
