//! Application startup and utilities.
//!
//! Exit codes, configuration hints and tracing setup for the diagnostic
//! binary.

use stack_bridge::config::ConfigError;
use stack_bridge::native::LogLevel;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Application exit codes.
pub mod exit_code {
    use std::process::ExitCode;

    /// Success (exit code 0).
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Configuration error (exit code 1) - invalid args, unreadable config file, etc.
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;

    /// Runtime error (exit code 2) - runtime or signal setup failure.
    ///
    /// Note: This is a function rather than a constant because `ExitCode::from()` is not `const fn`.
    pub fn runtime_error() -> ExitCode {
        ExitCode::from(2)
    }
}

/// Returns a follow-up hint for a configuration error, if one helps.
pub const fn config_hint(error: &ConfigError) -> Option<&'static str> {
    match error {
        ConfigError::FileRead { .. } | ConfigError::TomlParse(_) => {
            Some("Run 'stack-bridge init' to generate a configuration template.")
        }
        ConfigError::HomeDirUnavailable { .. } => {
            Some("Pass --base-path or set stack.base_path to an absolute path.")
        }
        ConfigError::InvalidEndpoint { .. } => {
            Some("Endpoints are numeric socket addresses, e.g. 127.0.0.1:1318 or [::1]:1318.")
        }
        ConfigError::InvalidObserver { .. } => {
            Some("Use --observer off to run without link watching.")
        }
        _ => None,
    }
}

/// Prints the hint for `error` to stderr.
pub fn print_config_hint(error: &ConfigError) {
    if let Some(hint) = config_hint(error) {
        eprintln!("\n{hint}");
    }
}

/// Returns the default tracing level for the configured log level.
///
/// `verbose` raises the level to at least `debug`.
pub fn default_level(level: LogLevel, verbose: bool) -> LevelFilter {
    let configured = level.to_level_filter();
    if verbose {
        configured.max(LevelFilter::DEBUG)
    } else {
        configured
    }
}

/// Sets up the tracing subscriber for logging.
///
/// `RUST_LOG` overrides the configured level.
pub fn setup_tracing(level: LogLevel, verbose: bool) {
    let filter = EnvFilter::builder()
        .with_default_directive(default_level(level, verbose).into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
