//! Diagnostic binary for the stack bridge.
//!
//! Drives the bridge against dry-run native modules on a real host: the stack
//! and control calls are only logged, while link watching, debouncing and the
//! bind sequence run for real. Use it to see when a reset would reach the
//! stack and which address it would carry.

use std::path::Path;
use std::process::ExitCode;

use stack_bridge::config::{Cli, Command, ValidatedConfig, write_default_config};

mod app;
mod run;

use app::{exit_code, print_config_hint, setup_tracing};

#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse_args();

    match &cli.command {
        Some(Command::Init { output }) => write_template(output),
        None => match ValidatedConfig::load(&cli) {
            Ok(config) => observe(config),
            Err(e) => {
                eprintln!("Configuration error: {e}");
                print_config_hint(&e);
                exit_code::CONFIG_ERROR
            }
        },
    }
}

/// Writes the commented configuration template for `stack-bridge init`.
fn write_template(output: &Path) -> ExitCode {
    if let Err(e) = write_default_config(output) {
        eprintln!("Error: {e}");
        return exit_code::CONFIG_ERROR;
    }
    println!("Configuration template written to: {}", output.display());
    println!("Edit it, then run 'stack-bridge --config {}'.", output.display());
    exit_code::SUCCESS
}

/// Runs the dry-run bridge until Ctrl+C or SIGTERM.
///
/// Needs a multi-threaded runtime for the blocking native calls.
#[cfg(not(tarpaulin_include))]
fn observe(config: ValidatedConfig) -> ExitCode {
    setup_tracing(config.stack.loglevel, config.verbose);
    tracing::info!("Dry run, native calls are logged only. {config}");

    let outcome = tokio::runtime::Runtime::new()
        .map_err(|e| format!("cannot create Tokio runtime: {e}"))
        .and_then(|runtime| {
            runtime
                .block_on(run::execute(config))
                .map_err(|e| e.to_string())
        });

    match outcome {
        Ok(()) => exit_code::SUCCESS,
        Err(message) => {
            tracing::error!("Bridge stopped: {message}");
            exit_code::runtime_error()
        }
    }
}
