//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// stack-bridge: control-plane bridge for a native network stack
///
/// Starts the stack once, watches the active network link and resets the
/// stack with the current IPv4 address after link changes settle.
#[derive(Debug, Parser)]
#[command(name = "stack-bridge")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to configuration file
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Filesystem root for stack state
    #[arg(long = "base-path")]
    pub base_path: Option<PathBuf>,

    /// Control service endpoint (ip:port)
    #[arg(long = "non-addr", value_name = "ADDR")]
    pub non_addr: Option<String>,

    /// Websocket event endpoint (ip:port)
    #[arg(long = "ws-addr", value_name = "ADDR")]
    pub ws_addr: Option<String>,

    /// Transport port
    #[arg(long = "bdt-port")]
    pub bdt_port: Option<u16>,

    /// Log level for the stack and the bridge (off, error, warn, info, debug, trace)
    #[arg(long = "log-level")]
    pub log_level: Option<String>,

    /// How link changes are observed
    #[arg(long, value_enum)]
    pub observer: Option<ObserverArg>,

    /// Polling interval in seconds (poll observer only)
    #[arg(long = "poll-interval")]
    pub poll_interval: Option<u64>,

    /// Also walk the device bind sequence against a dry-run control module
    #[arg(long)]
    pub control: bool,

    /// Seconds the dry-run control module takes to bind
    #[arg(long = "bind-delay")]
    pub bind_delay: Option<u64>,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,
}

/// Subcommands for stack-bridge
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "stack-bridge.toml")]
        output: PathBuf,
    },
}

/// Observer argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ObserverArg {
    /// Poll the host's interfaces for changes
    #[value(name = "poll")]
    Poll,
    /// Do not observe link changes
    #[value(name = "off")]
    Off,
}

impl From<ObserverArg> for super::ObserverMode {
    fn from(arg: ObserverArg) -> Self {
        match arg {
            ObserverArg::Poll => Self::Poll,
            ObserverArg::Off => Self::Off,
        }
    }
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Some(Command::Init { .. }))
    }
}
