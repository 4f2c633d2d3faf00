//! Configuration layer for stack-bridge.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values explicitly passed via command line
//! 2. **TOML config file** - Values from the configuration file
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! Every option has a default, so an empty config file and no CLI flags is a
//! valid configuration.
//!
//! # Internal Tuning Parameters
//!
//! The debounce window (3 seconds) is intentionally not user-configurable:
//! it must outlast the DHCP and route updates that follow a link switch.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;


pub use cli::{Cli, Command, ObserverArg};
pub use error::{ConfigError, field};
pub use toml::{
    ControlSection, MonitorSection, StackSection, TomlConfig, default_config_template,
};
pub use validated::{ObserverMode, ValidatedConfig, write_default_config};
