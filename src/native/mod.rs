//! Contracts of the external native modules.
//!
//! This module provides:
//! - The network stack contract ([`NativeStack`]) and its start payload ([`StackConfig`])
//! - The device-control module contract ([`ControlModule`])
//! - The verbosity selector both modules accept ([`LogLevel`])
//! - Error types for failed native calls ([`StackError`], [`ControlError`])
//! - Dry-run modules for diagnostics ([`LoggingStack`], [`LoggingControl`])

mod control;
mod error;
mod level;
mod stack;

pub use control::{ControlModule, LoggingControl};
pub use error::{ControlError, StackError};
pub use level::{LogLevel, ParseLogLevelError};
pub use stack::{LoggingStack, NativeStack, StackConfig};
