//! Native network stack contract and the dry-run implementation.

use std::fmt;
use std::path::PathBuf;

use super::{LogLevel, StackError};

/// Full configuration handed to the native stack on start.
///
/// Built from the caller's [`crate::stack::StackParams`] plus the IPv4
/// address resolved at start time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackConfig {
    /// Filesystem root for stack state.
    pub base_path: PathBuf,
    /// Control (non) service endpoint.
    pub non_addr: String,
    /// Websocket event endpoint.
    pub ws_addr: String,
    /// Transport port.
    pub bdt_port: u16,
    /// Native verbosity.
    pub loglevel: LogLevel,
    /// IPv4 address resolved when the stack was started (may be empty).
    pub local_addr: String,
}

impl fmt::Display for StackConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let local = if self.local_addr.is_empty() {
            "none"
        } else {
            &self.local_addr
        };

        write!(
            f,
            "StackConfig {{ base_path: {}, non_addr: {}, ws_addr: {}, bdt_port: {}, \
             loglevel: {}, local_addr: {} }}",
            self.base_path.display(),
            self.non_addr,
            self.ws_addr,
            self.bdt_port,
            self.loglevel,
            local,
        )
    }
}

/// Trait for the external network stack.
///
/// Implementations wrap the native entry points. Calls may block; the
/// bridge never invokes [`NativeStack::start`] on the caller's thread.
///
/// # Implementation Notes
///
/// - `reset_network` receives the address verbatim, including the empty
///   string meaning "no usable address"
/// - No call is retried by the bridge
pub trait NativeStack: Send + Sync + 'static {
    /// Brings the stack up. Invoked at most once per lifecycle guard.
    ///
    /// # Errors
    ///
    /// Returns [`StackError`] if the native bring-up fails.
    fn start(&self, config: &StackConfig) -> Result<(), StackError>;

    /// Rebinds the stack to `addr` after a network change.
    ///
    /// # Errors
    ///
    /// Returns [`StackError`] if the native reset fails.
    fn reset_network(&self, addr: &str) -> Result<(), StackError>;

    /// Restarts the stack's local service interface.
    ///
    /// # Errors
    ///
    /// Returns [`StackError`] if the native restart fails.
    fn restart_interface(&self) -> Result<(), StackError>;
}

/// Dry-run stack that logs every call instead of driving a native library.
///
/// Used by the diagnostic binary to observe lifecycle and debounce
/// decisions on a real host.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingStack;

impl NativeStack for LoggingStack {
    fn start(&self, config: &StackConfig) -> Result<(), StackError> {
        tracing::info!("[dry-run] stack start: {config}");
        Ok(())
    }

    fn reset_network(&self, addr: &str) -> Result<(), StackError> {
        if addr.is_empty() {
            tracing::info!("[dry-run] stack reset_network: no usable address");
        } else {
            tracing::info!("[dry-run] stack reset_network: {addr}");
        }
        Ok(())
    }

    fn restart_interface(&self) -> Result<(), StackError> {
        tracing::info!("[dry-run] stack restart_interface");
        Ok(())
    }
}
