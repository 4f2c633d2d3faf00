//! Caller-facing stack start parameters.

use std::path::PathBuf;

use crate::native::{LogLevel, StackConfig};

/// Parameters the caller supplies to [`super::StackLifecycleGuard::start`].
///
/// The local address is deliberately absent: it is resolved by the guard at
/// start time and appended when converting into a [`StackConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackParams {
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
}

impl StackParams {
    /// Builds the native start payload with the resolved `local_addr`.
    #[must_use]
    pub fn into_config(self, local_addr: String) -> StackConfig {
        StackConfig {
            base_path: self.base_path,
            non_addr: self.non_addr,
            ws_addr: self.ws_addr,
            bdt_port: self.bdt_port,
            loglevel: self.loglevel,
            local_addr,
        }
    }
}
