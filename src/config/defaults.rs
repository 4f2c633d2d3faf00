//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

/// Default state root, expanded against the home directory.
pub const BASE_PATH: &str = "~/.stack-bridge";

/// Default control (non) service endpoint; port 0 lets the stack pick one.
pub const NON_ADDR: &str = "127.0.0.1:0";

/// Default websocket event endpoint; port 0 lets the stack pick one.
pub const WS_ADDR: &str = "127.0.0.1:0";

/// Default transport port.
pub const BDT_PORT: u16 = 10001;

/// Default log level for both the stack and the bridge.
pub const LOG_LEVEL: &str = "info";

/// Default polling interval in seconds.
pub const POLL_INTERVAL_SECS: u64 = 5;

/// Default bind delay of the dry-run control module in seconds.
pub const BIND_DELAY_SECS: u64 = 3;

/// Default polling interval as Duration.
#[must_use]
pub const fn poll_interval() -> Duration {
    Duration::from_secs(POLL_INTERVAL_SECS)
}
