//! Device-control module contract and its dry-run implementation.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use super::{ControlError, LogLevel};

/// Trait for the external device-control ("OOD control") module.
///
/// # Blocking
///
/// [`ControlModule::wait_bind`] blocks until the device has been bound and
/// must never run on the caller's thread. [`ControlModule::is_bind`] and
/// [`ControlModule::address_list`] are non-blocking snapshots.
pub trait ControlModule: Send + Sync + 'static {
    /// One-time setup of the module's state root and logging.
    ///
    /// # Errors
    ///
    /// Returns [`ControlError`] if the module rejects the setup.
    fn init(&self, base_path: &Path, log_level: LogLevel) -> Result<(), ControlError>;

    /// Starts the module's own run loop.
    ///
    /// # Errors
    ///
    /// Returns [`ControlError`] if the run loop fails to start.
    fn start(&self) -> Result<(), ControlError>;

    /// Blocks until the device is bound.
    ///
    /// # Errors
    ///
    /// Returns [`ControlError`] if binding fails.
    fn wait_bind(&self) -> Result<(), ControlError>;

    /// Returns whether the device is currently bound.
    fn is_bind(&self) -> bool;

    /// Returns the endpoints relevant to binding, preferred first.
    fn address_list(&self) -> Vec<SocketAddr>;
}

/// Control module that logs every call instead of reaching a device.
///
/// `wait_bind` sleeps for the configured delay and then reports the device
/// as bound, so the diagnostic binary can walk the whole bind sequence.
#[derive(Debug)]
pub struct LoggingControl {
    bind_delay: Duration,
    addresses: Vec<SocketAddr>,
    bound: AtomicBool,
}

impl LoggingControl {
    /// Creates a dry-run control module.
    #[must_use]
    pub const fn new(bind_delay: Duration, addresses: Vec<SocketAddr>) -> Self {
        Self {
            bind_delay,
            addresses,
            bound: AtomicBool::new(false),
        }
    }

    /// Returns how long `wait_bind` blocks before binding.
    #[must_use]
    pub const fn bind_delay(&self) -> Duration {
        self.bind_delay
    }
}

impl ControlModule for LoggingControl {
    fn init(&self, base_path: &Path, log_level: LogLevel) -> Result<(), ControlError> {
        tracing::info!(
            "[dry-run] control init: base_path={}, loglevel={log_level}",
            base_path.display()
        );
        Ok(())
    }

    fn start(&self) -> Result<(), ControlError> {
        tracing::info!("[dry-run] control start");
        Ok(())
    }

    fn wait_bind(&self) -> Result<(), ControlError> {
        tracing::info!(
            "[dry-run] control wait_bind: binding in {}ms",
            self.bind_delay.as_millis()
        );
        std::thread::sleep(self.bind_delay);
        self.bound.store(true, Ordering::Release);
        tracing::info!("[dry-run] control bound");
        Ok(())
    }

    fn is_bind(&self) -> bool {
        self.bound.load(Ordering::Acquire)
    }

    fn address_list(&self) -> Vec<SocketAddr> {
        self.addresses.clone()
    }
}
