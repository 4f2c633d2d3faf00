//! Sequencing of device-control module calls.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::runtime::Handle;

use super::BindState;
use super::state::BindCell;
use crate::native::{ControlError, ControlModule, LogLevel};

/// Result of [`BindCoordinator::wait_bind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitBindOutcome {
    /// The blocking wait was handed to a background thread.
    Dispatched,
    /// The module already reports a bound device; nothing was done.
    AlreadyBound,
    /// An earlier wait is still running; nothing was done.
    AlreadyWaiting,
}

/// Drives the device-control module: `init`, `start`, `wait_bind`, then
/// `is_bind` and `get_address_list` polling.
///
/// # Blocking
///
/// The module's wait for binding blocks until a device is bound. It always
/// runs on a blocking background thread; [`wait_bind`](Self::wait_bind)
/// returns immediately and completion is only observable through
/// [`is_bind`](Self::is_bind).
///
/// # Ordering
///
/// Calls are forwarded in whatever order they arrive. The module itself is
/// responsible for rejecting `start` or `wait_bind` before `init`.
pub struct BindCoordinator<C> {
    module: Arc<C>,
    runtime: Handle,
    state: Arc<BindCell>,
    initialized: AtomicBool,
    waiting: Arc<AtomicBool>,
}

impl<C: ControlModule> BindCoordinator<C> {
    /// Creates a coordinator in the [`BindState::Uninitialized`] state.
    ///
    /// # Arguments
    ///
    /// * `module` - The device-control module to drive
    /// * `runtime` - Runtime the blocking wait is spawned on
    #[must_use]
    pub fn new(module: Arc<C>, runtime: Handle) -> Self {
        Self {
            module,
            runtime,
            state: Arc::new(BindCell::new()),
            initialized: AtomicBool::new(false),
            waiting: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Returns the coordinator's view of the bind lifecycle.
    #[must_use]
    pub fn state(&self) -> BindState {
        self.state.load()
    }

    /// Initializes the module once.
    ///
    /// Only a repeated `init` is skipped: a call after a successful `init`
    /// is logged and ignored, whatever else ran in between. A failed `init`
    /// can be retried.
    ///
    /// # Errors
    ///
    /// Returns the module's [`ControlError`] unchanged.
    pub fn init(&self, base_path: &Path, log_level: LogLevel) -> Result<(), ControlError> {
        if self
            .initialized
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::info!("Control module already initialized, ignoring init");
            return Ok(());
        }

        tracing::info!(
            "Initializing control module at {} (log level {log_level})",
            base_path.display()
        );
        match self.module.init(base_path, log_level) {
            Ok(()) => {
                self.state.raise(BindState::Initialized);
                Ok(())
            }
            Err(e) => {
                tracing::error!("Control module init failed: {e}");
                self.initialized.store(false, Ordering::Release);
                Err(e)
            }
        }
    }

    /// Starts the module's run loop unless the device is already bound.
    ///
    /// # Errors
    ///
    /// Returns the module's [`ControlError`] unchanged.
    pub fn start(&self) -> Result<(), ControlError> {
        if self.module.is_bind() {
            tracing::info!("Device already bound, skipping control start");
            self.state.raise(BindState::Bound);
            return Ok(());
        }

        self.module.start().inspect_err(|e| {
            tracing::error!("Control module start failed: {e}");
        })?;
        self.state.raise(BindState::Started);
        tracing::info!("Control module started");
        Ok(())
    }

    /// Waits for binding on a background thread and returns immediately.
    ///
    /// A failed wait is logged and returns the coordinator to
    /// [`BindState::Started`], so the caller may wait again.
    pub fn wait_bind(&self) -> WaitBindOutcome {
        if self.module.is_bind() {
            tracing::info!("Device already bound, skipping wait");
            self.state.raise(BindState::Bound);
            return WaitBindOutcome::AlreadyBound;
        }

        if self
            .waiting
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("Bind wait already running");
            return WaitBindOutcome::AlreadyWaiting;
        }

        self.state.store(BindState::WaitingForBind);
        tracing::info!("Waiting for device bind in background");

        let module = Arc::clone(&self.module);
        let state = Arc::clone(&self.state);
        let waiting = Arc::clone(&self.waiting);
        self.runtime.spawn_blocking(move || {
            match module.wait_bind() {
                Ok(()) => {
                    state.store(BindState::Bound);
                    tracing::info!("Device bound");
                }
                Err(e) => {
                    state.store(BindState::Started);
                    tracing::error!("Waiting for device bind failed: {e}");
                }
            }
            waiting.store(false, Ordering::Release);
        });

        WaitBindOutcome::Dispatched
    }

    /// Returns whether the device is bound, as reported by the module.
    #[must_use]
    pub fn is_bind(&self) -> bool {
        self.module.is_bind()
    }

    /// Returns the module's endpoints rendered as `ip:port`, in module order.
    #[must_use]
    pub fn get_address_list(&self) -> Vec<String> {
        self.module
            .address_list()
            .into_iter()
            .map(|addr| format!("{}:{}", addr.ip(), addr.port()))
            .collect()
    }
}

#[cfg(test)]
#[path = "coordinator_tests.rs"]
mod tests;
