//! Application execution logic.
//!
//! This module starts the native stack through the lifecycle guard, wires
//! the configured link observer, optionally walks the device bind sequence
//! and waits for a shutdown signal.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::runtime::Handle;
use tokio::signal;

use stack_bridge::config::{ObserverMode, ValidatedConfig};
use stack_bridge::control::{BindCoordinator, BindState};
use stack_bridge::monitor::{InterfacePoller, NetworkObserver, UnsupportedObserver};
use stack_bridge::native::{ControlError, ControlModule, LogLevel, LoggingControl, LoggingStack};
use stack_bridge::network::NetworkInfo;
use stack_bridge::network::platform::PlatformNetwork;
use stack_bridge::stack::{StackLifecycleGuard, StackParams, StartOutcome};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to install a shutdown signal handler.
    #[error("Failed to install {signal} handler: {source}")]
    Signal {
        /// Name of the signal
        signal: &'static str,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Builds the link observer selected by the configuration.
///
/// `Off` yields an [`UnsupportedObserver`], so the guard skips registration
/// exactly as it would on a host without link-change callbacks.
pub fn build_observer<N>(
    mode: ObserverMode,
    source: Arc<N>,
    poll_interval: Duration,
    runtime: Handle,
) -> Arc<dyn NetworkObserver>
where
    N: NetworkInfo + 'static,
{
    match mode {
        ObserverMode::Poll => Arc::new(InterfacePoller::new(source, poll_interval, runtime)),
        ObserverMode::Off => Arc::new(UnsupportedObserver),
    }
}

/// How often the bind sequence checks whether the device is bound.
const BIND_CHECK_INTERVAL: Duration = Duration::from_secs(1);

/// Returns the stack endpoints the dry-run control module reports.
///
/// Endpoints were validated as socket addresses during config loading.
pub fn control_endpoints(params: &StackParams) -> Vec<SocketAddr> {
    [&params.non_addr, &params.ws_addr]
        .into_iter()
        .filter_map(|addr| addr.parse().ok())
        .collect()
}

/// Walks `init`, `start` and `wait_bind`, then waits until the device is
/// bound and returns its address list.
///
/// A wait that fails puts the coordinator back in [`BindState::Started`];
/// it is dispatched again on the next check.
///
/// # Errors
///
/// Returns the control module's error if `init` or `start` fails.
pub async fn bind_device<C: ControlModule>(
    coordinator: BindCoordinator<C>,
    base_path: PathBuf,
    log_level: LogLevel,
    check_interval: Duration,
) -> Result<Vec<String>, ControlError> {
    coordinator.init(&base_path, log_level)?;
    coordinator.start()?;

    coordinator.wait_bind();
    let mut ticker = tokio::time::interval(check_interval);
    while !coordinator.is_bind() {
        ticker.tick().await;
        if coordinator.state() == BindState::Started {
            tracing::warn!("Bind wait ended without a bound device, waiting again");
            coordinator.wait_bind();
        }
    }

    Ok(coordinator.get_address_list())
}

/// Executes the main application loop.
///
/// This function:
/// 1. Builds the platform network source and the configured observer
/// 2. Starts the dry-run stack through the lifecycle guard
/// 3. Runs the dry-run bind sequence in the background when enabled
/// 4. Waits for a shutdown signal (Ctrl+C or SIGTERM)
///
/// # Errors
///
/// Returns an error if a shutdown signal handler cannot be installed.
///
/// # Coverage Note
///
/// This function is excluded from coverage because it requires:
/// - Platform-specific network APIs
/// - Real async runtime with signal handling
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig) -> Result<(), RunError> {
    let runtime = Handle::current();
    let source = Arc::new(PlatformNetwork::new());

    if config.observer == ObserverMode::Poll {
        tracing::info!(
            "Polling link state every {}s",
            config.poll_interval.as_secs()
        );
    }
    let observer = build_observer(
        config.observer,
        Arc::clone(&source),
        config.poll_interval,
        runtime.clone(),
    );

    if let Some(bind_delay) = config.control {
        let control = LoggingControl::new(bind_delay, control_endpoints(&config.stack));
        let coordinator = BindCoordinator::new(Arc::new(control), runtime.clone());
        let base_path = config.stack.base_path.clone();
        let log_level = config.stack.loglevel;
        runtime.spawn(async move {
            match bind_device(coordinator, base_path, log_level, BIND_CHECK_INTERVAL).await {
                Ok(addresses) => tracing::info!("Device bound, addresses: {addresses:?}"),
                Err(e) => tracing::error!("Bind sequence stopped: {e}"),
            }
        });
    }

    let guard = StackLifecycleGuard::new(Arc::new(LoggingStack), source, observer, runtime);
    if guard.start(config.stack) == StartOutcome::Dispatched {
        tracing::info!("Stack bring-up dispatched");
    }

    shutdown_signal().await?;
    tracing::info!("Shutdown signal received (stack {}), stopping...", guard.state());
    Ok(())
}

/// Returns when a shutdown signal is received.
///
/// Excluded from coverage - requires OS signal handling.
#[cfg(not(tarpaulin_include))]
async fn shutdown_signal() -> Result<(), RunError> {
    let ctrl_c = async {
        signal::ctrl_c().await.map_err(|source| RunError::Signal {
            signal: "Ctrl+C",
            source,
        })
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .map_err(|source| RunError::Signal {
                signal: "SIGTERM",
                source,
            })?
            .recv()
            .await;
        Ok::<(), RunError>(())
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<Result<(), RunError>>();

    tokio::select! {
        result = ctrl_c => result,
        result = terminate => result,
    }
}
