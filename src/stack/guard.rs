//! One-time startup guard for the native stack.

use std::sync::Arc;

use tokio::runtime::Handle;

use super::state::StateCell;
use super::{StackParams, StackState};
use crate::monitor::{DebouncePolicy, NetworkChangeDebouncer, NetworkObserver, ObserverCapability};
use crate::native::{NativeStack, StackError};
use crate::network::{AddressResolver, NetworkInfo};

/// Result of [`StackLifecycleGuard::start`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// Bring-up was handed to a background thread.
    Dispatched,
    /// An earlier call already started the stack; nothing was done.
    AlreadyStarted,
}

/// Guards the native stack's lifecycle.
///
/// - [`start`](Self::start) brings the stack up at most once per guard and
///   never blocks the caller.
/// - After dispatching the bring-up, a [`NetworkChangeDebouncer`] is
///   registered with the observer so link changes reset the stack.
/// - [`reset_network`](Self::reset_network) and
///   [`restart_interface`](Self::restart_interface) forward verbatim.
///
/// # Type Parameters
///
/// - `S`: The native stack
/// - `N`: The network source used for address resolution
/// - `O`: The host's link-change observer
pub struct StackLifecycleGuard<S, N, O> {
    stack: Arc<S>,
    source: Arc<N>,
    observer: O,
    runtime: Handle,
    policy: DebouncePolicy,
    state: Arc<StateCell>,
}

impl<S, N, O> StackLifecycleGuard<S, N, O>
where
    S: NativeStack,
    N: NetworkInfo + 'static,
    O: NetworkObserver,
{
    /// Creates a guard in the [`StackState::NotStarted`] state.
    ///
    /// # Arguments
    ///
    /// * `stack` - The native stack to drive
    /// * `source` - Where the local address is resolved from
    /// * `observer` - Delivers link-change notifications after start
    /// * `runtime` - Runtime background work is spawned on
    #[must_use]
    pub fn new(stack: Arc<S>, source: Arc<N>, observer: O, runtime: Handle) -> Self {
        Self {
            stack,
            source,
            observer,
            runtime,
            policy: DebouncePolicy::default(),
            state: Arc::new(StateCell::new(StackState::NotStarted)),
        }
    }

    /// Configures the debounce policy used for link-change resets.
    #[must_use]
    pub fn with_debounce(mut self, policy: DebouncePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the current lifecycle state.
    #[must_use]
    pub fn state(&self) -> StackState {
        self.state.load()
    }

    /// Returns the observer link changes are taken from.
    #[must_use]
    pub const fn observer(&self) -> &O {
        &self.observer
    }

    /// Starts the stack once.
    ///
    /// Resolves the local IPv4 address, dispatches the native bring-up on a
    /// blocking thread, then registers for link changes. Every call after
    /// the first is logged and ignored, including while the first bring-up
    /// is still running or after it failed.
    pub fn start(&self, params: StackParams) -> StartOutcome {
        if !self
            .state
            .transition(StackState::NotStarted, StackState::Starting)
        {
            tracing::info!("Stack already started ({}), ignoring start", self.state());
            return StartOutcome::AlreadyStarted;
        }

        let local_addr = AddressResolver::new(Arc::clone(&self.source)).resolve_active_ipv4();
        let config = params.into_config(local_addr);
        tracing::info!("Starting stack: {config}");

        let stack = Arc::clone(&self.stack);
        let state = Arc::clone(&self.state);
        self.runtime.spawn_blocking(move || match stack.start(&config) {
            Ok(()) => {
                state.store(StackState::Running);
                tracing::info!("Stack started");
            }
            Err(e) => tracing::error!("Stack start failed: {e}"),
        });

        self.watch_link_changes();
        StartOutcome::Dispatched
    }

    /// Forwards a network reset to the stack.
    ///
    /// # Errors
    ///
    /// Returns the stack's [`StackError`] unchanged.
    pub fn reset_network(&self, addr: &str) -> Result<(), StackError> {
        self.stack.reset_network(addr)
    }

    /// Forwards an interface restart to the stack.
    ///
    /// # Errors
    ///
    /// Returns the stack's [`StackError`] unchanged.
    pub fn restart_interface(&self) -> Result<(), StackError> {
        self.stack.restart_interface()
    }

    fn watch_link_changes(&self) {
        if self.observer.capability() == ObserverCapability::Unsupported {
            tracing::info!("Link-change callbacks unsupported on this host, skipping registration");
            return;
        }

        let debouncer = NetworkChangeDebouncer::new(
            AddressResolver::new(Arc::clone(&self.source)),
            Arc::clone(&self.stack),
            self.runtime.clone(),
        )
        .with_policy(self.policy.clone());

        match self.observer.register(Arc::new(debouncer).into_handler()) {
            Ok(()) => tracing::debug!("Registered link-change handler"),
            Err(e) => tracing::warn!("{e}; stack runs without link-change resets"),
        }
    }
}

#[cfg(test)]
#[path = "guard_tests.rs"]
mod tests;
