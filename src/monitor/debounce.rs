//! Debouncing of link-change notifications into stack resets.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;

use super::LinkChangeHandler;
use crate::native::NativeStack;
use crate::network::{AddressResolver, NetworkInfo};

/// Policy for debouncing link-change notifications.
///
/// # Window Semantics
///
/// The window is fixed from the first notification that opens it. Later
/// notifications inside the window never extend it; they only replace the
/// address the window will report.
///
/// | Notifications in window | Resets | Address used |
/// |-------------------------|--------|--------------|
/// | `A` | 1 at `t(A) + window` | resolved at `A` |
/// | `A`, `B` | 1 at `t(A) + window` | resolved at `B` |
/// | `A`, then `C` after firing | 2 | `A`, then `C` |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebouncePolicy {
    /// The debounce window duration.
    window: Duration,
}

impl DebouncePolicy {
    /// Creates a new debounce policy with the specified window duration.
    #[must_use]
    pub const fn new(window: Duration) -> Self {
        Self { window }
    }

    /// Returns the debounce window duration.
    #[must_use]
    pub const fn window(&self) -> Duration {
        self.window
    }
}

impl Default for DebouncePolicy {
    /// Creates a default debounce policy with a 3-second window.
    ///
    /// Long enough for DHCP and route updates that follow a link switch
    /// to settle before the stack rebinds.
    fn default() -> Self {
        Self {
            window: Duration::from_secs(3),
        }
    }
}

/// The single pending-timer slot of a debouncer.
///
/// `pending` only changes while `address` is locked.
#[derive(Debug, Default)]
struct DebounceWindow {
    pending: AtomicBool,
    address: Mutex<String>,
}

impl DebounceWindow {
    fn address(&self) -> MutexGuard<'_, String> {
        self.address.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Coalesces link-change notifications into delayed stack resets.
///
/// - The first notification after construction is the host's synthetic
///   registration event and is always ignored.
/// - Every later notification resolves the current IPv4 address and stores
///   it. If no timer is pending, one is started for the policy window.
/// - When the timer fires, the pending flag is cleared and the stack is
///   reset with the stored address, even when that address is empty.
///
/// Notifications may arrive on any thread; the timer runs as a task on the
/// runtime captured at construction.
pub struct NetworkChangeDebouncer<N, S> {
    resolver: AddressResolver<N>,
    stack: Arc<S>,
    policy: DebouncePolicy,
    runtime: Handle,
    initial_seen: AtomicBool,
    window: Arc<DebounceWindow>,
}

impl<N, S> NetworkChangeDebouncer<N, S>
where
    N: NetworkInfo + 'static,
    S: NativeStack,
{
    /// Creates a debouncer with the default 3-second policy.
    ///
    /// # Arguments
    ///
    /// * `resolver` - Resolves the active IPv4 address on each notification
    /// * `stack` - Receives the reset once a window closes
    /// * `runtime` - Runtime the debounce timers are spawned on
    #[must_use]
    pub fn new(resolver: AddressResolver<N>, stack: Arc<S>, runtime: Handle) -> Self {
        Self {
            resolver,
            stack,
            policy: DebouncePolicy::default(),
            runtime,
            initial_seen: AtomicBool::new(false),
            window: Arc::new(DebounceWindow::default()),
        }
    }

    /// Configures the debounce policy.
    #[must_use]
    pub fn with_policy(mut self, policy: DebouncePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the configured debounce policy.
    #[must_use]
    pub const fn policy(&self) -> &DebouncePolicy {
        &self.policy
    }

    /// Returns true while a reset timer is outstanding.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.window.pending.load(Ordering::Acquire)
    }

    /// Handles one link-change notification.
    pub fn on_link_changed(&self) {
        if !self.initial_seen.swap(true, Ordering::AcqRel) {
            tracing::debug!("Ignoring initial link notification");
            return;
        }

        let address = self.resolver.resolve_active_ipv4();
        tracing::debug!("Link changed, current address: {address:?}");

        // Storing the address and claiming the window happen under the
        // address lock, so a closing timer sees either both or neither.
        {
            let mut slot = self.window.address();
            *slot = address;
            if self
                .window
                .pending
                .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
                .is_err()
            {
                tracing::trace!("Reset already pending, address updated");
                return;
            }
        }

        let window = Arc::clone(&self.window);
        let stack = Arc::clone(&self.stack);
        let delay = self.policy.window();
        self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            fire(&window, stack.as_ref());
        });
    }

    /// Converts this debouncer into a handler for a [`super::NetworkObserver`].
    #[must_use]
    pub fn into_handler(self: Arc<Self>) -> LinkChangeHandler {
        Arc::new(move || self.on_link_changed())
    }
}

/// Closes the window and hands the latest address to the stack.
fn fire<S: NativeStack>(window: &DebounceWindow, stack: &S) {
    let address = {
        let slot = window.address();
        window.pending.store(false, Ordering::Release);
        slot.clone()
    };

    tracing::info!("Network changed, resetting stack network with {address:?}");
    if let Err(e) = stack.reset_network(&address) {
        tracing::error!("Reset network failed: {e}");
    }
}
