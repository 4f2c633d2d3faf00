//! Network observer trait for host link-change notifications.
//!
//! This module provides the [`NetworkObserver`] trait that abstracts how the
//! host delivers "the active link changed" callbacks, independent of the
//! debounce logic that consumes them.

use super::ObserverError;
use std::sync::Arc;

/// Handler invoked on every link-change notification.
///
/// Notifications carry no payload; handlers re-query the host for the
/// current state. The handler may be called from any thread.
pub type LinkChangeHandler = Arc<dyn Fn() + Send + Sync>;

/// What the host can do for link-change observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObserverCapability {
    /// The host delivers link-change callbacks to a registered handler.
    ///
    /// Hosts typically fire one synthetic notification right after
    /// registration; consumers are expected to ignore it.
    Callback,
    /// The host predates the callback API. Registration is skipped and no
    /// fallback is attempted.
    Unsupported,
}

/// Trait for platform-specific link-change observation.
///
/// # Variants
///
/// Implementations report their [`ObserverCapability`] so callers can skip
/// registration on hosts without callback support instead of treating it
/// as an error.
///
/// # Example
///
/// ```ignore
/// use stack_bridge::monitor::{NetworkObserver, ObserverCapability};
/// use std::sync::Arc;
///
/// fn watch<O: NetworkObserver>(observer: &O) {
///     if observer.capability() == ObserverCapability::Unsupported {
///         return;
///     }
///     observer
///         .register(Arc::new(|| println!("link changed")))
///         .expect("registration failed");
/// }
/// ```
pub trait NetworkObserver: Send + Sync {
    /// Returns what this observer supports on the current host.
    fn capability(&self) -> ObserverCapability;

    /// Registers `handler` for link-change notifications.
    ///
    /// # Errors
    ///
    /// Returns [`ObserverError`] if the host rejects the registration or the
    /// observer is unsupported.
    fn register(&self, handler: LinkChangeHandler) -> Result<(), ObserverError>;
}

impl<O: NetworkObserver + ?Sized> NetworkObserver for Arc<O> {
    fn capability(&self) -> ObserverCapability {
        (**self).capability()
    }

    fn register(&self, handler: LinkChangeHandler) -> Result<(), ObserverError> {
        (**self).register(handler)
    }
}

/// Observer for hosts without link-change callbacks.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedObserver;

impl NetworkObserver for UnsupportedObserver {
    fn capability(&self) -> ObserverCapability {
        ObserverCapability::Unsupported
    }

    fn register(&self, _handler: LinkChangeHandler) -> Result<(), ObserverError> {
        Err(ObserverError::Unsupported)
    }
}
