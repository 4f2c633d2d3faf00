//! Error types for the monitor layer.

use thiserror::Error;

/// Error type for network observer registration.
///
/// None of these are fatal to the bridge: the stack keeps running without
/// link-change resets.
#[derive(Debug, Error)]
pub enum ObserverError {
    /// The host does not support link-change callbacks.
    #[error("Network observer is not supported on this host")]
    Unsupported,

    /// A handler was already registered with this observer.
    #[error("Network observer already has a registered handler")]
    AlreadyRegistered,

    /// The host rejected the registration.
    #[error("Failed to register network observer: {message}")]
    Registration {
        /// Reason reported by the host.
        message: String,
    },
}
