//! Monitor layer for reacting to link changes.
//!
//! This module provides types and functions for:
//! - Observing host link-change notifications ([`NetworkObserver`], [`ObserverCapability`])
//! - Polling-based observation for hosts without callbacks ([`InterfacePoller`])
//! - Debouncing notifications into stack resets ([`NetworkChangeDebouncer`], [`DebouncePolicy`])
//! - Error handling ([`ObserverError`])

mod debounce;
mod error;
mod observer;
mod poller;


pub use debounce::{DebouncePolicy, NetworkChangeDebouncer};
pub use error::ObserverError;
pub use observer::{LinkChangeHandler, NetworkObserver, ObserverCapability, UnsupportedObserver};
pub use poller::InterfacePoller;
