//! Platform network source implementations.
//!
//! This module provides the host-backed implementation of the
//! [`NetworkInfo`](super::NetworkInfo) trait.
//!
//! # Platform Support
//!
//! - **Linux, Android, macOS, iOS, Windows**: [`NetdevNetwork`] via the `netdev` crate.
//!
//! Embedders that already receive network state from the host runtime can
//! implement [`NetworkInfo`](super::NetworkInfo) directly instead.

mod interfaces;

pub use interfaces::NetdevNetwork;

// Re-export the host source as PlatformNetwork for convenience
pub use interfaces::NetdevNetwork as PlatformNetwork;
