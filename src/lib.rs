//! stack-bridge: control-plane core of a mobile network-stack bridge
//!
//! A library that starts an opaque native network stack exactly once,
//! resets it with the current IPv4 address after link changes settle,
//! and sequences the device-control module's bind lifecycle.

pub mod config;
pub mod control;
pub mod monitor;
pub mod native;
pub mod network;
pub mod stack;

#[cfg(test)]
mod test_fixtures;
