//! Network layer for querying the host's active link.
//!
//! This module provides types and traits for:
//! - Describing the active network ([`ActiveNetwork`], [`NetworkCapabilities`], [`LinkProperties`])
//! - Parsing host address notation ([`LinkAddress`])
//! - Querying the host ([`NetworkInfo`])
//! - Resolving the usable IPv4 address ([`AddressResolver`])
//! - Platform-specific implementations ([`platform`])

mod link;
pub mod platform;
mod resolver;

pub use link::{
    ActiveNetwork, LinkAddress, LinkAddressParseError, LinkProperties, NetworkCapabilities,
    TransportKind,
};
pub use resolver::{AddressResolver, NetworkInfo};
