//! Core network types describing the host's active link.

use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

use thiserror::Error;

/// Handle to the network the host currently routes traffic through.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActiveNetwork {
    /// Interface name (e.g., "wlan0", "rmnet_data0", "en0").
    pub name: String,
    /// OS interface index.
    pub index: u32,
}

impl ActiveNetwork {
    /// Creates a new active network handle.
    #[must_use]
    pub fn new(name: impl Into<String>, index: u32) -> Self {
        Self {
            name: name.into(),
            index,
        }
    }
}

/// Transport classification of a network.
///
/// Informational only; the resolver never filters on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportKind {
    /// Wired Ethernet.
    Ethernet,
    /// Wi-Fi.
    Wifi,
    /// Mobile data.
    Cellular,
    /// Tunnel or VPN interface.
    Vpn,
    /// Loopback interface.
    Loopback,
    /// Anything else.
    Other,
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Ethernet => "ethernet",
            Self::Wifi => "wifi",
            Self::Cellular => "cellular",
            Self::Vpn => "vpn",
            Self::Loopback => "loopback",
            Self::Other => "other",
        };
        f.write_str(label)
    }
}

/// Capabilities reported for the active network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkCapabilities {
    /// Transport the network runs over.
    pub transport: TransportKind,
    /// Whether a default gateway is known for the network.
    pub has_gateway: bool,
}

/// A single address assigned to a link, with its prefix length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LinkAddress {
    /// The bare IP address.
    pub address: IpAddr,
    /// Network prefix length in bits.
    pub prefix_len: u8,
}

impl LinkAddress {
    /// Creates a new link address.
    #[must_use]
    pub const fn new(address: IpAddr, prefix_len: u8) -> Self {
        Self {
            address,
            prefix_len,
        }
    }

    /// Returns true if the address belongs to the IPv4 family.
    #[must_use]
    pub const fn is_ipv4(&self) -> bool {
        self.address.is_ipv4()
    }
}

impl fmt::Display for LinkAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.address, self.prefix_len)
    }
}

/// Error returned when a textual link address cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid link address '{value}'")]
pub struct LinkAddressParseError {
    /// The rejected input.
    pub value: String,
}

impl FromStr for LinkAddress {
    type Err = LinkAddressParseError;

    /// Parses host notation such as `/10.0.0.2`, `10.0.0.2/24` or
    /// `fe80::1%wlan0/64`.
    ///
    /// The leading family slash, the `%scope` suffix and the prefix length
    /// are stripped from the address. A missing prefix defaults to the full
    /// host length of the family.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || LinkAddressParseError {
            value: s.to_string(),
        };

        let trimmed = s.trim().trim_start_matches('/');
        let (host, prefix) = match trimmed.split_once('/') {
            Some((host, prefix)) => (host, Some(prefix)),
            None => (trimmed, None),
        };
        let host = host.split_once('%').map_or(host, |(addr, _scope)| addr);

        let address: IpAddr = host.parse().map_err(|_| invalid())?;
        let max_prefix = if address.is_ipv4() { 32 } else { 128 };

        let prefix_len = match prefix {
            Some(p) => p.parse::<u8>().map_err(|_| invalid())?,
            None => max_prefix,
        };
        if prefix_len > max_prefix {
            return Err(invalid());
        }

        Ok(Self::new(address, prefix_len))
    }
}

/// Link properties of the active network.
///
/// Address order is the order the OS reported them in and is significant:
/// the resolver picks the first IPv4 entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkProperties {
    /// Name of the interface the properties belong to.
    pub interface_name: String,
    /// Addresses assigned to the link.
    pub addresses: Vec<LinkAddress>,
}

impl LinkProperties {
    /// Creates new link properties.
    #[must_use]
    pub fn new(interface_name: impl Into<String>, addresses: Vec<LinkAddress>) -> Self {
        Self {
            interface_name: interface_name.into(),
            addresses,
        }
    }

    /// Returns the first IPv4 address in listed order, if any.
    #[must_use]
    pub fn first_ipv4(&self) -> Option<IpAddr> {
        self.addresses
            .iter()
            .find(|a| a.is_ipv4())
            .map(|a| a.address)
    }
}
