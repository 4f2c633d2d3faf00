//! Host network source backed by the `netdev` crate.

use crate::network::{
    ActiveNetwork, LinkAddress, LinkProperties, NetworkCapabilities, NetworkInfo, TransportKind,
};
use netdev::Interface;
use netdev::interface::InterfaceType;
use std::net::IpAddr;

/// [`NetworkInfo`] implementation that reads the host's interface table.
///
/// - **Active network**: the interface carrying the default route
/// - **Capabilities**: available while that interface is up
/// - **Link properties**: its IPv4 addresses followed by its IPv6 addresses,
///   each group in the order the OS reports them
///
/// Every query re-reads the interface table, so answers always reflect the
/// state at call time.
#[derive(Debug, Default, Clone, Copy)]
pub struct NetdevNetwork;

impl NetdevNetwork {
    /// Creates a new netdev-backed network source.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Looks up the current interface entry for `network` by index.
    #[cfg(not(tarpaulin_include))]
    fn interface(network: &ActiveNetwork) -> Option<Interface> {
        netdev::get_interfaces()
            .into_iter()
            .find(|iface| iface.index == network.index)
    }
}

impl NetworkInfo for NetdevNetwork {
    #[cfg(not(tarpaulin_include))]
    fn active_network(&self) -> Option<ActiveNetwork> {
        match netdev::get_default_interface() {
            Ok(iface) => Some(ActiveNetwork::new(iface.name, iface.index)),
            Err(e) => {
                tracing::trace!("No default interface: {e}");
                None
            }
        }
    }

    #[cfg(not(tarpaulin_include))]
    fn capabilities(&self, network: &ActiveNetwork) -> Option<NetworkCapabilities> {
        let iface = Self::interface(network)?;
        if !iface.is_up() {
            return None;
        }

        let is_tun = iface.is_tun();
        Some(NetworkCapabilities {
            has_gateway: iface.gateway.is_some(),
            transport: transport_of(iface.if_type, is_tun),
        })
    }

    #[cfg(not(tarpaulin_include))]
    fn link_properties(&self, network: &ActiveNetwork) -> Option<LinkProperties> {
        let iface = Self::interface(network)?;

        let v4 = iface
            .ipv4
            .iter()
            .map(|net| LinkAddress::new(IpAddr::V4(net.addr()), net.prefix_len()));
        let v6 = iface
            .ipv6
            .iter()
            .map(|net| LinkAddress::new(IpAddr::V6(net.addr()), net.prefix_len()));

        Some(LinkProperties::new(iface.name, v4.chain(v6).collect()))
    }
}

/// Maps a netdev interface type onto a transport classification.
fn transport_of(if_type: InterfaceType, is_tun: bool) -> TransportKind {
    if is_tun {
        return TransportKind::Vpn;
    }

    match if_type {
        InterfaceType::Ethernet => TransportKind::Ethernet,
        InterfaceType::Wireless80211 => TransportKind::Wifi,
        InterfaceType::Wwanpp | InterfaceType::Wwanpp2 => TransportKind::Cellular,
        InterfaceType::Tunnel | InterfaceType::Ppp => TransportKind::Vpn,
        InterfaceType::Loopback => TransportKind::Loopback,
        _ => TransportKind::Other,
    }
}
