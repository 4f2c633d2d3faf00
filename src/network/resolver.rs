//! Host network queries and active IPv4 resolution.

use super::{ActiveNetwork, LinkProperties, NetworkCapabilities};

/// Trait for querying the host's network state.
///
/// # Design
///
/// - Each lookup is independent and may return `None` when the host has no
///   answer (no active network, capabilities not yet known, etc.)
/// - Implementations take a best-effort snapshot; callers never lock against
///   concurrent network transitions
/// - Enables dependency injection for testing with mock implementations
pub trait NetworkInfo: Send + Sync {
    /// Returns the network the host currently routes traffic through.
    fn active_network(&self) -> Option<ActiveNetwork>;

    /// Returns the capabilities of `network`.
    fn capabilities(&self, network: &ActiveNetwork) -> Option<NetworkCapabilities>;

    /// Returns the link properties (addresses) of `network`.
    fn link_properties(&self, network: &ActiveNetwork) -> Option<LinkProperties>;
}

impl<N: NetworkInfo + ?Sized> NetworkInfo for std::sync::Arc<N> {
    fn active_network(&self) -> Option<ActiveNetwork> {
        (**self).active_network()
    }

    fn capabilities(&self, network: &ActiveNetwork) -> Option<NetworkCapabilities> {
        (**self).capabilities(network)
    }

    fn link_properties(&self, network: &ActiveNetwork) -> Option<LinkProperties> {
        (**self).link_properties(network)
    }
}

/// Extracts the single usable IPv4 address of the active network.
///
/// Resolution never fails: every missing piece of information collapses to
/// an empty string, which downstream consumers treat as "no usable address".
#[derive(Debug, Clone)]
pub struct AddressResolver<N> {
    source: N,
}

impl<N: NetworkInfo> AddressResolver<N> {
    /// Creates a resolver over the given network source.
    #[must_use]
    pub const fn new(source: N) -> Self {
        Self { source }
    }

    /// Returns the underlying network source.
    #[must_use]
    pub const fn source(&self) -> &N {
        &self.source
    }

    /// Resolves the first IPv4 address of the active network.
    ///
    /// Returns an empty string when there is no active network, when its
    /// capabilities or link properties are unavailable, or when the link
    /// carries no IPv4 address.
    #[must_use]
    pub fn resolve_active_ipv4(&self) -> String {
        let Some(network) = self.source.active_network() else {
            tracing::debug!("No active network");
            return String::new();
        };

        let Some(capabilities) = self.source.capabilities(&network) else {
            tracing::debug!("No capabilities for network {}", network.name);
            return String::new();
        };

        let Some(link) = self.source.link_properties(&network) else {
            tracing::debug!("No link properties for network {}", network.name);
            return String::new();
        };

        match link.first_ipv4() {
            Some(address) => {
                tracing::trace!(
                    "Resolved {address} on {} ({})",
                    link.interface_name,
                    capabilities.transport
                );
                address.to_string()
            }
            None => {
                tracing::debug!("No IPv4 address on {}", link.interface_name);
                String::new()
            }
        }
    }
}
