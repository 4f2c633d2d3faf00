//! Polling-based network observer.
//!
//! This module provides [`InterfacePoller`], a [`NetworkObserver`] for hosts
//! that expose interface state but no change callbacks (desktop and server
//! platforms). It periodically snapshots the active link and raises a
//! notification whenever the snapshot differs from the previous one.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::time::{MissedTickBehavior, interval};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::IntervalStream;

use super::{LinkChangeHandler, NetworkObserver, ObserverCapability, ObserverError};
use crate::network::{ActiveNetwork, LinkProperties, NetworkCapabilities, NetworkInfo};

/// Everything a link-change notification could be about.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LinkSnapshot {
    network: ActiveNetwork,
    capabilities: Option<NetworkCapabilities>,
    link: Option<LinkProperties>,
}

impl LinkSnapshot {
    fn take<N: NetworkInfo + ?Sized>(source: &N) -> Option<Self> {
        let network = source.active_network()?;
        let capabilities = source.capabilities(&network);
        let link = source.link_properties(&network);
        Some(Self {
            network,
            capabilities,
            link,
        })
    }
}

/// Observer that detects link changes by polling a [`NetworkInfo`] source.
///
/// Mirrors callback-capable hosts: the first poll raises one notification
/// right after registration, then a notification is raised for every poll
/// whose snapshot differs from the previous one.
///
/// # One-time Semantics
///
/// Only one handler may be registered; a second registration fails with
/// [`ObserverError::AlreadyRegistered`]. The polling task lives as long as
/// the runtime it was spawned on.
pub struct InterfacePoller<N> {
    source: Arc<N>,
    interval: Duration,
    runtime: Handle,
    registered: AtomicBool,
}

impl<N> InterfacePoller<N>
where
    N: NetworkInfo + 'static,
{
    /// Creates a new interface poller.
    ///
    /// # Arguments
    ///
    /// * `source` - The network source to snapshot
    /// * `interval` - The interval between polls
    /// * `runtime` - Runtime the polling task is spawned on
    #[must_use]
    pub fn new(source: N, interval: Duration, runtime: Handle) -> Self {
        Self {
            source: Arc::new(source),
            interval,
            runtime,
            registered: AtomicBool::new(false),
        }
    }

    /// Returns the configured polling interval.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }
}

impl<N> NetworkObserver for InterfacePoller<N>
where
    N: NetworkInfo + 'static,
{
    fn capability(&self) -> ObserverCapability {
        ObserverCapability::Callback
    }

    fn register(&self, handler: LinkChangeHandler) -> Result<(), ObserverError> {
        if self.registered.swap(true, Ordering::AcqRel) {
            return Err(ObserverError::AlreadyRegistered);
        }

        let source = Arc::clone(&self.source);
        let period = self.interval;
        self.runtime.spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut ticks = IntervalStream::new(ticker);

            let mut previous: Option<Option<LinkSnapshot>> = None;
            while ticks.next().await.is_some() {
                let current = LinkSnapshot::take(source.as_ref());
                let changed = previous.as_ref().is_none_or(|prev| *prev != current);
                if changed {
                    if previous.is_some() {
                        tracing::debug!("Active link changed: {current:?}");
                    }
                    previous = Some(current);
                    handler();
                }
            }
        });

        Ok(())
    }
}

#[cfg(test)]
#[path = "poller_tests.rs"]
mod tests;
