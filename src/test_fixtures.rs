//! Shared test fixtures for monitor and stack tests.

use crate::monitor::{LinkChangeHandler, NetworkObserver, ObserverCapability, ObserverError};
use crate::native::{NativeStack, StackConfig, StackError};
use crate::network::{
    ActiveNetwork, LinkAddress, LinkProperties, NetworkCapabilities, NetworkInfo, TransportKind,
};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::time::Instant;

/// Network source whose link addresses can be changed by the test.
///
/// `None` means "no active network".
pub struct ScriptedNetwork {
    addresses: Mutex<Option<Vec<LinkAddress>>>,
}

impl ScriptedNetwork {
    /// Active Wi-Fi network carrying `addresses` (host notation).
    pub fn connected(addresses: &[&str]) -> Self {
        Self {
            addresses: Mutex::new(Some(parse_all(addresses))),
        }
    }

    /// No active network.
    pub fn disconnected() -> Self {
        Self {
            addresses: Mutex::new(None),
        }
    }

    /// Replaces the link addresses, reconnecting if needed.
    pub fn set_addresses(&self, addresses: &[&str]) {
        *self.addresses.lock().unwrap() = Some(parse_all(addresses));
    }

    /// Drops the active network.
    pub fn disconnect(&self) {
        *self.addresses.lock().unwrap() = None;
    }
}

fn parse_all(addresses: &[&str]) -> Vec<LinkAddress> {
    addresses.iter().map(|s| s.parse().unwrap()).collect()
}

impl NetworkInfo for ScriptedNetwork {
    fn active_network(&self) -> Option<ActiveNetwork> {
        self.addresses
            .lock()
            .unwrap()
            .as_ref()
            .map(|_| ActiveNetwork::new("wlan0", 3))
    }

    fn capabilities(&self, _network: &ActiveNetwork) -> Option<NetworkCapabilities> {
        Some(NetworkCapabilities {
            transport: TransportKind::Wifi,
            has_gateway: true,
        })
    }

    fn link_properties(&self, _network: &ActiveNetwork) -> Option<LinkProperties> {
        self.addresses
            .lock()
            .unwrap()
            .clone()
            .map(|addresses| LinkProperties::new("wlan0", addresses))
    }
}

/// Callback run after a reset has been recorded.
pub type ResetHook = Box<dyn Fn(&str) + Send + Sync>;

/// Native stack that records every call.
#[derive(Default)]
pub struct RecordingStack {
    starts: Mutex<Vec<StackConfig>>,
    resets: Mutex<Vec<(String, Instant)>>,
    reset_hook: Mutex<Option<ResetHook>>,
    restarts: AtomicUsize,
    start_delay: Option<Duration>,
    fail_start: bool,
    fail_resets: bool,
}

impl RecordingStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stack whose `start` blocks the calling thread for `delay`.
    pub fn with_start_delay(delay: Duration) -> Self {
        Self {
            start_delay: Some(delay),
            ..Self::default()
        }
    }

    /// Stack whose `start` always fails.
    pub fn failing_start() -> Self {
        Self {
            fail_start: true,
            ..Self::default()
        }
    }

    /// Stack whose `reset_network` always fails.
    pub fn failing_resets() -> Self {
        Self {
            fail_resets: true,
            ..Self::default()
        }
    }

    /// Runs `hook` on every later `reset_network`, outside the stack's locks.
    pub fn on_reset(&self, hook: impl Fn(&str) + Send + Sync + 'static) {
        *self.reset_hook.lock().unwrap() = Some(Box::new(hook));
    }

    pub fn start_count(&self) -> usize {
        self.starts.lock().unwrap().len()
    }

    pub fn started_with(&self) -> Vec<StackConfig> {
        self.starts.lock().unwrap().clone()
    }

    pub fn resets(&self) -> Vec<String> {
        self.resets
            .lock()
            .unwrap()
            .iter()
            .map(|(addr, _)| addr.clone())
            .collect()
    }

    pub fn reset_times(&self) -> Vec<Instant> {
        self.resets.lock().unwrap().iter().map(|(_, at)| *at).collect()
    }

    pub fn restart_count(&self) -> usize {
        self.restarts.load(Ordering::SeqCst)
    }
}

impl NativeStack for RecordingStack {
    fn start(&self, config: &StackConfig) -> Result<(), StackError> {
        if let Some(delay) = self.start_delay {
            std::thread::sleep(delay);
        }
        self.starts.lock().unwrap().push(config.clone());
        if self.fail_start {
            return Err(StackError::failed("start", "bring-up failed"));
        }
        Ok(())
    }

    fn reset_network(&self, addr: &str) -> Result<(), StackError> {
        self.resets
            .lock()
            .unwrap()
            .push((addr.to_string(), Instant::now()));
        if let Some(hook) = self.reset_hook.lock().unwrap().as_ref() {
            hook(addr);
        }
        if self.fail_resets {
            return Err(StackError::failed("reset_network", "stack not ready"));
        }
        Ok(())
    }

    fn restart_interface(&self) -> Result<(), StackError> {
        self.restarts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Observer driven by the test, standing in for the host callback API.
pub struct ManualObserver {
    capability: ObserverCapability,
    handler: Mutex<Option<LinkChangeHandler>>,
    registrations: AtomicUsize,
    reject: bool,
}

impl ManualObserver {
    /// Callback-capable observer.
    pub fn new() -> Self {
        Self {
            capability: ObserverCapability::Callback,
            handler: Mutex::new(None),
            registrations: AtomicUsize::new(0),
            reject: false,
        }
    }

    /// Observer on a host without callback support.
    pub fn unsupported() -> Self {
        Self {
            capability: ObserverCapability::Unsupported,
            ..Self::new()
        }
    }

    /// Callback-capable observer whose registration fails.
    pub fn rejecting() -> Self {
        Self {
            reject: true,
            ..Self::new()
        }
    }

    /// Delivers one link-change notification, if a handler is registered.
    pub fn notify(&self) {
        let handler = self.handler.lock().unwrap().clone();
        if let Some(handler) = handler {
            handler();
        }
    }

    pub fn registrations(&self) -> usize {
        self.registrations.load(Ordering::SeqCst)
    }

    pub fn is_registered(&self) -> bool {
        self.handler.lock().unwrap().is_some()
    }
}

impl NetworkObserver for ManualObserver {
    fn capability(&self) -> ObserverCapability {
        self.capability
    }

    fn register(&self, handler: LinkChangeHandler) -> Result<(), ObserverError> {
        self.registrations.fetch_add(1, Ordering::SeqCst);
        if self.reject {
            return Err(ObserverError::Registration {
                message: "callback API rejected".to_string(),
            });
        }
        *self.handler.lock().unwrap() = Some(handler);
        Ok(())
    }
}

/// Polls `condition` every few milliseconds until it holds or `limit` passes.
///
/// Runs on the real clock; do not use under paused time.
pub async fn wait_until(limit: Duration, condition: impl Fn() -> bool) -> bool {
    tokio::time::timeout(limit, async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .is_ok()
}
