//! Tests for the run module.

use super::*;
use stack_bridge::monitor::ObserverCapability;
use stack_bridge::network::{ActiveNetwork, LinkProperties, NetworkCapabilities};
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Network source with no active network.
struct Offline;

impl NetworkInfo for Offline {
    fn active_network(&self) -> Option<ActiveNetwork> {
        None
    }

    fn capabilities(&self, _network: &ActiveNetwork) -> Option<NetworkCapabilities> {
        None
    }

    fn link_properties(&self, _network: &ActiveNetwork) -> Option<LinkProperties> {
        None
    }
}

mod run_error {
    use super::*;

    #[test]
    fn signal_error_names_signal() {
        let error = RunError::Signal {
            signal: "SIGTERM",
            source: std::io::Error::other("no signal driver"),
        };

        let message = error.to_string();
        assert!(message.contains("SIGTERM"));
        assert!(message.contains("no signal driver"));
    }

    #[test]
    fn signal_error_exposes_source() {
        let error = RunError::Signal {
            signal: "Ctrl+C",
            source: std::io::Error::other("denied"),
        };

        assert!(std::error::Error::source(&error).is_some());
    }
}

mod observer_selection {
    use super::*;

    #[tokio::test]
    async fn poll_mode_builds_callback_observer() {
        let observer = build_observer(
            ObserverMode::Poll,
            Arc::new(Offline),
            Duration::from_secs(5),
            Handle::current(),
        );

        assert_eq!(observer.capability(), ObserverCapability::Callback);
    }

    #[tokio::test]
    async fn off_mode_builds_unsupported_observer() {
        let observer = build_observer(
            ObserverMode::Off,
            Arc::new(Offline),
            Duration::from_secs(5),
            Handle::current(),
        );

        assert_eq!(observer.capability(), ObserverCapability::Unsupported);
        assert!(observer.register(Arc::new(|| {})).is_err());
    }
}

mod bind_sequence {
    use super::*;

    fn params(non_addr: &str, ws_addr: &str) -> StackParams {
        StackParams {
            base_path: PathBuf::from("/data/stack"),
            non_addr: non_addr.to_string(),
            ws_addr: ws_addr.to_string(),
            bdt_port: 10001,
            loglevel: LogLevel::Info,
        }
    }

    /// Control module whose first wait returns without binding.
    #[derive(Default)]
    struct FlakyControl {
        fail_init: bool,
        waits: AtomicUsize,
        bound: AtomicBool,
    }

    impl ControlModule for FlakyControl {
        fn init(&self, _base_path: &Path, _log_level: LogLevel) -> Result<(), ControlError> {
            if self.fail_init {
                return Err(ControlError::Code { call: "init", code: 5 });
            }
            Ok(())
        }

        fn start(&self) -> Result<(), ControlError> {
            Ok(())
        }

        fn wait_bind(&self) -> Result<(), ControlError> {
            if self.waits.fetch_add(1, Ordering::SeqCst) == 0 {
                return Err(ControlError::Code { call: "wait_bind", code: 1 });
            }
            self.bound.store(true, Ordering::SeqCst);
            Ok(())
        }

        fn is_bind(&self) -> bool {
            self.bound.load(Ordering::SeqCst)
        }

        fn address_list(&self) -> Vec<SocketAddr> {
            vec!["10.0.0.2:1318".parse().unwrap()]
        }
    }

    #[test]
    fn control_endpoints_follow_stack_endpoints() {
        let endpoints = control_endpoints(&params("127.0.0.1:1318", "[::1]:1319"));

        assert_eq!(
            endpoints,
            vec![
                "127.0.0.1:1318".parse::<SocketAddr>().unwrap(),
                "[::1]:1319".parse::<SocketAddr>().unwrap(),
            ]
        );
    }

    #[test]
    fn unparsable_endpoint_is_skipped() {
        let endpoints = control_endpoints(&params("localhost:1318", "127.0.0.1:1319"));

        assert_eq!(endpoints, vec!["127.0.0.1:1319".parse::<SocketAddr>().unwrap()]);
    }

    #[tokio::test]
    async fn dry_run_control_binds_and_lists_endpoints() {
        let control = LoggingControl::new(
            Duration::from_millis(10),
            control_endpoints(&params("127.0.0.1:1318", "127.0.0.1:1319")),
        );
        let coordinator = BindCoordinator::new(Arc::new(control), Handle::current());

        let addresses = tokio::time::timeout(
            Duration::from_secs(5),
            bind_device(
                coordinator,
                PathBuf::from("/data/stack"),
                LogLevel::Info,
                Duration::from_millis(5),
            ),
        )
        .await
        .unwrap()
        .unwrap();

        assert_eq!(addresses, vec!["127.0.0.1:1318", "127.0.0.1:1319"]);
    }

    #[tokio::test]
    async fn failed_wait_is_dispatched_again() {
        let control = Arc::new(FlakyControl::default());
        let coordinator = BindCoordinator::new(Arc::clone(&control), Handle::current());

        let addresses = tokio::time::timeout(
            Duration::from_secs(5),
            bind_device(
                coordinator,
                PathBuf::from("/data/stack"),
                LogLevel::Info,
                Duration::from_millis(5),
            ),
        )
        .await
        .unwrap()
        .unwrap();

        assert_eq!(addresses, vec!["10.0.0.2:1318"]);
        assert_eq!(control.waits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failed_init_stops_the_sequence() {
        let control = Arc::new(FlakyControl {
            fail_init: true,
            ..FlakyControl::default()
        });
        let coordinator = BindCoordinator::new(Arc::clone(&control), Handle::current());

        let result = bind_device(
            coordinator,
            PathBuf::from("/data/stack"),
            LogLevel::Info,
            Duration::from_millis(5),
        )
        .await;

        assert!(matches!(result, Err(ControlError::Code { call: "init", .. })));
        assert_eq!(control.waits.load(Ordering::SeqCst), 0);
    }
}
