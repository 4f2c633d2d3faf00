//! Tests for `StackLifecycleGuard`.

use super::*;
use crate::native::LogLevel;
use crate::test_fixtures::{ManualObserver, RecordingStack, ScriptedNetwork, wait_until};
use std::path::PathBuf;
use std::time::{Duration, Instant};

type TestGuard = StackLifecycleGuard<RecordingStack, ScriptedNetwork, Arc<ManualObserver>>;

const SETTLE: Duration = Duration::from_secs(5);

fn params() -> StackParams {
    StackParams {
        base_path: PathBuf::from("/data/stack"),
        non_addr: "127.0.0.1:0".to_string(),
        ws_addr: "127.0.0.1:0".to_string(),
        bdt_port: 10001,
        loglevel: LogLevel::Info,
    }
}

fn make_guard(
    stack: &Arc<RecordingStack>,
    network: &Arc<ScriptedNetwork>,
    observer: &Arc<ManualObserver>,
) -> TestGuard {
    StackLifecycleGuard::new(
        Arc::clone(stack),
        Arc::clone(network),
        Arc::clone(observer),
        Handle::current(),
    )
}

mod start {
    use super::*;

    #[tokio::test]
    async fn second_start_is_ignored() {
        let stack = Arc::new(RecordingStack::with_start_delay(Duration::from_millis(100)));
        let network = Arc::new(ScriptedNetwork::connected(&["10.0.0.2/24"]));
        let observer = Arc::new(ManualObserver::new());
        let guard = make_guard(&stack, &network, &observer);

        assert_eq!(guard.start(params()), StartOutcome::Dispatched);
        assert_eq!(guard.start(params()), StartOutcome::AlreadyStarted);

        assert!(wait_until(SETTLE, || guard.state() == StackState::Running).await);
        assert_eq!(guard.start(params()), StartOutcome::AlreadyStarted);
        assert_eq!(stack.start_count(), 1);
    }

    #[tokio::test]
    async fn returns_before_bring_up_completes() {
        let stack = Arc::new(RecordingStack::with_start_delay(Duration::from_millis(500)));
        let network = Arc::new(ScriptedNetwork::connected(&["10.0.0.2/24"]));
        let observer = Arc::new(ManualObserver::new());
        let guard = make_guard(&stack, &network, &observer);

        let began = Instant::now();
        guard.start(params());

        assert!(began.elapsed() < Duration::from_millis(250));
        assert_eq!(guard.state(), StackState::Starting);
        assert!(wait_until(SETTLE, || guard.state() == StackState::Running).await);
    }

    #[tokio::test]
    async fn passes_resolved_local_addr() {
        let stack = Arc::new(RecordingStack::new());
        let network = Arc::new(ScriptedNetwork::connected(&[
            "/fe80::1%wlan0/64",
            "10.0.0.2/24",
            "10.0.0.3/24",
        ]));
        let observer = Arc::new(ManualObserver::new());
        let guard = make_guard(&stack, &network, &observer);

        guard.start(params());
        assert!(wait_until(SETTLE, || stack.start_count() == 1).await);

        let config = &stack.started_with()[0];
        assert_eq!(config.local_addr, "10.0.0.2");
        assert_eq!(config.base_path, PathBuf::from("/data/stack"));
        assert_eq!(config.bdt_port, 10001);
    }

    #[tokio::test]
    async fn passes_empty_local_addr_without_network() {
        let stack = Arc::new(RecordingStack::new());
        let network = Arc::new(ScriptedNetwork::disconnected());
        let observer = Arc::new(ManualObserver::new());
        let guard = make_guard(&stack, &network, &observer);

        guard.start(params());
        assert!(wait_until(SETTLE, || stack.start_count() == 1).await);

        assert_eq!(stack.started_with()[0].local_addr, "");
    }

    #[tokio::test]
    async fn failed_bring_up_stays_starting() {
        let stack = Arc::new(RecordingStack::failing_start());
        let network = Arc::new(ScriptedNetwork::connected(&["10.0.0.2/24"]));
        let observer = Arc::new(ManualObserver::new());
        let guard = make_guard(&stack, &network, &observer);

        guard.start(params());
        assert!(wait_until(SETTLE, || stack.start_count() == 1).await);
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(guard.state(), StackState::Starting);
        assert_eq!(guard.start(params()), StartOutcome::AlreadyStarted);
        assert_eq!(stack.start_count(), 1);
    }

    #[tokio::test]
    async fn state_before_start_is_not_started() {
        let stack = Arc::new(RecordingStack::new());
        let network = Arc::new(ScriptedNetwork::disconnected());
        let observer = Arc::new(ManualObserver::new());
        let guard = make_guard(&stack, &network, &observer);

        assert_eq!(guard.state(), StackState::NotStarted);
    }
}

mod observer {
    use super::*;

    #[tokio::test]
    async fn registers_once() {
        let stack = Arc::new(RecordingStack::new());
        let network = Arc::new(ScriptedNetwork::connected(&["10.0.0.2/24"]));
        let observer = Arc::new(ManualObserver::new());
        let guard = make_guard(&stack, &network, &observer);

        guard.start(params());
        guard.start(params());

        assert_eq!(observer.registrations(), 1);
        assert!(guard.observer().is_registered());
    }

    #[tokio::test]
    async fn unsupported_host_skips_registration() {
        let stack = Arc::new(RecordingStack::new());
        let network = Arc::new(ScriptedNetwork::connected(&["10.0.0.2/24"]));
        let observer = Arc::new(ManualObserver::unsupported());
        let guard = make_guard(&stack, &network, &observer);

        assert_eq!(guard.start(params()), StartOutcome::Dispatched);

        assert_eq!(observer.registrations(), 0);
        assert!(wait_until(SETTLE, || guard.state() == StackState::Running).await);
    }

    #[tokio::test]
    async fn rejected_registration_still_starts() {
        let stack = Arc::new(RecordingStack::new());
        let network = Arc::new(ScriptedNetwork::connected(&["10.0.0.2/24"]));
        let observer = Arc::new(ManualObserver::rejecting());
        let guard = make_guard(&stack, &network, &observer);

        assert_eq!(guard.start(params()), StartOutcome::Dispatched);

        assert_eq!(observer.registrations(), 1);
        assert!(!observer.is_registered());
        assert!(wait_until(SETTLE, || guard.state() == StackState::Running).await);
    }

    #[tokio::test(start_paused = true)]
    async fn link_changes_reset_stack_after_window() {
        let stack = Arc::new(RecordingStack::new());
        let network = Arc::new(ScriptedNetwork::connected(&["10.0.0.1/24"]));
        let observer = Arc::new(ManualObserver::new());
        let guard = make_guard(&stack, &network, &observer);
        guard.start(params());

        observer.notify();

        network.set_addresses(&["10.0.0.2/24"]);
        observer.notify();
        tokio::time::sleep(Duration::from_millis(500)).await;
        network.set_addresses(&["10.0.0.5/24"]);
        observer.notify();

        tokio::time::sleep(Duration::from_millis(2499)).await;
        assert!(stack.resets().is_empty());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(stack.resets(), vec!["10.0.0.5"]);
    }

    #[tokio::test(start_paused = true)]
    async fn custom_debounce_window_is_used() {
        let stack = Arc::new(RecordingStack::new());
        let network = Arc::new(ScriptedNetwork::connected(&["10.0.0.2/24"]));
        let observer = Arc::new(ManualObserver::new());
        let guard = make_guard(&stack, &network, &observer)
            .with_debounce(DebouncePolicy::new(Duration::from_millis(100)));
        guard.start(params());

        observer.notify();
        observer.notify();
        tokio::time::sleep(Duration::from_millis(101)).await;

        assert_eq!(stack.resets(), vec!["10.0.0.2"]);
    }
}

mod passthrough {
    use super::*;

    #[tokio::test]
    async fn reset_network_forwards_verbatim() {
        let stack = Arc::new(RecordingStack::new());
        let network = Arc::new(ScriptedNetwork::disconnected());
        let observer = Arc::new(ManualObserver::new());
        let guard = make_guard(&stack, &network, &observer);

        guard.reset_network("192.168.1.8").unwrap();
        guard.reset_network("").unwrap();

        assert_eq!(stack.resets(), vec!["192.168.1.8", ""]);
    }

    #[tokio::test]
    async fn reset_network_returns_stack_error() {
        let stack = Arc::new(RecordingStack::failing_resets());
        let network = Arc::new(ScriptedNetwork::disconnected());
        let observer = Arc::new(ManualObserver::new());
        let guard = make_guard(&stack, &network, &observer);

        let err = guard.reset_network("10.0.0.2").unwrap_err();
        assert_eq!(err.call(), "reset_network");
    }

    #[tokio::test]
    async fn restart_interface_forwards() {
        let stack = Arc::new(RecordingStack::new());
        let network = Arc::new(ScriptedNetwork::disconnected());
        let observer = Arc::new(ManualObserver::new());
        let guard = make_guard(&stack, &network, &observer);

        guard.restart_interface().unwrap();
        guard.restart_interface().unwrap();

        assert_eq!(stack.restart_count(), 2);
        assert_eq!(guard.state(), StackState::NotStarted);
    }
}
