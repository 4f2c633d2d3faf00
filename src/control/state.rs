//! Bind lifecycle states of the device-control module.

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

/// Progress of the device-control module towards a bound device.
///
/// Ordered: every state compares greater than the ones before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum BindState {
    /// `init` has not succeeded yet.
    Uninitialized = 0,
    /// The module accepted `init`.
    Initialized = 1,
    /// The module's run loop was started.
    Started = 2,
    /// A background wait for binding is running.
    WaitingForBind = 3,
    /// The device is bound.
    Bound = 4,
}

impl BindState {
    const fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Uninitialized,
            1 => Self::Initialized,
            2 => Self::Started,
            3 => Self::WaitingForBind,
            _ => Self::Bound,
        }
    }
}

impl fmt::Display for BindState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Uninitialized => "uninitialized",
            Self::Initialized => "initialized",
            Self::Started => "started",
            Self::WaitingForBind => "waiting-for-bind",
            Self::Bound => "bound",
        };
        f.write_str(name)
    }
}

#[derive(Debug)]
pub(super) struct BindCell(AtomicU8);

impl BindCell {
    pub(super) const fn new() -> Self {
        Self(AtomicU8::new(BindState::Uninitialized as u8))
    }

    pub(super) fn load(&self) -> BindState {
        BindState::from_u8(self.0.load(Ordering::Acquire))
    }

    pub(super) fn store(&self, state: BindState) {
        self.0.store(state as u8, Ordering::Release);
    }

    /// Moves forward to `state`; never moves backwards.
    pub(super) fn raise(&self, state: BindState) {
        self.0.fetch_max(state as u8, Ordering::AcqRel);
    }
}
