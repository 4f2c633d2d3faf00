//! Lifecycle states of the native stack.

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

/// Lifecycle state of a guarded stack.
///
/// Transitions only move forward: `NotStarted -> Starting -> Running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum StackState {
    /// `start` has not been called yet.
    NotStarted = 0,
    /// Bring-up was dispatched and has not (successfully) returned.
    Starting = 1,
    /// The native bring-up returned successfully.
    Running = 2,
}

impl StackState {
    const fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::NotStarted,
            1 => Self::Starting,
            _ => Self::Running,
        }
    }
}

impl fmt::Display for StackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NotStarted => "not-started",
            Self::Starting => "starting",
            Self::Running => "running",
        };
        f.write_str(name)
    }
}

/// Atomic cell holding a [`StackState`].
#[derive(Debug)]
pub(super) struct StateCell(AtomicU8);

impl StateCell {
    pub(super) const fn new(state: StackState) -> Self {
        Self(AtomicU8::new(state as u8))
    }

    pub(super) fn load(&self) -> StackState {
        StackState::from_u8(self.0.load(Ordering::Acquire))
    }

    pub(super) fn store(&self, state: StackState) {
        self.0.store(state as u8, Ordering::Release);
    }

    /// Moves `from -> to`; returns false if the cell held anything else.
    pub(super) fn transition(&self, from: StackState, to: StackState) -> bool {
        self.0
            .compare_exchange(from as u8, to as u8, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}
