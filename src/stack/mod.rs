//! Stack layer: one-time startup and pass-through control of the native stack.
//!
//! This module provides:
//! - The lifecycle guard ([`StackLifecycleGuard`], [`StartOutcome`])
//! - Its observable state ([`StackState`])
//! - The caller-facing start payload ([`StackParams`])

mod guard;
mod params;
mod state;

pub use guard::{StackLifecycleGuard, StartOutcome};
pub use params::StackParams;
pub use state::StackState;
