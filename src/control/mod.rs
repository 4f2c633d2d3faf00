//! Control layer: sequencing of the device-control module.
//!
//! This module provides:
//! - The bind coordinator ([`BindCoordinator`], [`WaitBindOutcome`])
//! - Its observable lifecycle ([`BindState`])

mod coordinator;
mod state;

pub use coordinator::{BindCoordinator, WaitBindOutcome};
pub use state::BindState;
