//! Error types for calls into the native modules.

use thiserror::Error;

/// Error type for native stack calls.
///
/// The bridge adds no translation beyond naming the failing call;
/// callers decide how to react to each variant.
#[derive(Debug, Error)]
pub enum StackError {
    /// The native call reported a failure with a message.
    #[error("Native stack call '{call}' failed: {message}")]
    Failed {
        /// Name of the native entry point.
        call: &'static str,
        /// Message reported by the native side.
        message: String,
    },

    /// The native call returned a non-zero status code.
    #[error("Native stack call '{call}' returned code {code}")]
    Code {
        /// Name of the native entry point.
        call: &'static str,
        /// Status code returned by the native side.
        code: i32,
    },
}

impl StackError {
    /// Creates a `Failed` error for the given call.
    #[must_use]
    pub fn failed(call: &'static str, message: impl Into<String>) -> Self {
        Self::Failed {
            call,
            message: message.into(),
        }
    }

    /// Returns the name of the failing native entry point.
    #[must_use]
    pub const fn call(&self) -> &'static str {
        match self {
            Self::Failed { call, .. } | Self::Code { call, .. } => call,
        }
    }
}

/// Error type for device-control module calls.
#[derive(Debug, Error)]
pub enum ControlError {
    /// The control call reported a failure with a message.
    #[error("Control module call '{call}' failed: {message}")]
    Failed {
        /// Name of the control entry point.
        call: &'static str,
        /// Message reported by the control module.
        message: String,
    },

    /// The control call returned a non-zero status code.
    #[error("Control module call '{call}' returned code {code}")]
    Code {
        /// Name of the control entry point.
        call: &'static str,
        /// Status code returned by the control module.
        code: i32,
    },
}

impl ControlError {
    /// Creates a `Failed` error for the given call.
    #[must_use]
    pub fn failed(call: &'static str, message: impl Into<String>) -> Self {
        Self::Failed {
            call,
            message: message.into(),
        }
    }

    /// Returns the name of the failing control entry point.
    #[must_use]
    pub const fn call(&self) -> &'static str {
        match self {
            Self::Failed { call, .. } | Self::Code { call, .. } => call,
        }
    }
}
