//! Common error infrastructure for tileworld crates.
//!
//! Concrete error enums live next to the operation that produces them
//! (`ActionError` here, planning and region errors in the runtime). This
//! module provides the shared severity classification so the decision cycle
//! can decide how loudly to report a failure without matching on every
//! variant.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the world changed under the agent; next tick may succeed
/// - **Degraded**: the agent continues with a best-effort substitute
/// - **Validation**: the request itself was invalid for the current state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Temporary condition such as a cell that became blocked.
    Recoverable,

    /// No exact answer exists; a fallback value is used instead.
    ///
    /// Examples: unreachable goal, fully blocked waypoint column
    Degraded,

    /// Invalid input that should not be retried unchanged.
    ///
    /// Examples: collecting on an empty cell, coordinate outside the grid
    Validation,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Degraded => "degraded",
            Self::Validation => "validation",
        }
    }

    /// Returns true if the same request may succeed on a later tick.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable | Self::Degraded)
    }
}

/// Common trait for all tileworld errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait TileworldError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Used as a structured field in log records.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_labels() {
        assert_eq!(ErrorSeverity::Recoverable.as_str(), "recoverable");
        assert!(ErrorSeverity::Degraded.is_recoverable());
        assert!(!ErrorSeverity::Validation.is_recoverable());
    }
}
