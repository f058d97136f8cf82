//! Common error infrastructure for arpg-core.
//!
//! Queries of the layer resolver and the targeting engine never fail: a
//! misconfigured rule simply does not match and a missing dependency yields the
//! "not applicable" answer. Errors exist only where the caller explicitly asks
//! for a dependency (for example [`crate::env::Env::map`]) and wants to know why
//! it is absent.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Temporary condition; retrying later may succeed.
    Recoverable,

    /// Invalid input that should be rejected without retry.
    ///
    /// Examples: coordinates outside a non-looping map.
    Validation,

    /// Unexpected state inconsistency that indicates a bug.
    Internal,

    /// The host did not provide data the query cannot do without.
    ///
    /// Examples: map oracle or configuration missing from the environment.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all arpg-core errors.
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Static identifier for this error variant, for logs and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
