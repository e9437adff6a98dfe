//! Common error infrastructure for arpg-core.
//!
//! Domain-specific errors (e.g., `CombatError`, `InventoryError`) are defined in
//! their respective modules alongside the operations they reject. This module
//! holds the shared severity classification they all report through.
//!
//! # Design Principles
//!
//! - **Rejected operations** return `Err` and leave state untouched
//! - **Defensive no-ops** return `Ok` with an outcome describing the no-op
//! - **Invariant violations** (negative item amounts, unknown state indices)
//!   panic; they are programming errors, not recoverable conditions

/// Severity level of an error, used for categorization and logging priority.
///
/// - **Recoverable**: the same request may succeed on a later tick
///   (character busy, world suspended)
/// - **Validation**: invalid input that should not be retried unchanged
/// - **Internal**: unexpected state inconsistency worth investigating
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry later with the same request.
    ///
    /// Examples: attack already in progress, world suspended for a map reload
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: unknown character, non-attack state passed to `attack`
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// Examples: equipped item missing from the canonical cache
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for every rejection an arpg-core operation can return.
///
/// Hosts surface `error_code` to controllers (an AI can tell
/// `COMBAT_ALREADY_ATTACKING` from `COMBAT_SUSPENDED` without parsing text)
/// and use `severity` to decide whether to retry on a later tick.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// `MODULE_VARIANT` identifier, stable across message wording changes.
    ///
    /// Defaults to the type name for errors with a single variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }

    fn is_retryable(&self) -> bool {
        self.severity().is_recoverable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::CombatError;
    use crate::state::CharacterId;

    #[test]
    fn busy_rejections_are_retryable() {
        assert!(CombatError::AlreadyAttacking.is_retryable());
        assert!(!CombatError::UnknownCharacter(CharacterId(3)).is_retryable());
        assert_eq!(CombatError::Suspended.error_code(), "COMBAT_SUSPENDED");
    }
}
