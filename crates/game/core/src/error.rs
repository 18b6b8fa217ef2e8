//! Shared error infrastructure.
//!
//! Each action family defines its own error enum next to the action it
//! validates (`MoveError`, `AttackError`, `AbilityError`). They all implement
//! [`GameError`] so callers can classify a rejection without matching on every
//! variant.

/// Severity level of an error.
///
/// - **Recoverable**: the action was refused but another action may succeed
/// - **Validation**: the request itself is malformed (unknown unit, wrong side)
/// - **Internal**: the state broke an invariant; indicates a bug
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Examples: destination blocked, target out of range.
    Recoverable,

    /// Examples: unit not found, acting out of turn.
    Validation,

    /// Examples: two living units on one tile.
    Internal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all rule errors.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier for the variant, used in logs and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
