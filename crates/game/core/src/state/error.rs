//! State-level errors: map lookups and invariant checks.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{Position, UnitId};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MapError {
    #[error("position {position} is outside the {width}x{height} map")]
    OutOfBounds {
        position: Position,
        width: u32,
        height: u32,
    },

    #[error("map row {row} has a different width than the first row")]
    RaggedRow { row: u32 },

    #[error("unknown terrain glyph {glyph:?}")]
    UnknownGlyph { glyph: char },
}

impl GameError for MapError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::OutOfBounds { .. } => ErrorSeverity::Recoverable,
            Self::RaggedRow { .. } | Self::UnknownGlyph { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::OutOfBounds { .. } => "MAP_OUT_OF_BOUNDS",
            Self::RaggedRow { .. } => "MAP_RAGGED_ROW",
            Self::UnknownGlyph { .. } => "MAP_UNKNOWN_GLYPH",
        }
    }
}

/// A broken state invariant. Always a bug in the rules.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InvariantViolation {
    #[error("unit {unit} stands outside the map at {position}")]
    UnitOutOfBounds { unit: UnitId, position: Position },

    #[error("living units {first} and {second} share {position}")]
    SharedTile {
        first: UnitId,
        second: UnitId,
        position: Position,
    },
}

impl GameError for InvariantViolation {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnitOutOfBounds { .. } => "INVARIANT_UNIT_OUT_OF_BOUNDS",
            Self::SharedTile { .. } => "INVARIANT_SHARED_TILE",
        }
    }
}
