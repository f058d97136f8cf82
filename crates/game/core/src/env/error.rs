//! Oracle access errors.

use crate::error::{ErrorSeverity, GameError};
use crate::state::Position;

/// Errors that occur when accessing oracle data.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    /// MapOracle is not available in the environment.
    #[error("MapOracle not available")]
    MapNotAvailable,

    /// Configuration is not available in the environment.
    #[error("configuration not available")]
    ConfigNotAvailable,

    /// Position is outside the map bounds.
    #[error("position {0} is out of map bounds")]
    PositionOutOfBounds(Position),

    /// Tile at the given position was not found.
    #[error("tile at position {0} not found")]
    TileNotFound(Position),
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        use OracleError::*;
        match self {
            MapNotAvailable | ConfigNotAvailable => ErrorSeverity::Fatal,
            PositionOutOfBounds(_) | TileNotFound(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            MapNotAvailable => "ORACLE_MAP_NOT_AVAILABLE",
            ConfigNotAvailable => "ORACLE_CONFIG_NOT_AVAILABLE",
            PositionOutOfBounds(_) => "ORACLE_POSITION_OUT_OF_BOUNDS",
            TileNotFound(_) => "ORACLE_TILE_NOT_FOUND",
        }
    }
}
