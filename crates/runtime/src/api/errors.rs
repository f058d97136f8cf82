//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from oracle access, scenario loading and character lookup
//! so clients can bubble them up with consistent context.
use std::path::PathBuf;

use arpg_core::{CharacterId, ErrorSeverity, GameError, OracleError, Position, VehicleKind};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("character {0} is not on the map")]
    UnknownCharacter(CharacterId),

    #[error("character {0} already exists")]
    DuplicateCharacter(CharacterId),

    #[error("command `{command}` issued by {agent} has no subject")]
    MissingSubject {
        agent: CharacterId,
        command: &'static str,
    },

    #[error("{0} cannot act while the player rides a vehicle")]
    Riding(CharacterId),

    #[error("no {0} can be boarded at {1}")]
    NoVehicle(VehicleKind, Position),

    #[error("the player is not riding a vehicle")]
    NotRiding,

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error("failed to read scenario {path}")]
    ScenarioIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse scenario {path}")]
    ScenarioParse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    #[error("invalid scenario: {0}")]
    InvalidScenario(String),
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        use RuntimeError::*;
        match self {
            Oracle(error) => error.severity(),
            ScenarioIo { .. } => ErrorSeverity::Recoverable,
            UnknownCharacter(_)
            | DuplicateCharacter(_)
            | MissingSubject { .. }
            | Riding(_)
            | NoVehicle(..)
            | NotRiding
            | ScenarioParse { .. }
            | InvalidScenario(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use RuntimeError::*;
        match self {
            UnknownCharacter(_) => "RUNTIME_UNKNOWN_CHARACTER",
            DuplicateCharacter(_) => "RUNTIME_DUPLICATE_CHARACTER",
            MissingSubject { .. } => "RUNTIME_MISSING_SUBJECT",
            Riding(_) => "RUNTIME_RIDING",
            NoVehicle(..) => "RUNTIME_NO_VEHICLE",
            NotRiding => "RUNTIME_NOT_RIDING",
            Oracle(error) => error.error_code(),
            ScenarioIo { .. } => "RUNTIME_SCENARIO_IO",
            ScenarioParse { .. } => "RUNTIME_SCENARIO_PARSE",
            InvalidScenario(_) => "RUNTIME_INVALID_SCENARIO",
        }
    }
}
