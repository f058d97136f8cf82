//! Value types shared by the layer resolver and the targeting engine.
//!
//! The host owns the characters; these records are what it hands to the
//! queries (or what the bundled runtime stores directly).
mod battler;
mod character;
mod common;

pub use battler::{BattleStats, ResourceMeter, Side, StateId, StatusSet};
pub use character::CharacterState;
pub use common::{CharacterId, Direction, Position, Tick, VehicleKind};

/// Id of a per-character tag ("self variable").
pub type TagId = u32;
