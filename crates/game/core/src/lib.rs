//! Deterministic layer and targeting rules for tile-based action RPG maps.
//!
//! `arpg-core` answers two families of questions about an externally owned
//! world: which vertical plane (underpass, ground, gateway, bridge) a tile or
//! character occupies and whether two characters may interact across planes,
//! and which battler a scripted agent should pick given a declarative filter.
//! Everything here is a pure query over oracles and snapshots; hosts own the
//! characters and drive the frame loop (see the `arpg-runtime` crate).
pub mod combat;
pub mod config;
pub mod env;
pub mod error;
pub mod layer;
pub mod state;
pub mod targeting;
pub mod timer;

pub use combat::{BlockReason, DamageVerdict, FactionRule, damage_verdict, skill_usable};
pub use config::GameConfig;
pub use env::{
    CharacterMut, CharacterView, Env, GameEnv, MapDimensions, MapOracle, MapSnapshot,
    OccupancyOracle, OracleError, StaticTile, TileFlags,
};
pub use error::{ErrorSeverity, GameError};
pub use layer::{
    IdList, LayerConfig, LayerLevel, LayerResolver, LayerState, OverpassPassage, PassageMode,
    PassageQuery, Passability, TileClass, TilePassability, TileRule, TriggerKind,
};
pub use state::{
    BattleStats, CharacterId, CharacterState, Direction, Position, ResourceMeter, Side, StateId,
    StatusSet, TagId, Tick, VehicleKind,
};
pub use targeting::{
    Candidate, CriteriaLogic, DistanceMetric, FilterSpec, LifeCondition, Relation, SearchMethod,
    SearchReport, StateConditions, TagCriterion, ThinkPurpose, ThrottleTable, filter_candidates,
    find_nearest_tagged, rank, satisfies_conditions, select_best,
};
pub use timer::{ContextTimers, TimeUnit, TimerBinding, TimerEvent, TimerRecord, TimerSpec};
