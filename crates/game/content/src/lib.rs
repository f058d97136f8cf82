//! Data-driven content definitions and loaders.
//!
//! This crate turns data files into `arpg-core` values:
//! - Game configuration (TOML)
//! - Map layouts with region ids, terrain tags and tile flags (RON)
//! - Script command parameters in their loose plugin shape
//!
//! Content is consumed by the runtime and never mutated after loading.

#[cfg(feature = "serde")]
pub mod params;

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "serde")]
pub use params::{
    ChangeStateParams, CharacterRef, CheckConditionsParams, CommandSpec, ConditionSource,
    FailPolicy, FindTaggedParams, SearchBattlerParams, StateChange, TagCriterionParams,
    TimerParams,
};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, LoadResult, MapLoader};
