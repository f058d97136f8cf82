//! Vertical layers: underpass, ground, gateway and bridge.
//!
//! Tiles are classified by configured region / terrain-tag lists
//! ([`LayerConfig`]). Each character carries a [`LayerState`] that is stepped
//! once per frame; the [`LayerResolver`] answers level, same-plane,
//! passage and landing questions on top of it.
mod classify;
mod collision;
mod passage;
mod resolver;
mod state;
mod vehicle;

pub use classify::{IdList, LayerConfig, TileClass, TileRule};
pub use collision::TriggerKind;
pub use passage::{OverpassPassage, PassageMode, PassageQuery, Passability, TilePassability};
pub use resolver::LayerResolver;
pub use state::{LayerLevel, LayerState};
