//! Traits describing read-only world data.
//!
//! The map oracle exposes tile classification inputs (region ids, terrain
//! tags, tileset flags); the character traits expose what the queries read
//! from host entities. The [`Env`] aggregate bundles the map with the
//! configuration so the layer resolver can be built without hard coupling to
//! concrete implementations.
mod actors;
mod error;
mod map;
mod snapshot;

pub use actors::{CharacterMut, CharacterView, OccupancyOracle};
pub use error::OracleError;
pub use map::{MapDimensions, MapOracle, StaticTile, TileFlags};
pub use snapshot::MapSnapshot;

use crate::config::GameConfig;
use crate::layer::LayerResolver;

/// Aggregates the read-only data required by the layer resolver.
#[derive(Clone, Copy, Debug)]
pub struct Env<'a, M>
where
    M: MapOracle + ?Sized,
{
    map: Option<&'a M>,
    config: Option<&'a GameConfig>,
}

pub type GameEnv<'a> = Env<'a, dyn MapOracle + 'a>;

impl<'a, M> Env<'a, M>
where
    M: MapOracle + ?Sized,
{
    pub fn new(map: Option<&'a M>, config: Option<&'a GameConfig>) -> Self {
        Self { map, config }
    }

    pub fn with_all(map: &'a M, config: &'a GameConfig) -> Self {
        Self::new(Some(map), Some(config))
    }

    pub fn empty() -> Self {
        Self {
            map: None,
            config: None,
        }
    }

    /// Returns the MapOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::MapNotAvailable` if no map oracle was provided.
    pub fn map(&self) -> Result<&'a M, OracleError> {
        self.map.ok_or(OracleError::MapNotAvailable)
    }

    /// Returns the configuration, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::ConfigNotAvailable` if no configuration was provided.
    pub fn config(&self) -> Result<&'a GameConfig, OracleError> {
        self.config.ok_or(OracleError::ConfigNotAvailable)
    }

    /// Builds a layer resolver over the map and configuration.
    ///
    /// # Errors
    ///
    /// Fails when either the map or the configuration is missing.
    pub fn layers(&self) -> Result<LayerResolver<'a, M>, OracleError> {
        Ok(LayerResolver::new(self.map()?, self.config()?))
    }
}

impl<'a, M> Env<'a, M>
where
    M: MapOracle + 'a,
{
    /// Converts this environment into a trait-object based `GameEnv`.
    pub fn as_game_env(&self) -> GameEnv<'a> {
        let map: Option<&'a dyn MapOracle> = self.map.map(|map| map as _);
        Env::new(map, self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Position;

    #[test]
    fn missing_map_is_reported() {
        let config = GameConfig::default();
        let env: GameEnv<'_> = Env::new(None, Some(&config));
        assert!(matches!(env.layers(), Err(OracleError::MapNotAvailable)));
    }

    #[test]
    fn complete_env_builds_resolver() {
        let map = MapSnapshot::filled(MapDimensions::new(3, 3), StaticTile::floor());
        let config = GameConfig::default();
        let env = Env::with_all(&map, &config).as_game_env();
        let layers = env.layers().expect("map and config present");
        assert!(!layers.classify(Position::new(1, 1)).overpass);
    }
}
