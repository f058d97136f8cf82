//! In-memory map oracle.
//!
//! Stores tiles in a flat row-major array. Content loaders produce it and
//! tests build it by hand.

use super::{MapDimensions, MapOracle, OracleError, StaticTile};
use crate::state::Position;

/// Snapshot of static map data.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapSnapshot {
    pub dimensions: MapDimensions,
    pub tiles: Vec<Option<StaticTile>>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub loop_horizontal: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub loop_vertical: bool,
}

impl MapSnapshot {
    pub fn new(dimensions: MapDimensions, tiles: Vec<Option<StaticTile>>) -> Self {
        Self {
            dimensions,
            tiles,
            loop_horizontal: false,
            loop_vertical: false,
        }
    }

    /// Map of the given size where every tile is `tile`.
    pub fn filled(dimensions: MapDimensions, tile: StaticTile) -> Self {
        Self::new(dimensions, vec![Some(tile); dimensions.area()])
    }

    #[must_use]
    pub fn with_looping(mut self, horizontal: bool, vertical: bool) -> Self {
        self.loop_horizontal = horizontal;
        self.loop_vertical = vertical;
        self
    }

    fn index(&self, position: Position) -> Option<usize> {
        if !self.dimensions.contains(position) {
            return None;
        }
        Some(position.y as usize * self.dimensions.width as usize + position.x as usize)
    }

    /// Replaces the tile at `position`.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::PositionOutOfBounds` outside the map.
    pub fn set_tile(&mut self, position: Position, tile: StaticTile) -> Result<(), OracleError> {
        let index = self
            .index(position)
            .ok_or(OracleError::PositionOutOfBounds(position))?;
        if index >= self.tiles.len() {
            self.tiles.resize(self.dimensions.area(), None);
        }
        self.tiles[index] = Some(tile);
        Ok(())
    }

    /// Returns the tile at `position`.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::PositionOutOfBounds` outside the map and
    /// `OracleError::TileNotFound` for a hole in the layout.
    pub fn tile_at(&self, position: Position) -> Result<StaticTile, OracleError> {
        let index = self
            .index(position)
            .ok_or(OracleError::PositionOutOfBounds(position))?;
        self.tiles
            .get(index)
            .copied()
            .flatten()
            .ok_or(OracleError::TileNotFound(position))
    }
}

impl MapOracle for MapSnapshot {
    fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    fn tile(&self, position: Position) -> Option<StaticTile> {
        self.tile_at(position).ok()
    }

    fn loops_horizontally(&self) -> bool {
        self.loop_horizontal
    }

    fn loops_vertically(&self) -> bool {
        self.loop_vertical
    }
}
