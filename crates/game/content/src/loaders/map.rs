//! Map data loader.
//!
//! Loads static tile data (region ids, terrain tags, passage flags) from map
//! RON files. Characters are placed separately by scenario files.

use std::path::Path;

use arpg_core::{MapDimensions, MapSnapshot, Position, StaticTile};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Map data structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct MapDataRon {
    dimensions: (u32, u32),
    #[serde(default)]
    loop_horizontal: bool,
    #[serde(default)]
    loop_vertical: bool,
    /// Tile used wherever `tiles` has no entry.
    #[serde(default)]
    fill: StaticTile,
    #[serde(default)]
    tiles: Vec<(i32, i32, StaticTile)>, // (x, y, tile)
}

/// Loader for map data from RON files.
pub struct MapLoader;

impl MapLoader {
    /// Load map data from a RON file.
    pub fn load(path: &Path) -> LoadResult<MapSnapshot> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse map data from RON text.
    ///
    /// Fails when a listed tile lies outside the declared dimensions.
    pub fn parse(content: &str) -> LoadResult<MapSnapshot> {
        let data: MapDataRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse map RON: {}", e))?;

        let dimensions = MapDimensions::new(data.dimensions.0, data.dimensions.1);
        let mut map = MapSnapshot::filled(dimensions, data.fill)
            .with_looping(data.loop_horizontal, data.loop_vertical);

        for (x, y, tile) in data.tiles {
            map.set_tile(Position::new(x, y), tile)
                .map_err(|e| anyhow::anyhow!("Invalid tile at ({}, {}): {}", x, y, e))?;
        }

        Ok(map)
    }
}
