//! Content factory for building the static world from data files.

use std::path::{Path, PathBuf};

use arpg_core::{GameConfig, MapSnapshot};

use crate::loaders::{ConfigLoader, LoadResult, MapLoader};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── maps/
/// │   └── bridge.ron
/// └── scenarios/
///     └── ambush.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`.
    ///
    /// A missing file yields the default configuration.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            return Ok(GameConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load a map from `maps/{map_name}.ron`.
    pub fn load_map(&self, map_name: &str) -> LoadResult<MapSnapshot> {
        MapLoader::load(&self.map_path(map_name))
    }

    pub fn map_path(&self, map_name: &str) -> PathBuf {
        self.data_dir.join("maps").join(format!("{}.ron", map_name))
    }

    /// Path of `scenarios/{name}.ron`. Scenarios are parsed by the runtime.
    pub fn scenario_path(&self, name: &str) -> PathBuf {
        self.data_dir.join("scenarios").join(format!("{}.ron", name))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
