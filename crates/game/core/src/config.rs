use crate::layer::{LayerConfig, PassageMode};
use crate::targeting::DistanceMetric;

/// Game configuration constants and tunable parameters.
///
/// Read-only after initialization; every query borrows it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Region / terrain-tag rules classifying overpass and gateway tiles.
    pub layer: LayerConfig,
    /// How strictly elevated characters are kept on the bridge.
    pub passage_mode: PassageMode,
    /// Frames per second, used to convert second-based durations.
    pub frames_per_second: u32,
    /// Z-order bonus added to elevated characters.
    pub higher_z_bonus: i32,
    /// Distance metric used by targeting queries.
    pub distance: DistanceMetric,
    /// Thinking time, in frames, for commands that do not set their own.
    pub thinking_time: u32,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of simultaneously active states per battler.
    pub const MAX_STATUS_EFFECTS: usize = 32;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_FRAMES_PER_SECOND: u32 = 60;
    pub const DEFAULT_HIGHER_Z_BONUS: i32 = 3;

    pub fn new() -> Self {
        Self {
            layer: LayerConfig::default(),
            passage_mode: PassageMode::default(),
            frames_per_second: Self::DEFAULT_FRAMES_PER_SECOND,
            higher_z_bonus: Self::DEFAULT_HIGHER_Z_BONUS,
            distance: DistanceMetric::default(),
            thinking_time: 0,
        }
    }

    pub fn with_layer(layer: LayerConfig) -> Self {
        Self {
            layer,
            ..Self::new()
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
