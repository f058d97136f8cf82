use core::fmt;

use super::TileClass;

/// Vertical plane a character occupies.
///
/// The state is the pair *(elevated, on overpass tile)*. `elevated` is the
/// hysteresis bit: it is set by stepping onto a gateway, cleared by stepping
/// onto a tile that is neither gateway nor overpass, and carried unchanged
/// across plain overpass tiles.
///
/// | current \ entered tile | plain    | overpass            | gateway | overpass + gateway |
/// |------------------------|----------|---------------------|---------|--------------------|
/// | `Ground`               | `Ground` | `Underpass`         | `Gateway` | `Bridge`         |
/// | `Underpass`            | `Ground` | `Underpass`         | `Gateway` | `Bridge`         |
/// | `Gateway`              | `Ground` | `Bridge`            | `Gateway` | `Bridge`         |
/// | `Bridge`               | `Ground` | `Bridge`            | `Gateway` | `Bridge`         |
///
/// [`LayerState::locate`] ignores the current state and treats any layered
/// tile as elevated; it is used after teleports and disembarking.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LayerState {
    /// Not elevated, off any overpass tile.
    #[default]
    Ground,
    /// Not elevated, standing on an overpass tile (walking below the bridge).
    Underpass,
    /// Elevated, off any overpass tile (on the entrance).
    Gateway,
    /// Elevated and standing on an overpass tile.
    Bridge,
}

impl LayerState {
    pub const fn from_parts(elevated: bool, on_overpass: bool) -> Self {
        match (elevated, on_overpass) {
            (false, false) => LayerState::Ground,
            (false, true) => LayerState::Underpass,
            (true, false) => LayerState::Gateway,
            (true, true) => LayerState::Bridge,
        }
    }

    /// True when the character occupies the bridge plane.
    pub const fn is_elevated(self) -> bool {
        matches!(self, LayerState::Gateway | LayerState::Bridge)
    }

    pub const fn on_overpass(self) -> bool {
        matches!(self, LayerState::Underpass | LayerState::Bridge)
    }

    /// Hysteresis transition after the character entered a tile of class `tile`.
    #[must_use]
    pub const fn step(self, tile: TileClass) -> Self {
        let elevated = if tile.gateway {
            true
        } else if !tile.overpass {
            false
        } else {
            self.is_elevated()
        };
        Self::from_parts(elevated, tile.overpass)
    }

    /// Unconditional recompute from the tile alone.
    pub const fn locate(tile: TileClass) -> Self {
        Self::from_parts(tile.overpass || tile.gateway, tile.overpass)
    }

    /// Same elevation bit, re-evaluated against the tile actually stood on.
    #[must_use]
    pub const fn on_tile(self, tile: TileClass) -> Self {
        Self::from_parts(self.is_elevated(), tile.overpass)
    }

    pub const fn level(self) -> LayerLevel {
        match self {
            LayerState::Underpass => LayerLevel::UNDERPASS,
            LayerState::Ground => LayerLevel::GROUND,
            LayerState::Gateway => LayerLevel::GATEWAY,
            LayerState::Bridge => LayerLevel::BRIDGE,
        }
    }
}

/// Integer layer level: -1 underpass, 0 ground, 1 gateway, 2 bridge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayerLevel(i8);

impl LayerLevel {
    pub const UNDERPASS: Self = Self(-1);
    pub const GROUND: Self = Self(0);
    pub const GATEWAY: Self = Self(1);
    pub const BRIDGE: Self = Self(2);

    pub const ALL: [LayerLevel; 4] = [
        LayerLevel::UNDERPASS,
        LayerLevel::GROUND,
        LayerLevel::GATEWAY,
        LayerLevel::BRIDGE,
    ];

    pub const fn value(self) -> i8 {
        self.0
    }

    pub const fn from_value(value: i8) -> Option<Self> {
        match value {
            -1..=2 => Some(Self(value)),
            _ => None,
        }
    }

    /// Levels may interact when equal; ground and underpass share a plane.
    pub const fn compatible(self, other: LayerLevel) -> bool {
        self.0 == other.0 || matches!((self.0, other.0), (0, -1) | (-1, 0))
    }
}

impl fmt::Display for LayerLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
