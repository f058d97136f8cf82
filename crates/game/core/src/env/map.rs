use crate::state::{Direction, Position};

bitflags::bitflags! {
    /// Tileset flag bits of a single tile.
    ///
    /// The low nibble blocks movement per direction (see
    /// [`Direction::passage_bit`]); `STAR` marks tiles drawn above characters
    /// that never affect passage.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct TileFlags: u16 {
        const BLOCK_DOWN = 0x0001;
        const BLOCK_LEFT = 0x0002;
        const BLOCK_RIGHT = 0x0004;
        const BLOCK_UP = 0x0008;
        const STAR = 0x0010;
        const LADDER = 0x0020;
        const BUSH = 0x0040;
        const COUNTER = 0x0080;
        const DAMAGE_FLOOR = 0x0100;

        const BLOCK_ALL = 0x000f;
    }
}

impl TileFlags {
    /// True when leaving/entering through `direction` is blocked.
    pub fn blocks(self, direction: Direction) -> bool {
        let bit = direction.passage_bit();
        self.bits() & bit == bit
    }
}

/// Static map oracle exposing immutable layout information.
pub trait MapOracle: Send + Sync {
    fn dimensions(&self) -> MapDimensions;
    fn tile(&self, position: Position) -> Option<StaticTile>;

    fn loops_horizontally(&self) -> bool {
        false
    }

    fn loops_vertically(&self) -> bool {
        false
    }

    fn contains(&self, position: Position) -> bool {
        self.dimensions().contains(position)
    }

    /// Wraps coordinates on looping axes; other axes are left untouched.
    fn round_position(&self, position: Position) -> Position {
        let dims = self.dimensions();
        let mut rounded = position;
        if self.loops_horizontally() && dims.width > 0 {
            rounded.x = position.x.rem_euclid(dims.width as i32);
        }
        if self.loops_vertically() && dims.height > 0 {
            rounded.y = position.y.rem_euclid(dims.height as i32);
        }
        rounded
    }

    /// Neighbouring tile in `direction`, wrapped on looping maps.
    fn neighbor(&self, position: Position, direction: Direction) -> Position {
        self.round_position(position.step(direction))
    }

    fn region_id(&self, position: Position) -> u16 {
        self.tile(position).map_or(0, |tile| tile.region_id)
    }

    fn terrain_tag(&self, position: Position) -> u16 {
        self.tile(position).map_or(0, |tile| tile.terrain_tag)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }

    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Immutable descriptor for a tile in the static layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StaticTile {
    pub region_id: u16,
    pub terrain_tag: u16,
    /// Combined flags of the ground layers, used for base passability.
    pub flags: TileFlags,
    /// Flags of the two upper tile layers; `None` for an empty layer.
    pub upper: [Option<TileFlags>; 2],
}

impl StaticTile {
    pub const fn new(region_id: u16, terrain_tag: u16) -> Self {
        Self {
            region_id,
            terrain_tag,
            flags: TileFlags::empty(),
            upper: [None, None],
        }
    }

    pub const fn floor() -> Self {
        Self::new(0, 0)
    }

    pub const fn wall() -> Self {
        Self {
            flags: TileFlags::BLOCK_ALL,
            ..Self::floor()
        }
    }

    #[must_use]
    pub const fn with_flags(mut self, flags: TileFlags) -> Self {
        self.flags = flags;
        self
    }

    #[must_use]
    pub const fn with_upper(mut self, upper: [Option<TileFlags>; 2]) -> Self {
        self.upper = upper;
        self
    }

    /// Whether a character may leave or enter this tile through `direction`.
    pub fn allows(self, direction: Direction) -> bool {
        !self.flags.blocks(direction)
    }

    pub fn is_damage_floor(self) -> bool {
        self.flags.contains(TileFlags::DAMAGE_FLOOR)
    }
}
