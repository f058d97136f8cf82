use std::fmt;

/// Kinds of vehicle a map can host.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum VehicleKind {
    Boat,
    Ship,
    Airship,
}

/// Identity of a character on the current map.
///
/// Only events carry a stable numeric id; the player and followers are
/// addressed by role.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CharacterId {
    Player,
    Follower(u8),
    Event(u32),
    Vehicle(VehicleKind),
}

impl CharacterId {
    /// Returns the stable event id, if this character is a map event.
    #[inline]
    pub const fn event_id(self) -> Option<u32> {
        match self {
            CharacterId::Event(id) => Some(id),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_player(self) -> bool {
        matches!(self, CharacterId::Player)
    }

    /// Numeric kind written into result slots by search commands.
    ///
    /// 1 = player, 2 = follower, 3 = event, 0 = anything else.
    pub const fn kind_code(self) -> i32 {
        match self {
            CharacterId::Player => 1,
            CharacterId::Follower(_) => 2,
            CharacterId::Event(_) => 3,
            CharacterId::Vehicle(_) => 0,
        }
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharacterId::Player => write!(f, "player"),
            CharacterId::Follower(index) => write!(f, "follower#{}", index),
            CharacterId::Event(id) => write!(f, "event#{}", id),
            CharacterId::Vehicle(kind) => write!(f, "{}", kind),
        }
    }
}

/// Discrete grid position expressed in tile coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Position one tile away in the given direction. Map looping is left to
    /// the map; coordinates saturate at the `i32` bounds.
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Monotonic global frame counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Self = Self(0);

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Frames elapsed since `earlier`, saturating at zero.
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub<u64> for Tick {
    type Output = Tick;
    fn sub(self, rhs: u64) -> Tick {
        Tick(self.0 - rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Facing / movement direction using numeric-keypad codes (2, 4, 6, 8).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Direction {
    #[default]
    Down,
    Left,
    Right,
    Up,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Down,
        Direction::Left,
        Direction::Right,
        Direction::Up,
    ];

    pub const fn code(self) -> u8 {
        match self {
            Direction::Down => 2,
            Direction::Left => 4,
            Direction::Right => 6,
            Direction::Up => 8,
        }
    }

    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            2 => Some(Direction::Down),
            4 => Some(Direction::Left),
            6 => Some(Direction::Right),
            8 => Some(Direction::Up),
            _ => None,
        }
    }

    pub const fn reverse(self) -> Self {
        match self {
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
        }
    }

    /// Screen-space delta: y grows downwards.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
        }
    }

    /// Passage bit blocking movement in this direction: `1 << (code / 2 - 1)`.
    pub const fn passage_bit(self) -> u16 {
        1 << (self.code() / 2 - 1)
    }
}
