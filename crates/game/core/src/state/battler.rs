//! Battle capability attached to characters that can fight.
//!
//! A character without [`BattleStats`] is not a battler: targeting queries skip
//! it and condition checks never pass for it.

use arrayvec::ArrayVec;

use crate::config::GameConfig;

/// Database id of a status effect ("state").
pub type StateId = u16;

/// Side a battler fights for. Opponent/friend relations derive from it.
#[derive(
    Clone,
    Copy,
    Debug,
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
pub enum Side {
    /// Party members (player and followers).
    Actor,
    /// Hostile battlers hosted by map events.
    Enemy,
}

impl Side {
    pub fn is_opponent_of(self, other: Side) -> bool {
        self != other
    }

    pub fn is_friend_of(self, other: Side) -> bool {
        self == other
    }
}

/// Integer resource meter (HP, MP, TP).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    pub current: u32,
    pub maximum: u32,
}

impl ResourceMeter {
    pub fn new(current: u32, maximum: u32) -> Self {
        Self {
            current: current.min(maximum),
            maximum,
        }
    }

    pub fn full(maximum: u32) -> Self {
        Self::new(maximum, maximum)
    }

    /// Fill ratio in `0.0..=1.0`; an empty pool (max 0) reports 0.
    pub fn rate(&self) -> f64 {
        if self.maximum == 0 {
            0.0
        } else {
            f64::from(self.current) / f64::from(self.maximum)
        }
    }
}

/// Set of active status-effect ids.
///
/// Bounded like every other per-actor collection; adding beyond capacity is
/// ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusSet {
    states: ArrayVec<StateId, { GameConfig::MAX_STATUS_EFFECTS }>,
}

impl StatusSet {
    pub fn empty() -> Self {
        Self {
            states: ArrayVec::new(),
        }
    }

    pub fn from_ids(ids: impl IntoIterator<Item = StateId>) -> Self {
        let mut set = Self::empty();
        for id in ids {
            set.add(id);
        }
        set
    }

    pub fn contains(&self, id: StateId) -> bool {
        self.states.contains(&id)
    }

    /// Adds a state. Returns false if it was already present or the set is full.
    pub fn add(&mut self, id: StateId) -> bool {
        if self.contains(id) || self.states.is_full() {
            return false;
        }
        self.states.push(id);
        true
    }

    /// Removes a state. Returns true if it was present.
    pub fn remove(&mut self, id: StateId) -> bool {
        let before = self.states.len();
        self.states.retain(|s| *s != id);
        before != self.states.len()
    }

    /// True when every id is present. Vacuously true for an empty list.
    pub fn has_all(&self, ids: &[StateId]) -> bool {
        ids.iter().all(|id| self.contains(*id))
    }

    /// True when at least one id is present. False for an empty list.
    pub fn has_any(&self, ids: &[StateId]) -> bool {
        ids.iter().any(|id| self.contains(*id))
    }

    pub fn iter(&self) -> impl Iterator<Item = StateId> + '_ {
        self.states.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

/// Battle-relevant view of a character.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleStats {
    pub side: Side,
    pub hp: ResourceMeter,
    #[cfg_attr(feature = "serde", serde(default))]
    pub mp: ResourceMeter,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tp: ResourceMeter,
    #[cfg_attr(feature = "serde", serde(default))]
    pub states: StatusSet,
}

impl BattleStats {
    /// State id the database reserves for knock-out.
    pub const DEATH_STATE: StateId = 1;

    pub fn new(side: Side, hp: ResourceMeter) -> Self {
        Self {
            side,
            hp,
            mp: ResourceMeter::default(),
            tp: ResourceMeter::new(0, 100),
            states: StatusSet::empty(),
        }
    }

    #[must_use]
    pub fn with_mp(mut self, mp: ResourceMeter) -> Self {
        self.mp = mp;
        self
    }

    #[must_use]
    pub fn with_tp(mut self, tp: ResourceMeter) -> Self {
        self.tp = tp;
        self
    }

    #[must_use]
    pub fn with_states(mut self, ids: impl IntoIterator<Item = StateId>) -> Self {
        for id in ids {
            self.states.add(id);
        }
        self
    }

    pub fn is_alive(&self) -> bool {
        self.hp.current > 0 && !self.states.contains(Self::DEATH_STATE)
    }

    pub fn is_state_affected(&self, id: StateId) -> bool {
        self.states.contains(id)
    }

    pub fn hp_rate(&self) -> f64 {
        self.hp.rate()
    }

    pub fn mp_rate(&self) -> f64 {
        self.mp.rate()
    }

    pub fn tp_rate(&self) -> f64 {
        self.tp.rate()
    }
}
