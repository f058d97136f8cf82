use std::collections::BTreeMap;

use super::{BattleStats, CharacterId, Direction, Position, TagId};
use crate::env::{CharacterMut, CharacterView};
use crate::layer::LayerState;

/// Plain character record: position, layer state, optional battle stats and
/// per-character tag values ("self variables").
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterState {
    pub id: CharacterId,
    pub position: Position,
    #[cfg_attr(feature = "serde", serde(default))]
    pub direction: Direction,
    #[cfg_attr(feature = "serde", serde(default))]
    pub layer: LayerState,
    #[cfg_attr(feature = "serde", serde(default))]
    pub battler: Option<BattleStats>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: BTreeMap<TagId, i32>,
    /// Through characters never block or get blocked.
    #[cfg_attr(feature = "serde", serde(default))]
    pub through: bool,
}

impl CharacterState {
    pub fn new(id: CharacterId, position: Position) -> Self {
        Self {
            id,
            position,
            direction: Direction::Down,
            layer: LayerState::Ground,
            battler: None,
            tags: BTreeMap::new(),
            through: false,
        }
    }

    #[must_use]
    pub fn with_battler(mut self, battler: BattleStats) -> Self {
        self.battler = Some(battler);
        self
    }

    #[must_use]
    pub fn with_layer(mut self, layer: LayerState) -> Self {
        self.layer = layer;
        self
    }

    #[must_use]
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Sets a tag value. Only map events carry tags; the call is ignored for
    /// any other character.
    #[must_use]
    pub fn with_tag(mut self, id: TagId, value: i32) -> Self {
        self.set_tag(id, value);
        self
    }

    pub fn set_tag(&mut self, id: TagId, value: i32) {
        if self.id.event_id().is_some() {
            self.tags.insert(id, value);
        }
    }
}

impl CharacterView for CharacterState {
    fn id(&self) -> CharacterId {
        self.id
    }

    fn position(&self) -> Position {
        self.position
    }

    fn layer_state(&self) -> LayerState {
        self.layer
    }

    fn battler(&self) -> Option<&BattleStats> {
        self.battler.as_ref()
    }

    fn tag(&self, id: TagId) -> Option<i32> {
        if self.id.event_id().is_none() {
            return None;
        }
        Some(self.tags.get(&id).copied().unwrap_or(0))
    }
}

impl CharacterMut for CharacterState {
    fn set_layer_state(&mut self, state: LayerState) {
        self.layer = state;
    }
}
