//! Scenario system for character placement and world initialization.
//!
//! Scenarios define which map to use and who stands where. This keeps the
//! map data static: the same map can host different placements, and the map
//! loader never needs to know about characters.

use std::collections::BTreeMap;
use std::path::Path;

use arpg_content::CommandSpec;
use arpg_core::{
    BattleStats, CharacterId, CharacterState, Direction, GameConfig, LayerState, MapSnapshot,
    Position, TagId, TriggerKind,
};
use serde::{Deserialize, Serialize};

use crate::api::{Result, RuntimeError};
use crate::world::{Actor, World};

/// One character placed by a scenario.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub id: CharacterId,
    pub position: Position,
    #[serde(default)]
    pub direction: Direction,
    /// Starting layer before the first update; usually left at ground.
    #[serde(default)]
    pub layer: LayerState,
    #[serde(default)]
    pub battler: Option<BattleStats>,
    /// Tag values; only events may carry them.
    #[serde(default)]
    pub tags: BTreeMap<TagId, i32>,
    #[serde(default)]
    pub through: bool,
    #[serde(default)]
    pub trigger: Option<TriggerKind>,
    #[serde(default)]
    pub commands: Vec<CommandSpec>,
}

impl Placement {
    pub fn new(id: CharacterId, position: Position) -> Self {
        Self {
            id,
            position,
            direction: Direction::default(),
            layer: LayerState::default(),
            battler: None,
            tags: BTreeMap::new(),
            through: false,
            trigger: None,
            commands: Vec::new(),
        }
    }

    fn to_actor(&self) -> Result<Actor> {
        if !self.tags.is_empty() && self.id.event_id().is_none() {
            return Err(RuntimeError::InvalidScenario(format!(
                "{} cannot carry tags",
                self.id
            )));
        }
        let mut state = CharacterState::new(self.id, self.position)
            .with_direction(self.direction)
            .with_layer(self.layer);
        state.battler = self.battler.clone();
        state.through = self.through;
        for (id, value) in &self.tags {
            state.set_tag(*id, *value);
        }

        let mut actor = Actor::new(state).with_commands(self.commands.clone());
        actor.trigger = self.trigger;
        Ok(actor)
    }
}

/// Scenario configuration for world initialization.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Map identifier to load
    pub map_id: String,

    /// Character placements for this scenario
    pub placements: Vec<Placement>,
}

impl Scenario {
    pub fn new(map_id: String, placements: Vec<Placement>) -> Self {
        Self {
            map_id,
            placements,
        }
    }

    /// Builds a world on `map` with every placement spawned.
    pub fn create_world(&self, map: MapSnapshot, config: GameConfig) -> Result<World> {
        let mut world = World::new(map, config);

        tracing::info!(
            map = %self.map_id,
            placements = self.placements.len(),
            "creating world from scenario"
        );

        for placement in &self.placements {
            if !world.map().dimensions.contains(placement.position) {
                return Err(RuntimeError::InvalidScenario(format!(
                    "{} placed outside the map at {}",
                    placement.id, placement.position
                )));
            }
            world.spawn(placement.to_actor()?)?;
        }

        Ok(world)
    }

    /// Load scenario from a RON file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| RuntimeError::ScenarioIo {
            path: path.to_path_buf(),
            source,
        })?;

        ron::from_str(&content).map_err(|source| RuntimeError::ScenarioParse {
            path: path.to_path_buf(),
            source,
        })
    }
}
