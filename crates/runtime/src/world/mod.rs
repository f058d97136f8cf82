//! Frame-driven world owning the characters of one map.
//!
//! Each [`World::step`] runs three phases in a fixed order:
//! 1. layer states of every character (vehicles included) are advanced
//! 2. context timers tick and mirror into the result slots
//! 3. every agent runs its scripted commands, in character id order
//!
//! Layer queries are delegated to [`LayerResolver`]; the world only decides
//! when to ask and where to write the answers.
mod combat;
mod commands;
mod movement;
mod vehicles;

use std::collections::BTreeMap;

use arpg_content::CommandSpec;
use arpg_core::{
    CharacterId, CharacterState, CharacterView, ContextTimers, GameConfig, GameError,
    LayerResolver, LayerState, MapOracle, MapSnapshot, Position, StaticTile, ThrottleTable, Tick,
    TimerEvent, TriggerKind, VehicleKind,
};

use crate::api::{FrameReport, Result, RuntimeError};
use crate::slots::ResultSlots;

/// A character on the map plus what the runtime tracks for it.
#[derive(Clone, Debug, PartialEq)]
pub struct Actor {
    pub state: CharacterState,
    pub timers: ContextTimers,
    /// Scripted commands run once per frame, in order.
    pub commands: Vec<CommandSpec>,
    /// How the event starts; `None` for characters that are not events.
    pub trigger: Option<TriggerKind>,
}

impl Actor {
    pub fn new(state: CharacterState) -> Self {
        Self {
            state,
            timers: ContextTimers::new(),
            commands: Vec::new(),
            trigger: None,
        }
    }

    #[must_use]
    pub fn with_commands(mut self, commands: Vec<CommandSpec>) -> Self {
        self.commands = commands;
        self
    }

    #[must_use]
    pub fn with_trigger(mut self, trigger: TriggerKind) -> Self {
        self.trigger = Some(trigger);
        self
    }
}

pub struct World {
    map: MapSnapshot,
    config: GameConfig,
    actors: BTreeMap<CharacterId, Actor>,
    frame: Tick,
    throttle: ThrottleTable,
    slots: ResultSlots,
    riding: Option<VehicleKind>,
}

impl World {
    pub fn new(map: MapSnapshot, config: GameConfig) -> Self {
        Self {
            map,
            config,
            actors: BTreeMap::new(),
            frame: Tick::ZERO,
            throttle: ThrottleTable::new(),
            slots: ResultSlots::new(),
            riding: None,
        }
    }

    pub fn layers(&self) -> LayerResolver<'_, MapSnapshot> {
        LayerResolver::new(&self.map, &self.config)
    }

    pub fn map(&self) -> &MapSnapshot {
        &self.map
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn tile(&self, position: Position) -> Result<StaticTile> {
        Ok(self.map.tile_at(self.map.round_position(position))?)
    }

    /// Replaces a tile, e.g. a collapsing bridge. Characters standing on it
    /// settle on the next [`World::step`].
    pub fn set_tile(&mut self, position: Position, tile: StaticTile) -> Result<()> {
        let position = self.map.round_position(position);
        self.map.set_tile(position, tile)?;
        tracing::debug!(
            %position,
            region = tile.region_id,
            terrain = tile.terrain_tag,
            "tile replaced"
        );
        Ok(())
    }

    /// Frame the next [`World::step`] will run.
    pub fn frame(&self) -> Tick {
        self.frame
    }

    pub fn slots(&self) -> &ResultSlots {
        &self.slots
    }

    pub fn slots_mut(&mut self) -> &mut ResultSlots {
        &mut self.slots
    }

    pub fn throttle(&self) -> &ThrottleTable {
        &self.throttle
    }

    /// Vehicle the player is currently piloting.
    pub fn riding(&self) -> Option<VehicleKind> {
        self.riding
    }

    pub fn actor(&self, id: CharacterId) -> Option<&Actor> {
        self.actors.get(&id)
    }

    pub fn actor_mut(&mut self, id: CharacterId) -> Option<&mut Actor> {
        self.actors.get_mut(&id)
    }

    pub fn character(&self, id: CharacterId) -> Option<&CharacterState> {
        self.actors.get(&id).map(|actor| &actor.state)
    }

    pub fn character_mut(&mut self, id: CharacterId) -> Option<&mut CharacterState> {
        self.actors.get_mut(&id).map(|actor| &mut actor.state)
    }

    /// Every character, in id order.
    pub fn characters(&self) -> impl Iterator<Item = &CharacterState> + '_ {
        self.actors.values().map(|actor| &actor.state)
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// Places a character on the map and settles its layer against the tile
    /// it stands on.
    pub fn spawn(&mut self, mut actor: Actor) -> Result<()> {
        let id = actor.state.id;
        if self.actors.contains_key(&id) {
            return Err(RuntimeError::DuplicateCharacter(id));
        }
        let layers = LayerResolver::new(&self.map, &self.config);
        match id {
            CharacterId::Vehicle(kind) => {
                actor.state.layer =
                    layers.update_vehicle(kind, actor.state.layer, actor.state.position);
            }
            _ => {
                layers.update_character(&mut actor.state);
            }
        }
        tracing::debug!(
            character = %id,
            position = %actor.state.position,
            layer = %actor.state.layer,
            "spawned"
        );
        self.actors.insert(id, actor);
        Ok(())
    }

    /// Removes a character together with its timers and throttle entries.
    pub fn despawn(&mut self, id: CharacterId) -> Result<Actor> {
        let actor = self
            .actors
            .remove(&id)
            .ok_or(RuntimeError::UnknownCharacter(id))?;
        self.throttle.forget(id);
        if let CharacterId::Vehicle(kind) = id {
            if self.riding == Some(kind) {
                self.riding = None;
            }
        }
        tracing::debug!(character = %id, "despawned");
        Ok(actor)
    }

    /// Advances the world by one frame.
    pub fn step(&mut self) -> FrameReport {
        let mut report = FrameReport::new(self.frame);
        self.update_layers(&mut report);
        self.tick_timers(&mut report);
        self.run_agents(&mut report);
        self.frame = self.frame + 1;
        report
    }

    fn update_layers(&mut self, report: &mut FrameReport) {
        let layers = LayerResolver::new(&self.map, &self.config);
        let piloting = self.riding;

        for actor in self.actors.values_mut() {
            let state = &mut actor.state;
            let changed = match state.id {
                CharacterId::Vehicle(kind) => {
                    let next = layers.update_vehicle(kind, state.layer, state.position);
                    (next != state.layer).then(|| {
                        state.layer = next;
                        next
                    })
                }
                CharacterId::Player if piloting.is_some() => None,
                _ => layers.update_character(state),
            };
            if let Some(layer) = changed {
                tracing::debug!(character = %state.id, %layer, "layer changed");
                report.layer_changes.push((state.id, layer));
            }
        }

        if let Some(kind) = piloting {
            self.sync_pilot(kind, report);
        }
    }

    /// The pilot sits on the vehicle's tile; in the airship it also shares
    /// the airship's elevation.
    fn sync_pilot(&mut self, kind: VehicleKind, report: &mut FrameReport) {
        let Some(vehicle) = self.character(CharacterId::Vehicle(kind)) else {
            return;
        };
        let (position, vehicle_layer) = (vehicle.position, vehicle.layer);
        let layers = LayerResolver::new(&self.map, &self.config);
        let Some(player) = self.actors.get_mut(&CharacterId::Player) else {
            return;
        };
        player.state.position = position;
        let next = if kind == VehicleKind::Airship {
            layers.piloting(vehicle_layer, position)
        } else {
            layers.update(player.state.layer, position)
        };
        if next != player.state.layer {
            player.state.layer = next;
            tracing::debug!(character = %CharacterId::Player, layer = %next, "pilot layer changed");
            report.layer_changes.push((CharacterId::Player, next));
        }
    }

    fn tick_timers(&mut self, report: &mut FrameReport) {
        for (id, actor) in self.actors.iter_mut() {
            for event in actor.timers.tick() {
                self.slots.apply_timer(&event);
                if let TimerEvent::Finished { key, .. } = event {
                    tracing::debug!(character = %id, timer = %key, "timer finished");
                    report.finished_timers.push((*id, key));
                }
            }
        }
    }

    fn run_agents(&mut self, report: &mut FrameReport) {
        let agents: Vec<CharacterId> = self
            .actors
            .iter()
            .filter(|(_, actor)| !actor.commands.is_empty())
            .map(|(id, _)| *id)
            .collect();

        for agent in agents {
            let Some(actor) = self.actors.get_mut(&agent) else {
                continue;
            };
            let commands = std::mem::take(&mut actor.commands);
            for command in &commands {
                match self.run_command(agent, command) {
                    Ok(outcome) => report.commands.push((agent, outcome)),
                    Err(error) => {
                        tracing::warn!(
                            %agent,
                            command = command.name(),
                            code = error.error_code(),
                            severity = error.severity().as_str(),
                            %error,
                            "command skipped"
                        );
                        report.failures += 1;
                    }
                }
            }
            if let Some(actor) = self.actors.get_mut(&agent) {
                actor.commands = commands;
            }
        }
    }

    /// Places a character directly on a tile and recomputes its layer from
    /// that tile, without carrying elevation over from where it stood.
    ///
    /// The followers travel with the player. Moving the piloted vehicle, or
    /// its pilot, moves both of them.
    pub fn teleport(&mut self, id: CharacterId, position: Position) -> Result<LayerState> {
        if !self.actors.contains_key(&id) {
            return Err(RuntimeError::UnknownCharacter(id));
        }
        let position = self.map.round_position(position);
        let piloted = self
            .riding
            .filter(|&kind| id.is_player() || id == CharacterId::Vehicle(kind));

        match (id, piloted) {
            (_, Some(kind)) => self.move_piloted(kind, position),
            (CharacterId::Vehicle(kind), None) => {
                let layers = LayerResolver::new(&self.map, &self.config);
                if let Some(vehicle) = self.actors.get_mut(&id) {
                    vehicle.state.position = position;
                    vehicle.state.layer =
                        layers.update_vehicle(kind, vehicle.state.layer, position);
                }
            }
            (CharacterId::Player, None) => self.locate_party(position),
            _ => {
                let layers = LayerResolver::new(&self.map, &self.config);
                if let Some(actor) = self.actors.get_mut(&id) {
                    actor.state.position = position;
                    layers.locate_character(&mut actor.state);
                }
            }
        }

        let layer = self
            .character(id)
            .map(|character| character.layer)
            .ok_or(RuntimeError::UnknownCharacter(id))?;
        tracing::debug!(character = %id, %position, %layer, "teleported");
        Ok(layer)
    }

    /// Puts the player and every follower on `position` and recomputes their
    /// layers from the tile alone.
    fn locate_party(&mut self, position: Position) {
        let layers = LayerResolver::new(&self.map, &self.config);
        let party = self.actors.values_mut().filter(|actor| {
            matches!(actor.state.id, CharacterId::Player | CharacterId::Follower(_))
        });
        for actor in party {
            actor.state.position = position;
            layers.locate_character(&mut actor.state);
        }
    }

    /// Moves the piloted vehicle together with the player.
    fn move_piloted(&mut self, kind: VehicleKind, position: Position) {
        let layers = LayerResolver::new(&self.map, &self.config);
        let vehicle_layer = self
            .actors
            .get_mut(&CharacterId::Vehicle(kind))
            .map(|vehicle| {
                vehicle.state.position = position;
                vehicle.state.layer = layers.update_vehicle(kind, vehicle.state.layer, position);
                vehicle.state.layer
            });
        if let Some(player) = self.actors.get_mut(&CharacterId::Player) {
            player.state.position = position;
            player.state.layer = match (kind, vehicle_layer) {
                (VehicleKind::Airship, Some(layer)) => layers.piloting(layer, position),
                _ => layers.locate(position),
            };
        }
    }

    /// Whether `event` may start now. Contact triggers need the player on a
    /// compatible layer.
    pub fn event_may_start(&self, event: u32) -> bool {
        let Some(actor) = self.actors.get(&CharacterId::Event(event)) else {
            return false;
        };
        let Some(trigger) = actor.trigger else {
            return false;
        };
        self.layers()
            .may_start_event(&actor.state, trigger, self.character(CharacterId::Player))
    }

    /// Sprite z order of `id` given the engine's base value.
    pub fn screen_z(&self, id: CharacterId, base: i32) -> Option<i32> {
        let character = self.character(id)?;
        Some(self.layers().screen_z(base, character.layer_state()))
    }

    pub fn bush_depth(&self, id: CharacterId, base: u32) -> Option<u32> {
        let character = self.character(id)?;
        Some(self.layers().bush_depth(base, character.layer_state()))
    }

    pub fn on_damage_floor(&self, id: CharacterId) -> bool {
        self.character(id)
            .is_some_and(|character| self.layers().on_damage_floor(character))
    }
}
