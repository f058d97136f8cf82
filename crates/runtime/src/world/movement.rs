//! Tile movement through the layer-aware passage chain.

use arpg_core::{
    CharacterId, CharacterState, Direction, LayerLevel, LayerResolver, MapOracle, MapSnapshot,
    OccupancyOracle, OverpassPassage, PassageQuery, Passability, Position, TilePassability,
};

use super::World;
use crate::api::{Result, RuntimeError};

impl World {
    /// Moves `id` one tile towards `direction`.
    ///
    /// Returns `Ok(false)` when the map or another character on a compatible
    /// layer blocks the step. The player cannot walk while piloting; use
    /// [`World::steer`] instead.
    pub fn try_move(&mut self, id: CharacterId, direction: Direction) -> Result<bool> {
        if id.is_player() && self.riding.is_some() {
            return Err(RuntimeError::Riding(id));
        }
        let mover = self
            .character(id)
            .ok_or(RuntimeError::UnknownCharacter(id))?;
        let Some(target) = self.passable_target(mover, direction) else {
            tracing::debug!(character = %id, ?direction, "move blocked");
            return Ok(false);
        };
        self.finish_move(id, direction, target);
        Ok(true)
    }

    pub(crate) fn passable_target(&self, mover: &CharacterState, direction: Direction) -> Option<Position> {
        let layers = self.layers();
        let query = PassageQuery::new(mover.position, direction, mover.layer);
        let passage = OverpassPassage::new(layers, TilePassability::new(&self.map));
        if !mover.through && !passage.passable(&query) {
            return None;
        }
        let target = self.map.neighbor(mover.position, direction);
        if !self.map.contains(target) {
            return None;
        }
        if !mover.through && self.collides_at(&layers, mover, target) {
            return None;
        }
        Some(target)
    }

    fn finish_move(&mut self, id: CharacterId, direction: Direction, target: Position) {
        let layers = LayerResolver::new(&self.map, &self.config);
        let Some(actor) = self.actors.get_mut(&id) else {
            return;
        };
        actor.state.position = target;
        actor.state.direction = direction;
        if let Some(layer) = layers.update_character(&mut actor.state) {
            tracing::debug!(character = %id, %layer, "layer changed on move");
        }
    }

    /// Whether a non-through character on a compatible layer stands on
    /// `target`. Vehicles never block walkers.
    fn collides_at(
        &self,
        layers: &LayerResolver<'_, MapSnapshot>,
        mover: &CharacterState,
        target: Position,
    ) -> bool {
        let others: Vec<&CharacterState> = self
            .characters_at(target)
            .filter(|other| other.id != mover.id && !other.through)
            .filter(|other| !matches!(other.id, CharacterId::Vehicle(_)))
            .collect();

        let events: Vec<&CharacterState> = others
            .iter()
            .copied()
            .filter(|other| other.id.event_id().is_some())
            .collect();
        if layers.collides_with_events(mover, !events.is_empty(), events.iter().copied()) {
            return true;
        }
        others
            .iter()
            .filter(|other| other.id.event_id().is_none())
            .any(|party| layers.event_collides_with_player(mover, Some(*party), true))
    }

    /// Characters whose (wrapped) position is `position`.
    pub fn characters_at(&self, position: Position) -> impl Iterator<Item = &CharacterState> + '_ {
        let position = self.map.round_position(position);
        self.characters()
            .filter(move |character| self.map.round_position(character.position) == position)
    }
}

/// Walkers on a tile, by layer level. The player is excluded while piloting
/// since it sits inside the vehicle.
impl OccupancyOracle for World {
    fn occupant_levels(&self, position: Position) -> Vec<LayerLevel> {
        let layers = self.layers();
        self.characters_at(position)
            .filter(|character| !character.through)
            .filter(|character| !matches!(character.id, CharacterId::Vehicle(_)))
            .filter(|character| !(character.id.is_player() && self.riding.is_some()))
            .map(|character| layers.level(character))
            .collect()
    }
}
