//! Boarding, steering and leaving vehicles.

use arpg_core::{CharacterId, Direction, LayerResolver, MapOracle, VehicleKind};

use super::World;
use crate::api::{Result, RuntimeError};

impl World {
    /// Boards the vehicle of `kind`. Boats and ships are boarded from the
    /// tile in front of the player, the airship from the tile below it.
    pub fn board(&mut self, kind: VehicleKind) -> Result<()> {
        if self.riding.is_some() {
            return Err(RuntimeError::Riding(CharacterId::Player));
        }
        let player = self
            .character(CharacterId::Player)
            .ok_or(RuntimeError::UnknownCharacter(CharacterId::Player))?;
        let vehicle_id = CharacterId::Vehicle(kind);
        let vehicle = self
            .character(vehicle_id)
            .ok_or(RuntimeError::UnknownCharacter(vehicle_id))?;

        let target = match kind {
            VehicleKind::Airship => player.position,
            VehicleKind::Boat | VehicleKind::Ship => {
                self.map.neighbor(player.position, player.direction)
            }
        };
        if !self.layers().boardable_at(kind, vehicle, player, target) {
            return Err(RuntimeError::NoVehicle(kind, target));
        }

        let position = vehicle.position;
        if let Some(player) = self.character_mut(CharacterId::Player) {
            player.position = position;
        }
        self.riding = Some(kind);
        tracing::debug!(vehicle = %kind, %position, "boarded");
        Ok(())
    }

    /// Moves the piloted vehicle one tile. The airship flies over anything
    /// inside the map; boats and ships use the passage chain.
    pub fn steer(&mut self, direction: Direction) -> Result<bool> {
        let kind = self.riding.ok_or(RuntimeError::NotRiding)?;
        let id = CharacterId::Vehicle(kind);
        let vehicle = self
            .character(id)
            .ok_or(RuntimeError::UnknownCharacter(id))?;

        let target = if kind == VehicleKind::Airship {
            let target = self.map.neighbor(vehicle.position, direction);
            self.map.contains(target).then_some(target)
        } else {
            self.passable_target(vehicle, direction)
        };
        let Some(target) = target else {
            return Ok(false);
        };

        let layers = LayerResolver::new(&self.map, &self.config);
        if let Some(vehicle) = self.actors.get_mut(&id) {
            vehicle.state.position = target;
            vehicle.state.direction = direction;
            vehicle.state.layer = layers.update_vehicle(kind, vehicle.state.layer, target);
        }
        if let Some(player) = self.actors.get_mut(&CharacterId::Player) {
            player.state.position = target;
            player.state.direction = direction;
        }
        Ok(true)
    }

    /// Leaves the piloted vehicle if it can land here.
    ///
    /// Leaving the airship re-locates the player and the followers from
    /// scratch, so stepping off onto a bridge lands on top of it.
    pub fn disembark(&mut self) -> Result<bool> {
        let kind = self.riding.ok_or(RuntimeError::NotRiding)?;
        let id = CharacterId::Vehicle(kind);
        let vehicle = self
            .character(id)
            .ok_or(RuntimeError::UnknownCharacter(id))?;
        let direction = self
            .character(CharacterId::Player)
            .map_or(Direction::Down, |player| player.direction);

        if !self
            .layers()
            .vehicle_can_land(kind, vehicle, direction, self)
        {
            tracing::debug!(vehicle = %kind, position = %vehicle.position, "landing refused");
            return Ok(false);
        }

        let origin = vehicle.position;
        self.riding = None;

        match kind {
            VehicleKind::Airship => {
                self.locate_party(origin);
                if let Some(player) = self.actors.get_mut(&CharacterId::Player) {
                    player.state.direction = Direction::Down;
                }
            }
            VehicleKind::Boat | VehicleKind::Ship => {
                let target = self.map.neighbor(origin, direction);
                let layers = LayerResolver::new(&self.map, &self.config);
                if let Some(player) = self.actors.get_mut(&CharacterId::Player) {
                    player.state.position = target;
                    layers.update_character(&mut player.state);
                }
            }
        }
        tracing::debug!(vehicle = %kind, "disembarked");
        Ok(true)
    }
}
