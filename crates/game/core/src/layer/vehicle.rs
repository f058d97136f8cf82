//! Vehicle layering: boarding, landing and the airship's fixed elevation.

use super::{LayerLevel, LayerResolver, LayerState};
use crate::env::{CharacterView, MapOracle, OccupancyOracle, TileFlags};
use crate::state::{Direction, Position, VehicleKind};

impl<M: MapOracle + ?Sized> LayerResolver<'_, M> {
    /// Per-frame update for a vehicle. The airship never leaves the bridge
    /// plane; boats and ships follow the walking rules.
    pub fn update_vehicle(
        &self,
        kind: VehicleKind,
        current: LayerState,
        position: Position,
    ) -> LayerState {
        let tile = self.classify(position);
        match kind {
            VehicleKind::Airship => LayerState::from_parts(true, tile.overpass),
            VehicleKind::Boat | VehicleKind::Ship => {
                let next = current.step(tile);
                if tile.is_layered() && next.level() > LayerLevel::GROUND {
                    next
                } else {
                    LayerState::from_parts(false, tile.overpass)
                }
            }
        }
    }

    /// State of a pilot mirroring the elevation of the airship it flies.
    pub fn piloting(&self, vehicle: LayerState, position: Position) -> LayerState {
        vehicle.on_tile(self.classify(position))
    }

    /// Whether `player` may interact with (board) `vehicle` at `target`.
    ///
    /// Requires a shared plane, except for an airship parked on a bridge while
    /// the player stands on the ground, which only compares positions.
    pub fn boardable_at<V, P>(
        &self,
        kind: VehicleKind,
        vehicle: &V,
        player: &P,
        target: Position,
    ) -> bool
    where
        V: CharacterView + ?Sized,
        P: CharacterView + ?Sized,
    {
        let at_target =
            self.map.round_position(vehicle.position()) == self.map.round_position(target);
        if kind == VehicleKind::Airship
            && self.level(player) == LayerLevel::GROUND
            && self.level(vehicle) == LayerLevel::BRIDGE
        {
            return at_target;
        }
        self.same_layer(vehicle, Some(player)) && at_target
    }

    /// Airship landing: the tile is an overpass, nobody occupies it on the
    /// bridge plane, and the upper tile layers do not block entry.
    pub fn airship_can_land<O: OccupancyOracle + ?Sized>(
        &self,
        position: Position,
        occupancy: &O,
    ) -> bool {
        if !self.is_overpass(position) {
            return false;
        }
        if occupancy
            .occupant_levels(position)
            .into_iter()
            .any(|level| level == LayerLevel::BRIDGE)
        {
            return false;
        }
        self.overpass_landing_passable(position)
    }

    /// Upper-layer flag check for landing. Entry is always taken as coming
    /// from direction "down"; empty layers and star tiles are skipped.
    pub fn overpass_landing_passable(&self, position: Position) -> bool {
        let Some(tile) = self.map.tile(self.map.round_position(position)) else {
            return true;
        };
        tile.upper
            .iter()
            .flatten()
            .filter(|flags| !flags.contains(TileFlags::STAR))
            .all(|flags| !flags.blocks(Direction::Down))
    }

    /// Boat / ship landing: the neighbouring tile exists, can be entered from
    /// the vehicle's side, and is free of characters sharing the vehicle's plane.
    pub fn ship_can_land<V, O>(&self, vehicle: &V, direction: Direction, occupancy: &O) -> bool
    where
        V: CharacterView + ?Sized,
        O: OccupancyOracle + ?Sized,
    {
        let target = self.map.neighbor(vehicle.position(), direction);
        if !self.map.contains(target) {
            return false;
        }
        let Some(tile) = self.map.tile(target) else {
            return false;
        };
        if !tile.allows(direction.reverse()) {
            return false;
        }
        let level = self.level(vehicle);
        !occupancy
            .occupant_levels(target)
            .into_iter()
            .any(|other| level.compatible(other))
    }

    /// Landing check dispatched on vehicle kind.
    pub fn vehicle_can_land<V, O>(
        &self,
        kind: VehicleKind,
        vehicle: &V,
        direction: Direction,
        occupancy: &O,
    ) -> bool
    where
        V: CharacterView + ?Sized,
        O: OccupancyOracle + ?Sized,
    {
        match kind {
            VehicleKind::Airship => self.airship_can_land(vehicle.position(), occupancy),
            VehicleKind::Boat | VehicleKind::Ship => {
                self.ship_can_land(vehicle, direction, occupancy)
            }
        }
    }
}
