use super::{LayerLevel, LayerState, PassageMode, PassageQuery, TileClass};
use crate::config::GameConfig;
use crate::env::{CharacterMut, CharacterView, MapOracle};
use crate::state::Position;

/// Layer queries over a map and its classification rules.
///
/// Cheap to copy; borrows both the map and the configuration.
#[derive(Debug)]
pub struct LayerResolver<'a, M: MapOracle + ?Sized> {
    pub(super) map: &'a M,
    pub(super) config: &'a GameConfig,
}

impl<M: MapOracle + ?Sized> Clone for LayerResolver<'_, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: MapOracle + ?Sized> Copy for LayerResolver<'_, M> {}

impl<'a, M: MapOracle + ?Sized> LayerResolver<'a, M> {
    pub fn new(map: &'a M, config: &'a GameConfig) -> Self {
        Self { map, config }
    }

    pub fn map(&self) -> &'a M {
        self.map
    }

    pub fn config(&self) -> &'a GameConfig {
        self.config
    }

    /// Classifies the tile at `position`.
    ///
    /// Coordinates wrap on looping axes first; anything still outside the
    /// map is plain.
    pub fn classify(&self, position: Position) -> TileClass {
        let position = self.map.round_position(position);
        if !self.map.contains(position) {
            return TileClass::PLAIN;
        }
        let region = self.map.region_id(position);
        let tag = self.map.terrain_tag(position);
        let rules = &self.config.layer;
        TileClass {
            overpass: rules.overpass.matches(region, tag),
            gateway: rules.gateway.matches(region, tag),
        }
    }

    pub fn is_overpass(&self, position: Position) -> bool {
        self.classify(position).overpass
    }

    pub fn is_gateway(&self, position: Position) -> bool {
        self.classify(position).gateway
    }

    /// Per-frame hysteresis update for a character standing on `position`.
    pub fn update(&self, current: LayerState, position: Position) -> LayerState {
        current.step(self.classify(position))
    }

    /// Recomputes the state from the tile alone, dropping any carried elevation.
    pub fn locate(&self, position: Position) -> LayerState {
        LayerState::locate(self.classify(position))
    }

    /// Applies [`update`](Self::update) to a character. Returns the new state
    /// when it changed.
    pub fn update_character<C: CharacterMut + ?Sized>(
        &self,
        character: &mut C,
    ) -> Option<LayerState> {
        let before = character.layer_state();
        let after = self.update(before, character.position());
        self.write_back(character, before, after)
    }

    /// Applies [`locate`](Self::locate) to a character. Returns the new state
    /// when it changed.
    pub fn locate_character<C: CharacterMut + ?Sized>(
        &self,
        character: &mut C,
    ) -> Option<LayerState> {
        let before = character.layer_state();
        let after = self.locate(character.position());
        self.write_back(character, before, after)
    }

    fn write_back<C: CharacterMut + ?Sized>(
        &self,
        character: &mut C,
        before: LayerState,
        after: LayerState,
    ) -> Option<LayerState> {
        if before == after {
            return None;
        }
        character.set_layer_state(after);
        Some(after)
    }

    /// Effective state: the character's elevation bit against the tile it
    /// currently stands on.
    pub fn effective_state<C: CharacterView + ?Sized>(&self, character: &C) -> LayerState {
        character
            .layer_state()
            .on_tile(self.classify(character.position()))
    }

    pub fn level<C: CharacterView + ?Sized>(&self, character: &C) -> LayerLevel {
        self.effective_state(character).level()
    }

    /// Whether `a` and `b` share a plane. A missing partner never matches.
    pub fn same_layer<A, B>(&self, a: &A, b: Option<&B>) -> bool
    where
        A: CharacterView + ?Sized,
        B: CharacterView + ?Sized,
    {
        match b {
            Some(b) => self.level(a).compatible(self.level(b)),
            None => false,
        }
    }

    /// Character-to-character collision is only possible on a shared plane.
    pub fn can_collide<A, B>(&self, a: &A, b: &B) -> bool
    where
        A: CharacterView + ?Sized,
        B: CharacterView + ?Sized,
    {
        self.same_layer(a, Some(b))
    }

    /// Layer verdict for one movement step.
    ///
    /// `None` means the layer rules do not apply and the caller falls back to
    /// the terrain rule.
    pub fn can_enter(&self, query: &PassageQuery) -> Option<bool> {
        let to = self.map.neighbor(query.from, query.direction);
        let here = self.classify(query.from);
        let next = self.classify(to);

        if here.gateway && next.overpass {
            return Some(true);
        }
        if here.overpass {
            if query.layer.is_elevated() {
                return match self.config.passage_mode {
                    PassageMode::Grid => Some(next.is_layered()),
                    PassageMode::Pixel => next.is_layered().then_some(true),
                };
            }
            if next.gateway {
                return Some(false);
            }
        }
        None
    }

    /// Draw order with the elevation bonus applied.
    pub fn screen_z(&self, base: i32, state: LayerState) -> i32 {
        if state.is_elevated() {
            base + self.config.higher_z_bonus
        } else {
            base
        }
    }

    /// Bush depth is suppressed on the bridge plane.
    pub fn bush_depth(&self, base: u32, state: LayerState) -> u32 {
        if state.is_elevated() { 0 } else { base }
    }

    /// Floor damage applies only to characters below the bridge plane.
    pub fn on_damage_floor<C: CharacterView + ?Sized>(&self, character: &C) -> bool {
        if character.layer_state().is_elevated() {
            return false;
        }
        let position = self.map.round_position(character.position());
        self.map
            .tile(position)
            .is_some_and(|tile| tile.is_damage_floor())
    }
}
