//! Passability handlers.
//!
//! A handler answers "may a character on `from` move one tile towards
//! `direction`". Layer rules sit in front of the terrain rule as a decorator
//! that either answers or defers to the next handler in the chain.

use super::{LayerResolver, LayerState};
use crate::env::MapOracle;
use crate::state::{Direction, Position};

/// How strictly an elevated character is kept on the bridge surface.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
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
pub enum PassageMode {
    /// Tile movement: leaving the bridge onto a non-layer tile is refused.
    #[default]
    Grid,
    /// Sub-tile movement: leaving the bridge defers to the terrain rule.
    Pixel,
}

/// One movement attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PassageQuery {
    pub from: Position,
    pub direction: Direction,
    pub layer: LayerState,
}

impl PassageQuery {
    pub fn new(from: Position, direction: Direction, layer: LayerState) -> Self {
        Self {
            from,
            direction,
            layer,
        }
    }
}

/// A link in the passability chain.
pub trait Passability {
    fn passable(&self, query: &PassageQuery) -> bool;
}

impl<F> Passability for F
where
    F: Fn(&PassageQuery) -> bool,
{
    fn passable(&self, query: &PassageQuery) -> bool {
        self(query)
    }
}

/// Terrain rule: the destination exists, the origin can be left through
/// `direction` and the destination entered from the opposite side.
#[derive(Debug)]
pub struct TilePassability<'a, M: MapOracle + ?Sized> {
    map: &'a M,
}

impl<'a, M: MapOracle + ?Sized> TilePassability<'a, M> {
    pub fn new(map: &'a M) -> Self {
        Self { map }
    }
}

impl<M: MapOracle + ?Sized> Clone for TilePassability<'_, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: MapOracle + ?Sized> Copy for TilePassability<'_, M> {}

impl<M: MapOracle + ?Sized> Passability for TilePassability<'_, M> {
    fn passable(&self, query: &PassageQuery) -> bool {
        let to = self.map.neighbor(query.from, query.direction);
        if !self.map.contains(to) {
            return false;
        }
        let (Some(here), Some(there)) = (self.map.tile(query.from), self.map.tile(to)) else {
            return false;
        };
        here.allows(query.direction) && there.allows(query.direction.reverse())
    }
}

/// Layer rules in front of `next`.
///
/// Answers with [`LayerResolver::can_enter`] when it has an opinion and
/// otherwise delegates.
#[derive(Debug)]
pub struct OverpassPassage<'a, M: MapOracle + ?Sized, N> {
    layers: LayerResolver<'a, M>,
    next: N,
}

impl<'a, M: MapOracle + ?Sized, N: Passability> OverpassPassage<'a, M, N> {
    pub fn new(layers: LayerResolver<'a, M>, next: N) -> Self {
        Self { layers, next }
    }

    pub fn next(&self) -> &N {
        &self.next
    }
}

impl<M: MapOracle + ?Sized, N: Passability> Passability for OverpassPassage<'_, M, N> {
    fn passable(&self, query: &PassageQuery) -> bool {
        match self.layers.can_enter(query) {
            Some(answer) => answer,
            None => self.next.passable(query),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::env::{MapDimensions, MapSnapshot, StaticTile, TileFlags};
    use crate::layer::{LayerConfig, TileRule};

    fn bridge_map() -> MapSnapshot {
        // x: 0 plain, 1 gateway (region 2), 2 overpass (region 1), 3 wall
        let mut map = MapSnapshot::filled(MapDimensions::new(4, 1), StaticTile::floor());
        map.set_tile(Position::new(1, 0), StaticTile::new(2, 0)).unwrap();
        map.set_tile(Position::new(2, 0), StaticTile::new(1, 0)).unwrap();
        map.set_tile(Position::new(3, 0), StaticTile::wall()).unwrap();
        map
    }

    fn config() -> GameConfig {
        GameConfig::with_layer(LayerConfig::new(
            TileRule::regions("1"),
            TileRule::regions("2"),
        ))
    }

    #[test]
    fn terrain_rule_checks_both_tiles() {
        let map = bridge_map();
        let base = TilePassability::new(&map);
        let right =
            |x| PassageQuery::new(Position::new(x, 0), Direction::Right, LayerState::Ground);
        assert!(base.passable(&right(0)));
        assert!(!base.passable(&right(2)), "wall blocks entry");
        assert!(!base.passable(&right(3)), "off the map");
    }

    #[test]
    fn exit_flag_on_origin_blocks() {
        let map = MapSnapshot::filled(
            MapDimensions::new(2, 1),
            StaticTile::floor().with_flags(TileFlags::BLOCK_RIGHT),
        );
        let base = TilePassability::new(&map);
        let query = PassageQuery::new(Position::ORIGIN, Direction::Right, LayerState::Ground);
        assert!(!base.passable(&query));
    }

    #[test]
    fn decorator_defers_when_layers_have_no_opinion() {
        let map = bridge_map();
        let config = config();
        let layers = LayerResolver::new(&map, &config);
        let chain = OverpassPassage::new(layers, |_: &PassageQuery| false);
        let plain = PassageQuery::new(Position::ORIGIN, Direction::Right, LayerState::Ground);
        assert!(!chain.passable(&plain), "falls through to next handler");

        let onto_bridge =
            PassageQuery::new(Position::new(1, 0), Direction::Right, LayerState::Gateway);
        assert!(chain.passable(&onto_bridge), "gateway to overpass is granted");
    }
}
