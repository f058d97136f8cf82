#![allow(dead_code)]

use arpg_core::{
    BattleStats, CharacterId, CharacterState, GameConfig, IdList, LayerConfig, MapDimensions,
    MapSnapshot, Position, ResourceMeter, Side, StaticTile, TileRule,
};
use arpg_runtime::{Actor, World};

pub const OVERPASS_REGION: u16 = 1;
pub const GATEWAY_TAG: u16 = 3;

/// 6x3 map with an east-west bridge on row 1 and a road passing under it
/// at x = 2.
///
/// ```text
///   x: 0  1  2  3  4  5
/// y=0  .  .  .  .  .  .
/// y=1  .  G  O  O  G  .
/// y=2  .  .  .  .  .  .
/// ```
pub fn bridge_map() -> MapSnapshot {
    let mut map = MapSnapshot::filled(MapDimensions::new(6, 3), StaticTile::floor());
    for x in [1, 4] {
        map.set_tile(Position::new(x, 1), StaticTile::new(0, GATEWAY_TAG))
            .unwrap();
    }
    for x in [2, 3] {
        map.set_tile(Position::new(x, 1), StaticTile::new(OVERPASS_REGION, 0))
            .unwrap();
    }
    map
}

pub fn bridge_config() -> GameConfig {
    GameConfig::with_layer(LayerConfig::new(
        TileRule::new(IdList::from_ids([OVERPASS_REGION]), IdList::disabled()),
        TileRule::new(IdList::disabled(), IdList::from_ids([GATEWAY_TAG])),
    ))
}

pub fn bridge_world() -> World {
    World::new(bridge_map(), bridge_config())
}

pub fn battler(side: Side, hp: u32, max: u32) -> BattleStats {
    BattleStats::new(side, ResourceMeter::new(hp, max))
}

pub fn hero(x: i32, y: i32) -> Actor {
    Actor::new(
        CharacterState::new(CharacterId::Player, Position::new(x, y))
            .with_battler(battler(Side::Actor, 100, 100)),
    )
}

pub fn goblin(id: u32, x: i32, y: i32, hp: u32) -> Actor {
    Actor::new(
        CharacterState::new(CharacterId::Event(id), Position::new(x, y))
            .with_battler(battler(Side::Enemy, hp, 100)),
    )
}
