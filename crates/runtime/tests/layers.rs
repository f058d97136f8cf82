//! Walking over and under a bridge through the frame loop.

mod common;

use arpg_core::{
    CharacterId, CharacterState, Direction, ErrorSeverity, GameError, LayerState, Position,
    StaticTile, TileFlags, TriggerKind,
};
use arpg_runtime::{Actor, RuntimeError};
use common::{bridge_world, goblin, hero};

fn walk(world: &mut arpg_runtime::World, id: CharacterId, steps: &[Direction]) -> Vec<bool> {
    steps
        .iter()
        .map(|direction| world.try_move(id, *direction).unwrap())
        .collect()
}

#[test]
fn crossing_the_bridge_keeps_the_player_elevated() {
    let mut world = bridge_world();
    world.spawn(hero(0, 1)).unwrap();

    assert!(world.try_move(CharacterId::Player, Direction::Right).unwrap());
    assert_eq!(world.character(CharacterId::Player).unwrap().layer, LayerState::Gateway);

    assert_eq!(
        walk(&mut world, CharacterId::Player, &[Direction::Right, Direction::Right]),
        vec![true, true]
    );
    let player = world.character(CharacterId::Player).unwrap();
    assert_eq!(player.position, Position::new(3, 1));
    assert_eq!(player.layer, LayerState::Bridge);

    // No stepping off the side of the bridge.
    assert!(!world.try_move(CharacterId::Player, Direction::Down).unwrap());

    assert_eq!(
        walk(&mut world, CharacterId::Player, &[Direction::Right, Direction::Right]),
        vec![true, true]
    );
    assert_eq!(world.character(CharacterId::Player).unwrap().layer, LayerState::Ground);
}

#[test]
fn walking_under_the_bridge_stays_below() {
    let mut world = bridge_world();
    world.spawn(goblin(1, 2, 0, 50)).unwrap();
    let id = CharacterId::Event(1);

    assert!(world.try_move(id, Direction::Down).unwrap());
    assert_eq!(world.character(id).unwrap().layer, LayerState::Underpass);

    // The gateway is not reachable from below.
    assert!(!world.try_move(id, Direction::Left).unwrap());

    assert!(world.try_move(id, Direction::Down).unwrap());
    assert_eq!(world.character(id).unwrap().layer, LayerState::Ground);
}

#[test]
fn characters_on_different_planes_pass_each_other() {
    let mut world = bridge_world();
    world.spawn(hero(1, 1)).unwrap();
    world.spawn(goblin(1, 2, 0, 50)).unwrap();
    world.try_move(CharacterId::Player, Direction::Right).unwrap();
    assert_eq!(world.character(CharacterId::Player).unwrap().layer, LayerState::Bridge);

    // The goblin walks under the player standing on the bridge.
    assert!(world.try_move(CharacterId::Event(1), Direction::Down).unwrap());
    assert_eq!(
        world.character(CharacterId::Event(1)).unwrap().position,
        Position::new(2, 1)
    );
}

#[test]
fn characters_on_the_same_plane_block_each_other() {
    let mut world = bridge_world();
    world.spawn(goblin(1, 2, 0, 50)).unwrap();
    world.spawn(goblin(2, 2, 1, 50)).unwrap();
    assert_eq!(
        world.character(CharacterId::Event(2)).unwrap().layer,
        LayerState::Underpass
    );
    // Ground and underpass are compatible planes.
    assert!(!world.try_move(CharacterId::Event(1), Direction::Down).unwrap());

    let ghost = Actor::new({
        let mut state = CharacterState::new(CharacterId::Event(3), Position::new(1, 0));
        state.through = true;
        state
    });
    world.spawn(ghost).unwrap();
    assert!(world.try_move(CharacterId::Event(3), Direction::Right).unwrap());
}

#[test]
fn contact_events_need_a_shared_plane() {
    let mut world = bridge_world();
    world.spawn(hero(0, 1)).unwrap();
    world
        .spawn(goblin(7, 2, 2, 10).with_trigger(TriggerKind::PlayerTouch))
        .unwrap();
    world
        .spawn(goblin(8, 3, 2, 10).with_trigger(TriggerKind::Parallel))
        .unwrap();

    assert!(world.event_may_start(7));
    world.try_move(CharacterId::Player, Direction::Right).unwrap();
    assert!(!world.event_may_start(7), "player is up on the gateway");
    assert!(world.event_may_start(8), "parallel events ignore layers");
    assert!(!world.event_may_start(99));
}

#[test]
fn elevation_changes_rendering_and_floor_damage() {
    let mut map = common::bridge_map();
    map.set_tile(
        Position::new(3, 1),
        StaticTile::new(common::OVERPASS_REGION, 0).with_flags(TileFlags::DAMAGE_FLOOR),
    )
    .unwrap();
    let mut world = arpg_runtime::World::new(map, common::bridge_config());
    world.spawn(hero(1, 1)).unwrap();
    world.spawn(goblin(1, 3, 0, 50)).unwrap();
    walk(&mut world, CharacterId::Player, &[Direction::Right, Direction::Right]);
    world.try_move(CharacterId::Event(1), Direction::Down).unwrap();

    assert!(!world.on_damage_floor(CharacterId::Player));
    assert!(world.on_damage_floor(CharacterId::Event(1)));
    assert_eq!(world.screen_z(CharacterId::Player, 3), Some(6));
    assert_eq!(world.screen_z(CharacterId::Event(1), 3), Some(3));
    assert_eq!(world.bush_depth(CharacterId::Player, 12), Some(0));
    assert_eq!(world.bush_depth(CharacterId::Event(1), 12), Some(12));
}

#[test]
fn step_reports_layer_changes_after_teleport() {
    let mut world = bridge_world();
    world.spawn(hero(0, 0)).unwrap();
    assert_eq!(
        world.teleport(CharacterId::Player, Position::new(4, 1)).unwrap(),
        LayerState::Gateway
    );
    let report = world.step();
    assert!(report.layer_changes.is_empty(), "already settled");

    assert!(matches!(
        world.teleport(CharacterId::Event(5), Position::ORIGIN),
        Err(RuntimeError::UnknownCharacter(CharacterId::Event(5)))
    ));
}

#[test]
fn teleport_onto_the_deck_lands_on_the_bridge() {
    let mut world = bridge_world();
    world.spawn(hero(3, 2)).unwrap();
    world.spawn(goblin(1, 0, 2, 50)).unwrap();
    assert_eq!(world.character(CharacterId::Player).unwrap().layer, LayerState::Ground);

    assert_eq!(
        world.teleport(CharacterId::Player, Position::new(3, 1)).unwrap(),
        LayerState::Bridge
    );
    assert_eq!(
        world.teleport(CharacterId::Event(1), Position::new(2, 1)).unwrap(),
        LayerState::Bridge
    );
    let report = world.step();
    assert!(report.layer_changes.is_empty(), "already settled");
}

#[test]
fn teleport_drops_elevation_and_brings_the_followers() {
    let mut world = bridge_world();
    world.spawn(hero(0, 1)).unwrap();
    world
        .spawn(Actor::new(CharacterState::new(
            CharacterId::Follower(0),
            Position::new(5, 2),
        )))
        .unwrap();
    walk(&mut world, CharacterId::Player, &[Direction::Right, Direction::Right]);
    assert_eq!(world.character(CharacterId::Player).unwrap().layer, LayerState::Bridge);

    assert_eq!(
        world.teleport(CharacterId::Player, Position::new(5, 0)).unwrap(),
        LayerState::Ground
    );
    let follower = world.character(CharacterId::Follower(0)).unwrap();
    assert_eq!(follower.position, Position::new(5, 0));
    assert_eq!(follower.layer, LayerState::Ground);

    world.teleport(CharacterId::Player, Position::new(2, 1)).unwrap();
    for id in [CharacterId::Player, CharacterId::Follower(0)] {
        assert_eq!(world.character(id).unwrap().layer, LayerState::Bridge);
    }
}

#[test]
fn collapsed_bridge_drops_the_player_next_frame() {
    let mut world = bridge_world();
    world.spawn(hero(1, 1)).unwrap();
    walk(&mut world, CharacterId::Player, &[Direction::Right, Direction::Right]);
    assert_eq!(world.character(CharacterId::Player).unwrap().layer, LayerState::Bridge);

    world.set_tile(Position::new(3, 1), StaticTile::floor()).unwrap();
    assert_eq!(world.tile(Position::new(3, 1)).unwrap(), StaticTile::floor());
    let report = world.step();
    assert_eq!(report.layer_changes, vec![(CharacterId::Player, LayerState::Ground)]);

    let err = world
        .set_tile(Position::new(9, 9), StaticTile::floor())
        .unwrap_err();
    assert!(matches!(err, RuntimeError::Oracle(_)));
    assert_eq!(err.error_code(), "ORACLE_POSITION_OUT_OF_BOUNDS");
    assert_eq!(err.severity(), ErrorSeverity::Validation);
}
