//! Boarding, steering and leaving vehicles around the bridge.

mod common;

use arpg_core::{
    BlockReason, CharacterId, CharacterState, DamageVerdict, Direction, LayerState, Position,
    VehicleKind,
};
use arpg_runtime::{Actor, RuntimeError, World};
use common::{bridge_world, goblin, hero};

const AIRSHIP: CharacterId = CharacterId::Vehicle(VehicleKind::Airship);
const BOAT: CharacterId = CharacterId::Vehicle(VehicleKind::Boat);

fn vehicle(id: CharacterId, x: i32, y: i32) -> Actor {
    Actor::new(CharacterState::new(id, Position::new(x, y)))
}

/// Player standing on the bridge next to an airship parked at (3, 1).
fn airship_world() -> World {
    let mut world = bridge_world();
    world.spawn(vehicle(AIRSHIP, 3, 1)).unwrap();
    world.spawn(hero(0, 1)).unwrap();
    for _ in 0..3 {
        assert!(world.try_move(CharacterId::Player, Direction::Right).unwrap());
    }
    world
}

#[test]
fn parked_airship_sits_on_the_bridge() {
    let world = airship_world();
    assert_eq!(world.character(AIRSHIP).unwrap().layer, LayerState::Bridge);
    assert_eq!(world.character(CharacterId::Player).unwrap().layer, LayerState::Bridge);
}

#[test]
fn flying_keeps_the_pilot_elevated_and_out_of_combat() {
    let mut world = airship_world();
    world.spawn(goblin(1, 0, 0, 50)).unwrap();
    world.board(VehicleKind::Airship).unwrap();
    assert_eq!(world.riding(), Some(VehicleKind::Airship));

    assert!(world.steer(Direction::Up).unwrap());
    assert_eq!(world.character(AIRSHIP).unwrap().layer, LayerState::Gateway);
    let report = world.step();
    assert_eq!(report.layer_changes, vec![(CharacterId::Player, LayerState::Gateway)]);
    assert_eq!(
        world.character(CharacterId::Player).unwrap().position,
        Position::new(3, 0)
    );

    assert!(!world.steer(Direction::Up).unwrap(), "edge of the map");
    assert!(matches!(
        world.try_move(CharacterId::Player, Direction::Left),
        Err(RuntimeError::Riding(CharacterId::Player))
    ));
    assert!(!world.can_use_skill(CharacterId::Player));
    assert!(world.can_use_skill(CharacterId::Event(1)));
    assert_eq!(
        world
            .apply_damage(Some(CharacterId::Event(1)), CharacterId::Player, "", 10)
            .unwrap(),
        DamageVerdict::Blocked(BlockReason::RidingVehicle)
    );
    assert_eq!(
        world.character(CharacterId::Player).unwrap().battler.as_ref().unwrap().hp.current,
        100
    );
}

#[test]
fn airship_lands_only_on_a_free_overpass() {
    let mut world = airship_world();
    world.board(VehicleKind::Airship).unwrap();
    world.steer(Direction::Up).unwrap();

    assert!(!world.disembark().unwrap(), "plain ground");
    assert_eq!(world.riding(), Some(VehicleKind::Airship));

    // A goblin walks onto the bridge below the airship's landing spot.
    world.spawn(goblin(1, 4, 1, 50)).unwrap();
    assert!(world.try_move(CharacterId::Event(1), Direction::Left).unwrap());
    assert_eq!(world.character(CharacterId::Event(1)).unwrap().layer, LayerState::Bridge);
    world.steer(Direction::Down).unwrap();
    assert!(!world.disembark().unwrap(), "bridge occupied");

    world.despawn(CharacterId::Event(1)).unwrap();
    assert!(world.disembark().unwrap());
    assert_eq!(world.riding(), None);
    let player = world.character(CharacterId::Player).unwrap();
    assert_eq!(player.position, Position::new(3, 1));
    assert_eq!(player.layer, LayerState::Bridge);
    assert_eq!(player.direction, Direction::Down);
}

#[test]
fn airship_above_cannot_be_boarded_from_below() {
    let mut world = bridge_world();
    world.spawn(vehicle(AIRSHIP, 2, 1)).unwrap();
    world.spawn(hero(2, 0)).unwrap();
    world.try_move(CharacterId::Player, Direction::Down).unwrap();
    assert_eq!(
        world.character(CharacterId::Player).unwrap().layer,
        LayerState::Underpass
    );

    assert!(matches!(
        world.board(VehicleKind::Airship),
        Err(RuntimeError::NoVehicle(VehicleKind::Airship, _))
    ));
    assert_eq!(world.riding(), None);
}

#[test]
fn boat_is_boarded_ahead_and_lands_on_a_free_neighbour() {
    let mut world = bridge_world();
    world.spawn(vehicle(BOAT, 0, 2)).unwrap();
    world.spawn(hero(0, 1)).unwrap();
    world.spawn(goblin(1, 2, 2, 50)).unwrap();

    assert!(matches!(world.steer(Direction::Right), Err(RuntimeError::NotRiding)));
    world.board(VehicleKind::Boat).unwrap();
    assert!(matches!(
        world.board(VehicleKind::Boat),
        Err(RuntimeError::Riding(CharacterId::Player))
    ));
    assert_eq!(
        world.character(CharacterId::Player).unwrap().position,
        Position::new(0, 2)
    );

    assert!(world.steer(Direction::Right).unwrap());
    assert!(!world.disembark().unwrap(), "goblin stands on the landing tile");

    world.despawn(CharacterId::Event(1)).unwrap();
    assert!(world.disembark().unwrap());
    let player = world.character(CharacterId::Player).unwrap();
    assert_eq!(player.position, Position::new(2, 2));
    assert_eq!(player.layer, LayerState::Ground);
    assert_eq!(world.character(BOAT).unwrap().position, Position::new(1, 2));
    assert!(matches!(world.disembark(), Err(RuntimeError::NotRiding)));
}

#[test]
fn teleporting_the_pilot_moves_the_airship_too() {
    let mut world = airship_world();
    world.board(VehicleKind::Airship).unwrap();

    assert_eq!(
        world.teleport(CharacterId::Player, Position::new(5, 2)).unwrap(),
        LayerState::Gateway
    );
    let airship = world.character(AIRSHIP).unwrap();
    assert_eq!(airship.position, Position::new(5, 2));
    assert_eq!(airship.layer, LayerState::Gateway);
    assert_eq!(world.riding(), Some(VehicleKind::Airship));
    assert!(world.step().layer_changes.is_empty());
}

#[test]
fn parked_boat_teleported_onto_the_deck_floats_underneath() {
    let mut world = bridge_world();
    world.spawn(vehicle(BOAT, 0, 2)).unwrap();
    assert_eq!(
        world.teleport(BOAT, Position::new(2, 1)).unwrap(),
        LayerState::Underpass
    );
    assert_eq!(world.character(BOAT).unwrap().position, Position::new(2, 1));
}
