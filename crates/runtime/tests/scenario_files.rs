//! The bundled demo data loads and runs.

use std::path::PathBuf;

use arpg_content::ContentFactory;
use arpg_core::{CharacterId, LayerState};
use arpg_runtime::Scenario;

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data")
}

#[test]
fn ambush_scenario_runs_against_the_river_map() {
    let factory = ContentFactory::new(data_dir());
    let config = factory.load_config().unwrap();
    let scenario = Scenario::load_from_file(&factory.scenario_path("ambush")).unwrap();
    let map = factory.load_map(&scenario.map_id).unwrap();
    let mut world = scenario.create_world(map, config).unwrap();

    assert_eq!(world.len(), 5);
    assert_eq!(world.character(CharacterId::Player).unwrap().layer, LayerState::Bridge);
    assert_eq!(
        world.character(CharacterId::Follower(0)).unwrap().layer,
        LayerState::Gateway
    );

    let failures: usize = (0..30).map(|_| world.step().failures).sum();
    assert_eq!(failures, 0);

    let slots = world.slots();
    // Goblin 1 picked the wounded follower.
    assert!(slots.switch(1));
    assert_eq!(slots.variable(1), 2);
    assert_eq!(slots.variable(3), 3);
    // Goblin 2 is poisoned and its timer is half way.
    assert!(slots.switch(2));
    assert_eq!(slots.variable(4), 2);
    assert!(!slots.switch(3));
    assert_eq!(slots.variable(5), 31);
    // The signpost found the nearest tagged goblin.
    assert_eq!(slots.variable(6), 2);
}
