//! Scripted commands writing into result slots through the frame loop.

mod common;

use arpg_content::{
    ChangeStateParams, CharacterRef, CheckConditionsParams, CommandSpec, ConditionSource,
    FailPolicy, FindTaggedParams, SearchBattlerParams, TagCriterionParams,
};
use arpg_core::{CharacterId, SearchReport, ThinkPurpose, Tick};
use arpg_runtime::{CommandOutcome, World};
use common::{bridge_world, goblin, hero};

fn lowest_hp_search() -> SearchBattlerParams {
    SearchBattlerParams {
        target: "opponent".into(),
        search_method: "lowest_hp_percent".into(),
        result_switch: 1,
        kind_variable: 2,
        event_id_variable: 3,
        distance_variable: 4,
        ..SearchBattlerParams::default()
    }
}

fn hunting_world() -> World {
    let mut world = bridge_world();
    world
        .spawn(hero(0, 0).with_commands(vec![CommandSpec::SearchBattler(lowest_hp_search())]))
        .unwrap();
    world.spawn(goblin(1, 5, 0, 50)).unwrap();
    world.spawn(goblin(2, 2, 0, 50)).unwrap();
    world.spawn(goblin(3, 3, 2, 30)).unwrap();
    world
}

#[test]
fn search_writes_the_weakest_opponent() {
    let mut world = hunting_world();
    let report = world.step();

    let (agent, search) = report.searches().next().unwrap();
    assert_eq!(agent, CharacterId::Player);
    assert!(search.found);
    assert_eq!(search.event_id, 3);

    let slots = world.slots();
    assert!(slots.switch(1));
    assert_eq!(slots.variable(2), 3, "kind code of an event");
    assert_eq!(slots.variable(3), 3);
    assert_eq!(slots.variable(4), 4, "sqrt(13) rounds to 4");
}

#[test]
fn search_breaks_hp_ties_by_distance() {
    let mut world = hunting_world();
    let outcome = world
        .execute(
            CharacterId::Player,
            &CommandSpec::ChangeState(ChangeStateParams {
                character: CharacterRef::Event(3),
                state_id: 1,
                operation: "add".into(),
            }),
        )
        .unwrap();
    assert_eq!(
        outcome,
        CommandOutcome::StateChanged {
            target: CharacterId::Event(3),
            state: 1,
            applied: true
        }
    );

    world.step();
    assert_eq!(world.slots().variable(3), 2, "goblin 2 is nearer than goblin 1");
}

#[test]
fn search_without_match_clears_the_slots() {
    let mut world = bridge_world();
    world
        .spawn(hero(0, 0).with_commands(vec![CommandSpec::SearchBattler(SearchBattlerParams {
            max_distance: 1.0,
            ..lowest_hp_search()
        })]))
        .unwrap();
    world.spawn(goblin(1, 5, 0, 50)).unwrap();
    world.slots_mut().set_variable(3, 42);

    let report = world.step();
    assert_eq!(report.searches().next().map(|(_, r)| *r), Some(SearchReport::NOT_FOUND));
    assert!(!world.slots().switch(1));
    assert_eq!(world.slots().variable(3), 0);
}

#[test]
fn player_search_is_throttled_by_elapsed_frames() {
    let mut world = bridge_world();
    world
        .spawn(hero(0, 0).with_commands(vec![CommandSpec::SearchBattler(SearchBattlerParams {
            thinking_time: Some(3),
            ..lowest_hp_search()
        })]))
        .unwrap();
    world.spawn(goblin(1, 2, 0, 50)).unwrap();

    let searched: Vec<bool> = (0..7)
        .map(|_| world.step().searches().next().is_some())
        .collect();
    assert_eq!(searched, vec![false, false, false, true, false, false, true]);
    assert_eq!(
        world.throttle().last_think(CharacterId::Player, ThinkPurpose::Search),
        Some(Tick::new(6))
    );

    world.despawn(CharacterId::Player).unwrap();
    assert!(world.throttle().is_empty());
}

#[test]
fn event_searches_are_staggered_by_id() {
    let mut world = bridge_world();
    world.spawn(hero(0, 0)).unwrap();
    let params = SearchBattlerParams {
        thinking_time: Some(4),
        ..lowest_hp_search()
    };
    world
        .spawn(goblin(5, 4, 0, 50).with_commands(vec![CommandSpec::SearchBattler(params)]))
        .unwrap();

    let frames: Vec<u64> = (0..8)
        .filter_map(|_| {
            let report = world.step();
            report.searches().next().map(|_| report.frame.0)
        })
        .collect();
    assert_eq!(frames, vec![3, 7]);
    assert!(world.slots().switch(1), "the goblin found the player");
    assert_eq!(world.slots().variable(2), 1, "kind code of the player");
}

#[test]
fn find_tagged_picks_the_nearest_match() {
    let mut world = bridge_world();
    let finder = FindTaggedParams {
        criteria: vec![TagCriterionParams {
            id: 1,
            value: 2,
            ..TagCriterionParams::default()
        }],
        result_variable: 5,
        ..FindTaggedParams::default()
    };
    world
        .spawn(goblin(10, 0, 0, 10).with_commands(vec![CommandSpec::FindTagged(finder)]))
        .unwrap();
    let mut near = goblin(11, 1, 0, 10);
    near.state.set_tag(1, 2);
    let mut far = goblin(12, 3, 0, 10);
    far.state.set_tag(1, 2);
    let mut wrong = goblin(13, 0, 1, 10);
    wrong.state.set_tag(1, 1);
    for actor in [near, far, wrong] {
        world.spawn(actor).unwrap();
    }

    world.step();
    assert_eq!(world.slots().variable(5), 11);

    world.despawn(CharacterId::Event(11)).unwrap();
    world.step();
    assert_eq!(world.slots().variable(5), 12);
}

#[test]
fn find_tagged_without_criteria_writes_zero() {
    let mut world = bridge_world();
    world
        .spawn(goblin(10, 0, 0, 10).with_commands(vec![CommandSpec::FindTagged(
            FindTaggedParams {
                result_variable: 5,
                ..FindTaggedParams::default()
            },
        )]))
        .unwrap();
    world.slots_mut().set_variable(5, 9);
    let report = world.step();
    assert_eq!(
        report.commands,
        vec![(CharacterId::Event(10), CommandOutcome::Found(None))]
    );
    assert_eq!(world.slots().variable(5), 0);
}

#[test]
fn condition_checks_write_switches_and_ids() {
    let mut world = bridge_world();
    let check_self = CheckConditionsParams {
        source: ConditionSource::This,
        has_states: vec![4],
        result_switch: 7,
        result_variable: 8,
        on_fail: FailPolicy::ResetToZero,
        ..CheckConditionsParams::default()
    };
    let mut poisoned =
        goblin(20, 1, 0, 10).with_commands(vec![CommandSpec::CheckConditions(check_self)]);
    poisoned.state.battler.as_mut().unwrap().states.add(4);
    world.spawn(poisoned).unwrap();

    let check_dead = CheckConditionsParams {
        source: ConditionSource::EventInVariable(8),
        life_condition: "dead".into(),
        result_switch: 9,
        ..CheckConditionsParams::default()
    };
    world
        .spawn(hero(0, 0).with_commands(vec![CommandSpec::CheckConditions(check_dead)]))
        .unwrap();

    let report = world.step();
    assert!(world.slots().switch(7));
    assert_eq!(world.slots().variable(8), 20);
    assert!(!world.slots().switch(9), "the player ran before variable 8 was set");
    assert_eq!(
        report.commands,
        vec![
            (CharacterId::Player, CommandOutcome::Checked(false)),
            (CharacterId::Event(20), CommandOutcome::Checked(true)),
        ]
    );

    world
        .execute(
            CharacterId::Event(20),
            &CommandSpec::ChangeState(ChangeStateParams {
                character: CharacterRef::This,
                state_id: 4,
                operation: "remove".into(),
            }),
        )
        .unwrap();
    let report = world.step();
    assert_eq!(report.commands[0], (CharacterId::Player, CommandOutcome::Checked(false)));
    assert!(!world.slots().switch(7));
    assert_eq!(world.slots().variable(8), 0, "reset on failure");

    world
        .apply_damage(None, CharacterId::Event(20), "", 10)
        .unwrap();
    world.slots_mut().set_variable(8, 20);
    world.step();
    assert!(world.slots().switch(9), "goblin 20 is dead now");
}

#[test]
fn failing_commands_are_counted_not_fatal() {
    let mut world = bridge_world();
    world
        .spawn(hero(0, 0).with_commands(vec![
            CommandSpec::SearchBattler(SearchBattlerParams {
                subject: CharacterRef::Event(99),
                ..lowest_hp_search()
            }),
            CommandSpec::ChangeState(ChangeStateParams {
                character: CharacterRef::Event(98),
                state_id: 3,
                operation: "add".into(),
            }),
            CommandSpec::ChangeState(ChangeStateParams {
                character: CharacterRef::This,
                state_id: 3,
                operation: "toggle".into(),
            }),
        ]))
        .unwrap();

    let report = world.step();
    assert_eq!(report.failures, 2);
    assert_eq!(
        report.commands,
        vec![(CharacterId::Player, CommandOutcome::Ignored)]
    );
    assert_eq!(world.actor(CharacterId::Player).unwrap().commands.len(), 3);
}
