//! Session and effects tests - scripted play through the public facade

use piles_of_tiles::core::{CollisionPolicy, Content, GameEvent, ShapeTable};
use piles_of_tiles::effects::{EffectState, TileVisualKind};
use piles_of_tiles::engine::{parse_script, Session, SessionConfig, Step};
use piles_of_tiles::types::{BrickAction, Point, TICK_MS};

fn run(session: &mut Session, script: &str) -> Vec<GameEvent> {
    let mut events = Vec::new();
    for step in parse_script(script).unwrap() {
        events.extend(session.step(step));
    }
    events
}

#[test]
fn test_same_seed_same_game() {
    let config = SessionConfig {
        seed: 42,
        ..SessionConfig::default()
    };
    let script = "LLC....RRA....D..L...........................";

    let mut a = Session::from_config(&config, ShapeTable::standard()).unwrap();
    let mut b = Session::from_config(&config, ShapeTable::standard()).unwrap();
    a.start();
    b.start();

    assert_eq!(run(&mut a, script), run(&mut b, script));
    assert_eq!(a.snapshot(), b.snapshot());
}

#[test]
fn test_config_json_drives_session() {
    let config = SessionConfig::from_json(
        r#"{ "width": 6, "height": 8, "spawn": { "x": 1, "y": 0 }, "gravityMs": 250 }"#,
    )
    .unwrap();
    let mut session = Session::from_config(&config, ShapeTable::standard()).unwrap();
    assert_eq!(session.drop_interval_ms(), 250);

    let events = session.start();
    let Some(GameEvent::BrickCreated { brick }) = events.first() else {
        panic!("expected a spawn, got {events:?}");
    };
    assert_eq!(brick.position(), Point::new(1, 0));

    let snapshot = session.snapshot();
    assert_eq!((snapshot.width, snapshot.height), (6, 8));
    assert!(snapshot.playable());
}

#[test]
fn test_content_without_spawn_keeps_config_spawn() {
    let mut config =
        SessionConfig::from_json(r#"{ "width": 3, "spawn": { "x": 1, "y": 0 } }"#).unwrap();
    let content = Content::from_json(
        r#"{ "shapes": [ { "name": "pair", "color": [9, 9, 9], "size": 2, "cells": [[0, 0], [1, 0]] } ] }"#,
    )
    .unwrap();
    config.apply_content(&content);

    let mut session = Session::from_config(&config, content.shape_table().unwrap()).unwrap();
    let events = session.start();
    let Some(GameEvent::BrickCreated { brick }) = events.first() else {
        panic!("expected a spawn, got {events:?}");
    };
    assert_eq!(brick.position(), Point::new(1, 0));
}

#[test]
fn test_ticks_accumulate_into_gravity() {
    let config = SessionConfig {
        gravity_ms: 5 * TICK_MS,
        ..SessionConfig::default()
    };
    let mut session = Session::from_config(&config, ShapeTable::standard()).unwrap();
    session.start();
    let start = session.resolver().brick().unwrap().position();

    for _ in 0..4 {
        assert!(session.tick(TICK_MS).is_empty());
    }
    let events = session.tick(TICK_MS);
    assert_eq!(events.len(), 1);
    assert_eq!(
        session.resolver().brick().unwrap().position(),
        start + Point::new(0, 1)
    );
}

#[test]
fn test_unknown_script_step_is_an_error() {
    let err = parse_script("LL?").unwrap_err();
    assert_eq!(err.to_string(), "unknown script step '?' at position 2");
}

#[test]
fn test_correct_policy_through_session() {
    let config = SessionConfig {
        policy: CollisionPolicy::Correct,
        ..SessionConfig::default()
    };
    let mut session = Session::from_config(&config, ShapeTable::standard()).unwrap();
    session.start();

    // Walk any brick into the left wall, then spin it; nothing may end up outside.
    let events = run(&mut session, "LLLLLCCCCAAAA");
    assert!(!events
        .iter()
        .any(|e| matches!(e, GameEvent::GameOver { .. })));
    let brick = session.resolver().brick().unwrap();
    let map = session.resolver().map();
    assert!(map.is_valid_placement(&brick.cells(map)));
}

#[test]
fn test_effects_follow_session_events() {
    let config = SessionConfig::default();
    let mut session = Session::from_config(&config, ShapeTable::standard()).unwrap();
    let mut effects = EffectState::new(7);
    session.start();
    effects.load(&session.snapshot());
    assert!(effects.tiles().is_empty());

    // Soft-drop the first brick all the way down.
    let mut landed = false;
    for _ in 0..40 {
        effects.soft_drop_pressed();
        let events = session.step(Step::Action(BrickAction::MoveDown));
        let snapshot = session.snapshot();
        for event in &events {
            effects.handle(event, &snapshot);
        }
        effects.update(TICK_MS);
        if events
            .iter()
            .any(|e| matches!(e, GameEvent::BrickLanded { .. }))
        {
            landed = true;
            break;
        }
    }

    assert!(landed);
    assert_eq!(effects.tiles().len(), 4);
    assert!(effects
        .tiles()
        .iter()
        .all(|t| matches!(t.kind, TileVisualKind::Jittered(_))));
    assert!(effects.screen_shaking());
    assert_eq!(effects.shakes(), 1);
}
