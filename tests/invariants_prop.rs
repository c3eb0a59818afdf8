/*!
 * Property tests for the brick/grid core.
 *
 * Invariants covered:
 * - Four quarter turns in either direction are the identity.
 * - Shape projection is a pure function of (shape, direction, anchor).
 * - Rejected actions leave both the brick and the grid untouched.
 * - A falling brick always sits on a valid placement.
 * - A landing changes the settled count by brick cells minus cleared cells.
 */
use proptest::prelude::*;

use piles_of_tiles::core::{
    BagSource, BrickMap, CollisionPolicy, GameEvent, Resolver, ShapeTable,
};
use piles_of_tiles::types::{BrickAction, Direction, Point};

fn direction() -> impl Strategy<Value = Direction> {
    prop::sample::select(Direction::ALL.to_vec())
}

fn action() -> impl Strategy<Value = BrickAction> {
    prop::sample::select(vec![
        BrickAction::MoveLeft,
        BrickAction::MoveRight,
        BrickAction::MoveDown,
        BrickAction::MoveDown,
        BrickAction::RotateClockWise,
        BrickAction::RotateCounterClockWise,
    ])
}

fn policy() -> impl Strategy<Value = CollisionPolicy> {
    prop_oneof![Just(CollisionPolicy::Reject), Just(CollisionPolicy::Correct)]
}

proptest! {
    #[test]
    fn four_quarter_turns_are_identity(d in direction()) {
        let cw = (0..4).fold(d, |acc, _| acc.rotate_cw());
        let ccw = (0..4).fold(d, |acc, _| acc.rotate_ccw());
        prop_assert_eq!(cw, d);
        prop_assert_eq!(ccw, d);
        prop_assert_eq!(d.rotate_ccw().rotate_cw(), d);
    }

    #[test]
    fn shape_cells_are_deterministic(
        index in 0usize..7,
        d in direction(),
        x in -5i32..15,
        y in -5i32..25,
    ) {
        let map = BrickMap::new(10, 20, ShapeTable::standard());
        let shape = map.shapes().id(index).unwrap();
        let first = map.shape_cells(shape, d, Point::new(x, y));
        let second = map.shape_cells(shape, d, Point::new(x, y));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn rollout_respects_core_invariants(
        seed in any::<u32>(),
        width in 4u16..12,
        height in 4u16..22,
        policy in policy(),
        actions in prop::collection::vec(action(), 1..300),
    ) {
        let map = BrickMap::new(width, height, ShapeTable::standard());
        let mut r = Resolver::new(map, Point::new(0, 0), BagSource::new(seed), policy);
        r.start();

        for action in actions {
            if r.game_over() {
                prop_assert!(r.apply(action).is_empty());
                break;
            }

            let brick_before = r.brick();
            let map_before = r.map().clone();
            let events = r.apply(action);

            match events.first() {
                Some(GameEvent::BrickCollided { brick, .. }) => {
                    prop_assert_eq!(Some(*brick), brick_before);
                    prop_assert_eq!(r.brick(), brick_before);
                    prop_assert_eq!(r.map(), &map_before);
                }
                Some(GameEvent::BrickMoved { .. }) | Some(GameEvent::BrickCorrected { .. }) => {
                    prop_assert_eq!(r.map(), &map_before);
                }
                Some(GameEvent::BrickLanded { cells, .. }) => {
                    prop_assert_eq!(action, BrickAction::MoveDown);
                    let removed = events
                        .iter()
                        .find_map(|e| match e {
                            GameEvent::RowsCleared { removed, .. } => Some(removed.len()),
                            _ => None,
                        })
                        .unwrap_or(0);
                    prop_assert_eq!(
                        r.map().settled_count(),
                        map_before.settled_count() + cells.len() - removed
                    );
                }
                other => prop_assert!(false, "unexpected first event {:?}", other),
            }

            for tile in r.map().settled_tiles() {
                prop_assert!(r.map().contains(tile.position()));
            }
            if let Some(brick) = r.brick() {
                prop_assert!(r.map().is_valid_placement(&brick.cells(r.map())));
            }
        }
    }
}
