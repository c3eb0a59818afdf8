//! Resolver module - validates brick actions against the grid
//!
//! Every action goes through the same steps:
//!
//! 1. the brick proposes a candidate (`Brick::apply`)
//! 2. the grid classifies the candidate's cells
//! 3. a valid candidate is committed; an invalid `MoveDown` lands the brick
//!    (merge, row clear, next spawn); any other invalid action is rejected,
//!    or nudged sideways under [`CollisionPolicy::Correct`]
//!
//! Invalid placements are ordinary outcomes reported as events, never errors.

use log::{debug, info, trace};
use serde::{Deserialize, Serialize};

use crate::brick::Brick;
use crate::events::{Events, GameEvent};
use crate::grid::{BrickMap, Placement};
use crate::rng::{BagSource, BrickSource};
use crate::types::{BrickAction, Point};

/// Horizontal nudges tried, in order, when a rotation collides under
/// [`CollisionPolicy::Correct`]
pub const CORRECTION_OFFSETS: [Point; 4] = [
    Point::new(1, 0),
    Point::new(-1, 0),
    Point::new(2, 0),
    Point::new(-2, 0),
];

/// What to do with a rotation that does not fit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CollisionPolicy {
    /// Reject the rotation; the brick stays as it was
    #[default]
    Reject,
    /// Try the [`CORRECTION_OFFSETS`] nudges and commit the first that fits
    Correct,
}

/// Lifecycle of the current brick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BrickState {
    Falling,
    Landed,
}

/// Owns the grid and the current brick and applies actions one at a time
#[derive(Debug, Clone)]
pub struct Resolver<S = BagSource> {
    map: BrickMap,
    brick: Option<Brick>,
    state: BrickState,
    source: S,
    spawn: Point,
    policy: CollisionPolicy,
    started: bool,
    game_over: bool,
    bricks_spawned: u32,
    rows_cleared: u32,
}

impl<S: BrickSource> Resolver<S> {
    /// Create a resolver over `map`; no brick exists until [`Resolver::start`]
    pub fn new(map: BrickMap, spawn: Point, source: S, policy: CollisionPolicy) -> Self {
        Self {
            map,
            brick: None,
            state: BrickState::Landed,
            source,
            spawn,
            policy,
            started: false,
            game_over: false,
            bricks_spawned: 0,
            rows_cleared: 0,
        }
    }

    /// Spawn the first brick
    pub fn start(&mut self) -> Events {
        let mut events = Events::new();
        if self.started {
            return events;
        }
        self.started = true;
        self.spawn_next(&mut events);
        events
    }

    pub fn map(&self) -> &BrickMap {
        &self.map
    }

    pub fn brick(&self) -> Option<Brick> {
        self.brick
    }

    pub fn state(&self) -> BrickState {
        self.state
    }

    pub fn policy(&self) -> CollisionPolicy {
        self.policy
    }

    pub fn spawn_point(&self) -> Point {
        self.spawn
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn bricks_spawned(&self) -> u32 {
        self.bricks_spawned
    }

    pub fn rows_cleared(&self) -> u32 {
        self.rows_cleared
    }

    /// Resolve one action against the grid
    ///
    /// Returns no events when there is no falling brick (not started, or game over).
    pub fn apply(&mut self, action: BrickAction) -> Events {
        let mut events = Events::new();
        if self.game_over || self.state != BrickState::Falling {
            return events;
        }
        let Some(brick) = self.brick else {
            return events;
        };

        let candidate = brick.apply(action);
        let placement = self.map.placement(&candidate.cells(&self.map));

        match placement {
            Placement::Valid => {
                self.brick = Some(candidate);
                events.push(GameEvent::BrickMoved {
                    brick: candidate,
                    action,
                });
            }
            _ if action == BrickAction::MoveDown => {
                self.land(brick, &mut events);
            }
            _ => {
                if let Some((corrected, correction)) = self.correct(candidate, action) {
                    debug!(
                        "{} corrected by ({}, {})",
                        action.as_str(),
                        correction.x,
                        correction.y
                    );
                    self.brick = Some(corrected);
                    events.push(GameEvent::BrickCorrected {
                        brick: corrected,
                        action,
                        correction,
                    });
                } else {
                    trace!("{} rejected: {:?}", action.as_str(), placement);
                    events.push(GameEvent::BrickCollided {
                        brick,
                        action,
                        placement,
                    });
                }
            }
        }

        events
    }

    /// First nudged candidate that fits, if the policy allows nudging
    fn correct(&self, candidate: Brick, action: BrickAction) -> Option<(Brick, Point)> {
        if self.policy != CollisionPolicy::Correct || !action.is_rotation() {
            return None;
        }

        CORRECTION_OFFSETS.iter().find_map(|&offset| {
            let nudged = candidate.moved_by(offset);
            self.map
                .is_valid_placement(&nudged.cells(&self.map))
                .then_some((nudged, offset))
        })
    }

    /// Merge the brick at its current (pre-move) cells, clear rows, spawn next
    fn land(&mut self, brick: Brick, events: &mut Events) {
        self.state = BrickState::Landed;
        self.brick = None;

        let cells = brick.cells(&self.map);
        let color = self.map.shapes()[brick.shape()].color();
        self.map.merge(&cells, color);
        debug!(
            "brick landed at ({}, {})",
            brick.position().x,
            brick.position().y
        );
        events.push(GameEvent::BrickLanded { brick, cells });

        let cleared = self.map.clear_full_rows();
        if !cleared.is_empty() {
            self.rows_cleared += cleared.count() as u32;
            events.push(GameEvent::rows_cleared(cleared));
        }

        self.spawn_next(events);
    }

    fn spawn_next(&mut self, events: &mut Events) {
        let shapes = self.map.shapes();
        let shape = self.source.next_shape(shapes);
        if shapes.get(shape).is_none() {
            panic!(
                "brick source returned shape {} but the table holds {}",
                shape.index(),
                shapes.len()
            );
        }
        let brick = Brick::spawn(shape, self.spawn);

        if !self.map.is_valid_placement(&brick.cells(&self.map)) {
            info!(
                "game over: no room for {} at spawn",
                self.map.shapes()[shape].name()
            );
            self.game_over = true;
            self.brick = None;
            events.push(GameEvent::GameOver { blocked: brick });
            return;
        }

        self.brick = Some(brick);
        self.state = BrickState::Falling;
        self.bricks_spawned += 1;
        debug!("spawned {}", self.map.shapes()[shape].name());
        events.push(GameEvent::BrickCreated { brick });
    }
}
