//! Effects - how settled tiles should look after each update
//!
//! The core grid stores only plain tiles. This crate decides, from the events of
//! an update, which visual treatment every settled tile gets and whether the
//! screen should shake. It draws nothing; a renderer reads [`EffectState::tiles`].
//!
//! | Trigger | Tiles | Screen shake |
//! |---------|-------|--------------|
//! | [`EffectState::load`] | `Pulsing` | no |
//! | `BrickLanded` within 500ms of a soft drop | `Jittered` | yes |
//! | `BrickLanded` otherwise | `Static` | no |
//! | `RowsCleared`, `BrickCorrected` | `Jittered` | yes |
//! | `GameOver` | `Static` | stops |

use log::debug;
use serde::Serialize;

use piles_core::{GameEvent, GameSnapshot, SimpleRng};
use piles_types::{Tile, SOFT_DROP_SHAKE_WINDOW_MS};

pub use piles_types as types;

/// How long one screen shake lasts
pub const SCREEN_SHAKE_MS: u32 = 250;

/// Visual treatment of one settled tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TileVisualKind {
    Static,
    /// Random offset every frame, driven by `seed`
    Jittered(u32),
    /// Slow breathing motion, phase in degrees [0, 360)
    Pulsing(u16),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VisualTile {
    pub tile: Tile,
    pub kind: TileVisualKind,
}

#[derive(Debug, Clone)]
pub struct EffectState {
    tiles: Vec<VisualTile>,
    rng: SimpleRng,
    since_soft_drop_ms: u32,
    shake_remaining_ms: u32,
    shakes: u32,
}

impl EffectState {
    pub fn new(seed: u32) -> Self {
        Self {
            tiles: Vec::new(),
            rng: SimpleRng::new(seed),
            since_soft_drop_ms: SOFT_DROP_SHAKE_WINDOW_MS,
            shake_remaining_ms: 0,
            shakes: 0,
        }
    }

    /// A level was (re)loaded: settled tiles start pulsing
    pub fn load(&mut self, snapshot: &GameSnapshot) {
        let rng = &mut self.rng;
        self.tiles = snapshot
            .settled
            .iter()
            .map(|&tile| VisualTile {
                tile,
                kind: TileVisualKind::Pulsing(rng.next_range(360) as u16),
            })
            .collect();
    }

    /// The player pushed a soft drop
    pub fn soft_drop_pressed(&mut self) {
        self.since_soft_drop_ms = 0;
    }

    /// Advance effect timers
    pub fn update(&mut self, elapsed_ms: u32) {
        self.since_soft_drop_ms = self.since_soft_drop_ms.saturating_add(elapsed_ms);
        self.shake_remaining_ms = self.shake_remaining_ms.saturating_sub(elapsed_ms);
    }

    /// Apply one event; `snapshot` is the state after the update that produced it
    pub fn handle(&mut self, event: &GameEvent, snapshot: &GameSnapshot) {
        match event {
            GameEvent::BrickLanded { .. } => {
                if self.since_soft_drop_ms < SOFT_DROP_SHAKE_WINDOW_MS {
                    self.jitter(snapshot);
                } else {
                    self.settle(snapshot);
                }
            }
            GameEvent::RowsCleared { .. } | GameEvent::BrickCorrected { .. } => {
                self.jitter(snapshot);
            }
            GameEvent::GameOver { .. } => {
                self.shake_remaining_ms = 0;
                self.settle(snapshot);
            }
            GameEvent::BrickCreated { .. }
            | GameEvent::BrickMoved { .. }
            | GameEvent::BrickCollided { .. } => {}
        }
    }

    fn settle(&mut self, snapshot: &GameSnapshot) {
        self.tiles = snapshot
            .settled
            .iter()
            .map(|&tile| VisualTile {
                tile,
                kind: TileVisualKind::Static,
            })
            .collect();
    }

    fn jitter(&mut self, snapshot: &GameSnapshot) {
        let rng = &mut self.rng;
        self.tiles = snapshot
            .settled
            .iter()
            .map(|&tile| VisualTile {
                tile,
                kind: TileVisualKind::Jittered(rng.next_u32()),
            })
            .collect();
        self.shake_remaining_ms = SCREEN_SHAKE_MS;
        self.shakes += 1;
        debug!("screen shake");
    }

    pub fn tiles(&self) -> &[VisualTile] {
        &self.tiles
    }

    pub fn screen_shaking(&self) -> bool {
        self.shake_remaining_ms > 0
    }

    /// Number of shakes started so far
    pub fn shakes(&self) -> u32 {
        self.shakes
    }
}

impl Default for EffectState {
    fn default() -> Self {
        Self::new(1)
    }
}
