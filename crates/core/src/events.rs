//! Outcome events returned by the resolver
//!
//! Events are plain values handed back from each update. Nothing in the core
//! subscribes to them; presentation and effects layers read them at their own pace.

use arrayvec::ArrayVec;
use serde::Serialize;

use crate::brick::Brick;
use crate::grid::{Placement, RowClear};
use crate::shapes::Cells;
use crate::types::{BrickAction, Point, Tile};

/// Events produced by one action (at most landed, rows cleared, spawn)
pub type Events = ArrayVec<GameEvent, 4>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum GameEvent {
    /// A new brick entered the grid at the spawn anchor
    BrickCreated { brick: Brick },
    /// An action was committed unchanged
    BrickMoved { brick: Brick, action: BrickAction },
    /// A rotation was committed after nudging the brick sideways
    BrickCorrected {
        brick: Brick,
        action: BrickAction,
        correction: Point,
    },
    /// An action was rejected; `brick` is the unchanged brick
    BrickCollided {
        brick: Brick,
        action: BrickAction,
        placement: Placement,
    },
    /// The brick could not move down and was merged into the grid
    BrickLanded { brick: Brick, cells: Cells },
    /// Full rows were removed after a landing
    RowsCleared {
        count: usize,
        rows: Vec<i32>,
        removed: Vec<Tile>,
    },
    /// The next brick has no valid placement at the spawn anchor
    GameOver { blocked: Brick },
}

impl GameEvent {
    pub(crate) fn rows_cleared(clear: RowClear) -> Self {
        GameEvent::RowsCleared {
            count: clear.count(),
            rows: clear.rows,
            removed: clear.removed,
        }
    }

    /// Event name, matching the `event` tag in JSON output
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::BrickCreated { .. } => "brickCreated",
            GameEvent::BrickMoved { .. } => "brickMoved",
            GameEvent::BrickCorrected { .. } => "brickCorrected",
            GameEvent::BrickCollided { .. } => "brickCollided",
            GameEvent::BrickLanded { .. } => "brickLanded",
            GameEvent::RowsCleared { .. } => "rowsCleared",
            GameEvent::GameOver { .. } => "gameOver",
        }
    }
}
