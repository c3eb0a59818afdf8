//! Brick module - the falling piece
//!
//! A brick is only an anchor, an orientation and a shape handle. Its cells are
//! never stored: every query projects the shape through the grid again.
//! Actions produce a candidate brick and leave the original untouched, so nothing
//! moves until the resolver has checked the candidate.

use serde::Serialize;

use crate::grid::BrickMap;
use crate::shapes::{Cells, ShapeId};
use crate::types::{BrickAction, Direction, Point, Tile};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Brick {
    shape: ShapeId,
    position: Point,
    direction: Direction,
}

impl Brick {
    pub fn new(shape: ShapeId, position: Point, direction: Direction) -> Self {
        Self {
            shape,
            position,
            direction,
        }
    }

    /// A freshly spawned brick, facing up
    pub fn spawn(shape: ShapeId, position: Point) -> Self {
        Self::new(shape, position, Direction::Up)
    }

    pub fn shape(&self) -> ShapeId {
        self.shape
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Candidate brick after `action`
    #[must_use]
    pub fn apply(&self, action: BrickAction) -> Brick {
        match action {
            BrickAction::RotateClockWise => Brick {
                direction: self.direction.rotate_cw(),
                ..*self
            },
            BrickAction::RotateCounterClockWise => Brick {
                direction: self.direction.rotate_ccw(),
                ..*self
            },
            BrickAction::MoveLeft | BrickAction::MoveRight | BrickAction::MoveDown => {
                self.moved_by(action.offset())
            }
        }
    }

    /// Candidate brick shifted by `offset`
    #[must_use]
    pub fn moved_by(&self, offset: Point) -> Brick {
        Brick {
            position: self.position + offset,
            ..*self
        }
    }

    /// Grid cells this brick covers
    pub fn cells(&self, map: &BrickMap) -> Cells {
        map.shape_cells(self.shape, self.direction, self.position)
    }

    /// Tiles this brick covers, recomputed on every call
    pub fn tiles<'a>(&self, map: &'a BrickMap) -> impl Iterator<Item = Tile> + 'a {
        let color = map.shapes()[self.shape].color();
        self.cells(map)
            .into_iter()
            .map(move |p| Tile::filled(p, color))
    }
}
