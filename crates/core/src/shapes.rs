//! Shapes module - canonical brick shapes and their four orientations
//!
//! A shape is defined by its cells in the `Up` orientation inside a square
//! bounding box. The other orientations are derived by rotating clockwise inside
//! that box, so every orientation holds the same cells rotated (never mirrored).

use std::ops::Index;

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::content::ContentError;
use crate::types::{Direction, Point, TileColor};

/// Maximum number of cells in one brick
pub const MAX_SHAPE_CELLS: usize = 4;

/// Cells of one brick orientation, either as offsets or as grid positions
pub type Cells = ArrayVec<Point, MAX_SHAPE_CELLS>;

/// Handle to a shape inside a [`ShapeTable`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShapeId(pub(crate) usize);

impl ShapeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// One brick shape with precomputed orientations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrickShape {
    name: String,
    color: TileColor,
    size: u8,
    /// Offsets indexed by `Direction::quarter_turns()`
    rotations: [Cells; 4],
}

impl BrickShape {
    /// Build a shape from its `Up` cells inside a `size` x `size` box
    pub fn new(
        name: impl Into<String>,
        color: TileColor,
        size: u8,
        up: &[Point],
    ) -> Result<Self, ContentError> {
        let name = name.into();

        if size == 0 {
            return Err(ContentError::ZeroSize { name });
        }
        if up.is_empty() {
            return Err(ContentError::EmptyShape { name });
        }
        if up.len() > MAX_SHAPE_CELLS {
            return Err(ContentError::TooManyCells {
                name,
                count: up.len(),
            });
        }

        let mut base = Cells::new();
        for &cell in up {
            let inside = (0..size as i32).contains(&cell.x) && (0..size as i32).contains(&cell.y);
            if !inside {
                return Err(ContentError::CellOutsideBox { name, cell, size });
            }
            if base.contains(&cell) {
                return Err(ContentError::DuplicateCell { name, cell });
            }
            base.push(cell);
        }

        let right = rotate_cw_in_box(&base, size);
        let down = rotate_cw_in_box(&right, size);
        let left = rotate_cw_in_box(&down, size);

        Ok(Self {
            name,
            color,
            size,
            rotations: [base, right, down, left],
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> TileColor {
        self.color
    }

    pub fn size(&self) -> u8 {
        self.size
    }

    /// Cell offsets for the given orientation
    pub fn offsets(&self, direction: Direction) -> &[Point] {
        &self.rotations[direction.quarter_turns()]
    }
}

/// Quarter turn clockwise inside the bounding box (+y is down)
fn rotate_cw_in_box(cells: &Cells, size: u8) -> Cells {
    let last = size as i32 - 1;
    cells.iter().map(|c| Point::new(last - c.y, c.x)).collect()
}

/// Ordered set of shapes a game draws from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeTable {
    shapes: Vec<BrickShape>,
}

impl ShapeTable {
    pub fn new(shapes: Vec<BrickShape>) -> Result<Self, ContentError> {
        if shapes.is_empty() {
            return Err(ContentError::NoShapes);
        }
        Ok(Self { shapes })
    }

    /// The seven tetrominoes
    ///
    /// Orientations match the usual SRS tables, e.g. T facing right is
    /// `(1,0) (1,1) (2,1) (1,2)`.
    pub fn standard() -> Self {
        let p = |cells: [(i32, i32); 4]| cells.map(Point::from);
        let defs: [(&str, TileColor, u8, [Point; 4]); 7] = [
            ("I", TileColor::CYAN, 4, p([(0, 1), (1, 1), (2, 1), (3, 1)])),
            ("O", TileColor::YELLOW, 2, p([(0, 0), (1, 0), (0, 1), (1, 1)])),
            ("T", TileColor::MAGENTA, 3, p([(1, 0), (0, 1), (1, 1), (2, 1)])),
            ("S", TileColor::GREEN, 3, p([(1, 0), (2, 0), (0, 1), (1, 1)])),
            ("Z", TileColor::RED, 3, p([(0, 0), (1, 0), (1, 1), (2, 1)])),
            ("J", TileColor::BLUE, 3, p([(0, 0), (0, 1), (1, 1), (2, 1)])),
            ("L", TileColor::ORANGE, 3, p([(2, 0), (0, 1), (1, 1), (2, 1)])),
        ];

        let shapes = defs
            .into_iter()
            .filter_map(|(name, color, size, cells)| BrickShape::new(name, color, size, &cells).ok())
            .collect();
        Self { shapes }
    }

    /// A table holding a single shape
    pub fn single(shape: BrickShape) -> Self {
        Self {
            shapes: vec![shape],
        }
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn get(&self, id: ShapeId) -> Option<&BrickShape> {
        self.shapes.get(id.0)
    }

    /// Id of the shape at `index`, if the table has one
    pub fn id(&self, index: usize) -> Option<ShapeId> {
        (index < self.shapes.len()).then_some(ShapeId(index))
    }

    /// Look up a shape by name (case-sensitive)
    pub fn find(&self, name: &str) -> Option<ShapeId> {
        self.shapes
            .iter()
            .position(|s| s.name == name)
            .map(ShapeId)
    }

    pub fn ids(&self) -> impl Iterator<Item = ShapeId> + '_ {
        (0..self.shapes.len()).map(ShapeId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ShapeId, &BrickShape)> + '_ {
        self.shapes.iter().enumerate().map(|(i, s)| (ShapeId(i), s))
    }
}

impl Default for ShapeTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl Index<ShapeId> for ShapeTable {
    type Output = BrickShape;

    /// Panics when the id came from a different, smaller table.
    fn index(&self, id: ShapeId) -> &BrickShape {
        &self.shapes[id.0]
    }
}
