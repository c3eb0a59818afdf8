//! Content module - shape tables and spawn anchors loaded from JSON
//!
//! ```json
//! {
//!   "spawn": { "x": 3, "y": 0 },
//!   "shapes": [
//!     { "name": "O", "color": [240, 240, 0], "size": 2,
//!       "cells": [[0, 0], [1, 0], [0, 1], [1, 1]] }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shapes::{BrickShape, ShapeTable};
use crate::types::{Point, TileColor, DEFAULT_SPAWN};

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("invalid content json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("content defines no shapes")]
    NoShapes,
    #[error("shape {name:?} has a zero-sized bounding box")]
    ZeroSize { name: String },
    #[error("shape {name:?} has no cells")]
    EmptyShape { name: String },
    #[error("shape {name:?} has {count} cells, at most 4 are allowed")]
    TooManyCells { name: String, count: usize },
    #[error("shape {name:?} repeats cell ({}, {})", cell.x, cell.y)]
    DuplicateCell { name: String, cell: Point },
    #[error("shape {name:?} cell ({}, {}) lies outside its {size}x{size} box", cell.x, cell.y)]
    CellOutsideBox { name: String, cell: Point, size: u8 },
}

/// Serialized form of one shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeDef {
    pub name: String,
    pub color: TileColor,
    pub size: u8,
    /// `Up` orientation cells as `[x, y]` pairs
    pub cells: Vec<(i32, i32)>,
}

impl ShapeDef {
    pub fn build(&self) -> Result<BrickShape, ContentError> {
        let cells: Vec<Point> = self.cells.iter().copied().map(Point::from).collect();
        BrickShape::new(self.name.clone(), self.color, self.size, &cells)
    }
}

/// Level content: where bricks spawn and which shapes exist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    /// Spawn anchor, if the content sets one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spawn: Option<Point>,
    pub shapes: Vec<ShapeDef>,
}

impl Content {
    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        let content: Content = serde_json::from_str(json)?;
        // Validate eagerly so a bad file fails at load time.
        content.shape_table()?;
        Ok(content)
    }

    /// Spawn anchor for content used on its own: the one it sets, or [`DEFAULT_SPAWN`]
    pub fn spawn_point(&self) -> Point {
        self.spawn.unwrap_or(DEFAULT_SPAWN)
    }

    pub fn shape_table(&self) -> Result<ShapeTable, ContentError> {
        let shapes = self
            .shapes
            .iter()
            .map(ShapeDef::build)
            .collect::<Result<Vec<_>, _>>()?;
        ShapeTable::new(shapes)
    }
}
