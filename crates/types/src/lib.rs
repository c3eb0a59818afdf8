//! Shared value types - tiles, directions, actions and tuning constants
//!
//! Everything here is plain data. The types are shared by the core rules, the
//! session driver, the effects layer and the headless runner.
//!
//! # Coordinates
//!
//! Grid coordinates are `(x, y)` with `x` growing to the right and `y` growing
//! downward. Row `0` is the top of the grid.
//!
//! # Default Grid
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19)
//! - **Spawn anchor**: (3, 0)
//!
//! # Gravity
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `BASE_DROP_MS` | 1000 | Gravity at level 0 |
//! | `DROP_INTERVAL_MIN_MS` | 100 | Gravity never gets faster than this |
//! | `ROWS_PER_LEVEL` | 10 | Cleared rows needed to advance one level |
//!
//! # Examples
//!
//! ```
//! use piles_types::{BrickAction, Direction, Point};
//!
//! let d = Direction::Up;
//! assert_eq!(d.rotate_cw(), Direction::Right);
//! assert_eq!(d.rotate_cw().rotate_ccw(), d);
//!
//! assert_eq!(BrickAction::from_str("moveLeft"), Some(BrickAction::MoveLeft));
//! assert_eq!(BrickAction::MoveDown.offset(), Point::new(0, 1));
//! ```

use std::ops::{Add, Neg, Sub};

use serde::{Deserialize, Serialize};

/// Default grid width in cells
pub const DEFAULT_WIDTH: u16 = 10;

/// Default grid height in cells
pub const DEFAULT_HEIGHT: u16 = 20;

/// Default spawn anchor for new bricks
pub const DEFAULT_SPAWN: Point = Point { x: 3, y: 0 };

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Base gravity interval at level 0 (1000ms = 1 second per row)
pub const BASE_DROP_MS: u32 = 1000;

/// Drop intervals by level (milliseconds per row)
///
/// Index 0 = Level 0, Index 8 = Level 8+
pub const DROP_INTERVALS: [u32; 9] = [1000, 800, 650, 500, 400, 320, 250, 200, 160];

/// Absolute minimum drop interval (100ms)
pub const DROP_INTERVAL_MIN_MS: u32 = 100;

/// Cleared rows needed to advance one level
pub const ROWS_PER_LEVEL: u32 = 10;

/// A landing within this window after a soft drop shakes the screen.
pub const SOFT_DROP_SHAKE_WINDOW_MS: u32 = 500;

/// Integer grid position (or offset)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Point::new(x, y)
    }
}

/// Orientation of a brick
///
/// - **Up**: Spawn orientation
/// - **Right**: Rotated 90° clockwise
/// - **Down**: Rotated 180°
/// - **Left**: Rotated 90° counter-clockwise
///
/// The rotation cycle goes: Up → Right → Down → Left → Up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// All four directions in clockwise order starting at `Up`
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use piles_types::Direction;
    ///
    /// assert_eq!(Direction::Up.rotate_cw(), Direction::Right);
    /// assert_eq!(Direction::Right.rotate_cw(), Direction::Down);
    /// assert_eq!(Direction::Down.rotate_cw(), Direction::Left);
    /// assert_eq!(Direction::Left.rotate_cw(), Direction::Up);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Direction::Up => Direction::Right,
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Up,
        }
    }

    /// Rotate counter-clockwise (-90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use piles_types::Direction;
    ///
    /// assert_eq!(Direction::Up.rotate_ccw(), Direction::Left);
    /// assert_eq!(Direction::Left.rotate_ccw(), Direction::Down);
    /// assert_eq!(Direction::Down.rotate_ccw(), Direction::Right);
    /// assert_eq!(Direction::Right.rotate_ccw(), Direction::Up);
    /// ```
    pub fn rotate_ccw(&self) -> Self {
        match self {
            Direction::Up => Direction::Left,
            Direction::Left => Direction::Down,
            Direction::Down => Direction::Right,
            Direction::Right => Direction::Up,
        }
    }

    /// Number of clockwise quarter turns from `Up`
    pub fn quarter_turns(&self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Right => 1,
            Direction::Down => 2,
            Direction::Left => 3,
        }
    }

    /// Parse direction from string
    ///
    /// Accepts full names or single letters (case-insensitive):
    /// "up" | "u", "right" | "r", "down" | "d", "left" | "l"
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" | "u" => Some(Direction::Up),
            "right" | "r" => Some(Direction::Right),
            "down" | "d" => Some(Direction::Down),
            "left" | "l" => Some(Direction::Left),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Right => "right",
            Direction::Down => "down",
            Direction::Left => "left",
        }
    }
}

/// Actions that can be applied to the falling brick
///
/// Player input and gravity both produce these; they share one serial queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BrickAction {
    /// Rotate brick 90° clockwise
    RotateClockWise,
    /// Rotate brick 90° counter-clockwise
    RotateCounterClockWise,
    /// Move brick one cell left
    MoveLeft,
    /// Move brick one cell right
    MoveRight,
    /// Move brick one cell down (gravity uses this too)
    MoveDown,
}

impl BrickAction {
    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use piles_types::BrickAction;
    ///
    /// assert_eq!(BrickAction::from_str("moveDown"), Some(BrickAction::MoveDown));
    /// assert_eq!(BrickAction::from_str("rotatecw"), Some(BrickAction::RotateClockWise));
    /// assert_eq!(BrickAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "rotateclockwise" | "rotatecw" => Some(BrickAction::RotateClockWise),
            "rotatecounterclockwise" | "rotateccw" => Some(BrickAction::RotateCounterClockWise),
            "moveleft" => Some(BrickAction::MoveLeft),
            "moveright" => Some(BrickAction::MoveRight),
            "movedown" => Some(BrickAction::MoveDown),
            _ => None,
        }
    }

    /// Parse the single-letter script form used by the headless runner
    ///
    /// `L` left, `R` right, `D` down, `C` clockwise, `A` counter-clockwise.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'L' => Some(BrickAction::MoveLeft),
            'R' => Some(BrickAction::MoveRight),
            'D' => Some(BrickAction::MoveDown),
            'C' => Some(BrickAction::RotateClockWise),
            'A' => Some(BrickAction::RotateCounterClockWise),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BrickAction::RotateClockWise => "rotateClockWise",
            BrickAction::RotateCounterClockWise => "rotateCounterClockWise",
            BrickAction::MoveLeft => "moveLeft",
            BrickAction::MoveRight => "moveRight",
            BrickAction::MoveDown => "moveDown",
        }
    }

    /// Position delta of a move; zero for rotations
    pub fn offset(&self) -> Point {
        match self {
            BrickAction::MoveLeft => Point::new(-1, 0),
            BrickAction::MoveRight => Point::new(1, 0),
            BrickAction::MoveDown => Point::new(0, 1),
            BrickAction::RotateClockWise | BrickAction::RotateCounterClockWise => Point::ZERO,
        }
    }

    pub fn is_rotation(&self) -> bool {
        matches!(
            self,
            BrickAction::RotateClockWise | BrickAction::RotateCounterClockWise
        )
    }
}

/// Visual tag of a tile, serialized as `[r, g, b]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TileColor(pub u8, pub u8, pub u8);

impl TileColor {
    pub const CYAN: TileColor = TileColor(0, 240, 240);
    pub const YELLOW: TileColor = TileColor(240, 240, 0);
    pub const MAGENTA: TileColor = TileColor(160, 0, 240);
    pub const GREEN: TileColor = TileColor(0, 240, 0);
    pub const RED: TileColor = TileColor(240, 0, 0);
    pub const BLUE: TileColor = TileColor(0, 0, 240);
    pub const ORANGE: TileColor = TileColor(240, 160, 0);
}

/// Lifecycle state of a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TileState {
    /// Vacant in-bounds cell
    #[default]
    Empty,
    /// Settled or brick-owned cell
    Filled,
    /// Part of a row that has just been cleared
    MarkedForClear,
}

/// One grid cell's data
///
/// Tiles are values. Changing the position, color or state produces a new tile;
/// nothing mutates a tile in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    position: Point,
    color: TileColor,
    state: TileState,
}

impl Tile {
    pub const fn new(position: Point, color: TileColor, state: TileState) -> Self {
        Self {
            position,
            color,
            state,
        }
    }

    /// A filled tile, the kind a grid settles
    pub const fn filled(position: Point, color: TileColor) -> Self {
        Self::new(position, color, TileState::Filled)
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn color(&self) -> TileColor {
        self.color
    }

    pub fn state(&self) -> TileState {
        self.state
    }

    pub fn is_filled(&self) -> bool {
        self.state != TileState::Empty
    }

    #[must_use]
    pub fn with_position(self, position: Point) -> Self {
        Self { position, ..self }
    }

    #[must_use]
    pub fn with_color(self, color: TileColor) -> Self {
        Self { color, ..self }
    }

    #[must_use]
    pub fn with_state(self, state: TileState) -> Self {
        Self { state, ..self }
    }
}
