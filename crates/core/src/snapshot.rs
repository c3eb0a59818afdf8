//! Owned, read-only views handed to presentation after each update

use serde::Serialize;

use crate::brick::Brick;
use crate::grid::BrickMap;
use crate::resolver::{BrickState, Resolver};
use crate::rng::BrickSource;
use crate::types::{Direction, Point, Tile};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrickSnapshot {
    pub shape: String,
    pub position: Point,
    pub direction: Direction,
    pub tiles: Vec<Tile>,
}

impl BrickSnapshot {
    pub fn new(brick: &Brick, map: &BrickMap) -> Self {
        Self {
            shape: map.shapes()[brick.shape()].name().to_owned(),
            position: brick.position(),
            direction: brick.direction(),
            tiles: brick.tiles(map).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub width: u16,
    pub height: u16,
    pub settled: Vec<Tile>,
    pub brick: Option<BrickSnapshot>,
    pub state: BrickState,
    pub game_over: bool,
    pub bricks_spawned: u32,
    pub rows_cleared: u32,
}

impl GameSnapshot {
    pub fn capture<S: BrickSource>(resolver: &Resolver<S>) -> Self {
        let map = resolver.map();
        Self {
            width: map.width(),
            height: map.height(),
            settled: map.settled_tiles().copied().collect(),
            brick: resolver.brick().map(|b| BrickSnapshot::new(&b, map)),
            state: resolver.state(),
            game_over: resolver.game_over(),
            bricks_spawned: resolver.bricks_spawned(),
            rows_cleared: resolver.rows_cleared(),
        }
    }

    pub fn playable(&self) -> bool {
        !self.game_over && self.brick.is_some()
    }

    /// Rows as text: `#` settled, `@` falling brick, `.` vacant
    pub fn rows_text(&self) -> Vec<String> {
        let (w, h) = (self.width as usize, self.height as usize);
        let mut rows = vec![vec!['.'; w]; h];

        let mut paint = |t: &Tile, c: char| {
            let p = t.position();
            if p.x >= 0 && (p.x as usize) < w && p.y >= 0 && (p.y as usize) < h {
                rows[p.y as usize][p.x as usize] = c;
            }
        };
        for t in &self.settled {
            paint(t, '#');
        }
        if let Some(brick) = &self.brick {
            for t in &brick.tiles {
                paint(t, '@');
            }
        }

        rows.into_iter().map(|r| r.into_iter().collect()).collect()
    }
}
