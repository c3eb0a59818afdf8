//! Grid module - the BrickMap holding settled tiles
//!
//! The grid is `width` x `height` cells stored as a flat row-major array.
//! Coordinates: (x, y) where x ranges 0..width (left to right) and y ranges
//! 0..height (top to bottom).
//!
//! The grid also owns the shape table, so it is the one place that turns a
//! (shape, orientation, anchor) triple into grid cells.

use log::debug;
use serde::Serialize;
use thiserror::Error;

use crate::shapes::{Cells, ShapeId, ShapeTable};
use crate::types::{Direction, Point, Tile, TileColor, TileState};

/// Outcome of checking a set of cells against the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Placement {
    Valid,
    /// At least one cell lies outside the grid
    OutOfBounds,
    /// All cells are inside, at least one is already settled
    Overlap,
}

impl Placement {
    pub fn is_valid(&self) -> bool {
        matches!(self, Placement::Valid)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MergeError {
    #[error("cell ({}, {}) is outside the grid", .0.x, .0.y)]
    OutOfBounds(Point),
    #[error("cell ({}, {}) is already settled", .0.x, .0.y)]
    Occupied(Point),
}

/// Result of a row-clear pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RowClear {
    /// Cleared row indices in pre-clear coordinates, bottom to top
    pub rows: Vec<i32>,
    /// Removed tiles at their pre-clear positions, marked for clear
    pub removed: Vec<Tile>,
}

impl RowClear {
    pub fn count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// The settled-tile grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrickMap {
    width: u16,
    height: u16,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Option<Tile>>,
    shapes: ShapeTable,
}

impl BrickMap {
    /// Create an empty grid
    ///
    /// Panics on a zero width or height; configuration loading rejects those
    /// before a grid is built.
    pub fn new(width: u16, height: u16, shapes: ShapeTable) -> Self {
        assert!(width > 0 && height > 0, "grid must be at least 1x1");
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
            shapes,
        }
    }

    /// Calculate flat index from a position
    #[inline(always)]
    fn index(&self, p: Point) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some(p.y as usize * self.width as usize + p.x as usize)
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn shapes(&self) -> &ShapeTable {
        &self.shapes
    }

    /// Whether the position lies inside [0,width) x [0,height)
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.x < self.width as i32 && p.y >= 0 && p.y < self.height as i32
    }

    /// Settled tile at `p`, if any
    pub fn settled(&self, p: Point) -> Option<&Tile> {
        self.index(p).and_then(|idx| self.cells[idx].as_ref())
    }

    /// Tile at `p`: the settled tile, or an `Empty` one for a vacant cell.
    /// Returns None if out of bounds.
    pub fn tile(&self, p: Point) -> Option<Tile> {
        let idx = self.index(p)?;
        Some(
            self.cells[idx]
                .unwrap_or_else(|| Tile::new(p, TileColor::default(), TileState::Empty)),
        )
    }

    /// Check if position is occupied (within bounds and settled)
    pub fn is_occupied(&self, p: Point) -> bool {
        self.settled(p).is_some()
    }

    /// Settle a single tile, replacing whatever was there.
    /// Returns false if out of bounds.
    pub fn set(&mut self, p: Point, color: TileColor) -> bool {
        match self.index(p) {
            Some(idx) => {
                self.cells[idx] = Some(Tile::filled(p, color));
                true
            }
            None => false,
        }
    }

    /// Remove the tile at `p`. Returns the removed tile.
    pub fn remove(&mut self, p: Point) -> Option<Tile> {
        let idx = self.index(p)?;
        self.cells[idx].take()
    }

    /// Cells a shape covers when anchored at `position` facing `direction`
    pub fn shape_cells(&self, shape: ShapeId, direction: Direction, position: Point) -> Cells {
        self.shapes[shape]
            .offsets(direction)
            .iter()
            .map(|&offset| position + offset)
            .collect()
    }

    /// Classify a set of cells against bounds and settled tiles
    pub fn placement(&self, cells: &[Point]) -> Placement {
        if cells.iter().any(|&c| !self.contains(c)) {
            return Placement::OutOfBounds;
        }
        if cells.iter().any(|&c| self.is_occupied(c)) {
            return Placement::Overlap;
        }
        Placement::Valid
    }

    /// True iff every cell is inside the grid and none is settled
    pub fn is_valid_placement(&self, cells: &[Point]) -> bool {
        self.placement(cells).is_valid()
    }

    /// Settle every cell with the given color, or change nothing
    pub fn try_merge(&mut self, cells: &[Point], color: TileColor) -> Result<(), MergeError> {
        // First check if all positions are valid
        for &cell in cells {
            if !self.contains(cell) {
                return Err(MergeError::OutOfBounds(cell));
            }
            if self.is_occupied(cell) {
                return Err(MergeError::Occupied(cell));
            }
        }

        // Then settle all cells
        for &cell in cells {
            self.set(cell, color);
        }
        debug!("merged {} cells into grid", cells.len());
        Ok(())
    }

    /// Settle every cell with the given color
    ///
    /// Panics if any cell is outside the grid or already settled: callers must
    /// validate the placement first.
    pub fn merge(&mut self, cells: &[Point], color: TileColor) {
        if let Err(err) = self.try_merge(cells, color) {
            panic!("merge after skipped collision check: {err}");
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: i32) -> bool {
        if y < 0 || y >= self.height as i32 {
            return false;
        }
        let width = self.width as usize;
        let start = y as usize * width;
        self.cells[start..start + width].iter().all(Option::is_some)
    }

    /// Indices of full rows, bottom to top
    pub fn full_rows(&self) -> Vec<i32> {
        (0..self.height as i32)
            .rev()
            .filter(|&y| self.is_row_full(y))
            .collect()
    }

    /// Clear all full rows and drop everything above them
    ///
    /// One bottom-to-top two-pointer pass: each surviving row is copied to the
    /// next free write row, so shifts are computed against the original rows and
    /// any number of full rows (adjacent or not) clears in one call.
    pub fn clear_full_rows(&mut self) -> RowClear {
        let mut cleared = RowClear::default();
        let width = self.width as usize;
        let mut write_y = self.height as usize;

        for read_y in (0..self.height as usize).rev() {
            let start = read_y * width;
            if self.is_row_full(read_y as i32) {
                cleared.rows.push(read_y as i32);
                cleared.removed.extend(
                    self.cells[start..start + width]
                        .iter_mut()
                        .filter_map(Option::take)
                        .map(|t| t.with_state(TileState::MarkedForClear)),
                );
            } else {
                write_y -= 1;
                if write_y != read_y {
                    for x in 0..width {
                        let moved = self.cells[start + x]
                            .take()
                            .map(|t| t.with_position(Point::new(x as i32, write_y as i32)));
                        self.cells[write_y * width + x] = moved;
                    }
                }
            }
        }

        // Clear the remaining rows at the top
        for cell in &mut self.cells[..write_y * width] {
            *cell = None;
        }

        if !cleared.is_empty() {
            debug!("cleared rows {:?}", cleared.rows);
        }
        cleared
    }

    /// All settled tiles in row-major order
    pub fn settled_tiles(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.cells.iter().flatten()
    }

    pub fn settled_count(&self) -> usize {
        self.settled_tiles().count()
    }

    /// Remove every settled tile
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }

    /// Rows as text, `#` for settled and `.` for vacant cells
    pub fn rows_text(&self) -> Vec<String> {
        self.cells
            .chunks(self.width as usize)
            .map(|row| {
                row.iter()
                    .map(|c| if c.is_some() { '#' } else { '.' })
                    .collect::<String>()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::BrickShape;

    fn square_table() -> ShapeTable {
        let cells = [(0, 0), (1, 0), (0, 1), (1, 1)].map(Point::from);
        ShapeTable::single(BrickShape::new("square", TileColor::YELLOW, 2, &cells).unwrap())
    }

    fn fill_row(map: &mut BrickMap, y: i32, skip: Option<i32>) {
        for x in 0..map.width() as i32 {
            if Some(x) != skip {
                map.set(Point::new(x, y), TileColor::RED);
            }
        }
    }

    #[test]
    fn index_calculation() {
        let map = BrickMap::new(4, 6, square_table());
        assert_eq!(map.index(Point::new(0, 0)), Some(0));
        assert_eq!(map.index(Point::new(3, 0)), Some(3));
        assert_eq!(map.index(Point::new(0, 1)), Some(4));
        assert_eq!(map.index(Point::new(3, 5)), Some(23));
        assert_eq!(map.index(Point::new(-1, 0)), None);
        assert_eq!(map.index(Point::new(4, 0)), None);
        assert_eq!(map.index(Point::new(0, 6)), None);
    }

    #[test]
    fn vacant_cells_read_as_empty_tiles() {
        let map = BrickMap::new(4, 6, square_table());
        let t = map.tile(Point::new(2, 3)).unwrap();
        assert_eq!(t.state(), TileState::Empty);
        assert_eq!(t.position(), Point::new(2, 3));
        assert!(map.tile(Point::new(9, 9)).is_none());
    }

    #[test]
    fn placement_reports_the_failing_rule() {
        let mut map = BrickMap::new(4, 6, square_table());
        map.set(Point::new(1, 1), TileColor::RED);

        let inside = [Point::new(0, 0), Point::new(0, 1)];
        let overlap = [Point::new(1, 1), Point::new(2, 1)];
        let outside = [Point::new(3, 0), Point::new(4, 0)];
        let both = [Point::new(1, 1), Point::new(-1, 1)];

        assert_eq!(map.placement(&inside), Placement::Valid);
        assert_eq!(map.placement(&overlap), Placement::Overlap);
        assert_eq!(map.placement(&outside), Placement::OutOfBounds);
        assert_eq!(map.placement(&both), Placement::OutOfBounds);
    }

    #[test]
    fn try_merge_is_all_or_nothing() {
        let mut map = BrickMap::new(4, 6, square_table());
        map.set(Point::new(2, 5), TileColor::RED);

        let cells = [Point::new(1, 5), Point::new(2, 5)];
        assert_eq!(
            map.try_merge(&cells, TileColor::BLUE),
            Err(MergeError::Occupied(Point::new(2, 5)))
        );
        assert!(!map.is_occupied(Point::new(1, 5)));
        assert_eq!(map.settled_count(), 1);
    }

    #[test]
    #[should_panic(expected = "already settled")]
    fn merge_onto_settled_cell_panics() {
        let mut map = BrickMap::new(4, 6, square_table());
        map.set(Point::new(0, 0), TileColor::RED);
        map.merge(&[Point::new(0, 0)], TileColor::BLUE);
    }

    #[test]
    #[should_panic(expected = "outside the grid")]
    fn merge_outside_grid_panics() {
        let mut map = BrickMap::new(4, 6, square_table());
        map.merge(&[Point::new(0, 6)], TileColor::BLUE);
    }

    #[test]
    fn clear_single_row_shifts_above() {
        let mut map = BrickMap::new(4, 6, square_table());
        fill_row(&mut map, 5, None);
        map.set(Point::new(2, 4), TileColor::GREEN);

        let cleared = map.clear_full_rows();
        assert_eq!(cleared.rows, vec![5]);
        assert_eq!(cleared.removed.len(), 4);
        assert!(cleared
            .removed
            .iter()
            .all(|t| t.state() == TileState::MarkedForClear && t.position().y == 5));

        let moved = map.settled(Point::new(2, 5)).unwrap();
        assert_eq!(moved.color(), TileColor::GREEN);
        assert_eq!(moved.position(), Point::new(2, 5));
        assert_eq!(map.settled_count(), 1);
    }

    #[test]
    fn clear_non_adjacent_rows() {
        let mut map = BrickMap::new(4, 6, square_table());
        fill_row(&mut map, 5, None);
        fill_row(&mut map, 4, Some(0));
        fill_row(&mut map, 3, None);
        map.set(Point::new(1, 2), TileColor::GREEN);

        let cleared = map.clear_full_rows();
        assert_eq!(cleared.rows, vec![5, 3]);
        assert_eq!(
            map.rows_text(),
            vec!["....", "....", "....", "....", ".#..", ".###"]
        );
        for tile in map.settled_tiles() {
            assert!(map.contains(tile.position()));
            assert_eq!(map.settled(tile.position()), Some(tile));
        }
    }

    #[test]
    fn clear_without_full_rows_is_noop() {
        let mut map = BrickMap::new(4, 6, square_table());
        fill_row(&mut map, 5, Some(3));
        let before = map.clone();
        assert!(map.clear_full_rows().is_empty());
        assert_eq!(map, before);
    }

    #[test]
    fn full_rows_are_listed_bottom_up() {
        let mut map = BrickMap::new(3, 4, square_table());
        fill_row(&mut map, 1, None);
        fill_row(&mut map, 3, None);
        assert_eq!(map.full_rows(), vec![3, 1]);
        assert!(!map.is_row_full(-1));
        assert!(!map.is_row_full(4));
    }

    #[test]
    fn shape_cells_are_offset_by_anchor() {
        let map = BrickMap::new(4, 6, square_table());
        let id = map.shapes().id(0).unwrap();
        let cells = map.shape_cells(id, Direction::Up, Point::new(1, 0));
        assert_eq!(
            cells.as_slice(),
            &[Point::new(1, 0), Point::new(2, 0), Point::new(1, 1), Point::new(2, 1)]
        );
    }
}
