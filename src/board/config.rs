//! Validated board layout configuration.
//!
//! A `BoardConfig` holds four occupancy grids, one per quadrant. Each cell
//! is either present (a field will exist there) or absent. The shared row
//! and column counts keep opposing quadrants the same size.
//!
//! ## Invariants
//!
//! Every mutation re-applies two corrections, in this order:
//!
//! 1. **Reachability**: scanning a column from the far edge toward the
//!    meridian, every cell between the first present cell and the meridian
//!    is forced present. This intentionally overrides cells explicitly set
//!    absent beneath a present one; the symmetry pass depends on it having
//!    run first.
//! 2. **Meridian symmetry**: the local-row-0 cells of each vertical
//!    quadrant pair (NE/SE, NW/SW) are OR-ed together column by column, so
//!    both boards agree along the line they face across.
//!
//! Shrinking below one row or one column per direction is rejected with a
//! warning and no state change.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::{Direction, GameRng, Quadrant};

/// Minimum row count per growth direction.
pub const MIN_ROWS: usize = 1;
/// Minimum column count per growth direction.
pub const MIN_COLUMNS: usize = 1;

/// World-space cell extent, consumed only by the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CellSize {
    pub width: f32,
    pub height: f32,
}

impl Default for CellSize {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
        }
    }
}

/// A single quadrant's occupancy grid.
///
/// Row 0 is the row nearest the meridian; column 0 is the column nearest
/// the board's vertical center line. Growth happens at the far edges.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuadrantGrid {
    rows: usize,
    cols: usize,
    cells: Vec<u8>,
}

impl QuadrantGrid {
    /// Create an all-absent grid.
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![0; rows * cols],
        }
    }

    /// Create an all-present grid.
    #[must_use]
    pub fn filled(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![1; rows * cols],
        }
    }

    /// Row count.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Column count.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Whether the cell at (row, col) is present.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> bool {
        debug_assert!(row < self.rows && col < self.cols);
        self.cells[row * self.cols + col] != 0
    }

    /// Set the cell at (row, col).
    pub fn set(&mut self, row: usize, col: usize, present: bool) {
        debug_assert!(row < self.rows && col < self.cols);
        self.cells[row * self.cols + col] = u8::from(present);
    }

    /// Number of present cells.
    #[must_use]
    pub fn present_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != 0).count()
    }

    /// Set every cell to `present`.
    pub fn set_all(&mut self, present: bool) {
        self.cells.fill(u8::from(present));
    }

    /// Randomize every cell with a 50% presence chance.
    pub fn randomize(&mut self, rng: &mut GameRng) {
        for cell in &mut self.cells {
            *cell = u8::from(rng.gen_bool(0.5));
        }
    }

    fn add_row(&mut self) {
        self.rows += 1;
        self.cells.extend(std::iter::repeat(0).take(self.cols));
    }

    fn remove_row(&mut self) {
        debug_assert!(self.rows > MIN_ROWS);
        self.rows -= 1;
        self.cells.truncate(self.rows * self.cols);
    }

    fn add_col(&mut self) {
        let mut cells = Vec::with_capacity(self.rows * (self.cols + 1));
        for row in 0..self.rows {
            cells.extend_from_slice(&self.cells[row * self.cols..(row + 1) * self.cols]);
            cells.push(0);
        }
        self.cols += 1;
        self.cells = cells;
    }

    fn remove_col(&mut self) {
        debug_assert!(self.cols > MIN_COLUMNS);
        let mut cells = Vec::with_capacity(self.rows * (self.cols - 1));
        for row in 0..self.rows {
            cells.extend_from_slice(&self.cells[row * self.cols..(row + 1) * self.cols - 1]);
        }
        self.cols -= 1;
        self.cells = cells;
    }

    /// Force every cell between the meridian and the farthest present cell
    /// of each column to present.
    fn restore_reachability(&mut self) {
        for col in 0..self.cols {
            let farthest = (0..self.rows).rev().find(|&row| self.get(row, col));
            if let Some(farthest) = farthest {
                for row in 0..farthest {
                    self.set(row, col, true);
                }
            }
        }
    }
}

/// Validated four-quadrant board layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    north_east: QuadrantGrid,
    north_west: QuadrantGrid,
    south_east: QuadrantGrid,
    south_west: QuadrantGrid,
    cell_size: CellSize,
}

impl BoardConfig {
    /// Create an all-absent config with the given extents.
    ///
    /// ## Panics
    ///
    /// Panics if any extent is below the minimum (1).
    #[must_use]
    pub fn new(
        north_rows: usize,
        south_rows: usize,
        east_columns: usize,
        west_columns: usize,
    ) -> Self {
        assert!(north_rows >= MIN_ROWS && south_rows >= MIN_ROWS);
        assert!(east_columns >= MIN_COLUMNS && west_columns >= MIN_COLUMNS);

        Self {
            north_east: QuadrantGrid::new(north_rows, east_columns),
            north_west: QuadrantGrid::new(north_rows, west_columns),
            south_east: QuadrantGrid::new(south_rows, east_columns),
            south_west: QuadrantGrid::new(south_rows, west_columns),
            cell_size: CellSize::default(),
        }
    }

    /// Create an all-present config with the given extents.
    #[must_use]
    pub fn filled(
        north_rows: usize,
        south_rows: usize,
        east_columns: usize,
        west_columns: usize,
    ) -> Self {
        let mut config = Self::new(north_rows, south_rows, east_columns, west_columns);
        config.set_all(true);
        config
    }

    /// Set the world-space cell extent (builder pattern).
    #[must_use]
    pub fn with_cell_size(mut self, width: f32, height: f32) -> Self {
        self.cell_size = CellSize { width, height };
        self
    }

    /// World-space cell extent. Not used by any query or invariant.
    #[must_use]
    pub fn cell_size(&self) -> CellSize {
        self.cell_size
    }

    /// Row count on the north half.
    #[must_use]
    pub fn north_rows(&self) -> usize {
        self.north_east.rows()
    }

    /// Row count on the south half.
    #[must_use]
    pub fn south_rows(&self) -> usize {
        self.south_east.rows()
    }

    /// Column count on the east half.
    #[must_use]
    pub fn east_columns(&self) -> usize {
        self.north_east.cols()
    }

    /// Column count on the west half.
    #[must_use]
    pub fn west_columns(&self) -> usize {
        self.north_west.cols()
    }

    /// The occupancy grid of one quadrant.
    #[must_use]
    pub fn grid(&self, quadrant: Quadrant) -> &QuadrantGrid {
        match quadrant {
            Quadrant::NorthEast => &self.north_east,
            Quadrant::NorthWest => &self.north_west,
            Quadrant::SouthEast => &self.south_east,
            Quadrant::SouthWest => &self.south_west,
        }
    }

    fn grid_mut(&mut self, quadrant: Quadrant) -> &mut QuadrantGrid {
        match quadrant {
            Quadrant::NorthEast => &mut self.north_east,
            Quadrant::NorthWest => &mut self.north_west,
            Quadrant::SouthEast => &mut self.south_east,
            Quadrant::SouthWest => &mut self.south_west,
        }
    }

    /// Whether no cell is present in any quadrant.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        Quadrant::ALL
            .iter()
            .all(|&q| self.grid(q).present_count() == 0)
    }

    /// All present cells as (quadrant, local row, local col).
    #[must_use]
    pub fn present_cells(&self) -> Vec<(Quadrant, usize, usize)> {
        let mut cells = Vec::new();
        for quadrant in Quadrant::ALL {
            let grid = self.grid(quadrant);
            for row in 0..grid.rows() {
                for col in 0..grid.cols() {
                    if grid.get(row, col) {
                        cells.push((quadrant, row, col));
                    }
                }
            }
        }
        cells
    }

    /// Set a single cell, then re-apply corrections.
    pub fn set_cell(&mut self, quadrant: Quadrant, row: usize, col: usize, present: bool) {
        self.grid_mut(quadrant).set(row, col, present);
        self.apply_corrections();
    }

    /// Set every cell in every quadrant, then re-apply corrections.
    pub fn set_all(&mut self, present: bool) {
        for quadrant in Quadrant::ALL {
            self.grid_mut(quadrant).set_all(present);
        }
        self.apply_corrections();
    }

    /// Randomize every cell, then re-apply corrections.
    pub fn randomize(&mut self, rng: &mut GameRng) {
        for quadrant in Quadrant::ALL {
            self.grid_mut(quadrant).randomize(rng);
        }
        self.apply_corrections();
    }

    /// Add a row at the far edge of the given half.
    ///
    /// Returns false (with a warning) for East/West.
    pub fn add_row(&mut self, direction: Direction) -> bool {
        let quadrants = match direction {
            Direction::North => [Quadrant::NorthEast, Quadrant::NorthWest],
            Direction::South => [Quadrant::SouthEast, Quadrant::SouthWest],
            other => {
                warn!(direction = %other, "rows grow North or South only");
                return false;
            }
        };
        for quadrant in quadrants {
            self.grid_mut(quadrant).add_row();
        }
        self.apply_corrections();
        true
    }

    /// Remove the far-edge row of the given half.
    ///
    /// Rejected below the minimum row count; the config is unchanged.
    pub fn remove_row(&mut self, direction: Direction) -> bool {
        let (count, quadrants) = match direction {
            Direction::North => (self.north_rows(), [Quadrant::NorthEast, Quadrant::NorthWest]),
            Direction::South => (self.south_rows(), [Quadrant::SouthEast, Quadrant::SouthWest]),
            other => {
                warn!(direction = %other, "rows shrink North or South only");
                return false;
            }
        };
        if count <= MIN_ROWS {
            warn!(direction = %direction, rows = count, "cannot shrink below minimum row count");
            return false;
        }
        for quadrant in quadrants {
            self.grid_mut(quadrant).remove_row();
        }
        self.apply_corrections();
        true
    }

    /// Add a column at the far edge of the given half.
    ///
    /// Returns false (with a warning) for North/South.
    pub fn add_column(&mut self, direction: Direction) -> bool {
        let quadrants = match direction {
            Direction::East => [Quadrant::NorthEast, Quadrant::SouthEast],
            Direction::West => [Quadrant::NorthWest, Quadrant::SouthWest],
            other => {
                warn!(direction = %other, "columns grow East or West only");
                return false;
            }
        };
        for quadrant in quadrants {
            self.grid_mut(quadrant).add_col();
        }
        self.apply_corrections();
        true
    }

    /// Remove the far-edge column of the given half.
    ///
    /// Rejected below the minimum column count; the config is unchanged.
    pub fn remove_column(&mut self, direction: Direction) -> bool {
        let (count, quadrants) = match direction {
            Direction::East => (
                self.east_columns(),
                [Quadrant::NorthEast, Quadrant::SouthEast],
            ),
            Direction::West => (
                self.west_columns(),
                [Quadrant::NorthWest, Quadrant::SouthWest],
            ),
            other => {
                warn!(direction = %other, "columns shrink East or West only");
                return false;
            }
        };
        if count <= MIN_COLUMNS {
            warn!(direction = %direction, columns = count, "cannot shrink below minimum column count");
            return false;
        }
        for quadrant in quadrants {
            self.grid_mut(quadrant).remove_col();
        }
        self.apply_corrections();
        true
    }

    /// Re-apply reachability then meridian symmetry.
    ///
    /// Reachability must run first: the symmetry pass only inspects row 0,
    /// and reachability is what guarantees row 0 reflects the column.
    fn apply_corrections(&mut self) {
        for quadrant in Quadrant::ALL {
            self.grid_mut(quadrant).restore_reachability();
        }
        self.mirror_meridian(Quadrant::NorthEast, Quadrant::SouthEast);
        self.mirror_meridian(Quadrant::NorthWest, Quadrant::SouthWest);
    }

    fn mirror_meridian(&mut self, north: Quadrant, south: Quadrant) {
        let cols = self.grid(north).cols();
        debug_assert_eq!(cols, self.grid(south).cols());
        for col in 0..cols {
            let present = self.grid(north).get(0, col) || self.grid(south).get(0, col);
            self.grid_mut(north).set(0, col, present);
            self.grid_mut(south).set(0, col, present);
        }
    }
}
