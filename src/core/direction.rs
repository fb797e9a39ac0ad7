//! Compass directions, quadrants, board sides, and global coordinates.
//!
//! ## Coordinate space
//!
//! The four quadrant grids project into a single signed coordinate space,
//! computed once at board build time:
//!
//! - South quadrant local row `r` → global row `r`
//! - North quadrant local row `r` → global row `-(r + 1)`
//! - East quadrant local col `c` → global col `c`
//! - West quadrant local col `c` → global col `-(c + 1)`
//!
//! The meridian (the line both boards face across) separates rows `-1`
//! and `0`. North decreases the row, East increases the column.
//!
//! ## Direction frames
//!
//! Each board side has a forward direction: `Home` (south half) advances
//! North, `Away` (north half) advances South. Queries rooted at a field
//! owned by the mirrored side (`Away`) flip every direction argument 180°
//! before walking, so strategies can always be written in their own
//! forward frame.

use serde::{Deserialize, Serialize};

/// One of the four compass directions used for walks and growth.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// All four directions, in N/S/E/W order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// The 180° opposite of this direction.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// Per-step (row, column) offset in global coordinates.
    #[must_use]
    pub const fn delta(self) -> (i16, i16) {
        match self {
            Direction::North => (-1, 0),
            Direction::South => (1, 0),
            Direction::East => (0, 1),
            Direction::West => (0, -1),
        }
    }

}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Direction::North => "North",
            Direction::South => "South",
            Direction::East => "East",
            Direction::West => "West",
        };
        write!(f, "{name}")
    }
}

/// One of the four grid partitions composing a full board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quadrant {
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Quadrant {
    /// All four quadrants, in NE/NW/SE/SW order.
    pub const ALL: [Quadrant; 4] = [
        Quadrant::NorthEast,
        Quadrant::NorthWest,
        Quadrant::SouthEast,
        Quadrant::SouthWest,
    ];

    /// Whether this quadrant lies on the north half of the board.
    #[must_use]
    pub const fn is_north(self) -> bool {
        matches!(self, Quadrant::NorthEast | Quadrant::NorthWest)
    }

    /// Whether this quadrant lies on the east half of the board.
    #[must_use]
    pub const fn is_east(self) -> bool {
        matches!(self, Quadrant::NorthEast | Quadrant::SouthEast)
    }

    /// Which side owns fields created in this quadrant.
    #[must_use]
    pub const fn side(self) -> BoardSide {
        if self.is_north() {
            BoardSide::Away
        } else {
            BoardSide::Home
        }
    }

    /// Resolve a local (row, col) cell into the global coordinate space.
    #[must_use]
    pub fn to_global(self, local_row: usize, local_col: usize) -> Coord {
        let row = if self.is_north() {
            -(local_row as i16) - 1
        } else {
            local_row as i16
        };
        let col = if self.is_east() {
            local_col as i16
        } else {
            -(local_col as i16) - 1
        };
        Coord { row, col }
    }
}

/// One of the two opposing board sides.
///
/// Exactly two sides with mirrored forward directions; generalizing to
/// more sides is out of scope.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoardSide {
    /// South half of the board; advances North.
    Home,
    /// North half of the board; advances South.
    Away,
}

impl BoardSide {
    /// The direction this side's units advance in global coordinates.
    #[must_use]
    pub const fn forward(self) -> Direction {
        match self {
            BoardSide::Home => Direction::North,
            BoardSide::Away => Direction::South,
        }
    }

    /// Whether direction arguments must be flipped for this side's fields.
    ///
    /// True for the side whose forward direction opposes global North.
    #[must_use]
    pub const fn is_mirrored(self) -> bool {
        matches!(self, BoardSide::Away)
    }

    /// The opposing side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            BoardSide::Home => BoardSide::Away,
            BoardSide::Away => BoardSide::Home,
        }
    }
}

/// A position in the global board coordinate space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub row: i16,
    pub col: i16,
}

impl Coord {
    /// Create a coordinate.
    #[must_use]
    pub const fn new(row: i16, col: i16) -> Self {
        Self { row, col }
    }

    /// The coordinate one step in `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        let (dr, dc) = direction.delta();
        Self {
            row: self.row + dr,
            col: self.col + dc,
        }
    }

    /// The coordinate `steps` steps in `direction`.
    #[must_use]
    pub fn step_by(self, direction: Direction, steps: i16) -> Self {
        let (dr, dc) = direction.delta();
        Self {
            row: self.row + dr * steps,
            col: self.col + dc * steps,
        }
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
