//! Board layout, fields, and the runtime grid.

mod config;
mod field;
mod grid;

pub use config::{BoardConfig, CellSize, QuadrantGrid, MIN_COLUMNS, MIN_ROWS};
pub use field::{Field, FieldType};
pub use grid::{BoardDelta, GridBoard, GridError};
