//! Conway's Game of Life on a torus, advanced one generation at a time by
//! concurrent per-cell evaluation.
//!
//! ```no_run
//! use conway::{Coord, Grid};
//!
//! let mut grid = Grid::new(5, 5, [(1, 2), (2, 2), (3, 2)]).unwrap();
//! grid.step();
//! assert!(grid.live_cells().contains(Coord::new(2, 1)));
//! ```

pub mod cells;
pub mod claims;
pub mod coord;
pub mod engine;
pub mod error;
pub mod grid;
pub mod neighbors;
pub mod patterns;
pub mod render;
pub mod rules;

pub use cells::LiveCells;
pub use claims::DeadCellClaims;
pub use coord::{Coord, Torus, normalize_dim};
pub use engine::{StepStats, Verdict};
pub use error::{Error, Result};
pub use grid::{Grid, GridConfig};
pub use neighbors::{Cell, Neighbors};
pub use rules::Rules;
