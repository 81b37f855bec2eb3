// claims.rs - Claim-once set for dead cells within a generation

use std::collections::HashSet;

use parking_lot::Mutex;

use crate::coord::Coord;

/// Dead cells already handed to an evaluator during the current step.
///
/// A dead cell next to several live cells is discovered once per live neighbor;
/// only the first discovery gets to evaluate it.
#[derive(Debug, Default)]
pub struct DeadCellClaims {
    cells: Mutex<HashSet<Coord>>,
}

impl DeadCellClaims {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` for the first caller per coordinate, `false` afterwards.
    pub fn assign(&self, coord: Coord) -> bool {
        let claimed = self.cells.lock().insert(coord);
        if !claimed {
            tracing::trace!(x = coord.x, y = coord.y, "dead cell already claimed");
        }
        claimed
    }

    pub fn len(&self) -> usize {
        self.cells.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.lock().is_empty()
    }
}
