// neighbors.rs - Moore neighborhood lookup on the torus

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::cells::LiveCells;
use crate::coord::{Coord, Torus};

/// The 8 Moore offsets, (0, 0) excluded.
#[rustfmt::skip]
pub const MOORE_OFFSETS: [(i32, i32); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    ( 0, -1),          ( 0, 1),
    ( 1, -1), ( 1, 0), ( 1, 1),
];

/// A coordinate together with its state at the time it was looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub coord: Coord,
    pub alive: bool,
}

/// Snapshot of a cell's neighborhood.
///
/// Keyed by coordinate, so on grids narrower than 3 cells the offsets that wrap
/// onto the same cell are only counted once.
#[derive(Debug, Clone)]
pub struct Neighbors {
    center: Cell,
    cells: HashMap<Coord, Cell>,
}

impl Neighbors {
    pub fn center(&self) -> Cell {
        self.center
    }

    pub fn get(&self, coord: Coord) -> Option<Cell> {
        self.cells.get(&coord).copied()
    }

    /// Looks `coord` up in the snapshot, including the center cell itself.
    pub fn cached(&self, coord: Coord) -> Option<Cell> {
        if coord == self.center.coord {
            return Some(self.center);
        }
        self.get(coord)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn live_count(&self) -> usize {
        self.cells.values().filter(|c| c.alive).count()
    }

    pub fn dead(&self) -> impl Iterator<Item = Coord> + '_ {
        self.cells.values().filter(|c| !c.alive).map(|c| c.coord)
    }

    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.values().copied()
    }
}

/// The wrapped neighbors of an already normalized `coord`.
///
/// Offsets whose addition would overflow `i32` are skipped rather than wrapped.
pub fn neighbor_coords(torus: &Torus, coord: Coord) -> Vec<Coord> {
    MOORE_OFFSETS
        .iter()
        .filter_map(|&(dx, dy)| coord.checked_offset(dx, dy))
        .map(|c| torus.normalize(c))
        .collect()
}

/// Resolves the neighborhood of `center` against the current generation.
pub fn resolve(torus: &Torus, field: &RwLock<LiveCells>, center: Cell) -> Neighbors {
    let coords = neighbor_coords(torus, center.coord);
    let field = field.read();
    let cells = coords
        .into_iter()
        .map(|coord| (coord, Cell { coord, alive: field.contains(coord) }))
        .collect();
    Neighbors { center, cells }
}

/// Like [`resolve`], but answers from `cache` wherever it already knows a cell.
pub fn resolve_with_cache(
    torus: &Torus,
    field: &RwLock<LiveCells>,
    center: Cell,
    cache: &Neighbors,
) -> Neighbors {
    let coords = neighbor_coords(torus, center.coord);
    let mut cells = HashMap::with_capacity(coords.len());
    let mut misses = Vec::new();
    for coord in coords {
        match cache.cached(coord) {
            Some(cell) => {
                cells.insert(coord, cell);
            }
            None => misses.push(coord),
        }
    }
    if !misses.is_empty() {
        let field = field.read();
        for coord in misses {
            cells.insert(coord, Cell { coord, alive: field.contains(coord) });
        }
    }
    Neighbors { center, cells }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(coords: &[(i32, i32)]) -> RwLock<LiveCells> {
        RwLock::new(coords.iter().map(|&c| Coord::from(c)).collect())
    }

    #[test]
    fn corner_wraps_to_opposite_corner() {
        let torus = Torus::new(5, 5).unwrap();
        let coords = neighbor_coords(&torus, Coord::new(0, 0));
        assert_eq!(coords.len(), 8);
        assert!(coords.contains(&Coord::new(4, 4)));
        assert!(coords.contains(&Coord::new(4, 0)));
        assert!(coords.contains(&Coord::new(0, 4)));
        assert!(coords.contains(&Coord::new(1, 1)));
    }

    #[test]
    fn narrow_grid_collapses_offsets() {
        let torus = Torus::new(1, 1).unwrap();
        let n = resolve(&torus, &field(&[(0, 0)]), Cell { coord: Coord::new(0, 0), alive: true });
        assert_eq!(n.len(), 1);
        assert_eq!(n.live_count(), 1);

        let torus = Torus::new(2, 3).unwrap();
        let n = resolve(&torus, &field(&[]), Cell { coord: Coord::new(0, 0), alive: false });
        // rows -1 and +1 both land on row 1
        assert_eq!(n.len(), 5);
    }

    #[test]
    fn resolve_reports_status() {
        let torus = Torus::new(5, 5).unwrap();
        let f = field(&[(1, 2), (2, 2), (3, 2)]);
        let n = resolve(&torus, &f, Cell { coord: Coord::new(2, 2), alive: true });
        assert_eq!(n.live_count(), 2);
        assert_eq!(n.dead().count(), 6);
        assert_eq!(n.get(Coord::new(1, 2)).map(|c| c.alive), Some(true));
    }

    #[test]
    fn cache_answers_shared_neighbors() {
        let torus = Torus::new(5, 5).unwrap();
        let f = field(&[(1, 2), (2, 2), (3, 2)]);
        let center = Cell { coord: Coord::new(2, 2), alive: true };
        let snapshot = resolve(&torus, &f, center);

        // A stale cache wins over the field: proves the lookup came from the snapshot.
        f.write().remove(Coord::new(1, 2));
        let dead = Cell { coord: Coord::new(2, 1), alive: false };
        let n = resolve_with_cache(&torus, &f, dead, &snapshot);
        assert_eq!(n.get(Coord::new(2, 2)), Some(center));
        assert_eq!(n.get(Coord::new(1, 2)).map(|c| c.alive), Some(true));
        assert_eq!(n.live_count(), 3);
    }

    #[test]
    fn overflowing_offsets_are_skipped() {
        let torus = Torus::new(i32::MAX, i32::MAX).unwrap();
        let coords = neighbor_coords(&torus, Coord::new(i32::MAX, i32::MAX));
        assert_eq!(coords.len(), 3);
    }
}
