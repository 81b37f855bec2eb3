// cells.rs - Sparse live-cell set

use std::collections::HashSet;
use std::collections::hash_set;

use crate::coord::Coord;

/// The whole state of a generation: a coordinate is alive iff it is present.
///
/// Members are expected to be normalized already; `Grid` and `Torus` take care of that.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LiveCells {
    cells: HashSet<Coord>,
}

impl LiveCells {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { cells: HashSet::with_capacity(capacity) }
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.cells.contains(&coord)
    }

    /// Returns `true` if the cell was dead before.
    pub fn insert(&mut self, coord: Coord) -> bool {
        self.cells.insert(coord)
    }

    /// Returns `true` if the cell was alive before.
    pub fn remove(&mut self, coord: Coord) -> bool {
        self.cells.remove(&coord)
    }

    /// Flips a cell and returns its new state.
    pub fn toggle(&mut self, coord: Coord) -> bool {
        if self.cells.remove(&coord) {
            false
        } else {
            self.cells.insert(coord);
            true
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> hash_set::Iter<'_, Coord> {
        self.cells.iter()
    }

    /// Members in row-major order, handy for stable output.
    pub fn sorted(&self) -> Vec<Coord> {
        let mut coords: Vec<Coord> = self.cells.iter().copied().collect();
        coords.sort_unstable();
        coords
    }
}

impl FromIterator<Coord> for LiveCells {
    fn from_iter<I: IntoIterator<Item = Coord>>(iter: I) -> Self {
        Self { cells: iter.into_iter().collect() }
    }
}

impl Extend<Coord> for LiveCells {
    fn extend<I: IntoIterator<Item = Coord>>(&mut self, iter: I) {
        self.cells.extend(iter);
    }
}

impl IntoIterator for LiveCells {
    type Item = Coord;
    type IntoIter = hash_set::IntoIter<Coord>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.into_iter()
    }
}

impl<'a> IntoIterator for &'a LiveCells {
    type Item = &'a Coord;
    type IntoIter = hash_set::Iter<'a, Coord>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_membership() {
        let mut cells = LiveCells::new();
        let c = Coord::new(1, 2);
        assert!(cells.toggle(c));
        assert!(cells.contains(c));
        assert!(!cells.toggle(c));
        assert!(cells.is_empty());
    }

    #[test]
    fn sorted_is_row_major() {
        let cells: LiveCells = [Coord::new(2, 0), Coord::new(0, 3), Coord::new(0, 1)].into_iter().collect();
        assert_eq!(cells.sorted(), vec![Coord::new(0, 1), Coord::new(0, 3), Coord::new(2, 0)]);
    }
}
