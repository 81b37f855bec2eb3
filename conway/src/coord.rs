// coord.rs - Coordinates and toroidal wrapping

use serde::{Deserialize, Serialize};

use crate::cells::LiveCells;
use crate::error::{Error, Result};

/// A cell position. `x` runs along the height (rows), `y` along the width (columns).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Adds an offset to both axes, or `None` if either axis would overflow.
    pub fn checked_offset(self, dx: i32, dy: i32) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
        })
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Wraps `coord` into `[0, len)`.
///
/// A `len` of one or less collapses every coordinate onto index 0.
pub fn normalize_dim(coord: i32, len: i32) -> i32 {
    if coord >= 0 && coord < len {
        return coord;
    }
    if len <= 1 {
        return 0;
    }
    if coord < 0 {
        return coord.rem_euclid(len);
    }
    coord % len
}

/// The dimensions of a wrapping grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Torus {
    height: i32,
    width: i32,
}

impl Torus {
    pub fn new(height: i32, width: i32) -> Result<Self> {
        if height <= 0 || width <= 0 {
            return Err(Error::InvalidDimension { height, width });
        }
        Ok(Self { height, width })
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn contains(&self, coord: Coord) -> bool {
        (0..self.height).contains(&coord.x) && (0..self.width).contains(&coord.y)
    }

    pub fn normalize(&self, coord: Coord) -> Coord {
        Coord {
            x: normalize_dim(coord.x, self.height),
            y: normalize_dim(coord.y, self.width),
        }
    }

    pub fn normalize_all<I>(&self, coords: I) -> LiveCells
    where
        I: IntoIterator,
        I::Item: Into<Coord>,
    {
        coords
            .into_iter()
            .map(|c| self.normalize(c.into()))
            .collect()
    }
}
