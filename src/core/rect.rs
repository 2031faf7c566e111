use std::collections::HashSet;
use std::fmt;

use crate::core::cell::Cell;
use crate::error::{RegionError, RegionResult};

/// An immutable axis-aligned rectangle on the integer grid.
///
/// `(x1, y1)` is the inclusive corner and `(x2, y2)` the exclusive one, so the rectangle
/// covers every cell `(x, y)` with `x1 <= x < x2` and `y1 <= y < y2`. Zero-area rectangles
/// are legal values that cover no cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rect {
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
}

impl Rect {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> RegionResult<Self> {
        if x1 > x2 || y1 > y2 {
            return Err(RegionError::InvalidGeometry {
                reason: format!("rectangle corners ({x1},{y1})-({x2},{y2}) are inverted"),
            });
        }
        Ok(Self { x1, y1, x2, y2 })
    }

    /// The `width` x `height` rectangle whose lowest cell is `origin`.
    #[inline]
    pub fn sized(origin: Cell, width: u32, height: u32) -> Self {
        Self {
            x1: origin.x,
            y1: origin.y,
            x2: origin.x + width as i32,
            y2: origin.y + height as i32,
        }
    }

    /// The 1x1 rectangle covering exactly `cell`.
    #[inline]
    pub fn unit(cell: Cell) -> Self {
        Self::sized(cell, 1, 1)
    }

    #[inline]
    pub fn x1(&self) -> i32 {
        self.x1
    }

    #[inline]
    pub fn y1(&self) -> i32 {
        self.y1
    }

    #[inline]
    pub fn x2(&self) -> i32 {
        self.x2
    }

    #[inline]
    pub fn y2(&self) -> i32 {
        self.y2
    }

    /// Horizontal extent. Unsigned so corners spanning the whole `i32` range still measure.
    #[inline]
    pub fn width(&self) -> u32 {
        self.x2.abs_diff(self.x1)
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.y2.abs_diff(self.y1)
    }

    /// Number of covered cells.
    #[inline]
    pub fn area(&self) -> u64 {
        u64::from(self.width()) * u64::from(self.height())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x1 == self.x2 || self.y1 == self.y2
    }

    /// True if the rectangle fits inside `[0, grid_size)^2`.
    #[inline]
    pub fn within(&self, grid_size: i32) -> bool {
        self.x1 >= 0 && self.y1 >= 0 && self.x2 <= grid_size && self.y2 <= grid_size
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        self.x1 <= cell.x && cell.x < self.x2 && self.y1 <= cell.y && cell.y < self.y2
    }

    /// True if the two rectangles share at least one cell.
    pub fn overlaps(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x1 < other.x2
            && other.x1 < self.x2
            && self.y1 < other.y2
            && other.y1 < self.y2
    }

    /// The shared cells of two rectangles, if any.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        if !self.overlaps(other) {
            return None;
        }
        Some(Rect {
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
            x2: self.x2.min(other.x2),
            y2: self.y2.min(other.y2),
        })
    }

    /// True if the two cell sets touch along an edge of length >= 1.
    ///
    /// Corner contact does not count, and neither does overlap.
    pub fn shares_edge(&self, other: &Rect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        let x_span = self.x1 < other.x2 && other.x1 < self.x2;
        let y_span = self.y1 < other.y2 && other.y1 < self.y2;
        let x_touch = self.x2 == other.x1 || other.x2 == self.x1;
        let y_touch = self.y2 == other.y1 || other.y2 == self.y1;
        (x_touch && y_span) || (y_touch && x_span)
    }

    /// Every covered cell, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let (x1, x2) = (self.x1, self.x2);
        (self.y1..self.y2).flat_map(move |y| (x1..x2).map(move |x| Cell::new(x, y)))
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rect({},{}-{},{})", self.x1, self.y1, self.x2, self.y2)
    }
}

/// The cells covered by a collection of rectangles.
pub fn cover<'a>(rects: impl IntoIterator<Item = &'a Rect>) -> HashSet<Cell> {
    rects.into_iter().flat_map(|r| r.cells()).collect()
}
