use std::fmt;
use std::ops::Add;

/// One unit square of the grid, addressed by its lower corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// True if the cell lies inside a `grid_size` x `grid_size` grid anchored at the origin.
    #[inline]
    pub fn in_grid(self, grid_size: i32) -> bool {
        self.x >= 0 && self.y >= 0 && self.x < grid_size && self.y < grid_size
    }

    /// Row-major index into a dense `grid_size` x `grid_size` array.
    ///
    /// Only meaningful when [`Cell::in_grid`] holds.
    #[inline]
    pub fn index(self, grid_size: i32) -> usize {
        debug_assert!(self.in_grid(grid_size));
        (self.y as usize) * (grid_size as usize) + (self.x as usize)
    }

    #[inline]
    pub fn from_index(idx: usize, grid_size: i32) -> Self {
        let g = grid_size as usize;
        Cell::new((idx % g) as i32, (idx / g) as i32)
    }

    /// The orthogonal neighbours of this cell (may leave the grid).
    pub fn neighbours(self) -> impl Iterator<Item = Cell> {
        ORTHOGONAL_STEPS.into_iter().map(move |step| self + step)
    }
}

impl Add for Cell {
    type Output = Cell;

    #[inline]
    fn add(self, rhs: Cell) -> Self::Output {
        Cell::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// The 4 unit steps that keep a path contiguous (no diagonals).
pub const ORTHOGONAL_STEPS: [Cell; 4] = [
    Cell { x: 0, y: -1 },
    Cell { x: 1, y: 0 },
    Cell { x: 0, y: 1 },
    Cell { x: -1, y: 0 },
];
