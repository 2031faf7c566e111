//! Candidate checks shared by every backing.
//!
//! These work purely on rectangle geometry, so they cost O(R^2) in the number of candidate
//! rectangles and nothing in grid size.

use std::collections::VecDeque;

use crate::core::cell::Cell;
use crate::core::rect::Rect;
use crate::error::{RegionError, RegionResult};

/// Every candidate, zero-area ones included, must fit inside the grid.
pub fn check_bounds(rects: &[Rect], grid_size: i32) -> RegionResult<()> {
    match rects.iter().find(|r| !r.within(grid_size)) {
        Some(&rect) => Err(RegionError::OutOfBounds { rect, grid_size }),
        None => Ok(()),
    }
}

/// No two candidates may share a cell.
pub fn check_self_overlap(rects: &[Rect]) -> RegionResult<()> {
    for (i, a) in rects.iter().enumerate() {
        for b in &rects[i + 1..] {
            if let Some(shared) = a.intersection(b) {
                return Err(RegionError::SelfOverlap {
                    cell: Cell::new(shared.x1(), shared.y1()),
                });
            }
        }
    }
    Ok(())
}

/// Number of edge-connected pieces formed by the cell-covering candidates.
///
/// Zero-area rectangles are ignored, so an empty candidate has zero components.
pub fn count_components(rects: &[Rect]) -> usize {
    let solid: Vec<&Rect> = rects.iter().filter(|r| !r.is_empty()).collect();

    let mut seen = vec![false; solid.len()];
    let mut components = 0;
    let mut q: VecDeque<usize> = VecDeque::new();

    for start in 0..solid.len() {
        if seen[start] {
            continue;
        }
        components += 1;
        seen[start] = true;
        q.push_back(start);

        while let Some(i) = q.pop_front() {
            for j in 0..solid.len() {
                if !seen[j] && solid[i].shares_edge(solid[j]) {
                    seen[j] = true;
                    q.push_back(j);
                }
            }
        }
    }

    components
}

/// The candidates must form at most one edge-connected piece.
pub fn check_contiguous(rects: &[Rect]) -> RegionResult<()> {
    match count_components(rects) {
        0 | 1 => Ok(()),
        components => Err(RegionError::Disconnected { components }),
    }
}

/// Bounds, self overlap and contiguity, in that order.
pub fn check_shape(rects: &[Rect], grid_size: i32) -> RegionResult<()> {
    check_bounds(rects, grid_size)?;
    check_self_overlap(rects)?;
    check_contiguous(rects)
}

/// Sort and drop repeated rectangles (only zero-area repeats survive [`check_self_overlap`]).
pub fn canonical(mut rects: Vec<Rect>) -> Vec<Rect> {
    rects.sort_unstable();
    rects.dedup();
    rects
}
