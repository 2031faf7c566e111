//! Grid primitives shared by every region container.
//!
//! - [`cell`]: unit grid cells and the orthogonal steps used for contiguity.
//! - [`rect`]: immutable half-open rectangles, the only geometry regions are built from.

pub mod cell;
pub mod rect;
