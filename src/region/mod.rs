//! Labeled, contiguous, non-overlapping regions on a fixed square grid.
//!
//! A [`RegionSet`] maps each label to a region built from [`Rect`]s. Every container upholds:
//! - labels are unique
//! - each region is edge-contiguous and its rectangles never share a cell
//! - regions of distinct labels never share a cell
//! - every rectangle lies inside `[0, grid_size)^2`
//!
//! Two backings implement the same contract:
//! - [`sparse::SparseRegionSet`]: a rectangle list per label, memory follows rectangle count.
//! - [`dense::DenseRegionSet`]: an owner slot per grid cell, memory follows `grid_size^2`.
//!
//! [`store::RegionStore`] picks one of them from a [`crate::config::GridConfig`].

use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

use crate::core::rect::Rect;
use crate::error::RegionResult;

pub mod dense;
pub mod sparse;
pub mod store;
pub mod validate;

pub use dense::DenseRegionSet;
pub use sparse::SparseRegionSet;
pub use store::RegionStore;

/// Anything usable as a region label.
pub trait Label: Eq + Hash + Clone + Debug {}

impl<T: Eq + Hash + Clone + Debug> Label for T {}

/// A mutable set of uniquely labeled regions on a `grid_size` x `grid_size` grid.
///
/// Getters return owned copies; nothing handed out aliases internal state. `add` validates the
/// whole candidate before touching the container, so a failed `add` leaves it unchanged.
pub trait RegionSet<L: Label>: Clone {
    /// An empty container. Fails with `InvalidGeometry` if `grid_size <= 0`.
    fn new(grid_size: i32) -> RegionResult<Self>;

    fn grid_size(&self) -> i32;

    fn labels(&self) -> HashSet<L>;

    fn contains_label(&self, label: &L) -> bool;

    /// The rectangles of `label`, or `None` if the label is absent.
    ///
    /// A dense backing returns a reconstructed cover of the same cells rather than the
    /// rectangles originally passed to `add`.
    fn get_region(&self, label: &L) -> Option<HashSet<Rect>>;

    /// Validate a candidate region exactly as `add` would, without committing it.
    ///
    /// Checks run in a fixed order and the first failure is reported: duplicate label, bounds,
    /// self overlap, contiguity, overlap with committed regions.
    fn check(&self, label: &L, rects: &[Rect]) -> RegionResult<()>;

    fn add<I>(&mut self, label: L, rects: I) -> RegionResult<()>
    where
        I: IntoIterator<Item = Rect>;

    /// Returns `false` if the label was absent.
    fn remove(&mut self, label: &L) -> bool;

    #[inline]
    fn is_empty(&self) -> bool {
        self.labels().is_empty()
    }
}

/// An empty region set using the default (sparse) backing.
pub fn make_region_set<L: Label>(grid_size: i32) -> RegionResult<SparseRegionSet<L>> {
    SparseRegionSet::new(grid_size)
}
