use std::collections::HashSet;
use std::fmt;

use crate::config::{Backing, GridConfig};
use crate::core::rect::Rect;
use crate::error::RegionResult;
use crate::region::{DenseRegionSet, Label, RegionSet, SparseRegionSet};

/// A region set whose backing was chosen by a [`GridConfig`].
#[derive(Clone, Debug)]
pub enum RegionStore<L> {
    Sparse(SparseRegionSet<L>),
    Dense(DenseRegionSet<L>),
}

impl<L: Label> RegionStore<L> {
    pub fn from_config(config: &GridConfig) -> RegionResult<Self> {
        config.validate()?;
        Ok(match config.backing {
            Backing::Sparse => RegionStore::Sparse(SparseRegionSet::new(config.grid_size)?),
            Backing::Dense => RegionStore::Dense(DenseRegionSet::new(config.grid_size)?),
        })
    }

    pub fn backing(&self) -> Backing {
        match self {
            RegionStore::Sparse(_) => Backing::Sparse,
            RegionStore::Dense(_) => Backing::Dense,
        }
    }
}

impl<L: Label> RegionSet<L> for RegionStore<L> {
    /// Uses the default backing; see [`RegionStore::from_config`] to pick one.
    fn new(grid_size: i32) -> RegionResult<Self> {
        Self::from_config(&GridConfig::new(grid_size))
    }

    fn grid_size(&self) -> i32 {
        match self {
            RegionStore::Sparse(s) => s.grid_size(),
            RegionStore::Dense(s) => s.grid_size(),
        }
    }

    fn labels(&self) -> HashSet<L> {
        match self {
            RegionStore::Sparse(s) => s.labels(),
            RegionStore::Dense(s) => s.labels(),
        }
    }

    fn contains_label(&self, label: &L) -> bool {
        match self {
            RegionStore::Sparse(s) => s.contains_label(label),
            RegionStore::Dense(s) => s.contains_label(label),
        }
    }

    fn get_region(&self, label: &L) -> Option<HashSet<Rect>> {
        match self {
            RegionStore::Sparse(s) => s.get_region(label),
            RegionStore::Dense(s) => s.get_region(label),
        }
    }

    fn check(&self, label: &L, rects: &[Rect]) -> RegionResult<()> {
        match self {
            RegionStore::Sparse(s) => s.check(label, rects),
            RegionStore::Dense(s) => s.check(label, rects),
        }
    }

    fn add<I>(&mut self, label: L, rects: I) -> RegionResult<()>
    where
        I: IntoIterator<Item = Rect>,
    {
        match self {
            RegionStore::Sparse(s) => s.add(label, rects),
            RegionStore::Dense(s) => s.add(label, rects),
        }
    }

    fn remove(&mut self, label: &L) -> bool {
        match self {
            RegionStore::Sparse(s) => s.remove(label),
            RegionStore::Dense(s) => s.remove(label),
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            RegionStore::Sparse(s) => s.is_empty(),
            RegionStore::Dense(s) => s.is_empty(),
        }
    }
}

impl<L: Label> fmt::Display for RegionStore<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionStore::Sparse(s) => fmt::Display::fmt(s, f),
            RegionStore::Dense(s) => fmt::Display::fmt(s, f),
        }
    }
}
