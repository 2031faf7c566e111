//! Labeled regions on a fixed square grid, and cities of multi-floor buildings built on them.
//!
//! - [`core`]: cells and rectangles.
//! - [`region`]: the [`RegionSet`] contract with sparse and dense backings.
//! - [`city`]: buildings stored as floors in one shared, floor-indexed stack.
//! - [`config`]: grid size and backing selection.

pub mod city;
pub mod config;
pub mod core;
pub mod error;
pub mod region;

pub use crate::city::{make_city, City, FloorLabel, Floors};
pub use crate::config::{Backing, GridConfig};
pub use crate::core::cell::Cell;
pub use crate::core::rect::Rect;
pub use crate::error::{RegionError, RegionResult};
pub use crate::region::{
    make_region_set, DenseRegionSet, Label, RegionSet, RegionStore, SparseRegionSet,
};
