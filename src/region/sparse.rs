use std::collections::{HashMap, HashSet};
use std::fmt;

use tracing::{debug, trace};

use crate::core::cell::Cell;
use crate::core::rect::Rect;
use crate::error::{check_grid_size, RegionError, RegionResult};
use crate::region::validate::{canonical, check_shape};
use crate::region::{Label, RegionSet};

/// Region set stored as a rectangle list per label.
///
/// Memory is proportional to the number of rectangles, independent of grid size. Overlap
/// with committed regions is a pairwise interval test against every stored rectangle.
#[derive(Clone, Debug)]
pub struct SparseRegionSet<L> {
    grid_size: i32,
    regions: HashMap<L, Vec<Rect>>,
}

impl<L: Label> SparseRegionSet<L> {
    /// Total number of stored rectangles across all labels.
    pub fn rect_count(&self) -> usize {
        self.regions.values().map(Vec::len).sum()
    }

    /// Reports the first owned cell in candidate order, each candidate scanned row by row.
    ///
    /// Committed regions are disjoint, so that cell has exactly one owner and the report does
    /// not depend on map iteration order.
    fn check_against_committed(&self, rects: &[Rect]) -> RegionResult<()> {
        for candidate in rects.iter().filter(|r| !r.is_empty()) {
            let first = self
                .regions
                .iter()
                .flat_map(|(owner, region)| {
                    region.iter().filter_map(move |existing| {
                        candidate.intersection(existing).map(|shared| (shared, owner))
                    })
                })
                .min_by_key(|(shared, _)| (shared.y1(), shared.x1()));
            if let Some((shared, owner)) = first {
                return Err(RegionError::overlap(
                    Cell::new(shared.x1(), shared.y1()),
                    owner,
                ));
            }
        }
        Ok(())
    }

    fn rep_ok(&self) -> bool {
        let all: Vec<&Rect> = self.regions.values().flatten().collect();
        let bounded = all.iter().all(|r| r.within(self.grid_size));
        let disjoint = all
            .iter()
            .enumerate()
            .all(|(i, a)| all[i + 1..].iter().all(|b| !a.overlaps(b)));
        let contiguous = self
            .regions
            .values()
            .all(|rects| check_shape(rects, self.grid_size).is_ok());
        bounded && disjoint && contiguous
    }
}

impl<L: Label> RegionSet<L> for SparseRegionSet<L> {
    fn new(grid_size: i32) -> RegionResult<Self> {
        check_grid_size(grid_size)?;
        Ok(Self {
            grid_size,
            regions: HashMap::new(),
        })
    }

    #[inline]
    fn grid_size(&self) -> i32 {
        self.grid_size
    }

    fn labels(&self) -> HashSet<L> {
        self.regions.keys().cloned().collect()
    }

    #[inline]
    fn contains_label(&self, label: &L) -> bool {
        self.regions.contains_key(label)
    }

    fn get_region(&self, label: &L) -> Option<HashSet<Rect>> {
        self.regions
            .get(label)
            .map(|rects| rects.iter().copied().collect())
    }

    fn check(&self, label: &L, rects: &[Rect]) -> RegionResult<()> {
        if self.regions.contains_key(label) {
            return Err(RegionError::duplicate(label));
        }
        check_shape(rects, self.grid_size)?;
        self.check_against_committed(rects)
    }

    fn add<I>(&mut self, label: L, rects: I) -> RegionResult<()>
    where
        I: IntoIterator<Item = Rect>,
    {
        let rects: Vec<Rect> = rects.into_iter().collect();
        if let Err(err) = self.check(&label, &rects) {
            trace!(?label, %err, "sparse region rejected");
            return Err(err);
        }

        let rects = canonical(rects);
        debug!(?label, rects = rects.len(), "sparse region added");
        self.regions.insert(label, rects);
        debug_assert!(self.rep_ok());
        Ok(())
    }

    fn remove(&mut self, label: &L) -> bool {
        let removed = self.regions.remove(label).is_some();
        if removed {
            debug!(?label, "sparse region removed");
        }
        debug_assert!(self.rep_ok());
        removed
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

impl<L: Label> fmt::Display for SparseRegionSet<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SparseRegionSet {}x{}", self.grid_size, self.grid_size)?;
        for (label, rects) in &self.regions {
            let rendered: Vec<String> = rects.iter().map(Rect::to_string).collect();
            writeln!(f, "  {label:?}: {}", rendered.join(" "))?;
        }
        Ok(())
    }
}
