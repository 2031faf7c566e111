//! Buildings stacked from per-floor regions.
//!
//! A [`City`] stores every floor of every building in one shared [`Floors`] stack keyed by
//! [`FloorLabel`]. Because a floor number has exactly one region set across all buildings,
//! two buildings can never occupy the same cell on the same floor, while footprints may repeat
//! from floor to floor.

use std::collections::HashSet;
use std::fmt;

use tracing::{debug, trace};

use crate::config::GridConfig;
use crate::core::rect::Rect;
use crate::error::{RegionError, RegionResult};
use crate::region::{Label, RegionSet, RegionStore, SparseRegionSet};

pub mod floors;

pub use floors::{FloorLabel, Floors};

/// A mutable set of uniquely labeled buildings on a `grid_size` x `grid_size` grid.
#[derive(Clone, Debug)]
pub struct City<L, S = SparseRegionSet<FloorLabel<L>>> {
    floors: Floors<L, S>,
}

impl<L: Label, S: RegionSet<FloorLabel<L>>> City<L, S> {
    /// An empty city. Fails with `InvalidGeometry` if `grid_size <= 0`.
    pub fn new(grid_size: i32) -> RegionResult<Self> {
        Ok(Self {
            floors: Floors::new(grid_size)?,
        })
    }

    /// An empty city whose floors are clones of `template`.
    pub fn with_template(template: S) -> Self {
        Self {
            floors: Floors::with_template(template),
        }
    }

    #[inline]
    pub fn grid_size(&self) -> i32 {
        self.floors.grid_size()
    }

    /// Building labels currently in the city.
    pub fn labels(&self) -> HashSet<L> {
        self.floors
            .labels()
            .into_iter()
            .map(|label| label.building)
            .collect()
    }

    pub fn contains_building(&self, building: &L) -> bool {
        !self.floors.floors_of(building).is_empty()
    }

    /// Add a building made of `floors`, whose labels must all name `building`.
    ///
    /// `floors` may be any region set over floor labels: a [`Floors`] stack of either backing,
    /// or a flat set such as a [`SparseRegionSet`]. Every floor is validated against the city's
    /// floor of the same number before any is committed; on error the city is unchanged.
    pub fn add_building<F>(&mut self, building: L, floors: &F) -> RegionResult<()>
    where
        F: RegionSet<FloorLabel<L>>,
    {
        let plan = match self.plan_building(&building, floors) {
            Ok(plan) => plan,
            Err(err) => {
                trace!(?building, %err, "building rejected");
                return Err(err);
            }
        };

        let mut committed: Vec<FloorLabel<L>> = Vec::with_capacity(plan.len());
        for (label, rects) in plan {
            if let Err(err) = self.floors.add(label.clone(), rects) {
                for done in &committed {
                    self.floors.remove(done);
                }
                trace!(?building, %err, "building rolled back");
                return Err(err);
            }
            committed.push(label);
        }

        debug!(?building, floors = committed.len(), "building added");
        Ok(())
    }

    /// An independent copy of one building's floors, or `None` if absent.
    pub fn get_building(&self, building: &L) -> Option<Floors<L, S>> {
        if !self.contains_building(building) {
            return None;
        }
        let mut copy = self.floors.clone();
        for label in copy.labels() {
            if label.building != *building {
                copy.remove(&label);
            }
        }
        Some(copy)
    }

    /// Returns `true` iff at least one floor of `building` existed.
    pub fn remove_building(&mut self, building: &L) -> bool {
        let targets = self.floors.floors_of(building);
        for label in &targets {
            self.floors.remove(label);
        }
        if !targets.is_empty() {
            debug!(?building, floors = targets.len(), "building removed");
        }
        !targets.is_empty()
    }

    /// Number of floors of `building` (0 if absent).
    pub fn floor_count(&self, building: &L) -> usize {
        self.floors.floors_of(building).len()
    }

    fn plan_building<F>(
        &self,
        building: &L,
        floors: &F,
    ) -> RegionResult<Vec<(FloorLabel<L>, Vec<Rect>)>>
    where
        F: RegionSet<FloorLabel<L>>,
    {
        if self.contains_building(building) {
            return Err(RegionError::duplicate(building));
        }

        let mut plan: Vec<(FloorLabel<L>, Vec<Rect>)> = floors
            .labels()
            .into_iter()
            .filter_map(|label| {
                let mut rects: Vec<Rect> = floors.get_region(&label)?.into_iter().collect();
                rects.sort_unstable();
                Some((label, rects))
            })
            .collect();
        if plan.is_empty() {
            return Err(RegionError::EmptyBuilding {
                building: format!("{building:?}"),
            });
        }
        plan.sort_by_key(|(label, _)| label.floor);

        if let Some((label, _)) = plan.iter().find(|(label, _)| label.building != *building) {
            return Err(RegionError::MismatchedBuilding {
                expected: format!("{building:?}"),
                found: format!("{:?}", label.building),
                floor: label.floor,
            });
        }

        for (label, rects) in &plan {
            self.floors.check(label, rects)?;
        }
        Ok(plan)
    }
}

impl<L: Label> City<L, RegionStore<FloorLabel<L>>> {
    /// An empty city whose floors use the configured backing.
    pub fn from_config(config: &GridConfig) -> RegionResult<Self> {
        Ok(Self::with_template(config.region_set()?))
    }
}

impl<L: Label, S: RegionSet<FloorLabel<L>> + fmt::Display> fmt::Display for City<L, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buildings: Vec<String> = self.labels().iter().map(|b| format!("{b:?}")).collect();
        buildings.sort();
        writeln!(f, "City [{}]", buildings.join(", "))?;
        write!(f, "{}", self.floors)
    }
}

/// An empty city using the default (sparse) backing.
pub fn make_city<L: Label>(grid_size: i32) -> RegionResult<City<L>> {
    City::new(grid_size)
}
