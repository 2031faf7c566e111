use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::marker::PhantomData;

use tracing::{debug, trace};

use crate::core::rect::Rect;
use crate::error::RegionResult;
use crate::region::{Label, RegionSet, SparseRegionSet};

/// Key of one floor of one building.
///
/// Callers of [`crate::city::City`] only build these to describe a new building's floors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FloorLabel<L> {
    pub building: L,
    /// Floor number; negative floors are basements.
    pub floor: i32,
}

impl<L> FloorLabel<L> {
    #[inline]
    pub fn new(building: L, floor: i32) -> Self {
        Self { building, floor }
    }
}

/// A floor-indexed stack of region sets keyed by [`FloorLabel`].
///
/// Each floor number owns one region set shared by every building that has a floor there, so
/// contiguity and non-overlap are enforced per floor by a single structural check. The same
/// cells may be reused on different floors.
///
/// New floors are created by cloning an empty template, which fixes the backing for the
/// lifetime of the stack.
#[derive(Clone, Debug)]
pub struct Floors<L, S = SparseRegionSet<FloorLabel<L>>> {
    template: S,
    levels: BTreeMap<i32, S>,
    _label: PhantomData<fn() -> L>,
}

impl<L: Label, S: RegionSet<FloorLabel<L>>> Floors<L, S> {
    /// A stack whose floors are clones of `template`, emptied first.
    pub fn with_template(mut template: S) -> Self {
        for label in template.labels() {
            template.remove(&label);
        }
        Self {
            template,
            levels: BTreeMap::new(),
            _label: PhantomData,
        }
    }

    /// Occupied floor numbers, ascending.
    pub fn floor_numbers(&self) -> Vec<i32> {
        self.levels.keys().copied().collect()
    }

    /// Read access to the region set of one floor number.
    pub fn level(&self, floor: i32) -> Option<&S> {
        self.levels.get(&floor)
    }

    pub fn len(&self) -> usize {
        self.levels.values().map(|level| level.labels().len()).sum()
    }

    /// Floor labels of one building, lowest floor first.
    pub fn floors_of(&self, building: &L) -> Vec<FloorLabel<L>> {
        self.levels
            .iter()
            .map(|(&floor, _)| FloorLabel::new(building.clone(), floor))
            .filter(|label| self.contains_label(label))
            .collect()
    }
}

/// The whole stack is itself a region set over floor labels; each label is routed to the
/// region set of its floor number.
impl<L: Label, S: RegionSet<FloorLabel<L>>> RegionSet<FloorLabel<L>> for Floors<L, S> {
    fn new(grid_size: i32) -> RegionResult<Self> {
        Ok(Self::with_template(S::new(grid_size)?))
    }

    #[inline]
    fn grid_size(&self) -> i32 {
        self.template.grid_size()
    }

    fn labels(&self) -> HashSet<FloorLabel<L>> {
        self.levels.values().flat_map(|level| level.labels()).collect()
    }

    fn contains_label(&self, label: &FloorLabel<L>) -> bool {
        self.levels
            .get(&label.floor)
            .is_some_and(|level| level.contains_label(label))
    }

    fn get_region(&self, label: &FloorLabel<L>) -> Option<HashSet<Rect>> {
        self.levels.get(&label.floor)?.get_region(label)
    }

    fn check(&self, label: &FloorLabel<L>, rects: &[Rect]) -> RegionResult<()> {
        match self.levels.get(&label.floor) {
            Some(level) => level.check(label, rects),
            None => self.template.check(label, rects),
        }
    }

    fn add<I>(&mut self, label: FloorLabel<L>, rects: I) -> RegionResult<()>
    where
        I: IntoIterator<Item = Rect>,
    {
        let floor = label.floor;
        let result = match self.levels.get_mut(&floor) {
            Some(level) => level.add(label, rects),
            None => {
                let mut level = self.template.clone();
                let result = level.add(label, rects);
                if result.is_ok() {
                    debug!(floor, "floor level opened");
                    self.levels.insert(floor, level);
                }
                result
            }
        };
        if let Err(err) = &result {
            trace!(floor, %err, "floor rejected");
        }
        result
    }

    /// Floors left empty are dropped.
    fn remove(&mut self, label: &FloorLabel<L>) -> bool {
        let Some(level) = self.levels.get_mut(&label.floor) else {
            return false;
        };
        let removed = level.remove(label);
        if level.is_empty() {
            self.levels.remove(&label.floor);
            debug!(floor = label.floor, "floor level closed");
        }
        removed
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

impl<L: Label, S: RegionSet<FloorLabel<L>> + fmt::Display> fmt::Display for Floors<L, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Floors {}x{}", self.grid_size(), self.grid_size())?;
        for (floor, level) in &self.levels {
            writeln!(f, "floor {floor}:")?;
            write!(f, "{level}")?;
        }
        Ok(())
    }
}
