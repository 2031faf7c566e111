use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;

use tracing::{debug, trace};

use crate::core::cell::Cell;
use crate::core::rect::Rect;
use crate::error::{check_grid_size, RegionError, RegionResult};
use crate::region::validate::check_bounds;
use crate::region::{Label, RegionSet};

type SlotId = u32;

/// Region set stored as one owner slot per grid cell.
///
/// `cells` is a row-major `grid_size * grid_size` table holding the slot of the owning label.
/// Slots are small integers indexing `owners`, so the table never clones labels and freed
/// slots are reused. Validation is O(cells touched); memory is O(grid_size^2).
#[derive(Clone, Debug)]
pub struct DenseRegionSet<L> {
    grid_size: i32,
    cells: Vec<Option<SlotId>>,
    owners: Vec<Option<L>>,
    slots: HashMap<L, SlotId>,
}

impl<L: Label> DenseRegionSet<L> {
    /// The label owning `cell`, if any.
    pub fn label_at(&self, cell: Cell) -> Option<&L> {
        if !cell.in_grid(self.grid_size) {
            return None;
        }
        let slot = self.cells[cell.index(self.grid_size)]?;
        self.owners[slot as usize].as_ref()
    }

    /// Number of cells owned by any label.
    pub fn occupied_cells(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Candidate cells in input order, rejecting the first cell claimed twice.
    fn claim_cells(rects: &[Rect]) -> RegionResult<(Vec<Cell>, HashSet<Cell>)> {
        let mut ordered = Vec::new();
        let mut claimed = HashSet::new();
        for rect in rects {
            for cell in rect.cells() {
                if !claimed.insert(cell) {
                    return Err(RegionError::SelfOverlap { cell });
                }
                ordered.push(cell);
            }
        }
        Ok((ordered, claimed))
    }

    fn alloc_slot(&mut self, label: L) -> SlotId {
        let idx = match self.owners.iter().position(Option::is_none) {
            Some(free) => {
                self.owners[free] = Some(label.clone());
                free
            }
            None => {
                self.owners.push(Some(label.clone()));
                self.owners.len() - 1
            }
        };
        let slot = idx as SlotId;
        self.slots.insert(label, slot);
        slot
    }

    /// Greedy cover: take the first unclaimed owned cell in row-major order, grow a maximal
    /// horizontal run, then extend it downward while the whole run stays owned and unclaimed.
    fn decompose(&self, slot: SlotId) -> HashSet<Rect> {
        let g = self.grid_size;
        let owned = |x: i32, y: i32| self.cells[Cell::new(x, y).index(g)] == Some(slot);
        let mut used = vec![false; self.cells.len()];
        let mut out = HashSet::new();

        for idx in 0..self.cells.len() {
            if used[idx] || self.cells[idx] != Some(slot) {
                continue;
            }
            let start = Cell::from_index(idx, g);

            let mut w: i32 = 1;
            while start.x + w < g
                && owned(start.x + w, start.y)
                && !used[Cell::new(start.x + w, start.y).index(g)]
            {
                w += 1;
            }

            let mut h: i32 = 1;
            'grow: while start.y + h < g {
                for x in start.x..start.x + w {
                    let c = Cell::new(x, start.y + h);
                    if !owned(c.x, c.y) || used[c.index(g)] {
                        break 'grow;
                    }
                }
                h += 1;
            }

            let rect = Rect::sized(start, w as u32, h as u32);
            for c in rect.cells() {
                used[c.index(g)] = true;
            }
            out.insert(rect);
        }

        out
    }

    fn rep_ok(&self) -> bool {
        let sized = self.cells.len() == (self.grid_size as usize).pow(2);
        let indexed = self
            .slots
            .iter()
            .all(|(label, &slot)| {
                self.owners.get(slot as usize).and_then(Option::as_ref) == Some(label)
            });
        let live = self
            .cells
            .iter()
            .flatten()
            .all(|&slot| matches!(self.owners.get(slot as usize), Some(Some(_))));
        let contiguous = self.slots.values().all(|&slot| {
            let cells: HashSet<Cell> = (0..self.cells.len())
                .filter(|&i| self.cells[i] == Some(slot))
                .map(|i| Cell::from_index(i, self.grid_size))
                .collect();
            components(&cells) <= 1
        });
        sized && indexed && live && contiguous
    }
}

/// Number of orthogonally connected pieces of a cell set (flood fill).
fn components(cells: &HashSet<Cell>) -> usize {
    let mut seen: HashSet<Cell> = HashSet::with_capacity(cells.len());
    let mut q: VecDeque<Cell> = VecDeque::new();
    let mut count = 0;

    for &start in cells {
        if !seen.insert(start) {
            continue;
        }
        count += 1;
        q.push_back(start);
        while let Some(c) = q.pop_front() {
            for n in c.neighbours() {
                if cells.contains(&n) && seen.insert(n) {
                    q.push_back(n);
                }
            }
        }
    }

    count
}

impl<L: Label> RegionSet<L> for DenseRegionSet<L> {
    fn new(grid_size: i32) -> RegionResult<Self> {
        check_grid_size(grid_size)?;
        let too_large = || RegionError::InvalidGeometry {
            reason: format!("a dense {grid_size}x{grid_size} grid does not fit in memory"),
        };
        let n = (grid_size as usize)
            .checked_mul(grid_size as usize)
            .ok_or_else(too_large)?;
        let mut cells: Vec<Option<SlotId>> = Vec::new();
        cells.try_reserve_exact(n).map_err(|_| too_large())?;
        cells.resize(n, None);
        Ok(Self {
            grid_size,
            cells,
            owners: Vec::new(),
            slots: HashMap::new(),
        })
    }

    #[inline]
    fn grid_size(&self) -> i32 {
        self.grid_size
    }

    fn labels(&self) -> HashSet<L> {
        self.slots.keys().cloned().collect()
    }

    #[inline]
    fn contains_label(&self, label: &L) -> bool {
        self.slots.contains_key(label)
    }

    fn get_region(&self, label: &L) -> Option<HashSet<Rect>> {
        let &slot = self.slots.get(label)?;
        Some(self.decompose(slot))
    }

    fn check(&self, label: &L, rects: &[Rect]) -> RegionResult<()> {
        if self.slots.contains_key(label) {
            return Err(RegionError::duplicate(label));
        }
        check_bounds(rects, self.grid_size)?;

        let (ordered, claimed) = Self::claim_cells(rects)?;

        let pieces = components(&claimed);
        if pieces > 1 {
            return Err(RegionError::Disconnected { components: pieces });
        }

        for cell in ordered {
            if let Some(owner) = self.label_at(cell) {
                return Err(RegionError::overlap(cell, owner));
            }
        }
        Ok(())
    }

    fn add<I>(&mut self, label: L, rects: I) -> RegionResult<()>
    where
        I: IntoIterator<Item = Rect>,
    {
        let rects: Vec<Rect> = rects.into_iter().collect();
        if let Err(err) = self.check(&label, &rects) {
            trace!(?label, %err, "dense region rejected");
            return Err(err);
        }

        let g = self.grid_size;
        let slot = self.alloc_slot(label.clone());
        let mut painted = 0usize;
        for cell in rects.iter().flat_map(|r| r.cells()) {
            self.cells[cell.index(g)] = Some(slot);
            painted += 1;
        }
        debug!(?label, cells = painted, "dense region added");
        debug_assert!(self.rep_ok());
        Ok(())
    }

    fn remove(&mut self, label: &L) -> bool {
        let Some(slot) = self.slots.remove(label) else {
            return false;
        };
        for cell in self.cells.iter_mut() {
            if *cell == Some(slot) {
                *cell = None;
            }
        }
        self.owners[slot as usize] = None;
        debug!(?label, "dense region removed");
        debug_assert!(self.rep_ok());
        true
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl<L: Label> fmt::Display for DenseRegionSet<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "DenseRegionSet {}x{}", self.grid_size, self.grid_size)?;
        for (slot, label) in self.owners.iter().enumerate() {
            if let Some(label) = label {
                writeln!(f, "  [{slot}] {label:?}")?;
            }
        }
        for y in 0..self.grid_size {
            let row: String = (0..self.grid_size)
                .map(|x| match self.cells[Cell::new(x, y).index(self.grid_size)] {
                    Some(slot) => char::from_digit(slot % 36, 36).unwrap_or('#'),
                    None => '.',
                })
                .collect();
            writeln!(f, "  {row}")?;
        }
        Ok(())
    }
}
