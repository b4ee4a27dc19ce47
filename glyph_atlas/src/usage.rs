// Copyright 2026 the Glyph Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deduplicated per-batch tracking of touched cells.

use smallvec::SmallVec;

use crate::locator::{MAX_CELLS_PER_PAGE, MAX_PAGES};
use crate::region::RegionLocator;

/// A (page, cell) pair recorded by [`BulkUseTracker`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct CellRef {
    /// The page index.
    pub page_index: u32,
    /// The cell index within the page.
    pub cell_index: u32,
}

/// Records which cells a batch of draws touched, without duplicates.
///
/// Callers that mark many regions as in-use per frame (to keep their cells
/// from being chosen for eviction) collect the touched cells here and apply
/// the marking once per cell rather than once per region. One `u32` bitmap
/// per page answers membership; this is where the 32-cells-per-page bound is
/// load-bearing. The deduplicated pairs are also kept in first-seen order in
/// an inline vector, since a batch typically touches only a few cells.
#[derive(Debug)]
pub struct BulkUseTracker {
    cells: SmallVec<[CellRef; 4]>,
    seen: [u32; MAX_PAGES as usize],
}

impl BulkUseTracker {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self {
            cells: SmallVec::new(),
            seen: [0; MAX_PAGES as usize],
        }
    }

    /// Records the cell owning `region`.
    ///
    /// Returns true if the cell was not already recorded in this batch.
    pub fn add(&mut self, region: &RegionLocator) -> bool {
        let page_index = region.page_index();
        let cell_index = region.cell_index();
        if self.find(page_index, cell_index) {
            return false;
        }
        self.set(page_index, cell_index);
        true
    }

    /// The deduplicated cells recorded so far, in first-seen order.
    pub fn cells(&self) -> &[CellRef] {
        &self.cells
    }

    /// Forgets everything recorded, ready for the next batch.
    pub fn reset(&mut self) {
        self.cells.clear();
        self.seen = [0; MAX_PAGES as usize];
    }

    fn find(&self, page_index: u32, cell_index: u32) -> bool {
        debug_assert!(cell_index < MAX_CELLS_PER_PAGE, "cell index out of range");
        (self.seen[page_index as usize] >> cell_index) & 1 != 0
    }

    fn set(&mut self, page_index: u32, cell_index: u32) {
        self.seen[page_index as usize] |= 1 << cell_index;
        self.cells.push(CellRef {
            page_index,
            cell_index,
        });
    }
}

impl Default for BulkUseTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::CellLocator;
    use crate::rect::AtlasRect;

    fn region(page_index: u32, cell_index: u32) -> RegionLocator {
        let mut region = RegionLocator::default();
        region.place_rect(AtlasRect::from_xywh(0, 0, 4, 4));
        region.set_cell_locator(CellLocator::new(page_index, cell_index, 1).unwrap());
        region
    }

    #[test]
    fn deduplicates_within_a_batch() {
        let mut tracker = BulkUseTracker::new();
        assert!(tracker.add(&region(0, 5)));
        assert!(tracker.add(&region(1, 5)));
        assert!(!tracker.add(&region(0, 5)));
        assert_eq!(tracker.cells(), &[
            CellRef {
                page_index: 0,
                cell_index: 5
            },
            CellRef {
                page_index: 1,
                cell_index: 5
            },
        ]);
    }

    #[test]
    fn reset_starts_a_new_batch() {
        let mut tracker = BulkUseTracker::new();
        assert!(tracker.add(&region(3, 31)));
        tracker.reset();
        assert!(tracker.cells().is_empty());
        assert!(tracker.add(&region(3, 31)));
    }

    #[test]
    fn distinct_generations_are_one_cell() {
        // Usage is keyed on (page, cell); the generation is irrelevant here.
        let mut tracker = BulkUseTracker::new();
        let mut stale = region(2, 9);
        stale.set_cell_locator(CellLocator::new(2, 9, 41).unwrap());
        assert!(tracker.add(&stale));
        assert!(!tracker.add(&region(2, 9)));
    }
}
