// Copyright 2026 the Glyph Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cell identity: the (page, cell, generation) triple.

use core::fmt;

use crate::generation::GenerationCounter;

/// Maximum number of backing pages in an atlas.
///
/// This bound is load-bearing: the page index must fit in the two spare bits
/// of a [`RegionLocator`](crate::RegionLocator) coordinate word, and it sizes
/// the per-page bitmaps in [`BulkUseTracker`](crate::BulkUseTracker).
pub const MAX_PAGES: u32 = 4;

/// Maximum number of cells per page.
///
/// Bounded so that a full page's cells fit in one `u32` usage bitmap.
pub const MAX_CELLS_PER_PAGE: u32 = 32;

/// Exclusive upper bound on generation values: they occupy 48 bits.
pub const MAX_GENERATION: u64 = 1 << GENERATION_BITS;

const GENERATION_BITS: u64 = 48;
const CELL_BITS: u64 = 8;

const CELL_SHIFT: u64 = GENERATION_BITS;
const PAGE_SHIFT: u64 = GENERATION_BITS + CELL_BITS;

const GENERATION_MASK: u64 = (1 << GENERATION_BITS) - 1;
const CELL_MASK: u64 = (1 << CELL_BITS) - 1;

/// Error returned when constructing a [`CellLocator`] from out-of-range parts.
///
/// Out-of-range indices are a caller bug; rejecting them loudly here is
/// preferred over masking, which would silently alias a different cell.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LocatorError {
    /// The page index was not below [`MAX_PAGES`].
    PageIndexOutOfRange(u32),
    /// The cell index was not below [`MAX_CELLS_PER_PAGE`].
    CellIndexOutOfRange(u32),
    /// The generation did not fit in 48 bits.
    GenerationOutOfRange(u64),
}

impl fmt::Display for LocatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PageIndexOutOfRange(page) => {
                write!(f, "page index {page} exceeds maximum of {}", MAX_PAGES - 1)
            }
            Self::CellIndexOutOfRange(cell) => {
                write!(
                    f,
                    "cell index {cell} exceeds maximum of {}",
                    MAX_CELLS_PER_PAGE - 1
                )
            }
            Self::GenerationOutOfRange(generation) => {
                write!(f, "generation {generation} does not fit in 48 bits")
            }
        }
    }
}

impl core::error::Error for LocatorError {}

/// Identity of one cell state: page index, cell index, and generation.
///
/// A cell locator is analogous to a directory path, `page/cell/generation`.
/// It is an immutable value snapshot: a [`Cell`](crate::Cell) replaces its
/// locator wholesale when it is evicted, and all locators stamped earlier
/// become stale. Staleness is detected by structural comparison against the
/// cell's live locator, never by chasing references.
///
/// The triple is packed into a single `u64`:
///
/// ```text
/// | page (8) | cell (8) | generation (48) |
/// 63       56 55      48 47              0
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellLocator(u64);

impl CellLocator {
    /// The all-zero sentinel, the only locator for which
    /// [`is_valid`](Self::is_valid) is false.
    pub const INVALID: Self = Self(0);

    /// Creates a locator, validating every field range.
    pub fn new(page_index: u32, cell_index: u32, generation: u64) -> Result<Self, LocatorError> {
        if page_index >= MAX_PAGES {
            return Err(LocatorError::PageIndexOutOfRange(page_index));
        }
        if cell_index >= MAX_CELLS_PER_PAGE {
            return Err(LocatorError::CellIndexOutOfRange(cell_index));
        }
        if generation >= MAX_GENERATION {
            return Err(LocatorError::GenerationOutOfRange(generation));
        }
        Ok(Self::pack(page_index, cell_index, generation))
    }

    /// Packs already-validated parts. Callers must uphold the field ranges.
    pub(crate) fn new_unchecked(page_index: u32, cell_index: u32, generation: u64) -> Self {
        debug_assert!(page_index < MAX_PAGES, "page index out of range");
        debug_assert!(cell_index < MAX_CELLS_PER_PAGE, "cell index out of range");
        debug_assert!(generation < MAX_GENERATION, "generation out of range");
        Self::pack(page_index, cell_index, generation)
    }

    const fn pack(page_index: u32, cell_index: u32, generation: u64) -> Self {
        Self((page_index as u64) << PAGE_SHIFT | (cell_index as u64) << CELL_SHIFT | generation)
    }

    /// Creates a locator for `(page_index, cell_index)` with a fresh
    /// generation from `counter`.
    ///
    /// The index checks run before the counter is consulted, so a rejected
    /// construction does not burn a generation.
    pub(crate) fn mint(
        page_index: u32,
        cell_index: u32,
        counter: &GenerationCounter,
    ) -> Result<Self, LocatorError> {
        if page_index >= MAX_PAGES {
            return Err(LocatorError::PageIndexOutOfRange(page_index));
        }
        if cell_index >= MAX_CELLS_PER_PAGE {
            return Err(LocatorError::CellIndexOutOfRange(cell_index));
        }
        Ok(Self::new_unchecked(page_index, cell_index, counter.next()))
    }

    /// The page this locator refers to.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "field occupies 8 bits after the shift"
    )]
    pub const fn page_index(self) -> u32 {
        ((self.0 >> PAGE_SHIFT) & CELL_MASK) as u32
    }

    /// The cell within the page.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "field occupies 8 bits after the shift"
    )]
    pub const fn cell_index(self) -> u32 {
        ((self.0 >> CELL_SHIFT) & CELL_MASK) as u32
    }

    /// The generation this locator was stamped with.
    pub const fn generation(self) -> u64 {
        self.0 & GENERATION_MASK
    }

    /// Whether this locator is anything other than the all-zero sentinel.
    ///
    /// Note that the test is on the whole triple: a locator with generation 0
    /// but a nonzero page or cell index reports valid. The library never
    /// mints such a locator itself (generations start at 1), but a
    /// hand-constructed one is deliberately not conflated with
    /// [`INVALID`](Self::INVALID).
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }
}

impl Default for CellLocator {
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Debug for CellLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CellLocator")
            .field("page_index", &self.page_index())
            .field("cell_index", &self.cell_index())
            .field("generation", &self.generation())
            .finish()
    }
}
