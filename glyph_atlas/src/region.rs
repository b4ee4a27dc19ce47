// Copyright 2026 the Glyph Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Packed region handles returned to callers.

use core::fmt;

use crate::locator::CellLocator;
use crate::rect::AtlasRect;

/// Maximum page-local coordinate value: coordinates occupy 13 bits.
pub const MAX_COORD: u16 = 0x1FFF;

const COORD_MASK: u16 = 0x1FFF;
const PAGE_MASK: u16 = 0xE000;
const PAGE_SHIFT: u16 = 13;

/// Position of a packed region within an atlas, plus the identity of the
/// cell that produced it.
///
/// This is the handle external code stores after a successful insertion and
/// presents back to the cache later. Validity is checked by comparing the
/// embedded [`CellLocator`] against the owning cell's live locator; the
/// region locator itself is a snapshot and is never mutated by eviction.
///
/// The rectangle is kept as four `u16` words, left/top/right/bottom, in
/// page-local pixels. Bits 13 and 14 of the *left* and *right* words carry
/// the page index redundantly, which has the nice property that
/// `width() == right - left` without any masking: the identical page bits
/// subtract to zero. Consumers feeding the raw words to a shader can decode
/// the page index without carrying it separately, and a region can never
/// span two pages because all coordinates share one stamp.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct RegionLocator {
    cell_locator: CellLocator,
    // Page-local bounds in the low 13 bits, page index in bits 13..15 of
    // the left/right words.
    coords: [u16; 4],
}

impl RegionLocator {
    /// The raw coordinate words: left, top, right, bottom.
    ///
    /// The left and right words include the page-index bits.
    pub const fn coords(self) -> [u16; 4] {
        self.coords
    }

    /// The cell locator stamped at insertion time.
    pub const fn cell_locator(self) -> CellLocator {
        self.cell_locator
    }

    /// The page this region lives on.
    pub const fn page_index(self) -> u32 {
        self.cell_locator.page_index()
    }

    /// The cell this region was packed into.
    pub const fn cell_index(self) -> u32 {
        self.cell_locator.cell_index()
    }

    /// The generation of the owning cell at insertion time.
    pub const fn generation(self) -> u64 {
        self.cell_locator.generation()
    }

    /// Resets the embedded cell locator to the invalid sentinel.
    pub fn invalidate(&mut self) {
        self.cell_locator = CellLocator::INVALID;
    }

    /// Top-left corner in plain page-local pixels, page bits masked off.
    pub const fn top_left(self) -> (u16, u16) {
        (self.coords[0] & COORD_MASK, self.coords[1])
    }

    /// Width of the region.
    ///
    /// Plain subtraction is correct because the left and right words carry
    /// identical page bits.
    pub const fn width(self) -> u16 {
        self.coords[2] - self.coords[0]
    }

    /// Height of the region.
    pub const fn height(self) -> u16 {
        self.coords[3] - self.coords[1]
    }

    /// Overwrites the tight bounds, preserving the page-index bits.
    ///
    /// `rect` is in page-local pixels. The caller must ensure
    /// `rect.left <= rect.right` and `rect.right <= MAX_COORD`.
    pub fn place_rect(&mut self, rect: AtlasRect) {
        assert!(rect.left <= rect.right, "malformed rectangle");
        assert!(
            rect.right <= MAX_COORD,
            "rectangle exceeds the 13-bit coordinate range"
        );
        self.coords[0] = (self.coords[0] & PAGE_MASK) | rect.left;
        self.coords[1] = rect.top;
        self.coords[2] = (self.coords[2] & PAGE_MASK) | rect.right;
        self.coords[3] = rect.bottom;
    }

    /// Stores the owning cell locator and re-stamps its page index into the
    /// coordinate words.
    ///
    /// This is the only way the page association of a region can change; the
    /// stamp is applied to both carrying words at once so the cancellation
    /// property of [`width`](Self::width) always holds.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "page indices are below 4 and shift into a u16"
    )]
    pub fn set_cell_locator(&mut self, locator: CellLocator) {
        self.cell_locator = locator;
        let page = (locator.page_index() as u16) << PAGE_SHIFT;
        self.coords[0] = (self.coords[0] & COORD_MASK) | page;
        self.coords[2] = (self.coords[2] & COORD_MASK) | page;
    }

    /// Shrinks the region symmetrically by `padding` pixels on every side.
    ///
    /// Used to trim off the bleed gutter around a packed bitmap before
    /// handing coordinates to a sampler. The caller must ensure
    /// `2 * padding` does not exceed the width or the height; within that
    /// bound the adjustment cannot reach the page bits.
    pub fn inset(&mut self, padding: u16) {
        assert!(2 * padding <= self.width(), "inset exceeds region width");
        assert!(2 * padding <= self.height(), "inset exceeds region height");

        self.coords[0] += padding;
        self.coords[1] += padding;
        self.coords[2] -= padding;
        self.coords[3] -= padding;
    }
}

impl fmt::Debug for RegionLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (x, y) = self.top_left();
        f.debug_struct("RegionLocator")
            .field("cell_locator", &self.cell_locator)
            .field("x", &x)
            .field("y", &y)
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::MAX_PAGES;

    fn stamped(page_index: u32, rect: AtlasRect) -> RegionLocator {
        let mut region = RegionLocator::default();
        region.place_rect(rect);
        region.set_cell_locator(CellLocator::new(page_index, 3, 7).unwrap());
        region
    }

    #[test]
    fn page_bits_cancel_for_every_page() {
        let rects = [
            AtlasRect::from_xywh(0, 0, 1, 1),
            AtlasRect::from_xywh(17, 450, 60, 60),
            AtlasRect::from_xywh(8000, 8000, 191, 191),
            AtlasRect::from_xywh(0, 8191, 8191, 0),
        ];
        for page_index in 0..MAX_PAGES {
            for rect in rects {
                let region = stamped(page_index, rect);
                assert_eq!(region.width(), rect.width());
                assert_eq!(region.height(), rect.height());
                assert_eq!(region.top_left(), (rect.left, rect.top));
                assert_eq!(region.page_index(), page_index);
            }
        }
    }

    #[test]
    fn raw_words_carry_the_page_stamp() {
        let region = stamped(2, AtlasRect::from_xywh(5, 6, 10, 11));
        let coords = region.coords();
        assert_eq!(coords[0] >> PAGE_SHIFT, 2);
        assert_eq!(coords[2] >> PAGE_SHIFT, 2);
        assert_eq!(coords[1], 6);
        assert_eq!(coords[3], 17);
    }

    #[test]
    fn place_rect_preserves_existing_page_bits() {
        let mut region = stamped(3, AtlasRect::from_xywh(0, 0, 4, 4));
        region.place_rect(AtlasRect::from_xywh(100, 200, 30, 40));
        assert_eq!(region.page_index(), 3);
        assert_eq!(region.coords()[0] >> PAGE_SHIFT, 3);
        assert_eq!(region.coords()[2] >> PAGE_SHIFT, 3);
        assert_eq!(region.top_left(), (100, 200));
        assert_eq!(region.width(), 30);
    }

    #[test]
    fn restamping_moves_the_page() {
        let mut region = stamped(1, AtlasRect::from_xywh(12, 34, 56, 78));
        region.set_cell_locator(CellLocator::new(3, 0, 9).unwrap());
        assert_eq!(region.page_index(), 3);
        assert_eq!(region.top_left(), (12, 34));
        assert_eq!(region.width(), 56);
        assert_eq!(region.height(), 78);
    }

    #[test]
    fn inset_shrinks_without_touching_page_bits() {
        let mut region = stamped(2, AtlasRect::from_xywh(10, 20, 30, 40));
        region.inset(5);
        assert_eq!(region.top_left(), (15, 25));
        assert_eq!(region.width(), 20);
        assert_eq!(region.height(), 30);
        assert_eq!(region.page_index(), 2);
        assert_eq!(region.coords()[0] >> PAGE_SHIFT, 2);
        assert_eq!(region.coords()[2] >> PAGE_SHIFT, 2);
    }

    #[test]
    #[should_panic(expected = "inset exceeds region width")]
    fn inset_larger_than_half_width_panics() {
        let mut region = stamped(0, AtlasRect::from_xywh(0, 0, 8, 100));
        region.inset(5);
    }

    #[test]
    #[should_panic(expected = "13-bit coordinate range")]
    fn place_rect_rejects_out_of_range_coordinates() {
        let mut region = RegionLocator::default();
        region.place_rect(AtlasRect::from_xywh(8000, 0, 300, 10));
    }

    #[test]
    fn invalidate_clears_the_cell_locator() {
        let mut region = stamped(1, AtlasRect::from_xywh(0, 0, 2, 2));
        assert!(region.cell_locator().is_valid());
        region.invalidate();
        assert!(!region.cell_locator().is_valid());
    }

    #[test]
    fn default_is_invalid_and_empty() {
        let region = RegionLocator::default();
        assert!(!region.cell_locator().is_valid());
        assert_eq!(region.width(), 0);
        assert_eq!(region.height(), 0);
    }
}
