// Copyright 2026 the Glyph Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The unit of packing and eviction within a page.

use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use crate::format::MaskFormat;
use crate::generation::GenerationCounter;
use crate::locator::{CellLocator, LocatorError};
use crate::notify::EvictionNotifier;
use crate::packer::RectPacker;
use crate::rect::AtlasRect;
use crate::region::{RegionLocator, MAX_COORD};

/// One fixed-size sub-area of a backing page.
///
/// A cell owns a packing sub-allocator scoped to its dimensions, a pixel
/// staging buffer, a dirty-region accumulator, and its current
/// [`CellLocator`]. Successful insertions return [`RegionLocator`]s stamped
/// with the cell's locator at that moment; when the cell is evicted via
/// [`reset_rects`](Self::reset_rects) its locator is replaced with one
/// carrying a fresh generation, and every handle stamped earlier becomes
/// detectably stale without being touched.
///
/// A cell's life cycle loops forever: fresh, then filling through
/// [`add_sub_image`](Self::add_sub_image) calls, then evicted and filling
/// again for the next tenant. There is no terminal state short of dropping
/// the atlas.
pub struct Cell {
    locator: CellLocator,
    packer: Box<dyn RectPacker>,
    /// Staging pixels, `width * height * bytes_per_pixel`, row-major.
    data: Vec<u8>,
    width: u16,
    height: u16,
    /// Position of this cell within its backing page, in page-local pixels.
    offset_x: u16,
    offset_y: u16,
    format: MaskFormat,
    /// Union of all regions touched since the last [`mark_clean`](Self::mark_clean),
    /// in cell-local pixels.
    dirty: AtlasRect,
}

impl Cell {
    /// Creates a fresh cell.
    ///
    /// `offset_x`/`offset_y` position the cell within its backing page;
    /// `width`/`height` are its fixed pixel dimensions, which also scope
    /// `packer`. The first generation is minted from `counter` immediately.
    ///
    /// Fails if `page_index` or `cell_index` is out of range. The cell must
    /// also fit inside the 13-bit page-local coordinate space.
    pub fn new(
        page_index: u32,
        cell_index: u32,
        counter: &GenerationCounter,
        offset_x: u16,
        offset_y: u16,
        width: u16,
        height: u16,
        format: MaskFormat,
        packer: Box<dyn RectPacker>,
    ) -> Result<Self, LocatorError> {
        assert!(width > 0 && height > 0, "cell dimensions must be nonzero");
        assert!(
            u32::from(offset_x) + u32::from(width) <= u32::from(MAX_COORD)
                && u32::from(offset_y) + u32::from(height) <= u32::from(MAX_COORD),
            "cell extends past the 13-bit page coordinate range"
        );
        let locator = CellLocator::mint(page_index, cell_index, counter)?;
        let bytes = usize::from(width) * usize::from(height) * format.bytes_per_pixel();
        Ok(Self {
            locator,
            packer,
            data: vec![0; bytes],
            width,
            height,
            offset_x,
            offset_y,
            format,
            dirty: AtlasRect::EMPTY,
        })
    }

    /// The cell's current locator.
    pub fn locator(&self) -> CellLocator {
        self.locator
    }

    /// The page this cell belongs to.
    pub fn page_index(&self) -> u32 {
        self.locator.page_index()
    }

    /// The cell's index within its page.
    pub fn cell_index(&self) -> u32 {
        self.locator.cell_index()
    }

    /// The cell's current generation.
    ///
    /// A [`RegionLocator`] whose embedded generation differs from this value
    /// refers to content that has since been evicted.
    pub fn generation(&self) -> u64 {
        self.locator.generation()
    }

    /// Whether `region` still refers to this cell's current contents.
    pub fn is_current(&self, region: &RegionLocator) -> bool {
        region.cell_locator() == self.locator
    }

    /// The cell's position within its backing page, in page-local pixels.
    pub fn offset(&self) -> (u16, u16) {
        (self.offset_x, self.offset_y)
    }

    /// The cell's fixed width in pixels.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// The cell's fixed height in pixels.
    pub fn height(&self) -> u16 {
        self.height
    }

    /// The pixel format of the staging buffer.
    pub fn mask_format(&self) -> MaskFormat {
        self.format
    }

    /// Bytes per pixel of the staging buffer.
    pub fn bytes_per_pixel(&self) -> usize {
        self.format.bytes_per_pixel()
    }

    /// The staging pixels, row-major at the cell's full width.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Attempts to place and stage a `width` x `height` bitmap.
    ///
    /// `data` must hold exactly `width * height * bytes_per_pixel` bytes,
    /// tightly packed. On success the pixels are copied into the staging
    /// buffer, the dirty region is extended to cover the placement, and a
    /// [`RegionLocator`] in page-local coordinates, stamped with the cell's
    /// current locator, is returned.
    ///
    /// Returns `None` when the packer finds no room. That is an ordinary
    /// outcome — the cell is full — and leaves the staging buffer, the dirty
    /// region, and the packer untouched; the caller picks another cell or
    /// evicts one.
    pub fn add_sub_image(&mut self, width: u16, height: u16, data: &[u8]) -> Option<RegionLocator> {
        assert!(
            width > 0 && height > 0 && width <= self.width && height <= self.height,
            "sub-image dimensions must be nonzero and fit the cell"
        );
        let bpp = self.format.bytes_per_pixel();
        assert_eq!(
            data.len(),
            usize::from(width) * usize::from(height) * bpp,
            "pixel data length must match the sub-image dimensions"
        );

        let (x, y) = self.packer.try_place(width, height)?;

        let row_bytes = usize::from(width) * bpp;
        let pitch = usize::from(self.width) * bpp;
        let mut dst = (usize::from(y) * usize::from(self.width) + usize::from(x)) * bpp;
        for src_row in data.chunks_exact(row_bytes) {
            self.data[dst..dst + row_bytes].copy_from_slice(src_row);
            dst += pitch;
        }

        self.dirty.join(AtlasRect::from_xywh(x, y, width, height));

        let mut region = RegionLocator::default();
        region.place_rect(AtlasRect::from_xywh(
            self.offset_x + x,
            self.offset_y + y,
            width,
            height,
        ));
        region.set_cell_locator(self.locator);
        Some(region)
    }

    /// Evicts the cell's contents and advances its identity.
    ///
    /// Discards the packer's placements, clears the dirty region, and
    /// replaces the locator wholesale with one carrying the same page and
    /// cell index and a fresh generation from `counter`. Region locators
    /// stamped before this call now compare stale against
    /// [`locator`](Self::locator). Before returning, every listener on
    /// `notifier` is told the retired locator, so no subscriber can observe
    /// the old generation as still current afterwards.
    pub fn reset_rects(&mut self, counter: &GenerationCounter, notifier: &mut EvictionNotifier) {
        let retired = self.locator;
        self.packer.reset();
        self.dirty = AtlasRect::EMPTY;
        self.locator =
            CellLocator::new_unchecked(retired.page_index(), retired.cell_index(), counter.next());
        log::trace!(
            "evicted cell {}/{}: generation {} -> {}",
            retired.page_index(),
            retired.cell_index(),
            retired.generation(),
            self.locator.generation()
        );
        notifier.notify_evicted(retired);
    }

    /// The union of regions staged since the last [`mark_clean`](Self::mark_clean),
    /// in cell-local pixels, or `None` if nothing is pending.
    pub fn dirty_rect(&self) -> Option<AtlasRect> {
        (!self.dirty.is_empty()).then_some(self.dirty)
    }

    /// Clears the dirty region, typically after its pixels were flushed to
    /// the backing surface.
    pub fn mark_clean(&mut self) {
        self.dirty = AtlasRect::EMPTY;
    }
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cell")
            .field("locator", &self.locator)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("offset", &(self.offset_x, self.offset_y))
            .field("format", &self.format)
            .field("dirty", &self.dirty)
            .finish_non_exhaustive()
    }
}
