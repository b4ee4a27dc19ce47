// Copyright 2026 the Glyph Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The rectangle-packing capability consumed by cells.

/// A rectangle sub-allocator scoped to one cell's fixed dimensions.
///
/// [`Cell`](crate::Cell) consumes packing purely through this interface; the
/// placement heuristic is not part of this crate's contract. Implementations
/// must be failure-atomic: a [`try_place`](Self::try_place) call that returns
/// `None` must leave the packer's state unchanged.
pub trait RectPacker {
    /// Attempts to place a `width` x `height` rectangle.
    ///
    /// Returns the top-left position of the placement in cell-local pixels,
    /// or `None` if no free space fits the rectangle. Running out of space is
    /// an ordinary outcome, not an error.
    fn try_place(&mut self, width: u16, height: u16) -> Option<(u16, u16)>;

    /// Forgets all placements, making the whole area free again.
    fn reset(&mut self);
}

/// A minimal shelf next-fit packer.
///
/// Rectangles are placed left to right on the current shelf; when one does
/// not fit, a new shelf opens below. No attempt is made to revisit earlier
/// shelves or reclaim waste. This is good enough for glyph-sized rectangles
/// of similar heights; callers with harder workloads should supply their own
/// [`RectPacker`].
#[derive(Debug)]
pub struct ShelfPacker {
    width: u16,
    height: u16,
    shelf_x: u16,
    shelf_y: u16,
    shelf_height: u16,
}

impl ShelfPacker {
    /// Creates a packer covering a `width` x `height` area.
    pub const fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            shelf_x: 0,
            shelf_y: 0,
            shelf_height: 0,
        }
    }
}

impl RectPacker for ShelfPacker {
    fn try_place(&mut self, width: u16, height: u16) -> Option<(u16, u16)> {
        if width == 0 || height == 0 || width > self.width || height > self.height {
            return None;
        }
        if self.shelf_x + width > self.width || height > self.shelf_height {
            // Open a new shelf sized to this rectangle. All checks happen
            // before any state changes so a failed placement has no effect.
            let next_y = self.shelf_y + self.shelf_height;
            if height > self.height - next_y {
                return None;
            }
            self.shelf_y = next_y;
            self.shelf_x = 0;
            self.shelf_height = height;
        }
        let position = (self.shelf_x, self.shelf_y);
        self.shelf_x += width;
        Some(position)
    }

    fn reset(&mut self) {
        self.shelf_x = 0;
        self.shelf_y = 0;
        self.shelf_height = 0;
    }
}
