// Copyright 2026 the Glyph Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Small unsigned rectangle type used for placements and dirty tracking.

/// An axis-aligned rectangle with `u16` edges.
///
/// Coordinates are half-open: a rect covers `left..right` by `top..bottom`.
/// Used both for placement rectangles handed to
/// [`RegionLocator::place_rect`](crate::RegionLocator::place_rect) and for
/// the per-cell dirty-region union.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct AtlasRect {
    /// Left edge.
    pub left: u16,
    /// Top edge.
    pub top: u16,
    /// Right edge (exclusive).
    pub right: u16,
    /// Bottom edge (exclusive).
    pub bottom: u16,
}

impl AtlasRect {
    /// The empty rectangle at the origin.
    pub const EMPTY: Self = Self {
        left: 0,
        top: 0,
        right: 0,
        bottom: 0,
    };

    /// Creates a rectangle from a position and size.
    pub const fn from_xywh(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            left: x,
            top: y,
            right: x + width,
            bottom: y + height,
        }
    }

    /// Width of the rectangle.
    pub const fn width(self) -> u16 {
        self.right - self.left
    }

    /// Height of the rectangle.
    pub const fn height(self) -> u16 {
        self.bottom - self.top
    }

    /// Whether the rectangle covers no pixels.
    pub const fn is_empty(self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }

    /// Extends this rectangle to also cover `other`.
    ///
    /// Joining with an empty rectangle is a no-op; joining an empty rectangle
    /// with a non-empty one adopts the non-empty bounds.
    pub fn join(&mut self, other: Self) {
        if other.is_empty() {
            return;
        }
        if self.is_empty() {
            *self = other;
            return;
        }
        self.left = self.left.min(other.left);
        self.top = self.top.min(other.top);
        self.right = self.right.max(other.right);
        self.bottom = self.bottom.max(other.bottom);
    }

    /// Translates the rectangle by `(dx, dy)`.
    pub fn offset(&mut self, dx: u16, dy: u16) {
        self.left += dx;
        self.top += dy;
        self.right += dx;
        self.bottom += dy;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_xywh_and_dimensions() {
        let r = AtlasRect::from_xywh(10, 20, 30, 40);
        assert_eq!(r.left, 10);
        assert_eq!(r.top, 20);
        assert_eq!(r.right, 40);
        assert_eq!(r.bottom, 60);
        assert_eq!(r.width(), 30);
        assert_eq!(r.height(), 40);
        assert!(!r.is_empty());
    }

    #[test]
    fn empty() {
        assert!(AtlasRect::EMPTY.is_empty());
        assert!(AtlasRect::from_xywh(5, 5, 0, 10).is_empty());
    }

    #[test]
    fn join_grows_bounds() {
        let mut r = AtlasRect::from_xywh(10, 10, 10, 10);
        r.join(AtlasRect::from_xywh(0, 15, 5, 30));
        assert_eq!(r, AtlasRect {
            left: 0,
            top: 10,
            right: 20,
            bottom: 45
        });
    }

    #[test]
    fn join_with_empty_is_noop() {
        let mut r = AtlasRect::from_xywh(1, 2, 3, 4);
        let before = r;
        r.join(AtlasRect::EMPTY);
        assert_eq!(r, before);

        let mut e = AtlasRect::EMPTY;
        e.join(before);
        assert_eq!(e, before);
    }

    #[test]
    fn offset_moves_all_edges() {
        let mut r = AtlasRect::from_xywh(1, 2, 3, 4);
        r.offset(10, 20);
        assert_eq!(r, AtlasRect::from_xywh(11, 22, 3, 4));
    }
}
