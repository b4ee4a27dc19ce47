// Copyright 2026 the Glyph Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pixel formats for cached masks.

/// Pixel format of the bitmaps stored in an atlas cell.
///
/// Supplied at [`Cell`](crate::Cell) construction and used only to size and
/// address the cell's staging buffer; the addressing layer is otherwise
/// format-agnostic.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum MaskFormat {
    /// 1 byte per pixel, plain coverage.
    A8,
    /// 2 bytes per pixel, 3-channel LCD coverage.
    A565,
    /// 4 bytes per pixel, full color.
    Argb,
}

impl MaskFormat {
    /// Returns the number of bytes used by one pixel in this format.
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            Self::A8 => 1,
            Self::A565 => 2,
            Self::Argb => 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_per_pixel() {
        assert_eq!(MaskFormat::A8.bytes_per_pixel(), 1);
        assert_eq!(MaskFormat::A565.bytes_per_pixel(), 2);
        assert_eq!(MaskFormat::Argb.bytes_per_pixel(), 4);
    }
}
