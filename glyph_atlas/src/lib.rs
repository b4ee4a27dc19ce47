// Copyright 2026 the Glyph Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Page/cell addressing, identity, and eviction tracking for glyph bitmap atlases.
//!
//! An atlas packs many small rectangular bitmaps (rendered glyphs, clipped
//! shape masks) into a handful of large backing pages. Each page is divided
//! into fixed-size [`Cell`]s, the unit of packing and eviction. This crate
//! covers the addressing and identity layer of such a cache:
//!
//! - [`CellLocator`] names a cell: which page, which cell, as of which
//!   generation, packed into a single `u64`.
//! - [`RegionLocator`] is the handle returned to callers after a successful
//!   insertion: a packed page-local rectangle plus the cell locator that
//!   produced it.
//! - [`Cell`] owns a packing sub-allocator and pixel staging buffer, issues
//!   region locators, and advances its generation on eviction so that every
//!   previously issued handle can be detected as stale by a plain comparison.
//! - [`EvictionNotifier`] lets external indexes learn about evictions
//!   synchronously instead of discovering staleness lazily.
//!
//! The rectangle packing heuristic and the transfer of page contents to a
//! device are out of scope; packing is consumed through the [`RectPacker`]
//! capability (a simple [`ShelfPacker`] is provided for standalone use).
//!
//! All mutation is assumed to happen on one logical owner; there is no
//! internal locking. Callers needing multi-threaded access must synchronize
//! around the whole atlas externally.
//!
//! ## Features
//!
//! - `std` (enabled by default): This is currently unused and is provided for
//!   forward compatibility.

// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod cell;
mod format;
mod generation;
mod locator;
mod notify;
mod packer;
mod rect;
mod region;
mod usage;

pub use cell::Cell;
pub use format::MaskFormat;
pub use generation::GenerationCounter;
pub use locator::{CellLocator, LocatorError, MAX_CELLS_PER_PAGE, MAX_GENERATION, MAX_PAGES};
pub use notify::{EvictionNotifier, ListenerId};
pub use packer::{RectPacker, ShelfPacker};
pub use rect::AtlasRect;
pub use region::{RegionLocator, MAX_COORD};
pub use usage::{BulkUseTracker, CellRef};
