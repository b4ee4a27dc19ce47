// Copyright 2026 the Glyph Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Generation numbering for cells.

/// Monotonically increasing generation source for one atlas.
///
/// A single counter is shared by all pages and cells of an atlas; a value
/// handed out by [`next`](Self::next) is never reissued for the life of the
/// atlas, so two cell states minted at different times can never compare
/// equal. Interior mutability keeps the single-writer usage ergonomic: cells
/// only need a shared reference to mint a generation.
#[derive(Debug)]
pub struct GenerationCounter {
    generation: core::cell::Cell<u64>,
}

impl GenerationCounter {
    /// The reserved "no generation" value. Never returned by [`next`](Self::next).
    pub const INVALID_GENERATION: u64 = 0;

    /// Creates a counter whose first issued generation is 1.
    pub const fn new() -> Self {
        Self {
            generation: core::cell::Cell::new(1),
        }
    }

    /// Returns the current generation and advances the counter.
    pub fn next(&self) -> u64 {
        let generation = self.generation.get();
        self.generation.set(generation + 1);
        generation
    }
}

impl Default for GenerationCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strictly_increasing_and_never_invalid() {
        let counter = GenerationCounter::new();
        let mut previous = GenerationCounter::INVALID_GENERATION;
        for _ in 0..100 {
            let generation = counter.next();
            assert_ne!(generation, GenerationCounter::INVALID_GENERATION);
            assert!(generation > previous, "generations must strictly increase");
            previous = generation;
        }
    }

    #[test]
    fn starts_at_one() {
        let counter = GenerationCounter::new();
        assert_eq!(counter.next(), 1);
        assert_eq!(counter.next(), 2);
    }
}
