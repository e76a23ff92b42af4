//! Injectable randomness for hero generation.
//!
//! The generator never touches a global RNG; it asks a [`RandomSource`] for a
//! uniform index. Production wires an [`RngSource`], tests wire a
//! [`FixedIndex`] or a [`ScriptedSource`] and assert exact output.

use rand::prelude::*;
use rand::rngs::StdRng;

/// Capability returning a uniform index over a collection of a given size.
pub trait RandomSource {
    /// Return an index in `0..len`. Callers guarantee `len > 0`.
    fn pick_index(&mut self, len: usize) -> usize;
}

impl<T: RandomSource + ?Sized> RandomSource for Box<T> {
    fn pick_index(&mut self, len: usize) -> usize {
        (**self).pick_index(len)
    }
}

impl<T: RandomSource + ?Sized> RandomSource for &mut T {
    fn pick_index(&mut self, len: usize) -> usize {
        (**self).pick_index(len)
    }
}

// ============================================================================
// RNG-backed source
// ============================================================================

/// A [`RandomSource`] over any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R = StdRng> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<StdRng> {
    /// OS-seeded generator for normal use.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Deterministic generator; the same seed replays the same heroes.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn pick_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

// ============================================================================
// Scripted sources
// ============================================================================

/// Always picks the same index, clamped to the last element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedIndex(pub usize);

impl RandomSource for FixedIndex {
    fn pick_index(&mut self, len: usize) -> usize {
        self.0.min(len.saturating_sub(1))
    }
}

/// Replays a list of indices in order, cycling, each reduced modulo `len`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    script: Vec<usize>,
    cursor: usize,
}

impl ScriptedSource {
    pub fn new(script: impl Into<Vec<usize>>) -> Self {
        Self {
            script: script.into(),
            cursor: 0,
        }
    }

    /// Number of picks served so far.
    pub fn picks(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedSource {
    fn pick_index(&mut self, len: usize) -> usize {
        if self.script.is_empty() || len == 0 {
            self.cursor += 1;
            return 0;
        }
        let value = self.script[self.cursor % self.script.len()];
        self.cursor += 1;
        value % len
    }
}
