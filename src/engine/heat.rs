//! Spatial heat throttle.
//!
//! Tracks how often each chunk of the map received an integration within the
//! recent past. The batch scheduler uses heat to drop candidate frames aimed
//! at already-saturated regions, and decays the whole map once per batch so
//! previously-hot regions cool off instead of being excluded forever.

use std::collections::HashMap;

use crate::core::types::ChunkCoord;

/// Multiplier applied to every entry once per batch.
const DECAY_FACTOR: f32 = 0.9;

/// Per-chunk decayable heat scores.
///
/// Absent keys read as zero heat; entries are never removed, only decayed
/// toward zero. Mutated exclusively by the owning scheduler.
#[derive(Debug, Clone, Default)]
pub struct HeatMap {
    cells: HashMap<ChunkCoord, f32>,
}

impl HeatMap {
    /// Create an empty heat map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current heat of a chunk. Untouched chunks read as 0.
    #[inline]
    pub fn heat(&self, chunk: ChunkCoord) -> f32 {
        self.cells.get(&chunk).copied().unwrap_or(0.0)
    }

    /// Add one unit of heat to a chunk.
    pub fn increment(&mut self, chunk: ChunkCoord) {
        *self.cells.entry(chunk).or_insert(0.0) += 1.0;
    }

    /// Decay every tracked chunk by the batch decay factor, including chunks
    /// untouched in the current batch.
    pub fn decay_all(&mut self) {
        for heat in self.cells.values_mut() {
            *heat *= DECAY_FACTOR;
        }
    }

    /// Number of chunks with a tracked (possibly near-zero) heat entry.
    #[inline]
    pub fn tracked_chunks(&self) -> usize {
        self.cells.len()
    }
}
