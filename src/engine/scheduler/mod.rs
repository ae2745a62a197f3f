//! Frame schedulers.
//!
//! A scheduler owns the queue of pending [`FrameRequest`]s and decides in
//! what order candidate frames are fused into the map, and whether a
//! candidate should be dropped to avoid redundant work. Two variants exist,
//! selected by static configuration:
//!
//! - [`PassThroughScheduler`]: every request executes in arrival order; the
//!   most recent request is retained unconsumed for the renderer's raycast
//!   reference. Used when frames carry ground-truth trajectories that must
//!   all be applied.
//! - [`BatchScheduler`]: optional sensor-id or greedy nearest-neighbor
//!   reordering plus heat-based skipping of frames aimed at saturated
//!   regions.
//!
//! Schedulers borrow the map and streaming engines per call instead of
//! owning them: both execution paths share one engine pair, and dispatch is
//! strictly sequential, so no ownership transfer or locking is warranted.

mod batch;
mod pass_through;

pub use batch::BatchScheduler;
pub use pass_through::PassThroughScheduler;

use crate::core::types::FrameRequest;
use crate::map::{ChunkStreaming, VolumetricMap};

/// Per-batch accounting, for diagnostics and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Frames streamed and integrated.
    pub executed: usize,
    /// Frames dropped by the heat throttle.
    pub skipped: usize,
    /// Frames aborted as invalid.
    pub invalid: usize,
    /// Frames aborted by tracking loss.
    pub lost: usize,
}

impl BatchReport {
    /// Total requests consumed from the queue this batch.
    #[inline]
    pub fn consumed(&self) -> usize {
        self.executed + self.skipped + self.invalid + self.lost
    }
}

/// Scheduling capability shared by all variants.
pub trait FrameScheduler {
    /// Append a request to the pending queue. O(1), never fails.
    fn enqueue(&mut self, request: FrameRequest);

    /// Number of requests currently pending. O(1).
    fn pending_count(&self) -> usize;

    /// Consume pending requests, issuing streaming and integration calls on
    /// the engines.
    fn run_batch(
        &mut self,
        map: &mut dyn VolumetricMap,
        chunks: &mut dyn ChunkStreaming,
    ) -> BatchReport;
}
