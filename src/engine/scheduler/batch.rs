//! Batch scheduler with reordering and heat throttling.

use nalgebra::Vector3;

use crate::config::{FusionConfig, OrderingSection, Result, StreamingSection, ThrottleSection};
use crate::core::math::transform_homogeneous;
use crate::core::types::{ChunkCoord, FrameRequest};
use crate::engine::executor::{execute_request, ExecutionOutcome};
use crate::engine::heat::HeatMap;
use crate::engine::ReconstructionSwitch;
use crate::map::{ChunkStreaming, VolumetricMap};

use super::{BatchReport, FrameScheduler};

/// Orders and throttles multi-sensor frame batches.
///
/// Candidate selection per iteration:
/// - default: arrival order (pop front);
/// - `naive_reorder`: one stable sort by sensor id before execution;
/// - `smart_reorder`: greedy nearest-neighbor against the map's last
///   integrated pose, re-evaluated over the remaining requests each
///   iteration.
///
/// When heat skipping is enabled, a candidate aimed at a chunk hotter than
/// the threshold is dropped permanently, unless it is the last request in
/// the batch: the final request always executes, so a batch can never starve
/// to empty.
#[derive(Debug)]
pub struct BatchScheduler {
    ordering: OrderingSection,
    throttle: ThrottleSection,
    streaming: StreamingSection,
    switch: ReconstructionSwitch,
    pending: Vec<FrameRequest>,
    heat: HeatMap,
    processed_frames: u64,
}

impl BatchScheduler {
    /// Create a scheduler from validated configuration.
    ///
    /// Rejects configurations with integration disabled: the batch path has
    /// no compaction-only fallback, so the combination is a configuration
    /// error, not a runtime branch.
    pub fn new(config: &FusionConfig, switch: ReconstructionSwitch) -> Result<Self> {
        config.validate_for_batch()?;
        Ok(Self {
            ordering: config.ordering.clone(),
            throttle: config.throttle.clone(),
            streaming: config.streaming.clone(),
            switch,
            pending: Vec::new(),
            heat: HeatMap::new(),
            processed_frames: 0,
        })
    }

    /// Heat map state, for diagnostics.
    #[inline]
    pub fn heat_map(&self) -> &HeatMap {
        &self.heat
    }

    /// Total frames considered across all batches (including skipped ones).
    #[inline]
    pub fn processed_frames(&self) -> u64 {
        self.processed_frames
    }

    /// Index of the pending request whose transformed reference point lies
    /// nearest to the last integrated pose's. Ties break toward the lowest
    /// index; requests without a valid pose are passed over and drain last.
    fn nearest_candidate(&self, map: &dyn VolumetricMap) -> usize {
        let reference = self.streaming.reference_point_h();
        let last_pos = transform_homogeneous(&map.last_rigid_transform(), &reference);

        let mut best = 0;
        let mut best_dist = f32::INFINITY;
        for (i, request) in self.pending.iter().enumerate() {
            let Some(transform) = request.pose().matrix() else {
                continue;
            };
            let dist = (transform_homogeneous(transform, &reference) - last_pos).norm();
            if dist < best_dist {
                best_dist = dist;
                best = i;
            }
        }
        best
    }

    /// Chunk containing a candidate's transformed reference point, when the
    /// candidate carries a usable pose.
    fn candidate_chunk(
        &self,
        request: &FrameRequest,
        chunks: &dyn ChunkStreaming,
    ) -> Option<ChunkCoord> {
        let transform = request.pose().matrix()?;
        let pos: Vector3<f32> = transform_homogeneous(transform, &self.streaming.reference_point_h());
        Some(chunks.world_to_chunk(pos))
    }
}

impl FrameScheduler for BatchScheduler {
    fn enqueue(&mut self, request: FrameRequest) {
        self.pending.push(request);
    }

    fn pending_count(&self) -> usize {
        self.pending.len()
    }

    fn run_batch(
        &mut self,
        map: &mut dyn VolumetricMap,
        chunks: &mut dyn ChunkStreaming,
    ) -> BatchReport {
        let mut report = BatchReport::default();

        if self.ordering.naive_reorder {
            self.pending.sort_by_key(|r| r.sensor_id());
        }

        while !self.pending.is_empty() {
            self.processed_frames += 1;

            let chosen = if !self.ordering.naive_reorder && self.ordering.smart_reorder {
                self.nearest_candidate(map)
            } else {
                0
            };

            if self.throttle.skip_frame_enabled {
                if let Some(chunk) = self.candidate_chunk(&self.pending[chosen], chunks) {
                    if self.heat.heat(chunk) > self.throttle.skip_threshold
                        && self.pending.len() > 1
                    {
                        let dropped = self.pending.remove(chosen);
                        log::info!(
                            "skipping {} (chunk {} heat {:.2} above threshold)",
                            dropped.tag(),
                            chunk,
                            self.heat.heat(chunk)
                        );
                        report.skipped += 1;
                        continue;
                    }
                    self.heat.increment(chunk);
                }
            }

            let request = self.pending.remove(chosen);
            match execute_request(&request, &self.streaming, &self.switch, map, chunks) {
                ExecutionOutcome::Integrated => report.executed += 1,
                ExecutionOutcome::InvalidFrame => report.invalid += 1,
                ExecutionOutcome::TrackingLost => report.lost += 1,
            }
        }

        self.heat.decay_all();
        report
    }
}
