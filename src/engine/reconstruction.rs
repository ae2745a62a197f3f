//! Single-frame reconstruction loop (live tracking path).
//!
//! One call per sensor tick: acquire a pose (recorded trajectory or ICP
//! against a raycast of the map), validate it, stream the active region,
//! and integrate — or compactify when integration is globally disabled.
//! Every call reaches a terminal [`FrameOutcome`].

use nalgebra::Matrix4;

use crate::config::{FusionConfig, IntegrationSection, StreamingSection};
use crate::core::types::FramePose;
use crate::map::{ChunkStreaming, VolumetricMap};
use crate::sensors::DepthSource;
use crate::tracking::{CameraTracker, IcpIterationParams, RaycastFrame};

use super::executor::stream_around;
use super::ReconstructionSwitch;

/// Calls between heap value-range sanity checks.
const HEAP_CHECK_INTERVAL: u32 = 50;

/// Terminal outcome of one reconstruction call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The frame was fused into the map.
    Integrated,
    /// Integration is disabled; pose and visibility bookkeeping were
    /// refreshed without voxel writes.
    Compactified,
    /// The frame was dropped upstream; no map mutation.
    InvalidFrame,
    /// The tracker diverged; reconstruction is disabled until reset.
    TrackingLost,
    /// Reconstruction is disabled; nothing was done.
    Disabled,
}

/// Per-call orchestration for the non-batched path.
#[derive(Debug)]
pub struct ReconstructionLoop {
    streaming: StreamingSection,
    integration: IntegrationSection,
    icp: IcpIterationParams,
    switch: ReconstructionSwitch,
    heap_check_counter: u32,
}

impl ReconstructionLoop {
    /// Create a loop from configuration.
    ///
    /// Unlike the batch schedulers, integration may be disabled here: the
    /// single-frame path falls back to a compaction-only update.
    pub fn new(config: &FusionConfig, switch: ReconstructionSwitch) -> Self {
        Self {
            streaming: config.streaming.clone(),
            integration: config.integration.clone(),
            icp: config.icp,
            switch,
            heap_check_counter: 0,
        }
    }

    /// Process one sensor tick.
    pub fn process_frame(
        &mut self,
        source: &dyn DepthSource,
        map: &mut dyn VolumetricMap,
        chunks: &mut dyn ChunkStreaming,
        tracker: &mut dyn CameraTracker,
    ) -> FrameOutcome {
        if !self.switch.is_enabled() {
            return FrameOutcome::Disabled;
        }

        log::debug!(
            "[ frame {} ] [ {} free blocks ]",
            source.frame_number(),
            map.heap_free_count()
        );

        // AcquireTransform
        let frame = source.depth_frame();
        let pose = if let Some(recorded) = source.recorded_pose() {
            recorded
        } else if !self.integration.tracking_enabled || source.frame_number() <= 1 {
            // First frame anchors the map origin.
            FramePose::Valid(Matrix4::identity())
        } else {
            let last = map.last_rigid_transform();
            let raycast = RaycastFrame::from_pose(last);
            tracker.track(&frame, &raycast, &last, &self.icp)
        };

        // Validate
        let transform = match pose {
            FramePose::Valid(t) => t,
            FramePose::Invalid => {
                log::info!("invalid frame {}", source.frame_number());
                return FrameOutcome::InvalidFrame;
            }
            FramePose::Lost => {
                log::warn!(
                    "tracking lost at frame {}; reconstruction disabled until reset",
                    source.frame_number()
                );
                self.switch.disable();
                return FrameOutcome::TrackingLost;
            }
        };

        // Stream
        stream_around(&transform, &self.streaming, map, chunks);

        // PeriodicIntegrityCheck: diagnostic only, never fatal.
        self.heap_check_counter = (self.heap_check_counter + 1) % HEAP_CHECK_INTERVAL;
        if self.heap_check_counter == 0 {
            map.check_heap_value_range();
        }

        // Integrate or Compactify
        if self.integration.integration_enabled {
            map.integrate(
                &transform,
                &frame,
                &source.camera_params(),
                chunks.activity_bitmask(),
            );
            FrameOutcome::Integrated
        } else {
            map.set_last_rigid_transform_and_compactify(&transform, &frame);
            FrameOutcome::Compactified
        }
    }
}
