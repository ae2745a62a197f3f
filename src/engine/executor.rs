//! Shared frame execution contract.
//!
//! Both scheduler variants funnel every candidate frame through
//! [`execute_request`]: bind buffers, validate the pose, stream the active
//! region, integrate. The single-frame reconstruction loop reuses
//! [`stream_around`] but owns its own acquire/validate/compactify flow.

use nalgebra::Matrix4;

use crate::config::StreamingSection;
use crate::core::math::transform_homogeneous;
use crate::core::types::{FramePose, FrameRequest};
use crate::map::{ChunkStreaming, VolumetricMap};

use super::ReconstructionSwitch;

/// Terminal outcome of executing one frame request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ExecutionOutcome {
    /// The frame was streamed and integrated.
    Integrated,
    /// The frame was dropped upstream; nothing was mutated.
    InvalidFrame,
    /// The tracker had diverged; reconstruction was disabled.
    TrackingLost,
}

/// Run one stream-out/stream-in pass around the transformed reference point.
///
/// In adaptive mode the pass only runs under heap pressure; otherwise it runs
/// on every valid frame. Stream-out strictly precedes stream-in.
pub(crate) fn stream_around(
    transform: &Matrix4<f32>,
    streaming: &StreamingSection,
    map: &mut dyn VolumetricMap,
    chunks: &mut dyn ChunkStreaming,
) {
    if !streaming.enabled {
        return;
    }
    if streaming.adaptive && map.heap_free_count() >= streaming.threshold {
        return;
    }

    let pos = transform_homogeneous(transform, &streaming.reference_point_h());
    log::debug!(
        "streaming pass around ({:.2}, {:.2}, {:.2}), radius {:.1}",
        pos.x,
        pos.y,
        pos.z,
        streaming.radius
    );
    chunks.stream_out_to_cpu(pos, streaming.radius);
    chunks.stream_in_to_gpu();
}

/// Execute one frame request against the engines.
///
/// Integration is unconditional on valid frames: scheduler constructors
/// reject configurations with integration disabled, because no
/// compaction-only fallback exists for multi-request batches.
pub(crate) fn execute_request(
    request: &FrameRequest,
    streaming: &StreamingSection,
    switch: &ReconstructionSwitch,
    map: &mut dyn VolumetricMap,
    chunks: &mut dyn ChunkStreaming,
) -> ExecutionOutcome {
    log::info!(
        "executing {} ({} free blocks)",
        request.tag(),
        map.heap_free_count()
    );
    map.bind_depth_camera_textures(request.depth());

    let transform = match request.pose() {
        FramePose::Valid(t) => *t,
        FramePose::Invalid => {
            log::info!("invalid frame: {}", request.tag());
            return ExecutionOutcome::InvalidFrame;
        }
        FramePose::Lost => {
            log::warn!(
                "tracking lost at {}; reconstruction disabled until reset",
                request.tag()
            );
            switch.disable();
            return ExecutionOutcome::TrackingLost;
        }
    };

    stream_around(&transform, streaming, map, chunks);
    map.integrate(
        &transform,
        request.depth(),
        request.params(),
        chunks.activity_bitmask(),
    );
    ExecutionOutcome::Integrated
}
