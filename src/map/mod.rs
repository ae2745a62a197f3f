//! Collaborator contracts for the volumetric map and chunk-streaming engines.
//!
//! The core never reimplements the map's math; it drives these operations and
//! reads back the host-visible state they expose. Both contracts are
//! logically synchronous from the scheduler's point of view: any state the
//! next scheduling decision depends on (heap counters, last transform) must
//! be visible by the time a call returns, even if the engine pipelines work
//! on a compute device underneath.

pub mod mock;

use nalgebra::{Matrix4, Vector3};

use crate::core::types::{ChunkCoord, DepthCameraParams, DepthFrame};

/// Opaque handle to the device-resident chunk-activity bitmask.
///
/// Produced by the streaming engine and passed through to integration
/// untouched; the core never inspects its contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActivityMask(pub u64);

/// Spatially-hashed volumetric map engine.
pub trait VolumetricMap {
    /// Fuse one depth frame into the map at the given pose.
    ///
    /// Also updates the map's last integrated transform.
    fn integrate(
        &mut self,
        transform: &Matrix4<f32>,
        depth: &DepthFrame,
        params: &DepthCameraParams,
        activity: ActivityMask,
    );

    /// Number of free blocks on the device heap.
    fn heap_free_count(&self) -> u32;

    /// The transform of the most recently integrated frame.
    fn last_rigid_transform(&self) -> Matrix4<f32>;

    /// Compaction-only update: refreshes pose and visibility bookkeeping
    /// without writing voxel data.
    fn set_last_rigid_transform_and_compactify(
        &mut self,
        transform: &Matrix4<f32>,
        depth: &DepthFrame,
    );

    /// Bind one frame's depth/color buffers for subsequent operations.
    fn bind_depth_camera_textures(&mut self, depth: &DepthFrame);

    /// Clear the map to its initial state.
    fn reset(&mut self);

    /// Diagnostic sanity check of the device heap value range.
    fn check_heap_value_range(&mut self);
}

/// Host/device chunk-streaming engine.
pub trait ChunkStreaming {
    /// Stream chunks outside the active radius out to host memory.
    ///
    /// Must be invoked before [`stream_in_to_gpu`](Self::stream_in_to_gpu)
    /// within a streaming pass.
    fn stream_out_to_cpu(&mut self, pos: Vector3<f32>, radius: f32);

    /// Stream chunks near the active region back onto the device.
    fn stream_in_to_gpu(&mut self);

    /// Current chunk-activity bitmask handle.
    fn activity_bitmask(&self) -> ActivityMask;

    /// Chunk coordinate containing a world-space position.
    fn world_to_chunk(&self, pos: Vector3<f32>) -> ChunkCoord;
}
