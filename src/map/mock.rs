//! Recording stand-ins for the map and streaming engines.
//!
//! Used by this crate's tests and by offline scheduling experiments that
//! replay recorded batches without a compute device. Every engine call is
//! appended to a journal so tests can assert on exact call sequences.

use nalgebra::{Matrix4, Vector3};

use crate::core::types::{ChunkCoord, DepthCameraParams, DepthFrame};

use super::{ActivityMask, ChunkStreaming, VolumetricMap};

/// One recorded engine call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MapCall {
    /// `bind_depth_camera_textures` with the given buffer handle.
    BindTextures(u64),
    /// `integrate` with the given buffer handle.
    Integrate(u64),
    /// `set_last_rigid_transform_and_compactify` with the given buffer handle.
    Compactify(u64),
    /// `check_heap_value_range`.
    HeapCheck,
    /// `reset`.
    Reset,
}

/// One recorded streaming call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StreamCall {
    /// `stream_out_to_cpu` around the given chunk.
    StreamOut(ChunkCoord),
    /// `stream_in_to_gpu`.
    StreamIn,
}

/// Recording volumetric map with a scriptable heap counter.
#[derive(Debug)]
pub struct MockMapEngine {
    calls: Vec<MapCall>,
    heap_free: u32,
    last_transform: Matrix4<f32>,
}

impl Default for MockMapEngine {
    fn default() -> Self {
        Self {
            calls: Vec::new(),
            heap_free: 100_000,
            last_transform: Matrix4::identity(),
        }
    }
}

impl MockMapEngine {
    /// Create a mock with a full heap and identity last transform.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the free-block counter the engine reports.
    pub fn set_heap_free(&mut self, free: u32) {
        self.heap_free = free;
    }

    /// Recorded call journal, in invocation order.
    pub fn calls(&self) -> &[MapCall] {
        &self.calls
    }

    /// Buffer handles integrated so far, in order.
    pub fn integrated(&self) -> Vec<u64> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                MapCall::Integrate(h) => Some(*h),
                _ => None,
            })
            .collect()
    }

    /// Whether the journal contains any map mutation (integrate/compactify).
    pub fn mutated(&self) -> bool {
        self.calls
            .iter()
            .any(|c| matches!(c, MapCall::Integrate(_) | MapCall::Compactify(_)))
    }
}

impl VolumetricMap for MockMapEngine {
    fn integrate(
        &mut self,
        transform: &Matrix4<f32>,
        depth: &DepthFrame,
        _params: &DepthCameraParams,
        _activity: ActivityMask,
    ) {
        self.calls.push(MapCall::Integrate(depth.handle));
        self.last_transform = *transform;
    }

    fn heap_free_count(&self) -> u32 {
        self.heap_free
    }

    fn last_rigid_transform(&self) -> Matrix4<f32> {
        self.last_transform
    }

    fn set_last_rigid_transform_and_compactify(
        &mut self,
        transform: &Matrix4<f32>,
        depth: &DepthFrame,
    ) {
        self.calls.push(MapCall::Compactify(depth.handle));
        self.last_transform = *transform;
    }

    fn bind_depth_camera_textures(&mut self, depth: &DepthFrame) {
        self.calls.push(MapCall::BindTextures(depth.handle));
    }

    fn reset(&mut self) {
        self.calls.push(MapCall::Reset);
        self.last_transform = Matrix4::identity();
    }

    fn check_heap_value_range(&mut self) {
        self.calls.push(MapCall::HeapCheck);
    }
}

/// Recording chunk grid with a configurable chunk edge length.
#[derive(Debug)]
pub struct MockChunkGrid {
    calls: Vec<StreamCall>,
    chunk_edge: f32,
}

impl Default for MockChunkGrid {
    fn default() -> Self {
        Self {
            calls: Vec::new(),
            chunk_edge: 1.0,
        }
    }
}

impl MockChunkGrid {
    /// Create a grid with 1 m chunks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a grid with the given chunk edge length (meters).
    pub fn with_chunk_edge(chunk_edge: f32) -> Self {
        Self {
            calls: Vec::new(),
            chunk_edge,
        }
    }

    /// Recorded call journal, in invocation order.
    pub fn calls(&self) -> &[StreamCall] {
        &self.calls
    }

    /// Number of completed stream-out/stream-in passes.
    pub fn stream_pass_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, StreamCall::StreamIn))
            .count()
    }
}

impl ChunkStreaming for MockChunkGrid {
    fn stream_out_to_cpu(&mut self, pos: Vector3<f32>, _radius: f32) {
        let chunk = self.world_to_chunk(pos);
        self.calls.push(StreamCall::StreamOut(chunk));
    }

    fn stream_in_to_gpu(&mut self) {
        self.calls.push(StreamCall::StreamIn);
    }

    fn activity_bitmask(&self) -> ActivityMask {
        ActivityMask::default()
    }

    fn world_to_chunk(&self, pos: Vector3<f32>) -> ChunkCoord {
        ChunkCoord::new(
            (pos.x / self.chunk_edge).floor() as i32,
            (pos.y / self.chunk_edge).floor() as i32,
            (pos.z / self.chunk_edge).floor() as i32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_to_chunk_floors() {
        let grid = MockChunkGrid::with_chunk_edge(2.0);
        assert_eq!(
            grid.world_to_chunk(Vector3::new(3.9, -0.1, 0.0)),
            ChunkCoord::new(1, -1, 0)
        );
    }

    #[test]
    fn test_integrate_updates_last_transform() {
        let mut map = MockMapEngine::new();
        let t = Matrix4::new_translation(&Vector3::new(1.0, 0.0, 0.0));
        map.integrate(
            &t,
            &DepthFrame::new(1),
            &DepthCameraParams::default(),
            ActivityMask::default(),
        );
        assert_eq!(map.last_rigid_transform(), t);
        assert_eq!(map.integrated(), vec![1]);
    }
}
