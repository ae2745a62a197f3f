//! Sensor adapter contract and per-tick batch assembly.
//!
//! Sensors and their SDKs live outside the core; a [`DepthSource`] exposes
//! just the state the scheduler and reconstruction loop consume. The
//! [`FrameBatchBuilder`] assembles tagged [`FrameRequest`]s from one or more
//! sources each tick; the host enqueues them into a scheduler.

use crate::core::types::{DepthCameraParams, DepthFrame, FramePose, FrameRequest};

/// One depth sensor's per-tick state.
pub trait DepthSource {
    /// The current frame's buffer reference.
    fn depth_frame(&self) -> DepthFrame;

    /// The sensor's camera intrinsics.
    fn camera_params(&self) -> DepthCameraParams;

    /// Pre-recorded pose for the current frame, when a trajectory source is
    /// configured. `None` means the live tracker must estimate the pose.
    fn recorded_pose(&self) -> Option<FramePose>;

    /// Monotonic frame counter, starting at 1.
    fn frame_number(&self) -> u64;

    /// Identifier of this sensor.
    fn sensor_id(&self) -> u32;
}

/// Assembles one scheduling cycle's worth of frame requests.
#[derive(Debug, Default)]
pub struct FrameBatchBuilder {
    requests: Vec<FrameRequest>,
}

impl FrameBatchBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a request for a trajectory-mode source's current frame.
    ///
    /// Returns false (and adds nothing) when the source has no recorded pose
    /// for this tick.
    pub fn add_source(&mut self, source: &dyn DepthSource) -> bool {
        let Some(pose) = source.recorded_pose() else {
            return false;
        };
        self.requests.push(FrameRequest::new(
            pose,
            source.depth_frame(),
            source.camera_params(),
            source.sensor_id(),
            format!(
                "sensor {}, frame {}",
                source.sensor_id(),
                source.frame_number()
            ),
        ));
        true
    }

    /// Add an already-built request.
    pub fn add_request(&mut self, request: FrameRequest) {
        self.requests.push(request);
    }

    /// Number of requests assembled so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// Whether the builder is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Take the assembled requests, in arrival order, leaving the builder
    /// empty for the next tick.
    pub fn take_requests(&mut self) -> Vec<FrameRequest> {
        std::mem::take(&mut self.requests)
    }
}
