//! Candidate frame types.

use serde::{Deserialize, Serialize};

use super::FramePose;

/// Borrowed reference to one frame's device-resident depth/color buffers.
///
/// The owning sensor adapter guarantees the buffers stay alive for at least
/// one scheduling cycle, so the core only carries an opaque handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthFrame {
    /// Opaque buffer handle assigned by the adapter.
    pub handle: u64,
}

impl DepthFrame {
    /// Create a frame reference from an adapter-assigned handle.
    #[inline]
    pub fn new(handle: u64) -> Self {
        Self { handle }
    }
}

/// Depth camera intrinsics and image dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepthCameraParams {
    /// Focal length along X (pixels).
    pub fx: f32,
    /// Focal length along Y (pixels).
    pub fy: f32,
    /// Principal point X (pixels).
    pub cx: f32,
    /// Principal point Y (pixels).
    pub cy: f32,
    /// Image width (pixels).
    pub width: u32,
    /// Image height (pixels).
    pub height: u32,
}

impl Default for DepthCameraParams {
    fn default() -> Self {
        // Kinect-class VGA depth camera.
        Self {
            fx: 525.0,
            fy: 525.0,
            cx: 319.5,
            cy: 239.5,
            width: 640,
            height: 480,
        }
    }
}

/// One candidate frame awaiting fusion into the volumetric map.
///
/// Immutable once constructed; the sensor adapter creates one per tick and
/// the scheduler destroys it on execution or permanent skip.
#[derive(Debug, Clone)]
pub struct FrameRequest {
    pose: FramePose,
    depth: DepthFrame,
    params: DepthCameraParams,
    sensor_id: u32,
    tag: String,
}

impl FrameRequest {
    /// Create a new frame request.
    pub fn new(
        pose: FramePose,
        depth: DepthFrame,
        params: DepthCameraParams,
        sensor_id: u32,
        tag: impl Into<String>,
    ) -> Self {
        Self {
            pose,
            depth,
            params,
            sensor_id,
            tag: tag.into(),
        }
    }

    /// Pose outcome for this frame.
    #[inline]
    pub fn pose(&self) -> &FramePose {
        &self.pose
    }

    /// Depth buffer reference.
    #[inline]
    pub fn depth(&self) -> &DepthFrame {
        &self.depth
    }

    /// Camera intrinsics for this frame.
    #[inline]
    pub fn params(&self) -> &DepthCameraParams {
        &self.params
    }

    /// Identifier of the producing sensor.
    #[inline]
    pub fn sensor_id(&self) -> u32 {
        self.sensor_id
    }

    /// Human-readable tag for logging.
    #[inline]
    pub fn tag(&self) -> &str {
        &self.tag
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Matrix4;

    #[test]
    fn test_request_accessors() {
        let req = FrameRequest::new(
            FramePose::Valid(Matrix4::identity()),
            DepthFrame::new(7),
            DepthCameraParams::default(),
            2,
            "sensor 2, frame 14",
        );
        assert!(req.pose().is_valid());
        assert_eq!(req.depth().handle, 7);
        assert_eq!(req.sensor_id(), 2);
        assert_eq!(req.tag(), "sensor 2, frame 14");
    }
}
