//! Shared fixtures for scheduler and reconstruction tests.
#![allow(dead_code)]

use std::collections::VecDeque;

use nalgebra::{Matrix4, Vector3};

use ghana_fusion::tracking::{CameraTracker, IcpIterationParams, RaycastFrame};
use ghana_fusion::{DepthCameraParams, DepthFrame, DepthSource, FramePose, FrameRequest};

/// Pure translation transform.
pub fn translation(x: f32, y: f32, z: f32) -> Matrix4<f32> {
    Matrix4::new_translation(&Vector3::new(x, y, z))
}

/// Valid pose at a pure translation.
pub fn pose_at(x: f32, y: f32, z: f32) -> FramePose {
    FramePose::Valid(translation(x, y, z))
}

/// Frame request with a distinct buffer handle for journal assertions.
pub fn request(sensor_id: u32, handle: u64, pose: FramePose) -> FrameRequest {
    FrameRequest::new(
        pose,
        DepthFrame::new(handle),
        DepthCameraParams::default(),
        sensor_id,
        format!("sensor {}, frame {}", sensor_id, handle),
    )
}

/// Depth source with scripted per-tick state.
pub struct ScriptedSource {
    pub id: u32,
    pub frame: u64,
    pub handle: u64,
    pub recorded: Option<FramePose>,
}

impl ScriptedSource {
    pub fn trajectory(frame: u64, pose: FramePose) -> Self {
        Self {
            id: 0,
            frame,
            handle: frame,
            recorded: Some(pose),
        }
    }

    pub fn live(frame: u64) -> Self {
        Self {
            id: 0,
            frame,
            handle: frame,
            recorded: None,
        }
    }
}

impl DepthSource for ScriptedSource {
    fn depth_frame(&self) -> DepthFrame {
        DepthFrame::new(self.handle)
    }

    fn camera_params(&self) -> DepthCameraParams {
        DepthCameraParams::default()
    }

    fn recorded_pose(&self) -> Option<FramePose> {
        self.recorded
    }

    fn frame_number(&self) -> u64 {
        self.frame
    }

    fn sensor_id(&self) -> u32 {
        self.id
    }
}

/// Tracker returning queued outcomes; falls back to the last known pose.
pub struct ScriptedTracker {
    outcomes: VecDeque<FramePose>,
    pub calls: usize,
}

impl ScriptedTracker {
    pub fn new(outcomes: Vec<FramePose>) -> Self {
        Self {
            outcomes: outcomes.into(),
            calls: 0,
        }
    }
}

impl CameraTracker for ScriptedTracker {
    fn track(
        &mut self,
        _frame: &DepthFrame,
        _reference: &RaycastFrame,
        last_transform: &Matrix4<f32>,
        _params: &IcpIterationParams,
    ) -> FramePose {
        self.calls += 1;
        self.outcomes
            .pop_front()
            .unwrap_or(FramePose::Valid(*last_transform))
    }
}
