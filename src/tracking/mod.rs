//! Camera tracking contract.
//!
//! The iterative-closest-point tracker is an external collaborator; the core
//! only hands it the current frame, a synthetic raycast of the map from the
//! last known pose, and the iteration parameters, then interprets the tagged
//! outcome. Tracking failures are detected, never retried: each attempt
//! depends on fresh sensor input on the next tick.

use nalgebra::Matrix4;
use serde::{Deserialize, Serialize};

use crate::core::types::{DepthFrame, FramePose};

/// ICP iteration parameters for the live tracking path.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct IcpIterationParams {
    /// Maximum inner (linear-solve) iterations per level.
    #[serde(default = "default_max_inner")]
    pub max_inner_iterations: u32,

    /// Maximum outer (correspondence) iterations per level.
    #[serde(default = "default_max_outer")]
    pub max_outer_iterations: u32,

    /// Correspondence distance threshold (meters).
    #[serde(default = "default_distance_threshold")]
    pub distance_threshold: f32,

    /// Correspondence normal-agreement threshold (cosine).
    #[serde(default = "default_normal_threshold")]
    pub normal_threshold: f32,

    /// Residual below which iteration stops early.
    #[serde(default = "default_residual_early_out")]
    pub residual_early_out: f32,
}

fn default_max_inner() -> u32 {
    20
}

fn default_max_outer() -> u32 {
    8
}

fn default_distance_threshold() -> f32 {
    0.15
}

fn default_normal_threshold() -> f32 {
    0.97
}

fn default_residual_early_out() -> f32 {
    0.01
}

impl Default for IcpIterationParams {
    fn default() -> Self {
        Self {
            max_inner_iterations: default_max_inner(),
            max_outer_iterations: default_max_outer(),
            distance_threshold: default_distance_threshold(),
            normal_threshold: default_normal_threshold(),
            residual_early_out: default_residual_early_out(),
        }
    }
}

/// Descriptor of a synthetic raycast of the map.
///
/// The render pipeline resolves the actual buffers; the core only records
/// which pose the view was rendered from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastFrame {
    /// Pose the map was raycast from.
    pub view_pose: Matrix4<f32>,
    /// Opaque buffer handle, if the raycaster assigned one.
    pub handle: u64,
}

impl RaycastFrame {
    /// Describe a raycast from the given pose.
    pub fn from_pose(view_pose: Matrix4<f32>) -> Self {
        Self {
            view_pose,
            handle: 0,
        }
    }
}

/// Rigid-pose tracker aligning the current frame against a raycast of the map.
pub trait CameraTracker {
    /// Estimate the current frame's absolute pose.
    ///
    /// The delta against `last_transform` is estimated internally and
    /// composed with it; the returned outcome is [`FramePose::Lost`] when the
    /// alignment diverges.
    fn track(
        &mut self,
        frame: &DepthFrame,
        reference: &RaycastFrame,
        last_transform: &Matrix4<f32>,
        params: &IcpIterationParams,
    ) -> FramePose;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = IcpIterationParams::default();
        assert_eq!(params.max_inner_iterations, 20);
        assert!((params.distance_threshold - 0.15).abs() < 1e-6);
    }

    #[test]
    fn test_raycast_frame_records_pose() {
        let pose = Matrix4::new_translation(&nalgebra::Vector3::new(0.0, 1.0, 0.0));
        let frame = RaycastFrame::from_pose(pose);
        assert_eq!(frame.view_pose, pose);
    }
}
