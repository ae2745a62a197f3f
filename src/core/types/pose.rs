//! Tagged pose outcome for candidate frames.
//!
//! Upstream producers (recorded trajectories, ICP trackers) historically mark
//! unusable frames by poisoning the transform matrix with negative infinity.
//! `FramePose` lifts that convention into a tagged type so downstream code
//! matches on variants instead of comparing floats at every call site.

use nalgebra::Matrix4;

/// Pose outcome attached to a candidate frame.
///
/// `Invalid` aborts only the frame that carries it. `Lost` additionally
/// disables reconstruction session-wide until an external reset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FramePose {
    /// A usable rigid transform (camera-to-world).
    Valid(Matrix4<f32>),
    /// The frame was dropped upstream (e.g. a hole in a recorded trajectory).
    Invalid,
    /// The tracker diverged; the pose estimate is meaningless.
    Lost,
}

impl FramePose {
    /// Decode a transform read from a recorded trajectory.
    ///
    /// Trajectory files mark dropped frames by setting the first stored
    /// scalar to negative infinity.
    pub fn from_recorded(transform: Matrix4<f32>) -> Self {
        if transform[(0, 0)] == f32::NEG_INFINITY {
            FramePose::Invalid
        } else {
            FramePose::Valid(transform)
        }
    }

    /// Decode a transform produced by a camera tracker.
    ///
    /// Trackers signal divergence by setting the rotation's (0,0) element to
    /// negative infinity.
    pub fn from_tracker(transform: Matrix4<f32>) -> Self {
        if transform[(0, 0)] == f32::NEG_INFINITY {
            FramePose::Lost
        } else {
            FramePose::Valid(transform)
        }
    }

    /// Whether this pose carries a usable transform.
    #[inline]
    pub fn is_valid(&self) -> bool {
        matches!(self, FramePose::Valid(_))
    }

    /// The transform, if valid.
    #[inline]
    pub fn matrix(&self) -> Option<&Matrix4<f32>> {
        match self {
            FramePose::Valid(m) => Some(m),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poisoned() -> Matrix4<f32> {
        let mut m = Matrix4::identity();
        m[(0, 0)] = f32::NEG_INFINITY;
        m
    }

    #[test]
    fn test_recorded_sentinel_decodes_to_invalid() {
        assert_eq!(FramePose::from_recorded(poisoned()), FramePose::Invalid);
        assert!(FramePose::from_recorded(Matrix4::identity()).is_valid());
    }

    #[test]
    fn test_tracker_sentinel_decodes_to_lost() {
        assert_eq!(FramePose::from_tracker(poisoned()), FramePose::Lost);
        assert!(FramePose::from_tracker(Matrix4::identity()).is_valid());
    }

    #[test]
    fn test_matrix_accessor() {
        let m = Matrix4::new_translation(&nalgebra::Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(FramePose::Valid(m).matrix(), Some(&m));
        assert_eq!(FramePose::Invalid.matrix(), None);
        assert_eq!(FramePose::Lost.matrix(), None);
    }
}
