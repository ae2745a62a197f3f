//! Small math helpers shared across the crate.

use nalgebra::{Matrix4, Vector3, Vector4};

/// Apply a rigid transform to a homogeneous point and return the world-space
/// position.
///
/// The reference point carries w = 1; the returned vector drops the
/// homogeneous component (rigid transforms keep w unchanged).
#[inline]
pub fn transform_homogeneous(transform: &Matrix4<f32>, point: &Vector4<f32>) -> Vector3<f32> {
    let p = transform * point;
    Vector3::new(p.x, p.y, p.z)
}
