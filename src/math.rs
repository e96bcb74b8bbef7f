//! Small vector/quaternion helpers on top of nalgebra.
//!
//! nalgebra already covers the arithmetic (add, sub, scale, dot, cross,
//! length, Hamilton product). The helpers here pin down the degenerate cases
//! the solver relies on: zero-length normalization yields the zero vector, and
//! quaternion normalization after integration is always explicit.

use nalgebra::{Quaternion, UnitQuaternion, Vector3};

// ComplexField provides sqrt() for f32 in no_std via libm
#[allow(unused_imports)]
use nalgebra::ComplexField;

/// Lengths at or below this are treated as zero by [`normalize_or_zero`].
pub const NORMALIZE_EPSILON: f32 = 1e-12;

/// Normalize `v`, or return the zero vector when `|v| ≈ 0`.
#[inline]
pub fn normalize_or_zero(v: &Vector3<f32>) -> Vector3<f32> {
    let len = v.norm();
    if len > NORMALIZE_EPSILON {
        v / len
    } else {
        Vector3::zeros()
    }
}

/// Pure quaternion `(0, v)` used for angular velocity.
#[inline]
pub fn pure_quaternion(v: &Vector3<f32>) -> Quaternion<f32> {
    Quaternion::from_imag(*v)
}

/// Rotate `v` by `q` with the sandwich product `q · v · q*`.
#[inline]
pub fn rotate(q: &UnitQuaternion<f32>, v: &Vector3<f32>) -> Vector3<f32> {
    q.transform_vector(v)
}

/// Rotate `v` by the inverse of `q` (`q* · v · q`).
#[inline]
pub fn inverse_rotate(q: &UnitQuaternion<f32>, v: &Vector3<f32>) -> Vector3<f32> {
    q.inverse_transform_vector(v)
}

/// Renormalize a drifting quaternion back onto the unit sphere.
///
/// A zero quaternion cannot be normalized; identity is returned instead so the
/// body keeps a valid orientation.
#[inline]
pub fn renormalize(q: Quaternion<f32>) -> UnitQuaternion<f32> {
    if q.norm_squared() > NORMALIZE_EPSILON {
        UnitQuaternion::new_normalize(q)
    } else {
        UnitQuaternion::identity()
    }
}
