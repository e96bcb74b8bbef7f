//! Explicit Euler motion and quaternion orientation integration.
//!
//! Translation is integrated unconditionally before any collision handling;
//! only the contact-point search is sub-stepped.

use crate::body::RigidBody;
use crate::math;

/// `position += velocity * dt`.
#[inline]
pub fn integrate_position(body: &mut RigidBody, dt: f32) {
    body.position += body.velocity * dt;
}

/// Advance the orientation from the angular velocity and renormalize.
///
/// `q' = normalize(q + 0.5 * dt * (q ⊗ (0, ω)))`
pub fn integrate_orientation(body: &mut RigidBody, dt: f32) {
    let q = body.orientation.into_inner();
    let dq = q * math::pure_quaternion(&body.angular_velocity);
    body.orientation = math::renormalize(q + dq * (0.5 * dt));
}

/// Integrate both position and orientation.
#[inline]
pub fn integrate(body: &mut RigidBody, dt: f32) {
    integrate_position(body, dt);
    integrate_orientation(body, dt);
}
