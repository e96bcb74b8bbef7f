//! Impulse-based contact response with Coulomb friction and rotational
//! coupling, followed by a single-step positional correction.
//!
//! Contact-point velocity includes both linear and angular contributions:
//! `v_contact = v_linear + ω × r`, where `r` is the vector from the body
//! center to the contact point. Impulses produce both linear velocity changes
//! and angular velocity changes via `Δω = (r × J) / I` (scalar inertia).

use nalgebra::Vector3;

// ComplexField provides sqrt() for f32 in no_std via libm
#[allow(unused_imports)]
use nalgebra::ComplexField;

use crate::body::RigidBody;
use crate::collision::Contact;
use crate::config::SimConfig;

/// Tangential speeds at or below this are treated as no sliding.
pub const TANGENT_EPSILON: f32 = 1e-6;

/// Impulse magnitudes applied by [`resolve_contact`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ImpulseReport {
    /// Normal impulse `j` (0 when the bodies were already separating).
    pub normal: f32,
    /// Signed friction impulse along the sliding direction.
    pub tangent: f32,
}

impl ImpulseReport {
    /// Whether any impulse was applied.
    #[inline]
    pub fn is_noop(&self) -> bool {
        self.normal == 0.0 && self.tangent == 0.0
    }
}

/// Apply normal and friction impulses, then push the bodies apart.
///
/// The normal points from `a` toward `b`. Bodies whose contact points are
/// already separating (`rel >= 0`) receive no impulse, but the positional
/// correction still runs.
pub fn resolve_contact(
    a: &mut RigidBody,
    b: &mut RigidBody,
    contact: &Contact,
    config: &SimConfig,
) -> ImpulseReport {
    let report = apply_impulses(a, b, contact, config.restitution, config.friction);
    depenetrate(a, b, &contact.normal, contact.penetration);
    report
}

/// Normal (restitution) and tangential (friction) impulses only.
pub fn apply_impulses(
    a: &mut RigidBody,
    b: &mut RigidBody,
    contact: &Contact,
    restitution: f32,
    friction: f32,
) -> ImpulseReport {
    let n = contact.normal;
    let ra = contact.point - a.position;
    let rb = contact.point - b.position;

    let relative_vel = b.point_velocity(&rb) - a.point_velocity(&ra);
    let vel_along_normal = relative_vel.dot(&n);

    // Only resolve if bodies are moving toward each other
    if vel_along_normal >= 0.0 {
        return ImpulseReport::default();
    }

    // 1/m_eff = 1/m_a + 1/m_b + |ra×n|²/I_a + |rb×n|²/I_b
    let inv_mass = a.inv_mass()
        + b.inv_mass()
        + ra.cross(&n).norm_squared() * a.inv_inertia()
        + rb.cross(&n).norm_squared() * b.inv_inertia();

    let j = -(1.0 + restitution) * vel_along_normal / inv_mass;
    let impulse = n * j;
    a.apply_impulse_at(-impulse, &ra);
    b.apply_impulse_at(impulse, &rb);

    // --- Friction impulse (Coulomb model) ---
    // Recompute relative velocity at contact point after normal impulse
    let relative_vel = b.point_velocity(&rb) - a.point_velocity(&ra);
    let tangent_vel = relative_vel - n * relative_vel.dot(&n);
    let tangent_speed = tangent_vel.norm();

    let mut jt = 0.0;
    if tangent_speed > TANGENT_EPSILON {
        let tangent = tangent_vel / tangent_speed;
        // Clamp by Coulomb cone: |jt| <= mu * |jn|
        let limit = (friction * j).abs();
        // A NaN limit (unvalidated friction) leaves jt unclamped.
        jt = (-relative_vel.dot(&tangent) / inv_mass).max(-limit).min(limit);

        let friction_impulse = tangent * jt;
        a.apply_impulse_at(-friction_impulse, &ra);
        b.apply_impulse_at(friction_impulse, &rb);
    }

    log::debug!("contact impulse: normal = {}, tangent = {}", j, jt);
    ImpulseReport { normal: j, tangent: jt }
}

/// Push both bodies apart along `normal`, half of `penetration` each.
pub fn depenetrate(a: &mut RigidBody, b: &mut RigidBody, normal: &Vector3<f32>, penetration: f32) {
    if penetration <= 0.0 {
        return;
    }
    let correction = normal * (0.5 * penetration);
    a.position -= correction;
    b.position += correction;
}
