//! Mutual inverse-square gravity between the two bodies.

use nalgebra::Vector3;

// ComplexField provides sqrt() for f32 in no_std via libm
#[allow(unused_imports)]
use nalgebra::ComplexField;

use crate::body::RigidBody;

/// Gravitational force acting on `a` due to `b` (the force on `b` is its negation).
///
/// `softening` is added to the squared separation so coincident centers give a
/// large but finite force instead of a division by zero.
pub fn gravitational_force(a: &RigidBody, b: &RigidBody, g: f32, softening: f32) -> Vector3<f32> {
    let diff = b.position - a.position;
    let d2 = diff.dot(&diff) + softening;
    let n = diff / d2.sqrt();
    n * (g * a.mass() * b.mass() / d2)
}

/// Apply one step of mutual gravity as equal-and-opposite velocity changes.
pub fn apply_gravity(a: &mut RigidBody, b: &mut RigidBody, dt: f32, g: f32, softening: f32) {
    let force = gravitational_force(a, b, g, softening);
    a.velocity += force * a.inv_mass() * dt;
    b.velocity -= force * b.inv_mass() * dt;
}

#[cfg(test)]
mod tests {
    extern crate std;
    use super::*;
    use crate::shape::Shape;

    const EPSILON: f32 = 1e-6;

    fn pair(distance: f32, mass_a: f32, mass_b: f32) -> (RigidBody, RigidBody) {
        let a = RigidBody::new(Shape::Mandelbulb, 1.0, mass_a)
            .with_position(Vector3::new(-0.5 * distance, 0.0, 0.0));
        let b = RigidBody::new(Shape::Tetrahedral, 1.0, mass_b)
            .with_position(Vector3::new(0.5 * distance, 0.0, 0.0));
        (a, b)
    }

    #[test]
    fn test_inverse_square_magnitude() {
        let (a, b) = pair(4.0, 1.0, 1.0);
        let f = gravitational_force(&a, &b, 1.0, 0.0);
        assert!((f.x - 1.0 / 16.0).abs() < EPSILON);
        assert!(f.y.abs() < EPSILON && f.z.abs() < EPSILON);

        let (a, b) = pair(2.0, 3.0, 2.0);
        let f = gravitational_force(&a, &b, 2.0, 0.0);
        // 2 * 3 * 2 / 4 = 3
        assert!((f.norm() - 3.0).abs() < EPSILON);
    }

    #[test]
    fn test_bodies_attract() {
        let (mut a, mut b) = pair(4.0, 1.0, 1.0);
        apply_gravity(&mut a, &mut b, 0.016, 1.0, 1e-6);
        assert!(a.velocity.x > 0.0);
        assert!(b.velocity.x < 0.0);
    }

    #[test]
    fn test_momentum_symmetric() {
        let (mut a, mut b) = pair(3.0, 2.0, 5.0);
        apply_gravity(&mut a, &mut b, 0.05, 1.0, 1e-6);
        let total = a.momentum() + b.momentum();
        assert!(total.norm() < EPSILON);
    }

    #[test]
    fn test_coincident_centers_finite() {
        let (mut a, mut b) = pair(0.0, 1.0, 1.0);
        apply_gravity(&mut a, &mut b, 0.016, 1.0, 1e-6);
        // Zero separation: the direction is zero, nothing blows up.
        assert!(a.velocity.iter().all(|v| v.is_finite()));
        assert!(b.velocity.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_zero_g_is_noop() {
        let (mut a, mut b) = pair(1.0, 1.0, 1.0);
        apply_gravity(&mut a, &mut b, 0.016, 0.0, 1e-6);
        assert_eq!(a.velocity, Vector3::zeros());
        assert_eq!(b.velocity, Vector3::zeros());
    }
}
