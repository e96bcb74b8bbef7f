//! Broad-phase bounding-sphere test and contact types.

use nalgebra::Vector3;

// ComplexField provides sqrt() for f32 in no_std via libm
#[allow(unused_imports)]
use nalgebra::ComplexField;

use crate::body::RigidBody;
use crate::config::NormalMode;
use crate::math;

/// Step used for the central-difference gradient of the combined field.
pub const GRADIENT_STEP: f32 = 1e-4;

/// Result of a positive broad-phase test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overlap {
    /// Unit line of centers pointing from body A toward body B.
    pub normal: Vector3<f32>,
    /// Distance between the two centers.
    pub distance: f32,
    /// `radius_a + radius_b - distance` (non-negative when overlapping).
    pub penetration: f32,
}

/// An accepted contact between the two bodies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// World-space contact point.
    pub point: Vector3<f32>,
    /// Contact normal pointing from body A toward body B.
    pub normal: Vector3<f32>,
    /// Bounding-sphere penetration depth used for de-penetration.
    pub penetration: f32,
}

/// Bounding-sphere overlap test.
///
/// Returns `None` when `|pos_b - pos_a| > radius_a + radius_b`.
pub fn broad_phase(a: &RigidBody, b: &RigidBody) -> Option<Overlap> {
    let diff = b.position - a.position;
    let sum_r = a.radius() + b.radius();
    let dist_sq = diff.norm_squared();

    if dist_sq > sum_r * sum_r {
        return None;
    }

    let distance = dist_sq.sqrt();
    let normal = if distance > 1e-6 {
        diff / distance
    } else {
        // Coincident centers: pick an arbitrary separation axis
        Vector3::new(0.0, 1.0, 0.0)
    };

    Some(Overlap {
        normal,
        distance,
        penetration: sum_r - distance,
    })
}

/// Choose the contact normal at `point` according to `mode`.
///
/// The gradient of `de_a + de_b` is used as-is only when it is well defined
/// and agrees in direction with the line of centers; otherwise the line of
/// centers is returned.
pub fn contact_normal(
    a: &RigidBody,
    b: &RigidBody,
    point: &Vector3<f32>,
    line_of_centers: &Vector3<f32>,
    mode: NormalMode,
) -> Vector3<f32> {
    match mode {
        NormalMode::LineOfCenters => *line_of_centers,
        NormalMode::Gradient => {
            let gradient = math::normalize_or_zero(&field_gradient(a, b, point));
            if gradient.dot(line_of_centers) > 0.0 {
                gradient
            } else {
                *line_of_centers
            }
        }
    }
}

/// Central-difference gradient of the combined field `de_a + de_b`.
fn field_gradient(a: &RigidBody, b: &RigidBody, point: &Vector3<f32>) -> Vector3<f32> {
    let field = |p: Vector3<f32>| a.surface_distance(&p) + b.surface_distance(&p);
    let h = GRADIENT_STEP;
    let ex = Vector3::new(h, 0.0, 0.0);
    let ey = Vector3::new(0.0, h, 0.0);
    let ez = Vector3::new(0.0, 0.0, h);
    Vector3::new(
        field(point + ex) - field(point - ex),
        field(point + ey) - field(point - ey),
        field(point + ez) - field(point - ez),
    )
}

#[cfg(test)]
mod tests {
    extern crate std;
    use super::*;
    use crate::shape::Shape;

    fn body_at(x: f32, radius: f32) -> RigidBody {
        RigidBody::new(Shape::Mandelbulb, radius, 1.0).with_position(Vector3::new(x, 0.0, 0.0))
    }

    #[test]
    fn test_broad_phase_separated() {
        assert!(broad_phase(&body_at(-2.0, 1.0), &body_at(2.0, 1.0)).is_none());
    }

    #[test]
    fn test_broad_phase_touching_counts() {
        // |d| == r_a + r_b is an overlap.
        let overlap = broad_phase(&body_at(-1.0, 1.0), &body_at(1.0, 1.0)).unwrap();
        assert!(overlap.penetration.abs() < 1e-6);
        assert_eq!(overlap.normal, Vector3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_broad_phase_overlap() {
        let overlap = broad_phase(&body_at(0.0, 1.0), &body_at(1.5, 1.0)).unwrap();
        assert!((overlap.distance - 1.5).abs() < 1e-6);
        assert!((overlap.penetration - 0.5).abs() < 1e-6);
        assert!((overlap.normal - Vector3::new(1.0, 0.0, 0.0)).norm() < 1e-6);
    }

    #[test]
    fn test_broad_phase_coincident_picks_axis() {
        let overlap = broad_phase(&body_at(0.0, 1.0), &body_at(0.0, 1.0)).unwrap();
        assert_eq!(overlap.normal, Vector3::new(0.0, 1.0, 0.0));
        assert!((overlap.penetration - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_line_of_centers_mode_passthrough() {
        let a = body_at(0.0, 1.0);
        let b = body_at(1.5, 1.0);
        let n = Vector3::new(1.0, 0.0, 0.0);
        let normal = contact_normal(&a, &b, &Vector3::new(0.75, 0.3, 0.0), &n, NormalMode::LineOfCenters);
        assert_eq!(normal, n);
    }

    #[test]
    fn test_gradient_mode_unit_or_fallback() {
        let a = body_at(-2.0, 1.0);
        let b = body_at(2.0, 1.0);
        let n = Vector3::new(1.0, 0.0, 0.0);
        let normal = contact_normal(&a, &b, &Vector3::new(0.0, 0.5, 0.2), &n, NormalMode::Gradient);
        assert!((normal.norm() - 1.0).abs() < 1e-4);
        assert!(normal.dot(&n) > 0.0);
    }
}
