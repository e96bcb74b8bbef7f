//! Fractal distance estimators.
//!
//! Every estimator is evaluated in the body's local frame: un-rotated,
//! un-translated and divided by the body radius. The returned value is an
//! approximate, non-negative distance to the fractal surface in those
//! normalized units. Callers scale it back by the body radius.
//!
//! # Shapes
//! - [`Shape::Mandelbulb`]: escape-time power-8 bulb
//! - [`Shape::Tetrahedral`]: folded tetrahedral (abs + sort + scale) fractal

use nalgebra::Vector3;

// ComplexField/RealField provide acos/atan2/powf/ln for f32 in no_std via libm
#[allow(unused_imports)]
use nalgebra::{ComplexField, RealField};

/// Escape-time iteration count for the Mandelbulb.
pub const MANDELBULB_ITERATIONS: usize = 12;
/// Power of the spherical recurrence.
pub const MANDELBULB_POWER: f32 = 8.0;
/// Orbit radius beyond which a point is considered escaped.
pub const MANDELBULB_BAILOUT: f32 = 2.0;

/// Fold iterations for the tetrahedral fractal.
pub const TETRAHEDRAL_ITERATIONS: usize = 6;
/// Per-iteration scale factor of the tetrahedral fold.
pub const TETRAHEDRAL_SCALE: f32 = 2.0;

/// Nominal bounding radius used for the tetrahedral fractal.
///
/// The bisection estimate degenerates along its fold axes, so a fixed value
/// is used instead.
pub const TETRAHEDRAL_NOMINAL_RADIUS: f32 = 1.0;

const ORBIT_COLLAPSE: f32 = 1e-12;

// Bisection parameters for the Mandelbulb bounding radius.
const BISECTION_STEPS: usize = 24;
const BISECTION_INSIDE: f32 = 1e-3;
const BISECTION_MAX_RADIUS: f32 = MANDELBULB_BAILOUT;

/// Fractal shape assigned to a rigid body.
///
/// Closed set: both estimators are fixed at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Shape {
    /// Power-8 escape-time bulb.
    Mandelbulb,
    /// Folded tetrahedral fractal.
    Tetrahedral,
}

impl Shape {
    /// Evaluate the distance estimator at `p` (local, radius-normalized frame).
    #[inline]
    pub fn distance(&self, p: &Vector3<f32>) -> f32 {
        match self {
            Shape::Mandelbulb => mandelbulb_de(p),
            Shape::Tetrahedral => tetrahedral_de(p),
        }
    }

    /// Approximate bounding radius of the shape in normalized units.
    ///
    /// The Mandelbulb is probed by bisection along the coordinate axes and
    /// the cube diagonals; the outermost crossing wins. The tetrahedral
    /// fractal returns [`TETRAHEDRAL_NOMINAL_RADIUS`].
    pub fn nominal_radius(&self) -> f32 {
        match self {
            Shape::Mandelbulb => probe_radius(mandelbulb_de),
            Shape::Tetrahedral => TETRAHEDRAL_NOMINAL_RADIUS,
        }
    }

    /// Short lowercase name, handy for logs and demos.
    pub fn name(&self) -> &'static str {
        match self {
            Shape::Mandelbulb => "mandelbulb",
            Shape::Tetrahedral => "tetrahedral",
        }
    }
}

/// Mandelbulb distance estimator: `0.5 · ln(r) · r / dr`.
///
/// Points whose orbit collapses onto the origin never escape and are reported
/// as inside (distance 0). Points inside the set produce a negative raw
/// estimate which is clamped to 0.
pub fn mandelbulb_de(p: &Vector3<f32>) -> f32 {
    let mut z = *p;
    let mut dr = 1.0f32;
    let mut r = 0.0f32;

    for _ in 0..MANDELBULB_ITERATIONS {
        r = z.norm();
        if r > MANDELBULB_BAILOUT {
            break;
        }
        if r <= ORBIT_COLLAPSE {
            return 0.0;
        }

        let theta = (z.z / r).clamp(-1.0, 1.0).acos() * MANDELBULB_POWER;
        let phi = z.y.atan2(z.x) * MANDELBULB_POWER;
        dr = r.powf(MANDELBULB_POWER - 1.0) * MANDELBULB_POWER * dr + 1.0;
        let zr = r.powf(MANDELBULB_POWER);

        z = Vector3::new(
            theta.sin() * phi.cos(),
            theta.sin() * phi.sin(),
            theta.cos(),
        ) * zr
            + p;
    }

    if r <= ORBIT_COLLAPSE {
        return 0.0;
    }
    (0.5 * r.ln() * r / dr).max(0.0)
}

/// Folded tetrahedral estimator: `length(z) / scale` after the fold sequence.
pub fn tetrahedral_de(p: &Vector3<f32>) -> f32 {
    let offset = Vector3::new(1.0, 1.0, 1.0);
    let mut z = *p;
    let mut scale = 1.0f32;

    for _ in 0..TETRAHEDRAL_ITERATIONS {
        z = z.abs();
        sort_descending(&mut z);
        z = z * TETRAHEDRAL_SCALE - offset * (TETRAHEDRAL_SCALE - 1.0);
        scale *= TETRAHEDRAL_SCALE;
    }

    z.norm() / scale
}

/// Order the components so that `x >= y >= z`.
#[inline]
fn sort_descending(v: &mut Vector3<f32>) {
    if v.x < v.y {
        v.swap_rows(0, 1);
    }
    if v.y < v.z {
        v.swap_rows(1, 2);
    }
    if v.x < v.y {
        v.swap_rows(0, 1);
    }
}

fn probe_radius(de: fn(&Vector3<f32>) -> f32) -> f32 {
    const D: f32 = 0.577_350_26; // 1/sqrt(3)
    let directions = [
        Vector3::new(1.0, 0.0, 0.0),
        Vector3::new(-1.0, 0.0, 0.0),
        Vector3::new(0.0, 1.0, 0.0),
        Vector3::new(0.0, -1.0, 0.0),
        Vector3::new(0.0, 0.0, 1.0),
        Vector3::new(0.0, 0.0, -1.0),
        Vector3::new(D, D, D),
        Vector3::new(D, D, -D),
        Vector3::new(D, -D, D),
        Vector3::new(D, -D, -D),
        Vector3::new(-D, D, D),
        Vector3::new(-D, D, -D),
        Vector3::new(-D, -D, D),
        Vector3::new(-D, -D, -D),
    ];

    directions
        .iter()
        .map(|dir| {
            let mut lo = 0.0f32;
            let mut hi = BISECTION_MAX_RADIUS;
            for _ in 0..BISECTION_STEPS {
                let mid = 0.5 * (lo + hi);
                if de(&(dir * mid)) < BISECTION_INSIDE {
                    lo = mid;
                } else {
                    hi = mid;
                }
            }
            0.5 * (lo + hi)
        })
        .fold(0.0f32, f32::max)
}

#[cfg(test)]
mod tests {
    extern crate std;
    use super::*;

    #[test]
    fn test_mandelbulb_origin_is_inside() {
        assert_eq!(mandelbulb_de(&Vector3::zeros()), 0.0);
    }

    #[test]
    fn test_mandelbulb_interior_clamped_to_zero() {
        // Small orbits stay bounded: inside the set.
        assert_eq!(mandelbulb_de(&Vector3::new(0.1, 0.05, -0.1)), 0.0);
    }

    #[test]
    fn test_mandelbulb_far_point_positive() {
        let d = mandelbulb_de(&Vector3::new(3.0, 0.0, 0.0));
        assert!(d > 0.5, "d = {}", d);
        assert!(d.is_finite());
    }

    #[test]
    fn test_mandelbulb_grows_with_distance() {
        let near = mandelbulb_de(&Vector3::new(0.0, 2.5, 0.0));
        let far = mandelbulb_de(&Vector3::new(0.0, 5.0, 0.0));
        assert!(far > near);
    }

    #[test]
    fn test_mandelbulb_unit_axis_point_escapes() {
        // (1,0,0) escapes on the third iteration: small but positive.
        let d = mandelbulb_de(&Vector3::new(1.0, 0.0, 0.0));
        assert!(d > 0.0 && d < 0.1, "d = {}", d);
    }

    #[test]
    fn test_tetrahedral_non_negative_and_finite() {
        let samples = [
            Vector3::zeros(),
            Vector3::new(1.0, 1.0, 1.0),
            Vector3::new(-0.3, 0.7, 0.2),
            Vector3::new(5.0, 0.0, 0.0),
            Vector3::new(0.0, 0.0, -2.0),
        ];
        for p in samples.iter() {
            let d = tetrahedral_de(p);
            assert!(d >= 0.0 && d.is_finite(), "p = {:?}, d = {}", p, d);
        }
    }

    #[test]
    fn test_tetrahedral_symmetric_under_axis_flip() {
        let a = tetrahedral_de(&Vector3::new(0.4, -0.2, 0.9));
        let b = tetrahedral_de(&Vector3::new(-0.4, 0.2, -0.9));
        let c = tetrahedral_de(&Vector3::new(0.9, 0.4, 0.2));
        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn test_tetrahedral_far_point_grows() {
        let near = tetrahedral_de(&Vector3::new(3.0, 0.0, 0.0));
        let far = tetrahedral_de(&Vector3::new(30.0, 0.0, 0.0));
        assert!(far > near);
    }

    #[test]
    fn test_sort_descending() {
        let mut v = Vector3::new(0.1, 0.9, 0.5);
        sort_descending(&mut v);
        assert_eq!(v, Vector3::new(0.9, 0.5, 0.1));
    }

    #[test]
    fn test_shape_dispatch() {
        let p = Vector3::new(0.3, -1.2, 0.8);
        assert_eq!(Shape::Mandelbulb.distance(&p), mandelbulb_de(&p));
        assert_eq!(Shape::Tetrahedral.distance(&p), tetrahedral_de(&p));
    }

    #[test]
    fn test_nominal_radius() {
        assert_eq!(Shape::Tetrahedral.nominal_radius(), TETRAHEDRAL_NOMINAL_RADIUS);

        let r = Shape::Mandelbulb.nominal_radius();
        assert!(r > 0.5 && r < BISECTION_MAX_RADIUS, "r = {}", r);
    }
}
