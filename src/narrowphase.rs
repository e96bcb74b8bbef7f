//! Sphere-march contact search along the line of centers.
//!
//! Once the bounding spheres overlap, a parameter `t` is marched from
//! `radius_a` toward `distance - radius_b` along the line of centers. At each
//! sample both bodies' distance estimates are summed; when the sum drops below
//! the contact threshold the point is accepted. Steps are damped (a fraction
//! of the summed estimate) to guard against overshoot where the estimators
//! are not Lipschitz.
//!
//! Running out of iterations is not an error: the last sample is returned as
//! a best-effort probe with `converged == false`.

use heapless::Vec;
use nalgebra::Vector3;

use crate::body::RigidBody;
use crate::collision::Overlap;
use crate::config::{SimConfig, MAX_MARCH_STEPS};

/// Outcome of a narrow-phase march.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactProbe {
    /// Last sampled world-space point.
    pub point: Vector3<f32>,
    /// Distance estimate of body A at `point` (world units).
    pub distance_a: f32,
    /// Distance estimate of body B at `point` (world units).
    pub distance_b: f32,
    /// Number of samples taken.
    pub iterations: usize,
    /// Whether the summed estimate fell below the contact threshold.
    pub converged: bool,
}

impl ContactProbe {
    /// Summed distance estimate at the probe point.
    #[inline]
    pub fn combined_distance(&self) -> f32 {
        self.distance_a + self.distance_b
    }
}

/// One sample of the march, kept for debugging and visualization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarchSample {
    /// March parameter along the line of centers, measured from body A.
    pub t: f32,
    pub point: Vector3<f32>,
    pub distance_a: f32,
    pub distance_b: f32,
}

/// Fixed-capacity record of every sample taken by [`march_traced`].
pub type MarchTrace = Vec<MarchSample, MAX_MARCH_STEPS>;

/// March for a contact point between `a` and `b`.
pub fn march(a: &RigidBody, b: &RigidBody, overlap: &Overlap, config: &SimConfig) -> ContactProbe {
    march_with(a, b, overlap, config, |_| {})
}

/// Same as [`march`], additionally returning every sample.
pub fn march_traced(
    a: &RigidBody,
    b: &RigidBody,
    overlap: &Overlap,
    config: &SimConfig,
) -> (ContactProbe, MarchTrace) {
    let mut trace = MarchTrace::new();
    let probe = march_with(a, b, overlap, config, |sample| {
        // Capacity equals the maximum iteration budget.
        let _ = trace.push(sample);
    });
    (probe, trace)
}

fn march_with<F>(
    a: &RigidBody,
    b: &RigidBody,
    overlap: &Overlap,
    config: &SimConfig,
    mut on_sample: F,
) -> ContactProbe
where
    F: FnMut(MarchSample),
{
    let n = overlap.normal;
    let target = overlap.distance - b.radius();
    let mut t = a.radius();

    let mut probe = ContactProbe {
        point: a.position + n * t,
        distance_a: f32::INFINITY,
        distance_b: f32::INFINITY,
        iterations: 0,
        converged: false,
    };

    for i in 0..config.march_budget() {
        let point = a.position + n * t;
        let distance_a = a.surface_distance(&point);
        let distance_b = b.surface_distance(&point);
        on_sample(MarchSample {
            t,
            point,
            distance_a,
            distance_b,
        });

        probe = ContactProbe {
            point,
            distance_a,
            distance_b,
            iterations: i + 1,
            converged: distance_a + distance_b < config.contact_epsilon,
        };
        if probe.converged || t == target {
            break;
        }

        t = advance_toward(t, target, config.march_damping * (distance_a + distance_b));
    }

    log::trace!(
        "march: {} samples, converged = {}, de sum = {}",
        probe.iterations,
        probe.converged,
        probe.combined_distance()
    );
    probe
}

/// Move `t` toward `target` by `step`, never passing it.
#[inline]
fn advance_toward(t: f32, target: f32, step: f32) -> f32 {
    if target >= t {
        (t + step).min(target)
    } else {
        (t - step).max(target)
    }
}
