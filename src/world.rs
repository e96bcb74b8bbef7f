//! Per-tick step orchestration and the two-body simulation context.
//!
//! Each tick runs, in order: mutual gravity, position and orientation
//! integration, the bounding-sphere test and, only when the spheres overlap,
//! the narrow-phase march followed by the impulse response. No contact state
//! survives from one tick to the next.

use nalgebra::Vector3;

// ComplexField provides sqrt() for f32 in no_std via libm
#[allow(unused_imports)]
use nalgebra::ComplexField;

use crate::body::RigidBody;
use crate::collision::{self, Contact};
use crate::config::{self, SimConfig};
use crate::error::{Result, SimError};
use crate::gpu::{self, GpuBody};
use crate::gravity;
use crate::integrate;
use crate::narrowphase::{self, ContactProbe};
use crate::response::{self, ImpulseReport};
use crate::shape::Shape;

/// What happened during the collision phase of one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    /// Bounding spheres do not overlap.
    Separated,
    /// Bounding spheres overlap but the march found no surface contact.
    Grazing(ContactProbe),
    /// A contact was found and the response was applied.
    Resolved(Contact, ImpulseReport),
}

impl StepOutcome {
    /// Whether the response ran this tick.
    #[inline]
    pub fn is_resolved(&self) -> bool {
        matches!(self, StepOutcome::Resolved(..))
    }

    /// The resolved contact, if any.
    pub fn contact(&self) -> Option<&Contact> {
        match self {
            StepOutcome::Resolved(contact, _) => Some(contact),
            _ => None,
        }
    }
}

/// Advance two bodies by one tick.
pub fn step(a: &mut RigidBody, b: &mut RigidBody, dt: f32, config: &SimConfig) -> StepOutcome {
    gravity::apply_gravity(a, b, dt, config.gravitational_constant, config.softening);

    integrate::integrate(a, dt);
    integrate::integrate(b, dt);

    let Some(overlap) = collision::broad_phase(a, b) else {
        return StepOutcome::Separated;
    };

    let probe = narrowphase::march(a, b, &overlap, config);
    if !probe.converged {
        log::trace!(
            "bounding spheres overlap by {} but no contact after {} samples",
            overlap.penetration,
            probe.iterations
        );
        return StepOutcome::Grazing(probe);
    }

    let normal = collision::contact_normal(a, b, &probe.point, &overlap.normal, config.normal_mode);
    let contact = Contact {
        point: probe.point,
        normal,
        penetration: overlap.penetration,
    };
    let report = response::resolve_contact(a, b, &contact, config);
    log::debug!(
        "contact at ({}, {}, {}) after {} samples",
        contact.point.x,
        contact.point.y,
        contact.point.z,
        probe.iterations
    );
    StepOutcome::Resolved(contact, report)
}

/// Explicit simulation context: both bodies, their configuration and a tick
/// counter.
#[derive(Debug, Clone, PartialEq)]
pub struct FractalWorld {
    pub bodies: [RigidBody; 2],
    config: SimConfig,
    tick: u64,
}

impl FractalWorld {
    /// Create a world, rejecting an invalid configuration.
    pub fn new(a: RigidBody, b: RigidBody, config: SimConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            bodies: [a, b],
            config,
            tick: 0,
        })
    }

    /// Two unit Mandelbulbs drifting toward each other in front of the
    /// default camera.
    pub fn demo_pair() -> Self {
        let a = RigidBody::new(Shape::Mandelbulb, 1.0, 1.0)
            .with_position(Vector3::new(-1.0, 0.0, 3.0))
            .with_velocity(Vector3::new(0.5, 0.2, 0.0));
        let b = RigidBody::new(Shape::Mandelbulb, 1.0, 1.0)
            .with_position(Vector3::new(1.0, 0.0, 3.0))
            .with_velocity(Vector3::new(-0.5, -0.2, 0.0));
        Self {
            bodies: [a, b],
            config: SimConfig::default(),
            tick: 0,
        }
    }

    #[inline]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Replace the configuration.
    pub fn set_config(&mut self, config: SimConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Number of ticks taken so far.
    #[inline]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Advance by one tick of length `dt`.
    pub fn step(&mut self, dt: f32) -> Result<StepOutcome> {
        config::validate_timestep(dt)?;
        let [a, b] = &mut self.bodies;
        let outcome = step(a, b, dt, &self.config);
        self.tick += 1;
        log::trace!("tick {}: {:?}", self.tick, outcome);
        Ok(outcome)
    }

    /// Advance by `dt` split into `substeps` equal ticks.
    ///
    /// Returns the first resolved outcome if any substep collided, otherwise
    /// the outcome of the last substep.
    pub fn step_fixed(&mut self, dt: f32, substeps: u32) -> Result<StepOutcome> {
        config::validate_timestep(dt)?;
        if substeps == 0 {
            return Err(SimError::invalid_config("substeps must be positive"));
        }
        let sub_dt = dt / substeps as f32;
        let mut first_resolved = None;
        let mut last = StepOutcome::Separated;
        for _ in 0..substeps {
            last = self.step(sub_dt)?;
            if first_resolved.is_none() && last.is_resolved() {
                first_resolved = Some(last);
            }
        }
        Ok(first_resolved.unwrap_or(last))
    }

    /// Total linear momentum of both bodies.
    pub fn linear_momentum(&self) -> Vector3<f32> {
        self.bodies[0].momentum() + self.bodies[1].momentum()
    }

    /// Total kinetic energy (linear plus rotational).
    pub fn kinetic_energy(&self) -> f32 {
        self.bodies[0].kinetic_energy() + self.bodies[1].kinetic_energy()
    }

    /// Distance between the two body centers.
    pub fn separation(&self) -> f32 {
        (self.bodies[1].position - self.bodies[0].position).norm()
    }

    /// Body state packed for upload to a ray-marching shader.
    #[inline]
    pub fn gpu_bodies(&self) -> [GpuBody; 2] {
        gpu::pack_bodies(&self.bodies)
    }
}
