//! Rigid body state for fractal-shaped bodies.
//!
//! A body is a point of mass with scalar (isotropic) inertia, a bounding
//! sphere and a fractal [`Shape`] evaluated in the body's local frame.
//!
//! # Example
//! ```
//! use fractal_collide::body::RigidBody;
//! use fractal_collide::shape::Shape;
//! use nalgebra::Vector3;
//!
//! let body = RigidBody::new(Shape::Mandelbulb, 1.0, 2.0)
//!     .with_position(Vector3::new(-2.0, 0.0, 0.0))
//!     .with_velocity(Vector3::new(0.5, 0.0, 0.0));
//! assert_eq!(body.inv_mass(), 0.5);
//! ```

use nalgebra::{UnitQuaternion, Vector3};

use crate::error::{Result, SimError};
use crate::math;
use crate::shape::Shape;

/// A rigid body with linear and angular dynamics and a fractal shape.
#[derive(Debug, Clone, PartialEq)]
pub struct RigidBody {
    // -- Linear state --
    pub position: Vector3<f32>,
    pub velocity: Vector3<f32>,

    // -- Angular state --
    /// Angular velocity (radians per second).
    pub angular_velocity: Vector3<f32>,

    /// Orientation quaternion. Defaults to identity.
    pub orientation: UnitQuaternion<f32>,

    /// Bounding-sphere radius, also the local-frame normalization factor.
    radius: f32,
    mass: f32,
    /// Scalar (isotropic) moment of inertia.
    inertia: f32,
    shape: Shape,
}

impl RigidBody {
    /// Create a body at rest at the origin.
    ///
    /// Inertia defaults to the solid-sphere value `I = (2/5) * m * r²`.
    ///
    /// # Panics
    /// Panics if `radius` or `mass` is not positive and finite.
    pub fn new(shape: Shape, radius: f32, mass: f32) -> Self {
        match Self::try_new(shape, radius, mass) {
            Ok(body) => body,
            Err(err) => panic!("{}", err),
        }
    }

    /// Fallible variant of [`RigidBody::new`].
    pub fn try_new(shape: Shape, radius: f32, mass: f32) -> Result<Self> {
        if !(radius > 0.0 && radius.is_finite()) {
            return Err(SimError::NonPositiveRadius(radius));
        }
        if !(mass > 0.0 && mass.is_finite()) {
            return Err(SimError::NonPositiveMass(mass));
        }
        if shape == Shape::Mandelbulb && radius < 1e-3 {
            log::warn!("mandelbulb body with tiny radius {}: estimator will be noisy", radius);
        }
        Ok(Self {
            position: Vector3::zeros(),
            velocity: Vector3::zeros(),
            angular_velocity: Vector3::zeros(),
            orientation: UnitQuaternion::identity(),
            radius,
            mass,
            inertia: 0.4 * mass * radius * radius,
            shape,
        })
    }

    /// Builder: set initial position.
    pub fn with_position(mut self, position: Vector3<f32>) -> Self {
        self.position = position;
        self
    }

    /// Builder: set initial velocity.
    pub fn with_velocity(mut self, velocity: Vector3<f32>) -> Self {
        self.velocity = velocity;
        self
    }

    /// Builder: set initial angular velocity (in radians per second).
    pub fn with_angular_velocity(mut self, angular_velocity: Vector3<f32>) -> Self {
        self.angular_velocity = angular_velocity;
        self
    }

    /// Builder: set initial orientation.
    pub fn with_orientation(mut self, orientation: UnitQuaternion<f32>) -> Self {
        self.orientation = orientation;
        self
    }

    /// Builder: override the scalar inertia.
    ///
    /// # Panics
    /// Panics if `inertia` is not positive and finite.
    pub fn with_inertia(self, inertia: f32) -> Self {
        match self.try_with_inertia(inertia) {
            Ok(body) => body,
            Err(err) => panic!("{}", err),
        }
    }

    /// Fallible variant of [`RigidBody::with_inertia`].
    pub fn try_with_inertia(mut self, inertia: f32) -> Result<Self> {
        if !(inertia > 0.0 && inertia.is_finite()) {
            return Err(SimError::NonPositiveInertia(inertia));
        }
        self.inertia = inertia;
        Ok(self)
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn mass(&self) -> f32 {
        self.mass
    }

    #[inline]
    pub fn inv_mass(&self) -> f32 {
        1.0 / self.mass
    }

    #[inline]
    pub fn inertia(&self) -> f32 {
        self.inertia
    }

    #[inline]
    pub fn inv_inertia(&self) -> f32 {
        1.0 / self.inertia
    }

    #[inline]
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Apply an instantaneous impulse: `delta_v = impulse / mass`.
    #[inline]
    pub fn apply_impulse(&mut self, impulse: Vector3<f32>) {
        self.velocity += impulse * self.inv_mass();
    }

    /// Apply an instantaneous angular impulse: `delta_ω = impulse / I`.
    #[inline]
    pub fn apply_angular_impulse(&mut self, impulse: Vector3<f32>) {
        self.angular_velocity += impulse * self.inv_inertia();
    }

    /// Apply `impulse` at lever arm `r` (linear part plus `r × impulse` torque).
    #[inline]
    pub fn apply_impulse_at(&mut self, impulse: Vector3<f32>, r: &Vector3<f32>) {
        self.apply_impulse(impulse);
        self.apply_angular_impulse(r.cross(&impulse));
    }

    /// Velocity of a material point at lever arm `r`: `v + ω × r`.
    #[inline]
    pub fn point_velocity(&self, r: &Vector3<f32>) -> Vector3<f32> {
        self.velocity + self.angular_velocity.cross(r)
    }

    /// Transform a world point into the local, radius-normalized frame.
    #[inline]
    pub fn to_local(&self, world: &Vector3<f32>) -> Vector3<f32> {
        math::inverse_rotate(&self.orientation, &(world - self.position)) / self.radius
    }

    /// Distance estimate from a world point to this body's fractal surface,
    /// in world units.
    #[inline]
    pub fn surface_distance(&self, world: &Vector3<f32>) -> f32 {
        self.shape.distance(&self.to_local(world)) * self.radius
    }

    /// Returns the current speed (magnitude of velocity).
    #[inline]
    pub fn speed(&self) -> f32 {
        self.velocity.norm()
    }

    /// Linear momentum `m * v`.
    #[inline]
    pub fn momentum(&self) -> Vector3<f32> {
        self.velocity * self.mass
    }

    /// Kinetic energy: `0.5 * m * v² + 0.5 * I * ω²`.
    #[inline]
    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.mass * self.velocity.norm_squared()
            + 0.5 * self.inertia * self.angular_velocity.norm_squared()
    }
}
