//! Two-body rigid dynamics for fractal-shaped bodies.
//!
//! Bodies are described by distance estimators (a power-8 Mandelbulb or a
//! folded tetrahedral IFS) inside a bounding sphere. Each tick applies mutual
//! gravity, integrates position and orientation, tests the bounding spheres
//! and, when they overlap, sphere-marches for a contact point before applying
//! an impulse response with friction.
//!
//! ```
//! use fractal_collide::world::FractalWorld;
//!
//! let mut world = FractalWorld::demo_pair();
//! for _ in 0..60 {
//!     world.step(1.0 / 60.0).unwrap();
//! }
//! assert_eq!(world.tick(), 60);
//! ```
#![no_std]

pub mod body;
pub mod camera;
pub mod collision;
pub mod config;
pub mod error;
pub mod gpu;
pub mod gravity;
pub mod integrate;
pub mod math;
pub mod narrowphase;
pub mod response;
pub mod shape;
pub mod world;

pub use body::RigidBody;
pub use camera::Camera;
pub use collision::{Contact, Overlap};
pub use config::{NormalMode, SimConfig};
pub use error::{Result, SimError};
pub use narrowphase::ContactProbe;
pub use response::ImpulseReport;
pub use shape::Shape;
pub use world::{step, FractalWorld, StepOutcome};
