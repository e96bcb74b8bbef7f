//! Simulation configuration.
//!
//! Every constant the solver uses lives in [`SimConfig`]. The defaults
//! reproduce the reference behavior: `G = 1`, perfectly elastic contacts,
//! `μ = 0.5`, a 32-step damped march with a 5e-4 contact threshold and
//! line-of-centers contact normals.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// Upper bound on narrow-phase march iterations (sizes the march trace buffer).
pub const MAX_MARCH_STEPS: usize = 64;

/// How the contact normal is chosen once a contact point is found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NormalMode {
    /// Unit line of centers from body A to body B.
    #[default]
    LineOfCenters,
    /// Finite-difference gradient of the combined distance field at the
    /// contact point. Falls back to the line of centers when degenerate.
    Gradient,
}

/// Main configuration for a two-body simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SimConfig {
    /// Gravitational constant `G`.
    pub gravitational_constant: f32,
    /// Added to the squared separation before dividing (avoids the singularity).
    pub softening: f32,
    /// Coefficient of restitution `e` (1.0 = perfectly elastic).
    pub restitution: f32,
    /// Coulomb friction coefficient `μ`.
    pub friction: f32,
    /// Summed-DE threshold below which the march accepts a contact.
    pub contact_epsilon: f32,
    /// Iteration budget of the narrow-phase march.
    pub march_iterations: u32,
    /// Fraction of the summed estimate advanced per march step.
    pub march_damping: f32,
    /// Contact normal selection.
    pub normal_mode: NormalMode,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            gravitational_constant: 1.0,
            softening: 1e-6,
            restitution: 1.0,
            friction: 0.5,
            contact_epsilon: 5e-4,
            march_iterations: 32,
            march_damping: 0.5,
            normal_mode: NormalMode::LineOfCenters,
        }
    }
}

impl SimConfig {
    /// Set the gravitational constant.
    #[must_use]
    pub fn gravitational_constant(mut self, g: f32) -> Self {
        self.gravitational_constant = g;
        self
    }

    /// Disable mutual gravity.
    #[must_use]
    pub fn without_gravity(mut self) -> Self {
        self.gravitational_constant = 0.0;
        self
    }

    /// Set the coefficient of restitution.
    #[must_use]
    pub fn restitution(mut self, restitution: f32) -> Self {
        self.restitution = restitution;
        self
    }

    /// Set the friction coefficient.
    #[must_use]
    pub fn friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }

    /// Set the march iteration budget.
    #[must_use]
    pub fn march_iterations(mut self, iterations: u32) -> Self {
        self.march_iterations = iterations;
        self
    }

    /// Set the contact acceptance threshold.
    #[must_use]
    pub fn contact_epsilon(mut self, epsilon: f32) -> Self {
        self.contact_epsilon = epsilon;
        self
    }

    /// Set the contact normal mode.
    #[must_use]
    pub fn normal_mode(mut self, mode: NormalMode) -> Self {
        self.normal_mode = mode;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if !self.gravitational_constant.is_finite() || self.gravitational_constant < 0.0 {
            return Err(SimError::invalid_config(
                "gravitational constant must be finite and non-negative",
            ));
        }
        if !self.softening.is_finite() || self.softening < 0.0 {
            return Err(SimError::invalid_config("softening must be finite and non-negative"));
        }
        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(SimError::invalid_config("restitution must be within [0, 1]"));
        }
        if !self.friction.is_finite() || self.friction < 0.0 {
            return Err(SimError::invalid_config("friction must be finite and non-negative"));
        }
        if !self.contact_epsilon.is_finite() || self.contact_epsilon <= 0.0 {
            return Err(SimError::invalid_config("contact epsilon must be positive"));
        }
        if self.march_iterations == 0 || self.march_iterations as usize > MAX_MARCH_STEPS {
            return Err(SimError::invalid_config(
                "march iterations must be within [1, MAX_MARCH_STEPS]",
            ));
        }
        if !(self.march_damping > 0.0 && self.march_damping <= 1.0) {
            return Err(SimError::invalid_config("march damping must be within (0, 1]"));
        }
        Ok(())
    }

    /// Iteration budget clamped to what the trace buffer can hold.
    #[inline]
    pub(crate) fn march_budget(&self) -> usize {
        (self.march_iterations as usize).clamp(1, MAX_MARCH_STEPS)
    }
}

/// Check a timestep before handing it to the integrators.
pub fn validate_timestep(dt: f32) -> Result<()> {
    if dt.is_finite() && dt > 0.0 {
        Ok(())
    } else {
        Err(SimError::InvalidTimestep(dt))
    }
}
