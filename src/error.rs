//! Error types for body construction and simulation configuration.
//!
//! The simulation step itself never fails; these errors only surface when a
//! body or a [`SimConfig`](crate::config::SimConfig) is built from bad input.

use thiserror::Error;

/// Errors that can occur while setting up a simulation.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum SimError {
    /// Body radius must be positive and finite.
    #[error("body radius must be positive and finite, got {0}")]
    NonPositiveRadius(f32),

    /// Body mass must be positive and finite.
    #[error("body mass must be positive and finite, got {0}")]
    NonPositiveMass(f32),

    /// Scalar inertia must be positive and finite.
    #[error("body inertia must be positive and finite, got {0}")]
    NonPositiveInertia(f32),

    /// Timestep must be positive and finite.
    #[error("invalid timestep: {0}")]
    InvalidTimestep(f32),

    /// A configuration constant is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}

impl SimError {
    /// Create an invalid config error.
    pub fn invalid_config(msg: &'static str) -> Self {
        Self::InvalidConfig(msg)
    }
}

/// Result alias for fallible setup operations.
pub type Result<T> = core::result::Result<T, SimError>;

#[cfg(test)]
mod tests {
    extern crate std;
    use super::*;
    use std::string::ToString;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            SimError::NonPositiveRadius(0.0).to_string(),
            "body radius must be positive and finite, got 0"
        );
        assert_eq!(
            SimError::invalid_config("friction must be non-negative").to_string(),
            "invalid configuration: friction must be non-negative"
        );
    }
}
