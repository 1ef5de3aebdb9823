//! Error types for configuration and simulation control

use crate::registry::ParticleId;
use thiserror::Error;

/// A constant or constructor argument that cannot drive a simulation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("radius must be positive and finite, got {0}")]
    InvalidRadius(f32),
    #[error("radius range is empty: min {min} > max {max}")]
    InvalidRadiusRange { min: f32, max: f32 },
    #[error("{name} must be positive and finite, got {value}")]
    NonPositive { name: &'static str, value: f32 },
    #[error("damping factor must lie in (0, 1], got {0}")]
    InvalidDamping(f32),
    #[error("viewport must have a positive size, got {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },
}

impl ConfigError {
    /// Reject `value` unless it is strictly positive and finite
    pub fn require_positive(name: &'static str, value: f32) -> Result<f32, ConfigError> {
        if value.is_finite() && value > 0.0 {
            Ok(value)
        } else {
            Err(ConfigError::NonPositive { name, value })
        }
    }
}

/// Errors surfaced by the simulation controller
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("particle set is full (capacity {capacity})")]
    CapacityExceeded { capacity: usize },
    #[error("no particle with id {0}")]
    UnknownParticle(ParticleId),
    #[error("simulation has been stopped")]
    Stopped,
}
