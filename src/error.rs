//! Error types for session setup and tick resolution.

use std::collections::TryReserveError;

use thiserror::Error;

/// Configuration values that cannot be used to start a session.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A width, height or scale that is zero, negative or not finite.
    #[error("{name} must be positive and finite, got {value}")]
    NonPositiveDimension { name: &'static str, value: f64 },

    /// A fight or hiss radius that is zero, negative or not finite.
    #[error("{name} must be positive and finite, got {value}")]
    InvalidRadius { name: &'static str, value: f64 },

    /// The fight radius must be strictly smaller than the hiss radius.
    #[error("fight radius ({fight}) must be smaller than hiss radius ({hiss})")]
    RadiusOrder { fight: f64, hiss: f64 },

    /// Movement speed must be finite and not negative.
    #[error("speed must be finite and not negative, got {0}")]
    InvalidSpeed(f64),
}

/// Errors surfaced by the simulation engine.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// Storage for the cat array or the spatial index could not be reserved.
    #[error("failed to allocate {what} for {count} cats")]
    ResourceExhausted {
        what: &'static str,
        count: usize,
        #[source]
        source: TryReserveError,
    },

    /// A position with a NaN or infinite coordinate reached the resolver.
    #[error("position {index} has a coordinate that is not finite")]
    NonFinitePoint { index: usize },
}

impl SimError {
    pub(crate) fn exhausted(what: &'static str, count: usize, source: TryReserveError) -> Self {
        SimError::ResourceExhausted {
            what,
            count,
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, SimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_converts() {
        let err: SimError = ConfigError::InvalidSpeed(-1.0).into();
        assert!(matches!(err, SimError::InvalidConfig(ConfigError::InvalidSpeed(_))));
        assert_eq!(
            err.to_string(),
            "invalid configuration: speed must be finite and not negative, got -1"
        );
    }

    #[test]
    fn test_resource_exhausted_is_distinguishable() {
        let source = Vec::<u8>::new().try_reserve(usize::MAX).unwrap_err();
        let err = SimError::exhausted("cat array", 3, source);
        assert!(matches!(err, SimError::ResourceExhausted { count: 3, .. }));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_non_finite_point_names_its_slot() {
        let err = SimError::NonFinitePoint { index: 3 };
        assert_eq!(err.to_string(), "position 3 has a coordinate that is not finite");
    }
}
