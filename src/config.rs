//! Session configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::positioning::{CoordinateConvention, IndexKind};

/// Default population size
pub const DEFAULT_CAT_COUNT: usize = 500;
/// Default fight radius in plane units
pub const DEFAULT_FIGHT_RADIUS: f64 = 15.0;
/// Default hiss radius in plane units
pub const DEFAULT_HISS_RADIUS: f64 = 30.0;
/// Default per-axis step length
pub const DEFAULT_SPEED: f64 = 2.0;

/// Parameters fixed for the lifetime of a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    pub cat_count: usize,
    pub map_width: f64,
    pub map_height: f64,
    pub fight_radius: f64,
    pub hiss_radius: f64,
    pub speed: f64,
    /// Whether a hissing cat also makes a calm neighbour hiss back
    pub mutual_hiss: bool,
    pub index: IndexKind,
    pub convention: CoordinateConvention,
    /// Seed for the random stream; `None` draws one from the OS
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            cat_count: DEFAULT_CAT_COUNT,
            map_width: 1000.0,
            map_height: 800.0,
            fight_radius: DEFAULT_FIGHT_RADIUS,
            hiss_radius: DEFAULT_HISS_RADIUS,
            speed: DEFAULT_SPEED,
            mutual_hiss: true,
            index: IndexKind::Auto,
            convention: CoordinateConvention::OpenGl,
            seed: None,
        }
    }
}

impl SimConfig {
    pub fn with_cat_count(mut self, cat_count: usize) -> Self {
        self.cat_count = cat_count;
        self
    }

    pub fn with_map(mut self, width: f64, height: f64) -> Self {
        self.map_width = width;
        self.map_height = height;
        self
    }

    pub fn with_radii(mut self, fight_radius: f64, hiss_radius: f64) -> Self {
        self.fight_radius = fight_radius;
        self.hiss_radius = hiss_radius;
        self
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_mutual_hiss(mut self, mutual_hiss: bool) -> Self {
        self.mutual_hiss = mutual_hiss;
        self
    }

    pub fn with_index(mut self, index: IndexKind) -> Self {
        self.index = index;
        self
    }

    /// Check every numeric field; the first problem found is reported
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [("map width", self.map_width), ("map height", self.map_height)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositiveDimension { name, value });
            }
        }
        for (name, value) in [("fight radius", self.fight_radius), ("hiss radius", self.hiss_radius)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidRadius { name, value });
            }
        }
        if self.fight_radius >= self.hiss_radius {
            return Err(ConfigError::RadiusOrder {
                fight: self.fight_radius,
                hiss: self.hiss_radius,
            });
        }
        if !(self.speed.is_finite() && self.speed >= 0.0) {
            return Err(ConfigError::InvalidSpeed(self.speed));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_dimensions() {
        let config = SimConfig::default().with_map(0.0, 10.0);
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositiveDimension {
                name: "map width",
                value: 0.0
            })
        );
        let config = SimConfig::default().with_map(10.0, f64::INFINITY);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositiveDimension { name: "map height", .. })
        ));
    }

    #[test]
    fn test_rejects_bad_radii() {
        let config = SimConfig::default().with_radii(0.0, 5.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRadius { name: "fight radius", .. })
        ));
        let config = SimConfig::default().with_radii(5.0, 5.0);
        assert_eq!(
            config.validate(),
            Err(ConfigError::RadiusOrder {
                fight: 5.0,
                hiss: 5.0
            })
        );
        let config = SimConfig::default().with_radii(10.0, 5.0);
        assert!(matches!(config.validate(), Err(ConfigError::RadiusOrder { .. })));
    }

    #[test]
    fn test_rejects_bad_speed() {
        let config = SimConfig::default().with_speed(-0.5);
        assert_eq!(config.validate(), Err(ConfigError::InvalidSpeed(-0.5)));
        assert!(SimConfig::default().with_speed(0.0).validate().is_ok());
    }

    #[test]
    fn test_zero_cats_is_valid() {
        assert!(SimConfig::default().with_cat_count(0).validate().is_ok());
    }

    #[test]
    fn test_serde_round_trip_keeps_enums_readable() {
        let config = SimConfig::default().with_index(IndexKind::Grid).with_seed(7);
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"index\":\"grid\""));
        assert!(json.contains("\"convention\":\"open_gl\""));
        let back: SimConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
