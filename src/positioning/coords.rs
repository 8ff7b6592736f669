//! Conversion from external window coordinates into plane coordinates.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

use super::Position;

/// How externally supplied points are laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinateConvention {
    /// `[-1, 1]` maps onto `[0, dim]`
    Normalized,
    /// `[-1, 1]` maps onto `[-dim/2, dim/2]`, centred on the origin
    #[default]
    OpenGl,
}

/// Window size in pixels plus a device scale factor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    width: u32,
    height: u32,
    scale: f64,
}

impl Viewport {
    pub fn new(width: u32, height: u32, scale: f64) -> Result<Self, ConfigError> {
        if width == 0 {
            return Err(ConfigError::NonPositiveDimension {
                name: "window width",
                value: 0.0,
            });
        }
        if height == 0 {
            return Err(ConfigError::NonPositiveDimension {
                name: "window height",
                value: 0.0,
            });
        }
        if !(scale.is_finite() && scale > 0.0) {
            return Err(ConfigError::NonPositiveDimension {
                name: "scale",
                value: scale,
            });
        }
        Ok(Self {
            width,
            height,
            scale,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Size of the plane this viewport covers
    pub fn plane_size(&self) -> (f64, f64) {
        (
            f64::from(self.width) * self.scale,
            f64::from(self.height) * self.scale,
        )
    }
}

/// Map one external point into plane coordinates
pub fn to_plane(
    point: (f64, f64),
    viewport: &Viewport,
    convention: CoordinateConvention,
) -> Position {
    let (width, height) = viewport.plane_size();
    let (x, y) = point;
    match convention {
        CoordinateConvention::Normalized => {
            Position::new((x + 1.0) / 2.0 * width, (y + 1.0) / 2.0 * height)
        }
        CoordinateConvention::OpenGl => Position::new(x * 0.5 * width, y * 0.5 * height),
    }
}

/// Map a batch of external points, preserving order
pub fn points_to_plane(
    points: &[(f64, f64)],
    viewport: &Viewport,
    convention: CoordinateConvention,
) -> Vec<Position> {
    points
        .iter()
        .map(|&point| to_plane(point, viewport, convention))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_rejects_zero_and_bad_scale() {
        assert!(matches!(
            Viewport::new(0, 10, 1.0),
            Err(ConfigError::NonPositiveDimension { name: "window width", .. })
        ));
        assert!(Viewport::new(10, 0, 1.0).is_err());
        assert!(Viewport::new(10, 10, 0.0).is_err());
        assert!(Viewport::new(10, 10, f64::NAN).is_err());
        assert!(Viewport::new(10, 10, f64::INFINITY).is_err());
    }

    #[test]
    fn test_plane_size_applies_scale() {
        let viewport = Viewport::new(1000, 800, 2.0).unwrap();
        assert_eq!(viewport.plane_size(), (2000.0, 1600.0));
    }

    #[test]
    fn test_opengl_convention_is_centred() {
        let viewport = Viewport::new(20, 20, 1.0).unwrap();
        let convention = CoordinateConvention::OpenGl;
        assert_eq!(to_plane((0.0, 0.0), &viewport, convention), Position::new(0.0, 0.0));
        assert_eq!(to_plane((0.0, 0.4), &viewport, convention), Position::new(0.0, 4.0));
        assert_eq!(to_plane((-1.0, 1.0), &viewport, convention), Position::new(-10.0, 10.0));
    }

    #[test]
    fn test_normalized_convention_starts_at_origin() {
        let viewport = Viewport::new(100, 50, 1.0).unwrap();
        let convention = CoordinateConvention::Normalized;
        assert_eq!(to_plane((-1.0, -1.0), &viewport, convention), Position::new(0.0, 0.0));
        assert_eq!(to_plane((0.0, 0.0), &viewport, convention), Position::new(50.0, 25.0));
        assert_eq!(to_plane((1.0, 1.0), &viewport, convention), Position::new(100.0, 50.0));
    }

    #[test]
    fn test_batch_preserves_order() {
        let viewport = Viewport::new(20, 20, 1.0).unwrap();
        let plane = points_to_plane(
            &[(0.0, 0.2), (0.0, 0.6)],
            &viewport,
            CoordinateConvention::OpenGl,
        );
        assert_eq!(plane, vec![Position::new(0.0, 2.0), Position::new(0.0, 6.0)]);
    }
}
