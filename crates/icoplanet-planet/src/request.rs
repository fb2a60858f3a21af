//! Parameters of one planet generation run.

use icoplanet_geometry::{PivotFrame, Subdivider};

use crate::{DEFAULT_COLOR1, DEFAULT_COLOR2, GenerationError, Rgb};

/// Which pivot markers to emit for each patch.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PivotOptions {
    /// One marker at each patch's seed centroid.
    pub emit_center: bool,
    /// One marker at each of the three seed corners.
    pub emit_corners: bool,
    /// Skip corner markers already emitted by an earlier patch sharing the corner.
    pub dedupe_corners: bool,
    /// Frame the marker rotations are built from.
    pub frame: PivotFrame,
}

/// Everything a generation run needs.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationRequest {
    /// Subdivision passes applied to the icosahedron.
    pub total_depth: u32,
    /// Pass count after which each triangle becomes its own patch. Must be below `total_depth`.
    pub split_depth: u32,
    /// Radius the unit sphere is scaled to.
    pub base_radius: f32,
    pub color1: Rgb,
    pub color2: Rgb,
    /// Seed for the per-patch color draw. `None` picks a fresh seed for the run.
    pub color_seed: Option<u64>,
    /// How close `v` must be to 0 or 1 to count as a pole. `0.0` means exact.
    pub pole_tolerance: f32,
    pub pivots: PivotOptions,
}

impl Default for GenerationRequest {
    fn default() -> Self {
        Self {
            total_depth: 3,
            split_depth: 1,
            base_radius: 5.0,
            color1: DEFAULT_COLOR1,
            color2: DEFAULT_COLOR2,
            color_seed: None,
            pole_tolerance: 0.0,
            pivots: PivotOptions::default(),
        }
    }
}

impl GenerationRequest {
    /// A default request with the given depths.
    #[must_use]
    pub fn new(total_depth: u32, split_depth: u32) -> Self {
        Self {
            total_depth,
            split_depth,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.color_seed = Some(seed);
        self
    }

    /// Reject requests that cannot produce a planet.
    pub fn validate(&self) -> Result<(), GenerationError> {
        Subdivider::validate(self.total_depth, self.split_depth)?;

        if !(self.base_radius.is_finite() && self.base_radius > 0.0) {
            return Err(GenerationError::InvalidRadius(self.base_radius));
        }
        if !(self.pole_tolerance.is_finite() && (0.0..0.5).contains(&self.pole_tolerance)) {
            return Err(GenerationError::InvalidPoleTolerance(self.pole_tolerance));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use icoplanet_geometry::ConfigurationError;

    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(GenerationRequest::default().validate().is_ok());
    }

    #[test]
    fn test_split_must_be_below_total() {
        let err = GenerationRequest::new(2, 2).validate().unwrap_err();
        assert_eq!(
            err,
            GenerationError::Configuration(ConfigurationError::SplitDepthNotBelowTotal {
                split_depth: 2,
                total_depth: 2,
            })
        );
        assert!(err.to_string().contains("must be less than total depth"));
    }

    #[test]
    fn test_radius_must_be_positive() {
        for radius in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let request = GenerationRequest {
                base_radius: radius,
                ..GenerationRequest::default()
            };
            assert!(
                matches!(request.validate(), Err(GenerationError::InvalidRadius(_))),
                "Radius {radius} accepted"
            );
        }
    }

    #[test]
    fn test_pole_tolerance_range() {
        for tolerance in [-0.1, 0.5, f32::NAN] {
            let request = GenerationRequest {
                pole_tolerance: tolerance,
                ..GenerationRequest::default()
            };
            assert!(matches!(
                request.validate(),
                Err(GenerationError::InvalidPoleTolerance(_))
            ));
        }
        let request = GenerationRequest {
            pole_tolerance: 1e-3,
            ..GenerationRequest::default()
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_with_seed() {
        let request = GenerationRequest::new(2, 0).with_seed(99);
        assert_eq!(request.color_seed, Some(99));
        assert_eq!(request.total_depth, 2);
    }
}
