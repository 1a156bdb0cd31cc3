//! Generator settings
//!
//! The defaults are the canonical track family. Any other values produce a
//! different track for the same seed, so non-default settings must travel
//! with the seed to every renderer that needs to agree.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Result, TrackError};
use crate::pipeline::RelaxParams;

/// Upper bound on `min_points + point_range`
pub const MAX_CONTROL_POINTS: u32 = 64;
pub const MAX_SAMPLES_PER_SEGMENT: u32 = 1024;
pub const MAX_RELAX_ITERATIONS: u32 = 1000;

/// Track generator tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    // === Sampling ===
    /// Minimum raw control points
    pub min_points: u32,
    /// Width of the random extra point count
    pub point_range: u32,
    /// Ellipse half-axes as a fraction of canvas size
    pub ellipse_scale: f64,
    /// Lower bound of the radial factor, in (0, 1]
    pub min_radius_factor: f64,

    // === Shaping ===
    /// Midpoint displacement as a fraction of min(width, height)
    pub displacement_scale: f64,
    /// Minimum control edge as a fraction of min(width, height)
    pub min_distance_scale: f64,
    /// Minimum turn angle (radians)
    pub min_angle: f64,
    /// Push applied to sharp vertices (canvas units)
    pub push_step: f64,
    pub relax_iterations: u32,

    // === Output ===
    pub samples_per_segment: u32,
    /// Lap-fraction step for tangent estimates
    pub tangent_epsilon: f64,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            min_points: MIN_POINTS,
            point_range: POINT_RANGE,
            ellipse_scale: ELLIPSE_SCALE,
            min_radius_factor: MIN_RADIUS_FACTOR,

            displacement_scale: DISPLACEMENT_SCALE,
            min_distance_scale: MIN_DISTANCE_SCALE,
            min_angle: MIN_ANGLE,
            push_step: PUSH_STEP,
            relax_iterations: RELAX_ITERATIONS,

            samples_per_segment: SAMPLES_PER_SEGMENT,
            tangent_epsilon: TANGENT_EPSILON,
        }
    }
}

impl GeneratorSettings {
    /// Parse settings from JSON, filling missing fields with defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        log::info!("Loaded generator settings");
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// True when these settings produce the canonical track family
    pub fn is_canonical(&self) -> bool {
        *self == Self::default()
    }

    /// Check ranges that would make generation meaningless
    pub fn validate(&self) -> Result<()> {
        fn invalid(msg: impl Into<String>) -> Result<()> {
            Err(TrackError::InvalidSettings(msg.into()))
        }

        if self.min_points < 3 {
            return invalid(format!("min_points must be at least 3, got {}", self.min_points));
        }
        if self.point_range == 0 {
            return invalid("point_range must be at least 1");
        }
        if self.min_points.saturating_add(self.point_range) > MAX_CONTROL_POINTS {
            return invalid(format!(
                "min_points + point_range must be at most {}, got {} + {}",
                MAX_CONTROL_POINTS, self.min_points, self.point_range
            ));
        }
        if !(1..=MAX_SAMPLES_PER_SEGMENT).contains(&self.samples_per_segment) {
            return invalid(format!(
                "samples_per_segment must be in [1, {}], got {}",
                MAX_SAMPLES_PER_SEGMENT, self.samples_per_segment
            ));
        }
        if self.relax_iterations > MAX_RELAX_ITERATIONS {
            return invalid(format!(
                "relax_iterations must be at most {}, got {}",
                MAX_RELAX_ITERATIONS, self.relax_iterations
            ));
        }
        if !(self.ellipse_scale.is_finite() && self.ellipse_scale > 0.0) {
            return invalid(format!("ellipse_scale must be positive, got {}", self.ellipse_scale));
        }
        if !(self.min_radius_factor > 0.0 && self.min_radius_factor <= 1.0) {
            return invalid(format!(
                "min_radius_factor must be in (0, 1], got {}",
                self.min_radius_factor
            ));
        }
        if !(self.tangent_epsilon > 0.0 && self.tangent_epsilon < 0.5) {
            return invalid(format!(
                "tangent_epsilon must be in (0, 0.5), got {}",
                self.tangent_epsilon
            ));
        }
        let scales = [
            ("displacement_scale", self.displacement_scale),
            ("min_distance_scale", self.min_distance_scale),
            ("min_angle", self.min_angle),
            ("push_step", self.push_step),
        ];
        for (name, value) in scales {
            if !value.is_finite() || value < 0.0 {
                return invalid(format!("{} must be finite and non-negative, got {}", name, value));
            }
        }
        Ok(())
    }

    /// Relaxation constraints for a canvas whose smaller side is `min_side`
    pub fn relax_params(&self, min_side: f64) -> RelaxParams {
        RelaxParams {
            min_distance: min_side * self.min_distance_scale,
            min_angle: self.min_angle,
            push_step: self.push_step,
            iterations: self.relax_iterations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_canonical() {
        let s = GeneratorSettings::default();
        assert!(s.is_canonical());
        assert_eq!(s.relax_iterations, 5);
        assert_eq!(s.samples_per_segment, 60);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let s = GeneratorSettings::from_json(r#"{ "samples_per_segment": 24 }"#).unwrap();
        assert_eq!(s.samples_per_segment, 24);
        assert_eq!(s.min_points, MIN_POINTS);
        assert!(!s.is_canonical());
    }

    #[test]
    fn test_json_round_trip() {
        let s = GeneratorSettings {
            push_step: 7.5,
            ..Default::default()
        };
        let back = GeneratorSettings::from_json(&s.to_json().unwrap()).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn test_malformed_json() {
        let err = GeneratorSettings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TrackError::Settings(_)));
    }

    #[test]
    fn test_out_of_range_rejected() {
        let err = GeneratorSettings::from_json(r#"{ "min_points": 2 }"#).unwrap_err();
        assert!(matches!(err, TrackError::InvalidSettings(_)));

        let s = GeneratorSettings {
            min_radius_factor: 0.0,
            ..Default::default()
        };
        assert!(s.validate().is_err());

        let s = GeneratorSettings {
            push_step: f64::NAN,
            ..Default::default()
        };
        assert!(s.validate().is_err());
    }

    #[test]
    fn test_huge_counts_rejected() {
        let json = r#"{
            "samples_per_segment": 4000000000,
            "relax_iterations": 4000000000,
            "min_points": 4000000000
        }"#;
        let err = GeneratorSettings::from_json(json).unwrap_err();
        assert!(matches!(err, TrackError::InvalidSettings(_)));
    }

    #[test]
    fn test_control_point_limit() {
        let at_limit = GeneratorSettings {
            min_points: 60,
            point_range: 4,
            ..Default::default()
        };
        assert!(at_limit.validate().is_ok());

        let over = GeneratorSettings {
            point_range: 5,
            ..at_limit.clone()
        };
        assert!(over.validate().is_err());

        let wrapping = GeneratorSettings {
            min_points: u32::MAX,
            point_range: 2,
            ..Default::default()
        };
        assert!(wrapping.validate().is_err());
    }

    #[test]
    fn test_samples_per_segment_limit() {
        let at_limit = GeneratorSettings {
            samples_per_segment: MAX_SAMPLES_PER_SEGMENT,
            ..Default::default()
        };
        assert!(at_limit.validate().is_ok());

        let over = GeneratorSettings {
            samples_per_segment: MAX_SAMPLES_PER_SEGMENT + 1,
            ..Default::default()
        };
        assert!(over.validate().is_err());

        let zero = GeneratorSettings {
            samples_per_segment: 0,
            ..Default::default()
        };
        assert!(zero.validate().is_err());
    }

    #[test]
    fn test_relax_iterations_limit() {
        let none = GeneratorSettings {
            relax_iterations: 0,
            ..Default::default()
        };
        assert!(none.validate().is_ok());

        let at_limit = GeneratorSettings {
            relax_iterations: MAX_RELAX_ITERATIONS,
            ..Default::default()
        };
        assert!(at_limit.validate().is_ok());

        let over = GeneratorSettings {
            relax_iterations: MAX_RELAX_ITERATIONS + 1,
            ..Default::default()
        };
        assert!(over.validate().is_err());
    }

    #[test]
    fn test_ellipse_scale_must_be_positive() {
        for bad in [0.0, -0.1, f64::INFINITY, f64::NAN] {
            let s = GeneratorSettings {
                ellipse_scale: bad,
                ..Default::default()
            };
            assert!(s.validate().is_err(), "ellipse_scale {}", bad);
        }
        let err = GeneratorSettings::from_json(r#"{ "ellipse_scale": 0.0 }"#).unwrap_err();
        assert!(matches!(err, TrackError::InvalidSettings(_)));
    }

    #[test]
    fn test_relax_params_scale_with_canvas() {
        let p = GeneratorSettings::default().relax_params(450.0);
        assert!((p.min_distance - 36.0).abs() < 1e-12);
        assert_eq!(p.iterations, 5);
    }
}
