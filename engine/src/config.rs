//! Generator Configuration
//!
//! Parameter sets for the procedural generators. Every struct has a
//! `Default` matching the engine's usual values and can be loaded from JSON,
//! with missing fields falling back to those defaults.

use std::collections::BTreeMap;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::camera::{AxisBounds, BoundedRotator};
use crate::error::{ConfigError, ConstructionError};
use crate::logging::LogLevel;
use crate::mesh::Lattice;
use crate::noise::{Interpolation, NoiseAxis, ValueNoise};

/// One seeded value-noise field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
    pub seed: u32,
    pub amplitude: f32,
    /// One entry per dimension, 1 to 3
    pub axes: Vec<NoiseAxis>,
    pub interpolation: Interpolation,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            amplitude: 1.0,
            axes: vec![NoiseAxis::new(16, 1.0)],
            interpolation: Interpolation::Linear,
        }
    }
}

impl NoiseConfig {
    /// Build the field. `N` must match the number of configured axes.
    pub fn build<const N: usize>(&self) -> Result<ValueNoise<N>, ConstructionError> {
        let axes: [NoiseAxis; N] =
            self.axes
                .as_slice()
                .try_into()
                .map_err(|_| ConstructionError::AxisCount {
                    expected: N,
                    got: self.axes.len(),
                })?;
        Ok(ValueNoise::new(self.seed, self.amplitude, axes)?.with_interpolation(self.interpolation))
    }

    /// Check the config would build, whatever its dimension.
    pub fn validate(&self) -> Result<(), ConstructionError> {
        match self.axes.len() {
            1 => self.build::<1>().map(drop),
            2 => self.build::<2>().map(drop),
            3 => self.build::<3>().map(drop),
            got => Err(ConstructionError::AxisCount { expected: 3, got }),
        }
    }
}

/// Isosurface extraction parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    pub min: Vec3,
    pub max: Vec3,
    pub step: f32,
    pub threshold: f32,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            min: Vec3::splat(-1.5),
            max: Vec3::splat(1.5),
            step: 0.1,
            threshold: 0.0,
        }
    }
}

impl SurfaceConfig {
    pub fn lattice(&self) -> Result<Lattice, ConstructionError> {
        Lattice::new(self.min, self.max, self.step)
    }
}

/// Rotation limits in degrees; `None` leaves an axis unbounded.
/// With no limit at all the rotator is built in free mode.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotatorConfig {
    pub max_pitch: Option<f32>,
    pub max_yaw: Option<f32>,
    pub max_roll: Option<f32>,
}

impl RotatorConfig {
    pub fn is_bound(&self) -> bool {
        self.max_pitch.is_some() || self.max_yaw.is_some() || self.max_roll.is_some()
    }

    pub fn bounds(&self) -> AxisBounds {
        let bound = |limit: Option<f32>| limit.map_or(-1.0, |deg| (deg.to_radians() * 0.5).cos());
        AxisBounds {
            pitch: bound(self.max_pitch),
            yaw: bound(self.max_yaw),
            roll: bound(self.max_roll),
        }
    }

    pub fn build(&self) -> BoundedRotator {
        if self.is_bound() {
            BoundedRotator::bound(self.bounds())
        } else {
            BoundedRotator::free()
        }
    }
}

/// Everything one generator run needs.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub log_level: LogLevel,
    /// Named noise channels ("height", "color", ...)
    pub noise: BTreeMap<String, NoiseConfig>,
    pub surface: Option<SurfaceConfig>,
    pub rotator: RotatorConfig,
}

impl GeneratorConfig {
    /// Decode and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConstructionError> {
        for noise in self.noise.values() {
            noise.validate()?;
        }
        if let Some(surface) = &self.surface {
            surface.lattice()?;
        }
        Ok(())
    }

    /// Build the named noise channel, if configured.
    pub fn noise_field<const N: usize>(
        &self,
        name: &str,
    ) -> Result<Option<ValueNoise<N>>, ConstructionError> {
        self.noise.get(name).map(NoiseConfig::build::<N>).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noise_config_axis_count_must_match() {
        let config = NoiseConfig {
            axes: vec![NoiseAxis::new(4, 1.0), NoiseAxis::new(4, 1.0)],
            ..Default::default()
        };
        assert!(config.build::<2>().is_ok());
        assert_eq!(
            config.build::<3>().err(),
            Some(ConstructionError::AxisCount { expected: 3, got: 2 })
        );
    }

    #[test]
    fn test_noise_config_matches_direct_construction() {
        let config = NoiseConfig {
            seed: 99,
            amplitude: 2.0,
            axes: vec![NoiseAxis::new(8, 0.5)],
            interpolation: Interpolation::Cosine,
        };
        let from_config = config.build::<1>().unwrap();
        let direct = ValueNoise::line(99, 2.0, 8, 0.5)
            .unwrap()
            .with_interpolation(Interpolation::Cosine);
        assert_eq!(from_config.grid(), direct.grid());
        assert_eq!(from_config.get(3.3), direct.get(3.3));
    }

    #[test]
    fn test_rotator_config_modes() {
        assert!(!RotatorConfig::default().build().is_bound());

        let config = RotatorConfig {
            max_pitch: Some(90.0),
            ..Default::default()
        };
        let rotator = config.build();
        let bounds = rotator.bounds().unwrap();
        assert!((bounds.pitch - std::f32::consts::FRAC_PI_4.cos()).abs() < 1e-6);
        assert_eq!(bounds.yaw, -1.0);
    }

    #[test]
    fn test_generator_from_json() {
        let json = r#"{
            "log_level": "debug",
            "noise": {
                "height": { "seed": 7, "amplitude": 3.0, "axes": [{ "size": 16, "period": 0.25 }, { "size": 16, "period": 0.25 }] }
            },
            "surface": { "min": [-2.0, -2.0, -2.0], "max": [2.0, 2.0, 2.0], "step": 0.5 },
            "rotator": { "max_pitch": 45.0 }
        }"#;
        let config = GeneratorConfig::from_json_str(json).unwrap();

        assert_eq!(config.log_level, LogLevel::Debug);
        let height = config.noise_field::<2>("height").unwrap().unwrap();
        assert_eq!(height.seed(), Some(7));
        assert_eq!(height.interpolation(), Interpolation::Linear);
        assert!(config.noise_field::<1>("missing").unwrap().is_none());

        let surface = config.surface.as_ref().unwrap();
        assert_eq!(surface.threshold, 0.0);
        assert_eq!(surface.lattice().unwrap().cells(), glam::UVec3::splat(8));
        assert!(config.rotator.build().is_bound());
    }

    #[test]
    fn test_generator_rejects_invalid_lattice() {
        let json = r#"{ "surface": { "step": 0.0 } }"#;
        assert!(matches!(
            GeneratorConfig::from_json_str(json),
            Err(ConfigError::Construction(ConstructionError::InvalidStep(_)))
        ));
    }

    #[test]
    fn test_generator_rejects_bad_json() {
        assert!(matches!(GeneratorConfig::from_json_str("{ nope"), Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_empty_document_is_default() {
        let config = GeneratorConfig::from_json_str("{}").unwrap();
        assert_eq!(config, GeneratorConfig::default());
        let round = GeneratorConfig::from_json_str(&config.to_json().unwrap()).unwrap();
        assert_eq!(round, config);
    }
}
