/// Startup configuration
use std::fs;
use std::path::Path;
use std::time::Duration;

use nalgebra::Vector3;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::pipeline::{CullMode, DivideMode};
use crate::surface::Viewport;

/// Options fixed at startup. Every field falls back to its default when
/// missing from the JSON document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub camera_position: [f32; 3],
    pub h_fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// World units per movement intent
    pub move_speed: f32,
    /// Radians per rotation intent
    pub rotate_speed: f32,
    /// Self-rotation angular velocity of spinning objects, rad/s
    pub spin_rate: f32,
    pub divide: DivideMode,
    pub cull: CullMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            fps: 60,
            camera_position: [0.5, 0.5, -4.0],
            h_fov_degrees: 60.0,
            near: 0.1,
            far: 100.0,
            move_speed: 0.1,
            rotate_speed: 0.05,
            spin_rate: 0.3,
            divide: DivideMode::default(),
            cull: CullMode::default(),
        }
    }
}

impl Config {
    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
            ConfigError::Invalid {
                field,
                reason: reason.into(),
            }
        }

        if self.width == 0 || self.height == 0 {
            return Err(invalid("width/height", "viewport must be non-empty"));
        }
        if self.fps == 0 {
            return Err(invalid("fps", "must be at least 1"));
        }
        if !(self.h_fov_degrees > 0.0 && self.h_fov_degrees < 180.0) {
            return Err(invalid(
                "h_fov_degrees",
                format!("{} is outside (0, 180)", self.h_fov_degrees),
            ));
        }
        if !(self.near > 0.0) {
            return Err(invalid("near", format!("{} is not positive", self.near)));
        }
        if !(self.far > self.near) {
            return Err(invalid(
                "far",
                format!("{} is not beyond near plane {}", self.far, self.near),
            ));
        }
        if !self.spin_rate.is_finite() {
            return Err(invalid("spin_rate", "must be finite"));
        }
        Ok(())
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }

    pub fn camera_position(&self) -> Vector3<f32> {
        Vector3::from(self.camera_position)
    }

    pub fn h_fov(&self) -> f32 {
        self.h_fov_degrees.to_radians()
    }

    /// Time budget of one frame at the target rate
    pub fn frame_time(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / u64::from(self.fps.max(1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.viewport(), Viewport::new(800, 600));
        assert!((config.h_fov() - std::f32::consts::FRAC_PI_3).abs() < 1e-6);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = Config::from_json_str(
            r#"{ "width": 1024, "camera_position": [1, 2, 3], "divide": "ieee", "cull": "guard_flag" }"#,
        )
        .unwrap();
        assert_eq!(config.width, 1024);
        assert_eq!(config.height, 600);
        assert_eq!(config.camera_position(), Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(config.divide, DivideMode::Ieee);
        assert_eq!(config.cull, CullMode::GuardFlag);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = Config::from_json_str(r#"{ "widht": 10 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_invalid_planes_rejected() {
        let err = Config::from_json_str(r#"{ "near": 5.0, "far": 1.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "far", .. }));

        let err = Config::from_json_str(r#"{ "near": 0.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "near", .. }));
    }

    #[test]
    fn test_invalid_fov_rejected() {
        let err = Config::from_json_str(r#"{ "h_fov_degrees": 180 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "h_fov_degrees",
                ..
            }
        ));
    }

    #[test]
    fn test_frame_time() {
        let config = Config {
            fps: 50,
            ..Config::default()
        };
        assert_eq!(config.frame_time(), Duration::from_millis(20));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = Config::load("/nonexistent/soft3d.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/soft3d.json"));
    }
}
