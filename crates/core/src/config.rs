use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Update rate the damping curve is expressed against. Damping is applied as
/// `damping_factor ^ (dt * DAMPING_REFERENCE_RATE)`, so perceived deceleration
/// is the same at 60 Hz and 120 Hz.
pub const DAMPING_REFERENCE_RATE: f32 = 60.0;

/// Errors from loading or validating a renderer configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Rotation and inertia tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationConfig {
    /// Yaw rate while idle, radians per second.
    pub auto_rotate_speed: f32,
    /// Per-reference-frame velocity retention, in (0, 1).
    pub damping_factor: f32,
    /// Below this on both axes, inertia stops and auto-rotate resumes.
    pub min_velocity: f32,
    /// Angular velocity seeded per radian of drag.
    pub drag_velocity_gain: f32,
    /// Scale from (pre-scaled) release velocity to angular velocity.
    pub fling_velocity_gain: f32,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            auto_rotate_speed: 0.3,
            damping_factor: 0.95,
            min_velocity: 0.0001,
            drag_velocity_gain: 0.5,
            fling_velocity_gain: 0.5,
        }
    }
}

/// Fixed camera: never moves after construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub distance: f32,
    /// Vertical field of view, radians.
    pub field_of_view: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            distance: 2.0,
            field_of_view: std::f32::consts::FRAC_PI_4,
            near: 0.1,
            far: 100.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    /// Cube edge length.
    pub cube_size: f32,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self { cube_size: 0.5 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceConfig {
    /// Seconds per frame at the display's target rate. Also the first-frame
    /// delta, and half the stall clamp for rotation updates.
    pub target_frame_time: f32,
    /// Edge length of the procedural fallback texture, pixels.
    pub texture_size: u32,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            target_frame_time: 1.0 / 120.0,
            texture_size: 256,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceConfig {
    pub texture_path: PathBuf,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            texture_path: PathBuf::from("assets/texture.png"),
        }
    }
}

/// Complete renderer configuration. Every section falls back to its defaults
/// when omitted from a config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    pub rotation: RotationConfig,
    pub camera: CameraConfig,
    pub geometry: GeometryConfig,
    pub performance: PerformanceConfig,
    pub resources: ResourceConfig,
}

impl RendererConfig {
    /// Load a JSON config file and validate it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json(&text)?;
        tracing::debug!(path = %path.display(), "loaded renderer config");
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Largest delta a single rotation update may consume.
    pub fn max_delta_time(&self) -> f32 {
        self.performance.target_frame_time * 2.0
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let r = &self.rotation;
        if !(r.damping_factor > 0.0 && r.damping_factor < 1.0) {
            return Err(invalid(format!(
                "rotation.damping_factor must be in (0, 1), got {}",
                r.damping_factor
            )));
        }
        if r.min_velocity < 0.0 {
            return Err(invalid("rotation.min_velocity must be non-negative"));
        }
        if !r.auto_rotate_speed.is_finite() {
            return Err(invalid("rotation.auto_rotate_speed must be finite"));
        }
        for (name, gain) in [
            ("drag_velocity_gain", r.drag_velocity_gain),
            ("fling_velocity_gain", r.fling_velocity_gain),
        ] {
            if !(gain.is_finite() && gain >= 0.0) {
                return Err(invalid(format!(
                    "rotation.{name} must be finite and non-negative, got {gain}"
                )));
            }
        }

        let c = &self.camera;
        if !(c.field_of_view > 0.0 && c.field_of_view < std::f32::consts::PI) {
            return Err(invalid(format!(
                "camera.field_of_view must be in (0, pi), got {}",
                c.field_of_view
            )));
        }
        if !(c.distance > 0.0 && c.distance.is_finite()) {
            return Err(invalid(format!(
                "camera.distance must be positive, got {}",
                c.distance
            )));
        }
        if !(c.near > 0.0 && c.near < c.far) {
            return Err(invalid(format!(
                "camera planes must satisfy 0 < near < far, got near={} far={}",
                c.near, c.far
            )));
        }

        if self.geometry.cube_size <= 0.0 {
            return Err(invalid("geometry.cube_size must be positive"));
        }
        if self.performance.target_frame_time <= 0.0 {
            return Err(invalid("performance.target_frame_time must be positive"));
        }
        if self.performance.texture_size == 0 {
            return Err(invalid("performance.texture_size must be positive"));
        }
        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(msg.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = RendererConfig::default();
        config.validate().unwrap();
        assert_eq!(config.rotation.auto_rotate_speed, 0.3);
        assert_eq!(config.camera.distance, 2.0);
        assert!((config.max_delta_time() - 1.0 / 60.0).abs() < 1e-6);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config =
            RendererConfig::from_json(r#"{ "rotation": { "auto_rotate_speed": 1.5 } }"#).unwrap();
        assert_eq!(config.rotation.auto_rotate_speed, 1.5);
        assert_eq!(config.rotation.damping_factor, 0.95);
        assert_eq!(config.performance.texture_size, 256);
    }

    #[test]
    fn json_roundtrip() {
        let mut config = RendererConfig::default();
        config.resources.texture_path = PathBuf::from("textures/crate.png");
        let text = config.to_json().unwrap();
        assert_eq!(RendererConfig::from_json(&text).unwrap(), config);
    }

    #[test]
    fn rejects_bad_planes() {
        let err = RendererConfig::from_json(r#"{ "camera": { "near": 10.0, "far": 1.0 } }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_damping_out_of_range() {
        let err = RendererConfig::from_json(r#"{ "rotation": { "damping_factor": 1.0 } }"#)
            .unwrap_err();
        assert!(err.to_string().contains("damping_factor"));
    }

    #[test]
    fn rejects_zero_frame_time() {
        let err =
            RendererConfig::from_json(r#"{ "performance": { "target_frame_time": 0.0 } }"#)
                .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_non_positive_distance() {
        for distance in ["0.0", "-2.0"] {
            let json = format!(r#"{{ "camera": {{ "distance": {distance} }} }}"#);
            let err = RendererConfig::from_json(&json).unwrap_err();
            assert!(err.to_string().contains("camera.distance"));
        }
    }

    #[test]
    fn rejects_negative_gain() {
        let err = RendererConfig::from_json(r#"{ "rotation": { "fling_velocity_gain": -0.5 } }"#)
            .unwrap_err();
        assert!(err.to_string().contains("fling_velocity_gain"));
    }

    #[test]
    fn negative_auto_rotate_speed_is_allowed() {
        let config =
            RendererConfig::from_json(r#"{ "rotation": { "auto_rotate_speed": -0.3 } }"#).unwrap();
        assert_eq!(config.rotation.auto_rotate_speed, -0.3);
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spincube.json");
        std::fs::write(&path, r#"{ "camera": { "distance": 3.0 } }"#).unwrap();
        let config = RendererConfig::load(&path).unwrap();
        assert_eq!(config.camera.distance, 3.0);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = RendererConfig::load(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
