use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Gesture sensitivities, adjustable at runtime from the settings panel.
///
/// Both values are kept inside their ranges; setters clamp instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawSensitivity")]
pub struct GestureSensitivity {
    rotation: f32,
    velocity: f32,
}

impl GestureSensitivity {
    /// Radians of rotation per point of drag.
    pub const ROTATION_RANGE: RangeInclusive<f32> = 0.000_001..=0.1;
    /// Radians/sec of inertia per point/sec of release velocity.
    pub const VELOCITY_RANGE: RangeInclusive<f32> = 0.000_000_1..=0.01;
    pub const DEFAULT_ROTATION: f32 = 0.005;
    pub const DEFAULT_VELOCITY: f32 = 0.0001;

    pub fn new(rotation: f32, velocity: f32) -> Self {
        let mut s = Self::default();
        s.set_rotation(rotation);
        s.set_velocity(velocity);
        s
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn set_rotation(&mut self, value: f32) {
        self.rotation = clamp_to(value, &Self::ROTATION_RANGE);
    }

    pub fn set_velocity(&mut self, value: f32) {
        self.velocity = clamp_to(value, &Self::VELOCITY_RANGE);
    }

    /// Rotation sensitivity on a log10 scale, for slider widgets.
    pub fn rotation_log10(&self) -> f32 {
        self.rotation.log10()
    }

    pub fn set_rotation_log10(&mut self, exponent: f32) {
        self.set_rotation(10f32.powf(exponent));
    }

    pub fn velocity_log10(&self) -> f32 {
        self.velocity.log10()
    }

    pub fn set_velocity_log10(&mut self, exponent: f32) {
        self.set_velocity(10f32.powf(exponent));
    }

    pub fn is_rotation_default(&self) -> bool {
        self.rotation == Self::DEFAULT_ROTATION
    }

    pub fn is_velocity_default(&self) -> bool {
        self.velocity == Self::DEFAULT_VELOCITY
    }
}

impl Default for GestureSensitivity {
    fn default() -> Self {
        Self {
            rotation: Self::DEFAULT_ROTATION,
            velocity: Self::DEFAULT_VELOCITY,
        }
    }
}

/// Unchecked wire form; converted through the clamping constructor.
#[derive(Deserialize)]
struct RawSensitivity {
    #[serde(default = "default_rotation")]
    rotation: f32,
    #[serde(default = "default_velocity")]
    velocity: f32,
}

fn default_rotation() -> f32 {
    GestureSensitivity::DEFAULT_ROTATION
}

fn default_velocity() -> f32 {
    GestureSensitivity::DEFAULT_VELOCITY
}

impl From<RawSensitivity> for GestureSensitivity {
    fn from(raw: RawSensitivity) -> Self {
        Self::new(raw.rotation, raw.velocity)
    }
}

fn clamp_to(value: f32, range: &RangeInclusive<f32>) -> f32 {
    if value.is_nan() {
        return *range.start();
    }
    value.clamp(*range.start(), *range.end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let s = GestureSensitivity::default();
        assert_eq!(s.rotation(), 0.005);
        assert_eq!(s.velocity(), 0.0001);
        assert!(s.is_rotation_default());
        assert!(s.is_velocity_default());
    }

    #[test]
    fn setters_clamp() {
        let mut s = GestureSensitivity::default();
        s.set_rotation(5.0);
        assert_eq!(s.rotation(), 0.1);
        s.set_rotation(0.0);
        assert_eq!(s.rotation(), 0.000_001);
        s.set_velocity(1.0);
        assert_eq!(s.velocity(), 0.01);
        s.set_velocity(-3.0);
        assert_eq!(s.velocity(), 0.000_000_1);
        s.set_velocity(f32::NAN);
        assert_eq!(s.velocity(), 0.000_000_1);
    }

    #[test]
    fn log_scale_roundtrip() {
        let mut s = GestureSensitivity::default();
        s.set_rotation_log10(-3.0);
        assert!((s.rotation() - 0.001).abs() < 1e-7);
        assert!((s.rotation_log10() + 3.0).abs() < 1e-4);

        s.set_velocity_log10(-9.0);
        assert_eq!(s.velocity(), 0.000_000_1);
        assert!(!s.is_velocity_default());
    }

    #[test]
    fn deserialize_clamps_out_of_range_values() {
        let s: GestureSensitivity =
            serde_json::from_str(r#"{"rotation": 5.0, "velocity": -1.0}"#).unwrap();
        assert_eq!(s.rotation(), 0.1);
        assert_eq!(s.velocity(), 0.000_000_1);
        assert!(GestureSensitivity::VELOCITY_RANGE.contains(&s.velocity()));
        assert!(s.velocity_log10().is_finite());
    }

    #[test]
    fn deserialize_fills_missing_fields() {
        let s: GestureSensitivity = serde_json::from_str(r#"{"rotation": 0.01}"#).unwrap();
        assert_eq!(s.rotation(), 0.01);
        assert!(s.is_velocity_default());
    }

    #[test]
    fn serialized_values_read_back() {
        let s = GestureSensitivity::new(0.02, 0.001);
        let text = serde_json::to_string(&s).unwrap();
        assert_eq!(serde_json::from_str::<GestureSensitivity>(&text).unwrap(), s);
    }
}
