use crate::config::{DAMPING_REFERENCE_RATE, RotationConfig};
use glam::{Vec2, Vec3};

/// Which half of the rotation state machine is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationMode {
    /// Constant yaw drift; velocity is pinned to zero.
    AutoRotating,
    /// Inertia from the last gesture, decaying each frame.
    UserDriven,
}

/// Cube orientation plus angular velocity.
///
/// Gestures move the state into [`RotationMode::UserDriven`]; once the decayed
/// velocity drops to the threshold on both axes it falls back to
/// [`RotationMode::AutoRotating`]. There is no terminal state.
#[derive(Debug, Clone)]
pub struct RotationState {
    angles: Vec3,
    /// x: pitch rate, y: yaw rate (radians/sec).
    velocity: Vec2,
    mode: RotationMode,
    params: RotationConfig,
}

impl RotationState {
    pub fn new(params: RotationConfig) -> Self {
        Self {
            angles: Vec3::ZERO,
            velocity: Vec2::ZERO,
            mode: RotationMode::AutoRotating,
            params,
        }
    }

    /// Current (x, y, z) angles in radians.
    pub fn orientation(&self) -> Vec3 {
        self.angles
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn mode(&self) -> RotationMode {
        self.mode
    }

    pub fn is_auto_rotating(&self) -> bool {
        self.mode == RotationMode::AutoRotating
    }

    pub fn params(&self) -> &RotationConfig {
        &self.params
    }

    /// Direct manipulation. `dx` is horizontal drag (yaw), `dy` vertical (pitch),
    /// both already converted to radians.
    pub fn apply_drag(&mut self, dx: f32, dy: f32) {
        self.angles.y += dx;
        self.angles.x += dy;
        self.velocity = Vec2::new(dy, dx) * self.params.drag_velocity_gain;
        self.mode = RotationMode::UserDriven;
    }

    /// Seed inertia from a release velocity, using the same screen-axis mapping
    /// as [`RotationState::apply_drag`]. Angles are not touched.
    pub fn apply_fling(&mut self, vx: f32, vy: f32) {
        self.velocity = Vec2::new(vy, vx) * self.params.fling_velocity_gain;
        self.mode = RotationMode::UserDriven;
    }

    /// Step the state machine by `delta_time`, clamped to `max_delta_time`.
    pub fn advance(&mut self, delta_time: f32, max_delta_time: f32) {
        let dt = delta_time.min(max_delta_time);
        match self.mode {
            RotationMode::AutoRotating => {
                self.angles.y += self.params.auto_rotate_speed * dt;
            }
            RotationMode::UserDriven => {
                self.angles.x += self.velocity.x * dt;
                self.angles.y += self.velocity.y * dt;

                let t = 1.0 - self.params.damping_factor.powf(dt * DAMPING_REFERENCE_RATE);
                self.velocity = self.velocity.lerp(Vec2::ZERO, t);

                let min = self.params.min_velocity;
                if self.velocity.x.abs() <= min && self.velocity.y.abs() <= min {
                    self.velocity = Vec2::ZERO;
                    self.mode = RotationMode::AutoRotating;
                    tracing::trace!("inertia settled, resuming auto-rotate");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-6;

    fn state() -> RotationState {
        RotationState::new(RotationConfig::default())
    }

    #[test]
    fn starts_auto_rotating_at_rest() {
        let s = state();
        assert!(s.is_auto_rotating());
        assert_eq!(s.orientation(), Vec3::ZERO);
        assert_eq!(s.velocity(), Vec2::ZERO);
    }

    #[test]
    fn auto_rotate_only_yaws() {
        let mut s = state();
        for dt in [0.0, 0.004, 0.01, 0.5] {
            let before = s.orientation();
            s.advance(dt, 1.0 / 60.0);
            let after = s.orientation();
            let expected = 0.3 * dt.min(1.0 / 60.0);
            assert!((after.y - before.y - expected).abs() < EPS);
            assert_eq!(after.x, before.x);
            assert_eq!(after.z, before.z);
            assert_eq!(s.velocity(), Vec2::ZERO);
        }
    }

    #[test]
    fn long_stall_is_clamped() {
        let mut s = state();
        s.advance(1.0, 1.0 / 60.0);
        assert!((s.orientation().y - 0.3 / 60.0).abs() < EPS);
    }

    #[test]
    fn drag_moves_angles_immediately() {
        let mut s = state();
        s.apply_drag(0.1, 0.2);
        assert!((s.orientation().x - 0.2).abs() < EPS);
        assert!((s.orientation().y - 0.1).abs() < EPS);
        assert_eq!(s.mode(), RotationMode::UserDriven);
        assert!((s.velocity().x - 0.1).abs() < EPS);
        assert!((s.velocity().y - 0.05).abs() < EPS);
    }

    #[test]
    fn velocity_decays_after_drag() {
        let mut s = state();
        s.apply_drag(0.1, 0.2);
        let v0 = s.velocity();
        let x0 = s.orientation().x;

        s.advance(1.0 / 60.0, 1.0 / 60.0);
        let v1 = s.velocity();
        assert!((s.orientation().x - (x0 + v0.x / 60.0)).abs() < EPS);
        // One reference frame retains exactly the damping factor.
        assert!((v1.x - v0.x * 0.95).abs() < EPS);
        assert!((v1.y - v0.y * 0.95).abs() < EPS);

        s.advance(1.0 / 60.0, 1.0 / 60.0);
        assert!(s.velocity().x < v1.x);
    }

    #[test]
    fn damping_is_frame_rate_independent() {
        let mut at_60 = state();
        let mut at_120 = state();
        at_60.apply_fling(1.0, 1.0);
        at_120.apply_fling(1.0, 1.0);

        at_60.advance(1.0 / 60.0, 1.0);
        at_120.advance(1.0 / 120.0, 1.0);
        at_120.advance(1.0 / 120.0, 1.0);

        assert!((at_60.velocity().x - at_120.velocity().x).abs() < 1e-5);
    }

    #[test]
    fn fling_sets_velocity_without_moving() {
        let mut s = state();
        s.apply_fling(2.0, -4.0);
        assert_eq!(s.orientation(), Vec3::ZERO);
        assert_eq!(s.velocity(), Vec2::new(-2.0, 1.0));
        assert!(!s.is_auto_rotating());
    }

    #[test]
    fn tiny_fling_settles_in_one_step() {
        let mut s = state();
        s.apply_fling(0.000_01, -0.000_01);
        assert_eq!(s.mode(), RotationMode::UserDriven);
        s.advance(1.0 / 120.0, 1.0 / 60.0);
        assert!(s.is_auto_rotating());
        assert_eq!(s.velocity(), Vec2::ZERO);
    }

    #[test]
    fn inertia_eventually_returns_to_auto_rotate() {
        let mut s = state();
        s.apply_drag(0.5, 0.5);
        let mut frames = 0;
        while !s.is_auto_rotating() {
            s.advance(1.0 / 120.0, 1.0 / 60.0);
            frames += 1;
            assert!(frames < 10_000, "inertia never settled");
        }
        assert_eq!(s.velocity(), Vec2::ZERO);
    }

    #[test]
    fn drag_interrupts_auto_rotate() {
        let mut s = state();
        s.advance(1.0 / 60.0, 1.0 / 60.0);
        s.apply_drag(0.0, 0.01);
        assert_eq!(s.mode(), RotationMode::UserDriven);
        let yaw = s.orientation().y;
        s.advance(1.0 / 60.0, 1.0 / 60.0);
        // No horizontal drag means no yaw velocity and no auto drift.
        assert!((s.orientation().y - yaw).abs() < EPS);
    }
}
