use crate::sensitivity::GestureSensitivity;
use glam::Vec2;
use std::collections::VecDeque;

/// Release velocity is estimated over samples no older than this (seconds).
const VELOCITY_WINDOW: f64 = 0.1;

/// A rotation gesture produced by the pan recognizer, already scaled by
/// sensitivity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    /// Incremental drag since the previous sample, in radians.
    Drag { dx: f32, dy: f32 },
    /// Release velocity at the end of a pan.
    Fling { vx: f32, vy: f32 },
}

/// Recognizer phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanState {
    Idle,
    Panning,
}

/// Single-pointer pan recognizer.
///
/// Feed it `begin` / `update` / `end` with positions in logical points and
/// timestamps in seconds. Drags are reported relative to the previous sample;
/// the release velocity comes from the recent sample window.
#[derive(Debug, Clone)]
pub struct PanRecognizer {
    sensitivity: GestureSensitivity,
    state: PanState,
    last_location: Vec2,
    samples: VecDeque<(Vec2, f64)>,
}

impl PanRecognizer {
    pub fn new(sensitivity: GestureSensitivity) -> Self {
        Self {
            sensitivity,
            state: PanState::Idle,
            last_location: Vec2::ZERO,
            samples: VecDeque::new(),
        }
    }

    pub fn state(&self) -> PanState {
        self.state
    }

    pub fn is_panning(&self) -> bool {
        self.state == PanState::Panning
    }

    pub fn sensitivity(&self) -> &GestureSensitivity {
        &self.sensitivity
    }

    pub fn sensitivity_mut(&mut self) -> &mut GestureSensitivity {
        &mut self.sensitivity
    }

    pub fn begin(&mut self, location: Vec2, time: f64) {
        self.state = PanState::Panning;
        self.last_location = location;
        self.samples.clear();
        self.push_sample(location, time);
        tracing::trace!(?location, "pan began");
    }

    /// Pointer moved. Returns `None` when not panning or the pointer did not move.
    pub fn update(&mut self, location: Vec2, time: f64) -> Option<Gesture> {
        if !self.is_panning() {
            return None;
        }
        let delta = location - self.last_location;
        self.last_location = location;
        self.push_sample(location, time);
        if delta == Vec2::ZERO {
            return None;
        }

        let scaled = delta * self.sensitivity.rotation();
        Some(Gesture::Drag {
            dx: scaled.x,
            dy: scaled.y,
        })
    }

    /// Pointer lifted. Returns the scaled release velocity.
    pub fn end(&mut self, location: Vec2, time: f64) -> Option<Gesture> {
        if !self.is_panning() {
            return None;
        }
        self.push_sample(location, time);
        let velocity = self.release_velocity() * self.sensitivity.velocity();
        self.reset();
        tracing::trace!(?velocity, "pan ended");
        Some(Gesture::Fling {
            vx: velocity.x,
            vy: velocity.y,
        })
    }

    /// Pointer stream interrupted; no fling.
    pub fn cancel(&mut self) {
        self.reset();
    }

    /// Unscaled velocity in points/sec over the sample window.
    pub fn release_velocity(&self) -> Vec2 {
        let (Some(&(first, t0)), Some(&(last, t1))) = (self.samples.front(), self.samples.back())
        else {
            return Vec2::ZERO;
        };
        let elapsed = t1 - t0;
        if elapsed <= 0.0 {
            return Vec2::ZERO;
        }
        (last - first) / elapsed as f32
    }

    fn push_sample(&mut self, location: Vec2, time: f64) {
        self.samples.push_back((location, time));
        while let Some(&(_, oldest)) = self.samples.front() {
            if time - oldest > VELOCITY_WINDOW && self.samples.len() > 2 {
                self.samples.pop_front();
            } else {
                break;
            }
        }
    }

    fn reset(&mut self) {
        self.state = PanState::Idle;
        self.samples.clear();
    }
}

impl Default for PanRecognizer {
    fn default() -> Self {
        Self::new(GestureSensitivity::default())
    }
}
