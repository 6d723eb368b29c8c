use crate::clock::FrameClock;
use crate::config::RendererConfig;
use crate::mvp::MvpBuilder;
use crate::rotation::RotationState;
use crate::stats::FrameTimer;
use glam::Mat4;

const FRAME_HISTORY: usize = 120;

/// Destination for one frame of cube drawing.
///
/// `acquire_frame` returns `None` when no drawable is available this callback
/// (surface lost, timed out, minimized). The loop then skips the frame.
pub trait FrameTarget {
    type Frame;

    fn acquire_frame(&mut self) -> Option<Self::Frame>;

    /// Issue the cube draw into `frame` with `mvp` as the per-draw uniform.
    fn draw(&mut self, frame: &Self::Frame, mvp: Mat4);
}

/// Per-frame orchestration: clock, matrices, draw, rotation advance.
pub struct RenderLoop {
    clock: FrameClock,
    rotation: RotationState,
    mvp: MvpBuilder,
    max_delta_time: f32,
    frame_timer: FrameTimer,
    last_mvp: Mat4,
    frames_drawn: u64,
    frames_skipped: u64,
}

impl RenderLoop {
    pub fn new(config: &RendererConfig) -> Self {
        Self {
            clock: FrameClock::new(config.performance.target_frame_time),
            rotation: RotationState::new(config.rotation),
            mvp: MvpBuilder::new(config.camera),
            max_delta_time: config.max_delta_time(),
            frame_timer: FrameTimer::new(FRAME_HISTORY),
            last_mvp: Mat4::IDENTITY,
            frames_drawn: 0,
            frames_skipped: 0,
        }
    }

    /// Run one frame at time `now` (seconds) for a surface of `width` x `height`
    /// pixels.
    ///
    /// The draw uses the current orientation and rotation advances afterwards,
    /// so what is on screen lags the state by one frame. Returns the acquired
    /// frame so the caller can composite on top of it and present.
    pub fn render_frame<T: FrameTarget>(
        &mut self,
        now: f64,
        width: u32,
        height: u32,
        target: &mut T,
    ) -> Option<T::Frame> {
        let dt = self.clock.tick(now);
        self.frame_timer.record_secs(dt);

        let Some(frame) = target.acquire_frame() else {
            self.frames_skipped += 1;
            return None;
        };

        let mvp = self
            .mvp
            .build_mvp(width, height, self.rotation.orientation());
        target.draw(&frame, mvp);
        self.last_mvp = mvp;
        self.frames_drawn += 1;

        self.rotation.advance(dt, self.max_delta_time);
        Some(frame)
    }

    /// Surface size changed: the next frame rebuilds the projection.
    pub fn resize(&mut self, width: u32, height: u32) {
        tracing::debug!(width, height, "surface resized, invalidating projection");
        self.mvp.invalidate_projection();
    }

    /// Host stopped delivering frames; avoid a huge delta on resume.
    pub fn suspend(&mut self) {
        self.clock.reset();
    }

    pub fn apply_drag(&mut self, dx: f32, dy: f32) {
        self.rotation.apply_drag(dx, dy);
    }

    pub fn apply_fling(&mut self, vx: f32, vy: f32) {
        self.rotation.apply_fling(vx, vy);
    }

    pub fn rotation(&self) -> &RotationState {
        &self.rotation
    }

    pub fn mvp_builder(&self) -> &MvpBuilder {
        &self.mvp
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn frame_timer(&self) -> &FrameTimer {
        &self.frame_timer
    }

    pub fn max_delta_time(&self) -> f32 {
        self.max_delta_time
    }

    /// Matrix used by the most recent drawn frame.
    pub fn last_mvp(&self) -> Mat4 {
        self.last_mvp
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    pub fn frames_skipped(&self) -> u64 {
        self.frames_skipped
    }
}
