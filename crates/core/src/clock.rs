/// Tracks elapsed time between display callbacks.
///
/// The returned delta is raw: clamping for stalls happens where the delta is
/// consumed by the rotation update, so diagnostics still see real frame times.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_timestamp: Option<f64>,
    delta_time: f32,
    default_delta: f32,
}

impl FrameClock {
    /// `default_delta` is reported for the first frame, when there is no
    /// previous timestamp to diff against.
    pub fn new(default_delta: f32) -> Self {
        Self {
            last_timestamp: None,
            delta_time: default_delta,
            default_delta,
        }
    }

    /// Record a frame at `now` (seconds, monotonic) and return the delta.
    pub fn tick(&mut self, now: f64) -> f32 {
        self.delta_time = match self.last_timestamp {
            Some(last) => (now - last) as f32,
            None => self.default_delta,
        };
        self.last_timestamp = Some(now);
        self.delta_time
    }

    /// Delta computed by the last `tick`.
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    pub fn last_timestamp(&self) -> Option<f64> {
        self.last_timestamp
    }

    /// Forget the previous timestamp; the next tick reports the default delta.
    pub fn reset(&mut self) {
        self.last_timestamp = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_returns_default() {
        let mut clock = FrameClock::new(1.0 / 120.0);
        let dt = clock.tick(5.0);
        assert!((dt - 0.008_333).abs() < 1e-5);
        assert_eq!(clock.last_timestamp(), Some(5.0));
    }

    #[test]
    fn second_tick_returns_elapsed() {
        let mut clock = FrameClock::new(1.0 / 120.0);
        clock.tick(10.0);
        let dt = clock.tick(10.016);
        assert!((dt - 0.016).abs() < 1e-5);
        assert_eq!(clock.delta_time(), dt);
    }

    #[test]
    fn delta_is_not_clamped() {
        let mut clock = FrameClock::new(1.0 / 120.0);
        clock.tick(0.0);
        assert!((clock.tick(2.5) - 2.5).abs() < 1e-6);
    }

    #[test]
    fn reset_restores_default() {
        let mut clock = FrameClock::new(0.01);
        clock.tick(1.0);
        clock.tick(1.5);
        clock.reset();
        assert_eq!(clock.tick(9.0), 0.01);
    }
}
