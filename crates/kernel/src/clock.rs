use std::time::{Duration, Instant};

/// Frame deltas are capped so a stall (window drag, breakpoint) does not
/// teleport the camera in time-scaled mode.
const MAX_FRAME_DELTA: f32 = 0.1;

/// Timing for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Seconds since the clock started. Never decreases.
    pub elapsed: f32,
    /// Seconds since the previous frame, capped.
    pub dt: f32,
    /// Frames ticked so far, starting at 1.
    pub frame: u64,
}

/// Monotonic wall clock read once at the top of every frame.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    last: Instant,
    frame: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(start: Instant) -> Self {
        Self {
            start,
            last: start,
            frame: 0,
        }
    }

    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    /// Advance to `now`. An instant earlier than the previous tick is treated
    /// as the previous tick.
    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        let now = now.max(self.last);
        let dt = (now - self.last).as_secs_f32().min(MAX_FRAME_DELTA);
        self.last = now;
        self.frame += 1;
        FrameTime {
            elapsed: (now - self.start).as_secs_f32(),
            dt,
            frame: self.frame,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.last - self.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_is_monotonic() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);
        let offsets = [16, 33, 20, 50, 50, 10, 400];
        let mut previous = 0.0;
        for ms in offsets {
            let t = clock.tick_at(start + Duration::from_millis(ms));
            assert!(t.elapsed >= previous);
            assert!(t.dt >= 0.0);
            previous = t.elapsed;
        }
        assert_eq!(clock.elapsed(), Duration::from_millis(400));
    }

    #[test]
    fn dt_is_capped() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);
        let t = clock.tick_at(start + Duration::from_secs(5));
        assert_eq!(t.dt, MAX_FRAME_DELTA);
        assert!((t.elapsed - 5.0).abs() < 1e-6);
        assert_eq!(t.frame, 1);
    }

    #[test]
    fn live_clock_ticks_forward() {
        let mut clock = FrameClock::new();
        let a = clock.tick();
        let b = clock.tick();
        assert!(b.elapsed >= a.elapsed);
        assert_eq!(b.frame, 2);
    }
}
