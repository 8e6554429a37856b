use std::time::{Duration, Instant};

/// Monotonic millisecond clock with a blocking delay.
pub trait Clock {
    fn now_ms(&self) -> f64;
    fn delay_ms(&mut self, ms: f64);
}

/// Wall clock backed by [`Instant`]. Time zero is construction.
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }

    fn delay_ms(&mut self, ms: f64) {
        if ms > 0.0 {
            std::thread::sleep(Duration::from_secs_f64(ms / 1000.0));
        }
    }
}

/// Clock that only moves when told to. Delays advance it instantly.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: f64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, ms: f64) {
        self.now += ms;
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now
    }

    fn delay_ms(&mut self, ms: f64) {
        if ms > 0.0 {
            self.now += ms;
        }
    }
}

/// Holds each frame to a fixed budget. An overrun frame is not made up.
#[derive(Debug, Clone, Copy)]
pub struct FramePacer {
    budget_ms: f64,
}

impl FramePacer {
    pub fn new(budget_ms: f64) -> Self {
        Self { budget_ms }
    }

    /// Block until `budget_ms` has passed since `frame_start_ms`.
    /// Returns the delay that was requested.
    pub fn pace(&self, clock: &mut dyn Clock, frame_start_ms: f64) -> f64 {
        let elapsed = clock.now_ms() - frame_start_ms;
        let remaining = self.budget_ms - elapsed;
        if remaining > 0.0 {
            clock.delay_ms(remaining);
            remaining
        } else {
            0.0
        }
    }
}

/// Simulated time of the current level: fixed steps taken so far.
#[derive(Debug, Clone, Copy)]
pub struct SimTime {
    steps: u64,
    dt: f64,
}

impl SimTime {
    pub fn new(dt: f32) -> Self {
        Self {
            steps: 0,
            dt: dt as f64,
        }
    }

    pub fn tick(&mut self) {
        self.steps += 1;
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Seconds simulated since the level started.
    pub fn seconds(&self) -> f64 {
        self.steps as f64 * self.dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pacer_fills_the_budget() {
        let mut clock = ManualClock::new();
        let pacer = FramePacer::new(1000.0 / 60.0);
        let start = clock.now_ms();
        clock.advance(5.0);
        let waited = pacer.pace(&mut clock, start);
        assert!((waited - (1000.0 / 60.0 - 5.0)).abs() < 1e-9, "waited {}", waited);
        assert!((clock.now_ms() - 1000.0 / 60.0).abs() < 1e-9);
    }

    #[test]
    fn overrun_frame_does_not_wait() {
        let mut clock = ManualClock::new();
        let pacer = FramePacer::new(16.0);
        clock.advance(40.0);
        assert_eq!(pacer.pace(&mut clock, 0.0), 0.0);
        assert_eq!(clock.now_ms(), 40.0);
    }

    #[test]
    fn sim_time_counts_steps() {
        let mut time = SimTime::new(1.0 / 60.0);
        for _ in 0..30 {
            time.tick();
        }
        assert_eq!(time.steps(), 30);
        assert!((time.seconds() - 0.5).abs() < 1e-6, "seconds {}", time.seconds());
    }

    #[test]
    fn system_clock_is_monotonic() {
        let mut clock = SystemClock::new();
        let a = clock.now_ms();
        clock.delay_ms(1.0);
        assert!(clock.now_ms() >= a);
    }
}
