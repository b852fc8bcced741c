//! Clock abstraction for the auto-play timer.
//!
//! The scheduler only starts and stops a repeating timer. How ticks are
//! produced is the host's business: `FrameClock` accumulates frame time
//! handed to `Carousel::update`, while hosts with their own timers can report
//! ticks through `Carousel::timer_tick`.

use std::fmt;

pub trait Clock: fmt::Debug {
    /// Start (or restart from zero) a repeating timer with `interval` seconds.
    fn start(&mut self, interval: f32);

    fn stop(&mut self);

    fn is_running(&self) -> bool;

    /// Feed elapsed frame time. Returns how many ticks fired.
    fn advance(&mut self, dt: f32) -> u32;
}

/// Repeating timer driven by frame deltas.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameClock {
    interval: Option<f32>,
    elapsed: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds accumulated toward the next tick.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

impl Clock for FrameClock {
    fn start(&mut self, interval: f32) {
        if interval > 0.0 && interval.is_finite() {
            self.interval = Some(interval);
        } else {
            self.interval = None;
        }
        self.elapsed = 0.0;
    }

    fn stop(&mut self) {
        self.interval = None;
        self.elapsed = 0.0;
    }

    fn is_running(&self) -> bool {
        self.interval.is_some()
    }

    fn advance(&mut self, dt: f32) -> u32 {
        let Some(interval) = self.interval else {
            return 0;
        };
        self.elapsed += dt.max(0.0);
        let mut ticks = 0;
        while self.elapsed >= interval {
            self.elapsed -= interval;
            ticks += 1;
        }
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_once_per_interval() {
        let mut clock = FrameClock::new();
        clock.start(1.0);
        assert_eq!(clock.advance(0.6), 0);
        assert_eq!(clock.advance(0.6), 1);
        assert_eq!(clock.advance(2.0), 2);
    }

    #[test]
    fn stopped_clock_never_ticks() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(10.0), 0);
        clock.start(1.0);
        clock.stop();
        assert_eq!(clock.advance(10.0), 0);
        clock.start(0.0);
        assert!(!clock.is_running());
    }

    #[test]
    fn restart_resets_elapsed() {
        let mut clock = FrameClock::new();
        clock.start(1.0);
        clock.advance(0.9);
        clock.start(1.0);
        assert_eq!(clock.advance(0.5), 0);
        assert!((clock.elapsed() - 0.5).abs() < 1e-6);
    }
}
