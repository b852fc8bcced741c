//! Auto-play scheduler.
//!
//! Wraps one repeating `Clock`. The timer runs only while auto-play is
//! configured (enabled with a positive interval), the carousel is attached,
//! no gesture is in progress, and no pointer hovers the control. Each of those
//! is an independent suppression layer feeding `sync`.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::clock::{Clock, FrameClock};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AutoPlayState {
    Stopped,
    Running,
}

#[derive(Debug)]
pub struct AutoPlayScheduler {
    enabled: bool,
    interval: Option<f32>,
    attached: bool,
    gesture_active: bool,
    hovered: bool,
    clock: Box<dyn Clock>,
}

impl Default for AutoPlayScheduler {
    fn default() -> Self {
        Self::new(false, None, Box::new(FrameClock::new()))
    }
}

impl AutoPlayScheduler {
    pub fn new(enabled: bool, interval: Option<f32>, clock: Box<dyn Clock>) -> Self {
        Self {
            enabled,
            interval,
            attached: true,
            gesture_active: false,
            hovered: false,
            clock,
        }
    }

    /// Swap the clock, keeping the current run state.
    pub fn set_clock(&mut self, clock: Box<dyn Clock>) {
        self.clock.stop();
        self.clock = clock;
        self.clock.stop();
        self.sync();
    }

    #[inline]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    #[inline]
    pub fn interval(&self) -> Option<f32> {
        self.interval
    }

    fn configured_interval(&self) -> Option<f32> {
        match self.interval {
            Some(i) if self.enabled && i > 0.0 && i.is_finite() => Some(i),
            _ => None,
        }
    }

    fn should_run(&self) -> bool {
        self.configured_interval().is_some()
            && self.attached
            && !self.gesture_active
            && !self.hovered
    }

    pub fn state(&self) -> AutoPlayState {
        if self.clock.is_running() {
            AutoPlayState::Running
        } else {
            AutoPlayState::Stopped
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    /// Start the timer if every layer allows it. Idempotent.
    pub fn start(&mut self) {
        if self.clock.is_running() {
            return;
        }
        if let (true, Some(interval)) = (self.should_run(), self.configured_interval()) {
            debug!("autoplay: start interval={interval}s");
            self.clock.start(interval);
        }
    }

    pub fn stop(&mut self) {
        if self.clock.is_running() {
            debug!("autoplay: stop");
            self.clock.stop();
        }
    }

    /// Bring the clock in line with the suppression layers.
    pub fn sync(&mut self) {
        if self.should_run() {
            self.start();
        } else {
            self.stop();
        }
    }

    /// Restart the running timer's elapsed time without stopping it.
    pub fn reset(&mut self) {
        if !self.clock.is_running() {
            return;
        }
        if let Some(interval) = self.configured_interval() {
            self.clock.start(interval);
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled == enabled {
            return;
        }
        self.enabled = enabled;
        self.restart_for_new_config();
    }

    pub fn set_interval(&mut self, interval: Option<f32>) {
        if self.interval == interval {
            return;
        }
        self.interval = interval;
        self.restart_for_new_config();
    }

    fn restart_for_new_config(&mut self) {
        // A running timer picks up the new interval from zero.
        self.stop();
        self.sync();
    }

    pub fn set_attached(&mut self, attached: bool) {
        self.attached = attached;
        self.sync();
    }

    /// Force-stop for the duration of a gesture session.
    pub fn begin_gesture(&mut self) {
        self.gesture_active = true;
        self.sync();
    }

    pub fn end_gesture(&mut self) {
        self.gesture_active = false;
        self.sync();
    }

    pub fn pointer_entered(&mut self) {
        self.hovered = true;
        self.sync();
    }

    pub fn pointer_exited(&mut self) {
        self.hovered = false;
        self.sync();
    }

    /// Feed frame time; returns ticks that fired.
    pub fn advance(&mut self, dt: f32) -> u32 {
        if !self.clock.is_running() {
            return 0;
        }
        self.clock.advance(dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running(interval: f32) -> AutoPlayScheduler {
        let mut s = AutoPlayScheduler::new(true, Some(interval), Box::new(FrameClock::new()));
        s.sync();
        s
    }

    #[test]
    fn needs_enabled_flag_and_positive_interval() {
        let mut s = AutoPlayScheduler::new(false, Some(1.0), Box::new(FrameClock::new()));
        s.sync();
        assert_eq!(s.state(), AutoPlayState::Stopped);
        s.set_enabled(true);
        assert_eq!(s.state(), AutoPlayState::Running);
        s.set_interval(None);
        assert_eq!(s.state(), AutoPlayState::Stopped);
    }

    #[test]
    fn start_is_idempotent() {
        let mut s = running(1.0);
        s.advance(0.7);
        s.start();
        // still 0.7s in, so 0.4 more crosses the interval
        assert_eq!(s.advance(0.4), 1);
    }

    #[test]
    fn reset_restarts_elapsed_without_stopping() {
        let mut s = running(1.0);
        s.advance(0.9);
        s.reset();
        assert!(s.is_running());
        assert_eq!(s.advance(0.5), 0);
    }

    #[test]
    fn rewriting_the_same_config_keeps_elapsed_time() {
        let mut s = running(1.0);
        s.advance(0.7);
        s.set_enabled(true);
        s.set_interval(Some(1.0));
        assert_eq!(s.advance(0.4), 1);
        s.advance(0.5);
        s.set_interval(Some(2.0));
        assert_eq!(s.advance(1.0), 0, "a new interval restarts from zero");
    }

    #[test]
    fn gesture_and_hover_are_independent_layers() {
        let mut s = running(1.0);
        s.begin_gesture();
        assert!(!s.is_running());
        s.pointer_entered();
        s.end_gesture();
        assert!(!s.is_running(), "hover still suppresses");
        s.pointer_exited();
        assert!(s.is_running());
    }

    #[test]
    fn detached_never_runs() {
        let mut s = running(1.0);
        s.set_attached(false);
        assert_eq!(s.advance(5.0), 0);
        s.set_attached(true);
        assert!(s.is_running());
    }
}
