//! Minimal tween storyboard driven by frame deltas.
//!
//! A storyboard is a set of scalar tweens sharing one duration. It is sampled
//! at normalized progress `t` in [0, 1] after each `advance(dt)`.

use serde::{Deserialize, Serialize};

use crate::slots::SlotHost;

/// Linear interpolation of scalars.
#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    CubicIn,
    #[default]
    CubicOut,
}

impl Easing {
    #[inline]
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::CubicIn => t * t * t,
            Self::CubicOut => {
                let u = 1.0 - t;
                1.0 - u * u * u
            }
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SlotProperty {
    AxisOffset,
    Opacity,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Tween {
    pub slot: usize,
    pub property: SlotProperty,
    pub from: f32,
    pub to: f32,
    pub easing: Easing,
}

impl Tween {
    pub fn offset(slot: usize, from: f32, to: f32, easing: Easing) -> Self {
        Self {
            slot,
            property: SlotProperty::AxisOffset,
            from,
            to,
            easing,
        }
    }

    pub fn opacity(slot: usize, from: f32, to: f32, easing: Easing) -> Self {
        Self {
            slot,
            property: SlotProperty::Opacity,
            from,
            to,
            easing,
        }
    }

    #[inline]
    pub fn sample(&self, t: f32) -> f32 {
        lerp_f32(self.from, self.to, self.easing.apply(t))
    }

    fn apply(&self, slots: &mut dyn SlotHost, t: f32) {
        let v = self.sample(t);
        match self.property {
            SlotProperty::AxisOffset => slots.set_axis_offset(self.slot, v),
            SlotProperty::Opacity => slots.set_opacity(self.slot, v),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Storyboard {
    tweens: Vec<Tween>,
    duration: f32,
    elapsed: f32,
}

impl Storyboard {
    pub fn new(duration: f32) -> Self {
        Self {
            tweens: Vec::new(),
            duration: duration.max(0.0),
            elapsed: 0.0,
        }
    }

    pub fn with(mut self, tween: Tween) -> Self {
        self.tweens.push(tween);
        self
    }

    pub fn push(&mut self, tween: Tween) {
        self.tweens.push(tween);
    }

    pub fn tweens(&self) -> &[Tween] {
        &self.tweens
    }

    #[inline]
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Normalized progress in [0, 1].
    #[inline]
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            if self.elapsed > 0.0 {
                1.0
            } else {
                0.0
            }
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.elapsed > 0.0 && self.progress() >= 1.0
    }

    /// Write the first frame.
    pub fn begin(&mut self, slots: &mut dyn SlotHost) {
        self.elapsed = 0.0;
        self.sample_into(slots, 0.0);
    }

    /// Step by `dt` seconds and write the sampled frame. Returns true once finished.
    pub fn advance(&mut self, dt: f32, slots: &mut dyn SlotHost) -> bool {
        // A zero-length storyboard still needs one advance to finish.
        self.elapsed += dt.max(0.0).max(f32::MIN_POSITIVE);
        let t = self.progress();
        self.sample_into(slots, t);
        t >= 1.0
    }

    /// Jump to the end and write the final frame.
    pub fn finish(&mut self, slots: &mut dyn SlotHost) {
        self.elapsed = self.duration.max(f32::MIN_POSITIVE);
        self.sample_into(slots, 1.0);
    }

    fn sample_into(&self, slots: &mut dyn SlotHost, t: f32) {
        for tween in &self.tweens {
            tween.apply(slots, t);
        }
    }
}
