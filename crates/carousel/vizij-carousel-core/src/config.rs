//! Carousel configuration.
//!
//! Every field has a serde default so hosts can ship partial JSON documents;
//! `Config::from_json` parses and validates in one step.

use serde::{Deserialize, Serialize};

use crate::error::CarouselError;
use crate::transition::{FadeTransition, SlideTransition, TransitionRunner};

/// Axis along which items move.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Pick the component of a 2D vector that lies on this axis.
    #[inline]
    pub fn component(&self, v: [f32; 2]) -> f32 {
        match self {
            Self::Horizontal => v[0],
            Self::Vertical => v[1],
        }
    }
}

/// Built-in transition selection for declarative configs.
/// Custom runners are installed with `Carousel::set_transition`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    #[default]
    Slide,
    Fade,
}

impl TransitionKind {
    /// Instantiate the runner with its default timing.
    pub fn build(&self) -> Box<dyn TransitionRunner> {
        match self {
            Self::Slide => Box::new(SlideTransition::default()),
            Self::Fade => Box::new(FadeTransition::default()),
        }
    }
}

/// Tuning for drag interpretation and the settle animations that follow a release.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Fraction of the viewport extent a drag must exceed to commit.
    pub commit_fraction: f32,
    /// Absolute release velocity (extent units per time unit) that commits regardless of distance.
    pub commit_velocity: f32,
    /// Offset multiplier applied when dragging past a non-looping edge.
    pub boundary_resistance: f32,
    /// Seconds for the commit animation.
    pub commit_duration: f32,
    /// Seconds for the snap-back animation.
    pub snap_back_duration: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            commit_fraction: 0.25,
            commit_velocity: 0.5,
            boundary_resistance: 0.3,
            commit_duration: 0.2,
            snap_back_duration: 0.25,
        }
    }
}

/// Top-level carousel configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Wrap past the first/last item.
    pub looping: bool,
    pub auto_play_enabled: bool,
    /// Seconds between auto-advances. `None` disables auto-play regardless of the flag.
    pub auto_play_interval: Option<f32>,
    pub orientation: Orientation,
    pub transition: TransitionKind,
    /// Whether drag gestures are interpreted at all.
    pub swipe_enabled: bool,
    pub gesture: GestureConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            looping: true,
            auto_play_enabled: false,
            auto_play_interval: None,
            orientation: Orientation::Horizontal,
            transition: TransitionKind::Slide,
            swipe_enabled: true,
            gesture: GestureConfig::default(),
        }
    }
}

fn check_fraction(field: &str, v: f32) -> Result<(), CarouselError> {
    if v.is_finite() && v > 0.0 && v <= 1.0 {
        Ok(())
    } else {
        Err(CarouselError::InvalidConfig {
            field: field.to_string(),
            reason: format!("expected a value in (0, 1], got {v}"),
        })
    }
}

fn check_non_negative(field: &str, v: f32) -> Result<(), CarouselError> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(CarouselError::InvalidConfig {
            field: field.to_string(),
            reason: format!("expected a finite non-negative value, got {v}"),
        })
    }
}

impl Config {
    /// Parse a JSON document and validate it.
    pub fn from_json(s: &str) -> Result<Self, CarouselError> {
        let cfg: Config = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), CarouselError> {
        if let Some(interval) = self.auto_play_interval {
            check_non_negative("auto_play_interval", interval)?;
        }
        check_fraction("gesture.commit_fraction", self.gesture.commit_fraction)?;
        check_fraction(
            "gesture.boundary_resistance",
            self.gesture.boundary_resistance,
        )?;
        check_non_negative("gesture.commit_velocity", self.gesture.commit_velocity)?;
        check_non_negative("gesture.commit_duration", self.gesture.commit_duration)?;
        check_non_negative(
            "gesture.snap_back_duration",
            self.gesture.snap_back_duration,
        )?;
        Ok(())
    }
}
