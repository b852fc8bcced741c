//! Swipe-gesture interpretation.
//!
//! Turns the samples of one continuous drag into renderer-facing offsets and,
//! on release, into a commit-or-snap-back decision. Nothing here mutates the
//! selection; the controller applies the decision.

use serde::{Deserialize, Serialize};

use crate::config::{GestureConfig, Orientation};
use crate::state::wrap_index;
use crate::transition::{Easing, Storyboard, Tween};

/// One pointer sample: cumulative translation and instantaneous velocity,
/// both two-dimensional; only the component on the carousel's axis is used.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GestureSample {
    pub cumulative: [f32; 2],
    #[serde(default)]
    pub velocity: [f32; 2],
}

impl GestureSample {
    /// Sample with motion only along `axis`.
    pub fn along(axis: Orientation, cumulative: f32, velocity: f32) -> Self {
        match axis {
            Orientation::Horizontal => Self {
                cumulative: [cumulative, 0.0],
                velocity: [velocity, 0.0],
            },
            Orientation::Vertical => Self {
                cumulative: [0.0, cumulative],
                velocity: [0.0, velocity],
            },
        }
    }
}

/// Why a gesture was refused at start.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GestureRejection {
    SwipeDisabled,
    Transitioning,
    TooFewItems,
}

/// Selection facts the interpreter reads (never writes).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GestureContext {
    pub selected: Option<usize>,
    pub item_count: usize,
    pub looping: bool,
    pub transitioning: bool,
    pub swipe_enabled: bool,
}

/// Lifetime of one physical drag.
#[derive(Clone, Debug, PartialEq)]
pub struct GestureSession {
    pub origin_index: usize,
    pub peek_index: Option<usize>,
    pub orientation: Orientation,
    pub viewport_extent: f32,
    pub cumulative: f32,
    pub velocity: f32,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PeekPlacement {
    pub index: usize,
    pub offset: f32,
    /// First frame for this neighbour: the renderer must show it.
    pub newly_shown: bool,
}

/// Offsets to apply for one accepted sample.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DragFrame {
    pub current_index: usize,
    pub current_offset: f32,
    pub at_boundary: bool,
    /// Previous neighbour to hide before the new one is shown.
    pub hide_peek: Option<usize>,
    pub peek: Option<PeekPlacement>,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ReleaseDecision {
    Commit {
        origin: usize,
        target: usize,
        forward: bool,
        extent: f32,
    },
    SnapBack {
        origin: usize,
        peek: Option<usize>,
        extent: f32,
    },
    /// No usable extent was ever seen; restore rest visuals without animating.
    Discard,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GestureInterpreter {
    cfg: GestureConfig,
}

impl GestureInterpreter {
    pub fn new(cfg: GestureConfig) -> Self {
        Self { cfg }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.cfg
    }

    pub fn set_config(&mut self, cfg: GestureConfig) {
        self.cfg = cfg;
    }

    pub fn begin(
        &self,
        ctx: &GestureContext,
        orientation: Orientation,
        viewport_extent: f32,
    ) -> Result<GestureSession, GestureRejection> {
        if !ctx.swipe_enabled {
            return Err(GestureRejection::SwipeDisabled);
        }
        if ctx.transitioning {
            return Err(GestureRejection::Transitioning);
        }
        let origin = match ctx.selected {
            Some(i) if ctx.item_count > 1 => i,
            _ => return Err(GestureRejection::TooFewItems),
        };
        Ok(GestureSession {
            origin_index: origin,
            peek_index: None,
            orientation,
            viewport_extent,
            cumulative: 0.0,
            velocity: 0.0,
        })
    }

    /// Neighbour the drag is heading toward, if one exists.
    pub fn neighbor(&self, origin: usize, cumulative: f32, ctx: &GestureContext) -> Option<usize> {
        let raw = if cumulative < 0.0 {
            origin as i64 + 1
        } else {
            origin as i64 - 1
        };
        wrap_index(raw, ctx.item_count, ctx.looping)
    }

    /// Interpret one sample. `None` means the sample was ignored.
    pub fn sample(
        &self,
        session: &mut GestureSession,
        sample: GestureSample,
        viewport_extent: f32,
        ctx: &GestureContext,
    ) -> Option<DragFrame> {
        if !(viewport_extent > 0.0) {
            return None;
        }
        let cumulative = session.orientation.component(sample.cumulative);
        let velocity = session.orientation.component(sample.velocity);
        if !cumulative.is_finite() {
            return None;
        }
        session.viewport_extent = viewport_extent;
        session.cumulative = cumulative;
        session.velocity = if velocity.is_finite() { velocity } else { 0.0 };

        let origin = session.origin_index;
        let Some(target) = self.neighbor(origin, cumulative, ctx) else {
            let hide_peek = session.peek_index.take().filter(|&p| p != origin);
            return Some(DragFrame {
                current_index: origin,
                current_offset: cumulative * self.cfg.boundary_resistance,
                at_boundary: true,
                hide_peek,
                peek: None,
            });
        };

        let mut hide_peek = None;
        let newly_shown = session.peek_index != Some(target);
        if newly_shown {
            hide_peek = session.peek_index.filter(|&p| p != origin);
            session.peek_index = Some(target);
        }
        let side = if cumulative < 0.0 {
            viewport_extent
        } else {
            -viewport_extent
        };
        Some(DragFrame {
            current_index: origin,
            current_offset: cumulative,
            at_boundary: false,
            hide_peek,
            peek: Some(PeekPlacement {
                index: target,
                offset: side + cumulative,
                newly_shown,
            }),
        })
    }

    /// Distance/velocity test for turning a drag into a navigation.
    pub fn commit_threshold_met(&self, cumulative: f32, velocity: f32, extent: f32) -> bool {
        cumulative.abs() > extent * self.cfg.commit_fraction
            || velocity.abs() > self.cfg.commit_velocity
    }

    pub fn release(&self, session: &GestureSession, ctx: &GestureContext) -> ReleaseDecision {
        let extent = session.viewport_extent;
        if !(extent > 0.0) {
            return ReleaseDecision::Discard;
        }
        let origin = session.origin_index;
        let target = self.neighbor(origin, session.cumulative, ctx);
        match target {
            Some(target)
                if self.commit_threshold_met(session.cumulative, session.velocity, extent) =>
            {
                ReleaseDecision::Commit {
                    origin,
                    target,
                    forward: session.cumulative < 0.0,
                    extent,
                }
            }
            _ => ReleaseDecision::SnapBack {
                origin,
                peek: session.peek_index,
                extent,
            },
        }
    }

    /// Current item leaves fully, neighbour lands at zero; both start where the drag left them.
    pub fn commit_storyboard(
        &self,
        origin: usize,
        origin_offset: f32,
        target: usize,
        target_offset: f32,
        forward: bool,
        extent: f32,
    ) -> Storyboard {
        let exit = if forward { -extent } else { extent };
        Storyboard::new(self.cfg.commit_duration)
            .with(Tween::offset(origin, origin_offset, exit, Easing::CubicOut))
            .with(Tween::offset(target, target_offset, 0.0, Easing::CubicOut))
    }

    /// Current item returns to zero, the peek (if any) back off-screen on its own side.
    pub fn snap_back_storyboard(
        &self,
        origin: usize,
        origin_offset: f32,
        peek: Option<(usize, f32)>,
        extent: f32,
    ) -> Storyboard {
        let mut sb = Storyboard::new(self.cfg.snap_back_duration).with(Tween::offset(
            origin,
            origin_offset,
            0.0,
            Easing::CubicOut,
        ));
        if let Some((peek, pos)) = peek.filter(|(p, _)| *p != origin) {
            let off = if pos > 0.0 { extent } else { -extent };
            sb.push(Tween::offset(peek, pos, off, Easing::CubicOut));
        }
        sb
    }
}
