//! Pluggable transitions between two slots.
//!
//! A runner is a strategy over `SlotHost`. `run` returns immediately; the host
//! pumps `advance(dt)` each frame, and the runner reports the ticket of the run
//! that finished. Completion is reported once per run. A run superseded by
//! `cancel` or by another `run` never reports.

pub mod fade;
pub mod slide;
pub mod storyboard;

use std::fmt;

use crate::error::TransitionError;
use crate::ids::TransitionTicket;
use crate::slots::{finalize_handoff, SlotHost};

pub use fade::FadeTransition;
pub use slide::{SlideTransition, FALLBACK_DISTANCE};
pub use storyboard::{Easing, SlotProperty, Storyboard, Tween};

/// Everything a runner needs to animate one handoff.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TransitionRequest {
    pub ticket: TransitionTicket,
    /// Slot navigated away from; `None` on first show.
    pub from: Option<usize>,
    pub to: usize,
    pub forward: bool,
    /// Extent along the motion axis.
    pub distance: f32,
}

pub trait TransitionRunner: fmt::Debug {
    fn name(&self) -> &str;

    /// Start animating. Any previous run is cancelled (and settled) first.
    fn run(
        &mut self,
        slots: &mut dyn SlotHost,
        request: TransitionRequest,
    ) -> Result<(), TransitionError>;

    /// Stop the active run and write the terminal frame a natural completion would.
    fn cancel(&mut self, slots: &mut dyn SlotHost);

    /// Step the active run. Returns the ticket when it completes.
    fn advance(&mut self, dt: f32, slots: &mut dyn SlotHost) -> Option<TransitionTicket>;

    fn is_running(&self) -> bool;
}

/// One storyboard-backed run in flight.
#[derive(Clone, Debug, PartialEq)]
struct ActiveRun {
    request: TransitionRequest,
    storyboard: Storyboard,
}

/// Run bookkeeping shared by the storyboard-backed runners.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunState {
    active: Option<ActiveRun>,
}

impl RunState {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Cancel whatever runs, then begin `storyboard` for `request`.
    pub fn start(
        &mut self,
        slots: &mut dyn SlotHost,
        request: TransitionRequest,
        mut storyboard: Storyboard,
    ) {
        self.cancel(slots);
        storyboard.begin(slots);
        self.active = Some(ActiveRun {
            request,
            storyboard,
        });
    }

    pub fn cancel(&mut self, slots: &mut dyn SlotHost) {
        if let Some(run) = self.active.take() {
            finalize_handoff(slots, run.request.from, run.request.to);
        }
    }

    pub fn advance(&mut self, dt: f32, slots: &mut dyn SlotHost) -> Option<TransitionTicket> {
        let done = match self.active.as_mut() {
            Some(run) => run.storyboard.advance(dt, slots),
            None => return None,
        };
        if !done {
            return None;
        }
        let run = self.active.take()?;
        finalize_handoff(slots, run.request.from, run.request.to);
        Some(run.request.ticket)
    }
}
