//! Slide transition: the incoming slot travels in from one side while the
//! outgoing slot leaves on the other.

use crate::error::TransitionError;
use crate::ids::TransitionTicket;
use crate::slots::{PaintOrder, SlotHost};

use super::storyboard::{Easing, Storyboard, Tween};
use super::{RunState, TransitionRequest, TransitionRunner};

/// Travel distance used before the first layout reports an extent.
pub const FALLBACK_DISTANCE: f32 = 400.0;

#[derive(Clone, Debug, PartialEq)]
pub struct SlideTransition {
    /// Seconds.
    pub duration: f32,
    pub easing_in: Easing,
    pub easing_out: Easing,
    state: RunState,
}

impl Default for SlideTransition {
    fn default() -> Self {
        Self::new(0.3)
    }
}

impl SlideTransition {
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            easing_in: Easing::CubicOut,
            easing_out: Easing::CubicIn,
            state: RunState::new(),
        }
    }

    fn storyboard(&self, request: &TransitionRequest, distance: f32) -> Storyboard {
        let sign = if request.forward { 1.0 } else { -1.0 };
        let mut sb = Storyboard::new(self.duration).with(Tween::offset(
            request.to,
            sign * distance,
            0.0,
            self.easing_in,
        ));
        if let Some(from) = request.from.filter(|&f| f != request.to) {
            sb.push(Tween::offset(from, 0.0, -sign * distance, self.easing_out));
        }
        sb
    }
}

impl TransitionRunner for SlideTransition {
    fn name(&self) -> &str {
        "slide"
    }

    fn run(
        &mut self,
        slots: &mut dyn SlotHost,
        request: TransitionRequest,
    ) -> Result<(), TransitionError> {
        if !request.distance.is_finite() {
            return Err(TransitionError::InvalidDistance {
                distance: request.distance,
            });
        }
        let distance = if request.distance > 0.0 {
            request.distance
        } else {
            FALLBACK_DISTANCE
        };
        let sb = self.storyboard(&request, distance);

        // Settle the previous run before touching paint order for this one.
        self.state.cancel(slots);
        if let Some(from) = request.from.filter(|&f| f != request.to) {
            slots.set_opacity(from, 1.0);
            slots.set_paint_order(from, PaintOrder::Back);
        }
        slots.set_opacity(request.to, 1.0);
        slots.set_paint_order(request.to, PaintOrder::Front);
        self.state.start(slots, request, sb);
        Ok(())
    }

    fn cancel(&mut self, slots: &mut dyn SlotHost) {
        self.state.cancel(slots);
    }

    fn advance(&mut self, dt: f32, slots: &mut dyn SlotHost) -> Option<TransitionTicket> {
        self.state.advance(dt, slots)
    }

    fn is_running(&self) -> bool {
        self.state.is_running()
    }
}
