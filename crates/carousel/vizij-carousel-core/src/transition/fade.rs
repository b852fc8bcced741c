//! Cross-fade transition.

use crate::error::TransitionError;
use crate::ids::TransitionTicket;
use crate::slots::{PaintOrder, SlotHost};

use super::storyboard::{Easing, Storyboard, Tween};
use super::{RunState, TransitionRequest, TransitionRunner};

#[derive(Clone, Debug, PartialEq)]
pub struct FadeTransition {
    /// Seconds.
    pub duration: f32,
    pub easing_in: Easing,
    pub easing_out: Easing,
    state: RunState,
}

impl Default for FadeTransition {
    fn default() -> Self {
        Self::new(0.35)
    }
}

impl FadeTransition {
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            easing_in: Easing::CubicOut,
            easing_out: Easing::CubicIn,
            state: RunState::new(),
        }
    }
}

impl TransitionRunner for FadeTransition {
    fn name(&self) -> &str {
        "fade"
    }

    fn run(
        &mut self,
        slots: &mut dyn SlotHost,
        request: TransitionRequest,
    ) -> Result<(), TransitionError> {
        self.state.cancel(slots);

        let mut sb =
            Storyboard::new(self.duration).with(Tween::opacity(request.to, 0.0, 1.0, self.easing_in));
        slots.set_axis_offset(request.to, 0.0);
        slots.set_paint_order(request.to, PaintOrder::Front);
        if let Some(from) = request.from.filter(|&f| f != request.to) {
            slots.set_axis_offset(from, 0.0);
            slots.set_paint_order(from, PaintOrder::Back);
            sb.push(Tween::opacity(from, 1.0, 0.0, self.easing_out));
        }
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slots::SlotBuffer;

    #[test]
    fn cross_fades_opacity() {
        let mut slots = SlotBuffer::new();
        slots.set_slot_count(2);
        let mut fade = FadeTransition::default();
        let request = TransitionRequest {
            ticket: TransitionTicket(1),
            from: Some(0),
            to: 1,
            forward: false,
            distance: 100.0,
        };
        fade.run(&mut slots, request).expect("run");
        assert_eq!(slots.get(1).map(|s| s.opacity), Some(0.0));
        assert_eq!(slots.get(0).map(|s| s.opacity), Some(1.0));

        assert!(fade.advance(0.175, &mut slots).is_none());
        let mid_in = slots.get(1).map(|s| s.opacity).unwrap_or_default();
        let mid_out = slots.get(0).map(|s| s.opacity).unwrap_or_default();
        assert!(mid_in > 0.0 && mid_in < 1.0);
        assert!(mid_out > 0.0 && mid_out < 1.0);

        assert_eq!(fade.advance(1.0, &mut slots), Some(TransitionTicket(1)));
        assert_eq!(slots.visible_slots(), vec![1]);
    }

    #[test]
    fn cancel_settles_without_completion() {
        let mut slots = SlotBuffer::new();
        slots.set_slot_count(2);
        let mut fade = FadeTransition::new(1.0);
        let request = TransitionRequest {
            ticket: TransitionTicket(2),
            from: Some(1),
            to: 0,
            forward: true,
            distance: 0.0,
        };
        fade.run(&mut slots, request).expect("run");
        fade.cancel(&mut slots);
        assert_eq!(slots.visible_slots(), vec![0]);
        assert_eq!(fade.advance(2.0, &mut slots), None);
    }
}
