//! Slot capability: the only view the engine has of rendered items.
//!
//! A slot is addressed by the index of the item it presents. The engine
//! writes three properties (axis offset, opacity, paint order) and reads back
//! the axis offset only to continue an interrupted drag.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaintOrder {
    #[default]
    Back,
    Front,
}

/// Renderer-facing slot operations.
pub trait SlotHost {
    fn set_axis_offset(&mut self, slot: usize, value: f32);

    fn axis_offset(&self, slot: usize) -> f32;

    fn set_opacity(&mut self, slot: usize, value: f32);

    fn set_paint_order(&mut self, slot: usize, order: PaintOrder);

    /// Called when the collection is rebuilt so the host can (re)materialise slots.
    fn set_slot_count(&mut self, _count: usize) {}
}

/// Visual properties of one slot.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SlotVisual {
    pub offset: f32,
    pub opacity: f32,
    pub order: PaintOrder,
}

impl Default for SlotVisual {
    fn default() -> Self {
        Self {
            offset: 0.0,
            opacity: 0.0,
            order: PaintOrder::Back,
        }
    }
}

impl SlotVisual {
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }
}

/// In-memory slot host. Hosts without a retained scene graph can read this
/// after each `Carousel::update` and draw from it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SlotBuffer {
    slots: Vec<SlotVisual>,
}

impl SlotBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: usize) -> Option<&SlotVisual> {
        self.slots.get(slot)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Indices of slots that currently draw anything.
    pub fn visible_slots(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.is_visible().then_some(i))
            .collect()
    }
}

impl SlotHost for SlotBuffer {
    fn set_axis_offset(&mut self, slot: usize, value: f32) {
        if let Some(s) = self.slots.get_mut(slot) {
            s.offset = value;
        }
    }

    fn axis_offset(&self, slot: usize) -> f32 {
        self.slots.get(slot).map(|s| s.offset).unwrap_or(0.0)
    }

    fn set_opacity(&mut self, slot: usize, value: f32) {
        if let Some(s) = self.slots.get_mut(slot) {
            s.opacity = value;
        }
    }

    fn set_paint_order(&mut self, slot: usize, order: PaintOrder) {
        if let Some(s) = self.slots.get_mut(slot) {
            s.order = order;
        }
    }

    fn set_slot_count(&mut self, count: usize) {
        self.slots.clear();
        self.slots.resize(count, SlotVisual::default());
    }
}

/// Rest state: only `visible` is shown, in front, and every offset is zero.
pub fn settle_visibility(slots: &mut dyn SlotHost, item_count: usize, visible: Option<usize>) {
    for i in 0..item_count {
        let shown = Some(i) == visible;
        slots.set_opacity(i, if shown { 1.0 } else { 0.0 });
        slots.set_paint_order(i, if shown { PaintOrder::Front } else { PaintOrder::Back });
        slots.set_axis_offset(i, 0.0);
    }
}

/// Terminal state of a handoff: `to` placed and fully visible in front,
/// `from` hidden behind it.
pub fn finalize_handoff(slots: &mut dyn SlotHost, from: Option<usize>, to: usize) {
    if let Some(from) = from.filter(|&f| f != to) {
        slots.set_opacity(from, 0.0);
        slots.set_paint_order(from, PaintOrder::Back);
        slots.set_axis_offset(from, 0.0);
    }
    slots.set_opacity(to, 1.0);
    slots.set_paint_order(to, PaintOrder::Front);
    slots.set_axis_offset(to, 0.0);
}
