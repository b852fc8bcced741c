//! Canonical selection state and the index-wrap rule.

use serde::{Deserialize, Serialize};

/// Visual direction of a navigation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    #[inline]
    pub fn from_forward(forward: bool) -> Self {
        if forward {
            Self::Forward
        } else {
            Self::Backward
        }
    }

    #[inline]
    pub fn is_forward(&self) -> bool {
        matches!(self, Self::Forward)
    }
}

/// Snapshot of the controller's state.
///
/// `selected_index` is `-1` exactly when `item_count` is zero.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarouselState {
    pub selected_index: i32,
    pub item_count: usize,
    pub is_looping: bool,
    pub is_transitioning: bool,
    pub is_manipulating: bool,
}

impl Default for CarouselState {
    fn default() -> Self {
        Self {
            selected_index: -1,
            item_count: 0,
            is_looping: true,
            is_transitioning: false,
            is_manipulating: false,
        }
    }
}

impl CarouselState {
    /// Check the structural invariants. Used by tests and debug assertions.
    pub fn check_invariants(&self) -> Result<(), String> {
        if self.selected_index < -1 || self.selected_index >= self.item_count as i32 {
            return Err(format!(
                "selected_index {} outside [-1, {})",
                self.selected_index, self.item_count
            ));
        }
        if (self.selected_index == -1) != (self.item_count == 0) {
            return Err(format!(
                "selected_index {} inconsistent with item_count {}",
                self.selected_index, self.item_count
            ));
        }
        if self.is_transitioning && self.is_manipulating {
            return Err("transitioning and manipulating at the same time".into());
        }
        Ok(())
    }
}

/// One validated navigation, alive only while its transition is being set up.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct NavigationRequest {
    pub previous_index: Option<usize>,
    pub target_index: usize,
    pub animate: bool,
    pub direction: Direction,
}

impl NavigationRequest {
    /// Derive the direction for a move from `previous` to `target`.
    ///
    /// Wrapping from the last item to the first counts as forward when looping,
    /// so the visual motion matches the user's intent.
    pub fn new(
        previous: Option<usize>,
        target: usize,
        animate: bool,
        item_count: usize,
        looping: bool,
    ) -> Self {
        let forward = match previous {
            None => true,
            Some(prev) => {
                target > prev || (looping && prev + 1 == item_count && target == 0)
            }
        };
        Self {
            previous_index: previous,
            target_index: target,
            animate,
            direction: Direction::from_forward(forward),
        }
    }
}

/// Resolve a raw candidate index against the collection.
///
/// In range: returned unchanged. Out of range without looping: `None`.
/// Below zero with looping: the last index. Past the end with looping: zero.
pub fn wrap_index(candidate: i64, item_count: usize, looping: bool) -> Option<usize> {
    if item_count == 0 {
        return None;
    }
    if candidate >= 0 && (candidate as usize) < item_count {
        return Some(candidate as usize);
    }
    if !looping {
        return None;
    }
    if candidate < 0 {
        Some(item_count - 1)
    } else {
        Some(0)
    }
}
