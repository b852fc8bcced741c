//! Discrete navigation input: button/keyboard intents.

use serde::{Deserialize, Serialize};

use crate::config::Orientation;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NavigationIntent {
    Previous,
    Next,
    First,
    Last,
    Index(usize),
}

/// Keys the carousel reacts to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
}

/// Map a key to an intent. Arrow keys only count on the carousel's own axis.
pub fn intent_for_key(key: Key, orientation: Orientation) -> Option<NavigationIntent> {
    match (key, orientation) {
        (Key::Left, Orientation::Horizontal) | (Key::Up, Orientation::Vertical) => {
            Some(NavigationIntent::Previous)
        }
        (Key::Right, Orientation::Horizontal) | (Key::Down, Orientation::Vertical) => {
            Some(NavigationIntent::Next)
        }
        (Key::Home, _) => Some(NavigationIntent::First),
        (Key::End, _) => Some(NavigationIntent::Last),
        _ => None,
    }
}
