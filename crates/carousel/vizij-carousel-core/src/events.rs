//! Selection notifications and their observer lists.
//!
//! Observers run synchronously, in registration order, on the thread that
//! drives the carousel.

use std::fmt;

/// Raised before a selection change. Setting `cancel` aborts the change.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectionChanging<T> {
    pub previous_item: Option<T>,
    pub new_item: Option<T>,
    pub cancel: bool,
}

/// Raised after a selection change was committed.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectionChanged<T> {
    pub previous_item: Option<T>,
    pub new_item: Option<T>,
    /// `-1` when nothing was selected.
    pub previous_index: i32,
    /// `-1` when the selection was cleared.
    pub new_index: i32,
}

type ChangingFn<T> = Box<dyn FnMut(&mut SelectionChanging<T>)>;
type ChangedFn<T> = Box<dyn FnMut(&SelectionChanged<T>)>;

pub struct Observers<T> {
    changing: Vec<ChangingFn<T>>,
    changed: Vec<ChangedFn<T>>,
}

impl<T> Default for Observers<T> {
    fn default() -> Self {
        Self {
            changing: Vec::new(),
            changed: Vec::new(),
        }
    }
}

impl<T> fmt::Debug for Observers<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("changing", &self.changing.len())
            .field("changed", &self.changed.len())
            .finish()
    }
}

impl<T> Observers<T> {
    pub fn on_changing(&mut self, f: impl FnMut(&mut SelectionChanging<T>) + 'static) {
        self.changing.push(Box::new(f));
    }

    pub fn on_changed(&mut self, f: impl FnMut(&SelectionChanged<T>) + 'static) {
        self.changed.push(Box::new(f));
    }

    /// Returns true when some observer cancelled.
    pub fn raise_changing(&mut self, args: &mut SelectionChanging<T>) -> bool {
        for f in self.changing.iter_mut() {
            f(args);
        }
        args.cancel
    }

    pub fn raise_changed(&mut self, args: &SelectionChanged<T>) {
        for f in self.changed.iter_mut() {
            f(args);
        }
    }
}
