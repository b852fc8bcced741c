//! Items adapter: the collection the carousel pages through.
//!
//! The carousel never owns item semantics. It asks the adapter for a count and
//! for items by index, and is told about mutations through
//! `Carousel::items_changed` (or the `Carousel::mutate_items` helper, which
//! notifies automatically).

/// Read-only view over an ordered collection.
pub trait ItemsAdapter {
    type Item: Clone;

    fn count(&self) -> usize;

    fn item_at(&self, index: usize) -> Option<Self::Item>;

    /// Position of the first item equal to `item`.
    fn index_of(&self, item: &Self::Item) -> Option<usize>
    where
        Self::Item: PartialEq,
    {
        (0..self.count()).find(|&i| self.item_at(i).as_ref() == Some(item))
    }
}

/// Vec-backed adapter.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VecItems<T> {
    items: Vec<T>,
}

impl<T> VecItems<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn insert(&mut self, index: usize, item: T) {
        let index = index.min(self.items.len());
        self.items.insert(index, item);
    }

    pub fn remove(&mut self, index: usize) -> Option<T> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    pub fn truncate(&mut self, len: usize) {
        self.items.truncate(len);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn reset(&mut self, items: Vec<T>) {
        self.items = items;
    }
}

impl<T> From<Vec<T>> for VecItems<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}

impl<T: Clone> ItemsAdapter for VecItems<T> {
    type Item = T;

    #[inline]
    fn count(&self) -> usize {
        self.items.len()
    }

    #[inline]
    fn item_at(&self, index: usize) -> Option<T> {
        self.items.get(index).cloned()
    }

    fn index_of(&self, item: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.items.iter().position(|i| i == item)
    }
}
