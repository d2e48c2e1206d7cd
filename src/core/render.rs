//! Render targets and their subscriptions
//!
//! The core never draws anything. It hands view-models to whatever targets
//! are subscribed: a map widget and a results list. Targets are registered
//! once and revoked by id.

use crate::core::facility::Coordinate;
use crate::core::projection::{MarkerDescriptor, ResultsList};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A map widget able to draw markers and move its viewport
pub trait MapRenderTarget: Send {
    /// Discard every facility marker from the previous pass
    fn clear_markers(&mut self);

    /// Draw one marker with its category style and optional newest emphasis
    fn add_marker(&mut self, marker: &MarkerDescriptor);

    /// Open the info panel attached to a marker
    fn open_info_panel(&mut self, marker: &MarkerDescriptor);

    /// Center and zoom the viewport
    fn set_view(&mut self, center: Coordinate, zoom: u8);

    /// Place or move the user's own position marker
    fn show_user_location(&mut self, _position: Coordinate) {}
}

/// A results panel showing list items and the result count
pub trait ListRenderTarget: Send {
    /// Replace the displayed list
    fn render_list(&mut self, list: &ResultsList);

    /// Replace the displayed result count
    fn render_count(&mut self, count: usize);
}

/// Handle identifying a registered render target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Registered targets of one kind, in subscription order
pub struct Subscriptions<T: ?Sized> {
    entries: Vec<(SubscriptionId, Box<T>)>,
}

impl<T: ?Sized> Subscriptions<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn add(&mut self, target: Box<T>) -> SubscriptionId {
        let id = SubscriptionId::new();
        self.entries.push((id, target));
        id
    }

    /// Revoke a subscription. Returns false for unknown ids.
    pub fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.entries.iter_mut().map(|(_, target)| target.as_mut())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: ?Sized> Default for Subscriptions<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingList {
        counts: Vec<usize>,
    }

    impl ListRenderTarget for CountingList {
        fn render_list(&mut self, _list: &ResultsList) {}

        fn render_count(&mut self, count: usize) {
            self.counts.push(count);
        }
    }

    #[test]
    fn test_subscriptions_add_and_remove() {
        let mut subs: Subscriptions<dyn ListRenderTarget> = Subscriptions::new();
        let first = subs.add(Box::new(CountingList::default()));
        let second = subs.add(Box::new(CountingList::default()));

        assert_eq!(subs.len(), 2);
        assert_ne!(first, second);

        for target in subs.iter_mut() {
            target.render_count(3);
        }

        assert!(subs.remove(first));
        assert!(!subs.remove(first));
        assert_eq!(subs.len(), 1);
        assert!(subs.remove(second));
        assert!(subs.is_empty());
    }
}
