// Copyright 2026 the Glyph Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Synchronous eviction notification.

use alloc::boxed::Box;
use core::fmt;

use hashbrown::HashMap;

use crate::locator::CellLocator;

/// Handle identifying a registered eviction listener.
///
/// Returned by [`EvictionNotifier::subscribe`] and required to unsubscribe;
/// there is no implicit lifetime coupling between the notifier and listener
/// owners.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ListenerId(u64);

type EvictionHandler = Box<dyn FnMut(CellLocator)>;

/// Registry of listeners told about cell evictions as they happen.
///
/// External indexes that key their own entries on [`CellLocator`]s can
/// subscribe here and drop stale entries proactively instead of waiting for
/// a lazy generation mismatch on their next lookup. Delivery is synchronous:
/// when [`Cell::reset_rects`](crate::Cell::reset_rects) returns, every
/// listener has already seen the retired locator, so none can observe the
/// old generation as still current afterwards.
///
/// Handlers must not re-enter the atlas (no inserting or evicting from
/// inside a handler). Delivery order across listeners is unspecified.
#[derive(Default)]
pub struct EvictionNotifier {
    listeners: HashMap<ListenerId, EvictionHandler>,
    next_id: u64,
}

impl EvictionNotifier {
    /// Creates an empty notifier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener, returning the handle needed to remove it.
    pub fn subscribe(&mut self, handler: impl FnMut(CellLocator) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.insert(id, Box::new(handler));
        id
    }

    /// Removes a listener. Returns false (and does nothing) if the handle is
    /// not currently registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(&id).is_some()
    }

    /// Delivers `retired` to every currently registered listener, each
    /// exactly once.
    ///
    /// Invoked by a cell completing its eviction; `retired` is the locator
    /// being retired, not the cell's new one.
    pub fn notify_evicted(&mut self, retired: CellLocator) {
        log::trace!(
            "notifying {} listener(s) of evicted cell {:?}",
            self.listeners.len(),
            retired
        );
        for handler in self.listeners.values_mut() {
            handler(retired);
        }
    }

    /// The number of registered listeners.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Whether no listeners are registered.
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl fmt::Debug for EvictionNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvictionNotifier")
            .field("listeners", &self.listeners.len())
            .field("next_id", &self.next_id)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    #[test]
    fn each_listener_fires_exactly_once() {
        let mut notifier = EvictionNotifier::new();
        let seen: Rc<RefCell<Vec<(usize, CellLocator)>>> = Rc::default();
        for listener in 0..3 {
            let seen = Rc::clone(&seen);
            notifier.subscribe(move |locator| seen.borrow_mut().push((listener, locator)));
        }

        let retired = CellLocator::new(1, 4, 9).unwrap();
        notifier.notify_evicted(retired);

        let mut seen = seen.borrow_mut();
        seen.sort_by_key(|(listener, _)| *listener);
        assert_eq!(seen.len(), 3);
        for (listener, (index, locator)) in seen.iter().enumerate() {
            assert_eq!(listener, *index);
            assert_eq!(*locator, retired);
        }
    }

    #[test]
    fn unsubscribed_listeners_are_skipped() {
        let mut notifier = EvictionNotifier::new();
        let count = Rc::new(RefCell::new(0));

        let counted = Rc::clone(&count);
        let keep = notifier.subscribe(move |_| *counted.borrow_mut() += 1);
        let drop_me = notifier.subscribe(|_| panic!("should have been unsubscribed"));

        assert!(notifier.unsubscribe(drop_me));
        notifier.notify_evicted(CellLocator::new(0, 1, 2).unwrap());
        assert_eq!(*count.borrow(), 1);

        assert!(notifier.unsubscribe(keep));
        assert!(notifier.is_empty());
    }

    #[test]
    fn unsubscribing_twice_is_a_noop() {
        let mut notifier = EvictionNotifier::new();
        let id = notifier.subscribe(|_| {});
        assert!(notifier.unsubscribe(id));
        assert!(!notifier.unsubscribe(id));
    }

    #[test]
    fn notify_with_no_listeners_is_fine() {
        let mut notifier = EvictionNotifier::new();
        notifier.notify_evicted(CellLocator::new(0, 0, 5).unwrap());
    }
}
