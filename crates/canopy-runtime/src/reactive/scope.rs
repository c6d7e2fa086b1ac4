#![forbid(unsafe_code)]

//! Lifetime management for a consumer's subscriptions.
//!
//! A rendering surface typically watches several channels at once (an entity's
//! property changes, a group's window, the catalog's group list). A
//! [`BindingScope`] collects those [`Subscription`]s so they are released
//! together when the consumer goes away.
//!
//! # Usage
//!
//! ```
//! use canopy_runtime::{BindingScope, ObservableVec};
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let items: ObservableVec<u32> = ObservableVec::new();
//! let edits = Rc::new(Cell::new(0));
//!
//! let mut scope = BindingScope::new();
//! let counter = Rc::clone(&edits);
//! scope.watch(&items, move |_| counter.set(counter.get() + 1));
//!
//! items.push(1);
//! drop(scope);
//! items.push(2);
//! assert_eq!(edits.get(), 1);
//! ```
//!
//! # Invariants
//!
//! 1. After drop, no callback registered through this scope fires.
//! 2. `clear()` releases every subscription; the scope stays usable.
//! 3. `binding_count()` equals the number of held subscriptions.

use super::collection::{CollectionChange, ObservableVec, ReadOnlyVec};
use super::notifier::{Notifier, Subscription};

/// Holds subscriptions for one logical consumer.
pub struct BindingScope {
    subscriptions: Vec<Subscription>,
}

impl BindingScope {
    /// Create an empty scope.
    #[must_use]
    pub fn new() -> Self {
        Self {
            subscriptions: Vec::new(),
        }
    }

    /// Keep `sub` alive until the scope is dropped or cleared.
    pub fn hold(&mut self, sub: Subscription) {
        self.subscriptions.push(sub);
    }

    /// Subscribe to a notifier within this scope.
    pub fn listen<E: 'static>(
        &mut self,
        source: &Notifier<E>,
        callback: impl Fn(&E) + 'static,
    ) -> &mut Self {
        self.subscriptions.push(source.subscribe(callback));
        self
    }

    /// Subscribe to a collection's structural changes within this scope.
    pub fn watch<T: Clone + 'static>(
        &mut self,
        source: &ObservableVec<T>,
        callback: impl Fn(&CollectionChange<T>) + 'static,
    ) -> &mut Self {
        self.subscriptions.push(source.subscribe(callback));
        self
    }

    /// Subscribe to a read-only collection view within this scope.
    pub fn watch_view<T: Clone + 'static>(
        &mut self,
        source: &ReadOnlyVec<T>,
        callback: impl Fn(&CollectionChange<T>) + 'static,
    ) -> &mut Self {
        self.subscriptions.push(source.subscribe(callback));
        self
    }

    /// Number of held subscriptions.
    #[must_use]
    pub fn binding_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Whether the scope holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Release every subscription now.
    pub fn clear(&mut self) {
        self.subscriptions.clear();
    }
}

impl Default for BindingScope {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for BindingScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BindingScope")
            .field("binding_count", &self.subscriptions.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn scope_drop_releases_everything() {
        let notifier = Notifier::<u8>::new();
        let items: ObservableVec<u8> = ObservableVec::new();
        let hits = Rc::new(Cell::new(0));

        {
            let mut scope = BindingScope::new();
            let h1 = Rc::clone(&hits);
            let h2 = Rc::clone(&hits);
            scope
                .listen(&notifier, move |_| h1.set(h1.get() + 1))
                .watch(&items, move |_| h2.set(h2.get() + 1));
            assert_eq!(scope.binding_count(), 2);

            notifier.emit(&0);
            items.push(0);
            assert_eq!(hits.get(), 2);
        }

        notifier.emit(&0);
        items.push(0);
        assert_eq!(hits.get(), 2, "no callback fires after the scope drops");
        assert_eq!(notifier.subscriber_count(), 0);
    }

    #[test]
    fn clear_keeps_scope_reusable() {
        let items: ObservableVec<u8> = ObservableVec::new();
        let view = items.read_only();
        let first = Rc::new(Cell::new(false));
        let second = Rc::new(Cell::new(false));

        let mut scope = BindingScope::new();
        let f = Rc::clone(&first);
        scope.watch_view(&view, move |_| f.set(true));
        scope.clear();
        assert!(scope.is_empty());

        let s = Rc::clone(&second);
        scope.watch_view(&view, move |_| s.set(true));
        items.push(1);

        assert!(!first.get());
        assert!(second.get());
    }

    #[test]
    fn hold_keeps_external_subscription() {
        let notifier = Notifier::<u8>::new();
        let seen = Rc::new(Cell::new(0));

        let mut scope = BindingScope::new();
        let s = Rc::clone(&seen);
        scope.hold(notifier.subscribe(move |v| s.set(*v)));
        notifier.emit(&5);
        assert_eq!(seen.get(), 5);

        drop(scope);
        notifier.emit(&9);
        assert_eq!(seen.get(), 5);
    }

    #[test]
    fn debug_format() {
        let notifier = Notifier::<u8>::new();
        let mut scope = BindingScope::new();
        scope.listen(&notifier, |_| {}).listen(&notifier, |_| {});
        assert!(format!("{scope:?}").contains("binding_count: 2"));
    }
}
