#![forbid(unsafe_code)]

//! Single-threaded publish/subscribe channel.
//!
//! # Failure Modes
//!
//! - Subscriber panic: propagates to the caller of [`Notifier::emit`];
//!   subscribers registered after the panicking one are not called.
//! - Subscription dropped mid-emission: the callback still runs for the
//!   in-flight event (it was upgraded before delivery) and is pruned on the
//!   next one.

use std::any::Any;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Callback<E> = dyn Fn(&E);

struct NotifierInner<E> {
    subscribers: Vec<Weak<Callback<E>>>,
}

/// A shared event channel.
///
/// Cloning a `Notifier` yields another handle to the same subscriber list.
pub struct Notifier<E> {
    inner: Rc<RefCell<NotifierInner<E>>>,
}

impl<E> Clone for Notifier<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<E: 'static> Default for Notifier<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> std::fmt::Debug for Notifier<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl<E: 'static> Notifier<E> {
    /// Create a channel with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(NotifierInner {
                subscribers: Vec::new(),
            })),
        }
    }

    /// Register `callback`. It stays registered until the returned
    /// [`Subscription`] is dropped.
    pub fn subscribe(&self, callback: impl Fn(&E) + 'static) -> Subscription {
        let strong: Rc<Callback<E>> = Rc::new(callback);
        self.inner
            .borrow_mut()
            .subscribers
            .push(Rc::downgrade(&strong));
        Subscription {
            _callback: Box::new(strong),
        }
    }

    /// Deliver `event` to every live subscriber, in registration order.
    ///
    /// The subscriber list is snapshotted first, so callbacks may subscribe,
    /// unsubscribe, or emit on this channel without a borrow conflict.
    pub fn emit(&self, event: &E) {
        let live: Vec<Rc<Callback<E>>> = {
            let mut inner = self.inner.borrow_mut();
            inner.subscribers.retain(|weak| weak.strong_count() > 0);
            inner.subscribers.iter().filter_map(Weak::upgrade).collect()
        };
        for callback in live {
            callback(event);
        }
    }
}

impl<E> Notifier<E> {
    /// Number of subscribers whose [`Subscription`] is still alive.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner
            .borrow()
            .subscribers
            .iter()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }
}

/// RAII guard for a registered callback. Dropping it unsubscribes.
///
/// Type-erased so subscriptions to channels of different event types can be
/// held together (see [`BindingScope`](super::BindingScope)).
#[must_use = "dropping a Subscription unsubscribes its callback"]
pub struct Subscription {
    _callback: Box<dyn Any>,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}
