#![forbid(unsafe_code)]

//! Reactive collections and notification channels.
//!
//! This module provides the change-tracking primitives the content model is
//! built on:
//!
//! - [`Notifier`]: a publish/subscribe channel delivering `&E` events to every
//!   live subscriber, synchronously and in registration order.
//! - [`Subscription`]: RAII guard that unsubscribes on drop.
//! - [`ObservableVec`]: an ordered, shared collection that describes every
//!   structural edit as a [`CollectionChange`] on its own notifier.
//! - [`ReadOnlyVec`]: a read-and-subscribe view of an `ObservableVec`, used
//!   for derived collections that only their owner may edit.
//! - [`BindingScope`]: holds a consumer's subscriptions and releases them
//!   together.
//!
//! # Architecture
//!
//! Subscribers are stored as `Weak` callbacks; the strong reference lives in
//! the [`Subscription`] returned to the caller. Dead entries are pruned
//! lazily on the next emission.
//!
//! # Invariants
//!
//! 1. Subscribers are notified in registration order.
//! 2. A mutation is applied, and every internal borrow released, before any
//!    subscriber runs. Subscribers may read the collection that notified
//!    them but must not edit it: a nested edit reaches later subscribers
//!    before the change that triggered it.
//! 3. Dropping a [`Subscription`] removes the callback before the next
//!    notification cycle.
//! 4. Out-of-range indices are rejected before the collection is touched and
//!    before anything is emitted.

pub mod collection;
pub mod notifier;
pub mod scope;

pub use collection::{CollectionChange, CollectionError, ObservableVec, ReadOnlyVec};
pub use notifier::{Notifier, Subscription};
pub use scope::BindingScope;
