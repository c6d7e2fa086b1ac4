#![forbid(unsafe_code)]

//! Change-notification runtime for Canopy.
//!
//! Everything in this crate is single-threaded: shared state lives behind
//! `Rc<RefCell<..>>` and notifications are delivered synchronously on the
//! caller's stack, so a mutation has been fully observed by the time the
//! mutating call returns.

pub mod reactive;

pub use reactive::{
    BindingScope, CollectionChange, CollectionError, Notifier, ObservableVec, ReadOnlyVec,
    Subscription,
};
