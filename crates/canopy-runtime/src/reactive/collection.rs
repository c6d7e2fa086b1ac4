#![forbid(unsafe_code)]

//! Ordered collection that reports every structural edit.
//!
//! [`ObservableVec<T>`] is a shared handle (`Rc<RefCell<Vec<T>>>` plus a
//! [`Notifier`]). Each editing operation validates its indices, applies the
//! edit, releases the borrow and then emits exactly one
//! [`CollectionChange`] describing what happened.
//!
//! # Usage
//!
//! ```
//! use canopy_runtime::ObservableVec;
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let items: ObservableVec<&str> = ObservableVec::new();
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let log = Rc::clone(&seen);
//! let _sub = items.subscribe(move |change| log.borrow_mut().push(change.kind()));
//!
//! items.push("a");
//! items.push("b");
//! items.move_item(1, 0);
//! assert_eq!(items.to_vec(), vec!["b", "a"]);
//! assert_eq!(*seen.borrow(), vec!["insert", "insert", "move"]);
//! ```
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Out-of-range index | Caller bug | Panics (`insert`, `remove`, ...) or returns [`CollectionError`] (`try_*`) |
//! | Subscriber panics | Callback bug | Propagates; the edit itself is already applied |

use std::cell::RefCell;
use std::rc::Rc;

use super::notifier::{Notifier, Subscription};

/// A structural edit applied to an [`ObservableVec`].
///
/// Indices refer to the collection state after the edit for `Inserted` and
/// `Moved::to`, and before the edit for `Removed` and `Moved::from`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionChange<T> {
    /// `value` now lives at `index`; later elements shifted right.
    Inserted { index: usize, value: T },
    /// `value` was taken out at `from` and reinserted at `to`.
    Moved { from: usize, to: usize, value: T },
    /// `value` was taken out at `index`; later elements shifted left.
    Removed { index: usize, value: T },
    /// The element at `index` was swapped in place.
    Replaced { index: usize, old: T, new: T },
    /// The whole content changed (cleared or bulk-replaced).
    Reset,
}

impl<T> CollectionChange<T> {
    /// Short, stable name of the change kind (for logs).
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Inserted { .. } => "insert",
            Self::Moved { .. } => "move",
            Self::Removed { .. } => "remove",
            Self::Replaced { .. } => "replace",
            Self::Reset => "reset",
        }
    }
}

/// Errors from checked collection edits.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CollectionError {
    #[error("{operation}: index {index} out of bounds for length {len}")]
    IndexOutOfBounds {
        operation: &'static str,
        index: usize,
        len: usize,
    },
}

fn check_index(operation: &'static str, index: usize, len: usize) -> Result<(), CollectionError> {
    if index < len {
        Ok(())
    } else {
        Err(CollectionError::IndexOutOfBounds {
            operation,
            index,
            len,
        })
    }
}

/// Shared, observable, ordered collection.
///
/// Cloning yields another handle to the same storage and subscriber list.
pub struct ObservableVec<T> {
    items: Rc<RefCell<Vec<T>>>,
    changes: Notifier<CollectionChange<T>>,
}

impl<T> Clone for ObservableVec<T> {
    fn clone(&self) -> Self {
        Self {
            items: Rc::clone(&self.items),
            changes: self.changes.clone(),
        }
    }
}

impl<T: Clone + 'static> Default for ObservableVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for ObservableVec<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObservableVec")
            .field("items", &*self.items.borrow())
            .field("subscribers", &self.changes.subscriber_count())
            .finish()
    }
}

impl<T: Clone + 'static> ObservableVec<T> {
    /// Create an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: Rc::new(RefCell::new(Vec::new())),
            changes: Notifier::new(),
        }
    }

    /// Create a collection holding `items`. Nothing is emitted.
    #[must_use]
    pub fn from_vec(items: Vec<T>) -> Self {
        Self {
            items: Rc::new(RefCell::new(items)),
            changes: Notifier::new(),
        }
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    /// Whether the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    /// Clone of the element at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<T> {
        self.items.borrow().get(index).cloned()
    }

    /// Snapshot of the current content.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.items.borrow().clone()
    }

    /// Run `f` against the current content without cloning it.
    ///
    /// `f` must not edit this collection.
    pub fn with<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        let items = self.items.borrow();
        f(items.as_slice())
    }

    /// Whether both handles point at the same storage.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.items, &other.items)
    }

    /// Register a structural-change handler.
    pub fn subscribe(&self, callback: impl Fn(&CollectionChange<T>) + 'static) -> Subscription {
        self.changes.subscribe(callback)
    }

    /// Read-only view sharing this collection's storage and notifier.
    #[must_use]
    pub fn read_only(&self) -> ReadOnlyVec<T> {
        ReadOnlyVec {
            inner: self.clone(),
        }
    }

    /// Append `value`.
    pub fn push(&self, value: T) {
        let index = {
            let mut items = self.items.borrow_mut();
            items.push(value.clone());
            items.len() - 1
        };
        self.notify(CollectionChange::Inserted { index, value });
    }

    /// Insert `value` at `index` (`index == len` appends).
    pub fn try_insert(&self, index: usize, value: T) -> Result<(), CollectionError> {
        {
            let mut items = self.items.borrow_mut();
            if index > items.len() {
                return Err(CollectionError::IndexOutOfBounds {
                    operation: "insert",
                    index,
                    len: items.len(),
                });
            }
            items.insert(index, value.clone());
        }
        self.notify(CollectionChange::Inserted { index, value });
        Ok(())
    }

    /// Insert `value` at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    #[track_caller]
    pub fn insert(&self, index: usize, value: T) {
        if let Err(err) = self.try_insert(index, value) {
            panic!("{err}");
        }
    }

    /// Relocate the element at `from` so it ends up at `to`.
    pub fn try_move_item(&self, from: usize, to: usize) -> Result<(), CollectionError> {
        let value = {
            let mut items = self.items.borrow_mut();
            check_index("move", from, items.len())?;
            check_index("move", to, items.len())?;
            let value = items.remove(from);
            items.insert(to, value.clone());
            value
        };
        self.notify(CollectionChange::Moved { from, to, value });
        Ok(())
    }

    /// Relocate the element at `from` so it ends up at `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is `>= len`.
    #[track_caller]
    pub fn move_item(&self, from: usize, to: usize) {
        if let Err(err) = self.try_move_item(from, to) {
            panic!("{err}");
        }
    }

    /// Remove and return the element at `index`.
    pub fn try_remove(&self, index: usize) -> Result<T, CollectionError> {
        let value = {
            let mut items = self.items.borrow_mut();
            check_index("remove", index, items.len())?;
            items.remove(index)
        };
        self.notify(CollectionChange::Removed {
            index,
            value: value.clone(),
        });
        Ok(value)
    }

    /// Remove and return the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    #[track_caller]
    pub fn remove(&self, index: usize) -> T {
        match self.try_remove(index) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }

    /// Swap the element at `index` for `value`, returning the old one.
    pub fn try_replace(&self, index: usize, value: T) -> Result<T, CollectionError> {
        let old = {
            let mut items = self.items.borrow_mut();
            check_index("replace", index, items.len())?;
            std::mem::replace(&mut items[index], value.clone())
        };
        self.notify(CollectionChange::Replaced {
            index,
            old: old.clone(),
            new: value,
        });
        Ok(old)
    }

    /// Swap the element at `index` for `value`, returning the old one.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    #[track_caller]
    pub fn replace(&self, index: usize, value: T) -> T {
        match self.try_replace(index, value) {
            Ok(old) => old,
            Err(err) => panic!("{err}"),
        }
    }

    /// Replace the whole content and emit a single `Reset`.
    pub fn reset(&self, contents: impl IntoIterator<Item = T>) {
        {
            let mut items = self.items.borrow_mut();
            items.clear();
            items.extend(contents);
        }
        self.notify(CollectionChange::Reset);
    }

    /// Remove everything and emit `Reset`.
    pub fn clear(&self) {
        self.items.borrow_mut().clear();
        self.notify(CollectionChange::Reset);
    }

    fn notify(&self, change: CollectionChange<T>) {
        tracing::trace!(
            target: "canopy::collection",
            kind = change.kind(),
            len = self.len(),
            "collection changed"
        );
        self.changes.emit(&change);
    }
}

/// Read-only handle onto an [`ObservableVec`].
///
/// Holders can read and subscribe, but only the owner of the underlying
/// `ObservableVec` can edit it.
pub struct ReadOnlyVec<T> {
    inner: ObservableVec<T>,
}

impl<T> Clone for ReadOnlyVec<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for ReadOnlyVec<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ReadOnlyVec")
            .field(&*self.inner.items.borrow())
            .finish()
    }
}

impl<T: Clone + 'static> ReadOnlyVec<T> {
    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Clone of the element at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<T> {
        self.inner.get(index)
    }

    /// Snapshot of the current content.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.inner.to_vec()
    }

    /// Run `f` against the current content without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        self.inner.with(f)
    }

    /// Register a structural-change handler.
    pub fn subscribe(&self, callback: impl Fn(&CollectionChange<T>) + 'static) -> Subscription {
        self.inner.subscribe(callback)
    }
}
