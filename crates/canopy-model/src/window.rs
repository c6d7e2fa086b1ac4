//! Bounded prefix window over an observable collection.
//!
//! [`PrefixWindow`] owns a source [`ObservableVec`] and a derived collection
//! that always holds the first [`TOP_ITEMS_CAPACITY`] elements of the source.
//! The derived collection is patched from each [`CollectionChange`] the source
//! emits instead of being rebuilt, so an edit costs O(capacity) at most,
//! whatever the length of the source. Only `Reset` refills from scratch.
//!
//! List views bind to the window rather than to the full source. Twelve
//! entries divide evenly into 1, 2, 3, 4 or 6 grid rows.
//!
//! # Invariants
//!
//! 1. After every source edit returns, `window == source[..min(K, len)]`.
//! 2. Only the change handler edits the window; callers get a
//!    [`ReadOnlyVec`].
//! 3. Edits at or past the horizon (index `K`) leave the window untouched.

use canopy_runtime::{CollectionChange, ObservableVec, ReadOnlyVec, Subscription};

/// Capacity of every group's top-items window.
pub const TOP_ITEMS_CAPACITY: usize = 12;

const K: usize = TOP_ITEMS_CAPACITY;

/// A source collection plus its incrementally maintained prefix window.
pub struct PrefixWindow<T> {
    source: ObservableVec<T>,
    window: ObservableVec<T>,
    _sync: Subscription,
}

impl<T: Clone + 'static> PrefixWindow<T> {
    /// Window over a new, empty source.
    ///
    /// The window's handler is the source's first subscriber, so every other
    /// listener observes an already patched window.
    #[must_use]
    pub fn new() -> Self {
        let source = ObservableVec::new();
        let window = ObservableVec::new();
        let sync = {
            let source_ref = source.clone();
            let window_ref = window.clone();
            source.subscribe(move |change| apply_change(&source_ref, &window_ref, change))
        };
        Self {
            source,
            window,
            _sync: sync,
        }
    }

    /// The editable source collection.
    #[must_use]
    pub fn source(&self) -> &ObservableVec<T> {
        &self.source
    }

    /// Read-only view of the window.
    #[must_use]
    pub fn window(&self) -> ReadOnlyVec<T> {
        self.window.read_only()
    }
}

impl<T: Clone + 'static> Default for PrefixWindow<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for PrefixWindow<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrefixWindow")
            .field("source", &self.source)
            .field("window", &self.window)
            .finish_non_exhaustive()
    }
}

fn prefix<T: Clone + 'static>(source: &ObservableVec<T>) -> Vec<T> {
    source.with(|items| items.iter().take(K).cloned().collect())
}

/// Patch `window` after `change` was applied to `source`.
fn apply_change<T: Clone + 'static>(
    source: &ObservableVec<T>,
    window: &ObservableVec<T>,
    change: &CollectionChange<T>,
) {
    match change {
        CollectionChange::Inserted { index, value } => {
            if *index < K {
                trace_patch(change, *index);
                window.insert(*index, value.clone());
                evict_overflow(window);
            }
        }
        CollectionChange::Moved { from, to, value } => match (*from < K, *to < K) {
            (true, true) => {
                trace_patch(change, *from);
                window.move_item(*from, *to);
            }
            (true, false) => {
                trace_patch(change, *from);
                window.remove(*from);
                backfill(source, window);
            }
            (false, true) => {
                trace_patch(change, *to);
                window.insert(*to, value.clone());
                evict_overflow(window);
            }
            (false, false) => {}
        },
        CollectionChange::Removed { index, .. } => {
            if *index < K {
                trace_patch(change, *index);
                window.remove(*index);
                backfill(source, window);
            }
        }
        CollectionChange::Replaced { index, new, .. } => {
            if *index < K {
                trace_patch(change, *index);
                window.replace(*index, new.clone());
            }
        }
        CollectionChange::Reset => {
            let refill = prefix(source);
            tracing::debug!(
                target: "canopy::window",
                len = refill.len(),
                "window reset"
            );
            window.reset(refill);
        }
    }
}

/// Drop the element pushed past the last slot.
fn evict_overflow<T: Clone + 'static>(window: &ObservableVec<T>) {
    if window.len() > K {
        window.remove(K);
    }
}

/// Append the element that slid into the last slot, if the source has one.
fn backfill<T: Clone + 'static>(source: &ObservableVec<T>, window: &ObservableVec<T>) {
    if let Some(next) = source.get(K - 1) {
        window.push(next);
    }
}

fn trace_patch<T>(change: &CollectionChange<T>, index: usize) {
    tracing::trace!(
        target: "canopy::window",
        kind = change.kind(),
        index,
        "patching window"
    );
}
