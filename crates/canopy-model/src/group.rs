//! Groups: entities owning an item list plus its top-items window.

use std::fmt;
use std::rc::{Rc, Weak};

use canopy_runtime::{ObservableVec, ReadOnlyVec};

use crate::entity::{Entity, EntityCore, EntityFields};
use crate::image::ImageResolver;
use crate::item::Item;
use crate::window::PrefixWindow;

pub(crate) struct GroupInner {
    core: EntityCore,
    items: PrefixWindow<Item>,
}

/// Shared handle to a group.
///
/// Clones refer to the same group; equality is identity.
#[derive(Clone)]
pub struct Group {
    inner: Rc<GroupInner>,
}

impl Group {
    /// Create a group with no items.
    #[must_use]
    pub fn new(fields: EntityFields, resolver: Rc<dyn ImageResolver>) -> Self {
        Self {
            inner: Rc::new(GroupInner {
                core: EntityCore::new(fields, resolver),
                items: PrefixWindow::new(),
            }),
        }
    }

    /// The group's items. Edits here are mirrored into
    /// [`top_items`](Self::top_items) before the editing call returns.
    #[must_use]
    pub fn items(&self) -> &ObservableVec<Item> {
        self.inner.items.source()
    }

    /// The first [`TOP_ITEMS_CAPACITY`](crate::TOP_ITEMS_CAPACITY) items.
    #[must_use]
    pub fn top_items(&self) -> ReadOnlyVec<Item> {
        self.inner.items.window()
    }

    /// Point `item` back at this group and append it to [`items`](Self::items).
    pub fn add_item(&self, item: Item) {
        item.set_group(Some(self));
        self.items().push(item);
    }

    /// Non-owning reference to this group.
    #[must_use]
    pub fn downgrade(&self) -> WeakGroup {
        WeakGroup(Rc::downgrade(&self.inner))
    }

    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Entity for Group {
    fn core(&self) -> &EntityCore {
        &self.inner.core
    }
}

impl PartialEq for Group {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Group {}

impl fmt::Debug for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Group")
            .field("unique_id", &self.unique_id())
            .field("title", &self.title())
            .field("items", &self.items().len())
            .finish()
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title())
    }
}

/// Back-reference from an item to its group. Never keeps the group alive.
#[derive(Clone, Default)]
pub struct WeakGroup(Weak<GroupInner>);

impl WeakGroup {
    /// The group, if it is still alive.
    #[must_use]
    pub fn upgrade(&self) -> Option<Group> {
        self.0.upgrade().map(|inner| Group { inner })
    }

    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Weak::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for WeakGroup {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for WeakGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.upgrade() {
            Some(group) => write!(f, "WeakGroup({})", group.unique_id()),
            None => f.write_str("WeakGroup(<none>)"),
        }
    }
}
