//! Items: leaf entities with a content body and a link to their group.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::entity::{Entity, EntityCore, EntityFields, Property};
use crate::group::{Group, WeakGroup};
use crate::image::ImageResolver;

struct ItemInner {
    core: EntityCore,
    content: RefCell<String>,
    group: RefCell<WeakGroup>,
}

/// Shared handle to an item.
///
/// The same item appears in a group's `items` and `top_items`; clones refer
/// to one underlying record and equality is identity.
#[derive(Clone)]
pub struct Item {
    inner: Rc<ItemInner>,
}

impl Item {
    /// Create an item that does not belong to any group yet.
    #[must_use]
    pub fn new(
        fields: EntityFields,
        content: impl Into<String>,
        resolver: Rc<dyn ImageResolver>,
    ) -> Self {
        Self {
            inner: Rc::new(ItemInner {
                core: EntityCore::new(fields, resolver),
                content: RefCell::new(content.into()),
                group: RefCell::new(WeakGroup::default()),
            }),
        }
    }

    #[must_use]
    pub fn content(&self) -> String {
        self.inner.content.borrow().clone()
    }

    pub fn set_content(&self, content: impl Into<String>) -> bool {
        self.inner
            .core
            .set_field(&self.inner.content, content.into(), Property::Content)
    }

    /// The owning group, if set and still alive.
    #[must_use]
    pub fn group(&self) -> Option<Group> {
        self.inner.group.borrow().upgrade()
    }

    /// Repoint the back-reference. Does not move the item between item lists.
    pub fn set_group(&self, group: Option<&Group>) -> bool {
        let link = group.map(Group::downgrade).unwrap_or_default();
        self.inner
            .core
            .set_field(&self.inner.group, link, Property::Group)
    }

    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Entity for Item {
    fn core(&self) -> &EntityCore {
        &self.inner.core
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Item {}

impl fmt::Debug for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Item")
            .field("unique_id", &self.unique_id())
            .field("title", &self.title())
            .field("group", &*self.inner.group.borrow())
            .finish()
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title())
    }
}
