//! Identity and observable scalar fields shared by groups and items.
//!
//! # Invariants
//!
//! 1. The unique id never changes after construction.
//! 2. A setter emits exactly one [`PropertyChanged`] when the stored value
//!    changes, and nothing when the new value equals the old one.
//! 3. Resolving a pending image path on read caches the handle and emits
//!    nothing.
//! 4. [`Entity::set_image_path`] always emits [`Property::Image`], even when
//!    the path is unchanged.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use canopy_runtime::{Notifier, Subscription};

use crate::image::{ImageHandle, ImageResolver, ImageSlot};

/// Observable fields of groups and items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    Title,
    Subtitle,
    Description,
    Image,
    /// Item body text.
    Content,
    /// Item back-reference to its group.
    Group,
}

impl Property {
    /// Binding name of the field.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Subtitle => "Subtitle",
            Self::Description => "Description",
            Self::Image => "Image",
            Self::Content => "Content",
            Self::Group => "Group",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Notification that one field of an entity changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyChanged {
    pub property: Property,
}

/// Construction parameters common to groups and items.
///
/// ```
/// use canopy_model::EntityFields;
///
/// let fields = EntityFields::new("Group-1")
///     .with_title("Introduction")
///     .with_image_path("Assets/10.png");
/// assert_eq!(fields.unique_id, "Group-1");
/// assert!(fields.subtitle.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityFields {
    pub unique_id: String,
    pub title: String,
    pub subtitle: String,
    pub image_path: Option<String>,
    pub description: String,
}

impl EntityFields {
    #[must_use]
    pub fn new(unique_id: impl Into<String>) -> Self {
        Self {
            unique_id: unique_id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = subtitle.into();
        self
    }

    #[must_use]
    pub fn with_image_path(mut self, path: impl Into<String>) -> Self {
        self.image_path = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Shared state behind every entity: identity, scalar fields, image slot and
/// the property-change channel.
pub struct EntityCore {
    unique_id: String,
    title: RefCell<String>,
    subtitle: RefCell<String>,
    description: RefCell<String>,
    image: RefCell<ImageSlot>,
    resolver: Rc<dyn ImageResolver>,
    changes: Notifier<PropertyChanged>,
}

impl EntityCore {
    #[must_use]
    pub fn new(fields: EntityFields, resolver: Rc<dyn ImageResolver>) -> Self {
        Self {
            unique_id: fields.unique_id,
            title: RefCell::new(fields.title),
            subtitle: RefCell::new(fields.subtitle),
            description: RefCell::new(fields.description),
            image: RefCell::new(ImageSlot::from_path(fields.image_path)),
            resolver,
            changes: Notifier::new(),
        }
    }

    /// Store `value` in `slot` and notify, unless it is already equal.
    ///
    /// Returns whether anything changed.
    pub(crate) fn set_field<T: PartialEq>(
        &self,
        slot: &RefCell<T>,
        value: T,
        property: Property,
    ) -> bool {
        {
            let mut current = slot.borrow_mut();
            if *current == value {
                return false;
            }
            *current = value;
        }
        self.notify(property);
        true
    }

    pub(crate) fn notify(&self, property: Property) {
        tracing::trace!(
            target: "canopy::entity",
            id = %self.unique_id,
            property = property.name(),
            "property changed"
        );
        self.changes.emit(&PropertyChanged { property });
    }
}

impl fmt::Debug for EntityCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityCore")
            .field("unique_id", &self.unique_id)
            .field("title", &*self.title.borrow())
            .field("image", &*self.image.borrow())
            .finish_non_exhaustive()
    }
}

/// Capabilities shared by [`Group`](crate::Group) and [`Item`](crate::Item).
///
/// Implementors only provide [`core`](Entity::core); every accessor is
/// derived from it.
pub trait Entity {
    fn core(&self) -> &EntityCore;

    fn unique_id(&self) -> &str {
        &self.core().unique_id
    }

    fn title(&self) -> String {
        self.core().title.borrow().clone()
    }

    fn set_title(&self, title: impl Into<String>) -> bool
    where
        Self: Sized,
    {
        let core = self.core();
        core.set_field(&core.title, title.into(), Property::Title)
    }

    fn subtitle(&self) -> String {
        self.core().subtitle.borrow().clone()
    }

    fn set_subtitle(&self, subtitle: impl Into<String>) -> bool
    where
        Self: Sized,
    {
        let core = self.core();
        core.set_field(&core.subtitle, subtitle.into(), Property::Subtitle)
    }

    fn description(&self) -> String {
        self.core().description.borrow().clone()
    }

    fn set_description(&self, description: impl Into<String>) -> bool
    where
        Self: Sized,
    {
        let core = self.core();
        core.set_field(&core.description, description.into(), Property::Description)
    }

    /// The image handle, resolving a pending path on first read.
    fn image(&self) -> Option<ImageHandle> {
        let core = self.core();
        core.image.borrow_mut().resolve(core.resolver.as_ref())
    }

    /// Path waiting to be resolved, if the image has not been read yet.
    fn image_path(&self) -> Option<String> {
        self.core().image.borrow().pending_path().map(str::to_owned)
    }

    /// Set a resolved image directly. Any pending path is discarded.
    fn set_image(&self, handle: Option<ImageHandle>) -> bool {
        let core = self.core();
        let changed = core.image.borrow_mut().set_handle(handle);
        if changed {
            core.notify(Property::Image);
        }
        changed
    }

    /// Point the image at a new path; resolution is deferred to the next read.
    fn set_image_path(&self, path: impl Into<String>)
    where
        Self: Sized,
    {
        let core = self.core();
        core.image.borrow_mut().set_path(path);
        core.notify(Property::Image);
    }

    /// Register a property-change observer.
    fn subscribe(&self, callback: impl Fn(&PropertyChanged) + 'static) -> Subscription
    where
        Self: Sized,
    {
        self.core().changes.subscribe(callback)
    }

    /// The entity's property-change channel.
    fn property_changes(&self) -> &Notifier<PropertyChanged> {
        &self.core().changes
    }
}
