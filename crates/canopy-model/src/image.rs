//! Lazily resolved image references.
//!
//! An entity's image is either unset, a pending relative path, or a resolved
//! [`ImageHandle`]. Paths are turned into handles by an [`ImageResolver`] the
//! first time the image is read.

use std::fmt;
use std::rc::Rc;

/// Base URI used when no other base is configured.
pub const DEFAULT_IMAGE_BASE: &str = "ms-appx:///";

/// Opaque, cheap-to-clone reference to a resolved image resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageHandle {
    uri: Rc<str>,
}

impl ImageHandle {
    /// Wrap an already resolved URI.
    #[must_use]
    pub fn new(uri: impl Into<Rc<str>>) -> Self {
        Self { uri: uri.into() }
    }

    /// The resolved URI.
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }
}

impl fmt::Display for ImageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uri)
    }
}

/// Turns a relative image path into a handle.
///
/// Implementations must be pure: the same path always yields an equal handle.
pub trait ImageResolver {
    fn resolve(&self, path: &str) -> ImageHandle;
}

/// Resolves paths against a base URI.
///
/// Paths that already carry a scheme (`https://...`) are used as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriImageResolver {
    base: String,
}

impl UriImageResolver {
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }
}

impl Default for UriImageResolver {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGE_BASE)
    }
}

impl ImageResolver for UriImageResolver {
    fn resolve(&self, path: &str) -> ImageHandle {
        if path.contains("://") {
            return ImageHandle::new(path);
        }
        let relative = path.trim_start_matches('/');
        if self.base.ends_with('/') {
            ImageHandle::new(format!("{}{relative}", self.base))
        } else {
            ImageHandle::new(format!("{}/{relative}", self.base))
        }
    }
}

/// Backing state of an entity's image.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ImageSlot {
    #[default]
    Empty,
    /// A path waiting to be resolved on first read.
    Pending(String),
    Resolved(ImageHandle),
}

impl ImageSlot {
    /// Slot for an optional initial path.
    #[must_use]
    pub fn from_path(path: Option<String>) -> Self {
        path.map_or(Self::Empty, Self::Pending)
    }

    /// Current handle, resolving (and caching) a pending path first.
    pub fn resolve(&mut self, resolver: &dyn ImageResolver) -> Option<ImageHandle> {
        if let Self::Pending(path) = self {
            let handle = resolver.resolve(path);
            *self = Self::Resolved(handle);
        }
        self.cached()
    }

    /// The resolved handle, without resolving anything.
    #[must_use]
    pub fn cached(&self) -> Option<ImageHandle> {
        match self {
            Self::Resolved(handle) => Some(handle.clone()),
            Self::Empty | Self::Pending(_) => None,
        }
    }

    /// The pending path, if one is waiting to be resolved.
    #[must_use]
    pub fn pending_path(&self) -> Option<&str> {
        match self {
            Self::Pending(path) => Some(path),
            Self::Empty | Self::Resolved(_) => None,
        }
    }

    /// Store `handle`, dropping any pending path.
    ///
    /// Returns whether the cached handle changed.
    pub fn set_handle(&mut self, handle: Option<ImageHandle>) -> bool {
        let previous = self.cached();
        *self = handle.clone().map_or(Self::Empty, Self::Resolved);
        previous != handle
    }

    /// Store `path` for lazy resolution, dropping any cached handle.
    pub fn set_path(&mut self, path: impl Into<String>) {
        *self = Self::Pending(path.into());
    }
}
