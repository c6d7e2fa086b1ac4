#![forbid(unsafe_code)]

//! Grouped content model for Canopy.
//!
//! A [`Catalog`] owns [`Group`]s, groups own [`Item`]s. Every group keeps a
//! [`top_items`](Group::top_items) window mirroring the first
//! [`TOP_ITEMS_CAPACITY`] entries of its [`items`](Group::items), patched
//! incrementally on every edit so list views can bind to a bounded
//! collection.
//!
//! # Example
//!
//! ```
//! use canopy_model::{Catalog, Entity, Seed, UriImageResolver};
//! use std::rc::Rc;
//!
//! let seed = Seed::builtin().expect("builtin seed parses");
//! let catalog = Catalog::from_seed(&seed, Rc::new(UriImageResolver::default()));
//!
//! let group = catalog.group("Group-3").expect("seeded");
//! assert_eq!(group.title(), "Directions");
//! assert_eq!(group.top_items().len(), group.items().len());
//!
//! let item = catalog.item("Group-3-Item-4").expect("seeded");
//! assert_eq!(item.group().map(|g| g.unique_id().to_owned()), Some("Group-3".into()));
//! ```

pub mod catalog;
pub mod config;
pub mod entity;
pub mod error;
pub mod group;
pub mod image;
pub mod item;
pub mod seed;
pub mod window;

pub use catalog::{ALL_GROUPS, Catalog};
pub use config::CanopyConfig;
pub use entity::{Entity, EntityCore, EntityFields, Property, PropertyChanged};
pub use error::{CatalogError, ConfigError, SeedError};
pub use group::{Group, WeakGroup};
pub use image::{DEFAULT_IMAGE_BASE, ImageHandle, ImageResolver, ImageSlot, UriImageResolver};
pub use item::Item;
pub use seed::{Seed, SeedGroup, SeedItem};
pub use window::{PrefixWindow, TOP_ITEMS_CAPACITY};
