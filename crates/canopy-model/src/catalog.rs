//! Catalog of groups with identifier lookup.
//!
//! # Invariants
//!
//! 1. **Exactly-one match**: [`Catalog::group`] and [`Catalog::item`] return
//!    an entity only when exactly one candidate carries the identifier. Zero
//!    and several matches both yield `None`.
//!
//! 2. **Search order**: items are scanned group by group in catalog order,
//!    then in item order within each group.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Missing id | No entity carries it | Returns `None` |
//! | Duplicate id | Several entities carry it | Returns `None` (logged at debug) |
//! | Unknown collection | Name other than [`ALL_GROUPS`] | [`CatalogError::UnknownCollection`] |

use std::rc::Rc;

use canopy_runtime::{ObservableVec, ReadOnlyVec};

use crate::entity::{Entity, EntityFields};
use crate::error::CatalogError;
use crate::group::Group;
use crate::image::ImageResolver;
use crate::item::Item;
use crate::seed::Seed;

/// The only named collection of groups.
pub const ALL_GROUPS: &str = "AllGroups";

/// Ordered collection of groups.
///
/// Built once (usually [`from_seed`](Self::from_seed)) and passed to whatever
/// needs lookup.
pub struct Catalog {
    groups: ObservableVec<Group>,
    resolver: Rc<dyn ImageResolver>,
}

impl Catalog {
    /// Create an empty catalog whose entities resolve images with `resolver`.
    #[must_use]
    pub fn new(resolver: Rc<dyn ImageResolver>) -> Self {
        Self {
            groups: ObservableVec::new(),
            resolver,
        }
    }

    /// Build groups and items from seed descriptors.
    ///
    /// Items are appended through each group's item list, so top-item windows
    /// are filled by the regular change handler.
    #[must_use]
    pub fn from_seed(seed: &Seed, resolver: Rc<dyn ImageResolver>) -> Self {
        let catalog = Self::new(resolver);
        let mut item_count = 0;
        for seed_group in &seed.groups {
            let group = catalog.create_group(seed_group.fields());
            for seed_item in &seed_group.items {
                group.add_item(catalog.create_item(seed_item.fields(), &seed_item.content));
                item_count += 1;
            }
            catalog.add_group(group);
        }
        tracing::debug!(
            target: "canopy::catalog",
            groups = catalog.groups.len(),
            items = item_count,
            "catalog seeded"
        );
        catalog
    }

    /// New group sharing this catalog's image resolver. Not added yet.
    #[must_use]
    pub fn create_group(&self, fields: EntityFields) -> Group {
        Group::new(fields, Rc::clone(&self.resolver))
    }

    /// New item sharing this catalog's image resolver. Not added anywhere yet.
    #[must_use]
    pub fn create_item(&self, fields: EntityFields, content: &str) -> Item {
        Item::new(fields, content, Rc::clone(&self.resolver))
    }

    /// Append `group`.
    pub fn add_group(&self, group: Group) {
        self.groups.push(group);
    }

    /// Every group, in order.
    #[must_use]
    pub fn all_groups(&self) -> ReadOnlyVec<Group> {
        self.groups.read_only()
    }

    /// Groups of the named collection. Only [`ALL_GROUPS`] exists.
    pub fn groups_by_collection(&self, name: &str) -> Result<ReadOnlyVec<Group>, CatalogError> {
        if name == ALL_GROUPS {
            Ok(self.all_groups())
        } else {
            Err(CatalogError::UnknownCollection {
                name: name.to_owned(),
            })
        }
    }

    /// The single group with identifier `id`.
    #[must_use]
    pub fn group(&self, id: &str) -> Option<Group> {
        let matches: Vec<Group> = self.groups.with(|groups| {
            groups
                .iter()
                .filter(|g| g.unique_id() == id)
                .cloned()
                .collect()
        });
        exactly_one("group", id, matches)
    }

    /// The single item with identifier `id`, across all groups.
    #[must_use]
    pub fn item(&self, id: &str) -> Option<Item> {
        let matches: Vec<Item> = self.groups.with(|groups| {
            groups
                .iter()
                .flat_map(|group| {
                    group.items().with(|items| {
                        items
                            .iter()
                            .filter(|item| item.unique_id() == id)
                            .cloned()
                            .collect::<Vec<_>>()
                    })
                })
                .collect()
        });
        exactly_one("item", id, matches)
    }
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("groups", &self.groups.len())
            .finish_non_exhaustive()
    }
}

fn exactly_one<T>(kind: &'static str, id: &str, mut matches: Vec<T>) -> Option<T> {
    match matches.len() {
        1 => matches.pop(),
        0 => None,
        count => {
            tracing::debug!(
                target: "canopy::catalog",
                kind,
                id,
                count,
                "ambiguous lookup treated as not found"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::UriImageResolver;

    fn catalog() -> Catalog {
        Catalog::new(Rc::new(UriImageResolver::default()))
    }

    fn with_group(catalog: &Catalog, id: &str, items: &[&str]) -> Group {
        let group = catalog.create_group(EntityFields::new(id).with_title(id));
        for item in items {
            group.add_item(catalog.create_item(EntityFields::new(*item), ""));
        }
        catalog.add_group(group.clone());
        group
    }

    #[test]
    fn group_lookup_exact_match() {
        let c = catalog();
        with_group(&c, "A", &[]);
        let b = with_group(&c, "B", &[]);
        assert_eq!(c.group("B"), Some(b));
        assert_eq!(c.group("b"), None);
        assert_eq!(c.group("missing"), None);
    }

    #[test]
    fn ambiguous_group_is_not_found() {
        let c = catalog();
        with_group(&c, "G", &[]);
        with_group(&c, "G", &[]);
        assert_eq!(c.group("G"), None);
    }

    #[test]
    fn item_lookup_spans_groups() {
        let c = catalog();
        with_group(&c, "A", &["A-1", "A-2"]);
        let b = with_group(&c, "B", &["B-1"]);

        let found = c.item("B-1").expect("unique");
        assert_eq!(found.group(), Some(b));
        assert_eq!(c.item("nope"), None);
    }

    #[test]
    fn ambiguous_item_is_not_found() {
        let c = catalog();
        with_group(&c, "A", &["X"]);
        with_group(&c, "B", &["X"]);
        assert_eq!(c.item("X"), None);
    }

    #[test]
    fn item_lookup_reaches_past_the_window() {
        let c = catalog();
        let ids: Vec<String> = (0..20).map(|i| format!("I{i}")).collect();
        let refs: Vec<&str> = ids.iter().map(String::as_str).collect();
        with_group(&c, "G", &refs);
        assert!(c.item("I19").is_some());
    }

    #[test]
    fn only_all_groups_collection_is_known() {
        let c = catalog();
        with_group(&c, "A", &[]);
        assert_eq!(c.groups_by_collection(ALL_GROUPS).map(|g| g.len()), Ok(1));
        assert_eq!(
            c.groups_by_collection("Favorites").map(|g| g.len()),
            Err(CatalogError::UnknownCollection {
                name: "Favorites".into()
            })
        );
    }

    #[test]
    fn all_groups_view_follows_additions() {
        let c = catalog();
        let view = c.all_groups();
        with_group(&c, "A", &[]);
        with_group(&c, "B", &[]);
        let titles: Vec<String> = view.to_vec().iter().map(Entity::title).collect();
        assert_eq!(titles, ["A", "B"]);
    }
}
