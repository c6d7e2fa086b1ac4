use std::cell::RefCell;
use std::rc::Rc;

use canopy_model::{
    ALL_GROUPS, Catalog, CatalogError, Entity, EntityFields, Group, Item, Property, Seed,
    TOP_ITEMS_CAPACITY, UriImageResolver,
};
use canopy_runtime::BindingScope;

fn empty_catalog() -> Catalog {
    Catalog::new(Rc::new(UriImageResolver::default()))
}

/// A group holding `I1..=In`.
fn group_of(catalog: &Catalog, n: usize) -> Group {
    let group = catalog.create_group(EntityFields::new("G").with_title("Numbers"));
    for i in 1..=n {
        group.add_item(catalog.create_item(EntityFields::new(format!("I{i}")), ""));
    }
    catalog.add_group(group.clone());
    group
}

fn top_ids(group: &Group) -> Vec<String> {
    group
        .top_items()
        .to_vec()
        .iter()
        .map(|item| item.unique_id().to_owned())
        .collect()
}

fn names(range: std::ops::RangeInclusive<usize>) -> Vec<String> {
    range.map(|i| format!("I{i}")).collect()
}

#[test]
fn insert_below_horizon() {
    let catalog = empty_catalog();
    let group = group_of(&catalog, 15);
    let ix = catalog.create_item(EntityFields::new("Ix"), "");
    group.items().insert(5, ix);

    let mut want = names(1..=5);
    want.push("Ix".into());
    want.extend(names(6..=11));
    assert_eq!(top_ids(&group), want);
}

#[test]
fn insert_above_horizon() {
    let catalog = empty_catalog();
    let group = group_of(&catalog, 15);
    group
        .items()
        .insert(13, catalog.create_item(EntityFields::new("Ix"), ""));
    assert_eq!(top_ids(&group), names(1..=12));
}

#[test]
fn move_into_window() {
    let catalog = empty_catalog();
    let group = group_of(&catalog, 15);
    group.items().move_item(14, 0);

    let mut want = vec!["I15".to_owned()];
    want.extend(names(1..=11));
    assert_eq!(top_ids(&group), want);
}

#[test]
fn remove_with_backfill() {
    let catalog = empty_catalog();
    let group = group_of(&catalog, 13);
    let original_last = group.items().get(12).expect("13 items");
    group.items().remove(3);

    let top = group.top_items().to_vec();
    assert_eq!(top.len(), TOP_ITEMS_CAPACITY);
    assert_eq!(top.last(), Some(&original_last));
    assert!(top.iter().all(|item| item.unique_id() != "I4"));
}

#[test]
fn remove_without_backfill() {
    let catalog = empty_catalog();
    let group = group_of(&catalog, 10);
    group.items().remove(2);
    assert_eq!(group.top_items().len(), 9);
    assert!(!top_ids(&group).contains(&"I3".to_owned()));
}

#[test]
fn lookup_ambiguity_is_not_found() {
    let catalog = empty_catalog();
    group_of(&catalog, 1);
    group_of(&catalog, 1);
    assert!(catalog.group("G").is_none());
    assert!(catalog.item("I1").is_none());
}

#[test]
fn unknown_collection_is_rejected() {
    let catalog = empty_catalog();
    assert!(catalog.groups_by_collection(ALL_GROUPS).is_ok());
    assert!(matches!(
        catalog.groups_by_collection("Recent"),
        Err(CatalogError::UnknownCollection { .. })
    ));
}

#[test]
fn builtin_seed_builds_linked_catalog() {
    let seed = Seed::builtin().expect("bundled seed parses");
    let catalog = Catalog::from_seed(&seed, Rc::new(UriImageResolver::default()));

    let groups = catalog.all_groups().to_vec();
    assert_eq!(groups.len(), 3);
    for group in &groups {
        assert_eq!(group.top_items().to_vec(), group.items().to_vec());
        for item in group.items().to_vec() {
            assert_eq!(item.group().as_ref(), Some(group));
        }
    }

    let taiga = catalog.item("Group-3-Item-4").expect("seeded");
    assert_eq!(taiga.title(), "Taiga");
    assert_eq!(
        taiga.image().map(|h| h.uri().to_owned()).as_deref(),
        Some("ms-appx:///Assets/34.png")
    );
}

#[test]
fn observers_see_title_changes_through_lookup() {
    let catalog = empty_catalog();
    let group = group_of(&catalog, 2);
    let item: Item = catalog.item("I2").expect("unique");

    let seen = Rc::new(RefCell::new(Vec::new()));
    let window_events = Rc::new(RefCell::new(Vec::new()));
    let mut scope = BindingScope::new();
    let sink = Rc::clone(&seen);
    let sub = item.subscribe(move |change| sink.borrow_mut().push(change.property));
    scope.hold(sub);
    let sink = Rc::clone(&window_events);
    scope.watch_view(&group.top_items(), move |change| {
        sink.borrow_mut().push(change.kind());
    });
    assert_eq!(scope.binding_count(), 2);

    item.set_title("Second");
    item.set_image_path("Assets/99.png");
    group.items().move_item(1, 0);
    assert_eq!(*seen.borrow(), vec![Property::Title, Property::Image]);
    assert_eq!(*window_events.borrow(), vec!["move"]);

    let in_window = catalog
        .group("G")
        .and_then(|g| g.top_items().get(0))
        .expect("window holds I2");
    assert_eq!(in_window.title(), "Second");

    scope.clear();
    item.set_title("Third");
    group.items().move_item(1, 0);
    assert_eq!(seen.borrow().len(), 2);
    assert_eq!(window_events.borrow().len(), 1);
}
