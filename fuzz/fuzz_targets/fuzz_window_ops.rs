#![no_main]

//! Drives a group's item list with arbitrary edits and checks that the
//! top-items window always equals the first twelve items.

use std::rc::Rc;

use arbitrary::Arbitrary;
use canopy_model::{
    EntityFields, Group, ImageResolver, Item, TOP_ITEMS_CAPACITY, UriImageResolver,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Op {
    Push,
    Insert(u16),
    Move(u16, u16),
    Remove(u16),
    Replace(u16),
    Reset(u8),
    Clear,
}

fuzz_target!(|ops: Vec<Op>| {
    let resolver: Rc<dyn ImageResolver> = Rc::new(UriImageResolver::default());
    let group = Group::new(EntityFields::new("fuzz"), Rc::clone(&resolver));
    let mut next = 0usize;
    let mut fresh = || {
        next += 1;
        Item::new(
            EntityFields::new(format!("I{next}")),
            "",
            Rc::clone(&resolver),
        )
    };

    for op in ops.iter().take(512) {
        let items = group.items();
        let len = items.len();
        match *op {
            Op::Push => items.push(fresh()),
            Op::Insert(i) => items.insert(usize::from(i) % (len + 1), fresh()),
            Op::Move(a, b) if len > 0 => {
                items.move_item(usize::from(a) % len, usize::from(b) % len);
            }
            Op::Remove(i) if len > 0 => {
                items.remove(usize::from(i) % len);
            }
            Op::Replace(i) if len > 0 => {
                items.replace(usize::from(i) % len, fresh());
            }
            Op::Reset(n) => items.reset((0..n % 40).map(|_| fresh()).collect::<Vec<_>>()),
            Op::Clear => items.clear(),
            Op::Move(..) | Op::Remove(_) | Op::Replace(_) => {}
        }

        let expected: Vec<Item> = items
            .to_vec()
            .into_iter()
            .take(TOP_ITEMS_CAPACITY)
            .collect();
        assert_eq!(group.top_items().to_vec(), expected);
    }
});
