//! Plain-text rendering of catalog entities.

use std::io::{self, Write};

use canopy_model::{Entity, Group, Item};

const INDENT: &str = "  ";

pub fn group_summaries(out: &mut impl Write, groups: &[Group]) -> io::Result<()> {
    for group in groups {
        writeln!(
            out,
            "{} {} ({} items)",
            group.unique_id(),
            group.title(),
            group.items().len()
        )?;
        group.top_items().with(|top| {
            top.iter()
                .try_for_each(|item| writeln!(out, "{INDENT}{}", item_line(item)))
        })?;
    }
    Ok(())
}

pub fn group_detail(out: &mut impl Write, group: &Group) -> io::Result<()> {
    writeln!(out, "{} {}", group.unique_id(), group.title())?;
    write_optional(out, "subtitle", &group.subtitle())?;
    write_optional(out, "description", &group.description())?;
    if let Some(image) = group.image() {
        writeln!(out, "image: {image}")?;
    }
    writeln!(
        out,
        "items: {} (top {})",
        group.items().len(),
        group.top_items().len()
    )?;
    group.items().with(|items| {
        items
            .iter()
            .try_for_each(|item| writeln!(out, "{INDENT}{}", item_line(item)))
    })
}

pub fn item_detail(out: &mut impl Write, item: &Item) -> io::Result<()> {
    writeln!(out, "{} {}", item.unique_id(), item.title())?;
    write_optional(out, "subtitle", &item.subtitle())?;
    match item.group() {
        Some(group) => writeln!(out, "group: {} {}", group.unique_id(), group.title())?,
        None => writeln!(out, "group: <none>")?,
    }
    if let Some(image) = item.image() {
        writeln!(out, "image: {image}")?;
    }
    write_optional(out, "description", &item.description())?;
    write_optional(out, "content", &item.content())
}

fn item_line(item: &Item) -> String {
    format!("{} {}", item.unique_id(), item.title())
}

fn write_optional(out: &mut impl Write, label: &str, value: &str) -> io::Result<()> {
    if value.is_empty() {
        return Ok(());
    }
    writeln!(out, "{label}: {value}")
}
