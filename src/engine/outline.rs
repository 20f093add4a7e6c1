use serde::Serialize;
use tracing::debug;

use super::source::{OutlineEntry, RawOutlineItem};

pub const UNTITLED_PLACEHOLDER: &str = "Untitled Chapter";

/// Outline entry placed in an explicit tree, before any page lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutlineItem {
    pub title: String,
    pub entry: OutlineEntry,
    pub level: usize,
    /// Another entry followed this one (after its child group) in the raw
    /// list. An orphan group in between breaks the sibling chain.
    pub followed_by_sibling: bool,
    pub children: Vec<OutlineItem>,
}

/// Turns the flat-list-with-inline-groups encoding into an explicit tree.
///
/// A group directly after an entry holds that entry's children. A group with
/// no entry in front of it has no owner and is dropped.
pub fn normalize_outline(raw: &[RawOutlineItem]) -> Vec<OutlineItem> {
    normalize_level(raw, 0)
}

fn normalize_level(raw: &[RawOutlineItem], level: usize) -> Vec<OutlineItem> {
    let mut items = Vec::new();
    let mut index = 0usize;

    while index < raw.len() {
        match &raw[index] {
            RawOutlineItem::Entry(entry) => {
                let children = match raw.get(index + 1) {
                    Some(RawOutlineItem::Nested(group)) => {
                        index += 1;
                        normalize_level(group, level + 1)
                    }
                    _ => Vec::new(),
                };
                index += 1;

                items.push(OutlineItem {
                    title: display_title(entry),
                    entry: entry.clone(),
                    level,
                    followed_by_sibling: matches!(raw.get(index), Some(RawOutlineItem::Entry(_))),
                    children,
                });
            }
            RawOutlineItem::Nested(group) => {
                debug!(level, items = group.len(), "dropping outline group without owner");
                index += 1;
            }
        }
    }

    items
}

fn display_title(entry: &OutlineEntry) -> String {
    entry
        .title
        .as_deref()
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .unwrap_or(UNTITLED_PLACEHOLDER)
        .to_string()
}

/// Keeps only the top-level entries, chained one after another.
pub fn flatten_top_level(items: Vec<OutlineItem>) -> Vec<OutlineItem> {
    let count = items.len();
    items
        .into_iter()
        .enumerate()
        .map(|(index, mut item)| {
            item.children.clear();
            item.followed_by_sibling = index + 1 < count;
            item
        })
        .collect()
}

pub fn count_outline_items(items: &[OutlineItem]) -> usize {
    items
        .iter()
        .map(|item| 1 + count_outline_items(&item.children))
        .sum()
}

/// Indented dump of the raw encoding: `- title` for entries and
/// `+ [group]` for nested lists, whether owned or orphaned.
pub fn describe_raw_outline(raw: &[RawOutlineItem]) -> Vec<String> {
    let mut lines = Vec::new();
    describe_level(raw, 0, &mut lines);
    lines
}

fn describe_level(raw: &[RawOutlineItem], level: usize, lines: &mut Vec<String>) {
    let indent = "  ".repeat(level);
    for (index, item) in raw.iter().enumerate() {
        match item {
            RawOutlineItem::Entry(entry) => {
                lines.push(format!("{}- {}", indent, display_title(entry)));
            }
            RawOutlineItem::Nested(group) => {
                let owned = index > 0 && matches!(raw[index - 1], RawOutlineItem::Entry(_));
                let label = if owned { "group" } else { "orphan group" };
                lines.push(format!("{}+ [{} at level {}]", indent, label, level));
                describe_level(group, level + 1, lines);
            }
        }
    }
}
