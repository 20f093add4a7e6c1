use serde::Serialize;
use tracing::warn;

use super::error::{SegmentError, SegmentResult};
use super::outline::OutlineItem;
use super::source::PageTextSource;

/// Pre-order position of a node within one resolved outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct NodeId(pub usize);

/// Outline entry with its inferred page range. Pages are 1-based and
/// inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutlineNode {
    pub id: NodeId,
    /// Back-reference for level bookkeeping only; the parent owns this node.
    pub parent: Option<NodeId>,
    pub title: String,
    pub level: usize,
    pub start_page: usize,
    pub end_page: usize,
    pub page_count: usize,
    pub children: Vec<ResolvedItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResolvedItem {
    Resolved(OutlineNode),
    Unresolved {
        id: NodeId,
        parent: Option<NodeId>,
        title: String,
        level: usize,
        error: SegmentError,
    },
}

impl ResolvedItem {
    pub fn title(&self) -> &str {
        match self {
            Self::Resolved(node) => &node.title,
            Self::Unresolved { title, .. } => title,
        }
    }

    pub fn level(&self) -> usize {
        match self {
            Self::Resolved(node) => node.level,
            Self::Unresolved { level, .. } => *level,
        }
    }

    pub fn start_page(&self) -> Option<usize> {
        self.as_node().map(|node| node.start_page)
    }

    pub fn as_node(&self) -> Option<&OutlineNode> {
        match self {
            Self::Resolved(node) => Some(node),
            Self::Unresolved { .. } => None,
        }
    }
}

/// Infers page ranges from outline order and nesting.
pub struct RangeResolver<'a, S: PageTextSource> {
    source: &'a S,
    total_pages: usize,
    next_id: usize,
}

impl<'a, S: PageTextSource> RangeResolver<'a, S> {
    pub fn new(source: &'a S, total_pages: usize) -> Self {
        Self {
            source,
            total_pages,
            next_id: 0,
        }
    }

    pub fn resolve(&mut self, items: &[OutlineItem]) -> Vec<ResolvedItem> {
        self.resolve_level(items, None)
    }

    fn resolve_level(&mut self, items: &[OutlineItem], parent: Option<NodeId>) -> Vec<ResolvedItem> {
        let destinations = items
            .iter()
            .map(|item| self.source.destination_page_number(&item.entry))
            .collect::<Vec<SegmentResult<usize>>>();

        let mut resolved = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let id = NodeId(self.next_id);
            self.next_id += 1;

            let start_index = match &destinations[index] {
                Ok(page_index) => *page_index,
                Err(error) => {
                    warn!(title = %item.title, level = item.level, error = %error, "outline entry skipped");
                    resolved.push(ResolvedItem::Unresolved {
                        id,
                        parent,
                        title: item.title.clone(),
                        level: item.level,
                        error: error.clone(),
                    });
                    continue;
                }
            };

            let end_page = next_sibling_page(items, &destinations, index).unwrap_or(self.total_pages);
            let (start_page, end_page) = normalize_range(start_index + 1, end_page, self.total_pages);

            let mut node = OutlineNode {
                id,
                parent,
                title: item.title.clone(),
                level: item.level,
                start_page,
                end_page,
                page_count: page_count(start_page, end_page),
                children: Vec::new(),
            };

            if !item.children.is_empty() {
                node.children = self.resolve_level(&item.children, Some(id));

                // The parent's own text stops where its first child begins. An
                // unresolved first child leaves the parent's range as it is.
                if let Some(first_child_start) =
                    node.children.first().and_then(ResolvedItem::start_page)
                {
                    let (start_page, end_page) = normalize_range(
                        node.start_page,
                        first_child_start.saturating_sub(1),
                        self.total_pages,
                    );
                    node.start_page = start_page;
                    node.end_page = end_page;
                    node.page_count = page_count(start_page, end_page);
                }
            }

            resolved.push(ResolvedItem::Resolved(node));
        }

        resolved
    }
}

/// Destination of the next entry in the same sibling chain that resolves.
/// Zero-based, so it doubles as the last 1-based page of the current entry.
fn next_sibling_page(
    items: &[OutlineItem],
    destinations: &[SegmentResult<usize>],
    index: usize,
) -> Option<usize> {
    let mut current = index;
    while current + 1 < items.len() && items[current].followed_by_sibling {
        current += 1;
        if let Ok(page_index) = &destinations[current] {
            return Some(*page_index);
        }
    }
    None
}

/// Swaps reversed bounds, then clamps both into `[1, total_pages]`.
pub fn normalize_range(start_page: usize, end_page: usize, total_pages: usize) -> (usize, usize) {
    let (mut start, mut end) = (start_page, end_page);
    if start > end {
        std::mem::swap(&mut start, &mut end);
    }
    if total_pages == 0 {
        return (0, 0);
    }
    (start.clamp(1, total_pages), end.clamp(1, total_pages))
}

pub fn page_count(start_page: usize, end_page: usize) -> usize {
    if start_page == 0 || end_page < start_page {
        return 0;
    }
    end_page - start_page + 1
}
