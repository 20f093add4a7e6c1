use serde::Serialize;

use super::error::SegmentResult;

/// Opaque locator of an outline entry's target page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "page_index", rename_all = "snake_case")]
pub enum Destination {
    /// Zero-based page index as reported by the document library.
    Page(usize),
    /// The library produced an entry without a usable target.
    Missing,
}

/// One bookmark as delivered by the document library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutlineEntry {
    pub title: Option<String>,
    pub destination: Destination,
}

impl OutlineEntry {
    pub fn new(title: impl Into<String>, destination: Destination) -> Self {
        Self {
            title: Some(title.into()),
            destination,
        }
    }

    pub fn at_page(title: impl Into<String>, page_index: usize) -> Self {
        Self::new(title, Destination::Page(page_index))
    }
}

/// Raw outline encoding: a flat list where a nested list directly after an
/// entry holds that entry's children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RawOutlineItem {
    Entry(OutlineEntry),
    Nested(Vec<RawOutlineItem>),
}

pub type RawOutline = Vec<RawOutlineItem>;

/// Paginated document the engine reads from.
///
/// Implementations keep a page cursor, so a single instance must not be shared
/// between concurrent runs.
pub trait PageTextSource {
    /// Number of pages. Failure is a `DocumentRead` error.
    fn page_count(&self) -> SegmentResult<usize>;

    /// Raw text of the zero-based page. Decode faults are `Extraction` errors.
    fn page_text(&mut self, index: usize) -> SegmentResult<String>;

    /// Zero-based page index the entry points at, or `UnresolvableDestination`.
    fn destination_page_number(&self, entry: &OutlineEntry) -> SegmentResult<usize>;

    /// Raw outline of the document. An absent outline is an empty list;
    /// failure to read it is a `DocumentRead` error.
    fn outline(&self) -> SegmentResult<RawOutline>;

    /// Called after every extraction batch so implementations can drop caches.
    fn reclaim(&mut self) {}
}
