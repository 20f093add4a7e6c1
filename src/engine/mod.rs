//! Document segmentation: outline reconstruction, page-range inference and
//! bounded text extraction.

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::Serialize;
use tracing::{debug, info};

mod chapters;
mod error;
mod extract;
mod fallback;
mod outline;
mod pdf_source;
mod ranges;
mod source;
#[cfg(test)]
mod tests;
mod text;

pub use chapters::{
    Chapter, ChapterContent, ChapterOutcome, build_chapters, count_chapters, count_failed_chapters,
};
pub use error::{SegmentError, SegmentResult};
pub use extract::{BoundedExtractor, DEFAULT_BATCH_SIZE, ExtractionStats};
pub use fallback::{DEFAULT_CHUNK_SIZE, chunk_by_pages};
pub use outline::{
    OutlineItem, UNTITLED_PLACEHOLDER, count_outline_items, describe_raw_outline,
    flatten_top_level, normalize_outline,
};
pub use pdf_source::PdfDocument;
pub use ranges::{NodeId, OutlineNode, RangeResolver, ResolvedItem};
pub use source::{Destination, OutlineEntry, PageTextSource, RawOutline, RawOutlineItem};
pub use text::{TextNormalizer, word_count};

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutlineMode {
    /// Full outline tree with parent/child range adjustment.
    #[default]
    Nested,
    /// Top-level entries only, nesting ignored.
    Flat,
}

impl OutlineMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Nested => "nested",
            Self::Flat => "flat",
        }
    }
}

#[derive(Debug, Clone)]
pub struct SegmentOptions {
    pub batch_size: usize,
    pub chunk_size: usize,
    pub outline_mode: OutlineMode,
}

impl Default for SegmentOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            chunk_size: DEFAULT_CHUNK_SIZE,
            outline_mode: OutlineMode::Nested,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentStrategy {
    Outline,
    FlatOutline,
    PageChunks,
}

impl SegmentStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Outline => "outline",
            Self::FlatOutline => "flat_outline",
            Self::PageChunks => "page_chunks",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentInfo {
    pub total_pages: usize,
    pub total_chapters: usize,
    pub failed_chapters: usize,
    pub strategy: SegmentStrategy,
    pub processed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SegmentedDocument {
    pub document_info: DocumentInfo,
    pub chapters: Vec<Chapter>,
    pub stats: ExtractionStats,
}

/// Outline with page ranges, before any text is read.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedOutline {
    pub total_pages: usize,
    pub raw: RawOutline,
    pub items: Vec<ResolvedItem>,
}

pub fn resolve_outline<S: PageTextSource>(
    source: &S,
    mode: OutlineMode,
) -> SegmentResult<ResolvedOutline> {
    let total_pages = source.page_count()?;
    let raw = source.outline()?;

    for line in describe_raw_outline(&raw) {
        debug!(entry = %line, "outline structure");
    }

    let mut items = normalize_outline(&raw);
    if mode == OutlineMode::Flat {
        items = flatten_top_level(items);
    }
    let entries = count_outline_items(&items);
    let items = RangeResolver::new(source, total_pages).resolve(&items);

    debug!(
        entries,
        top_level = items.len(),
        top_level_resolved = items.iter().filter_map(ResolvedItem::as_node).count(),
        "outline resolved"
    );

    Ok(ResolvedOutline {
        total_pages,
        raw,
        items,
    })
}

/// Segments one document into its chapter tree.
///
/// Returns `Err` when the document itself cannot be read, including mid-way
/// through extraction, and no partial tree is produced. Failures of single
/// outline entries or pages are recorded inside the returned tree.
pub fn segment_document<S: PageTextSource>(
    source: &mut S,
    options: &SegmentOptions,
) -> SegmentResult<SegmentedDocument> {
    let processed_at = Utc::now();
    let normalizer = TextNormalizer::new()?;
    let outline = resolve_outline(&*source, options.outline_mode)?;
    let total_pages = outline.total_pages;

    let mut extractor = BoundedExtractor::new(source, &normalizer, total_pages, options.batch_size);
    let (strategy, chapters) = if outline.items.is_empty() {
        (
            SegmentStrategy::PageChunks,
            chunk_by_pages(&mut extractor, options.chunk_size)?,
        )
    } else {
        let strategy = match options.outline_mode {
            OutlineMode::Nested => SegmentStrategy::Outline,
            OutlineMode::Flat => SegmentStrategy::FlatOutline,
        };
        (strategy, build_chapters(&mut extractor, &outline.items)?)
    };
    let stats = extractor.stats();

    let document_info = DocumentInfo {
        total_pages,
        total_chapters: count_chapters(&chapters),
        failed_chapters: count_failed_chapters(&chapters),
        strategy,
        processed_at,
    };

    info!(
        total_pages,
        chapters = document_info.total_chapters,
        failed = document_info.failed_chapters,
        strategy = strategy.as_str(),
        pages_read = stats.pages_read,
        page_failures = stats.page_failures,
        "segmentation completed"
    );

    Ok(SegmentedDocument {
        document_info,
        chapters,
        stats,
    })
}
