use serde::Serialize;
use tracing::{debug, warn};

use super::error::{SegmentError, SegmentResult};
use super::source::PageTextSource;
use super::text::TextNormalizer;

pub const DEFAULT_BATCH_SIZE: usize = 5;

/// Page counters accumulated over every range read during one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionStats {
    pub pages_read: usize,
    pub page_failures: usize,
    pub batches: usize,
}

/// Reads page ranges in fixed-size batches so that only one batch of page
/// text is held at a time, whatever the length of the range.
pub struct BoundedExtractor<'a, S: PageTextSource> {
    source: &'a mut S,
    normalizer: &'a TextNormalizer,
    total_pages: usize,
    batch_size: usize,
    stats: ExtractionStats,
}

impl<'a, S: PageTextSource> BoundedExtractor<'a, S> {
    pub fn new(
        source: &'a mut S,
        normalizer: &'a TextNormalizer,
        total_pages: usize,
        batch_size: usize,
    ) -> Self {
        Self {
            source,
            normalizer,
            total_pages,
            batch_size: batch_size.max(1),
            stats: ExtractionStats::default(),
        }
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn stats(&self) -> ExtractionStats {
        self.stats
    }

    /// Extracts pages `[start_page_idx, end_page_idx)` (zero-based), each
    /// preceded by a `( Page n )` marker.
    ///
    /// Reversed bounds are swapped and both are clamped to the page count. A
    /// page whose text cannot be decoded contributes its marker followed by the
    /// usual blank-line separator, with no text in between.
    pub fn extract(&mut self, start_page_idx: usize, end_page_idx: usize) -> SegmentResult<String> {
        let (mut start, mut end) = (start_page_idx, end_page_idx);
        if start > end {
            std::mem::swap(&mut start, &mut end);
        }
        let start = start.min(self.total_pages);
        let end = end.min(self.total_pages);

        let mut text = String::new();
        let mut batch_start = start;
        while batch_start < end {
            let batch_end = (batch_start + self.batch_size).min(end);

            let mut batch = Vec::<String>::with_capacity(batch_end - batch_start);
            for index in batch_start..batch_end {
                batch.push(self.read_page(index)?);
            }

            for (offset, page_text) in batch.iter().enumerate() {
                text.push_str(&format!("\n( Page {} )\n\n", batch_start + offset + 1));
                text.push_str(page_text);
                text.push_str("\n\n");
            }

            drop(batch);
            self.source.reclaim();
            self.stats.batches += 1;
            debug!(
                first_page = batch_start + 1,
                last_page = batch_end,
                "released extraction batch"
            );

            batch_start = batch_end;
        }

        Ok(text)
    }

    fn read_page(&mut self, index: usize) -> SegmentResult<String> {
        match self.source.page_text(index) {
            Ok(raw) => {
                self.stats.pages_read += 1;
                Ok(self.normalizer.normalize(&raw))
            }
            Err(SegmentError::Extraction { page, reason }) => {
                warn!(page, reason = %reason, "page text unreadable, treating as empty");
                self.stats.page_failures += 1;
                Ok(String::new())
            }
            Err(other) => Err(other),
        }
    }
}
