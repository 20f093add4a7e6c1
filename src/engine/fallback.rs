use tracing::{info, warn};

use super::chapters::{Chapter, ChapterContent};
use super::error::SegmentResult;
use super::extract::BoundedExtractor;
use super::source::PageTextSource;

pub const DEFAULT_CHUNK_SIZE: usize = 20;

/// Splits a document without an outline into flat `Chunk n` chapters of
/// `chunk_size` pages; the last chunk takes whatever pages remain.
pub fn chunk_by_pages<S: PageTextSource>(
    extractor: &mut BoundedExtractor<'_, S>,
    chunk_size: usize,
) -> SegmentResult<Vec<Chapter>> {
    let total_pages = extractor.total_pages();
    let chunk_size = chunk_size.max(1);
    info!(total_pages, chunk_size, "no outline entries, chunking by pages");

    let mut chunks = Vec::with_capacity(total_pages.div_ceil(chunk_size));
    for (index, chunk_start) in (0..total_pages).step_by(chunk_size).enumerate() {
        let chunk_end = (chunk_start + chunk_size).min(total_pages);
        let title = format!("Chunk {}", index + 1);
        let chapter_number = (index + 1).to_string();

        let chapter = match extractor.extract(chunk_start, chunk_end) {
            Ok(text) => Chapter::extracted(
                title,
                chapter_number,
                0,
                ChapterContent::new(text, chunk_start + 1, chunk_end),
                Vec::new(),
            ),
            Err(error) if error.is_fatal() => return Err(error),
            Err(error) => {
                warn!(chunk = index + 1, error = %error, "chunk extraction failed");
                Chapter::failed(title, chapter_number, 0, error)
            }
        };
        chunks.push(chapter);
    }

    Ok(chunks)
}
