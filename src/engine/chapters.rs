use serde::Serialize;
use tracing::{debug, warn};

use super::error::{SegmentError, SegmentResult};
use super::extract::BoundedExtractor;
use super::ranges::{OutlineNode, ResolvedItem, page_count};
use super::source::PageTextSource;
use super::text::word_count;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChapterContent {
    pub text: String,
    pub word_count: usize,
    pub start_page: usize,
    pub end_page: usize,
    pub page_count: usize,
}

impl ChapterContent {
    pub fn new(text: String, start_page: usize, end_page: usize) -> Self {
        Self {
            word_count: word_count(&text),
            text,
            start_page,
            end_page,
            page_count: page_count(start_page, end_page),
        }
    }
}

/// Either the extracted content of a chapter or the error that replaced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ChapterOutcome {
    Extracted(ChapterContent),
    Failed { error: SegmentError },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chapter {
    pub title: String,
    pub chapter_number: String,
    pub level: usize,
    #[serde(flatten)]
    pub outcome: ChapterOutcome,
    pub children: Vec<Chapter>,
}

impl Chapter {
    pub fn extracted(
        title: impl Into<String>,
        chapter_number: String,
        level: usize,
        content: ChapterContent,
        children: Vec<Chapter>,
    ) -> Self {
        Self {
            title: title.into(),
            chapter_number,
            level,
            outcome: ChapterOutcome::Extracted(content),
            children,
        }
    }

    pub fn failed(
        title: impl Into<String>,
        chapter_number: String,
        level: usize,
        error: SegmentError,
    ) -> Self {
        Self {
            title: title.into(),
            chapter_number,
            level,
            outcome: ChapterOutcome::Failed { error },
            children: Vec::new(),
        }
    }

    pub fn content(&self) -> Option<&ChapterContent> {
        match &self.outcome {
            ChapterOutcome::Extracted(content) => Some(content),
            ChapterOutcome::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&SegmentError> {
        match &self.outcome {
            ChapterOutcome::Extracted(_) => None,
            ChapterOutcome::Failed { error } => Some(error),
        }
    }
}

pub fn count_chapters(chapters: &[Chapter]) -> usize {
    chapters
        .iter()
        .map(|chapter| 1 + count_chapters(&chapter.children))
        .sum()
}

pub fn count_failed_chapters(chapters: &[Chapter]) -> usize {
    chapters
        .iter()
        .map(|chapter| {
            usize::from(chapter.error().is_some()) + count_failed_chapters(&chapter.children)
        })
        .sum()
}

/// Builds the chapter tree depth-first, numbering siblings `1`, `2`, … and
/// children `<parent>.<n>`.
///
/// A node that cannot be built is kept as a failed chapter without children;
/// its siblings are still built. Fatal errors abort the whole build.
pub fn build_chapters<S: PageTextSource>(
    extractor: &mut BoundedExtractor<'_, S>,
    items: &[ResolvedItem],
) -> SegmentResult<Vec<Chapter>> {
    build_level(extractor, items, None)
}

fn build_level<S: PageTextSource>(
    extractor: &mut BoundedExtractor<'_, S>,
    items: &[ResolvedItem],
    parent_number: Option<&str>,
) -> SegmentResult<Vec<Chapter>> {
    let mut chapters = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let chapter_number = match parent_number {
            Some(parent) => format!("{}.{}", parent, index + 1),
            None => (index + 1).to_string(),
        };
        chapters.push(build_chapter(extractor, item, chapter_number)?);
    }
    Ok(chapters)
}

fn build_chapter<S: PageTextSource>(
    extractor: &mut BoundedExtractor<'_, S>,
    item: &ResolvedItem,
    chapter_number: String,
) -> SegmentResult<Chapter> {
    let node = match item {
        ResolvedItem::Resolved(node) => node,
        ResolvedItem::Unresolved {
            title,
            level,
            error,
            ..
        } => {
            return Ok(Chapter::failed(
                title.clone(),
                chapter_number,
                *level,
                error.clone(),
            ));
        }
    };

    let children = build_level(extractor, &node.children, Some(&chapter_number))?;

    match extract_node(extractor, node) {
        Ok(content) => {
            debug!(
                chapter = %chapter_number,
                start_page = content.start_page,
                end_page = content.end_page,
                words = content.word_count,
                "built chapter"
            );
            Ok(Chapter::extracted(
                node.title.clone(),
                chapter_number,
                node.level,
                content,
                children,
            ))
        }
        Err(error) if error.is_fatal() => Err(error),
        Err(error) => {
            warn!(
                chapter = %chapter_number,
                title = %node.title,
                error = %error,
                "chapter extraction failed"
            );
            Ok(Chapter::failed(
                node.title.clone(),
                chapter_number,
                node.level,
                error,
            ))
        }
    }
}

fn extract_node<S: PageTextSource>(
    extractor: &mut BoundedExtractor<'_, S>,
    node: &OutlineNode,
) -> Result<ChapterContent, SegmentError> {
    let text = extractor.extract(node.start_page.saturating_sub(1), node.end_page)?;
    Ok(ChapterContent::new(text, node.start_page, node.end_page))
}
