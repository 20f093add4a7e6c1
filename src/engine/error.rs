use serde::Serialize;
use thiserror::Error;

/// Failures raised while segmenting one document.
///
/// `UnresolvableDestination` and `Extraction` are local to one outline node or
/// one page and are absorbed into the chapter tree. `DocumentRead` and
/// `Pattern` abort the whole run.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SegmentError {
    #[error("cannot resolve destination of outline entry '{title}': {reason}")]
    UnresolvableDestination { title: String, reason: String },

    #[error("failed to extract text from page {page}: {reason}")]
    Extraction { page: usize, reason: String },

    #[error("failed to read document: {message}")]
    DocumentRead { message: String },

    #[error("invalid text pattern: {message}")]
    Pattern { message: String },
}

impl SegmentError {
    pub fn document_read(message: impl Into<String>) -> Self {
        Self::DocumentRead {
            message: message.into(),
        }
    }

    /// True for errors that invalidate the whole document rather than one node.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::DocumentRead { .. } | Self::Pattern { .. })
    }
}

impl From<regex::Error> for SegmentError {
    fn from(err: regex::Error) -> Self {
        Self::Pattern {
            message: err.to_string(),
        }
    }
}

pub type SegmentResult<T> = std::result::Result<T, SegmentError>;
