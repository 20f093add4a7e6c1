use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PdfEntry {
    pub filename: String,
    pub title: String,
    pub size_bytes: u64,
    pub sha256: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PdfInventoryManifest {
    pub manifest_version: u32,
    pub generated_at: String,
    pub source_directory: String,
    pub pdf_count: usize,
    pub pdfs: Vec<PdfEntry>,
}

/// Pointer to the most recent segment run, rewritten after every run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStateManifest {
    pub last_run_id: Option<String>,
    pub status: Option<String>,
    pub source_pdf: Option<String>,
    pub manifest_path: Option<String>,
    pub output_path: Option<String>,
    pub failure_reason: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolVersions {
    pub pdfinfo: Option<String>,
    pub pdftotext: Option<String>,
    pub pdftohtml: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentPaths {
    pub cache_root: String,
    pub manifest_dir: String,
    pub source_pdf: String,
    pub output_path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SegmentCounts {
    pub total_pages: usize,
    pub chapters_total: usize,
    pub top_level_chapters: usize,
    pub failed_chapters: usize,
    pub pages_read: usize,
    pub page_failures: usize,
    pub extraction_batches: usize,
    /// Sum over top-level chapters; nested ranges overlap their parents.
    pub words_total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentRunManifest {
    pub manifest_version: u32,
    pub run_id: String,
    pub status: String,
    pub started_at: String,
    pub updated_at: String,
    pub strategy: Option<String>,
    pub outline_mode: String,
    pub batch_size: usize,
    pub chunk_size: usize,
    pub failure_reason: Option<String>,
    pub command: String,
    pub tool_versions: ToolVersions,
    pub paths: SegmentPaths,
    pub source_sha256: Option<String>,
    pub counts: SegmentCounts,
    pub warnings: Vec<String>,
}
