use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result, bail};
use chrono::Utc;
use tracing::{info, warn};

use crate::cli::SegmentArgs;
use crate::engine::{
    Chapter, ChapterOutcome, OutlineMode, PdfDocument, SegmentOptions, SegmentedDocument,
    segment_document,
};
use crate::model::{
    RunStateManifest, SegmentCounts, SegmentPaths, SegmentRunManifest, ToolVersions,
};
use crate::util::{
    ensure_directory, file_size, now_utc_string, sha256_file, utc_compact_string,
    write_json_pretty,
};

mod manifest;
mod run;

pub use run::run;

use manifest::*;
