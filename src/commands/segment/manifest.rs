use super::*;

pub(super) fn collect_tool_versions() -> ToolVersions {
    ToolVersions {
        pdfinfo: command_version_optional("pdfinfo", &["-v"]),
        pdftotext: command_version_optional("pdftotext", &["-v"]),
        pdftohtml: command_version_optional("pdftohtml", &["-v"]),
    }
}

fn command_version_optional(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    let source = if stdout.trim().is_empty() {
        stderr.trim()
    } else {
        stdout.trim()
    };

    source
        .lines()
        .next()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| line.to_string())
}

pub(super) fn render_segment_command(args: &SegmentArgs) -> String {
    let mut command = vec![
        "booksplit".to_string(),
        "segment".to_string(),
        "--pdf".to_string(),
        args.pdf.display().to_string(),
        "--cache-root".to_string(),
        args.cache_root.display().to_string(),
    ];

    if let Some(path) = &args.output_path {
        command.push("--output-path".to_string());
        command.push(path.display().to_string());
    }
    command.push("--batch-size".to_string());
    command.push(args.batch_size.to_string());
    command.push("--chunk-size".to_string());
    command.push(args.chunk_size.to_string());
    if args.outline_mode != OutlineMode::Nested {
        command.push("--outline-mode".to_string());
        command.push(args.outline_mode.as_str().to_string());
    }
    command.push("--max-file-bytes".to_string());
    command.push(args.max_file_bytes.to_string());
    if args.omit_text {
        command.push("--omit-text".to_string());
    }

    command.join(" ")
}

pub(super) fn default_output_path(cache_root: &Path, pdf: &Path, run_stamp: &str) -> PathBuf {
    let stem = pdf
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .unwrap_or("document");

    cache_root
        .join("segments")
        .join(format!("{}_{}.json", stem, run_stamp))
}

/// Rejects inputs above `max_bytes`; a limit of zero accepts any size.
pub(super) fn check_file_size(pdf: &Path, max_bytes: u64) -> Result<u64> {
    let size = file_size(pdf)?;
    if max_bytes > 0 && size > max_bytes {
        bail!(
            "{} is {} bytes, above the {} byte limit",
            pdf.display(),
            size,
            max_bytes
        );
    }
    Ok(size)
}

pub(super) fn summarize_counts(document: &SegmentedDocument) -> SegmentCounts {
    SegmentCounts {
        total_pages: document.document_info.total_pages,
        chapters_total: document.document_info.total_chapters,
        top_level_chapters: document.chapters.len(),
        failed_chapters: document.document_info.failed_chapters,
        pages_read: document.stats.pages_read,
        page_failures: document.stats.page_failures,
        extraction_batches: document.stats.batches,
        words_total: document
            .chapters
            .iter()
            .filter_map(Chapter::content)
            .map(|content| content.word_count)
            .sum(),
    }
}

/// One warning per failed chapter, in tree order.
pub(super) fn collect_failure_warnings(chapters: &[Chapter], warnings: &mut Vec<String>) {
    for chapter in chapters {
        if let Some(error) = chapter.error() {
            warnings.push(format!(
                "chapter {} ({}) failed: {}",
                chapter.chapter_number, chapter.title, error
            ));
        }
        collect_failure_warnings(&chapter.children, warnings);
    }
}

pub(super) fn strip_chapter_text(chapters: &mut [Chapter]) {
    for chapter in chapters {
        if let ChapterOutcome::Extracted(content) = &mut chapter.outcome {
            content.text.clear();
        }
        strip_chapter_text(&mut chapter.children);
    }
}

pub(super) fn write_run_state(
    manifest_dir: &Path,
    manifest: &SegmentRunManifest,
    manifest_path: &Path,
) -> Result<()> {
    let state = RunStateManifest {
        last_run_id: Some(manifest.run_id.clone()),
        status: Some(manifest.status.clone()),
        source_pdf: Some(manifest.paths.source_pdf.clone()),
        manifest_path: Some(manifest_path.display().to_string()),
        output_path: manifest.paths.output_path.clone(),
        failure_reason: manifest.failure_reason.clone(),
        updated_at: Some(manifest.updated_at.clone()),
    };

    write_json_pretty(&manifest_dir.join("run_state.json"), &state)
}
