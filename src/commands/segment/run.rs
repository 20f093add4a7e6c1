use super::*;

pub fn run(args: SegmentArgs) -> Result<()> {
    let started_ts = Utc::now();
    let started_at = now_utc_string();
    let run_stamp = utc_compact_string(started_ts);
    let run_id = format!("run-{}", run_stamp);

    let cache_root = args.cache_root.clone();
    let manifest_dir = cache_root.join("manifests");
    ensure_directory(&manifest_dir)?;

    let manifest_path = manifest_dir.join(format!("segment_run_{}.json", run_stamp));
    let output_path = args
        .output_path
        .clone()
        .unwrap_or_else(|| default_output_path(&cache_root, &args.pdf, &run_stamp));

    info!(
        pdf = %args.pdf.display(),
        run_id = %run_id,
        outline_mode = args.outline_mode.as_str(),
        "starting segmentation"
    );

    let mut manifest = SegmentRunManifest {
        manifest_version: 1,
        run_id,
        status: "running".to_string(),
        started_at,
        updated_at: now_utc_string(),
        strategy: None,
        outline_mode: args.outline_mode.as_str().to_string(),
        batch_size: args.batch_size,
        chunk_size: args.chunk_size,
        failure_reason: None,
        command: render_segment_command(&args),
        tool_versions: collect_tool_versions(),
        paths: SegmentPaths {
            cache_root: cache_root.display().to_string(),
            manifest_dir: manifest_dir.display().to_string(),
            source_pdf: args.pdf.display().to_string(),
            output_path: None,
        },
        source_sha256: None,
        counts: SegmentCounts::default(),
        warnings: Vec::new(),
    };

    let segmented = segment_pdf(&args, &mut manifest);
    manifest.updated_at = now_utc_string();

    let mut document = match segmented {
        Ok(document) => document,
        Err(err) => {
            manifest.status = "failed".to_string();
            manifest.failure_reason = Some(format!("{:#}", err));
            write_json_pretty(&manifest_path, &manifest)?;
            write_run_state(&manifest_dir, &manifest, &manifest_path)?;
            warn!(path = %manifest_path.display(), "wrote failed segment run manifest");
            return Err(err);
        }
    };

    manifest.strategy = Some(document.document_info.strategy.as_str().to_string());
    manifest.counts = summarize_counts(&document);
    collect_failure_warnings(&document.chapters, &mut manifest.warnings);

    if args.omit_text {
        strip_chapter_text(&mut document.chapters);
    }

    write_json_pretty(&output_path, &document)?;
    info!(path = %output_path.display(), "wrote segmented document");

    manifest.status = "completed".to_string();
    manifest.paths.output_path = Some(output_path.display().to_string());
    write_json_pretty(&manifest_path, &manifest)?;
    write_run_state(&manifest_dir, &manifest, &manifest_path)?;

    info!(path = %manifest_path.display(), "wrote segment run manifest");
    info!(
        chapters = manifest.counts.chapters_total,
        failed = manifest.counts.failed_chapters,
        words = manifest.counts.words_total,
        "segment completed"
    );

    Ok(())
}

fn segment_pdf(args: &SegmentArgs, manifest: &mut SegmentRunManifest) -> Result<SegmentedDocument> {
    let size_bytes = check_file_size(&args.pdf, args.max_file_bytes)?;
    manifest.source_sha256 = Some(sha256_file(&args.pdf)?);

    let options = SegmentOptions {
        batch_size: args.batch_size,
        chunk_size: args.chunk_size,
        outline_mode: args.outline_mode,
    };

    // The document handle is released when this scope ends, on success or error.
    let mut document = PdfDocument::open(&args.pdf)
        .with_context(|| format!("failed to open {}", args.pdf.display()))?;
    info!(
        path = %document.path().display(),
        size_bytes,
        "opened document"
    );

    let segmented = segment_document(&mut document, &options)
        .with_context(|| format!("failed to segment {}", args.pdf.display()))?;

    Ok(segmented)
}
