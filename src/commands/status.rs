use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::cli::StatusArgs;
use crate::model::{PdfInventoryManifest, RunStateManifest, SegmentRunManifest};

pub fn run(args: StatusArgs) -> Result<()> {
    let manifest_dir = args.cache_root.join("manifests");
    let run_state_path = manifest_dir.join("run_state.json");
    let inventory_path = manifest_dir.join("pdf_inventory.json");

    info!(cache_root = %args.cache_root.display(), "status requested");

    if run_state_path.exists() {
        let state: RunStateManifest = read_json(&run_state_path)?;

        info!(
            run_id = %state.last_run_id.unwrap_or_default(),
            status = %state.status.unwrap_or_default(),
            source_pdf = %state.source_pdf.unwrap_or_default(),
            manifest_path = %state.manifest_path.unwrap_or_default(),
            output_path = %state.output_path.unwrap_or_default(),
            failure_reason = %state.failure_reason.unwrap_or_default(),
            updated_at = %state.updated_at.unwrap_or_default(),
            "loaded run-state manifest"
        );
    } else {
        warn!(path = %run_state_path.display(), "run-state manifest missing");
    }

    match latest_segment_manifest(&manifest_dir)? {
        Some(path) => {
            let manifest: SegmentRunManifest = read_json(&path)?;
            info!(
                path = %path.display(),
                run_id = %manifest.run_id,
                status = %manifest.status,
                strategy = %manifest.strategy.unwrap_or_default(),
                total_pages = manifest.counts.total_pages,
                chapters = manifest.counts.chapters_total,
                failed_chapters = manifest.counts.failed_chapters,
                page_failures = manifest.counts.page_failures,
                warnings = manifest.warnings.len(),
                "latest segment run"
            );
        }
        None => warn!(path = %manifest_dir.display(), "no segment run manifests"),
    }

    if inventory_path.exists() {
        let inventory: PdfInventoryManifest = read_json(&inventory_path)?;

        info!(
            generated_at = %inventory.generated_at,
            pdf_count = inventory.pdf_count,
            "loaded inventory manifest"
        );
    } else {
        warn!(path = %inventory_path.display(), "inventory manifest missing");
    }

    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_slice(&raw).with_context(|| format!("failed to parse {}", path.display()))
}

/// Run manifests carry a compact UTC stamp, so the greatest name is the newest.
fn latest_segment_manifest(manifest_dir: &Path) -> Result<Option<PathBuf>> {
    if !manifest_dir.exists() {
        return Ok(None);
    }

    let mut latest: Option<PathBuf> = None;
    let entries = fs::read_dir(manifest_dir)
        .with_context(|| format!("failed to read {}", manifest_dir.display()))?;
    for entry in entries {
        let entry =
            entry.with_context(|| format!("failed to read entry in {}", manifest_dir.display()))?;
        let path = entry.path();
        let is_run_manifest = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(|name| name.starts_with("segment_run_") && name.ends_with(".json"))
            .unwrap_or(false);

        if is_run_manifest && latest.as_ref().is_none_or(|current| path > *current) {
            latest = Some(path);
        }
    }

    Ok(latest)
}
