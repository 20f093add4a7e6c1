use std::io::{self, Write};

use anyhow::{Context, Result};
use tracing::info;

use crate::cli::OutlineArgs;
use crate::engine::{
    PdfDocument, ResolvedItem, ResolvedOutline, describe_raw_outline, resolve_outline,
};

pub fn run(args: OutlineArgs) -> Result<()> {
    let document = PdfDocument::open(&args.pdf)
        .with_context(|| format!("failed to open {}", args.pdf.display()))?;
    let outline = resolve_outline(&document, args.outline_mode)
        .with_context(|| format!("failed to read outline of {}", args.pdf.display()))?;

    info!(
        total_pages = outline.total_pages,
        top_level = outline.items.len(),
        outline_mode = args.outline_mode.as_str(),
        "resolved outline"
    );

    let mut output = io::BufWriter::new(io::stdout().lock());
    if args.json {
        serde_json::to_writer_pretty(&mut output, &outline)
            .context("failed to serialize outline json output")?;
        writeln!(output)?;
    } else {
        write_outline_report(&mut output, &outline)?;
    }
    output.flush()?;

    Ok(())
}

fn write_outline_report<W: Write>(output: &mut W, outline: &ResolvedOutline) -> Result<()> {
    writeln!(output, "Pages: {}", outline.total_pages)?;

    writeln!(output, "Structure:")?;
    let structure = describe_raw_outline(&outline.raw);
    if structure.is_empty() {
        writeln!(output, "  (no outline)")?;
    }
    for line in structure {
        writeln!(output, "  {line}")?;
    }

    writeln!(output, "Ranges:")?;
    if outline.items.is_empty() {
        writeln!(output, "  (none, pages would be chunked)")?;
    }
    write_ranges(output, &outline.items)?;

    Ok(())
}

fn write_ranges<W: Write>(output: &mut W, items: &[ResolvedItem]) -> Result<()> {
    for item in items {
        let indent = "  ".repeat(item.level() + 1);
        match item {
            ResolvedItem::Resolved(node) => {
                writeln!(
                    output,
                    "{indent}{} [pages {}-{}, {} pages]",
                    node.title, node.start_page, node.end_page, node.page_count
                )?;
                write_ranges(output, &node.children)?;
            }
            ResolvedItem::Unresolved { error, .. } => {
                writeln!(output, "{indent}{} [unresolved: {error}]", item.title())?;
            }
        }
    }
    Ok(())
}
