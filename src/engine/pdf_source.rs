use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use regex::Regex;
use tracing::debug;

use super::error::{SegmentError, SegmentResult};
use super::source::{Destination, OutlineEntry, PageTextSource, RawOutline, RawOutlineItem};

/// PDF opened through the poppler command-line tools.
///
/// The handle keeps the file open for the duration of one run and is released
/// when dropped, on success and error paths alike.
#[derive(Debug)]
pub struct PdfDocument {
    path: PathBuf,
    _file: File,
    page_count: usize,
}

impl PdfDocument {
    pub fn open(path: &Path) -> SegmentResult<Self> {
        let file = File::open(path).map_err(|err| {
            SegmentError::document_read(format!("failed to open {}: {}", path.display(), err))
        })?;

        let output = run_tool(Command::new("pdfinfo").arg(path), "pdfinfo", path)
            .map_err(SegmentError::document_read)?;
        let page_count = parse_pdfinfo_pages(&String::from_utf8_lossy(&output.stdout))?;

        debug!(path = %path.display(), pages = page_count, "opened pdf document");

        Ok(Self {
            path: path.to_path_buf(),
            _file: file,
            page_count,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for PdfDocument {
    fn drop(&mut self) {
        debug!(path = %self.path.display(), "released pdf document");
    }
}

impl PageTextSource for PdfDocument {
    fn page_count(&self) -> SegmentResult<usize> {
        Ok(self.page_count)
    }

    fn page_text(&mut self, index: usize) -> SegmentResult<String> {
        let page_number = index + 1;
        if index >= self.page_count {
            return Err(SegmentError::Extraction {
                page: page_number,
                reason: format!("document has {} pages", self.page_count),
            });
        }

        let page_arg = page_number.to_string();
        let mut command = Command::new("pdftotext");
        command
            .arg("-enc")
            .arg("UTF-8")
            .arg("-f")
            .arg(&page_arg)
            .arg("-l")
            .arg(&page_arg)
            .arg(&self.path)
            .arg("-");

        let output = run_tool(&mut command, "pdftotext", &self.path).map_err(|reason| {
            SegmentError::Extraction {
                page: page_number,
                reason,
            }
        })?;

        Ok(String::from_utf8_lossy(&output.stdout).replace(['\u{000C}', '\u{0000}'], ""))
    }

    fn destination_page_number(&self, entry: &OutlineEntry) -> SegmentResult<usize> {
        let title = entry.title.clone().unwrap_or_default();
        match entry.destination {
            Destination::Page(index) if index < self.page_count => Ok(index),
            Destination::Page(index) => Err(SegmentError::UnresolvableDestination {
                title,
                reason: format!(
                    "page index {} is outside a document of {} pages",
                    index, self.page_count
                ),
            }),
            Destination::Missing => Err(SegmentError::UnresolvableDestination {
                title,
                reason: "entry has no page destination".to_string(),
            }),
        }
    }

    fn outline(&self) -> SegmentResult<RawOutline> {
        let mut command = Command::new("pdftohtml");
        command
            .arg("-xml")
            .arg("-i")
            .arg("-f")
            .arg("1")
            .arg("-l")
            .arg("1")
            .arg(&self.path)
            .arg("-stdout");

        let output =
            run_tool(&mut command, "pdftohtml", &self.path).map_err(SegmentError::document_read)?;
        parse_outline_xml(&String::from_utf8_lossy(&output.stdout))
    }
}

fn run_tool(command: &mut Command, program: &str, path: &Path) -> Result<Output, String> {
    let output = command
        .output()
        .map_err(|err| format!("failed to execute {} for {}: {}", program, path.display(), err))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!(
            "{} returned non-zero exit status for {}: {}",
            program,
            path.display(),
            stderr.trim()
        ));
    }

    Ok(output)
}

pub fn parse_pdfinfo_pages(info: &str) -> SegmentResult<usize> {
    let pages_regex = Regex::new(r"(?m)^Pages:\s+(\d+)\s*$")?;
    pages_regex
        .captures(info)
        .and_then(|captures| captures.get(1))
        .and_then(|value| value.as_str().parse::<usize>().ok())
        .ok_or_else(|| SegmentError::document_read("pdfinfo output has no page count"))
}

/// Reads the `<outline>` tree of `pdftohtml -xml` output.
///
/// pdftohtml writes a child `<outline>` right after its parent `<item>`, which
/// is the same flat-list-with-inline-groups shape the engine consumes. Item
/// pages are 1-based; an item without a page attribute has no destination.
pub fn parse_outline_xml(xml: &str) -> SegmentResult<RawOutline> {
    let token_regex =
        Regex::new(r#"(?s)<outline>|</outline>|<item(?:\s+page="(-?\d+)")?[^>]*>(.*?)</item>"#)?;
    let tag_regex = Regex::new(r"<[^>]+>")?;

    let mut stack = Vec::<Vec<RawOutlineItem>>::new();
    let mut root = None;

    for captures in token_regex.captures_iter(xml) {
        let token = captures.get(0).map(|value| value.as_str()).unwrap_or_default();

        if token == "<outline>" {
            stack.push(Vec::new());
            continue;
        }

        if token == "</outline>" {
            let Some(finished) = stack.pop() else {
                return Err(SegmentError::document_read("unbalanced </outline> in pdftohtml output"));
            };
            match stack.last_mut() {
                Some(parent) => parent.push(RawOutlineItem::Nested(finished)),
                None => {
                    root = Some(finished);
                    break;
                }
            }
            continue;
        }

        let Some(current) = stack.last_mut() else {
            continue;
        };

        let raw_label = captures.get(2).map(|value| value.as_str()).unwrap_or_default();
        let title = normalize_outline_label(&tag_regex.replace_all(raw_label, ""));
        let destination = captures
            .get(1)
            .and_then(|value| value.as_str().parse::<i64>().ok())
            .filter(|page| *page >= 1)
            .map(|page| Destination::Page((page - 1) as usize))
            .unwrap_or(Destination::Missing);

        current.push(RawOutlineItem::Entry(OutlineEntry {
            title: if title.is_empty() { None } else { Some(title) },
            destination,
        }));
    }

    if root.is_none() && !stack.is_empty() {
        return Err(SegmentError::document_read("unterminated <outline> in pdftohtml output"));
    }

    Ok(root.unwrap_or_default())
}

pub fn normalize_outline_label(raw_label: &str) -> String {
    raw_label
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&#39;", "'")
        .replace('\u{00a0}', " ")
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
}
