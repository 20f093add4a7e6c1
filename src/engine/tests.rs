use std::collections::HashSet;

use super::pdf_source::{normalize_outline_label, parse_outline_xml, parse_pdfinfo_pages};
use super::ranges::normalize_range;
use super::*;

/// In-memory document: page `n` reads as "page n text" unless listed as
/// failing, or unless every page read fails with `page_error`.
struct MemorySource {
    total_pages: usize,
    failing_pages: HashSet<usize>,
    page_error: Option<SegmentError>,
    outline: SegmentResult<RawOutline>,
    page_count_error: Option<SegmentError>,
    reads: Vec<usize>,
    reclaims: usize,
}

impl MemorySource {
    fn new(total_pages: usize, outline: RawOutline) -> Self {
        Self {
            total_pages,
            failing_pages: HashSet::new(),
            page_error: None,
            outline: Ok(outline),
            page_count_error: None,
            reads: Vec::new(),
            reclaims: 0,
        }
    }

    fn failing(mut self, index: usize) -> Self {
        self.failing_pages.insert(index);
        self
    }

    fn vanished(mut self) -> Self {
        self.page_error = Some(SegmentError::document_read("file removed"));
        self
    }
}

impl PageTextSource for MemorySource {
    fn page_count(&self) -> SegmentResult<usize> {
        match &self.page_count_error {
            Some(error) => Err(error.clone()),
            None => Ok(self.total_pages),
        }
    }

    fn page_text(&mut self, index: usize) -> SegmentResult<String> {
        self.reads.push(index);
        if let Some(error) = &self.page_error {
            return Err(error.clone());
        }
        if self.failing_pages.contains(&index) {
            return Err(SegmentError::Extraction {
                page: index + 1,
                reason: "corrupt content stream".to_string(),
            });
        }
        Ok(format!("page {} text", index + 1))
    }

    fn destination_page_number(&self, entry: &OutlineEntry) -> SegmentResult<usize> {
        match entry.destination {
            Destination::Page(index) if index < self.total_pages => Ok(index),
            _ => Err(SegmentError::UnresolvableDestination {
                title: entry.title.clone().unwrap_or_default(),
                reason: "no such page".to_string(),
            }),
        }
    }

    fn outline(&self) -> SegmentResult<RawOutline> {
        self.outline.clone()
    }

    fn reclaim(&mut self) {
        self.reclaims += 1;
    }
}

fn entry(title: &str, page_index: usize) -> RawOutlineItem {
    RawOutlineItem::Entry(OutlineEntry::at_page(title, page_index))
}

fn missing(title: &str) -> RawOutlineItem {
    RawOutlineItem::Entry(OutlineEntry::new(title, Destination::Missing))
}

fn nested(items: Vec<RawOutlineItem>) -> RawOutlineItem {
    RawOutlineItem::Nested(items)
}

fn normalizer() -> TextNormalizer {
    TextNormalizer::new().expect("normalizer patterns compile")
}

fn resolve(source: &MemorySource) -> Vec<ResolvedItem> {
    resolve_outline(source, OutlineMode::Nested)
        .expect("outline resolves")
        .items
}

fn node(item: &ResolvedItem) -> &OutlineNode {
    item.as_node().expect("node resolved")
}

fn content(chapter: &Chapter) -> &ChapterContent {
    chapter.content().expect("chapter extracted")
}

fn assert_range_invariants(items: &[ResolvedItem], total_pages: usize) {
    for item in items {
        let Some(node) = item.as_node() else {
            continue;
        };
        assert!(node.start_page <= node.end_page, "{} reversed", node.title);
        assert!(node.start_page >= 1 && node.end_page <= total_pages);
        assert_eq!(node.page_count, node.end_page - node.start_page + 1);
        assert_range_invariants(&node.children, total_pages);
    }
}

#[test]
fn normalize_text_breaks_sentences_and_capitalizes() {
    let normalizer = normalizer();
    let normalized = normalizer.normalize("the  first\tline\n\nends here. and then?  yes!   done");
    assert_eq!(normalized, "The first line ends here.\nAnd then?\nYes!\nDone");
}

#[test]
fn normalize_text_expands_lowercase_contractions() {
    let normalizer = normalizer();
    assert_eq!(
        normalizer.normalize("so we can't stop. it won't end and they'll know we've seen what you're doing"),
        "So we cannot stop.\nIt will not end and they will know we have seen what you are doing"
    );
    assert_eq!(
        normalizer.normalize("yes, i'm sure she'd say it's fine"),
        "Yes, I'm sure she would say it is fine"
    );
}

#[test]
fn normalize_text_leaves_capitalized_contractions_alone() {
    let normalizer = normalizer();
    assert_eq!(normalizer.normalize("can't stop now"), "Can't stop now");
    assert_eq!(normalizer.normalize("don't panic"), "Don't panic");
}

#[test]
fn normalize_text_lowercases_after_first_letter() {
    let normalizer = normalizer();
    assert_eq!(normalizer.normalize("NASA launched. WE watched"), "Nasa launched.\nWe watched");
}

#[test]
fn normalize_text_handles_empty_input() {
    let normalizer = normalizer();
    assert_eq!(normalizer.normalize(""), "");
    assert_eq!(normalizer.normalize(" \n\t "), "");
}

#[test]
fn normalize_text_restores_pronoun_on_every_pass() {
    let normalizer = normalizer();
    let once = normalizer.normalize("then i'm here");
    assert_eq!(once, "Then I'm here");
    assert_eq!(normalizer.normalize(&once), once);
}

#[test]
fn normalize_text_is_not_idempotent() {
    let normalizer = normalizer();
    let once = normalizer.normalize("ßtraße ahead");
    assert_eq!(once, "SStraße ahead");
    assert_eq!(normalizer.normalize(&once), "Sstraße ahead");
}

#[test]
fn word_count_splits_on_whitespace() {
    assert_eq!(word_count("\n( Page 1 )\n\nHello world\n\n"), 6);
    assert_eq!(word_count(""), 0);
}

#[test]
fn normalize_outline_attaches_trailing_groups_as_children() {
    let raw = vec![
        entry("Part I", 0),
        nested(vec![
            entry("Chapter 1", 1),
            nested(vec![entry("Section 1.1", 2)]),
            entry("Chapter 2", 4),
        ]),
        entry("Part II", 6),
    ];

    let items = normalize_outline(&raw);
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].title, "Part I");
    assert_eq!(items[0].children.len(), 2);
    assert_eq!(items[0].children[0].children[0].title, "Section 1.1");
    assert_eq!(items[0].children[0].children[0].level, 2);
    assert_eq!(items[1].level, 0);
    assert!(items[0].followed_by_sibling);
    assert!(!items[1].followed_by_sibling);
    assert_eq!(count_outline_items(&items), 5);
}

#[test]
fn normalize_outline_drops_orphan_groups_and_defaults_titles() {
    let raw = vec![
        nested(vec![entry("Orphan", 0)]),
        RawOutlineItem::Entry(OutlineEntry {
            title: Some("   ".to_string()),
            destination: Destination::Page(1),
        }),
        RawOutlineItem::Entry(OutlineEntry {
            title: None,
            destination: Destination::Page(2),
        }),
    ];

    let items = normalize_outline(&raw);
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].title, UNTITLED_PLACEHOLDER);
    assert_eq!(items[1].title, UNTITLED_PLACEHOLDER);
    assert!(items.iter().all(|item| item.children.is_empty()));
}

#[test]
fn describe_raw_outline_marks_orphan_groups() {
    let raw = vec![entry("A", 0), nested(vec![entry("B", 1)]), nested(vec![entry("C", 2)])];
    let lines = describe_raw_outline(&raw);
    assert_eq!(
        lines,
        vec![
            "- A".to_string(),
            "+ [group at level 0]".to_string(),
            "  - B".to_string(),
            "+ [orphan group at level 0]".to_string(),
            "  - C".to_string(),
        ]
    );
}

#[test]
fn resolve_ranges_uses_next_sibling_and_document_end() {
    let source = MemorySource::new(30, vec![entry("One", 0), entry("Two", 9), entry("Three", 19)]);
    let items = resolve(&source);

    let ranges = items
        .iter()
        .map(|item| (node(item).start_page, node(item).end_page, node(item).page_count))
        .collect::<Vec<_>>();
    assert_eq!(ranges, vec![(1, 9, 9), (10, 19, 10), (20, 30, 11)]);
    assert_range_invariants(&items, 30);
}

#[test]
fn resolve_ranges_adjusts_parent_to_first_child() {
    let source = MemorySource::new(
        10,
        vec![entry("A", 0), nested(vec![entry("B", 2), entry("C", 6)])],
    );
    let items = resolve(&source);

    let a = node(&items[0]);
    assert_eq!((a.start_page, a.end_page, a.page_count, a.level), (1, 2, 2, 0));

    let b = node(&a.children[0]);
    assert_eq!((b.start_page, b.end_page, b.level), (3, 6, 1));
    assert_eq!(b.parent, Some(a.id));

    let c = node(&a.children[1]);
    assert_eq!((c.start_page, c.end_page, c.level), (7, 10, 1));
    assert_eq!(a.end_page, b.start_page - 1);
    assert_range_invariants(&items, 10);
}

#[test]
fn resolve_ranges_keeps_parent_range_when_first_child_unresolved() {
    let source = MemorySource::new(
        10,
        vec![entry("A", 0), nested(vec![missing("B"), entry("C", 5)])],
    );
    let items = resolve(&source);

    let a = node(&items[0]);
    assert_eq!((a.start_page, a.end_page, a.page_count), (1, 10, 10));
    assert!(a.children[0].as_node().is_none());
    assert_eq!(a.children[0].start_page(), None);

    let c = node(&a.children[1]);
    assert_eq!((c.start_page, c.end_page), (6, 10));
    assert_range_invariants(&items, 10);
}

#[test]
fn resolve_ranges_swaps_reversed_destinations() {
    let source = MemorySource::new(20, vec![entry("Late", 11), entry("Early", 4)]);
    let items = resolve(&source);

    let late = node(&items[0]);
    assert_eq!((late.start_page, late.end_page, late.page_count), (4, 12, 9));
    let early = node(&items[1]);
    assert_eq!((early.start_page, early.end_page), (5, 20));
    assert_range_invariants(&items, 20);
}

#[test]
fn resolve_ranges_swaps_parent_sharing_page_with_first_child() {
    let source = MemorySource::new(
        10,
        vec![entry("Part", 4), nested(vec![entry("Opening", 4)])],
    );
    let items = resolve(&source);

    let part = node(&items[0]);
    assert_eq!((part.start_page, part.end_page, part.page_count), (4, 5, 2));
    assert_range_invariants(&items, 10);
}

#[test]
fn resolve_ranges_skips_unresolvable_siblings_when_searching_forward() {
    let source = MemorySource::new(
        12,
        vec![entry("First", 0), missing("Broken"), entry("Third", 7)],
    );
    let items = resolve(&source);

    assert_eq!(node(&items[0]).end_page, 7);
    assert!(matches!(
        &items[1],
        ResolvedItem::Unresolved { error: SegmentError::UnresolvableDestination { .. }, .. }
    ));
    assert_eq!((node(&items[2]).start_page, node(&items[2]).end_page), (8, 12));
}

#[test]
fn resolve_ranges_stops_sibling_chain_at_orphan_group() {
    let source = MemorySource::new(
        20,
        vec![
            entry("A", 0),
            nested(vec![entry("A.1", 1)]),
            nested(vec![entry("Lost", 3)]),
            entry("D", 9),
        ],
    );
    let items = resolve(&source);

    assert_eq!(items.len(), 2);
    let a = node(&items[0]);
    assert_eq!(a.children.len(), 1);
    assert_eq!(node(&a.children[0]).end_page, 20);
    assert_eq!((a.start_page, a.end_page), (1, 1));
    assert_eq!(node(&items[1]).start_page, 10);
}

#[test]
fn resolve_ranges_discards_children_of_unresolved_entry() {
    let source = MemorySource::new(8, vec![missing("Ghost"), nested(vec![entry("Child", 2)])]);
    let items = resolve(&source);

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title(), "Ghost");
    assert_eq!(items[0].level(), 0);
    assert!(items[0].as_node().is_none());
}

#[test]
fn normalize_range_clamps_into_document() {
    assert_eq!(normalize_range(0, 3, 10), (1, 3));
    assert_eq!(normalize_range(9, 40, 10), (9, 10));
    assert_eq!(normalize_range(7, 2, 10), (2, 7));
    assert_eq!(normalize_range(1, 1, 0), (0, 0));
}

#[test]
fn extractor_emits_page_markers_and_batches() {
    let normalizer = normalizer();
    let mut source = MemorySource::new(12, Vec::new());
    let mut extractor = BoundedExtractor::new(&mut source, &normalizer, 12, 5);

    let text = extractor.extract(0, 12).expect("range extracts");
    assert!(text.starts_with("\n( Page 1 )\n\nPage 1 text\n\n"));
    assert!(text.ends_with("\n( Page 12 )\n\nPage 12 text\n\n"));
    assert_eq!(text.matches("( Page ").count(), 12);

    let stats = extractor.stats();
    assert_eq!(stats.batches, 3);
    assert_eq!(stats.pages_read, 12);
    assert_eq!(source.reclaims, 3);
    assert_eq!(source.reads, (0..12).collect::<Vec<_>>());
}

#[test]
fn extractor_swaps_and_clamps_bounds() {
    let normalizer = normalizer();
    let mut source = MemorySource::new(4, Vec::new());
    let mut extractor = BoundedExtractor::new(&mut source, &normalizer, 4, 5);

    let text = extractor.extract(9, 2).expect("range extracts");
    assert_eq!(text, "\n( Page 3 )\n\nPage 3 text\n\n\n( Page 4 )\n\nPage 4 text\n\n");
}

#[test]
fn extractor_returns_empty_for_empty_document() {
    let normalizer = normalizer();
    let mut source = MemorySource::new(0, Vec::new());
    let mut extractor = BoundedExtractor::new(&mut source, &normalizer, 0, 5);

    assert_eq!(extractor.extract(0, 0).expect("range extracts"), "");
    assert_eq!(extractor.stats().batches, 0);
}

#[test]
fn extractor_keeps_marker_for_failing_page() {
    let normalizer = normalizer();

    let mut clean = MemorySource::new(3, Vec::new());
    let clean_text = BoundedExtractor::new(&mut clean, &normalizer, 3, 5)
        .extract(0, 3)
        .expect("range extracts");

    let mut broken = MemorySource::new(3, Vec::new()).failing(1);
    let mut extractor = BoundedExtractor::new(&mut broken, &normalizer, 3, 5);
    let broken_text = extractor.extract(0, 3).expect("range extracts");

    assert_eq!(broken_text, clean_text.replace("Page 2 text", ""));
    assert_eq!(extractor.stats().page_failures, 1);
    assert_eq!(extractor.stats().pages_read, 2);
}

#[test]
fn extractor_aborts_range_on_non_page_error() {
    struct VanishingSource;

    impl PageTextSource for VanishingSource {
        fn page_count(&self) -> SegmentResult<usize> {
            Ok(3)
        }

        fn page_text(&mut self, _index: usize) -> SegmentResult<String> {
            Err(SegmentError::document_read("file removed"))
        }

        fn destination_page_number(&self, _entry: &OutlineEntry) -> SegmentResult<usize> {
            Ok(0)
        }

        fn outline(&self) -> SegmentResult<RawOutline> {
            Ok(Vec::new())
        }
    }

    let normalizer = normalizer();
    let mut source = VanishingSource;
    let mut extractor = BoundedExtractor::new(&mut source, &normalizer, 3, 5);
    assert!(matches!(
        extractor.extract(0, 3),
        Err(SegmentError::DocumentRead { .. })
    ));
}

#[test]
fn segment_document_builds_numbered_tree() {
    let mut source = MemorySource::new(
        10,
        vec![entry("A", 0), nested(vec![entry("B", 2), entry("C", 6)])],
    );
    let document = segment_document(&mut source, &SegmentOptions::default()).expect("segments");

    assert_eq!(document.document_info.total_pages, 10);
    assert_eq!(document.document_info.total_chapters, 3);
    assert_eq!(document.document_info.failed_chapters, 0);
    assert_eq!(document.document_info.strategy, SegmentStrategy::Outline);

    let a = &document.chapters[0];
    assert_eq!((a.chapter_number.as_str(), a.level), ("1", 0));
    assert_eq!((content(a).start_page, content(a).end_page), (1, 2));
    assert!(content(a).text.contains("( Page 2 )"));
    assert!(!content(a).text.contains("( Page 3 )"));

    let b = &a.children[0];
    assert_eq!((b.chapter_number.as_str(), b.level), ("1.1", 1));
    assert_eq!((content(b).start_page, content(b).end_page), (3, 6));

    let c = &a.children[1];
    assert_eq!((c.chapter_number.as_str(), c.level), ("1.2", 1));
    assert_eq!((content(c).start_page, content(c).end_page, content(c).page_count), (7, 10, 4));
    assert_eq!(content(c).word_count, word_count(&content(c).text));
}

#[test]
fn segment_document_numbers_siblings_and_children() {
    let mut source = MemorySource::new(
        10,
        vec![
            entry("A", 0),
            entry("B", 2),
            nested(vec![entry("C", 4), entry("D", 6)]),
        ],
    );
    let document = segment_document(&mut source, &SegmentOptions::default()).expect("segments");

    fn numbers(chapters: &[Chapter], out: &mut Vec<String>) {
        for chapter in chapters {
            out.push(chapter.chapter_number.clone());
            numbers(&chapter.children, out);
        }
    }

    let mut collected = Vec::new();
    numbers(&document.chapters, &mut collected);
    assert_eq!(collected, vec!["1", "2", "2.1", "2.2"]);
    assert_eq!(count_chapters(&document.chapters), 4);
}

#[test]
fn segment_document_keeps_siblings_of_failed_entry() {
    let mut source = MemorySource::new(
        9,
        vec![entry("Intro", 0), missing("Broken"), entry("Body", 4)],
    );
    let document = segment_document(&mut source, &SegmentOptions::default()).expect("segments");

    assert_eq!(document.chapters.len(), 3);
    assert_eq!(document.document_info.failed_chapters, 1);

    let broken = &document.chapters[1];
    assert_eq!(broken.chapter_number, "2");
    assert!(broken.content().is_none());
    assert!(broken.children.is_empty());
    assert!(matches!(
        broken.error(),
        Some(SegmentError::UnresolvableDestination { .. })
    ));

    assert_eq!((content(&document.chapters[0]).start_page, content(&document.chapters[0]).end_page), (1, 4));
    assert_eq!((content(&document.chapters[2]).start_page, content(&document.chapters[2]).end_page), (5, 9));
}

#[test]
fn segment_document_chunks_when_outline_is_empty() {
    let mut source = MemorySource::new(45, Vec::new());
    let document = segment_document(&mut source, &SegmentOptions::default()).expect("segments");

    assert_eq!(document.document_info.strategy, SegmentStrategy::PageChunks);
    let ranges = document
        .chapters
        .iter()
        .map(|chapter| {
            (
                chapter.title.as_str(),
                chapter.chapter_number.as_str(),
                content(chapter).start_page,
                content(chapter).end_page,
                content(chapter).page_count,
            )
        })
        .collect::<Vec<_>>();
    assert_eq!(
        ranges,
        vec![
            ("Chunk 1", "1", 1, 20, 20),
            ("Chunk 2", "2", 21, 40, 20),
            ("Chunk 3", "3", 41, 45, 5),
        ]
    );
    assert!(document.chapters.iter().all(|chapter| chapter.level == 0 && chapter.children.is_empty()));
    assert_eq!(document.stats.pages_read, 45);
}

#[test]
fn segment_document_chunks_when_outline_has_only_orphans() {
    let mut source = MemorySource::new(5, vec![nested(vec![entry("Orphan", 0)])]);
    let document = segment_document(&mut source, &SegmentOptions::default()).expect("segments");

    assert_eq!(document.document_info.strategy, SegmentStrategy::PageChunks);
    assert_eq!(document.chapters.len(), 1);
}

#[test]
fn segment_document_flat_mode_ignores_nesting() {
    let mut source = MemorySource::new(
        10,
        vec![entry("A", 0), nested(vec![entry("B", 2)]), entry("C", 6)],
    );
    let options = SegmentOptions {
        outline_mode: OutlineMode::Flat,
        ..SegmentOptions::default()
    };
    let document = segment_document(&mut source, &options).expect("segments");

    assert_eq!(document.document_info.strategy, SegmentStrategy::FlatOutline);
    assert_eq!(document.chapters.len(), 2);
    assert!(document.chapters[0].children.is_empty());
    assert_eq!((content(&document.chapters[0]).start_page, content(&document.chapters[0]).end_page), (1, 6));
    assert_eq!((content(&document.chapters[1]).start_page, content(&document.chapters[1]).end_page), (7, 10));
}

#[test]
fn segment_document_fails_when_outline_unreadable() {
    let mut source = MemorySource::new(5, Vec::new());
    source.outline = Err(SegmentError::document_read("broken outline dictionary"));

    let error = segment_document(&mut source, &SegmentOptions::default()).expect_err("fatal");
    assert!(error.is_fatal());
    assert!(source.reads.is_empty());
}

#[test]
fn segment_document_fails_when_page_count_unreadable() {
    let mut source = MemorySource::new(5, Vec::new());
    source.page_count_error = Some(SegmentError::document_read("no page tree"));

    assert!(matches!(
        segment_document(&mut source, &SegmentOptions::default()),
        Err(SegmentError::DocumentRead { .. })
    ));
}

#[test]
fn segment_document_fails_when_page_source_vanishes() {
    let mut source = MemorySource::new(6, vec![entry("First", 0), entry("Second", 3)]).vanished();

    let error = segment_document(&mut source, &SegmentOptions::default()).expect_err("fatal");
    assert!(matches!(error, SegmentError::DocumentRead { .. }));
    assert_eq!(source.reads, vec![0]);
}

#[test]
fn segment_document_fails_when_pages_vanish_while_chunking() {
    let mut source = MemorySource::new(45, Vec::new()).vanished();

    assert!(matches!(
        segment_document(&mut source, &SegmentOptions::default()),
        Err(SegmentError::DocumentRead { .. })
    ));
    assert_eq!(source.reads, vec![0]);
}

#[test]
fn segment_document_absorbs_page_failures() {
    let mut source = MemorySource::new(4, vec![entry("Only", 0)]).failing(2);
    let document = segment_document(&mut source, &SegmentOptions::default()).expect("segments");

    assert_eq!(document.document_info.failed_chapters, 0);
    assert_eq!(document.stats.page_failures, 1);
    let text = &content(&document.chapters[0]).text;
    assert!(text.contains("\n( Page 3 )\n\n\n\n"));
}

#[test]
fn chapter_serializes_error_marker_without_content() {
    let chapter = Chapter::failed(
        "Broken",
        "2".to_string(),
        0,
        SegmentError::UnresolvableDestination {
            title: "Broken".to_string(),
            reason: "no such page".to_string(),
        },
    );

    let value = serde_json::to_value(&chapter).expect("serializes");
    assert_eq!(value["title"], "Broken");
    assert_eq!(value["error"]["kind"], "unresolvable_destination");
    assert!(value.get("text").is_none());
    assert!(value.get("word_count").is_none());
}

#[test]
fn parse_outline_xml_reads_nested_items() {
    let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<pdf2xml producer="poppler" version="23.08.0">
<page number="1" position="absolute" top="0" left="0" height="1188" width="918">
<text top="100" left="100" width="50" height="12" font="0">Cover</text>
</page>
<outline>
<item page="1">Part One &amp; Two</item>
<outline>
<item page="3">Chapter <b>1</b></item>
<item>Dangling</item>
</outline>
<item page="7">Part Three</item>
</outline>
</pdf2xml>"#;

    let outline = parse_outline_xml(xml).expect("outline parses");
    assert_eq!(
        outline,
        vec![
            entry("Part One & Two", 0),
            nested(vec![entry("Chapter 1", 2), missing("Dangling")]),
            entry("Part Three", 6),
        ]
    );
}

#[test]
fn parse_outline_xml_without_outline_is_empty() {
    let xml = "<pdf2xml><page number=\"1\"></page></pdf2xml>";
    assert!(parse_outline_xml(xml).expect("parses").is_empty());
}

#[test]
fn parse_outline_xml_rejects_unterminated_outline() {
    let xml = "<outline><item page=\"1\">A</item>";
    assert!(matches!(
        parse_outline_xml(xml),
        Err(SegmentError::DocumentRead { .. })
    ));
}

#[test]
fn parse_pdfinfo_pages_reads_page_line() {
    let info = "Producer:       LaTeX\nPages:          45\nEncrypted:      no\n";
    assert_eq!(parse_pdfinfo_pages(info).expect("pages"), 45);
    assert!(parse_pdfinfo_pages("Producer: x\n").is_err());
}

#[test]
fn normalize_outline_label_decodes_entities_and_spaces() {
    assert_eq!(normalize_outline_label("  Tom&apos;s\u{00a0} &quot;Book&quot; "), "Tom's \"Book\"");
}
