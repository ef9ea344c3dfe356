//! Integration tests for CER Citations
//!
//! These tests exercise the public scanner API end to end: extraction,
//! segment rendering, highlight lookup, document overlay and configuration.

use cer_citations::config::{load_config, sample_config, save_file};
use cer_citations::models::{join_segments, join_spans, SegmentKind, SpanKind};
use cer_citations::scanner::CitationPattern;
use cer_citations::{Citation, CitationScanner, HighlightTable, ScanError, TextSegment};
use std::io::Write;

/// A looser marker pattern that lets non-numeric locations through
const LOOSE_PATTERN: &str =
    r"\[(?P<document>[^,]+),\s*pg\s*(?P<page>\w*),\s*para\s*(?P<paragraph>\w*)\]";

fn review_highlights() -> HighlightTable {
    HighlightTable::new()
        .with_entry(
            "SOC 2 Type II Report-p12-para3",
            "Logical access to production systems is restricted",
        )
        .with_entry("Access Control Policy", "Access reviews are performed quarterly")
        .with_entry("DocX", "fallback snippet")
}

fn markers(count: usize) -> String {
    (0..count)
        .map(|i| format!("[Doc {}, pg {}, para 1]", i, i + 1))
        .collect::<Vec<_>>()
        .join(" and ")
}

fn segment_kinds(segments: &[TextSegment]) -> Vec<(SegmentKind, &str)> {
    segments.iter().map(|s| (s.kind(), s.text())).collect()
}

#[test]
fn test_extract_two_citations_in_order() {
    let scanner = CitationScanner::default();
    let citations = scanner.extract_citations("[Doc A, pg 3, para 2] hello [Doc B, pg 10, para 1]");

    assert_eq!(citations.len(), 2);
    assert_eq!(citations[0].document_name, "Doc A");
    assert_eq!(citations[0].page, 3);
    assert_eq!(citations[0].paragraph, 2);
    assert_eq!(citations[1].document_name, "Doc B");
    assert_eq!(citations[1].page, 10);
    assert_eq!(citations[1].paragraph, 1);
}

#[test]
fn test_extract_from_review_transcript() {
    let scanner = CitationScanner::new(review_highlights());
    let transcript = "The control is designed appropriately \
        [SOC 2 Type II Report, pg 12, para 3]. Reviews happen on schedule \
        [Access Control Policy, pg 4, para 1], see also [Vendor List, pg 2, para 9].";

    let citations = scanner.extract_citations(transcript);
    assert_eq!(citations.len(), 3);
    assert_eq!(
        citations[0].highlight_text,
        "Logical access to production systems is restricted"
    );
    assert_eq!(citations[1].highlight_text, "Access reviews are performed quarterly");
    assert_eq!(citations[2].highlight_text, "");
}

#[test]
fn test_malformed_markers_are_skipped() {
    let pattern = CitationPattern::new(LOOSE_PATTERN).unwrap();
    let scanner = CitationScanner::default().with_pattern(pattern);

    let citations = scanner.extract_citations(
        "[Doc A, pg three, para 2] then [Doc B, pg 4, para 1] then [Doc C, pg 5, para ]",
    );

    assert_eq!(citations.len(), 1);
    assert_eq!(citations[0].document_name, "Doc B");
}

#[test]
fn test_overflowing_location_is_skipped() {
    let scanner = CitationScanner::default();
    let citations =
        scanner.extract_citations("[Huge, pg 99999999999, para 1] [Fine, pg 1, para 1]");

    assert_eq!(citations.len(), 1);
    assert_eq!(citations[0].document_name, "Fine");
}

#[test]
fn test_malformed_marker_stays_plain_when_rendering() {
    let pattern = CitationPattern::new(LOOSE_PATTERN).unwrap();
    let scanner = CitationScanner::default().with_pattern(pattern);
    let text = "see [Doc A, pg x, para 2] and [Doc B, pg 4, para 1]";

    let segments = scanner.render_segments(text, None);
    assert_eq!(join_segments(&segments), text);
    assert_eq!(
        segments.iter().filter(|s| s.kind() == SegmentKind::Citation).count(),
        1
    );
    assert_eq!(segments[0].text(), "see [Doc A, pg x, para 2] and ");
}

#[test]
fn test_cap_limits_extraction_to_first_fifty() {
    let scanner = CitationScanner::default();
    let citations = scanner.extract_citations(&markers(80));

    assert_eq!(citations.len(), 50);
    assert_eq!(citations[0].document_name, "Doc 0");
    assert_eq!(citations[49].document_name, "Doc 49");
}

#[test]
fn test_cap_counts_skipped_matches() {
    let scanner = CitationScanner::default().max_matches(2);
    let citations = scanner
        .extract_citations("[A, pg 99999999999, para 1] [B, pg 1, para 1] [C, pg 2, para 2]");

    assert_eq!(citations.len(), 1);
    assert_eq!(citations[0].document_name, "B");
}

#[test]
fn test_non_ascii_digit_markers_do_not_use_up_cap() {
    let scanner = CitationScanner::default();
    let text = format!("{}[Real, pg 1, para 1]", "[D, pg ٣, para 1] ".repeat(50));

    let citations = scanner.extract_citations(&text);
    assert_eq!(citations.len(), 1);
    assert_eq!(citations[0].document_name, "Real");

    let segments = scanner.render_segments(&text, None);
    assert_eq!(join_segments(&segments), text);
    assert_eq!(
        segments.iter().filter(|s| s.kind() == SegmentKind::Citation).count(),
        1
    );
}

#[test]
fn test_cap_leaves_later_markers_as_plain_text() {
    let scanner = CitationScanner::default();
    let text = markers(80);

    let segments = scanner.render_segments(&text, None);
    assert_eq!(join_segments(&segments), text);
    assert_eq!(
        segments.iter().filter(|s| s.kind() == SegmentKind::Citation).count(),
        50
    );
    let last = segments.last().unwrap();
    assert_eq!(last.kind(), SegmentKind::Plain);
    assert!(last.text().contains("[Doc 79, pg 80, para 1]"));
}

#[test]
fn test_highlight_falls_back_to_document_name() {
    let scanner = CitationScanner::new(HighlightTable::from_iter([("DocX", "fallback snippet")]));

    let citations = scanner.extract_citations("[DocX, pg 1, para 1]");
    assert_eq!(citations[0].highlight_text, "fallback snippet");
    assert_eq!(scanner.find_associated_document("DocX", 1, 1), "fallback snippet");
}

#[test]
fn test_unmapped_citation_has_empty_highlight() {
    let scanner = CitationScanner::new(review_highlights());

    let citations = scanner.extract_citations("[Unknown Memo, pg 1, para 1]");
    assert_eq!(citations[0].highlight_text, "");
    assert!(!citations[0].has_highlight());
    assert_eq!(scanner.find_associated_document("Unknown Memo", 1, 1), "");
}

#[test]
fn test_query_is_matched_literally() {
    let scanner = CitationScanner::default();
    let segments = scanner.render_segments("price is $5.00 (final)", Some("$5.00 (final)"));

    assert_eq!(
        segment_kinds(&segments),
        vec![
            (SegmentKind::Plain, "price is "),
            (SegmentKind::SearchMatch, "$5.00 (final)"),
        ]
    );
}

#[test]
fn test_query_is_case_insensitive_and_skips_citations() {
    let scanner = CitationScanner::default();
    let text = "Access granted [Access Policy, pg 1, para 1] after ACCESS review";

    let segments = scanner.render_segments(text, Some("access"));
    assert_eq!(join_segments(&segments), text);
    assert_eq!(
        segment_kinds(&segments),
        vec![
            (SegmentKind::SearchMatch, "Access"),
            (SegmentKind::Plain, " granted "),
            (SegmentKind::Citation, "[Access Policy, pg 1, para 1]"),
            (SegmentKind::Plain, " after "),
            (SegmentKind::SearchMatch, "ACCESS"),
            (SegmentKind::Plain, " review"),
        ]
    );
}

#[test]
fn test_render_round_trip() {
    let scanner = CitationScanner::new(review_highlights());
    let texts = [
        "",
        "no markers at all",
        "[DocX, pg 1, para 1]",
        "lead [A, pg 1, para 2][B, pg 3, para 4] tail",
        "émoji 🚀 [Rapport été, pg 2, para 3] ünïcode",
        "[[[[Doc, pg 1, para 1]]]]",
        "[Doc, pg 3",
    ];
    let queries = [None, Some(""), Some("a"), Some("pg"), Some("🚀"), Some(".*")];

    for text in texts {
        for query in queries {
            let segments = scanner.render_segments(text, query);
            assert_eq!(join_segments(&segments), text, "query {:?}", query);
            assert!(segments.iter().all(|s| !s.text().is_empty()));
        }
    }
}

#[test]
fn test_citation_segment_carries_citation() {
    let scanner = CitationScanner::new(review_highlights());
    let segments = scanner.render_segments("See [DocX, pg 1, para 1].", None);

    assert_eq!(segments.len(), 3);
    let citation = segments[1].citation_ref().unwrap();
    assert_eq!(citation, &Citation::new("DocX", 1, 1).with_highlight("fallback snippet"));
}

#[test]
fn test_adversarial_inputs_do_not_fail() {
    let scanner = CitationScanner::default();
    let brackets = "[".repeat(5000);
    let nested = format!("{}Doc, pg 1, para 1{}", "[".repeat(200), "]".repeat(200));
    let inputs = [brackets.as_str(), nested.as_str(), "", "[Doc, pg 3", "]]]][[[[,,,"];

    for input in inputs {
        let citations = scanner.extract_citations(input);
        assert!(citations.len() <= 1);

        let segments = scanner.render_segments(input, Some("["));
        assert_eq!(join_segments(&segments), input);
    }

    assert!(scanner.extract_citations("").is_empty());
    assert!(scanner.render_segments("", None).is_empty());
    assert_eq!(
        segment_kinds(&scanner.render_segments("[Doc, pg 3", None)),
        vec![(SegmentKind::Plain, "[Doc, pg 3")]
    );
}

#[test]
fn test_oversized_query_degrades_to_plain_text() {
    let scanner = CitationScanner::default().query_size_limit(1024);
    let text = "see [Doc A, pg 3, para 2]";
    let query = "x".repeat(10_000);

    let result = scanner.try_render_segments(text, Some(&query));
    assert!(matches!(result, Err(ScanError::QueryTooLarge { .. })));

    let segments = scanner.render_segments(text, Some(&query));
    assert_eq!(segment_kinds(&segments), vec![(SegmentKind::Plain, text)]);
}

#[test]
fn test_extraction_is_idempotent() {
    let text = markers(10);
    let scanner = CitationScanner::new(review_highlights());

    let first = scanner.extract_citations(&text);
    let second = scanner.extract_citations(&text);
    assert_eq!(first, second);

    let other = CitationScanner::new(review_highlights());
    assert_eq!(other.extract_citations(&text), first);

    // A different text in between must not shift the next scan
    let _ = scanner.extract_citations("[Z, pg 9, para 9]");
    assert_eq!(scanner.extract_citations(&text), first);
}

#[test]
fn test_scanner_is_shareable_across_threads() {
    let scanner = std::sync::Arc::new(CitationScanner::new(review_highlights()));
    let text = markers(20);
    let expected = scanner.extract_citations(&text);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let scanner = scanner.clone();
            let text = text.clone();
            std::thread::spawn(move || scanner.extract_citations(&text))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn test_unique_citations_drop_repeats() {
    let scanner = CitationScanner::default();
    let citations = scanner
        .unique_citations("[A, pg 1, para 1] [B, pg 1, para 1] [A, pg 1, para 1] [A, pg 2, para 1]");

    let names: Vec<_> = citations
        .iter()
        .map(|c| (c.document_name.as_str(), c.page))
        .collect();
    assert_eq!(names, vec![("A", 1), ("B", 1), ("A", 2)]);
}

#[test]
fn test_zero_page_and_paragraph_are_accepted() {
    let scanner = CitationScanner::default();
    let citations = scanner.extract_citations("[Cover Letter, pg 0, para 0]");

    assert_eq!(citations.len(), 1);
    assert_eq!(citations[0].page, 0);
    assert_eq!(citations[0].paragraph, 0);
}

#[test]
fn test_highlight_document_marks_first_passage() {
    let scanner = CitationScanner::default();
    let document = "Access is reviewed. ACCESS IS REVIEWED again. Logs are kept.";

    let spans = scanner.highlight_document(document, "access is reviewed", Some("logs"));
    assert_eq!(join_spans(&spans), document);

    let kinds: Vec<_> = spans.iter().map(|s| (s.kind, s.text.as_str())).collect();
    assert_eq!(
        kinds,
        vec![
            (SpanKind::CitedPassage, "Access is reviewed"),
            (SpanKind::Plain, ". ACCESS IS REVIEWED again. "),
            (SpanKind::SearchMatch, "Logs"),
            (SpanKind::Plain, " are kept."),
        ]
    );
}

#[test]
fn test_highlight_document_without_passage_match() {
    let scanner = CitationScanner::default();
    let document = "Nothing to see here.";

    let spans = scanner.highlight_document(document, "missing passage", None);
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].kind, SpanKind::Plain);
    assert_eq!(spans[0].text, document);
}

#[test]
fn test_highlight_citation_uses_table_snippet() {
    let scanner = CitationScanner::new(review_highlights());
    let document = "Policy text. Access reviews are performed quarterly by owners.";
    let citation = Citation::new("Access Control Policy", 2, 1);

    let spans = scanner.highlight_citation(document, &citation, None);
    assert_eq!(join_spans(&spans), document);
    assert!(spans
        .iter()
        .any(|s| s.kind == SpanKind::CitedPassage
            && s.text == "Access reviews are performed quarterly"));
}

#[test]
fn test_config_file_drives_scanner() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        r#"
[scanner]
max_matches = 3

[highlights]
"DocX" = "fallback snippet"
"Audit Log-p2-para5" = "retained for one year"
"#
    )
    .unwrap();

    let config = load_config(file.path()).unwrap();
    let scanner = CitationScanner::from_config(&config.scanner, config.highlights).unwrap();

    let citations = scanner.extract_citations(&format!("[Audit Log, pg 2, para 5] {}", markers(5)));
    assert_eq!(citations.len(), 3);
    assert_eq!(citations[0].highlight_text, "retained for one year");
}

#[test]
fn test_config_with_invalid_pattern_is_rejected() {
    let mut config = sample_config().scanner;
    config.pattern = Some(r"\[(?P<document>[^,]+)\]".to_string());

    let result = CitationScanner::from_config(&config, HighlightTable::new());
    assert!(matches!(result, Err(ScanError::MissingGroup("page"))));
}

#[test]
fn test_sample_config_round_trip_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("cer-citations.toml");

    save_file(&sample_config(), &path).unwrap();
    let loaded = load_config(&path).unwrap();

    assert_eq!(loaded.highlights, sample_config().highlights);
    let scanner = CitationScanner::new(loaded.highlights);
    assert_eq!(
        scanner.find_associated_document("Incident Response Plan", 4, 2),
        "within 72 hours of discovery"
    );
}
