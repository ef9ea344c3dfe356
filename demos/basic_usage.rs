//! Basic usage example for the CER Citations library.
//!
//! This example scans an analysis transcript for citation markers, resolves
//! their highlight snippets and overlays one of them on the cited document.

use cer_citations::models::{ActivityType, DocumentType, RiskLevel, SegmentKind, SpanKind};
use cer_citations::{CitationScanner, HighlightTable};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Highlight snippets, keyed by location or by document name
    let highlights = HighlightTable::new()
        .with_entry(
            "SOC 2 Type II Report-p12-para3",
            "Logical access to production systems is restricted to authorized personnel",
        )
        .with_entry("Access Control Policy", "Access reviews are performed quarterly");

    let scanner = CitationScanner::new(highlights).max_matches(25);

    let transcript = "Access is limited to named engineers \
        [SOC 2 Type II Report, pg 12, para 3]. Reviews follow the documented cadence \
        [Access Control Policy, pg 4, para 1].";

    // List every citation with its resolved snippet
    let citations = scanner.extract_citations(transcript);
    println!("Found {} citations\n", citations.len());

    for (i, citation) in citations.iter().enumerate() {
        println!("{}. {}", i + 1, citation);
        if citation.has_highlight() {
            println!("   Highlight: {}", citation.highlight_text);
        }
    }

    // Split the transcript into renderable segments, marking a search term
    println!("\nSegments:");
    for segment in scanner.try_render_segments(transcript, Some("access"))? {
        let label = match segment.kind() {
            SegmentKind::Plain => "text",
            SegmentKind::Citation => "cite",
            SegmentKind::SearchMatch => "hit ",
        };
        println!("  [{}] {:?}", label, segment.text());
    }

    // Overlay the first citation's snippet on the cited document
    let document = "Section 3. Logical access to production systems is restricted to \
        authorized personnel. Access is revoked within one business day of termination.";

    if let Some(citation) = citations.first() {
        println!("\nCited passage in {}:", citation.document_name);
        for span in scanner.highlight_citation(document, citation, Some("termination")) {
            if span.kind != SpanKind::Plain {
                println!("  {}: {}", span.kind, span.text);
            }
        }
    }

    // Review activity with a risk rating, as recorded next to the evidence
    let activity = [
        ("upload", "low", "SOC 2 Type II Report.pdf"),
        ("analysis", "high", "Access Control Policy.docx"),
        ("status change", "moderate", "Access Control Policy.docx"),
    ];

    println!("\nActivity:");
    let mut highest = RiskLevel::Low;
    for (kind, risk, document) in activity {
        let kind: ActivityType = kind.parse()?;
        let risk: RiskLevel = risk.parse()?;
        highest = highest.max(risk);
        println!(
            "  {} {:<14} {} {:<7} {} {}",
            kind.icon(),
            kind.label(),
            risk.icon(),
            risk.label(),
            DocumentType::from_file_name(document).icon(),
            document
        );
    }
    println!("Highest risk: {}", highest);

    Ok(())
}
