//! CLI UI utilities for terminal output.
//!
//! Colored rendering of scanned segments and document overlays, status
//! icons, and the citation table.

use comfy_table::{Attribute, Cell, Color, Table};
use owo_colors::{AnsiColors, OwoColorize};
use serde::Serialize;

use crate::models::{
    ActivityType, Citation, DocumentSpan, DocumentType, RiskLevel, SpanKind, TextSegment,
};
use crate::utils::{citation_table_columns, single_line, truncate_with_ellipsis};

/// Status icons for different operations.
pub fn status_icon(status: Status) -> &'static str {
    match status {
        Status::Success => "✓",
        Status::Warning => "⚠",
        Status::Info => "ℹ",
    }
}

/// Status types for colored output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Warning,
    Info,
}

/// Print a styled status message.
#[macro_export]
macro_rules! print_status {
    ($status:expr, $msg:expr) => {{
        use owo_colors::OwoColorize;
        use $crate::ui::{status_icon, Status};
        let icon = status_icon($status);
        match $status {
            Status::Success => println!("{} {}", icon.green().bold(), $msg),
            Status::Warning => println!("{} {}", icon.yellow().bold(), $msg),
            Status::Info => println!("{} {}", icon.cyan().bold(), $msg),
        }
    }};
}

/// Print a section header.
pub fn print_section(title: &str) {
    println!();
    println!("{}", format!("━━━ {} ━━━", title).bold().cyan());
}

/// Render segments inline, coloring citations and search matches.
///
/// Without color the text is returned unchanged.
pub fn paint_segments(segments: &[TextSegment], colored: bool) -> String {
    segments
        .iter()
        .map(|segment| match segment {
            TextSegment::Plain { text } => text.clone(),
            _ if !colored => segment.text().to_string(),
            TextSegment::Citation { text, .. } => text.cyan().underline().to_string(),
            TextSegment::SearchMatch { text } => text.black().on_yellow().to_string(),
        })
        .collect()
}

/// Render document spans inline, coloring the cited passage and matches.
pub fn paint_spans(spans: &[DocumentSpan], colored: bool) -> String {
    spans
        .iter()
        .map(|span| match (span.kind, colored) {
            (SpanKind::Plain, _) | (_, false) => span.text.clone(),
            (SpanKind::CitedPassage, true) => span.text.black().on_green().to_string(),
            (SpanKind::SearchMatch, true) => span.text.black().on_yellow().to_string(),
        })
        .collect()
}

/// One-line summary of a citation with its document type icon.
pub fn citation_line(citation: &Citation) -> String {
    let doc_type = DocumentType::from_file_name(&citation.document_name);
    format!(
        "{} {} · pg {} · para {}",
        doc_type.icon(),
        citation.document_name.color(doc_type.color()).bold(),
        citation.page,
        citation.paragraph
    )
}

/// Build the citation table sized for the given terminal width.
pub fn citation_table(citations: &[Citation], terminal_width: usize) -> Table {
    let (document_width, _, snippet_width) = citation_table_columns(terminal_width);

    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["#", "Document", "Location", "Highlight"]);

    for (i, citation) in citations.iter().enumerate() {
        let doc_type = DocumentType::from_file_name(&citation.document_name);
        let document = format!(
            "{} {}",
            doc_type.icon(),
            truncate_with_ellipsis(&citation.document_name, document_width)
        );
        let highlight = if citation.has_highlight() {
            Cell::new(truncate_with_ellipsis(
                &single_line(&citation.highlight_text),
                snippet_width,
            ))
        } else {
            Cell::new("—").fg(Color::DarkGrey)
        };

        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(document).add_attribute(Attribute::Bold),
            Cell::new(format!("pg {}, para {}", citation.page, citation.paragraph)),
            highlight,
        ]);
    }

    table
}

/// One row of the category legend
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub category: &'static str,
    pub icon: &'static str,
    pub label: &'static str,
    #[serde(skip)]
    pub color: AnsiColors,
}

/// Icons and labels for every document type, activity type and risk level
pub fn legend_entries() -> Vec<LegendEntry> {
    let documents = DocumentType::ALL.iter().map(|t| LegendEntry {
        category: "document",
        icon: t.icon(),
        label: t.label(),
        color: t.color(),
    });
    let activities = ActivityType::ALL.iter().map(|a| LegendEntry {
        category: "activity",
        icon: a.icon(),
        label: a.label(),
        color: a.color(),
    });
    let risks = RiskLevel::ALL.iter().map(|r| LegendEntry {
        category: "risk",
        icon: r.icon(),
        label: r.label(),
        color: r.color(),
    });

    documents.chain(activities).chain(risks).collect()
}

/// Legend row rendered inline, label in its category color.
pub fn legend_line(entry: &LegendEntry, colored: bool) -> String {
    if colored {
        format!("{} {}", entry.icon, entry.label.color(entry.color))
    } else {
        format!("{} {}", entry.icon, entry.label)
    }
}

/// Build the category legend table.
pub fn legend_table(entries: &[LegendEntry]) -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["Category", "Icon", "Label"]);

    for entry in entries {
        table.add_row(vec![
            Cell::new(entry.category).fg(Color::DarkGrey),
            Cell::new(entry.icon),
            Cell::new(entry.label).add_attribute(Attribute::Bold),
        ]);
    }

    table
}
