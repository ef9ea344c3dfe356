//! Citation and segment models produced by the scanner.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A reference to a paragraph of a cited document.
///
/// Citations are only built from markers whose page and paragraph both parse
/// as integers; there is no zero-valued placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Citation {
    /// Document title, trimmed of surrounding whitespace
    pub document_name: String,

    /// Page number as written in the marker
    pub page: u32,

    /// Paragraph number as written in the marker
    pub paragraph: u32,

    /// Snippet to emphasize when the citation is opened (empty if unmapped)
    #[serde(default)]
    pub highlight_text: String,
}

impl Citation {
    /// Create a citation with no highlight snippet
    pub fn new(document_name: impl Into<String>, page: u32, paragraph: u32) -> Self {
        Self {
            document_name: document_name.into().trim().to_string(),
            page,
            paragraph,
            highlight_text: String::new(),
        }
    }

    /// Set the highlight snippet
    pub fn with_highlight(mut self, highlight_text: impl Into<String>) -> Self {
        self.highlight_text = highlight_text.into();
        self
    }

    /// Key used by the highlight table for this exact location
    pub fn composite_key(&self) -> String {
        composite_key(&self.document_name, self.page, self.paragraph)
    }

    /// Whether two citations point at the same document, page and paragraph
    pub fn same_location(&self, other: &Citation) -> bool {
        self.document_name == other.document_name
            && self.page == other.page
            && self.paragraph == other.paragraph
    }

    /// Whether a highlight snippet is attached
    pub fn has_highlight(&self) -> bool {
        !self.highlight_text.is_empty()
    }
}

/// Renders the citation back into marker form, e.g. `[Policy, pg 3, para 2]`.
impl fmt::Display for Citation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, pg {}, para {}]",
            self.document_name, self.page, self.paragraph
        )
    }
}

/// Build the `"{document}-p{page}-para{paragraph}"` lookup key.
pub fn composite_key(document_name: &str, page: u32, paragraph: u32) -> String {
    format!("{}-p{}-para{}", document_name, page, paragraph)
}

/// Kind of a [`TextSegment`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SegmentKind {
    Plain,
    Citation,
    SearchMatch,
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentKind::Plain => write!(f, "plain"),
            SegmentKind::Citation => write!(f, "citation"),
            SegmentKind::SearchMatch => write!(f, "searchMatch"),
        }
    }
}

/// A classified slice of scanned text.
///
/// Segments returned by the scanner are contiguous and in order, so joining
/// their text reproduces the input exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TextSegment {
    /// Text with no special meaning
    Plain { text: String },

    /// A citation marker and the citation parsed from it
    Citation { text: String, citation: Citation },

    /// An occurrence of the search query
    SearchMatch { text: String },
}

impl TextSegment {
    pub fn plain(text: impl Into<String>) -> Self {
        TextSegment::Plain { text: text.into() }
    }

    pub fn citation(text: impl Into<String>, citation: Citation) -> Self {
        TextSegment::Citation {
            text: text.into(),
            citation,
        }
    }

    pub fn search_match(text: impl Into<String>) -> Self {
        TextSegment::SearchMatch { text: text.into() }
    }

    pub fn kind(&self) -> SegmentKind {
        match self {
            TextSegment::Plain { .. } => SegmentKind::Plain,
            TextSegment::Citation { .. } => SegmentKind::Citation,
            TextSegment::SearchMatch { .. } => SegmentKind::SearchMatch,
        }
    }

    /// The exact substring of the scanned text
    pub fn text(&self) -> &str {
        match self {
            TextSegment::Plain { text }
            | TextSegment::Citation { text, .. }
            | TextSegment::SearchMatch { text } => text,
        }
    }

    /// The parsed citation, for citation segments only
    pub fn citation_ref(&self) -> Option<&Citation> {
        match self {
            TextSegment::Citation { citation, .. } => Some(citation),
            _ => None,
        }
    }
}

/// Kind of a [`DocumentSpan`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SpanKind {
    Plain,
    CitedPassage,
    SearchMatch,
}

impl fmt::Display for SpanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpanKind::Plain => write!(f, "plain"),
            SpanKind::CitedPassage => write!(f, "citedPassage"),
            SpanKind::SearchMatch => write!(f, "searchMatch"),
        }
    }
}

/// A classified slice of a cited document's text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSpan {
    pub kind: SpanKind,
    pub text: String,
}

impl DocumentSpan {
    pub fn new(kind: SpanKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(SpanKind::Plain, text)
    }
}

/// Concatenate segment texts in order.
pub fn join_segments(segments: &[TextSegment]) -> String {
    segments.iter().map(TextSegment::text).collect()
}

/// Concatenate span texts in order.
pub fn join_spans(spans: &[DocumentSpan]) -> String {
    spans.iter().map(|s| s.text.as_str()).collect()
}
