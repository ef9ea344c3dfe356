//! Citation scanning and highlighting.
//!
//! The scanner finds `[Document, pg N, para M]` markers in analysis text and
//! turns them into [`Citation`]s or into [`TextSegment`]s for rendering. It
//! holds no scan state: every call runs its own scan from the start of its
//! input, so one scanner can be shared across views and threads.
//!
//! - [`CitationScanner::extract_citations`]: citations in first-seen order
//! - [`CitationScanner::unique_citations`]: same, one entry per location
//! - [`CitationScanner::render_segments`]: plain / citation / search-match slices
//! - [`CitationScanner::find_associated_document`]: highlight snippet lookup
//! - [`CitationScanner::highlight_document`]: cited passage and search overlay
//!   for the text of the cited document
//!
//! None of these fail. Problems degrade to a safe result (partial citations,
//! or the input as a single plain segment) and are logged with `tracing`.
//!
//! ```rust
//! use cer_citations::scanner::{CitationScanner, HighlightTable};
//! use cer_citations::models::SegmentKind;
//!
//! let table = HighlightTable::new().with_entry("Access Policy", "quarterly");
//! let scanner = CitationScanner::new(table);
//!
//! let text = "Reviews are quarterly [Access Policy, pg 3, para 2].";
//! let citations = scanner.extract_citations(text);
//! assert_eq!(citations[0].page, 3);
//! assert_eq!(citations[0].highlight_text, "quarterly");
//!
//! let segments = scanner.render_segments(text, Some("QUARTERLY"));
//! assert_eq!(segments[1].kind(), SegmentKind::SearchMatch);
//! ```

mod highlight;
mod overlay;
mod pattern;
mod search;

pub use highlight::HighlightTable;
pub use pattern::{CitationPattern, DEFAULT_CITATION_PATTERN, REQUIRED_GROUPS};

use crate::config::ScannerConfig;
use crate::models::{Citation, DocumentSpan, TextSegment};
use overlay::{optional_matcher, overlay};
use pattern::RawMarker;
use search::{split_by_matches, LiteralMatcher};

/// Maximum number of marker matches processed per call
pub const MAX_MATCHES: usize = 50;

/// Default compiled-size limit for search queries and passages, in bytes
pub const DEFAULT_QUERY_SIZE_LIMIT: usize = 1 << 20;

/// Scanner errors.
///
/// The total scanner operations never return these; they surface from
/// construction and from the `try_` variants.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("Invalid citation pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Citation pattern is missing the named group '{0}'")]
    MissingGroup(&'static str),

    #[error("Search text of {len} bytes exceeds the compiled size limit of {limit} bytes")]
    QueryTooLarge { len: usize, limit: usize },
}

/// Extracts citations from text and splits text into highlightable segments
#[derive(Debug, Clone)]
pub struct CitationScanner {
    pattern: CitationPattern,
    highlights: HighlightTable,
    max_matches: usize,
    query_size_limit: usize,
}

impl Default for CitationScanner {
    fn default() -> Self {
        Self::new(HighlightTable::default())
    }
}

impl CitationScanner {
    /// Create a scanner with the default pattern and the given highlight table
    pub fn new(highlights: HighlightTable) -> Self {
        Self {
            pattern: CitationPattern::default(),
            highlights,
            max_matches: MAX_MATCHES,
            query_size_limit: DEFAULT_QUERY_SIZE_LIMIT,
        }
    }

    /// Build a scanner from configuration
    pub fn from_config(config: &ScannerConfig, highlights: HighlightTable) -> Result<Self, ScanError> {
        let mut scanner = Self::new(highlights)
            .max_matches(config.max_matches)
            .query_size_limit(config.query_size_limit);
        if let Some(pattern) = &config.pattern {
            scanner = scanner.with_pattern(CitationPattern::new(pattern)?);
        }
        Ok(scanner)
    }

    /// Use a custom marker pattern
    pub fn with_pattern(mut self, pattern: CitationPattern) -> Self {
        self.pattern = pattern;
        self
    }

    /// Set the per-call match cap
    pub fn max_matches(mut self, max_matches: usize) -> Self {
        self.max_matches = max_matches;
        self
    }

    /// Set the compiled-size limit for search queries and passages
    pub fn query_size_limit(mut self, bytes: usize) -> Self {
        self.query_size_limit = bytes;
        self
    }

    pub fn pattern(&self) -> &CitationPattern {
        &self.pattern
    }

    pub fn highlights(&self) -> &HighlightTable {
        &self.highlights
    }

    pub fn match_cap(&self) -> usize {
        self.max_matches
    }

    /// Extract citations in first-seen order.
    ///
    /// At most [`match_cap`](Self::match_cap) matches are processed; markers
    /// whose page or paragraph does not parse are skipped but still count
    /// toward the cap. Duplicates are kept.
    pub fn extract_citations(&self, text: &str) -> Vec<Citation> {
        let mut citations = Vec::new();
        let mut skipped = 0usize;

        for (index, caps) in self.pattern.captures_iter(text).enumerate() {
            if index >= self.max_matches {
                tracing::debug!(cap = self.max_matches, "Citation match cap reached");
                break;
            }
            match RawMarker::from_captures(&caps).and_then(|raw| self.build_citation(&raw)) {
                Some(citation) => citations.push(citation),
                None => skipped += 1,
            }
        }

        tracing::debug!(
            citations = citations.len(),
            skipped,
            "Extracted citations"
        );
        citations
    }

    /// Extract citations, keeping only the first occurrence of each location
    pub fn unique_citations(&self, text: &str) -> Vec<Citation> {
        let mut unique: Vec<Citation> = Vec::new();
        for citation in self.extract_citations(text) {
            if !unique.iter().any(|seen| seen.same_location(&citation)) {
                unique.push(citation);
            }
        }
        unique
    }

    /// Split text into plain, citation and search-match segments.
    ///
    /// Joining the segment texts always reproduces `text`. If the search query
    /// cannot be compiled, the whole text comes back as one plain segment.
    pub fn render_segments(&self, text: &str, search_query: Option<&str>) -> Vec<TextSegment> {
        self.try_render_segments(text, search_query)
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Segment rendering failed, returning plain text");
                vec![TextSegment::plain(text)]
            })
    }

    /// Like [`render_segments`](Self::render_segments) but reports failures
    pub fn try_render_segments(
        &self,
        text: &str,
        search_query: Option<&str>,
    ) -> Result<Vec<TextSegment>, ScanError> {
        let search = optional_matcher(search_query, self.query_size_limit)?;
        let mut segments = Vec::new();
        let mut cursor = 0;

        for (index, caps) in self.pattern.captures_iter(text).enumerate() {
            if index >= self.max_matches {
                break;
            }
            let Some(raw) = RawMarker::from_captures(&caps) else {
                continue;
            };
            // Malformed markers stay in the surrounding plain text
            let Some(citation) = self.build_citation(&raw) else {
                continue;
            };

            push_plain(&mut segments, &text[cursor..raw.start], search.as_ref());
            segments.push(TextSegment::citation(&text[raw.start..raw.end], citation));
            cursor = raw.end;
        }
        push_plain(&mut segments, &text[cursor..], search.as_ref());

        Ok(segments)
    }

    /// Highlight snippet for a location, or `""` if the table has none
    pub fn find_associated_document(&self, document_name: &str, page: u32, paragraph: u32) -> &str {
        self.highlights.lookup(document_name.trim(), page, paragraph)
    }

    /// Overlay a cited passage and search matches on a document's text.
    ///
    /// The first case-insensitive occurrence of `passage` becomes the cited
    /// span; search matches subdivide the rest. Joining the spans reproduces
    /// `document_text`.
    pub fn highlight_document(
        &self,
        document_text: &str,
        passage: &str,
        search_query: Option<&str>,
    ) -> Vec<DocumentSpan> {
        self.try_highlight_document(document_text, passage, search_query)
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Document highlighting failed, returning plain text");
                vec![DocumentSpan::plain(document_text)]
            })
    }

    /// Like [`highlight_document`](Self::highlight_document) but reports failures
    pub fn try_highlight_document(
        &self,
        document_text: &str,
        passage: &str,
        search_query: Option<&str>,
    ) -> Result<Vec<DocumentSpan>, ScanError> {
        let passage = optional_matcher(Some(passage.trim()), self.query_size_limit)?;
        let search = optional_matcher(search_query, self.query_size_limit)?;
        Ok(overlay(document_text, passage.as_ref(), search.as_ref()))
    }

    /// Overlay a citation's snippet on the cited document's text.
    ///
    /// Uses the citation's own `highlight_text`, falling back to the table.
    pub fn highlight_citation(
        &self,
        document_text: &str,
        citation: &Citation,
        search_query: Option<&str>,
    ) -> Vec<DocumentSpan> {
        let passage = if citation.has_highlight() {
            citation.highlight_text.as_str()
        } else {
            self.find_associated_document(&citation.document_name, citation.page, citation.paragraph)
        };
        self.highlight_document(document_text, passage, search_query)
    }

    fn build_citation(&self, raw: &RawMarker<'_>) -> Option<Citation> {
        let (Ok(page), Ok(paragraph)) = (raw.page.parse::<u32>(), raw.paragraph.parse::<u32>())
        else {
            tracing::debug!(
                page = raw.page,
                paragraph = raw.paragraph,
                "Skipping citation marker with malformed location"
            );
            return None;
        };

        let citation = Citation::new(raw.document, page, paragraph);
        let highlight = self
            .highlights
            .lookup(&citation.document_name, page, paragraph)
            .to_string();
        Some(citation.with_highlight(highlight))
    }
}

fn push_plain(segments: &mut Vec<TextSegment>, text: &str, search: Option<&LiteralMatcher>) {
    split_by_matches(text, search, |piece, hit| {
        segments.push(if hit {
            TextSegment::search_match(piece)
        } else {
            TextSegment::plain(piece)
        });
    });
}
