//! Highlight overlay for the text of a cited document.
//!
//! The cited passage is marked once, at its first case-insensitive
//! occurrence; search matches then subdivide the text around it.

use crate::models::{DocumentSpan, SpanKind};

use super::search::{split_by_matches, LiteralMatcher};
use super::ScanError;

pub(crate) fn overlay(
    document_text: &str,
    passage: Option<&LiteralMatcher>,
    search: Option<&LiteralMatcher>,
) -> Vec<DocumentSpan> {
    let mut spans = Vec::new();
    let push_unmarked = |piece: &str, spans: &mut Vec<DocumentSpan>| {
        split_by_matches(piece, search, |text, hit| {
            let kind = if hit { SpanKind::SearchMatch } else { SpanKind::Plain };
            spans.push(DocumentSpan::new(kind, text));
        });
    };

    match passage.and_then(|p| p.first(document_text)) {
        Some((start, end)) => {
            push_unmarked(&document_text[..start], &mut spans);
            spans.push(DocumentSpan::new(
                SpanKind::CitedPassage,
                &document_text[start..end],
            ));
            push_unmarked(&document_text[end..], &mut spans);
        }
        None => push_unmarked(document_text, &mut spans),
    }

    spans
}

/// Compile a matcher for a non-empty needle.
pub(crate) fn optional_matcher(
    needle: Option<&str>,
    size_limit: usize,
) -> Result<Option<LiteralMatcher>, ScanError> {
    match needle.filter(|n| !n.is_empty()) {
        Some(n) => LiteralMatcher::new(n, size_limit).map(Some),
        None => Ok(None),
    }
}
