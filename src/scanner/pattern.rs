//! Citation marker pattern.

use regex::{CaptureMatches, Captures, Regex};
use std::sync::OnceLock;

use super::ScanError;

/// Default marker shape: `[<document>, pg <page>, para <paragraph>]`.
///
/// The document name is any run of characters except a comma. Page and
/// paragraph are ASCII digits only. `pg` and `para` are case-sensitive and
/// whitespace around values is optional.
pub const DEFAULT_CITATION_PATTERN: &str =
    r"\[(?P<document>[^,]+),\s*pg\s*(?P<page>[0-9]+),\s*para\s*(?P<paragraph>[0-9]+)\]";

/// Capture groups every citation pattern must define
pub const REQUIRED_GROUPS: [&str; 3] = ["document", "page", "paragraph"];

static DEFAULT_REGEX: OnceLock<Regex> = OnceLock::new();

/// A compiled citation pattern with the named groups the scanner reads.
///
/// `Regex` keeps no scan position between calls, so every `captures_iter`
/// starts at the beginning of its input.
#[derive(Debug, Clone)]
pub struct CitationPattern {
    regex: Regex,
}

impl CitationPattern {
    /// Compile a custom pattern.
    ///
    /// The pattern must define the named groups `document`, `page` and
    /// `paragraph`.
    pub fn new(pattern: &str) -> Result<Self, ScanError> {
        let regex = Regex::new(pattern)?;

        for group in REQUIRED_GROUPS {
            if !regex.capture_names().flatten().any(|name| name == group) {
                return Err(ScanError::MissingGroup(group));
            }
        }

        Ok(Self { regex })
    }

    /// The source text of the pattern
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub(crate) fn captures_iter<'r, 'h>(&'r self, text: &'h str) -> CaptureMatches<'r, 'h> {
        self.regex.captures_iter(text)
    }
}

impl Default for CitationPattern {
    fn default() -> Self {
        let regex = DEFAULT_REGEX.get_or_init(|| {
            Regex::new(DEFAULT_CITATION_PATTERN).expect("default citation pattern is valid")
        });
        Self {
            regex: regex.clone(),
        }
    }
}

/// Raw pieces of one marker match, before numeric parsing.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RawMarker<'h> {
    pub start: usize,
    pub end: usize,
    pub document: &'h str,
    pub page: &'h str,
    pub paragraph: &'h str,
}

impl<'h> RawMarker<'h> {
    pub(crate) fn from_captures(caps: &Captures<'h>) -> Option<Self> {
        let whole = caps.get(0)?;
        Some(Self {
            start: whole.start(),
            end: whole.end(),
            document: caps.name("document").map_or("", |m| m.as_str()),
            page: caps.name("page").map_or("", |m| m.as_str()),
            paragraph: caps.name("paragraph").map_or("", |m| m.as_str()),
        })
    }
}
