//! Case-insensitive literal matching for search queries and cited passages.

use regex::{Regex, RegexBuilder};

use super::ScanError;

/// Matches a user-supplied string literally, ignoring case.
///
/// Every regex metacharacter in the input is escaped, so `$5.00 (final)`
/// matches exactly that text.
#[derive(Debug, Clone)]
pub(crate) struct LiteralMatcher {
    regex: Regex,
}

impl LiteralMatcher {
    /// Compile `needle`, failing if the compiled form exceeds `size_limit` bytes.
    pub(crate) fn new(needle: &str, size_limit: usize) -> Result<Self, ScanError> {
        let regex = RegexBuilder::new(&regex::escape(needle))
            .case_insensitive(true)
            .size_limit(size_limit)
            .build()
            .map_err(|e| match e {
                regex::Error::CompiledTooBig(limit) => ScanError::QueryTooLarge {
                    len: needle.len(),
                    limit,
                },
                other => ScanError::InvalidPattern(other),
            })?;
        Ok(Self { regex })
    }

    /// Byte ranges of every non-overlapping occurrence, left to right
    pub(crate) fn ranges<'a>(
        &'a self,
        haystack: &'a str,
    ) -> impl Iterator<Item = (usize, usize)> + 'a {
        self.regex
            .find_iter(haystack)
            .filter(|m| !m.is_empty())
            .map(|m| (m.start(), m.end()))
    }

    /// First occurrence, if any
    pub(crate) fn first(&self, haystack: &str) -> Option<(usize, usize)> {
        self.ranges(haystack).next()
    }
}

/// Split `text` into alternating unmatched and matched pieces.
///
/// Calls `emit(piece, is_match)` for each non-empty piece in order. Without a
/// matcher the whole text is emitted as one unmatched piece.
pub(crate) fn split_by_matches<F>(text: &str, matcher: Option<&LiteralMatcher>, mut emit: F)
where
    F: FnMut(&str, bool),
{
    let Some(matcher) = matcher else {
        if !text.is_empty() {
            emit(text, false);
        }
        return;
    };

    let mut cursor = 0;
    for (start, end) in matcher.ranges(text) {
        if start > cursor {
            emit(&text[cursor..start], false);
        }
        emit(&text[start..end], true);
        cursor = end;
    }
    if cursor < text.len() {
        emit(&text[cursor..], false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMIT: usize = 1 << 20;

    fn pieces(text: &str, needle: &str) -> Vec<(String, bool)> {
        let matcher = LiteralMatcher::new(needle, LIMIT).unwrap();
        let mut out = Vec::new();
        split_by_matches(text, Some(&matcher), |piece, hit| out.push((piece.to_string(), hit)));
        out
    }

    #[test]
    fn test_metacharacters_are_literal() {
        let out = pieces("price is $5.00 (final)", "$5.00 (final)");
        assert_eq!(
            out,
            vec![
                ("price is ".to_string(), false),
                ("$5.00 (final)".to_string(), true)
            ]
        );
    }

    #[test]
    fn test_dot_does_not_match_any_char() {
        let out = pieces("5x00 and 5.00", "5.00");
        assert_eq!(out.iter().filter(|(_, hit)| *hit).count(), 1);
        assert_eq!(out.last().unwrap().0, "5.00");
    }

    #[test]
    fn test_case_insensitive() {
        let out = pieces("MFA required; mfa enforced", "Mfa");
        let hits: Vec<_> = out.iter().filter(|(_, hit)| *hit).map(|(p, _)| p.as_str()).collect();
        assert_eq!(hits, vec!["MFA", "mfa"]);
    }

    #[test]
    fn test_no_matcher_emits_whole_text() {
        let mut out = Vec::new();
        split_by_matches("abc", None, |piece, hit| out.push((piece.to_string(), hit)));
        assert_eq!(out, vec![("abc".to_string(), false)]);

        out.clear();
        split_by_matches("", None, |piece, hit| out.push((piece.to_string(), hit)));
        assert!(out.is_empty());
    }

    #[test]
    fn test_adjacent_matches() {
        let out = pieces("aaaa", "aa");
        assert_eq!(out, vec![("aa".to_string(), true), ("aa".to_string(), true)]);
    }

    #[test]
    fn test_size_limit_exceeded() {
        let needle = "x".repeat(10_000);
        let err = LiteralMatcher::new(&needle, 1024).unwrap_err();
        assert!(matches!(err, ScanError::QueryTooLarge { len: 10_000, .. }));
    }

    #[test]
    fn test_first() {
        let matcher = LiteralMatcher::new("log", LIMIT).unwrap();
        assert_eq!(matcher.first("Audit LOG and log"), Some((6, 9)));
        assert_eq!(matcher.first("nothing"), None);
    }
}
