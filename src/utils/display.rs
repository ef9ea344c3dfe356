//! Terminal display utilities for CLI output formatting.
//!
//! Handles terminal width detection and unicode-aware truncation so citation
//! tables stay readable on narrow terminals.

use std::io::{self, IsTerminal};
use std::sync::OnceLock;
use terminal_size::terminal_size;
use unicode_width::UnicodeWidthChar;

/// Terminal information with cached size and capabilities.
#[derive(Debug, Clone)]
pub struct Terminal {
    width: usize,
    is_tty: bool,
}

static TERMINAL_INFO: OnceLock<Terminal> = OnceLock::new();

/// Get the global terminal information, initialized on first call.
pub fn terminal_info() -> &'static Terminal {
    TERMINAL_INFO.get_or_init(|| {
        let width = terminal_size()
            .map(|(w, _)| w.0 as usize)
            .unwrap_or(DEFAULT_WIDTH);

        Terminal {
            width,
            is_tty: io::stdout().is_terminal(),
        }
    })
}

/// Default width when terminal size cannot be determined.
pub const DEFAULT_WIDTH: usize = 100;

/// Get the current terminal width in characters.
#[inline]
pub fn terminal_width() -> usize {
    terminal_info().width
}

/// Check if stdout is a terminal.
#[inline]
pub fn is_terminal() -> bool {
    terminal_info().is_tty
}

/// Display width of a string, counting wide characters as two columns.
pub fn display_width(text: &str) -> usize {
    text.chars().map(|c| c.width().unwrap_or(1)).sum()
}

/// Truncate text to fit within the specified width using unicode-aware truncation.
///
/// # Examples
///
/// ```
/// use cer_citations::utils::truncate_with_ellipsis;
///
/// assert_eq!(truncate_with_ellipsis("Hello World", 8), "Hello...");
/// assert_eq!(truncate_with_ellipsis("Hi", 8), "Hi");
/// ```
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }

    if display_width(text) <= max_width {
        return text.to_string();
    }

    let budget = max_width.saturating_sub(3);
    let mut current_width = 0;
    let mut truncated = String::new();

    for c in text.chars() {
        let w = c.width().unwrap_or(1);
        if current_width + w > budget {
            break;
        }
        current_width += w;
        truncated.push(c);
    }

    format!("{}...", truncated)
}

/// Collapse runs of whitespace (including newlines) into single spaces.
///
/// Table cells hold one line; snippets copied from documents often span several.
pub fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Column widths for the citation table: (document, location, snippet).
///
/// The location column is fixed; the remaining width is split 40/60 between
/// document and snippet, never below their minimums.
pub fn citation_table_columns(terminal_width: usize) -> (usize, usize, usize) {
    const LOCATION: usize = 16;
    const MIN_DOCUMENT: usize = 16;
    const MIN_SNIPPET: usize = 20;
    // Borders and padding drawn by the table preset
    const CHROME: usize = 10;

    let available = terminal_width.saturating_sub(LOCATION + CHROME);
    let document = (available * 2 / 5).max(MIN_DOCUMENT);
    let snippet = available.saturating_sub(document).max(MIN_SNIPPET);

    (document, LOCATION, snippet)
}
