//! Utility modules supporting the CLI.
//!
//! - [`truncate_with_ellipsis`]: unicode-aware truncation for table cells
//! - [`single_line`]: collapse multi-line snippets into one line
//! - [`citation_table_columns`]: column widths for the citation table
//! - [`terminal_width`] / [`is_terminal`]: cached terminal capabilities

mod display;

pub use display::{
    citation_table_columns, display_width, is_terminal, single_line, terminal_info,
    terminal_width, truncate_with_ellipsis, Terminal, DEFAULT_WIDTH,
};
