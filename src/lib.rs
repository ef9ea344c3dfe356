//! # CER Citations
//!
//! Citation marker extraction and highlighting for Control Effectiveness
//! Review (CER) analysis transcripts.
//!
//! Analysis text refers to evidence with inline markers such as
//! `[SOC 2 Type II Report, pg 12, para 3]`. This library finds those markers,
//! splits text into clickable and highlighted segments, and overlays the cited
//! passage on the text of the cited document.
//!
//! ## Architecture
//!
//! - [`models`]: Citations, text segments, document spans and review categories
//! - [`scanner`]: The citation scanner and its highlight table
//! - [`config`]: Configuration file and environment loading
//! - [`ui`]: Colored terminal rendering and citation tables
//! - [`utils`]: Terminal and truncation helpers

pub mod config;
pub mod models;
pub mod scanner;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use models::{Citation, SegmentKind, TextSegment};
pub use scanner::{CitationScanner, HighlightTable, ScanError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
