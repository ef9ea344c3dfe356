//! Core data models for citations, scanned segments and review categories.

mod category;
mod citation;

pub use category::{ActivityType, DocumentType, RiskLevel, UnknownCategory};
pub use citation::{
    composite_key, join_segments, join_spans, Citation, DocumentSpan, SegmentKind, SpanKind,
    TextSegment,
};
