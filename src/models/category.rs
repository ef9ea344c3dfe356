//! Closed categories shown in review views and their presentation attributes.
//!
//! Each category maps to an icon, a label and a terminal color through an
//! exhaustive `match`, so adding a variant fails to compile until every
//! lookup handles it.

use owo_colors::AnsiColors;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error returned when a category name is not recognized
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownCategory {
    pub kind: &'static str,
    pub value: String,
}

/// Type of an evidence document, inferred from its file name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    Pdf,
    Word,
    Spreadsheet,
    Presentation,
    Image,
    Archive,
    Other,
}

impl DocumentType {
    pub const ALL: [DocumentType; 7] = [
        DocumentType::Pdf,
        DocumentType::Word,
        DocumentType::Spreadsheet,
        DocumentType::Presentation,
        DocumentType::Image,
        DocumentType::Archive,
        DocumentType::Other,
    ];

    /// Infer the type from a file name's extension (case-insensitive)
    pub fn from_file_name(name: &str) -> Self {
        let ext = name
            .trim()
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "pdf" => DocumentType::Pdf,
            "doc" | "docx" | "rtf" | "odt" => DocumentType::Word,
            "xls" | "xlsx" | "csv" | "ods" => DocumentType::Spreadsheet,
            "ppt" | "pptx" | "odp" => DocumentType::Presentation,
            "png" | "jpg" | "jpeg" | "gif" | "svg" => DocumentType::Image,
            "zip" | "tar" | "gz" | "7z" => DocumentType::Archive,
            _ => DocumentType::Other,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            DocumentType::Pdf => "📕",
            DocumentType::Word => "📘",
            DocumentType::Spreadsheet => "📗",
            DocumentType::Presentation => "📙",
            DocumentType::Image => "🖼",
            DocumentType::Archive => "🗜",
            DocumentType::Other => "📄",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DocumentType::Pdf => "PDF",
            DocumentType::Word => "Word document",
            DocumentType::Spreadsheet => "Spreadsheet",
            DocumentType::Presentation => "Presentation",
            DocumentType::Image => "Image",
            DocumentType::Archive => "Archive",
            DocumentType::Other => "Document",
        }
    }

    pub fn color(&self) -> AnsiColors {
        match self {
            DocumentType::Pdf => AnsiColors::Red,
            DocumentType::Word => AnsiColors::Blue,
            DocumentType::Spreadsheet => AnsiColors::Green,
            DocumentType::Presentation => AnsiColors::Yellow,
            DocumentType::Image => AnsiColors::Magenta,
            DocumentType::Archive => AnsiColors::BrightBlack,
            DocumentType::Other => AnsiColors::White,
        }
    }
}

/// Kind of entry in a review's activity feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    Upload,
    Review,
    Comment,
    Analysis,
    StatusChange,
    Approval,
}

impl ActivityType {
    pub const ALL: [ActivityType; 6] = [
        ActivityType::Upload,
        ActivityType::Review,
        ActivityType::Comment,
        ActivityType::Analysis,
        ActivityType::StatusChange,
        ActivityType::Approval,
    ];

    pub fn icon(&self) -> &'static str {
        match self {
            ActivityType::Upload => "↑",
            ActivityType::Review => "👁",
            ActivityType::Comment => "💬",
            ActivityType::Analysis => "🤖",
            ActivityType::StatusChange => "⇄",
            ActivityType::Approval => "✓",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ActivityType::Upload => "Upload",
            ActivityType::Review => "Review",
            ActivityType::Comment => "Comment",
            ActivityType::Analysis => "Analysis",
            ActivityType::StatusChange => "Status change",
            ActivityType::Approval => "Approval",
        }
    }

    pub fn color(&self) -> AnsiColors {
        match self {
            ActivityType::Upload => AnsiColors::Blue,
            ActivityType::Review => AnsiColors::Cyan,
            ActivityType::Comment => AnsiColors::White,
            ActivityType::Analysis => AnsiColors::Magenta,
            ActivityType::StatusChange => AnsiColors::Yellow,
            ActivityType::Approval => AnsiColors::Green,
        }
    }
}

impl FromStr for ActivityType {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace([' ', '-'], "_").as_str() {
            "upload" => Ok(ActivityType::Upload),
            "review" => Ok(ActivityType::Review),
            "comment" => Ok(ActivityType::Comment),
            "analysis" => Ok(ActivityType::Analysis),
            "status_change" => Ok(ActivityType::StatusChange),
            "approval" => Ok(ActivityType::Approval),
            _ => Err(UnknownCategory {
                kind: "activity type",
                value: s.to_string(),
            }),
        }
    }
}

/// Risk rating of a control or vendor, ordered from lowest to highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 4] = [
        RiskLevel::Low,
        RiskLevel::Medium,
        RiskLevel::High,
        RiskLevel::Critical,
    ];

    pub fn icon(&self) -> &'static str {
        match self {
            RiskLevel::Low => "○",
            RiskLevel::Medium => "◐",
            RiskLevel::High => "●",
            RiskLevel::Critical => "⚠",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
            RiskLevel::Critical => "Critical",
        }
    }

    pub fn color(&self) -> AnsiColors {
        match self {
            RiskLevel::Low => AnsiColors::Green,
            RiskLevel::Medium => AnsiColors::Yellow,
            RiskLevel::High => AnsiColors::Red,
            RiskLevel::Critical => AnsiColors::BrightRed,
        }
    }
}

impl FromStr for RiskLevel {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(RiskLevel::Low),
            "medium" | "moderate" => Ok(RiskLevel::Medium),
            "high" => Ok(RiskLevel::High),
            "critical" => Ok(RiskLevel::Critical),
            _ => Err(UnknownCategory {
                kind: "risk level",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
