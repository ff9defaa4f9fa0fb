//! Normalized intermediate structures produced by the preparation layer.
//!
//! These sit between raw storage rows and the prompt formatters: grouped,
//! defaulted, and ready to render. All of them are built fresh per
//! generation request and never persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A question together with every answer collected for it, in the order
/// the responses arrived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionAnswerPair {
    pub question: String,
    pub category: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,

    /// Never empty: a pair is only created when its first answer arrives.
    pub answers: Vec<StakeholderAnswer>,
}

/// One stakeholder's answer to a question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StakeholderAnswer {
    pub stakeholder_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,

    pub response_text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

/// A stakeholder with their participation statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StakeholderProfile {
    pub name: String,
    pub role: String,
    pub department: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    pub status: String,

    /// Total responses submitted by this stakeholder.
    pub response_count: usize,

    /// Rendered percentage, e.g. `"75%"`. `"0%"` when no questions exist.
    pub completion_rate: String,
}

/// An uploaded file with its content normalized for prompt inclusion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreparedUpload {
    pub name: String,
    pub kind: String,
    pub size_label: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub uploaded_label: String,

    /// Format-specialized full content (CSV table, pretty JSON, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// First 500 characters of the content (or description) with an
    /// ellipsis marker when truncated.
    pub content_preview: String,

    /// Whether real extracted content existed, as opposed to metadata only.
    pub has_content: bool,
}

/// The project header rendered at the top of every context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub name: String,
    pub description: String,
    pub status: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,

    pub start_label: String,
    pub target_end_label: String,

    /// Completion progress, 0–100.
    pub progress: u32,
}
