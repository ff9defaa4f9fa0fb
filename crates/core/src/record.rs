//! Raw records as they arrive from the storage collaborator.
//!
//! These mirror the row shapes the hosted database hands back, joined
//! relations included. Every field that can be missing in practice is an
//! `Option` — the preparation layer supplies fallbacks, never this one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single stakeholder response row, with its joined question and
/// stakeholder relations when the query included them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseRecord {
    #[serde(default)]
    pub stakeholder_id: Option<String>,

    #[serde(default)]
    pub question_id: Option<String>,

    /// The response text itself.
    #[serde(default)]
    pub response: Option<String>,

    /// Joined question relation (the storage service names it `questions`).
    #[serde(default, rename = "questions")]
    pub question: Option<QuestionJoin>,

    /// Joined stakeholder relation (named `stakeholders` on the wire).
    #[serde(default, rename = "stakeholders")]
    pub stakeholder: Option<StakeholderJoin>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Joined question fields on a response row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionJoin {
    #[serde(default)]
    pub text: Option<String>,

    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub priority: Option<String>,
}

/// Joined stakeholder fields on a response row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StakeholderJoin {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub role: Option<String>,

    #[serde(default)]
    pub department: Option<String>,
}

/// A stakeholder row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StakeholderRecord {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub role: Option<String>,

    #[serde(default)]
    pub department: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub status: Option<String>,
}

/// An uploaded file row. Content may be pre-extracted by the upload
/// pipeline (`extracted_content`) or stored inline (`content`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadRecord {
    #[serde(default)]
    pub file_name: Option<String>,

    #[serde(default)]
    pub upload_type: Option<String>,

    /// Size in bytes.
    #[serde(default)]
    pub file_size: Option<u64>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub extracted_content: Option<String>,

    #[serde(default)]
    pub content: Option<String>,

    #[serde(default)]
    pub mime_type: Option<String>,
}

/// A project row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectRecord {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub target_end_date: Option<DateTime<Utc>>,

    /// Completion progress, 0–100.
    #[serde(default)]
    pub progress: Option<u32>,
}

/// A client row (the organization the project is for).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientRecord {
    #[serde(default)]
    pub name: Option<String>,
}

/// An interview question row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionRecord {
    #[serde(default)]
    pub text: Option<String>,

    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub priority: Option<String>,
}

/// An interview session row, with its transcript when one was captured.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    #[serde(default)]
    pub stakeholder_name: Option<String>,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub transcript: Option<String>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A prior document-generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRunRecord {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub document_type: Option<String>,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_row_deserializes_with_joined_relations() {
        let json = r#"{
            "stakeholder_id": "sh-1",
            "question_id": "q-1",
            "response": "We need better reporting.",
            "questions": { "text": "What are your pain points?", "category": "Operations", "priority": "high" },
            "stakeholders": { "name": "Dana Reyes", "role": "COO", "department": "Operations" },
            "created_at": "2026-02-03T10:15:00Z"
        }"#;
        let row: ResponseRecord = serde_json::from_str(json).unwrap();
        assert_eq!(row.question.as_ref().unwrap().category.as_deref(), Some("Operations"));
        assert_eq!(row.stakeholder.as_ref().unwrap().name.as_deref(), Some("Dana Reyes"));
    }

    #[test]
    fn sparse_rows_deserialize_to_none() {
        let row: ResponseRecord = serde_json::from_str("{}").unwrap();
        assert!(row.question_id.is_none());
        assert!(row.question.is_none());
        assert!(row.created_at.is_none());

        let upload: UploadRecord = serde_json::from_str(r#"{"file_name":"notes.txt"}"#).unwrap();
        assert_eq!(upload.file_name.as_deref(), Some("notes.txt"));
        assert!(upload.extracted_content.is_none());
    }
}
