//! The structured-document JSON contract and its strict parser.

use colloquy_core::DocumentError;
use serde::{Deserialize, Serialize};

/// The output contract appended to every structured-generation prompt.
/// Downstream parsing is strict JSON with no prose wrapper, so the
/// instruction spells the shape out field by field.
pub const DOCUMENT_CONTRACT: &str = r#"Respond with a single JSON object and nothing else. No prose before or after, no markdown fences. The object must have exactly these top-level keys:
- "title": string
- "metadata": object (document type, author, date, or other key/value details)
- "summary": string (an executive summary of the whole document)
- "sections": array of section objects

Each section object may contain any of:
- "heading": string
- "summary": string
- "content": string (body prose)
- "callout": string (a highlighted note or warning)
- "table": { "headers": array of strings, "rows": array of arrays of strings }
- "items": array of strings (bullet list)
- "subsections": array of nested section objects"#;

/// A parsed structured document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedDocument {
    pub title: String,

    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,

    pub summary: String,

    pub sections: Vec<DocumentSection>,
}

/// One document section; every field is optional and sections nest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callout: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<DocumentTable>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subsections: Vec<DocumentSection>,
}

/// A simple headers-plus-rows table inside a section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Parse a generation result as a structured document.
///
/// Completion APIs wrap JSON in markdown fences often enough that a
/// single surrounding fence is stripped before the strict parse; any
/// other deviation from the contract is an error.
pub fn parse_document(raw: &str) -> Result<GeneratedDocument, DocumentError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DocumentError::Empty);
    }

    let body = strip_code_fence(trimmed);
    serde_json::from_str(body).map_err(|e| DocumentError::InvalidJson(e.to_string()))
}

/// Strip one surrounding ``` fence (with an optional language tag).
fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let Some(inner) = rest.strip_suffix("```") else {
        return text;
    };
    // Drop the language tag line, e.g. "json".
    match inner.find('\n') {
        Some(at) if inner[..at].chars().all(|c| c.is_ascii_alphanumeric()) => {
            inner[at + 1..].trim()
        }
        _ => inner.trim(),
    }
}
