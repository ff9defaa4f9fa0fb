//! Prompt-text rendering of prepared structures.
//!
//! Every formatter is deterministic and returns a fixed "No … " literal
//! on empty input instead of an empty string, so each context section
//! stays self-explanatory to the model.

use colloquy_core::{
    DocumentRunRecord, PreparedUpload, ProjectSummary, QuestionAnswerPair, QuestionRecord,
    ResponseRecord, SessionRecord, StakeholderProfile,
};

use crate::dates::human_date;
use crate::group::{group_responses_by_category, group_responses_by_stakeholder};

/// Numbered question blocks with each answer quoted verbatim.
pub fn format_question_answers_for_prompt(pairs: &[QuestionAnswerPair]) -> String {
    if pairs.is_empty() {
        return "No interview responses available.".to_string();
    }

    let mut out = String::new();
    for (i, pair) in pairs.iter().enumerate() {
        out.push_str(&format!("{}. [{}] {}", i + 1, pair.category, pair.question));
        if let Some(priority) = &pair.priority {
            out.push_str(&format!(" (priority: {priority})"));
        }
        out.push('\n');

        for answer in &pair.answers {
            out.push_str(&format!("   - {}", answer.stakeholder_name));
            match (&answer.role, &answer.department) {
                (Some(role), Some(dept)) => out.push_str(&format!(" ({role}, {dept})")),
                (Some(role), None) => out.push_str(&format!(" ({role})")),
                (None, Some(dept)) => out.push_str(&format!(" ({dept})")),
                (None, None) => {}
            }
            out.push_str(&format!(": \"{}\"", answer.response_text));
            if let Some(ts) = &answer.timestamp {
                out.push_str(&format!(" ({})", human_date(ts)));
            }
            out.push('\n');
        }
        out.push('\n');
    }
    out.trim_end().to_string()
}

/// Numbered stakeholder list with participation statistics.
pub fn format_stakeholders_for_prompt(profiles: &[StakeholderProfile]) -> String {
    if profiles.is_empty() {
        return "No stakeholders assigned.".to_string();
    }

    let mut out = String::new();
    for (i, profile) in profiles.iter().enumerate() {
        out.push_str(&format!(
            "{}. {} ({}, {})\n",
            i + 1,
            profile.name,
            profile.role,
            profile.department
        ));
        if let Some(email) = &profile.email {
            out.push_str(&format!("   Email: {email}\n"));
        }
        out.push_str(&format!(
            "   Status: {} | Responses: {} | Completion: {}\n",
            profile.status, profile.response_count, profile.completion_rate
        ));
    }
    out.trim_end().to_string()
}

/// Numbered file list; full content is fenced between begin/end markers
/// so the extracted text survives verbatim, and metadata-only files show
/// their preview instead.
pub fn format_uploads_for_prompt(uploads: &[PreparedUpload]) -> String {
    if uploads.is_empty() {
        return "No files uploaded.".to_string();
    }

    let mut out = String::new();
    for (i, file) in uploads.iter().enumerate() {
        out.push_str(&format!(
            "{}. {} ({}, {}, uploaded {})\n",
            i + 1,
            file.name,
            file.kind,
            file.size_label,
            file.uploaded_label
        ));
        if let Some(description) = &file.description {
            out.push_str(&format!("   Description: {description}\n"));
        }
        match (&file.content, file.has_content) {
            (Some(content), true) => {
                out.push_str(&format!(
                    "--- Content of {} ---\n{}\n--- End of {} ---\n",
                    file.name, content, file.name
                ));
            }
            _ => {
                if !file.content_preview.is_empty() {
                    out.push_str(&format!("   Preview: {}\n", file.content_preview));
                }
            }
        }
        out.push('\n');
    }
    out.trim_end().to_string()
}

/// The project header block.
pub fn format_project_for_prompt(summary: &ProjectSummary) -> String {
    let mut out = format!("Project: {}\n", summary.name);
    if let Some(client) = &summary.client_name {
        out.push_str(&format!("Client: {client}\n"));
    }
    out.push_str(&format!("Status: {}\n", summary.status));
    out.push_str(&format!("Description: {}\n", summary.description));
    out.push_str(&format!(
        "Timeline: {} to {}\n",
        summary.start_label, summary.target_end_label
    ));
    out.push_str(&format!("Progress: {}%", summary.progress));
    out
}

/// Numbered question list with category and priority markers.
pub fn format_questions_for_prompt(questions: &[QuestionRecord]) -> String {
    if questions.is_empty() {
        return "No questions available.".to_string();
    }

    let mut out = String::new();
    for (i, question) in questions.iter().enumerate() {
        out.push_str(&format!(
            "{}. {}",
            i + 1,
            question.text.as_deref().unwrap_or("Unknown Question")
        ));
        if let Some(category) = &question.category {
            out.push_str(&format!(" [{category}]"));
        }
        if let Some(priority) = &question.priority {
            out.push_str(&format!(" (priority: {priority})"));
        }
        out.push('\n');
    }
    out.trim_end().to_string()
}

/// Interview sessions with transcripts when captured.
pub fn format_sessions_for_prompt(sessions: &[SessionRecord]) -> String {
    if sessions.is_empty() {
        return "No interview sessions recorded.".to_string();
    }

    let mut out = String::new();
    for (i, session) in sessions.iter().enumerate() {
        out.push_str(&format!(
            "{}. Session with {}",
            i + 1,
            session
                .stakeholder_name
                .as_deref()
                .unwrap_or("Unknown Stakeholder")
        ));
        if let Some(status) = &session.status {
            out.push_str(&format!(" ({status})"));
        }
        if let Some(ts) = &session.created_at {
            out.push_str(&format!(" on {}", human_date(ts)));
        }
        out.push('\n');
        if let Some(transcript) = &session.transcript {
            if !transcript.trim().is_empty() {
                out.push_str(&format!("   Transcript:\n{transcript}\n"));
            }
        }
    }
    out.trim_end().to_string()
}

/// Prior generation runs, newest data first as handed in.
pub fn format_document_runs_for_prompt(runs: &[DocumentRunRecord]) -> String {
    if runs.is_empty() {
        return "No documents generated yet.".to_string();
    }

    let mut out = String::new();
    for (i, run) in runs.iter().enumerate() {
        out.push_str(&format!(
            "{}. {} ({})",
            i + 1,
            run.title.as_deref().unwrap_or("Untitled document"),
            run.document_type.as_deref().unwrap_or("document")
        ));
        if let Some(status) = &run.status {
            out.push_str(&format!(" - {status}"));
        }
        if let Some(ts) = &run.created_at {
            out.push_str(&format!(" on {}", human_date(ts)));
        }
        out.push('\n');
    }
    out.trim_end().to_string()
}

/// Responses regrouped under category headings.
pub fn format_responses_by_category(responses: &[ResponseRecord]) -> String {
    format_grouped(group_responses_by_category(responses))
}

/// Responses regrouped under stakeholder headings.
pub fn format_responses_by_stakeholder(responses: &[ResponseRecord]) -> String {
    format_grouped(group_responses_by_stakeholder(responses))
}

fn format_grouped(groups: Vec<(String, Vec<ResponseRecord>)>) -> String {
    if groups.is_empty() {
        return "No interview responses available.".to_string();
    }

    let mut out = String::new();
    for (heading, rows) in groups {
        out.push_str(&format!("## {heading}\n"));
        for row in rows {
            let question = row
                .question
                .as_ref()
                .and_then(|q| q.text.as_deref())
                .unwrap_or("Unknown Question");
            let speaker = row
                .stakeholder
                .as_ref()
                .and_then(|s| s.name.as_deref())
                .unwrap_or("Unknown Stakeholder");
            let text = row.response.as_deref().unwrap_or("No response provided");
            out.push_str(&format!("- {speaker} on \"{question}\": \"{text}\"\n"));
        }
        out.push('\n');
    }
    out.trim_end().to_string()
}
