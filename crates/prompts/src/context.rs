//! Full-context assembly from a project's raw records.

use colloquy_core::{
    ClientRecord, DocumentRunRecord, ProjectRecord, QuestionRecord, ResponseRecord, SessionRecord,
    StakeholderRecord, UploadRecord,
};
use colloquy_prep::{
    format_document_runs_for_prompt, format_project_for_prompt,
    format_question_answers_for_prompt, format_questions_for_prompt,
    format_responses_by_category, format_responses_by_stakeholder, format_sessions_for_prompt,
    format_stakeholders_for_prompt, format_uploads_for_prompt, prepare_project_summary,
    prepare_question_answer_pairs, prepare_stakeholder_profiles, prepare_uploaded_files,
};
use serde::{Deserialize, Serialize};

/// Everything known about a project, as handed over by the storage
/// collaborator. All collections may be empty and the project row itself
/// may be missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectData {
    #[serde(default)]
    pub project: Option<ProjectRecord>,

    #[serde(default)]
    pub client: Option<ClientRecord>,

    #[serde(default)]
    pub stakeholders: Vec<StakeholderRecord>,

    #[serde(default)]
    pub questions: Vec<QuestionRecord>,

    #[serde(default)]
    pub responses: Vec<ResponseRecord>,

    #[serde(default)]
    pub uploads: Vec<UploadRecord>,

    #[serde(default)]
    pub sessions: Vec<SessionRecord>,

    #[serde(default)]
    pub document_runs: Vec<DocumentRunRecord>,
}

/// The fully formatted context bundle for one generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormattedContext {
    /// Raw project name, for placeholder substitution.
    pub project_name: String,

    /// Raw project description, for placeholder substitution.
    pub project_description: String,

    pub project_summary: String,
    pub stakeholder_profiles: String,
    pub interview_data: String,
    pub interview_by_category: String,
    pub interview_by_stakeholder: String,
    pub uploaded_files: String,
    pub question_list: String,

    /// Concatenated session transcripts, when any exist.
    pub transcript: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_summary: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_run_summary: Option<String>,

    /// Every section above concatenated under markdown headings.
    pub full_context: String,
}

/// Assemble the complete formatted context for a project.
pub fn build_context(data: &ProjectData) -> FormattedContext {
    let (project_name, project_description, project_summary) = match &data.project {
        Some(project) => {
            let prepared = prepare_project_summary(project, data.client.as_ref());
            let formatted = format_project_for_prompt(&prepared);
            (prepared.name, prepared.description, formatted)
        }
        None => (
            "Untitled Project".to_string(),
            "No description provided".to_string(),
            "No project information available.".to_string(),
        ),
    };

    let pairs = prepare_question_answer_pairs(&data.responses);
    let profiles = prepare_stakeholder_profiles(&data.stakeholders, &data.responses);
    let uploads = prepare_uploaded_files(&data.uploads);

    let stakeholder_profiles = format_stakeholders_for_prompt(&profiles);
    let interview_data = format_question_answers_for_prompt(&pairs);
    let interview_by_category = format_responses_by_category(&data.responses);
    let interview_by_stakeholder = format_responses_by_stakeholder(&data.responses);
    let uploaded_files = format_uploads_for_prompt(&uploads);
    let question_list = format_questions_for_prompt(&data.questions);

    let transcript = {
        let joined: Vec<&str> = data
            .sessions
            .iter()
            .filter_map(|s| s.transcript.as_deref())
            .filter(|t| !t.trim().is_empty())
            .collect();
        if joined.is_empty() {
            "No transcript available.".to_string()
        } else {
            joined.join("\n\n")
        }
    };

    let session_summary = (!data.sessions.is_empty())
        .then(|| format_sessions_for_prompt(&data.sessions));
    let document_run_summary = (!data.document_runs.is_empty())
        .then(|| format_document_runs_for_prompt(&data.document_runs));

    let mut full_context = String::new();
    let mut section = |heading: &str, body: &str| {
        full_context.push_str(&format!("# {heading}\n{body}\n\n"));
    };
    section("PROJECT OVERVIEW", &project_summary);
    section("STAKEHOLDERS", &stakeholder_profiles);
    section("INTERVIEW RESPONSES", &interview_data);
    section("RESPONSES BY CATEGORY", &interview_by_category);
    section("RESPONSES BY STAKEHOLDER", &interview_by_stakeholder);
    section("UPLOADED FILES", &uploaded_files);
    section("QUESTION LIST", &question_list);
    if let Some(sessions) = &session_summary {
        section("INTERVIEW SESSIONS", sessions);
    }
    if let Some(runs) = &document_run_summary {
        section("GENERATED DOCUMENTS", runs);
    }
    let full_context = full_context.trim_end().to_string();

    tracing::debug!(
        context_chars = full_context.len(),
        responses = data.responses.len(),
        stakeholders = data.stakeholders.len(),
        uploads = data.uploads.len(),
        "Assembled full context"
    );

    FormattedContext {
        project_name,
        project_description,
        project_summary,
        stakeholder_profiles,
        interview_data,
        interview_by_category,
        interview_by_stakeholder,
        uploaded_files,
        question_list,
        transcript,
        session_summary,
        document_run_summary,
        full_context,
    }
}

/// The context as ordered `(section name, content)` blocks, named with
/// the keys the chunking priority order knows about.
pub fn context_blocks(ctx: &FormattedContext) -> Vec<(String, String)> {
    let mut blocks = vec![
        ("project_summary".to_string(), ctx.project_summary.clone()),
        ("question_answers".to_string(), ctx.interview_data.clone()),
        (
            "stakeholder_profiles".to_string(),
            ctx.stakeholder_profiles.clone(),
        ),
        ("file_content".to_string(), ctx.uploaded_files.clone()),
        ("questions_list".to_string(), ctx.question_list.clone()),
    ];

    let mut metadata = String::new();
    if let Some(sessions) = &ctx.session_summary {
        metadata.push_str(sessions);
    }
    if let Some(runs) = &ctx.document_run_summary {
        if !metadata.is_empty() {
            metadata.push_str("\n\n");
        }
        metadata.push_str(runs);
    }
    blocks.push(("metadata".to_string(), metadata));

    blocks
}
