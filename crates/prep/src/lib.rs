//! Data preparation — turns raw storage rows into normalized structures
//! and renders those into deterministic prompt text blocks.
//!
//! Everything here is a pure, total function: missing fields become
//! literal fallback strings, malformed upload content falls back to its
//! raw form, and empty collections render as fixed "No … available."
//! sentences so the model always receives a grammatically complete
//! section.

mod dates;

pub mod format;
pub mod group;
pub mod pairs;
pub mod profiles;
pub mod project;
pub mod uploads;

pub use format::{
    format_document_runs_for_prompt, format_project_for_prompt,
    format_question_answers_for_prompt, format_questions_for_prompt,
    format_responses_by_category, format_responses_by_stakeholder,
    format_sessions_for_prompt, format_stakeholders_for_prompt, format_uploads_for_prompt,
};
pub use group::{group_responses_by_category, group_responses_by_stakeholder};
pub use pairs::prepare_question_answer_pairs;
pub use profiles::prepare_stakeholder_profiles;
pub use project::prepare_project_summary;
pub use uploads::prepare_uploaded_files;
