//! Role-specific prompt builders.

use crate::context::FormattedContext;
use crate::document::DOCUMENT_CONTRACT;

/// Conversational assistant prompt: the full project context plus the
/// user's question.
pub fn build_sidekick_prompt(ctx: &FormattedContext, user_question: &str) -> String {
    format!(
        "You are a project sidekick for a stakeholder-interview engagement. \
         Answer the user's question using only the project context below. \
         If the context does not contain the answer, say so plainly.\n\n\
         {}\n\n\
         USER QUESTION: {}",
        ctx.full_context, user_question
    )
}

/// Question-generation prompt: propose new interview questions that the
/// existing set does not already cover.
pub fn build_question_generator_prompt(ctx: &FormattedContext, count: usize) -> String {
    format!(
        "You are preparing stakeholder interview questions.\n\n\
         PROJECT:\n{}\n\n\
         EXISTING QUESTIONS:\n{}\n\n\
         RESPONSES SO FAR:\n{}\n\n\
         Propose {} new interview questions that fill gaps the existing \
         questions leave open. Return one question per line, no numbering.",
        ctx.project_summary, ctx.question_list, ctx.interview_data, count
    )
}

/// Analysis prompt: the caller's instructions over the full context.
pub fn build_document_analysis_prompt(ctx: &FormattedContext, instructions: &str) -> String {
    format!(
        "You are an analyst reviewing stakeholder interview data.\n\n\
         {}\n\n\
         INSTRUCTIONS:\n{}",
        ctx.full_context, instructions
    )
}

/// Structured-document prompt: instructions plus the rigid JSON output
/// contract. The context itself is attached by the chunked assembly
/// stage, not here, so oversized projects can still chain.
pub fn build_structured_prompt(instructions: &str) -> String {
    format!("{instructions}\n\n{DOCUMENT_CONTRACT}")
}
