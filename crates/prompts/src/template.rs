//! Prompt-template placeholder substitution.

use crate::context::FormattedContext;

/// Replace every known `{{placeholder}}` in a template with its
/// formatted context block. Placeholders outside the known set are left
/// untouched; templates are expected to reference only the listed names.
pub fn substitute_placeholders(template: &str, ctx: &FormattedContext) -> String {
    let substitutions: [(&str, &str); 14] = [
        ("{{project_name}}", &ctx.project_name),
        ("{{project_description}}", &ctx.project_description),
        ("{{project_summary}}", &ctx.project_summary),
        ("{{transcript}}", &ctx.transcript),
        ("{{stakeholder_responses}}", &ctx.interview_data),
        ("{{question_answers}}", &ctx.interview_data),
        ("{{responses_by_category}}", &ctx.interview_by_category),
        ("{{responses_by_stakeholder}}", &ctx.interview_by_stakeholder),
        ("{{uploads}}", &ctx.uploaded_files),
        ("{{files}}", &ctx.uploaded_files),
        ("{{stakeholder_profiles}}", &ctx.stakeholder_profiles),
        ("{{stakeholders}}", &ctx.stakeholder_profiles),
        ("{{questions}}", &ctx.question_list),
        ("{{question_list}}", &ctx.question_list),
    ];

    let mut out = template.to_string();
    for (placeholder, value) in substitutions {
        if out.contains(placeholder) {
            out = out.replace(placeholder, value);
        }
    }
    out
}
