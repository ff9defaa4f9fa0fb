//! Project header preparation.

use colloquy_core::{ClientRecord, ProjectRecord, ProjectSummary};

use crate::dates::human_date;

/// Map a project row (and its client, when joined) onto the summary
/// rendered at the top of every context. Missing optionals become
/// literal fallback strings.
pub fn prepare_project_summary(
    project: &ProjectRecord,
    client: Option<&ClientRecord>,
) -> ProjectSummary {
    ProjectSummary {
        name: project
            .name
            .clone()
            .unwrap_or_else(|| "Untitled Project".to_string()),
        description: project
            .description
            .clone()
            .unwrap_or_else(|| "No description provided".to_string()),
        status: project.status.clone().unwrap_or_else(|| "active".to_string()),
        client_name: client.and_then(|c| c.name.clone()),
        start_label: project
            .start_date
            .as_ref()
            .map(human_date)
            .unwrap_or_else(|| "Not set".to_string()),
        target_end_label: project
            .target_end_date
            .as_ref()
            .map(human_date)
            .unwrap_or_else(|| "Not set".to_string()),
        progress: project.progress.unwrap_or(0),
    }
}
