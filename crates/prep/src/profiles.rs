//! Stakeholder participation profiles.

use std::collections::HashSet;

use colloquy_core::{ResponseRecord, StakeholderProfile, StakeholderRecord};

const NOT_SPECIFIED: &str = "Not specified";

/// The distinct-question key for a response: question id when present,
/// joined question text otherwise.
fn question_key(row: &ResponseRecord) -> Option<String> {
    row.question_id
        .clone()
        .or_else(|| row.question.as_ref().and_then(|q| q.text.clone()))
}

/// Build one profile per stakeholder with response counts and a
/// completion rate against the distinct question set across all
/// responses. Zero distinct questions yields `"0%"` rather than a
/// division error.
pub fn prepare_stakeholder_profiles(
    stakeholders: &[StakeholderRecord],
    responses: &[ResponseRecord],
) -> Vec<StakeholderProfile> {
    let all_questions: HashSet<String> = responses.iter().filter_map(question_key).collect();
    let total_questions = all_questions.len();

    stakeholders
        .iter()
        .map(|st| {
            let own: Vec<&ResponseRecord> = responses
                .iter()
                .filter(|r| r.stakeholder_id.is_some() && r.stakeholder_id == st.id)
                .collect();

            let answered: HashSet<String> =
                own.iter().filter_map(|r| question_key(r)).collect();

            let completion_rate = if total_questions == 0 {
                "0%".to_string()
            } else {
                let pct =
                    (answered.len() as f64 / total_questions as f64 * 100.0).round() as u32;
                format!("{pct}%")
            };

            StakeholderProfile {
                name: st
                    .name
                    .clone()
                    .unwrap_or_else(|| "Unknown Stakeholder".to_string()),
                role: st.role.clone().unwrap_or_else(|| NOT_SPECIFIED.to_string()),
                department: st
                    .department
                    .clone()
                    .unwrap_or_else(|| NOT_SPECIFIED.to_string()),
                email: st.email.clone(),
                status: st.status.clone().unwrap_or_else(|| "pending".to_string()),
                response_count: own.len(),
                completion_rate,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stakeholder(id: &str, name: &str) -> StakeholderRecord {
        StakeholderRecord {
            id: Some(id.to_string()),
            name: Some(name.to_string()),
            role: Some("Analyst".to_string()),
            department: Some("Finance".to_string()),
            email: None,
            status: Some("active".to_string()),
        }
    }

    fn response(stakeholder_id: &str, question_id: &str) -> ResponseRecord {
        ResponseRecord {
            stakeholder_id: Some(stakeholder_id.to_string()),
            question_id: Some(question_id.to_string()),
            response: Some("answer".to_string()),
            question: None,
            stakeholder: None,
            created_at: None,
        }
    }

    #[test]
    fn empty_inputs_yield_empty_profiles() {
        assert!(prepare_stakeholder_profiles(&[], &[]).is_empty());
    }

    #[test]
    fn completion_rate_is_zero_percent_with_no_questions() {
        let profiles = prepare_stakeholder_profiles(&[stakeholder("s1", "Dana")], &[]);
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].completion_rate, "0%");
        assert_eq!(profiles[0].response_count, 0);
    }

    #[test]
    fn completion_rate_counts_distinct_questions() {
        // Four distinct questions overall; Dana answered three (one twice).
        let responses = vec![
            response("s1", "q1"),
            response("s1", "q2"),
            response("s1", "q3"),
            response("s1", "q3"),
            response("s2", "q4"),
        ];
        let profiles =
            prepare_stakeholder_profiles(&[stakeholder("s1", "Dana")], &responses);

        assert_eq!(profiles[0].response_count, 4);
        assert_eq!(profiles[0].completion_rate, "75%");
    }

    #[test]
    fn rate_rounds_to_nearest_integer() {
        // One of three distinct questions: 33.33 rounds to 33.
        let responses = vec![
            response("s1", "q1"),
            response("s2", "q2"),
            response("s2", "q3"),
        ];
        let profiles =
            prepare_stakeholder_profiles(&[stakeholder("s1", "Dana")], &responses);
        assert_eq!(profiles[0].completion_rate, "33%");
    }

    #[test]
    fn sparse_stakeholder_rows_get_fallbacks() {
        let bare = StakeholderRecord {
            id: None,
            name: None,
            role: None,
            department: None,
            email: None,
            status: None,
        };
        let profiles = prepare_stakeholder_profiles(&[bare], &[]);
        assert_eq!(profiles[0].name, "Unknown Stakeholder");
        assert_eq!(profiles[0].role, "Not specified");
        assert_eq!(profiles[0].status, "pending");
    }
}
