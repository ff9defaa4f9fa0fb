//! Grouping flat response rows into question/answer pairs.

use std::collections::HashMap;

use colloquy_core::{QuestionAnswerPair, ResponseRecord, StakeholderAnswer};

const UNKNOWN_STAKEHOLDER: &str = "Unknown Stakeholder";
const UNKNOWN_QUESTION: &str = "Unknown Question";
const NO_RESPONSE: &str = "No response provided";
const UNCATEGORIZED: &str = "Uncategorized";

/// Group flat response rows by question, producing one
/// [`QuestionAnswerPair`] per distinct question in first-seen order.
///
/// The grouping key is the question id when present, otherwise the joined
/// question text. Answer order within a pair follows input order. A pair
/// is created lazily on its first answer, so `answers` is never empty.
pub fn prepare_question_answer_pairs(responses: &[ResponseRecord]) -> Vec<QuestionAnswerPair> {
    let mut pairs: Vec<QuestionAnswerPair> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for row in responses {
        let question_text = row
            .question
            .as_ref()
            .and_then(|q| q.text.clone())
            .unwrap_or_else(|| UNKNOWN_QUESTION.to_string());

        let key = row
            .question_id
            .clone()
            .unwrap_or_else(|| question_text.clone());

        let answer = StakeholderAnswer {
            stakeholder_name: row
                .stakeholder
                .as_ref()
                .and_then(|s| s.name.clone())
                .unwrap_or_else(|| UNKNOWN_STAKEHOLDER.to_string()),
            role: row.stakeholder.as_ref().and_then(|s| s.role.clone()),
            department: row.stakeholder.as_ref().and_then(|s| s.department.clone()),
            response_text: row
                .response
                .clone()
                .unwrap_or_else(|| NO_RESPONSE.to_string()),
            timestamp: row.created_at,
        };

        match index.get(&key) {
            Some(&at) => pairs[at].answers.push(answer),
            None => {
                index.insert(key, pairs.len());
                pairs.push(QuestionAnswerPair {
                    question: question_text,
                    category: row
                        .question
                        .as_ref()
                        .and_then(|q| q.category.clone())
                        .unwrap_or_else(|| UNCATEGORIZED.to_string()),
                    priority: row.question.as_ref().and_then(|q| q.priority.clone()),
                    answers: vec![answer],
                });
            }
        }
    }

    tracing::debug!(
        responses = responses.len(),
        pairs = pairs.len(),
        "Grouped responses into question/answer pairs"
    );

    pairs
}
