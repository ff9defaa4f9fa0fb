//! Response grouping by category and by stakeholder.

use std::collections::HashMap;

use colloquy_core::ResponseRecord;

/// Partition responses by question category, preserving first-seen group
/// order and insertion order within each group.
pub fn group_responses_by_category(
    responses: &[ResponseRecord],
) -> Vec<(String, Vec<ResponseRecord>)> {
    group_by(responses, |r| {
        r.question
            .as_ref()
            .and_then(|q| q.category.clone())
            .unwrap_or_else(|| "Uncategorized".to_string())
    })
}

/// Partition responses by stakeholder display name, preserving first-seen
/// group order and insertion order within each group.
pub fn group_responses_by_stakeholder(
    responses: &[ResponseRecord],
) -> Vec<(String, Vec<ResponseRecord>)> {
    group_by(responses, |r| {
        r.stakeholder
            .as_ref()
            .and_then(|s| s.name.clone())
            .unwrap_or_else(|| "Unknown Stakeholder".to_string())
    })
}

fn group_by<F>(responses: &[ResponseRecord], key_of: F) -> Vec<(String, Vec<ResponseRecord>)>
where
    F: Fn(&ResponseRecord) -> String,
{
    let mut groups: Vec<(String, Vec<ResponseRecord>)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for row in responses {
        let key = key_of(row);
        match index.get(&key) {
            Some(&at) => groups[at].1.push(row.clone()),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((key, vec![row.clone()]));
            }
        }
    }

    groups
}
