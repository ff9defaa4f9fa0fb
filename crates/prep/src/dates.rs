use chrono::{DateTime, Utc};

/// Render a timestamp the way it should read inside a prompt,
/// e.g. `February 3, 2026`.
pub(crate) fn human_date(ts: &DateTime<Utc>) -> String {
    ts.format("%B %-d, %Y").to_string()
}
