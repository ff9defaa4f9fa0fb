//! Uploaded-file preparation, including per-format content rendering.

use colloquy_core::{PreparedUpload, UploadRecord};

use crate::dates::human_date;

/// Data rows rendered before a CSV table is truncated.
const CSV_ROW_CAP: usize = 50;

/// Characters kept in a content preview before the ellipsis.
const PREVIEW_CHARS: usize = 500;

/// Normalize upload rows for prompt inclusion.
///
/// Content is format-specialized by filename or MIME suffix: CSV becomes
/// a markdown table, JSON is pretty-printed, XML/HTML is passed through
/// under a label, and everything else is included raw. Malformed CSV or
/// JSON falls back to the raw content rather than failing.
pub fn prepare_uploaded_files(uploads: &[UploadRecord]) -> Vec<PreparedUpload> {
    uploads.iter().map(prepare_one).collect()
}

fn prepare_one(upload: &UploadRecord) -> PreparedUpload {
    let name = upload
        .file_name
        .clone()
        .unwrap_or_else(|| "Unnamed file".to_string());

    let raw = upload
        .extracted_content
        .as_deref()
        .or(upload.content.as_deref())
        .filter(|c| !c.trim().is_empty());
    let has_content = raw.is_some();

    let content = raw.map(|text| extract_text_content(&name, upload.mime_type.as_deref(), text));

    let preview_source = content
        .as_deref()
        .or(upload.description.as_deref())
        .unwrap_or("");

    PreparedUpload {
        name,
        kind: upload
            .upload_type
            .clone()
            .or_else(|| upload.mime_type.clone())
            .unwrap_or_else(|| "unknown".to_string()),
        size_label: upload
            .file_size
            .map(format_file_size)
            .unwrap_or_else(|| "Unknown size".to_string()),
        description: upload.description.clone(),
        uploaded_label: upload
            .created_at
            .as_ref()
            .map(human_date)
            .unwrap_or_else(|| "Unknown date".to_string()),
        content_preview: preview_of(preview_source),
        content,
        has_content,
    }
}

/// Specialize raw extracted content by file format.
fn extract_text_content(name: &str, mime_type: Option<&str>, raw: &str) -> String {
    let lower_name = name.to_ascii_lowercase();
    let mime = mime_type.unwrap_or("").to_ascii_lowercase();

    if lower_name.ends_with(".csv") || mime.contains("text/csv") {
        csv_to_markdown_table(raw).unwrap_or_else(|| raw.to_string())
    } else if lower_name.ends_with(".json") || mime.contains("application/json") {
        match serde_json::from_str::<serde_json::Value>(raw) {
            Ok(value) => serde_json::to_string_pretty(&value).unwrap_or_else(|_| raw.to_string()),
            Err(_) => raw.to_string(),
        }
    } else if lower_name.ends_with(".xml") || mime.contains("xml") {
        format!("[XML document: {name}]\n{raw}")
    } else if lower_name.ends_with(".html") || lower_name.ends_with(".htm") || mime.contains("html")
    {
        format!("[HTML document: {name}]\n{raw}")
    } else {
        raw.to_string()
    }
}

/// Render CSV text as a markdown table, capped at [`CSV_ROW_CAP`] data
/// rows with a truncation notice. Returns `None` when the text has no
/// usable header row.
fn csv_to_markdown_table(raw: &str) -> Option<String> {
    let mut lines = raw.lines().filter(|l| !l.trim().is_empty());
    let header_line = lines.next()?;
    let headers: Vec<&str> = header_line.split(',').map(str::trim).collect();
    if headers.iter().all(|h| h.is_empty()) {
        return None;
    }

    let mut table = String::new();
    table.push_str(&format!("| {} |\n", headers.join(" | ")));
    table.push_str(&format!("|{}\n", " --- |".repeat(headers.len())));

    let rows: Vec<&str> = lines.collect();
    for row in rows.iter().take(CSV_ROW_CAP) {
        let cells: Vec<&str> = row.split(',').map(str::trim).collect();
        table.push_str(&format!("| {} |\n", cells.join(" | ")));
    }
    if rows.len() > CSV_ROW_CAP {
        table.push_str(&format!("... and {} more rows\n", rows.len() - CSV_ROW_CAP));
    }

    Some(table)
}

/// Human-readable byte count, e.g. `1.2 KB`.
fn format_file_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    const GB: f64 = MB * 1024.0;

    let bytes_f = bytes as f64;
    if bytes_f >= GB {
        format!("{:.1} GB", bytes_f / GB)
    } else if bytes_f >= MB {
        format!("{:.1} MB", bytes_f / MB)
    } else if bytes_f >= KB {
        format!("{:.1} KB", bytes_f / KB)
    } else {
        format!("{bytes} B")
    }
}

/// First [`PREVIEW_CHARS`] characters with an ellipsis when truncated.
fn preview_of(text: &str) -> String {
    if text.chars().count() <= PREVIEW_CHARS {
        return text.to_string();
    }
    let truncated: String = text.chars().take(PREVIEW_CHARS).collect();
    format!("{truncated}...")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn upload(name: &str, content: Option<&str>) -> UploadRecord {
        UploadRecord {
            file_name: Some(name.to_string()),
            upload_type: Some("document".to_string()),
            file_size: Some(2_048),
            description: Some("Quarterly figures".to_string()),
            created_at: chrono::Utc.with_ymd_and_hms(2026, 3, 12, 9, 0, 0).single(),
            extracted_content: content.map(str::to_string),
            content: None,
            mime_type: None,
        }
    }

    #[test]
    fn metadata_only_upload_has_no_content_but_keeps_preview() {
        let prepared = prepare_uploaded_files(&[upload("scan.pdf", None)]);
        let file = &prepared[0];

        assert!(!file.has_content);
        assert!(file.content.is_none());
        assert_eq!(file.content_preview, "Quarterly figures");
        assert_eq!(file.size_label, "2.0 KB");
        assert_eq!(file.uploaded_label, "March 12, 2026");
    }

    #[test]
    fn csv_renders_as_markdown_table() {
        let csv = "name,role\nDana,COO\nLee,CTO";
        let prepared = prepare_uploaded_files(&[upload("team.csv", Some(csv))]);
        let content = prepared[0].content.as_deref().unwrap();

        assert!(content.contains("| name | role |"));
        assert!(content.contains("| Dana | COO |"));
        assert!(!content.contains("more rows"));
    }

    #[test]
    fn long_csv_is_capped_with_a_truncation_notice() {
        let mut csv = String::from("id,value\n");
        for i in 0..75 {
            csv.push_str(&format!("{i},v{i}\n"));
        }
        let prepared = prepare_uploaded_files(&[upload("big.csv", Some(&csv))]);
        let content = prepared[0].content.as_deref().unwrap();

        assert!(content.contains("| 49 | v49 |"));
        assert!(!content.contains("| 50 | v50 |"));
        assert!(content.contains("... and 25 more rows"));
    }

    #[test]
    fn json_is_pretty_printed() {
        let prepared =
            prepare_uploaded_files(&[upload("config.json", Some(r#"{"a":1,"b":[2,3]}"#))]);
        let content = prepared[0].content.as_deref().unwrap();
        assert!(content.contains("\"a\": 1"));
        assert!(content.contains('\n'));
    }

    #[test]
    fn malformed_json_falls_back_to_raw() {
        let raw = "{not json at all";
        let prepared = prepare_uploaded_files(&[upload("broken.json", Some(raw))]);
        assert_eq!(prepared[0].content.as_deref(), Some(raw));
    }

    #[test]
    fn markup_passes_through_under_a_label() {
        let prepared = prepare_uploaded_files(&[upload("page.html", Some("<p>hi</p>"))]);
        let content = prepared[0].content.as_deref().unwrap();
        assert!(content.starts_with("[HTML document: page.html]"));
        assert!(content.contains("<p>hi</p>"));
    }

    #[test]
    fn plain_text_is_included_raw() {
        let prepared = prepare_uploaded_files(&[upload("notes.txt", Some("meeting notes"))]);
        assert_eq!(prepared[0].content.as_deref(), Some("meeting notes"));
        assert!(prepared[0].has_content);
    }

    #[test]
    fn preview_truncates_at_five_hundred_chars() {
        let long = "x".repeat(800);
        let prepared = prepare_uploaded_files(&[upload("log.txt", Some(&long))]);
        let preview = &prepared[0].content_preview;

        assert_eq!(preview.chars().count(), 503);
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn file_sizes_render_human_readable() {
        assert_eq!(format_file_size(512), "512 B");
        assert_eq!(format_file_size(1_536), "1.5 KB");
        assert_eq!(format_file_size(3 * 1024 * 1024), "3.0 MB");
    }

    #[test]
    fn whitespace_only_content_counts_as_no_content() {
        let prepared = prepare_uploaded_files(&[upload("blank.txt", Some("   \n\t"))]);
        assert!(!prepared[0].has_content);
        assert!(prepared[0].content.is_none());
    }
}
