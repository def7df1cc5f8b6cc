use std::fmt::Write as _;
use std::path::Path;

use itemset_core::core_api::{ChangeSummary, RunResult, RunStats};
use serde_json::{Map as JsonMap, Value as JsonValue};

const TABLE_COL_GROUP: usize = 14;
const TABLE_COL_NAME_ES: usize = 32;
const TABLE_COL_NAME_EN: usize = 28;
const TABLE_COL_OLD: usize = 6;
const TABLE_COL_NEW: usize = 8;

/// Plain-text report printed by the command-line front-end.
pub fn render_text_report(result: &RunResult, rows: &[ChangeSummary]) -> String {
    let mut out = String::new();

    let action = if result.applied {
        "MODIFIED"
    } else {
        "WOULD MODIFY"
    };
    let listed = if result.applied {
        &result.modified_files
    } else {
        &result.matched_files
    };
    for path in listed {
        let _ = writeln!(out, "{action}: {}", path.display());
    }

    for warning in &result.warnings {
        let _ = writeln!(out, "WARN: {warning}");
    }

    if !result.groups_detected.is_empty() {
        let _ = writeln!(
            out,
            "Detected champions (map={}): {}",
            result.map_code,
            result.groups_detected.join(", ")
        );
    }

    if rows.is_empty() {
        out.push_str("\nNo replacements matched the embedded mapping.\n");
    } else {
        let _ = writeln!(out, "\nChanges by champion (map={}):", result.map_code);
        for line in grouped_change_lines(rows) {
            let _ = writeln!(out, "{line}");
        }
    }

    let _ = writeln!(
        out,
        "\nSummary: {}",
        format_summary(&result.map_code, &result.stats)
    );
    if !result.applied {
        out.push_str("\nDry-run: no files were modified.\n");
    }
    out
}

/// `- <champion>: <es> / <en> (<old>-><new>) xN; ...`, one line per champion.
pub fn grouped_change_lines(rows: &[ChangeSummary]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current: Option<&str> = None;
    let mut parts: Vec<String> = Vec::new();

    for row in rows {
        if current != Some(row.group.as_str()) {
            if let Some(group) = current {
                lines.push(format!("- {group}: {}", parts.join("; ")));
            }
            current = Some(row.group.as_str());
            parts.clear();
        }
        let suffix = if row.count != 1 {
            format!(" x{}", row.count)
        } else {
            String::new()
        };
        parts.push(format!(
            "{} / {} ({}->{}){suffix}",
            row.name_es, row.name_en, row.old_id, row.new_id
        ));
    }
    if let Some(group) = current {
        lines.push(format!("- {group}: {}", parts.join("; ")));
    }
    lines
}

pub fn format_summary(map_code: &str, stats: &RunStats) -> String {
    format!(
        "scanned={}, map={}={}, files_matched={}, files_changed={}, ids_changed={}",
        stats.files_scanned,
        map_code,
        stats.files_candidate,
        stats.files_matched,
        stats.files_modified,
        stats.ids_replaced
    )
}

/// Fixed-width change table for the interactive front-end.
pub fn render_change_table(rows: &[ChangeSummary]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<g$} {:<es$} {:<en$} {:>old$} {:>new$} {:>5}",
        "Champion",
        "Item (ES)",
        "Item (EN)",
        "Old",
        "New",
        "Count",
        g = TABLE_COL_GROUP,
        es = TABLE_COL_NAME_ES,
        en = TABLE_COL_NAME_EN,
        old = TABLE_COL_OLD,
        new = TABLE_COL_NEW,
    );
    let width =
        TABLE_COL_GROUP + TABLE_COL_NAME_ES + TABLE_COL_NAME_EN + TABLE_COL_OLD + TABLE_COL_NEW + 10;
    let _ = writeln!(out, "{}", "-".repeat(width));

    for row in rows {
        let _ = writeln!(
            out,
            "{:<g$} {:<es$} {:<en$} {:>old$} {:>new$} {:>5}",
            truncate(&row.group, TABLE_COL_GROUP),
            truncate(&row.name_es, TABLE_COL_NAME_ES),
            truncate(&row.name_en, TABLE_COL_NAME_EN),
            row.old_id,
            row.new_id,
            row.count,
            g = TABLE_COL_GROUP,
            es = TABLE_COL_NAME_ES,
            en = TABLE_COL_NAME_EN,
            old = TABLE_COL_OLD,
            new = TABLE_COL_NEW,
        );
    }
    out
}

/// Machine-readable report with a fixed top-level key order.
pub fn render_json_report(result: &RunResult, rows: &[ChangeSummary]) -> JsonValue {
    let mut out = JsonMap::new();
    out.insert("root".to_string(), path_to_json(&result.root));
    out.insert(
        "map".to_string(),
        JsonValue::String(result.map_code.clone()),
    );
    out.insert("applied".to_string(), JsonValue::Bool(result.applied));
    out.insert("stats".to_string(), stats_to_json(&result.stats));
    out.insert(
        "champions".to_string(),
        JsonValue::Array(
            result
                .groups_detected
                .iter()
                .cloned()
                .map(JsonValue::String)
                .collect(),
        ),
    );
    out.insert(
        "changes".to_string(),
        JsonValue::Array(rows.iter().map(change_to_json).collect()),
    );
    out.insert(
        "matched_files".to_string(),
        JsonValue::Array(result.matched_files.iter().map(|p| path_to_json(p)).collect()),
    );
    out.insert(
        "modified_files".to_string(),
        JsonValue::Array(
            result
                .modified_files
                .iter()
                .map(|p| path_to_json(p))
                .collect(),
        ),
    );
    out.insert(
        "warnings".to_string(),
        JsonValue::Array(
            result
                .warnings
                .iter()
                .cloned()
                .map(JsonValue::String)
                .collect(),
        ),
    );
    JsonValue::Object(out)
}

fn stats_to_json(stats: &RunStats) -> JsonValue {
    let mut m = JsonMap::new();
    m.insert(
        "files_scanned".to_string(),
        JsonValue::from(stats.files_scanned),
    );
    m.insert(
        "files_candidate".to_string(),
        JsonValue::from(stats.files_candidate),
    );
    m.insert(
        "files_matched".to_string(),
        JsonValue::from(stats.files_matched),
    );
    m.insert(
        "files_modified".to_string(),
        JsonValue::from(stats.files_modified),
    );
    m.insert(
        "ids_replaced".to_string(),
        JsonValue::from(stats.ids_replaced),
    );
    JsonValue::Object(m)
}

fn change_to_json(row: &ChangeSummary) -> JsonValue {
    let mut m = JsonMap::new();
    m.insert("champion".to_string(), JsonValue::String(row.group.clone()));
    m.insert("old_id".to_string(), JsonValue::String(row.old_id.clone()));
    m.insert("new_id".to_string(), JsonValue::String(row.new_id.clone()));
    m.insert("name_es".to_string(), JsonValue::String(row.name_es.clone()));
    m.insert("name_en".to_string(), JsonValue::String(row.name_en.clone()));
    m.insert("count".to_string(), JsonValue::from(row.count));
    JsonValue::Object(m)
}

fn path_to_json(path: &Path) -> JsonValue {
    JsonValue::String(path.display().to_string())
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut out: String = value.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}
