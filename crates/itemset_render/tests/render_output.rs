use std::fs;
use std::path::Path;

use itemset_core::core_api::{Engine, RunOptions, RunResult, flatten_changes};
use itemset_render::{
    format_summary, grouped_change_lines, render_change_table, render_json_report,
    render_text_report,
};

fn write_set(root: &Path, champion: &str, contents: &str) {
    let path = root.join(champion).join("Recommended").join("set.json");
    fs::create_dir_all(path.parent().expect("set path should have a parent"))
        .expect("failed to create champion dirs");
    fs::write(path, contents).expect("failed to write item set");
}

fn run_fixture(options: &RunOptions) -> (tempfile::TempDir, RunResult, Engine) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    write_set(
        dir.path(),
        "Ahri",
        r#"{"map":"SR","blocks":[{"items":[{"id":"3003"},{"id":"3003"},{"id":"3110"}]}]}"#,
    );
    write_set(
        dir.path(),
        "Zed",
        r#"{"map":"SR","blocks":[{"items":[{"id":"1001"}]}]}"#,
    );
    let engine = Engine::with_embedded_map();
    let result = engine.run(dir.path(), options).expect("run should succeed");
    (dir, result, engine)
}

#[test]
fn text_report_lists_changes_per_champion() {
    let (_dir, result, engine) = run_fixture(&RunOptions::default());
    let rows = flatten_changes(&result, engine.id_map());

    let report = render_text_report(&result, &rows);

    assert!(report.contains("MODIFIED: "));
    assert!(report.contains("Detected champions (map=SR): Ahri, Zed"));
    assert!(report.contains(
        "- Ahri: Bastón del arcángel / Archangel's Staff (3003->323003) x2; Corazón de hielo / Frozen Heart (3110->323110)"
    ));
    assert!(report.contains(
        "Summary: scanned=2, map=SR=2, files_matched=1, files_changed=1, ids_changed=3"
    ));
    assert!(!report.contains("Dry-run"));
}

#[test]
fn dry_run_report_says_would_modify() {
    let (_dir, result, engine) = run_fixture(&RunOptions::dry_run());
    let rows = flatten_changes(&result, engine.id_map());

    let report = render_text_report(&result, &rows);

    assert!(report.contains("WOULD MODIFY: "));
    assert!(!report.contains("\nMODIFIED: "));
    assert!(report.contains("files_matched=1, files_changed=0, ids_changed=3"));
    assert!(report.trim_end().ends_with("Dry-run: no files were modified."));
}

#[test]
fn empty_report_mentions_no_replacements() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let result = Engine::with_embedded_map()
        .run(dir.path(), &RunOptions::default())
        .expect("run should succeed");

    let report = render_text_report(&result, &[]);

    assert!(report.contains("No replacements matched the embedded mapping."));
    assert!(report.contains(&format_summary("SR", &result.stats)));
}

#[test]
fn grouped_lines_split_on_champion() {
    let (_dir, result, engine) = run_fixture(&RunOptions::dry_run());
    let mut rows = flatten_changes(&result, engine.id_map());
    let mut extra = rows[0].clone();
    extra.group = "Zed".to_string();
    extra.count = 1;
    rows.push(extra);

    let lines = grouped_change_lines(&rows);

    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("- Ahri: "));
    assert_eq!(
        lines[1],
        "- Zed: Bastón del arcángel / Archangel's Staff (3003->323003)"
    );
}

#[test]
fn json_report_uses_canonical_key_order() {
    let (_dir, result, engine) = run_fixture(&RunOptions::dry_run());
    let rows = flatten_changes(&result, engine.id_map());

    let value = render_json_report(&result, &rows);
    let keys: Vec<&str> = value
        .as_object()
        .expect("json should be an object")
        .keys()
        .map(String::as_str)
        .collect();

    assert_eq!(
        keys,
        vec![
            "root",
            "map",
            "applied",
            "stats",
            "champions",
            "changes",
            "matched_files",
            "modified_files",
            "warnings",
        ]
    );
    assert_eq!(value["applied"], false);
    assert_eq!(value["stats"]["ids_replaced"], 3);
    assert_eq!(value["changes"][0]["champion"], "Ahri");
    assert_eq!(value["changes"][0]["old_id"], "3003");
    assert_eq!(value["changes"][0]["count"], 2);
    assert_eq!(value["champions"][1], "Zed");
}

#[test]
fn change_table_has_header_and_one_line_per_row() {
    let (_dir, result, engine) = run_fixture(&RunOptions::dry_run());
    let rows = flatten_changes(&result, engine.id_map());

    let table = render_change_table(&rows);
    let lines: Vec<&str> = table.lines().collect();

    assert_eq!(lines.len(), 2 + rows.len());
    assert!(lines[0].starts_with("Champion"));
    assert!(lines[2].starts_with("Ahri"));
    assert!(lines[2].contains("323003"));
    assert!(lines[2].trim_end().ends_with('2'));
}
