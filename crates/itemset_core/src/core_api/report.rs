use std::cmp::Reverse;

use super::id_map::ItemIdMap;
use super::types::{ChangeSummary, RunResult};

/// Flatten the change ledger into display rows.
///
/// Champions are ordered case-insensitively; within a champion the most
/// replaced items come first, ties broken by old ID.
pub fn flatten_changes(result: &RunResult, id_map: &ItemIdMap) -> Vec<ChangeSummary> {
    let mut groups: Vec<&String> = result.changes.keys().collect();
    groups.sort_by(|a, b| {
        a.to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b))
    });

    let mut rows = Vec::new();
    for group in groups {
        let mut items: Vec<(&String, &usize)> = result.changes[group].iter().collect();
        items.sort_by_key(|(old_id, count)| (Reverse(**count), *old_id));

        for (old_id, &count) in items {
            let row = match id_map.resolve(old_id) {
                Some(info) => ChangeSummary {
                    group: group.clone(),
                    old_id: info.old_id.clone(),
                    new_id: info.new_id.clone(),
                    name_es: info.name_es.clone(),
                    name_en: info.name_en.clone(),
                    count,
                },
                None => ChangeSummary {
                    group: group.clone(),
                    old_id: old_id.clone(),
                    new_id: "?".to_string(),
                    name_es: format!("ID {old_id}"),
                    name_en: format!("ID {old_id}"),
                    count,
                },
            };
            rows.push(row);
        }
    }
    rows
}
