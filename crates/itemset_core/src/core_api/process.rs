use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value as JsonValue;

use super::error::FileError;
use super::id_map::ItemIdMap;
use super::locate::group_key_for;
use super::types::RunOptions;

pub const BACKUP_SUFFIX: &str = ".bak";

const MAP_FIELD: &str = "map";
const BLOCKS_FIELD: &str = "blocks";
const ITEMS_FIELD: &str = "items";
const ID_FIELD: &str = "id";

/// What happened to a single item set file.
#[derive(Debug, Default)]
pub struct FileOutcome {
    pub is_candidate: bool,
    pub group: Option<String>,
    pub replacements: usize,
    /// old item ID -> replacements in this file
    pub ledger: BTreeMap<String, usize>,
    pub written: bool,
    pub error: Option<FileError>,
}

impl FileOutcome {
    fn skipped() -> Self {
        Self::default()
    }

    fn failed(error: FileError) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }
}

/// `<path>.bak`, e.g. `set.json` -> `set.json.bak`.
pub fn backup_path_for(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}

pub(crate) fn process_file(
    path: &Path,
    root: &Path,
    id_map: &ItemIdMap,
    options: &RunOptions,
) -> FileOutcome {
    let original = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => return FileOutcome::failed(FileError::Read(e)),
    };
    let mut doc: JsonValue = match serde_json::from_slice(&original) {
        Ok(doc) => doc,
        Err(e) => return FileOutcome::failed(FileError::InvalidJson(e)),
    };

    let Some(obj) = doc.as_object() else {
        tracing::debug!("{}: top-level value is not an object", path.display());
        return FileOutcome::skipped();
    };
    if obj.get(MAP_FIELD).and_then(JsonValue::as_str) != Some(options.map_code.as_str()) {
        return FileOutcome::skipped();
    }

    let Some(group) = group_key_for(root, path) else {
        return FileOutcome::failed(FileError::Location);
    };

    let mut ledger = BTreeMap::new();
    let replacements = replace_item_ids(&mut doc, id_map, &mut ledger);
    let mut outcome = FileOutcome {
        is_candidate: true,
        group: Some(group),
        replacements,
        ledger,
        written: false,
        error: None,
    };

    if replacements == 0 || !options.apply_changes {
        return outcome;
    }

    if let Err(error) = write_back(path, &original, &doc, options.backup) {
        outcome.replacements = 0;
        outcome.ledger.clear();
        outcome.error = Some(error);
        return outcome;
    }
    outcome.written = true;
    outcome
}

/// Rewrite `blocks[*].items[*].id` in place. Anything off that shape is left alone.
pub(crate) fn replace_item_ids(
    doc: &mut JsonValue,
    id_map: &ItemIdMap,
    ledger: &mut BTreeMap<String, usize>,
) -> usize {
    let Some(blocks) = doc.get_mut(BLOCKS_FIELD).and_then(JsonValue::as_array_mut) else {
        return 0;
    };

    let mut replacements = 0;
    for block in blocks {
        let Some(items) = block.get_mut(ITEMS_FIELD).and_then(JsonValue::as_array_mut) else {
            continue;
        };
        for item in items {
            let Some(item) = item.as_object_mut() else {
                continue;
            };
            let Some(item_id) = item.get(ID_FIELD).and_then(id_string) else {
                continue;
            };
            let Some(info) = id_map.resolve(&item_id) else {
                continue;
            };
            if info.new_id == item_id {
                continue;
            }
            item.insert(ID_FIELD.to_string(), JsonValue::String(info.new_id.clone()));
            replacements += 1;
            *ledger.entry(item_id).or_insert(0) += 1;
        }
    }
    replacements
}

// Item IDs appear both as strings and as bare numbers.
fn id_string(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn write_back(
    path: &Path,
    original: &[u8],
    doc: &JsonValue,
    backup: bool,
) -> Result<(), FileError> {
    let encoded = serde_json::to_vec(doc).map_err(FileError::Serialize)?;

    if backup {
        let backup_path = backup_path_for(path);
        if !backup_path.exists() {
            fs::write(&backup_path, original).map_err(|source| FileError::Backup {
                path: backup_path.clone(),
                source,
            })?;
            tracing::debug!("backed up {} to {}", path.display(), backup_path.display());
        }
    }

    fs::write(path, encoded).map_err(FileError::Write)
}
