use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default value of the `"map"` field for Summoner's Rift (5v5) item sets.
pub const DEFAULT_MAP_CODE: &str = "SR";

/// champion -> old item ID -> replacement count
pub type ChangeLedger = BTreeMap<String, BTreeMap<String, usize>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunOptions {
    pub apply_changes: bool,
    pub backup: bool,
    pub map_code: String,
}

impl RunOptions {
    pub fn dry_run() -> Self {
        Self {
            apply_changes: false,
            ..Self::default()
        }
    }
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            apply_changes: true,
            backup: true,
            map_code: DEFAULT_MAP_CODE.to_string(),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunStats {
    pub files_scanned: usize,
    /// Files whose `"map"` field matched the requested map code.
    pub files_candidate: usize,
    /// Candidates with at least one replacement, written or not.
    pub files_matched: usize,
    /// Files actually rewritten on disk. Always zero for a dry run.
    pub files_modified: usize,
    pub ids_replaced: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResult {
    pub root: PathBuf,
    pub map_code: String,
    pub applied: bool,
    pub stats: RunStats,
    pub changes: ChangeLedger,
    pub matched_files: Vec<PathBuf>,
    pub modified_files: Vec<PathBuf>,
    pub warnings: Vec<String>,
    pub groups_detected: Vec<String>,
}

impl RunResult {
    pub(crate) fn new(root: PathBuf, options: &RunOptions) -> Self {
        Self {
            root,
            map_code: options.map_code.clone(),
            applied: options.apply_changes,
            stats: RunStats::default(),
            changes: ChangeLedger::new(),
            matched_files: Vec::new(),
            modified_files: Vec::new(),
            warnings: Vec::new(),
            groups_detected: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChangeSummary {
    pub group: String,
    pub old_id: String,
    pub new_id: String,
    pub name_es: String,
    pub name_en: String,
    pub count: usize,
}
