use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use super::error::{CoreError, CoreErrorCode};
use super::id_map::ItemIdMap;
use super::locate::locate_itemset_files;
use super::process::{FileOutcome, process_file};
use super::types::{RunOptions, RunResult};

/// Progress notifications emitted while a run is in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent {
    FileMatched { path: PathBuf, replacements: usize },
    FileWritten { path: PathBuf },
    Warning(String),
}

#[derive(Debug, Clone, Default)]
pub struct Engine {
    id_map: ItemIdMap,
}

impl Engine {
    pub fn new(id_map: ItemIdMap) -> Self {
        Self { id_map }
    }

    pub fn with_embedded_map() -> Self {
        Self::new(ItemIdMap::embedded())
    }

    pub fn id_map(&self) -> &ItemIdMap {
        &self.id_map
    }

    /// Process one file without touching any run-wide state.
    pub fn process_file(&self, path: &Path, root: &Path, options: &RunOptions) -> FileOutcome {
        process_file(path, root, &self.id_map, options)
    }

    pub fn run(&self, root: &Path, options: &RunOptions) -> Result<RunResult, CoreError> {
        self.run_with_progress(root, options, |_| {})
    }

    /// Scan every item set under `root`, one file at a time.
    ///
    /// Per-file failures end up in `RunResult::warnings`; only a missing or
    /// non-directory root is an error.
    pub fn run_with_progress<F>(
        &self,
        root: &Path,
        options: &RunOptions,
        mut on_event: F,
    ) -> Result<RunResult, CoreError>
    where
        F: FnMut(&RunEvent),
    {
        if !root.is_dir() {
            return Err(CoreError::new(
                CoreErrorCode::InvalidRoot,
                format!("not a folder: {}", root.display()),
            ));
        }

        tracing::info!(
            root = %root.display(),
            map = %options.map_code,
            apply = options.apply_changes,
            backup = options.backup,
            "starting item set scan"
        );

        let mut result = RunResult::new(root.to_path_buf(), options);
        let mut groups = BTreeSet::new();

        for path in locate_itemset_files(root)? {
            result.stats.files_scanned += 1;
            let outcome = self.process_file(&path, root, options);

            if let Some(error) = &outcome.error {
                let warning = format!("{}: {}", path.display(), error);
                tracing::warn!("{warning}");
                on_event(&RunEvent::Warning(warning.clone()));
                result.warnings.push(warning);
            }
            if !outcome.is_candidate {
                continue;
            }

            result.stats.files_candidate += 1;
            if let Some(group) = &outcome.group {
                groups.insert(group.clone());
            }
            if outcome.replacements == 0 {
                continue;
            }

            tracing::debug!(
                "{}: {} replacement(s)",
                path.display(),
                outcome.replacements
            );
            on_event(&RunEvent::FileMatched {
                path: path.clone(),
                replacements: outcome.replacements,
            });
            result.stats.files_matched += 1;
            result.stats.ids_replaced += outcome.replacements;
            result.matched_files.push(path.clone());

            if let Some(group) = outcome.group {
                let entry = result.changes.entry(group).or_default();
                for (old_id, count) in outcome.ledger {
                    *entry.entry(old_id).or_insert(0) += count;
                }
            }

            if outcome.written {
                result.stats.files_modified += 1;
                on_event(&RunEvent::FileWritten { path: path.clone() });
                result.modified_files.push(path);
            }
        }

        let mut groups: Vec<String> = groups.into_iter().collect();
        groups.sort_by(|a, b| {
            a.to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b))
        });
        result.groups_detected = groups;

        tracing::info!(
            scanned = result.stats.files_scanned,
            candidates = result.stats.files_candidate,
            matched = result.stats.files_matched,
            modified = result.stats.files_modified,
            replaced = result.stats.ids_replaced,
            warnings = result.warnings.len(),
            "item set scan finished"
        );
        Ok(result)
    }
}
