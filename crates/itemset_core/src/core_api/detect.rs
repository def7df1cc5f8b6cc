use std::collections::BTreeSet;
use std::env;
use std::path::{Path, PathBuf};

use super::locate::locate_itemset_files;

const CHAMPIONS_SUFFIX: [&str; 4] = ["Riot Games", "League of Legends", "Config", "Champions"];
const DEFAULT_INSTALL_ROOT: &str = r"C:\Riot Games\League of Legends\Config\Champions";
const PROGRAM_FILES_DIRS: [&str; 2] = ["Program Files", "Program Files (x86)"];

/// True when `dir` contains at least one `*/Recommended/*.json` item set.
pub fn has_itemset_files(dir: &Path) -> bool {
    locate_itemset_files(dir).is_ok_and(|mut files| files.any(|path| path.is_file()))
}

/// Probe order for the Champions folder, without duplicates.
///
/// The executable's own folder comes first so a copy dropped into the
/// Champions folder works without arguments.
pub fn candidate_roots(exe_dir: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(dir) = exe_dir {
        candidates.push(dir.to_path_buf());
    }
    candidates.push(PathBuf::from(DEFAULT_INSTALL_ROOT));

    if cfg!(windows) {
        for letter in 'A'..='Z' {
            let drive = PathBuf::from(format!("{letter}:\\"));
            if !drive.exists() {
                continue;
            }
            candidates.push(with_champions_suffix(drive.clone()));
            for program_files in PROGRAM_FILES_DIRS {
                candidates.push(with_champions_suffix(drive.join(program_files)));
            }
        }
    }

    let mut seen = BTreeSet::new();
    candidates.retain(|candidate| seen.insert(candidate.clone()));
    candidates
}

pub fn detect_champions_root() -> Option<PathBuf> {
    let exe_dir = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));

    candidate_roots(exe_dir.as_deref())
        .into_iter()
        .find(|candidate| {
            let found = candidate.is_dir() && has_itemset_files(candidate);
            tracing::debug!("probe {}: {}", candidate.display(), found);
            found
        })
}

fn with_champions_suffix(base: PathBuf) -> PathBuf {
    CHAMPIONS_SUFFIX
        .iter()
        .fold(base, |path, part| path.join(part))
}
