mod detect;
mod engine;
mod error;
mod id_map;
mod locate;
mod process;
mod report;
mod types;

pub use detect::{candidate_roots, detect_champions_root, has_itemset_files};
pub use engine::{Engine, RunEvent};
pub use error::{CoreError, CoreErrorCode, FileError};
pub use id_map::{ItemIdMap, ItemInfo};
pub use locate::{
    ITEMSET_EXTENSION, ItemSetFiles, RECOMMENDED_DIR_NAME, group_key_for, locate_itemset_files,
};
pub use process::{BACKUP_SUFFIX, FileOutcome, backup_path_for};
pub use report::flatten_changes;
pub use types::{ChangeLedger, ChangeSummary, DEFAULT_MAP_CODE, RunOptions, RunResult, RunStats};
