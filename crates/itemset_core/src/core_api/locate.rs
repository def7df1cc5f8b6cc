use std::path::{Component, Path, PathBuf};

use glob::{Paths, Pattern};

use super::error::{CoreError, CoreErrorCode};

pub const RECOMMENDED_DIR_NAME: &str = "Recommended";
pub const ITEMSET_EXTENSION: &str = "json";

/// Lazy sequence of `<root>/*/Recommended/*.json` paths.
///
/// Directories are visited in lexicographic order at each level. Every hit is
/// yielded, including directories and dangling links named `*.json`; reading
/// them is left to the processor, which reports the failure.
pub struct ItemSetFiles {
    paths: Paths,
}

impl Iterator for ItemSetFiles {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        loop {
            match self.paths.next()? {
                Ok(path) => return Some(path),
                Err(e) => {
                    tracing::warn!("skipping unreadable entry {}: {}", e.path().display(), e);
                    continue;
                }
            }
        }
    }
}

/// Glob the item set files under `root`. Each call starts a fresh traversal.
///
/// `glob` patterns are `&str`, so a root that is not valid UTF-8 is rejected
/// with `InvalidRoot` rather than matched against a lossy rendering.
pub fn locate_itemset_files(root: &Path) -> Result<ItemSetFiles, CoreError> {
    let root_str = root.to_str().ok_or_else(|| {
        CoreError::new(
            CoreErrorCode::InvalidRoot,
            format!("root path is not valid UTF-8: {}", root.display()),
        )
    })?;
    let escaped = PathBuf::from(Pattern::escape(root_str));
    let pattern = escaped
        .join("*")
        .join(RECOMMENDED_DIR_NAME)
        .join(format!("*.{ITEMSET_EXTENSION}"));
    let pattern = pattern.to_string_lossy();

    let paths = glob::glob(&pattern).map_err(|e| {
        CoreError::new(
            CoreErrorCode::InvalidRoot,
            format!("invalid search pattern {pattern}: {e}"),
        )
    })?;
    Ok(ItemSetFiles { paths })
}

/// Champion folder name for an item set at `<root>/<champion>/Recommended/<file>`.
///
/// Returns `None` for files at any other depth.
pub fn group_key_for(root: &Path, path: &Path) -> Option<String> {
    if let Ok(relative) = path.strip_prefix(root) {
        let parts: Vec<&str> = relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => part.to_str(),
                _ => None,
            })
            .collect();
        return match parts.as_slice() {
            [group, _, _] => Some((*group).to_string()),
            _ => None,
        };
    }

    let recommended = path.parent()?;
    let group = recommended.parent()?;
    group
        .file_name()
        .and_then(|name| name.to_str())
        .map(ToOwned::to_owned)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use super::{group_key_for, locate_itemset_files};
    use crate::core_api::CoreErrorCode;

    #[test]
    fn group_key_is_first_component_under_root() {
        let root = Path::new("/games/Champions");
        let file = root.join("Ahri").join("Recommended").join("set.json");
        assert_eq!(group_key_for(root, &file).as_deref(), Some("Ahri"));
    }

    #[test]
    fn group_key_rejects_other_depths() {
        let root = Path::new("/games/Champions");
        assert_eq!(group_key_for(root, &root.join("set.json")), None);
        assert_eq!(
            group_key_for(root, &root.join("Ahri").join("set.json")),
            None
        );
        assert_eq!(
            group_key_for(
                root,
                &root.join("Ahri").join("Recommended").join("old").join("set.json")
            ),
            None
        );
    }

    #[test]
    fn group_key_falls_back_to_grandparent_outside_root() {
        let root = Path::new("/elsewhere");
        let file = Path::new("/games/Champions/Zed/Recommended/set.json");
        assert_eq!(group_key_for(root, file).as_deref(), Some("Zed"));
    }

    #[test]
    fn locate_matches_recommended_json_paths() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = dir.path();
        let write = |rel: &str| {
            let path = root.join(rel);
            fs::create_dir_all(path.parent().expect("fixture has parent"))
                .expect("failed to create fixture dirs");
            fs::write(&path, b"{}").expect("failed to write fixture");
        };
        write("Zed/Recommended/b.json");
        write("Ahri/Recommended/a.json");
        write("Ahri/Recommended/notes.txt");
        write("Ahri/Other/c.json");
        write("Ahri/Recommended/deep/d.json");
        write("top.json");
        fs::create_dir_all(root.join("Lux/Recommended/dir.json"))
            .expect("failed to create decoy dir");

        let found: Vec<_> = locate_itemset_files(root)
            .expect("root should glob")
            .map(|p| {
                p.strip_prefix(root)
                    .expect("result under root")
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect();
        assert_eq!(
            found,
            vec![
                "Ahri/Recommended/a.json",
                "Lux/Recommended/dir.json",
                "Zed/Recommended/b.json"
            ]
        );
    }

    #[test]
    fn locate_escapes_pattern_characters_in_root() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = dir.path().join("Champions [backup]");
        let file = root.join("Ahri").join("Recommended").join("a.json");
        fs::create_dir_all(file.parent().expect("fixture has parent"))
            .expect("failed to create fixture dirs");
        fs::write(&file, b"{}").expect("failed to write fixture");

        let found: Vec<_> = locate_itemset_files(&root)
            .expect("root should glob")
            .collect();
        assert_eq!(found, vec![file]);
    }

    #[test]
    fn locate_is_restartable() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let file = dir.path().join("Ahri").join("Recommended").join("a.json");
        fs::create_dir_all(file.parent().expect("fixture has parent"))
            .expect("failed to create fixture dirs");
        fs::write(&file, b"{}").expect("failed to write fixture");

        let first = locate_itemset_files(dir.path()).expect("glob").count();
        let second = locate_itemset_files(dir.path()).expect("glob").count();
        assert_eq!(first, 1);
        assert_eq!(second, 1);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn non_utf8_root_is_invalid() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = dir.path().join(OsStr::from_bytes(b"Champ\xffions"));
        fs::create_dir_all(&root).expect("failed to create non-UTF-8 dir");

        let err = locate_itemset_files(&root)
            .err()
            .expect("non-UTF-8 root should be rejected");
        assert_eq!(err.code, CoreErrorCode::InvalidRoot);
        assert!(err.message.contains("not valid UTF-8"));
    }
}
