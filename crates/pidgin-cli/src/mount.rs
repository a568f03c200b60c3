//! Backing a fresh content store with a real directory.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use pidgin_encoder::MemoryContentStore;
use pidgin_types::ContentStore;
use tracing::debug;

/// Create a store and, when `dir` is given, `write` every regular file in
/// it under its file name, so `report.md` answers to `/mnt/report.md`.
///
/// Subdirectories are skipped. Files must be UTF-8 text.
///
/// # Errors
///
/// Returns an error if the directory or one of its files cannot be read.
pub fn load_store(dir: Option<&Path>) -> Result<MemoryContentStore> {
    let store = MemoryContentStore::new();
    let Some(dir) = dir else {
        return Ok(store);
    };

    let entries =
        fs::read_dir(dir).with_context(|| format!("cannot read directory {}", dir.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("cannot list {}", dir.display()))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let text = fs::read_to_string(&path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        let name = entry.file_name();
        let handle = store.write(&name.to_string_lossy(), &text);
        debug!(handle = %handle, "mounted file");
    }
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pidgin_types::Part;

    #[test]
    fn no_directory_gives_empty_store() {
        assert!(load_store(None).unwrap().is_empty());
    }

    #[test]
    fn files_are_mounted_by_name() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("report.md"), "# My Report").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();

        let store = load_store(Some(dir.path())).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(
            store.get("/mnt/report.md").unwrap(),
            vec![Part::text("# My Report")]
        );
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_store(Some(&dir.path().join("absent"))).unwrap_err();
        assert!(err.to_string().contains("cannot read directory"));
    }
}
