//! Atomic file operations
//!
//! Documents are rewritten whole on every save. Writing to a sibling
//! `.tmp` file, syncing it and renaming it over the target means a crash
//! leaves either the old or the new document on disk, never half of one.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::error::StoreResult;

/// Atomically write content to a file
///
/// 1. Writes content to a .tmp file
/// 2. Syncs the file to disk
/// 3. Renames it to the final path
///
/// Parent directories are created as needed.
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &str) -> StoreResult<()> {
    let path = path.as_ref();
    let temp_path = path.with_extension("tmp");

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut file = File::create(&temp_path)?;
    file.write_all(content.as_bytes())?;
    file.sync_all()?;

    fs::rename(&temp_path, path)?;

    Ok(())
}

/// Remove `.tmp` files left behind by interrupted writes
///
/// Returns the number of files removed.
pub fn cleanup_temp_files<P: AsRef<Path>>(dir: P) -> StoreResult<usize> {
    let dir = dir.as_ref();
    let mut cleaned = 0;

    if !dir.exists() {
        return Ok(0);
    }

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();

        if path.extension().map(|e| e == "tmp").unwrap_or(false) {
            fs::remove_file(&path)?;
            cleaned += 1;
        }
    }

    Ok(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_atomic_write() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("usage_data.json");

        atomic_write(&path, "{\"sessions\": []}").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "{\"sessions\": []}");
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_atomic_write_replaces_existing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("feedback.json");

        atomic_write(&path, "old").unwrap();
        atomic_write(&path, "new").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn test_atomic_write_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("analytics").join("nested").join("usage_data.json");

        atomic_write(&path, "{}").unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_cleanup_temp_files() {
        let temp_dir = TempDir::new().unwrap();

        fs::write(temp_dir.path().join("usage_data.tmp"), "partial").unwrap();
        fs::write(temp_dir.path().join("feedback.tmp"), "partial").unwrap();
        fs::write(temp_dir.path().join("usage_data.json"), "{}").unwrap();

        let cleaned = cleanup_temp_files(temp_dir.path()).unwrap();
        assert_eq!(cleaned, 2);

        assert!(!temp_dir.path().join("usage_data.tmp").exists());
        assert!(temp_dir.path().join("usage_data.json").exists());
    }

    #[test]
    fn test_cleanup_missing_dir() {
        let temp_dir = TempDir::new().unwrap();
        let cleaned = cleanup_temp_files(temp_dir.path().join("absent")).unwrap();
        assert_eq!(cleaned, 0);
    }
}
