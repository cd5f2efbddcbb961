//! Clean phase: remove previously generated rule files.
//!
//! Runs once before any target is built so stale aggregates from earlier
//! runs never survive. Deletion is irreversible.

use std::path::Path;

use tokio::fs;
use tracing::debug;

use mdcbuild_shared::{MdcBuildError, Result};

/// Outcome of the clean phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanOutcome {
    /// The output directory does not exist. Nothing to do; not an error.
    NotFound,
    /// The directory existed and matching files were deleted.
    Cleaned {
        /// Number of files removed.
        removed: usize,
    },
}

/// Delete every file in `dir` whose extension matches `extension`.
///
/// Only the directory itself is scanned; subdirectories and non-matching
/// files are left untouched.
pub async fn clean_output_dir(dir: &Path, extension: &str) -> Result<CleanOutcome> {
    let mut entries = match fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(dir = %dir.display(), "output directory absent, skipping clean");
            return Ok(CleanOutcome::NotFound);
        }
        Err(e) => return Err(MdcBuildError::io(dir, e)),
    };

    let mut removed = 0;

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| MdcBuildError::io(dir, e))?
    {
        let file_type = entry
            .file_type()
            .await
            .map_err(|e| MdcBuildError::io(entry.path(), e))?;
        if !file_type.is_file() {
            continue;
        }

        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some(extension) {
            continue;
        }

        fs::remove_file(&path)
            .await
            .map_err(|e| MdcBuildError::io(&path, e))?;
        debug!(path = %path.display(), "removed stale rule file");
        removed += 1;
    }

    Ok(CleanOutcome::Cleaned { removed })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("mdc-clean-test-{}", uuid::Uuid::now_v7()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[tokio::test]
    async fn absent_directory_is_not_found() {
        let dir = temp_dir().join("missing");
        let outcome = clean_output_dir(&dir, "mdc").await.unwrap();
        assert_eq!(outcome, CleanOutcome::NotFound);
    }

    #[tokio::test]
    async fn removes_only_matching_extension() {
        let dir = temp_dir();
        std::fs::write(dir.join("00_general.mdc"), "old").unwrap();
        std::fs::write(dir.join("stale.mdc"), "old").unwrap();
        std::fs::write(dir.join("keep.md"), "keep").unwrap();

        let outcome = clean_output_dir(&dir, "mdc").await.unwrap();
        assert_eq!(outcome, CleanOutcome::Cleaned { removed: 2 });

        assert!(!dir.join("00_general.mdc").exists());
        assert!(!dir.join("stale.mdc").exists());
        assert!(dir.join("keep.md").exists());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn empty_directory_cleans_zero_files() {
        let dir = temp_dir();
        let outcome = clean_output_dir(&dir, "mdc").await.unwrap();
        assert_eq!(outcome, CleanOutcome::Cleaned { removed: 0 });

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn leaves_subdirectories_alone() {
        let dir = temp_dir();
        std::fs::create_dir(dir.join("nested.mdc")).unwrap();

        let outcome = clean_output_dir(&dir, "mdc").await.unwrap();
        assert_eq!(outcome, CleanOutcome::Cleaned { removed: 0 });
        assert!(dir.join("nested.mdc").exists());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
