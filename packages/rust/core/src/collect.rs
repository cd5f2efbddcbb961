//! Fragment discovery for a single target.
//!
//! Scans one source directory (non-recursive) for files matching a
//! glob-style pattern. An absent source directory yields zero fragments —
//! the target still gets a header-only output file.

use std::path::{Path, PathBuf};

use regex::Regex;
use tokio::fs;
use tracing::debug;

use mdcbuild_shared::{Fragment, MdcBuildError, Result};

use crate::order::numeric_prefix;

/// Collect fragment files matching `pattern` directly inside `source_dir`.
///
/// Entries are returned in lexicographic file-name order so that the
/// orderer's tie-breaking does not depend on filesystem iteration order.
pub async fn collect_fragments(source_dir: &Path, pattern: &str) -> Result<Vec<Fragment>> {
    let matcher = pattern_to_regex(pattern)?;

    let mut entries = match fs::read_dir(source_dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(dir = %source_dir.display(), "source directory absent, no fragments");
            return Ok(Vec::new());
        }
        Err(e) => return Err(MdcBuildError::io(source_dir, e)),
    };

    let mut found: Vec<(String, PathBuf)> = Vec::new();

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| MdcBuildError::io(source_dir, e))?
    {
        let file_type = entry
            .file_type()
            .await
            .map_err(|e| MdcBuildError::io(entry.path(), e))?;
        if !file_type.is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        if matcher.is_match(&name) {
            found.push((name, entry.path()));
        }
    }

    found.sort();

    debug!(
        dir = %source_dir.display(),
        pattern,
        count = found.len(),
        "collected fragments"
    );

    Ok(found
        .into_iter()
        .map(|(name, path)| Fragment {
            numeric_prefix: numeric_prefix(&name),
            path,
        })
        .collect())
}

/// Convert a glob-like file pattern to a regex over file names.
fn pattern_to_regex(pattern: &str) -> Result<Regex> {
    let escaped = regex::escape(pattern)
        .replace(r"\*\*", ".*")
        .replace(r"\*", "[^/]*")
        .replace(r"\?", ".");
    Regex::new(&format!("^{escaped}$")).map_err(|_| MdcBuildError::pattern(pattern))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("mdc-collect-test-{}", uuid::Uuid::now_v7()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn pattern_matches_markdown_names() {
        let re = pattern_to_regex("*.md").unwrap();
        assert!(re.is_match("00_setup.md"));
        assert!(re.is_match("extra.md"));
        assert!(!re.is_match("notes.txt"));
        assert!(!re.is_match("draft.md.bak"));
    }

    #[test]
    fn pattern_question_mark_matches_one_char() {
        let re = pattern_to_regex("0?_*.md").unwrap();
        assert!(re.is_match("01_intro.md"));
        assert!(!re.is_match("10_intro.md"));
    }

    #[tokio::test]
    async fn collects_matching_files_in_name_order() {
        let dir = temp_dir();
        std::fs::write(dir.join("01_b.md"), "b").unwrap();
        std::fs::write(dir.join("00_a.md"), "a").unwrap();
        std::fs::write(dir.join("readme.txt"), "skip").unwrap();

        let fragments = collect_fragments(&dir, "*.md").await.unwrap();
        let names: Vec<String> = fragments.iter().map(Fragment::file_name).collect();
        assert_eq!(names, ["00_a.md", "01_b.md"]);
        assert_eq!(fragments[0].numeric_prefix, Some(0));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn skips_subdirectories() {
        let dir = temp_dir();
        std::fs::create_dir(dir.join("nested.md")).unwrap();
        std::fs::write(dir.join("real.md"), "x").unwrap();

        let fragments = collect_fragments(&dir, "*.md").await.unwrap();
        let names: Vec<String> = fragments.iter().map(Fragment::file_name).collect();
        assert_eq!(names, ["real.md"]);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn absent_directory_yields_no_fragments() {
        let dir = temp_dir().join("does-not-exist");
        let fragments = collect_fragments(&dir, "*.md").await.unwrap();
        assert!(fragments.is_empty());
    }

    #[tokio::test]
    async fn empty_directory_yields_no_fragments() {
        let dir = temp_dir();
        let fragments = collect_fragments(&dir, "*.md").await.unwrap();
        assert!(fragments.is_empty());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
