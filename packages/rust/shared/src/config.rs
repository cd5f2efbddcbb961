//! Target definitions and output layout for mdcbuild.
//!
//! The seven rule targets are fixed at build time: there is no config file,
//! no environment variable, and no flag that changes them. They are exposed
//! as an explicit immutable list ([`builtin_targets`]) and resolved against
//! a root directory by [`RulesLayout`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Directory (relative to the root's parent) that holds generated rule files.
const OUTPUT_DIR_COMPONENTS: [&str; 2] = [".cursor", "rules"];

/// File extension of generated aggregate files, without the dot.
pub const AGGREGATE_EXTENSION: &str = "mdc";

// ---------------------------------------------------------------------------
// Target
// ---------------------------------------------------------------------------

/// One configured aggregate: a source directory of markdown fragments and
/// the rule file they are concatenated into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    /// Output file name under the rules directory (e.g., `00_general.mdc`).
    pub output_file: String,
    /// Fragment directory name under the root (e.g., `00_general`).
    pub source_dir: String,
    /// Glob-style pattern fragments must match (e.g., `*.md`).
    pub file_pattern: String,
}

impl Target {
    fn new(output_file: &str, source_dir: &str, file_pattern: &str) -> Self {
        Self {
            output_file: output_file.into(),
            source_dir: source_dir.into(),
            file_pattern: file_pattern.into(),
        }
    }
}

/// The built-in target table, one entry per rule category.
pub fn builtin_targets() -> Vec<Target> {
    vec![
        Target::new("00_general.mdc", "00_general", "*.md"),
        Target::new("01_common.mdc", "01_common", "*.md"),
        Target::new("02_frontend.mdc", "02_frontend", "*.md"),
        Target::new("03_backend.mdc", "03_backend", "*.md"),
        Target::new("04_database.mdc", "04_database", "*.md"),
        Target::new("05_infra.mdc", "05_infra", "*.md"),
        Target::new("06_cicd.mdc", "06_cicd", "*.md"),
    ]
}

// ---------------------------------------------------------------------------
// RulesLayout
// ---------------------------------------------------------------------------

/// Resolved on-disk layout for one run.
///
/// Fragment directories live directly under `root`; generated rule files go
/// to `.cursor/rules/` next to the root (i.e., under the root's parent), so
/// running from a `rules/` working directory populates the project's
/// `.cursor/rules/`.
#[derive(Debug, Clone)]
pub struct RulesLayout {
    /// Directory containing the fragment source directories.
    pub root: PathBuf,
    /// Directory receiving the generated `.mdc` files.
    pub output_dir: PathBuf,
}

impl RulesLayout {
    /// Derive the layout from a root directory.
    pub fn from_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let base = root.parent().map(Path::to_path_buf).unwrap_or_else(|| root.clone());
        let output_dir = OUTPUT_DIR_COMPONENTS
            .iter()
            .fold(base, |dir, part| dir.join(part));
        Self { root, output_dir }
    }

    /// Absolute source directory for a target.
    pub fn source_dir(&self, target: &Target) -> PathBuf {
        self.root.join(&target.source_dir)
    }

    /// Absolute output path for a target.
    pub fn output_path(&self, target: &Target) -> PathBuf {
        self.output_dir.join(&target.output_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seven_targets_in_category_order() {
        let targets = builtin_targets();
        assert_eq!(targets.len(), 7);
        assert_eq!(targets[0].output_file, "00_general.mdc");
        assert_eq!(targets[6].output_file, "06_cicd.mdc");

        for target in &targets {
            assert_eq!(target.file_pattern, "*.md");
            assert_eq!(
                target.output_file,
                format!("{}.{AGGREGATE_EXTENSION}", target.source_dir)
            );
        }
    }

    #[test]
    fn target_serializes() {
        let json = serde_json::to_string(&builtin_targets()[0]).expect("serialize target");
        assert!(json.contains("00_general.mdc"));
        let parsed: Target = serde_json::from_str(&json).expect("deserialize target");
        assert_eq!(parsed, builtin_targets()[0]);
    }

    #[test]
    fn layout_resolves_against_root_parent() {
        let layout = RulesLayout::from_root("/work/project/rules");
        assert_eq!(
            layout.output_dir,
            PathBuf::from("/work/project/.cursor/rules")
        );

        let target = &builtin_targets()[2];
        assert_eq!(
            layout.source_dir(target),
            PathBuf::from("/work/project/rules/02_frontend")
        );
        assert_eq!(
            layout.output_path(target),
            PathBuf::from("/work/project/.cursor/rules/02_frontend.mdc")
        );
    }

    #[test]
    fn layout_without_parent_stays_in_root() {
        let layout = RulesLayout::from_root("/");
        assert_eq!(layout.output_dir, PathBuf::from("/.cursor/rules"));
    }
}
