//! Core domain types for mdcbuild.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Front-matter block prepended to every generated rule file.
///
/// Invariant: output content for a target always begins with exactly this
/// block, whether or not any fragments were found.
pub const FRONT_MATTER: &str = "---\ndescription:\nglobs:\nalwaysApply: true\n---\n";

/// A discovered fragment file, valid for one run only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    /// Absolute path to the fragment file.
    pub path: PathBuf,
    /// Leading digits before an underscore in the file name, if any.
    pub numeric_prefix: Option<u64>,
}

impl Fragment {
    /// File name portion of the fragment path.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}
