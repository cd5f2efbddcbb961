//! Assembling and writing one aggregate rule file.
//!
//! The assembled content is the fixed front-matter block followed by each
//! fragment's contents in order, each with exactly two trailing newlines.
//! Fragment text passes through verbatim — no escaping, no validation.

use std::path::Path;

use tokio::fs;
use tracing::debug;

use mdcbuild_shared::{FRONT_MATTER, Fragment, MdcBuildError, Result};

/// Build the full content for one target from its ordered fragments.
///
/// Fragments are read sequentially; the first unreadable file aborts with
/// its path in the error.
pub async fn assemble(fragments: &[Fragment]) -> Result<String> {
    let mut content = String::from(FRONT_MATTER);

    for fragment in fragments {
        let text = fs::read_to_string(&fragment.path)
            .await
            .map_err(|e| MdcBuildError::io(&fragment.path, e))?;
        content.push_str(&text);
        content.push_str("\n\n");
    }

    Ok(content)
}

/// Write assembled content to its output path, overwriting any existing
/// file. Parent directories are created as needed.
pub async fn write_output(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| MdcBuildError::io(parent, e))?;
    }

    fs::write(path, content)
        .await
        .map_err(|e| MdcBuildError::io(path, e))?;

    debug!(path = %path.display(), bytes = content.len(), "wrote rule file");
    Ok(())
}
