//! Fragment ordering by numeric filename prefix.
//!
//! Fragments are sorted ascending by the leading digits of their file name
//! (`00_setup.md` before `01_intro.md`). Files without a parseable prefix
//! sort after every numbered file. Both functions are pure.

use std::sync::LazyLock;

use regex::Regex;

use mdcbuild_shared::Fragment;

/// Matches leading digits followed by an underscore (`07_naming.md` → `07`).
static PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)_").expect("valid regex"));

/// Parse the numeric prefix from a file name, if present.
pub fn numeric_prefix(file_name: &str) -> Option<u64> {
    PREFIX_RE
        .captures(file_name)
        .and_then(|caps| caps[1].parse().ok())
}

/// Sort fragments ascending by numeric prefix.
///
/// The sort is stable: ties (equal prefixes, and all prefix-less fragments)
/// keep the relative order the collector produced them in.
pub fn sort_fragments(mut fragments: Vec<Fragment>) -> Vec<Fragment> {
    fragments.sort_by_key(|f| f.numeric_prefix.unwrap_or(u64::MAX));
    fragments
}
