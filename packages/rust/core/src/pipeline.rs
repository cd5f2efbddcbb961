//! End-to-end rule build: clean → per target collect → order → assemble → write.

use std::time::Instant;

use tracing::{info, instrument};

use mdcbuild_shared::{AGGREGATE_EXTENSION, Result, RulesLayout, Target};

use crate::assemble;
use crate::clean::{self, CleanOutcome};
use crate::collect;
use crate::order;

/// Configuration for one build run.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Resolved source/output layout.
    pub layout: RulesLayout,
    /// Targets to build, in order. Immutable for the run.
    pub targets: Vec<Target>,
}

/// Per-target outcome of a successful run.
#[derive(Debug, Clone)]
pub struct TargetReport {
    /// Output file name (e.g., `00_general.mdc`).
    pub output_file: String,
    /// Number of fragments concatenated into it.
    pub fragment_count: usize,
}

/// Result of a full build run.
#[derive(Debug, Clone)]
pub struct BuildResult {
    /// What the clean phase did.
    pub clean: CleanOutcome,
    /// One report per written target, in build order.
    pub targets: Vec<TargetReport>,
    /// Total elapsed time.
    pub elapsed: std::time::Duration,
}

impl BuildResult {
    /// Total fragments across all targets.
    pub fn fragment_total(&self) -> usize {
        self.targets.iter().map(|t| t.fragment_count).sum()
    }
}

/// Progress callback for reporting build status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called after a target's output file has been written.
    fn target_written(&self, output_file: &str, fragment_count: usize, current: usize, total: usize);
    /// Called when the run completes.
    fn done(&self, result: &BuildResult);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn target_written(&self, _output_file: &str, _count: usize, _current: usize, _total: usize) {}
    fn done(&self, _result: &BuildResult) {}
}

/// Run the full build.
///
/// The clean phase runs once, then each target is built strictly in
/// sequence. The first error at any stage aborts the run; outputs written
/// before the failing step stay on disk.
#[instrument(skip_all, fields(root = %config.layout.root.display(), targets = config.targets.len()))]
pub async fn build_rules(
    config: &BuildConfig,
    progress: &dyn ProgressReporter,
) -> Result<BuildResult> {
    let start = Instant::now();

    info!(output_dir = %config.layout.output_dir.display(), "starting rule build");

    progress.phase("Cleaning previous rule files");
    let cleaned = clean::clean_output_dir(&config.layout.output_dir, AGGREGATE_EXTENSION).await?;
    match &cleaned {
        CleanOutcome::NotFound => info!("no previous output directory"),
        CleanOutcome::Cleaned { removed } => info!(removed, "clean phase complete"),
    }

    let total = config.targets.len();
    let mut reports = Vec::with_capacity(total);

    for (i, target) in config.targets.iter().enumerate() {
        progress.phase(&format!("Building {}", target.output_file));

        let source_dir = config.layout.source_dir(target);
        let fragments = collect::collect_fragments(&source_dir, &target.file_pattern).await?;
        let fragments = order::sort_fragments(fragments);

        let content = assemble::assemble(&fragments).await?;

        let output_path = config.layout.output_path(target);
        assemble::write_output(&output_path, &content).await?;

        info!(
            output = %output_path.display(),
            fragments = fragments.len(),
            "target written"
        );
        progress.target_written(&target.output_file, fragments.len(), i + 1, total);

        reports.push(TargetReport {
            output_file: target.output_file.clone(),
            fragment_count: fragments.len(),
        });
    }

    let result = BuildResult {
        clean: cleaned,
        targets: reports,
        elapsed: start.elapsed(),
    };

    progress.done(&result);

    info!(
        targets = result.targets.len(),
        fragments = result.fragment_total(),
        elapsed_ms = result.elapsed.as_millis(),
        "rule build complete"
    );

    Ok(result)
}
