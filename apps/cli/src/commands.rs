//! CLI command definitions, routing, and tracing setup.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use mdcbuild_core::clean::{self, CleanOutcome};
use mdcbuild_core::pipeline::{self, BuildConfig, BuildResult, ProgressReporter};
use mdcbuild_shared::{AGGREGATE_EXTENSION, RulesLayout, builtin_targets};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// mdcbuild — assemble Cursor rule files from markdown fragments.
#[derive(Parser)]
#[command(
    name = "mdcbuild",
    version,
    about = "Concatenate markdown fragment directories into .cursor/rules/*.mdc files.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands. Running without one is the same as `build`.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Remove previous outputs and regenerate every rule file.
    Build,

    /// Remove generated rule files without rebuilding.
    Clean,

    /// Print the built-in target table.
    Targets {
        /// Emit the table as JSON.
        #[arg(long)]
        json: bool,
    },
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "mdcbuild=info",
        1 => "mdcbuild=debug",
        _ => "mdcbuild=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command.unwrap_or(Command::Build) {
        Command::Build => cmd_build().await,
        Command::Clean => cmd_clean().await,
        Command::Targets { json } => cmd_targets(json),
    }
}

/// Resolve the layout from the working directory. The target definitions
/// themselves are fixed at build time; only the root moves with the caller.
fn layout_from_cwd() -> Result<RulesLayout> {
    let cwd: PathBuf = std::env::current_dir()
        .map_err(|e| eyre!("cannot determine working directory: {e}"))?;
    Ok(RulesLayout::from_root(cwd))
}

async fn cmd_build() -> Result<()> {
    let layout = layout_from_cwd()?;
    let config = BuildConfig {
        layout,
        targets: builtin_targets(),
    };

    info!(
        root = %config.layout.root.display(),
        targets = config.targets.len(),
        "building rule files"
    );

    let reporter = CliProgress::new();
    let result = pipeline::build_rules(&config, &reporter).await?;

    println!();
    println!("  All rule files generated!");
    println!("  Targets:   {}", result.targets.len());
    println!("  Fragments: {}", result.fragment_total());
    println!("  Output:    {}", config.layout.output_dir.display());
    println!("  Time:      {:.1}s", result.elapsed.as_secs_f64());
    println!();

    Ok(())
}

async fn cmd_clean() -> Result<()> {
    let layout = layout_from_cwd()?;

    info!(output_dir = %layout.output_dir.display(), "cleaning rule files");

    match clean::clean_output_dir(&layout.output_dir, AGGREGATE_EXTENSION).await? {
        CleanOutcome::NotFound => {
            println!(
                "Nothing to clean: {} does not exist",
                layout.output_dir.display()
            );
        }
        CleanOutcome::Cleaned { removed } => {
            println!(
                "Removed {removed} rule file(s) from {}",
                layout.output_dir.display()
            );
        }
    }

    Ok(())
}

fn cmd_targets(json: bool) -> Result<()> {
    let targets = builtin_targets();

    if json {
        println!("{}", serde_json::to_string_pretty(&targets)?);
        return Ok(());
    }

    println!("{:<18} {:<14} {}", "OUTPUT", "SOURCE DIR", "PATTERN");
    for target in &targets {
        println!(
            "{:<18} {:<14} {}",
            target.output_file, target.source_dir, target.file_pattern
        );
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap()
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn target_written(&self, output_file: &str, fragment_count: usize, current: usize, total: usize) {
        self.spinner.println(format!(
            "  [{current}/{total}] {output_file} ({fragment_count} fragments)"
        ));
    }

    fn done(&self, _result: &BuildResult) {
        self.spinner.finish_and_clear();
    }
}
