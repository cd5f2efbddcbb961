//! mdcbuild CLI — assembles Cursor rule files from markdown fragments.
//!
//! Concatenates the numbered fragment directories in the working directory
//! into `.cursor/rules/*.mdc` aggregates, one per category.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
