//! sheet-review CLI - workbook structure review

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use sheet_review::prelude::*;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Workbook reviewed when no path is given
const DEFAULT_WORKBOOK: &str = "MulaOS_Database.xlsx";

#[derive(Parser)]
#[command(name = "sheet-review")]
#[command(
    author,
    version,
    about = "Review the sheet and column structure of a spreadsheet"
)]
struct Cli {
    /// Spreadsheet to review (xlsx, xlsm, csv)
    #[arg(default_value = DEFAULT_WORKBOOK)]
    path: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("warn"));

    let cli = Cli::parse();
    review(&cli.path)
}

fn review(path: &Path) -> Result<()> {
    if !path.is_file() {
        println!("Error: File not found: {}", path.display());
        return Ok(());
    }

    let workbook =
        Workbook::open(path).with_context(|| format!("Failed to open '{}'", path.display()))?;
    log::info!(
        "loaded {} sheets from '{}'",
        workbook.table_count(),
        path.display()
    );

    let report = workbook
        .inspect(&ExpectedSchema::mula_os(), &ReviewOptions::default())
        .with_source(path.display().to_string());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    report
        .render(&mut out)
        .context("Failed to write report")?;
    out.flush()?;

    Ok(())
}
