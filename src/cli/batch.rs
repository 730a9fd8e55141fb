//! `barencode batch <jobs.jsonl>`.

use std::path::PathBuf;

use anyhow::{Result, bail};
use barencode::batch::{load_jobs, run_batch};
use clap::Args;
use tracing::info;

use crate::cli::utils::write_output;

#[derive(Args, Debug)]
pub struct BatchArgs {
    /// JSON-lines job file.
    pub file: PathBuf,
    /// Report destination (`-` for stdout).
    #[arg(short, long, default_value = "-")]
    pub output: PathBuf,
    /// Exit with an error when any job failed.
    #[arg(long)]
    pub strict: bool,
}

pub fn handle(args: BatchArgs) -> Result<()> {
    let jobs = load_jobs(&args.file)?;
    info!(jobs = jobs.len(), file = %args.file.display(), "loaded jobs");
    let report = run_batch(&jobs)?;
    write_output(&args.output, &report.to_json()?)?;
    eprintln!(
        "{} succeeded, {} failed (digest {})",
        report.succeeded(),
        report.failed(),
        report.digest
    );
    if args.strict && report.failed() > 0 {
        bail!("{} of {} jobs failed", report.failed(), report.results.len());
    }
    Ok(())
}
