//! Batch command - filter multiple export files.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use facfilter_core::{FacfilterConfig, FilterReport};

use super::filter::filter_file;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files glob pattern (only .csv files are picked up)
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long, required = true)]
    output_dir: PathBuf,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of filtering a single file.
struct BatchResult {
    path: PathBuf,
    report: Option<FilterReport>,
    error: Option<String>,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = super::config::load(config_path)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    eprintln!(
        "{} Found {} files to filter",
        style("ℹ").blue(),
        files.len()
    );

    tokio::fs::create_dir_all(&args.output_dir).await?;

    let progress = ProgressBar::new(files.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let mut results = Vec::with_capacity(files.len());

    for path in files {
        match filter_to_dir(&path, &args.output_dir, &config).await {
            Ok(report) => {
                results.push(BatchResult {
                    path,
                    report: Some(report),
                    error: None,
                });
            }
            Err(e) => {
                let error_msg = format!("{:#}", e);
                if args.continue_on_error {
                    warn!("Failed to filter {}: {}", path.display(), error_msg);
                    results.push(BatchResult {
                        path,
                        report: None,
                        error: Some(error_msg),
                    });
                } else {
                    error!("Failed to filter {}: {}", path.display(), error_msg);
                    progress.abandon();
                    anyhow::bail!("Filtering failed: {}", error_msg);
                }
            }
        }

        progress.inc(1);
    }

    progress.finish_and_clear();

    if args.summary {
        let summary_path = args.output_dir.join("summary.csv");
        write_summary(&summary_path, &results)?;
        eprintln!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    eprintln!();
    eprintln!(
        "{} Filtered {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    eprintln!(
        "   {} successful, {} failed",
        style(results.len() - failed.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        eprintln!();
        eprintln!("{}", style("Failed files:").red());
        for result in &failed {
            eprintln!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

/// Filter one file and write the result under `output_dir`.
async fn filter_to_dir(
    path: &Path,
    output_dir: &Path,
    config: &FacfilterConfig,
) -> anyhow::Result<FilterReport> {
    let (output, report) = filter_file(path, config).await?;

    let output_path = output_path_for(output_dir, path);
    tokio::fs::write(&output_path, output)
        .await
        .with_context(|| format!("Failed to write {}", output_path.display()))?;
    debug!("Wrote output to {}", output_path.display());

    Ok(report)
}

fn output_path_for(output_dir: &Path, input: &Path) -> PathBuf {
    let file_name = input
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| "export.csv".into());
    output_dir.join(file_name)
}

fn write_summary(path: &Path, results: &[BatchResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "total_rows",
        "kept_rows",
        "rejected_rows",
        "error",
    ])?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        if let Some(report) = &result.report {
            wtr.write_record([
                filename,
                "success",
                &report.total_rows.to_string(),
                &report.kept_rows.to_string(),
                &report.rejected_count().to_string(),
                "",
            ])?;
        } else {
            wtr.write_record([
                filename,
                "error",
                "",
                "",
                "",
                result.error.as_deref().unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
