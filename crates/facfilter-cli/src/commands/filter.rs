//! Filter command - validate and filter a single export file.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::Args;
use console::style;
use tracing::{debug, info};

use facfilter_core::{process_with, ArithmeticMode, FacfilterConfig, FilterReport};

/// Arguments for the filter command.
#[derive(Args)]
pub struct FilterArgs {
    /// Input export file
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write a JSON report of dropped rows to this file
    #[arg(long)]
    report: Option<PathBuf>,

    /// List dropped rows and the rules they broke on stderr
    #[arg(long)]
    show_rejected: bool,

    /// Check tax arithmetic with exact decimals instead of floating point
    #[arg(long)]
    decimal: bool,

    /// Ignore a single trailing newline at the end of the input
    #[arg(long)]
    trim_trailing_newline: bool,
}

pub async fn run(args: FilterArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = super::config::load(config_path)?;
    apply_overrides(&mut config, &args);

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Filtering file: {}", args.input.display());

    let (output, report) = filter_file(&args.input, &config).await?;

    if let Some(report_path) = &args.report {
        tokio::fs::write(report_path, serde_json::to_string_pretty(&report)?).await?;
        debug!("Wrote report to {}", report_path.display());
    }

    if args.show_rejected {
        print_rejected(&report);
    }

    if let Some(output_path) = &args.output {
        tokio::fs::write(output_path, &output).await?;
        eprintln!(
            "{} Kept {} of {} rows, output written to {}",
            style("✓").green(),
            report.kept_rows,
            report.total_rows,
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn apply_overrides(config: &mut FacfilterConfig, args: &FilterArgs) {
    if args.decimal {
        config.filter.arithmetic = ArithmeticMode::Decimal;
    }
    if args.trim_trailing_newline {
        config.input.trim_trailing_newline = true;
    }
}

/// Read `path` and run it through the pipeline.
pub async fn filter_file(
    path: &Path,
    config: &FacfilterConfig,
) -> anyhow::Result<(String, FilterReport)> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    process_with(&raw, config).with_context(|| format!("Rejected {}", path.display()))
}

fn print_rejected(report: &FilterReport) {
    if report.rejected.is_empty() {
        eprintln!("{} No rows dropped", style("ℹ").blue());
        return;
    }

    eprintln!(
        "{}",
        style(format!("Dropped {} rows:", report.rejected_count())).yellow()
    );
    for row in &report.rejected {
        let rules: Vec<String> = row
            .violations
            .iter()
            .map(|rule| format!("{} ({})", rule.description(), rule.code()))
            .collect();
        eprintln!("  - line {}: {}", row.line, rules.join("; "));
    }
}
