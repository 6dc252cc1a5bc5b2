//! Analyze command - full report for a single file.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use labscan_core::models::marker::format_value;
use labscan_core::{AnalysisReport, ReportAnalyzer};

use super::load_config;

/// Arguments for the analyze command.
#[derive(Args)]
pub struct AnalyzeArgs {
    /// Input file (PDF or text)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "markdown")]
    format: OutputFormat,

    /// Leave the source text preview out of the report
    #[arg(long)]
    no_preview: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown report
    Markdown,
    /// JSON output
    Json,
    /// CSV, one row per marker
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Text => "txt",
        }
    }
}

pub async fn run(args: AnalyzeArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if args.no_preview {
        config.report.include_preview = false;
    }
    let analyzer = ReportAnalyzer::new(config)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Analyzing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap(),
    );
    pb.set_message("Analyzing report...");

    let report = analyzer.analyze_file(&args.input);
    pb.finish_and_clear();
    let report = report?;

    let output = format_report(&report, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Report written to {}",
            style("✓").green(),
            output_path.display()
        );
        println!(
            "{} {} markers detected, {} outside reference range",
            style("ℹ").blue(),
            report.markers.len(),
            report.flagged_count()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Render a report in the requested format.
pub fn format_report(report: &AnalysisReport, format: OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Markdown => report.to_markdown(),
        OutputFormat::Json => report.to_json()?,
        OutputFormat::Csv => format_report_csv(report)?,
        OutputFormat::Text => report.to_text(),
    })
}

fn format_report_csv(report: &AnalysisReport) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "marker",
        "value",
        "unit",
        "status",
        "reference_min",
        "reference_max",
    ])?;

    for row in &report.statuses {
        let (min, max) = row
            .reference
            .map(|r| (r.min.to_string(), r.max.to_string()))
            .unwrap_or_default();

        wtr.write_record([
            row.marker.as_str(),
            &format_value(row.value),
            row.unit,
            row.status.label(),
            &min,
            &max,
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}
