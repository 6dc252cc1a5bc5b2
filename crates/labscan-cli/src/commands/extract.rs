//! Extract command - blood markers only.

use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use labscan_core::extraction::{ExtractionResult, RejectReason};
use labscan_core::models::marker::format_value;
use labscan_core::{MarkerExtractor, read_report};

use super::load_config;

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input file (PDF or text)
    #[arg(required = true)]
    input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: ExtractFormat,

    /// Show which pattern matched each marker and rejected candidates
    #[arg(long)]
    show_matches: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum ExtractFormat {
    /// JSON object of marker values
    Json,
    /// CSV, one row per marker
    Csv,
    /// Plain text list
    Text,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let extractor = MarkerExtractor::from_config(&config.extraction)?;

    let document = read_report(&args.input, &config.document)?;
    info!("Extracting markers from {}", document.path);

    let result = extractor.extract_detailed(&document.text);

    let output = match args.format {
        ExtractFormat::Json if args.show_matches => serde_json::to_string_pretty(&result)?,
        ExtractFormat::Json => serde_json::to_string_pretty(&result.markers)?,
        ExtractFormat::Csv => format_csv(&result)?,
        ExtractFormat::Text => format_text(&result),
    };
    println!("{}", output);

    if args.show_matches && !matches!(args.format, ExtractFormat::Json) {
        print_matches(&result);
    }

    for warning in &result.warnings {
        eprintln!("{} {}", style("⚠").yellow(), warning);
    }

    Ok(())
}

fn format_csv(result: &ExtractionResult) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["marker", "value", "unit"])?;

    for (marker, value) in result.markers.iter() {
        wtr.write_record([marker.as_str(), &format_value(value), marker.unit()])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(result: &ExtractionResult) -> String {
    let mut output = String::new();

    output.push_str(&format!("Markers found: {}\n", result.markers.len()));
    for (marker, value) in result.markers.iter() {
        output.push_str(&format!(
            "  {}: {} {}\n",
            marker.label(),
            format_value(value),
            marker.unit()
        ));
    }

    output
}

fn print_matches(result: &ExtractionResult) {
    println!();
    println!("{}", style("Matches:").bold());
    for m in &result.matches {
        println!(
            "  {} pattern #{} at {}..{}: {:?}",
            m.marker, m.pattern_index, m.position.0, m.position.1, m.source
        );
    }

    if !result.rejected.is_empty() {
        println!("{}", style("Rejected candidates:").bold());
        for r in &result.rejected {
            let reason = match &r.reason {
                RejectReason::Unparseable => "unparseable".to_string(),
                RejectReason::OutOfRange(v) => format!("{} out of range", format_value(*v)),
            };
            println!("  {} pattern #{}: {:?} ({})", r.marker, r.pattern_index, r.raw, reason);
        }
    }

    println!(
        "{} Extraction took {}ms",
        style("ℹ").blue(),
        result.processing_time_ms
    );
}
