//! Markers command - show the configured marker table.

use clap::Args;
use console::style;

use labscan_core::MarkerTable;

use super::load_config;

/// Arguments for the markers command.
#[derive(Args)]
pub struct MarkersArgs {
    /// Also list every pattern
    #[arg(long)]
    patterns: bool,
}

pub async fn run(args: MarkersArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let table = MarkerTable::from_config(&config.extraction)?;

    println!("{}", style("Configured markers:").bold());
    println!();

    for rule in table.rules() {
        println!(
            "  {:<12} {:<6} {:>6} - {:<6} {} patterns",
            style(rule.marker.as_str()).cyan(),
            rule.marker.unit(),
            rule.range.min.to_string(),
            rule.range.max.to_string(),
            rule.patterns.len()
        );

        if args.patterns {
            for (i, pattern) in rule.patterns.iter().enumerate() {
                println!("      {}. {}", i + 1, pattern.as_str());
            }
        }
    }

    println!();
    println!(
        "{} {} markers, patterns tried in the order shown",
        style("ℹ").blue(),
        table.rules().len()
    );

    Ok(())
}
