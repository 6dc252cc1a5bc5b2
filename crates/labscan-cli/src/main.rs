//! CLI application for blood test report analysis.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{advise, analyze, batch, config, extract, markers};

/// Blood test report analysis - extract markers and get nutrition and exercise advice
#[derive(Parser)]
#[command(name = "labscan")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a single report and produce a full report
    Analyze(analyze::AnalyzeArgs),

    /// Extract blood markers from a report
    Extract(extract::ExtractArgs),

    /// Run one advisor on a report
    Advise(advise::AdviseArgs),

    /// Analyze multiple reports
    Batch(batch::BatchArgs),

    /// Show the configured marker table
    Markers(markers::MarkersArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Analyze(args) => analyze::run(args, config_path).await,
        Commands::Extract(args) => extract::run(args, config_path).await,
        Commands::Advise(args) => advise::run(args, config_path).await,
        Commands::Batch(args) => batch::run(args, config_path).await,
        Commands::Markers(args) => markers::run(args, config_path).await,
        Commands::Config(args) => config::run(args, config_path).await,
    }
}
