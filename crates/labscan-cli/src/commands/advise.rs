//! Advise command - run one advisor through the toolkit.

use std::path::PathBuf;

use clap::Args;
use tracing::debug;

use labscan_core::tools::{EXERCISE_PLANNER, NUTRITION_ANALYZER, REPORT_READER};
use labscan_core::{MarkerExtractor, Toolkit};

use super::load_config;

/// Arguments for the advise command.
#[derive(Args)]
pub struct AdviseArgs {
    /// Input file (PDF or text)
    #[arg(required = true)]
    input: PathBuf,

    /// Which advice to produce
    #[arg(short, long, value_enum, default_value = "nutrition")]
    kind: AdviceKind,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum AdviceKind {
    /// Diet recommendations
    Nutrition,
    /// Exercise prescription
    Exercise,
}

impl AdviceKind {
    fn tool_name(&self) -> &'static str {
        match self {
            Self::Nutrition => NUTRITION_ANALYZER,
            Self::Exercise => EXERCISE_PLANNER,
        }
    }
}

pub async fn run(args: AdviseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let extractor = MarkerExtractor::from_config(&config.extraction)?;
    let toolkit = Toolkit::new(extractor, config.document.clone());

    let input = args.input.to_string_lossy();
    let text = toolkit.run(REPORT_READER, &input)?;
    debug!("Read {} characters from {}", text.len(), input);

    let advice = toolkit.run(args.kind.tool_name(), &text)?;
    println!("{}", advice);

    Ok(())
}
