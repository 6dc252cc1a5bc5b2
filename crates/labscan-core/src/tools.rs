//! Named single-string tools over the document reader and the advisors.
//!
//! Each tool takes one string and returns one string, so callers that
//! orchestrate steps by name (scripts, agents, the CLI `advise` command)
//! can dispatch through a [`Toolkit`].

use std::path::Path;

use tracing::debug;

use crate::advice::{ExerciseAdvisor, NutritionAdvisor};
use crate::document::read_report;
use crate::error::{AdvisoryError, Result};
use crate::extraction::MarkerExtractor;
use crate::models::config::DocumentConfig;

pub const REPORT_READER: &str = "Blood Test Report Reader";
pub const NUTRITION_ANALYZER: &str = "Nutrition Analyzer";
pub const EXERCISE_PLANNER: &str = "Exercise Planner";

/// A named tool taking one string and returning one string.
pub trait AnalysisTool: Send + Sync {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn run(&self, input: &str) -> Result<String>;
}

/// Reads a report file and returns its text. Input is a file path.
#[derive(Debug, Clone, Default)]
pub struct ReportReaderTool {
    config: DocumentConfig,
}

impl ReportReaderTool {
    pub fn new(config: DocumentConfig) -> Self {
        Self { config }
    }
}

impl AnalysisTool for ReportReaderTool {
    fn name(&self) -> &'static str {
        REPORT_READER
    }

    fn description(&self) -> &'static str {
        "Reads a blood test report (PDF or text) and returns its text"
    }

    fn run(&self, input: &str) -> Result<String> {
        let path = input.trim();
        if path.is_empty() {
            return Err(AdvisoryError::EmptyInput(REPORT_READER).into());
        }
        let document = read_report(Path::new(path), &self.config)?;
        Ok(document.text)
    }
}

/// Extracts markers from report text and returns nutrition advice.
#[derive(Debug, Clone, Default)]
pub struct NutritionTool {
    extractor: MarkerExtractor,
    advisor: NutritionAdvisor,
}

impl NutritionTool {
    pub fn new(extractor: MarkerExtractor) -> Self {
        Self {
            extractor,
            advisor: NutritionAdvisor::new(),
        }
    }
}

impl AnalysisTool for NutritionTool {
    fn name(&self) -> &'static str {
        NUTRITION_ANALYZER
    }

    fn description(&self) -> &'static str {
        "Nutrition analysis based on the blood markers found in report text"
    }

    fn run(&self, input: &str) -> Result<String> {
        if input.trim().is_empty() {
            return Err(AdvisoryError::EmptyInput(NUTRITION_ANALYZER).into());
        }
        let markers = self.extractor.extract(input);
        Ok(self.advisor.advise(&markers).text())
    }
}

/// Extracts markers from report text and returns an exercise plan.
#[derive(Debug, Clone, Default)]
pub struct ExerciseTool {
    extractor: MarkerExtractor,
    advisor: ExerciseAdvisor,
}

impl ExerciseTool {
    pub fn new(extractor: MarkerExtractor) -> Self {
        Self {
            extractor,
            advisor: ExerciseAdvisor::new(),
        }
    }
}

impl AnalysisTool for ExerciseTool {
    fn name(&self) -> &'static str {
        EXERCISE_PLANNER
    }

    fn description(&self) -> &'static str {
        "Exercise planning based on the health markers found in report text"
    }

    fn run(&self, input: &str) -> Result<String> {
        if input.trim().is_empty() {
            return Err(AdvisoryError::EmptyInput(EXERCISE_PLANNER).into());
        }
        let markers = self.extractor.extract(input);
        Ok(self.advisor.advise(&markers).text())
    }
}

/// The three tools, dispatched by name.
pub struct Toolkit {
    tools: Vec<Box<dyn AnalysisTool>>,
}

impl Toolkit {
    /// Build the standard toolkit sharing one extractor.
    pub fn new(extractor: MarkerExtractor, document: DocumentConfig) -> Self {
        Self {
            tools: vec![
                Box::new(ReportReaderTool::new(document)),
                Box::new(NutritionTool::new(extractor.clone())),
                Box::new(ExerciseTool::new(extractor)),
            ],
        }
    }

    pub fn get(&self, name: &str) -> Option<&dyn AnalysisTool> {
        self.tools
            .iter()
            .find(|t| t.name().eq_ignore_ascii_case(name))
            .map(|t| t.as_ref())
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    /// Run the named tool on `input`.
    pub fn run(&self, name: &str, input: &str) -> Result<String> {
        let tool = self
            .get(name)
            .ok_or_else(|| AdvisoryError::UnknownTool(name.to_string()))?;
        debug!("Running tool '{}'", tool.name());
        tool.run(input)
    }
}

impl Default for Toolkit {
    fn default() -> Self {
        Self::new(MarkerExtractor::default(), DocumentConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LabscanError;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    const REPORT: &str = "Hemoglobin: 10.5 g/dL\nTotal Cholesterol 220 mg/dL\nGlucose 135 mg/dL\n";

    fn advisory_error(err: LabscanError) -> Option<AdvisoryError> {
        match err {
            LabscanError::Advisory(e) => Some(e),
            _ => None,
        }
    }

    #[test]
    fn test_toolkit_names() {
        let toolkit = Toolkit::default();
        assert_eq!(
            toolkit.names(),
            vec![REPORT_READER, NUTRITION_ANALYZER, EXERCISE_PLANNER]
        );
        assert!(toolkit.get("nutrition analyzer").is_some());
    }

    #[test]
    fn test_blank_input_is_an_error() {
        let toolkit = Toolkit::default();
        for name in toolkit.names() {
            let err = toolkit.run(name, "   \n").unwrap_err();
            assert_eq!(advisory_error(err), Some(AdvisoryError::EmptyInput(name)));
        }
    }

    #[test]
    fn test_unknown_tool() {
        let err = Toolkit::default().run("Sleep Coach", REPORT).unwrap_err();
        assert_eq!(
            advisory_error(err),
            Some(AdvisoryError::UnknownTool("Sleep Coach".to_string()))
        );
    }

    #[test]
    fn test_nutrition_tool_uses_extracted_markers() {
        let output = Toolkit::default().run(NUTRITION_ANALYZER, REPORT).unwrap();
        assert!(output.contains("Blood Markers Found: 3"));
        assert!(output.contains("LOW HEMOGLOBIN DETECTED (10.5 g/dL)"));
    }

    #[test]
    fn test_exercise_tool_uses_extracted_markers() {
        let output = Toolkit::default().run(EXERCISE_PLANNER, REPORT).unwrap();
        assert!(output.contains("Blood Markers Evaluated: 3"));
        assert!(output.contains("• Intensity: Low to moderate intensity"));
    }

    #[test]
    fn test_text_without_markers_gives_generic_advice() {
        let output = Toolkit::default()
            .run(NUTRITION_ANALYZER, "Patient feels fine.")
            .unwrap();
        assert!(output.contains("GENERAL NUTRITION GUIDANCE"));
    }

    #[test]
    fn test_report_reader_tool() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        file.write_all(REPORT.as_bytes()).unwrap();

        let path = file.path().to_str().unwrap();
        let text = Toolkit::default().run(REPORT_READER, path).unwrap();
        assert_eq!(text, REPORT);
    }
}
