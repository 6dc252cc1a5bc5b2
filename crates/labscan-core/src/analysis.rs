//! End-to-end pipeline: text -> markers -> advisories -> report.

use std::path::Path;
use std::time::Instant;

use chrono::{Local, NaiveDateTime};
use tracing::info;

use crate::advice::{ExerciseAdvisor, NutritionAdvisor};
use crate::document::read_report;
use crate::error::{ConfigError, Result};
use crate::extraction::MarkerExtractor;
use crate::models::config::LabscanConfig;
use crate::report::{AnalysisReport, content_preview, marker_statuses};

/// Runs extraction and both advisors over a report.
#[derive(Debug, Clone)]
pub struct ReportAnalyzer {
    config: LabscanConfig,
    extractor: MarkerExtractor,
    nutrition: NutritionAdvisor,
    exercise: ExerciseAdvisor,
}

impl ReportAnalyzer {
    /// Create an analyzer, compiling the marker table from `config`.
    pub fn new(config: LabscanConfig) -> std::result::Result<Self, ConfigError> {
        let extractor = MarkerExtractor::from_config(&config.extraction)?;
        Ok(Self {
            config,
            extractor,
            nutrition: NutritionAdvisor::new(),
            exercise: ExerciseAdvisor::new(),
        })
    }

    pub fn config(&self) -> &LabscanConfig {
        &self.config
    }

    pub fn extractor(&self) -> &MarkerExtractor {
        &self.extractor
    }

    /// Analyse report text, stamped with the current local time.
    pub fn analyze(&self, text: &str, source: &str) -> AnalysisReport {
        self.analyze_at(text, source, Local::now().naive_local())
    }

    pub fn analyze_at(&self, text: &str, source: &str, generated_at: NaiveDateTime) -> AnalysisReport {
        let start = Instant::now();

        let extraction = self.extractor.extract_detailed(text);
        let markers = extraction.markers;

        let nutrition = self.nutrition.advise_at(&markers, generated_at);
        let exercise = self.exercise.advise_at(&markers, generated_at);

        let preview = self
            .config
            .report
            .include_preview
            .then(|| content_preview(text, self.config.report.preview_chars));

        let processing_time_ms = start.elapsed().as_millis() as u64;
        info!(
            "Analysed {}: {} markers in {}ms",
            source,
            markers.len(),
            processing_time_ms
        );

        AnalysisReport {
            generated_at,
            source: source.to_string(),
            characters: text.chars().count(),
            processing_time_ms,
            statuses: marker_statuses(&markers),
            markers,
            nutrition,
            exercise,
            preview,
            warnings: extraction.warnings,
        }
    }

    /// Read a report file and analyse it. The report source is the file name.
    pub fn analyze_file(&self, path: &Path) -> Result<AnalysisReport> {
        let document = read_report(path, &self.config.document)?;
        let source = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| document.path.clone());

        Ok(self.analyze(&document.text, &source))
    }
}

impl Default for ReportAnalyzer {
    fn default() -> Self {
        Self {
            config: LabscanConfig::default(),
            extractor: MarkerExtractor::default(),
            nutrition: NutritionAdvisor::new(),
            exercise: ExerciseAdvisor::new(),
        }
    }
}
