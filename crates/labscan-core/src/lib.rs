//! Core library for blood test report analysis.
//!
//! This crate provides:
//! - Report reading (PDF via lopdf/pdf-extract, plain text)
//! - Rule-based blood marker extraction with plausibility ranges
//! - Nutrition and exercise advice derived from the extracted markers
//! - Report assembly (Markdown, JSON, plain text)

pub mod advice;
pub mod analysis;
pub mod document;
pub mod error;
pub mod extraction;
pub mod models;
pub mod report;
pub mod tools;

pub use advice::{
    Advisory, AdvisoryKind, ExerciseAdvisor, ExercisePlan, Intensity, NutritionAdvisor,
    RiskFactor, advise_exercise, advise_nutrition,
};
pub use analysis::ReportAnalyzer;
pub use document::{PdfExtractor, ReportDocument, ReportFormat, ReportSource, read_report};
pub use error::{AdvisoryError, ConfigError, DocumentError, LabscanError, Result};
pub use extraction::{ExtractionResult, MarkerExtractor, MarkerTable, PlausibilityRange};
pub use models::{LabscanConfig, MarkerName, MarkerSet, MarkerValue};
pub use report::{AnalysisReport, MarkerStatus, Status};
pub use tools::{AnalysisTool, ExerciseTool, NutritionTool, ReportReaderTool, Toolkit};

lazy_static::lazy_static! {
    static ref DEFAULT_EXTRACTOR: MarkerExtractor = MarkerExtractor::default();
}

/// Extract validated markers from report text using the built-in tables.
pub fn extract(text: &str) -> MarkerSet {
    DEFAULT_EXTRACTOR.extract(text)
}
