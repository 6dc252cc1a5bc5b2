//! Data models for markers and configuration.

pub mod config;
pub mod marker;

pub use config::{DocumentConfig, ExtractionConfig, LabscanConfig, ReportConfig};
pub use marker::{MarkerName, MarkerSet, MarkerValue};
