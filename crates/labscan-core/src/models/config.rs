//! Configuration structures for the analysis pipeline.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::extraction::patterns::{default_patterns, default_ranges};
use crate::extraction::PlausibilityRange;
use crate::models::marker::MarkerName;

/// Main configuration for labscan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LabscanConfig {
    /// Marker extraction tables.
    pub extraction: ExtractionConfig,

    /// Document reading configuration.
    pub document: DocumentConfig,

    /// Report assembly configuration.
    pub report: ReportConfig,
}

/// Pattern and plausibility-range tables for marker extraction.
///
/// Both tables must cover the same markers; this is checked when a
/// [`MarkerTable`](crate::extraction::MarkerTable) is built from them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Candidate patterns per marker, most specific first.
    pub patterns: BTreeMap<MarkerName, Vec<String>>,

    /// Inclusive plausibility range per marker.
    pub ranges: BTreeMap<MarkerName, PlausibilityRange>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            patterns: default_patterns(),
            ranges: default_ranges(),
        }
    }
}

/// Document reading configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// Collapse whitespace and normalize number/unit spacing in PDF text.
    pub clean_text: bool,

    /// Minimum number of non-whitespace characters for a readable document.
    pub min_text_length: usize,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            clean_text: true,
            min_text_length: 1,
        }
    }
}

/// Report assembly configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Number of characters of source text shown in the report preview.
    pub preview_chars: usize,

    /// Include the source text preview in Markdown reports.
    pub include_preview: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            preview_chars: 1000,
            include_preview: true,
        }
    }
}

impl LabscanConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Load(format!("{}: {}", path.display(), e)))?;
        serde_json::from_str(&content)
            .map_err(|e| ConfigError::Load(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| ConfigError::Save(e.to_string()))?;
        std::fs::write(path, content)
            .map_err(|e| ConfigError::Save(format!("{}: {}", path.display(), e)))
    }
}
