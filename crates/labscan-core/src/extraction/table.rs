//! Compiled marker table: ordered patterns plus plausibility range per marker.

use regex::Regex;
use tracing::debug;

use super::PlausibilityRange;
use crate::error::ConfigError;
use crate::models::config::ExtractionConfig;
use crate::models::marker::MarkerName;

/// Extraction rule for a single marker.
#[derive(Debug, Clone)]
pub struct MarkerRule {
    /// Marker this rule produces.
    pub marker: MarkerName,
    /// Inclusive plausibility range.
    pub range: PlausibilityRange,
    /// Compiled patterns in priority order.
    pub patterns: Vec<Regex>,
}

/// Validated, compiled extraction table.
///
/// Rules are kept in marker priority order.
#[derive(Debug, Clone)]
pub struct MarkerTable {
    rules: Vec<MarkerRule>,
}

impl MarkerTable {
    /// Build a table from configuration, failing on any table defect.
    pub fn from_config(config: &ExtractionConfig) -> Result<Self, ConfigError> {
        if let Some(marker) = config.patterns.keys().find(|m| !config.ranges.contains_key(m)) {
            return Err(ConfigError::MissingRange(*marker));
        }
        if let Some(marker) = config.ranges.keys().find(|m| !config.patterns.contains_key(m)) {
            return Err(ConfigError::MissingPatterns(*marker));
        }
        if config.patterns.is_empty() {
            return Err(ConfigError::EmptyTable);
        }

        let mut rules = Vec::with_capacity(config.patterns.len());

        for (marker, sources) in &config.patterns {
            let marker = *marker;
            let range = config.ranges[&marker];
            range.validate(marker)?;

            if sources.is_empty() {
                return Err(ConfigError::MissingPatterns(marker));
            }

            let mut patterns = Vec::with_capacity(sources.len());
            for source in sources {
                let regex = Regex::new(source).map_err(|e| ConfigError::InvalidPattern {
                    marker,
                    pattern: source.clone(),
                    source: e,
                })?;
                if regex.captures_len() < 2 {
                    return Err(ConfigError::MissingCapture {
                        marker,
                        pattern: source.clone(),
                    });
                }
                patterns.push(regex);
            }

            rules.push(MarkerRule {
                marker,
                range,
                patterns,
            });
        }

        debug!("Built marker table with {} markers", rules.len());
        Ok(Self { rules })
    }

    /// Rules in priority order.
    pub fn rules(&self) -> &[MarkerRule] {
        &self.rules
    }

    /// Rule for a marker, if configured.
    pub fn rule(&self, marker: MarkerName) -> Option<&MarkerRule> {
        self.rules.iter().find(|r| r.marker == marker)
    }

    pub fn markers(&self) -> Vec<MarkerName> {
        self.rules.iter().map(|r| r.marker).collect()
    }
}

impl Default for MarkerTable {
    fn default() -> Self {
        Self::from_config(&ExtractionConfig::default()).expect("built-in marker table is valid")
    }
}
